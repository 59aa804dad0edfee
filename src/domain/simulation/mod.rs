//! Authoritative scene state and the command handler that mutates it.

pub mod board;
pub mod movement;
pub mod orbit;
pub mod settings;

use bevy::app::AppExit;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use board::BoardState;
pub use movement::{PieceId, PieceMove};
pub use orbit::{CameraRig, LightId};
pub use settings::SceneSettings;

use movement::{try_move_knight, try_move_pawn};
use settings::DETERMINISTIC_SEED;

#[derive(Resource)]
pub struct SeededRng(pub StdRng);

impl SeededRng {
    pub fn from_settings(settings: &SceneSettings) -> Self {
        let rng = match (settings.deterministic, settings.seed) {
            (true, _) => StdRng::seed_from_u64(DETERMINISTIC_SEED),
            (false, Some(seed)) => StdRng::seed_from_u64(seed),
            (false, None) => StdRng::from_entropy(),
        };
        Self(rng)
    }
}

/// The whole command vocabulary the scene understands.
#[derive(Event, Clone, Copy, PartialEq, Debug)]
pub enum SceneCommand {
    /// Signed radians about the board center.
    RotateCamera(f32),
    Zoom(f32),
    MovePawn,
    MoveKnight,
    ToggleLight(LightId),
    ResetBoard,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LastAction {
    Moved(PieceMove),
    Stalled(PieceKind),
    Reset,
}

#[derive(Resource, Default)]
pub struct MoveLog {
    pub pawn_moves: u32,
    pub knight_moves: u32,
    pub stalled: u32,
    pub last: Option<LastAction>,
}

pub struct SimPlugin;
impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneSettings>()
            .init_resource::<BoardState>()
            .init_resource::<MoveLog>()
            .add_event::<SceneCommand>()
            .add_systems(PreStartup, setup_state)
            .add_systems(Update, apply_commands);
    }
}

fn setup_state(mut commands: Commands, settings: Res<SceneSettings>) {
    commands.insert_resource(settings.camera_rig());
    commands.insert_resource(SeededRng::from_settings(&settings));
    info!(
        "scene ready, pivot {:?}, seed {:?}",
        settings.geometry.center(),
        settings.seed
    );
}

pub fn apply_commands(
    mut ev_commands: EventReader<SceneCommand>,
    mut board: ResMut<BoardState>,
    mut rig: ResMut<CameraRig>,
    mut rng: ResMut<SeededRng>,
    settings: Res<SceneSettings>,
    mut log: ResMut<MoveLog>,
    mut ev_exit: EventWriter<AppExit>,
) {
    for command in ev_commands.read() {
        debug!("command {:?}", command);
        match *command {
            SceneCommand::RotateCamera(angle) => rig.rotate(angle),
            SceneCommand::Zoom(delta_z) => rig.zoom(delta_z),
            SceneCommand::ToggleLight(id) => {
                let on = rig.toggle_light(id);
                info!("{} {}", id.label(), if on { "on" } else { "off" });
            }
            SceneCommand::MovePawn => {
                let outcome = try_move_pawn(board.bypass_change_detection(), &mut rng.0);
                record(&mut board, &mut log, PieceKind::Pawn, outcome);
            }
            SceneCommand::MoveKnight => {
                let outcome = try_move_knight(
                    board.bypass_change_detection(),
                    &mut rng.0,
                    &settings.rules,
                );
                record(&mut board, &mut log, PieceKind::Knight, outcome);
            }
            SceneCommand::ResetBoard => {
                board.initialize();
                log.last = Some(LastAction::Reset);
                info!("board reset");
            }
            SceneCommand::Quit => {
                info!("quit requested");
                ev_exit.send(AppExit::Success);
            }
        }
    }
}

fn record(
    board: &mut ResMut<BoardState>,
    log: &mut MoveLog,
    kind: PieceKind,
    outcome: Option<PieceMove>,
) {
    match outcome {
        Some(mv) => {
            board.set_changed();
            match mv.piece {
                PieceId::Pawn(_) => log.pawn_moves += 1,
                PieceId::Knight(_) => log.knight_moves += 1,
            }
            info!("{:?} {} -> {}", mv.piece, mv.from, mv.to);
            log.last = Some(LastAction::Moved(mv));
        }
        None => {
            log.stalled += 1;
            debug!("no legal {:?} move", kind);
            log.last = Some(LastAction::Stalled(kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::event::Events;

    fn test_app() -> App {
        let settings = SceneSettings {
            seed: Some(9),
            ..default()
        };
        let mut app = App::new();
        app.add_event::<SceneCommand>()
            .add_event::<AppExit>()
            .insert_resource(BoardState::default())
            .insert_resource(settings.camera_rig())
            .insert_resource(SeededRng::from_settings(&settings))
            .insert_resource(settings)
            .init_resource::<MoveLog>()
            .add_systems(Update, apply_commands);
        app
    }

    fn send(app: &mut App, command: SceneCommand) {
        app.world_mut().send_event(command);
        app.update();
    }

    #[test]
    fn move_commands_reach_the_board() {
        let mut app = test_app();
        send(&mut app, SceneCommand::MovePawn);
        send(&mut app, SceneCommand::MoveKnight);

        let log = app.world().resource::<MoveLog>();
        assert_eq!(log.pawn_moves, 1);
        assert_eq!(log.knight_moves, 1);
        assert_eq!(log.stalled, 0);
        assert!(matches!(log.last, Some(LastAction::Moved(_))));

        let board = app.world().resource::<BoardState>();
        assert_ne!(*board, BoardState::default());
        assert!(board.is_consistent());
    }

    #[test]
    fn reset_restores_opening() {
        let mut app = test_app();
        for _ in 0..5 {
            send(&mut app, SceneCommand::MovePawn);
        }
        send(&mut app, SceneCommand::ResetBoard);
        assert_eq!(*app.world().resource::<BoardState>(), BoardState::default());
        assert_eq!(
            app.world().resource::<MoveLog>().last,
            Some(LastAction::Reset)
        );
    }

    #[test]
    fn camera_commands_reach_the_rig() {
        let mut app = test_app();
        let start = app.world().resource::<CameraRig>().clone();
        send(&mut app, SceneCommand::Zoom(-0.25));
        send(&mut app, SceneCommand::RotateCamera(0.3));
        send(&mut app, SceneCommand::ToggleLight(LightId::Key));

        let rig = app.world().resource::<CameraRig>();
        assert_eq!(rig.eye().z, start.eye().z - 0.25);
        assert_ne!(rig.eye().truncate(), start.eye().truncate());
        assert!(!rig.light(LightId::Key).enabled);
        assert!(rig.light(LightId::Fill).enabled);
    }

    #[test]
    fn quit_emits_app_exit() {
        let mut app = test_app();
        assert!(app.world().resource::<Events<AppExit>>().is_empty());
        send(&mut app, SceneCommand::Quit);
        assert!(!app.world().resource::<Events<AppExit>>().is_empty());
    }

    #[test]
    fn same_seed_same_moves() {
        let mut a = test_app();
        let mut b = test_app();
        for _ in 0..10 {
            send(&mut a, SceneCommand::MovePawn);
            send(&mut b, SceneCommand::MovePawn);
        }
        assert_eq!(
            *a.world().resource::<BoardState>(),
            *b.world().resource::<BoardState>()
        );
    }
}
