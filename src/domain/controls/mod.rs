use crate::domain::simulation::{apply_commands, LightId, SceneCommand, SceneSettings};
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

#[derive(Resource, Clone)]
pub struct Keybinds {
    pub rotate: KeyCode,
    pub rotate_back: KeyCode,
    pub zoom_in: KeyCode,
    pub zoom_out: KeyCode,
    pub move_pawn: KeyCode,
    pub move_knight: KeyCode,
    pub fill_light: KeyCode,
    pub key_light: KeyCode,
    pub reset: KeyCode,
    pub quit: KeyCode,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            rotate: KeyCode::KeyR,
            rotate_back: KeyCode::KeyE,
            zoom_in: KeyCode::KeyD,
            zoom_out: KeyCode::KeyU,
            move_pawn: KeyCode::KeyP,
            move_knight: KeyCode::KeyK,
            fill_light: KeyCode::Digit0,
            key_light: KeyCode::Digit1,
            reset: KeyCode::Backspace,
            quit: KeyCode::KeyQ,
        }
    }
}

impl Keybinds {
    /// Labelled bindings, in the order the settings panel lists them.
    pub fn slots_mut(&mut self) -> [(&'static str, &mut KeyCode); 10] {
        [
            ("Rotate", &mut self.rotate),
            ("Rotate back", &mut self.rotate_back),
            ("Zoom in", &mut self.zoom_in),
            ("Zoom out", &mut self.zoom_out),
            ("Move pawn", &mut self.move_pawn),
            ("Move knight", &mut self.move_knight),
            ("Light 0", &mut self.fill_light),
            ("Light 1", &mut self.key_light),
            ("Reset board", &mut self.reset),
            ("Quit", &mut self.quit),
        ]
    }

    pub fn slots(&self) -> [(&'static str, KeyCode); 10] {
        let mut copy = self.clone();
        copy.slots_mut().map(|(label, key)| (label, *key))
    }

    /// Binds `action` to `key`. An action already holding `key` takes over
    /// the old key of `action`, so no key ever maps to two commands.
    pub fn rebind(&mut self, action: &str, key: KeyCode) {
        let slots = self.slots();
        let Some(&(_, previous)) = slots.iter().find(|(label, _)| *label == action) else {
            return;
        };
        for (label, slot) in self.slots_mut() {
            if label == action {
                *slot = key;
            } else if *slot == key {
                *slot = previous;
            }
        }
    }

    /// Commands bound to keys pressed this frame, in a fixed order.
    pub fn commands_for(
        &self,
        keys: &ButtonInput<KeyCode>,
        settings: &SceneSettings,
    ) -> Vec<SceneCommand> {
        let bindings = [
            (self.rotate, SceneCommand::RotateCamera(-settings.rotate_step)),
            (self.rotate_back, SceneCommand::RotateCamera(settings.rotate_step)),
            (self.zoom_in, SceneCommand::Zoom(-settings.zoom_step)),
            (self.zoom_out, SceneCommand::Zoom(settings.zoom_step)),
            (self.move_pawn, SceneCommand::MovePawn),
            (self.move_knight, SceneCommand::MoveKnight),
            (self.fill_light, SceneCommand::ToggleLight(LightId::Fill)),
            (self.key_light, SceneCommand::ToggleLight(LightId::Key)),
            (self.reset, SceneCommand::ResetBoard),
            (self.quit, SceneCommand::Quit),
        ];
        bindings
            .into_iter()
            .filter(|(key, _)| keys.just_pressed(*key))
            .map(|(_, command)| command)
            .collect()
    }
}

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Keybinds>().add_systems(
            Update,
            (
                (keyboard_commands, wheel_zoom).before(apply_commands),
                help_toggle,
                status_toggle,
            ),
        );
    }
}

fn keyboard_commands(
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    settings: Res<SceneSettings>,
    mut ev_commands: EventWriter<SceneCommand>,
) {
    ev_commands.send_batch(keybinds.commands_for(&keys, &settings));
}

fn wheel_zoom(
    mut scroll_evr: EventReader<MouseWheel>,
    settings: Res<SceneSettings>,
    mut ev_commands: EventWriter<SceneCommand>,
) {
    for ev in scroll_evr.read() {
        if ev.y.abs() > 1e-4 {
            ev_commands.send(SceneCommand::Zoom(-ev.y.signum() * settings.zoom_step));
        }
    }
}

fn help_toggle(mut settings: ResMut<SceneSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyH) {
        settings.show_help = !settings.show_help;
    }
}

fn status_toggle(mut settings: ResMut<SceneSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::F3) {
        settings.show_status = !settings.show_status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::simulation::{BoardState, MoveLog, SeededRng};
    use bevy::app::AppExit;

    #[test]
    fn default_bindings_map_to_commands() {
        let settings = SceneSettings::default();
        let keybinds = Keybinds::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyP);
        keys.press(KeyCode::KeyR);
        keys.press(KeyCode::Digit1);

        let commands = keybinds.commands_for(&keys, &settings);
        assert_eq!(
            commands,
            vec![
                SceneCommand::RotateCamera(-settings.rotate_step),
                SceneCommand::MovePawn,
                SceneCommand::ToggleLight(LightId::Key),
            ]
        );
    }

    #[test]
    fn held_keys_fire_once() {
        let settings = SceneSettings::default();
        let keybinds = Keybinds::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyK);
        assert_eq!(keybinds.commands_for(&keys, &settings).len(), 1);
        keys.clear();
        assert!(keybinds.commands_for(&keys, &settings).is_empty());
    }

    #[test]
    fn slots_write_through() {
        let mut keybinds = Keybinds::default();
        for (label, key) in keybinds.slots_mut() {
            if label == "Move knight" {
                *key = KeyCode::KeyN;
            }
        }
        assert_eq!(keybinds.move_knight, KeyCode::KeyN);
    }

    #[test]
    fn rebinding_moves_the_command() {
        let settings = SceneSettings::default();
        let keybinds = Keybinds {
            move_pawn: KeyCode::KeyJ,
            ..Keybinds::default()
        };
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyP);
        assert!(keybinds.commands_for(&keys, &settings).is_empty());
        keys.press(KeyCode::KeyJ);
        assert_eq!(
            keybinds.commands_for(&keys, &settings),
            vec![SceneCommand::MovePawn]
        );
    }

    #[test]
    fn rebinding_to_a_used_key_swaps() {
        let settings = SceneSettings::default();
        let mut keybinds = Keybinds::default();
        keybinds.rebind("Quit", KeyCode::KeyP);
        assert_eq!(keybinds.quit, KeyCode::KeyP);
        assert_eq!(keybinds.move_pawn, KeyCode::KeyQ);

        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyP);
        assert_eq!(
            keybinds.commands_for(&keys, &settings),
            vec![SceneCommand::Quit]
        );

        let bound = keybinds.slots().map(|(_, key)| key);
        for (i, key) in bound.iter().enumerate() {
            assert!(!bound[i + 1..].contains(key), "{:?} bound twice", key);
        }
    }

    #[test]
    fn unknown_action_is_ignored() {
        let mut keybinds = Keybinds::default();
        keybinds.rebind("Fly", KeyCode::KeyP);
        assert_eq!(keybinds.move_pawn, KeyCode::KeyP);
    }

    #[test]
    fn key_press_lands_in_the_same_frame() {
        let settings = SceneSettings::default();
        let mut app = App::new();
        app.add_event::<SceneCommand>()
            .add_event::<MouseWheel>()
            .add_event::<AppExit>()
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(BoardState::default())
            .insert_resource(settings.camera_rig())
            .insert_resource(SeededRng::from_settings(&settings))
            .insert_resource(settings)
            .init_resource::<MoveLog>()
            .add_plugins(InputPlugin)
            .add_systems(Update, apply_commands);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyP);
        app.update();

        assert_eq!(app.world().resource::<MoveLog>().pawn_moves, 1);
    }
}
