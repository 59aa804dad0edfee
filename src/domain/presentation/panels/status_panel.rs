use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy_egui::egui;

use crate::domain::simulation::{CameraRig, LastAction, LightId, MoveLog, SceneSettings};

fn describe(last: Option<LastAction>) -> String {
    match last {
        None => "nothing yet".to_string(),
        Some(LastAction::Moved(mv)) => format!("{:?} {} -> {}", mv.piece, mv.from, mv.to),
        Some(LastAction::Stalled(kind)) => format!("no legal {:?} move", kind),
        Some(LastAction::Reset) => "board reset".to_string(),
    }
}

pub fn show_status_panel(
    ctx: &mut egui::Context,
    settings: &SceneSettings,
    log: &MoveLog,
    rig: &CameraRig,
    diagnostics: &DiagnosticsStore,
) {
    if !settings.show_status {
        return;
    }
    egui::Window::new("Status").show(ctx, |ui| {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                ui.label(format!("FPS: {:.1}", value));
            }
        }
        ui.label(format!("Pawn moves: {}", log.pawn_moves));
        ui.label(format!("Knight moves: {}", log.knight_moves));
        ui.label(format!("Stalled: {}", log.stalled));
        ui.label(format!("Last: {}", describe(log.last)));

        ui.separator();

        ui.label(format!("Heading: {:.0}°", rig.heading().to_degrees()));
        ui.label(format!("Camera height: {:.2}", rig.eye().z));
        for id in LightId::ALL {
            let state = if rig.light(id).enabled { "on" } else { "off" };
            ui.label(format!("{}: {}", id.label(), state));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::simulation::board::Square;
    use crate::domain::simulation::{PieceId, PieceKind, PieceMove};

    #[test]
    fn describes_last_action() {
        assert_eq!(describe(None), "nothing yet");
        let mv = PieceMove {
            piece: PieceId::Knight(0),
            from: Square::new(0, 1),
            to: Square::new(2, 2),
        };
        assert_eq!(describe(Some(LastAction::Moved(mv))), "Knight(0) b1 -> c3");
        assert_eq!(
            describe(Some(LastAction::Stalled(PieceKind::Pawn))),
            "no legal Pawn move"
        );
    }
}
