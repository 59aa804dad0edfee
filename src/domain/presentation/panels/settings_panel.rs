use bevy::prelude::*;
use bevy_egui::egui;

use crate::domain::controls::Keybinds;
use crate::domain::simulation::{CameraRig, LightId, SceneCommand, SceneSettings};

/// What the settings window asks the caller to do after drawing.
#[derive(Default)]
pub struct SettingsResponse {
    pub reseed: bool,
}

#[allow(clippy::too_many_arguments)]
pub fn show_settings_panel(
    ctx: &mut egui::Context,
    settings: &mut SceneSettings,
    keybinds: &mut Keybinds,
    rig: &CameraRig,
    ev_commands: &mut EventWriter<SceneCommand>,
    rebinding_state: &mut Option<String>,
    pressed_key: Option<egui::Key>,
) -> SettingsResponse {
    let mut response = SettingsResponse::default();

    egui::Window::new("Settings").show(ctx, |ui| {
        if ui
            .checkbox(&mut settings.deterministic, "Deterministic")
            .changed()
        {
            response.reseed = true;
        }
        ui.checkbox(
            &mut settings.rules.knights_reach_edges,
            "Knights may land on the edge",
        );

        ui.separator();

        let mut step_degrees = settings.rotate_step.to_degrees();
        if ui
            .add(egui::Slider::new(&mut step_degrees, 1.0..=45.0).text("Rotate step (°)"))
            .changed()
        {
            settings.rotate_step = step_degrees.to_radians();
        }
        ui.add(egui::Slider::new(&mut settings.zoom_step, 0.05..=1.0).text("Zoom step"));

        ui.separator();

        for id in LightId::ALL {
            let mut enabled = rig.light(id).enabled;
            if ui.checkbox(&mut enabled, id.label()).changed() {
                ev_commands.send(SceneCommand::ToggleLight(id));
            }
        }
        ui.horizontal(|ui| {
            if ui.button("Move pawn").clicked() {
                ev_commands.send(SceneCommand::MovePawn);
            }
            if ui.button("Move knight").clicked() {
                ev_commands.send(SceneCommand::MoveKnight);
            }
            if ui.button("Reset board").clicked() {
                ev_commands.send(SceneCommand::ResetBoard);
            }
        });

        ui.separator();

        ui.label("Keybinds");

        for (action, key) in keybinds.slots_mut() {
            ui.horizontal(|ui| {
                ui.label(action);
                let button_text = if rebinding_state.as_deref() == Some(action) {
                    "Press a key...".to_string()
                } else {
                    format!("{:?}", key)
                };
                if ui.button(button_text).clicked() {
                    *rebinding_state = Some(action.to_string());
                }
            });
        }

        if let Some(action) = rebinding_state.take() {
            match pressed_key.and_then(egui_to_bevy_keycode) {
                Some(key_code) => keybinds.rebind(&action, key_code),
                None => *rebinding_state = Some(action),
            }
        }
    });

    response
}

fn egui_to_bevy_keycode(key: egui::Key) -> Option<KeyCode> {
    let code = match key {
        egui::Key::A => KeyCode::KeyA,
        egui::Key::B => KeyCode::KeyB,
        egui::Key::C => KeyCode::KeyC,
        egui::Key::D => KeyCode::KeyD,
        egui::Key::E => KeyCode::KeyE,
        egui::Key::F => KeyCode::KeyF,
        egui::Key::G => KeyCode::KeyG,
        egui::Key::I => KeyCode::KeyI,
        egui::Key::J => KeyCode::KeyJ,
        egui::Key::K => KeyCode::KeyK,
        egui::Key::L => KeyCode::KeyL,
        egui::Key::M => KeyCode::KeyM,
        egui::Key::N => KeyCode::KeyN,
        egui::Key::O => KeyCode::KeyO,
        egui::Key::P => KeyCode::KeyP,
        egui::Key::Q => KeyCode::KeyQ,
        egui::Key::R => KeyCode::KeyR,
        egui::Key::S => KeyCode::KeyS,
        egui::Key::T => KeyCode::KeyT,
        egui::Key::U => KeyCode::KeyU,
        egui::Key::V => KeyCode::KeyV,
        egui::Key::W => KeyCode::KeyW,
        egui::Key::X => KeyCode::KeyX,
        egui::Key::Y => KeyCode::KeyY,
        egui::Key::Z => KeyCode::KeyZ,
        egui::Key::Num0 => KeyCode::Digit0,
        egui::Key::Num1 => KeyCode::Digit1,
        egui::Key::Num2 => KeyCode::Digit2,
        egui::Key::Num3 => KeyCode::Digit3,
        egui::Key::Num4 => KeyCode::Digit4,
        egui::Key::Num5 => KeyCode::Digit5,
        egui::Key::Num6 => KeyCode::Digit6,
        egui::Key::Num7 => KeyCode::Digit7,
        egui::Key::Num8 => KeyCode::Digit8,
        egui::Key::Num9 => KeyCode::Digit9,
        egui::Key::ArrowUp => KeyCode::ArrowUp,
        egui::Key::ArrowDown => KeyCode::ArrowDown,
        egui::Key::ArrowLeft => KeyCode::ArrowLeft,
        egui::Key::ArrowRight => KeyCode::ArrowRight,
        egui::Key::Space => KeyCode::Space,
        egui::Key::Enter => KeyCode::Enter,
        egui::Key::Backspace => KeyCode::Backspace,
        egui::Key::Escape => KeyCode::Escape,
        egui::Key::Tab => KeyCode::Tab,
        // H and F3 toggle the overlays.
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_keys_cannot_be_bound() {
        assert_eq!(egui_to_bevy_keycode(egui::Key::H), None);
        assert_eq!(egui_to_bevy_keycode(egui::Key::F3), None);
        assert_eq!(egui_to_bevy_keycode(egui::Key::K), Some(KeyCode::KeyK));
    }
}
