use bevy_egui::egui;

use crate::domain::controls::Keybinds;
use crate::domain::simulation::SceneSettings;

pub fn show_help_panel(ctx: &mut egui::Context, settings: &SceneSettings, keybinds: &Keybinds) {
    if settings.show_help {
        egui::Window::new("Help").show(ctx, |ui| {
            for (label, key) in keybinds.slots() {
                ui.label(format!("{:?}: {}", key, label));
            }
            ui.label("Mouse Wheel: Zoom");
            ui.label("H: Toggle Help");
            ui.label("F3: Toggle Status");
        });
    }
}
