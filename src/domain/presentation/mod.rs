mod panels;

use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::domain::controls::Keybinds;
use crate::domain::simulation::{
    apply_commands, CameraRig, MoveLog, SceneCommand, SceneSettings, SeededRng,
};
use panels::{show_help_panel, show_settings_panel, show_status_panel};

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, ui_system.before(apply_commands));
    }
}

#[allow(clippy::too_many_arguments)]
fn ui_system(
    mut commands: Commands,
    mut contexts: EguiContexts,
    mut settings: ResMut<SceneSettings>,
    mut keybinds: ResMut<Keybinds>,
    mut ev_commands: EventWriter<SceneCommand>,
    rig: Res<CameraRig>,
    log: Res<MoveLog>,
    diagnostics: Res<DiagnosticsStore>,
    mut rebinding_state: Local<Option<String>>,
) {
    let mut pressed_key = None;
    contexts.ctx_mut().input(|i| {
        for event in &i.events {
            if let egui::Event::Key {
                key, pressed: true, ..
            } = event
            {
                pressed_key = Some(*key);
            }
        }
    });

    let response = show_settings_panel(
        contexts.ctx_mut(),
        &mut settings,
        &mut keybinds,
        &rig,
        &mut ev_commands,
        &mut rebinding_state,
        pressed_key,
    );
    if response.reseed {
        info!("reseeding, deterministic = {}", settings.deterministic);
        commands.insert_resource(SeededRng::from_settings(&settings));
    }

    show_status_panel(contexts.ctx_mut(), &settings, &log, &rig, &diagnostics);
    show_help_panel(contexts.ctx_mut(), &settings, &keybinds);
}
