use bevy::prelude::*;

use super::movement::MoveRules;
use super::orbit::{BoardGeometry, CameraRig};

/// Seed used while the deterministic toggle is on.
pub const DETERMINISTIC_SEED: u64 = 0;

#[derive(Resource, Clone)]
pub struct SceneSettings {
    /// Startup seed for piece selection; entropy when `None`.
    pub seed: Option<u64>,
    pub deterministic: bool,
    pub rules: MoveRules,
    pub geometry: BoardGeometry,
    /// Radians per rotate command.
    pub rotate_step: f32,
    pub zoom_step: f32,
    pub camera_eye: Vec3,
    pub light_positions: [Vec3; 2],
    pub show_help: bool,
    pub show_status: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            seed: None,
            deterministic: false,
            rules: MoveRules::default(),
            geometry: BoardGeometry::default(),
            rotate_step: 10.0_f32.to_radians(),
            zoom_step: 0.25,
            camera_eye: Vec3::new(4.0, -5.0, 10.0),
            light_positions: [Vec3::new(0.0, 0.0, 1.0), Vec3::new(5.0, 5.0, 8.0)],
            show_help: true,
            show_status: true,
        }
    }
}

impl SceneSettings {
    pub fn camera_rig(&self) -> CameraRig {
        CameraRig::new(
            self.geometry.center(),
            self.camera_eye,
            self.light_positions,
        )
    }
}
