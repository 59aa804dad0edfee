//! Camera and light orbit around the board.
//!
//! Positions are kept in board space: x runs along the columns, y along the
//! rows and z points up off the board.

use bevy::prelude::*;

use super::board::BOARD_SIZE;

/// Physical layout of the board in board space.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BoardGeometry {
    pub square_size: f32,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self { square_size: 1.0 }
    }
}

impl BoardGeometry {
    pub fn extent(&self) -> f32 {
        self.square_size * BOARD_SIZE as f32
    }

    /// Board center at table height. The orbit pivot.
    pub fn center(&self) -> Vec3 {
        let half = self.extent() * 0.5;
        Vec3::new(half, half, 0.0)
    }

    /// Center of a square at height `z`.
    pub fn square_center(&self, row: u8, col: u8, z: f32) -> Vec3 {
        Vec3::new(
            (col as f32 + 0.5) * self.square_size,
            (row as f32 + 0.5) * self.square_size,
            z,
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LightId {
    Fill,
    Key,
}

impl LightId {
    pub const ALL: [LightId; 2] = [LightId::Fill, LightId::Key];

    pub fn index(&self) -> usize {
        match self {
            LightId::Fill => 0,
            LightId::Key => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LightId::Fill => "Light 0 (fill)",
            LightId::Key => "Light 1 (key)",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct OrbitLight {
    pub position: Vec3,
    pub enabled: bool,
}

#[derive(Resource, Clone, PartialEq, Debug)]
pub struct CameraRig {
    pivot: Vec3,
    eye: Vec3,
    lights: [OrbitLight; 2],
    pending: f32,
    /// Accumulated yaw since startup, for display only.
    heading: f32,
}

impl CameraRig {
    pub fn new(pivot: Vec3, eye: Vec3, lights: [Vec3; 2]) -> Self {
        Self {
            pivot,
            eye,
            lights: lights.map(|position| OrbitLight {
                position,
                enabled: true,
            }),
            pending: 0.0,
            heading: 0.0,
        }
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn light(&self, id: LightId) -> &OrbitLight {
        &self.lights[id.index()]
    }

    pub fn pending(&self) -> f32 {
        self.pending
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Turns the camera and both lights about the pivot's vertical axis by
    /// `delta` radians. One-shot: nothing carries over to the next call.
    pub fn rotate(&mut self, delta: f32) {
        self.pending += delta;
        let (sin, cos) = self.pending.sin_cos();
        let pivot = self.pivot;
        let orbit = |p: Vec3| {
            let x = p.x - pivot.x;
            let y = p.y - pivot.y;
            Vec3::new(
                cos * x - sin * y + pivot.x,
                sin * x + cos * y + pivot.y,
                p.z,
            )
        };
        self.eye = orbit(self.eye);
        for light in &mut self.lights {
            light.position = orbit(light.position);
        }
        self.heading = (self.heading + self.pending).rem_euclid(std::f32::consts::TAU);
        self.pending = 0.0;
    }

    pub fn zoom(&mut self, delta_z: f32) {
        self.eye.z += delta_z;
    }

    /// Returns the light's new state.
    pub fn toggle_light(&mut self, id: LightId) -> bool {
        let light = &mut self.lights[id.index()];
        light.enabled = !light.enabled;
        light.enabled
    }
}
