//! Board and piece geometry, re-synced from committed state.
//!
//! Scene state lives in board space (z up); Bevy is y up. `to_world` is the
//! only place the two meet.

use bevy::prelude::*;

use crate::domain::simulation::board::{
    decorative_pieces, DecorKind, Side, BOARD_SIZE, KNIGHT_COUNT, PAWN_COUNT,
};
use crate::domain::simulation::orbit::BoardGeometry;
use crate::domain::simulation::{apply_commands, BoardState, CameraRig, LightId, SceneSettings};
use crate::MainCamera;

const PAWN_RADIUS: f32 = 0.375;
const KNIGHT_RADIUS: f32 = 0.2;
const KNIGHT_HEIGHT: f32 = 0.375;
const SQUARE_THICKNESS: f32 = 0.05;

const FILL_LUMENS: f32 = 250_000.0;
const KEY_LUMENS: f32 = 1_500_000.0;

#[derive(Component)]
pub struct PawnMarker(pub usize);

#[derive(Component)]
pub struct KnightMarker(pub usize);

#[derive(Component)]
pub struct SceneLight {
    pub id: LightId,
    pub lumens: f32,
}

pub struct RenderPlugin;
impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 80.0,
        })
        .add_systems(Startup, (spawn_board, spawn_pieces, spawn_lights))
        .add_systems(Update, (sync_pieces, sync_camera, sync_lights).after(apply_commands));
    }
}

/// Board space (x col, y row, z up) to Bevy world space (y up).
pub fn to_world(p: Vec3) -> Vec3 {
    Vec3::new(p.x, p.z, -p.y)
}

fn side_color(side: Side) -> Color {
    match side {
        Side::White => Color::srgb_u8(140, 140, 135),
        Side::Black => Color::srgb_u8(150, 75, 0),
    }
}

fn spawn_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<SceneSettings>,
) {
    let geometry = settings.geometry;
    let size = geometry.square_size;
    let tile = meshes.add(Cuboid::new(size, SQUARE_THICKNESS, size));
    let dark = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        perceptual_roughness: 0.6,
        ..default()
    });
    let light = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.6,
        ..default()
    });

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let material = if (row + col) % 2 == 0 {
                dark.clone()
            } else {
                light.clone()
            };
            let center = geometry.square_center(row, col, -SQUARE_THICKNESS * 0.5);
            commands.spawn(PbrBundle {
                mesh: tile.clone(),
                material,
                transform: Transform::from_translation(to_world(center)),
                ..default()
            });
        }
    }
}

fn spawn_pieces(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<SceneSettings>,
    board: Res<BoardState>,
) {
    let geometry = settings.geometry;
    let side_material = |side| {
        let mut material = StandardMaterial::from(side_color(side));
        material.reflectance = 0.5;
        material
    };
    let white = materials.add(side_material(Side::White));
    let black = materials.add(side_material(Side::Black));
    let material_for = |side| match side {
        Side::White => white.clone(),
        Side::Black => black.clone(),
    };

    let pawn_mesh = meshes.add(Sphere::new(PAWN_RADIUS).mesh().uv(32, 18));
    for index in 0..PAWN_COUNT {
        commands.spawn((
            PawnMarker(index),
            PbrBundle {
                mesh: pawn_mesh.clone(),
                material: material_for(Side::of_pawn(index)),
                transform: pawn_transform(&geometry, &board, index),
                ..default()
            },
        ));
    }

    let knight_mesh = meshes.add(knight_shape());
    for index in 0..KNIGHT_COUNT {
        commands.spawn((
            KnightMarker(index),
            PbrBundle {
                mesh: knight_mesh.clone(),
                material: material_for(Side::of_knight(index)),
                transform: knight_transform(&geometry, &board, index),
                ..default()
            },
        ));
    }

    for decor in decorative_pieces() {
        let (mesh, scale, height) = decor_shape(decor.kind);
        let sq = decor.square;
        let center = geometry.square_center(sq.row(), sq.col(), height);
        commands.spawn(PbrBundle {
            mesh: meshes.add(mesh),
            material: material_for(decor.side),
            transform: Transform::from_translation(to_world(center))
                .with_scale(Vec3::splat(scale)),
            ..default()
        });
    }
}

/// Upright capsule whose base touches the board.
fn knight_shape() -> Capsule3d {
    Capsule3d::new(KNIGHT_RADIUS, 2.0 * (KNIGHT_HEIGHT - KNIGHT_RADIUS))
}

/// Mesh, uniform scale and center height of a back-rank piece.
fn decor_shape(kind: DecorKind) -> (Mesh, f32, f32) {
    match kind {
        DecorKind::Rook => (Cuboid::from_length(0.75).into(), 1.0, 0.375),
        DecorKind::Bishop => (
            Cone {
                radius: 0.375,
                height: 1.0,
            }
            .into(),
            1.0,
            0.5,
        ),
        DecorKind::Queen => (Tetrahedron::default().into(), 0.4, 0.2),
        DecorKind::King => (Cylinder::new(0.36, 1.0).into(), 1.0, 0.5),
    }
}

fn pawn_transform(geometry: &BoardGeometry, board: &BoardState, index: usize) -> Transform {
    let sq = board.pawn(index);
    Transform::from_translation(to_world(geometry.square_center(
        sq.row(),
        sq.col(),
        PAWN_RADIUS,
    )))
}

fn knight_transform(geometry: &BoardGeometry, board: &BoardState, index: usize) -> Transform {
    let sq = board.knight(index);
    Transform::from_translation(to_world(geometry.square_center(
        sq.row(),
        sq.col(),
        KNIGHT_HEIGHT,
    )))
}

fn spawn_lights(mut commands: Commands, rig: Res<CameraRig>) {
    for (id, lumens) in [(LightId::Fill, FILL_LUMENS), (LightId::Key, KEY_LUMENS)] {
        commands.spawn((
            SceneLight { id, lumens },
            PointLightBundle {
                point_light: PointLight {
                    intensity: lumens,
                    range: 40.0,
                    shadows_enabled: id == LightId::Key,
                    ..default()
                },
                transform: Transform::from_translation(to_world(rig.light(id).position)),
                ..default()
            },
        ));
    }
}

pub fn camera_transform(rig: &CameraRig) -> Transform {
    Transform::from_translation(to_world(rig.eye())).looking_at(to_world(rig.pivot()), Vec3::Y)
}

fn sync_pieces(
    board: Res<BoardState>,
    settings: Res<SceneSettings>,
    mut pawns: Query<(&PawnMarker, &mut Transform), Without<KnightMarker>>,
    mut knights: Query<(&KnightMarker, &mut Transform), Without<PawnMarker>>,
) {
    if !board.is_changed() {
        return;
    }
    for (marker, mut t) in &mut pawns {
        *t = pawn_transform(&settings.geometry, &board, marker.0);
    }
    for (marker, mut t) in &mut knights {
        *t = knight_transform(&settings.geometry, &board, marker.0);
    }
}

fn sync_camera(rig: Res<CameraRig>, mut q_cam: Query<&mut Transform, With<MainCamera>>) {
    if !rig.is_changed() {
        return;
    }
    let Ok(mut t) = q_cam.get_single_mut() else {
        return;
    };
    *t = camera_transform(&rig);
}

fn sync_lights(
    rig: Res<CameraRig>,
    mut lights: Query<(&SceneLight, &mut PointLight, &mut Transform)>,
) {
    if !rig.is_changed() {
        return;
    }
    for (scene_light, mut point, mut t) in &mut lights {
        let light = rig.light(scene_light.id);
        t.translation = to_world(light.position);
        point.intensity = if light.enabled { scene_light.lumens } else { 0.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_mapping_puts_z_up() {
        assert_eq!(to_world(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn camera_looks_at_pivot() {
        let settings = SceneSettings::default();
        let rig = settings.camera_rig();
        let t = camera_transform(&rig);
        let to_pivot = (to_world(rig.pivot()) - t.translation).normalize();
        assert!(t.forward().as_vec3().abs_diff_eq(to_pivot, 1e-4));
    }

    #[test]
    fn piece_transforms_follow_the_registry() {
        let geometry = BoardGeometry::default();
        let board = BoardState::default();
        let t = pawn_transform(&geometry, &board, 8);
        // Pawn 8 sits on (6, 0).
        assert_eq!(t.translation, Vec3::new(0.5, PAWN_RADIUS, -6.5));
        let k = knight_transform(&geometry, &board, 1);
        assert_eq!(k.translation, Vec3::new(6.5, KNIGHT_HEIGHT, -0.5));
    }

    #[test]
    fn pieces_rest_on_the_board() {
        for kind in [
            DecorKind::Rook,
            DecorKind::Bishop,
            DecorKind::Queen,
            DecorKind::King,
        ] {
            let (mesh, scale, height) = decor_shape(kind);
            let aabb = mesh.compute_aabb().unwrap();
            let bottom = height + (aabb.center.y - aabb.half_extents.y) * scale;
            assert!(bottom.abs() < 1e-4, "{:?} floats at {}", kind, bottom);
        }

        let knight = Mesh::from(knight_shape()).compute_aabb().unwrap();
        assert!((knight.half_extents.y - KNIGHT_HEIGHT).abs() < 1e-4);
    }
}
