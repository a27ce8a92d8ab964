//! 3D rendering for the portfolio client.
//!
//! Builds the building (floors, rings, stairs, elevator shaft, lights, grid,
//! particles) when the immersive view mounts, animates it, and despawns it on
//! unmount. Everything hangs off one `BuildingGroup` root so the depth offset
//! and parallax move the whole building together.

use std::f32::consts::PI;

use bevy::prelude::*;
use portfolio_logic::rooms::{Room, RoomTable, RoomView};
use rand::Rng;

use crate::state::{BuildingGroup, Navigation, NeonRing, Particle, SceneEntity, StairGlow};

const GRID_SIZE: f32 = 200.0;
const GRID_LINES: usize = 41;
const GRID_Y: f32 = -15.0;
const PLATFORM_RADIUS: f32 = 12.0;
const PLATFORM_HEIGHT: f32 = 2.0;
const RING_RADIUS: f32 = 13.0;
const STAIR_OFFSET_X: f32 = 15.0;
const STEP_COUNT: usize = 8;
const SHAFT_OFFSET_X: f32 = -18.0;
const SHAFT_HEIGHT: f32 = 40.0;
const PARTICLE_COUNT: usize = 400;

const NEON: [Color; 5] = [
    Color::srgb(0.0, 1.0, 1.0),
    Color::srgb(1.0, 0.0, 1.0),
    Color::srgb(0.0, 1.0, 0.53),
    Color::srgb(1.0, 0.42, 0.21),
    Color::srgb(0.55, 0.36, 0.96),
];

fn room_color(room: &Room) -> Color {
    let [r, g, b] = room.color;
    Color::srgb_u8(r, g, b)
}

fn anchor(room: &Room) -> Vec3 {
    Vec3::from_array(room.anchor.to_array())
}

/// Translucent glowing material in `color`.
fn neon_material(color: Color, alpha: f32, glow: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(alpha),
        emissive: LinearRgba::from(color) * glow,
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.4,
        ..default()
    }
}

pub fn build_scene(
    mut commands: Commands,
    nav: Option<Res<Navigation>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(nav) = nav else {
        warn!("Immersive view mounted without a navigation session");
        return;
    };
    let rooms = nav.session.rooms();

    let root = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            BuildingGroup,
            SceneEntity,
        ))
        .id();

    commands.entity(root).with_children(|parent| {
        spawn_grid(parent, &mut meshes, &mut materials);
        for room in rooms.iter() {
            spawn_room(parent, room, &mut meshes, &mut materials);
            if rooms.has_stairs_after(room.id) {
                if let Some(next) = rooms.get(room.id + 1) {
                    spawn_stairs(parent, room, next, &mut meshes, &mut materials);
                }
            }
        }
        if let Some(lab) = rooms.iter().find(|r| r.view == RoomView::AiLab) {
            spawn_elevator_shaft(parent, lab, &mut meshes, &mut materials);
        }
        spawn_particles(parent, &mut meshes, &mut materials);
    });

    spawn_room_lights(&mut commands, rooms);
    info!("Scene built: {} rooms", rooms.len());
}

fn spawn_grid(
    parent: &mut ChildBuilder,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let line = meshes.add(Cuboid::new(GRID_SIZE, 0.05, 0.08));
    let cyan = materials.add(neon_material(NEON[0], 0.2, 0.6));
    let magenta = materials.add(neon_material(NEON[1], 0.12, 0.4));
    let spacing = GRID_SIZE / (GRID_LINES - 1) as f32;
    let diagonal = Quat::from_rotation_y(PI / 4.0);

    for i in 0..GRID_LINES {
        let offset = -GRID_SIZE / 2.0 + i as f32 * spacing;
        // Lines along X
        parent.spawn((
            Mesh3d(line.clone()),
            MeshMaterial3d(cyan.clone()),
            Transform::from_xyz(0.0, GRID_Y, offset),
        ));
        // Lines along Z
        parent.spawn((
            Mesh3d(line.clone()),
            MeshMaterial3d(cyan.clone()),
            Transform::from_xyz(offset, GRID_Y, 0.0).with_rotation(Quat::from_rotation_y(PI / 2.0)),
        ));
        // Second, rotated grid slightly above
        if i % 2 == 0 {
            parent.spawn((
                Mesh3d(line.clone()),
                MeshMaterial3d(magenta.clone()),
                Transform::from_translation(
                    diagonal * Vec3::new(0.0, 0.0, offset) + Vec3::Y * (GRID_Y + 0.5),
                )
                .with_rotation(diagonal),
            ));
        }
    }

    let floor_mat = materials.add(StandardMaterial {
        base_color: Color::srgba(0.04, 0.04, 0.08, 0.9),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    parent.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GRID_SIZE * 1.5, GRID_SIZE * 1.5))),
        MeshMaterial3d(floor_mat),
        Transform::from_xyz(0.0, GRID_Y - 1.0, 0.0),
    ));
}

fn spawn_room(
    parent: &mut ChildBuilder,
    room: &Room,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let color = room_color(room);
    let center = anchor(room);

    parent.spawn((
        Mesh3d(meshes.add(Cylinder::new(PLATFORM_RADIUS, PLATFORM_HEIGHT))),
        MeshMaterial3d(materials.add(neon_material(color, 0.4, 0.3))),
        Transform::from_translation(center),
    ));

    parent.spawn((
        Mesh3d(meshes.add(Torus {
            minor_radius: 0.5,
            major_radius: RING_RADIUS,
        })),
        MeshMaterial3d(materials.add(neon_material(color, 0.8, 2.0))),
        Transform::from_translation(center + Vec3::Y * 1.5),
        NeonRing { speed: 1.2 },
    ));
}

fn spawn_stairs(
    parent: &mut ChildBuilder,
    from: &Room,
    to: &Room,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let start = anchor(from);
    let end = anchor(to);
    let rise = (end.y - start.y).abs();
    let run = (end.z - start.z).abs();

    // Glowing shaft that the steps sit in
    parent.spawn((
        Mesh3d(meshes.add(Cuboid::new(4.0, rise, run.max(0.1)))),
        MeshMaterial3d(materials.add(neon_material(NEON[0], 0.3, 0.5))),
        Transform::from_xyz(
            start.x + STAIR_OFFSET_X,
            start.y + rise / 2.0,
            start.z + (end.z - start.z) / 2.0,
        ),
        StairGlow {
            phase: from.id as f32,
        },
    ));

    let step_mesh = meshes.add(Cuboid::new(5.0, 0.5, 2.0));
    let step_mat = materials.add(neon_material(room_color(from), 0.6, 0.2));
    for s in 0..STEP_COUNT {
        let t = s as f32 / STEP_COUNT as f32;
        parent.spawn((
            Mesh3d(step_mesh.clone()),
            MeshMaterial3d(step_mat.clone()),
            Transform::from_xyz(
                start.x + STAIR_OFFSET_X,
                start.y + t * rise,
                start.z + t * (end.z - start.z),
            ),
        ));
    }
}

fn spawn_elevator_shaft(
    parent: &mut ChildBuilder,
    lab: &Room,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let base = anchor(lab);
    let color = room_color(lab);
    parent.spawn((
        Mesh3d(meshes.add(Cylinder::new(2.0, SHAFT_HEIGHT))),
        MeshMaterial3d(materials.add(neon_material(color, 0.7, 0.6))),
        Transform::from_xyz(base.x + SHAFT_OFFSET_X, 0.0, base.z),
    ));
    parent.spawn((
        Mesh3d(meshes.add(Cylinder::new(2.5, SHAFT_HEIGHT + 2.0))),
        MeshMaterial3d(materials.add(neon_material(color, 0.2, 1.0))),
        Transform::from_xyz(base.x + SHAFT_OFFSET_X, 0.0, base.z),
        StairGlow { phase: PI },
    ));
}

/// Lights are not parented to the building so the parallax tilt does not
/// swing them around.
fn spawn_room_lights(commands: &mut Commands, rooms: &RoomTable) {
    for room in rooms.iter() {
        let color = room_color(room);
        let center = anchor(room);
        let lights = [
            (Vec3::new(0.0, 8.0, 10.0), 400_000.0, 50.0),
            (Vec3::new(10.0, 5.0, 15.0), 200_000.0, 30.0),
            (Vec3::new(-10.0, 3.0, 5.0), 160_000.0, 25.0),
        ];
        for (offset, intensity, range) in lights {
            commands.spawn((
                PointLight {
                    color,
                    intensity,
                    range,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_translation(center + offset),
                SceneEntity,
            ));
        }
    }
}

fn spawn_particles(
    parent: &mut ChildBuilder,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let mut rng = rand::thread_rng();
    let mesh = meshes.add(Sphere::new(0.25));
    let palette: Vec<Handle<StandardMaterial>> = NEON
        .iter()
        .map(|c| {
            materials.add(StandardMaterial {
                base_color: *c,
                emissive: LinearRgba::from(*c) * 4.0,
                unlit: true,
                ..default()
            })
        })
        .collect();

    for _ in 0..PARTICLE_COUNT {
        let origin = Vec3::new(
            rng.gen_range(-75.0..75.0),
            rng.gen_range(-60.0..100.0),
            rng.gen_range(-90.0..30.0),
        );
        let material = palette[rng.gen_range(0..palette.len())].clone();
        parent.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(origin),
            Particle {
                rise_speed: rng.gen_range(0.0..0.6),
                sway: rng.gen_range(-1.0..1.0),
                origin,
            },
        ));
    }
}

pub fn animate_scene(
    time: Res<Time>,
    mut rings: Query<(&NeonRing, &mut Transform), Without<Particle>>,
    glows: Query<(&StairGlow, &MeshMaterial3d<StandardMaterial>)>,
    mut particles: Query<(&Particle, &mut Transform), Without<NeonRing>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let t = time.elapsed_secs();
    let dt = time.delta_secs();

    for (ring, mut tf) in rings.iter_mut() {
        tf.rotate_local_y(ring.speed * dt);
    }

    for (glow, handle) in glows.iter() {
        if let Some(mat) = materials.get_mut(&handle.0) {
            let alpha = 0.3 + (t * 3.0 + glow.phase).sin() * 0.2;
            mat.base_color.set_alpha(alpha);
        }
    }

    for (p, mut tf) in particles.iter_mut() {
        tf.translation.y += p.rise_speed * dt;
        tf.translation.x = p.origin.x + (t * 0.5 + p.sway * 10.0).sin() * 2.0 * p.sway;
        if tf.translation.y > 100.0 {
            tf.translation.y = -60.0;
        }
    }
}

/// Despawn everything the immersive view built.
pub fn teardown_scene(mut commands: Commands, scene: Query<Entity, With<SceneEntity>>) {
    let mut count = 0;
    for entity in scene.iter() {
        commands.entity(entity).despawn_recursive();
        count += 1;
    }
    info!("Scene torn down ({count} roots)");
}
