//! Camera setup and control for the portfolio client.
//!
//! The camera pose is owned by the navigation session; these systems tick the
//! session once per frame and copy its pose into the Bevy transforms.

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use portfolio_logic::camera::CameraPose;

use crate::state::{now_ms, BuildingGroup, Navigation, Parallax, PortfolioCamera};

pub const FOG_COLOR: Color = Color::srgb(0.039, 0.039, 0.059);

fn to_bevy(v: portfolio_logic::math::Vec3) -> Vec3 {
    Vec3::from_array(v.to_array())
}

pub fn pose_transform(pose: &CameraPose) -> Transform {
    Transform::from_translation(to_bevy(pose.position)).looking_at(to_bevy(pose.look_at), Vec3::Y)
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            ..default()
        }),
        pose_transform(&CameraPose::default()),
        DistanceFog {
            color: FOG_COLOR,
            falloff: FogFalloff::Linear {
                start: 50.0,
                end: 200.0,
            },
            ..default()
        },
        PortfolioCamera,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.25, 0.25, 0.4),
        brightness: 150.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 1500.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 80.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Advance the session clock and follow the pose. Completion is decided here,
/// from wall-clock time, whatever the frame rate was.
pub fn tick_session(
    time: Res<Time<Real>>,
    nav: Option<ResMut<Navigation>>,
    mut camera_q: Query<&mut Transform, (With<PortfolioCamera>, Without<BuildingGroup>)>,
    mut building_q: Query<&mut Transform, (With<BuildingGroup>, Without<PortfolioCamera>)>,
) {
    let Some(mut nav) = nav else { return };
    let now = now_ms(&time);
    if let Some(room) = nav.session.tick(now) {
        if let Some(r) = nav.session.rooms().get(room) {
            info!("Arrived at {} (level {})", r.name, r.level());
        }
    }

    if let Ok(mut cam_tf) = camera_q.get_single_mut() {
        *cam_tf = pose_transform(&nav.session.camera_pose());
    }
    if let Ok(mut building_tf) = building_q.get_single_mut() {
        building_tf.translation.z = nav.session.scene_offset_z();
    }
}

/// Tilt the building slightly toward the cursor.
/// Window cursor (origin top-left, y down) to -1..1 with +y at the top edge.
pub fn cursor_to_parallax(cursor: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (cursor.x / width) * 2.0 - 1.0,
        1.0 - (cursor.y / height) * 2.0,
    )
}

pub fn apply_parallax(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut parallax: ResMut<Parallax>,
    mut building_q: Query<&mut Transform, With<BuildingGroup>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let target = window
        .cursor_position()
        .map(|p| cursor_to_parallax(p, window.width(), window.height()))
        .unwrap_or(Vec2::ZERO);
    parallax.current = parallax.current.lerp(target, 0.05);

    if let Ok(mut building_tf) = building_q.get_single_mut() {
        building_tf.rotation = Quat::from_euler(
            EulerRot::YXZ,
            parallax.current.x * 0.05,
            parallax.current.y * 0.02,
            0.0,
        );
    }
}

/// Put the camera back at its opening pose when the 3D view unmounts.
pub fn reset_camera(mut camera_q: Query<&mut Transform, With<PortfolioCamera>>) {
    if let Ok(mut cam_tf) = camera_q.get_single_mut() {
        *cam_tf = pose_transform(&CameraPose::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallax_points_up_at_the_top_edge() {
        assert_eq!(cursor_to_parallax(Vec2::new(0.0, 0.0), 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(cursor_to_parallax(Vec2::new(800.0, 600.0), 800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(cursor_to_parallax(Vec2::new(400.0, 300.0), 800.0, 600.0), Vec2::ZERO);
    }
}
