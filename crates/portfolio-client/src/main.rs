//! Immersive Portfolio - Bevy 3D client
//!
//! A neon building with one floor per portfolio section. The camera flies
//! between floors on wheel, keyboard or elevator input; all navigation rules
//! live in `portfolio-logic`, this crate renders and feeds it input.

mod camera;
mod content;
mod input;
mod panels;
mod rendering;
mod state;
mod ui;

use bevy::prelude::*;
use bevy::window::PresentMode;

use state::{
    ClientConfig, ImmersiveUi, LandingUi, LoaderUi, OverviewUi, Parallax, Stage, TextFocus,
};

fn main() {
    let config = ClientConfig::from_args();
    let initial_stage = config.initial_stage();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Immersive Portfolio".to_string(),
                resolution: (config.width, config.height).into(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(camera::FOG_COLOR))
        .insert_resource(config)
        .insert_state(initial_stage)
        .init_resource::<TextFocus>()
        .init_resource::<Parallax>()
        .add_systems(Startup, (camera::setup_camera, panels::report_config_errors))
        // Landing
        .add_systems(OnEnter(Stage::Landing), ui::spawn_landing)
        .add_systems(OnExit(Stage::Landing), ui::despawn_all::<LandingUi>)
        .add_systems(
            Update,
            input::landing_input.run_if(in_state(Stage::Landing)),
        )
        // Loading
        .add_systems(OnEnter(Stage::Loading), (ui::start_loader, ui::spawn_loader))
        .add_systems(
            OnExit(Stage::Loading),
            (ui::stop_loader, ui::despawn_all::<LoaderUi>),
        )
        .add_systems(Update, ui::update_loader.run_if(in_state(Stage::Loading)))
        // Immersive: mount builds the session first, then the scene and HUD
        .add_systems(
            OnEnter(Stage::Immersive),
            (
                panels::start_session,
                rendering::build_scene,
                ui::spawn_immersive_ui,
            )
                .chain(),
        )
        .add_systems(
            OnExit(Stage::Immersive),
            (
                panels::end_session,
                rendering::teardown_scene,
                ui::despawn_all::<ImmersiveUi>,
                camera::reset_camera,
            ),
        )
        .add_systems(
            Update,
            (
                panels::sync_room_state,
                input::text_entry,
                input::browse_keys,
                input::wheel_navigation,
                input::keyboard_navigation,
                input::elevator_buttons,
                camera::tick_session,
                camera::apply_parallax,
                panels::advance_lobby_intro,
                panels::advance_contact,
            )
                .chain()
                .run_if(in_state(Stage::Immersive)),
        )
        .add_systems(
            Update,
            (
                rendering::animate_scene,
                ui::render_status,
                ui::render_overlay,
                ui::render_elevator,
                ui::render_room_panel,
            )
                .after(panels::advance_contact)
                .run_if(in_state(Stage::Immersive)),
        )
        // Overview
        .add_systems(OnEnter(Stage::Overview), ui::spawn_overview)
        .add_systems(OnExit(Stage::Overview), ui::despawn_all::<OverviewUi>)
        .add_systems(
            Update,
            input::toggle_overview
                .run_if(in_state(Stage::Immersive).or(in_state(Stage::Overview))),
        )
        .run();
}
