//! UI rendering for the portfolio client.
//!
//! Landing page, loading screen, the immersive HUD (status line, room panel,
//! elevator panel, transition overlay) and the plain overview page.

use bevy::prelude::*;
use portfolio_logic::contact::{tip_for, Field};
use portfolio_logic::gate::PROMPT;
use portfolio_logic::lab::{clover_meter, stream_line, DATA_STREAMS, MODULES, SECRET_PROJECTS};
use portfolio_logic::loader::LoadingSequence;
use portfolio_logic::rooms::{RoomTable, RoomView};
use portfolio_logic::terminal::ScriptLine;

use crate::content;
use crate::state::{
    now_ms, ClassicViewButton, ContactState, ElevatorButton, ElevatorPanel, ExploreButton,
    HelpText, ImmersiveUi, IntroState, LabState, LandingUi, LoaderState, LoaderText, LoaderUi,
    Navigation, OverviewUi, RoomPanelText, Showcase, Stage, StatusText, TransitionOverlay,
    TransitionOverlayText,
};

const NEON_CYAN: Color = Color::srgb(0.0, 1.0, 1.0);
const PANEL_BG: Color = Color::srgba(0.02, 0.02, 0.06, 0.75);
const BUTTON_IDLE: Color = Color::srgba(0.05, 0.05, 0.12, 0.85);
const BUTTON_DISABLED: Color = Color::srgba(0.05, 0.05, 0.05, 0.4);

fn label(text: impl Into<String>, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn room_color(rgb: [u8; 3]) -> Color {
    Color::srgb_u8(rgb[0], rgb[1], rgb[2])
}

pub fn despawn_all<T: Component>(mut commands: Commands, q: Query<Entity, With<T>>) {
    for entity in q.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

// ============================================================================
// LANDING
// ============================================================================

fn centered_column() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        row_gap: Val::Px(16.0),
        ..default()
    }
}

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(24.0), Val::Px(10.0)),
        border: UiRect::all(Val::Px(2.0)),
        ..default()
    }
}

pub fn spawn_landing(mut commands: Commands) {
    commands
        .spawn((centered_column(), LandingUi))
        .with_children(|parent| {
            parent.spawn(label(content::OWNER, 48.0, NEON_CYAN));
            parent.spawn(label(content::TAGLINE, 20.0, Color::srgb(0.8, 0.8, 0.9)));
            parent
                .spawn((
                    Button,
                    button_node(),
                    BorderColor(NEON_CYAN),
                    BackgroundColor(BUTTON_IDLE),
                    ExploreButton,
                ))
                .with_children(|b| {
                    b.spawn(label("EXPLORE", 22.0, NEON_CYAN));
                });
            parent
                .spawn((
                    Button,
                    button_node(),
                    BorderColor(Color::srgb(0.5, 0.5, 0.6)),
                    BackgroundColor(BUTTON_IDLE),
                    ClassicViewButton,
                ))
                .with_children(|b| {
                    b.spawn(label("Classic view", 16.0, Color::srgb(0.7, 0.7, 0.8)));
                });
            parent.spawn(label(
                "Press Enter to enter the building",
                14.0,
                Color::srgb(0.5, 0.5, 0.6),
            ));
        });
}

// ============================================================================
// LOADER
// ============================================================================

pub fn start_loader(mut commands: Commands, time: Res<Time<Real>>) {
    commands.insert_resource(LoaderState {
        sequence: LoadingSequence::new(now_ms(&time)),
    });
}

pub fn stop_loader(mut commands: Commands) {
    commands.remove_resource::<LoaderState>();
}

pub fn spawn_loader(mut commands: Commands) {
    commands
        .spawn((centered_column(), LoaderUi))
        .with_children(|parent| {
            parent.spawn((label("", 20.0, NEON_CYAN), LoaderText));
        });
}

pub fn update_loader(
    time: Res<Time<Real>>,
    loader: Option<Res<LoaderState>>,
    mut text_q: Query<&mut Text, With<LoaderText>>,
    mut next: ResMut<NextState<Stage>>,
) {
    let Some(loader) = loader else { return };
    let frame = loader.sequence.frame(now_ms(&time));
    if let Ok(mut text) = text_q.get_single_mut() {
        **text = format!(
            "{}\n\n{} {:>3.0}%",
            frame.label,
            content::level_bar(frame.percent as u8, 30),
            frame.percent
        );
    }
    if frame.done {
        next.set(Stage::Immersive);
    }
}

// ============================================================================
// IMMERSIVE HUD
// ============================================================================

pub fn spawn_immersive_ui(mut commands: Commands, nav: Option<Res<Navigation>>) {
    let Some(nav) = nav else { return };
    let rooms = nav.session.rooms();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            ImmersiveUi,
        ))
        .with_children(|root| {
            // Status line (top-left)
            root.spawn((
                label("", 16.0, NEON_CYAN),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(16.0),
                    top: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));

            // Room panel (left)
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(16.0),
                    top: Val::Px(48.0),
                    max_width: Val::Px(520.0),
                    padding: UiRect::all(Val::Px(12.0)),
                    ..default()
                },
                BackgroundColor(PANEL_BG),
            ))
            .with_children(|panel| {
                panel.spawn((
                    label("", 14.0, Color::srgb(0.75, 1.0, 0.85)),
                    RoomPanelText,
                ));
            });

            // Elevator panel (right), top floor first
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(16.0),
                    top: Val::Percent(30.0),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(6.0),
                    padding: UiRect::all(Val::Px(8.0)),
                    ..default()
                },
                BackgroundColor(PANEL_BG),
                Visibility::Hidden,
                ElevatorPanel,
            ))
            .with_children(|panel| {
                panel.spawn(label("ELEVATOR", 12.0, Color::srgb(0.6, 0.6, 0.7)));
                for room in rooms.iter().rev() {
                    panel
                        .spawn((
                            Button,
                            Node {
                                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                            BorderColor(room_color(room.color)),
                            BackgroundColor(BUTTON_IDLE),
                            ElevatorButton { room: room.id },
                        ))
                        .with_children(|b| {
                            b.spawn(label(
                                format!("{}  {}", room.level(), room.name),
                                14.0,
                                room_color(room.color),
                            ));
                        });
                }
            });

            // Transition overlay (center)
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    top: Val::Percent(45.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                Visibility::Hidden,
                TransitionOverlay,
            ))
            .with_children(|overlay| {
                overlay.spawn((label("", 28.0, NEON_CYAN), TransitionOverlayText));
            });

            // Controls help (bottom)
            root.spawn((
                label(
                    "Scroll / Arrows / WASD to move between floors   Esc: overview",
                    12.0,
                    Color::srgb(0.5, 0.5, 0.6),
                ),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(16.0),
                    bottom: Val::Px(10.0),
                    ..default()
                },
                Visibility::Hidden,
                HelpText,
            ));
        });
}

pub fn render_status(
    nav: Option<Res<Navigation>>,
    mut status_q: Query<&mut Text, With<StatusText>>,
) {
    let Some(nav) = nav else { return };
    let Ok(mut text) = status_q.get_single_mut() else {
        return;
    };
    let Some(room) = nav.session.current_room() else {
        return;
    };
    **text = format!(
        "Level {} / {}   {}   Depth {:.0}",
        room.level(),
        nav.session.rooms().len(),
        room.name,
        room.depth_hint()
    );
}

pub fn render_overlay(
    nav: Option<Res<Navigation>>,
    mut overlay_q: Query<&mut Visibility, With<TransitionOverlay>>,
    mut text_q: Query<&mut Text, With<TransitionOverlayText>>,
) {
    let Some(nav) = nav else { return };
    let target = nav.session.target_room();
    if let Ok(mut vis) = overlay_q.get_single_mut() {
        *vis = if target.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if let (Some(room), Ok(mut text)) = (target, text_q.get_single_mut()) {
        **text = format!("Transitioning to {}...", room.name);
    }
}

/// Elevator and help stay hidden until the lobby intro unlocks the controls.
/// Buttons dim while a transition is in flight.
pub fn render_elevator(
    nav: Option<Res<Navigation>>,
    mut panel_q: Query<&mut Visibility, (With<ElevatorPanel>, Without<HelpText>)>,
    mut help_q: Query<&mut Visibility, (With<HelpText>, Without<ElevatorPanel>)>,
    mut buttons: Query<(&ElevatorButton, &Interaction, &mut BackgroundColor)>,
) {
    let Some(nav) = nav else { return };
    let shown = if nav.session.controls_unlocked() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut vis in panel_q.iter_mut().chain(help_q.iter_mut()) {
        *vis = shown;
    }

    let state = nav.session.state();
    for (button, interaction, mut bg) in buttons.iter_mut() {
        let color = match nav.session.rooms().get(button.room) {
            _ if state.transitioning => BUTTON_DISABLED,
            Some(room) if button.room == state.current_room => {
                room_color(room.color).with_alpha(0.35)
            }
            Some(room) if *interaction == Interaction::Hovered => {
                room_color(room.color).with_alpha(0.2)
            }
            _ => BUTTON_IDLE,
        };
        bg.0 = color;
    }
}

fn script_text<'a>(lines: impl IntoIterator<Item = &'a ScriptLine>) -> String {
    lines
        .into_iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn lobby_panel(intro_state: Option<&IntroState>, unlocked: bool, now: u64) -> String {
    let Some(intro_state) = intro_state else {
        return String::new();
    };
    let frame = intro_state.typewriter.frame(now);
    let mut out = frame.text;
    if !frame.complete && intro_state.typewriter.cursor_visible(now) {
        out.push('_');
    }
    if unlocked {
        out.push_str("\n\nScroll, use the arrow keys, or pick a floor to explore.");
    }
    out
}

fn contact_panel(contact: &ContactState, now: u64) -> String {
    let mut out = String::from("CONTACT TERMINAL\n\n");
    out.push_str(&script_text(contact.terminal.visible(now)));
    if !contact.form_visible(now) {
        return out;
    }

    out.push_str("\n\n");
    for field in Field::ALL {
        let focused = field == contact.focus && contact.accepts_text(now);
        out.push_str(&format!(
            "{} {:<8} {}{}\n",
            if focused { ">" } else { " " },
            field.label(),
            contact.form.get(field),
            if focused { "_" } else { "" },
        ));
    }
    out.push('\n');
    if contact.submission.is_some() {
        out.push_str("Sending...");
    } else if contact.sent {
        out.push_str("Message sent. Thanks for reaching out!");
    } else {
        out.push_str(&format!("Tip: {}", tip_for(&contact.form)));
        out.push_str("\nTab: next field   Enter: send");
    }
    out
}

fn lab_panel(lab: &LabState, now: u64) -> String {
    let mut out = String::from("AI LAB\n\n");
    out.push_str(&script_text(lab.terminal.visible(now)));
    if lab.gate.is_unlocked() {
        if lab.console_ready(now) {
            out.push_str(&format!("\n{PROMPT}{}_", lab.input));
            out.push_str(&lab_dashboard(lab));
        }
        return out;
    }
    out.push_str(&format!("\n\n{PROMPT}{}_", "*".repeat(lab.input.chars().count())));
    if lab.gate.failures() > 0 {
        out.push_str(&format!("\nATTEMPTS: {}/3", lab.gate.failures()));
    }
    if lab.lockdown_warning {
        out.push_str("\nLOCKDOWN IMMINENT");
    }
    if let Some(hint) = lab.hint {
        out.push_str(&format!("\nHint: {hint}"));
    }
    out
}

/// Module grid, the opened module, data streams and the secret projects.
fn lab_dashboard(lab: &LabState) -> String {
    let mut out = String::from("\n\nAI MODULES\n");
    for m in MODULES.iter() {
        out.push_str(&format!(
            "[{}] {:<28} {:<10} {:>3}%  {}\n",
            m.id,
            m.name,
            m.status.label(),
            m.progress,
            m.clearance.label()
        ));
    }
    if let Some(m) = lab.console.selected_module() {
        out.push_str(&format!(
            "\n> {}\n  {}\n  accuracy {}%  speed {}%  efficiency {}%\n",
            m.name, m.description, m.metrics.accuracy, m.metrics.speed, m.metrics.efficiency
        ));
    }
    out.push_str("\nDATA STREAMS\n");
    for stream in DATA_STREAMS.iter() {
        out.push_str(&stream_line(stream));
        out.push('\n');
    }
    if lab.console.secrets_shown() {
        out.push_str("\nSECRET PROJECTS [HIDE: Tab]\n");
        for p in SECRET_PROJECTS.iter() {
            out.push_str(&format!(
                "{:<22} {:<9} {:<13} {}\n  {}\n",
                p.codename,
                p.status,
                p.classification,
                clover_meter(p.clover_level),
                p.description
            ));
        }
    } else {
        out.push_str("\nSECRET PROJECTS [REVEAL: Tab]");
    }
    out
}

pub fn render_room_panel(
    time: Res<Time<Real>>,
    nav: Option<Res<Navigation>>,
    intro_state: Option<Res<IntroState>>,
    contact: Option<Res<ContactState>>,
    lab: Option<Res<LabState>>,
    showcase: Option<Res<Showcase>>,
    mut panel_q: Query<&mut Text, With<RoomPanelText>>,
) {
    let Some(nav) = nav else { return };
    let Ok(mut text) = panel_q.get_single_mut() else {
        return;
    };
    let now = now_ms(&time);
    if nav.session.state().transitioning {
        text.clear();
        return;
    }
    let Some(room) = nav.session.current_room() else {
        return;
    };
    **text = match room.view {
        RoomView::Lobby => lobby_panel(
            intro_state.as_deref(),
            nav.session.controls_unlocked(),
            now,
        ),
        RoomView::Skills => showcase
            .as_deref()
            .map(|s| content::skills_text(&s.skills))
            .unwrap_or_default(),
        RoomView::Projects => showcase
            .as_deref()
            .map(|s| content::projects_text(&s.projects))
            .unwrap_or_default(),
        RoomView::Contact => contact
            .as_deref()
            .map(|c| contact_panel(c, now))
            .unwrap_or_default(),
        RoomView::AiLab => lab.as_deref().map(|l| lab_panel(l, now)).unwrap_or_default(),
    };
}

// ============================================================================
// OVERVIEW
// ============================================================================

pub fn spawn_overview(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                padding: UiRect::all(Val::Px(32.0)),
                flex_direction: FlexDirection::Column,
                overflow: Overflow::clip(),
                ..default()
            },
            BackgroundColor(Color::srgb(0.04, 0.04, 0.06)),
            OverviewUi,
        ))
        .with_children(|parent| {
            parent.spawn(label(
                content::overview_text(&RoomTable::portfolio()),
                15.0,
                Color::srgb(0.85, 0.85, 0.9),
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_panel_hides_form_until_boot_finishes() {
        let contact = ContactState::new(0);
        assert!(!contact_panel(&contact, 1000).contains("Tip:"));
        assert!(contact_panel(&contact, 9500).contains("Tip:"));
    }

    #[test]
    fn lab_panel_masks_input() {
        let mut lab = LabState::new(0);
        lab.input = "clo".into();
        let text = lab_panel(&lab, 0);
        assert!(text.contains("***_"));
        assert!(!text.contains("clo"));
    }

    #[test]
    fn unlocked_lab_shows_dashboard_after_startup() {
        let mut lab = LabState::new(0);
        lab.gate.try_unlock("clover123");
        lab.unlocked_ms = Some(0);
        assert!(!lab_panel(&lab, 1000).contains("AI MODULES"));

        lab.input = "open 2".into();
        let text = lab_panel(&lab, 4000);
        assert!(text.contains("open 2_"));
        assert!(text.contains("[4] Clover Intelligence System"));
        assert!(text.contains("Luck Probability"));
        assert!(text.contains("SECRET PROJECTS [REVEAL: Tab]"));
        assert!(!text.contains("PROJECT_CLOVER"));

        lab.console.execute("open 2").ok();
        lab.console.toggle_secrets();
        let text = lab_panel(&lab, 4000);
        assert!(text.contains("> Computer Vision Module"));
        assert!(text.contains("PROJECT_CLOVER"));
        assert!(text.contains("*****"));
    }
}
