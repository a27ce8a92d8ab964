//! Input handling for the portfolio client.
//!
//! Translates Bevy wheel, keyboard and button events into calls on the
//! navigation session, routes typed text to the focused room field, maps
//! browsing keys in the skills and projects rooms, and handles stage changes
//! (Enter on the landing page, Escape for the overview).

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use portfolio_logic::input::NavKey;

use crate::panels::{browse, edit_contact, edit_lab, BrowseKey, TextEdit};
use crate::state::{
    now_ms, ClassicViewButton, ContactState, ElevatorButton, ExploreButton, LabState, Navigation,
    Showcase, Stage, TextFocus,
};

/// Pixels per wheel "line"; browsers report roughly this for one notch.
const WHEEL_LINE_PX: f32 = 100.0;

fn nav_key(code: KeyCode) -> Option<NavKey> {
    Some(match code {
        KeyCode::ArrowUp => NavKey::ArrowUp,
        KeyCode::ArrowDown => NavKey::ArrowDown,
        KeyCode::ArrowLeft => NavKey::ArrowLeft,
        KeyCode::ArrowRight => NavKey::ArrowRight,
        KeyCode::KeyW => NavKey::W,
        KeyCode::KeyA => NavKey::A,
        KeyCode::KeyS => NavKey::S,
        KeyCode::KeyD => NavKey::D,
        _ => return None,
    })
}

fn browse_key(code: KeyCode) -> Option<BrowseKey> {
    let digit = match code {
        KeyCode::Tab => return Some(BrowseKey::NextFilter),
        KeyCode::Backspace => return Some(BrowseKey::Close),
        KeyCode::Digit1 | KeyCode::Numpad1 => 1,
        KeyCode::Digit2 | KeyCode::Numpad2 => 2,
        KeyCode::Digit3 | KeyCode::Numpad3 => 3,
        KeyCode::Digit4 | KeyCode::Numpad4 => 4,
        KeyCode::Digit5 | KeyCode::Numpad5 => 5,
        KeyCode::Digit6 | KeyCode::Numpad6 => 6,
        KeyCode::Digit7 | KeyCode::Numpad7 => 7,
        KeyCode::Digit8 | KeyCode::Numpad8 => 8,
        KeyCode::Digit9 | KeyCode::Numpad9 => 9,
        _ => return None,
    };
    Some(BrowseKey::Open(digit))
}

/// Bevy reports "scroll up" as positive y; navigation expects browser-style
/// `deltaY`, positive when scrolling down.
fn wheel_delta_y(event: &MouseWheel) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => -event.y * WHEEL_LINE_PX,
        MouseScrollUnit::Pixel => -event.y,
    }
}

pub fn wheel_navigation(
    time: Res<Time<Real>>,
    mut scroll_events: EventReader<MouseWheel>,
    nav: Option<ResMut<Navigation>>,
) {
    let Some(mut nav) = nav else {
        scroll_events.clear();
        return;
    };
    let now = now_ms(&time);
    for event in scroll_events.read() {
        if let Some(outcome) = nav.session.wheel(wheel_delta_y(event), now) {
            debug!("wheel {:.0} -> {outcome:?}", wheel_delta_y(event));
        }
    }
}

pub fn keyboard_navigation(
    time: Res<Time<Real>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    focus: Res<TextFocus>,
    nav: Option<ResMut<Navigation>>,
) {
    let Some(mut nav) = nav else { return };
    let now = now_ms(&time);
    for code in keyboard.get_just_pressed() {
        let Some(key) = nav_key(*code) else { continue };
        // Letters belong to the focused field; arrows still navigate.
        if focus.0 && key.is_letter() {
            continue;
        }
        if let Some(outcome) = nav.session.key(key, now) {
            debug!("{key:?} -> {outcome:?}");
        }
    }
}

pub fn elevator_buttons(
    time: Res<Time<Real>>,
    interactions: Query<(&Interaction, &ElevatorButton), Changed<Interaction>>,
    nav: Option<ResMut<Navigation>>,
) {
    let Some(mut nav) = nav else { return };
    let now = now_ms(&time);
    for (interaction, button) in interactions.iter() {
        if *interaction == Interaction::Pressed {
            let outcome = nav.session.select(button.room as i64, now);
            debug!("elevator button {} -> {outcome:?}", button.room);
        }
    }
}

/// Route typed characters to the contact form or the lab passphrase.
pub fn text_entry(
    time: Res<Time<Real>>,
    mut key_events: EventReader<KeyboardInput>,
    focus: Res<TextFocus>,
    mut contact: Option<ResMut<ContactState>>,
    mut lab: Option<ResMut<LabState>>,
) {
    if !focus.0 {
        key_events.clear();
        return;
    }
    let now = now_ms(&time);
    for event in key_events.read() {
        if !event.state.is_pressed() {
            continue;
        }
        let edit = match &event.logical_key {
            Key::Character(text) => TextEdit::Insert(text.to_string()),
            Key::Space => TextEdit::Insert(" ".to_string()),
            Key::Backspace => TextEdit::Backspace,
            Key::Tab => TextEdit::NextField,
            Key::Enter => TextEdit::Submit,
            _ => continue,
        };
        if let Some(contact) = contact.as_deref_mut() {
            if contact.accepts_text(now) {
                edit_contact(contact, edit, now);
                continue;
            }
        }
        if let Some(lab) = lab.as_deref_mut() {
            if lab.accepts_text(now) {
                edit_lab(lab, edit, now);
            }
        }
    }
}

/// Tab cycles the category filter, digits open a project, Backspace closes it.
pub fn browse_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    focus: Res<TextFocus>,
    nav: Option<Res<Navigation>>,
    showcase: Option<ResMut<Showcase>>,
) {
    let (Some(nav), Some(mut showcase)) = (nav, showcase) else {
        return;
    };
    if focus.0 || nav.session.state().transitioning {
        return;
    }
    let Some(view) = nav.session.current_room().map(|r| r.view) else {
        return;
    };
    for code in keyboard.get_just_pressed() {
        if let Some(key) = browse_key(*code) {
            browse(&mut showcase, view, key);
        }
    }
}

pub fn landing_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    explore: Query<&Interaction, (Changed<Interaction>, With<ExploreButton>)>,
    classic: Query<&Interaction, (Changed<Interaction>, With<ClassicViewButton>)>,
    mut next: ResMut<NextState<Stage>>,
) {
    let explore_clicked = explore.iter().any(|i| *i == Interaction::Pressed);
    if keyboard.just_pressed(KeyCode::Enter) || explore_clicked {
        next.set(Stage::Loading);
    } else if classic.iter().any(|i| *i == Interaction::Pressed) {
        next.set(Stage::Overview);
    }
}

/// Escape flips between the 3D view and the plain overview page.
pub fn toggle_overview(
    keyboard: Res<ButtonInput<KeyCode>>,
    stage: Res<State<Stage>>,
    mut next: ResMut<NextState<Stage>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    match stage.get() {
        Stage::Immersive => next.set(Stage::Overview),
        Stage::Overview => next.set(Stage::Immersive),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_arrows_and_wasd() {
        assert_eq!(nav_key(KeyCode::ArrowDown), Some(NavKey::ArrowDown));
        assert_eq!(nav_key(KeyCode::KeyW), Some(NavKey::W));
        assert_eq!(nav_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn maps_browse_keys() {
        assert_eq!(browse_key(KeyCode::Tab), Some(BrowseKey::NextFilter));
        assert_eq!(browse_key(KeyCode::Digit3), Some(BrowseKey::Open(3)));
        assert_eq!(browse_key(KeyCode::Numpad9), Some(BrowseKey::Open(9)));
        assert_eq!(browse_key(KeyCode::Backspace), Some(BrowseKey::Close));
        assert_eq!(browse_key(KeyCode::Digit0), None);
    }

    #[test]
    fn wheel_sign_matches_browser_convention() {
        let down = MouseWheel {
            unit: MouseScrollUnit::Line,
            x: 0.0,
            y: -1.0,
            window: Entity::PLACEHOLDER,
        };
        assert_eq!(wheel_delta_y(&down), 100.0);
        let trackpad_up = MouseWheel {
            unit: MouseScrollUnit::Pixel,
            x: 0.0,
            y: 12.0,
            window: Entity::PLACEHOLDER,
        };
        assert_eq!(wheel_delta_y(&trackpad_up), -12.0);
    }
}
