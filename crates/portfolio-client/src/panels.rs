//! Room behaviour for the immersive view.
//!
//! Mounts the navigation session with the 3D view, plays the lobby intro and
//! unlocks the controls when it finishes, drives the skills and projects
//! filters, and runs the contact form and the AI lab terminal while their
//! rooms are current.

use bevy::prelude::*;
use portfolio_logic::config::NavigationConfig;
use portfolio_logic::constants::intro;
use portfolio_logic::contact::{echo_line, submit};
use portfolio_logic::gate::{startup_script, GateResponse, PROMPT};
use portfolio_logic::lab::ConsoleReply;
use portfolio_logic::rooms::RoomView;
use portfolio_logic::terminal::LineKind;

use crate::state::{
    now_ms, ClientConfig, ContactState, IntroState, LabState, Navigation, Showcase, TextFocus,
};

/// One keystroke routed to a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert(String),
    Backspace,
    NextField,
    Submit,
}

/// Browsing keys in the SKILLS and PROJECTS rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseKey {
    NextFilter,
    Open(usize),
    Close,
}

pub fn report_config_errors(config: Res<ClientConfig>) {
    for error in &config.load_errors {
        warn!("Navigation config not loaded: {error}");
    }
}

/// The loaded navigation config, or the defaults if it fails validation.
pub fn session_config(loaded: NavigationConfig) -> NavigationConfig {
    let problems = loaded.validate();
    if problems.is_empty() {
        return loaded;
    }
    for problem in &problems {
        warn!("Navigation config rejected: {problem}");
    }
    NavigationConfig::default()
}

pub fn start_session(mut commands: Commands, time: Res<Time<Real>>, config: Res<ClientConfig>) {
    commands.insert_resource(Navigation::new(session_config(config.navigation)));
    commands.insert_resource(IntroState::new(now_ms(&time)));
    commands.insert_resource(Showcase::default());
    info!("Navigation session mounted");
}

pub fn end_session(mut commands: Commands, nav: Option<ResMut<Navigation>>) {
    if let Some(mut nav) = nav {
        nav.session.teardown();
    }
    commands.remove_resource::<Navigation>();
    commands.remove_resource::<IntroState>();
    commands.remove_resource::<Showcase>();
    commands.remove_resource::<ContactState>();
    commands.remove_resource::<LabState>();
    info!("Navigation session torn down");
}

/// Unlock wheel and keys once the lobby has finished typing.
pub fn advance_lobby_intro(
    time: Res<Time<Real>>,
    intro_state: Option<ResMut<IntroState>>,
    nav: Option<ResMut<Navigation>>,
) {
    let (Some(mut intro_state), Some(mut nav)) = (intro_state, nav) else {
        return;
    };
    if intro_state.ready_reported {
        return;
    }
    let now = now_ms(&time);
    if now < intro_state.typewriter.completes_at_ms() + intro::NAV_REVEAL_DELAY_MS {
        return;
    }
    intro_state.ready_reported = true;
    if nav.session.lobby_ready() {
        info!("Lobby intro finished, controls unlocked");
    }
}

/// Mount the contact and lab state while their room is current, and decide
/// whether typed letters go to a text field this frame.
pub fn sync_room_state(
    mut commands: Commands,
    time: Res<Time<Real>>,
    nav: Option<Res<Navigation>>,
    contact: Option<Res<ContactState>>,
    lab: Option<Res<LabState>>,
    mut focus: ResMut<TextFocus>,
) {
    let Some(nav) = nav else {
        focus.0 = false;
        return;
    };
    let now = now_ms(&time);
    let view = nav.session.current_room().map(|r| r.view);

    match (view == Some(RoomView::Contact), contact.is_some()) {
        (true, false) => commands.insert_resource(ContactState::new(now)),
        (false, true) => commands.remove_resource::<ContactState>(),
        _ => {}
    }
    match (view == Some(RoomView::AiLab), lab.is_some()) {
        (true, false) => commands.insert_resource(LabState::new(now)),
        (false, true) => commands.remove_resource::<LabState>(),
        _ => {}
    }

    focus.0 = !nav.session.state().transitioning
        && match view {
            Some(RoomView::Contact) => contact.as_ref().is_some_and(|c| c.accepts_text(now)),
            Some(RoomView::AiLab) => lab.as_ref().is_some_and(|l| l.accepts_text(now)),
            _ => false,
        };
}

/// Finish a pending contact submission once its script has played.
pub fn advance_contact(time: Res<Time<Real>>, contact: Option<ResMut<ContactState>>) {
    let Some(mut contact) = contact else { return };
    let now = now_ms(&time);
    let sent = contact
        .submission
        .as_ref()
        .is_some_and(|sub| sub.is_sent(now));
    if sent {
        if let Some(sub) = contact.submission.take() {
            info!("Contact message from {} delivered", sub.form.name);
        }
        contact.form = Default::default();
        contact.focus = portfolio_logic::contact::Field::Name;
        contact.sent = true;
    }
}

pub fn edit_contact(contact: &mut ContactState, edit: TextEdit, now: u64) {
    let field = contact.focus;
    match edit {
        TextEdit::Insert(text) => {
            contact.form.get_mut(field).push_str(&text);
        }
        TextEdit::Backspace => {
            contact.form.get_mut(field).pop();
        }
        TextEdit::NextField => {
            contact.focus = field.next();
            return;
        }
        TextEdit::Submit => {
            submit_contact(contact, now);
            return;
        }
    }
    contact.sent = false;
    contact.errors.clear();
    let line = echo_line(field, contact.form.get(field));
    contact.terminal.push_at(now, line, LineKind::Output);
}

fn submit_contact(contact: &mut ContactState, now: u64) {
    match submit(&contact.form, now) {
        Ok(submission) => {
            contact.terminal.schedule_from(now, submission.script());
            contact.errors.clear();
            contact.submission = Some(submission);
        }
        Err(errors) => {
            for error in &errors {
                contact
                    .terminal
                    .push_at(now, format!("ERROR: {error}"), LineKind::Error);
            }
            contact.errors = errors;
        }
    }
}

pub fn browse(showcase: &mut Showcase, view: RoomView, key: BrowseKey) {
    match (view, key) {
        (RoomView::Skills, BrowseKey::NextFilter) => {
            showcase.skills.next_filter();
            debug!("skills filter: {}", showcase.skills.filter_label());
        }
        (RoomView::Projects, BrowseKey::NextFilter) => {
            showcase.projects.next_filter();
            debug!("projects filter: {}", showcase.projects.filter_label());
        }
        (RoomView::Projects, BrowseKey::Open(n)) => {
            if let Some(project) = showcase.projects.open(n) {
                debug!("opened project {}", project.title);
            }
        }
        (RoomView::Projects, BrowseKey::Close) => showcase.projects.close(),
        _ => {}
    }
}

pub fn edit_lab(lab: &mut LabState, edit: TextEdit, now: u64) {
    if lab.gate.is_unlocked() {
        run_console(lab, edit, now);
        return;
    }
    match edit {
        TextEdit::Insert(text) => lab.input.push_str(&text),
        TextEdit::Backspace => {
            lab.input.pop();
        }
        TextEdit::NextField => {}
        TextEdit::Submit => {
            let attempt = std::mem::take(&mut lab.input);
            match lab.gate.try_unlock(&attempt) {
                GateResponse::Granted => {
                    lab.hint = None;
                    lab.lockdown_warning = false;
                    lab.unlocked_ms = Some(now);
                    lab.terminal
                        .push_at(now, "ACCESS GRANTED", LineKind::Success);
                    lab.terminal.schedule_from(now, startup_script());
                }
                GateResponse::Denied {
                    line,
                    hint,
                    lockdown_warning,
                    ..
                } => {
                    lab.terminal.push_at(now, line, LineKind::Error);
                    lab.hint = hint;
                    lab.lockdown_warning = lockdown_warning;
                }
                GateResponse::AlreadyOpen => {}
            }
        }
    }
}

fn run_console(lab: &mut LabState, edit: TextEdit, now: u64) {
    match edit {
        TextEdit::Insert(text) => lab.input.push_str(&text),
        TextEdit::Backspace => {
            lab.input.pop();
        }
        TextEdit::NextField => {
            let line = lab.console.secrets_line();
            lab.terminal.push_at(now, line, LineKind::Output);
        }
        TextEdit::Submit => {
            let command = std::mem::take(&mut lab.input);
            lab.terminal
                .push_at(now, format!("{PROMPT}{command}"), LineKind::Command);
            match lab.console.execute(&command) {
                Ok(ConsoleReply::Lines(lines)) => {
                    for line in lines {
                        lab.terminal.push_at(now, line, LineKind::Output);
                    }
                }
                Ok(ConsoleReply::Clear) => lab.terminal.clear(now),
                Err(e) => lab.terminal.push_at(now, e.to_string(), LineKind::Error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_logic::contact::Field;

    fn type_text(contact: &mut ContactState, text: &str, now: u64) {
        for c in text.chars() {
            edit_contact(contact, TextEdit::Insert(c.to_string()), now);
        }
    }

    #[test]
    fn typing_fills_focused_field_and_echoes() {
        let mut contact = ContactState::new(0);
        type_text(&mut contact, "Ada", 10_000);
        assert_eq!(contact.form.name, "Ada");
        let last = contact.terminal.visible(10_000).last().map(|l| l.text.clone());
        assert_eq!(last.as_deref(), Some("> name: Ada"));
    }

    #[test]
    fn tab_moves_focus_without_echo() {
        let mut contact = ContactState::new(0);
        edit_contact(&mut contact, TextEdit::NextField, 10_000);
        assert_eq!(contact.focus, Field::Email);
        type_text(&mut contact, "a@b.c", 10_000);
        assert_eq!(contact.form.email, "a@b.c");
        assert!(contact.form.name.is_empty());
    }

    #[test]
    fn incomplete_submit_reports_errors() {
        let mut contact = ContactState::new(0);
        type_text(&mut contact, "Ada", 10_000);
        edit_contact(&mut contact, TextEdit::Submit, 10_000);
        assert!(contact.submission.is_none());
        assert_eq!(contact.errors.len(), 3);
    }

    #[test]
    fn complete_submit_starts_submission() {
        let mut contact = ContactState::new(0);
        for (field, text) in [
            (Field::Name, "Ada"),
            (Field::Email, "ada@example.com"),
            (Field::Subject, "Hi"),
            (Field::Message, "Loved the tour of the building"),
        ] {
            contact.focus = field;
            type_text(&mut contact, text, 10_000);
        }
        edit_contact(&mut contact, TextEdit::Submit, 10_000);
        assert!(contact.submission.is_some());
        assert!(!contact.accepts_text(10_000));
    }

    #[test]
    fn lab_denial_then_grant() {
        let mut lab = LabState::new(0);
        for c in "nope".chars() {
            edit_lab(&mut lab, TextEdit::Insert(c.to_string()), 100);
        }
        edit_lab(&mut lab, TextEdit::Submit, 100);
        assert!(lab.input.is_empty());
        assert!(lab.hint.is_none());
        edit_lab(&mut lab, TextEdit::Submit, 200);
        assert!(lab.hint.is_some());
        assert!(lab.lockdown_warning);

        lab.input = "Clover123".into();
        edit_lab(&mut lab, TextEdit::Submit, 300);
        assert!(lab.gate.is_unlocked());
        assert!(!lab.accepts_text(300));
        assert!(lab.hint.is_none());
    }

    fn unlocked_lab() -> LabState {
        let mut lab = LabState::new(0);
        lab.input = "clover123".into();
        edit_lab(&mut lab, TextEdit::Submit, 0);
        lab
    }

    fn run(lab: &mut LabState, command: &str, now: u64) {
        lab.input = command.into();
        edit_lab(lab, TextEdit::Submit, now);
    }

    fn texts(lab: &LabState, now: u64) -> Vec<String> {
        lab.terminal.visible(now).iter().map(|l| l.text.clone()).collect()
    }

    #[test]
    fn invalid_loaded_config_falls_back_to_defaults() {
        let tuned = NavigationConfig {
            guard_interval_ms: 150,
            ..NavigationConfig::default()
        };
        assert_eq!(session_config(tuned), tuned);
        let broken = NavigationConfig {
            transition_duration_ms: 0,
            ..NavigationConfig::default()
        };
        assert_eq!(session_config(broken), NavigationConfig::default());
    }

    #[test]
    fn help_answers_after_unlock() {
        let mut lab = unlocked_lab();
        assert!(lab.accepts_text(4000));
        run(&mut lab, "help", 5000);
        let shown = texts(&lab, 5000);
        assert!(shown.iter().any(|l| l == &format!("{PROMPT}help")));
        assert!(shown.iter().any(|l| l.starts_with("modules")));
        assert!(lab.input.is_empty());
    }

    #[test]
    fn console_opens_module_and_reports_errors() {
        let mut lab = unlocked_lab();
        run(&mut lab, "open 4", 5000);
        assert_eq!(lab.console.selected_module().map(|m| m.id), Some(4));
        run(&mut lab, "hack", 5100);
        let last = lab.terminal.visible(5100).last().map(|l| (l.text.clone(), l.kind));
        assert_eq!(
            last,
            Some(("command not found: hack".to_string(), LineKind::Error))
        );
    }

    #[test]
    fn tab_toggles_secrets_and_clear_empties_terminal() {
        let mut lab = unlocked_lab();
        edit_lab(&mut lab, TextEdit::NextField, 5000);
        assert!(lab.console.secrets_shown());
        run(&mut lab, "clear", 6000);
        assert!(lab.terminal.visible(6000).is_empty());
    }

    #[test]
    fn browse_keys_only_touch_their_room() {
        let mut showcase = Showcase::default();
        browse(&mut showcase, RoomView::Skills, BrowseKey::NextFilter);
        assert_eq!(showcase.skills.filter_label(), "Web Dev");
        assert_eq!(showcase.projects.filter_label(), "All");

        browse(&mut showcase, RoomView::Skills, BrowseKey::Open(1));
        assert!(showcase.projects.selected().is_none());

        browse(&mut showcase, RoomView::Projects, BrowseKey::Open(2));
        assert_eq!(
            showcase.projects.selected().map(|p| p.title),
            Some("GeoSpatial Analytics Platform")
        );
        browse(&mut showcase, RoomView::Projects, BrowseKey::Close);
        assert!(showcase.projects.selected().is_none());
    }
}
