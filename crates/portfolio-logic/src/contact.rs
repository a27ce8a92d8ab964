//! Contact room form: required-field checks, live tips, and a simulated send.
//!
//! There is no transport. `submit` returns a `Submission` whose terminal
//! script plays out over a few seconds and then reports the message as sent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::contact;
use crate::terminal::{LineKind, ScriptLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    /// Tab order, wrapping.
    pub fn next(self) -> Field {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Subject,
            Field::Subject => Field::Message,
            Field::Message => Field::Name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    Missing(Field),
}

impl ContactForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    fn filled(&self, field: Field) -> bool {
        !self.get(field).trim().is_empty()
    }
}

/// Every required field that is blank, in form order.
pub fn validate_form(form: &ContactForm) -> Vec<FormError> {
    Field::ALL
        .iter()
        .filter(|f| !form.filled(**f))
        .map(|f| FormError::Missing(*f))
        .collect()
}

/// The mascot's hint for the form as it currently stands.
pub fn tip_for(form: &ContactForm) -> &'static str {
    if !form.filled(Field::Name) {
        "Start by telling me your name!"
    } else if !form.filled(Field::Email) {
        "Don't forget your email so I can reach back!"
    } else if !form.filled(Field::Message) {
        "What's on your mind? I'd love to hear from you!"
    } else if form.message.trim().chars().count() < contact::SHORT_MESSAGE_CHARS {
        "A bit more detail would be great!"
    } else if !form.filled(Field::Subject) {
        "A subject line would be helpful!"
    } else {
        "Looking good! Ready to send?"
    }
}

/// Terminal echo for a field edit: `> field: value`, truncated.
pub fn echo_line(field: Field, value: &str) -> String {
    let mut shown: String = value.chars().take(contact::ECHO_MAX_CHARS).collect();
    if value.chars().count() > contact::ECHO_MAX_CHARS {
        shown.push_str("...");
    }
    format!("> {}: {}", field.label(), shown)
}

/// Boot sequence shown when the contact room opens. Delays are relative to
/// the moment the script starts.
pub fn boot_script() -> Vec<ScriptLine> {
    use LineKind::*;
    vec![
        ScriptLine::new(0, "$ initialize_contact_protocol", Command),
        ScriptLine::new(1000, "Loading communication systems...", Output),
        ScriptLine::new(2000, "Encrypting transmission channel...", Output),
        ScriptLine::new(3000, "Contact interface ready ✓", Success),
        ScriptLine::new(4000, "$ whoami", Command),
        ScriptLine::new(4500, "Portfolio Owner | Software Engineer", Output),
        ScriptLine::new(5000, "Location: San Francisco, CA", Output),
        ScriptLine::new(5500, "Status: Available for opportunities", Success),
        ScriptLine::new(6500, "$ check_availability", Command),
        ScriptLine::new(7000, "Currently accepting new projects ✓", Success),
        ScriptLine::new(8000, "$ open_communication_channel", Command),
        ScriptLine::new(8500, "Ready to receive messages...", Output),
    ]
}

fn send_script() -> Vec<ScriptLine> {
    use LineKind::*;
    vec![
        ScriptLine::new(0, "$ send_message --secure --priority=high", Command),
        ScriptLine::new(500, "Validating input data...", Output),
        ScriptLine::new(1500, "Encrypting message with 256-bit AES...", Output),
        ScriptLine::new(2500, "Establishing secure connection...", Output),
        ScriptLine::new(3500, "Message transmitted successfully ✓", Success),
        ScriptLine::new(4000, "Lucky delivery guaranteed!", Success),
    ]
}

/// A simulated send in progress.
#[derive(Debug, Clone)]
pub struct Submission {
    pub form: ContactForm,
    pub started_ms: u64,
}

impl Submission {
    /// Lines to append to the room terminal, relative to `started_ms`.
    pub fn script(&self) -> Vec<ScriptLine> {
        send_script()
    }

    pub fn is_sent(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= contact::SEND_DURATION_MS
    }
}

pub fn submit(form: &ContactForm, now_ms: u64) -> Result<Submission, Vec<FormError>> {
    let errors = validate_form(form);
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(Submission {
        form: form.clone(),
        started_ms: now_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "Loved the elevator, let's talk.".into(),
        }
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = validate_form(&ContactForm::default());
        assert_eq!(
            errors,
            vec![
                FormError::Missing(Field::Name),
                FormError::Missing(Field::Email),
                FormError::Missing(Field::Subject),
                FormError::Missing(Field::Message),
            ]
        );
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let form = ContactForm {
            subject: "   ".into(),
            ..complete_form()
        };
        assert_eq!(validate_form(&form), vec![FormError::Missing(Field::Subject)]);
    }

    #[test]
    fn error_message_names_field() {
        assert_eq!(
            FormError::Missing(Field::Email).to_string(),
            "email is required"
        );
    }

    #[test]
    fn tips_follow_progress() {
        let mut form = ContactForm::default();
        assert!(tip_for(&form).contains("name"));
        form.name = "Ada".into();
        assert!(tip_for(&form).contains("email"));
        form.email = "ada@example.com".into();
        assert!(tip_for(&form).contains("mind"));
        form.message = "hi".into();
        assert!(tip_for(&form).contains("detail"));
        form.message = "a much longer message".into();
        assert!(tip_for(&form).contains("subject"));
        form.subject = "Hello".into();
        assert!(tip_for(&form).contains("Ready"));
    }

    #[test]
    fn echo_truncates_long_values() {
        assert_eq!(echo_line(Field::Name, "Ada"), "> name: Ada");
        let long = "x".repeat(40);
        let line = echo_line(Field::Message, &long);
        assert_eq!(line, format!("> message: {}...", "x".repeat(30)));
        let exact = "y".repeat(30);
        assert_eq!(echo_line(Field::Subject, &exact), format!("> subject: {exact}"));
    }

    #[test]
    fn submit_rejects_incomplete_form() {
        let form = ContactForm {
            email: String::new(),
            ..complete_form()
        };
        let errors = submit(&form, 0).unwrap_err();
        assert_eq!(errors, vec![FormError::Missing(Field::Email)]);
    }

    #[test]
    fn submission_is_sent_after_delay() {
        let sub = submit(&complete_form(), 10_000).unwrap();
        assert!(!sub.is_sent(14_499));
        assert!(sub.is_sent(14_500));
        let script = sub.script();
        assert_eq!(script.len(), 6);
        assert!(script.iter().all(|l| l.delay_ms < 4500));
    }

    #[test]
    fn tab_order_wraps() {
        let mut f = Field::Name;
        for _ in 0..4 {
            f = f.next();
        }
        assert_eq!(f, Field::Name);
    }

    #[test]
    fn boot_script_is_ordered() {
        let script = boot_script();
        assert!(script.windows(2).all(|w| w[0].delay_ms <= w[1].delay_ms));
        assert!(script.last().unwrap().delay_ms < contact::FORM_REVEAL_MS);
    }
}
