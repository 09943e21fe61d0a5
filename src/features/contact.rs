//! The contact form and its simulated submission.
//!
//! Submission never leaves the plugin. A valid submit moves the form to
//! `Submitting`; once the send delay elapses the fields are cleared and the
//! confirmation is shown, and after the confirmation delay the form is idle again.

use super::timing::Millis;
use std::fmt;

/// Simulated send time.
pub const DEFAULT_SUBMIT_DELAY_MS: Millis = 1_500;
/// How long "Message Sent!" stays up.
pub const DEFAULT_CONFIRMATION_MS: Millis = 5_000;

/// One input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Heading shown above the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }

    /// Hint drawn while the field is empty.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Your name",
            Self::Email => "your.email@example.com",
            Self::Message => "Your message...",
        }
    }

    /// Field focused by Tab, wrapping after the message.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message => Self::Name,
        }
    }

    /// Field focused by Shift+Tab.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Message => Self::Email,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormValues {
    /// Current text of `field`.
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        }
    }

    /// `true` when every field is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|&f| self.get(f).is_empty())
    }

    /// The first field that fails validation, in form order.
    #[must_use]
    pub fn first_invalid(&self) -> Option<FormField> {
        FormField::ALL.into_iter().find(|&field| {
            let value = self.get(field).trim();
            value.is_empty() || (field == FormField::Email && !is_email_shaped(value))
        })
    }
}

/// `local@domain.tld` with non-empty parts and no whitespace.
///
/// # Examples
///
/// ```
/// use termfolio::features::contact::is_email_shaped;
///
/// assert!(is_email_shaped("ada@example.com"));
/// assert!(!is_email_shaped("ada@example"));
/// assert!(!is_email_shaped("@example.com"));
/// ```
#[must_use]
pub fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Lifecycle of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting { ready_at: Millis },
    Submitted { reset_at: Millis },
}

/// Result of a submit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started,
    /// Blocked by validation; the field is marked.
    Invalid(FormField),
    /// A submission is already in flight or being confirmed.
    Ignored,
}

/// Local form state with a simulated asynchronous submit.
#[derive(Debug, Clone)]
pub struct ContactForm {
    values: FormValues,
    status: SubmitStatus,
    invalid: Option<FormField>,
    submit_delay: Millis,
    confirmation: Millis,
}

impl ContactForm {
    /// Creates an empty, idle form.
    ///
    /// # Parameters
    ///
    /// * `submit_delay` - Simulated send time before the confirmation shows
    /// * `confirmation` - How long the confirmation stays before the form is idle
    ///
    /// # Examples
    ///
    /// ```
    /// use termfolio::features::{ContactForm, SubmitStatus};
    ///
    /// let form = ContactForm::new(1_500, 5_000);
    /// assert_eq!(form.status(), SubmitStatus::Idle);
    /// assert!(form.values().is_empty());
    /// ```
    #[must_use]
    pub fn new(submit_delay: Millis, confirmation: Millis) -> Self {
        Self {
            values: FormValues::default(),
            status: SubmitStatus::Idle,
            invalid: None,
            submit_delay,
            confirmation,
        }
    }

    /// What the visitor has typed so far.
    #[must_use]
    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    #[must_use]
    pub const fn status(&self) -> SubmitStatus {
        self.status
    }

    /// The send button shows "Sending..." and ignores presses.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.status, SubmitStatus::Submitting { .. })
    }

    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        matches!(self.status, SubmitStatus::Submitted { .. })
    }

    /// Field marked by the last failed submit, cleared by typing into it.
    #[must_use]
    pub const fn invalid_field(&self) -> Option<FormField> {
        self.invalid
    }

    /// Fields accept input only while idle.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self.status, SubmitStatus::Idle)
    }

    /// Appends `c` to `field`. Ignored unless idle; control characters are
    /// dropped. Typing into the marked invalid field clears the mark.
    pub fn push_char(&mut self, field: FormField, c: char) {
        if !self.is_editable() || c.is_control() {
            return;
        }
        self.values.get_mut(field).push(c);
        if self.invalid == Some(field) {
            self.invalid = None;
        }
    }

    /// Deletes the last character of `field` while idle.
    pub fn backspace(&mut self, field: FormField) {
        if self.is_editable() {
            self.values.get_mut(field).pop();
        }
    }

    /// Validates and, if valid, starts the simulated send.
    pub fn submit(&mut self, now: Millis) -> SubmitOutcome {
        if !self.is_editable() {
            return SubmitOutcome::Ignored;
        }
        if let Some(field) = self.values.first_invalid() {
            tracing::debug!(field = %field, "contact form validation failed");
            self.invalid = Some(field);
            return SubmitOutcome::Invalid(field);
        }
        self.invalid = None;
        self.status = SubmitStatus::Submitting {
            ready_at: now.saturating_add(self.submit_delay),
        };
        tracing::info!("contact form submitting");
        SubmitOutcome::Started
    }

    /// Advances the lifecycle. Returns `true` if the status changed.
    ///
    /// A single late tick can move through both transitions.
    pub fn tick(&mut self, now: Millis) -> bool {
        let mut changed = false;
        if let SubmitStatus::Submitting { ready_at } = self.status {
            if now >= ready_at {
                self.values = FormValues::default();
                self.status = SubmitStatus::Submitted {
                    reset_at: ready_at.saturating_add(self.confirmation),
                };
                tracing::info!("contact form submitted");
                changed = true;
            }
        }
        if let SubmitStatus::Submitted { reset_at } = self.status {
            if now >= reset_at {
                self.status = SubmitStatus::Idle;
                changed = true;
            }
        }
        changed
    }

    /// Drops any in-flight submission without completing it.
    pub fn cancel(&mut self) {
        if !self.is_editable() {
            self.status = SubmitStatus::Idle;
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY_MS, DEFAULT_CONFIRMATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        for (field, text) in [
            (FormField::Name, "Ada"),
            (FormField::Email, "ada@example.com"),
            (FormField::Message, "Hello"),
        ] {
            for c in text.chars() {
                form.push_char(field, c);
            }
        }
        form
    }

    #[test]
    fn lifecycle_runs_idle_submitting_submitted_idle() {
        let mut form = filled();
        assert_eq!(form.submit(1_000), SubmitOutcome::Started);
        assert!(form.is_submitting());

        assert!(!form.tick(2_499));
        assert!(form.tick(2_500));
        assert!(form.is_submitted());
        assert!(form.values().is_empty());

        assert!(!form.tick(7_499));
        assert!(form.tick(7_500));
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[test]
    fn validation_marks_first_invalid_field() {
        let mut form = ContactForm::default();
        for c in "Ada".chars() {
            form.push_char(FormField::Name, c);
        }
        for c in "not-an-email".chars() {
            form.push_char(FormField::Email, c);
        }
        assert_eq!(form.submit(0), SubmitOutcome::Invalid(FormField::Email));
        assert_eq!(form.invalid_field(), Some(FormField::Email));
        assert_eq!(form.status(), SubmitStatus::Idle);

        form.push_char(FormField::Email, '@');
        assert_eq!(form.invalid_field(), None);
    }

    #[test]
    fn double_submit_is_ignored() {
        let mut form = filled();
        form.submit(0);
        assert_eq!(form.submit(100), SubmitOutcome::Ignored);
        assert_eq!(form.status(), SubmitStatus::Submitting { ready_at: 1_500 });
    }

    #[test]
    fn fields_are_read_only_while_submitting() {
        let mut form = filled();
        form.submit(0);
        form.push_char(FormField::Name, 'x');
        form.backspace(FormField::Message);
        assert_eq!(form.values().name, "Ada");
        assert_eq!(form.values().message, "Hello");
    }

    #[test]
    fn late_tick_completes_both_transitions() {
        let mut form = filled();
        form.submit(0);
        assert!(form.tick(60_000));
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[test]
    fn cancel_abandons_submission() {
        let mut form = filled();
        form.submit(0);
        form.cancel();
        assert!(!form.tick(10_000));
        assert_eq!(form.values().name, "Ada");
    }

    #[test]
    fn huge_delays_saturate_instead_of_overflowing() {
        let mut form = ContactForm::new(Millis::MAX, Millis::MAX);
        for (field, text) in [
            (FormField::Name, "Ada"),
            (FormField::Email, "ada@example.com"),
            (FormField::Message, "Hi"),
        ] {
            for c in text.chars() {
                form.push_char(field, c);
            }
        }
        assert_eq!(form.submit(5_000), SubmitOutcome::Started);
        assert_eq!(form.status(), SubmitStatus::Submitting { ready_at: Millis::MAX });
        assert!(!form.tick(1_000_000));
        assert!(form.tick(Millis::MAX));
        assert!(form.values().is_empty());
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[test]
    fn field_focus_cycles() {
        assert_eq!(FormField::Message.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Message);
    }
}
