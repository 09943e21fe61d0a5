//! Input modes.
//!
//! The mode decides how keys are interpreted and which hints the bottom bar
//! shows. Exactly one mode is active at a time:
//!
//! - **Normal**: scrolling, section jumps and single-key commands
//! - **Palette**: the command palette is open and owns the keyboard
//! - **Form**: a contact form field is focused and receives typed characters

use crate::features::FormField;

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Page navigation.
    #[default]
    Normal,

    /// Command palette open; characters edit the query.
    Palette,

    /// Editing the contact form; characters go to the focused field.
    Form(FormField),
}

impl InputMode {
    #[must_use]
    pub const fn is_palette(self) -> bool {
        matches!(self, Self::Palette)
    }

    /// The focused form field, if the form owns the keyboard.
    #[must_use]
    pub const fn form_field(self) -> Option<FormField> {
        match self {
            Self::Form(field) => Some(field),
            _ => None,
        }
    }

    /// Short label shown at the left of the hint bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Palette => "SEARCH",
            Self::Form(_) => "FORM",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_mode_carries_focus() {
        assert_eq!(InputMode::Form(FormField::Email).form_field(), Some(FormField::Email));
        assert_eq!(InputMode::Palette.form_field(), None);
        assert!(InputMode::Palette.is_palette());
        assert_eq!(InputMode::default(), InputMode::Normal);
    }
}
