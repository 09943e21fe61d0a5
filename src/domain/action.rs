//! Command palette actions.
//!
//! A [`SearchAction`] is one entry of the static list the command palette filters.
//! The list is assembled once at startup from the rendered sections and the
//! portfolio's external links, and is never mutated afterwards.

use super::section::SectionId;
use std::fmt;

/// Where committing an action leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    /// Scroll to a section of the page.
    Anchor(SectionId),
    /// Open a URL outside the pane (never in place).
    External(String),
}

/// Grouping shown next to each palette result; also searchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Social,
    Project,
}

impl ActionCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Social => "Social",
            Self::Project => "Project",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A navigable entry of the command palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAction {
    pub id: String,
    pub label: String,
    pub target: ActionTarget,
    pub description: String,
    pub shortcut: Option<String>,
    pub category: ActionCategory,
}

impl SearchAction {
    /// Case-insensitive substring match across label, description and category.
    ///
    /// `needle` must already be lowercased; an empty needle matches everything.
    ///
    /// # Examples
    ///
    /// ```
    /// use termfolio::domain::{ActionCategory, ActionTarget, SearchAction};
    ///
    /// let action = SearchAction {
    ///     id: "github".into(),
    ///     label: "GitHub Profile".into(),
    ///     target: ActionTarget::External("https://github.com/octocat".into()),
    ///     description: "Open-source work".into(),
    ///     shortcut: None,
    ///     category: ActionCategory::Social,
    /// };
    /// assert!(action.matches("git"));
    /// assert!(action.matches("social"));
    /// assert!(!action.matches("email"));
    /// ```
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.label.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.as_str().to_lowercase().contains(needle)
    }

    /// Byte ranges of `needle` within the label, for match highlighting.
    ///
    /// Ranges refer to the label as displayed; only ASCII-case folding is applied so
    /// byte offsets stay aligned with the original string.
    #[must_use]
    pub fn label_match_ranges(&self, needle: &str) -> Vec<(usize, usize)> {
        if needle.is_empty() {
            return vec![];
        }
        let haystack = self.label.to_ascii_lowercase();
        let needle = needle.to_ascii_lowercase();
        let mut ranges = Vec::new();
        let mut from = 0;
        while let Some(pos) = haystack[from..].find(&needle) {
            let start = from + pos;
            let end = start + needle.len();
            ranges.push((start, end));
            from = end;
        }
        ranges
    }
}

/// Builds the static palette list: one navigation action per rendered section,
/// followed by the given external links.
#[must_use]
pub fn build_actions(sections: &[SectionId], links: Vec<SearchAction>) -> Vec<SearchAction> {
    let mut actions: Vec<SearchAction> = sections
        .iter()
        .enumerate()
        .map(|(position, &section)| SearchAction {
            id: section.anchor().to_string(),
            label: section.label().to_string(),
            target: ActionTarget::Anchor(section),
            description: navigation_description(section).to_string(),
            shortcut: Some((position + 1).to_string()),
            category: ActionCategory::Navigation,
        })
        .collect();
    actions.extend(links);
    actions
}

const fn navigation_description(section: SectionId) -> &'static str {
    match section {
        SectionId::Home => "Back to the top of the page",
        SectionId::About => "Background, skills and technologies",
        SectionId::Projects => "Browse featured work",
        SectionId::Contact => "Send me a message",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(label: &str, description: &str) -> SearchAction {
        SearchAction {
            id: label.to_lowercase(),
            label: label.to_string(),
            target: ActionTarget::Anchor(SectionId::Home),
            description: description.to_string(),
            shortcut: None,
            category: ActionCategory::Navigation,
        }
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert!(action("Home", "top").matches(""));
    }

    #[test]
    fn matches_description_and_category() {
        let a = action("About", "Skills and technologies");
        assert!(a.matches("skills"));
        assert!(a.matches("navig"));
        assert!(!a.matches("github"));
    }

    #[test]
    fn finds_every_label_occurrence() {
        let a = action("Go Go Gadget", "");
        assert_eq!(a.label_match_ranges("go"), vec![(0, 2), (3, 5)]);
        assert!(a.label_match_ranges("").is_empty());
    }

    #[test]
    fn navigation_actions_precede_links_and_carry_shortcuts() {
        let link = SearchAction {
            id: "github".into(),
            label: "GitHub Profile".into(),
            target: ActionTarget::External("https://github.com/x".into()),
            description: "Code".into(),
            shortcut: None,
            category: ActionCategory::Social,
        };
        let actions = build_actions(&[SectionId::Home, SectionId::About], vec![link]);
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[1].shortcut.as_deref(), Some("2"));
        assert_eq!(actions[2].id, "github");
    }
}
