//! Page sections and the navigation items that point at them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An addressable section of the portfolio page.
///
/// Each variant corresponds to an anchor (`#home`, `#about`, ...) that both the
/// navigation bar and the command palette can scroll to. Variants are declared in
/// document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    About,
    Projects,
    Contact,
}

impl SectionId {
    /// All sections in document order.
    pub const ALL: [Self; 4] = [Self::Home, Self::About, Self::Projects, Self::Contact];

    /// The anchor identifier without the leading `#`.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    /// Label shown in the navigation bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Projects => "Projects",
            Self::Contact => "Contact",
        }
    }

    /// Short glyph rendered before the label when the pane is wide enough.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Home => "⌂",
            Self::About => "☺",
            Self::Projects => "◆",
            Self::Contact => "✉",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.anchor())
    }
}

impl FromStr for SectionId {
    type Err = String;

    /// Parses `home`, `#home`, `Home`, ... into a section.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('#').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|section| section.anchor() == name)
            .ok_or_else(|| format!("unknown section anchor: {s}"))
    }
}

/// An entry in the navigation bar.
///
/// Navigation items are derived once at startup from the rendered sections and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: SectionId,
    pub label: String,
    pub target: SectionId,
    pub icon: Option<&'static str>,
}

impl NavItem {
    /// Builds the navigation item for a section.
    #[must_use]
    pub fn for_section(section: SectionId) -> Self {
        Self {
            id: section,
            label: section.label().to_string(),
            target: section,
            icon: Some(section.icon()),
        }
    }
}

/// Builds navigation items for the given sections, preserving their order.
#[must_use]
pub fn nav_items(sections: &[SectionId]) -> Vec<NavItem> {
    sections.iter().copied().map(NavItem::for_section).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_anchor_forms() {
        assert_eq!("home".parse::<SectionId>(), Ok(SectionId::Home));
        assert_eq!("#About".parse::<SectionId>(), Ok(SectionId::About));
        assert_eq!(" projects ".parse::<SectionId>(), Ok(SectionId::Projects));
        assert!("blog".parse::<SectionId>().is_err());
    }

    #[test]
    fn displays_as_anchor() {
        assert_eq!(SectionId::Contact.to_string(), "#contact");
    }

    #[test]
    fn nav_items_follow_section_order() {
        let items = nav_items(&[SectionId::Home, SectionId::Contact]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "Home");
        assert_eq!(items[1].target, SectionId::Contact);
    }
}
