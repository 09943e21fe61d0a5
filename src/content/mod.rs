//! Static portfolio copy.
//!
//! Everything the page says (owner, stats, skills, projects, contact details and
//! external links) lives in a TOML document. A default document is embedded in the
//! binary; the `content_file` option replaces it with a user file.
//!
//! # TOML Format
//!
//! See `content/portfolio.toml` in the repository for the full layout. Sections
//! and most lists are optional; only `owner`, `brand` and `profile_url` are
//! required.

use crate::domain::{ActionCategory, ActionTarget, PortfolioError, Result, SearchAction};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const EMBEDDED: &str = include_str!("../../content/portfolio.toml");

/// The complete page copy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Content {
    pub owner: String,
    pub brand: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub footer_tagline: String,
    /// Code-hosting profile, opened by the navbar link and the `o` key.
    pub profile_url: String,
    #[serde(default)]
    pub rotating_titles: Vec<String>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub about: About,
    #[serde(default)]
    pub projects: Projects,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct About {
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub journey: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Projects {
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub items: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Contact {
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub lead: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
}

/// An external profile link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl Content {
    /// Parses content from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Content`] if the document is not valid TOML or
    /// misses required keys.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| PortfolioError::Content(e.to_string()))
    }

    /// Loads content from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    /// Loads `path` when given, falling back to the embedded content on any error.
    #[must_use]
    pub fn load_or_default(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(content_file = %path, error = %e, "failed to load content, using embedded copy");
            Self::default()
        })
    }

    /// Palette entries for projects and external links, in that order.
    #[must_use]
    pub fn link_actions(&self) -> Vec<SearchAction> {
        let projects = self.projects.items.iter().map(|project| SearchAction {
            id: format!("project:{}", slug(&project.title)),
            label: project.title.clone(),
            target: ActionTarget::External(project.url.clone()),
            description: project.description.clone(),
            shortcut: None,
            category: ActionCategory::Project,
        });
        let links = self.links.iter().map(|link| SearchAction {
            id: format!("link:{}", slug(&link.label)),
            label: link.label.clone(),
            target: ActionTarget::External(link.url.clone()),
            description: link.description.clone(),
            shortcut: None,
            category: ActionCategory::Social,
        });
        projects.chain(links).collect()
    }
}

impl Default for Content {
    /// The embedded portfolio copy.
    ///
    /// # Panics
    ///
    /// Panics if the embedded document fails to parse, which the test suite
    /// guards against.
    fn default() -> Self {
        Self::from_toml(EMBEDDED).expect("embedded content must parse")
    }
}

fn slug(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn embedded_content_parses() {
        let content = Content::default();
        assert_eq!(content.owner, "Alex");
        assert_eq!(content.rotating_titles.len(), 4);
        assert_eq!(content.stats.len(), 4);
        assert_eq!(content.about.skills.len(), 10);
        assert!(!content.projects.items.is_empty());
    }

    #[test]
    fn link_actions_follow_projects_then_links() {
        let content = Content::default();
        let actions = content.link_actions();
        assert_eq!(actions.len(), content.projects.items.len() + content.links.len());
        assert_eq!(actions[0].category, ActionCategory::Project);
        assert_eq!(actions.last().map(|a| a.label.as_str()), Some("GitHub Profile"));
        assert_eq!(actions[0].id, "project:portfolio-website");
    }

    #[test]
    fn minimal_document_fills_defaults() {
        let content = Content::from_toml(
            r#"
owner = "Sam"
brand = "Sam's Page"
profile_url = "https://example.com/sam"
"#,
        )
        .unwrap();
        assert!(content.links.is_empty());
        assert!(content.about.skills.is_empty());
    }

    #[test]
    fn missing_required_key_is_a_content_error() {
        let err = Content::from_toml("owner = \"Sam\"").unwrap_err();
        assert!(matches!(err, PortfolioError::Content(_)));
    }

    #[test]
    fn unreadable_file_falls_back_to_embedded() {
        let content = Content::load_or_default(Some("/nonexistent/portfolio.toml"));
        assert_eq!(content, Content::default());
    }

    #[test]
    fn loads_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "owner = \"Kim\"\nbrand = \"Kim\"\nprofile_url = \"https://example.com\"").unwrap();
        let content = Content::load_or_default(file.path().to_str());
        assert_eq!(content.owner, "Kim");
    }
}
