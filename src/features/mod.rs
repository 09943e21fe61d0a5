//! Pure state machines behind the interactive parts of the page.
//!
//! None of these types touch the plugin host. Time is passed in as logical
//! [`timing::Millis`] and side effects are returned to the caller.

pub mod contact;
pub mod navigation;
pub mod rotator;
pub mod search;
pub mod theme;
pub mod timing;

pub use contact::{ContactForm, FormField, FormValues, SubmitOutcome, SubmitStatus};
pub use navigation::{IntersectionEntry, NavigationObserver, ObserverOptions, SectionBounds, Viewport};
pub use rotator::TextRotator;
pub use search::CommandSearch;
pub use theme::ThemeState;
pub use timing::{Millis, TimerPhase};
