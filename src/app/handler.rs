//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place the application state is mutated in
//! response to the outside world. The plugin shim turns host events (keys,
//! mouse, timer, pipe messages, pane size) into [`Event`]s; the handler
//! applies them and returns whether a re-render is needed plus the side
//! effects to execute.
//!
//! Once [`Event::Teardown`] has been handled, every later event is ignored and
//! returns `(false, [])`.

use crate::app::{Action, AppState, InputMode};
use crate::domain::{ActionTarget, Result, SectionId, ThemeMode};
use crate::features::{FormField, Millis, SubmitOutcome};
use crate::page::TrailingHit;

/// Application events, already decoded from host input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Scroll one line down.
    ScrollDown,
    /// Scroll one line up.
    ScrollUp,
    /// Scroll by `n` lines (mouse wheel).
    ScrollLines(isize),
    PageDown,
    PageUp,
    Top,
    Bottom,

    /// Jump to a section by anchor.
    NavigateTo(SectionId),
    /// Jump to the n-th nav item (0-based), from the number keys.
    NavigateIndex(usize),
    /// Left click at a pane position (0-based row and column).
    Click { row: usize, col: usize },

    ToggleTheme,
    /// OS color scheme reported by the host.
    SystemColorScheme(ThemeMode),

    /// Ctrl+K: open the palette, or close it if open.
    TogglePalette,
    OpenPalette,
    ClosePalette,
    /// Move the palette selection down.
    SelectionDown,
    /// Move the palette selection up.
    SelectionUp,
    /// Enter in the palette or the form.
    Commit,

    /// A typed character for the palette query or the focused form field.
    Char(char),
    Backspace,

    /// Scroll to the contact form and start editing it.
    FocusForm,
    NextField,
    PrevField,
    SubmitForm,
    LeaveForm,

    /// Open the code-hosting profile externally.
    OpenProfile,

    /// Host timer fired at logical time `now`.
    Tick { now: Millis },
    /// The pane was resized.
    Resize { rows: usize, cols: usize },
    /// The plugin is about to be unloaded.
    Teardown,
    /// Hide the plugin pane.
    CloseFocus,
}

/// Applies `event` to `state`.
///
/// Returns `(should_render, actions)`.
///
/// # Errors
///
/// Reserved for state transitions that can fail; every current transition
/// degrades gracefully instead.
///
/// # Examples
///
/// ```
/// use termfolio::app::{handle_event, Action, Event};
/// use termfolio::{initialize, Config};
///
/// let mut state = initialize(&Config::default(), None).unwrap();
/// let (render, actions) = handle_event(&mut state, &Event::ToggleTheme)?;
/// assert!(render);
/// assert!(matches!(actions[..], [Action::PersistTheme(_)]));
/// # Ok::<(), termfolio::PortfolioError>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    if state.is_torn_down() {
        tracing::trace!(?event, "ignoring event after teardown");
        return Ok((false, vec![]));
    }

    let _span = tracing::debug_span!("handle_event", event_type = ?event, mode = ?state.input_mode).entered();

    match event {
        Event::ScrollDown => Ok((state.scroll_by(1), vec![])),
        Event::ScrollUp => Ok((state.scroll_by(-1), vec![])),
        Event::ScrollLines(lines) => Ok((state.scroll_by(*lines), vec![])),
        Event::PageDown => {
            let half = isize::try_from(state.half_page()).unwrap_or(isize::MAX);
            Ok((state.scroll_by(half), vec![]))
        }
        Event::PageUp => {
            let half = isize::try_from(state.half_page()).unwrap_or(isize::MAX);
            Ok((state.scroll_by(-half), vec![]))
        }
        Event::Top => Ok((state.scroll_to(0), vec![])),
        Event::Bottom => Ok((state.scroll_to(usize::MAX), vec![])),

        Event::NavigateTo(section) => Ok((state.navigate_to(*section), vec![])),
        Event::NavigateIndex(index) => Ok((state.navigate_index(*index), vec![])),
        Event::Click { row, col } => handle_click(state, *row, *col),

        Event::ToggleTheme => {
            let mode = state.toggle_theme();
            tracing::info!(mode = %mode, "theme toggled");
            Ok((true, vec![Action::PersistTheme(mode)]))
        }
        Event::SystemColorScheme(mode) => {
            let changed = state.theme.on_system_change(*mode);
            tracing::debug!(system = %mode, applied = changed, "system color scheme reported");
            Ok((changed, vec![]))
        }

        Event::TogglePalette => {
            state.search.toggle();
            state.input_mode = if state.search.is_open() {
                InputMode::Palette
            } else {
                InputMode::Normal
            };
            Ok((true, vec![]))
        }
        Event::OpenPalette => {
            if state.input_mode.is_palette() {
                return Ok((false, vec![]));
            }
            open_palette(state);
            Ok((true, vec![]))
        }
        Event::ClosePalette => {
            if !state.input_mode.is_palette() {
                return Ok((false, vec![]));
            }
            close_palette(state);
            Ok((true, vec![]))
        }
        Event::SelectionDown => {
            if !state.input_mode.is_palette() {
                return Ok((false, vec![]));
            }
            state.search.select_next();
            Ok((true, vec![]))
        }
        Event::SelectionUp => {
            if !state.input_mode.is_palette() {
                return Ok((false, vec![]));
            }
            state.search.select_prev();
            Ok((true, vec![]))
        }
        Event::Commit => match state.input_mode {
            InputMode::Palette => Ok(commit_palette(state)),
            InputMode::Form(_) => Ok(submit_form(state)),
            InputMode::Normal => Ok((false, vec![])),
        },

        Event::Char(c) => match state.input_mode {
            InputMode::Palette => {
                state.search.push_char(*c, state.now);
                Ok((true, vec![]))
            }
            InputMode::Form(field) => {
                state.form.push_char(field, *c);
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Palette => {
                state.search.backspace(state.now);
                Ok((true, vec![]))
            }
            InputMode::Form(field) => {
                state.form.backspace(field);
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },

        Event::FocusForm => {
            if !state.sections.contains(&SectionId::Contact) {
                tracing::debug!("contact section not rendered");
                return Ok((false, vec![]));
            }
            state.navigate_to(SectionId::Contact);
            state.input_mode = InputMode::Form(state.form.invalid_field().unwrap_or(FormField::Name));
            Ok((true, vec![]))
        }
        Event::NextField => {
            let Some(field) = state.input_mode.form_field() else {
                return Ok((false, vec![]));
            };
            state.input_mode = InputMode::Form(field.next());
            Ok((true, vec![]))
        }
        Event::PrevField => {
            let Some(field) = state.input_mode.form_field() else {
                return Ok((false, vec![]));
            };
            state.input_mode = InputMode::Form(field.prev());
            Ok((true, vec![]))
        }
        Event::SubmitForm => Ok(submit_form(state)),
        Event::LeaveForm => {
            if state.input_mode.form_field().is_none() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }

        Event::OpenProfile => {
            let url = state.content.profile_url.clone();
            if url.is_empty() {
                return Ok((false, vec![]));
            }
            Ok((false, vec![Action::OpenUrl(url)]))
        }

        Event::Tick { now } => Ok((state.tick(*now), vec![])),
        Event::Resize { rows, cols } => Ok((state.resize(*rows, *cols), vec![])),
        Event::Teardown => {
            state.teardown();
            Ok((false, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

fn open_palette(state: &mut AppState) {
    state.search.open();
    state.input_mode = InputMode::Palette;
}

fn close_palette(state: &mut AppState) {
    state.search.close();
    state.input_mode = InputMode::Normal;
}

fn commit_palette(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(action) = state.search.commit() else {
        tracing::debug!(query = state.search.query(), "nothing to commit");
        return (true, vec![]);
    };
    state.input_mode = InputMode::Normal;
    tracing::info!(id = %action.id, "palette action committed");

    match action.target {
        ActionTarget::Anchor(section) => {
            state.navigate_to(section);
            (true, vec![])
        }
        ActionTarget::External(url) => (true, vec![Action::OpenUrl(url)]),
    }
}

fn submit_form(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.form.submit(state.now) {
        SubmitOutcome::Started => {
            tracing::info!("contact form submitted");
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        SubmitOutcome::Invalid(field) => {
            tracing::debug!(field = %field, "contact form invalid");
            state.input_mode = InputMode::Form(field);
            (true, vec![])
        }
        SubmitOutcome::Ignored => (false, vec![]),
    }
}

fn handle_click(state: &mut AppState, row: usize, col: usize) -> Result<(bool, Vec<Action>)> {
    if row != 0 {
        return Ok((false, vec![]));
    }
    let layout = state.navbar_layout();
    if let Some(section) = layout.hit_test(col) {
        return Ok((state.navigate_to(section), vec![]));
    }
    match layout.hit_trailing(col, state.cols) {
        Some(TrailingHit::Theme) => handle_event(state, &Event::ToggleTheme),
        Some(TrailingHit::Profile) => handle_event(state, &Event::OpenProfile),
        None => Ok((false, vec![])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Timings;
    use crate::content::Content;
    use crate::features::ThemeState;
    use crate::ui::theme::Palettes;

    fn state() -> AppState {
        AppState::new(
            Content::default(),
            SectionId::ALL.to_vec(),
            ThemeState::new(None, None),
            Palettes::default(),
            Timings::default(),
            2024,
        )
        .unwrap()
    }

    fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            send(state, Event::Char(c));
        }
    }

    #[test]
    fn ctrl_k_toggles_palette_and_clears_query() {
        let mut s = state();
        send(&mut s, Event::TogglePalette);
        assert_eq!(s.input_mode, InputMode::Palette);
        type_str(&mut s, "git");
        send(&mut s, Event::TogglePalette);
        assert_eq!(s.input_mode, InputMode::Normal);
        assert!(!s.search.is_open());
        send(&mut s, Event::OpenPalette);
        assert_eq!(s.search.query(), "");
    }

    #[test]
    fn characters_are_ignored_in_normal_mode() {
        let mut s = state();
        assert_eq!(send(&mut s, Event::Char('x')), (false, vec![]));
        assert_eq!(s.search.query(), "");
    }

    #[test]
    fn committing_anchor_scrolls_and_closes() {
        let mut s = state();
        send(&mut s, Event::OpenPalette);
        type_str(&mut s, "projects");
        let (_, actions) = send(&mut s, Event::Commit);
        assert!(actions.is_empty());
        assert_eq!(s.input_mode, InputMode::Normal);
        assert_eq!(s.observer.active(), Some(SectionId::Projects));
    }

    #[test]
    fn committing_external_link_opens_it() {
        let mut s = state();
        send(&mut s, Event::OpenPalette);
        type_str(&mut s, "github profile");
        let (_, actions) = send(&mut s, Event::Commit);
        assert_eq!(actions, vec![Action::OpenUrl(s.content.profile_url.clone())]);
    }

    #[test]
    fn commit_with_no_results_keeps_palette_open() {
        let mut s = state();
        send(&mut s, Event::OpenPalette);
        type_str(&mut s, "zzzz");
        let (_, actions) = send(&mut s, Event::Commit);
        assert!(actions.is_empty());
        assert_eq!(s.input_mode, InputMode::Palette);
    }

    #[test]
    fn selection_only_moves_in_palette() {
        let mut s = state();
        assert_eq!(send(&mut s, Event::SelectionDown), (false, vec![]));
        send(&mut s, Event::OpenPalette);
        send(&mut s, Event::SelectionDown);
        assert_eq!(s.search.selected_index(), 1);
    }

    #[test]
    fn toggle_emits_persist_with_new_mode() {
        let mut s = state();
        let (render, actions) = send(&mut s, Event::ToggleTheme);
        assert!(render);
        assert_eq!(actions, vec![Action::PersistTheme(ThemeMode::Dark)]);
    }

    #[test]
    fn form_focus_typing_and_field_cycling() {
        let mut s = state();
        send(&mut s, Event::FocusForm);
        assert_eq!(s.input_mode, InputMode::Form(FormField::Name));
        assert_eq!(s.observer.active(), Some(SectionId::Contact));
        type_str(&mut s, "Ada");
        send(&mut s, Event::NextField);
        type_str(&mut s, "ada@example.com");
        send(&mut s, Event::PrevField);
        assert_eq!(s.input_mode, InputMode::Form(FormField::Name));
        assert_eq!(s.form.values().name, "Ada");
        assert_eq!(s.form.values().email, "ada@example.com");
    }

    #[test]
    fn invalid_submit_focuses_offending_field() {
        let mut s = state();
        send(&mut s, Event::FocusForm);
        type_str(&mut s, "Ada");
        send(&mut s, Event::Commit);
        assert_eq!(s.input_mode, InputMode::Form(FormField::Email));
        assert_eq!(s.form.invalid_field(), Some(FormField::Email));
    }

    #[test]
    fn number_keys_jump_to_nav_items() {
        let mut s = state();
        send(&mut s, Event::NavigateIndex(1));
        assert_eq!(s.observer.active(), Some(SectionId::About));
        assert_eq!(send(&mut s, Event::NavigateIndex(9)), (false, vec![]));
    }

    #[test]
    fn click_on_navbar_item_navigates() {
        let mut s = state();
        s.resize(30, 120);
        let slot = s.navbar_layout().slots[3].clone();
        send(&mut s, Event::Click { row: 0, col: slot.start });
        assert_eq!(s.observer.active(), Some(slot.section));
        assert_eq!(send(&mut s, Event::Click { row: 5, col: slot.start }), (false, vec![]));
    }

    #[test]
    fn teardown_silences_everything() {
        let mut s = state();
        send(&mut s, Event::Teardown);
        assert!(s.is_torn_down());
        assert_eq!(send(&mut s, Event::ToggleTheme), (false, vec![]));
        assert_eq!(send(&mut s, Event::Tick { now: 1_000_000 }), (false, vec![]));
        assert_eq!(s.rotator.index(), 0);
        assert_eq!(s.theme.mode(), ThemeMode::Light);
    }
}
