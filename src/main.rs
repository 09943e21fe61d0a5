//! Zellij plugin entry point.
//!
//! A thin adapter between the host and the library:
//!
//! - host events (keys, mouse, timer, pipe messages, close) become
//!   [`termfolio::Event`]s according to the current input mode
//! - [`termfolio::Action`]s are executed against the host (hide, run the open
//!   command) or the preference store
//! - the pane size reported to `render` is fed back as a resize
//!
//! # Clock
//!
//! A 100 ms host timer drives every deadline. Elapsed time since `load` is the
//! logical clock; it also stamps keystrokes so the palette debounce starts at
//! the real keypress time. After `BeforeClose` the timer is not re-armed.
//!
//! # Keybindings
//!
//! Everywhere: `Ctrl+k` toggles the command palette.
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: scroll a line
//! - `Ctrl+d`/`PageDown`, `Ctrl+u`/`PageUp`: scroll half a page
//! - `g`/`Home`, `G`/`End`: top, bottom
//! - `1`..`9`: jump to a nav item
//! - `t`: toggle theme, `c`: contact form, `o`: open profile
//! - `/`: command palette, `q`: hide
//!
//! Palette mode: type to filter, `Down`/`Ctrl+n` and `Up`/`Ctrl+p` select,
//! `Enter` commits, `Esc` closes.
//!
//! Form mode: type into the focused field, `Tab`/`Shift+Tab` cycle fields,
//! `Enter` sends, `Esc` leaves the form.
//!
//! # Pipes
//!
//! `zellij pipe --name color-scheme -- dark` reports an OS color scheme change.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::time::Instant;
use zellij_tile::prelude::*;

use termfolio::infrastructure::{get_data_dir, preferences_path};
use termfolio::storage::{open_store, persist_theme, stored_theme, MemoryStorage, PreferenceStore};
use termfolio::{handle_event, Action, AppState, Config, Event, InputMode, ThemeMode, DEFAULT_OPEN_COMMAND};

register_plugin!(State);

/// Host timer period in seconds.
const TICK_SECONDS: f64 = 0.1;

/// Pipe message name carrying OS color scheme changes.
const COLOR_SCHEME_PIPE: &str = "color-scheme";

struct State {
    /// `None` until `load` has run.
    app: Option<AppState>,
    store: Box<dyn PreferenceStore>,
    open_command: String,
    started: Instant,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: None,
            store: Box::new(MemoryStorage::default()),
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            started: Instant::now(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        termfolio::observability::init_tracing(&config.trace_level, &get_data_dir());

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(?config, "parsed configuration");

        self.started = Instant::now();
        self.store = open_store(preferences_path());
        let stored = stored_theme(self.store.as_ref());

        match termfolio::initialize(&config, stored) {
            Ok(app) => self.app = Some(app),
            Err(e) => tracing::error!(error = %e, "failed to initialize portfolio"),
        }
        self.open_command = config.open_command;

        request_permission(&[PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::BeforeClose,
            EventType::PermissionRequestResult,
        ]);
        set_timeout(TICK_SECONDS);

        tracing::debug!("plugin load complete");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let _guard = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name).entered();

        let now = self.clock();
        let Some(app) = self.app.as_mut() else {
            return false;
        };
        app.advance_clock(now);

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(app.input_mode, key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::Tick { now },
            zellij_tile::prelude::Event::BeforeClose => Event::Teardown,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                if matches!(status, PermissionStatus::Denied) {
                    tracing::warn!("run-commands permission denied, external links will not open");
                }
                return false;
            }
            _ => return false,
        };

        let is_tick = matches!(our_event, Event::Tick { .. });
        let should_render = self.dispatch(&our_event);
        if is_tick && self.app.as_ref().is_some_and(|app| !app.is_torn_down()) {
            set_timeout(TICK_SECONDS);
        }
        should_render
    }

    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        if let PipeSource::Cli(pipe_id) = &pipe_message.source {
            unblock_cli_pipe_input(pipe_id);
        }
        if pipe_message.name != COLOR_SCHEME_PIPE {
            tracing::debug!(name = %pipe_message.name, "ignoring pipe message");
            return false;
        }

        let payload = pipe_message.payload.unwrap_or_default();
        match payload.trim().parse::<ThemeMode>() {
            Ok(mode) => self.dispatch(&Event::SystemColorScheme(mode)),
            Err(e) => {
                tracing::debug!(error = %e, "invalid color scheme payload");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.dispatch(&Event::Resize { rows, cols });
        if let Some(app) = &self.app {
            termfolio::ui::render(app);
        }
    }
}

impl State {
    /// Milliseconds since `load`.
    fn clock(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Runs one event through the handler and executes the resulting actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        let Some(app) = self.app.as_mut() else {
            return false;
        };
        match handle_event(app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(_) => "Mouse".to_string(),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::BeforeClose => "BeforeClose".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(mode: InputMode, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, ?mode, "key event");

        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
        if ctrl && key.bare_key == BareKey::Char('k') {
            return Some(Event::TogglePalette);
        }

        match mode {
            InputMode::Normal => Self::map_normal_key(key, ctrl),
            InputMode::Palette => Some(match key.bare_key {
                BareKey::Esc => Event::ClosePalette,
                BareKey::Enter => Event::Commit,
                BareKey::Down => Event::SelectionDown,
                BareKey::Up => Event::SelectionUp,
                BareKey::Char('n') if ctrl => Event::SelectionDown,
                BareKey::Char('p') if ctrl => Event::SelectionUp,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            InputMode::Form(_) => Some(match key.bare_key {
                BareKey::Esc => Event::LeaveForm,
                BareKey::Enter => Event::SubmitForm,
                BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevField,
                BareKey::Tab => Event::NextField,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
        }
    }

    fn map_normal_key(key: &KeyWithModifier, ctrl: bool) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Char('d') if ctrl => Event::PageDown,
            BareKey::Char('u') if ctrl => Event::PageUp,
            _ if ctrl => return None,
            BareKey::Down | BareKey::Char('j') => Event::ScrollDown,
            BareKey::Up | BareKey::Char('k') => Event::ScrollUp,
            BareKey::PageDown => Event::PageDown,
            BareKey::PageUp => Event::PageUp,
            BareKey::Home | BareKey::Char('g') => Event::Top,
            BareKey::End | BareKey::Char('G') => Event::Bottom,
            BareKey::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok())?;
                Event::NavigateIndex(index - 1)
            }
            BareKey::Char('t') => Event::ToggleTheme,
            BareKey::Char('c') => Event::FocusForm,
            BareKey::Char('o') => Event::OpenProfile,
            BareKey::Char('/') => Event::OpenPalette,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::ScrollDown(lines) => Some(Event::ScrollLines(isize::try_from(lines).unwrap_or(isize::MAX))),
            Mouse::ScrollUp(lines) => Some(Event::ScrollLines(-isize::try_from(lines).unwrap_or(isize::MAX))),
            Mouse::LeftClick(line, col) => {
                let row = usize::try_from(line).ok()?;
                Some(Event::Click { row, col })
            }
            _ => None,
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("hiding plugin");
                hide_self();
            }
            Action::OpenUrl(url) => {
                tracing::info!(url = %url, command = %self.open_command, "opening external link");
                run_command(&[self.open_command.as_str(), url.as_str()], BTreeMap::new());
            }
            Action::PersistTheme(mode) => {
                persist_theme(self.store.as_mut(), *mode);
            }
        }
    }
}
