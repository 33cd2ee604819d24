// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod input;
mod view;
mod widgets;

pub use input::{Action, InputEvent, Navigation, SearchEdit, action_for_event};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use metapick_app::{
    AppCommand, AppState, DEFAULT_METADATA_TYPES, MetadataRecord, RecordStore, StoreError,
    WizardStep, visible,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use widgets::{RecordTable, SearchInput, TypeList};

// Rows taken by header, input line, borders, table header, status and help.
const TABLE_CHROME_ROWS: u16 = 8;
// Rows taken by header, borders, status and help.
const LIST_CHROME_ROWS: u16 = 5;
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(120);

/// The one capability the session needs from its environment.
pub trait RecordSource {
    fn metadata_type(&self) -> &str;
    fn fetch_records(&mut self) -> Result<Vec<MetadataRecord>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub metadata_types: Vec<String>,
    pub poll_interval: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            metadata_types: DEFAULT_METADATA_TYPES
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub metadata_type: String,
    pub selected: Vec<MetadataRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: AppState,
    store: RecordStore,
    metadata_type: String,
    fetch_error: Option<String>,
    search: SearchInput,
    types: TypeList,
    table: RecordTable,
}

impl Session {
    /// Fetches once and builds the session. A failed or empty fetch yields an
    /// empty, still usable session with `fetch_error` describing why.
    pub fn start<S: RecordSource>(source: &mut S, metadata_types: Vec<String>) -> Self {
        let metadata_type = source.metadata_type().to_owned();
        let (store, fetch_error) = match source.fetch_records() {
            Ok(records) => match RecordStore::load(records) {
                Ok(store) => (store, None),
                Err(StoreError::EmptyResult) => {
                    warn!(%metadata_type, "fetch returned no records");
                    (
                        RecordStore::default(),
                        Some(format!("no {metadata_type} records returned")),
                    )
                }
            },
            Err(error) => {
                warn!(%metadata_type, error = format!("{error:#}"), "fetch failed");
                (
                    RecordStore::default(),
                    Some(format!("fetch failed: {error:#}")),
                )
            }
        };
        info!(%metadata_type, records = store.len(), "session started");

        let mut session = Self {
            state: AppState::default(),
            types: TypeList::new(metadata_types, &metadata_type),
            store,
            metadata_type,
            fetch_error,
            search: SearchInput::default(),
            table: RecordTable::default(),
        };
        session.refresh_visible();
        session
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    /// Full names of the rows currently pushed into the table, in display order.
    pub fn visible_names(&self) -> Vec<&str> {
        self.table
            .rows()
            .iter()
            .filter_map(|row| self.store.get(row.id))
            .map(|record| record.full_name.as_str())
            .collect()
    }

    pub fn outcome(&self) -> SessionOutcome {
        SessionOutcome {
            metadata_type: self.metadata_type.clone(),
            selected: self.store.selected_records().into_iter().cloned().collect(),
        }
    }

    /// Processes one event and returns `true` when the session should end.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        let action = action_for_event(event);
        trace!("Mapped: {event:?} => {action:?}");
        if let Some(action) = action {
            if matches!(action, Action::Quit) {
                return true;
            }
            if !matches!(action, Action::Resize { .. }) {
                self.state.dispatch(AppCommand::ClearStatus);
            }
            self.apply_action(action);
        }
        self.refresh_visible();
        false
    }

    fn apply_action(&mut self, action: Action) {
        let browsing = self.state.step == WizardStep::BrowseRecords;
        match action {
            Action::Resize { width, height } => self.resize(width, height),
            Action::Quit => {}
            Action::StepForward => self.dispatch(AppCommand::StepForward),
            Action::StepBack => self.dispatch(AppCommand::StepBack),
            Action::ToggleSelection => {
                if browsing {
                    self.toggle_highlighted();
                }
            }
            Action::NextFilterColumn => {
                if browsing {
                    self.dispatch(AppCommand::NextFilterColumn);
                }
            }
            Action::PrevFilterColumn => {
                if browsing {
                    self.dispatch(AppCommand::PrevFilterColumn);
                }
            }
            Action::Search(edit) => {
                if browsing && self.search.apply(edit) {
                    let text = self.search.value().to_owned();
                    self.dispatch(AppCommand::SetSearchText(text));
                }
            }
            Action::Navigate(navigation) => match self.state.step {
                WizardStep::PickType => self.types.navigate(navigation),
                WizardStep::BrowseRecords => self.table.navigate(navigation),
            },
        }
    }

    fn dispatch(&mut self, command: AppCommand) {
        let events = self.state.dispatch(command);
        debug!(?events, "state updated");
    }

    fn resize(&mut self, width: u16, height: u16) {
        trace!(width, height, "resize");
        self.table
            .set_height(usize::from(height.saturating_sub(TABLE_CHROME_ROWS)));
        self.types
            .set_height(usize::from(height.saturating_sub(LIST_CHROME_ROWS)));
    }

    // The table cursor is a display position; only the rows pushed into the
    // table can turn it into a record id.
    fn toggle_highlighted(&mut self) {
        let Some(id) = self.table.highlighted_id() else {
            return;
        };
        let Some(selected) = self.store.toggle_selection(id) else {
            return;
        };
        debug!(record = id.get(), selected, "toggled selection");
        let name = self
            .store
            .get(id)
            .map(|record| record.full_name.clone())
            .unwrap_or_default();
        let verb = if selected { "selected" } else { "deselected" };
        self.dispatch(AppCommand::SetStatus(format!("{verb} {name}")));
    }

    fn refresh_visible(&mut self) {
        let rows = visible(&self.store, &self.state.filter);
        self.table.set_rows(rows);
    }
}

/// Fetches records, then runs the interactive loop until a quit key.
pub fn run_app<S: RecordSource>(source: &mut S, options: &SessionOptions) -> Result<SessionOutcome> {
    let mut session = Session::start(source, options.metadata_types.clone());

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(error) =
        execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")
    {
        let _restored = restore_terminal();
        return Err(error);
    }

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend)
        .context("create terminal")
        .and_then(|mut terminal| event_loop(&mut terminal, &mut session, options.poll_interval));

    let restored = restore_terminal();
    result?;
    restored?;
    Ok(session.outcome())
}

/// Runs every restore step even when an earlier one fails; reports the first error.
fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode().context("disable raw mode");
    let screen =
        execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen");
    first_error([raw, screen])
}

fn first_error<const N: usize>(steps: [Result<()>; N]) -> Result<()> {
    steps.into_iter().find(Result::is_err).unwrap_or(Ok(()))
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    poll_interval: Duration,
) -> Result<()> {
    let size = terminal.size().context("read terminal size")?;
    session.handle_event(InputEvent::Resize {
        width: size.width,
        height: size.height,
    });

    loop {
        terminal
            .draw(|frame| view::render(frame, session))
            .context("draw frame")?;

        if !event::poll(poll_interval).context("poll event")? {
            continue;
        }
        let Some(input) = InputEvent::from_terminal(event::read().context("read event")?) else {
            continue;
        };
        if session.handle_event(input) {
            return Ok(());
        }
    }
}
