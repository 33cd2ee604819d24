// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Column, FilterState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    PickType,
    BrowseRecords,
}

impl WizardStep {
    pub const ALL: [Self; 2] = [Self::PickType, Self::BrowseRecords];

    pub const fn label(self) -> &'static str {
        match self {
            Self::PickType => "pick type",
            Self::BrowseRecords => "browse records",
        }
    }

    /// Moves `delta` steps with wraparound in both directions.
    pub fn step(self, delta: isize) -> Self {
        let steps = Self::ALL;
        let current = steps
            .iter()
            .position(|step| *step == self)
            .unwrap_or(0) as isize;
        let len = steps.len() as isize;
        steps[(current + delta).rem_euclid(len) as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub step: WizardStep,
    pub filter: FilterState,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            step: WizardStep::PickType,
            filter: FilterState::default(),
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    StepForward,
    StepBack,
    NextFilterColumn,
    PrevFilterColumn,
    SetSearchText(String),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    StepChanged(WizardStep),
    FilterColumnChanged(Column),
    SearchChanged(String),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::StepForward => self.rotate_step(1),
            AppCommand::StepBack => self.rotate_step(-1),
            AppCommand::NextFilterColumn => {
                vec![AppEvent::FilterColumnChanged(self.filter.cycle_column())]
            }
            AppCommand::PrevFilterColumn => {
                vec![AppEvent::FilterColumnChanged(
                    self.filter.cycle_column_back(),
                )]
            }
            AppCommand::SetSearchText(text) => {
                if self.filter.search_text == text {
                    return Vec::new();
                }
                self.filter.search_text = text.clone();
                vec![AppEvent::SearchChanged(text)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(message)],
            AppCommand::ClearStatus => {
                if self.status_line.take().is_none() {
                    return Vec::new();
                }
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_step(&mut self, delta: isize) -> Vec<AppEvent> {
        self.step = self.step.step(delta);
        vec![AppEvent::StepChanged(self.step)]
    }

    fn set_status(&mut self, message: String) -> AppEvent {
        self.status_line = Some(message.clone());
        AppEvent::StatusUpdated(message)
    }
}
