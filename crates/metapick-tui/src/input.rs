// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The only inputs the session consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
}

impl InputEvent {
    /// Keeps key presses and resizes; drops releases, repeats, mouse and focus events.
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEdit {
    Insert(char),
    Backspace,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Resize { width: u16, height: u16 },
    Quit,
    StepForward,
    StepBack,
    ToggleSelection,
    NextFilterColumn,
    PrevFilterColumn,
    Search(SearchEdit),
    Navigate(Navigation),
}

pub fn action_for_event(event: InputEvent) -> Option<Action> {
    match event {
        InputEvent::Resize { width, height } => Some(Action::Resize { width, height }),
        InputEvent::Key(key) => action_for_key(key),
    }
}

fn action_for_key(key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::Quit)
        }
        (KeyCode::Esc, _) => Some(Action::Quit),
        (KeyCode::Right, _) => Some(Action::StepForward),
        (KeyCode::Left, _) => Some(Action::StepBack),
        (KeyCode::Enter, _) => Some(Action::ToggleSelection),
        (KeyCode::Tab, _) => Some(Action::NextFilterColumn),
        (KeyCode::BackTab, _) => Some(Action::PrevFilterColumn),
        (KeyCode::Up, _) => Some(Action::Navigate(Navigation::Up)),
        (KeyCode::Down, _) => Some(Action::Navigate(Navigation::Down)),
        (KeyCode::PageUp, _) => Some(Action::Navigate(Navigation::PageUp)),
        (KeyCode::PageDown, _) => Some(Action::Navigate(Navigation::PageDown)),
        (KeyCode::Home, _) => Some(Action::Navigate(Navigation::First)),
        (KeyCode::End, _) => Some(Action::Navigate(Navigation::Last)),
        (KeyCode::Backspace, _) => Some(Action::Search(SearchEdit::Backspace)),
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::Search(SearchEdit::Clear))
        }
        (KeyCode::Char(ch), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Action::Search(SearchEdit::Insert(ch)))
        }
        _ => None,
    }
}
