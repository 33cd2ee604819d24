// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::ops::Range;

use metapick_app::{DisplayRow, RecordId, VisibleRows};

use crate::input::{Navigation, SearchEdit};

const DEFAULT_VIEWPORT_ROWS: usize = 10;

/// Cursor plus scroll offset over a list of `len` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScrollWindow {
    cursor: usize,
    offset: usize,
    height: usize,
}

impl Default for ScrollWindow {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            height: DEFAULT_VIEWPORT_ROWS,
        }
    }
}

impl ScrollWindow {
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn set_height(&mut self, height: usize, len: usize) {
        self.height = height.max(1);
        self.clamp(len);
    }

    pub(crate) fn jump_to(&mut self, index: usize, len: usize) {
        self.cursor = index;
        self.clamp(len);
    }

    pub(crate) fn navigate(&mut self, navigation: Navigation, len: usize) {
        let last = len.saturating_sub(1);
        self.cursor = match navigation {
            Navigation::Up => self.cursor.saturating_sub(1),
            Navigation::Down => self.cursor.saturating_add(1),
            Navigation::PageUp => self.cursor.saturating_sub(self.height),
            Navigation::PageDown => self.cursor.saturating_add(self.height),
            Navigation::First => 0,
            Navigation::Last => last,
        };
        self.clamp(len);
    }

    pub(crate) fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        self.cursor = self.cursor.min(len - 1);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
        self.offset = self.offset.min(len.saturating_sub(self.height));
    }

    pub(crate) fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        start..(start + self.height).min(len)
    }
}

/// Single-line search buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SearchInput {
    value: String,
}

impl SearchInput {
    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    /// Applies `edit` and reports whether the buffer changed.
    pub(crate) fn apply(&mut self, edit: SearchEdit) -> bool {
        match edit {
            SearchEdit::Insert(ch) => {
                self.value.push(ch);
                true
            }
            SearchEdit::Backspace => self.value.pop().is_some(),
            SearchEdit::Clear => {
                let changed = !self.value.is_empty();
                self.value.clear();
                changed
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TypeList {
    items: Vec<String>,
    window: ScrollWindow,
}

impl TypeList {
    /// Builds the list with the cursor on `loaded`, appending it when missing.
    pub(crate) fn new(mut items: Vec<String>, loaded: &str) -> Self {
        if !items.iter().any(|item| item == loaded) {
            items.push(loaded.to_owned());
        }
        let mut window = ScrollWindow::default();
        let position = items.iter().position(|item| item == loaded).unwrap_or(0);
        window.jump_to(position, items.len());
        Self { items, window }
    }

    pub(crate) fn items(&self) -> &[String] {
        &self.items
    }

    pub(crate) fn highlighted(&self) -> Option<&str> {
        self.items.get(self.window.cursor()).map(String::as_str)
    }

    pub(crate) fn cursor(&self) -> usize {
        self.window.cursor()
    }

    pub(crate) fn navigate(&mut self, navigation: Navigation) {
        self.window.navigate(navigation, self.items.len());
    }

    pub(crate) fn set_height(&mut self, height: usize) {
        self.window.set_height(height, self.items.len());
    }

    pub(crate) fn height(&self) -> usize {
        self.window.height()
    }

    pub(crate) fn visible_range(&self) -> Range<usize> {
        self.window.visible_range(self.items.len())
    }
}

/// Table widget state. Its cursor addresses the rows last pushed into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RecordTable {
    rows: VisibleRows,
    window: ScrollWindow,
}

impl RecordTable {
    pub(crate) fn set_rows(&mut self, rows: VisibleRows) {
        self.rows = rows;
        self.window.clamp(self.rows.len());
    }

    pub(crate) fn rows(&self) -> &VisibleRows {
        &self.rows
    }

    pub(crate) fn cursor(&self) -> DisplayRow {
        DisplayRow::new(self.window.cursor())
    }

    pub(crate) fn highlighted_id(&self) -> Option<RecordId> {
        self.rows.resolve(self.cursor())
    }

    pub(crate) fn navigate(&mut self, navigation: Navigation) {
        self.window.navigate(navigation, self.rows.len());
    }

    pub(crate) fn set_height(&mut self, height: usize) {
        self.window.set_height(height, self.rows.len());
    }

    pub(crate) fn height(&self) -> usize {
        self.window.height()
    }

    pub(crate) fn visible_range(&self) -> Range<usize> {
        self.window.visible_range(self.rows.len())
    }
}
