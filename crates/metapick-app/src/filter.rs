// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Column, DisplayRow, RecordId, RecordStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub active_column: Column,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            active_column: Column::FullName,
        }
    }
}

impl FilterState {
    pub fn new(search_text: impl Into<String>, active_column: Column) -> Self {
        Self {
            search_text: search_text.into(),
            active_column,
        }
    }

    pub fn cycle_column(&mut self) -> Column {
        self.active_column = self.active_column.next_filterable();
        self.active_column
    }

    pub fn cycle_column_back(&mut self) -> Column {
        self.active_column = self.active_column.prev_filterable();
        self.active_column
    }

    fn match_column(&self) -> Column {
        if self.active_column.is_filterable() {
            self.active_column
        } else {
            Column::FullName
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: RecordId,
    pub selected: bool,
}

/// The filtered projection of a store, in original record order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleRows {
    rows: Vec<VisibleRow>,
}

impl VisibleRows {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisibleRow> + '_ {
        self.rows.iter()
    }

    pub fn get(&self, row: DisplayRow) -> Option<&VisibleRow> {
        self.rows.get(row.get())
    }

    pub fn resolve(&self, row: DisplayRow) -> Option<RecordId> {
        self.get(row).map(|visible| visible.id)
    }

    pub fn position_of(&self, id: RecordId) -> Option<DisplayRow> {
        self.rows
            .iter()
            .position(|visible| visible.id == id)
            .map(DisplayRow::new)
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.rows.iter().map(|visible| visible.id).collect()
    }
}

/// Derives the visible rows for `filter` without touching the store.
pub fn visible(store: &RecordStore, filter: &FilterState) -> VisibleRows {
    let needle = filter.search_text.to_lowercase();
    let column = filter.match_column();
    let rows = store
        .iter()
        .filter(|(_, record)| {
            needle.is_empty()
                || record
                    .field_text(column)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
        .map(|(id, _)| VisibleRow {
            id,
            selected: store.is_selected(id),
        })
        .collect();
    VisibleRows { rows }
}

#[cfg(test)]
mod tests {
    use super::{FilterState, visible};
    use crate::{Column, DisplayRow, MetadataRecord, RecordId, RecordStore, Timestamp};

    fn store_with(rows: &[(&str, &str)]) -> RecordStore {
        let records = rows
            .iter()
            .map(|(name, author)| MetadataRecord {
                full_name: (*name).to_owned(),
                created_by: (*author).to_owned(),
                created_at: Timestamp::parse("2024-01-02T03:04:05.000Z"),
                updated_by: (*author).to_owned(),
                updated_at: Timestamp::parse("not a date"),
            })
            .collect();
        RecordStore::load(records).expect("non-empty load")
    }

    fn names(store: &RecordStore, filter: &FilterState) -> Vec<String> {
        visible(store, filter)
            .iter()
            .filter_map(|row| store.get(row.id))
            .map(|record| record.full_name.clone())
            .collect()
    }

    #[test]
    fn empty_search_keeps_every_record_in_order() {
        let store = store_with(&[("Zeta", "a"), ("Alpha", "b"), ("Mid", "c")]);
        assert_eq!(
            names(&store, &FilterState::default()),
            vec!["Zeta", "Alpha", "Mid"]
        );
    }

    #[test]
    fn substring_match_is_case_folded_on_both_sides() {
        let store = store_with(&[("Account", "x"), ("Contact", "x"), ("Lead", "x")]);
        // every name contains an "a" once folded
        assert_eq!(
            names(&store, &FilterState::new("a", Column::FullName)),
            vec!["Account", "Contact", "Lead"]
        );
        assert_eq!(
            names(&store, &FilterState::new("CON", Column::FullName)),
            vec!["Contact"]
        );
        assert_eq!(
            names(&store, &FilterState::new("ea", Column::FullName)),
            vec!["Lead"]
        );
    }

    #[test]
    fn active_column_scopes_the_match() {
        let store = store_with(&[("Account", "Ada"), ("Lead", "Grace")]);
        assert_eq!(
            names(&store, &FilterState::new("grace", Column::CreatedBy)),
            vec!["Lead"]
        );
        assert!(names(&store, &FilterState::new("grace", Column::FullName)).is_empty());
    }

    #[test]
    fn timestamp_columns_match_display_text() {
        let store = store_with(&[("Account", "Ada")]);
        assert_eq!(
            names(&store, &FilterState::new("2024-01-02 03:04", Column::CreatedAt)),
            vec!["Account"]
        );
        assert_eq!(
            names(&store, &FilterState::new("NOT A", Column::UpdatedAt)),
            vec!["Account"]
        );
    }

    #[test]
    fn selector_column_falls_back_to_full_name() {
        let store = store_with(&[("Account", "x"), ("Lead", "x")]);
        assert_eq!(
            names(&store, &FilterState::new("lead", Column::Selector)),
            vec!["Lead"]
        );
    }

    #[test]
    fn visible_is_idempotent() {
        let mut store = store_with(&[("Account", "x"), ("Lead", "y"), ("Case", "x")]);
        store.toggle_selection(RecordId::new(2));
        let filter = FilterState::new("x", Column::CreatedBy);
        assert_eq!(visible(&store, &filter), visible(&store, &filter));
    }

    #[test]
    fn rows_carry_selection_by_stable_id() {
        let mut store = store_with(&[("Account", "x"), ("Lead", "y"), ("Case", "x")]);
        store.toggle_selection(RecordId::new(2));
        let rows = visible(&store, &FilterState::new("x", Column::CreatedBy));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.resolve(DisplayRow::new(1)), Some(RecordId::new(2)));
        assert!(rows.get(DisplayRow::new(1)).is_some_and(|row| row.selected));
        assert_eq!(rows.position_of(RecordId::new(1)), None);
        assert_eq!(rows.resolve(DisplayRow::new(2)), None);
    }

    #[test]
    fn cycle_column_never_lands_on_selector() {
        let mut filter = FilterState::default();
        for _ in 0..12 {
            assert_ne!(filter.cycle_column(), Column::Selector);
            assert_ne!(filter.cycle_column_back(), Column::Selector);
            filter.cycle_column();
        }
    }
}
