// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::{MetadataRecord, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("the source returned no records")]
    EmptyResult,
}

/// Sparse selection flags keyed by stable record identity.
///
/// An id that was never toggled reads as unselected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    flags: BTreeMap<RecordId, bool>,
}

impl SelectionTracker {
    pub fn toggle(&mut self, id: RecordId) -> bool {
        let flag = self.flags.entry(id).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.flags.get(&id).copied().unwrap_or(false)
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.flags
            .iter()
            .filter_map(|(id, selected)| selected.then_some(*id))
    }

    pub fn selected_count(&self) -> usize {
        self.flags.values().filter(|selected| **selected).count()
    }
}

/// Immutable snapshot of fetched records plus their selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<MetadataRecord>,
    selection: SelectionTracker,
}

impl RecordStore {
    pub fn load(records: Vec<MetadataRecord>) -> Result<Self, StoreError> {
        if records.is_empty() {
            return Err(StoreError::EmptyResult);
        }
        Ok(Self {
            records,
            selection: SelectionTracker::default(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&MetadataRecord> {
        self.records.get(id.get())
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &MetadataRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (RecordId::new(index), record))
    }

    /// Flips the flag for `id` and returns the new value, or `None` when the
    /// id does not name a loaded record.
    pub fn toggle_selection(&mut self, id: RecordId) -> Option<bool> {
        if id.get() >= self.records.len() {
            return None;
        }
        Some(self.selection.toggle(id))
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    pub fn selected_records(&self) -> Vec<&MetadataRecord> {
        self.selection
            .selected_ids()
            .filter_map(|id| self.get(id))
            .collect()
    }
}
