// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use metapick_app::{
    AppCommand, AppState, Column, DisplayRow, FilterState, RecordId, RecordStore, StoreError,
    WizardStep, visible,
};
use metapick_testkit::{named_records, sample_store, store_of};

fn visible_names(store: &RecordStore, filter: &FilterState) -> Vec<String> {
    visible(store, filter)
        .iter()
        .filter_map(|row| store.get(row.id))
        .map(|record| record.full_name.clone())
        .collect()
}

#[test]
fn account_contact_lead_all_contain_a() {
    let store = store_of(&["Account", "Contact", "Lead"]);
    let names = visible_names(&store, &FilterState::new("a", Column::FullName));
    assert_eq!(names, vec!["Account", "Contact", "Lead"]);
}

#[test]
fn empty_search_returns_every_record_in_original_order() {
    let store = sample_store();
    let rows = visible(&store, &FilterState::new("", Column::FullName));
    let ids = rows.ids();
    let expected = (0..store.len()).map(RecordId::new).collect::<Vec<_>>();
    assert_eq!(ids, expected);
}

#[test]
fn selection_survives_hiding_and_revealing() -> Result<()> {
    let mut store = RecordStore::load(named_records(&["Alpha", "Beta", "Gamma"]))?;
    let mut filter = FilterState::default();

    for target in 0..store.len() {
        let id = RecordId::new(target);
        let before = store.is_selected(id);
        store.toggle_selection(id);

        filter.search_text = "zzz-hides-everything".to_owned();
        assert!(visible(&store, &filter).position_of(id).is_none());

        filter.search_text.clear();
        let rows = visible(&store, &filter);
        let row = rows
            .position_of(id)
            .and_then(|position| rows.get(position))
            .copied();
        assert_eq!(row.map(|row| row.selected), Some(!before));
    }
    Ok(())
}

#[test]
fn second_visible_row_resolves_to_second_surviving_record() -> Result<()> {
    let mut store = RecordStore::load(named_records(&[
        "keep-1", "drop-2", "keep-3", "drop-4", "keep-5",
    ]))?;
    let filter = FilterState::new("keep", Column::FullName);
    let rows = visible(&store, &filter);
    assert_eq!(rows.len(), 3);

    let id = rows
        .resolve(DisplayRow::new(1))
        .expect("second visible row exists");
    store.toggle_selection(id);

    assert!(store.is_selected(RecordId::new(2)));
    assert!(!store.is_selected(RecordId::new(1)));
    let selected = store
        .selected_records()
        .into_iter()
        .map(|record| record.full_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(selected, vec!["keep-3"]);
    Ok(())
}

#[test]
fn empty_fetch_is_an_explicit_error() {
    let error = RecordStore::load(Vec::new()).expect_err("empty fetch should fail");
    assert_eq!(error, StoreError::EmptyResult);
    assert_eq!(error.to_string(), "the source returned no records");

    let degraded = RecordStore::default();
    assert!(visible(&degraded, &FilterState::default()).is_empty());
}

#[test]
fn column_cycle_from_state_covers_every_filterable_column() {
    let mut state = AppState::default();
    let mut seen = vec![state.filter.active_column];
    loop {
        state.dispatch(AppCommand::NextFilterColumn);
        if state.filter.active_column == Column::FullName {
            break;
        }
        seen.push(state.filter.active_column);
    }
    assert_eq!(seen, Column::FILTERABLE.to_vec());
}

#[test]
fn wizard_wraps_in_both_directions() {
    let mut state = AppState::default();
    assert_eq!(state.step, WizardStep::PickType);

    state.dispatch(AppCommand::StepBack);
    assert_eq!(state.step, WizardStep::BrowseRecords);

    state.dispatch(AppCommand::StepForward);
    assert_eq!(state.step, WizardStep::PickType);
}

#[test]
fn author_filter_then_selection_maps_through_projection() -> Result<()> {
    let mut store = sample_store();
    let filter = FilterState::new("grace", Column::CreatedBy);
    let rows = visible(&store, &filter);
    assert!(!rows.is_empty());

    let first = rows.resolve(DisplayRow::new(0)).expect("one row");
    store.toggle_selection(first);
    let record = store.get(first).expect("resolved id is loaded");
    assert_eq!(record.created_by, "Grace Hopper");
    assert_eq!(store.selected_count(), 1);
    Ok(())
}
