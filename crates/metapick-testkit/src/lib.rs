// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use metapick_app::{MetadataRecord, RecordStore, Timestamp};
use serde_json::{Value, json};
use time::{Duration, OffsetDateTime};

const AUTHORS: [&str; 4] = ["Ada Lovelace", "Grace Hopper", "Alan Turing", "Integration User"];

const APEX_CLASSES: [&str; 10] = [
    "AccountService",
    "AccountServiceTest",
    "ContactTriggerHandler",
    "LeadRouter",
    "OpportunitySelector",
    "CaseEscalationJob",
    "InvoiceBatch",
    "PaymentGateway",
    "QuoteCalculator",
    "UserProvisioner",
];

// 2024-01-15T09:30:00Z
const BASE_UNIX_SECONDS: i64 = 1_705_311_000;

fn base_time() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(BASE_UNIX_SECONDS).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// A record with only a name; the other fields are empty.
pub fn named(name: &str) -> MetadataRecord {
    MetadataRecord {
        full_name: name.to_owned(),
        ..MetadataRecord::default()
    }
}

pub fn named_records(names: &[&str]) -> Vec<MetadataRecord> {
    names.iter().map(|name| named(name)).collect()
}

pub fn record(name: &str, created_by: &str, updated_by: &str, day_offset: i64) -> MetadataRecord {
    let created = base_time() + Duration::days(day_offset);
    MetadataRecord {
        full_name: name.to_owned(),
        created_by: created_by.to_owned(),
        created_at: Timestamp::from_datetime(created),
        updated_by: updated_by.to_owned(),
        updated_at: Timestamp::from_datetime(created + Duration::hours(36)),
    }
}

/// Ten Apex classes with rotating authors and one day between creations.
pub fn sample_records() -> Vec<MetadataRecord> {
    APEX_CLASSES
        .iter()
        .enumerate()
        .map(|(index, name)| {
            record(
                name,
                AUTHORS[index % AUTHORS.len()],
                AUTHORS[(index + 1) % AUTHORS.len()],
                index as i64,
            )
        })
        .collect()
}

pub fn sample_store() -> RecordStore {
    RecordStore::load(sample_records()).unwrap_or_default()
}

pub fn store_of(names: &[&str]) -> RecordStore {
    RecordStore::load(named_records(names)).unwrap_or_default()
}

fn metadata_entry(
    name: &str,
    created_by: &str,
    created: &str,
    updated_by: &str,
    updated: &str,
) -> Value {
    json!({
        "createdById": "0055g00000AAAAAAA1",
        "createdByName": created_by,
        "createdDate": created,
        "fileName": format!("classes/{name}.cls"),
        "fullName": name,
        "id": "01p5g00000BBBBBBB1",
        "lastModifiedById": "0055g00000AAAAAAA2",
        "lastModifiedByName": updated_by,
        "lastModifiedDate": updated,
        "manageableState": "unmanaged",
        "type": "ApexClass"
    })
}

/// A successful `sf org list metadata --json` payload with three classes.
pub fn list_metadata_json() -> String {
    json!({
        "status": 0,
        "result": [
            metadata_entry(
                "AccountService",
                "Ada Lovelace",
                "2024-01-15T09:30:00.000Z",
                "Grace Hopper",
                "2024-02-01T12:00:00.000Z",
            ),
            metadata_entry(
                "LeadRouter",
                "Grace Hopper",
                "2024-01-16T09:30:00.000+0000",
                "Alan Turing",
                "2024-02-02T12:00:00.000Z",
            ),
            metadata_entry(
                "InvoiceBatch",
                "Alan Turing",
                "not-a-timestamp",
                "Ada Lovelace",
                "2024-02-03T12:00:00.000Z",
            ),
        ],
        "warnings": []
    })
    .to_string()
}

/// Older CLI versions emit a bare object when exactly one component matches.
pub fn single_object_json() -> String {
    json!({
        "status": 0,
        "result": metadata_entry(
            "OnlyOne",
            "Ada Lovelace",
            "2024-01-15T09:30:00.000Z",
            "Ada Lovelace",
            "2024-01-15T09:30:00.000Z",
        ),
    })
    .to_string()
}

pub fn empty_result_json() -> String {
    json!({ "status": 0, "result": [], "warnings": [] }).to_string()
}

pub fn error_json() -> String {
    json!({
        "status": 1,
        "name": "NoDefaultEnvError",
        "message": "No default environment found. Use -o or --target-org to specify an environment.",
        "exitCode": 1
    })
    .to_string()
}
