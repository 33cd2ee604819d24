// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::borrow::Cow;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

pub const DEFAULT_METADATA_TYPE: &str = "ApexClass";

pub const DEFAULT_METADATA_TYPES: [&str; 21] = [
    "ApexClass",
    "ApexTrigger",
    "ApexPage",
    "ApexComponent",
    "AuraDefinitionBundle",
    "LightningComponentBundle",
    "CustomObject",
    "CustomField",
    "CustomLabels",
    "CustomTab",
    "FlexiPage",
    "Flow",
    "Layout",
    "PermissionSet",
    "Profile",
    "RecordType",
    "StaticResource",
    "ValidationRule",
    "EmailTemplate",
    "Report",
    "Dashboard",
];

/// A timestamp field as delivered by the source.
///
/// Unparseable input is kept verbatim as display text; it is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    parsed: Option<OffsetDateTime>,
    text: String,
}

impl Timestamp {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match OffsetDateTime::parse(&normalize_offset(trimmed), &Rfc3339) {
            Ok(parsed) => Self::from_datetime(parsed),
            Err(_) => Self {
                parsed: None,
                text: raw.to_owned(),
            },
        }
    }

    pub fn from_datetime(value: OffsetDateTime) -> Self {
        let utc = value.to_offset(UtcOffset::UTC);
        let text = utc
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .unwrap_or_else(|_| utc.to_string());
        Self {
            parsed: Some(value),
            text,
        }
    }

    pub fn datetime(&self) -> Option<OffsetDateTime> {
        self.parsed
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed.is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self {
            parsed: None,
            text: String::new(),
        }
    }
}

// `+0000` style offsets are common in CLI output but not valid RFC 3339.
fn normalize_offset(raw: &str) -> Cow<'_, str> {
    if raw.len() <= 5 || !raw.contains('T') {
        return Cow::Borrowed(raw);
    }
    let split = raw.len() - 5;
    if !raw.is_char_boundary(split) {
        return Cow::Borrowed(raw);
    }
    let (head, tail) = raw.split_at(split);
    let has_sign = tail.starts_with('+') || tail.starts_with('-');
    if has_sign && tail[1..].chars().all(|ch| ch.is_ascii_digit()) {
        return Cow::Owned(format!("{head}{}:{}", &tail[..3], &tail[3..]));
    }
    Cow::Borrowed(raw)
}

/// One fetched metadata descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataRecord {
    pub full_name: String,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_by: String,
    pub updated_at: Timestamp,
}

impl MetadataRecord {
    /// Display text of a filterable column; `None` for the selector column.
    pub fn field_text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Selector => None,
            Column::FullName => Some(&self.full_name),
            Column::CreatedBy => Some(&self.created_by),
            Column::CreatedAt => Some(self.created_at.as_str()),
            Column::UpdatedBy => Some(&self.updated_by),
            Column::UpdatedAt => Some(self.updated_at.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Selector,
    FullName,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
}

impl Column {
    pub const ALL: [Self; 6] = [
        Self::Selector,
        Self::FullName,
        Self::CreatedBy,
        Self::CreatedAt,
        Self::UpdatedBy,
        Self::UpdatedAt,
    ];

    pub const FILTERABLE: [Self; 5] = [
        Self::FullName,
        Self::CreatedBy,
        Self::CreatedAt,
        Self::UpdatedBy,
        Self::UpdatedAt,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Selector => "",
            Self::FullName => "Metadata name",
            Self::CreatedBy => "Created by",
            Self::CreatedAt => "Created at",
            Self::UpdatedBy => "Updated by",
            Self::UpdatedAt => "Updated at",
        }
    }

    pub const fn is_filterable(self) -> bool {
        !matches!(self, Self::Selector)
    }

    pub fn next_filterable(self) -> Self {
        self.step_filterable(1)
    }

    pub fn prev_filterable(self) -> Self {
        self.step_filterable(-1)
    }

    fn step_filterable(self, delta: isize) -> Self {
        let columns = Self::FILTERABLE;
        let Some(current) = columns.iter().position(|column| *column == self) else {
            return Self::FullName;
        };
        let len = columns.len() as isize;
        let next = (current as isize + delta).rem_euclid(len) as usize;
        columns[next]
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, MetadataRecord, Timestamp};
    use std::collections::BTreeSet;

    #[test]
    fn timestamp_parses_rfc3339_with_millis() {
        let ts = Timestamp::parse("2024-03-01T10:15:30.000Z");
        assert!(ts.is_parsed());
        assert_eq!(ts.as_str(), "2024-03-01 10:15:30");
    }

    #[test]
    fn timestamp_normalizes_compact_offsets_to_utc() {
        let ts = Timestamp::parse("2024-03-01T12:15:30.000+0200");
        assert!(ts.is_parsed());
        assert_eq!(ts.as_str(), "2024-03-01 10:15:30");
    }

    #[test]
    fn timestamp_keeps_malformed_input_verbatim() {
        let ts = Timestamp::parse("last tuesday");
        assert!(!ts.is_parsed());
        assert_eq!(ts.as_str(), "last tuesday");

        let multibyte = Timestamp::parse("héllo wörld");
        assert_eq!(multibyte.as_str(), "héllo wörld");
    }

    #[test]
    fn selector_has_no_field_text() {
        let record = MetadataRecord {
            full_name: "Account".to_owned(),
            ..MetadataRecord::default()
        };
        assert_eq!(record.field_text(Column::Selector), None);
        assert_eq!(record.field_text(Column::FullName), Some("Account"));
    }

    #[test]
    fn next_filterable_visits_every_column_before_returning() {
        for start in Column::FILTERABLE {
            let mut seen = BTreeSet::new();
            let mut column = start;
            for _ in 0..Column::FILTERABLE.len() {
                seen.insert(column);
                column = column.next_filterable();
            }
            assert_eq!(column, start, "cycle from {start:?} should close after 5 steps");
            assert_eq!(seen.len(), Column::FILTERABLE.len());
            assert!(!seen.contains(&Column::Selector));
        }
    }

    #[test]
    fn filterable_stepping_wraps_in_both_directions() {
        assert_eq!(Column::UpdatedAt.next_filterable(), Column::FullName);
        assert_eq!(Column::FullName.prev_filterable(), Column::UpdatedAt);
        assert_eq!(Column::Selector.next_filterable(), Column::FullName);
    }

    #[test]
    fn labels_match_header_text() {
        let labels = Column::FILTERABLE
            .iter()
            .map(|column| column.label())
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            vec![
                "Metadata name",
                "Created by",
                "Created at",
                "Updated by",
                "Updated at"
            ]
        );
        assert!(!Column::Selector.is_filterable());
    }
}
