// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use metapick_app::{DEFAULT_METADATA_TYPE, MetadataRecord, Timestamp};
use serde::Deserialize;
use std::process::{Command, Output};
use std::time::Instant;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

pub const DEFAULT_PROGRAM: &str = "sf";
pub const DEFAULT_BASE_ARGS: [&str; 5] = ["org", "list", "metadata", "--json", "--metadata-type"];

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{name}: {message}")]
    Command { name: String, message: String },
    #[error("decode metadata listing: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("`{program}` exited with status {code:?} and no JSON output: {stderr}")]
    ExitStatus {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Everything needed to invoke the listing command. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub program: String,
    pub base_args: Vec<String>,
    pub metadata_type: String,
    pub target_org: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_owned(),
            base_args: DEFAULT_BASE_ARGS.iter().map(|arg| (*arg).to_owned()).collect(),
            metadata_type: DEFAULT_METADATA_TYPE.to_owned(),
            target_org: None,
        }
    }
}

impl FetchConfig {
    pub fn command_args(&self) -> Vec<String> {
        let mut args = self.base_args.clone();
        args.push(self.metadata_type.clone());
        if let Some(org) = &self.target_org {
            args.push("--target-org".to_owned());
            args.push(org.clone());
        }
        args
    }
}

pub struct SfClient {
    config: FetchConfig,
}

impl SfClient {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Runs the listing command to completion. There is no timeout.
    pub fn fetch(&self) -> Result<Vec<MetadataRecord>, SourceError> {
        let args = self.config.command_args();
        debug!(program = %self.config.program, ?args, "running metadata listing");
        let started = Instant::now();

        let output = Command::new(&self.config.program)
            .args(&args)
            .output()
            .map_err(|source| SourceError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        let records = self.decode_output(output)?;
        info!(
            metadata_type = %self.config.metadata_type,
            count = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched metadata records"
        );
        Ok(records)
    }

    fn decode_output(&self, output: Output) -> Result<Vec<MetadataRecord>, SourceError> {
        // Failures usually arrive as a JSON envelope on stdout alongside a non-zero exit.
        match decode_response(&output.stdout) {
            Err(SourceError::Decode(error)) if !output.status.success() => {
                debug!(%error, "non-zero exit without a JSON envelope");
                Err(SourceError::ExitStatus {
                    program: self.config.program.clone(),
                    code: output.status.code(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
                })
            }
            decoded => decoded,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    result: Option<OneOrMany<RawRecord>>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    created_by_name: String,
    #[serde(default)]
    created_date: String,
    #[serde(default)]
    last_modified_by_name: String,
    #[serde(default)]
    last_modified_date: String,
}

impl RawRecord {
    fn into_record(self) -> MetadataRecord {
        MetadataRecord {
            full_name: self.full_name,
            created_by: self.created_by_name,
            created_at: Timestamp::parse(&self.created_date),
            updated_by: self.last_modified_by_name,
            updated_at: Timestamp::parse(&self.last_modified_date),
        }
    }
}

/// Decodes the `--json` output of the metadata listing command.
pub fn decode_response(raw: &[u8]) -> Result<Vec<MetadataRecord>, SourceError> {
    let envelope: Envelope = serde_json::from_slice(raw)?;
    if envelope.status != 0 {
        return Err(SourceError::Command {
            name: envelope.name.unwrap_or_else(|| "CommandError".to_owned()),
            message: envelope
                .message
                .unwrap_or_else(|| format!("listing failed with status {}", envelope.status)),
        });
    }

    let raw_records = match envelope.result {
        Some(OneOrMany::Many(records)) => records,
        Some(OneOrMany::One(record)) => vec![record],
        None => Vec::new(),
    };
    let total = raw_records.len();
    let records = raw_records
        .into_iter()
        .filter(|raw| !raw.full_name.trim().is_empty())
        .map(RawRecord::into_record)
        .collect::<Vec<_>>();
    if records.len() < total {
        warn!(
            skipped = total - records.len(),
            "skipped listing entries without a fullName"
        );
    }

    let unparsed = records
        .iter()
        .flat_map(|record| [&record.created_at, &record.updated_at])
        .filter(|ts| !ts.is_parsed() && !ts.as_str().is_empty())
        .count();
    if unparsed > 0 {
        warn!(unparsed, "kept unparseable timestamps as raw text");
    }
    Ok(records)
}

const DEMO_AUTHORS: [&str; 3] = ["Demo Admin", "Release Bot", "Integration User"];
const DEMO_STEMS: [&str; 8] = [
    "Account", "Contact", "Lead", "Opportunity", "Case", "Invoice", "Quote", "Order",
];
const DEMO_SUFFIXES: [&str; 3] = ["Service", "Selector", "Handler"];
// 2024-06-03T08:00:00Z
const DEMO_EPOCH: i64 = 1_717_401_600;

/// Deterministic offline records for `metadata_type`.
pub fn demo_records(metadata_type: &str) -> Vec<MetadataRecord> {
    let base =
        OffsetDateTime::from_unix_timestamp(DEMO_EPOCH).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    DEMO_STEMS
        .iter()
        .flat_map(|stem| DEMO_SUFFIXES.iter().map(move |suffix| (*stem, *suffix)))
        .enumerate()
        .map(|(index, (stem, suffix))| {
            let created = base + Duration::hours(index as i64 * 17);
            let full_name = if metadata_type == DEFAULT_METADATA_TYPE {
                format!("{stem}{suffix}")
            } else {
                format!("{stem}{suffix}{metadata_type}")
            };
            MetadataRecord {
                full_name,
                created_by: DEMO_AUTHORS[index % DEMO_AUTHORS.len()].to_owned(),
                created_at: Timestamp::from_datetime(created),
                updated_by: DEMO_AUTHORS[(index + 2) % DEMO_AUTHORS.len()].to_owned(),
                updated_at: Timestamp::from_datetime(created + Duration::days(3)),
            }
        })
        .collect()
}
