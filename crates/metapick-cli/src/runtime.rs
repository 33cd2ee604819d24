// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use metapick_app::MetadataRecord;
use metapick_source::{SfClient, demo_records};
use metapick_tui::RecordSource;

/// Where the session's records come from for this run.
pub enum SourceRuntime {
    Sf(SfClient),
    Demo { metadata_type: String },
}

impl SourceRuntime {
    pub fn demo(metadata_type: impl Into<String>) -> Self {
        Self::Demo {
            metadata_type: metadata_type.into(),
        }
    }
}

impl RecordSource for SourceRuntime {
    fn metadata_type(&self) -> &str {
        match self {
            Self::Sf(client) => &client.config().metadata_type,
            Self::Demo { metadata_type } => metadata_type,
        }
    }

    fn fetch_records(&mut self) -> Result<Vec<MetadataRecord>> {
        match self {
            Self::Sf(client) => client.fetch().with_context(|| {
                format!(
                    "list {} metadata with `{}`",
                    client.config().metadata_type,
                    client.config().program
                )
            }),
            Self::Demo { metadata_type } => Ok(demo_records(metadata_type)),
        }
    }
}
