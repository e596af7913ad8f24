//! Export of (filtered) records to structured formats

use crate::core::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// A single JSON array
    Json,
    /// One JSON object per line
    JsonLines,
    /// A YAML sequence
    Yaml,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::JsonLines => "application/x-ndjson",
            ExportFormat::Yaml => "application/yaml",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::JsonLines => "jsonl",
            ExportFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "jsonl" | "ndjson" | "json_lines" => Ok(ExportFormat::JsonLines),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            _ => Err(ExportError::UnknownFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Encode records in the requested format
pub fn export_records<R: Serialize>(records: &[&R], format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let bytes = match format {
        ExportFormat::Json => serde_json::to_vec_pretty(records)?,
        ExportFormat::JsonLines => {
            let mut out = Vec::new();
            for record in records {
                serde_json::to_writer(&mut out, record)?;
                out.push(b'\n');
            }
            out
        }
        ExportFormat::Yaml => serde_yaml::to_string(records)?.into_bytes(),
    };

    tracing::debug!(count = records.len(), %format, bytes = bytes.len(), "Exported records");
    Ok(bytes)
}
