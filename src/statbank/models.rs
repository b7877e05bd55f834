//! Parameter types for the Statistikbank endpoints.
//!
//! These describe what a caller can ask for and how it is reshaped into the
//! upstream JSON request bodies. The metadata endpoints (subjects, tables,
//! tableinfo) always request `"format": "JSON"` from upstream; only the data
//! endpoint honors the caller's output format.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Language for metadata in upstream responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Da,
    En,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Da => "da",
            Lang::En => "en",
        }
    }
}

/// Output format for data queries.
///
/// Parsed case-insensitively; the upstream expects the canonical spelling
/// produced by [`DataFormat::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    #[default]
    JsonStat,
    Json,
    Csv,
    Xlsx,
    Bulk,
    Px,
    Tsv,
    Html5,
    Html5InclNotes,
    SdmxCompact,
    SdmxGeneric,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::JsonStat => "JSONSTAT",
            DataFormat::Json => "JSON",
            DataFormat::Csv => "CSV",
            DataFormat::Xlsx => "XLSX",
            DataFormat::Bulk => "BULK",
            DataFormat::Px => "PX",
            DataFormat::Tsv => "TSV",
            DataFormat::Html5 => "HTML5",
            DataFormat::Html5InclNotes => "HTML5InclNotes",
            DataFormat::SdmxCompact => "SDMXCOMPACT",
            DataFormat::SdmxGeneric => "SDMXGENERIC",
        }
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "JSONSTAT" => Ok(DataFormat::JsonStat),
            "JSON" => Ok(DataFormat::Json),
            "CSV" => Ok(DataFormat::Csv),
            "XLSX" => Ok(DataFormat::Xlsx),
            "BULK" => Ok(DataFormat::Bulk),
            "PX" => Ok(DataFormat::Px),
            "TSV" => Ok(DataFormat::Tsv),
            "HTML5" => Ok(DataFormat::Html5),
            "HTML5INCLNOTES" => Ok(DataFormat::Html5InclNotes),
            "SDMXCOMPACT" => Ok(DataFormat::SdmxCompact),
            "SDMXGENERIC" => Ok(DataFormat::SdmxGeneric),
            _ => Err(format!("unknown data format: {}", s)),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DataFormat {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataFormat {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sort order for time series in data responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOrder {
    Ascending,
    Descending,
}

/// Whether data cells are labeled by value code or by display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuePresentation {
    Code,
    Text,
}

/// A value code as accepted by the data endpoint: string or integer,
/// forwarded verbatim. `"*"` selects all values of a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueCode {
    Text(String),
    Number(i64),
}

/// Selection of values for a single table variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSelection {
    pub code: String,
    pub values: Vec<ValueCode>,
}

impl VariableSelection {
    /// Select every value of a variable via the `"*"` wildcard.
    pub fn all(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            values: vec![ValueCode::Text("*".to_string())],
        }
    }
}

/// Parameters for the subjects endpoint.
#[derive(Debug, Clone, Default)]
pub struct SubjectsQuery {
    /// Subject codes to fetch sub-subjects for; empty means the root level.
    pub subjects: Vec<String>,
    pub include_tables: bool,
    pub recursive: bool,
    pub omit_inactive_subjects: bool,
    pub lang: Lang,
}

impl SubjectsQuery {
    pub(crate) fn to_payload(&self) -> Value {
        let mut payload = json!({ "format": "JSON", "lang": self.lang });
        if !self.subjects.is_empty() {
            payload["subjects"] = json!(self.subjects);
        }
        if self.include_tables {
            payload["includeTables"] = json!(true);
        }
        if self.recursive {
            payload["recursive"] = json!(true);
        }
        if self.omit_inactive_subjects {
            payload["omitInactiveSubjects"] = json!(true);
        }
        payload
    }
}

/// Parameters for the tables endpoint.
#[derive(Debug, Clone, Default)]
pub struct TablesQuery {
    /// Subject codes to filter tables on; empty means all subjects.
    pub subjects: Vec<String>,
    /// Only tables updated within this many days; 0 means updated today.
    pub pastdays: Option<u32>,
    pub include_inactive: bool,
    pub lang: Lang,
}

impl TablesQuery {
    pub(crate) fn to_payload(&self) -> Value {
        let mut payload = json!({ "format": "JSON", "lang": self.lang });
        if !self.subjects.is_empty() {
            payload["subjects"] = json!(self.subjects);
        }
        if let Some(pastdays) = self.pastdays {
            payload["pastdays"] = json!(pastdays);
        }
        if self.include_inactive {
            payload["includeInactive"] = json!(true);
        }
        payload
    }
}

/// Parameters for the data endpoint.
///
/// An empty variable list fetches all values, with upstream's automatic
/// elimination of variables.
#[derive(Debug, Clone, Default)]
pub struct DataQuery {
    pub variables: Vec<VariableSelection>,
    pub format: DataFormat,
    pub time_order: Option<TimeOrder>,
    pub lang: Lang,
    pub value_presentation: Option<ValuePresentation>,
}

impl DataQuery {
    pub(crate) fn to_payload(&self, table_id: &str) -> Value {
        let mut payload = json!({
            "table": table_id,
            "format": self.format,
            "lang": self.lang,
        });
        if !self.variables.is_empty() {
            payload["variables"] = json!(self.variables);
        }
        if let Some(order) = &self.time_order {
            payload["timeOrder"] = json!(order);
        }
        if let Some(presentation) = &self.value_presentation {
            payload["valuePresentation"] = json!(presentation);
        }
        payload
    }
}
