//! Shared constants for end-to-end tests
//!
//! These mirror the fixture data served by the mock upstream.

/// Fixture table with two variables of two values each
pub const TABLE_ID: &str = "folk1c";

/// Fixture table whose last update is "today" from the upstream's view
pub const UPDATED_TODAY_TABLE_ID: &str = "bev3c";

/// Fixture table that has been discontinued
pub const INACTIVE_TABLE_ID: &str = "hisb3";

pub const SUBJECT_1_ID: &str = "02";
pub const SUBJECT_1_TITLE_DA: &str = "Befolkning og valg";
pub const SUBJECT_1_TITLE_EN: &str = "Population and elections";
pub const SUBJECT_2_ID: &str = "16";

pub const VARIABLE_1_CODE: &str = "OMRÅDE";
pub const VARIABLE_2_CODE: &str = "TID";

/// Total cell count of the fixture table: 2 regions x 2 quarters
pub const TOTAL_CELLS: usize = 4;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Error body the mock upstream answers for unknown tables; tests assert it
/// arrives at the caller byte-for-byte.
pub const UNKNOWN_TABLE_BODY: &str =
    r#"{"errorTypeCode":"TableNotFound","message":"Tabellen blev ikke fundet."}"#;

/// Error body the mock upstream answers for invalid value codes.
pub const INVALID_CODE_BODY: &str =
    r#"{"errorTypeCode":"VariableValueNotFound","message":"Ugyldig værdikode."}"#;

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
