//! Statistikbank upstream adapter.
//!
//! Thin pass-through to Danmarks Statistik's public Statistikbank API:
//! every operation forwards its parameters to the upstream endpoint and
//! returns the upstream response unmodified in shape. The adapter holds no
//! state across requests and never validates value codes itself; tableinfo
//! is the authority for valid codes.

mod client;
mod error;
mod models;

pub use client::{DataPayload, StatbankClient, DEFAULT_BASE_URL};
pub use error::StatbankError;
pub use models::{
    DataFormat, DataQuery, Lang, SubjectsQuery, TablesQuery, TimeOrder, ValueCode,
    ValuePresentation, VariableSelection,
};
