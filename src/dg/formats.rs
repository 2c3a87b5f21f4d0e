//! Output format implementations for generated advertisements
//!
//! This module contains the formatters that write [AdRecord](crate::dg::AdRecord)
//! streams to a sink:
//! - delimited rows (csv, tsv)
//! - JSON lines

pub mod delimited;
pub mod jsonl;
pub mod registry;

pub use delimited::DelimitedFormatter;
pub use jsonl::JsonLinesFormatter;
pub use registry::{format_name_for_path, FormatError, FormatRegistry, Formatter};
