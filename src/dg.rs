//! Main module for dg library functionality

pub mod app;
pub mod config;
pub mod error;
pub mod formats;
pub mod generation;
pub mod parsing;
pub mod section;
pub mod template;

pub use error::DgError;
pub use generation::{generate, product_size, AdRecord, Combinations, GenerateOptions, LengthLimits};
pub use parsing::{DgDocument, DgParser, ParseOptions};
pub use section::Section;
pub use template::{substitute, Template};
