//! # dg
//!
//! Expands `.dg` template files into every concrete advertisement they describe.
//!
//! A `.dg` file lists keywords, title templates and text templates under three
//! section markers. Each keyword is substituted into every `[k]` / `[K]` placeholder
//! of every title and text, and the resulting (title, text) pairs are written out as
//! one row per advertisement. See [dg::parsing] for the file format and
//! [dg::generation] for the combination order.

pub mod dg;
