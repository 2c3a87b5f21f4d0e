//! JSON lines output: one `{"keyword", "title", "text"}` object per line

use super::registry::{FormatError, Formatter};
use crate::dg::generation::AdRecord;
use std::io::Write;

#[derive(Debug, Clone, Copy)]
pub struct JsonLinesFormatter;

impl Formatter for JsonLinesFormatter {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn write_records(
        &self,
        records: &mut dyn Iterator<Item = AdRecord>,
        sink: &mut dyn Write,
    ) -> Result<usize, FormatError> {
        let mut written = 0;
        for record in records {
            serde_json::to_writer(&mut *sink, &record).map_err(json_error)?;
            sink.write_all(b"\n")?;
            written += 1;
        }
        sink.flush()?;
        Ok(written)
    }

    fn description(&self) -> &str {
        "One JSON object per advertisement, including its keyword"
    }
}

fn json_error(err: serde_json::Error) -> FormatError {
    if err.is_io() {
        FormatError::Io(err.into())
    } else {
        FormatError::SerializationError(err.to_string())
    }
}
