//! Delimited (csv / tsv) output
//!
//! One row per advertisement, columns `title` and `text`, no header row. Fields are
//! quoted only when they contain the delimiter, a quote or a line break.

use super::registry::{FormatError, Formatter};
use crate::dg::generation::AdRecord;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct DelimitedFormatter {
    name: &'static str,
    description: &'static str,
    delimiter: u8,
}

impl DelimitedFormatter {
    pub fn csv() -> Self {
        Self {
            name: "csv",
            description: "Comma-separated title,text rows",
            delimiter: b',',
        }
    }

    pub fn tsv() -> Self {
        Self {
            name: "tsv",
            description: "Tab-separated title/text rows",
            delimiter: b'\t',
        }
    }
}

impl Formatter for DelimitedFormatter {
    fn name(&self) -> &str {
        self.name
    }

    fn write_records(
        &self,
        records: &mut dyn Iterator<Item = AdRecord>,
        sink: &mut dyn Write,
    ) -> Result<usize, FormatError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(sink);

        let mut written = 0;
        for record in records {
            writer
                .write_record([record.title.as_str(), record.text.as_str()])
                .map_err(csv_error)?;
            written += 1;
        }
        writer.flush()?;
        Ok(written)
    }

    fn description(&self) -> &str {
        self.description
    }
}

fn csv_error(err: csv::Error) -> FormatError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => FormatError::Io(io),
        other => FormatError::SerializationError(format!("{other:?}")),
    }
}
