//! Application runner: resolves paths and options, then parses, generates and writes.
//!
//! The binary is a thin clap wrapper around [run]; integration tests call it directly.

use crate::dg::config::{DgConfig, Loader};
use crate::dg::error::DgError;
use crate::dg::formats::{format_name_for_path, FormatError, FormatRegistry};
use crate::dg::parsing::DgParser;
use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything the command line can ask for
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub input: PathBuf,
    /// Defaults to [default_output_path] of `input`
    pub output: Option<PathBuf>,
    /// Forces a format instead of deriving it from the output extension
    pub format: Option<String>,
    pub skip_long: bool,
    pub strict: bool,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub format: String,
    pub written: usize,
    pub skipped: usize,
}

/// `<input dir>/<input file name>.csv`; the input's own extension is kept
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut file_name: OsString = input
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    file_name.push(".csv");
    input.with_file_name(file_name)
}

/// Name of the optional configuration file picked up next to the input
pub const LOCAL_CONFIG_FILE: &str = "dg.yaml";

/// Load the configuration for `settings` and apply its CLI flags on top
///
/// Layers, lowest first: built-in defaults, `dg.yaml` next to the input (if present),
/// the `--config` file, then `--skip-long` / `--strict`.
pub fn resolve_config(settings: &RunSettings) -> Result<DgConfig, DgError> {
    let input_dir = settings.input.parent().unwrap_or_else(|| Path::new(""));
    let mut loader = Loader::new().with_optional_file(input_dir.join(LOCAL_CONFIG_FILE));
    if let Some(path) = &settings.config {
        loader = loader.with_file(path);
    }
    if settings.skip_long {
        loader = loader.set_override("generation.skip_long", true)?;
    }
    if settings.strict {
        loader = loader.set_override("parser.strict_markers", true)?;
    }
    Ok(loader.build()?)
}

/// Run one generation: parse `settings.input` and write every advertisement
pub fn run(settings: &RunSettings) -> Result<RunSummary, DgError> {
    let config = resolve_config(settings)?;
    let registry = FormatRegistry::with_defaults();

    let output = settings
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&settings.input));
    let format = match &settings.format {
        Some(format) => format.clone(),
        None => format_name_for_path(&output, &config.output.default_format).to_string(),
    };
    // Fail before touching the output file
    let formatter = registry
        .get(&format)
        .ok_or_else(|| FormatError::FormatNotFound(format.clone()))?;

    let document = DgParser::with_options(config.parse_options()).parse(&settings.input)?;
    if document.combination_count() == 0 {
        debug!("one of the sections is empty, no advertisements will be generated");
    }

    let file = File::create(&output).map_err(|source| DgError::OutputWriteFailure {
        path: output.clone(),
        source,
    })?;
    let mut sink = BufWriter::new(file);

    let mut combinations = document.combinations(config.generate_options());
    let written = formatter
        .write_records(&mut combinations, &mut sink)
        .map_err(|err| match err {
            FormatError::Io(source) => DgError::OutputWriteFailure {
                path: output.clone(),
                source,
            },
            other => DgError::Format(other),
        })?;

    let summary = RunSummary {
        output,
        format,
        written,
        skipped: combinations.skipped(),
    };
    info!(
        output = %summary.output.display(),
        format = %summary.format,
        written = summary.written,
        skipped = summary.skipped,
        "advertisements written"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_keeps_extension() {
        assert_eq!(
            default_output_path(Path::new("ads/shoes.dg")),
            PathBuf::from("ads/shoes.dg.csv")
        );
        assert_eq!(
            default_output_path(Path::new("shoes")),
            PathBuf::from("shoes.csv")
        );
    }

    #[test]
    fn test_resolve_config_applies_flags() {
        let settings = RunSettings {
            skip_long: true,
            strict: true,
            ..Default::default()
        };
        let config = resolve_config(&settings).unwrap();
        assert!(config.generation.skip_long);
        assert!(config.parser.strict_markers);
    }

    #[test]
    fn test_resolve_config_picks_up_local_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(LOCAL_CONFIG_FILE), "limits:\n  title: 56\n").unwrap();
        let settings = RunSettings {
            input: dir.path().join("ads.dg"),
            ..Default::default()
        };
        let config = resolve_config(&settings).unwrap();
        assert_eq!(config.limits.title, 56);
    }

    #[test]
    fn test_explicit_config_wins_over_local_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(LOCAL_CONFIG_FILE), "limits:\n  title: 56\n").unwrap();
        let explicit = dir.path().join("explicit.yaml");
        std::fs::write(&explicit, "limits:\n  title: 40\n").unwrap();
        let settings = RunSettings {
            input: dir.path().join("ads.dg"),
            config: Some(explicit),
            ..Default::default()
        };
        assert_eq!(resolve_config(&settings).unwrap().limits.title, 40);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let settings = RunSettings {
            config: Some(PathBuf::from("/nonexistent/dg-config.yaml")),
            ..Default::default()
        };
        assert!(matches!(resolve_config(&settings), Err(DgError::Config(_))));
    }

    #[test]
    fn test_resolve_config_without_flags_uses_defaults() {
        let config = resolve_config(&RunSettings::default()).unwrap();
        assert_eq!(config, DgConfig::default());
    }
}
