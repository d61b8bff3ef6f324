use crate::cli::ExtractArgs;
use crate::error::{CliError, Result};
use magtrace::engine::config::{ScanConfig, ScanConfigBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialScanConfig {
    preset: Option<String>,
    marker: Option<String>,
    #[serde(rename = "header-skip")]
    header_skip: Option<usize>,
    #[serde(rename = "entity-count")]
    entity_count: Option<usize>,
    #[serde(rename = "min-fields")]
    min_fields: Option<usize>,
    #[serde(rename = "value-field-index")]
    value_field_index: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    directory: Option<PathBuf>,
    summary: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialExtractConfig {
    scan: Option<PartialScanConfig>,
    output: Option<PartialOutputConfig>,
}

/// Fully merged settings for one `extract` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    pub scan: ScanConfig,
    pub output_dir: PathBuf,
    pub summary: bool,
}

impl PartialExtractConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Merges file values with command-line arguments. Precedence, highest first: CLI flags,
    /// `-S` overrides, config file, block preset, built-in defaults.
    pub fn merge_with_cli(mut self, args: &ExtractArgs) -> Result<ExtractConfig> {
        self.apply_set_values(&args.set_values)?;

        let scan = self.scan.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let entity_count = args.entity_count.or(scan.entity_count).ok_or_else(|| {
            CliError::Config(
                "A value for 'entity-count' is required either in the config file or via -n."
                    .to_string(),
            )
        })?;

        let mut builder = ScanConfigBuilder::new().entity_count(entity_count);
        if let Some(preset) = args.preset.as_ref().or(scan.preset.as_ref()) {
            builder = builder.preset(preset.as_str());
        }
        if let Some(marker) = args.marker.as_ref().or(scan.marker.as_ref()) {
            builder = builder.marker(marker.as_str());
        }
        if let Some(lines) = args.header_skip.or(scan.header_skip) {
            builder = builder.header_skip(lines);
        }
        if let Some(n) = args.min_fields.or(scan.min_fields) {
            builder = builder.min_fields(n);
        }
        if let Some(index) = args.value_field_index.or(scan.value_field_index) {
            builder = builder.value_field_index(index);
        }
        let scan = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let output_dir = args
            .output
            .clone()
            .or(output.directory)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(ExtractConfig {
            scan,
            output_dir,
            summary: args.summary || output.summary.unwrap_or(false),
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            let parse_usize = |value: &str| -> Result<usize> {
                value.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value))
                })
            };

            match key {
                "scan.preset" => {
                    self.scan.get_or_insert_with(Default::default).preset =
                        Some(value_str.to_string());
                }
                "scan.marker" => {
                    self.scan.get_or_insert_with(Default::default).marker =
                        Some(value_str.to_string());
                }
                "scan.header-skip" => {
                    self.scan.get_or_insert_with(Default::default).header_skip =
                        Some(parse_usize(value_str)?);
                }
                "scan.entity-count" => {
                    self.scan.get_or_insert_with(Default::default).entity_count =
                        Some(parse_usize(value_str)?);
                }
                "scan.min-fields" => {
                    self.scan.get_or_insert_with(Default::default).min_fields =
                        Some(parse_usize(value_str)?);
                }
                "scan.value-field-index" => {
                    self.scan
                        .get_or_insert_with(Default::default)
                        .value_field_index = Some(parse_usize(value_str)?);
                }
                "output.directory" => {
                    self.output.get_or_insert_with(Default::default).directory =
                        Some(PathBuf::from(value_str));
                }
                "output.summary" => {
                    self.output.get_or_insert_with(Default::default).summary =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid boolean value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unknown configuration key: {}",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn extract_args(extra: &[&str]) -> ExtractArgs {
        let mut argv = vec!["magtrace", "extract", "-i", "OUTCAR"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Extract(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_only_configuration_uses_defaults() {
        let args = extract_args(&["-n", "144"]);
        let config = PartialExtractConfig::default()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.scan.entity_count, 144);
        assert_eq!(config.scan.marker, "magnetization (x)");
        assert_eq!(config.scan.header_skip, 3);
        assert_eq!(config.scan.min_fields, 5);
        assert_eq!(config.scan.value_field_index, 4);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(!config.summary);
    }

    #[test]
    fn missing_entity_count_is_a_config_error() {
        let args = extract_args(&[]);
        let result = PartialExtractConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn file_values_are_loaded_and_cli_overrides_them() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("magtrace.toml");
        fs::write(
            &path,
            r#"
            [scan]
            preset = "total-charge"
            entity-count = 64
            header-skip = 4

            [output]
            directory = "series"
            summary = true
            "#,
        )
        .unwrap();

        let partial = PartialExtractConfig::from_file(&path).unwrap();
        let args = extract_args(&["-n", "32", "--header-skip", "3"]);
        let config = partial.merge_with_cli(&args).unwrap();

        assert_eq!(config.scan.marker, "total charge");
        assert_eq!(config.scan.entity_count, 32);
        assert_eq!(config.scan.header_skip, 3);
        assert_eq!(config.output_dir, PathBuf::from("series"));
        assert!(config.summary);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[scan]\nions = 12\n").unwrap();

        let result = PartialExtractConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn set_values_override_file_but_not_flags() {
        let args = extract_args(&[
            "-S",
            "scan.entity-count=10",
            "-S",
            "scan.marker=magnetization (z)",
            "-S",
            "output.summary=true",
            "--marker",
            "magnetization (y)",
        ]);
        let config = PartialExtractConfig::default()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.scan.entity_count, 10);
        assert_eq!(config.scan.marker, "magnetization (y)");
        assert!(config.summary);
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["scan.entity-count", "scan.entity-count=ten", "scan.ions=3"] {
            let args = extract_args(&["-n", "4", "-S", bad]);
            let result = PartialExtractConfig::default().merge_with_cli(&args);
            assert!(matches!(result, Err(CliError::Config(_))), "{bad}");
        }
    }

    #[test]
    fn invalid_layout_is_reported_as_config_error() {
        let args = extract_args(&["-n", "4", "--preset", "forces"]);
        let result = PartialExtractConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("forces")));
    }
}
