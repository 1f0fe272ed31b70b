//! YAML configuration for the `overlap` command
//!
//! Relative paths in the file resolve against the file's directory. Selection
//! globs do too, unless features are given on the command line: then the
//! file's excludes apply as written, next to the command-line includes.

use std::fs;
use std::path::{Path, PathBuf};

use apiregions_core::errors::{ApiRegionsError, Result};
use apiregions_core::resolve::RegionPattern;
use serde::Deserialize;

/// The only supported configuration schema
pub const SCHEMA_VERSION: u32 = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Selection {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    pub schema_version: u32,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub include_regions: Option<Vec<RegionPattern>>,
    #[serde(default)]
    pub exclude_regions: Option<Vec<RegionPattern>>,
    #[serde(default)]
    pub inheritance: Option<bool>,
    #[serde(default)]
    pub repository: Option<PathBuf>,
    /// Directory of the loaded file; selection globs are relative to it
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl CliConfig {
    /// Include and exclude globs for a run
    ///
    /// Without command-line features the file's selection is used, rebased
    /// onto the config directory. With them, those features replace the
    /// file's includes and the file's excludes are kept relative to the
    /// working directory, so both sides match the same paths.
    pub fn feature_globs(&self, cli_features: &[String]) -> (Vec<String>, Vec<String>) {
        if cli_features.is_empty() {
            let rebased = |globs: &[String]| -> Vec<String> {
                globs.iter().map(|p| rebase(&self.base_dir, p)).collect()
            };
            (
                rebased(&self.selection.include),
                rebased(&self.selection.exclude),
            )
        } else {
            (cli_features.to_vec(), self.selection.exclude.clone())
        }
    }
}

/// Load and validate a configuration file
pub fn load_config(path: &Path) -> Result<CliConfig> {
    let content = fs::read_to_string(path).map_err(|e| ApiRegionsError::io(path, &e))?;
    let mut config = parse_config_str(&content)?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    config.repository = config.repository.map(|r| base.join(r));
    config.base_dir = base.to_path_buf();

    Ok(config)
}

/// Parse configuration text
pub fn parse_config_str(content: &str) -> Result<CliConfig> {
    let config: CliConfig =
        serde_yaml::from_str(content).map_err(|e| ApiRegionsError::InvalidConfig {
            reason: format!("YAML parse error: {}", e),
        })?;

    if config.schema_version != SCHEMA_VERSION {
        return Err(ApiRegionsError::InvalidConfig {
            reason: format!(
                "Unsupported schema_version: {}. Expected {}",
                config.schema_version, SCHEMA_VERSION
            ),
        });
    }

    Ok(config)
}

fn rebase(base: &Path, pattern: &str) -> String {
    if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        base.join(pattern).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config = parse_config_str(
            r#"
schema_version: 0
regions: [global, internal]
selection:
  include: ["features/*.json"]
  exclude: ["features/test-*.json"]
include_regions: ["*"]
exclude_regions: [deprecated]
inheritance: false
repository: target/bundles
"#,
        )
        .unwrap();

        assert_eq!(config.regions, vec!["global", "internal"]);
        assert_eq!(config.selection.include, vec!["features/*.json"]);
        assert_eq!(config.include_regions, Some(vec![RegionPattern::Any]));
        assert_eq!(
            config.exclude_regions,
            Some(vec![RegionPattern::Exact("deprecated".to_string())])
        );
        assert_eq!(config.inheritance, Some(false));
        assert_eq!(config.repository, Some(PathBuf::from("target/bundles")));
    }

    #[test]
    fn test_wrong_schema_version() {
        let err = parse_config_str("schema_version: 1\n").unwrap_err();
        assert!(err.to_string().contains("Unsupported schema_version"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_config_str("schema_version: 0\nregionz: [global]\n").unwrap_err();
        assert!(matches!(err, ApiRegionsError::InvalidConfig { .. }));
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apiregions.yaml");
        fs::write(
            &path,
            "schema_version: 0\nselection:\n  include: [\"f/*.json\"]\n  exclude: [\"f/skip.json\"]\nrepository: repo\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let (include, exclude) = config.feature_globs(&[]);
        assert_eq!(
            include,
            vec![dir.path().join("f/*.json").display().to_string()]
        );
        assert_eq!(
            exclude,
            vec![dir.path().join("f/skip.json").display().to_string()]
        );
        assert_eq!(config.repository, Some(dir.path().join("repo")));
    }

    #[test]
    fn test_cli_features_keep_excludes_unrebased() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("apiregions.yaml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "schema_version: 0\nselection:\n  include: [\"f/*.json\"]\n  exclude: [\"f2.json\"]\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let (include, exclude) = config.feature_globs(&["*.json".to_string()]);
        assert_eq!(include, vec!["*.json"]);
        assert_eq!(exclude, vec!["f2.json"]);
    }
}
