//! Feature file selection by path or glob

use std::collections::BTreeSet;
use std::path::PathBuf;

use apiregions_core::errors::{ApiRegionsError, Result};

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expand include patterns and drop paths matching an exclude pattern
///
/// Plain paths are taken as given; globs must match at least one file.
/// The result is sorted and free of duplicates.
pub fn select_feature_files(include: &[String], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let excludes = exclude
        .iter()
        .map(|p| {
            glob::Pattern::new(p).map_err(|e| ApiRegionsError::InvalidConfig {
                reason: format!("invalid exclude pattern '{}': {}", p, e),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut selected = BTreeSet::new();
    for pattern in include {
        if !is_glob(pattern) {
            selected.insert(PathBuf::from(pattern));
            continue;
        }

        let paths = glob::glob(pattern).map_err(|e| ApiRegionsError::InvalidConfig {
            reason: format!("invalid include pattern '{}': {}", pattern, e),
        })?;
        for entry in paths {
            let path = entry.map_err(|e| ApiRegionsError::io(e.path(), e.error()))?;
            if path.is_file() {
                selected.insert(path);
            }
        }
    }

    let files: Vec<PathBuf> = selected
        .into_iter()
        .filter(|path| !excludes.iter().any(|p| p.matches_path(path)))
        .collect();

    if files.is_empty() {
        return Err(ApiRegionsError::NoFeaturesSelected {
            selection: include.join(", "),
        });
    }

    tracing::debug!(feature_count = files.len(), "selected feature files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_glob_with_exclude() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.json", "b.json", "test-c.json", "notes.txt"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        let root = dir.path().display().to_string();

        let files = select_feature_files(
            &[format!("{root}/*.json")],
            &[format!("{root}/test-*.json")],
        )
        .unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_nothing_selected() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        let err = select_feature_files(&[pattern], &[]).unwrap_err();
        assert!(matches!(err, ApiRegionsError::NoFeaturesSelected { .. }));
    }

    #[test]
    fn test_plain_paths_are_deduplicated() {
        let files = select_feature_files(
            &["x.json".to_string(), "x.json".to_string()],
            &[],
        )
        .unwrap();
        assert_eq!(files, vec![PathBuf::from("x.json")]);
    }
}
