use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// One si/do with the gu/gun list to crawl within it.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionConfig {
    pub sido: String,
    pub guguns: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegionsFile {
    pub regions: Vec<RegionConfig>,
}

/// Load and validate the region list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_regions(path: &Path) -> Result<RegionsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let regions_file: RegionsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::RegionsFileParse)?;

    validate_regions(&regions_file)?;

    Ok(regions_file)
}

fn validate_regions(regions_file: &RegionsFile) -> Result<(), ConfigError> {
    if regions_file.regions.is_empty() {
        return Err(ConfigError::Validation(
            "regions file lists no regions".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for region in &regions_file.regions {
        if region.sido.trim().is_empty() {
            return Err(ConfigError::Validation(
                "region sido must be non-empty".to_string(),
            ));
        }
        if region.guguns.is_empty() {
            return Err(ConfigError::Validation(format!(
                "region '{}' lists no gu/gun entries",
                region.sido
            )));
        }
        if region.guguns.iter().any(|g| g.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "region '{}' contains an empty gu/gun entry",
                region.sido
            )));
        }
        if !seen.insert(region.sido.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region: '{}'",
                region.sido
            )));
        }
    }

    Ok(())
}
