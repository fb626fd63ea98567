use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Run-wide settings. Every field has a default so an empty `{}` file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reference system the traverse coordinates are expressed in.
    pub working_epsg: u32,
    /// Reference system parcels, beacons and roads are stored in.
    pub storage_epsg: u32,
    /// Working systems that must be reprojected into `storage_epsg`.
    pub legacy_epsg: Vec<u32>,
    /// Stamped on every parcel.
    pub data_source: String,
    /// Stamped on every parcel.
    pub status: String,
    /// Identifier assigned when a centroid matches no boundary feature.
    pub sentinel_id: i64,
    /// Emit a row-count progress milestone every this many rows.
    pub progress_every: usize,
    /// Where submission notices are posted, if anywhere.
    pub notify_endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_epsg: 26331,
            storage_epsg: 26331,
            legacy_epsg: vec![26391, 32631],
            data_source: String::new(),
            status: String::new(),
            sentinel_id: 999,
            progress_every: 25,
            notify_endpoint: None,
        }
    }
}

impl Config {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Use `epsg` as the working reference system.
    pub fn with_working_epsg(mut self, epsg: u32) -> Self {
        self.working_epsg = epsg;
        self
    }

    /// True when resolved points have to be transformed before storage.
    pub fn needs_reprojection(&self) -> bool {
        self.working_epsg != self.storage_epsg && self.legacy_epsg.contains(&self.working_epsg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"data_source": "survey", "sentinel_id": 0}"#).unwrap();
        assert_eq!(config.data_source, "survey");
        assert_eq!(config.sentinel_id, 0);
        assert_eq!(config.storage_epsg, 26331);
        assert_eq!(config.progress_every, 25);
    }

    #[test]
    fn reprojection_only_for_legacy_systems() {
        let config = Config::default();
        assert!(!config.needs_reprojection());
        assert!(config.clone().with_working_epsg(26391).needs_reprojection());
        assert!(config.clone().with_working_epsg(32631).needs_reprojection());
        assert!(!config.with_working_epsg(4326).needs_reprojection());
    }

    #[test]
    fn load_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"working_epsg": 26391, "status": "pending"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.working_epsg, 26391);
        assert_eq!(config.status, "pending");
    }
}
