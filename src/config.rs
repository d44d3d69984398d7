use std::{
    fs::{create_dir_all, File},
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use home::home_dir;
use serde::{Deserialize, Serialize};

use osuguide::GuideError;

/// Local settings kept between runs.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Folder the file picker opens in
    #[serde(default)]
    beatmaps_folder: Option<PathBuf>,
    /// Offset applied when none is given on the command line
    #[serde(default)]
    default_offset_ms: f64,
    #[serde(skip)]
    location: PathBuf,
}

impl Config {
    // folder placed in $HOME directory
    const FOLDER: &'static str = ".osuguide";
    const FILE_NAME: &'static str = "config.json";

    pub fn beatmaps_folder(&self) -> Option<&Path> {
        self.beatmaps_folder.as_deref()
    }

    pub const fn default_offset_ms(&self) -> f64 {
        self.default_offset_ms
    }

    /// Remember the folder of the last picked beatmap
    pub fn set_beatmaps_folder(&mut self, folder: Option<PathBuf>) -> Result<(), GuideError> {
        if self.beatmaps_folder == folder {
            return Ok(());
        }
        self.beatmaps_folder = folder;
        self.save_config()
    }

    pub fn set_default_offset_ms(&mut self, offset_ms: f64) -> Result<(), GuideError> {
        if self.default_offset_ms == offset_ms {
            return Ok(());
        }
        self.default_offset_ms = offset_ms;
        self.save_config()
    }

    /// Read `$HOME/.osuguide/config.json`, creating it if needed
    pub fn read_config() -> Result<Self, GuideError> {
        let home = home_dir()
            .ok_or_else(|| GuideError::ConfigError("Could not find home directory".to_string()))?;
        Self::read_from(&home.join(Self::FOLDER))
    }

    /// Creates config if it does not exist
    pub fn read_from(folder: &Path) -> Result<Self, GuideError> {
        if !folder.exists() {
            create_dir_all(folder)?;
        }
        let location = folder.join(Self::FILE_NAME);
        if !location.exists() {
            let empty = Self {
                location: location.clone(),
                ..Self::default()
            };
            empty.save_config()?;
        }
        let reader = BufReader::new(File::open(&location)?);
        let mut config: Self = serde_json::from_reader(reader).map_err(|err| {
            GuideError::ConfigError(format!("Could not read local configuration {err}"))
        })?;
        config.location = location;
        Ok(config)
    }

    /// Assumes the config folder exists
    fn save_config(&self) -> Result<(), GuideError> {
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            GuideError::ConfigError(format!("Could not save local configuration {err}"))
        })?;
        let mut file = File::create(&self.location)?;
        file.write_all(json.as_bytes())?;
        log::debug!("Saved configuration to {:?}", self.location);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::path::PathBuf;

    #[test]
    fn test_config_created_on_first_read() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("nested");
        let config = Config::read_from(&folder).unwrap();
        assert!(folder.join("config.json").exists());
        assert_eq!(config.beatmaps_folder(), None);
        assert_eq!(config.default_offset_ms(), 0.0);
    }

    #[test]
    fn test_config_persists_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::read_from(dir.path()).unwrap();
        config
            .set_beatmaps_folder(Some(PathBuf::from("/songs")))
            .unwrap();
        config.set_default_offset_ms(-42.5).unwrap();

        let reloaded = Config::read_from(dir.path()).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.beatmaps_folder(), Some(PathBuf::from("/songs").as_path()));
        assert_eq!(reloaded.default_offset_ms(), -42.5);
    }

    #[test]
    fn test_config_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "not json").unwrap();
        assert!(Config::read_from(dir.path()).is_err());
    }
}
