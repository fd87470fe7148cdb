// Copyright (C) 2023 gigablaster

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use directories::ProjectDirs;
use log::Level;
use serde::{Deserialize, Serialize};

pub const ROOT_DATA_PATH: &str = "data";
pub const CONFIG_FILE_NAME: &str = "probe.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub data_roots: Vec<PathBuf>,
    pub archive_name: String,
    pub log_level: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            data_roots: vec![PathBuf::from(ROOT_DATA_PATH)],
            archive_name: "data.bsa".into(),
            log_level: "info".into(),
        }
    }
}

impl ProbeConfig {
    /// Explicit file first, then the user config directory, then defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::open(path);
        }
        if let Some(project_dirs) = ProjectDirs::from("com", "zlogaemz", "engine") {
            let path = project_dirs.config_dir().join(CONFIG_FILE_NAME);
            if path.is_file() {
                return Self::open(&path);
            }
        }

        Ok(Self::default())
    }

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("Can't open config {:?}", path))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Can't parse config {:?}", path))
    }

    pub fn from_reader(r: impl Read) -> anyhow::Result<Self> {
        Ok(serde_json::from_reader(r)?)
    }

    pub fn level(&self) -> anyhow::Result<Level> {
        Level::from_str(&self.log_level)
            .ok()
            .with_context(|| format!("Unknown log level {}", self.log_level))
    }
}

#[cfg(test)]
mod test {
    use std::{fs, path::PathBuf};

    use log::Level;

    use super::{ProbeConfig, ROOT_DATA_PATH};

    #[test]
    fn defaults() {
        let config = ProbeConfig::default();
        assert_eq!(vec![PathBuf::from(ROOT_DATA_PATH)], config.data_roots);
        assert_eq!(Level::Info, config.level().unwrap());
    }

    #[test]
    fn partial_config() {
        let config = ProbeConfig::from_reader(r#"{ "log_level": "trace" }"#.as_bytes()).unwrap();
        assert_eq!(Level::Trace, config.level().unwrap());
        assert_eq!("data.bsa", config.archive_name);
        assert_eq!(ProbeConfig::default().data_roots, config.data_roots);
    }

    #[test]
    fn bad_level() {
        let config = ProbeConfig {
            log_level: "loud".into(),
            ..Default::default()
        };
        assert!(config.level().is_err());
    }

    #[test]
    fn explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.json");
        fs::write(
            &path,
            r#"{ "data_roots": ["Data Files"], "archive_name": "Morrowind.bsa" }"#,
        )
        .unwrap();

        let config = ProbeConfig::load(Some(&path)).unwrap();
        assert_eq!(vec![PathBuf::from("Data Files")], config.data_roots);
        assert_eq!("Morrowind.bsa", config.archive_name);
        assert_eq!("info", config.log_level);

        assert!(ProbeConfig::load(Some(&dir.path().join("missing.json"))).is_err());
        fs::write(&path, "not json").unwrap();
        assert!(ProbeConfig::load(Some(&path)).is_err());
    }
}
