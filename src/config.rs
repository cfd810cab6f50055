// src/config.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Declarative mapping of sensor source files to series labels.
///
/// Replaces the historical inline file list and the single hardcoded
/// filename-to-label conditional: every source the aggregator reads is named
/// here, and any file may be relabeled through `label_overrides`. The default
/// configuration reproduces the Central New York egg deployment used for the
/// June 2023 figures.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SensorSourceConfig {
    /// Directory the source files live in.
    pub data_dir: PathBuf,
    /// Source file names, in plotting order.
    pub files: Vec<String>,
    /// File name -> series label. Files not listed here are labeled with
    /// their stem (file name minus the `.csv` extension).
    #[serde(default)]
    pub label_overrides: HashMap<String, String>,
}

/// File name of the reference egg relabeled as the background site.
const BACKGROUND_FILE: &str = "egg0080442c4cab0123.csv";
const BACKGROUND_LABEL: &str = "Background";

const DEFAULT_DATA_DIR: &str = "2023-CNY-Eggs";

const DEFAULT_EGG_FILES: [&str; 20] = [
    "egg0004a30b00020a5a.csv",
    "egg0004a30b00020afd.csv",
    "egg0004a30b00026ea0.csv",
    "egg0004a30b0131c8a4.csv",
    "egg0004a30b0131e01b.csv",
    "egg0004a30b0131e02d.csv",
    "egg0004a30b0131e9b2.csv",
    "egg0004a30b0131fbb1.csv",
    "egg0004a30b000206b8.csv",
    "egg0004a30b000217c9.csv",
    "egg0004a30b000956f3.csv",
    "egg0004a30b01321af5.csv",
    "egg0004a30b013225e3.csv",
    "egg00802e8e050b0111.csv",
    "egg008043e602880141.csv",
    "egg008044e767090121.csv",
    "egg0080442c4cab0123.csv",
    "egg00804425ce180132.csv",
    "egg00804505d51b0120.csv",
    "egg0080435513280133.csv",
];

impl Default for SensorSourceConfig {
    fn default() -> Self {
        let mut label_overrides = HashMap::new();
        label_overrides.insert(BACKGROUND_FILE.to_string(), BACKGROUND_LABEL.to_string());
        SensorSourceConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            files: DEFAULT_EGG_FILES.iter().map(|s| s.to_string()).collect(),
            label_overrides,
        }
    }
}

impl SensorSourceConfig {
    /// Load a source mapping from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| ConfigError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Series label for a source file: the override if one is configured,
    /// otherwise the file stem.
    pub fn label_for(&self, file_name: &str) -> String {
        if let Some(label) = self.label_overrides.get(file_name) {
            return label.clone();
        }
        Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string())
    }

    /// Full path and label for every configured source, in order.
    pub fn sources(&self) -> impl Iterator<Item = (PathBuf, String)> + '_ {
        self.files
            .iter()
            .map(|name| (self.data_dir.join(name), self.label_for(name)))
    }
}


// src/config.rs
