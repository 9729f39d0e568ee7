use crate::game::judge::windows::HitResult;
use crate::game::OffsetType;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub type WindowRows = Vec<(HitResult, OffsetType)>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartMetadata {
    pub title: String,
    pub artist: String,
    pub creator: String,
    pub version: String,
    pub source: String,
    // Comma split tags
    pub tags: String,
}

impl ChartMetadata {
    pub fn new(title: String) -> Self {
        Self {
            title,
            ..Default::default()
        }
    }

    pub fn get_show_name(&self) -> String {
        format!("{}[{}]", self.title, self.version)
    }
}

/// A note as written in the file, checked when the chart is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartNote {
    pub time: OffsetType,
    pub note_type: String,
    #[serde(default)]
    pub big: bool,
    /// Name of a window set, the chart windows if absent.
    #[serde(default)]
    pub windows: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartFile {
    pub version: u8,
    #[serde(default)]
    pub metadata: ChartMetadata,
    /// Chart-wide windows, the built-in table if absent.
    #[serde(default)]
    pub windows: Option<WindowRows>,
    #[serde(default)]
    pub window_sets: BTreeMap<String, WindowRows>,
    #[serde(default)]
    pub notes: Vec<ChartNote>,
}

impl ChartNote {
    pub fn new(time: OffsetType, note_type: &str) -> Self {
        Self {
            time,
            note_type: note_type.to_string(),
            big: false,
            windows: None,
        }
    }
}

impl ChartFile {
    pub fn new(title: String) -> Self {
        Self {
            version: 0,
            metadata: ChartMetadata::new(title),
            windows: None,
            window_sets: Default::default(),
            notes: vec![],
        }
    }

    pub fn from_ron(data: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(data)?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_ron(&data)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let file = std::fs::File::options()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        let mut s = ron::Serializer::new(file, Some(PrettyConfig::default()))?;
        self.serialize(&mut s)?;

        Ok(())
    }
}
