//! The checked, read-only note list of a chart.

pub mod file;

use crate::game::chart::file::{ChartFile, ChartMetadata, WindowRows};
use crate::game::judge::windows::{Windows, WindowsError};
use crate::game::note::{Note, NoteFlags, NoteId, NoteType, UnknownNoteType};
use crate::game::OffsetType;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_WINDOWS_NAME: &str = "default";

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("note #{index} at {time}ms: {source}")]
    UnsupportedNoteType {
        index: usize,
        time: OffsetType,
        #[source]
        source: UnknownNoteType,
    },
    #[error("note #{index} at {time}ms uses window set {name:?} which does not exist")]
    MissingWindows {
        index: usize,
        time: OffsetType,
        name: String,
    },
    #[error("window set {name:?} is invalid: {source}")]
    InvalidWindows {
        name: String,
        #[source]
        source: WindowsError,
    },
    #[error("note #{index} has an invalid time {time}")]
    InvalidTime { index: usize, time: OffsetType },
}

#[derive(Debug, Clone)]
pub struct Chart {
    pub metadata: ChartMetadata,
    default_windows: Arc<Windows>,
    /// Sorted by time, ids follow that order.
    notes: Vec<Note>,
}

fn build_windows(name: &str, rows: &WindowRows) -> Result<Arc<Windows>, ChartError> {
    Windows::new(rows.iter().copied())
        .map(Arc::new)
        .map_err(|source| ChartError::InvalidWindows {
            name: name.to_string(),
            source,
        })
}

impl Chart {
    pub fn from_file(file: &ChartFile) -> Result<Self, ChartError> {
        let default_windows = match &file.windows {
            Some(rows) => build_windows(DEFAULT_WINDOWS_NAME, rows)?,
            None => Arc::new(Windows::default()),
        };
        let mut window_sets = HashMap::with_capacity(file.window_sets.len());
        for (name, rows) in &file.window_sets {
            window_sets.insert(name.as_str(), build_windows(name, rows)?);
        }

        let mut notes = Vec::with_capacity(file.notes.len());
        for (index, x) in file.notes.iter().enumerate() {
            if !x.time.is_finite() {
                return Err(ChartError::InvalidTime {
                    index,
                    time: x.time,
                });
            }
            let note_type = x.note_type.parse::<NoteType>().map_err(|source| {
                ChartError::UnsupportedNoteType {
                    index,
                    time: x.time,
                    source,
                }
            })?;
            let windows = match &x.windows {
                None => default_windows.clone(),
                Some(name) => window_sets
                    .get(name.as_str())
                    .cloned()
                    .ok_or_else(|| ChartError::MissingWindows {
                        index,
                        time: x.time,
                        name: name.clone(),
                    })?,
            };
            let mut flags = NoteFlags::empty();
            flags.set(NoteFlags::BIG, x.big);
            notes.push((x.time, note_type, flags, windows));
        }
        notes.sort_by(|a, b| a.0.total_cmp(&b.0));

        let notes = notes
            .into_iter()
            .enumerate()
            .map(|(idx, (time, note_type, flags, windows))| {
                Note::new(NoteId(idx), time, note_type, flags, windows)
            })
            .collect();

        Ok(Self {
            metadata: file.metadata.clone(),
            default_windows,
            notes,
        })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = ChartFile::load_from(path)?;
        let chart = Self::from_file(&file)?;
        log::info!(
            "Loaded chart {} ({} notes) from {:?}",
            chart.metadata.get_show_name(),
            chart.notes.len(),
            path
        );
        Ok(chart)
    }

    pub fn get_notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get_default_windows(&self) -> &Arc<Windows> {
        &self.default_windows
    }

    /// The time after which every note has been judged by timeout at the latest.
    pub fn get_last_judge_time(&self) -> Option<OffsetType> {
        self.notes
            .iter()
            .map(|x| x.get_time() + x.get_windows().widest())
            .max_by(|a, b| a.total_cmp(b))
    }
}
