use crate::game::input::Lane;
use crate::game::judge::windows::{HitResult, Windows};
use crate::game::OffsetType;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Serialize, Deserialize, Ord, PartialOrd, PartialEq, Clone, Copy, Debug, Eq, Hash)]
pub enum NoteType {
    /// Centre hit
    Don,
    /// Rim hit
    Kat,
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct NoteFlags: u8 {
        const BIG = 1;
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported note type {0:?}")]
pub struct UnknownNoteType(pub String);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NoteId(pub usize);

/// A note as scheduled by the chart. Never changes after the chart is loaded.
#[derive(Clone, Debug)]
pub struct Note {
    id: NoteId,
    time: OffsetType,
    note_type: NoteType,
    flags: NoteFlags,
    windows: Arc<Windows>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NoteState {
    Idle,
    Judged { result: HitResult, time: OffsetType },
}

impl NoteType {
    pub fn lane(self) -> Lane {
        match self {
            NoteType::Don => Lane::Centre,
            NoteType::Kat => Lane::Rim,
        }
    }

    #[inline]
    pub fn accepts(self, lane: Lane) -> bool {
        self.lane() == lane
    }
}

impl FromStr for NoteType {
    type Err = UnknownNoteType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "don" | "centre" | "center" => Ok(NoteType::Don),
            "kat" | "ka" | "rim" => Ok(NoteType::Kat),
            _ => Err(UnknownNoteType(s.to_string())),
        }
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Note {
    pub fn new(
        id: NoteId,
        time: OffsetType,
        note_type: NoteType,
        flags: NoteFlags,
        windows: Arc<Windows>,
    ) -> Self {
        Self {
            id,
            time,
            note_type,
            flags,
            windows,
        }
    }

    pub fn get_id(&self) -> NoteId {
        self.id
    }

    pub fn get_time(&self) -> OffsetType {
        self.time
    }

    pub fn get_note_type(&self) -> NoteType {
        self.note_type
    }

    pub fn get_windows(&self) -> &Windows {
        &self.windows
    }

    pub fn is_big(&self) -> bool {
        self.flags.contains(NoteFlags::BIG)
    }
}

impl Default for NoteState {
    fn default() -> Self {
        Self::Idle
    }
}

impl NoteState {
    pub fn result(&self) -> Option<HitResult> {
        match self {
            NoteState::Idle => None,
            NoteState::Judged { result, .. } => Some(*result),
        }
    }
}
