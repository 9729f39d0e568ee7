//! All the charts use ms as time mark
//!
//! `Chart` holds the validated notes loaded from a chart file.
//!
//! `Playfield` drives the notes of a chart while the song is playing.

pub type MsType = f64;
pub type OffsetType = MsType;

pub mod chart;
pub mod input;
pub mod judge;
pub mod note;
pub mod playfield;
pub mod scroll;
pub mod summary;
