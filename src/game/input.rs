//! Gameplay actions and the dispatch of presses to notes.

use crate::game::judge::{JudgementSink, NoteJudge};
use crate::game::playfield::PlayingNote;
use crate::game::OffsetType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum GameplayAction {
    LeftRim,
    LeftCentre,
    RightCentre,
    RightRim,
}

/// The input channel a note listens to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Lane {
    Centre,
    Rim,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ActionEvent {
    pub action: GameplayAction,
    pub pressed: bool,
}

impl GameplayAction {
    pub const ALL: [GameplayAction; 4] = [
        GameplayAction::LeftRim,
        GameplayAction::LeftCentre,
        GameplayAction::RightCentre,
        GameplayAction::RightRim,
    ];

    pub fn lane(self) -> Lane {
        match self {
            GameplayAction::LeftCentre | GameplayAction::RightCentre => Lane::Centre,
            GameplayAction::LeftRim | GameplayAction::RightRim => Lane::Rim,
        }
    }

    /// Name used by the config file.
    pub fn config_name(self) -> &'static str {
        match self {
            GameplayAction::LeftRim => "left_rim",
            GameplayAction::LeftCentre => "left_centre",
            GameplayAction::RightCentre => "right_centre",
            GameplayAction::RightRim => "right_rim",
        }
    }
}

impl FromStr for GameplayAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameplayAction::ALL
            .into_iter()
            .find(|x| x.config_name() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown gameplay action {:?}", s))
    }
}

impl ActionEvent {
    pub fn press(action: GameplayAction) -> Self {
        Self {
            action,
            pressed: true,
        }
    }

    pub fn release(action: GameplayAction) -> Self {
        Self {
            action,
            pressed: false,
        }
    }
}

/// Finds the note a press belongs to.
///
/// Big notes are scored on the first matching action, pressing both sides gives nothing extra.
#[derive(Default, Debug)]
pub struct InputDispatcher {
    ignored_presses: usize,
}

impl InputDispatcher {
    /// Return true if the input was consumed by a note.
    pub fn dispatch(
        &mut self,
        event: ActionEvent,
        current_time: OffsetType,
        candidates: &mut [PlayingNote],
        sink: &mut impl JudgementSink,
    ) -> bool {
        if !event.pressed {
            return false;
        }
        let lane = event.action.lane();
        let target = candidates
            .iter_mut()
            .filter(|x| !x.is_judged() && x.get_note_type().accepts(lane))
            .filter(|x| {
                x.get_windows()
                    .resolve(current_time - x.get_time())
                    .is_some()
            })
            .min_by(|a, b| a.get_time().total_cmp(&b.get_time()));

        let event = target.and_then(|note| NoteJudge::new(note).judge_input(current_time));
        match event {
            Some(event) => {
                sink.accept(event);
                true
            }
            None => {
                self.ignored_presses += 1;
                log::trace!("{:?} at {} hit nothing", lane, current_time);
                false
            }
        }
    }

    /// Presses that did not hit any note.
    pub fn get_ignored_presses(&self) -> usize {
        self.ignored_presses
    }
}
