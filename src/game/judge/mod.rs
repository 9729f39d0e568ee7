//! Judging a single note: either by the player's input or by running out of time.

pub mod windows;
mod test;

use crate::game::judge::windows::HitResult;
use crate::game::note::{NoteId, NoteState};
use crate::game::playfield::PlayingNote;
use crate::game::OffsetType;

/// Emitted exactly once for every note.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JudgementEvent {
    pub note_id: NoteId,
    pub result: HitResult,
    pub user_triggered: bool,
    /// The song time the judgement happened at.
    pub time: OffsetType,
    /// `time` minus the note time, negative for early.
    pub offset: OffsetType,
}

pub trait JudgementSink {
    fn accept(&mut self, event: JudgementEvent);
}

impl JudgementSink for Vec<JudgementEvent> {
    fn accept(&mut self, event: JudgementEvent) {
        self.push(event);
    }
}

impl<S: JudgementSink + ?Sized> JudgementSink for &mut S {
    fn accept(&mut self, event: JudgementEvent) {
        (**self).accept(event);
    }
}

/// Borrows one note while judging it.
pub struct NoteJudge<'a> {
    note: &'a mut PlayingNote,
}

impl<'a> NoteJudge<'a> {
    pub fn new(note: &'a mut PlayingNote) -> Self {
        Self { note }
    }

    /// The player hit the note at `current_time`.
    ///
    /// Returns `None` when the note was already judged or the hit is outside every window, in
    /// which case the note stays idle and the input may go to another note.
    pub fn judge_input(&mut self, current_time: OffsetType) -> Option<JudgementEvent> {
        let delta = current_time - self.note.get_time();
        let result = self.note.get_windows().resolve(delta)?;
        self.apply_result(result, true, current_time)
    }

    /// Checked once per frame, misses the note once its timeout window has passed.
    pub fn judge_timeout(&mut self, current_time: OffsetType) -> Option<JudgementEvent> {
        let windows = self.note.get_windows();
        let delta = current_time - self.note.get_time();
        if current_time > self.note.get_time() - windows.widest()
            && !windows.is_within_timeout_window(delta)
        {
            self.apply_result(HitResult::Miss, false, current_time)
        } else {
            None
        }
    }

    fn apply_result(
        &mut self,
        result: HitResult,
        user_triggered: bool,
        time: OffsetType,
    ) -> Option<JudgementEvent> {
        if let NoteState::Judged { result: old, .. } = self.note.state {
            log::warn!(
                "Note {} judged again with {:?}, keeping {:?}",
                self.note.get_id(),
                result,
                old
            );
            return None;
        }
        self.note.state = NoteState::Judged { result, time };
        let event = JudgementEvent {
            note_id: self.note.get_id(),
            result,
            user_triggered,
            time,
            offset: time - self.note.get_time(),
        };
        log::debug!(
            "Judged note {} as {:?} at {} ({:+})",
            event.note_id,
            result,
            time,
            event.offset
        );
        Some(event)
    }
}
