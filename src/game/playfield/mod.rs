//! The per-frame driver of a playing chart.

mod options;

pub use options::{OptionsError, PlayOptions};

use crate::game::chart::Chart;
use crate::game::input::{ActionEvent, InputDispatcher};
use crate::game::judge::{JudgementSink, NoteJudge};
use crate::game::note::{Note, NoteId, NoteState};
use crate::game::scroll::ScrollAlgorithm;
use crate::game::OffsetType;
use std::collections::VecDeque;
use std::ops::Deref;

/// The song time source. Moves forward while playing, may jump back on seek.
pub trait Clock {
    fn current_time(&self) -> OffsetType;
}

/// A clock that only moves when told to.
#[derive(Copy, Clone, Debug, Default)]
pub struct ManualClock {
    time: OffsetType,
}

impl ManualClock {
    pub fn new(time: OffsetType) -> Self {
        Self { time }
    }

    pub fn advance(&mut self, delta: OffsetType) {
        self.time += delta;
    }
}

impl Clock for ManualClock {
    fn current_time(&self) -> OffsetType {
        self.time
    }
}

/// Receives where each live note should be drawn.
pub trait PositionSink {
    fn note_position(&mut self, note_id: NoteId, offset: f64);
}

impl PositionSink for () {
    fn note_position(&mut self, _note_id: NoteId, _offset: f64) {}
}

impl PositionSink for Vec<(NoteId, f64)> {
    fn note_position(&mut self, note_id: NoteId, offset: f64) {
        self.push((note_id, offset));
    }
}

pub struct PlayingNote {
    note: Note,
    pub(in crate::game) state: NoteState,
    /// Scroll position computed in the last tick.
    pub offset: f64,
}

impl PlayingNote {
    pub fn new(note: Note) -> Self {
        Self {
            note,
            state: NoteState::Idle,
            offset: f64::INFINITY,
        }
    }

    #[inline]
    pub fn get_state(&self) -> NoteState {
        self.state
    }

    #[inline]
    pub fn is_judged(&self) -> bool {
        !matches!(self.state, NoteState::Idle)
    }

    /// Judged and shown long enough.
    fn is_retired(&self, ops: &PlayOptions, time: OffsetType) -> bool {
        match self.state {
            NoteState::Idle => false,
            NoteState::Judged {
                result,
                time: judged_at,
            } => time >= judged_at + ops.grace_for(result),
        }
    }
}

impl Deref for PlayingNote {
    type Target = Note;

    fn deref(&self) -> &Self::Target {
        &self.note
    }
}

/// A note with a wide window set may become judgeable before an earlier note with a tight one.
fn judgeable_order(notes: &[Note]) -> VecDeque<Note> {
    let mut notes = notes.to_vec();
    notes.sort_by(|a, b| {
        (a.get_time() - a.get_windows().widest())
            .total_cmp(&(b.get_time() - b.get_windows().widest()))
    });
    notes.into()
}

pub struct Playfield {
    notes: Vec<Note>,
    ops: PlayOptions,
    scroll: Box<dyn ScrollAlgorithm>,
    dispatcher: InputDispatcher,
    /// Sorted by the time a note becomes judgeable.
    pending: VecDeque<Note>,
    /// Sorted by note time.
    play_area: Vec<PlayingNote>,
    input_queue: VecDeque<(ActionEvent, OffsetType)>,
    current_time: OffsetType,
}

impl Playfield {
    pub fn new(chart: &Chart, ops: PlayOptions) -> Result<Self, OptionsError> {
        ops.validate()?;
        let scroll = ops
            .scroll
            .create()
            .ok_or(OptionsError::InvalidScroll(ops.scroll))?;
        let notes = chart.get_notes().to_vec();
        log::info!(
            "Loaded playfield for {} with {} notes",
            chart.metadata.get_show_name(),
            notes.len()
        );
        Ok(Self {
            pending: judgeable_order(&notes),
            notes,
            ops,
            scroll,
            dispatcher: InputDispatcher::default(),
            play_area: vec![],
            input_queue: Default::default(),
            current_time: OffsetType::NEG_INFINITY,
        })
    }

    pub fn current_time(&self) -> OffsetType {
        self.current_time
    }

    pub fn get_options(&self) -> &PlayOptions {
        &self.ops
    }

    pub fn get_play_notes(&self) -> &[PlayingNote] {
        &self.play_area
    }

    pub fn get_dispatcher(&self) -> &InputDispatcher {
        &self.dispatcher
    }

    pub fn note_state(&self, id: NoteId) -> Option<NoteState> {
        self.play_area
            .iter()
            .find(|x| x.get_id() == id)
            .map(|x| x.state)
            .or_else(|| {
                self.pending
                    .iter()
                    .any(|x| x.get_id() == id)
                    .then_some(NoteState::Idle)
            })
    }

    /// All notes judged and retired.
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.play_area.is_empty()
    }

    /// Move the notes that may be seen or judged soon into the play area.
    fn schedule_pending(&mut self, time: OffsetType) {
        let horizon = time + self.ops.time_range + self.ops.lead_time;
        while let Some(note) = self.pending.front() {
            if note.get_time() - note.get_windows().widest() <= horizon {
                if let Some(note) = self.pending.pop_front() {
                    // ids follow note time
                    let idx = self
                        .play_area
                        .partition_point(|x| x.get_id() < note.get_id());
                    self.play_area.insert(idx, PlayingNote::new(note));
                }
            } else {
                break;
            }
        }
    }

    /// Judge a press right away instead of waiting for the next tick.
    pub fn press(
        &mut self,
        event: ActionEvent,
        time: OffsetType,
        sink: &mut impl JudgementSink,
    ) -> bool {
        self.schedule_pending(time.max(self.current_time));
        self.dispatcher
            .dispatch(event, time, &mut self.play_area, &mut *sink)
    }

    /// Queue an input, it is dispatched at the start of the next tick.
    pub fn queue_input(&mut self, event: ActionEvent, time: OffsetType) {
        self.input_queue.push_back((event, time));
    }

    pub fn update(
        &mut self,
        clock: &impl Clock,
        judgements: &mut impl JudgementSink,
        positions: &mut impl PositionSink,
    ) {
        self.tick(clock.current_time(), judgements, positions);
    }

    pub fn tick(
        &mut self,
        game_time: OffsetType,
        judgements: &mut impl JudgementSink,
        positions: &mut impl PositionSink,
    ) {
        if game_time < self.current_time {
            log::warn!(
                "Clock moved back from {} to {}, judged notes stay judged",
                self.current_time,
                game_time
            );
        }
        self.current_time = game_time;
        self.schedule_pending(game_time);

        // inputs of this frame win over the timeout of this frame.
        while let Some((event, time)) = self.input_queue.pop_front() {
            self.schedule_pending(time);
            self.dispatcher
                .dispatch(event, time, &mut self.play_area, &mut *judgements);
        }

        for note in self.play_area.iter_mut() {
            note.offset =
                self.scroll
                    .position_for(note.get_time(), game_time, self.ops.time_range);
            positions.note_position(note.get_id(), note.offset);
        }

        for note in self.play_area.iter_mut().filter(|x| !x.is_judged()) {
            if let Some(event) = NoteJudge::new(note).judge_timeout(game_time) {
                judgements.accept(event);
            }
        }

        let ops = &self.ops;
        self.play_area.retain(|x| !x.is_retired(ops, game_time));
    }

    /// Drop a note from play, later inputs and ticks will not see it.
    pub fn remove_note(&mut self, id: NoteId) -> bool {
        let before = self.play_area.len() + self.pending.len();
        self.play_area.retain(|x| x.get_id() != id);
        self.pending.retain(|x| x.get_id() != id);
        before != self.play_area.len() + self.pending.len()
    }

    /// Start the chart again, every note becomes idle.
    pub fn restart(&mut self) {
        log::info!("Restarting playfield");
        self.pending = judgeable_order(&self.notes);
        self.dispatcher = InputDispatcher::default();
        self.play_area.clear();
        self.input_queue.clear();
        self.current_time = OffsetType::NEG_INFINITY;
    }
}
