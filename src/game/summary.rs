use crate::game::judge::windows::HitResult;
use crate::game::judge::{JudgementEvent, JudgementSink};
use crate::game::OffsetType;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Collects the judgements of a play. Only counts, no score.
#[derive(Default, Debug, Clone)]
pub struct PlaySummary {
    events: Vec<JudgementEvent>,
    counts: BTreeMap<HitResult, u32>,
}

impl JudgementSink for PlaySummary {
    fn accept(&mut self, event: JudgementEvent) {
        *self.counts.entry(event.result).or_default() += 1;
        self.events.push(event);
    }
}

impl PlaySummary {
    pub fn get_events(&self) -> &[JudgementEvent] {
        &self.events
    }

    pub fn count(&self, result: HitResult) -> u32 {
        self.counts.get(&result).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.events.len()
    }

    /// Mean offset of the notes hit by the player, negative is early.
    pub fn mean_offset(&self) -> Option<OffsetType> {
        let (sum, cnt) = self
            .events
            .iter()
            .filter(|x| x.user_triggered)
            .fold((0.0, 0usize), |(sum, cnt), x| (sum + x.offset, cnt + 1));
        (cnt > 0).then(|| sum / cnt as OffsetType)
    }
}

impl Display for PlaySummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (result, cnt) in self.counts.iter().rev() {
            writeln!(f, "{:?}: {}", result, cnt)?;
        }
        match self.mean_offset() {
            Some(offset) => write!(f, "Mean offset: {:+.2}ms", offset),
            None => write!(f, "Mean offset: -"),
        }
    }
}
