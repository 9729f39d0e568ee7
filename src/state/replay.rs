use crate::engine::config::Config;
use crate::engine::input::{load_key_bindings, FrameInputs, KeyBindingStore};
use crate::game::chart::Chart;
use crate::game::playfield::{Clock, ManualClock, PlayOptions, Playfield};
use crate::game::summary::PlaySummary;
use crate::game::OffsetType;
use crate::state::script::ScriptEvent;
use anyhow::{anyhow, bail};
use clap::Parser;
use std::collections::VecDeque;
use std::path::PathBuf;

pub const DEFAULT_FRAME_MS: OffsetType = 1000.0 / 240.0;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "kumi_replay", version, about = "Replay a chart with scripted key presses")]
pub struct ReplayArgs {
    /// Chart file (.ron)
    #[arg(value_name = "CHART_PATH")]
    pub chart: PathBuf,

    /// Key press script, one `<time> <key> press|release|tap` per line
    #[arg(value_name = "SCRIPT_PATH")]
    pub script: PathBuf,

    /// Path to config TOML
    #[arg(long, default_value = "cfg.toml")]
    pub config: PathBuf,
}

/// Plays a chart with scripted key presses at a fixed frame rate.
pub struct ReplayState {
    playfield: Playfield,
    bindings: KeyBindingStore,
    inputs: FrameInputs,
    script: VecDeque<ScriptEvent>,
    clock: ManualClock,
    frame_ms: OffsetType,
    give_up_time: OffsetType,
    summary: PlaySummary,
}

impl ReplayState {
    pub fn new(chart: &Chart, script: Vec<ScriptEvent>, cfg: &Config) -> anyhow::Result<Self> {
        let ops = PlayOptions::from_config(cfg)?;
        let bindings = load_key_bindings(cfg)?;
        let frame_ms = cfg.get_f64_def("replay.frame_ms", DEFAULT_FRAME_MS);
        if !frame_ms.is_finite() || frame_ms <= 0.0 {
            bail!("Frame time must be positive, got {}", frame_ms);
        }
        let playfield = Playfield::new(chart, ops)?;

        let first_note = chart.get_notes().first().map(|x| x.get_time());
        let start_time = [
            Some(0.0),
            first_note.map(|x| x - ops.time_range - ops.lead_time),
            script.first().map(|x| x.time - frame_ms),
        ]
        .into_iter()
        .flatten()
        .fold(OffsetType::INFINITY, OffsetType::min);
        let end_time = [
            chart.get_last_judge_time(),
            script.last().map(|x| x.time),
        ]
        .into_iter()
        .flatten()
        .fold(start_time, OffsetType::max);
        let give_up_time = end_time + ops.hit_grace.max(ops.miss_grace) + 1000.0;

        Ok(Self {
            playfield,
            bindings,
            inputs: Default::default(),
            script: script.into(),
            clock: ManualClock::new(start_time),
            frame_ms,
            give_up_time,
            summary: Default::default(),
        })
    }

    pub fn is_done(&self) -> bool {
        self.script.is_empty() && self.playfield.is_finished()
    }

    pub fn get_summary(&self) -> &PlaySummary {
        &self.summary
    }

    pub fn get_playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Run one frame.
    pub fn step(&mut self) {
        self.clock.advance(self.frame_ms);
        let now = self.clock.current_time();
        while let Some(event) = self.script.front() {
            if event.time > now {
                break;
            }
            if let Some(event) = self.script.pop_front() {
                self.inputs.process(&event.key, event.pressed, event.time);
            }
        }
        for (event, time) in self.inputs.swap_frame(&self.bindings) {
            self.playfield.queue_input(event, time);
        }
        self.playfield.update(&self.clock, &mut self.summary, &mut ());
    }

    pub fn run(mut self) -> anyhow::Result<PlaySummary> {
        while !self.is_done() {
            if self.clock.current_time() > self.give_up_time {
                return Err(anyhow!(
                    "Replay did not finish by {}ms, {} notes left",
                    self.give_up_time,
                    self.playfield.get_play_notes().len()
                ));
            }
            self.step();
        }
        log::info!(
            "Replay finished at {}ms with {} judgements, {} presses hit nothing",
            self.clock.current_time(),
            self.summary.total(),
            self.playfield.get_dispatcher().get_ignored_presses()
        );
        Ok(self.summary)
    }
}
