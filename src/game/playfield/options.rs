use crate::engine::config::Config;
use crate::game::judge::windows::HitResult;
use crate::game::scroll::ScrollKind;
use crate::game::OffsetType;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlayOptions {
    /// How long a note is visible before it reaches the judgement line.
    pub time_range: OffsetType,
    /// How long a note stays after being hit.
    pub hit_grace: OffsetType,
    /// How long a note stays after being missed.
    pub miss_grace: OffsetType,
    /// Notes are scheduled this much earlier than they become visible, for some lag case.
    pub lead_time: OffsetType,
    pub scroll: ScrollKind,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptionsError {
    #[error("time range must be positive and finite, got {0}")]
    InvalidTimeRange(OffsetType),
    #[error("{name} must be non-negative and finite, got {value}")]
    InvalidDuration { name: &'static str, value: OffsetType },
    #[error("invalid scroll {0:?}")]
    InvalidScroll(ScrollKind),
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            time_range: 1000.0,
            hit_grace: 250.0,
            miss_grace: 100.0,
            lead_time: 1000.0,
            scroll: ScrollKind::Linear,
        }
    }
}

impl PlayOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.time_range.is_finite() || self.time_range <= 0.0 {
            return Err(OptionsError::InvalidTimeRange(self.time_range));
        }
        for (name, value) in [
            ("hit grace", self.hit_grace),
            ("miss grace", self.miss_grace),
            ("lead time", self.lead_time),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(OptionsError::InvalidDuration { name, value });
            }
        }
        if !self.scroll.is_valid() {
            return Err(OptionsError::InvalidScroll(self.scroll));
        }
        Ok(())
    }

    #[inline]
    pub fn grace_for(&self, result: HitResult) -> OffsetType {
        match result {
            HitResult::Miss => self.miss_grace,
            _ => self.hit_grace,
        }
    }

    /// Read the `[play]` and `[scroll]` tables, missing keys keep the defaults.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let def = Self::default();
        let scroll = match cfg.get_str("scroll.algorithm").unwrap_or("linear") {
            "linear" => ScrollKind::Linear,
            "scaled" => ScrollKind::Scaled(cfg.get_f64_def("scroll.speed", 1.0)),
            other => anyhow::bail!("Unknown scroll algorithm {:?}", other),
        };
        let ops = Self {
            time_range: cfg.get_f64_def("play.time_range", def.time_range),
            hit_grace: cfg.get_f64_def("play.grace.hit", def.hit_grace),
            miss_grace: cfg.get_f64_def("play.grace.miss", def.miss_grace),
            lead_time: cfg.get_f64_def("play.lead_time", def.lead_time),
            scroll,
        };
        ops.validate()?;
        Ok(ops)
    }
}
