//! Key press scripts for replays.
//!
//! One event per line: `<time_ms> <key> press|release|tap`, `#` starts a comment.

use crate::game::OffsetType;
use anyhow::{anyhow, bail, Context};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEvent {
    pub time: OffsetType,
    pub key: String,
    pub pressed: bool,
}

pub fn parse_script(data: &str) -> anyhow::Result<Vec<ScriptEvent>> {
    let mut events = vec![];
    for (idx, line) in data.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let mut parts = line.split_whitespace();
        let (Some(time), Some(key), Some(kind), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            bail!("Line {}: expected `<time> <key> <press|release|tap>`", line_no);
        };
        let time = time
            .parse::<OffsetType>()
            .ok()
            .filter(|x| x.is_finite())
            .ok_or_else(|| anyhow!("Line {}: bad time {:?}", line_no, time))?;
        let mut push = |pressed| {
            events.push(ScriptEvent {
                time,
                key: key.to_string(),
                pressed,
            })
        };
        match kind {
            "press" => push(true),
            "release" => push(false),
            "tap" => {
                push(true);
                push(false);
            }
            _ => bail!("Line {}: unknown event kind {:?}", line_no, kind),
        }
    }
    // keeps the order of events at the same time
    events.sort_by(|a, b| a.time.total_cmp(&b.time));
    Ok(events)
}

pub fn load_script(path: &Path) -> anyhow::Result<Vec<ScriptEvent>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read input script {:?}", path))?;
    parse_script(&data)
}
