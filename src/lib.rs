use crate::engine::config::Config;
use crate::game::chart::Chart;
use crate::state::script::load_script;
use crate::state::{ReplayArgs, ReplayState};
use clap::Parser;

pub mod engine;
pub mod game;
pub mod state;

/// Replay a chart with a key press script, the arguments come from the command line.
pub fn real_main() -> anyhow::Result<()> {
    log::info!("Joined the real main");
    let args = ReplayArgs::parse();

    let cfg = Config::load_or_default(&args.config)?;
    let chart = Chart::load(&args.chart)?;
    let script = load_script(&args.script)?;
    log::info!("Got {} scripted key events", script.len());

    let summary = ReplayState::new(&chart, script, &cfg)?.run()?;
    println!("{}", chart.metadata.get_show_name());
    println!("{}", summary);
    Ok(())
}
