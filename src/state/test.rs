#![cfg(test)]

use crate::engine::config::Config;
use crate::game::chart::file::{ChartFile, ChartNote};
use crate::game::chart::Chart;
use crate::game::judge::windows::HitResult;
use crate::game::note::NoteId;
use crate::state::script::parse_script;
use crate::state::{ReplayArgs, ReplayState};
use clap::Parser;
use std::path::PathBuf;

fn chart() -> Chart {
    let mut file = ChartFile::new("replay".into());
    file.windows = Some(vec![
        (HitResult::Perfect, 20.0),
        (HitResult::Good, 50.0),
        (HitResult::Miss, 100.0),
    ]);
    file.notes = vec![
        ChartNote::new(1000.0, "don"),
        ChartNote::new(1500.0, "kat"),
        ChartNote::new(2000.0, "don"),
        ChartNote::new(2500.0, "kat"),
    ];
    Chart::from_file(&file).unwrap()
}

#[test]
fn replay_judges_every_note() {
    let script = parse_script(
        "1015 J tap\n\
         1460 D tap\n\
         # the rim key on a centre note hits nothing, the repeat is dropped\n\
         2005 K press\n\
         2006 K press\n\
         2010 K release\n\
         2502 K tap\n",
    )
    .unwrap();
    let summary = ReplayState::new(&chart(), script, &Config::default())
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.total(), 4);
    assert_eq!(summary.count(HitResult::Perfect), 2);
    assert_eq!(summary.count(HitResult::Good), 1);
    assert_eq!(summary.count(HitResult::Miss), 1);

    let events = summary.get_events();
    assert_eq!(events[0].note_id, NoteId(0));
    assert_eq!(events[0].offset, 15.0);
    assert_eq!(events[1].note_id, NoteId(1));
    assert_eq!(events[1].result, HitResult::Good);
    assert_eq!(events[2].note_id, NoteId(2));
    assert!(!events[2].user_triggered);
    assert_eq!(events[3].note_id, NoteId(3));
    assert_eq!(events[3].result, HitResult::Perfect);

    // (15 - 40 + 2) / 3
    let mean = summary.mean_offset().unwrap();
    assert!((mean - (-23.0 / 3.0)).abs() < 1e-9);
}

#[test]
fn replay_without_input_misses_everything() {
    let summary = ReplayState::new(&chart(), vec![], &Config::default())
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(summary.count(HitResult::Miss), 4);
    assert_eq!(summary.mean_offset(), None);
}

#[test]
fn replay_uses_configured_keys() {
    let cfg = Config::load("[keys]\nright_centre = \"Space\"\n[replay]\nframe_ms = 10\n").unwrap();
    let script = parse_script("1000 space tap\n1010 J tap\n").unwrap();
    let mut state = ReplayState::new(&chart(), script, &cfg).unwrap();
    while !state.is_done() {
        state.step();
    }
    let events = state.get_summary().get_events();
    assert_eq!(events[0].result, HitResult::Perfect);
    assert!(events[0].user_triggered);
    assert_eq!(state.get_playfield().get_dispatcher().get_ignored_presses(), 0);
    assert_eq!(state.get_summary().count(HitResult::Miss), 3);
}

#[test]
fn replay_refuses_bad_config() {
    let cfg = Config::load("[replay]\nframe_ms = 0\n").unwrap();
    assert!(ReplayState::new(&chart(), vec![], &cfg).is_err());
    let cfg = Config::load("[play]\ntime_range = -1\n").unwrap();
    assert!(ReplayState::new(&chart(), vec![], &cfg).is_err());
}

#[test]
fn parse_args() {
    let args = ReplayArgs::try_parse_from(["kumi_replay", "a.ron", "b.txt"]).unwrap();
    assert_eq!(args.chart, PathBuf::from("a.ron"));
    assert_eq!(args.script, PathBuf::from("b.txt"));
    assert_eq!(args.config, PathBuf::from("cfg.toml"));

    let args =
        ReplayArgs::try_parse_from(["kumi_replay", "a.ron", "b.txt", "--config", "c.toml"])
            .unwrap();
    assert_eq!(args.config, PathBuf::from("c.toml"));

    assert!(ReplayArgs::try_parse_from(["kumi_replay"]).is_err());
    assert!(ReplayArgs::try_parse_from(["kumi_replay", "a.ron"]).is_err());
    assert!(ReplayArgs::try_parse_from(["kumi_replay", "a.ron", "b.txt", "c.toml"]).is_err());
}
