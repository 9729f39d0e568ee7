#![cfg(test)]

use crate::game::judge::windows::{HitResult, Windows, WindowsError};
use crate::game::judge::{JudgementEvent, NoteJudge};
use crate::game::note::{Note, NoteFlags, NoteId, NoteState, NoteType};
use crate::game::playfield::PlayingNote;
use std::sync::Arc;

fn sample_windows() -> Windows {
    Windows::new([
        (HitResult::Perfect, 20.0),
        (HitResult::Good, 50.0),
        (HitResult::Miss, 100.0),
    ])
    .unwrap()
}

fn sample_note() -> PlayingNote {
    PlayingNote::new(Note::new(
        NoteId(7),
        1000.0,
        NoteType::Don,
        NoteFlags::empty(),
        Arc::new(sample_windows()),
    ))
}

#[test]
fn resolve_walks_tightest_first() {
    let w = sample_windows();
    assert_eq!(w.resolve(0.0), Some(HitResult::Perfect));
    assert_eq!(w.resolve(-15.0), Some(HitResult::Perfect));
    assert_eq!(w.resolve(35.0), Some(HitResult::Good));
    assert_eq!(w.resolve(-49.0), Some(HitResult::Good));
    assert_eq!(w.resolve(70.0), Some(HitResult::Good));
    assert_eq!(w.resolve(-99.0), Some(HitResult::Good));
    assert_eq!(w.resolve(100.5), None);
    assert_eq!(w.resolve(-500.0), None);
    assert_eq!(w.resolve(f64::NAN), None);
}

#[test]
fn boundaries_are_inclusive() {
    let w = sample_windows();
    assert_eq!(w.resolve(20.0), Some(HitResult::Perfect));
    assert_eq!(w.resolve(-20.0), Some(HitResult::Perfect));
    assert_eq!(w.resolve(50.0), Some(HitResult::Good));
    assert_eq!(w.resolve(100.0), Some(HitResult::Good));
    assert!(w.is_within_timeout_window(100.0));
    assert!(w.is_within_timeout_window(-100.0));
    assert!(!w.is_within_timeout_window(100.001));
}

#[test]
fn table_without_miss_row() {
    let w = Windows::new([(HitResult::Great, 40.0), (HitResult::Bad, 120.0)]).unwrap();
    assert_eq!(w.widest(), 120.0);
    assert_eq!(w.resolve(40.0), Some(HitResult::Great));
    assert_eq!(w.resolve(120.0), Some(HitResult::Bad));
    assert_eq!(w.resolve(121.0), None);
    assert_eq!(w.window_for(HitResult::Bad), Some(120.0));
    assert_eq!(w.window_for(HitResult::Perfect), None);
}

#[test]
fn default_windows_are_valid() {
    let def = Windows::default();
    let checked = Windows::new([
        (HitResult::Perfect, 30.0),
        (HitResult::Great, 60.0),
        (HitResult::Good, 100.0),
        (HitResult::Bad, 150.0),
        (HitResult::Miss, 200.0),
    ]);
    assert_eq!(checked, Ok(def.clone()));
    assert_eq!(def.widest(), 200.0);
}

#[test]
fn rejects_bad_tables() {
    assert_eq!(
        Windows::new(Vec::<(HitResult, f64)>::new()),
        Err(WindowsError::Empty)
    );
    assert_eq!(
        Windows::new([(HitResult::Miss, 100.0)]),
        Err(WindowsError::NoHitResult)
    );
    assert_eq!(
        Windows::new([(HitResult::Perfect, 50.0), (HitResult::Good, 20.0)]),
        Err(WindowsError::NotMonotonic {
            result: HitResult::Good,
            tolerance: 20.0,
            previous: 50.0
        })
    );
    assert_eq!(
        Windows::new([(HitResult::Good, 20.0), (HitResult::Perfect, 50.0)]),
        Err(WindowsError::NotOrdered {
            result: HitResult::Perfect
        })
    );
    assert_eq!(
        Windows::new([(HitResult::Good, 20.0), (HitResult::Good, 50.0)]),
        Err(WindowsError::NotOrdered {
            result: HitResult::Good
        })
    );
    assert!(matches!(
        Windows::new([(HitResult::Perfect, -1.0)]),
        Err(WindowsError::InvalidTolerance { .. })
    ));
    assert!(matches!(
        Windows::new([(HitResult::Perfect, 10.0), (HitResult::Miss, f64::NAN)]),
        Err(WindowsError::InvalidTolerance { .. })
    ));
    // equal tolerances are allowed
    assert!(Windows::new([(HitResult::Perfect, 30.0), (HitResult::Great, 30.0)]).is_ok());
}

#[test]
fn user_hit_perfect() {
    let mut note = sample_note();
    let event = NoteJudge::new(&mut note).judge_input(1015.0);
    assert_eq!(
        event,
        Some(JudgementEvent {
            note_id: NoteId(7),
            result: HitResult::Perfect,
            user_triggered: true,
            time: 1015.0,
            offset: 15.0,
        })
    );
    assert_eq!(
        note.get_state(),
        NoteState::Judged {
            result: HitResult::Perfect,
            time: 1015.0
        }
    );
}

#[test]
fn user_hit_good() {
    let mut note = sample_note();
    let event = NoteJudge::new(&mut note).judge_input(1070.0).unwrap();
    assert_eq!(event.result, HitResult::Good);
    assert!(event.user_triggered);
}

#[test]
fn hit_outside_every_window_is_ignored() {
    let mut note = sample_note();
    assert_eq!(NoteJudge::new(&mut note).judge_input(1500.0), None);
    assert_eq!(NoteJudge::new(&mut note).judge_input(850.0), None);
    assert_eq!(note.get_state(), NoteState::Idle);

    let event = NoteJudge::new(&mut note).judge_timeout(1101.0).unwrap();
    assert_eq!(event.result, HitResult::Miss);
    assert!(!event.user_triggered);
}

#[test]
fn timeout_only_after_the_window() {
    let mut note = sample_note();
    for time in [0.0, 899.0, 900.0, 1000.0, 1050.0, 1100.0] {
        assert_eq!(NoteJudge::new(&mut note).judge_timeout(time), None);
    }
    assert_eq!(note.get_state(), NoteState::Idle);
    let event = NoteJudge::new(&mut note).judge_timeout(1101.0).unwrap();
    assert_eq!(event.result, HitResult::Miss);
    assert_eq!(event.time, 1101.0);
    assert_eq!(event.offset, 101.0);
}

#[test]
fn judged_once() {
    let mut note = sample_note();
    let mut events = vec![];
    events.extend(NoteJudge::new(&mut note).judge_timeout(1101.0));
    for time in [1101.0, 1200.0, 5000.0] {
        events.extend(NoteJudge::new(&mut note).judge_timeout(time));
        events.extend(NoteJudge::new(&mut note).judge_input(time));
    }
    // input in the window after a miss still does nothing
    events.extend(NoteJudge::new(&mut note).judge_input(1000.0));
    assert_eq!(events.len(), 1);
    assert_eq!(note.get_state().result(), Some(HitResult::Miss));

    let mut note = sample_note();
    let first = NoteJudge::new(&mut note).judge_input(995.0);
    assert!(first.is_some());
    assert_eq!(NoteJudge::new(&mut note).judge_input(1000.0), None);
    assert_eq!(NoteJudge::new(&mut note).judge_timeout(2000.0), None);
    assert_eq!(note.get_state().result(), Some(HitResult::Perfect));
}
