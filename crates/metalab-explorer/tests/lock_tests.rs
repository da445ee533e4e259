mod common;

use common::{explorer_session, scenario_session};
use metalab_explorer::{Criterion, Level, LevelFilter};
use pretty_assertions::assert_eq;

fn study_1_1() -> LevelFilter {
    LevelFilter::new()
        .with(Criterion::any_of("paper_id", [1.into()]))
        .with(Criterion::any_of("study_id", [1.into()]))
}

#[test]
fn locked_studies_survive_widening_papers() {
    let mut session = scenario_session();
    session.apply_filter(Level::Study, study_1_1()).unwrap();
    assert_eq!(session.filtered(Level::Study), &[0]);
    assert_eq!(session.filtered(Level::Effect), &[0]);

    assert!(session.toggle_lock(Level::Study));
    session
        .apply_filter(
            Level::Paper,
            LevelFilter::new().with(Criterion::any_of("paper_id", [1.into(), 2.into()])),
        )
        .unwrap();

    assert_eq!(session.filtered(Level::Study), &[0]);
    assert_eq!(session.filtered(Level::Effect), &[0]);
    assert!(session.is_locked(Level::Study));
}

#[test]
fn locked_level_is_untouched_by_an_empty_filter_elsewhere() {
    let mut session = explorer_session();
    session
        .apply_filter(
            Level::Outcome,
            LevelFilter::new().with(Criterion::any_of("outcome_type", ["behavioral".into()])),
        )
        .unwrap();
    session.set_lock(Level::Outcome, true);
    let pinned = session.filtered(Level::Outcome).to_vec();

    session
        .apply_filter(
            Level::Effect,
            LevelFilter::new().with(Criterion::range("effect_size", Some(5.0), Some(6.0))),
        )
        .unwrap();

    assert_eq!(session.filtered(Level::Outcome), pinned.as_slice());
    assert!(session.filtered(Level::Effect).is_empty());
    assert!(session.filtered(Level::Paper).is_empty());
}

#[test]
fn locked_level_does_not_constrain_others() {
    let mut session = explorer_session();
    session.set_lock(Level::Paper, true);
    session
        .apply_filter(
            Level::Paper,
            LevelFilter::new().with(Criterion::any_of("paper_type", ["report".into()])),
        )
        .unwrap();

    // The pinned selection is kept verbatim but imposes nothing on the other levels.
    assert_eq!(session.filtered(Level::Paper), &[2]);
    assert_eq!(session.count(Level::Study).shown, 4);
    assert_eq!(session.count(Level::Effect).shown, 6);
}

#[test]
fn unlocking_lets_the_level_constrain_again() {
    let mut session = explorer_session();
    session.set_lock(Level::Paper, true);
    session
        .apply_filter(
            Level::Paper,
            LevelFilter::new().with(Criterion::any_of("paper_type", ["report".into()])),
        )
        .unwrap();

    assert!(!session.toggle_lock(Level::Paper));
    assert_eq!(session.filtered(Level::Paper), &[2]);
    assert_eq!(session.filtered(Level::Study), &[3]);
    assert_eq!(session.filtered(Level::Effect), &[5]);
}

#[test]
fn locks_persist_across_filter_submissions() {
    let mut session = explorer_session();
    session.set_lock(Level::Sample, true);
    session
        .apply_filter(
            Level::Study,
            LevelFilter::new().with(Criterion::flag("preregistered", false)),
        )
        .unwrap();
    session
        .apply_filter(Level::Paper, LevelFilter::new())
        .unwrap();
    assert!(session.is_locked(Level::Sample));
    assert_eq!(session.locks().locked().collect::<Vec<_>>(), vec![Level::Sample]);
}
