#![no_main]

use libfuzzer_sys::fuzz_target;
use metalab_explorer::{
    propagate, Criterion, ExplorerConfig, ExplorerSession, Level, LevelFilter,
};

/// Keep the harness itself bounded; real datasets are a few MB of JSON.
const MAX_INPUT_BYTES: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let data = if data.len() > MAX_INPUT_BYTES {
        &data[..MAX_INPUT_BYTES]
    } else {
        data
    };

    // The first byte picks the level to filter and which levels to lock; the rest is dataset JSON.
    let selector = data[0];
    let input = String::from_utf8_lossy(&data[1..]);

    let Ok(mut session) = ExplorerSession::from_json_str(&input, ExplorerConfig::default()) else {
        return;
    };

    let level = Level::ALL[usize::from(selector) % Level::ALL.len()];
    for (bit, other) in Level::ALL.iter().enumerate() {
        if selector & (1 << (bit + 2)) != 0 && *other != level {
            session.set_lock(*other, true);
        }
    }

    // Filter on the level's first own column, if any, using a value it actually holds.
    let table = session.full(level);
    let schema = &session.dataset().schema()[level];
    let field = schema
        .fields
        .iter()
        .find(|field| table.has_column(field))
        .cloned();
    if let Some(field) = field {
        let picked = table
            .value(0, &field)
            .cloned()
            .unwrap_or_default();
        let filter = LevelFilter::new().with(Criterion::any_of(field, [picked]));
        let _ = session.apply_filter(level, filter);
    }

    // Propagation is a fixed point: running it again must not change anything.
    let before = session.filtered_data().clone();
    let again = propagate(session.dataset(), &before, session.locks());
    assert_eq!(before, again);

    let _ = session.export_level_csv_string(level, metalab_explorer::ExportScope::Filtered);

    session.reset();
    assert_eq!(session.filtered_data(), &session.dataset().all_rows());
});
