use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generate a task id from the millisecond clock.
///
/// Ids are strictly increasing within a process even when two are requested
/// in the same millisecond. Uniqueness across the forest is by construction
/// of the time source, not structurally enforced.
pub fn next_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut id = now;
    let result = LAST_ID.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        id = now.max(last + 1);
        Some(id)
    });
    match result {
        Ok(_) => id.to_string(),
        // fetch_update with an always-Some closure cannot fail
        Err(_) => now.to_string(),
    }
}

/// Generate a section id.
pub fn next_section_id() -> String {
    format!("section-{}", next_id())
}
