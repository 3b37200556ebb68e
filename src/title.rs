//! Title synthesis for parameterized cases.
//!
//! Titles appear verbatim in host reports, so their format is a compatibility
//! contract:
//!
//! - no priority: `"{base} - [{testname}]"`
//! - priority:    `"[priority={priority}] {base'} - [{testname}]"`, where `base'` is
//!   `base` with one leading `[priority=pN] ` marker (N in 0..=2) removed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::priority::title_with_priority;
use crate::record::ParameterRecord;

static PRIORITY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[priority=p[0-2]\] ").unwrap());

/// Removes a single leading priority marker, if present.
pub fn strip_priority(title: &str) -> &str {
    match PRIORITY_PREFIX.find(title) {
        Some(m) => &title[m.end()..],
        None => title,
    }
}

/// Builds the display title of one variant. The record is assumed validated.
pub fn synthesize(base: &str, record: &ParameterRecord) -> String {
    let testname = record.testname().unwrap_or_default();
    match record.priority() {
        Some(priority) => {
            let stripped = strip_priority(base);
            title_with_priority(
                &format!("{} - [{}]", stripped, testname),
                priority.resolve(),
            )
        }
        None => format!("{} - [{}]", base, testname),
    }
}
