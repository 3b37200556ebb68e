//! Priority markers for test titles.
//!
//! `p0`, `p1` and `p2` prefix a title with `[priority=pN] `. A record can carry
//! a priority of its own, either one of these markers or a literal string, which
//! replaces any marker already on the base title (see [`crate::title`]).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three priority levels an author can attach to a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    P0,
    P1,
    P2,
}

impl Priority {
    /// The marker's name, which is also the value written into titles.
    pub fn name(&self) -> &'static str {
        match self {
            Priority::P0 => "p0",
            Priority::P1 => "p1",
            Priority::P2 => "p2",
        }
    }

    pub fn tag(&self, title: &str) -> String {
        title_with_priority(title, self.name())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record-level priority, before it is resolved to the text used in a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityRef {
    /// One of the named markers; resolves to the marker's name.
    Marker(Priority),
    /// Any other value; used verbatim.
    Literal(String),
}

impl PriorityRef {
    pub fn resolve(&self) -> &str {
        match self {
            PriorityRef::Marker(p) => p.name(),
            PriorityRef::Literal(s) => s,
        }
    }
}

impl From<Priority> for PriorityRef {
    fn from(p: Priority) -> Self {
        PriorityRef::Marker(p)
    }
}

pub(crate) fn title_with_priority(title: &str, priority: &str) -> String {
    format!("[priority={}] {}", priority, title)
}

pub fn p0(title: &str) -> String {
    Priority::P0.tag(title)
}

pub fn p1(title: &str) -> String {
    Priority::P1.tag(title)
}

pub fn p2(title: &str) -> String {
    Priority::P2.tag(title)
}

#[cfg(test)]
mod priority_tests {
    use super::*;

    #[test]
    fn test_markers_prefix_title() {
        assert_eq!(p0("Login works"), "[priority=p0] Login works");
        assert_eq!(p1("Login works"), "[priority=p1] Login works");
        assert_eq!(p2(""), "[priority=p2] ");
    }

    #[test]
    fn test_marker_resolves_to_its_name() {
        assert_eq!(PriorityRef::from(Priority::P2).resolve(), "p2");
        assert_eq!(PriorityRef::Literal("urgent".into()).resolve(), "urgent");
    }

    #[test]
    fn test_priority_deserializes_lowercase() {
        let p: Priority = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(p, Priority::P1);
    }
}
