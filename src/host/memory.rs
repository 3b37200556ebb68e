//! In-memory suite tree implementing [`Host`].
//!
//! Records everything the declaration surface registers so it can be inspected:
//! suites with their pending/exclusive flags, retry counts and hooks, and cases
//! in registration order. [`SuiteTree::invoke`] runs a single body once; there is
//! no scheduling, retrying or reporting here.

use super::{Case, CaseContext, CaseId, Host, HookKind, Mode, TestBody, TestOutcome};

/// Index of a suite inside a [`SuiteTree`]. The root suite is `SuiteId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuiteId(pub usize);

pub struct Suite {
    pub title: String,
    pub parent: Option<SuiteId>,
    pub pending: bool,
    pub exclusive: bool,
    pub retries: Option<u32>,
    pub children: Vec<SuiteId>,
    pub cases: Vec<CaseId>,
    pub hooks: Vec<(HookKind, TestBody)>,
}

impl Suite {
    fn new(title: &str, parent: Option<SuiteId>, mode: Mode) -> Self {
        Self {
            title: title.to_string(),
            parent,
            pending: mode == Mode::Skip,
            exclusive: mode == Mode::Only,
            retries: None,
            children: Vec::new(),
            cases: Vec::new(),
            hooks: Vec::new(),
        }
    }
}

pub struct SuiteTree {
    suites: Vec<Suite>,
    cases: Vec<(SuiteId, Case)>,
    current: Vec<SuiteId>,
}

impl Default for SuiteTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SuiteTree {
    pub fn new() -> Self {
        Self {
            suites: vec![Suite::new("", None, Mode::Normal)],
            cases: Vec::new(),
            current: vec![SuiteId(0)],
        }
    }

    pub fn root(&self) -> SuiteId {
        SuiteId(0)
    }

    fn current(&self) -> SuiteId {
        self.current.last().copied().unwrap_or(SuiteId(0))
    }

    pub fn suite(&self, id: SuiteId) -> Option<&Suite> {
        self.suites.get(id.0)
    }

    pub fn case(&self, id: CaseId) -> Option<&Case> {
        self.cases.get(id.0).map(|(_, case)| case)
    }

    /// All cases in registration order.
    pub fn cases(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter().map(|(_, case)| case)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.cases().map(|case| case.title.as_str()).collect()
    }

    /// The suite a case was added to.
    pub fn suite_of(&self, id: CaseId) -> Option<SuiteId> {
        self.cases.get(id.0).map(|(suite, _)| *suite)
    }

    /// Full title of a case: ancestor suite titles and the case title, space separated.
    pub fn full_title(&self, id: CaseId) -> Option<String> {
        let (mut suite, case) = self.cases.get(id.0).map(|(s, c)| (Some(*s), c))?;
        let mut parts = vec![case.title.clone()];
        while let Some(s) = suite.and_then(|s| self.suite(s)) {
            if !s.title.is_empty() {
                parts.push(s.title.clone());
            }
            suite = s.parent;
        }
        parts.reverse();
        Some(parts.join(" "))
    }

    /// Retry count in effect for a case, inherited from the nearest suite that set one.
    pub fn retries_for(&self, id: CaseId) -> Option<u32> {
        let mut suite = self.suite_of(id);
        while let Some(s) = suite.and_then(|s| self.suite(s)) {
            if s.retries.is_some() {
                return s.retries;
            }
            suite = s.parent;
        }
        None
    }

    /// Runs the case's body once as run number `attempt` (zero-based). Returns
    /// `None` for pending cases.
    pub fn invoke(&self, id: CaseId, attempt: u32) -> Option<TestOutcome> {
        let case = self.case(id)?;
        let body = case.body.as_ref()?;
        let mut ctx = CaseContext {
            title: case.title.clone(),
            attempt,
        };
        Some(body(&mut ctx))
    }
}

impl Host for SuiteTree {
    fn add_case(&mut self, case: Case) -> CaseId {
        let id = CaseId(self.cases.len());
        let suite = self.current();
        self.suites[suite.0].cases.push(id);
        self.cases.push((suite, case));
        id
    }

    fn mark_exclusive(&mut self, case: CaseId) {
        if let Some((_, case)) = self.cases.get_mut(case.0) {
            case.exclusive = true;
        }
    }

    fn set_retries(&mut self, n: u32) {
        let suite = self.current();
        self.suites[suite.0].retries = Some(n);
    }

    fn is_suite_pending(&self) -> bool {
        let mut suite = Some(self.current());
        while let Some(s) = suite.and_then(|s| self.suite(s)) {
            if s.pending {
                return true;
            }
            suite = s.parent;
        }
        false
    }

    fn enter_suite(&mut self, title: &str, mode: Mode) {
        let parent = self.current();
        let id = SuiteId(self.suites.len());
        self.suites.push(Suite::new(title, Some(parent), mode));
        self.suites[parent.0].children.push(id);
        self.current.push(id);
    }

    fn exit_suite(&mut self) {
        if self.current.len() > 1 {
            self.current.pop();
        }
    }

    fn add_hook(&mut self, kind: HookKind, body: TestBody) {
        let suite = self.current();
        self.suites[suite.0].hooks.push((kind, body));
    }
}
