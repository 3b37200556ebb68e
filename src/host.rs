//! The registration API consumed from the host test framework.
//!
//! The expansion layer never builds a suite tree, runs a body or reports a
//! result itself. Everything it produces goes through [`Host`]. A reference
//! implementation backed by memory lives in [`memory`].

pub mod memory;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Result of running one test body.
pub type TestOutcome = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// A runnable body as the host sees it.
pub type TestBody = Arc<dyn Fn(&mut CaseContext) -> TestOutcome + Send + Sync>;

/// Identifies a case previously handed to [`Host::add_case`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaseId(pub usize);

/// Registration mode shared by case and suite declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Run to the exclusion of non-exclusive siblings.
    Only,
    /// Register without a runnable body.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    Before,
    After,
    BeforeEach,
    AfterEach,
}

/// Execution context the host passes to a body each time it runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseContext {
    pub title: String,
    /// Zero for the first run, one more on each retry the host performs.
    pub attempt: u32,
}

impl CaseContext {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            attempt: 0,
        }
    }
}

/// A concrete case handed to the host.
#[derive(Clone)]
pub struct Case {
    pub title: String,
    pub body: Option<TestBody>,
    pub exclusive: bool,
    pub file: Option<PathBuf>,
}

impl Case {
    pub fn pending(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            exclusive: false,
            file: None,
        }
    }

    pub fn runnable(title: impl Into<String>, body: TestBody) -> Self {
        Self {
            body: Some(body),
            ..Self::pending(title)
        }
    }

    pub fn is_pending(&self) -> bool {
        self.body.is_none()
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("title", &self.title)
            .field("pending", &self.is_pending())
            .field("exclusive", &self.exclusive)
            .field("file", &self.file)
            .finish()
    }
}

/// The host framework's primitive registration API.
///
/// Calls arrive in declaration order; a host must keep that order when it
/// reports cases. A suite entered with [`Host::enter_suite`] stays current
/// until the matching [`Host::exit_suite`].
pub trait Host {
    fn create_pending_case(&self, title: &str) -> Case {
        Case::pending(title)
    }

    fn create_runnable_case(&self, title: &str, body: TestBody) -> Case {
        Case::runnable(title, body)
    }

    /// Adds a case to the current suite.
    fn add_case(&mut self, case: Case) -> CaseId;

    fn mark_exclusive(&mut self, case: CaseId);

    /// Sets the retry count of the current suite.
    fn set_retries(&mut self, n: u32);

    /// True when the current suite or any of its ancestors is pending.
    fn is_suite_pending(&self) -> bool;

    fn enter_suite(&mut self, title: &str, mode: Mode);

    fn exit_suite(&mut self);

    fn add_hook(&mut self, kind: HookKind, body: TestBody);
}
