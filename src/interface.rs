//! The declaration surface test authors write against.
//!
//! [`Interface`] is the author-facing side: `it`, `it_only`, `it_skip`/`xit`,
//! `retries`, suites and hooks. Case declarations run through the expander, so a
//! [`ParamSpec`](crate::ParamSpec) body becomes one case per record. [`Primitive`]
//! is the single-case surface underneath; it never expands parameters and is
//! what outer tooling should wrap.
//!
//! ```rust
//! use bdd_params::host::memory::SuiteTree;
//! use bdd_params::{p0, params, Interface, ParameterRecord};
//!
//! let mut tree = SuiteTree::new();
//! let mut iface = Interface::new(&mut tree);
//! iface
//!     .describe("math", |iface| {
//!         let table = vec![
//!             ParameterRecord::new("small").with("a", 1),
//!             ParameterRecord::new("large").with("a", 1000),
//!         ];
//!         iface.it(&p0("doubles"), params(table, |_, r| {
//!             let a: i64 = r.get_as("a")?;
//!             assert_eq!(a * 2, a + a);
//!             Ok(())
//!         })?);
//!         Ok(())
//!     })
//!     .unwrap();
//! assert_eq!(
//!     tree.titles(),
//!     ["[priority=p0] doubles - [small]", "[priority=p0] doubles - [large]"]
//! );
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::{InterfaceConfig, Route, Surface};
use crate::expander::expand;
use crate::host::{CaseContext, CaseId, Host, HookKind, Mode, TestBody, TestOutcome};
use crate::params::Body;
use crate::{err_msg, ParamsError};

/// Single-case registration against the host.
pub struct Primitive<'a, H: Host + ?Sized> {
    host: &'a mut H,
    file: Option<&'a Path>,
}

impl<'a, H: Host + ?Sized> Primitive<'a, H> {
    pub fn new(host: &'a mut H) -> Self {
        Self { host, file: None }
    }

    /// Registers a case in the current suite. Inside a pending suite the body is dropped.
    pub fn it(&mut self, title: &str, body: Option<TestBody>) -> CaseId {
        self.register(title, body, false)
    }

    pub fn only(&mut self, title: &str, body: Option<TestBody>) -> CaseId {
        self.register(title, body, true)
    }

    pub fn skip(&mut self, title: &str) -> CaseId {
        self.it(title, None)
    }

    pub fn retries(&mut self, n: u32) {
        debug!(retries = n, "forwarding retry count");
        self.host.set_retries(n);
    }

    fn register(&mut self, title: &str, body: Option<TestBody>, exclusive: bool) -> CaseId {
        let body = if self.host.is_suite_pending() { None } else { body };
        let mut case = match body {
            Some(body) => self.host.create_runnable_case(title, body),
            None => self.host.create_pending_case(title),
        };
        case.file = self.file.map(Path::to_path_buf);
        let pending = case.is_pending();
        let id = self.host.add_case(case);
        if exclusive {
            self.host.mark_exclusive(id);
        }
        debug!(title, pending, exclusive, "registered case");
        id
    }
}

/// Author-facing declarations bound to one host.
pub struct Interface<'h, H: Host + ?Sized> {
    host: &'h mut H,
    config: InterfaceConfig,
    file: Option<PathBuf>,
}

impl<'h, H: Host + ?Sized> Interface<'h, H> {
    pub fn new(host: &'h mut H) -> Self {
        Self::with_config(host, InterfaceConfig::default())
    }

    pub fn with_config(host: &'h mut H, config: InterfaceConfig) -> Self {
        Self {
            host,
            config,
            file: None,
        }
    }

    /// Attributes every case registered from here on to `file`.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn config(&self) -> &InterfaceConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &*self.host
    }

    pub fn primitive(&mut self) -> Primitive<'_, H> {
        Primitive {
            host: &mut *self.host,
            file: self.file.as_deref(),
        }
    }

    pub fn it(&mut self, title: &str, body: impl Into<Body>) -> Vec<CaseId> {
        self.declare(title, body.into(), Mode::Normal)
    }

    pub fn it_only(&mut self, title: &str, body: impl Into<Body>) -> Vec<CaseId> {
        self.declare(title, body.into(), Mode::Only)
    }

    pub fn it_skip(&mut self, title: &str, body: impl Into<Body>) -> Vec<CaseId> {
        self.declare(title, body.into(), Mode::Skip)
    }

    pub fn xit(&mut self, title: &str, body: impl Into<Body>) -> Vec<CaseId> {
        self.it_skip(title, body)
    }

    pub fn retries(&mut self, n: u32) {
        self.primitive().retries(n);
    }

    pub fn declare(&mut self, title: &str, body: Body, mode: Mode) -> Vec<CaseId> {
        let mut primitive = self.primitive();
        expand(&mut primitive, title, body, mode)
    }

    /// Declares a case through an alias from the interface's alias table.
    pub fn declare_as(
        &mut self,
        alias: &str,
        title: &str,
        body: impl Into<Body>,
    ) -> Result<Vec<CaseId>, ParamsError> {
        let route = self.route(alias)?;
        let body: Body = body.into();
        match (route.surface, body) {
            (Surface::Declare, body) => Ok(self.declare(title, body, route.mode)),
            (Surface::Primitive, Body::Plain(body)) => {
                let mut primitive = self.primitive();
                let id = match route.mode {
                    Mode::Normal => primitive.it(title, body),
                    Mode::Only => primitive.only(title, body),
                    Mode::Skip => primitive.skip(title),
                };
                Ok(vec![id])
            }
            (Surface::Primitive, Body::Params(_)) => Err(err_msg!(
                MalformedDeclaration,
                format!("'{}' registers a single case and cannot take params()", alias)
            )),
            (Surface::Suite, _) => Err(err_msg!(
                MalformedDeclaration,
                format!("'{}' declares a suite, not a test case", alias)
            )),
        }
    }

    /// Declares a suite through an alias from the interface's alias table.
    pub fn describe_as<F>(&mut self, alias: &str, title: &str, f: F) -> Result<(), ParamsError>
    where
        F: FnOnce(&mut Self) -> Result<(), ParamsError>,
    {
        let route = self.route(alias)?;
        if route.surface != Surface::Suite {
            return Err(err_msg!(
                MalformedDeclaration,
                format!("'{}' declares a test case, not a suite", alias)
            ));
        }
        self.suite(title, route.mode, f)
    }

    fn route(&self, alias: &str) -> Result<Route, ParamsError> {
        self.config
            .resolve(alias)
            .ok_or_else(|| ParamsError::UnknownAlias {
                interface: self.config.name.clone(),
                alias: alias.to_string(),
            })
    }

    pub fn describe<F>(&mut self, title: &str, f: F) -> Result<(), ParamsError>
    where
        F: FnOnce(&mut Self) -> Result<(), ParamsError>,
    {
        self.suite(title, Mode::Normal, f)
    }

    pub fn describe_only<F>(&mut self, title: &str, f: F) -> Result<(), ParamsError>
    where
        F: FnOnce(&mut Self) -> Result<(), ParamsError>,
    {
        self.suite(title, Mode::Only, f)
    }

    pub fn describe_skip<F>(&mut self, title: &str, f: F) -> Result<(), ParamsError>
    where
        F: FnOnce(&mut Self) -> Result<(), ParamsError>,
    {
        self.suite(title, Mode::Skip, f)
    }

    pub fn xdescribe<F>(&mut self, title: &str, f: F) -> Result<(), ParamsError>
    where
        F: FnOnce(&mut Self) -> Result<(), ParamsError>,
    {
        self.describe_skip(title, f)
    }

    fn suite<F>(&mut self, title: &str, mode: Mode, f: F) -> Result<(), ParamsError>
    where
        F: FnOnce(&mut Self) -> Result<(), ParamsError>,
    {
        debug!(title, ?mode, "entering suite");
        self.host.enter_suite(title, mode);
        let result = f(self);
        self.host.exit_suite();
        debug!(title, ok = result.is_ok(), "left suite");
        result
    }

    pub fn before<F>(&mut self, f: F)
    where
        F: Fn(&mut CaseContext) -> TestOutcome + Send + Sync + 'static,
    {
        self.hook(HookKind::Before, Arc::new(f));
    }

    pub fn after<F>(&mut self, f: F)
    where
        F: Fn(&mut CaseContext) -> TestOutcome + Send + Sync + 'static,
    {
        self.hook(HookKind::After, Arc::new(f));
    }

    pub fn before_each<F>(&mut self, f: F)
    where
        F: Fn(&mut CaseContext) -> TestOutcome + Send + Sync + 'static,
    {
        self.hook(HookKind::BeforeEach, Arc::new(f));
    }

    pub fn after_each<F>(&mut self, f: F)
    where
        F: Fn(&mut CaseContext) -> TestOutcome + Send + Sync + 'static,
    {
        self.hook(HookKind::AfterEach, Arc::new(f));
    }

    fn hook(&mut self, kind: HookKind, body: TestBody) {
        self.host.add_hook(kind, body);
    }
}
