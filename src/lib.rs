pub use crate::diagnostics::{ErrorType, ParamsError};

pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod expander;
pub mod host;
pub mod interface;
pub mod loader;
pub mod params;
pub mod priority;
pub mod record;
pub mod title;
pub mod validation;

pub use config::InterfaceConfig;
pub use dispatch::Dispatcher;
pub use host::{Case, CaseContext, CaseId, Host, HookKind, Mode, TestBody, TestOutcome};
pub use interface::{Interface, Primitive};
pub use params::{params, Body, ParamBody, ParamSpec};
pub use priority::{p0, p1, p2, Priority, PriorityRef};
pub use record::ParameterRecord;
pub use title::synthesize;
pub use validation::validate;
