//! Diagnostics for parameterized declarations.
//!
//! Every failure the expansion layer can produce is a [`ParamsError`]. Errors are
//! raised synchronously at declaration time and are never caught internally: a
//! malformed parameter table must abort loading of the declaring module rather than
//! register a partial or misleading set of cases.
//!
//! # Error Construction
//!
//! - Build variants directly when they carry structured data (`MissingIdentifier`,
//!   `Decode`, `Load`).
//! - Use [`err_msg!`](crate::err_msg) for message-only variants:
//!   `err_msg!(MalformedDeclaration, "records must be mappings")`.

use miette::Diagnostic;
use thiserror::Error;

/// Type-safe classification of [`ParamsError`] variants, for matching in tests
/// and host adapters without inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// A record is missing its `testname`
    MissingIdentifier,
    /// A declaration argument has the wrong shape
    MalformedDeclaration,
    /// A record field could not be decoded into the requested type
    Decode,
    /// A parameter table could not be read or parsed
    Load,
    /// A declaration alias is not routed by the interface config
    UnknownAlias,
    /// No interface is registered under the requested name
    UnknownInterface,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::MissingIdentifier => "MissingIdentifier",
            ErrorType::MalformedDeclaration => "MalformedDeclaration",
            ErrorType::Decode => "Decode",
            ErrorType::Load => "Load",
            ErrorType::UnknownAlias => "UnknownAlias",
            ErrorType::UnknownInterface => "UnknownInterface",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unified error type for declaration, validation and table loading.
#[derive(Debug, Error, Diagnostic)]
pub enum ParamsError {
    #[error("missing/empty 'testname' in test param {record}")]
    #[diagnostic(
        code(bdd_params::missing_identifier),
        help("every record passed to params() needs a non-empty 'testname'")
    )]
    MissingIdentifier { index: usize, record: String },

    #[error("malformed declaration: {message}")]
    #[diagnostic(code(bdd_params::malformed_declaration))]
    MalformedDeclaration { message: String },

    #[error("cannot decode field '{field}' of test param '{testname}': {source}")]
    #[diagnostic(code(bdd_params::decode))]
    Decode {
        testname: String,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load parameter table from {origin}: {message}")]
    #[diagnostic(code(bdd_params::load))]
    Load {
        origin: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    #[error("unknown declaration '{alias}' for interface '{interface}'")]
    #[diagnostic(
        code(bdd_params::unknown_alias),
        help("add the name to the interface's alias table")
    )]
    UnknownAlias { interface: String, alias: String },

    #[error("no interface registered under '{message}'")]
    #[diagnostic(code(bdd_params::unknown_interface))]
    UnknownInterface { message: String },
}

impl ParamsError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            ParamsError::MissingIdentifier { .. } => ErrorType::MissingIdentifier,
            ParamsError::MalformedDeclaration { .. } => ErrorType::MalformedDeclaration,
            ParamsError::Decode { .. } => ErrorType::Decode,
            ParamsError::Load { .. } => ErrorType::Load,
            ParamsError::UnknownAlias { .. } => ErrorType::UnknownAlias,
            ParamsError::UnknownInterface { .. } => ErrorType::UnknownInterface,
        }
    }

    pub(crate) fn load(
        origin: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ParamsError::Load {
            origin: origin.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}

/// Builds a message-only [`ParamsError`] variant.
///
/// ```rust
/// use bdd_params::{err_msg, ParamsError};
/// let err = err_msg!(MalformedDeclaration, "records must be mappings");
/// assert!(matches!(err, ParamsError::MalformedDeclaration { .. }));
/// ```
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $msg:expr) => {
        $crate::ParamsError::$variant {
            message: $msg.into(),
        }
    };
}
