//! Declaration bodies: a plain test body or a validated parameter spec.

use std::fmt;
use std::sync::Arc;

use crate::host::{CaseContext, TestBody, TestOutcome};
use crate::record::ParameterRecord;
use crate::validation::validate_all;
use crate::ParamsError;

/// A test body shared by every variant of a parameterized declaration.
pub type ParamBody =
    Arc<dyn Fn(&mut CaseContext, &ParameterRecord) -> TestOutcome + Send + Sync>;

/// An ordered list of records paired with the body they drive.
///
/// Only [`params`] builds one, so every record in a `ParamSpec` has passed
/// validation.
#[derive(Clone)]
pub struct ParamSpec {
    records: Vec<ParameterRecord>,
    body: ParamBody,
}

impl ParamSpec {
    pub fn records(&self) -> &[ParameterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<ParameterRecord>, ParamBody) {
        (self.records, self.body)
    }
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

/// Pairs `records` with `body`, validating every record first.
///
/// ```rust
/// use bdd_params::{params, ParameterRecord};
/// let spec = params(
///     vec![ParameterRecord::new("test1").with("a", 1)],
///     |_ctx, record| {
///         assert_eq!(record.get_as::<i64>("a")?, 1);
///         Ok(())
///     },
/// )
/// .unwrap();
/// assert_eq!(spec.len(), 1);
/// ```
pub fn params<F>(records: Vec<ParameterRecord>, body: F) -> Result<ParamSpec, ParamsError>
where
    F: Fn(&mut CaseContext, &ParameterRecord) -> TestOutcome + Send + Sync + 'static,
{
    validate_all(&records)?;
    Ok(ParamSpec {
        records,
        body: Arc::new(body),
    })
}

/// The second argument of a declaration.
#[derive(Clone)]
pub enum Body {
    /// A single case; `None` declares it without a body.
    Plain(Option<TestBody>),
    Params(ParamSpec),
}

impl Body {
    pub fn plain<F>(f: F) -> Self
    where
        F: Fn(&mut CaseContext) -> TestOutcome + Send + Sync + 'static,
    {
        let body: TestBody = Arc::new(f);
        Body::Plain(Some(body))
    }

    pub fn none() -> Self {
        Body::Plain(None)
    }
}

impl From<ParamSpec> for Body {
    fn from(spec: ParamSpec) -> Self {
        Body::Params(spec)
    }
}

impl From<TestBody> for Body {
    fn from(body: TestBody) -> Self {
        Body::Plain(Some(body))
    }
}

impl From<Option<TestBody>> for Body {
    fn from(body: Option<TestBody>) -> Self {
        Body::Plain(body)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Plain(body) => f.debug_tuple("Plain").field(&body.is_some()).finish(),
            Body::Params(spec) => f.debug_tuple("Params").field(spec).finish(),
        }
    }
}

/// Binds `record` as the sole argument of `body`.
pub(crate) fn bind(body: &ParamBody, record: ParameterRecord) -> TestBody {
    let body = Arc::clone(body);
    let record = Arc::new(record);
    Arc::new(move |ctx: &mut CaseContext| body(ctx, record.as_ref()))
}

#[cfg(test)]
mod params_tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_params_rejects_before_returning() {
        let records = vec![
            ParameterRecord::new("a"),
            ParameterRecord::try_from(json!({"a": 1})).unwrap(),
        ];
        let err = params(records, |_, _| Ok(())).unwrap_err();
        assert!(matches!(err, ParamsError::MissingIdentifier { index: 1, .. }));
    }

    #[test]
    fn test_bound_body_sees_its_record() {
        let spec = params(vec![ParameterRecord::new("a").with("n", 5)], |ctx, r| {
            assert_eq!(ctx.title, "t");
            assert_eq!(r.get_as::<i64>("n")?, 5);
            Ok(())
        })
        .unwrap();
        let (mut records, body) = spec.into_parts();
        let bound = bind(&body, records.remove(0));
        assert!(bound(&mut CaseContext::new("t")).is_ok());
    }
}
