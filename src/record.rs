//! Parameter records: one data variant of a parameterized test.
//!
//! A record is an ordered map from field name to JSON value. Three fields are
//! recognized, everything else is opaque payload for the test body:
//!
//! | Field      | Meaning                                                      |
//! |------------|--------------------------------------------------------------|
//! | `testname` | required identifier, appended to the title as ` - [name]`    |
//! | `skip`     | any non-null value registers the variant as pending          |
//! | `priority` | overrides the title's priority marker when truthy            |
//!
//! A priority may also be attached as a typed [`Priority`] marker with
//! [`ParameterRecord::with_priority`]; the marker takes precedence over a
//! `priority` field.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::priority::{Priority, PriorityRef};
use crate::{err_msg, ParamsError};

pub const TESTNAME: &str = "testname";
pub const SKIP: &str = "skip";
pub const PRIORITY: &str = "priority";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterRecord {
    fields: Map<String, Value>,
    marker: Option<Priority>,
}

impl ParameterRecord {
    pub fn new(testname: impl Into<String>) -> Self {
        let testname: String = testname.into();
        Self::default().with(TESTNAME, testname)
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            marker: None,
        }
    }

    /// Serializes `value` and uses the resulting object as the record.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, ParamsError> {
        let value = serde_json::to_value(value).map_err(|e| {
            err_msg!(
                MalformedDeclaration,
                format!("test param is not serializable: {}", e)
            )
        })?;
        Self::try_from(value)
    }

    /// Adds or replaces a payload field.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn skipped(self) -> Self {
        self.with(SKIP, true)
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.marker = Some(priority);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Decodes a single field into `T`. A missing field decodes from `null`.
    pub fn get_as<T: DeserializeOwned>(&self, field: &str) -> Result<T, ParamsError> {
        let value = self.fields.get(field).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|source| ParamsError::Decode {
            testname: self.testname().unwrap_or_default(),
            field: field.to_string(),
            source,
        })
    }

    /// Decodes the whole record into `T`, the way a test body destructures its argument.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ParamsError> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|source| {
            ParamsError::Decode {
                testname: self.testname().unwrap_or_default(),
                field: "*".to_string(),
                source,
            }
        })
    }

    /// The identifier as it appears in titles. Only a non-empty string qualifies.
    pub fn testname(&self) -> Option<String> {
        match self.fields.get(TESTNAME)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Presence of a non-null `skip`, whatever its value.
    pub fn is_skipped(&self) -> bool {
        !matches!(self.fields.get(SKIP), None | Some(Value::Null))
    }

    pub fn priority(&self) -> Option<PriorityRef> {
        if let Some(marker) = self.marker {
            return Some(PriorityRef::Marker(marker));
        }
        match self.fields.get(PRIORITY)? {
            v if !is_truthy(v) => None,
            Value::String(s) => Some(PriorityRef::Literal(s.clone())),
            other => Some(PriorityRef::Literal(other.to_string())),
        }
    }

    /// JSON rendering of the fields, used in diagnostics. A typed priority
    /// marker is not a field and is left out.
    pub fn to_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

impl TryFrom<Value> for ParameterRecord {
    type Error = ParamsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self::from_map(fields)),
            other => Err(err_msg!(
                MalformedDeclaration,
                format!("test param must be a mapping, got {}", other)
            )),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
