//! Case expansion: turns one declaration into one or more primitive registrations.
//!
//! A plain body goes straight to the primitive surface with its title unchanged.
//! A parameter spec registers one case per record, in record order, titled by
//! [`synthesize`]. A record that sets `skip` is always registered without a body;
//! declaring the whole spec in [`Mode::Skip`] does the same for every record.

use tracing::debug;

use crate::host::{CaseId, Host, Mode};
use crate::interface::Primitive;
use crate::params::{bind, Body};
use crate::title::synthesize;

pub fn expand<H: Host + ?Sized>(
    primitive: &mut Primitive<'_, H>,
    title: &str,
    body: Body,
    mode: Mode,
) -> Vec<CaseId> {
    let spec = match body {
        Body::Plain(body) => {
            let id = match mode {
                Mode::Normal => primitive.it(title, body),
                Mode::Only => primitive.only(title, body),
                Mode::Skip => primitive.skip(title),
            };
            return vec![id];
        }
        Body::Params(spec) => spec,
    };

    let (records, body) = spec.into_parts();
    debug!(title, records = records.len(), ?mode, "expanding parameterized declaration");

    let mut ids = Vec::with_capacity(records.len());
    for record in records {
        let case_title = synthesize(title, &record);
        let id = match mode {
            Mode::Skip => primitive.skip(&case_title),
            // the exclusive mark survives a record-level skip
            Mode::Only if record.is_skipped() => primitive.only(&case_title, None),
            Mode::Only => primitive.only(&case_title, Some(bind(&body, record))),
            Mode::Normal if record.is_skipped() => primitive.skip(&case_title),
            Mode::Normal => primitive.it(&case_title, Some(bind(&body, record))),
        };
        ids.push(id);
    }
    ids
}
