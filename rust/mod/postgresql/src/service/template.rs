//! Placeholder rendering and statement testing for role templates.
//!
//! A template is SQL text with `{{key}}` placeholders. At write time the
//! reserved keys are filled with fixed test values and the result is handed
//! to the database to prepare, never to run.

use tracing::debug;

use dbcred_sql::{SQLConnection, SQLError};

use crate::service::RoleError;

/// Values used when testing a template.
///
/// `expiration` renders as the empty string. A template that only parses
/// with a real timestamp in that slot is not caught here.
pub const TEST_VALUES: [(&str, &str); 3] = [
    ("name", "foo"),
    ("password", "bar"),
    ("expiration", ""),
];

/// Replace every `{{key}}` whose key appears in `values`.
///
/// Keys match exactly and case-sensitively. Unknown keys and a `{{` with no
/// closing `}}` pass through untouched. Substituted values are not rescanned.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let hit = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, end))
        });

        match hit {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                // Step over one brace only, so `{{{name}}}` still finds `{{name}}`.
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Render `template` with [`TEST_VALUES`] and ask `db` to prepare it.
///
/// A statement the database refuses comes back as [`RoleError::Validation`]
/// with the database's message. Not being able to ask at all is
/// [`RoleError::Database`]. Nothing is retried.
pub async fn validate(template: &str, db: &dyn SQLConnection) -> Result<(), RoleError> {
    let rendered = render(template, &TEST_VALUES);
    debug!(dialect = db.dialect(), sql = %rendered, "testing role statement");

    db.prepare(&rendered).await.map_err(|e| match e {
        SQLError::Query(msg) => RoleError::Validation(msg),
        SQLError::Connection(msg) => RoleError::Database(msg),
    })
}
