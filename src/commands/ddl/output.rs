//! Output formatting for ddl command results.

use super::execute::DdlResult;
use crate::output::Outputable;

impl Outputable for DdlResult {
    /// Statements terminated with `;` so the output can be piped into `psql`.
    fn to_table(&self) -> String {
        self.statements
            .iter()
            .map(|s| format!("{};", s))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
