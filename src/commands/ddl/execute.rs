use serde::Serialize;

use super::DdlCmd;
use crate::db::schema::ALL_RELATIONS;
use crate::db::schema::compilers::PostgresCompiler;

/// Result of the ddl command
#[derive(Debug, Serialize)]
pub struct DdlResult {
    pub statements: Vec<String>,
}

impl DdlCmd {
    pub fn execute(self) -> DdlResult {
        let mut statements = Vec::new();
        if self.drop {
            statements.extend(PostgresCompiler::compile_drop(ALL_RELATIONS));
        }
        statements.extend(PostgresCompiler::compile_all(ALL_RELATIONS));
        DdlResult { statements }
    }
}
