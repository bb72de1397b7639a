//! PostgreSQL DDL and DML compiler.
//!
//! Generates `CREATE TABLE` statements and the parameterised statements the
//! PostgreSQL engine runs. Output is deterministic: columns appear in
//! declaration order and constraints follow the columns. Identifiers are
//! always double-quoted because `user` is a reserved word.

use crate::db::schema::definition::SchemaRelation;

/// Compiler for generating PostgreSQL SQL from schema definitions.
pub struct PostgresCompiler;

/// Quote an identifier for PostgreSQL.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl PostgresCompiler {
    /// Generate the DDL for a single relation.
    ///
    /// Produces output in the format:
    /// ```sql
    /// CREATE TABLE IF NOT EXISTS "product" (
    ///     "id" UUID NOT NULL DEFAULT gen_random_uuid(),
    ///     "category_id" UUID NOT NULL,
    ///     ...
    ///     CONSTRAINT "product_pkey" PRIMARY KEY ("id"),
    ///     CONSTRAINT "product_slug_unique" UNIQUE ("slug"),
    ///     CONSTRAINT "product_category_id_fkey" FOREIGN KEY ("category_id")
    ///         REFERENCES "category" ("id") ON DELETE RESTRICT
    /// )
    /// ```
    pub fn compile_relation(relation: &SchemaRelation) -> String {
        let mut lines: Vec<String> = relation
            .fields
            .iter()
            .map(|f| match f.default {
                Some(default) => format!(
                    "    {} {} NOT NULL DEFAULT {}",
                    quote_ident(f.name),
                    f.data_type.postgres_type(),
                    default.postgres_expr()
                ),
                None => format!(
                    "    {} {} NOT NULL",
                    quote_ident(f.name),
                    f.data_type.postgres_type()
                ),
            })
            .collect();

        lines.push(format!(
            "    CONSTRAINT {} PRIMARY KEY ({})",
            quote_ident(&format!("{}_pkey", relation.name)),
            quote_ident(relation.primary_key)
        ));

        for field in relation.fields {
            if let Some(name) = field.unique_constraint_name(relation.name) {
                lines.push(format!(
                    "    CONSTRAINT {} UNIQUE ({})",
                    quote_ident(&name),
                    quote_ident(field.name)
                ));
            }
            if let (Some(name), Some(min)) =
                (field.check_constraint_name(relation.name), field.min_value)
            {
                lines.push(format!(
                    "    CONSTRAINT {} CHECK ({} >= {})",
                    quote_ident(&name),
                    quote_ident(field.name),
                    min
                ));
            }
        }

        for fk in relation.foreign_keys {
            lines.push(format!(
                "    CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {}",
                quote_ident(&fk.constraint_name(relation.name)),
                quote_ident(fk.column),
                quote_ident(fk.target),
                quote_ident(fk.target_column),
                fk.on_delete.postgres_action()
            ));
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            quote_ident(relation.name),
            lines.join(",\n")
        )
    }

    /// Generate DDL for all relations, in the order given.
    pub fn compile_all(relations: &[&SchemaRelation]) -> Vec<String> {
        relations
            .iter()
            .map(|rel| Self::compile_relation(rel))
            .collect()
    }

    /// Generate `DROP TABLE` statements in reverse creation order.
    pub fn compile_drop(relations: &[&SchemaRelation]) -> Vec<String> {
        relations
            .iter()
            .rev()
            .map(|rel| format!("DROP TABLE IF EXISTS {}", quote_ident(rel.name)))
            .collect()
    }

    /// Query checking whether a table exists in the current schema.
    ///
    /// Takes the table name as `$1`.
    pub fn compile_table_exists() -> &'static str {
        "SELECT 1 FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_name = $1"
    }

    /// Generate an `INSERT` for the given columns, returning the full row.
    ///
    /// Columns left out fall back to their declared defaults. Parameters are
    /// numbered in the order of `columns`.
    pub fn compile_insert(relation: &SchemaRelation, columns: &[&str]) -> String {
        if columns.is_empty() {
            return format!(
                "INSERT INTO {} DEFAULT VALUES RETURNING {}",
                quote_ident(relation.name),
                Self::select_list(relation)
            );
        }

        let column_list = columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=columns.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quote_ident(relation.name),
            column_list,
            placeholders,
            Self::select_list(relation)
        )
    }

    /// Generate a `SELECT` of full rows filtered by one column (`$1`).
    pub fn compile_select_by(relation: &SchemaRelation, column: &str) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = $1 ORDER BY {}",
            Self::select_list(relation),
            quote_ident(relation.name),
            quote_ident(column),
            Self::order_list(relation)
        )
    }

    /// Generate a `SELECT` of every row.
    pub fn compile_select_all(relation: &SchemaRelation) -> String {
        format!(
            "SELECT {} FROM {} ORDER BY {}",
            Self::select_list(relation),
            quote_ident(relation.name),
            Self::order_list(relation)
        )
    }

    /// Generate an `UPDATE` by primary key.
    ///
    /// `$1..$n` bind the new values of `columns`, `$n+1` binds the key.
    pub fn compile_update(relation: &SchemaRelation, columns: &[&str]) -> String {
        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", quote_ident(c), i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            quote_ident(relation.name),
            assignments,
            quote_ident(relation.primary_key),
            columns.len() + 1,
            Self::select_list(relation)
        )
    }

    /// Generate a `DELETE` by primary key (`$1`).
    pub fn compile_delete(relation: &SchemaRelation) -> String {
        format!(
            "DELETE FROM {} WHERE {} = $1",
            quote_ident(relation.name),
            quote_ident(relation.primary_key)
        )
    }

    fn select_list(relation: &SchemaRelation) -> String {
        relation
            .column_names()
            .map(quote_ident)
            .collect::<Vec<_>>()
            .join(", ")
    }

    // Creation order where the table records it, key order otherwise.
    fn order_list(relation: &SchemaRelation) -> String {
        match relation.field("created_at") {
            Some(_) => format!(
                "{}, {}",
                quote_ident("created_at"),
                quote_ident(relation.primary_key)
            ),
            None => quote_ident(relation.primary_key),
        }
    }
}
