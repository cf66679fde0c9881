// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Wraps the cargo invocations CI runs so they can be reproduced locally.
//!
//! ### Migration Verification
//!
//! `cargo xtask verify-migrations` checks the embedded `SQLite` migrations of
//! `hopdong-persistence` without any external service:
//!
//! - Applies every migration to an in-memory database with foreign keys on
//! - Checks that each contract record table references `hop_dong`
//! - Checks that the reference tables are seeded
//! - Reverts every migration and requires an empty database
//! - Re-applies and requires the same schema as the first pass

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::{BTreeMap, BTreeSet};
use std::{fmt::Debug, io, process::Output};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Tables owned by a contract; each must carry a foreign key to `hop_dong`.
const CONTRACT_RECORD_TABLES: [&str; 6] = [
    "thanh_toan",
    "thiet_bi",
    "buoc_thuc_hien",
    "file_hop_dong",
    "tiep_nhan",
    "cap_von",
];

/// Reference tables the first migration seeds, with their expected row count.
const SEEDED_TABLES: [(&str, i64); 3] = [
    ("loai_tien", 5),
    ("loai_hop_dong", 3),
    ("trang_thai_hop_dong", 3),
];

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Lint, check dependencies, build, test and verify the migrations
    CI,

    /// Build every target
    #[command(visible_alias = "b")]
    Build,

    /// Type-check every target
    #[command(visible_alias = "c")]
    Check,

    /// Report unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Run clippy, rustdoc, rustfmt and typos checks
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy with warnings denied
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build the docs with warnings denied
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check formatting
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check spelling
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Reformat the workspace
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run every test, doc tests included
    #[command(visible_alias = "t")]
    Test,

    /// Apply, revert and re-apply the `SQLite` migrations and compare schemas
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => run_cargo(&["build", "--all-targets", "--all-features"]),
            Self::Check => run_cargo(&["check", "--all-targets", "--all-features"]),
            Self::Machete => machete(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => run_cargo(&["fmt", "--all", "--check"]),
            Self::LintTypos => lint_typos(),
            Self::FixFormatting => run_cargo(&["fmt", "--all"]),
            Self::Test => test(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    machete()?;
    run_cargo(&["build", "--all-targets", "--all-features"])?;
    test()?;
    verify_migrations()
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    run_cargo(&["fmt", "--all", "--check"])?;
    lint_typos()
}

fn lint_clippy() -> Result<()> {
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

fn lint_docs() -> Result<()> {
    cmd!("cargo", "doc", "--workspace", "--no-deps", "--all-features")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run_with_trace()?;
    Ok(())
}

/// Spelling check using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

fn test() -> Result<()> {
    run_cargo(&["test", "--all-targets", "--all-features"])?;
    // doc tests last; they are slow
    run_cargo(&["test", "--doc", "--all-features"])
}

fn run_cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Verify that the migrations apply, revert cleanly and re-apply to the
/// same schema.
///
/// ## Failures
///
/// The command fails if:
/// - Any migration fails to apply or revert
/// - A contract record table has no foreign key to `hop_dong`
/// - A seeded reference table has the wrong number of rows
/// - Reverting leaves a table behind
/// - The re-applied schema differs from the first pass
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Starting migration round-trip verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    let first = read_schema(&mut conn)?;
    tracing::info!(tables = first.len(), "Migrations applied");

    check_contract_foreign_keys(&first)?;
    check_seeded_tables(&mut conn)?;

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert migrations: {e}"))?;
    let leftover: Vec<String> = read_schema(&mut conn)?.into_keys().collect();
    if !leftover.is_empty() {
        return Err(eyre!("❌ Migration check FAILED: tables left after revert: {leftover:?}"));
    }
    tracing::info!("Migrations reverted");

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to re-apply migrations: {e}"))?;
    let second = read_schema(&mut conn)?;
    compare_schemas(&first, &second)?;

    tracing::info!(tables = first.len(), "✓ Migration round-trip verification passed");
    Ok(())
}

fn check_contract_foreign_keys(schema: &Schema) -> Result<()> {
    let contract_key = ForeignKey {
        from_column: String::from("hop_dong_id"),
        to_table: String::from("hop_dong"),
        to_column: String::from("id"),
    };
    for name in CONTRACT_RECORD_TABLES {
        let table = schema
            .get(name)
            .ok_or_else(|| eyre!("❌ Migration check FAILED: table '{name}' is missing"))?;
        if !table.foreign_keys.contains(&contract_key) {
            return Err(eyre!(
                "❌ Migration check FAILED: table '{name}' has no foreign key to hop_dong(id)"
            ));
        }
    }
    Ok(())
}

fn check_seeded_tables(conn: &mut SqliteConnection) -> Result<()> {
    #[derive(QueryableByName)]
    struct RowCount {
        #[diesel(sql_type = BigInt)]
        count: i64,
    }

    for (name, expected) in SEEDED_TABLES {
        let row: RowCount = diesel::sql_query(format!("SELECT COUNT(*) AS count FROM {name}"))
            .get_result(conn)
            .wrap_err_with(|| format!("Failed to count rows of {name}"))?;
        if row.count != expected {
            return Err(eyre!(
                "❌ Migration check FAILED: '{name}' seeded with {} rows, expected {expected}",
                row.count
            ));
        }
    }
    Ok(())
}

/// Every user table by name.
type Schema = BTreeMap<String, Table>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Table {
    /// Column name to (storage class, nullable).
    columns: BTreeMap<String, (String, bool)>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    /// Column lists of UNIQUE constraints.
    unique: BTreeSet<Vec<String>>,
    /// Explicit indexes by name.
    indexes: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

fn read_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct Name {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let names: Vec<Name> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' \
         AND name != '__diesel_schema_migrations' ORDER BY name",
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    let mut schema = Schema::new();
    for Name { name } in names {
        let table = read_table(conn, &name)?;
        schema.insert(name, table);
    }
    Ok(schema)
}

fn read_table(conn: &mut SqliteConnection, name: &str) -> Result<Table> {
    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumn {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut table = Table::default();

    let columns: Vec<ColumnInfo> = diesel::sql_query(format!("PRAGMA table_info({name})"))
        .load(conn)
        .wrap_err_with(|| format!("Failed to get columns for table {name}"))?;
    for column in columns {
        if column.pk > 0 {
            table.primary_keys.insert(column.name.clone());
        }
        let class = storage_class(&column.r#type).to_string();
        table.columns.insert(column.name, (class, column.notnull == 0));
    }

    let keys: Vec<ForeignKeyInfo> = diesel::sql_query(format!("PRAGMA foreign_key_list({name})"))
        .load(conn)
        .wrap_err_with(|| format!("Failed to get foreign keys for table {name}"))?;
    table.foreign_keys = keys
        .into_iter()
        .map(|key| ForeignKey {
            from_column: key.from,
            to_table: key.table,
            to_column: key.to,
        })
        .collect();

    let indexes: Vec<IndexInfo> = diesel::sql_query(format!("PRAGMA index_list({name})"))
        .load(conn)
        .wrap_err_with(|| format!("Failed to get indexes for table {name}"))?;
    for index in indexes {
        let columns: Vec<IndexColumn> =
            diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to get index columns for {}", index.name))?;
        let columns: Vec<String> = columns.into_iter().map(|c| c.name).collect();

        // origin 'u' covers UNIQUE columns, including sqlite_autoindex_*
        if index.origin == "u" {
            table.unique.insert(columns);
        } else if !index.name.starts_with("sqlite_autoindex_") {
            table.indexes.insert(index.name, columns);
        }
    }

    Ok(table)
}

/// The storage class `SQLite` assigns a declared column type.
fn storage_class(declared: &str) -> &'static str {
    let declared = declared.to_uppercase();
    let has = |fragment: &str| declared.contains(fragment);
    if has("INT") {
        "integer"
    } else if has("CHAR") || has("CLOB") || has("TEXT") {
        "text"
    } else if has("BLOB") || declared.is_empty() {
        "blob"
    } else if has("REAL") || has("FLOA") || has("DOUB") {
        "real"
    } else {
        "numeric"
    }
}

/// Fails on the first difference between the first-pass and re-applied schema.
fn compare_schemas(first: &Schema, second: &Schema) -> Result<()> {
    let first_names: BTreeSet<&String> = first.keys().collect();
    let second_names: BTreeSet<&String> = second.keys().collect();
    ensure_same("Table list", "schema", &first_names, &second_names)?;

    for (name, before) in first {
        let after = &second[name];
        ensure_same("Column", name, &before.columns, &after.columns)?;
        ensure_same("Primary key", name, &before.primary_keys, &after.primary_keys)?;
        ensure_same("Foreign key", name, &before.foreign_keys, &after.foreign_keys)?;
        ensure_same("Unique constraint", name, &before.unique, &after.unique)?;
        ensure_same("Index", name, &before.indexes, &after.indexes)?;
    }
    Ok(())
}

fn ensure_same<T>(part: &str, table: &str, first: &T, second: &T) -> Result<()>
where
    T: PartialEq + Debug,
{
    if first == second {
        return Ok(());
    }
    Err(eyre!(
        "❌ Migration check FAILED: {part} mismatch in '{table}'\n  first: {first:?}\n  second: {second:?}"
    ))
}

/// Logs a `duct::Expression` before running it.
trait ExpressionExt {
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // repeated since the command line may have scrolled away
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
