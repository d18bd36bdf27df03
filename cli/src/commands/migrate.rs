// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

//! Database schema migration command

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use franchise_core::domain::gateway::PostgresConfig;
use franchise_core::domain::service_config::{ServiceConfig, DATABASE_URL_ENV};
use franchise_core::infrastructure::db::{Database, MIGRATOR};

/// PostgreSQL `undefined_table`
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Args)]
pub struct MigrateCommand {
    /// List pending migrations without applying them
    #[arg(long)]
    dry_run: bool,
}

pub async fn execute(cmd: MigrateCommand, config: &ServiceConfig) -> Result<()> {
    println!("{}", "Franchise inventory schema migration".bold().green());

    let connection_string = config
        .storage
        .database_url
        .clone()
        .with_context(|| {
            format!(
                "No database URL configured. Set storage.database_url or {}.",
                DATABASE_URL_ENV
            )
        })?;

    println!("Connecting to database...");
    let database = Database::new(&PostgresConfig {
        connection_string,
        max_connections: 1,
    })
    .await?;

    let applied_count = applied_migrations(
        sqlx::query("SELECT version FROM _sqlx_migrations")
            .fetch_all(database.get_pool())
            .await
            .map(|rows| rows.len()),
    )?;

    let total_migrations = MIGRATOR.iter().count();

    println!(
        "Migration status: {} applied, {} total available.",
        applied_count, total_migrations
    );

    if applied_count >= total_migrations {
        println!("{}", "✓ Database is up to date.".green());
        return Ok(());
    }

    if cmd.dry_run {
        println!("Pending migrations (dry run):");
        for migration in MIGRATOR.iter().skip(applied_count) {
            println!(" - {} {}", migration.version, migration.description);
        }
        return Ok(());
    }

    println!("Applying pending migrations...");
    database.migrate().await?;
    println!("{}", "✓ Database migrated successfully.".green());

    Ok(())
}

/// The bookkeeping table does not exist before the first run; any other
/// failure is reported.
fn applied_migrations(result: Result<usize, sqlx::Error>) -> Result<usize> {
    match result {
        Ok(count) => Ok(count),
        Err(sqlx::Error::Database(err)) if err.code().as_deref() == Some(UNDEFINED_TABLE) => Ok(0),
        Err(err) => Err(err).context("Failed to read applied migrations"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::fmt;

    #[derive(Debug)]
    struct PgError(&'static str);

    impl fmt::Display for PgError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "postgres error {}", self.0)
        }
    }

    impl std::error::Error for PgError {}

    impl DatabaseError for PgError {
        fn message(&self) -> &str {
            "postgres error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    #[test]
    fn test_missing_bookkeeping_table_means_nothing_applied() {
        let err = sqlx::Error::Database(Box::new(PgError(UNDEFINED_TABLE)));
        assert_eq!(applied_migrations(Err(err)).unwrap(), 0);
        assert_eq!(applied_migrations(Ok(3)).unwrap(), 3);
    }

    #[test]
    fn test_other_query_failures_are_reported() {
        // insufficient_privilege
        let err = sqlx::Error::Database(Box::new(PgError("42501")));
        assert!(applied_migrations(Err(err)).is_err());
        assert!(applied_migrations(Err(sqlx::Error::PoolTimedOut)).is_err());
    }
}
