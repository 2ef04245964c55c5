//! Database-specific syntax for literals in pushed-down `WHERE` clauses.

use serde::{Deserialize, Serialize};
use std::fmt;

pub trait Dialect: Send + Sync {
    /// Renders a `DATE` literal.
    ///
    /// - PostgreSQL uses a typed literal: `date'2018-01-01'`
    /// - MySQL calls a function: `DATE('2018-01-01')`
    fn wrap_date(&self, value: &str) -> String;

    /// Renders a `TIMESTAMP` literal.
    fn wrap_timestamp(&self, value: &str) -> String {
        format!("'{value}'")
    }

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn wrap_date(&self, value: &str) -> String {
        format!("date'{value}'")
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn wrap_date(&self, value: &str) -> String {
        format!("DATE('{value}')")
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}

#[derive(Debug, Clone)]
pub struct Oracle;

impl Dialect for Oracle {
    fn wrap_date(&self, value: &str) -> String {
        format!("to_date('{value}', 'YYYY-MM-DD')")
    }

    fn wrap_timestamp(&self, value: &str) -> String {
        format!("to_timestamp('{value}', 'YYYY-MM-DD HH:MI:SS.FF')")
    }

    fn name(&self) -> String {
        "Oracle".into()
    }
}

#[derive(Debug, Clone)]
pub struct MsSql;

impl Dialect for MsSql {
    fn wrap_date(&self, value: &str) -> String {
        format!("'{value}'")
    }

    fn name(&self) -> String {
        "Microsoft SQL Server".into()
    }
}

/// ANSI syntax for any other product.
#[derive(Debug, Clone)]
pub struct Generic;

impl Dialect for Generic {
    fn wrap_date(&self, value: &str) -> String {
        format!("date'{value}'")
    }

    fn name(&self) -> String {
        "Generic".into()
    }
}

/// The database product behind a JDBC-style connector, as named in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbProduct {
    Postgres,
    MySql,
    Oracle,
    MsSql,
    #[default]
    Other,
}

impl DbProduct {
    pub fn dialect(&self) -> Box<dyn Dialect> {
        match self {
            DbProduct::Postgres => Box::new(Postgres),
            DbProduct::MySql => Box::new(MySql),
            DbProduct::Oracle => Box::new(Oracle),
            DbProduct::MsSql => Box::new(MsSql),
            DbProduct::Other => Box::new(Generic),
        }
    }

    /// Guesses the product from a JDBC driver class or database name.
    pub fn detect(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.contains("postgres") {
            DbProduct::Postgres
        } else if name.contains("mysql") || name.contains("mariadb") {
            DbProduct::MySql
        } else if name.contains("oracle") {
            DbProduct::Oracle
        } else if name.contains("microsoft") || name.contains("sqlserver") {
            DbProduct::MsSql
        } else {
            DbProduct::Other
        }
    }
}

impl fmt::Display for DbProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
