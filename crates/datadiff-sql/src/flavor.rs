use crate::{Compiler, Config};

use chrono::NaiveDateTime;
use datadiff_core::{Dialect, Result};
use std::sync::Arc;

/// Microsecond precision, accepted by all supported databases.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Built-in dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
}

impl Flavor {
    pub fn is_postgresql(self) -> bool {
        matches!(self, Flavor::Postgresql)
    }

    pub fn is_sqlite(self) -> bool {
        matches!(self, Flavor::Sqlite)
    }

    pub fn is_mysql(self) -> bool {
        matches!(self, Flavor::Mysql)
    }

    fn quote_char(self) -> char {
        match self {
            Flavor::Postgresql | Flavor::Sqlite => '"',
            Flavor::Mysql => '`',
        }
    }
}

impl Dialect for Flavor {
    fn name(&self) -> &str {
        match self {
            Flavor::Postgresql => "postgresql",
            Flavor::Sqlite => "sqlite",
            Flavor::Mysql => "mysql",
        }
    }

    fn quote(&self, ident: &str) -> String {
        let q = self.quote_char();
        let mut quoted = String::with_capacity(ident.len() + 2);

        quoted.push(q);
        for c in ident.chars() {
            // Embedded quote characters are escaped by doubling them
            if c == q {
                quoted.push(q);
            }
            quoted.push(c);
        }
        quoted.push(q);

        quoted
    }

    fn render_timestamp(&self, value: &NaiveDateTime) -> Result<String> {
        let ts = value.format(TIMESTAMP_FORMAT);

        Ok(match self {
            Flavor::Postgresql => format!("'{ts}'::timestamp"),
            Flavor::Sqlite => format!("'{ts}'"),
            Flavor::Mysql => format!("TIMESTAMP('{ts}')"),
        })
    }
}

impl Compiler {
    pub fn sqlite() -> Compiler {
        Compiler::new(Flavor::Sqlite)
    }

    pub fn postgresql() -> Compiler {
        Compiler::new(Flavor::Postgresql)
    }

    pub fn mysql() -> Compiler {
        Compiler::new(Flavor::Mysql)
    }

    pub fn for_flavor(flavor: Flavor, config: Config) -> Compiler {
        Compiler::with_config(Arc::new(flavor), config)
    }
}
