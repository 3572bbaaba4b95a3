use crate::{Compilable, Compiler, Element};

use datadiff_core::Result;
use std::sync::Arc;

/// A subquery compiled once into the `WITH` preamble and referenced by name.
///
/// Compiling a `Cte` registers its query with the compiler and returns only
/// the name. Without an explicit name a unique one is generated from the
/// configured prefix each time it is compiled.
#[derive(Debug, Clone)]
pub struct Cte {
    query: Query,
    name: Option<String>,
}

#[derive(Debug, Clone)]
enum Query {
    Node(Arc<dyn Compilable>),
    Sql(String),
}

impl Cte {
    pub fn new(query: impl Compilable + 'static) -> Cte {
        Cte {
            query: Query::Node(Arc::new(query)),
            name: None,
        }
    }

    /// A subquery given as already escaped SQL.
    pub fn sql(query: impl Into<String>) -> Cte {
        Cte {
            query: Query::Sql(query.into()),
            name: None,
        }
    }

    /// Register under `name` instead of a generated name.
    pub fn named(mut self, name: impl Into<String>) -> Cte {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Compilable for Cte {
    fn compile(&self, c: &Compiler) -> Result<String> {
        let query = match &self.query {
            Query::Node(node) => Element::from(node.clone()),
            Query::Sql(sql) => Element::from(sql.as_str()),
        };

        match &self.name {
            Some(name) => c.hoist_as(name, query),
            None => c.hoist(query),
        }
    }
}
