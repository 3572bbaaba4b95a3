use crate::{Compilable, Compiler, Element};

use datadiff_core::Result;
use std::fmt::Debug;

/// Comma delimited
#[derive(Debug, Clone)]
pub struct Comma<T>(pub Vec<T>);

/// Delimited by an arbitrary separator, such as `" AND "`
#[derive(Debug, Clone)]
pub struct Delimited<T> {
    pub items: Vec<T>,
    pub delimiter: &'static str,
}

impl<T> Delimited<T> {
    pub fn new(items: impl IntoIterator<Item = T>, delimiter: &'static str) -> Delimited<T> {
        Delimited {
            items: items.into_iter().collect(),
            delimiter,
        }
    }
}

impl<T> Compilable for Comma<T>
where
    T: Debug + Send + Sync,
    for<'a> &'a T: Into<Element<'a>>,
{
    fn compile(&self, c: &Compiler) -> Result<String> {
        join(c, &self.0, ", ")
    }
}

impl<T> Compilable for Delimited<T>
where
    T: Debug + Send + Sync,
    for<'a> &'a T: Into<Element<'a>>,
{
    fn compile(&self, c: &Compiler) -> Result<String> {
        join(c, &self.items, self.delimiter)
    }
}

fn join<T>(c: &Compiler, items: &[T], delimiter: &str) -> Result<String>
where
    for<'a> &'a T: Into<Element<'a>>,
{
    let mut sql = String::new();
    let mut s = "";

    for item in items {
        sql.push_str(s);
        sql.push_str(&c.compile_sql(item)?);
        s = delimiter;
    }

    Ok(sql)
}
