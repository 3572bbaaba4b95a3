use crate::{Compilable, Compiler};

use datadiff_core::Result;
use std::fmt;

/// A possibly schema-qualified identifier, such as `public.ratings`.
///
/// Each part is quoted by the dialect when compiled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(pub Vec<String>);

impl Name {
    pub fn new(parts: impl IntoIterator<Item = impl Into<String>>) -> Name {
        Name(parts.into_iter().map(Into::into).collect())
    }

    /// The unqualified part of the name.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn is_qualified(&self) -> bool {
        self.0.len() > 1
    }
}

impl Compilable for Name {
    fn compile(&self, c: &Compiler) -> Result<String> {
        let mut sql = String::new();
        let mut s = "";

        for ident in &self.0 {
            sql.push_str(s);
            sql.push_str(&c.quote(ident));
            s = ".";
        }

        Ok(sql)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self(vec![value.into()])
    }
}

impl From<&String> for Name {
    fn from(value: &String) -> Self {
        Self::from(&value[..])
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl<const N: usize> From<[&str; N]> for Name {
    fn from(value: [&str; N]) -> Self {
        Name::new(value)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for ident in &self.0 {
            write!(f, "{s}{ident}")?;
            s = ".";
        }

        Ok(())
    }
}
