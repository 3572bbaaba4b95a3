use crate::{Compilable, Sequence};

use chrono::{DateTime, NaiveDateTime, Utc};
use datadiff_core::ArithString;
use std::{borrow::Cow, ops::Deref, sync::Arc};
use uuid::Uuid;

/// Anything the compiler knows how to turn into SQL.
///
/// The set of kinds is closed. New structured nodes plug in through
/// [`Compilable`] rather than by adding variants.
#[derive(Debug)]
pub enum Element<'a> {
    /// Rendered as `NULL`
    Null,

    /// A structured node that compiles itself
    Node(NodeRef<'a>),

    /// Raw SQL, passed through without escaping
    Text(Cow<'a, str>),

    /// Rendered in canonical decimal form
    Integer(i64),

    /// Rendered by the dialect
    Timestamp(NaiveDateTime),

    /// Rendered as a `b'...'` literal. The bytes must be valid UTF-8.
    Bytes(Cow<'a, [u8]>),

    /// Rendered as a quoted string literal
    ArithString(ArithString),

    /// Statements that must run one at a time on one connection. Compiles to
    /// an interpreter instead of text.
    Sequence(Sequence),
}

/// Handle to a compilable node held by an [`Element`].
#[derive(Debug, Clone)]
pub enum NodeRef<'a> {
    Borrowed(&'a dyn Compilable),
    Shared(Arc<dyn Compilable>),
}

impl<'a> Element<'a> {
    /// Wrap an owned node.
    pub fn node(node: impl Compilable + 'static) -> Element<'a> {
        Element::Node(NodeRef::Shared(Arc::new(node)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Element::Null)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Element::Sequence(_))
    }

    /// Short name of the element's kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Null => "null",
            Element::Node(_) => "node",
            Element::Text(_) => "text",
            Element::Integer(_) => "integer",
            Element::Timestamp(_) => "timestamp",
            Element::Bytes(_) => "bytes",
            Element::ArithString(_) => "arithmetic string",
            Element::Sequence(_) => "lazy sequence",
        }
    }
}

impl<'a> Deref for NodeRef<'a> {
    type Target = dyn Compilable + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            NodeRef::Borrowed(node) => *node,
            NodeRef::Shared(node) => &**node,
        }
    }
}

impl<'a, T: Compilable> From<&'a T> for Element<'a> {
    fn from(value: &'a T) -> Self {
        Element::Node(NodeRef::Borrowed(value))
    }
}

impl<'a> From<NodeRef<'a>> for Element<'a> {
    fn from(value: NodeRef<'a>) -> Self {
        Element::Node(value)
    }
}

impl From<Arc<dyn Compilable>> for Element<'_> {
    fn from(value: Arc<dyn Compilable>) -> Self {
        Element::Node(NodeRef::Shared(value))
    }
}

impl<'a, T: Into<Element<'a>>> From<Option<T>> for Element<'a> {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Element::Null)
    }
}

impl<'a> From<&'a str> for Element<'a> {
    fn from(value: &'a str) -> Self {
        Element::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Element<'a> {
    fn from(value: &'a String) -> Self {
        Element::Text(Cow::Borrowed(value))
    }
}

impl From<String> for Element<'_> {
    fn from(value: String) -> Self {
        Element::Text(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Element<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Element::Text(value)
    }
}

impl From<i64> for Element<'_> {
    fn from(value: i64) -> Self {
        Element::Integer(value)
    }
}

impl From<i32> for Element<'_> {
    fn from(value: i32) -> Self {
        Element::Integer(value.into())
    }
}

impl From<u32> for Element<'_> {
    fn from(value: u32) -> Self {
        Element::Integer(value.into())
    }
}

impl From<NaiveDateTime> for Element<'_> {
    fn from(value: NaiveDateTime) -> Self {
        Element::Timestamp(value)
    }
}

impl From<DateTime<Utc>> for Element<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        Element::Timestamp(value.naive_utc())
    }
}

impl<'a> From<&'a [u8]> for Element<'a> {
    fn from(value: &'a [u8]) -> Self {
        Element::Bytes(Cow::Borrowed(value))
    }
}

impl From<Vec<u8>> for Element<'_> {
    fn from(value: Vec<u8>) -> Self {
        Element::Bytes(Cow::Owned(value))
    }
}

impl From<ArithString> for Element<'_> {
    fn from(value: ArithString) -> Self {
        Element::ArithString(value)
    }
}

impl From<Uuid> for Element<'_> {
    fn from(value: Uuid) -> Self {
        Element::ArithString(value.into())
    }
}

impl From<Sequence> for Element<'_> {
    fn from(value: Sequence) -> Self {
        Element::Sequence(value)
    }
}
