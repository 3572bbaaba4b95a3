use super::Value;

/// Result of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// Number of rows impacted by the statement
    Count(u64),

    /// Rows returned by the statement
    Values(Vec<Vec<Value>>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: impl Into<Vec<Vec<Value>>>) -> Self {
        Self {
            rows: Rows::Values(rows.into()),
        }
    }

    pub fn empty_values() -> Self {
        Self::values(Vec::new())
    }

    /// Returns the first column of the first row, if the statement returned
    /// any rows.
    pub fn scalar(&self) -> Option<&Value> {
        match &self.rows {
            Rows::Values(rows) => rows.first().and_then(|row| row.first()),
            Rows::Count(_) => None,
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    #[track_caller]
    pub fn into_count(self) -> u64 {
        match self {
            Rows::Count(count) => count,
            _ => panic!("expected row count; rows={self:#?}"),
        }
    }

    #[track_caller]
    pub fn into_values(self) -> Vec<Vec<Value>> {
        match self {
            Self::Values(values) => values,
            _ => panic!("expected row values; rows={self:#?}"),
        }
    }
}
