use serde::Deserialize;

/// Configuration for a compilation session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix used for generated names when the caller does not pick one
    pub unique_prefix: String,

    /// How hoisted subqueries are laid out in the `WITH` preamble
    pub cte_layout: CteLayout,

    /// Number of statements a sequence may queue ahead of its interpreter
    pub channel_capacity: usize,
}

/// Layout of the `WITH` preamble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CteLayout {
    /// One subquery per line, body on its own line
    #[default]
    Multiline,

    /// Everything on a single line
    Inline,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unique_prefix: "tmp".to_string(),
            cte_layout: CteLayout::Multiline,
            channel_capacity: 1,
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix for generated names
    pub fn unique_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.unique_prefix = prefix.into();
        self
    }

    /// Set the `WITH` preamble layout
    pub fn cte_layout(mut self, layout: CteLayout) -> Self {
        self.cte_layout = layout;
        self
    }

    /// Set the interpreter channel capacity. Zero is treated as one.
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub(crate) fn effective_channel_capacity(&self) -> usize {
        self.channel_capacity.max(1)
    }
}
