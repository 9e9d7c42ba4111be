use serde::{Deserialize, Serialize};

/// Shape of a fetched row. Passed to the row source untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    #[default]
    Default,
    /// Positional values.
    Ordered,
    /// Values keyed by column name.
    Assoc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DbRow {
    Ordered(Vec<serde_json::Value>),
    Assoc(serde_json::Map<String, serde_json::Value>),
}

impl Default for DbRow {
    fn default() -> Self {
        DbRow::Ordered(Vec::new())
    }
}

#[derive(Debug, Clone)]
pub struct Limits {
    pub page_size: usize,
}
