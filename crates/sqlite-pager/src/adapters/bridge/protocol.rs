use serde::{Deserialize, Serialize};

use sqlite_pager::{DbRow, FetchMode, PageInfo};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BridgeRequest {
    pub v: u32,
    pub id: String,
    pub cmd: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct BridgeResponse<T> {
    pub v: u32,
    pub id: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl<T> BridgeResponse<T> {
    pub fn ok(v: u32, id: String, data: T) -> Self {
        Self {
            v,
            id,
            status: "ok",
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn err(v: u32, id: String, code: &'static str, error: String) -> Self {
        Self {
            v,
            id,
            status: "error",
            data: None,
            error: Some(error),
            code: Some(code),
        }
    }
}

// Payloads

#[derive(Debug, Deserialize)]
pub struct ConnectPayload {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct CountPayload {
    pub sql: String,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PagePayload {
    pub sql: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub from: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    /// Skips the COUNT(*) query when the caller already knows the total.
    #[serde(default)]
    pub numrows: Option<usize>,
    #[serde(default)]
    pub mode: FetchMode,
}

/// `page` is null when the query has no rows.
#[derive(Debug, Serialize)]
pub struct PageResult {
    pub page: Option<PageInfo>,
    pub columns: Vec<String>,
    pub rows: Vec<DbRow>,
}
