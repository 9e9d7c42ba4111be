use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use rusqlite::Connection;
use serde::de::DeserializeOwned;

use sqlite_pager::{
    core::{limits::effective_limit, sqlite::open_conn},
    AppError, AppResult, Pager, RowSource, SqliteRows,
};

use crate::cli::Args;

use super::protocol::*;

pub struct BridgeHandler {
    args: Args,
    conns: HashMap<PathBuf, Connection>,
    active_db: Option<PathBuf>,
}

impl BridgeHandler {
    pub fn new(args: Args) -> Self {
        let active_db = args.db.clone();
        Self {
            args,
            conns: HashMap::new(),
            active_db,
        }
    }

    pub fn handle(&mut self, req: BridgeRequest) -> BridgeResponse<serde_json::Value> {
        if req.v != 1 {
            return BridgeResponse::err(
                req.v,
                req.id,
                "INVALID_REQUEST",
                format!("unsupported protocol version: {}", req.v),
            );
        }

        let res = match req.cmd.as_str() {
            "connect" => self.handle_connect(&req),
            "count" => self.handle_count(&req),
            "page" => self.handle_page(&req),
            other => Err(AppError::InvalidRequest(format!("unknown cmd: {other}"))),
        };

        match res {
            Ok(data) => BridgeResponse::ok(req.v, req.id, data),
            Err(e) => {
                tracing::debug!(cmd = %req.cmd, error = %e, "request failed");
                BridgeResponse::err(req.v, req.id, e.code(), e.to_string())
            }
        }
    }

    fn handle_connect(&mut self, req: &BridgeRequest) -> AppResult<serde_json::Value> {
        let p: ConnectPayload = payload(req)?;
        let path = PathBuf::from(p.path);
        self.ensure_conn(&path)?;
        self.active_db = Some(path);
        Ok(serde_json::Value::Bool(true))
    }

    fn handle_count(&mut self, req: &BridgeRequest) -> AppResult<serde_json::Value> {
        let p: CountPayload = payload(req)?;
        let db_path = self.resolve_db_path(p.path)?;
        let conn = self.ensure_conn(&db_path)?;
        let n = SqliteRows::new(conn, &p.sql)?.row_count()?;
        Ok(serde_json::Value::from(n))
    }

    fn handle_page(&mut self, req: &BridgeRequest) -> AppResult<serde_json::Value> {
        let p: PagePayload = payload(req)?;
        let limit = effective_limit(p.limit, self.args.page_size, self.args.max_rows)?.page_size;
        let db_path = self.resolve_db_path(p.path)?;
        let conn = self.ensure_conn(&db_path)?;

        let mut source = SqliteRows::new(conn, &p.sql)?.with_window(limit);
        let columns = source.columns().to_vec();
        let result = match Pager::new(&mut source, p.from, limit, p.numrows) {
            Ok(mut pager) => {
                let rows = pager.rows(p.mode).collect::<AppResult<Vec<_>>>()?;
                PageResult {
                    page: Some(pager.page_info().clone()),
                    columns,
                    rows,
                }
            }
            Err(AppError::NoData) => PageResult {
                page: None,
                columns,
                rows: Vec::new(),
            },
            Err(e) => return Err(e),
        };
        Ok(serde_json::to_value(result)?)
    }

    fn ensure_conn(&mut self, path: &Path) -> AppResult<&Connection> {
        if !self.conns.contains_key(path) {
            let conn = open_conn(path, self.args.busy_timeout_ms)?;
            tracing::info!(path = %path.display(), "opened database");
            self.conns.insert(path.to_path_buf(), conn);
        }
        self.conns
            .get(path)
            .ok_or_else(|| AppError::Internal("connection cache miss".into()))
    }

    fn resolve_db_path(&self, payload_path: Option<String>) -> AppResult<PathBuf> {
        if let Some(p) = payload_path {
            return Ok(PathBuf::from(p));
        }
        self.active_db
            .clone()
            .ok_or_else(|| AppError::InvalidRequest("no active db; call connect first or pass path".into()))
    }
}

fn payload<T: DeserializeOwned>(req: &BridgeRequest) -> AppResult<T> {
    T::deserialize(&req.payload).map_err(|e| AppError::InvalidRequest(e.to_string()))
}
