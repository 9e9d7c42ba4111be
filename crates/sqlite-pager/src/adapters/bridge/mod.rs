mod handler;
mod io;
mod protocol;

use sqlite_pager::{AppError, AppResult};

use crate::cli::Args;

use handler::BridgeHandler;
use io::NdjsonIo;
use protocol::BridgeRequest;

/// Serves NDJSON requests on stdin until EOF, one response line per request.
pub fn run(args: Args) -> AppResult<()> {
    let mut io = NdjsonIo::stdio();
    let mut handler = BridgeHandler::new(args);

    loop {
        let Some(line) = io.read_line()? else { break };
        if line.is_empty() {
            continue;
        }

        let req: BridgeRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                // no id to echo back
                let _ = io.write_error(&AppError::InvalidRequest(e.to_string()));
                continue;
            }
        };

        let resp = handler.handle(req);
        io.write_json_line(&resp)?;
    }

    Ok(())
}
