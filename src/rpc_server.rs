//! Treemark RPC Server: JSON requests over stdin/stdout for a UI host.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"tree.move", "params":{"source_id":"...","target_id":"...","position":"inside"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr; `TREEMARK_LOG` selects the level (default `info`).
//! `TREEMARK_CONFIG` overrides the settings file path.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use log::LevelFilter;
use serde_json::{json, Value};
use simplelog::{ConfigBuilder, WriteLogger};

use treemark::app::App;
use treemark::rpc_handler::handle_method;

fn init_logging() {
    let level = match std::env::var("TREEMARK_LOG").as_deref() {
        Ok("error") => LevelFilter::Error,
        Ok("warn") => LevelFilter::Warn,
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        Ok("off") => LevelFilter::Off,
        _ => LevelFilter::Info,
    };
    let config = ConfigBuilder::new().set_target_level(LevelFilter::Error).build();
    if let Err(e) = WriteLogger::init(level, config, io::stderr()) {
        eprintln!("[treemark] logger setup failed: {}", e);
    }
}

fn respond(out: &mut impl Write, response: &Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn main() -> io::Result<()> {
    init_logging();

    let app = match App::new(std::env::var("TREEMARK_CONFIG").ok()) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            log::error!("failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    respond(
        &mut out,
        &json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}),
    )?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::warn!("stdin closed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(&mut out, &json!({"id":null,"error":format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));
        log::debug!("-> {} {}", method, id);

        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                log::debug!("<- {} failed: {}", method, err);
                json!({"id": id, "error": err})
            }
        };
        respond(&mut out, &response)?;
    }
    Ok(())
}
