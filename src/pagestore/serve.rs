//! Newline-delimited JSON request loop.
//!
//! Each non-blank input line is one request for the chosen surface; each request
//! produces exactly one output line (or one pretty-printed block). A line that
//! cannot be decoded gets an error reply and the loop keeps going. Only I/O
//! failures on the streams themselves end the loop early.
//!
//! REST lines look like
//! `{"method": "POST", "path": "/page/", "content_type": "application/json", "body": {...}}`
//! where `body` may also be a raw string. Ops lines are [`OpRequest`]s.

use crate::error::Result;
use crate::ops::{OpRequest, OpResponse, OpsSurface};
use crate::rest::{Method, Request, Response, RestSurface};
use crate::store::DataStore;
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::io::{BufRead, Write};

/// The reply to one input line.
pub struct Reply {
    pub value: Value,
    pub ok: bool,
}

pub trait LineHandler {
    fn handle_line(&self, line: &str) -> Reply;

    /// Reply for a line that never reached the decoder, e.g. invalid UTF-8.
    fn reject_line(&self, reason: &str) -> Reply;
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RestEnvelope {
    method: String,
    path: String,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    body: Option<Value>,
}

impl RestEnvelope {
    /// A string body is passed through untouched so malformed JSON can be sent on purpose.
    fn into_request(self) -> Request {
        let body = self.body.map(|b| match b {
            Value::String(raw) => raw,
            other => other.to_string(),
        });
        Request {
            method: Method::parse(&self.method),
            path: self.path,
            content_type: self.content_type,
            body,
        }
    }
}

impl<S: DataStore> LineHandler for RestSurface<S> {
    fn handle_line(&self, line: &str) -> Reply {
        let response = match serde_json::from_str::<RestEnvelope>(line) {
            Ok(envelope) => self.handle(&envelope.into_request()),
            Err(e) => Response::text(400, format!("invalid request: {}", e)),
        };
        Reply {
            ok: response.is_success(),
            value: to_value(&response),
        }
    }

    fn reject_line(&self, reason: &str) -> Reply {
        let response = Response::text(400, format!("invalid request: {}", reason));
        Reply {
            ok: false,
            value: to_value(&response),
        }
    }
}

impl<S: DataStore> LineHandler for OpsSurface<S> {
    fn handle_line(&self, line: &str) -> Reply {
        let response = match serde_json::from_str::<OpRequest>(line) {
            Ok(req) => self.handle_request(req),
            Err(e) => OpResponse::error(format!("invalid request: {}", e), None),
        };
        Reply {
            ok: response.is_ok(),
            value: to_value(&response),
        }
    }

    fn reject_line(&self, reason: &str) -> Reply {
        let response = OpResponse::error(format!("invalid request: {}", reason), None);
        Reply {
            ok: false,
            value: to_value(&response),
        }
    }
}

fn to_value<T: serde::Serialize>(reply: &T) -> Value {
    serde_json::to_value(reply).unwrap_or_else(|e| Value::String(e.to_string()))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServeStats {
    pub requests: usize,
    pub failures: usize,
}

pub fn run<H, R, W>(handler: &H, reader: R, writer: &mut W, pretty: bool) -> Result<ServeStats>
where
    H: LineHandler,
    R: BufRead,
    W: Write,
{
    let mut stats = ServeStats::default();

    for line in reader.split(b'\n') {
        let line = line?;
        let reply = match std::str::from_utf8(&line) {
            Ok(text) => {
                let raw = text.trim();
                if raw.is_empty() {
                    continue;
                }
                debug!("request line: {}", raw);
                handler.handle_line(raw)
            }
            Err(e) => {
                warn!("undecodable request line: {}", e);
                handler.reject_line(&e.to_string())
            }
        };
        stats.requests += 1;
        if !reply.ok {
            stats.failures += 1;
        }

        let out = if pretty {
            serde_json::to_string_pretty(&reply.value)?
        } else {
            serde_json::to_string(&reply.value)?
        };
        writeln!(writer, "{}", out)?;
        writer.flush()?;
    }

    info!(
        "served {} requests ({} failed)",
        stats.requests, stats.failures
    );
    Ok(stats)
}
