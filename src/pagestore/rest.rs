//! # REST Surface
//!
//! Maps framed HTTP-style requests (method, path, content type, body) onto the
//! [`PageApi`]. There is no socket here: whoever owns the connection hands us a
//! [`Request`] and writes back the [`Response`].
//!
//! ```text
//! POST   /page/              {text, tags, due}  -> {"id": N}
//! GET    /page/                                 -> [Page]
//! PUT    /page/              Page               -> Page
//! DELETE /page/                                 -> text
//! GET    /page/<id>                             -> Page
//! DELETE /page/<id>                             -> text
//! GET    /tag/<tag>                             -> [Page]
//! GET    /due/<year>/<month>/<day>              -> [Page]
//! ```
//!
//! Bodies are decoded strictly: a field the target type does not know is a 400.

use crate::api::{CmdResult, PageApi};
use crate::error::PageError;
use crate::model::{Page, PageId};
use crate::store::DataStore;
use chrono::{DateTime, FixedOffset};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Other(String),
}

impl Method {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            _ => Method::Other(raw.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
            Method::Other(m) => write!(f, "{}", m),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            content_type: None,
            body: None,
        }
    }

    pub fn with_json(mut self, body: impl Into<String>) -> Self {
        self.content_type = Some("application/json".to_string());
        self.body = Some(body.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub status: u16,
    pub body: Body,
}

impl Response {
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Self {
                status,
                body: Body::Json(v),
            },
            Err(e) => Self::text(500, e.to_string()),
        }
    }

    pub fn text(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Body::Text(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateRequest {
    text: String,
    #[serde(default)]
    tags: Vec<String>,
    due: DateTime<FixedOffset>,
}

#[derive(Debug, Serialize)]
struct CreatedResponse {
    id: PageId,
}

pub struct RestSurface<S: DataStore> {
    api: PageApi<S>,
    require_json_content_type: bool,
}

impl<S: DataStore> RestSurface<S> {
    pub fn new(api: PageApi<S>) -> Self {
        Self {
            api,
            require_json_content_type: true,
        }
    }

    pub fn require_json_content_type(mut self, require: bool) -> Self {
        self.require_json_content_type = require;
        self
    }

    pub fn api(&self) -> &PageApi<S> {
        &self.api
    }

    pub fn handle(&self, req: &Request) -> Response {
        info!("handling {} {}", req.method, req.path);
        let response = self.route(req);
        if !response.is_success() {
            warn!("{} {} -> {}", req.method, req.path, response.status);
        }
        response
    }

    fn route(&self, req: &Request) -> Response {
        let path = req.path.split('?').next().unwrap_or_default();
        let parts: Vec<&str> = path.trim_matches('/').split('/').collect();

        match parts.as_slice() {
            ["page"] => self.page_collection(req),
            ["page", id] => match id.parse::<PageId>() {
                Ok(id) => self.page_item(req, id),
                Err(e) => Response::text(400, e.to_string()),
            },
            ["tag", rest @ ..] => self.tag(req, rest),
            ["due", rest @ ..] => self.due(req, path, rest),
            _ => Response::text(404, "404 page not found"),
        }
    }

    fn page_collection(&self, req: &Request) -> Response {
        match req.method {
            Method::Post => self.create_page(req),
            Method::Put => self.update_page(req),
            Method::Get => listing(self.api.get_all_pages()),
            Method::Delete => message(self.api.delete_all_pages()),
            ref other => Response::text(
                405,
                format!(
                    "expect method GET, DELETE, PUT or POST at /page/, got {}",
                    other
                ),
            ),
        }
    }

    fn page_item(&self, req: &Request, id: PageId) -> Response {
        match req.method {
            Method::Get => match self.api.get_page(id) {
                Ok(result) => match result.listed_pages.first() {
                    Some(page) => Response::json(200, page),
                    None => error_response(PageError::NotFound(id)),
                },
                Err(e) => error_response(e),
            },
            Method::Delete => message(self.api.delete_page(id)),
            ref other => Response::text(
                405,
                format!("expect method GET or DELETE at /page/<id>, got {}", other),
            ),
        }
    }

    fn tag(&self, req: &Request, rest: &[&str]) -> Response {
        if req.method != Method::Get {
            return Response::text(
                405,
                format!("expect method GET /tag/<tag>, got {}", req.method),
            );
        }
        match rest {
            [tag] if !tag.is_empty() => listing(self.api.get_pages_by_tag(tag)),
            _ => Response::text(400, "expect /tag/<tag> path"),
        }
    }

    fn due(&self, req: &Request, path: &str, rest: &[&str]) -> Response {
        if req.method != Method::Get {
            return Response::text(
                405,
                format!("expect method GET /due/<date>, got {}", req.method),
            );
        }
        let bad_request = || {
            Response::text(
                400,
                format!("expect /due/<year>/<month>/<day>, got {}", path),
            )
        };

        let [year, month, day] = rest else {
            return bad_request();
        };
        let (Ok(year), Ok(month), Ok(day)) = (
            year.parse::<i32>(),
            month.parse::<u32>(),
            day.parse::<u32>(),
        ) else {
            return bad_request();
        };

        match self.api.get_pages_by_due(year, month, day) {
            Err(PageError::InvalidDate { .. }) => bad_request(),
            other => listing(other),
        }
    }

    fn create_page(&self, req: &Request) -> Response {
        let parsed: CreateRequest = match self.decode(req) {
            Ok(parsed) => parsed,
            Err(response) => return response,
        };
        match self
            .api
            .create_page(&parsed.text, &parsed.tags, parsed.due, &[])
        {
            Ok(CmdResult {
                created_id: Some(id),
                ..
            }) => Response::json(200, &CreatedResponse { id }),
            Ok(_) => Response::text(500, "store did not report a page id"),
            Err(e) => error_response(e),
        }
    }

    fn update_page(&self, req: &Request) -> Response {
        let page: Page = match self.decode(req) {
            Ok(page) => page,
            Err(response) => return response,
        };
        match self.api.update_page(page) {
            Ok(result) => match result.affected_pages.first() {
                Some(updated) => Response::json(200, updated),
                None => Response::text(500, "store did not return the updated page"),
            },
            Err(e) => error_response(e),
        }
    }

    fn decode<T: for<'de> Deserialize<'de>>(&self, req: &Request) -> Result<T, Response> {
        if self.require_json_content_type {
            let media_type = parse_media_type(req.content_type.as_deref().unwrap_or_default())
                .map_err(|e| Response::text(400, e))?;
            if media_type != "application/json" {
                return Err(Response::text(415, "expect application/json Content-Type"));
            }
        }
        let body = req
            .body
            .as_deref()
            .ok_or_else(|| Response::text(400, "missing request body"))?;
        serde_json::from_str(body).map_err(|e| Response::text(400, e.to_string()))
    }
}

/// Extracts the lowercase `type/subtype` from a Content-Type value, dropping parameters.
pub fn parse_media_type(content_type: &str) -> Result<String, String> {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if media_type.is_empty() {
        return Err("mime: no media type".to_string());
    }
    match media_type.split_once('/') {
        Some((kind, sub)) if !kind.is_empty() && !sub.is_empty() && !sub.contains('/') => {
            Ok(media_type)
        }
        _ => Err("mime: expected slash after first token".to_string()),
    }
}

fn listing(result: crate::error::Result<CmdResult>) -> Response {
    match result {
        Ok(result) => Response::json(200, &result.listed_pages),
        Err(e) => error_response(e),
    }
}

fn message(result: crate::error::Result<CmdResult>) -> Response {
    match result {
        Ok(result) => Response::text(200, result.success_text().unwrap_or_default()),
        Err(e) => error_response(e),
    }
}

fn error_response(err: PageError) -> Response {
    let status = match err {
        PageError::NotFound(_) => 404,
        PageError::InvalidDate { .. } | PageError::Serialization(_) | PageError::Api(_) => 400,
        PageError::Io(_) | PageError::Config(_) => 500,
    };
    Response::text(status, err.to_string())
}
