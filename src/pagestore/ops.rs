//! # Named-Operation Surface
//!
//! The GraphQL flavour of the page API without a query language: a request names
//! one operation and carries its variables, and the reply has the familiar
//! `{"data": ..., "errors": [...]}` shape.
//!
//! ```json
//! {"op": "createPage", "variables": {"input": {"text": "t", "due": "2024-03-15T10:00:00Z"}}}
//! {"data": {"createPage": {"id": 0, "text": "t", "tags": [], "due": "2024-03-15T10:00:00+00:00"}}}
//! ```
//!
//! Operations: `createPage`, `getPage`, `getAllPages`, `getPagesByTag`,
//! `getPagesByDue`, `updatePage`, `deletePage`, `deleteAllPages`.
//! Variables are decoded strictly, like request bodies on the REST surface.

use crate::api::PageApi;
use crate::error::{PageError, Result};
use crate::model::{NewPage, Page, PageId};
use crate::store::DataStore;
use chrono::{DateTime, FixedOffset};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpRequest {
    pub op: String,
    #[serde(default)]
    pub variables: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    CreatePage(NewPage),
    GetPage(PageId),
    GetAllPages,
    GetPagesByTag(String),
    GetPagesByDue(DateTime<FixedOffset>),
    UpdatePage(Page),
    DeletePage(PageId),
    DeleteAllPages,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InputVars {
    input: NewPage,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct IdVars {
    id: PageId,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TagVars {
    tag: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DueVars {
    due: DateTime<FixedOffset>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PageVars {
    page: Page,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NoVars {}

impl Operation {
    pub fn from_request(req: OpRequest) -> Result<Self> {
        let vars = req.variables.unwrap_or_else(|| Value::Object(Map::new()));
        let op = match req.op.as_str() {
            "createPage" => Operation::CreatePage(decode::<InputVars>(vars)?.input),
            "getPage" => Operation::GetPage(decode::<IdVars>(vars)?.id),
            "getAllPages" => {
                decode::<NoVars>(vars)?;
                Operation::GetAllPages
            }
            "getPagesByTag" => Operation::GetPagesByTag(decode::<TagVars>(vars)?.tag),
            "getPagesByDue" => Operation::GetPagesByDue(decode::<DueVars>(vars)?.due),
            "updatePage" => Operation::UpdatePage(decode::<PageVars>(vars)?.page),
            "deletePage" => Operation::DeletePage(decode::<IdVars>(vars)?.id),
            "deleteAllPages" => {
                decode::<NoVars>(vars)?;
                Operation::DeleteAllPages
            }
            other => return Err(PageError::Api(format!("unknown operation \"{}\"", other))),
        };
        Ok(op)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreatePage(_) => "createPage",
            Operation::GetPage(_) => "getPage",
            Operation::GetAllPages => "getAllPages",
            Operation::GetPagesByTag(_) => "getPagesByTag",
            Operation::GetPagesByDue(_) => "getPagesByDue",
            Operation::UpdatePage(_) => "updatePage",
            Operation::DeletePage(_) => "deletePage",
            Operation::DeleteAllPages => "deleteAllPages",
        }
    }
}

fn decode<T: DeserializeOwned>(vars: Value) -> Result<T> {
    Ok(serde_json::from_value(vars)?)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpResponse {
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<OpError>,
}

impl OpResponse {
    fn ok(name: &str, value: Value) -> Self {
        let mut data = Map::new();
        data.insert(name.to_string(), value);
        Self {
            data: Some(Value::Object(data)),
            errors: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, path: Option<&str>) -> Self {
        Self {
            data: None,
            errors: vec![OpError {
                message: message.into(),
                path: path.map(|p| vec![p.to_string()]).unwrap_or_default(),
            }],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct OpsSurface<S: DataStore> {
    api: PageApi<S>,
}

impl<S: DataStore> OpsSurface<S> {
    pub fn new(api: PageApi<S>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &PageApi<S> {
        &self.api
    }

    /// Decodes and runs a request; malformed variables become an error reply.
    pub fn handle_request(&self, req: OpRequest) -> OpResponse {
        let name = req.op.clone();
        match Operation::from_request(req) {
            Ok(op) => self.handle(op),
            Err(e) => {
                warn!("rejected operation {}: {}", name, e);
                OpResponse::error(e.to_string(), Some(name.as_str()))
            }
        }
    }

    pub fn handle(&self, op: Operation) -> OpResponse {
        let name = op.name();
        info!("handling operation {}", name);
        match self.execute(op) {
            Ok(value) => OpResponse::ok(name, value),
            Err(e) => {
                warn!("operation {} failed: {}", name, e);
                OpResponse::error(e.to_string(), Some(name))
            }
        }
    }

    fn execute(&self, op: Operation) -> Result<Value> {
        let value = match op {
            Operation::CreatePage(input) => {
                let created = self.api.create_page(
                    &input.text,
                    &input.tags,
                    input.due,
                    &input.attachments,
                )?;
                let id = created
                    .created_id
                    .ok_or_else(|| PageError::Api("store did not report a page id".into()))?;
                single(self.api.get_page(id)?.listed_pages, id)?
            }
            Operation::GetPage(id) => single(self.api.get_page(id)?.listed_pages, id)?,
            Operation::GetAllPages => serde_json::to_value(self.api.get_all_pages()?.listed_pages)?,
            Operation::GetPagesByTag(tag) => {
                serde_json::to_value(self.api.get_pages_by_tag(&tag)?.listed_pages)?
            }
            Operation::GetPagesByDue(due) => {
                serde_json::to_value(self.api.get_pages_by_due_time(&due)?.listed_pages)?
            }
            Operation::UpdatePage(page) => {
                let id = page.id;
                single(self.api.update_page(page)?.affected_pages, id)?
            }
            Operation::DeletePage(id) => {
                self.api.delete_page(id)?;
                Value::Bool(true)
            }
            Operation::DeleteAllPages => {
                self.api.delete_all_pages()?;
                Value::Bool(true)
            }
        };
        Ok(value)
    }
}

fn single(pages: Vec<Page>, id: PageId) -> Result<Value> {
    let page = pages.into_iter().next().ok_or(PageError::NotFound(id))?;
    Ok(serde_json::to_value(page)?)
}
