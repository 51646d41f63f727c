use crate::error::{PageError, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

pub type PageId = u64;

/// An opaque file-like reference carried by a page. The store never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attachment {
    pub name: String,
    pub date: DateTime<FixedOffset>,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Page {
    pub id: PageId,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub due: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Page {
    /// Whether any of the page's tags is exactly `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Compares the calendar date of `due` in the offset it was stored with.
    pub fn is_due_on(&self, year: i32, month: u32, day: u32) -> bool {
        let date = self.due.date_naive();
        date.year() == year && date.month() == month && date.day() == day
    }
}

/// Everything needed to create a page; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPage {
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub due: DateTime<FixedOffset>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl NewPage {
    pub fn new(text: impl Into<String>, tags: Vec<String>, due: DateTime<FixedOffset>) -> Self {
        Self {
            text: text.into(),
            tags,
            due,
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub(crate) fn into_page(self, id: PageId) -> Page {
        Page {
            id,
            text: self.text,
            tags: self.tags,
            due: self.due,
            attachments: self.attachments,
        }
    }
}

/// A calendar date that is known to exist, used for due-date queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Rejects triples that are not real dates, e.g. month 13 or February 30th.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DueDate)
            .ok_or(PageError::InvalidDate { year, month, day })
    }

    pub fn from_timestamp(due: &DateTime<FixedOffset>) -> Self {
        DueDate(due.date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl std::fmt::Display for DueDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
