use crate::model::{Page, PageId};

pub mod create;
pub mod delete;
pub mod due;
pub mod get;
pub mod tags;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub created_id: Option<PageId>,
    pub affected_pages: Vec<Page>,
    pub listed_pages: Vec<Page>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_created_id(mut self, id: PageId) -> Self {
        self.created_id = Some(id);
        self
    }

    pub fn with_affected_pages(mut self, pages: Vec<Page>) -> Self {
        self.affected_pages = pages;
        self
    }

    /// Listed pages are kept in id order so output is stable across runs.
    pub fn with_listed_pages(mut self, mut pages: Vec<Page>) -> Self {
        pages.sort_by_key(|p| p.id);
        if pages.is_empty() {
            self.add_message(CmdMessage::info("No pages found"));
        }
        self.listed_pages = pages;
        self
    }

    /// The text of the first success message, if any.
    pub fn success_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.level == MessageLevel::Success)
            .map(|m| m.content.as_str())
    }
}
