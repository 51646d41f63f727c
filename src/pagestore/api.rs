//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every front-end: the REST surface, the named-operation surface,
//! and anything else that wants to talk to a store.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (copies caller tag slices, validates due-date triples)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! Due-date validation happens here and nowhere else, so every surface rejects
//! the same impossible dates. The store's own query does not validate.
//!
//! ## Generic Over DataStore
//!
//! `PageApi<S: DataStore>` is generic over the storage backend:
//! - Single owner: `PageApi<InMemoryStore>`
//! - Shared between handlers: `PageApi<Arc<InMemoryStore>>`

use crate::commands;
use crate::error::Result;
use crate::model::{Attachment, DueDate, NewPage, Page, PageId};
use crate::store::DataStore;
use chrono::{DateTime, FixedOffset};

/// The main API facade for page operations.
pub struct PageApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> PageApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_page(
        &self,
        text: &str,
        tags: &[String],
        due: DateTime<FixedOffset>,
        attachments: &[Attachment],
    ) -> Result<commands::CmdResult> {
        let page = NewPage::new(text, tags.to_vec(), due).with_attachments(attachments.to_vec());
        commands::create::run(&self.store, page)
    }

    pub fn get_page(&self, id: PageId) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, id)
    }

    pub fn get_all_pages(&self) -> Result<commands::CmdResult> {
        commands::get::all(&self.store)
    }

    pub fn update_page(&self, page: Page) -> Result<commands::CmdResult> {
        commands::update::run(&self.store, page)
    }

    pub fn delete_page(&self, id: PageId) -> Result<commands::CmdResult> {
        commands::delete::run(&self.store, id)
    }

    pub fn delete_all_pages(&self) -> Result<commands::CmdResult> {
        commands::delete::all(&self.store)
    }

    pub fn get_pages_by_tag(&self, tag: &str) -> Result<commands::CmdResult> {
        commands::tags::run(&self.store, tag)
    }

    pub fn get_pages_by_due(&self, year: i32, month: u32, day: u32) -> Result<commands::CmdResult> {
        let date = DueDate::new(year, month, day)?;
        commands::due::run(&self.store, date)
    }

    /// Queries by the calendar date of `due`, ignoring its time of day.
    pub fn get_pages_by_due_time(&self, due: &DateTime<FixedOffset>) -> Result<commands::CmdResult> {
        commands::due::run(&self.store, DueDate::from_timestamp(due))
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageError;
    use crate::store::memory::fixtures::{due, tags};
    use crate::store::memory::InMemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_create_and_get() {
        let api = PageApi::new(InMemoryStore::new());
        let result = api
            .create_page("My Page", &tags(&["x"]), due("2024-03-15T10:00:00Z"), &[])
            .unwrap();
        let id = result.created_id.unwrap();

        let fetched = api.get_page(id).unwrap();
        assert_eq!(fetched.listed_pages[0].text, "My Page");
        assert_eq!(fetched.listed_pages[0].tags, tags(&["x"]));
    }

    #[test]
    fn test_due_query_validates_triple() {
        let api = PageApi::new(InMemoryStore::new());
        assert!(matches!(
            api.get_pages_by_due(2024, 13, 1),
            Err(PageError::InvalidDate { month: 13, .. })
        ));
        assert!(matches!(
            api.get_pages_by_due(2024, 4, 31),
            Err(PageError::InvalidDate { day: 31, .. })
        ));
        assert!(api.get_pages_by_due(2024, 4, 30).is_ok());
    }

    #[test]
    fn test_due_time_query_uses_date_only() {
        let api = PageApi::new(InMemoryStore::new());
        api.create_page("a", &[], due("2024-03-15T08:00:00Z"), &[])
            .unwrap();
        api.create_page("b", &[], due("2024-03-16T08:00:00Z"), &[])
            .unwrap();

        let result = api
            .get_pages_by_due_time(&due("2024-03-15T23:00:00Z"))
            .unwrap();
        assert_eq!(result.listed_pages.len(), 1);
        assert_eq!(result.listed_pages[0].text, "a");
    }

    #[test]
    fn test_shared_store_through_arc() {
        let store = Arc::new(InMemoryStore::new());
        let first = PageApi::new(Arc::clone(&store));
        let second = PageApi::new(Arc::clone(&store));

        first
            .create_page("shared", &[], due("2024-01-01T00:00:00Z"), &[])
            .unwrap();
        let listed = second.get_all_pages().unwrap().listed_pages;
        assert_eq!(listed.len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_all_then_create_continues_ids() {
        let api = PageApi::new(InMemoryStore::new());
        for _ in 0..3 {
            api.create_page("p", &[], due("2024-01-01T00:00:00Z"), &[])
                .unwrap();
        }
        api.delete_all_pages().unwrap();
        assert!(api.get_all_pages().unwrap().listed_pages.is_empty());

        let next = api
            .create_page("p", &[], due("2024-01-01T00:00:00Z"), &[])
            .unwrap();
        assert_eq!(next.created_id, Some(3));
    }
}
