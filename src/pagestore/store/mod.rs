//! # Storage Layer
//!
//! This module defines the storage abstraction for pagestore. The [`DataStore`] trait
//! is what the command layer talks to; it never sees how pages are held.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: the mutex-guarded table of pages
//!   - No persistence, contents live as long as the store value
//!   - One lock over the page map and the id counter
//!
//! ## Identifiers
//!
//! Ids are handed out by the store from a counter that starts at 0 and only ever
//! moves forward. Deleting a page, or every page, never makes its id available again.
//!
//! ## Sharing
//!
//! Every method takes `&self`, so a store can sit behind an [`Arc`] and be handed
//! to as many request handlers as needed. `DataStore` is implemented for `Arc<T>`
//! so the API layer can own either form.

use crate::error::Result;
use crate::model::{NewPage, Page, PageId};
use std::sync::Arc;

pub mod memory;

/// Abstract interface for page storage.
///
/// Each call is atomic with respect to every other call on the same store.
pub trait DataStore {
    /// Insert a new page and return the id it was given
    fn create_page(&self, page: NewPage) -> PageId;

    /// Get a page by id
    fn get_page(&self, id: PageId) -> Result<Page>;

    /// All live pages, in no particular order
    fn list_pages(&self) -> Vec<Page>;

    /// Replace the page stored under `page.id`. Fails without side effects if
    /// no such page exists.
    fn update_page(&self, page: Page) -> Result<Page>;

    /// Delete a page permanently
    fn delete_page(&self, id: PageId) -> Result<()>;

    /// Delete every page. Ids keep counting from where they were.
    fn delete_all_pages(&self);

    /// Pages carrying `tag` (exact, case-sensitive)
    fn pages_by_tag(&self, tag: &str) -> Vec<Page>;

    /// Pages whose due timestamp falls on the given calendar date
    fn pages_by_due_date(&self, year: i32, month: u32, day: u32) -> Vec<Page>;

    /// Number of live pages
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: DataStore + ?Sized> DataStore for Arc<T> {
    fn create_page(&self, page: NewPage) -> PageId {
        (**self).create_page(page)
    }

    fn get_page(&self, id: PageId) -> Result<Page> {
        (**self).get_page(id)
    }

    fn list_pages(&self) -> Vec<Page> {
        (**self).list_pages()
    }

    fn update_page(&self, page: Page) -> Result<Page> {
        (**self).update_page(page)
    }

    fn delete_page(&self, id: PageId) -> Result<()> {
        (**self).delete_page(id)
    }

    fn delete_all_pages(&self) {
        (**self).delete_all_pages()
    }

    fn pages_by_tag(&self, tag: &str) -> Vec<Page> {
        (**self).pages_by_tag(tag)
    }

    fn pages_by_due_date(&self, year: i32, month: u32, day: u32) -> Vec<Page> {
        (**self).pages_by_due_date(year, month, day)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
