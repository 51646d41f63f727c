use super::DataStore;
use crate::error::{PageError, Result};
use crate::model::{NewPage, Page, PageId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Table {
    pages: HashMap<PageId, Page>,
    next_id: PageId,
}

/// In-memory page table. Does NOT persist data.
///
/// A single `Mutex` guards both the page map and the id counter, so every
/// operation is one critical section and callers observe them in a total order.
/// Reads wait behind writes just like writes do.
#[derive(Default)]
pub struct InMemoryStore {
    table: Mutex<Table>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        // No operation panics halfway through a mutation, so a poisoned table is still whole.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn collect_where<F>(&self, predicate: F) -> Vec<Page>
    where
        F: Fn(&Page) -> bool,
    {
        self.lock()
            .pages
            .values()
            .filter(|page| predicate(page))
            .cloned()
            .collect()
    }
}

impl DataStore for InMemoryStore {
    fn create_page(&self, page: NewPage) -> PageId {
        let mut table = self.lock();
        let id = table.next_id;
        table.next_id += 1;
        table.pages.insert(id, page.into_page(id));
        id
    }

    fn get_page(&self, id: PageId) -> Result<Page> {
        self.lock()
            .pages
            .get(&id)
            .cloned()
            .ok_or(PageError::NotFound(id))
    }

    fn list_pages(&self) -> Vec<Page> {
        self.lock().pages.values().cloned().collect()
    }

    fn update_page(&self, page: Page) -> Result<Page> {
        let mut table = self.lock();
        match table.pages.get_mut(&page.id) {
            Some(slot) => {
                *slot = page.clone();
                Ok(page)
            }
            None => Err(PageError::NotFound(page.id)),
        }
    }

    fn delete_page(&self, id: PageId) -> Result<()> {
        if self.lock().pages.remove(&id).is_none() {
            return Err(PageError::NotFound(id));
        }
        Ok(())
    }

    fn delete_all_pages(&self) {
        self.lock().pages.clear();
    }

    fn pages_by_tag(&self, tag: &str) -> Vec<Page> {
        self.collect_where(|page| page.has_tag(tag))
    }

    fn pages_by_due_date(&self, year: i32, month: u32, day: u32) -> Vec<Page> {
        self.collect_where(|page| page.is_due_on(year, month, day))
    }

    fn len(&self) -> usize {
        self.lock().pages.len()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    /// Parses an RFC 3339 timestamp; panics on bad input, test use only.
    pub fn due(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    pub fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_pages(self, count: usize) -> Self {
            for i in 0..count {
                let text = format!("Page {}", i + 1);
                self.store
                    .create_page(NewPage::new(text, vec![], due("2024-01-01T09:00:00Z")));
            }
            self
        }

        pub fn with_tagged_page(self, text: &str, names: &[&str]) -> Self {
            self.store.create_page(NewPage::new(
                text,
                tags(names),
                due("2024-01-01T09:00:00Z"),
            ));
            self
        }

        pub fn with_due_page(self, text: &str, timestamp: &str) -> Self {
            self.store
                .create_page(NewPage::new(text, vec![], due(timestamp)));
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{due, tags, StoreFixture};
    use super::*;
    use crate::model::Attachment;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn texts(mut pages: Vec<Page>) -> Vec<String> {
        pages.sort_by_key(|p| p.id);
        pages.into_iter().map(|p| p.text).collect()
    }

    #[test]
    fn test_ids_start_at_zero_and_increase() {
        let store = InMemoryStore::new();
        let a = store.create_page(NewPage::new("a", vec![], due("2024-01-01T00:00:00Z")));
        let b = store.create_page(NewPage::new("b", vec![], due("2024-01-01T00:00:00Z")));
        assert_eq!(a, 0);
        assert_eq!(b, 1);
    }

    #[test]
    fn test_ids_never_reused_after_deletes() {
        let store = StoreFixture::new().with_pages(3).store;
        store.delete_page(2).unwrap();
        let next = store.create_page(NewPage::new("x", vec![], due("2024-01-01T00:00:00Z")));
        assert_eq!(next, 3);

        store.delete_all_pages();
        assert!(store.list_pages().is_empty());
        let after_clear =
            store.create_page(NewPage::new("y", vec![], due("2024-01-01T00:00:00Z")));
        assert_eq!(after_clear, 4);
    }

    #[test]
    fn test_get_returns_what_was_submitted() {
        let store = InMemoryStore::new();
        let attachment = Attachment {
            name: "notes.txt".into(),
            date: due("2024-02-01T08:00:00+02:00"),
            contents: "hello".into(),
        };
        let input = NewPage::new("text", tags(&["a", "b", "a"]), due("2024-03-15T10:00:00Z"))
            .with_attachments(vec![attachment.clone()]);
        let id = store.create_page(input);

        let page = store.get_page(id).unwrap();
        assert_eq!(page.id, id);
        assert_eq!(page.text, "text");
        assert_eq!(page.tags, tags(&["a", "b", "a"]));
        assert_eq!(page.due, due("2024-03-15T10:00:00Z"));
        assert_eq!(page.attachments, vec![attachment]);
    }

    #[test]
    fn test_caller_tag_mutation_does_not_leak() {
        let store = InMemoryStore::new();
        let mut input_tags = tags(&["work"]);
        let id = store.create_page(NewPage::new(
            "t",
            input_tags.clone(),
            due("2024-01-01T00:00:00Z"),
        ));
        input_tags[0] = "changed".into();
        input_tags.push("extra".into());

        assert_eq!(store.get_page(id).unwrap().tags, tags(&["work"]));
    }

    #[test]
    fn test_delete_not_found() {
        let store = StoreFixture::new().with_pages(2).store;
        match store.delete_page(7) {
            Err(PageError::NotFound(id)) => assert_eq!(id, 7),
            _ => panic!("Expected NotFound"),
        }
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_delete_then_get_fails() {
        let store = StoreFixture::new().with_pages(1).store;
        store.delete_page(0).unwrap();
        assert!(matches!(store.get_page(0), Err(PageError::NotFound(0))));
        assert!(matches!(store.delete_page(0), Err(PageError::NotFound(0))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let store = StoreFixture::new()
            .with_tagged_page("old", &["x", "y"])
            .store;
        let replacement = Page {
            id: 0,
            text: "new".into(),
            tags: vec![],
            due: due("2025-06-01T12:00:00Z"),
            attachments: vec![],
        };
        let updated = store.update_page(replacement.clone()).unwrap();
        assert_eq!(updated, replacement);
        assert_eq!(store.get_page(0).unwrap(), replacement);
    }

    #[test]
    fn test_update_missing_id_has_no_side_effect() {
        let store = StoreFixture::new().with_pages(1).store;
        let ghost = Page {
            id: 42,
            text: "ghost".into(),
            tags: vec![],
            due: due("2024-01-01T00:00:00Z"),
            attachments: vec![],
        };
        assert!(matches!(
            store.update_page(ghost),
            Err(PageError::NotFound(42))
        ));
        assert_eq!(store.len(), 1);
        assert!(store.get_page(42).is_err());
    }

    #[test]
    fn test_pages_by_tag_exact_match() {
        let store = StoreFixture::new()
            .with_tagged_page("one", &["rust", "db"])
            .with_tagged_page("two", &["Rust"])
            .with_tagged_page("three", &["rusty", "rust", "rust"])
            .with_tagged_page("four", &[])
            .store;

        assert_eq!(texts(store.pages_by_tag("rust")), vec!["one", "three"]);
        assert_eq!(texts(store.pages_by_tag("Rust")), vec!["two"]);
        assert!(store.pages_by_tag("rus").is_empty());
        assert!(store.pages_by_tag("missing").is_empty());
    }

    #[test]
    fn test_pages_by_due_date_ignores_time_of_day() {
        let store = StoreFixture::new()
            .with_due_page("morning", "2024-03-15T00:00:00Z")
            .with_due_page("night", "2024-03-15T23:59:59Z")
            .with_due_page("offset", "2024-03-15T23:30:00-05:00")
            .with_due_page("next", "2024-03-16T00:00:00Z")
            .store;

        assert_eq!(
            texts(store.pages_by_due_date(2024, 3, 15)),
            vec!["morning", "night", "offset"]
        );
        assert_eq!(texts(store.pages_by_due_date(2024, 3, 16)), vec!["next"]);
        assert!(store.pages_by_due_date(2024, 13, 15).is_empty());
    }

    #[test]
    fn test_queries_skip_deleted_pages() {
        let store = StoreFixture::new()
            .with_tagged_page("keep", &["t"])
            .with_tagged_page("drop", &["t"])
            .store;
        store.delete_page(1).unwrap();
        assert_eq!(texts(store.pages_by_tag("t")), vec!["keep"]);
        assert_eq!(texts(store.list_pages()), vec!["keep"]);
    }

    #[test]
    fn test_concurrent_creates_get_unique_ids() {
        let store = Arc::new(InMemoryStore::new());
        let threads = 8;
        let per_thread = 50;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..per_thread)
                        .map(|i| {
                            store.create_page(NewPage::new(
                                format!("{}-{}", t, i),
                                vec![],
                                due("2024-01-01T00:00:00Z"),
                            ))
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "id {} handed out twice", id);
            }
        }

        let total = threads * per_thread;
        assert_eq!(ids.len(), total);
        assert_eq!(store.list_pages().len(), total);
        assert_eq!(ids.iter().max().copied(), Some(total as PageId - 1));
    }

    #[test]
    fn test_fixtures_coverage() {
        let fixture = StoreFixture::default()
            .with_pages(2)
            .with_tagged_page("Tagged", &["a"])
            .with_due_page("Due", "2030-01-02T03:04:05Z");

        let pages = fixture.store.list_pages();
        assert_eq!(pages.len(), 4);
        let generic = pages.iter().filter(|p| p.text.starts_with("Page ")).count();
        assert_eq!(generic, 2);
    }
}
