use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::DueDate;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, date: DueDate) -> Result<CmdResult> {
    let pages = store.pages_by_due_date(date.year(), date.month(), date.day());
    Ok(CmdResult::default().with_listed_pages(pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn finds_pages_due_on_date() {
        let store = StoreFixture::new()
            .with_due_page("early", "2024-03-15T01:00:00Z")
            .with_due_page("late", "2024-03-15T22:00:00+09:00")
            .with_due_page("other", "2024-03-14T23:59:59Z")
            .store;

        let result = run(&store, DueDate::new(2024, 3, 15).unwrap()).unwrap();
        let texts: Vec<_> = result.listed_pages.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["early", "late"]);
    }
}
