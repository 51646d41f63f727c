use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::PageId;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, id: PageId) -> Result<CmdResult> {
    let page = store.get_page(id)?;
    Ok(CmdResult::default().with_listed_pages(vec![page]))
}

pub fn all<S: DataStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_pages(store.list_pages()))
}
