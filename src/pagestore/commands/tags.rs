use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, tag: &str) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_pages(store.pages_by_tag(tag)))
}
