use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::PageId;
use crate::store::DataStore;
use log::debug;

pub fn run<S: DataStore>(store: &S, id: PageId) -> Result<CmdResult> {
    store.delete_page(id)?;
    debug!("deleted page id={}", id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "page with id={} has been deleted.",
        id
    )));
    Ok(result)
}

pub fn all<S: DataStore>(store: &S) -> Result<CmdResult> {
    let count = store.len();
    store.delete_all_pages();
    debug!("deleted all pages ({} removed)", count);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("All pages have been deleted."));
    Ok(result)
}
