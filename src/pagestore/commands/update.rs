use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Page;
use crate::store::DataStore;
use log::debug;

/// Overwrites the stored page with the same id. Unknown ids are an error and
/// nothing gets inserted for them.
pub fn run<S: DataStore>(store: &S, page: Page) -> Result<CmdResult> {
    let updated = store.update_page(page)?;
    debug!("updated page id={}", updated.id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "page with id={} has been updated.",
        updated.id
    )));
    Ok(result.with_affected_pages(vec![updated]))
}
