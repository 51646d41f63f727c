use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NewPage;
use crate::store::DataStore;
use log::debug;

pub fn run<S: DataStore>(store: &S, page: NewPage) -> Result<CmdResult> {
    let id = store.create_page(page);
    debug!("created page id={}", id);

    let mut result = CmdResult::default().with_created_id(id);
    result.add_message(CmdMessage::success(format!("Page created (id={})", id)));
    Ok(result)
}
