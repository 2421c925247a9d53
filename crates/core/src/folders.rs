//! Remote folder creation

use crate::client::CloudApi;
use crate::error::Result;
use crate::report::Reporter;
use crate::session::{RemoteNode, Session};

/// Create `name` under `parent`, announcing the new node on success.
///
/// Failures come back as [`crate::Error::FolderCreation`]; deciding whether
/// that is fatal is up to the caller.
pub async fn create_folder(
    api: &dyn CloudApi,
    reporter: &dyn Reporter,
    session: &Session,
    parent: &RemoteNode,
    name: &str,
) -> Result<RemoteNode> {
    let node = api.create_folder(session, parent, name).await?;
    reporter.info(&format!("{} is successfully created (id: {})", name, node));
    Ok(node)
}
