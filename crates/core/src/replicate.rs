//! Depth-first mirroring of a local tree onto a remote folder
//!
//! Each local directory becomes a remote folder created under its parent's
//! node and each file is uploaded into the node of the directory holding it.
//! Failures are not treated alike:
//!
//! - a folder that cannot be created, or a path that cannot be listed, is
//!   reported as a warning and only that branch is pruned;
//! - a file that cannot be uploaded aborts the whole traversal, so nothing
//!   after it (siblings or later directories at any level) is touched.

use crate::client::CloudApi;
use crate::error::{Error, Result};
use crate::folders::create_folder;
use crate::report::Reporter;
use crate::session::{RemoteNode, Session};
use crate::upload::upload_file;
use futures::future::{BoxFuture, FutureExt};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of visiting one path. The abort case is the `Err` side of
/// [`Result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The path and everything below it was processed
    Continue,
    /// The path was left out; carries the warning that was reported
    SkipSubtree(String),
}

/// Tally of a finished traversal
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplicationReport {
    pub folders_created: usize,
    pub files_uploaded: usize,
    pub subtrees_skipped: usize,
}

/// Mirror `path` onto `node`. See [`Replicator`].
pub async fn replicate(
    api: &dyn CloudApi,
    reporter: &dyn Reporter,
    session: &Session,
    node: RemoteNode,
    path: &Path,
) -> Result<ReplicationReport> {
    Replicator::new(api, reporter, session).run(node, path).await
}

/// Walks a local tree one entry at a time, one remote call in flight.
pub struct Replicator<'a> {
    api: &'a dyn CloudApi,
    reporter: &'a dyn Reporter,
    session: &'a Session,
    report: ReplicationReport,
}

impl<'a> Replicator<'a> {
    pub fn new(api: &'a dyn CloudApi, reporter: &'a dyn Reporter, session: &'a Session) -> Self {
        Self {
            api,
            reporter,
            session,
            report: ReplicationReport::default(),
        }
    }

    pub async fn run(mut self, node: RemoteNode, path: &Path) -> Result<ReplicationReport> {
        self.visit(node, path.to_path_buf()).await?;
        Ok(self.report)
    }

    /// Visit one path.
    ///
    /// A path that turns out not to be a directory is uploaded as a file into
    /// `node`. Sibling order is whatever the directory listing yields.
    pub fn visit(&mut self, node: RemoteNode, path: PathBuf) -> BoxFuture<'_, Result<Step>> {
        async move {
            let listing = tokio::fs::read_dir(&path).await;
            let mut entries = match listing {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotADirectory => {
                    upload_file(self.api, self.reporter, self.session, &node, &path).await?;
                    self.report.files_uploaded += 1;
                    return Ok(Step::Continue);
                }
                Err(source) => return Ok(self.skip(Error::Listing { path, source })),
            };

            loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(source) => return Ok(self.skip(Error::Listing { path, source })),
                };
                let child = entry.path();

                let file_type = match entry.file_type().await {
                    Ok(file_type) => file_type,
                    Err(source) => {
                        self.skip(Error::Listing { path: child, source });
                        continue;
                    }
                };

                if !file_type.is_dir() {
                    self.visit(node.clone(), child).await?;
                    continue;
                }

                let name = entry.file_name().to_string_lossy().into_owned();
                match create_folder(self.api, self.reporter, self.session, &node, &name).await {
                    Ok(child_node) => {
                        self.report.folders_created += 1;
                        debug!("descending into {} as node {}", child.display(), child_node);
                        self.visit(child_node, child).await?;
                    }
                    Err(e) if e.is_recoverable() => {
                        self.skip(e);
                    }
                    Err(e) => return Err(e),
                }
            }

            Ok(Step::Continue)
        }
        .boxed()
    }

    fn skip(&mut self, err: Error) -> Step {
        let reason = err.to_string();
        self.reporter.warning(&reason);
        self.report.subtrees_skipped += 1;
        Step::SkipSubtree(reason)
    }
}
