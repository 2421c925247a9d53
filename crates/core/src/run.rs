//! Top-level run: validate settings, authenticate once, mirror the tree

use crate::client::CloudApi;
use crate::config::Settings;
use crate::error::Result;
use crate::replicate::{replicate, ReplicationReport};
use crate::report::Reporter;
use std::sync::Arc;
use tracing::info;

/// Authenticate and mirror `settings.file_path` onto `settings.node`.
pub async fn run(
    settings: &Settings,
    api: &dyn CloudApi,
    reporter: &dyn Reporter,
) -> Result<ReplicationReport> {
    let session = api.authenticate(&settings.credentials).await?;
    info!("authenticated against {}", settings.endpoint);

    let report = replicate(
        api,
        reporter,
        &session,
        settings.node.clone(),
        &settings.file_path,
    )
    .await?;

    info!(
        folders_created = report.folders_created,
        files_uploaded = report.files_uploaded,
        subtrees_skipped = report.subtrees_skipped,
        "replication finished"
    );
    Ok(report)
}

/// Full run from raw settings.
///
/// `connect` builds the API client once settings are known. Whatever goes
/// wrong, at any stage, is sent to `reporter.failure` exactly once and
/// returned; there is no partial success.
pub async fn execute<L, C>(lookup: L, connect: C, reporter: &dyn Reporter) -> Result<ReplicationReport>
where
    L: Fn(&str) -> Option<String>,
    C: FnOnce(&Settings) -> Arc<dyn CloudApi>,
{
    let outcome = async {
        let settings = Settings::from_lookup(lookup)?;
        let api = connect(&settings);
        run(&settings, api.as_ref(), reporter).await
    }
    .await;

    if let Err(e) = &outcome {
        reporter.failure(&e.to_string());
    }
    outcome
}
