//! Command handlers for dcbox-upload CLI

use crate::Cli;
use anyhow::{Context, Result};
use dcbox_upload_core::config::{CODE, ENDPOINT, FILE_PATH, ID, NODE, PASSWORD, SERVICE, SERVICE_KEY};
use dcbox_upload_core::{execute, ActionsReporter, CloudApi, DirectCloudClient, Reporter, TracingReporter};
use std::collections::HashMap;
use std::sync::Arc;

/// Handle the upload run.
///
/// The failure itself has already been reported through the selected
/// reporter by the time an error is returned here.
pub async fn handle_upload(cli: &Cli) -> Result<()> {
    let reporter: Box<dyn Reporter> = if cli.annotations {
        Box::new(ActionsReporter::stdout())
    } else {
        Box::new(TracingReporter)
    };

    let values = settings_values(cli);
    let report = execute(
        |name| values.get(name).cloned(),
        |settings| -> Arc<dyn CloudApi> { Arc::new(DirectCloudClient::new(settings.endpoint.clone())) },
        reporter.as_ref(),
    )
    .await
    .context("upload run failed")?;

    tracing::info!(
        "Done: {} folder(s) created, {} file(s) uploaded, {} path(s) skipped",
        report.folders_created,
        report.files_uploaded,
        report.subtrees_skipped
    );
    Ok(())
}

/// Setting name -> value, as resolved by clap from flags or the environment.
pub fn settings_values(cli: &Cli) -> HashMap<&'static str, String> {
    [
        (SERVICE, &cli.service),
        (SERVICE_KEY, &cli.service_key),
        (CODE, &cli.code),
        (ID, &cli.id),
        (PASSWORD, &cli.password),
        (NODE, &cli.node),
        (FILE_PATH, &cli.file_path),
        (ENDPOINT, &cli.endpoint),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
    .collect()
}
