//! Single file upload

use crate::classify::{classify, DEFAULT_CONTENT_TYPE};
use crate::client::{CloudApi, UploadRequest};
use crate::error::{Error, Result};
use crate::report::Reporter;
use crate::session::{RemoteNode, Session};
use std::path::Path;

/// Read `path` fully, sniff its content type and store it under `node`.
///
/// Nothing is absorbed here: read errors and rejected uploads both surface as
/// [`Error::Upload`] naming the file.
pub async fn upload_file(
    api: &dyn CloudApi,
    reporter: &dyn Reporter,
    session: &Session,
    node: &RemoteNode,
    path: &Path,
) -> Result<()> {
    let failed = |reason: String| Error::Upload {
        path: path.to_path_buf(),
        reason: Some(reason),
    };

    let data = tokio::fs::read(path).await.map_err(|e| failed(e.to_string()))?;
    let content_type = classify(path).unwrap_or(DEFAULT_CONTENT_TYPE);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| failed("path has no file name".to_string()))?;

    tracing::debug!("uploading {} ({}, {} bytes)", path.display(), content_type, data.len());

    let request = UploadRequest {
        file_name,
        content_type: content_type.to_string(),
        data,
    };

    api.upload(session, node, request).await.map_err(|e| match e {
        Error::Upload { .. } => e,
        Error::Rejected(_) => Error::Upload {
            path: path.to_path_buf(),
            reason: None,
        },
        other => failed(other.to_string()),
    })?;

    reporter.info(&format!("{} is successfully uploaded", path.display()));
    Ok(())
}
