//! dcbox-upload-core - Core library for mirroring a local tree into DirectCloud-BOX
//!
//! This library provides settings validation, the DirectCloud API client,
//! content type sniffing and the recursive upload of a directory tree.

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod folders;
pub mod replicate;
pub mod report;
pub mod run;
pub mod session;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use classify::{classify, DEFAULT_CONTENT_TYPE};
pub use client::{CloudApi, DirectCloudClient, UploadRequest};
pub use config::{Credentials, Settings};
pub use error::{Error, Result};
pub use folders::create_folder;
pub use replicate::{replicate, ReplicationReport, Replicator, Step};
pub use report::{ActionsReporter, Reporter, TracingReporter};
pub use run::{execute, run};
pub use session::{RemoteNode, Session};
pub use upload::upload_file;
