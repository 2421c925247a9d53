//! Configuration management for dcbox-upload
//!
//! Every setting comes from the environment (or an equivalent lookup) once at
//! startup and is immutable for the rest of the run.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Environment variable prefix shared by every setting
pub const ENV_PREFIX: &str = "DIRECTCLOUDBOX_";

/// Default API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.directcloud.jp";

pub const SERVICE: &str = "DIRECTCLOUDBOX_SERVICE";
pub const SERVICE_KEY: &str = "DIRECTCLOUDBOX_SERVICE_KEY";
pub const CODE: &str = "DIRECTCLOUDBOX_CODE";
pub const ID: &str = "DIRECTCLOUDBOX_ID";
pub const PASSWORD: &str = "DIRECTCLOUDBOX_PASSWORD";
pub const NODE: &str = "DIRECTCLOUDBOX_NODE";
pub const FILE_PATH: &str = "DIRECTCLOUDBOX_FILE_PATH";
pub const ENDPOINT: &str = "DIRECTCLOUDBOX_ENDPOINT";

/// Required settings, in the order they are reported when missing
pub const REQUIRED_VARS: [&str; 7] = [SERVICE, SERVICE_KEY, CODE, ID, PASSWORD, NODE, FILE_PATH];

/// Credentials exchanged for a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub service: String,
    pub service_key: String,
    pub code: String,
    pub id: String,
    pub password: String,
}

impl Credentials {
    /// Form fields sent to the token endpoint, in wire order.
    pub fn form_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("service", self.service.as_str()),
            ("service_key", self.service_key.as_str()),
            ("code", self.code.as_str()),
            ("id", self.id.as_str()),
            ("password", self.password.as_str()),
        ]
    }
}

/// Fully validated run settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    /// Remote folder the local tree is mirrored into
    pub node: String,
    /// Local path to mirror, relative to the working directory
    pub file_path: PathBuf,
    pub endpoint: String,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary name lookup.
    ///
    /// Empty values count as missing. When anything required is missing the
    /// error names all of it, not just the first gap.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| present(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(Error::Config { missing });
        }

        let required = |name: &str| present(name).unwrap_or_default();

        Ok(Self {
            credentials: Credentials {
                service: required(SERVICE),
                service_key: required(SERVICE_KEY),
                code: required(CODE),
                id: required(ID),
                password: required(PASSWORD),
            },
            node: required(NODE),
            file_path: PathBuf::from(required(FILE_PATH)),
            endpoint: present(ENDPOINT)
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }
}
