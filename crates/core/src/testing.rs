//! In-memory stand-ins for the remote API and the reporter

use crate::client::{CloudApi, UploadRequest};
use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::report::Reporter;
use crate::session::{RemoteNode, Session};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Authenticate,
    CreateFolder {
        parent: RemoteNode,
        name: String,
        node: RemoteNode,
    },
    Upload {
        node: RemoteNode,
        file_name: String,
        content_type: String,
    },
}

/// Records every call; folder names and file names listed as failing are rejected.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    next_node: Mutex<u32>,
    assigned: HashMap<String, RemoteNode>,
    failing_folders: HashSet<String>,
    failing_uploads: HashSet<String>,
    reject_auth: bool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            next_node: Mutex::new(100),
            ..Self::default()
        }
    }

    pub fn assign_node(mut self, name: &str, node: &str) -> Self {
        self.assigned.insert(name.to_string(), node.to_string());
        self
    }

    pub fn fail_folder(mut self, name: &str) -> Self {
        self.failing_folders.insert(name.to_string());
        self
    }

    pub fn fail_upload(mut self, file_name: &str) -> Self {
        self.failing_uploads.insert(file_name.to_string());
        self
    }

    pub fn reject_auth(mut self) -> Self {
        self.reject_auth = true;
        self
    }

    pub fn session(&self) -> Session {
        Session::new(vec!["SID=fake; path=/".to_string()], "fake-token")
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// `(parent, name)` of every created folder.
    pub fn folders(&self) -> Vec<(RemoteNode, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateFolder { parent, name, .. } => Some((parent, name)),
                _ => None,
            })
            .collect()
    }

    /// `(node, file name)` of every upload, including rejected ones.
    pub fn uploads(&self) -> Vec<(RemoteNode, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Upload { node, file_name, .. } => Some((node, file_name)),
                _ => None,
            })
            .collect()
    }

    pub fn uploaded_content_types(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Upload { content_type, .. } => Some(content_type),
                _ => None,
            })
            .collect()
    }

    /// Node created for `name`, if any.
    pub fn node_of(&self, name: &str) -> Option<RemoteNode> {
        self.calls().into_iter().find_map(|call| match call {
            Call::CreateFolder { name: n, node, .. } if n == name => Some(node),
            _ => None,
        })
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CloudApi for FakeApi {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<Session> {
        self.record(Call::Authenticate);
        if self.reject_auth {
            return Err(Error::Authentication(
                "Failed to get access token. Please check your environment variables".to_string(),
            ));
        }
        Ok(self.session())
    }

    async fn create_folder(
        &self,
        _session: &Session,
        parent: &RemoteNode,
        name: &str,
    ) -> Result<RemoteNode> {
        if self.failing_folders.contains(name) {
            return Err(Error::FolderCreation {
                name: name.to_string(),
                reason: "permission denied".to_string(),
            });
        }

        let node = match self.assigned.get(name) {
            Some(node) => node.clone(),
            None => {
                let mut next = self.next_node.lock().unwrap();
                *next += 1;
                next.to_string()
            }
        };
        self.record(Call::CreateFolder {
            parent: parent.clone(),
            name: name.to_string(),
            node: node.clone(),
        });
        Ok(node)
    }

    async fn upload(&self, _session: &Session, node: &RemoteNode, request: UploadRequest) -> Result<()> {
        let rejected = self.failing_uploads.contains(&request.file_name);
        self.record(Call::Upload {
            node: node.clone(),
            file_name: request.file_name,
            content_type: request.content_type,
        });
        if rejected {
            return Err(Error::Rejected("upload".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    infos: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    failures: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn failure(&self, message: &str) {
        self.failures.lock().unwrap().push(message.to_string());
    }
}
