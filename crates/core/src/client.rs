//! DirectCloud API client for the token, folder and upload endpoints

use crate::config::{Credentials, DEFAULT_ENDPOINT};
use crate::error::{Error, Result};
use crate::session::{RemoteNode, Session};
use async_trait::async_trait;
use reqwest::header::SET_COOKIE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

const TOKEN_PATH: &str = "/openapi/jauth/token";
const CREATE_FOLDER_PATH: &str = "/openapp/v1/folders/create/";
const UPLOAD_PATH: &str = "/openapp/v1/files/upload/";
const LANG: &str = "eng";

/// Multipart field carrying the file contents
pub const UPLOAD_FIELD: &str = "Filedata";

/// A single file ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Basename only
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// The three remote operations the uploader needs.
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// Exchange credentials for a session.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session>;

    /// Create `name` under `parent` and return the new node.
    async fn create_folder(
        &self,
        session: &Session,
        parent: &RemoteNode,
        name: &str,
    ) -> Result<RemoteNode>;

    /// Store one file under `node`.
    async fn upload(&self, session: &Session, node: &RemoteNode, request: UploadRequest) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateFolderResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    node: Option<serde_json::Value>,
    #[serde(default)]
    all: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
}

/// HTTP implementation of [`CloudApi`]
pub struct DirectCloudClient {
    http_client: Client,
    base_url: String,
}

impl Default for DirectCloudClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl DirectCloudClient {
    /// Create a new client against `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}?lang={}", self.base_url, path, LANG)
    }

    async fn post_authenticated(&self, session: &Session, url: String, form: Form) -> Result<Response> {
        let response = self
            .http_client
            .post(url)
            .header("Cookie", session.cookie_header())
            .header("access_token", &session.access_token)
            .multipart(form)
            .send()
            .await?;

        Ok(response)
    }

    async fn exchange_token(&self, credentials: &Credentials) -> Result<Session> {
        let form = credentials
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value.to_string()));

        let response = self
            .http_client
            .post(self.url(TOKEN_PATH))
            .multipart(form)
            .send()
            .await?;

        let cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();

        let body: TokenResponse = decode(response).await?;
        match (body.success, body.access_token) {
            (true, Some(token)) => Ok(Session::new(cookies, token)),
            _ => Err(Error::Authentication(
                "Failed to get access token. Please check your environment variables".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CloudApi for DirectCloudClient {
    #[instrument(skip(self, credentials), level = "debug")]
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        self.exchange_token(credentials).await.map_err(|e| match e {
            Error::Authentication(_) => e,
            other => Error::Authentication(format!("Failed to get access token: {}", other)),
        })
    }

    #[instrument(skip(self, session), level = "debug")]
    async fn create_folder(
        &self,
        session: &Session,
        parent: &RemoteNode,
        name: &str,
    ) -> Result<RemoteNode> {
        let failed = |reason: String| Error::FolderCreation {
            name: name.to_string(),
            reason,
        };

        let url = self.url(&format!("{}{}", CREATE_FOLDER_PATH, parent));
        let form = Form::new().text("name", name.to_string());

        let response = self
            .post_authenticated(session, url, form)
            .await
            .map_err(|e| failed(e.to_string()))?;
        let body: CreateFolderResponse = decode(response).await.map_err(|e| failed(e.to_string()))?;

        if !body.success {
            return Err(failed(body.all.map(json_text).unwrap_or_default()));
        }

        let node = body
            .node
            .map(json_text)
            .filter(|node| !node.is_empty())
            .ok_or_else(|| failed("response did not include a node id".to_string()))?;
        debug!("created folder {} under {} -> {}", name, parent, node);
        Ok(node)
    }

    #[instrument(
        skip(self, session, request),
        level = "debug",
        fields(file_name = %request.file_name, data_len = request.data.len())
    )]
    async fn upload(&self, session: &Session, node: &RemoteNode, request: UploadRequest) -> Result<()> {
        let url = self.url(&format!("{}{}", UPLOAD_PATH, node));
        let part = Part::bytes(request.data)
            .file_name(request.file_name)
            .mime_str(&request.content_type)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self.post_authenticated(session, url, form).await?;
        let body: UploadResponse = decode(response).await?;

        if body.success {
            Ok(())
        } else {
            Err(Error::Rejected("upload".to_string()))
        }
    }
}

/// Decode a JSON body, turning non-2xx statuses into [`Error::Api`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(Error::Api(format!("HTTP {}: {}", status.as_u16(), error_text)))
    }
}

/// Render a JSON scalar without quotes; arrays and objects stay as JSON.
fn json_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
