//! Authenticated session shared by every remote call of a run

/// Opaque identifier of a folder in the remote hierarchy
pub type RemoteNode = String;

/// Cookie + access token pair obtained from the token exchange.
///
/// Created once, never refreshed and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Raw `Set-Cookie` values as returned by the token endpoint
    pub cookies: Vec<String>,
    pub access_token: String,
}

impl Session {
    pub fn new(cookies: Vec<String>, access_token: impl Into<String>) -> Self {
        Self {
            cookies,
            access_token: access_token.into(),
        }
    }

    /// Value for the `Cookie` request header: the `name=value` part of every
    /// stored `Set-Cookie`, attributes dropped.
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .filter_map(|raw| raw.split(';').next())
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .collect::<Vec<_>>()
            .join("; ")
    }
}
