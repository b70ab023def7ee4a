use serde::Deserialize;

/// Body of `POST /files/{folder_id}/{filename}/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub password: String,
}

/// Query string of `GET /info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InfoQuery {
    /// Handler name to describe; absent lists every endpoint.
    pub api: Option<String>,
}
