use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// GraphQL response envelope: `data` and/or `errors`.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single entry of the `errors` array. Servers are not required to
/// include `message`, so the raw object is kept as a fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GraphQlError {
    pub fn message_text(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => Value::Object(self.extra.clone()).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: Option<String>,
    pub owner_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub service: Option<String>,
    pub avatar: Option<String>,
    pub is_queue_paused: Option<bool>,
    pub is_locked: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub text: Option<String>,
    pub created_at: Option<Value>,
    pub due_at: Option<Value>,
    pub channel_id: Option<String>,
    pub status: Option<String>,
    /// Present only when the query expanded asset fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<Asset>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub thumbnail: Option<String>,
    pub mime_type: Option<String>,
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeta {
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// Cursor-paginated posts connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostConnection {
    pub edges: Vec<PostEdge>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct PostEdge {
    pub node: Post,
}
