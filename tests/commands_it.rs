use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use buffer_cli::buffer::model::GraphQlError;
use buffer_cli::buffer::{ApiError, BufferApi};
use buffer_cli::commands::{channels, ideas, posts};

/// Records every round trip and answers with a fixed payload.
struct RecordingApi {
    response: Value,
    calls: Mutex<Vec<(String, Option<Value>)>>,
}

impl RecordingApi {
    fn new(response: Value) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BufferApi for RecordingApi {
    async fn graphql(&self, query: &str, variables: Option<Value>) -> Result<Value, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), variables));
        Ok(self.response.clone())
    }
}

/// Fails every round trip with the given GraphQL errors.
struct FailingApi {
    messages: Vec<&'static str>,
}

#[async_trait]
impl BufferApi for FailingApi {
    async fn graphql(&self, _query: &str, _variables: Option<Value>) -> Result<Value, ApiError> {
        let errors = self
            .messages
            .iter()
            .map(|m| serde_json::from_value::<GraphQlError>(json!({ "message": m })).unwrap())
            .collect();
        Err(ApiError::GraphQl(errors))
    }
}

fn posts_list_args(status: posts::PostStatus) -> posts::ListArgs {
    posts::ListArgs {
        org_id: "org-1".into(),
        status,
        channel_id: None,
        with_assets: false,
        limit: None,
        after: None,
    }
}

fn posts_create_args() -> posts::CreateArgs {
    posts::CreateArgs {
        channel_id: "chan-1".into(),
        text: "hello".into(),
        mode: posts::PostMode::ShareNow,
        due_at: None,
        image_url: Vec::new(),
        ig_type: None,
        first_comment: None,
        link_attachment: None,
    }
}

#[tokio::test]
async fn posts_list_shapes_connection_into_posts_and_page_info() {
    let api = RecordingApi::new(json!({
        "posts": {
            "edges": [
                { "node": {
                    "id": "p1", "text": "a", "createdAt": 1, "dueAt": 2,
                    "channelId": "c1", "status": "scheduled"
                }},
                { "node": {
                    "id": "p2", "text": "b", "createdAt": 3, "dueAt": 4,
                    "channelId": "c1", "status": "scheduled"
                }}
            ],
            "pageInfo": { "endCursor": "cur", "hasNextPage": false }
        }
    }));

    let out = posts::list(&api, &posts_list_args(posts::PostStatus::Scheduled))
        .await
        .unwrap();
    assert_eq!(out["posts"].as_array().unwrap().len(), 2);
    assert_eq!(out["posts"][0]["id"], "p1");
    assert_eq!(out["pageInfo"]["endCursor"], "cur");
    assert_eq!(out["pageInfo"]["hasNextPage"], false);

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    let (query, variables) = &calls[0];
    assert!(!query.contains("assets {"));
    let vars = variables.as_ref().unwrap();
    assert_eq!(vars["input"]["sort"][0]["direction"], "asc");
}

#[tokio::test]
async fn posts_list_sent_requests_descending_sort() {
    let api = RecordingApi::new(json!({
        "posts": { "edges": [], "pageInfo": { "endCursor": null, "hasNextPage": false } }
    }));
    posts::list(&api, &posts_list_args(posts::PostStatus::Sent))
        .await
        .unwrap();
    let (_, variables) = &api.calls()[0];
    assert_eq!(
        variables.as_ref().unwrap()["input"]["sort"][0]["direction"],
        "desc"
    );
}

#[tokio::test]
async fn posts_list_with_assets_expands_the_query() {
    let api = RecordingApi::new(json!({
        "posts": { "edges": [], "pageInfo": { "endCursor": null, "hasNextPage": false } }
    }));
    let mut args = posts_list_args(posts::PostStatus::Scheduled);
    args.with_assets = true;
    posts::list(&api, &args).await.unwrap();
    let (query, _) = &api.calls()[0];
    assert!(query.contains("assets {"));
}

#[tokio::test]
async fn posts_create_normalizes_drive_links_before_sending() {
    let api = RecordingApi::new(json!({ "createPost": { "post": { "id": "p9" } } }));
    let mut args = posts_create_args();
    args.image_url = vec![
        "https://drive.google.com/file/d/FILE123/view?usp=sharing".into(),
        "https://cdn.example.com/b.png".into(),
    ];

    let out = posts::create(&api, &args).await.unwrap();
    assert_eq!(out["post"]["id"], "p9");

    let (_, variables) = &api.calls()[0];
    let images = &variables.as_ref().unwrap()["input"]["assets"]["images"];
    assert_eq!(
        images[0]["url"],
        "https://drive.google.com/uc?export=download&id=FILE123"
    );
    assert_eq!(images[1]["url"], "https://cdn.example.com/b.png");
}

#[tokio::test]
async fn posts_create_rejects_local_image_paths_without_a_request() {
    let api = RecordingApi::new(json!({ "createPost": {} }));
    let mut args = posts_create_args();
    args.image_url = vec!["./photo.jpg".into()];

    let err = posts::create(&api, &args).await.unwrap_err();
    assert!(err.to_string().contains("local file path"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn posts_create_rejects_malformed_due_at_without_a_request() {
    let api = RecordingApi::new(json!({ "createPost": {} }));
    let mut args = posts_create_args();
    args.mode = posts::PostMode::CustomSchedule;
    args.due_at = Some("tomorrow at noon".into());

    let err = posts::create(&api, &args).await.unwrap_err();
    assert!(err.to_string().contains("--due-at"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn channels_get_unwraps_the_channel() {
    let api = RecordingApi::new(json!({
        "channel": {
            "id": "c1", "name": "acct", "displayName": "Account",
            "service": "instagram", "avatar": null,
            "isQueuePaused": false, "isLocked": false
        }
    }));
    let args = channels::GetArgs {
        channel_id: "c1".into(),
    };
    let out = channels::get(&api, &args).await.unwrap();
    assert_eq!(out["id"], "c1");
    assert_eq!(out["service"], "instagram");

    let (_, variables) = &api.calls()[0];
    assert_eq!(variables.as_ref().unwrap()["id"], "c1");
}

#[tokio::test]
async fn graphql_errors_surface_every_message() {
    let api = FailingApi {
        messages: vec!["first failure", "second failure"],
    };
    let args = ideas::CreateArgs {
        org_id: "org-1".into(),
        title: "t".into(),
        text: "x".into(),
    };
    let err = ideas::create(&api, &args).await.unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("first failure"));
    assert!(msg.contains("second failure"));
}
