use anyhow::{anyhow, Context, Result};
use chrono::DateTime;
use clap::ValueEnum;
use serde_json::{json, Map, Value};

use crate::buffer::model::{Post, PostConnection};
use crate::buffer::BufferApi;
use crate::media;

const BASE_NODE_FIELDS: &str = "\
        id
        text
        createdAt
        dueAt
        channelId
        status";

const ASSETS_FIELDS: &str = "
        assets {
          thumbnail
          mimeType
          source
          ... on ImageAsset {
            image {
              altText
              width
              height
            }
          }
        }";

pub const CREATE_MUTATION: &str = "\
mutation CreatePost($input: CreatePostInput!) {
  createPost(input: $input) {
    ... on PostActionSuccess {
      post {
        id
        text
        dueAt
        status
      }
    }
    ... on MutationError {
      message
    }
  }
}";

/// Node selection grows the asset block only on request; asset fields
/// are noticeably more expensive on the server side.
pub fn list_query(with_assets: bool) -> String {
    let mut node_fields = BASE_NODE_FIELDS.to_string();
    if with_assets {
        node_fields.push_str(ASSETS_FIELDS);
    }
    format!(
        "\
query ListPosts($after: String, $first: Int, $input: PostsInput!) {{
  posts(after: $after, first: $first, input: $input) {{
    edges {{
      node {{
{node_fields}
      }}
    }}
    pageInfo {{
      endCursor
      hasNextPage
    }}
  }}
}}"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PostStatus {
    Scheduled,
    Sent,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Scheduled => "scheduled",
            PostStatus::Sent => "sent",
        }
    }

    /// Fixed sort policy: upcoming posts soonest-first, sent posts
    /// newest-first.
    pub fn sort_direction(self) -> &'static str {
        match self {
            PostStatus::Scheduled => "asc",
            PostStatus::Sent => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PostMode {
    #[value(name = "shareNow")]
    ShareNow,
    #[value(name = "addToQueue")]
    AddToQueue,
    #[value(name = "shareNext")]
    ShareNext,
    #[value(name = "customSchedule")]
    CustomSchedule,
    #[value(name = "recommendedTime")]
    RecommendedTime,
}

impl PostMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PostMode::ShareNow => "shareNow",
            PostMode::AddToQueue => "addToQueue",
            PostMode::ShareNext => "shareNext",
            PostMode::CustomSchedule => "customSchedule",
            PostMode::RecommendedTime => "recommendedTime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IgType {
    Post,
    Reel,
    Story,
}

impl IgType {
    pub fn as_str(self) -> &'static str {
        match self {
            IgType::Post => "post",
            IgType::Reel => "reel",
            IgType::Story => "story",
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Organization ID
    #[arg(long, value_name = "ORG_ID")]
    pub org_id: String,
    /// Post status to filter on
    #[arg(long, value_enum)]
    pub status: PostStatus,
    /// Restrict to a single channel
    #[arg(long, value_name = "CHANNEL_ID")]
    pub channel_id: Option<String>,
    /// Include asset details in each post
    #[arg(long)]
    pub with_assets: bool,
    /// Maximum number of posts to fetch
    #[arg(long, value_name = "N")]
    pub limit: Option<u32>,
    /// Pagination cursor (endCursor from a previous page)
    #[arg(long, value_name = "CURSOR")]
    pub after: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct CreateArgs {
    /// Channel ID to post to
    #[arg(long, value_name = "CHANNEL_ID")]
    pub channel_id: String,
    /// Post text
    #[arg(long)]
    pub text: String,
    /// Scheduling mode
    #[arg(long, value_enum)]
    pub mode: PostMode,
    /// Schedule time for customSchedule (RFC 3339)
    #[arg(long, value_name = "ISO8601")]
    pub due_at: Option<String>,
    /// Image URL; repeat for multiple images
    #[arg(long, value_name = "URL")]
    pub image_url: Vec<String>,
    /// Instagram post type
    #[arg(long, value_enum)]
    pub ig_type: Option<IgType>,
    /// First comment text
    #[arg(long, value_name = "TEXT")]
    pub first_comment: Option<String>,
    /// LinkedIn link attachment URL
    #[arg(long, value_name = "URL")]
    pub link_attachment: Option<String>,
}

pub fn list_variables(args: &ListArgs) -> Value {
    let mut filter = json!({ "status": [args.status.as_str()] });
    if let Some(channel_id) = &args.channel_id {
        filter["channelIds"] = json!([channel_id]);
    }

    let mut variables = json!({
        "input": {
            "organizationId": args.org_id,
            "filter": filter,
            "sort": [{ "field": "dueAt", "direction": args.status.sort_direction() }],
        }
    });
    if let Some(limit) = args.limit {
        variables["first"] = json!(limit);
    }
    if let Some(after) = &args.after {
        variables["after"] = json!(after);
    }
    variables
}

/// Build CreatePost variables. `image_urls` are the already-normalized
/// URLs; optional fields appear only when supplied.
pub fn create_variables(args: &CreateArgs, image_urls: &[String]) -> Value {
    let mut input = json!({
        "channelId": args.channel_id,
        "text": args.text,
        "schedulingType": "automatic",
        "mode": args.mode.as_str(),
    });

    if let Some(due_at) = &args.due_at {
        input["dueAt"] = json!(due_at);
    }
    if !image_urls.is_empty() {
        let images: Vec<Value> = image_urls.iter().map(|url| json!({ "url": url })).collect();
        input["assets"] = json!({ "images": images });
    }

    let mut metadata = Map::new();
    if let Some(ig_type) = args.ig_type {
        metadata.insert("type".into(), json!(ig_type.as_str()));
    }
    if let Some(first_comment) = &args.first_comment {
        metadata.insert("firstComment".into(), json!(first_comment));
    }
    if let Some(url) = &args.link_attachment {
        metadata.insert("linkAttachment".into(), json!({ "url": url }));
    }
    if !metadata.is_empty() {
        input["metadata"] = Value::Object(metadata);
    }

    json!({ "input": input })
}

/// List posts, unwrapping the connection into `{posts, pageInfo}`.
pub async fn list(api: &dyn BufferApi, args: &ListArgs) -> Result<Value> {
    let query = list_query(args.with_assets);
    let data = api.graphql(&query, Some(list_variables(args))).await?;
    let connection: PostConnection =
        serde_json::from_value(data.get("posts").cloned().unwrap_or(Value::Null))
            .context("unexpected posts payload shape")?;
    let posts: Vec<Post> = connection.edges.into_iter().map(|edge| edge.node).collect();
    Ok(json!({ "posts": posts, "pageInfo": connection.page_info }))
}

/// Create a post. Validates `--due-at` and normalizes every image URL
/// before anything goes on the wire; the result is a union
/// (PostActionSuccess | MutationError), printed as returned.
pub async fn create(api: &dyn BufferApi, args: &CreateArgs) -> Result<Value> {
    if let Some(due_at) = &args.due_at {
        DateTime::parse_from_rfc3339(due_at)
            .with_context(|| format!("--due-at '{due_at}' is not a valid ISO-8601 timestamp"))?;
    }

    let mut image_urls = Vec::with_capacity(args.image_url.len());
    for raw in &args.image_url {
        image_urls.push(media::normalize_image_url(raw)?);
    }

    let variables = create_variables(args, &image_urls);
    let data = api.graphql(CREATE_MUTATION, Some(variables)).await?;
    data.get("createPost")
        .cloned()
        .ok_or_else(|| anyhow!("unexpected createPost payload shape"))
}
