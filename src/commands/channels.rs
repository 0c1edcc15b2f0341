use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::buffer::model::Channel;
use crate::buffer::BufferApi;

pub const LIST_QUERY: &str = "\
query ListChannels($input: ChannelsInput!) {
  channels(input: $input) {
    id
    name
    displayName
    service
    avatar
    isQueuePaused
    isLocked
  }
}";

pub const GET_QUERY: &str = "\
query GetChannel($id: ChannelId!) {
  channel(input: { id: $id }) {
    id
    name
    displayName
    service
    avatar
    isQueuePaused
    isLocked
  }
}";

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Organization ID
    #[arg(long, value_name = "ORG_ID")]
    pub org_id: String,
    /// Return only unlocked channels
    #[arg(long)]
    pub unlocked: bool,
}

#[derive(Debug, clap::Args)]
pub struct GetArgs {
    /// Channel ID
    #[arg(long, value_name = "CHANNEL_ID")]
    pub channel_id: String,
}

pub fn list_variables(org_id: &str, unlocked_only: bool) -> Value {
    let mut input = json!({ "organizationId": org_id });
    if unlocked_only {
        input["filter"] = json!({ "isLocked": false });
    }
    json!({ "input": input })
}

pub async fn list(api: &dyn BufferApi, args: &ListArgs) -> Result<Value> {
    let variables = list_variables(&args.org_id, args.unlocked);
    let data = api.graphql(LIST_QUERY, Some(variables)).await?;
    let channels: Vec<Channel> =
        serde_json::from_value(data.get("channels").cloned().unwrap_or(Value::Null))
            .context("unexpected channels payload shape")?;
    Ok(serde_json::to_value(channels)?)
}

pub async fn get(api: &dyn BufferApi, args: &GetArgs) -> Result<Value> {
    let variables = json!({ "id": args.channel_id });
    let data = api.graphql(GET_QUERY, Some(variables)).await?;
    let channel: Channel =
        serde_json::from_value(data.get("channel").cloned().unwrap_or(Value::Null))
            .context("unexpected channel payload shape")?;
    Ok(serde_json::to_value(channel)?)
}
