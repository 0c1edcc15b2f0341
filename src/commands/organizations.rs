use anyhow::{Context, Result};
use serde_json::Value;

use crate::buffer::model::Organization;
use crate::buffer::BufferApi;

pub const LIST_QUERY: &str = "\
query {
  account {
    organizations {
      id
      name
      ownerEmail
    }
  }
}";

/// List the organizations the token's account belongs to.
pub async fn list(api: &dyn BufferApi) -> Result<Value> {
    let data = api.graphql(LIST_QUERY, None).await?;
    let orgs: Vec<Organization> = serde_json::from_value(
        data.pointer("/account/organizations")
            .cloned()
            .unwrap_or(Value::Null),
    )
    .context("unexpected organizations payload shape")?;
    Ok(serde_json::to_value(orgs)?)
}
