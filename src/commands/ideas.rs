use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use crate::buffer::BufferApi;

pub const CREATE_MUTATION: &str = "\
mutation CreateIdea($input: CreateIdeaInput!) {
  createIdea(input: $input) {
    ... on Idea {
      id
      content {
        title
        text
      }
    }
    ... on MutationError {
      message
    }
  }
}";

#[derive(Debug, clap::Args)]
pub struct CreateArgs {
    /// Organization ID
    #[arg(long, value_name = "ORG_ID")]
    pub org_id: String,
    /// Idea title
    #[arg(long)]
    pub title: String,
    /// Idea body text
    #[arg(long)]
    pub text: String,
}

pub fn create_variables(org_id: &str, title: &str, text: &str) -> Value {
    json!({
        "input": {
            "organizationId": org_id,
            "content": {
                "title": title,
                "text": text,
            },
        }
    })
}

/// Create a content idea. The result is a union (Idea | MutationError),
/// so it is printed as returned.
pub async fn create(api: &dyn BufferApi, args: &CreateArgs) -> Result<Value> {
    let variables = create_variables(&args.org_id, &args.title, &args.text);
    let data = api.graphql(CREATE_MUTATION, Some(variables)).await?;
    data.get("createIdea")
        .cloned()
        .ok_or_else(|| anyhow!("unexpected createIdea payload shape"))
}
