use anyhow::Result;
use derive_builder::Builder;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};
use url::Url;

use crate::blocks::Block;

#[derive(Builder, Debug)]
pub struct Client {
    #[builder(setter(into))]
    token: String,
    #[builder(setter(into), default = "\"lipwig\".to_string()")]
    channel: String,
    #[builder(default = "Url::parse(\"https://slack.com\").expect(\"hardcoded URL is valid\")")]
    base_url: Url,
    #[builder(default)]
    http_client: reqwest::Client,
}

#[derive(Deserialize, Debug)]
struct PostMessageResponse {
    ok: bool,
    channel: Option<String>,
    ts: Option<String>,
    error: Option<String>,
}

impl Client {
    /// Posts a message made of `blocks` to the configured channel.
    ///
    /// Returns whether Slack accepted the message. A rejected message is
    /// logged, not returned as an error.
    pub async fn post_message(&self, blocks: &[Block]) -> Result<bool> {
        let body: Value = self
            .http_client
            .post(self.base_url.join("api/chat.postMessage")?)
            .bearer_auth(&self.token)
            .json(&json!({
                "channel": self.channel,
                "blocks": blocks,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let resp = PostMessageResponse::deserialize(&body)?;

        if resp.ok {
            debug!(
                "Slack message posted to {}, timestamp: {}",
                resp.channel.unwrap_or_default(),
                resp.ts.unwrap_or_default()
            );
            return Ok(true);
        }

        error!(
            r#"Slack message failed with error: "{}""#,
            resp.error.unwrap_or_default()
        );
        error!("Original response:\n{:#}", body);
        Ok(false)
    }
}
