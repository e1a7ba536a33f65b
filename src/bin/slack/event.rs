use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Deserialize, PartialEq, Debug)]
pub struct SnsEvent {
    #[serde(rename = "Records")]
    pub records: Vec<SnsRecord>,
}

#[derive(Deserialize, PartialEq, Debug)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsMessage,
}

/// The part of an SNS record we care about. The timestamp is kept as sent so
/// that it shows up in Slack exactly as SNS formatted it.
#[derive(Deserialize, PartialEq, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct SnsMessage {
    pub topic_arn: String,
    pub timestamp: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub message_attributes: Option<Map<String, Value>>,
}

impl SnsMessage {
    /// The topic name, i.e. the last segment of the topic ARN.
    pub fn topic_name(&self) -> &str {
        self.topic_arn.rsplit(':').next().unwrap_or_default()
    }
}
