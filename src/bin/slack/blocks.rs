use derive_builder::Builder;
use serde::Serialize;
use serde_json::Value;

use crate::event::SnsMessage;

/// Slack rejects section texts of 3,000 characters or more.
const MAX_SECTION_LEN: usize = 3000;

/// How much of the raw message to show when it doesn't fit.
const RAW_PREFIX_LEN: usize = 2950;

/// A Slack layout block, serialized the way `chat.postMessage` expects it.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Section { text: Markdown },
    Divider,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[serde(tag = "type", rename = "mrkdwn")]
pub struct Markdown {
    pub text: String,
}

impl Block {
    pub fn section(text: impl Into<String>) -> Self {
        Self::Section {
            text: Markdown { text: text.into() },
        }
    }
}

#[derive(Builder, Clone, Debug)]
pub struct Formatter {
    /// Separate consecutive sections with a divider block.
    #[builder(default = "true")]
    insert_dividers: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        FormatterBuilder::default().build().expect("default formatter is valid")
    }
}

impl Formatter {
    /// Lays out an SNS message as Slack blocks: a header naming the topic,
    /// the message itself and, if there are any, the message attributes.
    ///
    /// JSON messages and attributes are shown as indented JSON in a code
    /// block. Anything else is shown as is, cut to fit into a section.
    pub fn format(&self, sns: &SnsMessage) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut add_section = |text: String| {
            if self.insert_dividers && !blocks.is_empty() {
                blocks.push(Block::Divider);
            }
            blocks.push(Block::section(text));
        };

        add_section(header(sns));
        add_section(message(&sns.message));

        if let Some(attributes) = sns.message_attributes.as_ref().filter(|a| !a.is_empty()) {
            add_section(format!(
                "*Attributes:*\n```\n{:#}\n```",
                Value::Object(attributes.clone())
            ));
        }

        blocks
    }
}

fn header(sns: &SnsMessage) -> String {
    let mut text = format!(
        r#"New message on topic "{}" received at {}"#,
        sns.topic_name(),
        sns.timestamp
    );
    if let Some(subject) = sns.subject.as_deref().filter(|s| !s.is_empty()) {
        text.push_str(&format!("\nSubject: *{}*", subject));
    }
    text
}

fn message(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(json) => {
            let text = format!("*Message:*\n```\n{:#}\n```", json);
            if text.chars().count() >= MAX_SECTION_LEN {
                format!(
                    "Message too long. Showing raw prefix:\n{}",
                    truncate(raw, RAW_PREFIX_LEN)
                )
            } else {
                text
            }
        }
        // not JSON, probably plain text
        Err(_) => format!("*Message:*\n{}", truncate(raw, RAW_PREFIX_LEN)),
    }
}

/// Returns the first `max_chars` characters of `s`.
fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
