#![deny(clippy::all, clippy::nursery)]
#![deny(nonstandard_style, rust_2018_idioms)]

use anyhow::{anyhow, Result};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde::Serialize;
use tracing::{debug, error};

mod blocks;
mod config;
mod event;
mod slack;
mod tokens;

use blocks::{Formatter, FormatterBuilder};
use config::Config;
use event::SnsEvent;
use tokens::Tokens;

#[derive(Serialize, PartialEq, Eq, Debug)]
struct Output {
    posted: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false)
        .without_time()
        .init();

    // Resolved once per container, not per invocation
    let ssm = aws_sdk_ssm::Client::new(&aws_config::load_from_env().await);
    let token = Tokens::new(tokens::default_specs(), ssm).get("slack").await?;

    let slack = &slack::ClientBuilder::default()
        .token(token)
        .channel(config.channel)
        .build()?;
    let formatter = &FormatterBuilder::default()
        .insert_dividers(config.insert_dividers)
        .build()?;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<SnsEvent>| async move {
        handler(event.payload, slack, formatter).await.map_err(|e| {
            error!("{:?}", e); // log error chain to CloudWatch
            e
        })
    }))
    .await?;

    Ok(())
}

async fn handler(event: SnsEvent, slack: &slack::Client, formatter: &Formatter) -> Result<Output> {
    debug!("Slack handler triggered");

    let record = event
        .records
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("no SNS record in event"))?;

    let blocks = formatter.format(&record.sns);
    let posted = slack.post_message(&blocks).await?;

    Ok(Output { posted })
}
