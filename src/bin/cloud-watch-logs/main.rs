#![deny(clippy::all, clippy::nursery)]
#![deny(nonstandard_style, rust_2018_idioms)]

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::env;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let level = match env::var("LOG_LEVEL") {
        Ok(level) => level.parse()?,
        Err(_) => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();

    lambda_runtime::run(service_fn(handler)).await?;
    Ok(())
}

// Log the whole event so that it ends up in CloudWatch Logs
async fn handler(event: LambdaEvent<Value>) -> Result<(), Error> {
    info!("{}", describe(&event.payload));
    Ok(())
}

fn describe(event: &Value) -> String {
    format!("New event:\n{:#}", event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_runtime::Context;
    use pretty_assertions::assert_eq;

    const EVENT: &str = include_str!("../slack/testdata/events/text_message.json");

    #[test]
    fn test_describe() {
        let event: Value = serde_json::from_str(EVENT).unwrap();

        assert_eq!(describe(&event), format!("New event:\n{}", EVENT.trim_end()));
    }

    #[tokio::test]
    async fn test_handler() {
        let event = serde_json::from_str(EVENT).unwrap();

        handler(LambdaEvent::new(event, Context::default())).await.unwrap();
    }
}
