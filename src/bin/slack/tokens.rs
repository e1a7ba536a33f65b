//! Look up API tokens of the services we talk to.
//!
//! A token is searched for in an environment variable first, then in SSM
//! Parameter Store.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::env::{self, VarError};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug, PartialEq, Eq)]
#[error("{service} token found in neither environment variables nor SSM Parameter Store")]
pub struct TokenNotFound {
    pub service: String,
}

/// Where to look for the token of a single service.
#[derive(Clone, Debug)]
pub struct TokenSpec {
    pub env_var: String,
    pub parameter: Option<String>,
}

impl TokenSpec {
    pub fn new(env_var: impl Into<String>, parameter: Option<&str>) -> Self {
        Self {
            env_var: env_var.into(),
            parameter: parameter.map(String::from),
        }
    }
}

/// The services Lipwig needs tokens for.
pub fn default_specs() -> HashMap<String, TokenSpec> {
    HashMap::from([(
        "slack".to_string(),
        TokenSpec::new("SLACK_TOKEN", Some("/Lipwig/SlackToken")),
    )])
}

#[async_trait]
pub trait ParameterStore {
    /// Returns the decrypted values of the parameter `name`; empty if there's
    /// no such parameter.
    async fn decrypted_values(&self, name: &str) -> Result<Vec<String>>;
}

#[async_trait]
impl ParameterStore for aws_sdk_ssm::Client {
    async fn decrypted_values(&self, name: &str) -> Result<Vec<String>> {
        let output = self
            .get_parameters()
            .names(name)
            .with_decryption(true)
            .send()
            .await?;

        Ok(output
            .parameters()
            .unwrap_or_default()
            .iter()
            .filter_map(|p| p.value().map(String::from))
            .collect())
    }
}

pub struct Tokens<S> {
    specs: HashMap<String, TokenSpec>,
    store: S,
}

impl<S: ParameterStore> Tokens<S> {
    pub fn new(specs: HashMap<String, TokenSpec>, store: S) -> Self {
        Self { specs, store }
    }

    /// Returns the token of `service`. Fails with [`TokenNotFound`] if neither
    /// source has it. Errors from the parameter store are passed through.
    pub async fn get(&self, service: &str) -> Result<String> {
        let spec = self
            .specs
            .get(service)
            .ok_or_else(|| anyhow!("unknown service: {}", service))?;

        debug!("Looking for the {} token in an environment variable", service);
        match env::var(&spec.env_var) {
            Ok(token) => return Ok(token),
            Err(VarError::NotPresent) => {}
            // set, but not valid unicode
            Err(e) => bail!("{} token in {}: {}", service, spec.env_var, e),
        }

        if let Some(parameter) = &spec.parameter {
            debug!("Looking for the {} token in SSM Parameter Store", service);
            if let Some(token) = self.store.decrypted_values(parameter).await?.into_iter().next() {
                return Ok(token);
            }
        }

        error!("{} token found in neither environment variables nor SSM Parameter Store", service);
        Err(TokenNotFound {
            service: service.to_string(),
        }
        .into())
    }
}
