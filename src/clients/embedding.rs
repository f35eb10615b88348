use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::EmbeddingConfig;

/// Client for the external feature-extraction endpoint that turns a message
/// into a fixed-size vector. Speaks the common `/embeddings` JSON shape so a
/// local inference server or a hosted one both work.
#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    base_url: String,
    model: String,
    dimension: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl EmbeddingClient {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(
                config.request_timeout_seconds.into(),
            ))
            .user_agent("Bisik/1.0")
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build embedding HTTP client: {e}"))?;

        Ok(Self::with_shared_client(client, config))
    }

    #[must_use]
    pub fn with_shared_client(client: Client, config: &EmbeddingConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimension: config.dimension,
        }
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/embeddings", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: text,
            })
            .send()
            .await
            .context("Embedding request failed")?;

        if !response.status().is_success() {
            bail!("Embedding endpoint returned {}", response.status());
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .context("Failed to decode embedding response")?;

        let first = body
            .data
            .into_iter()
            .next()
            .context("Embedding response contained no vectors")?;

        if first.embedding.len() != self.dimension {
            bail!(
                "Embedding dimension mismatch: expected {}, got {}",
                self.dimension,
                first.embedding.len()
            );
        }

        Ok(first.embedding)
    }
}
