//! Embedding API clients for various providers

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::errors::DocMatchError;
use crate::errors::Result;

/// Supported embedding providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// `OpenAI` embeddings API
    OpenAI,
    /// Azure OpenAI deployment (`model` is the deployment name)
    AzureOpenAI,
    /// Ollama local embeddings
    Ollama,
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = DocMatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "azure" | "azure-openai" | "azure_openai" => Ok(Self::AzureOpenAI),
            "ollama" => Ok(Self::Ollama),
            other => Err(DocMatchError::ConfigError(format!(
                "Unknown embedding provider: {other}"
            ))),
        }
    }
}

#[derive(Deserialize)]
struct OpenAIResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Client for generating embeddings from various providers
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    provider: EmbeddingProvider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    api_version: String,
    dimension: usize,
    client: Client,
}

impl EmbeddingClient {
    /// Create a new embedding client
    pub fn new(config: &crate::config::EmbeddingsConfig) -> Result<Self> {
        let provider = config.provider.parse::<EmbeddingProvider>()?;
        if provider != EmbeddingProvider::Ollama && config.api_key.is_none() {
            return Err(DocMatchError::ConfigError(format!(
                "embeddings.api_key is required for provider {}",
                config.provider
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DocMatchError::HttpError(e.to_string()))?;

        Ok(Self {
            provider,
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            dimension: config.dimension,
            client,
        })
    }

    pub const fn provider(&self) -> EmbeddingProvider {
        self.provider
    }

    /// Generate embedding for a single text
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = match self.provider {
            EmbeddingProvider::OpenAI => self.generate_openai(text).await?,
            EmbeddingProvider::AzureOpenAI => self.generate_azure(text).await?,
            EmbeddingProvider::Ollama => self.generate_ollama(text).await?,
        };

        check_dimension(embedding, self.dimension)
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| DocMatchError::ConfigError("Embedding API key not provided".to_string()))
    }

    /// Generate embedding using `OpenAI` API
    async fn generate_openai(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct OpenAIRequest<'a> {
            input: &'a str,
            model: &'a str,
            dimensions: usize,
        }

        let url = format!("{}/embeddings", self.endpoint);
        debug!("Calling OpenAI embeddings API: {}", url);

        let request = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key()?))
            .json(&OpenAIRequest {
                input: text,
                model: &self.model,
                dimensions: self.dimension,
            });

        first_embedding(self.send(request, "OpenAI").await?.json().await)
    }

    /// Generate embedding using an Azure OpenAI deployment
    async fn generate_azure(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct AzureRequest<'a> {
            input: &'a str,
            dimensions: usize,
        }

        let url = format!(
            "{}/openai/deployments/{}/embeddings?api-version={}",
            self.endpoint, self.model, self.api_version
        );
        debug!("Calling Azure OpenAI embeddings API: {}", url);

        let request = self
            .client
            .post(&url)
            .header("api-key", self.api_key()?)
            .json(&AzureRequest {
                input: text,
                dimensions: self.dimension,
            });

        first_embedding(self.send(request, "Azure OpenAI").await?.json().await)
    }

    /// Generate embedding using Ollama API
    async fn generate_ollama(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            embedding: Vec<f32>,
        }

        let url = format!("{}/api/embeddings", self.endpoint);
        debug!("Calling Ollama embeddings API: {}", url);

        let request = self.client.post(&url).json(&OllamaRequest {
            model: &self.model,
            prompt: text,
        });

        let result: OllamaResponse = self
            .send(request, "Ollama")
            .await?
            .json()
            .await
            .map_err(|e| {
                DocMatchError::EmbeddingServiceFailure(format!("Failed to parse response: {e}"))
            })?;

        Ok(result.embedding)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        provider_name: &str,
    ) -> Result<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DocMatchError::EmbeddingServiceFailure(format!("{provider_name} request timed out"))
            } else {
                DocMatchError::EmbeddingServiceFailure(format!("{provider_name} request failed: {e}"))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DocMatchError::EmbeddingServiceFailure(format!(
                "{provider_name} API error ({status}): {error_text}"
            )));
        }

        Ok(response)
    }
}

/// Reject vectors the `VECTOR(dimension)` column would not accept
fn check_dimension(embedding: Vec<f32>, dimension: usize) -> Result<Vec<f32>> {
    if embedding.is_empty() {
        return Err(DocMatchError::EmbeddingServiceFailure(
            "Provider returned an empty embedding".to_string(),
        ));
    }
    if embedding.len() != dimension {
        return Err(DocMatchError::EmbeddingServiceFailure(format!(
            "Provider returned {} dimensions, expected {dimension}",
            embedding.len()
        )));
    }
    Ok(embedding)
}

fn first_embedding(parsed: reqwest::Result<OpenAIResponse>) -> Result<Vec<f32>> {
    parsed
        .map_err(|e| {
            DocMatchError::EmbeddingServiceFailure(format!("Failed to parse response: {e}"))
        })?
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or_else(|| {
            DocMatchError::EmbeddingServiceFailure("No embedding in response".to_string())
        })
}
