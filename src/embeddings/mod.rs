//! Embedding generation for the vector fallback path
//!
//! Supports OpenAI, Azure OpenAI deployments and Ollama.
//!
//! # Examples
//!
//! ```rust,no_run
//! use docmatch::config::AppConfig;
//! use docmatch::embeddings::EmbeddingClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let client = EmbeddingClient::new(&config.embeddings)?;
//!
//!     let embedding = client.generate("Is the researcher a cofounder? Yes").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
