//! # Procura Infrastructure
//!
//! Adapters between the pure core and the outside world:
//! - HTTP client wrapper over `reqwest`
//! - The scripting-endpoint gateway (`SheetGateway` implementation)
//! - File-backed sent-quotes cache (`SentQuotesStore` implementation)
//! - Configuration loading from environment and files

pub mod cache;
pub mod config;
pub mod errors;
pub mod http;
pub mod sheets;

pub use cache::FileSentQuotesStore;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use sheets::SheetClient;
