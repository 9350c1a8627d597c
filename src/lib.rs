#![warn(unreachable_pub, unused_qualifications)]

//! *A small Rust client for the Gemini `generateContent` endpoint.*
//!
//! # Overview
//!
//! Every call sends one text prompt and comes back as an [Envelope]: the HTTP status plus the
//! decoded [types::Response], if the server sent one. Awaiting a call never fails; a status of
//! `-1` means no usable response was obtained.
//!
//! - Safety settings and content filtering ([SafetySettingsBuilder])
//! - Sampling configuration (temperature, tokens, etc.) ([GenerationConfigBuilder])
//! - Per-client defaults with per-call overrides ([Config])
//!
//! # Authentication
//!
//! The API key is passed in the [Config], either directly or from the `GEMINI_API_KEY`
//! environment variable via [Config::from_env]. It is sent as the `key` query parameter.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use gemini_generate::{Client, Config, Model};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new(Config::with_model("my-api-key", Model::Gemini25Flash));
//!
//!     let envelope = client
//!         .generate_content("What is Rust's ownership model?")
//!         .await;
//!
//!     match envelope.body {
//!         Some(response) if envelope.is_success() => println!("{response}"),
//!         _ => eprintln!("request failed with status {}", envelope.status),
//!     }
//! }
//! ```
//!
//! # Overrides
//!
//! ```rust,no_run
//! # async fn run(client: gemini_generate::Client) {
//! use gemini_generate::Config;
//!
//! let mut request = client.generate_content("Write a haiku about borrowing");
//! request
//!     .safety_settings(Config::relaxed_safety_settings())
//!     .generation_config(Config::creative_generation_config());
//! let envelope = request.await;
//! # }
//! ```

mod builder;
mod client;
mod config;
mod error;
pub mod types;

pub type Result<T> = std::result::Result<T, Error>;

pub use builder::{GenerationConfigBuilder, SafetySettingsBuilder};
pub use client::{Client, GenerateContent, Route};
pub use config::{Config, ConfigBuilder, Model};
pub use error::Error;
pub use types::Envelope;
