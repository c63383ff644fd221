//! Text-generation backends for deck content.
//!
//! Both supported backends speak the OpenAI chat-completions protocol; the
//! [`Backend`] only decides the default endpoint and model.

pub mod client;
pub mod config;

pub use client::ProviderClient;
pub use config::{Backend, ProviderConfig};
