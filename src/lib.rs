//! Async client for the Kopeechka.Store disposable-email rental API.
//!
//! Order throwaway addresses per website, poll their inboxes, and release them. Every
//! request passes through a FIFO rate limiter, and issued addresses live in a TTL-bounded
//! cache.
//!
//! ```no_run
//! use kopeechka_store::{
//! 	client::{OrderOptions, ReqwestStoreClient, WaitOptions},
//! 	config::ClientConfig,
//! };
//!
//! # async fn demo() -> kopeechka_store::error::Result<()> {
//! let client = ReqwestStoreClient::new(ClientConfig::new("your-api-key")?)?;
//! let email = client.order_email("example.com", OrderOptions::default()).await?;
//! let message = client.wait_message(&email, WaitOptions::default()).await?;
//!
//! println!("{email}: {message}");
//!
//! client.cancel_email(&email).await?;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod limiter;
pub mod obs;
pub mod provider;

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
