//! O2IMS Probe Client
//!
//! A small client for the O-RAN O2IMS infrastructure inventory API. It knows
//! the fixed table of inventory endpoints the OMS Operator can probe and
//! performs one plain `GET` per probe, reporting the status line and body.
//!
//! # Example
//!
//! ```no_run
//! use o2ims_client::{Endpoint, O2imsClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = O2imsClient::new("http://localhost:9000", None)?;
//!
//! let endpoint = Endpoint::try_from(0)?;
//! let response = client.get(endpoint).await?;
//! println!("HTTP {} - {}", response.status_line, response.body);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoint;
pub mod error;
#[path = "trait.rs"]
pub mod o2ims_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::{O2imsClient, ProbeResponse};
pub use endpoint::{DEFAULT_BASE_URL, Endpoint};
pub use error::O2imsError;
pub use o2ims_trait::O2imsClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockO2imsClient;
