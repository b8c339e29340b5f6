//! Hardware Profile Client
//!
//! Typed access to dashboard and infrastructure hardware profiles in the
//! Kubernetes API. The migration controller only talks to the cluster
//! through [`ProfileClientTrait`], so it can run against
//! [`KubeProfileClient`] in production and an in-memory store in tests.
//!
//! # Example
//!
//! ```no_run
//! use profile_client::{KubeProfileClient, ListSelector, ProfileClientTrait};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = KubeProfileClient::new(kube::Client::try_default().await?);
//!
//! // Every legacy profile visible to our credentials
//! let legacy = client.list_dashboard_profiles(&ListSelector::all()).await?;
//!
//! for profile in legacy {
//!     let ns = profile.metadata.namespace.as_deref().unwrap_or("default");
//!     let name = profile.metadata.name.as_deref().unwrap_or_default();
//!     match client.get_hardware_profile(ns, name).await {
//!         Ok(_) => println!("{ns}/{name} already has a replacement"),
//!         Err(e) if e.is_not_found() => println!("{ns}/{name} needs migrating"),
//!         Err(e) => return Err(e.into()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod selector;
#[path = "trait.rs"]
pub mod profile_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::KubeProfileClient;
pub use error::ProfileClientError;
pub use profile_trait::ProfileClientTrait;
pub use selector::{LabelRequirement, ListSelector};
#[cfg(feature = "test-util")]
pub use mock::{MockOperation, MockProfileClient};
