//! Secret store implementations
//!
//! - [`StaticSecretStore`] - In-memory records, for tests and local runs
//! - [`KubeSecretStore`] - Kubernetes `Secret` resources (feature `kubernetes`)

#[cfg(feature = "kubernetes")]
mod kubernetes;
mod memory;

#[cfg(feature = "kubernetes")]
pub use kubernetes::KubeSecretStore;
pub use memory::StaticSecretStore;
