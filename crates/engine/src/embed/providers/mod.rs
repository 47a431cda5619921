//! Embedding provider implementations.

pub mod hashed;
pub mod remote;

pub use hashed::HashedProvider;
pub use remote::RemoteProvider;
