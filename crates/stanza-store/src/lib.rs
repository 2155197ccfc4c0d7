//! Stanza Storage Layer
//!
//! The storage adapter contract plus a reference implementation.
//!
//! # Core Concepts
//!
//! - [`StorageAdapter`]: the operation set any backing store implements;
//!   the entire persistence boundary the rest of the system may use
//! - [`MemoryStore`]: in-memory reference implementation
//! - [`MigratingStore`]: decorator guaranteeing callers only see
//!   current-schema artifacts
//! - [`StoreError`]: not-found / validation / migration / backend taxonomy
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use stanza_artifact::{MigrationEngine, TypeRegistry};
//! use stanza_store::{MemoryStore, MigratingStore, NewProject, StorageAdapter};
//!
//! # async fn example() -> Result<(), stanza_store::StoreError> {
//! let registry = Arc::new(TypeRegistry::with_defaults());
//! let engine = Arc::new(MigrationEngine::with_defaults(Arc::clone(&registry)));
//! let store = MigratingStore::new(MemoryStore::new(registry), engine);
//!
//! let project = store.create_project(NewProject::new("Course", "alice")).await?;
//! assert!(store.artifacts(project.id, None).await?.is_empty());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod adapter;
mod error;
mod memory;
mod migrate;

// Re-exports
pub use adapter::{NewProject, ProjectPatch, StorageAdapter};
pub use error::{EntityKind, StoreError};
pub use memory::MemoryStore;
pub use migrate::MigratingStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
