//! Project/comment store façade
//!
//! The only component allowed to mutate persisted project and comment
//! documents. Every operation loads the target document, consults the access
//! policy, then mutates and writes back the authoritative result.

pub mod async_facade;
pub mod error;
pub mod facade;
pub mod memory;

pub use async_facade::AsyncProjectFacade;
pub use error::StoreError;
pub use facade::{NewProject, ProjectFacade, ProjectPatch};
pub use memory::MemoryStore;
