//! `yams-core`: shared domain building blocks.
//!
//! Identifiers, the document/versioning contract used for optimistic
//! concurrency, and the domain error model. No IO lives here.

pub mod entity;
pub mod error;
pub mod id;
pub mod version;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, PlayerId};
pub use version::ExpectedVersion;
