//! The studio site's application layer: session, records and copy generation.

pub mod auth;
pub mod catalogue;
pub mod error;
pub mod portal;
pub mod prompts;
pub mod store;

pub use auth::{AuthService, MemoryAuth, Session, SessionStream};
pub use catalogue::{Collection, Lead, NewLead, NewProject, Project, Service};
pub use error::{AuthError, StoreError, StudioError};
pub use portal::{Studio, StudioConfig};
pub use store::{
    CollectionPath, Document, DocumentId, DocumentStore, Fields, MemoryStore, Snapshot,
    SnapshotStream,
};
