//! Typed contracts and shared models for the decentralized datastore boundary.
//!
//! This crate is the API-first boundary between the file manager core and the
//! external datastore. It exposes the shared file models, the async gateway
//! service trait with its change-event subscription, upload/download helper
//! contracts, and small scheduling contracts, while concrete browser or RPC
//! adapters live in the embedding application.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod files;
pub mod payload;
pub mod saver;
pub mod schedule;

pub use files::memory::MemoryDatastoreGateway;
pub use files::service::{
    ChangeListener, DatastoreGateway, GatewayFuture, NoopDatastoreGateway,
};
pub use files::types::{
    DatastoreEvent, FileContent, FileId, FilePermissions, FileRecord, PermissionGrant,
};
pub use payload::{FilePayload, MemoryFilePayload, PayloadFuture};
pub use saver::{FileSaver, MemoryFileSaver, NoopFileSaver, SaverFuture};
pub use schedule::{DelayTimer, ImmediateDelay, LocalTask, NoopTaskSpawner, TaskSpawner, TimerFuture};
