//! Synchronization store for the decentralized-storage file manager.
//!
//! This crate owns the observable projection of remote file state: the file
//! list, the current selection, the active inline edit mode, and the derived
//! permission list of the selected file. Every user intent is mediated
//! through the [`datastore_host`] gateway contract and republished as
//! observable state for the presentation layer to render from. The actual
//! storage, encryption, and chain interaction live behind the gateway.

pub mod context;
pub mod signal;
pub mod store;

pub use context::StoreContext;
pub use signal::{StateCell, Subscription};
pub use store::{EditMode, FileManagerStore, StoreError};
