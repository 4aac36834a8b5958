//! # Arcanum Key Store
//!
//! In-process registry mapping opaque key identifiers to key material.
//!
//! Keys live for the lifetime of the process. There is no persistence, no
//! update and no delete: a record is inserted once by the key generator and
//! only ever read afterwards.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod record;
pub mod store;

pub use error::KeyStoreError;
pub use memory::MemoryKeyStore;
pub use record::{KeyId, KeyKind, KeyRecord};
pub use store::KeyStore;
