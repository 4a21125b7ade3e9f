//! Content storage for test case input/output files
//!
//! Test case rows hold metadata only; the actual input and expected-output
//! text lives in an object store under structured keys. The store is an
//! external collaborator reached through the [`ContentStore`] trait so that
//! services never touch a concrete client.

mod error;
mod key;
mod memory;
mod object;

pub use error::ContentStoreError;
pub use key::ContentKey;
pub use memory::MemoryContentStore;
pub use object::ObjectContentStore;

use async_trait::async_trait;

/// Opaque key-value blob storage for test case content.
///
/// Single-blob operations are atomic on the provider side; multi-blob
/// sequences (e.g. input + output for one test case) are not, and callers
/// own the resulting consistency trade-off.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Write (or overwrite) a blob.
    async fn put(&self, key: &ContentKey, content: &[u8]) -> Result<(), ContentStoreError>;

    /// Read a blob in full.
    async fn get(&self, key: &ContentKey) -> Result<Vec<u8>, ContentStoreError>;

    /// Delete a blob. Deleting a missing blob is not an error.
    async fn delete(&self, key: &ContentKey) -> Result<(), ContentStoreError>;

    /// Size of a blob in bytes, or an error if it does not exist.
    async fn size(&self, key: &ContentKey) -> Result<u64, ContentStoreError>;
}
