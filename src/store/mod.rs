pub mod memory;

use std::collections::BTreeMap;
use std::fmt;

pub use memory::MemoryStore;

/// A stored document: field name to JSON value.
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("batch conflicted with a concurrent write: {reason}")]
    Conflict { reason: String },

    #[error("batch rejected: {reason}")]
    Rejected { reason: String },

    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Location of a document in the aggregate store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentPath {
    /// `pools/{pool}`
    Pool { pool: String },
    /// `pools/{pool}/mints/{mint}`
    PoolMint { pool: String, mint: String },
    /// `mints/{mint}/pools/{pool}`
    MintPool { mint: String, pool: String },
    /// `users/{user}/transactions/{signature}`
    UserTransaction { user: String, signature: String },
}

impl DocumentPath {
    pub fn pool(pool: impl fmt::Display) -> Self {
        Self::Pool {
            pool: pool.to_string(),
        }
    }

    pub fn pool_mint(pool: impl fmt::Display, mint: impl fmt::Display) -> Self {
        Self::PoolMint {
            pool: pool.to_string(),
            mint: mint.to_string(),
        }
    }

    pub fn mint_pool(mint: impl fmt::Display, pool: impl fmt::Display) -> Self {
        Self::MintPool {
            mint: mint.to_string(),
            pool: pool.to_string(),
        }
    }

    pub fn user_transaction(user: impl fmt::Display, signature: &str) -> Self {
        Self::UserTransaction {
            user: user.to_string(),
            signature: signature.to_string(),
        }
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool { pool } => write!(f, "pools/{pool}"),
            Self::PoolMint { pool, mint } => write!(f, "pools/{pool}/mints/{mint}"),
            Self::MintPool { mint, pool } => write!(f, "mints/{mint}/pools/{pool}"),
            Self::UserTransaction { user, signature } => {
                write!(f, "users/{user}/transactions/{signature}")
            }
        }
    }
}

/// How a single field of a merge-write mutates the stored document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Overwrite the field.
    Set(serde_json::Value),
    /// Add to the field, treating an absent or non-numeric field as zero.
    Increment(i64),
    /// Append each value not already present.
    ArrayUnion(Vec<serde_json::Value>),
    /// Remove every element equal to one of the values.
    ArrayRemove(Vec<serde_json::Value>),
    /// The store's own commit time.
    ServerTimestamp,
}

/// A merge-write: named fields change, all others are left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWrite {
    pub path: DocumentPath,
    pub fields: BTreeMap<String, FieldValue>,
}

impl DocumentWrite {
    pub fn merge(path: DocumentPath) -> Self {
        Self {
            path,
            fields: BTreeMap::new(),
        }
    }

    pub fn set(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields
            .insert(field.to_string(), FieldValue::Set(value.into()));
        self
    }

    pub fn increment(mut self, field: &str, delta: i64) -> Self {
        self.fields
            .insert(field.to_string(), FieldValue::Increment(delta));
        self
    }

    pub fn array_union(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields
            .insert(field.to_string(), FieldValue::ArrayUnion(vec![value.into()]));
        self
    }

    pub fn array_remove(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields
            .insert(field.to_string(), FieldValue::ArrayRemove(vec![value.into()]));
        self
    }

    pub fn server_timestamp(mut self, field: &str) -> Self {
        self.fields
            .insert(field.to_string(), FieldValue::ServerTimestamp);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// Ordered writes committed together. Later writes to the same document apply after earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteSet {
    writes: Vec<DocumentWrite>,
}

impl WriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, write: DocumentWrite) {
        self.writes.push(write);
    }

    pub fn extend(&mut self, other: WriteSet) {
        self.writes.extend(other.writes);
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentWrite> {
        self.writes.iter()
    }

    pub fn writes_to<'a>(
        &'a self,
        path: &DocumentPath,
    ) -> impl Iterator<Item = &'a DocumentWrite> + use<'a> {
        let path = path.clone();
        self.writes.iter().filter(move |w| w.path == path)
    }
}

impl From<Vec<DocumentWrite>> for WriteSet {
    fn from(writes: Vec<DocumentWrite>) -> Self {
        Self { writes }
    }
}

impl IntoIterator for WriteSet {
    type Item = DocumentWrite;
    type IntoIter = std::vec::IntoIter<DocumentWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

/// A transactional document store that applies a [`WriteSet`] atomically.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Apply every write or none of them.
    async fn commit(&self, batch: WriteSet) -> Result<(), StoreError>;

    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError>;
}
