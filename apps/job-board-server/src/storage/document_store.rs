// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded document store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `jobs`: job id → serialized Job (JSON bytes)
//! - `job-applications`: application id → serialized JobApplication
//!
//! Ids are UUIDv7 strings, so key order is insertion order and a full scan
//! returns documents in the order they were created.
//!
//! ## Transactions
//!
//! Reads run inside one read transaction and see a consistent snapshot.
//! Writes run inside one write transaction that commits only when the
//! closure succeeds. redb admits a single writer at a time, so a
//! read-modify-write inside [`WriteScope::update_one`] cannot lose updates.

use std::path::Path;
use std::sync::Arc;

use redb::{
    backends::InMemoryBackend, Database, ReadTransaction, ReadableDatabase, ReadableTable,
    TableDefinition, WriteTransaction,
};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::models::{InsertOneResult, UpdateResult};

// =============================================================================
// Table Definitions
// =============================================================================

/// A named collection: document id → JSON bytes.
pub type Collection = TableDefinition<'static, &'static str, &'static [u8]>;

/// Job postings.
pub const JOBS: Collection = TableDefinition::new("jobs");

/// Applications submitted against job postings.
pub const JOB_APPLICATIONS: Collection = TableDefinition::new("job-applications");

/// A JSON document stored in one collection under a string id.
pub trait Document: Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);
}

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    /// The stored document cannot take the requested change.
    #[error("conflict: {0}")]
    Conflict(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// DocumentStore
// =============================================================================

/// Handle to the embedded database. Cloning shares the same database.
#[derive(Clone)]
pub struct DocumentStore {
    db: Arc<Database>,
}

impl DocumentStore {
    /// Open (or create) the database file at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        tracing::info!(path = %path.display(), "document store opened");
        Self::from_database(db)
    }

    /// Create a store that lives only in memory.
    pub fn in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Self::from_database(db)
    }

    fn from_database(db: Database) -> StoreResult<Self> {
        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(JOBS)?;
            let _ = write_txn.open_table(JOB_APPLICATIONS)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Run `f` against a consistent snapshot.
    pub fn read<R>(&self, f: impl FnOnce(&ReadScope) -> StoreResult<R>) -> StoreResult<R> {
        let scope = ReadScope {
            txn: self.db.begin_read()?,
        };
        f(&scope)
    }

    /// Run `f` inside one write transaction; commit on `Ok`, abort on `Err`.
    pub fn write<R>(&self, f: impl FnOnce(&WriteScope) -> StoreResult<R>) -> StoreResult<R> {
        let scope = WriteScope {
            txn: self.db.begin_write()?,
        };
        match f(&scope) {
            Ok(value) => {
                scope.txn.commit()?;
                Ok(value)
            }
            Err(e) => {
                scope.txn.abort()?;
                Err(e)
            }
        }
    }

    pub fn find<D: Document>(&self, filter: impl Fn(&D) -> bool) -> StoreResult<Vec<D>> {
        self.read(|scope| scope.find(filter))
    }

    pub fn find_one<D: Document>(&self, id: &str) -> StoreResult<Option<D>> {
        self.read(|scope| scope.find_one(id))
    }

    pub fn insert_one<D: Document>(&self, doc: &mut D) -> StoreResult<InsertOneResult> {
        self.write(|scope| scope.insert_one(doc))
    }

    pub fn update_one<D: Document>(
        &self,
        id: &str,
        mutation: impl FnOnce(&mut D),
    ) -> StoreResult<UpdateResult> {
        self.write(|scope| scope.update_one(id, mutation))
    }

    /// Verify both collections can be opened for reading.
    pub fn health_check(&self) -> StoreResult<()> {
        self.read(|scope| {
            let _ = scope.txn.open_table(JOBS)?;
            let _ = scope.txn.open_table(JOB_APPLICATIONS)?;
            Ok(())
        })
    }
}

// =============================================================================
// Scopes
// =============================================================================

/// Read access inside a single read transaction.
pub struct ReadScope {
    txn: ReadTransaction,
}

impl ReadScope {
    /// All documents of the collection accepted by `filter`, in store order.
    pub fn find<D: Document>(&self, filter: impl Fn(&D) -> bool) -> StoreResult<Vec<D>> {
        let table = self.txn.open_table(D::COLLECTION)?;

        let mut docs = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let doc: D = serde_json::from_slice(value.value())?;
            if filter(&doc) {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    pub fn find_one<D: Document>(&self, id: &str) -> StoreResult<Option<D>> {
        let table = self.txn.open_table(D::COLLECTION)?;
        let bytes = match table.get(id)? {
            Some(value) => value.value().to_vec(),
            None => return Ok(None),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

/// Read and write access inside a single write transaction.
pub struct WriteScope {
    txn: WriteTransaction,
}

impl WriteScope {
    pub fn find_one<D: Document>(&self, id: &str) -> StoreResult<Option<D>> {
        let table = self.txn.open_table(D::COLLECTION)?;
        let bytes = match table.get(id)? {
            Some(value) => value.value().to_vec(),
            None => return Ok(None),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Assign a fresh id to `doc` and store it.
    pub fn insert_one<D: Document>(&self, doc: &mut D) -> StoreResult<InsertOneResult> {
        let id = Uuid::now_v7().to_string();
        doc.set_id(id.clone());
        let json = serde_json::to_vec(doc)?;

        let mut table = self.txn.open_table(D::COLLECTION)?;
        table.insert(id.as_str(), json.as_slice())?;
        Ok(InsertOneResult::new(id))
    }

    /// Apply `mutation` to the document stored under `id`, if any.
    pub fn update_one<D: Document>(
        &self,
        id: &str,
        mutation: impl FnOnce(&mut D),
    ) -> StoreResult<UpdateResult> {
        self.try_update_one(id, |doc: &mut D| {
            mutation(doc);
            Ok(())
        })
    }

    /// Like [`WriteScope::update_one`], but the mutation may refuse the change.
    ///
    /// The document is rewritten only when the mutation changed it.
    pub fn try_update_one<D: Document>(
        &self,
        id: &str,
        mutation: impl FnOnce(&mut D) -> StoreResult<()>,
    ) -> StoreResult<UpdateResult> {
        let mut table = self.txn.open_table(D::COLLECTION)?;

        // Read existing value before mutating the table
        let existing_bytes = {
            match table.get(id)? {
                Some(existing) => existing.value().to_vec(),
                None => return Ok(UpdateResult::unmatched()),
            }
        };

        let mut doc: D = serde_json::from_slice(&existing_bytes)?;
        mutation(&mut doc)?;
        doc.set_id(id.to_string());

        let json = serde_json::to_vec(&doc)?;
        let modified = json != existing_bytes;
        if modified {
            table.insert(id, json.as_slice())?;
        }
        Ok(UpdateResult::matched(modified))
    }
}
