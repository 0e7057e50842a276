//! In-memory [`Store`].
//!
//! Intended for tests and `serve --in-memory`.  Counters start at 1 like a
//! freshly created Postgres sequence.  Faults can be armed to make a given
//! statement fail, which is how the failure paths of the repositories and
//! adapters get exercised without a database.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::models::{AddressRow, PersonRow};
use crate::store::{RowStream, Sequence, Store};
use crate::DbError;

/// A statement that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    NextVal(Sequence),
    InsertAddress,
    InsertPerson,
    /// Every select, single-row and streamed.
    Select,
}

#[derive(Debug)]
pub struct MemoryStore {
    addresses: RwLock<BTreeMap<i32, AddressRow>>,
    persons: RwLock<BTreeMap<i32, PersonRow>>,
    address_seq: AtomicI64,
    person_seq: AtomicI64,
    faults: RwLock<HashSet<Fault>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            addresses: RwLock::default(),
            persons: RwLock::default(),
            address_seq: AtomicI64::new(0),
            person_seq: AtomicI64::new(0),
            faults: RwLock::default(),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent execution of `fault`'s statement fail.
    pub fn arm(&self, fault: Fault) {
        if let Ok(mut faults) = self.faults.write() {
            faults.insert(fault);
        }
    }

    pub fn disarm(&self, fault: Fault) {
        if let Ok(mut faults) = self.faults.write() {
            faults.remove(&fault);
        }
    }

    /// Move `sequence` so the next value handed out is `last + 1`.
    pub fn set_sequence(&self, sequence: Sequence, last: i64) {
        self.counter(sequence).store(last, Ordering::SeqCst);
    }

    pub fn address_count(&self) -> usize {
        self.addresses.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn person_count(&self) -> usize {
        self.persons.read().map(|rows| rows.len()).unwrap_or(0)
    }

    fn counter(&self, sequence: Sequence) -> &AtomicI64 {
        match sequence {
            Sequence::Address => &self.address_seq,
            Sequence::Person => &self.person_seq,
        }
    }

    fn check(&self, fault: Fault) -> Result<(), DbError> {
        let faults = self
            .faults
            .read()
            .map_err(|_| DbError::Store("lock poisoned".to_string()))?;
        if faults.contains(&fault) {
            return Err(DbError::Store(format!("injected fault: {fault:?}")));
        }
        Ok(())
    }

    fn persons_where(&self, keep: impl Fn(&PersonRow) -> bool) -> Result<Vec<PersonRow>, DbError> {
        self.check(Fault::Select)?;
        let persons = self
            .persons
            .read()
            .map_err(|_| DbError::Store("lock poisoned".to_string()))?;
        Ok(persons.values().filter(|row| keep(row)).cloned().collect())
    }
}

fn stream_of<'a>(rows: Result<Vec<PersonRow>, DbError>) -> RowStream<'a, PersonRow> {
    match rows {
        Ok(rows) => Box::pin(tokio_stream::iter(rows.into_iter().map(Ok))),
        Err(e) => Box::pin(tokio_stream::once(Err(e))),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn next_val(&self, sequence: Sequence) -> Result<i64, DbError> {
        self.check(Fault::NextVal(sequence))?;
        Ok(self.counter(sequence).fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn select_address(&self, id: i32) -> Result<Option<AddressRow>, DbError> {
        self.check(Fault::Select)?;
        let addresses = self
            .addresses
            .read()
            .map_err(|_| DbError::Store("lock poisoned".to_string()))?;
        Ok(addresses.get(&id).cloned())
    }

    async fn insert_address(&self, row: &AddressRow) -> Result<u64, DbError> {
        self.check(Fault::InsertAddress)?;
        let mut addresses = self
            .addresses
            .write()
            .map_err(|_| DbError::Store("lock poisoned".to_string()))?;
        if addresses.contains_key(&row.id) {
            return Err(DbError::Store(format!("duplicate key ADDRESS.ID = {}", row.id)));
        }
        addresses.insert(row.id, row.clone());
        Ok(1)
    }

    async fn select_person(&self, id: i32) -> Result<Option<PersonRow>, DbError> {
        self.check(Fault::Select)?;
        let persons = self
            .persons
            .read()
            .map_err(|_| DbError::Store("lock poisoned".to_string()))?;
        Ok(persons.get(&id).cloned())
    }

    fn select_all_person(&self) -> RowStream<'_, PersonRow> {
        stream_of(self.persons_where(|_| true))
    }

    fn select_all_person_firstname<'a>(&'a self, firstname: &'a str) -> RowStream<'a, PersonRow> {
        stream_of(self.persons_where(|row| row.firstname == firstname))
    }

    async fn insert_person(&self, row: &PersonRow) -> Result<u64, DbError> {
        self.check(Fault::InsertPerson)?;
        let addresses = self
            .addresses
            .read()
            .map_err(|_| DbError::Store("lock poisoned".to_string()))?;
        if !addresses.contains_key(&row.address_id) {
            return Err(DbError::Store(format!(
                "foreign key violation: ADDRESS.ID = {} does not exist",
                row.address_id
            )));
        }
        let mut persons = self
            .persons
            .write()
            .map_err(|_| DbError::Store("lock poisoned".to_string()))?;
        if persons.contains_key(&row.id) {
            return Err(DbError::Store(format!("duplicate key PERSON.ID = {}", row.id)));
        }
        persons.insert(row.id, row.clone());
        Ok(1)
    }
}
