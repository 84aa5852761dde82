//! Record List
//!
//! Cards keyed by record id. `upsert` is the only way the page reflects a save.

use crate::models::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// An existing card at this position was replaced in place
    Replaced(usize),
    /// A new card was prepended
    Inserted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordList<R: Record> {
    records: Vec<R>,
}

impl<R: Record> Default for RecordList<R> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<R: Record> RecordList<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn upsert(&mut self, record: R) -> Upsert {
        upsert_by_id(&mut self.records, record)
    }

    /// Patch every record in place (e.g. a renamed reference)
    pub fn update_each(&mut self, f: impl FnMut(&mut R)) {
        self.records.iter_mut().for_each(f);
    }

    pub fn replace_all(&mut self, records: Vec<R>) {
        self.records = records;
    }
}

/// Replace the record with the same id in place, otherwise prepend it
fn upsert_by_id<R: Record>(records: &mut Vec<R>, record: R) -> Upsert {
    match records.iter().position(|r| r.id() == record.id()) {
        Some(index) => {
            records[index] = record;
            Upsert::Replaced(index)
        }
        None => {
            records.insert(0, record);
            Upsert::Inserted
        }
    }
}
