//! The authoritative in-memory store of documentation records.

use super::query::SearchQuery;
use super::references::ReferenceGraph;
use crate::model::{DocRecord, RecordKind};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Record counts reported by [`DocIndex::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub total: usize,
    pub functions: usize,
    pub structs: usize,
    pub enums: usize,
    pub topics: usize,
    pub categories: usize,
}

/// Name, kind and brief of a record, used when rendering cross-references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BriefInfo<'a> {
    pub name: &'a str,
    pub kind: RecordKind,
    pub brief: &'a str,
}

/// Searchable index of functions, structs, enums and topics.
///
/// Records are keyed by name across all kinds. Adding a record whose name is
/// already present replaces the earlier one in place (last write wins), so a
/// function and a struct can never share a name.
///
/// The index is built by sequential [`add`](Self::add) calls and is not meant
/// to be mutated while shared. Once built it can be wrapped in an `Arc` and
/// read from any number of threads; a rebuild produces a new index that
/// replaces the old one wholesale.
#[derive(Debug, Clone, Default)]
pub struct DocIndex {
    /// Records in first-insertion order
    records: Vec<DocRecord>,
    /// Name → slot in `records`
    positions: HashMap<String, usize>,
    /// Slots per kind, ascending
    by_kind: [Vec<usize>; 4],
    /// Slots per non-empty category, ascending
    by_category: BTreeMap<String, Vec<usize>>,
    references: ReferenceGraph,
}

const fn kind_slot(kind: RecordKind) -> usize {
    match kind {
        RecordKind::Function => 0,
        RecordKind::Struct => 1,
        RecordKind::Enum => 2,
        RecordKind::Topic => 3,
    }
}

fn insert_sorted(bucket: &mut Vec<usize>, slot: usize) {
    if let Err(at) = bucket.binary_search(&slot) {
        bucket.insert(at, slot);
    }
}

fn remove_sorted(bucket: &mut Vec<usize>, slot: usize) {
    if let Ok(at) = bucket.binary_search(&slot) {
        bucket.remove(at);
    }
}

impl DocIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record with the same name.
    ///
    /// A replaced record keeps its original position in insertion order.
    pub fn add(&mut self, record: DocRecord) {
        if let Some(&slot) = self.positions.get(&record.name) {
            let previous = std::mem::replace(&mut self.records[slot], record);
            tracing::trace!(
                "Replacing {} '{}' with {}",
                previous.kind(),
                previous.name,
                self.records[slot].kind()
            );
            self.unlink(slot, &previous);
            self.link(slot);
        } else {
            let slot = self.records.len();
            self.positions.insert(record.name.clone(), slot);
            self.records.push(record);
            self.link(slot);
        }
    }

    fn link(&mut self, slot: usize) {
        let record = &self.records[slot];
        insert_sorted(&mut self.by_kind[kind_slot(record.kind())], slot);

        if let Some(category) = record.category() {
            insert_sorted(
                self.by_category.entry(category.to_string()).or_default(),
                slot,
            );
        }

        if record.kind() == RecordKind::Topic {
            self.references.record_topic(record);
        }
    }

    fn unlink(&mut self, slot: usize, previous: &DocRecord) {
        remove_sorted(&mut self.by_kind[kind_slot(previous.kind())], slot);

        if let Some(category) = previous.category()
            && let Some(bucket) = self.by_category.get_mut(category)
        {
            remove_sorted(bucket, slot);
            if bucket.is_empty() {
                self.by_category.remove(category);
            }
        }

        if previous.kind() == RecordKind::Topic {
            self.references.forget_topic(&previous.name);
        }
    }

    /// Exact, case-sensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&DocRecord> {
        self.positions.get(name).map(|&slot| &self.records[slot])
    }

    pub fn brief_for(&self, name: &str) -> Option<BriefInfo<'_>> {
        self.find(name).map(|record| BriefInfo {
            name: &record.name,
            kind: record.kind(),
            brief: record.brief(),
        })
    }

    /// Filter, rank and truncate records.
    ///
    /// Kind and category filters run first, over all records in insertion
    /// order. With keywords, records that match none of them are dropped and
    /// the rest are stably sorted by descending relevance score. Without
    /// keywords, insertion order is kept.
    pub fn search(&self, query: SearchQuery<'_>) -> Vec<&DocRecord> {
        let filtered = self
            .records
            .iter()
            .filter(|r| query.kind.is_none_or(|kind| r.kind() == kind))
            .filter(|r| {
                query
                    .category
                    .is_none_or(|category| r.category.as_deref() == Some(category))
            });

        let mut results: Vec<&DocRecord> = match query.keywords_text() {
            Some(text) => {
                let mut scored: Vec<(u32, &DocRecord)> = filtered
                    .filter(|r| r.matches(text))
                    .map(|r| (r.relevance_score(text), r))
                    .collect();
                scored.sort_by(|(a, _), (b, _)| b.cmp(a));
                scored.into_iter().map(|(_, r)| r).collect()
            }
            None => filtered.collect(),
        };

        results.truncate(query.limit);
        results
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.by_category.keys().map(String::as_str).collect()
    }

    /// Records in `category` in insertion order. Unknown categories yield an empty list.
    pub fn items_in_category(&self, category: &str) -> Vec<&DocRecord> {
        self.by_category
            .get(category)
            .map(|slots| slots.iter().map(|&slot| &self.records[slot]).collect())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total: self.records.len(),
            functions: self.count(RecordKind::Function),
            structs: self.count(RecordKind::Struct),
            enums: self.count(RecordKind::Enum),
            topics: self.count(RecordKind::Topic),
            categories: self.by_category.len(),
        }
    }

    pub fn count(&self, kind: RecordKind) -> usize {
        self.by_kind[kind_slot(kind)].len()
    }

    /// Records of one kind in insertion order.
    pub fn of_kind(&self, kind: RecordKind) -> impl Iterator<Item = &DocRecord> {
        self.by_kind[kind_slot(kind)]
            .iter()
            .map(|&slot| &self.records[slot])
    }

    pub fn functions(&self) -> impl Iterator<Item = &DocRecord> {
        self.of_kind(RecordKind::Function)
    }

    pub fn structs(&self) -> impl Iterator<Item = &DocRecord> {
        self.of_kind(RecordKind::Struct)
    }

    pub fn enums(&self) -> impl Iterator<Item = &DocRecord> {
        self.of_kind(RecordKind::Enum)
    }

    pub fn topics(&self) -> impl Iterator<Item = &DocRecord> {
        self.of_kind(RecordKind::Topic)
    }

    /// Topics sorted by reading order; unordered topics come last, ties keep insertion order.
    pub fn topics_ordered(&self) -> Vec<&DocRecord> {
        let mut topics: Vec<&DocRecord> = self.topics().collect();
        topics.sort_by_key(|topic| {
            match topic.as_topic().and_then(|t| t.reading_order) {
                Some(order) => (0, order),
                None => (1, 0),
            }
        });
        topics
    }

    /// Topics that reference `api_name`, skipping names that no longer resolve to a topic.
    pub fn topics_for(&self, api_name: &str) -> Vec<&DocRecord> {
        self.references
            .topic_names(api_name)
            .iter()
            .filter_map(|name| self.find(name))
            .filter(|record| record.kind() == RecordKind::Topic)
            .collect()
    }

    pub const fn references(&self) -> &ReferenceGraph {
        &self.references
    }

    /// All records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &DocRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record and all derived state.
    pub fn clear(&mut self) {
        self.records.clear();
        self.positions.clear();
        for bucket in &mut self.by_kind {
            bucket.clear();
        }
        self.by_category.clear();
        self.references.clear();
    }
}

impl Extend<DocRecord> for DocIndex {
    fn extend<I: IntoIterator<Item = DocRecord>>(&mut self, iter: I) {
        for record in iter {
            self.add(record);
        }
    }
}

impl FromIterator<DocRecord> for DocIndex {
    fn from_iter<I: IntoIterator<Item = DocRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
