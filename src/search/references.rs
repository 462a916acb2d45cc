//! Reverse index from API record names to the topics that mention them.

use crate::model::DocRecord;
use std::collections::HashMap;

/// Maps an API name (function, struct or enum) to the topic names that reference it.
///
/// This is derived state: it is rebuilt from topics as they enter the index and
/// never holds the same topic twice for one key. Names are resolved back to
/// records by [`DocIndex::topics_for`](super::DocIndex::topics_for).
#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    topics_by_api: HashMap<String, Vec<String>>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every API reference of `topic`. Non-topic records are ignored.
    ///
    /// Idempotent: recording the same topic again adds nothing.
    pub fn record_topic(&mut self, topic: &DocRecord) {
        let Some(details) = topic.as_topic() else {
            return;
        };

        for api_name in details.api_references() {
            let topics = self.topics_by_api.entry(api_name.to_string()).or_default();
            if !topics.iter().any(|t| t == &topic.name) {
                topics.push(topic.name.clone());
            }
        }
    }

    /// Drop every edge pointing at `topic_name`.
    pub fn forget_topic(&mut self, topic_name: &str) {
        self.topics_by_api.retain(|_, topics| {
            topics.retain(|t| t != topic_name);
            !topics.is_empty()
        });
    }

    /// Topic names referencing `api_name`, in the order they were recorded.
    pub fn topic_names(&self, api_name: &str) -> &[String] {
        self.topics_by_api
            .get(api_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of API names with at least one referencing topic.
    pub fn len(&self) -> usize {
        self.topics_by_api.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics_by_api.is_empty()
    }

    pub fn clear(&mut self) {
        self.topics_by_api.clear();
    }
}
