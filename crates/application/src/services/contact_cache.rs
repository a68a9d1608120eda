use dtn_router_domain::{CacheSettings, NodeId};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Bounded table of recently contacted peers and how often each was reached.
///
/// Counts are always at least 1; an entry disappears instead of dropping to
/// zero. Once `counter_threshold` recordings have happened, every further
/// recording first purges the entries whose count is at or below
/// `update_threshold`. The update counter saturates at the threshold and is
/// never reset, so the purge runs on every call from then on.
#[derive(Debug, Clone)]
pub struct ContactCache {
    table: FxHashMap<NodeId, u32>,
    update_counter: u32,
    settings: CacheSettings,
}

impl ContactCache {
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            table: FxHashMap::default(),
            update_counter: 0,
            settings,
        }
    }

    /// Empty cache sharing this cache's settings.
    pub fn fresh(&self) -> Self {
        Self::new(self.settings)
    }

    /// Record one successful hand-off to `node`.
    pub fn record_contact(&mut self, node: NodeId) {
        let counter_threshold = self.settings.counter_threshold();

        if self.update_counter >= counter_threshold {
            self.compact();
        }

        *self.table.entry(node).or_insert(0) += 1;
        self.update_counter = (self.update_counter + 1).min(counter_threshold);
    }

    /// Purge every entry whose count is at or below the update threshold.
    ///
    /// Returns the number of entries removed.
    pub fn compact(&mut self) -> usize {
        let update_threshold = self.settings.update_threshold();
        let before = self.table.len();
        self.table.retain(|_, count| *count > update_threshold);
        let removed = before - self.table.len();

        if removed > 0 {
            debug!(
                removed,
                cache_size = self.table.len(),
                "Contact cache compaction completed"
            );
        }

        removed
    }

    /// Too few distinct peers to discriminate between them.
    pub fn is_cold_start(&self) -> bool {
        self.table.len() <= self.settings.cold_start_threshold()
    }

    pub fn rank(&self, node: NodeId) -> u32 {
        self.table.get(&node).copied().unwrap_or(0)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.table.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn update_counter(&self) -> u32 {
        self.update_counter
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Entries sorted by node id.
    pub fn snapshot(&self) -> Vec<(NodeId, u32)> {
        let mut entries: Vec<_> = self.table.iter().map(|(n, c)| (*n, *c)).collect();
        entries.sort_unstable_by_key(|(node, _)| *node);
        entries
    }
}
