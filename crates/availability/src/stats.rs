//! Per-domain availability statistics.

use crate::types::DomainStats;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Point-in-time copy of the stats table, ordered by domain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot(BTreeMap<String, DomainStats>);

impl StatsSnapshot {
    pub fn get(&self, domain: &str) -> Option<&DomainStats> {
        self.0.get(domain)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in lexicographic domain order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DomainStats)> {
        self.0.iter().map(|(domain, stats)| (domain.as_str(), stats))
    }
}

impl FromIterator<(String, DomainStats)> for StatsSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, DomainStats)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Cumulative domain-keyed probe counts since process start.
///
/// Cloning yields another handle to the same table. Every mutation happens
/// under the write lock, so concurrent recorders never lose a count.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    table: Arc<RwLock<BTreeMap<String, DomainStats>>>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `domain` is present, with zero counts if newly added
    pub async fn register(&self, domain: &str) {
        let mut table = self.table.write().await;
        if !table.contains_key(domain) {
            table.insert(domain.to_string(), DomainStats::default());
        }
    }

    /// Count one probe against `domain`
    pub async fn record(&self, domain: &str, healthy: bool) {
        let mut table = self.table.write().await;
        match table.get_mut(domain) {
            Some(stats) => stats.update(healthy),
            None => {
                let mut stats = DomainStats::default();
                stats.update(healthy);
                table.insert(domain.to_string(), stats);
            }
        }
    }

    pub async fn get(&self, domain: &str) -> Option<DomainStats> {
        self.table.read().await.get(domain).copied()
    }

    pub async fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot(self.table.read().await.clone())
    }
}
