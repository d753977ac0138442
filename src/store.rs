use crate::models::Lead;
use moka::future::Cache;

/// In-memory lead store, keyed by email.
///
/// Holds at most one lead per email for the life of the process. No TTL and
/// no capacity bound: entries live until consumed by a correlated booking
/// event or until the process exits. Cloning is cheap and all clones share
/// the same underlying cache.
#[derive(Clone)]
pub struct LeadStore {
    leads: Cache<String, Lead>,
}

impl LeadStore {
    pub fn new() -> Self {
        Self {
            leads: Cache::builder().build(),
        }
    }

    /// Inserts or overwrites the lead stored under `email`.
    pub async fn put(&self, email: &str, lead: Lead) {
        self.leads.insert(email.to_string(), lead).await;
    }

    /// Looks up the lead stored under `email`, if any.
    pub async fn get(&self, email: &str) -> Option<Lead> {
        self.leads.get(email).await
    }

    /// Removes the entry for `email`. No-op if absent.
    pub async fn delete(&self, email: &str) {
        self.leads.invalidate(email).await;
    }

    /// Number of stored leads.
    #[allow(dead_code)]
    pub async fn len(&self) -> u64 {
        // Flush pending internal maintenance so the count is exact.
        self.leads.run_pending_tasks().await;
        self.leads.entry_count()
    }
}

impl Default for LeadStore {
    fn default() -> Self {
        Self::new()
    }
}
