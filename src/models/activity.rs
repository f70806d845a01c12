use serde::Serialize;
use std::collections::BTreeMap;

/// Label reported for events whose activity type no longer exists.
pub const UNKNOWN_ACTIVITY: &str = "unknown";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ActivityType {
    pub id: i64,
    pub status: String,      // ⇔ activity_types.status ("Work", "Break", "End of work", ...)
    pub counts_as_work: bool, // ⇔ activity_types.work (0/1)
    pub comment: String,
}

/// Snapshot of the activity types of one store, taken once per request.
///
/// Events only carry the activity id; the work flag is always looked up here at
/// read time, so an administrator flipping `counts_as_work` is visible to the
/// very next report.
#[derive(Debug, Clone, Default)]
pub struct ActivityCatalog {
    by_id: BTreeMap<i64, ActivityType>,
}

impl ActivityCatalog {
    pub fn new(types: Vec<ActivityType>) -> Self {
        Self {
            by_id: types.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    pub fn get(&self, id: i64) -> Option<&ActivityType> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Orphaned references count as non-work.
    pub fn counts_as_work(&self, id: i64) -> bool {
        self.get(id).is_some_and(|t| t.counts_as_work)
    }

    pub fn label(&self, id: i64) -> &str {
        self.get(id)
            .map(|t| t.status.as_str())
            .unwrap_or(UNKNOWN_ACTIVITY)
    }

    /// Activity used to close a forgotten work interval at midnight:
    /// the non-work type named exactly `preferred`, else the lowest-id non-work type.
    pub fn checkout_activity(&self, preferred: &str) -> Option<&ActivityType> {
        self.by_id
            .values()
            .find(|t| !t.counts_as_work && t.status == preferred)
            .or_else(|| self.by_id.values().find(|t| !t.counts_as_work))
    }
}
