use chrono::NaiveDateTime;
use serde::Serialize;

/// Latest known activity of a user.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum CurrentStatus {
    Unknown,
    Known {
        activity_type_id: i64,
        activity: String,
        counts_as_work: bool,
        at: NaiveDateTime,
        since_seconds: i64,
    },
}

impl CurrentStatus {
    pub fn label(&self) -> &str {
        match self {
            CurrentStatus::Unknown => "unknown",
            CurrentStatus::Known { activity, .. } => activity,
        }
    }
}

/// Status row for the live dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct UserStatus {
    pub user_id: i64,
    pub user_name: String,
    pub status: CurrentStatus,
}
