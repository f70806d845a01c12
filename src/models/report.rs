use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyWorkHours {
    pub user_id: i64,
    pub user_name: String,
    pub date: NaiveDate,
    pub work_hours: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DepartmentSummary {
    pub department_id: i64,
    pub department_name: String,
    pub total_users: usize,
    pub total_hours: f64,
    pub avg_hours_per_user: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total_hours: f64,
    pub active_users: usize,
    pub work_entries: usize,
    pub non_work_entries: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserActivitySummary {
    pub user_id: i64,
    pub user_name: String,
    pub department: String,
    pub work_hours: f64,
    pub non_work_hours: f64,
    pub last_activity: Option<String>,
    pub status: String,
}
