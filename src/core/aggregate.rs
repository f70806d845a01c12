//! Reporting: daily work hours, department summaries, trend series and the
//! per-user activity overview.
//!
//! Every report is computed from the same per-user timelines, built once per
//! request from the event log. Durations are summed in whole seconds and only
//! converted to hours at the end, so all entry points agree to the second.

use crate::core::calculator::timeline::{self, Timeline};
use crate::core::status::status_from_timeline;
use crate::db::{activities, departments, queries, users};
use crate::errors::{AppError, AppResult};
use crate::models::activity::ActivityCatalog;
use crate::models::department::{Department, NO_DEPARTMENT};
use crate::models::report::{DailyWorkHours, DepartmentSummary, TrendPoint, UserActivitySummary};
use crate::models::user::User;
use crate::utils::date::{days_in_range, trailing_days};
use crate::utils::time::{format_timestamp, seconds_to_hours};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use std::collections::{BTreeMap, BTreeSet};

/// Longest trend series served in one request (about ten years).
pub const MAX_TREND_DAYS: u32 = 3660;

/// Snapshot of everything the reports need, loaded once per request.
pub struct ReportData {
    pub as_of: NaiveDateTime,
    pub catalog: ActivityCatalog,
    pub users: Vec<User>,
    pub departments: Vec<Department>,
    pub timelines: BTreeMap<i64, Timeline>,
}

impl ReportData {
    pub fn load(conn: &Connection, as_of: NaiveDateTime) -> AppResult<Self> {
        let catalog = activities::load_catalog(conn)?;
        let users = users::list_users(conn)?;
        let departments = departments::list_departments(conn)?;

        let timelines = timeline::group_by_user(queries::load_all_events(conn)?)
            .into_iter()
            .map(|(user_id, events)| (user_id, timeline::build_timeline(&events, &catalog, as_of)))
            .collect();

        Ok(Self::from_parts(as_of, catalog, users, departments, timelines))
    }

    pub fn from_parts(
        as_of: NaiveDateTime,
        catalog: ActivityCatalog,
        users: Vec<User>,
        departments: Vec<Department>,
        timelines: BTreeMap<i64, Timeline>,
    ) -> Self {
        Self {
            as_of,
            catalog,
            users,
            departments,
            timelines,
        }
    }

    fn timeline(&self, user_id: i64) -> Option<&Timeline> {
        self.timelines.get(&user_id)
    }

    /// Work seconds of one user, for one day or across all days.
    pub fn work_seconds(&self, user_id: i64, day: Option<NaiveDate>) -> i64 {
        self.seconds_where(user_id, day, true)
    }

    pub fn non_work_seconds(&self, user_id: i64, day: Option<NaiveDate>) -> i64 {
        self.seconds_where(user_id, day, false)
    }

    fn seconds_where(&self, user_id: i64, day: Option<NaiveDate>, work: bool) -> i64 {
        let Some(tl) = self.timeline(user_id) else {
            return 0;
        };
        match (day, work) {
            (None, true) => tl.total_work_seconds,
            (None, false) => tl.total_seconds() - tl.total_work_seconds,
            (Some(d), true) => tl.work_seconds_by_day().get(&d).copied().unwrap_or(0),
            (Some(d), false) => tl.non_work_seconds_by_day().get(&d).copied().unwrap_or(0),
        }
    }

    /// Dense user × day grid over `[from, to]`; days without work report 0.
    pub fn daily_work_hours(
        &self,
        user_id: Option<i64>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<DailyWorkHours> {
        let days = days_in_range(from, to);
        let mut out = Vec::new();

        for user in self.users.iter().filter(|u| user_id.is_none_or(|id| u.id == id)) {
            let by_day = self
                .timeline(user.id)
                .map(|tl| tl.work_seconds_by_day())
                .unwrap_or_default();

            for day in &days {
                out.push(DailyWorkHours {
                    user_id: user.id,
                    user_name: user.name.clone(),
                    date: *day,
                    work_hours: seconds_to_hours(by_day.get(day).copied().unwrap_or(0)),
                });
            }
        }
        out
    }

    /// One row per department, most hours first. Users without a department
    /// are not counted anywhere here.
    pub fn department_summary(&self, day: Option<NaiveDate>) -> Vec<DepartmentSummary> {
        let mut out: Vec<DepartmentSummary> = self
            .departments
            .iter()
            .map(|dept| {
                let members: Vec<&User> = self
                    .users
                    .iter()
                    .filter(|u| u.department_id == Some(dept.id))
                    .collect();
                let total_seconds: i64 = members.iter().map(|u| self.work_seconds(u.id, day)).sum();
                let total_hours = seconds_to_hours(total_seconds);
                let avg = if members.is_empty() {
                    0.0
                } else {
                    total_hours / members.len() as f64
                };

                DepartmentSummary {
                    department_id: dept.id,
                    department_name: dept.name.clone(),
                    total_users: members.len(),
                    total_hours,
                    avg_hours_per_user: avg,
                }
            })
            .collect();

        out.sort_by(|a, b| {
            b.total_hours
                .total_cmp(&a.total_hours)
                .then_with(|| a.department_name.cmp(&b.department_name))
        });
        out
    }

    /// `days + 1` rows for `[today - days, today]`, oldest first; quiet days
    /// are present with zeros. `days` is capped at [`MAX_TREND_DAYS`].
    pub fn trend(&self, today: NaiveDate, days: u32) -> AppResult<Vec<TrendPoint>> {
        if days > MAX_TREND_DAYS {
            return Err(AppError::InvalidInput(format!(
                "trend covers at most {} days, got {}",
                MAX_TREND_DAYS, days
            )));
        }
        let range = trailing_days(today, days)?;

        let mut work_seconds: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        let mut active: BTreeMap<NaiveDate, BTreeSet<i64>> = BTreeMap::new();
        let mut work_entries: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        let mut non_work_entries: BTreeMap<NaiveDate, usize> = BTreeMap::new();

        for (user_id, tl) in &self.timelines {
            for (day, secs) in tl.work_seconds_by_day() {
                *work_seconds.entry(day).or_insert(0) += secs;
            }
            for ev in &tl.events {
                active.entry(ev.date()).or_default().insert(*user_id);
                let counter = if self.catalog.counts_as_work(ev.activity_type_id) {
                    &mut work_entries
                } else {
                    &mut non_work_entries
                };
                *counter.entry(ev.date()).or_insert(0) += 1;
            }
        }

        Ok(range
            .into_iter()
            .map(|day| TrendPoint {
                date: day,
                total_hours: seconds_to_hours(work_seconds.get(&day).copied().unwrap_or(0)),
                active_users: active.get(&day).map_or(0, BTreeSet::len),
                work_entries: work_entries.get(&day).copied().unwrap_or(0),
                non_work_entries: non_work_entries.get(&day).copied().unwrap_or(0),
            })
            .collect())
    }

    /// Per-user overview for dashboards, most work first.
    ///
    /// `department` matches by name; `"No Department"` selects users without one.
    /// With `day`, hours, last activity and status are restricted to that day.
    pub fn user_activity_summary(
        &self,
        department: Option<&str>,
        day: Option<NaiveDate>,
    ) -> Vec<UserActivitySummary> {
        let mut out: Vec<UserActivitySummary> = self
            .users
            .iter()
            .map(|user| (user, self.department_name(user.department_id)))
            .filter(|(_, dept)| department.is_none_or(|d| d == dept))
            .map(|(user, dept)| {
                let tl = self.timeline(user.id);
                let last = tl.and_then(|tl| {
                    tl.intervals
                        .iter()
                        .rev()
                        .find(|iv| day.is_none_or(|d| iv.day() == d))
                });

                let status = match (day, tl) {
                    (None, Some(tl)) => status_from_timeline(tl).label().to_string(),
                    (Some(_), _) => last.map_or("unknown".to_string(), |iv| iv.activity.clone()),
                    (None, None) => "unknown".to_string(),
                };

                UserActivitySummary {
                    user_id: user.id,
                    user_name: user.name.clone(),
                    department: dept,
                    work_hours: seconds_to_hours(self.work_seconds(user.id, day)),
                    non_work_hours: seconds_to_hours(self.non_work_seconds(user.id, day)),
                    last_activity: last.map(|iv| format_timestamp(&iv.start)),
                    status,
                }
            })
            .collect();

        out.sort_by(|a, b| {
            b.work_hours
                .total_cmp(&a.work_hours)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        out
    }

    fn department_name(&self, id: Option<i64>) -> String {
        id.and_then(|id| self.departments.iter().find(|d| d.id == id))
            .map_or_else(|| NO_DEPARTMENT.to_string(), |d| d.name.clone())
    }
}
