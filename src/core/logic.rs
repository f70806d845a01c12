use crate::core::calculator::timeline::{self, Timeline};
use crate::db::{activities, queries};
use crate::errors::AppResult;
use crate::models::interval::Interval;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;

pub struct Core;

impl Core {
    /// Whole-history timeline of one user as of `as_of`.
    /// An unknown user simply has an empty timeline.
    pub fn user_timeline(
        conn: &Connection,
        user_id: i64,
        as_of: NaiveDateTime,
    ) -> AppResult<Timeline> {
        let catalog = activities::load_catalog(conn)?;
        let events = queries::load_events_for_user(conn, user_id)?;
        Ok(timeline::build_timeline(&events, &catalog, as_of))
    }

    /// Intervals of one user whose start falls on a day in `[from, to]`.
    ///
    /// The timeline is built over the full history so that the last interval of
    /// the range still ends at its real successor.
    pub fn intervals_in_range(
        conn: &Connection,
        user_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        as_of: NaiveDateTime,
    ) -> AppResult<Vec<Interval>> {
        let tl = Self::user_timeline(conn, user_id, as_of)?;
        Ok(tl
            .intervals
            .into_iter()
            .filter(|iv| from.is_none_or(|f| iv.day() >= f))
            .filter(|iv| to.is_none_or(|t| iv.day() <= t))
            .collect())
    }
}
