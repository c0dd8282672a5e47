//! Once-per-period guard for scheduled jobs.

use chrono::{Datelike, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Daily,
    Monthly,
}

/// Whether a run at `last_run` already covers the period `now` falls in
pub fn already_ran(period: Period, last_run: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
    let Some(last_run) = last_run else {
        return false;
    };

    match period {
        Period::Daily => last_run.date() == now.date(),
        Period::Monthly => last_run.year() == now.year() && last_run.month() == now.month(),
    }
}
