use chrono::{Duration, Utc};
use roster_test_utils::prelude::*;

use crate::server::data::scheduler_run::SchedulerRunRepository;

mod record_run;
