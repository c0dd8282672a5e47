mod submit;

use chrono::{Duration, NaiveDate, Utc};
use entity::{
    application::{ApplicationKind, ApplicationStatus},
    roster_user::{Role, UserStatus},
};
use roster_test_utils::prelude::*;
use sea_orm::EntityTrait;

use crate::{
    model::application::{ApplicationData, StatusChange},
    server::{
        error::{application::ApplicationError, Error},
        service::application::ApplicationService,
    },
};

fn leave_from_today(days: i64) -> ApplicationData {
    let today = Utc::now().date_naive();

    ApplicationData::Leave {
        start_date: today,
        end_date: today + Duration::days(days),
        reason: "Family visit".to_string(),
    }
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}
