//! Daily reconciliation of user status with granted leave.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use entity::{
    application::{ApplicationKind, ApplicationStatus},
    roster_user::UserStatus,
};
use sea_orm::{ActiveValue, ConnectionTrait, IntoActiveModel};

use crate::{
    model::application::ApplicationData,
    server::{
        data::{
            application::ApplicationRepository, notification::NotificationRepository,
            user::UserRepository,
        },
        error::Error,
    },
};

pub const LEAVE_NOTIFICATION_KIND: &str = "leave";

/// Leave applications that grant time off
const GRANTED_STATUSES: [ApplicationStatus; 2] =
    [ApplicationStatus::Approved, ApplicationStatus::Resolved];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveSweepSummary {
    /// Users put on leave
    pub granted: usize,
    /// Users whose leave ended and who are active again
    pub restored: usize,
    /// Users reminded that their leave ends tomorrow
    pub reminded: usize,
}

impl LeaveSweepSummary {
    pub fn total(&self) -> usize {
        self.granted + self.restored + self.reminded
    }
}

/// Grants `on_leave` to users whose granted leave covers `today`, restores `active` to users on
/// leave without one and reminds users whose leave ends tomorrow.
///
/// Runs on the caller's connection; [`super::run_job`] passes the transaction it commits
/// together with the run record.
pub async fn run<C: ConnectionTrait>(
    db: &C,
    today: NaiveDate,
) -> Result<LeaveSweepSummary, Error> {
    let user_repo = UserRepository::new(db);
    let notification_repo = NotificationRepository::new(db);

    let applications = ApplicationRepository::new(db)
        .find_by_kind_and_statuses(ApplicationKind::Leave, &GRANTED_STATUSES)
        .await?;

    let tomorrow = today + Duration::days(1);
    let mut on_leave = HashSet::new();
    let mut ending = HashSet::new();

    for application in applications {
        let window = match serde_json::from_value::<ApplicationData>(application.data) {
            Ok(data) => data.leave_window(),
            Err(e) => {
                tracing::warn!(
                    application_id = application.id,
                    "Skipping leave application with malformed payload: {}",
                    e
                );
                continue;
            }
        };
        let Some((start, end)) = window else {
            continue;
        };

        if start <= today && today <= end {
            on_leave.insert(application.author_id);
            if end == tomorrow {
                ending.insert(application.author_id);
            }
        }
    }

    let mut summary = LeaveSweepSummary::default();

    for user_id in &on_leave {
        let Some(user) = user_repo.find_by_id(*user_id).await? else {
            continue;
        };
        if user.status == UserStatus::OnLeave {
            continue;
        }

        let mut user_am = user.into_active_model();
        user_am.status = ActiveValue::Set(UserStatus::OnLeave);
        user_repo.update(user_am).await?;
        summary.granted += 1;
    }

    for user in user_repo.find_by_status(UserStatus::OnLeave).await? {
        if on_leave.contains(&user.id) {
            continue;
        }

        let user_id = user.id;
        let mut user_am = user.into_active_model();
        user_am.status = ActiveValue::Set(UserStatus::Active);
        user_repo.update(user_am).await?;

        notification_repo
            .create(
                user_id,
                LEAVE_NOTIFICATION_KIND,
                "Welcome back",
                "Your leave has ended and your status is active again.",
            )
            .await?;
        summary.restored += 1;
    }

    for user_id in ending {
        notification_repo
            .create(
                user_id,
                LEAVE_NOTIFICATION_KIND,
                "Leave ends tomorrow",
                &format!("Your leave ends on {}.", tomorrow.format("%Y-%m-%d")),
            )
            .await?;
        summary.reminded += 1;
    }

    tracing::info!(
        granted = summary.granted,
        restored = summary.restored,
        reminded = summary.reminded,
        "Leave sweep finished"
    );

    Ok(summary)
}
