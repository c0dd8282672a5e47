//! Review state machine for applications.

use chrono::Utc;
use entity::{
    application::ApplicationStatus,
    roster_user::{Role, UserStatus},
};
use sea_orm::{ActiveValue, ConnectionTrait, IntoActiveModel};
use serde::Serialize;

use crate::{
    model::application::{ApplicationData, StatusChange},
    server::{
        data::{
            application::ApplicationRepository, notification::NotificationRepository,
            user::UserRepository,
        },
        error::{application::ApplicationError, Error},
        model::db::ApplicationModel,
    },
};

pub const STATUS_NOTIFICATION_KIND: &str = "application_status";

/// Statuses reachable from `from` in a single step
pub fn allowed_transitions(from: ApplicationStatus) -> &'static [ApplicationStatus] {
    use ApplicationStatus::*;

    match from {
        Pending => &[Approved, Rejected, Closed],
        Approved => &[TestRequired, Resolved, Closed],
        Rejected => &[Closed],
        TestRequired => &[Resolved, TestFailed, Closed],
        TestFailed => &[TestRequired, Closed],
        Resolved | Closed => &[],
    }
}

pub fn can_transition(from: ApplicationStatus, to: ApplicationStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

/// Moves an application to `next`.
///
/// Appends to the status history, records the reviewer, applies the roster side effects of the
/// new status and notifies the author. Run it on a transaction so all of this lands together.
/// `actor` is `None` for changes made by the system, such as exam grading.
pub async fn advance_application_status<C: ConnectionTrait>(
    db: &C,
    application: ApplicationModel,
    next: ApplicationStatus,
    actor: Option<i32>,
    comment: Option<String>,
) -> Result<ApplicationModel, Error> {
    let from = application.status;
    if !can_transition(from, next) {
        return Err(ApplicationError::InvalidTransition { from, to: next }.into());
    }

    let data: ApplicationData = serde_json::from_value(application.data.clone())
        .map_err(|_| ApplicationError::InvalidPayload(application.id))?;

    let mut history: Vec<StatusChange> =
        serde_json::from_value(application.status_history.clone())?;
    history.push(StatusChange {
        from,
        to: next,
        changed_by: actor,
        comment: comment.clone(),
        changed_at: Utc::now().naive_utc(),
    });

    let author_id = application.author_id;
    let updated = ApplicationRepository::new(db)
        .update_status(application, next, actor, serde_json::to_value(&history)?)
        .await?;

    apply_side_effects(db, author_id, &data, next).await?;

    let mut message = format!(
        "Your {} application is now {}.",
        label(&updated.kind),
        label(&next)
    );
    if let Some(comment) = comment.filter(|c| !c.trim().is_empty()) {
        message.push_str(&format!(" Comment: {}", comment));
    }

    NotificationRepository::new(db)
        .create(
            author_id,
            STATUS_NOTIFICATION_KIND,
            "Application updated",
            &message,
        )
        .await?;

    tracing::info!(
        application_id = updated.id,
        from = %label(&from),
        to = %label(&next),
        actor = ?actor,
        "Application status changed"
    );

    Ok(updated)
}

/// Roster changes that follow from an application reaching `status`
async fn apply_side_effects<C: ConnectionTrait>(
    db: &C,
    author_id: i32,
    data: &ApplicationData,
    status: ApplicationStatus,
) -> Result<(), Error> {
    let user_repo = UserRepository::new(db);
    let Some(user) = user_repo.find_by_id(author_id).await? else {
        return Err(Error::not_found(format!("User {}", author_id)));
    };

    let mut user = user.into_active_model();
    let changed = match (status, data) {
        (
            ApplicationStatus::Approved,
            ApplicationData::Leave {
                start_date,
                end_date,
                ..
            },
        ) => {
            let today = Utc::now().date_naive();
            if *start_date <= today && today <= *end_date {
                user.status = ActiveValue::Set(UserStatus::OnLeave);
                true
            } else {
                false
            }
        }
        (
            ApplicationStatus::Approved,
            ApplicationData::TransferDept {
                target_department_id,
                ..
            },
        ) => {
            user.primary_department_id = ActiveValue::Set(Some(*target_department_id));
            true
        }
        (ApplicationStatus::Approved, ApplicationData::TransferDiv { target_division, .. }) => {
            user.division = ActiveValue::Set(Some(target_division.clone()));
            true
        }
        (
            ApplicationStatus::Approved,
            ApplicationData::JointPrimary {
                secondary_department_id,
                ..
            }
            | ApplicationData::JointSecondary {
                secondary_department_id,
                ..
            },
        ) => {
            user.secondary_department_id = ActiveValue::Set(Some(*secondary_department_id));
            true
        }
        (ApplicationStatus::Resolved, ApplicationData::Entry { department_id, .. }) => {
            user.role = ActiveValue::Set(Role::Member);
            user.primary_department_id = ActiveValue::Set(Some(*department_id));
            true
        }
        (ApplicationStatus::Resolved, ApplicationData::Promotion { target_rank, .. }) => {
            user.rank = ActiveValue::Set(Some(target_rank.clone()));
            true
        }
        _ => false,
    };

    if changed {
        user_repo.update(user).await?;
    }

    Ok(())
}

/// snake_case wire name of an enum value, as shown to users
pub fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use entity::application::{ApplicationKind, ApplicationStatus::*};

    use super::*;

    const ALL: [ApplicationStatus; 7] = [
        Pending,
        Approved,
        Rejected,
        TestRequired,
        TestFailed,
        Resolved,
        Closed,
    ];

    #[test]
    fn pending_can_be_approved_rejected_or_closed() {
        assert!(can_transition(Pending, Approved));
        assert!(can_transition(Pending, Rejected));
        assert!(can_transition(Pending, Closed));
        assert!(!can_transition(Pending, Resolved));
        assert!(!can_transition(Pending, TestRequired));
    }

    #[test]
    fn test_failed_allows_retake() {
        assert!(can_transition(TestFailed, TestRequired));
        assert!(!can_transition(TestFailed, Resolved));
    }

    #[test]
    fn terminal_statuses_have_no_exits() {
        for to in ALL {
            assert!(!can_transition(Resolved, to));
            assert!(!can_transition(Closed, to));
        }
    }

    #[test]
    fn no_status_transitions_to_itself() {
        for status in ALL {
            assert!(!can_transition(status, status));
        }
    }

    #[test]
    fn every_non_terminal_status_can_be_closed() {
        for from in [Pending, Approved, Rejected, TestRequired, TestFailed] {
            assert!(can_transition(from, Closed));
        }
    }

    #[test]
    fn labels_use_wire_names() {
        assert_eq!(label(&TestRequired), "test_required");
        assert_eq!(label(&ApplicationKind::TransferDept), "transfer_dept");
    }
}
