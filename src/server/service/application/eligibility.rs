//! Submission rules for applications.
//!
//! Every decision is recomputed from the author's full application history, nothing about a
//! previous decision is stored. All functions here are pure so they can be evaluated for the
//! eligibility endpoint and again, inside the submission path, right before inserting.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use entity::{
    application::{ApplicationKind, ApplicationStatus},
    roster_user::Role,
};

use crate::{
    model::application::{ApplicationData, StatusChange},
    server::model::db::{ApplicationModel, UserModel},
};

pub mod limits {
    /// Entry applications a user may file per calendar month
    pub const ENTRY_PER_MONTH: usize = 3;
    /// Leave applications a user may file per calendar month
    pub const LEAVE_PER_MONTH: usize = 2;
    pub const PROMOTION_COOLDOWN_DAYS: i64 = 30;
    pub const QUALIFICATION_COOLDOWN_DAYS: i64 = 14;
    /// Days after a rejected joint application before another may be filed
    pub const JOINT_REJECTION_COOLDOWN_DAYS: i64 = 30;
    /// Longest leave, counting both the first and the last day
    pub const MAX_LEAVE_DAYS: i64 = 60;
}

/// Statuses in which a joint position application blocks another one
const ACTIVE_JOINT_STATUSES: [ApplicationStatus; 4] = [
    ApplicationStatus::Pending,
    ApplicationStatus::Approved,
    ApplicationStatus::TestRequired,
    ApplicationStatus::TestFailed,
];

/// Statuses in which a leave window is reserved
const BLOCKING_LEAVE_STATUSES: [ApplicationStatus; 3] = [
    ApplicationStatus::Pending,
    ApplicationStatus::Approved,
    ApplicationStatus::Resolved,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Allowed,
    Denied { reason: String },
}

impl Eligibility {
    fn denied(reason: impl Into<String>) -> Self {
        Self::Denied {
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Eligibility::Allowed)
    }
}

/// Full submission check: the kind-level rules followed by the payload rules.
pub fn can_submit_application(
    data: &ApplicationData,
    user: &UserModel,
    history: &[ApplicationModel],
    now: NaiveDateTime,
) -> Eligibility {
    let eligibility = check_kind(data.kind(), user, history, now);
    if !eligibility.is_allowed() {
        return eligibility;
    }

    check_payload(data, user, history, now)
}

/// Rules that only depend on the kind: roles, quotas, cooldowns and pending duplicates.
pub fn check_kind(
    kind: ApplicationKind,
    user: &UserModel,
    history: &[ApplicationModel],
    now: NaiveDateTime,
) -> Eligibility {
    match kind {
        ApplicationKind::Entry => check_entry(user, history, now),
        ApplicationKind::Leave => check_leave_quota(user, history, now),
        ApplicationKind::TransferDept => {
            if !user.role.at_least(Role::Member) {
                return Eligibility::denied("Only members can request a department transfer");
            }
            if user.primary_department_id.is_none() {
                return Eligibility::denied("You are not assigned to a department yet");
            }
            check_no_pending_transfer(history)
        }
        ApplicationKind::TransferDiv => {
            if !user.role.at_least(Role::Member) {
                return Eligibility::denied("Only members can request a division transfer");
            }
            check_no_pending_transfer(history)
        }
        ApplicationKind::Promotion => check_cooldown(
            user,
            history,
            ApplicationKind::Promotion,
            limits::PROMOTION_COOLDOWN_DAYS,
            now,
        ),
        ApplicationKind::Qualification => check_cooldown(
            user,
            history,
            ApplicationKind::Qualification,
            limits::QUALIFICATION_COOLDOWN_DAYS,
            now,
        ),
        ApplicationKind::JointPrimary | ApplicationKind::JointSecondary => {
            check_joint(user, history, now)
        }
    }
}

fn check_payload(
    data: &ApplicationData,
    user: &UserModel,
    history: &[ApplicationModel],
    now: NaiveDateTime,
) -> Eligibility {
    match data {
        ApplicationData::Leave {
            start_date,
            end_date,
            ..
        } => check_leave_window(*start_date, *end_date, history, now.date()),
        ApplicationData::TransferDept {
            target_department_id,
            ..
        } => {
            if user.primary_department_id == Some(*target_department_id) {
                return Eligibility::denied("You are already in this department");
            }
            Eligibility::Allowed
        }
        ApplicationData::JointPrimary {
            secondary_department_id,
            ..
        }
        | ApplicationData::JointSecondary {
            secondary_department_id,
            ..
        } => {
            if user.primary_department_id == Some(*secondary_department_id) {
                return Eligibility::denied(
                    "The joint position must be in a department other than your primary one",
                );
            }
            Eligibility::Allowed
        }
        _ => Eligibility::Allowed,
    }
}

fn check_entry(
    user: &UserModel,
    history: &[ApplicationModel],
    now: NaiveDateTime,
) -> Eligibility {
    if user.role != Role::Candidate {
        return Eligibility::denied("Only candidates can submit an entry application");
    }

    let has_pending = history.iter().any(|application| {
        application.kind == ApplicationKind::Entry
            && application.status == ApplicationStatus::Pending
    });
    if has_pending {
        return Eligibility::denied("You already have a pending entry application");
    }

    if count_this_month(history, ApplicationKind::Entry, now) >= limits::ENTRY_PER_MONTH {
        return Eligibility::denied(format!(
            "Monthly limit of {} entry applications reached",
            limits::ENTRY_PER_MONTH
        ));
    }

    Eligibility::Allowed
}

fn check_leave_quota(
    user: &UserModel,
    history: &[ApplicationModel],
    now: NaiveDateTime,
) -> Eligibility {
    if user.role == Role::Candidate {
        return Eligibility::denied("Candidates cannot apply for leave");
    }

    if count_this_month(history, ApplicationKind::Leave, now) >= limits::LEAVE_PER_MONTH {
        return Eligibility::denied(format!(
            "Monthly limit of {} leave applications reached",
            limits::LEAVE_PER_MONTH
        ));
    }

    Eligibility::Allowed
}

fn check_leave_window(
    start: NaiveDate,
    end: NaiveDate,
    history: &[ApplicationModel],
    today: NaiveDate,
) -> Eligibility {
    if start > end {
        return Eligibility::denied("Leave must end on or after its start date");
    }
    if start < today {
        return Eligibility::denied("Leave cannot start in the past");
    }
    if (end - start).num_days() + 1 > limits::MAX_LEAVE_DAYS {
        return Eligibility::denied(format!(
            "Leave cannot be longer than {} days",
            limits::MAX_LEAVE_DAYS
        ));
    }

    for application in history.iter().filter(|application| {
        application.kind == ApplicationKind::Leave
            && BLOCKING_LEAVE_STATUSES.contains(&application.status)
    }) {
        let Some((other_start, other_end)) = leave_window(application) else {
            continue;
        };

        // Inclusive on both ends: touching windows overlap
        if start <= other_end && other_start <= end {
            return Eligibility::denied(format!(
                "Leave overlaps with your leave from {} to {}",
                other_start, other_end
            ));
        }
    }

    Eligibility::Allowed
}

fn check_no_pending_transfer(history: &[ApplicationModel]) -> Eligibility {
    let has_pending = history.iter().any(|application| {
        matches!(
            application.kind,
            ApplicationKind::TransferDept | ApplicationKind::TransferDiv
        ) && application.status == ApplicationStatus::Pending
    });

    if has_pending {
        return Eligibility::denied("You already have a pending transfer application");
    }

    Eligibility::Allowed
}

fn check_cooldown(
    user: &UserModel,
    history: &[ApplicationModel],
    kind: ApplicationKind,
    cooldown_days: i64,
    now: NaiveDateTime,
) -> Eligibility {
    if !user.role.at_least(Role::Member) {
        return Eligibility::denied("Only members can submit this application");
    }

    let last_submission = history
        .iter()
        .filter(|application| application.kind == kind)
        .map(|application| application.created_at)
        .max();

    if let Some(last) = last_submission {
        let available_at = last + Duration::days(cooldown_days);
        if now < available_at {
            return Eligibility::denied(format!(
                "You can submit this application again after {}",
                available_at.format("%Y-%m-%d %H:%M")
            ));
        }
    }

    Eligibility::Allowed
}

fn check_joint(user: &UserModel, history: &[ApplicationModel], now: NaiveDateTime) -> Eligibility {
    if !user.role.at_least(Role::Member) {
        return Eligibility::denied("Only members can apply for a joint position");
    }
    if user.secondary_department_id.is_some() {
        return Eligibility::denied("You already hold a joint position");
    }

    let joint_history = history.iter().filter(|application| {
        matches!(
            application.kind,
            ApplicationKind::JointPrimary | ApplicationKind::JointSecondary
        )
    });

    let mut last_rejection: Option<NaiveDateTime> = None;
    for application in joint_history {
        if ACTIVE_JOINT_STATUSES.contains(&application.status) {
            return Eligibility::denied("You already have an active joint position application");
        }

        if let Some(rejected_at) = rejected_at(application) {
            last_rejection = last_rejection.max(Some(rejected_at));
        }
    }

    if let Some(rejected_at) = last_rejection {
        let available_at = rejected_at + Duration::days(limits::JOINT_REJECTION_COOLDOWN_DAYS);
        if now < available_at {
            return Eligibility::denied(format!(
                "Your last joint position application was rejected, try again after {}",
                available_at.format("%Y-%m-%d %H:%M")
            ));
        }
    }

    Eligibility::Allowed
}

fn count_this_month(history: &[ApplicationModel], kind: ApplicationKind, now: NaiveDateTime) -> usize {
    history
        .iter()
        .filter(|application| {
            application.kind == kind
                && application.created_at.year() == now.year()
                && application.created_at.month() == now.month()
        })
        .count()
}

fn leave_window(application: &ApplicationModel) -> Option<(NaiveDate, NaiveDate)> {
    match serde_json::from_value::<ApplicationData>(application.data.clone()) {
        Ok(data) => data.leave_window(),
        Err(e) => {
            tracing::warn!(
                application_id = application.id,
                "Skipping leave application with malformed payload: {}",
                e
            );
            None
        }
    }
}

/// When an application was rejected: from its history, or its last update if it still is.
fn rejected_at(application: &ApplicationModel) -> Option<NaiveDateTime> {
    let from_history = serde_json::from_value::<Vec<StatusChange>>(
        application.status_history.clone(),
    )
    .ok()
    .and_then(|history| {
        history
            .into_iter()
            .filter(|change| change.to == ApplicationStatus::Rejected)
            .map(|change| change.changed_at)
            .max()
    });

    match from_history {
        Some(changed_at) => Some(changed_at),
        None if application.status == ApplicationStatus::Rejected => Some(application.updated_at),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use entity::roster_user::UserStatus;
    use serde_json::json;

    use super::*;

    fn at(date: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn user(role: Role, primary: Option<i32>) -> UserModel {
        UserModel {
            id: 1,
            auth_id: "auth|1".to_string(),
            username: "user_1".to_string(),
            email: "1@example.com".to_string(),
            role,
            status: UserStatus::Active,
            primary_department_id: primary,
            secondary_department_id: None,
            division: None,
            rank: None,
            warnings: 0,
            monthly_warnings: 0,
            created_at: at("2026-01-01"),
            updated_at: at("2026-01-01"),
        }
    }

    fn application(
        id: i32,
        data: &ApplicationData,
        status: ApplicationStatus,
        created_at: NaiveDateTime,
    ) -> ApplicationModel {
        ApplicationModel {
            id,
            author_id: 1,
            kind: data.kind(),
            status,
            data: serde_json::to_value(data).unwrap(),
            status_history: json!([]),
            reviewer_id: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn entry() -> ApplicationData {
        ApplicationData::Entry {
            department_id: 1,
            character_name: "Jane Doe".to_string(),
            motivation: "Serve".to_string(),
        }
    }

    fn leave(start: &str, end: &str) -> ApplicationData {
        ApplicationData::Leave {
            start_date: NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            end_date: NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
            reason: "Holiday".to_string(),
        }
    }

    fn promotion() -> ApplicationData {
        ApplicationData::Promotion {
            target_rank: "Sergeant".to_string(),
            reason: "Experience".to_string(),
        }
    }

    fn joint(secondary: i32) -> ApplicationData {
        ApplicationData::JointSecondary {
            secondary_department_id: secondary,
            reason: "Help out".to_string(),
        }
    }

    mod entry_tests {
        use super::*;

        #[test]
        fn allows_first_entry_for_candidate() {
            let result =
                can_submit_application(&entry(), &user(Role::Candidate, None), &[], at("2026-03-10"));

            assert_eq!(result, Eligibility::Allowed);
        }

        #[test]
        fn denies_members() {
            let result =
                can_submit_application(&entry(), &user(Role::Member, Some(1)), &[], at("2026-03-10"));

            assert!(!result.is_allowed());
        }

        #[test]
        fn denies_while_entry_pending() {
            let history = vec![application(1, &entry(), ApplicationStatus::Pending, at("2026-01-10"))];

            let result = can_submit_application(
                &entry(),
                &user(Role::Candidate, None),
                &history,
                at("2026-03-10"),
            );

            assert!(!result.is_allowed());
        }

        #[test]
        fn enforces_monthly_quota() {
            let history: Vec<_> = (1..=3)
                .map(|id| application(id, &entry(), ApplicationStatus::Rejected, at("2026-03-02")))
                .collect();

            let result = can_submit_application(
                &entry(),
                &user(Role::Candidate, None),
                &history,
                at("2026-03-20"),
            );

            assert!(
                matches!(result, Eligibility::Denied { reason } if reason.contains("Monthly limit"))
            );
        }

        #[test]
        fn quota_resets_with_calendar_month() {
            let history: Vec<_> = (1..=3)
                .map(|id| application(id, &entry(), ApplicationStatus::Rejected, at("2026-02-27")))
                .collect();

            let result = can_submit_application(
                &entry(),
                &user(Role::Candidate, None),
                &history,
                at("2026-03-01"),
            );

            assert_eq!(result, Eligibility::Allowed);
        }

        #[test]
        fn quota_compares_year_as_well_as_month() {
            let history: Vec<_> = (1..=3)
                .map(|id| application(id, &entry(), ApplicationStatus::Rejected, at("2025-03-05")))
                .collect();

            let result = can_submit_application(
                &entry(),
                &user(Role::Candidate, None),
                &history,
                at("2026-03-05"),
            );

            assert_eq!(result, Eligibility::Allowed);
        }
    }

    mod leave_tests {
        use super::*;

        #[test]
        fn allows_future_leave() {
            let result = can_submit_application(
                &leave("2026-03-12", "2026-03-20"),
                &user(Role::Member, Some(1)),
                &[],
                at("2026-03-10"),
            );

            assert_eq!(result, Eligibility::Allowed);
        }

        #[test]
        fn denies_candidates() {
            let result = can_submit_application(
                &leave("2026-03-12", "2026-03-20"),
                &user(Role::Candidate, None),
                &[],
                at("2026-03-10"),
            );

            assert!(!result.is_allowed());
        }

        #[test]
        fn denies_inverted_range() {
            let result = can_submit_application(
                &leave("2026-03-20", "2026-03-12"),
                &user(Role::Member, Some(1)),
                &[],
                at("2026-03-10"),
            );

            assert!(!result.is_allowed());
        }

        #[test]
        fn denies_start_in_past() {
            let result = can_submit_application(
                &leave("2026-03-09", "2026-03-12"),
                &user(Role::Member, Some(1)),
                &[],
                at("2026-03-10"),
            );

            assert!(!result.is_allowed());
        }

        #[test]
        fn allows_single_day_starting_today() {
            let result = can_submit_application(
                &leave("2026-03-10", "2026-03-10"),
                &user(Role::Member, Some(1)),
                &[],
                at("2026-03-10"),
            );

            assert_eq!(result, Eligibility::Allowed);
        }

        #[test]
        fn denies_leave_longer_than_maximum() {
            let result = can_submit_application(
                &leave("2026-03-10", "2026-05-20"),
                &user(Role::Member, Some(1)),
                &[],
                at("2026-03-10"),
            );

            assert!(!result.is_allowed());
        }

        #[test]
        fn denies_overlap_sharing_a_single_day() {
            let history = vec![application(
                1,
                &leave("2026-03-15", "2026-03-20"),
                ApplicationStatus::Approved,
                at("2026-02-10"),
            )];

            let result = can_submit_application(
                &leave("2026-03-20", "2026-03-25"),
                &user(Role::Member, Some(1)),
                &history,
                at("2026-03-10"),
            );

            assert!(matches!(result, Eligibility::Denied { reason } if reason.contains("overlaps")));
        }

        #[test]
        fn ignores_rejected_and_closed_leaves() {
            let history = vec![
                application(
                    1,
                    &leave("2026-03-15", "2026-03-20"),
                    ApplicationStatus::Rejected,
                    at("2026-02-10"),
                ),
                application(
                    2,
                    &leave("2026-03-15", "2026-03-20"),
                    ApplicationStatus::Closed,
                    at("2026-02-11"),
                ),
            ];

            let result = can_submit_application(
                &leave("2026-03-16", "2026-03-18"),
                &user(Role::Member, Some(1)),
                &history,
                at("2026-03-10"),
            );

            assert_eq!(result, Eligibility::Allowed);
        }

        #[test]
        fn allows_adjacent_windows() {
            let history = vec![application(
                1,
                &leave("2026-03-15", "2026-03-20"),
                ApplicationStatus::Pending,
                at("2026-02-10"),
            )];

            let result = can_submit_application(
                &leave("2026-03-21", "2026-03-25"),
                &user(Role::Member, Some(1)),
                &history,
                at("2026-03-10"),
            );

            assert_eq!(result, Eligibility::Allowed);
        }

        #[test]
        fn enforces_monthly_quota() {
            let history = vec![
                application(
                    1,
                    &leave("2026-04-01", "2026-04-02"),
                    ApplicationStatus::Rejected,
                    at("2026-03-01"),
                ),
                application(
                    2,
                    &leave("2026-04-05", "2026-04-06"),
                    ApplicationStatus::Rejected,
                    at("2026-03-02"),
                ),
            ];

            let result = check_kind(
                ApplicationKind::Leave,
                &user(Role::Member, Some(1)),
                &history,
                at("2026-03-10"),
            );

            assert!(!result.is_allowed());
        }
    }

    mod transfer_tests {
        use super::*;

        fn transfer_dept(target: i32) -> ApplicationData {
            ApplicationData::TransferDept {
                target_department_id: target,
                reason: "Change of pace".to_string(),
            }
        }

        #[test]
        fn allows_transfer_to_other_department() {
            let result = can_submit_application(
                &transfer_dept(2),
                &user(Role::Member, Some(1)),
                &[],
                at("2026-03-10"),
            );

            assert_eq!(result, Eligibility::Allowed);
        }

        #[test]
        fn denies_transfer_to_current_department() {
            let result = can_submit_application(
                &transfer_dept(1),
                &user(Role::Member, Some(1)),
                &[],
                at("2026-03-10"),
            );

            assert!(!result.is_allowed());
        }

        #[test]
        fn denies_without_primary_department() {
            let result = can_submit_application(
                &transfer_dept(2),
                &user(Role::Member, None),
                &[],
                at("2026-03-10"),
            );

            assert!(!result.is_allowed());
        }

        #[test]
        fn pending_division_transfer_blocks_department_transfer() {
            let division = ApplicationData::TransferDiv {
                target_division: "Traffic".to_string(),
                reason: "Interest".to_string(),
            };
            let history = vec![application(1, &division, ApplicationStatus::Pending, at("2026-03-01"))];

            let result = can_submit_application(
                &transfer_dept(2),
                &user(Role::Member, Some(1)),
                &history,
                at("2026-03-10"),
            );

            assert!(!result.is_allowed());
        }
    }

    mod cooldown_tests {
        use super::*;

        #[test]
        fn denies_promotion_inside_cooldown_regardless_of_status() {
            let history = vec![application(1, &promotion(), ApplicationStatus::Rejected, at("2026-03-01"))];

            let result = can_submit_application(
                &promotion(),
                &user(Role::Member, Some(1)),
                &history,
                at("2026-03-20"),
            );

            assert!(!result.is_allowed());
        }

        #[test]
        fn allows_promotion_after_cooldown() {
            let history = vec![application(1, &promotion(), ApplicationStatus::Resolved, at("2026-01-01"))];

            let result = can_submit_application(
                &promotion(),
                &user(Role::Member, Some(1)),
                &history,
                at("2026-03-20"),
            );

            assert_eq!(result, Eligibility::Allowed);
        }

        #[test]
        fn qualification_uses_shorter_cooldown() {
            let qualification = ApplicationData::Qualification {
                qualification: "Marksman".to_string(),
                reason: "Training done".to_string(),
            };
            let history = vec![application(1, &qualification, ApplicationStatus::Resolved, at("2026-03-01"))];

            let result = can_submit_application(
                &qualification,
                &user(Role::Member, Some(1)),
                &history,
                at("2026-03-16"),
            );

            assert_eq!(result, Eligibility::Allowed);
        }

        #[test]
        fn promotion_requires_membership() {
            let result = can_submit_application(
                &promotion(),
                &user(Role::Candidate, None),
                &[],
                at("2026-03-20"),
            );

            assert!(!result.is_allowed());
        }
    }

    mod joint_tests {
        use super::*;

        #[test]
        fn allows_first_joint_application() {
            let result =
                can_submit_application(&joint(2), &user(Role::Member, Some(1)), &[], at("2026-03-10"));

            assert_eq!(result, Eligibility::Allowed);
        }

        #[test]
        fn denies_joint_in_primary_department() {
            let result =
                can_submit_application(&joint(1), &user(Role::Member, Some(1)), &[], at("2026-03-10"));

            assert!(!result.is_allowed());
        }

        #[test]
        fn denies_when_secondary_already_held() {
            let mut member = user(Role::Member, Some(1));
            member.secondary_department_id = Some(3);

            let result = can_submit_application(&joint(2), &member, &[], at("2026-03-10"));

            assert!(!result.is_allowed());
        }

        #[test]
        fn denies_while_joint_test_failed() {
            let history = vec![application(1, &joint(2), ApplicationStatus::TestFailed, at("2026-01-10"))];

            let result = can_submit_application(
                &joint(3),
                &user(Role::Member, Some(1)),
                &history,
                at("2026-03-10"),
            );

            assert!(!result.is_allowed());
        }

        #[test]
        fn rejection_starts_cooldown() {
            let history = vec![application(1, &joint(2), ApplicationStatus::Rejected, at("2026-03-01"))];

            let inside = can_submit_application(
                &joint(2),
                &user(Role::Member, Some(1)),
                &history,
                at("2026-03-20"),
            );
            let after = can_submit_application(
                &joint(2),
                &user(Role::Member, Some(1)),
                &history,
                at("2026-04-01"),
            );

            assert!(!inside.is_allowed());
            assert_eq!(after, Eligibility::Allowed);
        }

        #[test]
        fn rejection_recorded_in_history_counts_after_closing() {
            let mut closed = application(1, &joint(2), ApplicationStatus::Closed, at("2026-01-01"));
            closed.status_history = json!([
                {
                    "from": "pending",
                    "to": "rejected",
                    "changed_by": 9,
                    "comment": null,
                    "changed_at": "2026-03-05T10:00:00"
                },
                {
                    "from": "rejected",
                    "to": "closed",
                    "changed_by": 9,
                    "comment": null,
                    "changed_at": "2026-03-06T10:00:00"
                }
            ]);

            let result = can_submit_application(
                &joint(2),
                &user(Role::Member, Some(1)),
                &[closed],
                at("2026-03-20"),
            );

            assert!(!result.is_allowed());
        }
    }
}
