use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::database::activity_directory::{self, ActivityDirectory, RosterChange};
use crate::models::Activity;
use crate::services::error::ActivityError;

pub async fn list_activities(directory: &ActivityDirectory) -> BTreeMap<String, Activity> {
    activity_directory::load_activities(directory).await
}

/// Adds `email` to the roster of `activity` and returns the confirmation text.
pub async fn join(
    directory: &ActivityDirectory,
    activity: &str,
    email: &str,
) -> Result<String, ActivityError> {
    match activity_directory::insert_participant(directory, activity, email).await {
        RosterChange::Applied => {
            info!(activity, email, "participant signed up");
            Ok(format!("Signed up {} for {}", email, activity))
        }
        RosterChange::Unchanged => {
            warn!(activity, email, "signup rejected: already registered");
            Err(ActivityError::AlreadyRegistered {
                activity: activity.to_string(),
                email: email.to_string(),
            })
        }
        RosterChange::UnknownActivity => Err(not_found(activity)),
    }
}

pub async fn leave(
    directory: &ActivityDirectory,
    activity: &str,
    email: &str,
) -> Result<String, ActivityError> {
    match activity_directory::remove_participant(directory, activity, email).await {
        RosterChange::Applied => {
            info!(activity, email, "participant unregistered");
            Ok(format!("Unregistered {} from {}", email, activity))
        }
        RosterChange::Unchanged => {
            warn!(activity, email, "unregister rejected: not registered");
            Err(ActivityError::NotRegistered {
                activity: activity.to_string(),
                email: email.to_string(),
            })
        }
        RosterChange::UnknownActivity => Err(not_found(activity)),
    }
}

fn not_found(activity: &str) -> ActivityError {
    warn!(activity, "unknown activity");
    ActivityError::NotFound {
        activity: activity.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHESS: &str = "Chess Club";

    #[tokio::test]
    async fn join_then_list_shows_email() {
        let dir = ActivityDirectory::seeded();
        let msg = join(&dir, CHESS, "new@mergington.edu").await.unwrap();
        assert!(msg.contains(CHESS));
        assert!(msg.contains("new@mergington.edu"));

        let all = list_activities(&dir).await;
        assert!(all[CHESS].has_participant("new@mergington.edu"));
    }

    #[tokio::test]
    async fn second_join_is_rejected() {
        let dir = ActivityDirectory::seeded();
        join(&dir, CHESS, "twice@mergington.edu").await.unwrap();
        let err = join(&dir, CHESS, "twice@mergington.edu").await.unwrap_err();
        assert!(matches!(err, ActivityError::AlreadyRegistered { .. }));
    }

    #[tokio::test]
    async fn leave_after_join_restores_roster() {
        let dir = ActivityDirectory::seeded();
        let before = list_activities(&dir).await[CHESS].participants.clone();

        join(&dir, CHESS, "round@mergington.edu").await.unwrap();
        let msg = leave(&dir, CHESS, "round@mergington.edu").await.unwrap();
        assert!(msg.contains(CHESS));
        assert!(msg.contains("round@mergington.edu"));

        assert_eq!(list_activities(&dir).await[CHESS].participants, before);
    }

    #[tokio::test]
    async fn leave_without_signup_is_rejected() {
        let dir = ActivityDirectory::seeded();
        let err = leave(&dir, CHESS, "ghost@mergington.edu").await.unwrap_err();
        assert!(matches!(err, ActivityError::NotRegistered { .. }));
        assert_eq!(err.to_string(), "Student is not signed up for this activity");
    }

    #[tokio::test]
    async fn unknown_activity_is_not_found_for_any_email() {
        let dir = ActivityDirectory::seeded();
        for email in ["michael@mergington.edu", "someone@else.org"] {
            let err = join(&dir, "Underwater Basket Weaving", email)
                .await
                .unwrap_err();
            assert!(matches!(err, ActivityError::NotFound { .. }));
            let err = leave(&dir, "Underwater Basket Weaving", email)
                .await
                .unwrap_err();
            assert!(matches!(err, ActivityError::NotFound { .. }));
        }
    }

    #[tokio::test]
    async fn one_email_can_join_several_activities() {
        let dir = ActivityDirectory::seeded();
        let email = "busy@mergington.edu";
        for activity in [CHESS, "Programming Class", "Drama Club"] {
            join(&dir, activity, email).await.unwrap();
        }
        let all = list_activities(&dir).await;
        assert!(all[CHESS].has_participant(email));
        assert!(all["Programming Class"].has_participant(email));
        assert!(all["Drama Club"].has_participant(email));
    }

    #[tokio::test]
    async fn emails_are_matched_exactly() {
        let dir = ActivityDirectory::seeded();
        join(&dir, CHESS, " michael@mergington.edu").await.unwrap();
        let roster = list_activities(&dir).await[CHESS].participants.clone();
        assert!(roster.contains(&"michael@mergington.edu".to_string()));
        assert!(roster.contains(&" michael@mergington.edu".to_string()));

        let err = leave(&dir, CHESS, "MICHAEL@mergington.edu").await.unwrap_err();
        assert!(matches!(err, ActivityError::NotRegistered { .. }));
    }

    #[tokio::test]
    async fn empty_email_on_unknown_activity_is_not_found() {
        let dir = ActivityDirectory::seeded();
        let err = join(&dir, "Nonexistent", "").await.unwrap_err();
        assert!(matches!(err, ActivityError::NotFound { .. }));
        let err = leave(&dir, "Nonexistent", "").await.unwrap_err();
        assert!(matches!(err, ActivityError::NotFound { .. }));
    }
}
