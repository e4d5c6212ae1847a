use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::database::seed;
use crate::models::Activity;

/// In-memory activity store. Cheap to clone; every clone shares the same map.
#[derive(Debug, Clone, Default)]
pub struct ActivityDirectory {
    inner: Arc<RwLock<BTreeMap<String, Activity>>>,
}

/// Result of a roster mutation, decided under the write lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterChange {
    Applied,
    Unchanged,
    UnknownActivity,
}

impl ActivityDirectory {
    pub fn new(activities: impl IntoIterator<Item = (String, Activity)>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(activities.into_iter().collect())),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::mergington_activities())
    }
}

pub async fn load_activities(directory: &ActivityDirectory) -> BTreeMap<String, Activity> {
    directory.inner.read().await.clone()
}

pub async fn insert_participant(
    directory: &ActivityDirectory,
    name: &str,
    email: &str,
) -> RosterChange {
    let mut activities = directory.inner.write().await;
    let Some(activity) = activities.get_mut(name) else {
        return RosterChange::UnknownActivity;
    };
    if activity.has_participant(email) {
        return RosterChange::Unchanged;
    }
    activity.participants.push(email.to_string());
    RosterChange::Applied
}

pub async fn remove_participant(
    directory: &ActivityDirectory,
    name: &str,
    email: &str,
) -> RosterChange {
    let mut activities = directory.inner.write().await;
    let Some(activity) = activities.get_mut(name) else {
        return RosterChange::UnknownActivity;
    };
    let Some(idx) = activity.participants.iter().position(|p| p == email) else {
        return RosterChange::Unchanged;
    };
    activity.participants.remove(idx);
    RosterChange::Applied
}
