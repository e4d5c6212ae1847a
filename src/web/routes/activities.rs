use std::collections::BTreeMap;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Redirect,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::database::ActivityDirectory;
use crate::models::Activity;
use crate::services::activities_service;
use crate::services::ActivityError;

pub const LANDING_PAGE: &str = "/static/index.html";

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    // A present but empty value is passed on as-is; only an absent parameter is refused.
    fn require(
        query: Result<Query<EmailQuery>, QueryRejection>,
    ) -> Result<String, ActivityError> {
        let Query(query) = query.map_err(|rejection| ActivityError::InvalidQuery {
            reason: rejection.body_text(),
        })?;
        query.email.ok_or(ActivityError::MissingEmail)
    }
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub async fn root_handler() -> Redirect {
    Redirect::temporary(LANDING_PAGE)
}

pub async fn list_activities_handler(
    State(directory): State<ActivityDirectory>,
) -> Json<BTreeMap<String, Activity>> {
    Json(activities_service::list_activities(&directory).await)
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
    State(directory): State<ActivityDirectory>,
) -> Result<Json<MessageBody>, ActivityError> {
    let email = EmailQuery::require(query)?;
    let message = activities_service::join(&directory, &activity_name, &email).await?;
    Ok(Json(MessageBody { message }))
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
    State(directory): State<ActivityDirectory>,
) -> Result<Json<MessageBody>, ActivityError> {
    let email = EmailQuery::require(query)?;
    let message = activities_service::leave(&directory, &activity_name, &email).await?;
    Ok(Json(MessageBody { message }))
}
