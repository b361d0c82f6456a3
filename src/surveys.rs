use crate::db;
use crate::db::models::{Answer, Survey};
use crate::error::ApiError;
use crate::identity;
use crate::startup::AppState;
use axum::{
    extract::{Extension, Json, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

// Request/Response DTOs
#[derive(Debug, Deserialize)]
pub struct CreateSurveyRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct CreateSurveyResponse {
    pub survey_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// Full replacement payload. Counts deserialize as unsigned, so negative
/// values never reach the store; they bounce at the JSON layer.
#[derive(Debug, Deserialize)]
pub struct UpdateSurveyRequest {
    pub question: String,
    pub yes_count: u32,
    pub no_count: u32,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub yes_percent: f64,
    pub no_percent: f64,
}

/// Percentage split of the recorded answers, or `None` while the survey has
/// no answers at all.
fn percentages(yes_count: i64, no_count: i64) -> Option<(f64, f64)> {
    let total = yes_count + no_count;
    if total == 0 {
        return None;
    }

    let total = total as f64;
    Some((
        yes_count as f64 / total * 100.0,
        no_count as f64 / total * 100.0,
    ))
}

/// Create a new survey (authenticated users only). Counters start at zero.
pub async fn create_survey(
    Extension(app_state): Extension<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateSurveyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = identity::authenticate(&app_state.db, &headers).await?;

    let survey = Survey {
        id: Uuid::new_v4(),
        owner_id: user.id,
        question: payload.question,
        yes_count: 0,
        no_count: 0,
    };

    db::insert_survey(&app_state.db, &survey).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSurveyResponse { survey_id: survey.id }),
    ))
}

/// Record one anonymous answer. No credentials required.
pub async fn record_answer(
    Extension(app_state): Extension<AppState>,
    Path(survey_id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Existence is checked first: an unknown survey is NotFound even when the
    // ballot token is garbage too
    if db::find_survey_by_id(&app_state.db, survey_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound);
    }

    let answer = Answer::parse(&payload.answer).ok_or(ApiError::InvalidAnswer)?;

    // A survey deleted between the lookup and the bump shows up as zero rows
    if !db::increment_survey_counter(&app_state.db, survey_id, answer).await? {
        return Err(ApiError::NotFound);
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Answer recorded"
        })),
    ))
}

/// Fetch one survey with its current counters (owner only).
pub async fn get_survey(
    Extension(app_state): Extension<AppState>,
    headers: HeaderMap,
    Path(survey_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = identity::authenticate(&app_state.db, &headers).await?;

    // Someone else's survey is reported exactly like a missing one
    let survey = db::find_survey_by_id(&app_state.db, survey_id)
        .await?
        .filter(|s| s.owner_id == user.id)
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::OK, Json(survey)))
}

/// Percentage breakdown of a survey's answers (owner only).
pub async fn survey_statistics(
    Extension(app_state): Extension<AppState>,
    headers: HeaderMap,
    Path(survey_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = identity::authenticate(&app_state.db, &headers).await?;

    let survey = db::find_survey_by_id(&app_state.db, survey_id)
        .await?
        .filter(|s| s.owner_id == user.id)
        .ok_or(ApiError::NotFound)?;

    let (yes_percent, no_percent) =
        percentages(survey.yes_count, survey.no_count).ok_or(ApiError::NoResponses)?;

    Ok((
        StatusCode::OK,
        Json(StatisticsResponse {
            yes_percent,
            no_percent,
        }),
    ))
}

/// List every survey owned by the caller.
pub async fn list_surveys(
    Extension(app_state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let user = identity::authenticate(&app_state.db, &headers).await?;

    let surveys = db::list_surveys_by_owner(&app_state.db, user.id).await?;

    Ok((StatusCode::OK, Json(surveys)))
}

/// Replace a survey's question and counters wholesale (owner only).
pub async fn update_survey(
    Extension(app_state): Extension<AppState>,
    headers: HeaderMap,
    Path(survey_id): Path<Uuid>,
    Json(payload): Json<UpdateSurveyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = identity::authenticate(&app_state.db, &headers).await?;

    let replaced = db::replace_survey(
        &app_state.db,
        survey_id,
        user.id,
        &payload.question,
        i64::from(payload.yes_count),
        i64::from(payload.no_count),
    )
    .await?;

    if !replaced {
        return Err(ApiError::NotFound);
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Survey updated"
        })),
    ))
}

/// Delete one survey (owner only).
pub async fn delete_survey(
    Extension(app_state): Extension<AppState>,
    headers: HeaderMap,
    Path(survey_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = identity::authenticate(&app_state.db, &headers).await?;

    if !db::delete_survey(&app_state.db, survey_id, user.id).await? {
        return Err(ApiError::NotFound);
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Survey deleted"
        })),
    ))
}

/// Delete every survey owned by the caller. Succeeds even when there is
/// nothing to delete.
pub async fn delete_all_surveys(
    Extension(app_state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let user = identity::authenticate(&app_state.db, &headers).await?;

    db::delete_surveys_by_owner(&app_state.db, user.id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "All surveys for this user deleted"
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_split_the_total() {
        let (yes, no) = percentages(2, 1).expect("non-empty");
        assert!((yes - 66.666_666_666_666_66).abs() < 1e-9);
        assert!((no - 33.333_333_333_333_33).abs() < 1e-9);
    }

    #[test]
    fn percentages_handle_one_sided_surveys() {
        assert_eq!(percentages(5, 0), Some((100.0, 0.0)));
        assert_eq!(percentages(0, 3), Some((0.0, 100.0)));
    }

    #[test]
    fn empty_survey_has_no_percentages() {
        assert_eq!(percentages(0, 0), None);
    }
}
