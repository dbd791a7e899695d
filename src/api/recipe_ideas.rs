use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::extract::ApiJson;
use crate::app::AppState;
use crate::error::AppError;
use crate::forms::submit_recipe_idea;
use crate::models::content::Prompt;
use crate::models::forms::{ActionResponse, RecipeIdeaForm, VoteRequest};
use crate::votes::{cast_vote, rank_prompts};

#[derive(Debug, Serialize)]
pub struct PromptList {
    pub prompts: Vec<Prompt>,
}

/// `GET /api/recipe-ideas`, most voted first.
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<PromptList>, AppError> {
    let prompts = state
        .repo
        .prompts()
        .await
        .map_err(AppError::upstream("Failed to fetch recipe ideas"))?;

    Ok(Json(PromptList {
        prompts: rank_prompts(prompts),
    }))
}

/// `POST /api/recipe-ideas`
pub async fn create_handler(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<RecipeIdeaForm>,
) -> Result<Json<ActionResponse>, AppError> {
    submit_recipe_idea(&state.repo, form).await?;
    Ok(Json(ActionResponse::ok()))
}

/// `POST /api/recipe-ideas/vote`
pub async fn vote_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VoteRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let new_vote_count = cast_vote(&state.repo, &request.prompt_id).await?;
    Ok(Json(ActionResponse::voted(new_vote_count)))
}
