use axum::extract::State;
use axum::Json;

use crate::api::extract::ApiJson;
use crate::app::AppState;
use crate::error::AppError;
use crate::forms::{submit_contact, subscribe_newsletter};
use crate::models::forms::{ActionResponse, ContactForm, NewsletterForm};

/// `POST /api/contact`
pub async fn contact_handler(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ContactForm>,
) -> Result<Json<ActionResponse>, AppError> {
    submit_contact(&state.repo, form).await?;
    Ok(Json(ActionResponse::ok()))
}

/// `POST /api/newsletter`
pub async fn newsletter_handler(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<NewsletterForm>,
) -> Result<Json<ActionResponse>, AppError> {
    subscribe_newsletter(&state.repo, form).await?;
    Ok(Json(ActionResponse::ok()))
}
