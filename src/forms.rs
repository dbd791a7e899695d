//! Intake for the contact, newsletter and recipe-idea forms.
//!
//! Each submission is normalized, checked for presence, checked for format
//! and only then written to the content store.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;
use crate::models::forms::{ContactForm, NewsletterForm, RecipeIdeaForm};
use crate::store::repository::ContentRepository;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern should compile")
});

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Fail with "<fields> required" naming every blank field, in order.
fn require(fields: &[(&str, &str)]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(label, _)| *label)
        .collect();

    let Some((last, init)) = missing.split_last() else {
        return Ok(());
    };

    let list = if init.is_empty() {
        format!("{last} is")
    } else {
        format!("{} and {last} are", init.join(", "))
    };
    Err(AppError::Validation(format!("{} required.", capitalize(&list))))
}

fn require_email(email: &str) -> Result<(), AppError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::Validation("Please enter a valid email address.".into()))
    }
}

fn require_max_chars(label: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{label} must be {max} characters or less."
        )));
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub async fn submit_contact(repo: &ContentRepository, form: ContactForm) -> Result<(), AppError> {
    let name = form.name.trim();
    let email = normalize_email(&form.email);
    let message = form.message.trim();

    require(&[("name", name), ("email", email.as_str()), ("message", message)])?;
    require_email(&email)?;

    repo.insert_contact_submission(name, &email, message)
        .await
        .map_err(AppError::upstream(
            "Failed to submit contact form. Please try again later.",
        ))?;

    tracing::info!("contact submission stored");
    Ok(())
}

/// Subscribe an email to the newsletter.
///
/// The duplicate check and the insert are two separate store calls, so two
/// simultaneous sign-ups with the same address can both succeed.
pub async fn subscribe_newsletter(repo: &ContentRepository, form: NewsletterForm) -> Result<(), AppError> {
    const FAILED: &str = "Failed to subscribe. Please try again later.";

    let name = form.name.trim();
    let email = normalize_email(&form.email);

    require(&[("name", name), ("email", email.as_str())])?;
    require_email(&email)?;

    if repo
        .subscriber_exists(&email)
        .await
        .map_err(AppError::upstream(FAILED))?
    {
        return Err(AppError::Duplicate(
            "This email is already subscribed to our newsletter.".into(),
        ));
    }

    repo.insert_newsletter_subscriber(name, &email)
        .await
        .map_err(AppError::upstream(FAILED))?;

    tracing::info!("newsletter subscriber added");
    Ok(())
}

pub async fn submit_recipe_idea(repo: &ContentRepository, form: RecipeIdeaForm) -> Result<(), AppError> {
    let title = form.title.trim();
    let description = form.prompt.trim();

    require(&[("title", title), ("description", description)])?;
    require_max_chars("Title", title, MAX_TITLE_CHARS)?;
    require_max_chars("Description", description, MAX_DESCRIPTION_CHARS)?;

    repo.insert_prompt(title, description)
        .await
        .map_err(AppError::upstream(
            "Failed to submit recipe idea. Please try again later.",
        ))?;

    tracing::info!(title, "recipe idea submitted");
    Ok(())
}
