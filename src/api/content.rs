//! Read endpoints feeding the blog pages.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::app::AppState;
use crate::error::AppError;
use crate::models::content::{Author, Category, Page, Post};
use crate::rendering::markdown::render_markdown;

#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    /// Sanitized HTML of the post body, if it has one.
    pub content_html: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryDetail {
    pub category: Category,
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
pub struct AuthorDetail {
    pub author: Author,
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
pub struct PageDetail {
    #[serde(flatten)]
    pub page: Page,
    pub content_html: Option<String>,
}

/// `GET /api/posts`
pub async fn list_posts_handler(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state
        .repo
        .posts()
        .await
        .map_err(AppError::upstream("Failed to fetch posts"))?;
    Ok(Json(posts))
}

/// `GET /api/posts/{slug}`
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetail>, AppError> {
    let post = state
        .repo
        .post_by_slug(&slug)
        .await
        .map_err(AppError::upstream("Failed to fetch post"))?
        .ok_or_else(|| AppError::NotFound(format!("Post '{slug}' not found")))?;

    let body = post.metadata.content.as_deref().or(post.content.as_deref());
    let content_html = body.map(render_markdown);

    Ok(Json(PostDetail { post, content_html }))
}

/// `GET /api/categories`
pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = state
        .repo
        .categories()
        .await
        .map_err(AppError::upstream("Failed to fetch categories"))?;
    Ok(Json(categories))
}

/// `GET /api/categories/{slug}`: the category and its posts.
pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryDetail>, AppError> {
    let category = state
        .repo
        .category_by_slug(&slug)
        .await
        .map_err(AppError::upstream("Failed to fetch category"))?
        .ok_or_else(|| AppError::NotFound(format!("Category '{slug}' not found")))?;

    let posts = state
        .repo
        .posts_by_category(&category.id)
        .await
        .map_err(AppError::upstream("Failed to fetch posts by category"))?;

    Ok(Json(CategoryDetail { category, posts }))
}

/// `GET /api/authors`
pub async fn list_authors_handler(State(state): State<AppState>) -> Result<Json<Vec<Author>>, AppError> {
    let authors = state
        .repo
        .authors()
        .await
        .map_err(AppError::upstream("Failed to fetch authors"))?;
    Ok(Json(authors))
}

/// `GET /api/authors/{slug}`: the author and their posts.
pub async fn get_author_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AuthorDetail>, AppError> {
    let author = state
        .repo
        .author_by_slug(&slug)
        .await
        .map_err(AppError::upstream("Failed to fetch author"))?
        .ok_or_else(|| AppError::NotFound(format!("Author '{slug}' not found")))?;

    let posts = state
        .repo
        .posts_by_author(&author.id)
        .await
        .map_err(AppError::upstream("Failed to fetch posts by author"))?;

    Ok(Json(AuthorDetail { author, posts }))
}

/// `GET /api/pages/{slug}`
pub async fn get_page_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PageDetail>, AppError> {
    let page = state
        .repo
        .page_by_slug(&slug)
        .await
        .map_err(AppError::upstream("Failed to fetch page"))?
        .ok_or_else(|| AppError::NotFound(format!("Page '{slug}' not found")))?;

    let content_html = page.metadata.content.as_deref().map(render_markdown);
    Ok(Json(PageDetail { page, content_html }))
}
