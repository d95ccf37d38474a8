//! Articles API.
//!
//! Reading is public. Writing requires a bearer token; only the author or an
//! admin may change or delete an article.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::{ApiError, ResultExt};
use crate::auth::{Auth, AuthenticatedPrincipal, OptionalAuth};
use crate::db::{Article, Database};
use crate::impl_has_auth_backend;
use crate::jwt::JwtConfig;

const MAX_TITLE_LENGTH: usize = 200;

/// State for article endpoints.
#[derive(Clone)]
pub struct ArticlesState {
    pub db: Database,
    pub jwt: Arc<JwtConfig>,
}

impl_has_auth_backend!(ArticlesState);

pub fn router(state: ArticlesState) -> Router {
    Router::new()
        .route("/", get(list_articles).post(create_article))
        .route(
            "/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .with_state(state)
}

// --- Request/Response types ---

#[derive(Deserialize)]
struct ArticleRequest {
    title: String,
    #[serde(default)]
    content: String,
}

#[derive(Serialize)]
struct ArticleResponse {
    id: i64,
    title: String,
    content: String,
    author: String,
    created_at: String,
    updated_at: String,
    /// Whether the caller may edit this article
    editable: bool,
}

#[derive(Serialize)]
struct ArticleListItem {
    id: i64,
    title: String,
    content: String,
}

impl ArticleResponse {
    fn new(article: Article, principal: Option<&AuthenticatedPrincipal>) -> Self {
        let editable = principal.is_some_and(|p| may_modify(p, &article));
        Self {
            id: article.id,
            title: article.title,
            content: article.content,
            author: article.author,
            created_at: article.created_at,
            updated_at: article.updated_at,
            editable,
        }
    }
}

// --- Helpers ---

fn may_modify(principal: &AuthenticatedPrincipal, article: &Article) -> bool {
    principal.subject == article.author || principal.is_admin()
}

fn validate_article(payload: &ArticleRequest) -> Result<(), ApiError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::bad_request("Title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ApiError::bad_request("Title is too long"));
    }
    Ok(())
}

/// Load an article and check the principal may change it.
async fn authorized_article(
    db: &Database,
    id: i64,
    principal: &AuthenticatedPrincipal,
) -> Result<Article, ApiError> {
    let article = db
        .articles()
        .get_by_id(id)
        .await
        .db_err("Failed to get article")?
        .ok_or_else(|| ApiError::not_found("Article not found"))?;

    if !may_modify(principal, &article) {
        return Err(ApiError::forbidden("Not the author of this article"));
    }

    Ok(article)
}

// --- Handlers ---

async fn list_articles(State(state): State<ArticlesState>) -> Result<impl IntoResponse, ApiError> {
    let articles = state
        .db
        .articles()
        .list()
        .await
        .db_err("Failed to list articles")?;

    let response: Vec<ArticleListItem> = articles
        .into_iter()
        .map(|a| ArticleListItem {
            id: a.id,
            title: a.title,
            content: a.content,
        })
        .collect();

    Ok(Json(response))
}

async fn get_article(
    State(state): State<ArticlesState>,
    OptionalAuth(principal): OptionalAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let article = state
        .db
        .articles()
        .get_by_id(id)
        .await
        .db_err("Failed to get article")?
        .ok_or_else(|| ApiError::not_found("Article not found"))?;

    Ok(Json(ArticleResponse::new(article, principal.as_ref())))
}

async fn create_article(
    State(state): State<ArticlesState>,
    Auth(principal): Auth,
    Json(payload): Json<ArticleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_article(&payload)?;

    let id = state
        .db
        .articles()
        .create(payload.title.trim(), &payload.content, &principal.subject)
        .await
        .db_err("Failed to create article")?;

    let article = state
        .db
        .articles()
        .get_by_id(id)
        .await
        .db_err("Failed to get article")?
        .ok_or_else(|| ApiError::internal("Article vanished after insert"))?;

    Ok((
        StatusCode::CREATED,
        Json(ArticleResponse::new(article, Some(&principal))),
    ))
}

async fn update_article(
    State(state): State<ArticlesState>,
    Auth(principal): Auth,
    Path(id): Path<i64>,
    Json(payload): Json<ArticleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_article(&payload)?;
    authorized_article(&state.db, id, &principal).await?;

    let updated = state
        .db
        .articles()
        .update(id, payload.title.trim(), &payload.content)
        .await
        .db_err("Failed to update article")?;

    if !updated {
        return Err(ApiError::not_found("Article not found"));
    }

    let article = state
        .db
        .articles()
        .get_by_id(id)
        .await
        .db_err("Failed to get article")?
        .ok_or_else(|| ApiError::not_found("Article not found"))?;

    Ok(Json(ArticleResponse::new(article, Some(&principal))))
}

async fn delete_article(
    State(state): State<ArticlesState>,
    Auth(principal): Auth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    authorized_article(&state.db, id, &principal).await?;

    state
        .db
        .articles()
        .delete(id)
        .await
        .db_err("Failed to delete article")?;

    Ok(StatusCode::NO_CONTENT)
}
