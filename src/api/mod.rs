mod articles;
mod error;
mod tokens;
mod users;

use axum::Router;
use std::sync::Arc;

use crate::db::Database;
use crate::jwt::JwtConfig;
use crate::service::TokenService;

/// Create the API router.
pub fn create_api_router(db: Database, jwt: Arc<JwtConfig>) -> Router {
    let token_service = Arc::new(TokenService::new(
        jwt.clone(),
        db.users(),
        db.refresh_tokens(),
    ));

    let tokens_state = tokens::TokensState {
        jwt: jwt.clone(),
        service: token_service,
    };

    let articles_state = articles::ArticlesState {
        db: db.clone(),
        jwt,
    };

    let users_state = users::UsersState { db };

    Router::new()
        .nest("/users", users::router(users_state))
        .nest("/articles", articles::router(articles_state))
        .merge(tokens::router(tokens_state))
}
