//! Bearer-token authentication.
//!
//! Every protected request carries a stateless access token in
//! `Authorization: Bearer <token>`. The token is validated, then resolved
//! into an `AuthenticatedPrincipal` for the handler. Clients are expected
//! to exchange refresh tokens through `service::TokenService` rather than
//! present them here.

mod errors;
mod extractors;
mod header;
mod resolver;
mod state;
mod types;

pub use errors::{ApiAuthError, AuthError, UNEXPECTED_TOKEN};
pub use extractors::{Auth, OptionalAuth};
pub use header::{BEARER_PREFIX, bearer_token};
pub use resolver::{get_user_id, resolve};
pub use state::HasAuthBackend;
pub use types::{AuthenticatedPrincipal, DEFAULT_AUTHORITY};
