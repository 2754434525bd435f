pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::{
        caller::Caller,
        internal_access::{INTERNAL_TOKEN_HEADER, InternalAccess},
    },
    identities::{
        identities::{link_account, provision_identity},
        identity_dto::IdentityDto,
        link_request::LinkRequest,
        linked_account_dto::LinkedAccountDto,
    },
    me::{delete_me, update_me},
    platforms::get_platform_profile,
    sessions::resolve_session,
    tagged_response::{status_for, tagged_response},
    usernames::check_username,
};
pub use error::{Result as ServerResult, ServerError};
pub use routes::build_router;
pub use state::{AppState, AuthState};
