use cr_auth::{CredentialCipher, InternalTokenVerifier, JwtValidator};
use cr_identity::{
    AccountLinker, CredentialRefreshClient, IdentityProvisioner, PlatformDataApi, ProfileEditor,
    SessionResolver, SovereigntyService, TokenExchange, UsernameRegistry,
};

use std::sync::Arc;

use sqlx::SqlitePool;

/// Request-time authentication settings
pub struct AuthState {
    pub jwt_validator: JwtValidator,
    pub internal_token: InternalTokenVerifier,
    /// Name of the session cookie cleared after account deletion
    pub session_cookie: String,
}

/// Shared handler state. Cloned per request; every field is a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: Arc<AuthState>,
    pub provisioner: Arc<IdentityProvisioner>,
    pub linker: Arc<AccountLinker>,
    pub refresh_client: Arc<CredentialRefreshClient>,
    pub session_resolver: Arc<SessionResolver>,
    pub sovereignty: Arc<SovereigntyService>,
    pub usernames: Arc<UsernameRegistry>,
    pub profile_editor: Arc<ProfileEditor>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        cipher: Arc<CredentialCipher>,
        auth: AuthState,
        token_exchange: Arc<dyn TokenExchange>,
        data_api: Arc<dyn PlatformDataApi>,
    ) -> Self {
        Self {
            provisioner: Arc::new(IdentityProvisioner::new(pool.clone())),
            linker: Arc::new(AccountLinker::new(pool.clone(), cipher.clone())),
            refresh_client: Arc::new(CredentialRefreshClient::new(
                pool.clone(),
                cipher,
                token_exchange,
                data_api,
            )),
            session_resolver: Arc::new(SessionResolver::new(pool.clone())),
            sovereignty: Arc::new(SovereigntyService::new(pool.clone())),
            usernames: Arc::new(UsernameRegistry::new(pool.clone())),
            profile_editor: Arc::new(ProfileEditor::new(pool.clone())),
            auth: Arc::new(auth),
            pool,
        }
    }
}
