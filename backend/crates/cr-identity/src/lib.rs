pub mod account_linker;
pub mod credential_refresh_client;
pub mod error;
pub mod google_token_exchange;
pub mod identity_provisioner;
pub mod metrics;
pub mod platform_api_error;
pub mod platform_client;
pub mod profile_editor;
pub mod session_resolver;
pub mod sovereignty_service;
pub mod username_registry;
pub mod youtube_data_api;

pub use account_linker::{AccountLinker, apply_link_event};
pub use credential_refresh_client::CredentialRefreshClient;
pub use error::{IdentityError, Result};
pub use google_token_exchange::GoogleTokenExchange;
pub use identity_provisioner::IdentityProvisioner;
pub use metrics::IdentityMetrics;
pub use platform_api_error::{PlatformApiError, Result as PlatformApiResult};
pub use platform_client::{AccessGrant, ChannelSnapshot, PlatformDataApi, TokenExchange};
pub use profile_editor::{ProfileEditor, ProfileUpdate, ProfileUpdateResult};
pub use session_resolver::SessionResolver;
pub use sovereignty_service::SovereigntyService;
pub use username_registry::{AvailabilityResult, UsernameRegistry};
pub use youtube_data_api::YoutubeDataApi;
