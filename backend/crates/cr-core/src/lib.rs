pub mod compact_count;
pub mod error;
pub mod models;

pub use compact_count::{format_compact_count, normalize_count};
pub use error::{CoreError, Result as CoreResult};
pub use error_location::ErrorLocation;
pub use models::enriched_claims::EnrichedClaims;
pub use models::error_category::ErrorCategory;
pub use models::identity::{Identity, NewIdentity};
pub use models::linked_account::LinkedAccount;
pub use models::linking_payload::LinkingPayload;
pub use models::platform_type::PlatformType;
pub use models::profile_result::{PlatformProfile, ProfileFailure, ProfileResult};
pub use models::sovereignty_result::{SovereigntyFailure, SovereigntyResult};
pub use models::username::{RESERVED_USERNAMES, Username};
