pub mod enriched_claims;
pub mod error_category;
pub mod identity;
pub mod linked_account;
pub mod linking_payload;
pub mod platform_type;
pub mod profile_result;
pub mod sovereignty_result;
pub mod username;
