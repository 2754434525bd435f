pub mod error;
pub mod extractors;
pub mod identities;
pub mod me;
pub mod platforms;
pub mod sessions;
pub mod tagged_response;
pub mod usernames;
