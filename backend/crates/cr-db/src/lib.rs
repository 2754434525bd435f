pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{begin_immediate, connect, run_migrations};
pub use error::{DbError, Result};
pub use repositories::identity_repository::{DeletionCounts, IdentityRepository};
pub use repositories::linked_account_repository::LinkedAccountRepository;
pub use repositories::session_repository::SessionRepository;
