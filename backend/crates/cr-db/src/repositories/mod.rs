pub mod identity_repository;
pub mod linked_account_repository;
pub mod session_repository;

pub(crate) mod rows;
