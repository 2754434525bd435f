pub mod identities;
pub mod identity_dto;
pub mod link_request;
pub mod linked_account_dto;
