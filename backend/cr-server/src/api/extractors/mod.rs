pub mod caller;
pub mod internal_access;
