pub mod login;
pub mod principal;
