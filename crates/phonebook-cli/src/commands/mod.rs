pub mod config;
pub mod contact;
