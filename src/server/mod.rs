pub mod core;
pub mod endpoints;
pub mod upload;
