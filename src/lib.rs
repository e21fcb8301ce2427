pub mod domain;
pub mod handlers;
pub mod services;
pub mod store;
