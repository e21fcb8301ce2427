pub mod session;
pub mod workers;
