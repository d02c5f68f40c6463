//! Data transfer objects

mod requests;

pub use requests::LogWorkRequest;
