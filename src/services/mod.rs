pub mod activities_service;
pub mod error;

pub use error::ActivityError;
