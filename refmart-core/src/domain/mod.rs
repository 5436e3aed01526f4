// refmart-core/src/domain/mod.rs

pub mod dimensions;
pub mod error;
pub mod facts;
pub mod quality;
pub mod referral;

// Convenient re-export to keep imports short elsewhere
pub use error::DomainError;
