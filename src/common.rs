pub mod alerts;
pub mod error;
pub mod export;
pub mod filter;
pub mod money;
pub mod patch;
pub mod validation;
