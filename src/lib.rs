//! Burlómetro — Portuguese scam-message analyzer.

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod llm;
