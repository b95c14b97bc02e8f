//! # Web3 Personality Quiz Common Library
//!
//! Shared code for the quiz service including:
//! - Personality types, question bank and scoring
//! - Compatibility table
//! - Result records, repository and leaderboard queries
//! - Key-value store adapter (Redis and in-memory)
//! - Configuration loading

pub mod compatibility;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod personality;
pub mod questions;
pub mod repository;
pub mod result;
pub mod scoring;
pub mod store;
pub mod time;

pub use error::{Error, Result};
pub use personality::PersonalityType;
pub use result::{QuizResult, DEFAULT_USER_ID};
