//! # Event Registration Bot
//!
//! A Telegram bot that publishes moderator-approved event announcements and
//! registers participants through a short private question sequence.
//!
//! ## Features
//! - `/announce` builds an announcement preview that a moderator approves
//! - Approving closes older Register buttons and posts the new announcement
//! - Register opens a DM session with five fixed questions
//! - Completed registrations are posted to a results channel
//! - Everything is kept in memory; a restart drops in-flight sessions

/// Telegram commands, button descriptors and update handlers
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Error types surfaced to users and logs
pub mod error;
/// Registration sessions, approvals and background services
pub mod services;
/// Utility functions for formatting, feedback and logging
pub mod utils;
