/// Command definitions and handlers
pub mod commands;
/// Inline button descriptors carried in callback payloads
pub mod controls;
/// Update routing for the dispatcher
pub mod handlers;
/// Chat platform port and its Telegram implementation
pub mod platform;
