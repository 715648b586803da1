use tracing::{error, info, warn, debug};

/// Logs command start with consistent format
pub fn log_command_start(
    command: &str,
    user: &str,
    user_id: u64,
    chat_id: i64,
    details: Option<&str>,
) {
    match details {
        Some(d) => info!(
            "CMD_START: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_START: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(
    command: &str,
    user: &str,
    user_id: u64,
    chat_id: i64,
    details: Option<&str>,
) {
    match details {
        Some(d) => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, user: &str, user_id: u64, chat_id: i64, error: &str) {
    error!(
        "CMD_ERROR: {} by {}({}) in chat {} - {}",
        command, user, user_id, chat_id, error
    );
}

/// Logs a button press and how it was resolved
pub fn log_control_activation(control: &str, user_id: u64, outcome: &str) {
    info!("CONTROL: {} pressed by {} - {}", control, user_id, outcome);
}

/// Logs registration session transitions
pub fn log_session_event(event: &str, user_id: u64, details: Option<&str>) {
    match details {
        Some(d) => debug!("SESSION: {} for user {} - {}", event, user_id, d),
        None => debug!("SESSION: {} for user {}", event, user_id),
    }
}

/// Logs a message that could not be delivered or edited
pub fn log_delivery_error(operation: &str, chat_id: i64, error: &str) {
    warn!("DELIVERY_ERROR: {} to chat {} failed: {}", operation, chat_id, error);
}

/// Logs timeout events with consistent format
pub fn log_timeout(operation: &str, duration_secs: u64, details: Option<&str>) {
    match details {
        Some(d) => warn!("TIMEOUT: {} after {}s - {}", operation, duration_secs, d),
        None => warn!("TIMEOUT: {} after {}s", operation, duration_secs),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
