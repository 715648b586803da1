use event_registration_bot::config::{Config, MAX_TIMEOUT_SECS};
use std::env;
use std::sync::Mutex;

// Mutex to ensure config tests run sequentially to avoid environment variable conflicts
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

const ALL_VARS: [&str; 6] = [
    "TELEGRAM_BOT_TOKEN",
    "REGISTRATION_CHANNEL_ID",
    "RESULTS_CHANNEL_ID",
    "HTTP_PORT",
    "APPROVAL_TIMEOUT_SECS",
    "PLATFORM_TIMEOUT_SECS",
];

fn reset_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

fn set_required() {
    env::set_var("TELEGRAM_BOT_TOKEN", "test_token");
    env::set_var("REGISTRATION_CHANNEL_ID", "-1001375774964");
    env::set_var("RESULTS_CHANNEL_ID", "-1001375786132");
}

#[test]
fn test_config_from_env_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    reset_env();

    set_required();
    env::set_var("HTTP_PORT", "8080");
    env::set_var("APPROVAL_TIMEOUT_SECS", "120");
    env::set_var("PLATFORM_TIMEOUT_SECS", "5");

    let config = Config::from_env().unwrap();

    assert_eq!(config.telegram_bot_token, "test_token");
    assert_eq!(config.registration_channel_id, -1001375774964);
    assert_eq!(config.results_channel_id, -1001375786132);
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.approval_timeout(), chrono::Duration::seconds(120));
    assert_eq!(config.platform_timeout(), std::time::Duration::from_secs(5));

    reset_env();
}

#[test]
fn test_config_from_env_with_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    reset_env();

    set_required();

    let config = Config::from_env().unwrap();

    assert_eq!(config.http_port, 3000);
    assert_eq!(config.approval_timeout_secs, 600);
    assert_eq!(config.platform_timeout_secs, 10);

    reset_env();
}

#[test]
fn test_config_missing_required_token() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    reset_env();

    set_required();
    env::remove_var("TELEGRAM_BOT_TOKEN");

    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("TELEGRAM_BOT_TOKEN must be set"));

    env::set_var("TELEGRAM_BOT_TOKEN", "   ");
    assert!(Config::from_env().is_err());

    reset_env();
}

#[test]
fn test_config_missing_channels() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    reset_env();

    set_required();
    env::remove_var("RESULTS_CHANNEL_ID");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("RESULTS_CHANNEL_ID must be set"));

    set_required();
    env::set_var("REGISTRATION_CHANNEL_ID", "general");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid REGISTRATION_CHANNEL_ID"));

    env::set_var("REGISTRATION_CHANNEL_ID", "0");
    assert!(Config::from_env().is_err());

    reset_env();
}

#[test]
fn test_config_invalid_numbers() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    reset_env();

    set_required();
    env::set_var("HTTP_PORT", "invalid_port");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid HTTP_PORT"));

    env::set_var("HTTP_PORT", "-1");
    assert!(Config::from_env().is_err());

    env::remove_var("HTTP_PORT");
    env::set_var("APPROVAL_TIMEOUT_SECS", "0");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid APPROVAL_TIMEOUT_SECS"));

    env::set_var("APPROVAL_TIMEOUT_SECS", "");
    assert_eq!(Config::from_env().unwrap().approval_timeout_secs, 600);

    reset_env();
}

#[test]
fn test_config_whitespace_handling() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    reset_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "  token_with_spaces  ");
    env::set_var("REGISTRATION_CHANNEL_ID", " -100 ");
    env::set_var("RESULTS_CHANNEL_ID", "-200\n");
    env::set_var("HTTP_PORT", "  3000  ");

    let config = Config::from_env().unwrap();

    // The token is passed through untouched; numbers are trimmed
    assert_eq!(config.telegram_bot_token, "  token_with_spaces  ");
    assert_eq!(config.registration_channel_id, -100);
    assert_eq!(config.results_channel_id, -200);
    assert_eq!(config.http_port, 3000);

    reset_env();
}

#[test]
fn test_config_rejects_oversized_timeouts() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    reset_env();
    set_required();

    env::set_var("APPROVAL_TIMEOUT_SECS", "18446744073709551615");
    assert!(Config::from_env().is_err());

    env::set_var("APPROVAL_TIMEOUT_SECS", (MAX_TIMEOUT_SECS + 1).to_string());
    assert!(Config::from_env().is_err());

    env::set_var("APPROVAL_TIMEOUT_SECS", MAX_TIMEOUT_SECS.to_string());
    let config = Config::from_env().unwrap();
    assert_eq!(
        config.approval_timeout(),
        chrono::Duration::seconds(MAX_TIMEOUT_SECS as i64)
    );

    reset_env();
}
