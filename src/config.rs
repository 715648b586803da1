use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

/// Upper bound for any configured timeout: one week.
pub const MAX_TIMEOUT_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    /// Chat where approved announcements are posted.
    pub registration_channel_id: i64,
    /// Chat that receives completed registrations and approval notices.
    pub results_channel_id: i64,
    pub http_port: u16,
    pub approval_timeout_secs: u64,
    pub platform_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let registration_channel_id = required_chat_id("REGISTRATION_CHANNEL_ID")?;
        let results_channel_id = required_chat_id("RESULTS_CHANNEL_ID")?;

        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let approval_timeout_secs = optional_secs("APPROVAL_TIMEOUT_SECS", 600)?;
        let platform_timeout_secs = optional_secs("PLATFORM_TIMEOUT_SECS", 10)?;

        Ok(Config {
            telegram_bot_token: token,
            registration_channel_id,
            results_channel_id,
            http_port,
            approval_timeout_secs,
            platform_timeout_secs,
        })
    }

    pub fn approval_timeout(&self) -> chrono::Duration {
        let secs = self.approval_timeout_secs.min(MAX_TIMEOUT_SECS);
        chrono::Duration::seconds(secs as i64)
    }

    pub fn platform_timeout(&self) -> Duration {
        Duration::from_secs(self.platform_timeout_secs)
    }
}

fn required_chat_id(name: &str) -> Result<i64> {
    let raw = env::var(name).map_err(|_| anyhow!("{name} must be set"))?;
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {name}: '{raw}'"))?;
    if id == 0 {
        return Err(anyhow!("Invalid {name}: chat ID cannot be zero"));
    }
    Ok(id)
}

fn optional_secs(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            let secs: u64 = raw.trim().parse().map_err(|_| anyhow!("Invalid {name}"))?;
            if secs == 0 {
                return Err(anyhow!("Invalid {name}: must be greater than zero"));
            }
            if secs > MAX_TIMEOUT_SECS {
                return Err(anyhow!("Invalid {name}: must be at most {MAX_TIMEOUT_SECS} seconds"));
            }
            Ok(secs)
        }
        _ => Ok(default),
    }
}
