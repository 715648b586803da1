//! Inline button descriptors.
//!
//! A control is plain data carried in the button's callback payload:
//! `<kind>:<target uuid>:<enabled>`. The callback handler decodes it and
//! looks the target up in the flow that owns it, so no state lives on the
//! message itself.

use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Opens a registration session for the clicking user.
    Register,
    /// Publishes a pending announcement.
    Approve,
}

impl ControlKind {
    fn tag(self) -> &'static str {
        match self {
            ControlKind::Register => "reg",
            ControlKind::Approve => "apv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub kind: ControlKind,
    pub target: Uuid,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed control payload: '{0}'")]
pub struct ControlParseError(pub String);

impl Control {
    pub fn register(target: Uuid) -> Self {
        Self {
            kind: ControlKind::Register,
            target,
            enabled: true,
        }
    }

    pub fn approve(target: Uuid) -> Self {
        Self {
            kind: ControlKind::Approve,
            target,
            enabled: true,
        }
    }

    /// Same control, rendered inert.
    pub fn disabled(self) -> Self {
        Self { enabled: false, ..self }
    }

    pub fn label(&self) -> &'static str {
        match (self.kind, self.enabled) {
            (ControlKind::Register, true) => "📝 Register",
            (ControlKind::Register, false) => "🔒 Registration closed",
            (ControlKind::Approve, true) => "✅ Approve",
            (ControlKind::Approve, false) => "Approval closed",
        }
    }

    /// Callback payload; always well under Telegram's 64 byte limit.
    pub fn callback_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind.tag(), self.target, u8::from(self.enabled))
    }
}

impl FromStr for Control {
    type Err = ControlParseError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let malformed = || ControlParseError(data.to_string());

        let mut parts = data.split(':');
        let (Some(tag), Some(target), Some(flag), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let kind = match tag {
            "reg" => ControlKind::Register,
            "apv" => ControlKind::Approve,
            _ => return Err(malformed()),
        };
        let target = Uuid::parse_str(target).map_err(|_| malformed())?;
        let enabled = match flag {
            "1" => true,
            "0" => false,
            _ => return Err(malformed()),
        };

        Ok(Self { kind, target, enabled })
    }
}
