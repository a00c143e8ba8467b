use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// Side effects the shell carries out after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Transient notification.
    Toast { level: ToastLevel, message: String },
    /// An upload reference is no longer used and can be freed.
    ReleaseReference { reference: String },
}

impl Effect {
    pub fn success(message: impl Into<String>) -> Self {
        Effect::Toast {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Effect::Toast {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Effect::Toast {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}
