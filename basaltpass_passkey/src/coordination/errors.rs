//! Error types for passkey flows

use thiserror::Error;

use super::state::FlowState;
use crate::config::{Locale, PASSKEY_MESSAGE_LOCALE};
use crate::passkey::{PasskeyError, PlatformError, PlatformErrorName};

/// The single error type a passkey flow reports to its caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The platform has no WebAuthn support
    #[error("WebAuthn is not supported by this browser")]
    NotSupported,

    /// The ceremony was refused for security reasons, usually a non-HTTPS origin
    #[error("Security error: a secure (HTTPS) connection is required")]
    Security,

    /// The user dismissed the prompt or the platform timed out
    #[error("The operation was cancelled or timed out")]
    Cancelled,

    /// The authenticator already holds an excluded credential or is otherwise unusable
    #[error("Authenticator state is invalid")]
    InvalidAuthenticatorState,

    #[error("Authenticator does not satisfy the requirements")]
    Constraint,

    #[error("Unknown error, please retry")]
    Unknown,

    /// Any other failure, with the underlying message when there is one
    #[error("{}", .0.as_deref().unwrap_or("Operation failed, please retry"))]
    Failed(Option<String>),

    /// The server rejected a begin or finish request; the message is the server's own
    #[error("{0}")]
    Server(String),

    /// Caller-supplied input was rejected before any request was made
    #[error("{0}")]
    InvalidInput(String),

    /// A flow was started again without being reset
    #[error("Flow cannot start from state {0}")]
    InvalidFlowState(FlowState),
}

impl FlowError {
    /// User-facing message in the given locale.
    pub fn message(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.to_string(),
            Locale::Zh => match self {
                Self::NotSupported => "此浏览器不支持WebAuthn".to_string(),
                Self::Security => "安全错误：请确保使用HTTPS连接".to_string(),
                Self::Cancelled => "用户取消了操作或超时".to_string(),
                Self::InvalidAuthenticatorState => "认证器状态无效".to_string(),
                Self::Constraint => "认证器不满足要求".to_string(),
                Self::Unknown => "未知错误，请重试".to_string(),
                Self::Failed(None) => "操作失败，请重试".to_string(),
                Self::Failed(Some(msg)) | Self::Server(msg) | Self::InvalidInput(msg) => {
                    msg.clone()
                }
                Self::InvalidFlowState(_) => self.to_string(),
            },
        }
    }

    /// User-facing message in the locale set by `PASSKEY_MESSAGE_LOCALE`.
    pub fn user_message(&self) -> String {
        self.message(*PASSKEY_MESSAGE_LOCALE)
    }

    /// Severity a failure is logged at. A user dismissing the prompt is an
    /// expected outcome, not a fault.
    pub fn log_level(&self) -> tracing::Level {
        match self {
            Self::Cancelled => tracing::Level::DEBUG,
            Self::InvalidInput(_) => tracing::Level::WARN,
            _ => tracing::Level::ERROR,
        }
    }

    /// Log the error and return self
    pub fn log(self) -> Self {
        let level = self.log_level();
        if level == tracing::Level::DEBUG {
            tracing::debug!("Passkey flow: {}", self);
        } else if level == tracing::Level::WARN {
            tracing::warn!("Passkey flow: {}", self);
        } else {
            tracing::error!("Passkey flow: {}", self);
        }
        self
    }
}

// Custom From implementations that automatically log errors

impl From<PlatformError> for FlowError {
    fn from(err: PlatformError) -> Self {
        let error = match err.name {
            PlatformErrorName::NotSupported => Self::NotSupported,
            PlatformErrorName::Security => Self::Security,
            PlatformErrorName::NotAllowed => Self::Cancelled,
            PlatformErrorName::InvalidState => Self::InvalidAuthenticatorState,
            PlatformErrorName::Constraint => Self::Constraint,
            PlatformErrorName::Unknown => Self::Unknown,
            PlatformErrorName::Other(_) => {
                let message = err.message.trim();
                Self::Failed((!message.is_empty()).then(|| message.to_string()))
            }
        };
        error.log()
    }
}

impl From<PasskeyError> for FlowError {
    fn from(err: PasskeyError) -> Self {
        let error = match err {
            PasskeyError::Server { message, .. } => Self::Server(message),
            other => Self::Failed(Some(other.to_string())),
        };
        error.log()
    }
}
