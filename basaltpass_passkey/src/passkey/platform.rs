//! The seam between the flow and whatever performs the WebAuthn ceremony.
//!
//! Types here hold binary fields as raw bytes and do not implement
//! `Serialize`; they reach a JSON payload only through the response formatter.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{ExtraFields, RelyingPartyEntity};

/// Registration options in the shape the platform ceremony expects.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformCreationOptions {
    pub public_key: PublicKeyCredentialCreationOptions,
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublicKeyCredentialCreationOptions {
    pub challenge: Vec<u8>,
    pub rp: Option<RelyingPartyEntity>,
    pub user: UserEntity,
    pub exclude_credentials: Option<Vec<CredentialDescriptor>>,
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserEntity {
    pub id: Vec<u8>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CredentialDescriptor {
    pub type_: String,
    pub id: Vec<u8>,
    pub transports: Option<Vec<String>>,
    pub extra: ExtraFields,
}

/// Authentication options in the shape the platform ceremony expects.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRequestOptions {
    pub public_key: PublicKeyCredentialRequestOptions,
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublicKeyCredentialRequestOptions {
    pub challenge: Vec<u8>,
    pub rp_id: Option<String>,
    pub allow_credentials: Option<Vec<CredentialDescriptor>>,
    pub extra: ExtraFields,
}

/// Credential returned by a ceremony.
///
/// `R` is [`AttestationResponse`] for registration and [`AssertionResponse`]
/// for authentication.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformCredential<R> {
    /// Base64URL credential id as reported by the platform
    pub id: String,
    pub raw_id: Vec<u8>,
    pub type_: String,
    pub response: R,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttestationResponse {
    pub attestation_object: Vec<u8>,
    pub client_data_json: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssertionResponse {
    pub authenticator_data: Vec<u8>,
    pub client_data_json: Vec<u8>,
    pub signature: Vec<u8>,
    pub user_handle: Option<Vec<u8>>,
}

/// DOMException names a WebAuthn ceremony can reject with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformErrorName {
    NotSupported,
    Security,
    /// The user cancelled, or the ceremony timed out
    NotAllowed,
    InvalidState,
    Constraint,
    Unknown,
    Other(String),
}

impl PlatformErrorName {
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "NotSupportedError" => Self::NotSupported,
            "SecurityError" => Self::Security,
            "NotAllowedError" => Self::NotAllowed,
            "InvalidStateError" => Self::InvalidState,
            "ConstraintError" => Self::Constraint,
            "UnknownError" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NotSupported => "NotSupportedError",
            Self::Security => "SecurityError",
            Self::NotAllowed => "NotAllowedError",
            Self::InvalidState => "InvalidStateError",
            Self::Constraint => "ConstraintError",
            Self::Unknown => "UnknownError",
            Self::Other(name) => name,
        }
    }
}

/// Rejection from a platform ceremony.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}: {message}", .name.as_str())]
pub struct PlatformError {
    pub name: PlatformErrorName,
    pub message: String,
}

impl PlatformError {
    /// Builds an error from a DOMException name and message.
    pub fn new(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: PlatformErrorName::from_dom_name(name),
            message: message.into(),
        }
    }
}

/// Performs WebAuthn ceremonies on behalf of a flow.
///
/// Implementations wrap a browser (`navigator.credentials`), an OS passkey
/// API, or a test double. A cancelled or timed-out ceremony must be reported
/// as an error (normally `NotAllowedError`), never as an empty success.
#[async_trait]
pub trait PlatformAuthenticator: Send + Sync {
    /// Whether the credential APIs exist at all.
    fn is_supported(&self) -> bool;

    /// Whether a user-verifying platform authenticator (Touch ID, Windows
    /// Hello, ...) is available.
    fn is_user_verifying_platform_authenticator_available(&self) -> bool {
        self.is_supported()
    }

    /// Runs the credential-creation ceremony.
    async fn create(
        &self,
        options: PlatformCreationOptions,
    ) -> Result<PlatformCredential<AttestationResponse>, PlatformError>;

    /// Runs the credential-retrieval ceremony.
    async fn get(
        &self,
        options: PlatformRequestOptions,
    ) -> Result<PlatformCredential<AssertionResponse>, PlatformError>;
}

/// True when the platform can run ceremonies and offers a user-verifying
/// authenticator.
pub fn is_passkey_supported<P: PlatformAuthenticator + ?Sized>(platform: &P) -> bool {
    platform.is_supported() && platform.is_user_verifying_platform_authenticator_available()
}
