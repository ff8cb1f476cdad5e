use async_trait::async_trait;
use basaltpass_passkey::{
    AssertionResponse, AttestationResponse, PlatformAuthenticator, PlatformCreationOptions,
    PlatformCredential, PlatformError, PlatformRequestOptions,
};

/// Platform for a terminal session: there is no WebAuthn API to call.
///
/// Registration and login therefore stop at the capability check; the
/// management commands work as usual.
pub(crate) struct TerminalPlatform;

#[async_trait]
impl PlatformAuthenticator for TerminalPlatform {
    fn is_supported(&self) -> bool {
        false
    }

    async fn create(
        &self,
        _options: PlatformCreationOptions,
    ) -> Result<PlatformCredential<AttestationResponse>, PlatformError> {
        Err(PlatformError::new(
            "NotSupportedError",
            "No credential API in a terminal session",
        ))
    }

    async fn get(
        &self,
        _options: PlatformRequestOptions,
    ) -> Result<PlatformCredential<AssertionResponse>, PlatformError> {
        Err(PlatformError::new(
            "NotSupportedError",
            "No credential API in a terminal session",
        ))
    }
}
