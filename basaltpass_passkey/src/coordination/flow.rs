//! Two-phase passkey flows: begin on the server, run the platform ceremony,
//! finish on the server.

use super::errors::FlowError;
use super::state::{FlowState, FlowTracker};
use crate::passkey::{
    AuthenticationResponseJson, CredentialCreationOptionsJson, CredentialRequestOptionsJson,
    LoginFinishRequest, LoginTokens, PasskeyInfo, PasskeyServer, PlatformAuthenticator,
    RegistrationFinishRequest, RegistrationResponseJson, format_assertion_response,
    format_creation_response, translate_creation_options,
    translate_request_options,
};

/// Fails with [`FlowError::NotSupported`] unless the platform exposes the
/// credential APIs. Roaming security keys count, so a missing user-verifying
/// platform authenticator does not block a ceremony.
pub(super) fn ensure_supported<P>(platform: &P) -> Result<(), FlowError>
where
    P: PlatformAuthenticator + ?Sized,
{
    if platform.is_supported() {
        Ok(())
    } else {
        Err(FlowError::NotSupported.log())
    }
}

/// Trims `value`, rejecting it when nothing is left.
pub(super) fn require_non_empty(value: &str, what: &str) -> Result<String, FlowError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FlowError::InvalidInput(format!("{what} is required")).log());
    }
    Ok(value.to_string())
}

/// Translates registration options and runs the creation ceremony.
pub(super) async fn create_credential<P>(
    platform: &P,
    options: &CredentialCreationOptionsJson,
) -> Result<RegistrationResponseJson, FlowError>
where
    P: PlatformAuthenticator + ?Sized,
{
    let platform_options = translate_creation_options(options)?;
    let credential = platform.create(platform_options).await?;
    tracing::debug!("Platform created credential {}", credential.id);
    Ok(format_creation_response(&credential))
}

/// Translates authentication options and runs the assertion ceremony.
pub(super) async fn get_assertion<P>(
    platform: &P,
    options: &CredentialRequestOptionsJson,
) -> Result<AuthenticationResponseJson, FlowError>
where
    P: PlatformAuthenticator + ?Sized,
{
    let platform_options = translate_request_options(options)?;
    let credential = platform.get(platform_options).await?;
    tracing::debug!("Platform asserted credential {}", credential.id);
    Ok(format_assertion_response(&credential))
}

fn ensure_idle(tracker: &FlowTracker) -> Result<(), FlowError> {
    match tracker.state() {
        FlowState::Idle => Ok(()),
        state => Err(FlowError::InvalidFlowState(state).log()),
    }
}

/// One execution of passkey registration for the signed-in user.
///
/// A flow runs once; call [`RegistrationFlow::reset`] to run it again.
#[derive(Debug)]
pub struct RegistrationFlow<'a, S: ?Sized, P: ?Sized> {
    server: &'a S,
    platform: &'a P,
    tracker: FlowTracker,
}

impl<'a, S, P> RegistrationFlow<'a, S, P>
where
    S: PasskeyServer + ?Sized,
    P: PlatformAuthenticator + ?Sized,
{
    pub fn new(server: &'a S, platform: &'a P) -> Self {
        Self {
            server,
            platform,
            tracker: FlowTracker::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.tracker.state()
    }

    pub fn tracker(&self) -> &FlowTracker {
        &self.tracker
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    /// Registers a new passkey labelled `name`.
    pub async fn run(&mut self, name: &str) -> Result<PasskeyInfo, FlowError> {
        ensure_idle(&self.tracker)?;
        let name = require_non_empty(name, "Passkey name")?;
        ensure_supported(self.platform)?;

        let result = self.execute(name).await;
        if result.is_err() {
            self.tracker.fail();
        }
        result
    }

    async fn execute(&mut self, name: String) -> Result<PasskeyInfo, FlowError> {
        self.tracker.advance(FlowState::OptionsRequested)?;
        let options = self.server.begin_registration().await?;

        self.tracker.advance(FlowState::PlatformCeremonyPending)?;
        let credential = create_credential(self.platform, &options).await?;

        self.tracker.advance(FlowState::ResponseSubmitted)?;
        let request = RegistrationFinishRequest {
            name,
            challenge: options.public_key.challenge,
            credential,
        };
        let passkey = self.server.finish_registration(&request).await?;

        self.tracker.advance(FlowState::Complete)?;
        tracing::info!("Registered passkey {} ({})", passkey.id, passkey.name);
        Ok(passkey)
    }
}

/// One execution of passkey login for a user identifier.
#[derive(Debug)]
pub struct AuthenticationFlow<'a, S: ?Sized, P: ?Sized> {
    server: &'a S,
    platform: &'a P,
    tracker: FlowTracker,
}

impl<'a, S, P> AuthenticationFlow<'a, S, P>
where
    S: PasskeyServer + ?Sized,
    P: PlatformAuthenticator + ?Sized,
{
    pub fn new(server: &'a S, platform: &'a P) -> Self {
        Self {
            server,
            platform,
            tracker: FlowTracker::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.tracker.state()
    }

    pub fn tracker(&self) -> &FlowTracker {
        &self.tracker
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    /// Logs in the user identified by `identifier` (email or phone).
    pub async fn run(&mut self, identifier: &str) -> Result<LoginTokens, FlowError> {
        ensure_idle(&self.tracker)?;
        let identifier = require_non_empty(identifier, "Identifier")?;
        ensure_supported(self.platform)?;

        let result = self.execute(identifier).await;
        if result.is_err() {
            self.tracker.fail();
        }
        result
    }

    async fn execute(&mut self, identifier: String) -> Result<LoginTokens, FlowError> {
        self.tracker.advance(FlowState::OptionsRequested)?;
        let options = self.server.begin_login(&identifier).await?;

        self.tracker.advance(FlowState::PlatformCeremonyPending)?;
        let credential = get_assertion(self.platform, &options).await?;

        self.tracker.advance(FlowState::ResponseSubmitted)?;
        let request = LoginFinishRequest {
            email: identifier,
            challenge: options.public_key.challenge,
            credential,
        };
        let tokens = self.server.finish_login(&request).await?;

        self.tracker.advance(FlowState::Complete)?;
        tracing::info!("Passkey login completed");
        Ok(tokens)
    }
}
