use super::errors::FlowError;
use super::flow::{
    AuthenticationFlow, RegistrationFlow, create_credential, ensure_supported, get_assertion,
    require_non_empty,
};
use crate::passkey::{
    AuthenticationResponseJson, CredentialCreationOptionsJson, CredentialRequestOptionsJson,
    HttpPasskeyServer, LoginFinishRequest, LoginTokens, PasskeyError, PasskeyInfo, PasskeyServer,
    PlatformAuthenticator, RegistrationFinishRequest, RegistrationResponseJson,
    is_passkey_supported,
};

/// Entry point for passkey operations against one server on one platform.
///
/// `create_passkey` and `login_with_passkey_flow` run a whole flow. The
/// remaining methods expose its individual steps.
#[derive(Debug)]
pub struct PasskeyClient<S, P> {
    server: S,
    platform: P,
}

impl<P: PlatformAuthenticator> PasskeyClient<HttpPasskeyServer, P> {
    /// Client for the server configured through `PASSKEY_SERVER_URL` and
    /// `PASSKEY_API_PREFIX`.
    pub fn from_env(platform: P) -> Result<Self, PasskeyError> {
        Ok(Self::new(HttpPasskeyServer::from_env()?, platform))
    }
}

impl<S, P> PasskeyClient<S, P>
where
    S: PasskeyServer,
    P: PlatformAuthenticator,
{
    pub fn new(server: S, platform: P) -> Self {
        Self { server, platform }
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn is_passkey_supported(&self) -> bool {
        is_passkey_supported(&self.platform)
    }

    /// A fresh registration flow, for callers that want to observe its state.
    pub fn registration_flow(&self) -> RegistrationFlow<'_, S, P> {
        RegistrationFlow::new(&self.server, &self.platform)
    }

    pub fn authentication_flow(&self) -> AuthenticationFlow<'_, S, P> {
        AuthenticationFlow::new(&self.server, &self.platform)
    }

    /// Registers a new passkey for the signed-in user.
    pub async fn create_passkey(&self, name: &str) -> Result<PasskeyInfo, FlowError> {
        self.registration_flow().run(name).await
    }

    /// Logs in with a passkey, returning the issued tokens.
    pub async fn login_with_passkey_flow(&self, identifier: &str) -> Result<LoginTokens, FlowError> {
        self.authentication_flow().run(identifier).await
    }

    /// Runs only the creation ceremony for already-fetched options.
    pub async fn register_passkey(
        &self,
        options: &CredentialCreationOptionsJson,
    ) -> Result<RegistrationResponseJson, FlowError> {
        ensure_supported(&self.platform)?;
        create_credential(&self.platform, options).await
    }

    /// Runs only the assertion ceremony for already-fetched options.
    pub async fn login_with_passkey(
        &self,
        options: &CredentialRequestOptionsJson,
    ) -> Result<AuthenticationResponseJson, FlowError> {
        ensure_supported(&self.platform)?;
        get_assertion(&self.platform, options).await
    }

    pub async fn begin_passkey_registration(
        &self,
    ) -> Result<CredentialCreationOptionsJson, FlowError> {
        Ok(self.server.begin_registration().await?)
    }

    pub async fn finish_passkey_registration(
        &self,
        request: &RegistrationFinishRequest,
    ) -> Result<PasskeyInfo, FlowError> {
        Ok(self.server.finish_registration(request).await?)
    }

    pub async fn begin_passkey_login(
        &self,
        identifier: &str,
    ) -> Result<CredentialRequestOptionsJson, FlowError> {
        let identifier = require_non_empty(identifier, "Identifier")?;
        Ok(self.server.begin_login(&identifier).await?)
    }

    pub async fn finish_passkey_login(
        &self,
        request: &LoginFinishRequest,
    ) -> Result<LoginTokens, FlowError> {
        Ok(self.server.finish_login(request).await?)
    }

    /// Passkeys of the signed-in user. Empty when none are registered.
    pub async fn list_passkeys(&self) -> Result<Vec<PasskeyInfo>, FlowError> {
        Ok(self.server.list_passkeys().await?)
    }

    pub async fn delete_passkey(&self, passkey_id: u64) -> Result<(), FlowError> {
        self.server.delete_passkey(passkey_id).await?;
        tracing::info!("Deleted passkey {}", passkey_id);
        Ok(())
    }
}
