mod errors;
mod format;
mod platform;
mod server;
mod translate;
mod types;

pub use errors::PasskeyError;

pub use format::{format_assertion_response, format_creation_response};

pub use platform::{
    AssertionResponse, AttestationResponse, CredentialDescriptor, PlatformAuthenticator,
    PlatformCreationOptions, PlatformCredential, PlatformError, PlatformErrorName,
    PlatformRequestOptions, PublicKeyCredentialCreationOptions, PublicKeyCredentialRequestOptions,
    UserEntity, is_passkey_supported,
};

pub use server::{HttpPasskeyServer, PasskeyServer};

pub use translate::{translate_creation_options, translate_request_options};

pub use types::{
    AssertionResponseJson, AttestationResponseJson, AuthenticationResponseJson,
    CredentialCreationOptionsJson, CredentialDescriptorJson, CredentialRequestOptionsJson,
    ExtraFields, LoginFinishRequest, LoginTokens, PasskeyInfo,
    PublicKeyCredentialCreationOptionsJson, PublicKeyCredentialRequestOptionsJson,
    RegistrationFinishRequest, RegistrationResponseJson, RelyingPartyEntity, UserEntityJson,
};
