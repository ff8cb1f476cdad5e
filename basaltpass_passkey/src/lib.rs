//! basaltpass-passkey - Passkey/WebAuthn client flows for the BasaltPass identity platform
//!
//! This crate drives the two-phase passkey protocol (begin, platform ceremony,
//! finish) against a BasaltPass server. It keeps binary WebAuthn data as raw
//! bytes on the platform side and as unpadded Base64URL text on the wire.

mod config;
mod coordination;
mod passkey;
mod utils;

pub use config::{
    Locale, PASSKEY_API_PREFIX, PASSKEY_HTTP_POOL_IDLE_TIMEOUT, PASSKEY_MESSAGE_LOCALE,
    PASSKEY_SERVER_URL,
};

pub use coordination::{
    AuthenticationFlow, FlowError, FlowState, FlowTracker, PasskeyClient, RegistrationFlow,
};

pub use passkey::{
    AssertionResponse, AssertionResponseJson, AttestationResponse, AttestationResponseJson,
    AuthenticationResponseJson, CredentialCreationOptionsJson, CredentialDescriptor,
    CredentialDescriptorJson, CredentialRequestOptionsJson, ExtraFields, HttpPasskeyServer,
    LoginFinishRequest, LoginTokens, PasskeyError, PasskeyInfo, PasskeyServer,
    PlatformAuthenticator, PlatformCreationOptions, PlatformCredential, PlatformError,
    PlatformErrorName, PlatformRequestOptions, PublicKeyCredentialCreationOptions,
    PublicKeyCredentialCreationOptionsJson, PublicKeyCredentialRequestOptions,
    PublicKeyCredentialRequestOptionsJson, RegistrationFinishRequest, RegistrationResponseJson,
    RelyingPartyEntity, UserEntity, UserEntityJson, format_assertion_response,
    format_creation_response, is_passkey_supported, translate_creation_options,
    translate_request_options,
};

pub use utils::{UtilError, base64url_decode, base64url_encode};
