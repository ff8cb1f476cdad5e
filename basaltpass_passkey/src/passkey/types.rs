//! JSON shapes exchanged with the BasaltPass server.
//!
//! Every binary WebAuthn field in this module is unpadded Base64URL text.
//! Members the client does not interpret are collected into flattened
//! [`ExtraFields`] maps and written back unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON members carried through verbatim.
pub type ExtraFields = Map<String, Value>;

/// Registration options as returned by `POST /passkey/register/begin`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialCreationOptionsJson {
    pub public_key: PublicKeyCredentialCreationOptionsJson,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialCreationOptionsJson {
    pub challenge: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp: Option<RelyingPartyEntity>,
    pub user: UserEntityJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_credentials: Option<Vec<CredentialDescriptorJson>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Relying party metadata. Holds no binary data, so the same type is used on
/// both sides of the platform boundary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RelyingPartyEntity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserEntityJson {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Entry of `excludeCredentials` / `allowCredentials`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CredentialDescriptorJson {
    #[serde(rename = "type")]
    pub type_: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Authentication options as returned by `POST /passkey/login/begin`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequestOptionsJson {
    pub public_key: PublicKeyCredentialRequestOptionsJson,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialRequestOptionsJson {
    pub challenge: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_credentials: Option<Vec<CredentialDescriptorJson>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// JSON form of a newly created credential.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponseJson {
    pub id: String,
    pub raw_id: String,
    pub response: AttestationResponseJson,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttestationResponseJson {
    pub attestation_object: String,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
}

/// JSON form of an authentication assertion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponseJson {
    pub id: String,
    pub raw_id: String,
    pub response: AssertionResponseJson,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResponseJson {
    pub authenticator_data: String,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub signature: String,
    /// Always serialized; `null` when the authenticator returned no handle.
    pub user_handle: Option<String>,
}

/// Body of `POST /passkey/register/finish`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegistrationFinishRequest {
    pub name: String,
    pub challenge: String,
    #[serde(flatten)]
    pub credential: RegistrationResponseJson,
}

/// Body of `POST /passkey/login/finish`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginFinishRequest {
    pub email: String,
    pub challenge: String,
    #[serde(flatten)]
    pub credential: AuthenticationResponseJson,
}

#[derive(Serialize, Debug)]
pub(super) struct LoginBeginRequest<'a> {
    pub(super) email: &'a str,
}

/// A passkey registered on the server, as seen by its owner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PasskeyInfo {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Token material returned by a successful passkey login.
#[derive(Serialize, Deserialize, Clone, PartialEq)]
pub struct LoginTokens {
    pub access_token: String,
}

impl std::fmt::Debug for LoginTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginTokens")
            .field("access_token", &"<redacted>")
            .finish()
    }
}
