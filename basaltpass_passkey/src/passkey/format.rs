use super::platform::{AssertionResponse, AttestationResponse, PlatformCredential};
use super::types::{
    AssertionResponseJson, AttestationResponseJson, AuthenticationResponseJson,
    RegistrationResponseJson,
};
use crate::utils::base64url_encode;

/// Converts a newly created credential into its JSON form.
pub fn format_creation_response(
    credential: &PlatformCredential<AttestationResponse>,
) -> RegistrationResponseJson {
    RegistrationResponseJson {
        id: credential.id.clone(),
        raw_id: base64url_encode(&credential.raw_id),
        response: AttestationResponseJson {
            attestation_object: base64url_encode(&credential.response.attestation_object),
            client_data_json: base64url_encode(&credential.response.client_data_json),
        },
        type_: credential.type_.clone(),
    }
}

/// Converts an authentication assertion into its JSON form.
///
/// A missing user handle becomes an explicit `null`, never an omitted member.
pub fn format_assertion_response(
    credential: &PlatformCredential<AssertionResponse>,
) -> AuthenticationResponseJson {
    AuthenticationResponseJson {
        id: credential.id.clone(),
        raw_id: base64url_encode(&credential.raw_id),
        response: AssertionResponseJson {
            authenticator_data: base64url_encode(&credential.response.authenticator_data),
            client_data_json: base64url_encode(&credential.response.client_data_json),
            signature: base64url_encode(&credential.response.signature),
            user_handle: credential.response.user_handle.as_ref().map(base64url_encode),
        },
        type_: credential.type_.clone(),
    }
}
