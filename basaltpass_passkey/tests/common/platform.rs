//! Software authenticator for integration tests
//!
//! Produces credentials whose `clientDataJSON` echoes the challenge it was
//! given, so the mock relying party can check the whole encoding chain.

use async_trait::async_trait;
use basaltpass_passkey::{
    AssertionResponse, AttestationResponse, PlatformAuthenticator, PlatformCreationOptions,
    PlatformCredential, PlatformError, PlatformRequestOptions, base64url_encode,
};
use serde_json::json;
use std::sync::Mutex;

#[derive(Default)]
pub struct SoftwareAuthenticator {
    unsupported: bool,
    failure: Mutex<Option<PlatformError>>,
    /// Raw ids of credentials created by this authenticator
    credentials: Mutex<Vec<Vec<u8>>>,
    pub ceremonies: Mutex<Vec<&'static str>>,
}

impl SoftwareAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unsupported() -> Self {
        Self {
            unsupported: true,
            ..Self::default()
        }
    }

    /// Makes the next ceremony reject with the given DOMException name.
    pub fn fail_next(&self, name: &str, message: &str) {
        *self.failure.lock().unwrap() = Some(PlatformError::new(name, message));
    }

    pub fn ceremony_count(&self) -> usize {
        self.ceremonies.lock().unwrap().len()
    }

    fn take_failure(&self) -> Option<PlatformError> {
        self.failure.lock().unwrap().take()
    }
}

fn client_data(kind: &str, challenge: &[u8]) -> Vec<u8> {
    json!({
        "type": kind,
        "challenge": base64url_encode(challenge),
        "origin": "http://localhost:3000",
        "crossOrigin": false
    })
    .to_string()
    .into_bytes()
}

#[async_trait]
impl PlatformAuthenticator for SoftwareAuthenticator {
    fn is_supported(&self) -> bool {
        !self.unsupported
    }

    async fn create(
        &self,
        options: PlatformCreationOptions,
    ) -> Result<PlatformCredential<AttestationResponse>, PlatformError> {
        self.ceremonies.lock().unwrap().push("create");
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let mut credentials = self.credentials.lock().unwrap();
        let excluded = options
            .public_key
            .exclude_credentials
            .iter()
            .flatten()
            .any(|descriptor| credentials.contains(&descriptor.id));
        if excluded {
            return Err(PlatformError::new(
                "InvalidStateError",
                "The authenticator already contains one of the excluded credentials.",
            ));
        }

        // A fresh id with bytes that exercise the URL-safe alphabet
        let raw_id = vec![0xfb, 0xff, credentials.len() as u8, 0x3e];
        credentials.push(raw_id.clone());

        Ok(PlatformCredential {
            id: base64url_encode(&raw_id),
            raw_id,
            type_: "public-key".to_string(),
            response: AttestationResponse {
                attestation_object: vec![0xa3, 0x63, 0x66, 0x6d, 0x74, 0x64, 0x6e, 0x6f, 0x6e, 0x65],
                client_data_json: client_data("webauthn.create", &options.public_key.challenge),
            },
        })
    }

    async fn get(
        &self,
        options: PlatformRequestOptions,
    ) -> Result<PlatformCredential<AssertionResponse>, PlatformError> {
        self.ceremonies.lock().unwrap().push("get");
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let credentials = self.credentials.lock().unwrap();
        let Some(raw_id) = options
            .public_key
            .allow_credentials
            .iter()
            .flatten()
            .map(|descriptor| &descriptor.id)
            .find(|id| credentials.contains(id))
            .cloned()
        else {
            return Err(PlatformError::new(
                "NotAllowedError",
                "No matching credential on this authenticator.",
            ));
        };

        Ok(PlatformCredential {
            id: base64url_encode(&raw_id),
            raw_id,
            type_: "public-key".to_string(),
            response: AssertionResponse {
                authenticator_data: vec![0x49; 37],
                client_data_json: client_data("webauthn.get", &options.public_key.challenge),
                signature: vec![0x30, 0x44, 0x02, 0x20, 0xff, 0xfe],
                user_handle: None,
            },
        })
    }
}
