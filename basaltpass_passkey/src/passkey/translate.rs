use super::errors::PasskeyError;
use super::platform::{
    CredentialDescriptor, PlatformCreationOptions, PlatformRequestOptions,
    PublicKeyCredentialCreationOptions, PublicKeyCredentialRequestOptions, UserEntity,
};
use super::types::{
    CredentialCreationOptionsJson, CredentialDescriptorJson, CredentialRequestOptionsJson,
};
use crate::utils::base64url_decode;

/// Inflates server-issued registration options into platform options.
///
/// Decodes `challenge`, `user.id` and every `excludeCredentials[].id`; all
/// other members, known or not, are copied unchanged.
pub fn translate_creation_options(
    options: &CredentialCreationOptionsJson,
) -> Result<PlatformCreationOptions, PasskeyError> {
    let public_key = &options.public_key;

    let exclude_credentials = public_key
        .exclude_credentials
        .as_deref()
        .map(|descriptors| decode_descriptors(descriptors, "excludeCredentials"))
        .transpose()?;

    Ok(PlatformCreationOptions {
        public_key: PublicKeyCredentialCreationOptions {
            challenge: decode_field(&public_key.challenge, "challenge")?,
            rp: public_key.rp.clone(),
            user: UserEntity {
                id: decode_field(&public_key.user.id, "user.id")?,
                name: public_key.user.name.clone(),
                display_name: public_key.user.display_name.clone(),
                extra: public_key.user.extra.clone(),
            },
            exclude_credentials,
            extra: public_key.extra.clone(),
        },
        extra: options.extra.clone(),
    })
}

/// Inflates server-issued authentication options into platform options.
///
/// Decodes `challenge` and every `allowCredentials[].id`.
pub fn translate_request_options(
    options: &CredentialRequestOptionsJson,
) -> Result<PlatformRequestOptions, PasskeyError> {
    let public_key = &options.public_key;

    let allow_credentials = public_key
        .allow_credentials
        .as_deref()
        .map(|descriptors| decode_descriptors(descriptors, "allowCredentials"))
        .transpose()?;

    Ok(PlatformRequestOptions {
        public_key: PublicKeyCredentialRequestOptions {
            challenge: decode_field(&public_key.challenge, "challenge")?,
            rp_id: public_key.rp_id.clone(),
            allow_credentials,
            extra: public_key.extra.clone(),
        },
        extra: options.extra.clone(),
    })
}

fn decode_descriptors(
    descriptors: &[CredentialDescriptorJson],
    field: &str,
) -> Result<Vec<CredentialDescriptor>, PasskeyError> {
    descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| {
            Ok(CredentialDescriptor {
                type_: descriptor.type_.clone(),
                id: decode_field(&descriptor.id, &format!("{field}[{index}].id"))?,
                transports: descriptor.transports.clone(),
                extra: descriptor.extra.clone(),
            })
        })
        .collect()
}

fn decode_field(value: &str, field: &str) -> Result<Vec<u8>, PasskeyError> {
    base64url_decode(value).map_err(|e| {
        tracing::debug!("Corrupted binary field in server options: {}", field);
        PasskeyError::Format(format!("{field}: {e}"))
    })
}
