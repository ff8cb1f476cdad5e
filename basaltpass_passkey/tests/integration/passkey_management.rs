use basaltpass_passkey::FlowError;

use crate::common::{MockRelyingParty, SESSION_TOKEN, SoftwareAuthenticator, client_for};

#[tokio::test]
async fn test_list_reads_null_as_empty() {
    // Given a user without passkeys, for whom the server answers `null`
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::new(), true);

    // When listing
    let passkeys = client.list_passkeys().await.unwrap();

    // Then the list is empty rather than an error
    assert!(passkeys.is_empty());
}

#[tokio::test]
async fn test_list_and_delete() {
    let rp = MockRelyingParty::start().await;
    let keep = rp.seed_passkey("YubiKey", "AQID");
    let remove = rp.seed_passkey("Old phone", "BAUG");
    let client = client_for(&rp, SoftwareAuthenticator::new(), true);

    let passkeys = client.list_passkeys().await.unwrap();
    assert_eq!(passkeys.len(), 2);
    assert_eq!(passkeys[0].name, "YubiKey");
    assert_eq!(passkeys[0].created_at.to_rfc3339(), "2025-01-01T00:00:00+00:00");

    client.delete_passkey(remove).await.unwrap();

    let passkeys = client.list_passkeys().await.unwrap();
    assert_eq!(passkeys.len(), 1);
    assert_eq!(passkeys[0].id, keep);
}

#[tokio::test]
async fn test_delete_unknown_passkey() {
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::new(), true);

    let err = client.delete_passkey(999).await.unwrap_err();

    assert_eq!(err, FlowError::Server("Passkey not found".to_string()));
}

#[tokio::test]
async fn test_session_endpoints_send_bearer_token() {
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::new(), true);

    client.list_passkeys().await.unwrap();
    client.begin_passkey_registration().await.unwrap();

    let expected = Some(format!("Bearer {SESSION_TOKEN}"));
    assert_eq!(rp.authorization(), vec![expected.clone(), expected]);
}

#[tokio::test]
async fn test_session_endpoints_require_sign_in() {
    // Given a client without an access token
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::new(), false);

    // When calling session-scoped endpoints
    let list = client.list_passkeys().await.unwrap_err();
    let register = client.create_passkey("Laptop").await.unwrap_err();

    // Then the plain-text rejection is surfaced verbatim
    assert_eq!(list, FlowError::Server("User not authenticated".to_string()));
    assert_eq!(register, FlowError::Server("User not authenticated".to_string()));
    assert_eq!(client.platform().ceremony_count(), 0);
}
