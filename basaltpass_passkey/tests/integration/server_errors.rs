use basaltpass_passkey::{FlowError, LoginFinishRequest};

use crate::common::{ALICE_EMAIL, BOB_EMAIL, MockRelyingParty, SoftwareAuthenticator, client_for};

#[tokio::test]
async fn test_login_without_registered_passkeys() {
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::new(), false);

    let err = client.login_with_passkey_flow(BOB_EMAIL).await.unwrap_err();

    assert_eq!(
        err,
        FlowError::Server("No passkeys registered for this user".to_string())
    );
    assert_eq!(client.platform().ceremony_count(), 0);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::new(), false);

    let err = client
        .login_with_passkey_flow("nobody@example.com")
        .await
        .unwrap_err();

    assert_eq!(err, FlowError::Server("User not found".to_string()));
}

#[tokio::test]
async fn test_finish_with_stale_challenge() {
    // Given a completed login, whose challenge the server has consumed
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::new(), true);
    client.create_passkey("Laptop").await.unwrap();

    let options = client.begin_passkey_login(ALICE_EMAIL).await.unwrap();
    let credential = client.login_with_passkey(&options).await.unwrap();
    let request = LoginFinishRequest {
        email: ALICE_EMAIL.to_string(),
        challenge: options.public_key.challenge.clone(),
        credential,
    };
    client.finish_passkey_login(&request).await.unwrap();

    // When the same finish body is replayed
    let err = client.finish_passkey_login(&request).await.unwrap_err();

    // Then the server's message comes through unchanged
    assert_eq!(err, FlowError::Server("Invalid session".to_string()));
}

#[tokio::test]
async fn test_unreachable_server() {
    // Bind and drop a listener to get a port nothing is serving on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let server = basaltpass_passkey::HttpPasskeyServer::new(&format!("http://{addr}"), "/api/v1")
        .unwrap()
        .with_access_token("token");
    let client = basaltpass_passkey::PasskeyClient::new(server, SoftwareAuthenticator::new());

    let err = client.list_passkeys().await.unwrap_err();

    match err {
        FlowError::Failed(Some(message)) => assert!(message.starts_with("Transport error"), "{message}"),
        other => panic!("Expected transport failure, got {other:?}"),
    }
}
