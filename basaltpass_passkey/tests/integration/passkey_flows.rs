use basaltpass_passkey::{FlowError, FlowState, Locale};

use crate::common::{ALICE_EMAIL, MockRelyingParty, SoftwareAuthenticator, client_for};

/// Register a passkey and log in with it, end to end
#[tokio::test]
async fn test_register_then_login() {
    // Given a signed-in user with a working authenticator
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::new(), true);

    // When registering a passkey
    let passkey = client.create_passkey("Work laptop").await.unwrap();

    // Then the server stored it under the given name
    assert_eq!(passkey.name, "Work laptop");
    assert!(passkey.last_used_at.is_none());
    let stored = rp.passkeys();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].credential_id, "-_8APg");

    // And the finish body is flat, URL-safe and unpadded
    let body = &rp.finish_bodies()[0];
    assert_eq!(body["name"], "Work laptop");
    assert_eq!(body["rawId"], "-_8APg");
    assert_eq!(body["type"], "public-key");
    assert!(body["response"]["attestationObject"].is_string());
    assert!(body.get("credential").is_none());

    // When logging in with the same authenticator
    let tokens = client.login_with_passkey_flow(ALICE_EMAIL).await.unwrap();

    // Then tokens are issued and the passkey is marked as used
    assert_eq!(tokens.access_token, "access-token-7");
    assert!(rp.passkeys()[0].last_used_at.is_some());

    let login_body = &rp.finish_bodies()[1];
    assert_eq!(login_body["email"], ALICE_EMAIL);
    assert!(login_body["response"]
        .as_object()
        .unwrap()
        .contains_key("userHandle"));
    assert!(login_body["response"]["userHandle"].is_null());

    assert_eq!(
        rp.requests(),
        vec![
            "POST register/begin",
            "POST register/finish",
            "POST login/begin",
            "POST login/finish",
        ]
    );
}

#[tokio::test]
async fn test_login_cancelled_by_user() {
    // Given a registered passkey
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::new(), true);
    client.create_passkey("Phone").await.unwrap();

    // And a user who dismisses the next prompt
    client.platform().fail_next(
        "NotAllowedError",
        "The operation either timed out or was not allowed.",
    );

    // When logging in
    let err = client.login_with_passkey_flow(ALICE_EMAIL).await.unwrap_err();

    // Then the cancellation is reported and no finish request is sent
    assert_eq!(err, FlowError::Cancelled);
    assert_eq!(err.message(Locale::Zh), "用户取消了操作或超时");
    assert_eq!(
        rp.requests().last().map(String::as_str),
        Some("POST login/begin")
    );
}

#[tokio::test]
async fn test_unsupported_platform_sends_nothing() {
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::unsupported(), true);

    let register = client.create_passkey("Desktop").await;
    let login = client.login_with_passkey_flow(ALICE_EMAIL).await;

    assert_eq!(register.unwrap_err(), FlowError::NotSupported);
    assert_eq!(login.unwrap_err(), FlowError::NotSupported);
    assert!(rp.requests().is_empty());
    assert_eq!(client.platform().ceremony_count(), 0);
}

#[tokio::test]
async fn test_registering_same_authenticator_twice_is_rejected() {
    // Given an authenticator that already holds a credential for this user
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::new(), true);
    client.create_passkey("First").await.unwrap();

    // When registering again, the server lists it in excludeCredentials
    let mut flow = client.registration_flow();
    let err = flow.run("Second").await.unwrap_err();

    // Then the authenticator refuses and the flow fails without finishing
    assert_eq!(err, FlowError::InvalidAuthenticatorState);
    assert_eq!(err.to_string(), "Authenticator state is invalid");
    assert_eq!(flow.state(), FlowState::Failed);
    assert_eq!(rp.passkeys().len(), 1);
}

#[tokio::test]
async fn test_flow_history_is_observable() {
    let rp = MockRelyingParty::start().await;
    let client = client_for(&rp, SoftwareAuthenticator::new(), true);

    let mut flow = client.registration_flow();
    flow.run("Tablet").await.unwrap();

    assert_eq!(
        flow.tracker().history(),
        &[
            FlowState::Idle,
            FlowState::OptionsRequested,
            FlowState::PlatformCeremonyPending,
            FlowState::ResponseSubmitted,
            FlowState::Complete,
        ]
    );
}
