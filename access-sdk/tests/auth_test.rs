use access::{ledger::Pubkey, server::app, testutil::TestApp};
use access_sdk::{AccessKey, AccessSdk, AccessSdkBuilder, SdkErrors};
use tokio::net::TcpListener;
use url::Url;

async fn spawn_server(test_app: &TestApp) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let router = app(test_app.state.clone());
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    Url::parse(&format!("http://{address}/")).unwrap()
}

fn owner(key: &AccessKey) -> Pubkey {
    Pubkey::new_from_array(key.verifying_key().to_bytes())
}

#[tokio::test]
async fn test_authorized_access() {
    let test_app = TestApp::new();
    let key = AccessKey::generate();
    test_app.fund(&owner(&key), 5_000, 1_000);
    let url = spawn_server(&test_app).await;

    let sdk = AccessSdk::new(url, key).await.unwrap();
    assert_eq!(sdk.article().await.unwrap(), "Hello world");
}

#[tokio::test]
async fn test_grandfathered_stake() {
    let test_app = TestApp::new();
    let key = AccessKey::generate();
    test_app.fund(&owner(&key), 600, 1_000);
    test_app.set_pool_minimum(500);
    let url = spawn_server(&test_app).await;

    assert!(AccessSdk::new(url, key).await.is_ok());
}

#[tokio::test]
async fn test_insufficient_stake() {
    let test_app = TestApp::new();
    let key = AccessKey::generate();
    test_app.fund(&owner(&key), 1_000, 1_000);
    test_app.set_pool_minimum(1_000);
    let url = spawn_server(&test_app).await;

    let result = AccessSdk::new(url, key).await;
    assert!(matches!(
        result,
        Err(SdkErrors::Rejected { status: 400, ref message }) if message == "not enough stake"
    ));
}

#[tokio::test]
async fn test_replay_attack_with_same_nonce() {
    let test_app = TestApp::new();
    let key = AccessKey::generate();
    test_app.fund(&owner(&key), 5_000, 1_000);
    let url = spawn_server(&test_app).await;
    let builder = AccessSdkBuilder::new(url);

    let nonce = builder.get_nonce(&key.address()).await.unwrap();
    let signed_nonce = key.sign_nonce(&nonce);
    builder
        .login(&key.address(), signed_nonce.clone())
        .await
        .unwrap();

    let replay = builder.login(&key.address(), signed_nonce).await;
    assert!(matches!(
        replay,
        Err(SdkErrors::Rejected { status: 400, ref message }) if message == "invalid nonce"
    ));
}

#[tokio::test]
async fn test_tampered_token_is_forbidden() {
    let test_app = TestApp::new();
    let key = AccessKey::generate();
    test_app.fund(&owner(&key), 5_000, 1_000);
    let url = spawn_server(&test_app).await;

    let mut sdk = AccessSdk::new(url, key).await.unwrap();
    sdk.jwt_token.push('x');
    assert!(matches!(
        sdk.article().await,
        Err(SdkErrors::Rejected { status: 403, ref message }) if message == "Forbidden"
    ));
}

#[tokio::test]
async fn test_build_without_auth() {
    let builder = AccessSdkBuilder::new(Url::parse("http://127.0.0.1:1/").unwrap());
    assert!(matches!(builder.build(), Err(SdkErrors::NotAuthenticated)));
}
