//! Tests for the submission client.

use std::sync::OnceLock;

use base64::Engine;
use rand::rngs::OsRng;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::{Oaep, RsaPrivateKey};
use sha2::Sha256;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use splitshare_primitives::record::ShareSet;
use splitshare_primitives::share::combine;
use splitshare_primitives::SplitError;

use crate::client::SubmissionClient;
use crate::error::ClientError;
use crate::types::{ClientConfig, EnvelopePayload, RawSubmission, Recipient, RecipientConfig};

fn service_provider_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut OsRng, 2048).unwrap())
}

fn third_party_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut OsRng, 2048).unwrap())
}

fn pem_of(key: &RsaPrivateKey) -> String {
    key.to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .unwrap()
}

fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        service_provider: RecipientConfig {
            key_url: format!("{base_url}/keys/sp"),
            submit_url: format!("{base_url}/store/sp"),
        },
        third_party: RecipientConfig {
            key_url: format!("{base_url}/keys/tp"),
            submit_url: format!("{base_url}/store/tp"),
        },
    }
}

fn sample_submission() -> RawSubmission {
    RawSubmission {
        provider_id: "prov-7".to_string(),
        user_id: "user-42".to_string(),
        gender: "Female".to_string(),
        age: "26-40".to_string(),
        disability: "No".to_string(),
    }
}

async fn mount_key(server: &MockServer, url_path: &str, key: &RsaPrivateKey) {
    Mock::given(method("GET"))
        .and(path(url_path.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(pem_of(key)))
        .mount(server)
        .await;
}

async fn mount_store(server: &MockServer, url_path: &str) {
    Mock::given(method("POST"))
        .and(path(url_path.to_string()))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// Decrypt a stored envelope body back into its share set.
fn unseal_body(body: &[u8], key: &RsaPrivateKey) -> ShareSet {
    let payload: EnvelopePayload = serde_json::from_slice(body).unwrap();
    let ciphertext = base64::engine::general_purpose::STANDARD
        .decode(payload.data)
        .unwrap();
    let plaintext = key.decrypt(Oaep::new::<Sha256>(), &ciphertext).unwrap();
    ShareSet::from_canonical_bytes(&plaintext).unwrap()
}

#[tokio::test]
async fn test_submit_delivers_both_envelopes() {
    let server = MockServer::start().await;
    mount_key(&server, "/keys/sp", service_provider_key()).await;
    mount_key(&server, "/keys/tp", third_party_key()).await;
    mount_store(&server, "/store/sp").await;
    mount_store(&server, "/store/tp").await;

    let client = SubmissionClient::new(test_config(&server.uri()));
    let outcome = client.submit(&sample_submission()).await.unwrap();

    assert!(outcome.is_complete());
    let receipt = outcome.service_provider.unwrap();
    assert_eq!(receipt.recipient, Recipient::ServiceProvider);
    // 256 ciphertext bytes base64-encode to 344 characters.
    assert_eq!(receipt.ciphertext_len, 344);

    let requests = server.received_requests().await.unwrap();
    let sp_body = &requests
        .iter()
        .find(|r| r.url.path() == "/store/sp")
        .expect("service provider store was not called")
        .body;
    let tp_body = &requests
        .iter()
        .find(|r| r.url.path() == "/store/tp")
        .expect("third party store was not called")
        .body;

    let share_a = unseal_body(sp_body, service_provider_key());
    let share_b = unseal_body(tp_body, third_party_key());

    // Identifiers travel in the clear to both backends.
    assert_eq!(share_a.provider_id, "prov-7");
    assert_eq!(share_b.provider_id, "prov-7");
    assert_eq!(share_a.user_id, "user-42");
    assert_eq!(share_b.user_id, "user-42");

    // Neither share carries the codes, but together they recombine to
    // Female/26-40/No = {1, 2, 0}.
    let recovered = combine(&share_a, &share_b).unwrap();
    assert_eq!(recovered.gender, 1);
    assert_eq!(recovered.age, 2);
    assert_eq!(recovered.disabled, 0);
}

#[tokio::test]
async fn test_shares_sent_to_backends_differ() {
    let server = MockServer::start().await;
    mount_key(&server, "/keys/sp", service_provider_key()).await;
    mount_key(&server, "/keys/tp", third_party_key()).await;
    mount_store(&server, "/store/sp").await;
    mount_store(&server, "/store/tp").await;

    let client = SubmissionClient::new(test_config(&server.uri()));
    client.submit(&sample_submission()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let sp_body = &requests.iter().find(|r| r.url.path() == "/store/sp").unwrap().body;
    let tp_body = &requests.iter().find(|r| r.url.path() == "/store/tp").unwrap().body;

    let share_a = unseal_body(sp_body, service_provider_key());
    let share_b = unseal_body(tp_body, third_party_key());

    // Masked fields differ between the two backends' copies.
    assert_ne!(share_a.gender, share_b.gender);
    assert_ne!(share_a.age, share_b.age);
    assert_ne!(share_a.disabled, share_b.disabled);
    // And neither backend sees the bare code.
    assert_ne!(share_a.gender, 1);
    assert_ne!(share_b.gender, 1);
}

#[tokio::test]
async fn test_key_fetch_sends_no_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys/sp"))
        .and(header("cache-control", "no-store"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(pem_of(service_provider_key())),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_key(&server, "/keys/tp", third_party_key()).await;
    mount_store(&server, "/store/sp").await;
    mount_store(&server, "/store/tp").await;

    let client = SubmissionClient::new(test_config(&server.uri()));
    let outcome = client.submit(&sample_submission()).await.unwrap();
    assert!(outcome.is_complete());
}

#[tokio::test]
async fn test_one_failed_key_does_not_block_the_other_leg() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys/sp"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_key(&server, "/keys/tp", third_party_key()).await;
    mount_store(&server, "/store/tp").await;

    let client = SubmissionClient::new(test_config(&server.uri()));
    let outcome = client.submit(&sample_submission()).await.unwrap();

    assert!(!outcome.is_complete());
    assert!(matches!(
        outcome.service_provider.unwrap_err(),
        ClientError::KeyFetch {
            recipient: Recipient::ServiceProvider,
            ..
        }
    ));
    outcome.third_party.unwrap();

    // The third party's envelope was actually stored.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests.iter().filter(|r| r.url.path() == "/store/tp").count(),
        1
    );
    assert_eq!(
        requests.iter().filter(|r| r.url.path() == "/store/sp").count(),
        0
    );
}

#[tokio::test]
async fn test_unparseable_key_is_an_encryption_stage_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys/sp"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not a key"))
        .mount(&server)
        .await;
    mount_key(&server, "/keys/tp", third_party_key()).await;
    mount_store(&server, "/store/tp").await;

    let client = SubmissionClient::new(test_config(&server.uri()));
    let outcome = client.submit(&sample_submission()).await.unwrap();

    assert!(matches!(
        outcome.service_provider.unwrap_err(),
        ClientError::Split(SplitError::KeyImport(_))
    ));
    outcome.third_party.unwrap();
}

#[tokio::test]
async fn test_empty_key_body_is_a_hard_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys/sp"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;
    mount_key(&server, "/keys/tp", third_party_key()).await;
    mount_store(&server, "/store/tp").await;

    let client = SubmissionClient::new(test_config(&server.uri()));
    let outcome = client.submit(&sample_submission()).await.unwrap();

    assert!(matches!(
        outcome.service_provider.unwrap_err(),
        ClientError::KeyFetch { .. }
    ));
}

#[tokio::test]
async fn test_rejected_delivery_reports_status() {
    let server = MockServer::start().await;
    mount_key(&server, "/keys/sp", service_provider_key()).await;
    mount_key(&server, "/keys/tp", third_party_key()).await;
    Mock::given(method("POST"))
        .and(path("/store/sp"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_store(&server, "/store/tp").await;

    let client = SubmissionClient::new(test_config(&server.uri()));
    let outcome = client.submit(&sample_submission()).await.unwrap();

    assert!(matches!(
        outcome.service_provider.unwrap_err(),
        ClientError::Delivery {
            recipient: Recipient::ServiceProvider,
            status: 503,
        }
    ));
    outcome.third_party.unwrap();
}

#[tokio::test]
async fn test_missing_identifiers_abort_before_any_request() {
    let server = MockServer::start().await;
    let client = SubmissionClient::new(test_config(&server.uri()));

    let mut raw = sample_submission();
    raw.user_id = "  ".to_string();
    let err = client.submit(&raw).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidSubmission(_)));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_seal_for_produces_a_decryptable_blob() {
    let server = MockServer::start().await;
    mount_key(&server, "/keys/tp", third_party_key()).await;

    let client = SubmissionClient::new(test_config(&server.uri()));
    let share = ShareSet {
        provider_id: "prov-7".to_string(),
        user_id: "user-42".to_string(),
        gender: -999,
        age: 502,
        disabled: -777,
    };

    let blob = client.seal_for(Recipient::ThirdParty, &share).await.unwrap();
    let ciphertext = base64::engine::general_purpose::STANDARD
        .decode(blob)
        .unwrap();
    let plaintext = third_party_key()
        .decrypt(Oaep::new::<Sha256>(), &ciphertext)
        .unwrap();
    assert_eq!(ShareSet::from_canonical_bytes(&plaintext).unwrap(), share);
}

#[test]
fn test_config_defaults_match_standard_endpoints() {
    let config = ClientConfig::default();
    assert_eq!(
        config.service_provider.submit_url,
        "http://127.0.0.1:5000/store_service_provider"
    );
    assert_eq!(
        config.third_party.submit_url,
        "http://127.0.0.1:5000/store_third_party"
    );
    assert_eq!(config.service_provider.key_url, config.third_party.key_url);
}
