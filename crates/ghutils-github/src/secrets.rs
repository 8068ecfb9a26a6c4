//! GitHub Actions repository secrets.
//!
//! Secret values are sealed with the repository's Curve25519 public key
//! before upload; GitHub never receives the plaintext.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use crypto_box::aead::OsRng;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::GitHubClient;
use crate::error::{Error, Result};

/// The key used to encrypt secrets for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublicKey {
    /// Base64-encoded Curve25519 public key.
    pub key: String,

    /// Identifier to send back alongside values encrypted with this key.
    pub key_id: String,
}

/// Whether [`GitHubClient::set_secret`] created or replaced the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretWrite {
    Created,
    Updated,
}

#[derive(Deserialize)]
struct SecretsPage {
    secrets: Vec<SecretName>,
}

#[derive(Deserialize)]
struct SecretName {
    name: String,
}

#[derive(Serialize)]
struct PutSecret<'a> {
    encrypted_value: &'a str,
    key_id: &'a str,
}

/// Path under which a repository's secrets are read and written.
#[must_use]
pub fn secrets_url(owner: &str, repo: &str) -> String {
    format!("/repos/{owner}/{repo}/actions/secrets")
}

/// Seal `value` for the holder of `public_key` (base64), returning base64.
///
/// The output is a libsodium sealed box, so it differs on every call.
///
/// # Errors
/// Returns [`Error::InvalidPublicKey`] if the key is not 32 base64-encoded bytes.
pub fn encrypt_secret(public_key: &str, value: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(public_key)
        .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;

    let bytes: [u8; crypto_box::KEY_SIZE] = bytes.as_slice().try_into().map_err(|_| {
        Error::InvalidPublicKey(format!(
            "expected {} bytes, got {}",
            crypto_box::KEY_SIZE,
            bytes.len()
        ))
    })?;

    let sealed = crypto_box::PublicKey::from(bytes)
        .seal(&mut OsRng, value.as_bytes())
        .map_err(|_| Error::Encryption)?;

    Ok(STANDARD.encode(sealed))
}

impl GitHubClient {
    /// Get the public key for encrypting a repository's secrets.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn get_public_key(&self, owner: &str, repo: &str) -> Result<PublicKey> {
        self.get(&format!("{}/public-key", secrets_url(owner, repo)))
            .await
    }

    /// Names of the secrets set on a repository. Values are never returned.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn get_secrets(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        self.get_all_pages(&secrets_url(owner, repo), |page: SecretsPage| {
            page.secrets.into_iter().map(|s| s.name).collect()
        })
        .await
    }

    /// Encrypt `value` with `public_key` and store it as secret `name`.
    ///
    /// # Errors
    /// Returns error if encryption or the API call fails.
    pub async fn set_secret(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        value: &str,
        public_key: &PublicKey,
    ) -> Result<SecretWrite> {
        let encrypted_value = encrypt_secret(&public_key.key, value)?;

        let request = self
            .request(
                Method::PUT,
                &format!("{}/{name}", secrets_url(owner, repo)),
            )?
            .json(&PutSecret {
                encrypted_value: &encrypted_value,
                key_id: &public_key.key_id,
            });

        let status = self.send_for_status(request, &[]).await?;
        let write = if status == StatusCode::CREATED {
            SecretWrite::Created
        } else {
            SecretWrite::Updated
        };

        info!(owner, repo, secret = name, ?write, "secret stored");
        Ok(write)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::client::tests::test_client;
    use crypto_box::SecretKey;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn keypair() -> (SecretKey, String) {
        let secret = SecretKey::generate(&mut OsRng);
        let public = STANDARD.encode(secret.public_key().as_bytes());
        (secret, public)
    }

    #[test]
    fn test_secrets_url() {
        assert_eq!(
            secrets_url("domdfcoding", "ghutils"),
            "/repos/domdfcoding/ghutils/actions/secrets"
        );
    }

    #[test]
    fn test_encrypt_secret_shape() {
        let (_, public) = keypair();

        let encrypted = encrypt_secret(&public, "Hello World").unwrap();

        assert_eq!(encrypted.len(), 80);
        assert!(encrypted.ends_with('='));
        assert_ne!(encrypted, encrypt_secret(&public, "Hello World").unwrap());
    }

    #[test]
    fn test_encrypt_secret_opens_with_secret_key() {
        let (secret, public) = keypair();

        let encrypted = encrypt_secret(&public, "hunter2").unwrap();
        let opened = secret.unseal(&STANDARD.decode(encrypted).unwrap()).unwrap();

        assert_eq!(opened, b"hunter2");
    }

    #[test]
    fn test_encrypt_secret_rejects_bad_keys() {
        assert!(matches!(
            encrypt_secret("not base64!", "x"),
            Err(Error::InvalidPublicKey(_))
        ));
        assert!(matches!(
            encrypt_secret(&STANDARD.encode([0_u8; 16]), "x"),
            Err(Error::InvalidPublicKey(_))
        ));
    }

    #[tokio::test]
    async fn test_get_public_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/actions/secrets/public-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "key_id": "012345678912345678",
                "key": "2Sg8iYjAxxmI2LvUXpJjkYrMxURPc8r+dB7TJyvv1234"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let key = client.get_public_key("owner", "repo").await.unwrap();

        assert_eq!(key.key_id, "012345678912345678");
    }

    #[tokio::test]
    async fn test_get_secrets_names_only() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/actions/secrets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_count": 2,
                "secrets": [
                    { "name": "GH_TOKEN", "created_at": "2019-08-10T14:59:22Z" },
                    { "name": "PYPI_TOKEN", "created_at": "2020-01-10T14:59:22Z" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let names = client.get_secrets("owner", "repo").await.unwrap();

        assert_eq!(names, ["GH_TOKEN", "PYPI_TOKEN"]);
    }

    #[tokio::test]
    async fn test_set_secret_created_then_updated() {
        let mock_server = MockServer::start().await;
        let (_, public) = keypair();
        let key = PublicKey {
            key: public,
            key_id: "568250167242549743".into(),
        };

        Mock::given(method("PUT"))
            .and(path("/repos/owner/repo/actions/secrets/PYPI_TOKEN"))
            .and(body_partial_json(serde_json::json!({ "key_id": "568250167242549743" })))
            .respond_with(ResponseTemplate::new(201))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/repos/owner/repo/actions/secrets/PYPI_TOKEN"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());

        let first = client
            .set_secret("owner", "repo", "PYPI_TOKEN", "s3cr3t", &key)
            .await
            .unwrap();
        let second = client
            .set_secret("owner", "repo", "PYPI_TOKEN", "s3cr3t", &key)
            .await
            .unwrap();

        assert_eq!(first, SecretWrite::Created);
        assert_eq!(second, SecretWrite::Updated);

        let requests = mock_server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_ne!(body["encrypted_value"], "s3cr3t");
    }
}
