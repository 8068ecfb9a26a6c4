//! Authenticating as a GitHub App and as its installations.
//!
//! An app authenticates with a short-lived RS256 JWT signed by its private
//! key. Installation-scoped requests need an installation access token,
//! obtained by exchanging the JWT. [`ContextSwitcher`] moves one client
//! between the two identities.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Method;
use reqwest::header::ACCEPT;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::GitHubClient;
use crate::error::{Error, Result};
use crate::headers::MACHINE_MAN;
use crate::pagination::PER_PAGE;
use crate::types::{Installation, Repository};

/// Clock drift allowance; GitHub rejects tokens issued in the future.
const ISSUED_AT_LEEWAY: Duration = Duration::seconds(60);

/// GitHub's maximum app token lifetime.
const TOKEN_LIFETIME: Duration = Duration::minutes(10);

/// JWT claims identifying a GitHub App.
#[derive(Debug, Serialize, Deserialize)]
struct AppClaims {
    iat: i64,
    exp: i64,
    iss: String,
}

/// A GitHub App's ID and private key.
#[derive(Clone)]
pub struct AppCredentials {
    app_id: u64,
    key: EncodingKey,
}

impl AppCredentials {
    /// Parse a PEM-encoded RSA private key.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPrivateKey`] if the key cannot be parsed.
    pub fn from_pem(app_id: u64, private_key_pem: &[u8]) -> Result<Self> {
        let key = EncodingKey::from_rsa_pem(private_key_pem)
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;

        Ok(Self { app_id, key })
    }

    /// The app's numeric ID.
    #[must_use]
    pub const fn app_id(&self) -> u64 {
        self.app_id
    }

    /// Sign a JWT valid from one minute before `now` until ten minutes after.
    ///
    /// # Errors
    /// Returns error if signing fails.
    pub fn jwt_at(&self, now: DateTime<Utc>) -> Result<SecretString> {
        let claims = AppClaims {
            iat: (now - ISSUED_AT_LEEWAY).timestamp(),
            exp: (now + TOKEN_LIFETIME).timestamp(),
            iss: self.app_id.to_string(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)?;
        Ok(SecretString::from(token))
    }

    /// Sign a JWT for the current time.
    ///
    /// # Errors
    /// Returns error if signing fails.
    pub fn jwt(&self) -> Result<SecretString> {
        self.jwt_at(Utc::now())
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("key", &"[redacted]")
            .finish()
    }
}

/// A short-lived token scoped to one installation.
#[derive(Debug)]
pub struct InstallationToken {
    pub token: SecretString,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct ApiInstallationToken {
    token: String,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct InstallationRepositoriesPage {
    total_count: usize,
    repositories: Vec<Repository>,
}

impl GitHubClient {
    /// List every installation of the authenticated app.
    ///
    /// Requires app (JWT) authentication.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn list_app_installations(&self) -> Result<Vec<Installation>> {
        self.get_all_pages("/app/installations", |page: Vec<Installation>| page)
            .await
    }

    /// Find the app's installation on a user or organization account.
    ///
    /// # Errors
    /// Returns error if the app is not installed there or the API call fails.
    pub async fn user_installation(&self, login: &str) -> Result<Installation> {
        self.get(&format!("/users/{login}/installation")).await
    }

    /// Find the app's installation covering a repository.
    ///
    /// # Errors
    /// Returns error if the app is not installed there or the API call fails.
    pub async fn repo_installation(&self, owner: &str, repo: &str) -> Result<Installation> {
        self.get(&format!("/repos/{owner}/{repo}/installation")).await
    }

    /// Exchange app authentication for an installation access token.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn create_installation_token(&self, installation_id: u64) -> Result<InstallationToken> {
        let request = self
            .request(
                Method::POST,
                &format!("/app/installations/{installation_id}/access_tokens"),
            )?
            .header(ACCEPT, MACHINE_MAN);

        let response: ApiInstallationToken = Self::send(request).await?;

        Ok(InstallationToken {
            token: SecretString::from(response.token),
            expires_at: response.expires_at,
        })
    }

    /// List the repositories an installation can access.
    ///
    /// Requires installation authentication. Pages are requested by number
    /// until `total_count` repositories have been seen.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn list_installation_repositories(&self, url: &str) -> Result<Vec<Repository>> {
        let mut repos = Vec::new();
        let mut page: usize = 1;

        loop {
            let request = self
                .request(Method::GET, url)?
                .header(ACCEPT, MACHINE_MAN)
                .query(&[("per_page", PER_PAGE), ("page", page)]);

            let response: InstallationRepositoriesPage = Self::send(request).await?;
            let received = response.repositories.len();
            repos.extend(response.repositories);

            if received == 0 || repos.len() >= response.total_count {
                break;
            }
            page += 1;
        }

        Ok(repos)
    }
}

/// Switches one client between acting as a GitHub App and acting as one of
/// its installations.
#[derive(Debug)]
pub struct ContextSwitcher {
    client: GitHubClient,
    credentials: AppCredentials,
}

impl ContextSwitcher {
    /// Take over `client`, whose current token is replaced on each switch.
    #[must_use]
    pub fn new(client: GitHubClient, credentials: AppCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// The client, authenticated as whichever identity was last switched to.
    #[must_use]
    pub const fn client(&self) -> &GitHubClient {
        &self.client
    }

    #[must_use]
    pub const fn app_id(&self) -> u64 {
        self.credentials.app_id()
    }

    /// Authenticate as the app itself.
    ///
    /// # Errors
    /// Returns error if the JWT cannot be signed.
    pub fn login_as_app(&mut self) -> Result<()> {
        self.client.set_token(self.credentials.jwt()?);
        debug!(app_id = self.app_id(), "authenticated as app");
        Ok(())
    }

    /// Authenticate as the app's installation on a user or organization,
    /// returning the installation ID.
    ///
    /// # Errors
    /// Returns error if the app is not installed there or the token exchange fails.
    pub async fn login_as_user_installation(&mut self, login: &str) -> Result<u64> {
        self.login_as_app()?;
        let installation = self.client.user_installation(login).await?;
        self.login_as_installation(installation.id).await?;
        Ok(installation.id)
    }

    /// Authenticate as the app's installation covering a repository,
    /// returning the installation ID.
    ///
    /// # Errors
    /// Returns error if the app is not installed there or the token exchange fails.
    pub async fn login_as_repo_installation(&mut self, owner: &str, repo: &str) -> Result<u64> {
        self.login_as_app()?;
        let installation = self.client.repo_installation(owner, repo).await?;
        self.login_as_installation(installation.id).await?;
        Ok(installation.id)
    }

    async fn login_as_installation(&mut self, installation_id: u64) -> Result<()> {
        let token = self.client.create_installation_token(installation_id).await?;
        self.client.set_token(token.token);
        debug!(installation_id, "authenticated as installation");
        Ok(())
    }
}

/// Every repository the app is installed on, across all installations.
///
/// Leaves the switcher authenticated as the last installation visited.
///
/// # Errors
/// Returns error if any authentication step or listing fails.
pub async fn list_installed_repos(switcher: &mut ContextSwitcher) -> Result<Vec<Repository>> {
    switcher.login_as_app()?;
    let installations = switcher.client().list_app_installations().await?;
    let mut repos = Vec::new();

    for installation in installations {
        let login = installation.account.login;
        switcher.login_as_user_installation(&login).await?;

        let url = installation
            .repositories_url
            .unwrap_or_else(|| "/installation/repositories".to_string());
        let installed = switcher.client().list_installation_repositories(&url).await?;

        info!(account = %login, count = installed.len(), "listed installation repositories");
        repos.extend(installed);
    }

    Ok(repos)
}
