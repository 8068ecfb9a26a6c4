//! Listing the repositories owned by users and organizations.

use tracing::debug;

use crate::client::GitHubClient;
use crate::error::{Error, Result};
use crate::traits::GitHubApi;
use crate::types::{Organization, Repository, User};

impl GitHubClient {
    /// Look up a user by login.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn find_user(&self, login: &str) -> Result<Option<User>> {
        self.get_optional(&format!("/users/{login}")).await
    }

    /// Look up an organization by login.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn find_org(&self, login: &str) -> Result<Option<Organization>> {
        self.get_optional(&format!("/orgs/{login}")).await
    }

    /// List the repositories owned by `login`, sorted by full name.
    ///
    /// Works for organizations too; GitHub serves both under `/users`.
    ///
    /// # Errors
    /// Returns error if API call fails.
    pub async fn list_owned_repos(&self, login: &str) -> Result<Vec<Repository>> {
        self.get_all_pages(
            &format!("/users/{login}/repos?type=owner&sort=full_name&direction=asc"),
            |page: Vec<Repository>| page,
        )
        .await
    }

    /// Get the full representation of a repository.
    ///
    /// # Errors
    /// Returns error if the repository does not exist or the API call fails.
    pub async fn get_repo(&self, full_name: &str) -> Result<Repository> {
        self.get(&format!("/repos/{full_name}")).await
    }
}

/// Repositories owned by `login`, as summarised by the listing endpoint.
///
/// # Errors
/// Returns error if API call fails.
pub async fn get_repos<G: GitHubApi>(api: &G, login: &str) -> Result<Vec<Repository>> {
    api.list_owned_repos(login).await
}

/// Repositories owned by `login`, each refreshed to its full representation.
///
/// Costs one extra request per repository.
///
/// # Errors
/// Returns error if any API call fails.
pub async fn get_repos_full<G: GitHubApi>(api: &G, login: &str) -> Result<Vec<Repository>> {
    let summaries = api.list_owned_repos(login).await?;
    let mut repos = Vec::with_capacity(summaries.len());

    for summary in summaries {
        repos.push(api.get_repo(&summary.full_name).await?);
    }

    Ok(repos)
}

/// Fail with the first login in `users` or `orgs` that does not exist.
async fn check_accounts<G, S>(api: &G, users: &[S], orgs: &[S]) -> Result<()>
where
    G: GitHubApi,
    S: AsRef<str> + Sync,
{
    for user in users {
        let user = user.as_ref();
        if api.find_user(user).await?.is_none() {
            return Err(Error::NoSuchUser(user.to_string()));
        }
    }

    for org in orgs {
        let org = org.as_ref();
        if api.find_org(org).await?.is_none() {
            return Err(Error::NoSuchOrganization(org.to_string()));
        }
    }

    Ok(())
}

/// Repositories owned by the given users, then by the given organizations.
///
/// Every account is checked before any repositories are listed, so a typo
/// fails fast.
///
/// # Errors
/// Returns [`Error::NoSuchUser`] or [`Error::NoSuchOrganization`] for an
/// unknown account, or any API error.
pub async fn list_repos<G, S>(api: &G, users: &[S], orgs: &[S]) -> Result<Vec<Repository>>
where
    G: GitHubApi,
    S: AsRef<str> + Sync,
{
    check_accounts(api, users, orgs).await?;

    let mut repos = Vec::new();
    for login in users.iter().chain(orgs) {
        let owned = get_repos(api, login.as_ref()).await?;
        debug!(login = login.as_ref(), count = owned.len(), "listed repositories");
        repos.extend(owned);
    }

    Ok(repos)
}

/// Like [`list_repos`], with every repository in its full representation.
///
/// # Errors
/// As for [`list_repos`].
pub async fn list_repos_full<G, S>(api: &G, users: &[S], orgs: &[S]) -> Result<Vec<Repository>>
where
    G: GitHubApi,
    S: AsRef<str> + Sync,
{
    check_accounts(api, users, orgs).await?;

    let mut repos = Vec::new();
    for login in users.iter().chain(orgs) {
        repos.extend(get_repos_full(api, login.as_ref()).await?);
    }

    Ok(repos)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::client::tests::test_client;
    use crate::test_mocks::{Call, MockGitHub};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn names(repos: &[Repository]) -> Vec<&str> {
        repos.iter().map(|r| r.full_name.as_str()).collect()
    }

    fn repo_json(owner: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "full_name": format!("{owner}/{name}"),
            "owner": { "login": owner, "id": 7 },
            "private": false,
            "fork": false,
            "html_url": format!("https://github.com/{owner}/{name}"),
            "description": null
        })
    }

    #[tokio::test]
    async fn test_list_owned_repos_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .and(query_param("type", "owner"))
            .and(query_param("sort", "full_name"))
            .and(query_param("direction", "asc"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                repo_json("octocat", "hello-world"),
                repo_json("octocat", "spoon-knife"),
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let repos = get_repos(&client, "octocat").await.unwrap();

        assert_eq!(names(&repos), ["octocat/hello-world", "octocat/spoon-knife"]);
        assert_eq!(repos[0].owner.login, "octocat");
        assert_eq!(repos[0].stargazers_count, None);
    }

    #[tokio::test]
    async fn test_find_user_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/nobody-here"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "Not Found"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());

        assert!(client.find_user("nobody-here").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_org_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/orgs/github"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "login": "github",
                "id": 9919,
                "description": "How people build software."
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let org = client.find_org("github").await.unwrap().unwrap();

        assert_eq!(org.login, "github");
        assert_eq!(org.id, 9919);
    }

    #[tokio::test]
    async fn test_get_repo_full_fields() {
        let mock_server = MockServer::start().await;

        let mut body = repo_json("octocat", "hello-world");
        body["stargazers_count"] = 80.into();
        body["open_issues_count"] = 3.into();
        body["default_branch"] = "master".into();

        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let repo = client.get_repo("octocat/hello-world").await.unwrap();

        assert_eq!(repo.stargazers_count, Some(80));
        assert_eq!(repo.default_branch.as_deref(), Some("master"));
    }

    #[tokio::test]
    async fn test_get_repos_full_refreshes_each() {
        let api = MockGitHub::new().with_user("domdfcoding", &["consolekit", "domdf_python_tools"]);

        let repos = get_repos_full(&api, "domdfcoding").await.unwrap();

        assert!(repos.iter().all(|r| r.stargazers_count == Some(42)));
        assert_eq!(
            api.calls(),
            vec![
                Call::ListRepos("domdfcoding".into()),
                Call::GetRepo("domdfcoding/consolekit".into()),
                Call::GetRepo("domdfcoding/domdf_python_tools".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_repos_users_then_orgs() {
        let api = MockGitHub::new()
            .with_user("domdfcoding", &["consolekit"])
            .with_org("sphinx-toolbox", &["sphinx-toolbox", "extras-require"]);

        let repos = list_repos(&api, &["domdfcoding"], &["sphinx-toolbox"])
            .await
            .unwrap();

        assert_eq!(
            names(&repos),
            [
                "domdfcoding/consolekit",
                "sphinx-toolbox/sphinx-toolbox",
                "sphinx-toolbox/extras-require",
            ]
        );
    }

    #[tokio::test]
    async fn test_list_repos_unknown_user() {
        let api = MockGitHub::new().with_org("sphinx-toolbox", &["sphinx-toolbox"]);

        let err = list_repos(&api, &["ghost"], &["sphinx-toolbox"])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoSuchUser(ref u) if u == "ghost"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_repos_unknown_org() {
        let api = MockGitHub::new().with_user("domdfcoding", &["consolekit"]);

        let err = list_repos(&api, &["domdfcoding"], &["nonexistent-org"])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No such organization nonexistent-org");
    }

    #[tokio::test]
    async fn test_list_repos_full_refreshes_in_account_order() {
        let api = MockGitHub::new()
            .with_user("domdfcoding", &["consolekit"])
            .with_org("sphinx-toolbox", &["extras-require"]);

        let repos = list_repos_full(&api, &["domdfcoding"], &["sphinx-toolbox"])
            .await
            .unwrap();

        assert!(repos.iter().all(|r| r.stargazers_count == Some(42)));
        assert_eq!(
            api.calls(),
            vec![
                Call::ListRepos("domdfcoding".into()),
                Call::GetRepo("domdfcoding/consolekit".into()),
                Call::ListRepos("sphinx-toolbox".into()),
                Call::GetRepo("sphinx-toolbox/extras-require".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_repos_full_checks_accounts_first() {
        let api = MockGitHub::new().with_user("domdfcoding", &["consolekit"]);

        let err = list_repos_full(&api, &["domdfcoding"], &["ghost-org"])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoSuchOrganization(ref o) if o == "ghost-org"));
        assert!(api.calls().is_empty());
    }
}
