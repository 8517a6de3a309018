use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use super::{Expected, NexusAdmin, Outcome};
use crate::config::NexusConfig;
use crate::error::{Error, Result};
use crate::types::{ContentSelector, ContentSelectorPrivilege, Repository, RepositoryType, Role};

const CONTENT_SELECTOR_PRIVILEGE_TYPE: &str = "repository-content-selector";
const BUILTIN_ROLES: [&str; 2] = ["nx-admin", "nx-anonymous"];
const ANONYMOUS_USER: &str = "anonymous";
/// Minutes cached artifacts and metadata are kept before revalidation.
const CACHE_MAX_AGE: u32 = 1440;

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PrivilegeSummary {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Blocking client for the Nexus REST API, authenticated with HTTP Basic.
pub struct NexusClient {
    client: Client,
    api_root: String,
    username: String,
    password: String,
}

impl NexusClient {
    pub fn new(config: &NexusConfig, password: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_root: config.api_root(),
            username: config.username.clone(),
            password: password.into(),
        })
    }

    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.api_root, path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.password))
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authed(self.client.get(self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authed(self.client.post(self.url(path)))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.authed(self.client.put(self.url(path)))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.authed(self.client.delete(self.url(path)))
    }

    /// Fetch a JSON array. A non-success status is logged and yields no items.
    fn list<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<Vec<T>> {
        let resp = self.get(path).send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            error!(status = status.as_u16(), %body, "Listing {what} failed");
            return Ok(Vec::new());
        }
        Ok(resp.json()?)
    }

    fn delete_each(
        &self,
        names: Vec<String>,
        path: &str,
        what: &str,
        expected: Expected,
    ) -> Result<()> {
        for name in names {
            info!("Deleting {what}: {name}");
            let resp = self
                .delete(&format!("{path}/{}", urlencoding::encode(&name)))
                .send()?;
            report(resp, expected, &format!("{what} {name} deletion"));
        }
        Ok(())
    }

    fn find_anonymous_user(&self) -> Result<Option<Value>> {
        let users: Vec<Value> = self.list("/security/users", "users")?;
        Ok(users
            .into_iter()
            .find(|user| user.get("userId").and_then(Value::as_str) == Some(ANONYMOUS_USER)))
    }
}

/// Classify a response against the expected codes and log the outcome.
fn report(resp: Response, expected: Expected, subject: &str) -> Outcome {
    let status = resp.status();
    let outcome = expected.classify(status);
    match outcome {
        Outcome::Success => info!("{subject} succeeded"),
        Outcome::AlreadyDone => warn!(
            status = status.as_u16(),
            "{subject} skipped, {}",
            expected.benign_reason()
        ),
        Outcome::Failed => {
            let body = resp.text().unwrap_or_default();
            error!(status = status.as_u16(), %body, "{subject} failed");
        }
    }
    outcome
}

fn proxy_payload(repository: &Repository) -> Result<Value> {
    let mut payload = json!({
        "name": repository.name,
        "online": true,
        "storage": {
            "blobStoreName": "default",
            "strictContentTypeValidation": true,
        },
        "proxy": {
            "remoteUrl": repository.remote_url,
            "contentMaxAge": CACHE_MAX_AGE,
            "metadataMaxAge": CACHE_MAX_AGE,
        },
        "negativeCache": {
            "enabled": true,
            "timeToLive": CACHE_MAX_AGE,
        },
        "httpClient": {
            "blocked": false,
            "autoBlock": true,
        },
    });

    if repository.repo_type == RepositoryType::Apt {
        let distribution = repository.distribution.as_deref().ok_or_else(|| {
            Error::Config(format!(
                "apt repository {} requires a distribution",
                repository.name
            ))
        })?;
        payload["apt"] = json!({ "distribution": distribution, "flat": false });
    }

    Ok(payload)
}

impl NexusAdmin for NexusClient {
    fn change_admin_password(&mut self, new_password: &str) -> Result<Outcome> {
        let resp = self
            .put(&format!("/security/users/{}/change-password", self.username))
            .header(CONTENT_TYPE, "text/plain")
            .body(new_password.to_string())
            .send()?;
        let outcome = report(resp, Expected::CHANGE_PASSWORD, "Changing admin password");
        if outcome == Outcome::Success {
            self.password = new_password.to_string();
        }
        Ok(outcome)
    }

    fn delete_all_repositories(&self) -> Result<()> {
        let repositories: Vec<Named> = self.list("/repositories", "repositories")?;
        self.delete_each(
            repositories.into_iter().map(|r| r.name).collect(),
            "/repositories",
            "repository",
            Expected::DELETE_REPOSITORY,
        )
    }

    fn create_proxy_repository(&self, repository: &Repository) -> Result<Outcome> {
        let payload = proxy_payload(repository)?;
        let repo_type = repository.repo_type;

        info!("Creating {repo_type} repository: {}", repository.name);
        let resp = self
            .post(&format!("/repositories/{}/proxy", repo_type.format()))
            .json(&payload)
            .send()?;
        Ok(report(
            resp,
            Expected::CREATE_PROXY_REPOSITORY,
            &format!("{repo_type} proxy {} creation", repository.name),
        ))
    }

    fn delete_all_content_selectors(&self) -> Result<()> {
        let selectors: Vec<Named> =
            self.list("/security/content-selectors", "content selectors")?;
        self.delete_each(
            selectors.into_iter().map(|s| s.name).collect(),
            "/security/content-selectors",
            "content selector",
            Expected::DELETE_CONTENT_SELECTOR,
        )
    }

    fn create_content_selector(&self, selector: &ContentSelector) -> Result<Outcome> {
        info!("Creating content selector: {}", selector.name);
        let resp = self
            .post("/security/content-selectors")
            .json(selector)
            .send()?;
        Ok(report(
            resp,
            Expected::CREATE_CONTENT_SELECTOR,
            &format!("content selector {} creation", selector.name),
        ))
    }

    fn delete_all_content_selector_privileges(&self) -> Result<()> {
        let privileges: Vec<PrivilegeSummary> = self.list("/security/privileges", "privileges")?;
        self.delete_each(
            privileges
                .into_iter()
                .filter(|p| p.kind == CONTENT_SELECTOR_PRIVILEGE_TYPE)
                .map(|p| p.name)
                .collect(),
            "/security/privileges",
            "content selector privilege",
            Expected::DELETE_PRIVILEGE,
        )
    }

    fn create_content_selector_privilege(
        &self,
        privilege: &ContentSelectorPrivilege,
    ) -> Result<Outcome> {
        info!("Creating content selector privilege: {}", privilege.name);
        let resp = self
            .post("/security/privileges/repository-content-selector")
            .json(privilege)
            .send()?;
        Ok(report(
            resp,
            Expected::CREATE_PRIVILEGE,
            &format!("content selector privilege {} creation", privilege.name),
        ))
    }

    fn delete_all_custom_roles(&self) -> Result<()> {
        let roles: Vec<Named> = self.list("/security/roles", "roles")?;
        self.delete_each(
            roles
                .into_iter()
                .map(|r| r.name)
                .filter(|name| !BUILTIN_ROLES.contains(&name.as_str()))
                .collect(),
            "/security/roles",
            "role",
            Expected::DELETE_ROLE,
        )
    }

    fn create_role(&self, role: &Role) -> Result<Outcome> {
        info!("Creating role: {}", role.name);
        let resp = self.post("/security/roles").json(role).send()?;
        Ok(report(
            resp,
            Expected::CREATE_ROLE,
            &format!("role {} creation", role.name),
        ))
    }

    fn update_role(&self, role: &Role) -> Result<Outcome> {
        info!(
            privileges = role.privileges.len(),
            "Updating role: {}", role.name
        );
        let resp = self
            .put(&format!("/security/roles/{}", urlencoding::encode(&role.id)))
            .json(role)
            .send()?;
        Ok(report(
            resp,
            Expected::UPDATE_ROLE,
            &format!("role {} update", role.name),
        ))
    }

    fn enable_anonymous_access(&self) -> Result<Outcome> {
        let resp = self
            .put("/security/anonymous")
            .json(&json!({
                "enabled": true,
                "userId": ANONYMOUS_USER,
                "realName": "Local Authorizing Realm",
            }))
            .send()?;
        Ok(report(
            resp,
            Expected::ENABLE_ANONYMOUS,
            "Enabling anonymous access",
        ))
    }

    fn update_anonymous_user_roles(&self, roles: &[String]) -> Result<Outcome> {
        let Some(mut user) = self.find_anonymous_user()? else {
            error!("User {ANONYMOUS_USER} not found, cannot update its roles");
            return Ok(Outcome::Failed);
        };
        user["roles"] = json!(roles);

        let resp = self
            .put(&format!("/security/users/{ANONYMOUS_USER}"))
            .json(&user)
            .send()?;
        Ok(report(
            resp,
            Expected::UPDATE_USER,
            &format!("User {ANONYMOUS_USER} role update"),
        ))
    }

    fn test_auth(&self) -> Result<bool> {
        let resp = self
            .get("/security/users")
            .query(&[("userId", self.username.as_str())])
            .send()?;
        match resp.status() {
            StatusCode::OK => {
                info!("API authentication test passed");
                Ok(true)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("API authentication test failed");
                Ok(false)
            }
            status => {
                let body = resp.text().unwrap_or_default();
                error!(
                    status = status.as_u16(),
                    %body,
                    "API authentication test inconclusive"
                );
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_payload_common_fields() {
        let repo = Repository::new(RepositoryType::Pypi, "pypi-proxy", "https://pypi.org/");
        let payload = proxy_payload(&repo).unwrap();
        assert_eq!(payload["name"], "pypi-proxy");
        assert_eq!(payload["proxy"]["remoteUrl"], "https://pypi.org/");
        assert_eq!(payload["storage"]["blobStoreName"], "default");
        assert_eq!(payload["negativeCache"]["timeToLive"], 1440);
        assert!(payload.get("apt").is_none());
    }

    #[test]
    fn test_proxy_payload_apt_section() {
        let repo = Repository::new(RepositoryType::Apt, "apt-proxy", "http://deb.debian.org/debian")
            .with_distribution("bookworm");
        let payload = proxy_payload(&repo).unwrap();
        assert_eq!(payload["apt"]["distribution"], "bookworm");
        assert_eq!(payload["apt"]["flat"], false);
    }

    #[test]
    fn test_proxy_payload_apt_requires_distribution() {
        let repo = Repository::new(RepositoryType::Apt, "apt-proxy", "http://deb.debian.org/debian");
        assert!(matches!(proxy_payload(&repo), Err(Error::Config(_))));
    }

    #[test]
    fn test_client_uses_context_path() {
        let config = NexusConfig::new("localhost", 8081, "/nexus");
        let client = NexusClient::new(&config, "secret").unwrap();
        assert_eq!(client.api_root(), "http://localhost:8081/nexus/service/rest");
        assert_eq!(
            client.url("/repositories"),
            "http://localhost:8081/nexus/service/rest/v1/repositories"
        );
    }
}
