//! Twitch Helix adapter for viewer identity and channel role lookups.

use async_trait::async_trait;
use reqwest::header;
use rolecast_application::{ChannelRoleLookup, IdentityLookup};
use rolecast_core::{AppError, AppResult, ViewerIdentity};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Helix accepts at most this many `login` or `id` parameters per request.
const MAX_USERS_PER_REQUEST: usize = 100;

/// Connection settings for the Helix API.
#[derive(Debug, Clone)]
pub struct HelixConfig {
    /// API base, for example `https://api.twitch.tv/helix`.
    pub base_url: Url,
    /// Application client id.
    pub client_id: String,
    /// Broadcaster user access token.
    pub access_token: String,
    /// User id of the channel owner.
    pub broadcaster_id: String,
}

#[derive(Debug, Deserialize)]
struct HelixPage<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct HelixUser {
    id: String,
    login: String,
    display_name: String,
}

impl From<HelixUser> for ViewerIdentity {
    fn from(value: HelixUser) -> Self {
        ViewerIdentity::new(value.id, value.login, value.display_name)
    }
}

/// Helix-backed implementation of the identity and channel role ports.
#[derive(Clone)]
pub struct HelixIdentityClient {
    http_client: reqwest::Client,
    config: HelixConfig,
}

impl HelixIdentityClient {
    /// Creates a client using a preconfigured HTTP client.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: HelixConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn endpoint(&self, resource: &str, query: &[(&str, &str)]) -> AppResult<Url> {
        let raw = format!(
            "{}/{resource}",
            self.config.base_url.as_str().trim_end_matches('/')
        );
        let mut url = Url::parse(raw.as_str()).map_err(|error| {
            AppError::Internal(format!("invalid Helix endpoint '{raw}': {error}"))
        })?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> AppResult<Vec<T>> {
        let url = self.endpoint(resource, query)?;
        let response = self
            .http_client
            .get(url)
            .header("Client-Id", self.config.client_id.as_str())
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.access_token),
            )
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to call Helix '{resource}': {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(AppError::Internal(format!(
                "Helix '{resource}' returned status {}: {body}",
                status.as_u16()
            )));
        }

        let page = response.json::<HelixPage<T>>().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to parse Helix '{resource}' response body: {error}"
            ))
        })?;

        Ok(page.data)
    }

    async fn get_users(&self, key: &str, values: &[String]) -> AppResult<Vec<ViewerIdentity>> {
        let mut identities = Vec::with_capacity(values.len());
        for chunk in values
            .iter()
            .filter(|value| !value.trim().is_empty())
            .collect::<Vec<_>>()
            .chunks(MAX_USERS_PER_REQUEST)
        {
            let query: Vec<(&str, &str)> =
                chunk.iter().map(|value| (key, value.as_str())).collect();
            let users = self.get_page::<HelixUser>("users", query.as_slice()).await?;
            identities.extend(users.into_iter().map(ViewerIdentity::from));
        }

        debug!(
            requested = values.len(),
            resolved = identities.len(),
            "resolved Helix users"
        );
        Ok(identities)
    }

    async fn channel_has_user(&self, resource: &str, user_id: &str) -> AppResult<bool> {
        let entries = self
            .get_page::<serde_json::Value>(
                resource,
                &[
                    ("broadcaster_id", self.config.broadcaster_id.as_str()),
                    ("user_id", user_id),
                ],
            )
            .await?;
        Ok(!entries.is_empty())
    }
}

#[async_trait]
impl IdentityLookup for HelixIdentityClient {
    async fn get_users_by_names(&self, usernames: &[String]) -> AppResult<Vec<ViewerIdentity>> {
        let logins: Vec<String> = usernames
            .iter()
            .map(|username| username.trim().to_lowercase())
            .collect();
        self.get_users("login", logins.as_slice()).await
    }

    async fn get_users_by_ids(&self, user_ids: &[String]) -> AppResult<Vec<ViewerIdentity>> {
        self.get_users("id", user_ids).await
    }

    async fn get_user_by_name(&self, username: &str) -> AppResult<Option<ViewerIdentity>> {
        let users = self.get_users_by_names(&[username.to_owned()]).await?;
        Ok(users.into_iter().next())
    }
}

#[async_trait]
impl ChannelRoleLookup for HelixIdentityClient {
    async fn platform_role_tags_for_viewer(&self, user_id: &str) -> AppResult<Vec<String>> {
        if user_id.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut tags = Vec::new();
        if user_id == self.config.broadcaster_id {
            tags.push("broadcaster".to_owned());
        }
        if self.channel_has_user("moderation/moderators", user_id).await? {
            tags.push("mod".to_owned());
        }
        if self.channel_has_user("channels/vips", user_id).await? {
            tags.push("vip".to_owned());
        }
        if self.channel_has_user("subscriptions", user_id).await? {
            tags.push("sub".to_owned());
        }

        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use rolecast_core::ViewerIdentity;
    use url::Url;

    use super::{HelixConfig, HelixIdentityClient, HelixPage, HelixUser};

    fn client(base_url: &str) -> HelixIdentityClient {
        let Ok(base_url) = Url::parse(base_url) else {
            panic!("test base url must parse");
        };
        HelixIdentityClient::new(
            reqwest::Client::new(),
            HelixConfig {
                base_url,
                client_id: "client".to_owned(),
                access_token: "token".to_owned(),
                broadcaster_id: "b1".to_owned(),
            },
        )
    }

    #[test]
    fn endpoint_appends_resource_and_repeated_query_pairs() {
        let client = client("https://api.twitch.tv/helix/");

        let url = client.endpoint("users", &[("login", "alice"), ("login", "bob")]);

        assert_eq!(
            url.map(|url| url.to_string()).unwrap_or_default(),
            "https://api.twitch.tv/helix/users?login=alice&login=bob"
        );
    }

    #[test]
    fn user_page_maps_login_to_username() {
        let payload = r#"{"data":[{"id":"u1","login":"alice","display_name":"Alice","type":""}]}"#;

        let page: Result<HelixPage<HelixUser>, _> = serde_json::from_str(payload);
        let identities: Vec<ViewerIdentity> = page
            .map(|page| page.data.into_iter().map(ViewerIdentity::from).collect())
            .unwrap_or_default();

        assert_eq!(identities, vec![ViewerIdentity::new("u1", "alice", "Alice")]);
    }

    #[tokio::test]
    async fn blank_user_id_has_no_channel_roles() {
        use rolecast_application::ChannelRoleLookup;

        let client = client("http://127.0.0.1:9/helix");
        let tags = client.platform_role_tags_for_viewer(" ").await;
        assert!(matches!(tags, Ok(tags) if tags.is_empty()));
    }

    #[tokio::test]
    async fn empty_batch_skips_network() {
        use rolecast_application::IdentityLookup;

        let client = client("http://127.0.0.1:9/helix");
        let users = client.get_users_by_ids(&[]).await;
        assert!(matches!(users, Ok(users) if users.is_empty()));
    }
}
