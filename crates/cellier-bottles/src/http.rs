//! Reqwest-backed `BottleService` against the upstream bottle API.
//!
//! Endpoint shapes follow the upstream REST conventions: collection at
//! `/bottles/`, members at `/bottles/{id}/`, bearer-token auth.

use async_trait::async_trait;
use cellier_core::bottle::{Bottle, BottlePatch, NewBottle};
use cellier_core::error::DomainError;
use cellier_core::service::BottleService;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

/// HTTP client for the upstream bottle API.
#[derive(Debug, Clone)]
pub struct HttpBottleService {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBottleService {
    /// Creates a client for the API rooted at `base_url`, optionally
    /// authenticating every request with a bearer token.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
            token,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/bottles/", self.base_url)
    }

    fn member_url(&self, id: i64) -> String {
        format!("{}/bottles/{id}/", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Maps a response to a domain error, reading the body for context.
    /// `bottle_id` turns a 404 into `BottleNotFound`.
    async fn check(
        response: Response,
        bottle_id: Option<i64>,
    ) -> Result<Response, DomainError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND
            && let Some(id) = bottle_id
        {
            return Err(DomainError::BottleNotFound(id));
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%status, body, "bottle api returned an error");
        Err(DomainError::Upstream(format!(
            "bottle api responded {status}"
        )))
    }
}

fn transport(err: reqwest::Error) -> DomainError {
    DomainError::Upstream(format!("bottle api unreachable: {err}"))
}

fn decode(err: reqwest::Error) -> DomainError {
    DomainError::Upstream(format!("bottle api sent an invalid body: {err}"))
}

#[async_trait]
impl BottleService for HttpBottleService {
    async fn list_bottles(&self) -> Result<Vec<Bottle>, DomainError> {
        let response = self
            .authorize(self.client.get(self.collection_url()))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response, None)
            .await?
            .json()
            .await
            .map_err(decode)
    }

    async fn get_bottle(&self, id: i64) -> Result<Bottle, DomainError> {
        let response = self
            .authorize(self.client.get(self.member_url(id)))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response, Some(id))
            .await?
            .json()
            .await
            .map_err(decode)
    }

    async fn create_bottle(&self, data: &NewBottle) -> Result<Bottle, DomainError> {
        let response = self
            .authorize(self.client.post(self.collection_url()).json(data))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response, None)
            .await?
            .json()
            .await
            .map_err(decode)
    }

    async fn update_bottle(&self, id: i64, data: &NewBottle) -> Result<Bottle, DomainError> {
        let response = self
            .authorize(self.client.put(self.member_url(id)).json(data))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response, Some(id))
            .await?
            .json()
            .await
            .map_err(decode)
    }

    async fn patch_bottle(&self, id: i64, patch: &BottlePatch) -> Result<Bottle, DomainError> {
        let response = self
            .authorize(self.client.patch(self.member_url(id)).json(patch))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response, Some(id))
            .await?
            .json()
            .await
            .map_err(decode)
    }

    async fn delete_bottle(&self, id: i64) -> Result<(), DomainError> {
        let response = self
            .authorize(self.client.delete(self.member_url(id)))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }
}
