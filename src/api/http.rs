use super::{ApiError, RosterApi};
use crate::auth::{AuthReply, AuthSuccess, LoginForm, Registration};
use crate::directory::ZoneMember;
use crate::model::{Duty, ExchangeRequest, NewExchangeRequest, RequestId, UserId};
use crate::zone::Zone;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

/// Client HTTP de l'API roster (jeton bearer optionnel).
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(base: Url) -> Self {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(client: Client, base: Url) -> Self {
        Self {
            client,
            base,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Construit l'URL en encodant chaque segment (les zones contiennent des espaces).
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn prepare(&self, req: RequestBuilder) -> (RequestBuilder, String) {
        let request_id = Uuid::new_v4().to_string();
        let mut req = req.header("x-request-id", &request_id);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        (req, request_id)
    }

    /// Envoie la requête et renvoie statut + corps, sans interpréter le statut.
    /// Tous les événements de l'appel sont rattachés au span `api_request`.
    async fn send_raw(&self, req: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
        let (req, request_id) = self.prepare(req);
        let req = req.build()?;
        let span = tracing::debug_span!(
            "api_request",
            method = %req.method(),
            url = %req.url(),
            request_id = %request_id,
        );

        async {
            tracing::debug!("sending api request");
            let response = self.client.execute(req).await.map_err(|e| {
                tracing::error!(error = %e, "api request failed");
                e
            })?;
            let status = response.status();
            let body = response.text().await?;
            tracing::debug!(status = %status, "api response received");
            Ok::<_, ApiError>((status, body))
        }
        .instrument(span)
        .await
    }

    async fn send(&self, req: RequestBuilder) -> Result<String, ApiError> {
        let (status, body) = self.send_raw(req).await?;
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(status = %status, "api rejected credentials");
            return Err(ApiError::Unauthorized(body));
        }
        if !status.is_success() {
            tracing::error!(status = %status, body = %body, "api returned error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.url(segments)?;
        let body = self.send(self.client.get(url)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Les endpoints d'authentification renvoient leurs erreurs de champ dans le corps,
    /// avec un statut 200 ou 4xx selon la version du serveur.
    async fn authenticate<B: serde::Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<AuthSuccess, ApiError> {
        let url = self.url(segments)?;
        let (status, text) = self.send_raw(self.client.post(url).json(body)).await?;
        if status.is_server_error() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        match serde_json::from_str::<AuthReply>(&text) {
            Ok(reply) => reply.into_result(),
            Err(_) if status == StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized(text)),
            Err(_) if !status.is_success() => Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            }),
            Err(e) => Err(ApiError::Decode(e)),
        }
    }
}

#[async_trait]
impl RosterApi for HttpApi {
    async fn login(&self, form: &LoginForm) -> Result<AuthSuccess, ApiError> {
        self.authenticate(&["api", "auth", "login"], form).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthSuccess, ApiError> {
        self.authenticate(&["api", "register"], registration).await
    }

    async fn zone_members(&self, zone: Zone) -> Result<Vec<ZoneMember>, ApiError> {
        self.get_json(&["api", "auth", "user", "zone", zone.name()])
            .await
    }

    async fn zone_duties(&self, zone: Zone) -> Result<Vec<Duty>, ApiError> {
        self.get_json(&["api", "duties", "zone", zone.name()]).await
    }

    async fn user_duties(&self, user: &UserId) -> Result<Vec<Duty>, ApiError> {
        self.get_json(&["api", "duties", user.as_str()]).await
    }

    async fn exchange_requests(
        &self,
        zone: Zone,
        user: &UserId,
    ) -> Result<Vec<ExchangeRequest>, ApiError> {
        self.get_json(&["api", "dutyExchange", zone.name(), user.as_str()])
            .await
    }

    async fn create_exchange(&self, request: &NewExchangeRequest) -> Result<(), ApiError> {
        let url = self.url(&["api", "dutyExchange"])?;
        self.send(self.client.post(url).json(request)).await?;
        tracing::info!(
            requesting = %request.requesting_user,
            days = request.days.len(),
            "exchange request created"
        );
        Ok(())
    }

    async fn accept_exchange(&self, id: &RequestId, accepting: &UserId) -> Result<(), ApiError> {
        let url = self.url(&["api", "dutyExchange", "accept", id.as_str()])?;
        let body = json!({ "acceptingUser": accepting });
        self.send(self.client.put(url).json(&body)).await?;
        tracing::info!(request = %id, accepting = %accepting, "exchange request accepted");
        Ok(())
    }
}
