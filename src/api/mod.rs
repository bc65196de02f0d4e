//! Accès à l'API roster distante.

mod error;
mod http;

pub use error::ApiError;
pub use http::HttpApi;

use crate::auth::{AuthSuccess, LoginForm, Registration};
use crate::directory::ZoneMember;
use crate::model::{Duty, ExchangeRequest, NewExchangeRequest, RequestId, UserId};
use crate::zone::Zone;
use async_trait::async_trait;

/// Opérations consommées par le client. `HttpApi` en est l'implémentation réseau ;
/// les tests en fournissent des doublures.
#[async_trait]
pub trait RosterApi: Send + Sync {
    async fn login(&self, form: &LoginForm) -> Result<AuthSuccess, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<AuthSuccess, ApiError>;

    /// `GET /api/auth/user/zone/{zone}`
    async fn zone_members(&self, zone: Zone) -> Result<Vec<ZoneMember>, ApiError>;

    /// `GET /api/duties/zone/{zone}`
    async fn zone_duties(&self, zone: Zone) -> Result<Vec<Duty>, ApiError>;

    /// `GET /api/duties/{userId}`
    async fn user_duties(&self, user: &UserId) -> Result<Vec<Duty>, ApiError>;

    /// `GET /api/dutyExchange/{zone}/{userId}`
    async fn exchange_requests(
        &self,
        zone: Zone,
        user: &UserId,
    ) -> Result<Vec<ExchangeRequest>, ApiError>;

    /// `POST /api/dutyExchange`
    async fn create_exchange(&self, request: &NewExchangeRequest) -> Result<(), ApiError>;

    /// `PUT /api/dutyExchange/accept/{id}`
    async fn accept_exchange(&self, id: &RequestId, accepting: &UserId) -> Result<(), ApiError>;
}
