//! Chargement séquentiel des vues : annuaire → permanences → demandes → événements.

use crate::api::{ApiError, RosterApi};
use crate::calendar::{format_calendar, format_own_shift_events, CalendarEvent};
use crate::directory::ZoneDirectory;
use crate::exchange::RequestDraft;
use crate::model::{Duty, ExchangeRequest};
use crate::session::Session;

/// Vue d'accueil : calendrier de toute la zone.
#[derive(Debug, Clone)]
pub struct HomeCalendar {
    pub directory: ZoneDirectory,
    pub duties: Vec<Duty>,
    pub requests: Vec<ExchangeRequest>,
    pub events: Vec<CalendarEvent>,
}

pub async fn load_home_calendar(
    api: &dyn RosterApi,
    session: &Session,
) -> Result<HomeCalendar, ApiError> {
    let zone = session.zone();
    let me = session.user_id();

    let directory = ZoneDirectory::new(api.zone_members(zone).await?);
    tracing::debug!(%zone, members = directory.len(), "zone directory loaded");

    let duties = api.zone_duties(zone).await?;
    tracing::debug!(%zone, duties = duties.len(), "zone duties loaded");

    let requests = api.exchange_requests(zone, me).await?;
    tracing::debug!(%zone, requests = requests.len(), "exchange requests loaded");

    let events = format_calendar(&duties, &requests, &directory, me);
    Ok(HomeCalendar {
        directory,
        duties,
        requests,
        events,
    })
}

/// Vue demandes : gardes de l'utilisateur et demandes le concernant.
#[derive(Debug, Clone)]
pub struct RequestsView {
    pub directory: ZoneDirectory,
    pub duties: Vec<Duty>,
    pub requests: Vec<ExchangeRequest>,
}

impl RequestsView {
    /// Gardes de l'utilisateur et dates sélectionnées dans le brouillon.
    pub fn events(&self, session: &Session, draft: &RequestDraft) -> Vec<CalendarEvent> {
        format_own_shift_events(&self.duties, session.user_id(), draft.selected())
    }
}

pub async fn load_requests_view(
    api: &dyn RosterApi,
    session: &Session,
) -> Result<RequestsView, ApiError> {
    let zone = session.zone();
    let me = session.user_id();

    let directory = ZoneDirectory::new(api.zone_members(zone).await?);
    let duties = api.user_duties(me).await?;
    tracing::debug!(user = %me, duties = duties.len(), "user duties loaded");
    let requests = api.exchange_requests(zone, me).await?;

    Ok(RequestsView {
        directory,
        duties,
        requests,
    })
}
