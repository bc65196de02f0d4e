#![forbid(unsafe_code)]
//! Permanence — client de l'API de permanences (gardes) par zone.
//!
//! - Session explicite (identité + jeton) persistée localement.
//! - Chargement séquentiel annuaire → permanences → demandes d'échange.
//! - Dérivation pure des événements calendrier (titres, couleurs).
//! - Envoi et acceptation des demandes d'échange.

pub mod api;
pub mod auth;
pub mod calendar;
pub mod config;
pub mod directory;
pub mod exchange;
pub mod io;
pub mod model;
pub mod notification;
pub mod pipeline;
pub mod session;
pub mod storage;
pub mod zone;

pub use api::{ApiError, HttpApi, RosterApi};
pub use auth::{AuthSuccess, FieldErrors, LoginForm, Registration};
pub use calendar::{format_calendar, CalendarEvent, EventColor};
pub use config::ClientConfig;
pub use directory::{abbreviate_name, ZoneDirectory, ZoneMember};
pub use exchange::{resolve_click, submit_request, Decision, RequestDraft};
pub use model::{
    Duty, DutyDay, DutyStatus, ExchangeDay, ExchangeRequest, ExchangeStatus, NewExchangeRequest,
    ReasonCode, RequestId, User, UserId,
};
pub use notification::{ConsoleNotifier, MemoryNotifier, Notice, NoticeLevel, Notifier};
pub use pipeline::{load_home_calendar, load_requests_view, HomeCalendar, RequestsView};
pub use session::{Access, Session, SessionError};
pub use storage::{JsonSessionStore, SessionStore};
pub use zone::{abbreviate_zone, Zone, ZoneStyle};
