//! Dérivation des événements calendrier à partir des permanences et des demandes d'échange.
//!
//! Fonctions pures : aucune erreur n'est levée, les dates illisibles sont ignorées
//! (avec un `warn!`).

mod duty;
mod exchange;
mod types;
mod util;

pub use duty::{duty_color, own_duty_days};
pub use exchange::reason_color;
pub use types::{CalendarEvent, EventColor};
pub use util::parse_day;

use crate::directory::ZoneDirectory;
use crate::model::{Duty, ExchangeRequest, UserId};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Un événement par journée de permanence.
pub fn format_duty_events(
    duties: &[Duty],
    directory: &ZoneDirectory,
    me: &UserId,
) -> Vec<CalendarEvent> {
    duty::format_duty_events(duties, directory, me)
}

/// Un événement par journée de chaque demande d'échange.
pub fn format_exchange_events(
    requests: &[ExchangeRequest],
    directory: &ZoneDirectory,
) -> Vec<CalendarEvent> {
    exchange::format_exchange_events(requests, directory)
}

/// Vue complète : permanences puis demandes d'échange.
pub fn format_calendar(
    duties: &[Duty],
    requests: &[ExchangeRequest],
    directory: &ZoneDirectory,
    me: &UserId,
) -> Vec<CalendarEvent> {
    let mut events = format_duty_events(duties, directory, me);
    events.extend(format_exchange_events(requests, directory));
    events
}

/// Calendrier de la page demandes : ses propres gardes et la sélection en cours.
pub fn format_own_shift_events(
    duties: &[Duty],
    me: &UserId,
    selected: &BTreeSet<NaiveDate>,
) -> Vec<CalendarEvent> {
    duty::format_own_shift_events(duties, me, selected)
}
