use super::{util, CalendarEvent, EventColor};
use crate::directory::{abbreviate_name, ZoneDirectory};
use crate::model::{ExchangeRequest, ExchangeStatus, ReasonCode};

/// Couleur d'une demande acceptée, selon le motif.
pub fn reason_color(reason: &ReasonCode) -> EventColor {
    match reason {
        ReasonCode::Sick => EventColor::Purple,
        ReasonCode::Vacation => EventColor::Black,
        ReasonCode::Others => EventColor::Orange,
        ReasonCode::Other(_) => EventColor::Gray,
    }
}

fn title(request: &ExchangeRequest, directory: &ZoneDirectory) -> String {
    let from = abbreviate_name(directory.name_of(&request.requesting_user));
    match (&request.status, &request.accepting_user) {
        (ExchangeStatus::Accepted, Some(to)) => {
            format!("Accepted: {from} → {}", abbreviate_name(directory.name_of(to)))
        }
        (ExchangeStatus::Accepted, None) => format!("Accepted: {from}"),
        _ => format!("Pending: {from}"),
    }
}

pub(super) fn format_exchange_events(
    requests: &[ExchangeRequest],
    directory: &ZoneDirectory,
) -> Vec<CalendarEvent> {
    requests
        .iter()
        .flat_map(|request| {
            let title = title(request, directory);
            request.days.iter().filter_map(move |day| {
                let start = util::day_or_warn(&day.date, "exchange")?;
                let color = match request.status {
                    ExchangeStatus::Accepted => reason_color(&request.reason_for(day)),
                    _ => EventColor::Red,
                };
                let mut event = CalendarEvent::all_day(title.clone(), start, color);
                event.request_id = Some(request.id.clone());
                Some(event)
            })
        })
        .collect()
}
