use super::{util, CalendarEvent, EventColor};
use crate::directory::ZoneDirectory;
use crate::model::{Duty, DutyStatus, UserId};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Couleur d'une journée de permanence, par ordre de priorité :
/// propre garde > congé > autres > tout statut hors garde > défaut.
pub fn duty_color(status: &DutyStatus, own: bool) -> EventColor {
    match status {
        DutyStatus::Guard if own => EventColor::Green,
        DutyStatus::Vacation => EventColor::Black,
        DutyStatus::Others => EventColor::Orange,
        DutyStatus::Guard => EventColor::Blue,
        _ => EventColor::Red,
    }
}

pub(super) fn format_duty_events(
    duties: &[Duty],
    directory: &ZoneDirectory,
    me: &UserId,
) -> Vec<CalendarEvent> {
    duties
        .iter()
        .flat_map(|duty| duty.days.iter().map(move |day| (duty, day)))
        .filter_map(|(duty, day)| {
            let start = util::day_or_warn(&day.date, "duty")?;
            let assignee = duty.effective_assignee(day);
            let title = match &day.replacement_user_id {
                Some(repl) => format!("Replacement: {}", directory.name_of(repl)),
                None => directory.name_of(assignee).to_owned(),
            };
            let color = duty_color(&day.status, assignee == me);
            Some(CalendarEvent::all_day(title, start, color))
        })
        .collect()
}

/// Jours où `me` est effectivement de garde.
pub fn own_duty_days(duties: &[Duty], me: &UserId) -> BTreeSet<NaiveDate> {
    duties
        .iter()
        .flat_map(|duty| {
            duty.days
                .iter()
                .filter(move |day| duty.effective_assignee(day) == me)
                .filter_map(|day| util::day_or_warn(&day.date, "duty"))
        })
        .collect()
}

pub(super) fn format_own_shift_events(
    duties: &[Duty],
    me: &UserId,
    selected: &BTreeSet<NaiveDate>,
) -> Vec<CalendarEvent> {
    let shifts = own_duty_days(duties, me)
        .into_iter()
        .map(|d| CalendarEvent::all_day("Your Shift", d, EventColor::Green));
    let picks = selected
        .iter()
        .map(|d| CalendarEvent::all_day("Shift Change Request", *d, EventColor::Orange));
    shifts.chain(picks).collect()
}
