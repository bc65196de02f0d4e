use crate::model::RequestId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Couleurs utilisées par le calendrier (noms CSS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Green,
    Black,
    Orange,
    Red,
    Blue,
    Purple,
    Gray,
    White,
}

impl EventColor {
    pub fn as_css(self) -> &'static str {
        match self {
            EventColor::Green => "green",
            EventColor::Black => "black",
            EventColor::Orange => "orange",
            EventColor::Red => "red",
            EventColor::Blue => "blue",
            EventColor::Purple => "purple",
            EventColor::Gray => "gray",
            EventColor::White => "white",
        }
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Événement d'une journée, prêt pour un widget calendrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDate,
    pub all_day: bool,
    pub background_color: EventColor,
    pub text_color: EventColor,
    /// Demande d'échange à l'origine de l'événement, le cas échéant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,
}

impl CalendarEvent {
    pub fn all_day(title: impl Into<String>, start: NaiveDate, color: EventColor) -> Self {
        Self {
            title: title.into(),
            start,
            all_day: true,
            background_color: color,
            text_color: EventColor::White,
            request_id: None,
        }
    }
}
