use crate::zone::Zone;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Date de journée tolérante : `null`, absente ou non textuelle devient une chaîne vide,
/// écartée plus tard par le formateur au lieu de faire échouer toute la réponse.
fn lenient_date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => s,
        _ => String::new(),
    })
}

/// Identifiant fort pour un utilisateur (`_id` côté API)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour une demande d'échange
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Utilisateur tel que renvoyé par le login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub name: String,
    pub zone: Zone,
    #[serde(default)]
    pub is_admin: bool,
}

/// Statut d'une journée de permanence. Les valeurs inconnues sont gardées telles quelles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DutyStatus {
    Guard,
    Vacation,
    Others,
    Sick,
    Other(String),
}

impl DutyStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DutyStatus::Guard => "guard",
            DutyStatus::Vacation => "vacation",
            DutyStatus::Others => "others",
            DutyStatus::Sick => "sick",
            DutyStatus::Other(s) => s,
        }
    }
}

impl From<String> for DutyStatus {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "guard" => DutyStatus::Guard,
            "vacation" => DutyStatus::Vacation,
            "others" => DutyStatus::Others,
            "sick" => DutyStatus::Sick,
            _ => DutyStatus::Other(s),
        }
    }
}

impl From<DutyStatus> for String {
    fn from(s: DutyStatus) -> Self {
        s.as_str().to_owned()
    }
}

/// Journée d'une permanence, réassignable individuellement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyDay {
    /// Date brute telle que reçue (RFC3339 ou `YYYY-MM-DD`)
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: String,
    pub status: DutyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_user_id: Option<UserId>,
}

/// Permanence d'une semaine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Duty {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub assigned_user: UserId,
    pub week_number: u32,
    #[serde(default)]
    pub days: Vec<DutyDay>,
}

impl Duty {
    /// Titulaire effectif d'une journée : remplaçant, sinon titulaire du jour, sinon de la semaine.
    pub fn effective_assignee<'a>(&'a self, day: &'a DutyDay) -> &'a UserId {
        day.replacement_user_id
            .as_ref()
            .or(day.assigned_user.as_ref())
            .unwrap_or(&self.assigned_user)
    }
}

/// Motif d'un échange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReasonCode {
    Sick,
    Vacation,
    #[default]
    Others,
    Other(String),
}

impl ReasonCode {
    pub fn as_str(&self) -> &str {
        match self {
            ReasonCode::Sick => "sick",
            ReasonCode::Vacation => "vacation",
            ReasonCode::Others => "others",
            ReasonCode::Other(s) => s,
        }
    }

    /// Motif non renseigné (chaîne vide envoyée par les anciens clients).
    pub fn is_blank(&self) -> bool {
        matches!(self, ReasonCode::Other(s) if s.trim().is_empty())
    }
}

impl From<String> for ReasonCode {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "sick" => ReasonCode::Sick,
            "vacation" => ReasonCode::Vacation,
            "others" | "other" => ReasonCode::Others,
            _ => ReasonCode::Other(s),
        }
    }
}

impl From<ReasonCode> for String {
    fn from(r: ReasonCode) -> Self {
        r.as_str().to_owned()
    }
}

impl std::str::FromStr for ReasonCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ReasonCode::from(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExchangeStatus {
    Pending,
    Accepted,
    Other(String),
}

impl ExchangeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ExchangeStatus::Pending => "pending",
            ExchangeStatus::Accepted => "accepted",
            ExchangeStatus::Other(s) => s,
        }
    }
}

impl From<String> for ExchangeStatus {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "pending" => ExchangeStatus::Pending,
            "accepted" => ExchangeStatus::Accepted,
            _ => ExchangeStatus::Other(s),
        }
    }
}

impl From<ExchangeStatus> for String {
    fn from(s: ExchangeStatus) -> Self {
        s.as_str().to_owned()
    }
}

/// Journée concernée par une demande d'échange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeDay {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_of_change: Option<ReasonCode>,
}

/// Demande d'échange de gardes, lue depuis l'API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    #[serde(rename = "_id", alias = "id")]
    pub id: RequestId,
    pub requesting_user: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepting_user: Option<UserId>,
    pub status: ExchangeStatus,
    #[serde(rename = "Days", alias = "days", default)]
    pub days: Vec<ExchangeDay>,
    #[serde(
        rename = "reasonOfExChange",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reason_of_exchange: Option<ReasonCode>,
}

impl ExchangeRequest {
    /// Motif d'une journée, avec repli sur le motif global puis `others`.
    pub fn reason_for(&self, day: &ExchangeDay) -> ReasonCode {
        day.reason_of_change
            .iter()
            .chain(self.reason_of_exchange.iter())
            .find(|r| !r.is_blank())
            .cloned()
            .unwrap_or_default()
    }
}

/// Journée du payload de création.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExchangeDay {
    pub date: String,
    pub request_start_time: Option<String>,
    pub request_end_time: Option<String>,
    pub assigned_user: UserId,
    pub reason_of_change: ReasonCode,
}

/// Payload `POST /api/dutyExchange`. `accepting_user = None` : demande ouverte (urgence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExchangeRequest {
    pub requesting_user: UserId,
    pub accepting_user: Option<UserId>,
    pub status: ExchangeStatus,
    #[serde(rename = "Days")]
    pub days: Vec<NewExchangeDay>,
    #[serde(rename = "reasonOfExChange")]
    pub reason_of_exchange: ReasonCode,
}
