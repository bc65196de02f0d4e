use crate::api::ApiError;
use crate::model::{ExchangeRequest, NewExchangeRequest};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("You can only select your assigned shifts.")]
    NotYourShift(NaiveDate),
}

/// Réponse de l'utilisateur à la confirmation d'une demande.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
    Cancel,
}

/// Collaborateur chargé de demander confirmation (prompt terminal, boîte de dialogue...).
pub trait Confirm {
    fn confirm(&self, request: &ExchangeRequest, date: NaiveDate) -> Decision;
}

/// Réponse fixée à l'avance (`--yes`, `--reject`, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub Decision);

impl Confirm for FixedDecision {
    fn confirm(&self, _request: &ExchangeRequest, _date: NaiveDate) -> Decision {
        self.0
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Aucune date sélectionnée : rien n'a été envoyé.
    NothingSelected,
    Submitted(NewExchangeRequest),
    Failed(ApiError),
}

#[derive(Debug)]
pub enum ResolveOutcome {
    /// Aucune demande ne couvre la date cliquée.
    NoRequest,
    /// Refus local, sans appel réseau.
    NotAllowed,
    AlreadyAccepted,
    Accepted {
        /// Liste rechargée après acceptation.
        requests: Vec<ExchangeRequest>,
    },
    Rejected,
    Cancelled,
    Failed(ApiError),
}
