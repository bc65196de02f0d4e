use super::{SelectError, SubmitOutcome};
use crate::api::RosterApi;
use crate::calendar::own_duty_days;
use crate::directory::{ZoneDirectory, ZoneMember};
use crate::model::{
    Duty, ExchangeStatus, NewExchangeDay, NewExchangeRequest, ReasonCode, UserId,
};
use crate::notification::{Notice, Notifier};
use crate::session::Session;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Brouillon de demande d'échange : dates choisies, destinataire et motif.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDraft {
    selected: BTreeSet<NaiveDate>,
    /// `None` : demande ouverte (urgence), visible par toute la zone.
    pub target: Option<UserId>,
    pub reason: Option<ReasonCode>,
}

impl RequestDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &BTreeSet<NaiveDate> {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Ajoute ou retire `date`. Seuls les jours de garde de `me` sont sélectionnables.
    /// Renvoie `true` si la date est désormais sélectionnée.
    pub fn toggle_date(
        &mut self,
        date: NaiveDate,
        duties: &[Duty],
        me: &UserId,
    ) -> Result<bool, SelectError> {
        if !own_duty_days(duties, me).contains(&date) {
            return Err(SelectError::NotYourShift(date));
        }
        if self.selected.remove(&date) {
            Ok(false)
        } else {
            self.selected.insert(date);
            Ok(true)
        }
    }

    /// Payload de création, `None` sans date sélectionnée.
    pub fn to_payload(&self, requester: &UserId) -> Option<NewExchangeRequest> {
        if self.selected.is_empty() {
            return None;
        }
        let reason = self
            .reason
            .clone()
            .filter(|r| !r.is_blank())
            .unwrap_or_default();
        let days = self
            .selected
            .iter()
            .map(|d| NewExchangeDay {
                date: d.format("%Y-%m-%d").to_string(),
                request_start_time: None,
                request_end_time: None,
                assigned_user: requester.clone(),
                reason_of_change: reason.clone(),
            })
            .collect();
        Some(NewExchangeRequest {
            requesting_user: requester.clone(),
            accepting_user: self.target.clone(),
            status: ExchangeStatus::Pending,
            days,
            reason_of_exchange: reason,
        })
    }
}

/// Collègues de la zone à qui une demande peut être adressée.
pub fn candidates<'a>(directory: &'a ZoneDirectory, me: &UserId) -> Vec<&'a ZoneMember> {
    directory.colleagues(me).collect()
}

/// Envoie la demande. Sans date sélectionnée, aucune requête n'est émise.
/// La sélection est vidée seulement en cas de succès ; pas de nouvelle tentative en cas d'échec.
pub async fn submit_request(
    api: &dyn RosterApi,
    session: &Session,
    draft: &mut RequestDraft,
    notifier: &dyn Notifier,
) -> SubmitOutcome {
    let Some(payload) = draft.to_payload(session.user_id()) else {
        notifier.notify(Notice::error("Please select at least one date."));
        return SubmitOutcome::NothingSelected;
    };

    match api.create_exchange(&payload).await {
        Ok(()) => {
            notifier.notify(Notice::success("Shift change request submitted!"));
            draft.clear();
            SubmitOutcome::Submitted(payload)
        }
        Err(e) => {
            tracing::error!(error = %e, "error submitting exchange request");
            notifier.notify(Notice::error("Failed to submit request. Try again."));
            SubmitOutcome::Failed(e)
        }
    }
}
