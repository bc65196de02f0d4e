use super::{Confirm, Decision, ResolveOutcome};
use crate::api::RosterApi;
use crate::calendar::parse_day;
use crate::model::{ExchangeRequest, ExchangeStatus};
use crate::notification::{Notice, Notifier};
use crate::session::Session;
use chrono::NaiveDate;

/// Demande couvrant `date` ; les demandes en attente passent avant les autres.
pub fn find_request_for_date(
    requests: &[ExchangeRequest],
    date: NaiveDate,
) -> Option<&ExchangeRequest> {
    let covers = |r: &&ExchangeRequest| {
        r.days
            .iter()
            .any(|d| parse_day(&d.date) == Some(date))
    };
    requests
        .iter()
        .filter(covers)
        .find(|r| r.status == ExchangeStatus::Pending)
        .or_else(|| requests.iter().find(covers))
}

/// Traite un clic sur `date` : confirmation puis acceptation de la demande, et rechargement.
/// Aucune mise à jour locale : seule la liste rechargée reflète le nouvel état.
pub async fn resolve_click(
    api: &dyn RosterApi,
    session: &Session,
    requests: &[ExchangeRequest],
    date: NaiveDate,
    confirm: &dyn Confirm,
    notifier: &dyn Notifier,
) -> ResolveOutcome {
    let Some(request) = find_request_for_date(requests, date) else {
        notifier.notify(Notice::info(format!("No exchange request on {date}.")));
        return ResolveOutcome::NoRequest;
    };

    let me = session.user_id();
    let restricted_to_other = request.accepting_user.as_ref().is_some_and(|u| u != me);
    if restricted_to_other || &request.requesting_user == me {
        notifier.notify(Notice::error("You are not allowed to accept this request."));
        return ResolveOutcome::NotAllowed;
    }
    if request.status == ExchangeStatus::Accepted {
        notifier.notify(Notice::info("This request has already been accepted."));
        return ResolveOutcome::AlreadyAccepted;
    }

    match confirm.confirm(request, date) {
        Decision::Cancel => ResolveOutcome::Cancelled,
        Decision::Reject => {
            tracing::info!(request = %request.id, "exchange request rejected locally");
            notifier.notify(Notice::info("Request rejected."));
            ResolveOutcome::Rejected
        }
        Decision::Accept => {
            if let Err(e) = api.accept_exchange(&request.id, me).await {
                tracing::error!(error = %e, request = %request.id, "error accepting request");
                notifier.notify(Notice::error("Failed to accept request. Try again."));
                return ResolveOutcome::Failed(e);
            }
            notifier.notify(Notice::success("Request accepted!"));
            match api.exchange_requests(session.zone(), me).await {
                Ok(requests) => ResolveOutcome::Accepted { requests },
                Err(e) => {
                    tracing::error!(error = %e, "error refreshing exchange requests");
                    notifier.notify(Notice::error("Failed to refresh requests."));
                    ResolveOutcome::Failed(e)
                }
            }
        }
    }
}
