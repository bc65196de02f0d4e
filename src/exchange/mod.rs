//! Demandes d'échange : préparation/envoi et résolution au clic.

mod resolve;
mod submit;
mod types;

pub use resolve::{find_request_for_date, resolve_click};
pub use submit::{candidates, submit_request, RequestDraft};
pub use types::{Confirm, Decision, FixedDecision, ResolveOutcome, SelectError, SubmitOutcome};
