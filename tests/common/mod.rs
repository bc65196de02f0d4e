#![allow(dead_code)]
use async_trait::async_trait;
use permanence::{
    auth::{AuthSuccess, LoginForm, Registration},
    ApiError, Duty, DutyDay, DutyStatus, ExchangeDay, ExchangeRequest, ExchangeStatus,
    NewExchangeRequest, ReasonCode, RequestId, RosterApi, Session, User, UserId, Zone,
    ZoneDirectory, ZoneMember,
};
use std::sync::Mutex;

pub const ZONE: Zone = Zone::NorthWestLendelede;

pub fn uid(s: &str) -> UserId {
    UserId::new(s)
}

pub fn member(id: &str, name: &str) -> ZoneMember {
    ZoneMember {
        id: uid(id),
        name: name.into(),
        zone: ZONE,
    }
}

pub fn directory() -> ZoneDirectory {
    ZoneDirectory::new(vec![
        member("u1", "Kevin Selassie"),
        member("u2", "John Michael Doe"),
        member("u3", "Ann"),
    ])
}

pub fn session_for(id: &str, name: &str) -> Session {
    Session::new(
        "tok",
        User {
            id: uid(id),
            name: name.into(),
            zone: ZONE,
            is_admin: false,
        },
    )
}

pub fn day(date: &str, status: DutyStatus) -> DutyDay {
    DutyDay {
        date: date.into(),
        status,
        assigned_user: None,
        replacement_user_id: None,
    }
}

pub fn duty(owner: &str, week: u32, days: Vec<DutyDay>) -> Duty {
    Duty {
        id: None,
        assigned_user: uid(owner),
        week_number: week,
        days,
    }
}

pub fn request(
    id: &str,
    from: &str,
    to: Option<&str>,
    status: ExchangeStatus,
    dates: &[&str],
    reason: ReasonCode,
) -> ExchangeRequest {
    ExchangeRequest {
        id: RequestId::new(id),
        requesting_user: uid(from),
        accepting_user: to.map(uid),
        status,
        days: dates
            .iter()
            .map(|d| ExchangeDay {
                date: (*d).into(),
                reason_of_change: Some(reason.clone()),
            })
            .collect(),
        reason_of_exchange: None,
    }
}

/// Doublure de l'API : réponses fixes, appels enregistrés.
#[derive(Default)]
pub struct FakeApi {
    pub members: Vec<ZoneMember>,
    pub duties: Vec<Duty>,
    pub requests: Mutex<Vec<ExchangeRequest>>,
    pub fail_writes: bool,
    pub calls: Mutex<Vec<String>>,
    pub created: Mutex<Vec<NewExchangeRequest>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn write_error(&self) -> ApiError {
        ApiError::Status {
            status: 500,
            body: "boom".into(),
        }
    }
}

#[async_trait]
impl RosterApi for FakeApi {
    async fn login(&self, _form: &LoginForm) -> Result<AuthSuccess, ApiError> {
        self.record("login");
        Err(ApiError::Rejected("not supported".into()))
    }

    async fn register(&self, _registration: &Registration) -> Result<AuthSuccess, ApiError> {
        self.record("register");
        Err(ApiError::Rejected("not supported".into()))
    }

    async fn zone_members(&self, zone: Zone) -> Result<Vec<ZoneMember>, ApiError> {
        self.record(format!("zone_members {zone}"));
        Ok(self.members.clone())
    }

    async fn zone_duties(&self, zone: Zone) -> Result<Vec<Duty>, ApiError> {
        self.record(format!("zone_duties {zone}"));
        Ok(self.duties.clone())
    }

    async fn user_duties(&self, user: &UserId) -> Result<Vec<Duty>, ApiError> {
        self.record(format!("user_duties {user}"));
        Ok(self.duties.clone())
    }

    async fn exchange_requests(
        &self,
        zone: Zone,
        user: &UserId,
    ) -> Result<Vec<ExchangeRequest>, ApiError> {
        self.record(format!("exchange_requests {zone} {user}"));
        Ok(self.requests.lock().unwrap().clone())
    }

    async fn create_exchange(&self, request: &NewExchangeRequest) -> Result<(), ApiError> {
        self.record("create_exchange");
        if self.fail_writes {
            return Err(self.write_error());
        }
        self.created.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn accept_exchange(&self, id: &RequestId, accepting: &UserId) -> Result<(), ApiError> {
        self.record(format!("accept_exchange {id} {accepting}"));
        if self.fail_writes {
            return Err(self.write_error());
        }
        for r in self.requests.lock().unwrap().iter_mut() {
            if &r.id == id {
                r.status = ExchangeStatus::Accepted;
                r.accepting_user = Some(accepting.clone());
            }
        }
        Ok(())
    }
}
