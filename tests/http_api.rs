#![forbid(unsafe_code)]
mod common;

use common::*;
use httpmock::prelude::*;
use permanence::{
    load_home_calendar, ApiError, HttpApi, LoginForm, Registration, RequestId, RosterApi,
    Session,
};
use reqwest::Url;
use serde_json::json;

fn api_for(server: &MockServer) -> HttpApi {
    HttpApi::new(Url::parse(&server.base_url()).unwrap())
}

#[tokio::test]
async fn zone_members_are_fetched_with_bearer_and_encoded_zone() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path_matches(r"^/api/auth/user/zone/North-West(%20| )Lendelede$")
            .header("authorization", "Bearer tok")
            .header_exists("x-request-id");
        then.status(200).json_body(json!([
            { "_id": "u1", "name": "Kevin Selassie", "zone": "North-West Lendelede" },
            { "_id": "u2", "name": "John Michael Doe", "zone": "North-West Lendelede" }
        ]));
    });

    let api = api_for(&server).with_token("tok");
    let members = api.zone_members(ZONE).await.unwrap();

    mock.assert();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].id, uid("u1"));
    assert_eq!(members[1].name, "John Michael Doe");
}

#[tokio::test]
async fn user_duties_decode_wire_format() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/duties/u1");
        then.status(200).json_body(json!([{
            "_id": "d1",
            "assignedUser": "u1",
            "weekNumber": 10,
            "days": [
                { "date": "2025-03-06T00:00:00.000Z", "status": "guard" },
                { "date": "2025-03-07T00:00:00.000Z", "status": "vacation",
                  "assignedUser": "u1", "replacementUserId": "u2" }
            ]
        }]));
    });

    let duties = api_for(&server).user_duties(&uid("u1")).await.unwrap();

    mock.assert();
    assert_eq!(duties[0].week_number, 10);
    assert_eq!(duties[0].days[1].replacement_user_id, Some(uid("u2")));
    assert_eq!(duties[0].effective_assignee(&duties[0].days[1]), &uid("u2"));
}

#[tokio::test]
async fn accept_sends_accepting_user() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/dutyExchange/accept/r1")
            .json_body(json!({ "acceptingUser": "u2" }));
        then.status(200).json_body(json!({ "message": "ok" }));
    });

    api_for(&server)
        .with_token("tok")
        .accept_exchange(&RequestId::new("r1"), &uid("u2"))
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn unauthorized_status_is_classified() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path_matches(r"^/api/duties/zone/");
        then.status(401).body("invalid token");
    });

    let err = api_for(&server).zone_duties(ZONE).await.unwrap_err();
    assert!(err.is_auth(), "unexpected error: {err}");
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/dutyExchange");
        then.status(500).body("db down");
    });

    let payload = permanence::NewExchangeRequest {
        requesting_user: uid("u1"),
        accepting_user: None,
        status: permanence::ExchangeStatus::Pending,
        days: vec![],
        reason_of_exchange: permanence::ReasonCode::Others,
    };
    let err = api_for(&server).create_exchange(&payload).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/login")
            .json_body(json!({ "email": "kevin@example.com", "password": "secret" }));
        then.status(200).json_body(json!({
            "token": "jwt",
            "user": { "id": "u1", "name": "Kevin Selassie", "zone": "North-West Lendelede", "isAdmin": true }
        }));
    });

    let auth = api_for(&server)
        .login(&LoginForm::new("kevin@example.com", "secret"))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(auth.token, "jwt");
    let user = auth.user.unwrap();
    assert!(user.is_admin);
    assert_eq!(user.zone, ZONE);
}

#[tokio::test]
async fn login_field_errors_become_validation() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200).json_body(json!({
            "errors": { "email": "That email is not registered", "password": "" }
        }));
    });

    let err = api_for(&server)
        .login(&LoginForm::new("nobody@example.com", "x"))
        .await
        .unwrap_err();
    let ApiError::Validation(errors) = err else {
        panic!("expected validation error, got {err}");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["email"], "That email is not registered");
}

#[tokio::test]
async fn home_calendar_over_http() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path_matches(r"^/api/auth/user/zone/");
        then.status(200).json_body(json!([
            { "_id": "u1", "name": "Kevin Selassie", "zone": "North-West Lendelede" }
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path_matches(r"^/api/duties/zone/");
        then.status(200).json_body(json!([{
            "assignedUser": "u1",
            "weekNumber": 10,
            "days": [
                { "date": "2025-03-06", "status": "guard" },
                { "date": "bogus", "status": "guard" }
            ]
        }]));
    });
    server.mock(|when, then| {
        when.method(GET).path_matches(r"^/api/dutyExchange/.+/u1$");
        then.status(200).json_body(json!([{
            "_id": "r1",
            "requestingUser": "u1",
            "status": "pending",
            "Days": [{ "date": "2025-03-06", "reasonOfChange": "sick" }]
        }]));
    });

    let session: Session = session_for("u1", "Kevin Selassie");
    let api = session.api(&api_for(&server));
    let home = load_home_calendar(&api, &session).await.unwrap();

    let titles: Vec<_> = home.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Kevin Selassie", "Pending: Kev Sel"]);
}

fn registration() -> Registration {
    Registration {
        name: "Ann".into(),
        email: "ann@example.com".into(),
        password: "secret".into(),
        is_admin: false,
        zone: ZONE,
    }
}

#[tokio::test]
async fn register_accepts_success_envelope_without_user() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/register").json_body(json!({
            "name": "Ann",
            "email": "ann@example.com",
            "password": "secret",
            "isAdmin": false,
            "zone": "North-West Lendelede"
        }));
        then.status(201).json_body(json!({
            "success": true,
            "token": "jwt",
            "message": "User registered"
        }));
    });

    let auth = api_for(&server).register(&registration()).await.unwrap();

    mock.assert();
    assert_eq!(auth.token, "jwt");
    assert!(auth.user.is_none());
}

#[tokio::test]
async fn register_failure_carries_server_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/register");
        then.status(400).json_body(json!({
            "success": false,
            "message": "Email already exists"
        }));
    });

    let err = api_for(&server).register(&registration()).await.unwrap_err();
    let ApiError::Rejected(msg) = err else {
        panic!("expected rejection, got {err}");
    };
    assert_eq!(msg, "Email already exists");
}

#[tokio::test]
async fn days_without_usable_date_are_skipped_not_fatal() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path_matches(r"^/api/auth/user/zone/");
        then.status(200).json_body(json!([
            { "_id": "u1", "name": "Kevin Selassie", "zone": "North-West Lendelede" }
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path_matches(r"^/api/duties/zone/");
        then.status(200).json_body(json!([{
            "assignedUser": "u1",
            "weekNumber": 10,
            "days": [
                { "date": null, "status": "guard" },
                { "status": "guard" },
                { "date": 20250305, "status": "guard" },
                { "date": "2025-03-06", "status": "guard" }
            ]
        }]));
    });
    server.mock(|when, then| {
        when.method(GET).path_matches(r"^/api/dutyExchange/.+/u1$");
        then.status(200).json_body(json!([{
            "_id": "r1",
            "requestingUser": "u1",
            "status": "pending",
            "Days": [
                { "reasonOfChange": "sick" },
                { "date": null },
                { "date": "2025-03-07", "reasonOfChange": "sick" }
            ]
        }]));
    });

    let session = session_for("u1", "Kevin Selassie");
    let api = session.api(&api_for(&server));
    let home = load_home_calendar(&api, &session).await.unwrap();

    assert_eq!(home.duties[0].days.len(), 4);
    assert_eq!(home.duties[0].days[0].date, "");
    assert_eq!(home.requests[0].days.len(), 3);
    let titles: Vec<_> = home
        .events
        .iter()
        .map(|e| (e.start.to_string(), e.title.as_str()))
        .collect();
    assert_eq!(
        titles,
        vec![
            ("2025-03-06".to_string(), "Kevin Selassie"),
            ("2025-03-07".to_string(), "Pending: Kev Sel"),
        ]
    );
}
