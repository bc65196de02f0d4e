use chrono::NaiveDate;
use permanence::io::{export_events_csv, export_events_json};
use permanence::{CalendarEvent, EventColor, RequestId};
use tempfile::tempdir;

fn events() -> Vec<CalendarEvent> {
    let day = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();
    let mut pending = CalendarEvent::all_day("Pending: Kev Sel", day, EventColor::Red);
    pending.request_id = Some(RequestId::new("r1"));
    vec![
        CalendarEvent::all_day("Kevin Selassie", day, EventColor::Blue),
        pending,
    ]
}

#[test]
fn json_export_reads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.json");
    export_events_json(&path, &events()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[1]["backgroundColor"], "red");
    assert_eq!(value[1]["allDay"], true);
    assert_eq!(value[1]["requestId"], "r1");
    assert!(value[0].get("requestId").is_none());

    let back: Vec<CalendarEvent> = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, events());
}

#[test]
fn csv_export_has_header_and_one_row_per_event() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.csv");
    export_events_csv(&path, &events()).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, ["date", "title", "color", "request_id"]);

    let rows: Vec<Vec<String>> = rdr
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["2025-03-06", "Kevin Selassie", "blue", ""],
            vec!["2025-03-06", "Pending: Kev Sel", "red", "r1"],
        ]
    );
}

#[test]
fn export_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope").join("events.json");
    assert!(export_events_json(&path, &events()).is_err());
}
