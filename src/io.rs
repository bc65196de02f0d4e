use crate::calendar::CalendarEvent;
use anyhow::Context;
use csv::WriterBuilder;
use std::fs;
use std::path::Path;

/// Export JSON des événements (format attendu par un widget calendrier)
pub fn export_events_json<P: AsRef<Path>>(path: P, events: &[CalendarEvent]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let s = serde_json::to_string_pretty(events)?;
    fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Export CSV des événements: header `date,title,color,request_id`
pub fn export_events_csv<P: AsRef<Path>>(path: P, events: &[CalendarEvent]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "title", "color", "request_id"])?;
    for e in events {
        let date = e.start.format("%Y-%m-%d").to_string();
        let request = e.request_id.as_ref().map(|r| r.as_str()).unwrap_or("");
        w.write_record([
            date.as_str(),
            e.title.as_str(),
            e.background_color.as_css(),
            request,
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Rendu texte compact, une ligne par événement, trié par date.
pub fn render_events(events: &[CalendarEvent]) -> String {
    let mut sorted: Vec<&CalendarEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.start);
    sorted
        .iter()
        .map(|e| format!("{} | {:<6} | {}", e.start, e.background_color.as_css(), e.title))
        .collect::<Vec<_>>()
        .join("\n")
}
