//! Plain-text rendering of an itinerary for terminal output.

use std::fmt::Write;

use crate::types::{Activity, DayEntry, Itinerary, Price, StructuredDay};

/// Render `itinerary` as human-readable text, one section per day.
pub fn render_text(itinerary: &Itinerary) -> String {
    let mut out = format!("Your {} Adventure\n", itinerary.destination);

    for (index, day) in itinerary.plan.iter().enumerate() {
        out.push('\n');
        out.push_str(&day.title(index));
        out.push('\n');

        match day {
            DayEntry::Structured(structured) => render_structured_day(&mut out, structured),
            DayEntry::Plain(text) => {
                out.push_str("  ");
                out.push_str(text);
                out.push('\n');
            }
            DayEntry::Other(value) => {
                let _ = writeln!(out, "  {}", value);
            }
        }
    }

    out
}

fn render_structured_day(out: &mut String, day: &StructuredDay) {
    if let Some(summary) = day.summary() {
        let _ = writeln!(out, "  {}", summary);
    }
    if let Some(cost) = day.estimated_cost() {
        let _ = writeln!(out, "  Estimated cost: ${:.0}", cost);
    }

    if day.has_activities() {
        for activity in day.activities() {
            render_activity(out, &activity);
        }
    } else if let Some(details) = day.details() {
        let _ = writeln!(out, "  {}", details);
    }
}

fn render_activity(out: &mut String, activity: &Activity<'_>) {
    let mut line = String::from("  -");
    if let Some(time) = activity.time() {
        let _ = write!(line, " [{}]", time);
    }
    let _ = write!(line, " {}", activity.display_name());
    if let Some(location) = activity.location() {
        let _ = write!(line, " @ {}", location);
    }
    // Only a numeric zero is hidden; a text "0" is still shown.
    if let Some(price) = activity.price().filter(|price| *price != Price::Number(0.0)) {
        let _ = write!(line, " (${})", price);
    }
    out.push_str(&line);
    out.push('\n');

    if let Some(description) = activity.description() {
        let _ = writeln!(out, "      {}", description);
    }
}
