use tracing::debug;

use crate::{
    services::{
        fence::strip_code_fence, line_grouper::group_lines_by_day, parser::parse_structured,
        schema_normalizer::normalize_structured,
    },
    types::{Itinerary, NormalizedResponse, RawForm},
};

/// Turn a raw model completion into a canonical itinerary.
///
/// Never fails: text that is not valid JSON after fence stripping is grouped
/// line by line instead, with `request_destination` as the destination.
pub fn normalize_response(raw_text: &str, request_destination: &str) -> NormalizedResponse {
    let text = strip_code_fence(raw_text);

    match parse_structured(text) {
        Ok(parsed) => {
            let itinerary = normalize_structured(&parsed, request_destination);
            debug!(
                target: "trip_planner::normalize",
                days = itinerary.day_count(),
                destination = %itinerary.destination,
                "normalized structured completion"
            );
            NormalizedResponse {
                itinerary,
                raw: RawForm::Structured(parsed),
            }
        }
        Err(err) => {
            debug!(
                target: "trip_planner::normalize",
                error = %err,
                "completion is not valid JSON, grouping lines by day"
            );
            NormalizedResponse {
                itinerary: Itinerary::new(request_destination, group_lines_by_day(text)),
                raw: RawForm::Text(text.to_string()),
            }
        }
    }
}
