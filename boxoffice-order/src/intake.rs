use boxoffice_core::{parse_layout, parse_row, Theater};
use tracing::debug;
use crate::models::{OrderError, ReservationRequest};

/// Everything a request file describes
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub theater: Theater,
    pub requests: Vec<ReservationRequest>,
}

/// Parse a `<name...> <seats>` request line. The name is every token but the
/// last, joined by single spaces.
pub fn parse_request_line(line: &str) -> Result<ReservationRequest, OrderError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let (seats, name) = tokens
        .split_last()
        .ok_or_else(|| OrderError::MalformedLine(line.to_string()))?;

    let seats = seats
        .parse::<i64>()
        .map_err(|_| OrderError::MalformedLine(line.to_string()))?;

    ReservationRequest::new(name.join(" "), seats)
}

/// Split a request file into its theater and its requests.
///
/// Numeric lines are layout rows, a line whose first word is `event` (any
/// case) names the event, and every other non-blank line is a request.
/// Requests that do not parse are dropped.
pub fn parse_request_file(text: &str) -> BatchInput {
    let mut event = String::new();
    let mut layout = Vec::new();
    let mut requests = Vec::new();

    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };

        if parse_row(line).is_some() {
            layout.push(line);
        } else if first.eq_ignore_ascii_case("event") {
            event = tokens.collect::<Vec<_>>().join(" ");
        } else {
            match parse_request_line(line) {
                Ok(request) => requests.push(request),
                Err(e) => debug!(line, "Dropping request line: {}", e),
            }
        }
    }

    let theater = parse_layout(&layout.join("\n")).with_event(event);

    BatchInput { theater, requests }
}
