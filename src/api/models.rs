//! Wire types for the events API
//!
//! Field names follow the API's camelCase JSON.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How an event is attended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    #[default]
    Virtual,
    InPerson,
    Hybrid,
}

impl EventType {
    pub const ALL: [EventType; 3] = [EventType::Virtual, EventType::InPerson, EventType::Hybrid];

    /// Value sent over the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Virtual => "VIRTUAL",
            EventType::InPerson => "IN_PERSON",
            EventType::Hybrid => "HYBRID",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Virtual => "Virtual",
            EventType::InPerson => "In Person",
            EventType::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "VIRTUAL" => Ok(EventType::Virtual),
            "IN_PERSON" => Ok(EventType::InPerson),
            "HYBRID" => Ok(EventType::Hybrid),
            other => Err(format!(
                "Unknown event type: {}. Use: VIRTUAL, IN_PERSON, HYBRID",
                other
            )),
        }
    }
}

/// A participant entry as returned on event detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub user_id: String,
}

/// An event as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub capacity: Option<i64>,
    /// Only present on single-event responses
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl Event {
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.start_date)
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.end_date)
    }

    /// Participant ids in server order
    pub fn participant_ids(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.user_id.clone()).collect()
    }
}

/// Parse an API timestamp.
///
/// Accepts RFC 3339 as well as the zone-less `YYYY-MM-DDTHH:MM[:SS]` form
/// produced by datetime-local inputs, which is read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Event capacity as submitted by the create form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Count(i64),
    /// The form value had no leading integer
    NotANumber,
}

impl Capacity {
    /// Parse with `parseInt` semantics: leading whitespace, an optional sign,
    /// then as many decimal digits as are present. Anything else after the
    /// digits is ignored; no digits at all yields [`Capacity::NotANumber`].
    pub fn parse(input: &str) -> Self {
        let s = input.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits_len == 0 {
            return Capacity::NotANumber;
        }

        let digits = &rest[..digits_len];
        let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
        Capacity::Count(if negative { -magnitude } else { magnitude })
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Capacity::NotANumber)
    }
}

impl Serialize for Capacity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Capacity::Count(n) => serializer.serialize_i64(*n),
            // JSON has no NaN; serde_json writes a non-finite float as null.
            Capacity::NotANumber => serializer.serialize_f64(f64::NAN),
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Count(n) => write!(f, "{}", n),
            Capacity::NotANumber => f.write_str("NaN"),
        }
    }
}

/// Payload for `POST /events`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub capacity: Capacity,
}

/// Payload for `POST /events/:id/participants`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddParticipantsRequest {
    pub user_ids: Vec<String>,
}

/// Per-session engagement record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnalytics {
    pub id: String,
    pub name: String,
    pub interaction_count: u64,
    pub unique_participants: u64,
    pub average_sentiment: f64,
}

/// Analytics snapshot for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAnalytics {
    pub total_participants: u64,
    #[serde(default)]
    pub sessions: Vec<SessionAnalytics>,
    pub overall_engagement: f64,
}

/// Body for `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Successful authentication response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorMessage {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capacity_parse_int_semantics() {
        assert_eq!(Capacity::parse("120"), Capacity::Count(120));
        assert_eq!(Capacity::parse("  42"), Capacity::Count(42));
        assert_eq!(Capacity::parse("-3"), Capacity::Count(-3));
        assert_eq!(Capacity::parse("+8"), Capacity::Count(8));
        assert_eq!(Capacity::parse("12abc"), Capacity::Count(12));
        assert_eq!(Capacity::parse("1.9"), Capacity::Count(1));
    }

    #[test]
    fn test_capacity_not_a_number() {
        assert_eq!(Capacity::parse("abc"), Capacity::NotANumber);
        assert_eq!(Capacity::parse(""), Capacity::NotANumber);
        assert_eq!(Capacity::parse("-"), Capacity::NotANumber);
        assert_eq!(Capacity::parse("e5"), Capacity::NotANumber);
    }

    #[test]
    fn test_capacity_sentinel_serializes_as_null() {
        let payload = NewEvent {
            name: "Launch".to_string(),
            description: "Product launch".to_string(),
            start_date: "2024-05-01T10:00".to_string(),
            end_date: "2024-05-01T12:00".to_string(),
            event_type: EventType::Virtual,
            capacity: Capacity::parse("abc"),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["capacity"].is_null());
        assert_ne!(value["capacity"], json!(0));
        assert!(!value["capacity"].is_string());
    }

    #[test]
    fn test_new_event_wire_shape() {
        let payload = NewEvent {
            name: "Summit".to_string(),
            description: "Yearly summit".to_string(),
            start_date: "2024-06-01T09:00".to_string(),
            end_date: "2024-06-02T17:00".to_string(),
            event_type: EventType::InPerson,
            capacity: Capacity::Count(250),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Summit",
                "description": "Yearly summit",
                "startDate": "2024-06-01T09:00",
                "endDate": "2024-06-02T17:00",
                "type": "IN_PERSON",
                "capacity": 250
            })
        );
    }

    #[test]
    fn test_event_detail_deserialize() {
        let event: Event = serde_json::from_value(json!({
            "id": "evt-1",
            "name": "Summit",
            "description": "Yearly summit",
            "startDate": "2024-06-01T09:00:00.000Z",
            "endDate": "2024-06-02T17:00:00.000Z",
            "type": "HYBRID",
            "capacity": 250,
            "participants": [{ "userId": "u-1" }, { "userId": "u-2" }]
        }))
        .unwrap();

        assert_eq!(event.event_type, EventType::Hybrid);
        assert_eq!(event.participant_ids(), vec!["u-1", "u-2"]);
        assert_eq!(event.starts_at().unwrap().to_rfc3339(), "2024-06-01T09:00:00+00:00");
    }

    #[test]
    fn test_event_list_entry_without_participants() {
        let event: Event = serde_json::from_value(json!({
            "id": "evt-2",
            "name": "Webinar",
            "description": "",
            "startDate": "2024-07-01T09:00",
            "endDate": "2024-07-01T10:00",
            "type": "VIRTUAL",
            "capacity": 50
        }))
        .unwrap();

        assert!(event.participants.is_empty());
        assert!(event.ends_at().is_some());
    }

    #[test]
    fn test_event_type_from_str() {
        assert_eq!("in-person".parse::<EventType>().unwrap(), EventType::InPerson);
        assert_eq!("Hybrid".parse::<EventType>().unwrap(), EventType::Hybrid);
        assert!("conference".parse::<EventType>().is_err());
    }

    #[test]
    fn test_analytics_deserialize() {
        let analytics: EventAnalytics = serde_json::from_value(json!({
            "totalParticipants": 40,
            "overallEngagement": 0.8125,
            "sessions": [{
                "id": "s-1",
                "name": "Keynote",
                "interactionCount": 120,
                "uniqueParticipants": 35,
                "averageSentiment": 0.6
            }]
        }))
        .unwrap();

        assert_eq!(analytics.total_participants, 40);
        assert_eq!(analytics.sessions[0].interaction_count, 120);
    }
}
