//! Wire types
//!
//! Field names follow the API's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Event types offered by the create form: (wire value, label)
pub const EVENT_TYPES: [(&str, &str); 3] = [
    ("VIRTUAL", "Virtual"),
    ("IN_PERSON", "In Person"),
    ("HYBRID", "Hybrid"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl Event {
    pub fn type_label(&self) -> &str {
        EVENT_TYPES
            .iter()
            .find(|(value, _)| *value == self.event_type)
            .map(|(_, label)| *label)
            .unwrap_or(self.event_type.as_str())
    }
}

/// Body for `POST /events`. A capacity of `None` is sent as `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub capacity: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnalytics {
    pub id: String,
    pub name: String,
    pub interaction_count: u64,
    pub unique_participants: u64,
    pub average_sentiment: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAnalytics {
    pub total_participants: u64,
    #[serde(default)]
    pub sessions: Vec<SessionAnalytics>,
    pub overall_engagement: f64,
}

/// `parseInt` on form text: leading whitespace, optional sign, leading
/// digits. `None` when there are no digits.
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (sign, rest) = match s.chars().next() {
        Some('-') => (-1, &s[1..]),
        Some('+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    Some(sign * digits.parse::<i64>().unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("150"), Some(150));
        assert_eq!(parse_int(" -4x"), Some(-4));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_new_event_nan_capacity_is_null() {
        let event = NewEvent {
            name: "Launch".to_string(),
            description: "d".to_string(),
            start_date: "2024-06-01T09:00".to_string(),
            end_date: "2024-06-01T10:00".to_string(),
            event_type: "VIRTUAL".to_string(),
            capacity: parse_int("abc"),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json["capacity"].is_null());
        assert_eq!(json["type"], "VIRTUAL");
        assert_eq!(json["startDate"], "2024-06-01T09:00");
    }

    #[test]
    fn test_event_detail_parses_participants() {
        let json = r#"{"id":"e1","name":"Launch","startDate":"a","endDate":"b",
            "type":"IN_PERSON","participants":[{"userId":"u1"}]}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.participants[0].user_id, "u1");
        assert_eq!(event.type_label(), "In Person");
    }
}
