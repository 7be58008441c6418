use serde::{Deserialize, Serialize};

// === Traffic listing ===

#[derive(Debug, Deserialize)]
pub struct TrafficQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrafficRecord {
    pub location: String,
    pub traffic_volume: u32,
}

impl TrafficRecord {
    pub fn new(location: &str, traffic_volume: u32) -> Self {
        Self { location: location.to_string(), traffic_volume }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrafficResponse {
    pub page: i64,
    pub limit: i64,
    pub data: Vec<TrafficRecord>,
}

// === Errors ===

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
