use serde::Serialize;

/// One activity record in the shape the insights endpoint accepts.
#[derive(Debug, Clone, Serialize)]
pub struct SampleActivity {
    pub id: i64,
    pub name: String,
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub elapsed_time: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for SampleActivity {
    fn default() -> Self {
        Self {
            id: 1,
            name: "Test Run".to_string(),
            distance: 5000.0,
            elapsed_time: 1800.0,
            kind: "Run".to_string(),
        }
    }
}

/// The minimal payload sent to the protected endpoint: a one-element array.
pub fn sample_payload() -> serde_json::Value {
    serde_json::json!([SampleActivity::default()])
}
