use crate::error::{HealthAdviceError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 5;

/// A symptom entry as stored in `health_logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthLog {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub log_date: NaiveDate,
    pub symptom: String,
    pub severity: u8,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Row ids may be integers or UUIDs depending on how the table was created.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid health log id: {}", other))),
    }
}

pub fn severity_label(severity: u8) -> &'static str {
    match severity {
        0 | 1 => "Mild",
        2 => "Light",
        3 => "Moderate",
        4 => "Strong",
        _ => "Severe",
    }
}

impl HealthLog {
    pub fn severity_label(&self) -> &'static str {
        severity_label(self.severity)
    }
}

/// Insert payload for a new entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewHealthLog {
    pub user_id: String,
    pub log_date: NaiveDate,
    pub symptom: String,
    pub severity: u8,
    pub notes: String,
}

impl NewHealthLog {
    pub fn new(
        user_id: impl Into<String>,
        log_date: NaiveDate,
        symptom: &str,
        severity: u8,
        notes: Option<&str>,
    ) -> Result<Self> {
        let symptom = symptom.trim();
        if symptom.is_empty() {
            return Err(HealthAdviceError::InvalidData("Symptom is required".into()));
        }
        if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&severity) {
            return Err(HealthAdviceError::InvalidData(format!(
                "Severity must be between {} and {}, got {}",
                MIN_SEVERITY, MAX_SEVERITY, severity
            )));
        }

        Ok(Self {
            user_id: user_id.into(),
            log_date,
            symptom: symptom.to_string(),
            severity,
            notes: notes.map(str::trim).unwrap_or_default().to_string(),
        })
    }
}
