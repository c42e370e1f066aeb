//! Run identity for tracking pipeline executions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one pipeline run.
///
/// Runs for different build targets share no state; the identity is what
/// tells their log lines and events apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunIdentity {
    /// The unique ID for this run.
    pub run_id: Uuid,
    /// The project being built.
    pub project: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
}

impl RunIdentity {
    /// Creates a new run identity with a generated run ID.
    #[must_use]
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            project: project.into(),
            started_at: Utc::now(),
        }
    }

    /// Returns the run ID as a string.
    #[must_use]
    pub fn run_id_str(&self) -> String {
        self.run_id.to_string()
    }

    /// Returns milliseconds elapsed since the run started.
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }

    /// Adds the identity fields to an event payload.
    ///
    /// Non-object payloads are wrapped under a `data` key.
    #[must_use]
    pub fn enrich(&self, data: Option<serde_json::Value>) -> serde_json::Value {
        let mut enriched = match data {
            Some(serde_json::Value::Object(map)) => map,
            Some(other) => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
            None => serde_json::Map::new(),
        };
        enriched.insert("run_id".to_string(), serde_json::json!(self.run_id_str()));
        enriched.insert("project".to_string(), serde_json::json!(&self.project));
        serde_json::Value::Object(enriched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_identity_new() {
        let a = RunIdentity::new("app");
        let b = RunIdentity::new("app");
        assert_eq!(a.project, "app");
        assert_ne!(a.run_id, b.run_id);
        assert!(a.elapsed_ms() >= 0);
    }

    #[test]
    fn test_enrich_object_payload() {
        let identity = RunIdentity::new("shop");
        let enriched = identity.enrich(Some(serde_json::json!({"stage": "ngc"})));

        assert_eq!(enriched["stage"], "ngc");
        assert_eq!(enriched["project"], "shop");
        assert_eq!(enriched["run_id"], identity.run_id_str());
    }

    #[test]
    fn test_enrich_wraps_scalar_payload() {
        let identity = RunIdentity::new("app");
        let enriched = identity.enrich(Some(serde_json::json!(3)));
        assert_eq!(enriched["data"], 3);

        let empty = identity.enrich(None);
        assert!(empty.get("run_id").is_some());
    }

    #[test]
    fn test_run_identity_serialization() {
        let identity = RunIdentity::new("app");
        let json = serde_json::to_string(&identity).unwrap();
        let deserialized: RunIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(identity, deserialized);
    }
}
