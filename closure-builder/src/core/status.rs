//! Stage identifier and status enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three stages of a closure build, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    /// Ahead-of-time compilation of the application (`ngc`).
    AotCompile,
    /// Rewrite and transpile of the bootstrap entry module.
    EntryRewrite,
    /// Whole-program optimization (`closure`).
    Optimize,
}

impl StageId {
    /// The fixed order in which stages run.
    pub const ORDER: [Self; 3] = [Self::AotCompile, Self::EntryRewrite, Self::Optimize];

    /// Returns the short name used in logs and events.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AotCompile => "ngc",
            Self::EntryRewrite => "compile-main",
            Self::Optimize => "closure",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The execution status of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Stage is currently running.
    Running,
    /// Stage completed successfully.
    Ok,
    /// Stage failed.
    Fail,
    /// Stage was cancelled.
    Cancel,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Ok => write!(f, "ok"),
            Self::Fail => write!(f, "fail"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert_eq!(
            StageId::ORDER,
            [StageId::AotCompile, StageId::EntryRewrite, StageId::Optimize]
        );
    }

    #[test]
    fn test_stage_id_display() {
        assert_eq!(StageId::AotCompile.to_string(), "ngc");
        assert_eq!(StageId::EntryRewrite.to_string(), "compile-main");
        assert_eq!(StageId::Optimize.to_string(), "closure");
    }

    #[test]
    fn test_stage_status_serialize() {
        let json = serde_json::to_string(&StageStatus::Cancel).unwrap();
        assert_eq!(json, r#""cancel""#);

        let deserialized: StageStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, StageStatus::Cancel);
    }
}
