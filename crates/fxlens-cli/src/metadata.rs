use std::fmt::{Display, Formatter};

use fxlens_core::UtcDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request identifier (UUID v4) printed with every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Response metadata. Field order is fixed so JSON output is stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub request_id: RequestId,
    pub command: &'static str,
    pub generated_at: UtcDateTime,
    pub latency_ms: u64,
    pub offline: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Metadata {
    pub fn new(command: &'static str, latency_ms: u64, offline: bool) -> Self {
        Self {
            request_id: RequestId::new_v4(),
            command,
            generated_at: UtcDateTime::now(),
            latency_ms,
            offline,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// Everything a command prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub meta: Metadata,
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_is_uuid_v4() {
        let request_id = RequestId::new_v4();
        assert_eq!(request_id.0.get_version_num(), 4);
    }

    #[test]
    fn warnings_are_omitted_when_empty() {
        let mut metadata = Metadata::new("rate", 12, true);
        let json = serde_json::to_string(&metadata).expect("serializes");
        assert!(!json.contains("warnings"));
        assert!(json.contains("\"latency_ms\":12"));

        metadata.push_warning("stored nothing");
        let json = serde_json::to_string(&metadata).expect("serializes");
        assert!(json.contains("stored nothing"));
    }
}
