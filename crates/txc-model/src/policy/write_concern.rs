use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

const WIRE_PREFIX: &str = "WRITE_CONCERN_";

/// Acknowledgement level the backend requests for an executor's writes.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WriteConcernLevel {
    /// At least one replica acknowledges the write.
    #[default]
    ReplicaAcknowledged,
    /// A majority of replicas acknowledge the write.
    Majority,
    /// Fire and forget.
    Unacknowledged,
    /// The write must reach the journal.
    Journaled,
}

impl WriteConcernLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            WriteConcernLevel::ReplicaAcknowledged => "replica_acknowledged",
            WriteConcernLevel::Majority => "majority",
            WriteConcernLevel::Unacknowledged => "unacknowledged",
            WriteConcernLevel::Journaled => "journaled",
        }
    }

    pub const fn wire_name(&self) -> &'static str {
        match self {
            WriteConcernLevel::ReplicaAcknowledged => "WRITE_CONCERN_REPLICA_ACKNOWLEDGED",
            WriteConcernLevel::Majority => "WRITE_CONCERN_MAJORITY",
            WriteConcernLevel::Unacknowledged => "WRITE_CONCERN_UNACKNOWLEDGED",
            WriteConcernLevel::Journaled => "WRITE_CONCERN_JOURNALED",
        }
    }
}

impl FromStr for WriteConcernLevel {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        let norm = s.trim().to_ascii_uppercase();
        let short = norm.strip_prefix(WIRE_PREFIX).unwrap_or(&norm);

        match short {
            "REPLICA_ACKNOWLEDGED" | "REPLICA" => Ok(WriteConcernLevel::ReplicaAcknowledged),
            "MAJORITY" => Ok(WriteConcernLevel::Majority),
            "UNACKNOWLEDGED" => Ok(WriteConcernLevel::Unacknowledged),
            "JOURNALED" => Ok(WriteConcernLevel::Journaled),
            _ => Err(ModelError::UnknownWriteConcern(s.to_string())),
        }
    }
}

impl fmt::Display for WriteConcernLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WriteConcernLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for WriteConcernLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WriteConcern {
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub level: WriteConcernLevel,
}

impl From<WriteConcernLevel> for WriteConcern {
    fn from(level: WriteConcernLevel) -> Self {
        Self { level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_wire_short_and_alias_names() {
        assert_eq!(
            "WRITE_CONCERN_MAJORITY".parse::<WriteConcernLevel>().unwrap(),
            WriteConcernLevel::Majority
        );
        assert_eq!(
            "journaled".parse::<WriteConcernLevel>().unwrap(),
            WriteConcernLevel::Journaled
        );
        assert_eq!(
            "replica".parse::<WriteConcernLevel>().unwrap(),
            WriteConcernLevel::ReplicaAcknowledged
        );
    }

    #[test]
    fn rejects_unknown_level() {
        let err = "quorum".parse::<WriteConcernLevel>().unwrap_err();
        assert!(matches!(err, ModelError::UnknownWriteConcern(s) if s == "quorum"));
    }

    #[test]
    fn wire_shape() {
        let wc = WriteConcern::from(WriteConcernLevel::Unacknowledged);
        let json = serde_json::to_string(&wc).unwrap();
        assert_eq!(json, r#"{"level":"WRITE_CONCERN_UNACKNOWLEDGED"}"#);

        let back: WriteConcern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wc);
    }
}
