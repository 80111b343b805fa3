use serde::{Deserialize, Serialize};

/// Outcome of the configuration check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationStatus {
    #[serde(default)]
    pub authentication: bool,
    #[serde(
        default,
        deserialize_with = "crate::de::optional_u64_from_string_or_number"
    )]
    pub theme_id: Option<u64>,
    #[serde(default)]
    pub preview: Option<String>,
}
