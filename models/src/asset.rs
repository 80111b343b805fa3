use serde::{Deserialize, Serialize};

/// Asset metadata as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeAsset {
    #[serde(deserialize_with = "crate::de::u64_from_string_or_number")]
    pub id: u64,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default, alias = "dynamic_file")]
    pub dynamic: bool,
    #[serde(
        default,
        deserialize_with = "crate::de::optional_u64_from_string_or_number"
    )]
    pub directory_id: Option<u64>,
    #[serde(
        default,
        deserialize_with = "crate::de::optional_u64_from_string_or_number"
    )]
    pub theme_id: Option<u64>,
    #[serde(
        default,
        deserialize_with = "crate::de::optional_u64_from_string_or_number"
    )]
    pub seller_id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetList {
    #[serde(default)]
    pub assets: Vec<ThemeAsset>,
    #[serde(default)]
    pub quantity: u64,
}

/// A single asset's decoded content.
///
/// `binary` comes from sniffing the decoded bytes and is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetContent {
    pub key: String,
    pub dynamic: bool,
    pub binary: bool,
    pub content: Vec<u8>,
    pub public_url: Option<String>,
}
