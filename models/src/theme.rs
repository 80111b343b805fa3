use serde::{Deserialize, Serialize};

/// One entry of the store's theme list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSummary {
    #[serde(deserialize_with = "crate::de::string_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeList {
    #[serde(default)]
    pub themes: Vec<ThemeSummary>,
}

/// Theme returned by the create operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTheme {
    #[serde(deserialize_with = "crate::de::u64_from_string_or_number")]
    pub theme_id: u64,
    pub name: String,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub published: bool,
}
