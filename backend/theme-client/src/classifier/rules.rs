use crate::error::ApiErrorKind;

const MISSING_THEME_MARKER: &str = "undefined method `id'";
const MISSING_UPLOAD_MARKER: &str = "undefined local variable or method `upfile_updated'";

const INVALID_PARAMS_CODE: &str = "00101";
const RESOURCE_NOT_FOUND_CODE: &str = "00102";
const INVALID_LAYOUT_CODE: &str = "00301";

/// Operation-specific rule, evaluated after the authentication check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rule {
    /// Body has an `authentication` field.
    AuthenticationField,
    /// Body message contains the marker: the operation succeeded.
    ReclassifyAsSuccess(&'static str),
    /// Body code equals the given code.
    BodyCode(&'static str, ApiErrorKind),
}

const CHECK_CONFIGURATION_RULES: &[Rule] = &[Rule::AuthenticationField];

const CREATE_THEME_RULES: &[Rule] = &[Rule::BodyCode(
    INVALID_PARAMS_CODE,
    ApiErrorKind::InvalidOrNotSentParams,
)];

const DELETE_THEME_RULES: &[Rule] = &[
    Rule::ReclassifyAsSuccess(MISSING_THEME_MARKER),
    Rule::BodyCode(INVALID_LAYOUT_CODE, ApiErrorKind::InvalidLayout),
];

const GET_ASSET_RULES: &[Rule] = &[
    Rule::BodyCode(INVALID_PARAMS_CODE, ApiErrorKind::InvalidOrNotSentParams),
    Rule::BodyCode(RESOURCE_NOT_FOUND_CODE, ApiErrorKind::ResourceNotFound),
];

const SEND_ASSET_RULES: &[Rule] = &[Rule::BodyCode(
    INVALID_PARAMS_CODE,
    ApiErrorKind::InvalidOrNotSentParams,
)];

const DELETE_ASSET_RULES: &[Rule] = &[
    Rule::ReclassifyAsSuccess(MISSING_UPLOAD_MARKER),
    Rule::BodyCode(INVALID_PARAMS_CODE, ApiErrorKind::InvalidOrNotSentParams),
    Rule::BodyCode(RESOURCE_NOT_FOUND_CODE, ApiErrorKind::ResourceNotFound),
];

/// Remote operations exposed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CheckConfiguration,
    ListThemes,
    CreateTheme,
    DeleteTheme,
    CleanCache,
    ListAssets,
    GetAsset,
    SendAsset,
    DeleteAsset,
}

impl Operation {
    pub const fn name(&self) -> &'static str {
        match self {
            Operation::CheckConfiguration => "check_configuration",
            Operation::ListThemes => "list_themes",
            Operation::CreateTheme => "create_theme",
            Operation::DeleteTheme => "delete_theme",
            Operation::CleanCache => "clean_cache",
            Operation::ListAssets => "list_assets",
            Operation::GetAsset => "get_asset",
            Operation::SendAsset => "send_asset",
            Operation::DeleteAsset => "delete_asset",
        }
    }

    pub(crate) const fn rules(&self) -> &'static [Rule] {
        match self {
            Operation::CheckConfiguration => CHECK_CONFIGURATION_RULES,
            Operation::CreateTheme => CREATE_THEME_RULES,
            Operation::DeleteTheme => DELETE_THEME_RULES,
            Operation::GetAsset => GET_ASSET_RULES,
            Operation::SendAsset => SEND_ASSET_RULES,
            Operation::DeleteAsset => DELETE_ASSET_RULES,
            Operation::ListThemes | Operation::CleanCache | Operation::ListAssets => &[],
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
