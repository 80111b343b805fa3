//! Asset path validation against the theme layout the backend accepts.
//!
//! Three checks run in order and the first failure wins:
//! extension, root folder, then subfolder permission.

use crate::error::ApiError;

use log::debug;

pub const ALLOWED_EXTENSIONS: [&str; 15] = [
    // Fonts
    ".ttf", ".otf", ".eot", ".woff", ".woff2",
    // Images
    ".jpg", ".jpeg", ".gif", ".png", ".svg",
    // Styles
    ".css", ".scss",
    // Other
    ".html", ".js", ".json",
];

pub const ALLOWED_FOLDERS: [&str; 7] = ["configs", "css", "elements", "img", "js", "layouts", "pages"];

/// Root folders that may contain nested directories.
pub const SUBFOLDER_FOLDERS: [&str; 4] = ["css", "elements", "img", "js"];

const LIST_SEPARATOR: &str = ", ";

/// Check whether `path` may be written or deleted.
///
/// Expects a rooted asset path such as `/css/theme.css`.
///
/// # Errors
///
/// Returns an [`ApiError`] of kind `FileExtensionNotAllowed`,
/// `FolderNotAllowed` or `SubfolderNotAllowed`.
#[track_caller]
pub fn validate_asset_path(path: &str) -> Result<(), ApiError> {
    let (directory, file_name) = split_path(path);

    let extension = extension_of(file_name);
    if !ALLOWED_EXTENSIONS.contains(&extension) {
        debug!("Rejected asset path {path}: extension '{extension}' not allowed");
        return Err(ApiError::file_extension_not_allowed(
            &ALLOWED_EXTENSIONS.join(LIST_SEPARATOR),
        ));
    }

    let folders = folders_of(directory);
    let root_folder = folders.first().copied().unwrap_or_default();
    if !ALLOWED_FOLDERS.contains(&root_folder) {
        debug!("Rejected asset path {path}: folder '{root_folder}' not allowed");
        return Err(ApiError::folder_not_allowed(
            &ALLOWED_FOLDERS.join(LIST_SEPARATOR),
        ));
    }

    if folders.len() > 1 && !SUBFOLDER_FOLDERS.contains(&root_folder) {
        debug!("Rejected asset path {path}: '{root_folder}' does not allow subfolders");
        return Err(ApiError::subfolder_not_allowed(
            &SUBFOLDER_FOLDERS.join(LIST_SEPARATOR),
        ));
    }

    Ok(())
}

/// Split into (directory, file name). The directory keeps its leading separator.
pub(crate) fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(index) => (&path[..index], &path[index + 1..]),
        None => ("", path),
    }
}

/// Extension including the leading dot, or "" when there is none.
///
/// A dot in first position marks a hidden file, not an extension.
pub(crate) fn extension_of(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) if index > 0 => &file_name[index..],
        _ => "",
    }
}

/// Directory segments after stripping the single leading separator.
pub(crate) fn folders_of(directory: &str) -> Vec<&str> {
    let trimmed = directory.strip_prefix('/').unwrap_or(directory);
    trimmed.split('/').collect()
}
