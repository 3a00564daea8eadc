use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_SUFFIX: &str = "_sustainable";

/// `dir/app.py` -> `dir/app_sustainable.py`; files without an extension just
/// get the suffix.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();

    let mut file_name = stem;
    file_name.push(DEFAULT_SUFFIX);
    if let Some(extension) = input.extension() {
        file_name.push(".");
        file_name.push(extension);
    }

    input.with_file_name(file_name)
}
