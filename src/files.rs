//! Reading SVG input files and writing generated components.

use std::fs;
use std::path::Path;

use crate::error::Svg2TsxError;

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Read an `.svg` file. Other extensions are refused without touching the disk.
pub fn read_svg_file(path: &Path) -> Result<String, Svg2TsxError> {
    if !has_extension(path, "svg") {
        return Err(Svg2TsxError::NotSvgFile(path.to_path_buf()));
    }
    if !path.exists() {
        return Err(Svg2TsxError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|e| Svg2TsxError::Io(path.to_path_buf(), e))
}

/// Write generated source to a `.tsx` file.
pub fn save_tsx_file(path: &Path, content: &str) -> Result<(), Svg2TsxError> {
    if !has_extension(path, "tsx") {
        return Err(Svg2TsxError::NotTsxFile(path.to_path_buf()));
    }
    fs::write(path, content).map_err(|e| Svg2TsxError::Io(path.to_path_buf(), e))
}

/// Derive a component name from a file name: `arrow-left.svg` -> `ArrowLeft`.
///
/// Returns `None` when no letters or digits remain.
pub fn component_name_from_path(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let stem = match file_name.len().checked_sub(4) {
        Some(split)
            if file_name.is_char_boundary(split)
                && file_name[split..].eq_ignore_ascii_case(".svg") =>
        {
            &file_name[..split]
        }
        _ => file_name,
    };

    let mut name = String::new();
    for word in stem.split(|c: char| !c.is_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }

    if name.is_empty() {
        return None;
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    Some(name)
}
