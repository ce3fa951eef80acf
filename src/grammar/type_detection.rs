use std::path::Path;

/// Derives the language identifier used to look up a grammar for `path`:
/// its extension when it has one, or its full file name otherwise (which
/// covers files like `Makefile`).
pub fn language_for_path(path: &Path) -> Option<&str> {
    match path.extension() {
        Some(extension) => extension.to_str(),
        None => path.file_name().and_then(|name| name.to_str()),
    }
}
