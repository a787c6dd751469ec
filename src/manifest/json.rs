//! JSON array manifests (`["a.gif", "b.webp"]`).

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::{Manifest, ManifestError};

/// Parse a JSON array of filenames. Entries are kept as given, unfiltered.
pub fn parse_json(text: &str) -> Result<Manifest, ManifestError> {
    let entries: Vec<String> =
        serde_json::from_str(text).map_err(|e| ManifestError::Json(e.to_string()))?;
    Ok(Manifest {
        entries,
        warnings: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_of_strings() {
        let m = parse_json(r#"["photo-2024-01-01.gif", "photo-2024-03-05.webp"]"#).unwrap();
        assert_eq!(m.entries, ["photo-2024-01-01.gif", "photo-2024-03-05.webp"]);
        assert!(m.warnings.is_empty());
    }

    #[test]
    fn empty_array_is_empty_manifest() {
        assert!(parse_json("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_arrays() {
        assert!(matches!(parse_json(r#"{"a": 1}"#), Err(ManifestError::Json(_))));
        assert!(matches!(parse_json("[1, 2]"), Err(ManifestError::Json(_))));
        assert!(matches!(parse_json(""), Err(ManifestError::Json(_))));
    }
}
