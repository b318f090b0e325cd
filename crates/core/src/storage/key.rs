//! Object key generation.

use chrono::{DateTime, Local};
use uuid::Uuid;

/// Length of the random part of a generated name.
const RANDOM_LEN: usize = 8;

/// Generate a collision-resistant object name for an uploaded file.
///
/// Format: `YYYYMMDD_HHMMSS_<8 hex>.<ext>`, where `ext` is whatever follows the
/// last `.` of `original_name`. Names without an extension get no dot.
/// Uniqueness is probabilistic; nothing checks the bucket.
#[must_use]
pub fn generate_unique_key(original_name: &str) -> String {
    unique_key_at(original_name, Local::now())
}

fn unique_key_at(original_name: &str, now: DateTime<Local>) -> String {
    let timestamp = now.format("%Y%m%d_%H%M%S");
    let mut random = Uuid::new_v4().simple().to_string();
    random.truncate(RANDOM_LEN);

    match extension(original_name) {
        Some(ext) => format!("{timestamp}_{random}.{ext}"),
        None => format!("{timestamp}_{random}"),
    }
}

fn extension(name: &str) -> Option<&str> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("photo.png", Some("png"))]
    #[case("archive.tar.gz", Some("gz"))]
    #[case("README", None)]
    #[case("trailing.", None)]
    #[case(".env", Some("env"))]
    fn test_extension(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(extension(name), expected);
    }

    #[test]
    fn test_key_format() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let key = unique_key_at("photo.png", now);

        assert!(key.starts_with("20240309_140507_"), "{key}");
        assert!(key.ends_with(".png"));
        let random = &key["20240309_140507_".len()..key.len() - ".png".len()];
        assert_eq!(random.len(), 8);
        assert!(random.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_key_without_extension() {
        let key = generate_unique_key("Makefile");
        assert!(!key.contains('.'));
        assert_eq!(key.len(), "YYYYMMDD_HHMMSS_".len() + 8);
    }

    #[test]
    fn test_generated_keys_differ() {
        assert_ne!(generate_unique_key("a.jpg"), generate_unique_key("a.jpg"));
    }

    proptest! {
        #[test]
        fn prop_keeps_extension_and_never_echoes_input(
            stem in "[a-zA-Z0-9_-]{1,30}",
            ext in "[a-z0-9]{1,5}",
        ) {
            let name = format!("{stem}.{ext}");
            let key = generate_unique_key(&name);

            let expected_suffix = format!(".{ext}");
            prop_assert!(key.ends_with(&expected_suffix));
            prop_assert_ne!(key, name);
        }
    }
}
