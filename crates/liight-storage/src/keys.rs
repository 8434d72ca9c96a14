//! Upload key generation.
//!
//! Key format: `<unix millis>-<16 random bytes as hex><lower-cased extension>`.
//! The original filename contributes only its extension.

const MAX_EXTENSION_LEN: usize = 16;

/// Lower-cased extension of `filename` including the dot, or an empty string.
///
/// A leading dot alone (`.pdf`) is a hidden file name, not an extension.
/// Extensions with anything but ASCII alphanumerics are dropped.
pub fn extension_of(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    match base.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => {
            let ext = &base[idx + 1..];
            if ext.is_empty()
                || ext.len() > MAX_EXTENSION_LEN
                || !ext.chars().all(|c| c.is_ascii_alphanumeric())
            {
                String::new()
            } else {
                format!(".{}", ext.to_ascii_lowercase())
            }
        }
    }
}

/// Collision-resistant storage key for an upload.
pub fn generate_upload_key(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random: [u8; 16] = rand::random();
    format!("{}-{}{}", millis, hex::encode(random), extension_of(original_name))
}

/// Whether `key` is a flat name that cannot escape the storage root.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.contains("..")
        && !key.contains('/')
        && !key.contains('\\')
        && !key.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lower_cased() {
        assert_eq!(extension_of("Proposal.PDF"), ".pdf");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("noext"), "");
        assert_eq!(extension_of(".pdf"), "");
        assert_eq!(extension_of("trailing."), "");
        assert_eq!(extension_of("dir/evil.p/df"), "");
        assert_eq!(extension_of("weird.p df"), "");
    }

    #[test]
    fn generated_key_shape() {
        let key = generate_upload_key("Brief.Pdf");
        let (millis, rest) = key.split_once('-').expect("dash");
        assert!(millis.parse::<i64>().is_ok());
        assert!(rest.ends_with(".pdf"));
        let hex_part = rest.trim_end_matches(".pdf");
        assert_eq!(hex_part.len(), 32);
        assert!(hex_part.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(is_valid_key(&key));
    }

    #[test]
    fn keys_do_not_collide() {
        let a = generate_upload_key("a.pdf");
        let b = generate_upload_key("a.pdf");
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_traversal_keys() {
        assert!(!is_valid_key("../etc/passwd"));
        assert!(!is_valid_key("a/b.pdf"));
        assert!(!is_valid_key(""));
        assert!(is_valid_key("1700000000000-abc.pdf"));
    }
}
