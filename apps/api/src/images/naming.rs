use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

const FALLBACK_NAME: &str = "image";

/// Reduces a client-supplied filename to a safe ASCII name with no path parts.
/// Accented letters are decomposed first so `é` keeps its base `e`.
pub fn sanitize_filename(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Next name to try after `name` collided:
/// `cat.png` -> `cat-D.png` -> `cat-D-0.png` -> `cat-D-1.png` ...
pub fn next_candidate(name: &str, today: NaiveDate) -> String {
    let (stem, ext) = split_extension(name);
    let date = today.format("%Y-%m-%d").to_string();
    let marker = format!("{date}-");

    let counter = stem.rfind(&marker).and_then(|pos| {
        let digits = &stem[pos + marker.len()..];
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            digits.parse::<u64>().ok().map(|n| (pos + marker.len(), n))
        } else {
            None
        }
    });

    let new_stem = match counter {
        Some((prefix_len, n)) => format!("{}{}", &stem[..prefix_len], n + 1),
        None if stem.ends_with(&date) => format!("{stem}-0"),
        None => format!("{stem}-{date}"),
    };
    format!("{new_stem}{ext}")
}

/// Writes `bytes` into `folder` under the sanitized `original_name`, renaming
/// until a free name is found. Existing files are never overwritten.
/// Returns the stored filename.
pub async fn store_image(
    folder: &Path,
    original_name: &str,
    bytes: &[u8],
    today: NaiveDate,
) -> std::io::Result<String> {
    tokio::fs::create_dir_all(folder).await?;

    let mut name = sanitize_filename(original_name);
    loop {
        let path = folder.join(&name);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(mut file) => {
                file.write_all(bytes).await?;
                file.flush().await?;
                info!("Stored image {}", path.display());
                return Ok(name);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("Image name {name} is taken");
                name = next_candidate(&name, today);
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_sanitize_strips_paths_and_spaces() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("My Heart Scan.png"), "My_Heart_Scan.png");
        assert_eq!(sanitize_filename("C:\\tmp\\ecg (1).jpg"), "C_tmp_ecg_1.jpg");
    }

    #[test]
    fn test_sanitize_drops_non_ascii() {
        assert_eq!(sanitize_filename("héart.png"), "heart.png");
        assert_eq!(sanitize_filename("Ärzte ﬁle.png"), "Arzte_file.png");
        assert_eq!(sanitize_filename("日本.."), "image");
    }

    #[test]
    fn test_candidate_sequence() {
        let first = next_candidate("cat.png", day());
        assert_eq!(first, "cat-2024-03-09.png");
        let second = next_candidate(&first, day());
        assert_eq!(second, "cat-2024-03-09-0.png");
        let third = next_candidate(&second, day());
        assert_eq!(third, "cat-2024-03-09-1.png");
        assert_eq!(next_candidate("cat-2024-03-09-9.png", day()), "cat-2024-03-09-10.png");
    }

    #[test]
    fn test_candidate_without_extension() {
        assert_eq!(next_candidate("notes", day()), "notes-2024-03-09");
    }

    #[test]
    fn test_candidate_from_another_day() {
        assert_eq!(
            next_candidate("cat-2024-03-08-3.png", day()),
            "cat-2024-03-08-3-2024-03-09.png"
        );
    }

    #[tokio::test]
    async fn test_identical_uploads_get_distinct_names() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("images");

        let mut names = Vec::new();
        for i in 0..4u8 {
            names.push(store_image(&folder, "scan.png", &[i], day()).await.unwrap());
        }
        assert_eq!(
            names,
            vec![
                "scan.png",
                "scan-2024-03-09.png",
                "scan-2024-03-09-0.png",
                "scan-2024-03-09-1.png"
            ]
        );
        // Nothing was overwritten.
        for (i, name) in names.iter().enumerate() {
            assert_eq!(std::fs::read(folder.join(name)).unwrap(), vec![i as u8]);
        }
    }
}
