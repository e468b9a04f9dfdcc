use lazy_static::lazy_static;
use regex::Regex;

use crate::models::case::CaseRecord;

lazy_static! {
    // Match markdown images: ![alt](url)
    static ref MD_IMAGE_REGEX: Regex = Regex::new(r"!\[[^\]]*\]\(([^)\s]+)(?:\s+[^)]*)?\)")
        .expect("Failed to compile markdown image regex");

    // Match HTML img tags: <img src="url">
    static ref HTML_IMAGE_REGEX: Regex = Regex::new(r#"<img[^>]+src=["']([^"']+)["']"#)
        .expect("Failed to compile HTML image regex");

    // Match bare image links
    static ref BARE_IMAGE_REGEX: Regex =
        Regex::new(r"(?i)https?://\S+?\.(?:png|jpe?g|gif|svg|webp|bmp)\b")
            .expect("Failed to compile bare image URL regex");
}

/// Extracts every image URL embedded in a card side.
pub fn image_urls(text: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    let captured = MD_IMAGE_REGEX
        .captures_iter(text)
        .chain(HTML_IMAGE_REGEX.captures_iter(text))
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()));
    let bare = BARE_IMAGE_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string());

    for url in captured.chain(bare) {
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

/// Replaces each embedded image URL with a single space.
pub fn strip_image_urls(text: &str) -> String {
    let mut urls = image_urls(text);
    // Longest first, so a URL that contains another is removed whole.
    urls.sort_by_key(|url| std::cmp::Reverse(url.len()));
    urls.iter()
        .fold(text.to_string(), |acc, url| acc.replace(url.as_str(), " "))
}

/// Case-insensitive substring match over front, back, tags and keywords.
/// `needle` must already be lower-cased.
pub fn matches(record: &CaseRecord, needle: &str) -> bool {
    let front = strip_image_urls(&record.front);
    let back = strip_image_urls(&record.back);
    [
        front.as_str(),
        back.as_str(),
        record.tags.as_str(),
        record.keywords.as_str(),
    ]
    .iter()
    .any(|cell| cell.to_lowercase().contains(needle))
}

/// Keeps the matching records, preserving their order.
pub fn search(records: Vec<CaseRecord>, query: &str) -> Vec<CaseRecord> {
    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches(record, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::fields::parse_timestamp;

    fn record(id: i64, front: &str, back: &str, tags: &str, keywords: &str) -> CaseRecord {
        CaseRecord {
            id,
            front: front.into(),
            back: back.into(),
            tags: tags.into(),
            keywords: keywords.into(),
            next_review: None,
            modified: parse_timestamp("2024-01-01").unwrap(),
        }
    }

    #[test]
    fn test_image_urls_all_forms() {
        let text = r#"see ![ecg](/images/ecg.png) and <img src="http://x/y.jpg"> or https://cdn.org/a/b.GIF"#;
        assert_eq!(
            image_urls(text),
            vec!["/images/ecg.png", "http://x/y.jpg", "https://cdn.org/a/b.GIF"]
        );
    }

    #[test]
    fn test_strip_replaces_with_space() {
        assert_eq!(
            strip_image_urls("a ![p](/images/heart.png) b"),
            "a ![p]( ) b"
        );
    }

    #[test]
    fn test_case_insensitive() {
        let r = record(1, "Mitral Stenosis", "", "", "");
        assert!(matches(&r, "mitral"));
        assert_eq!(search(vec![r], "STENOSIS").len(), 1);
    }

    #[test]
    fn test_image_urls_are_ignored() {
        let r = record(1, "![x](/images/heart-murmur.png)", "", "", "");
        assert!(search(vec![r.clone()], "murmur").is_empty());
        assert!(search(vec![r], "heart").is_empty());
    }

    #[test]
    fn test_tags_and_keywords_searched() {
        let records = vec![
            record(1, "q1", "a1", "cardio", ""),
            record(2, "q2", "a2", "", "Valve"),
            record(3, "q3", "a3", "renal", "kidney"),
        ];
        let ids: Vec<i64> = search(records.clone(), "valve").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
        let ids: Vec<i64> = search(records, "a").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
