/// Splits a delimited tag string into tokens.
/// Commas, semicolons and whitespace all separate tags; duplicates are dropped.
pub fn tag_reader(tags: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in tags
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if !out.iter().any(|t| t == token) {
            out.push(token.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_delimiters() {
        assert_eq!(
            tag_reader("cardio, renal;  neuro\tpeds"),
            vec!["cardio", "renal", "neuro", "peds"]
        );
    }

    #[test]
    fn test_empty_string() {
        assert!(tag_reader("").is_empty());
        assert!(tag_reader(" , ;").is_empty());
    }

    #[test]
    fn test_duplicates_keep_first() {
        assert_eq!(tag_reader("b a b"), vec!["b", "a"]);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(tag_reader("Cardio cardio"), vec!["Cardio", "cardio"]);
    }
}
