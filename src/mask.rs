use lazy_static::lazy_static;

lazy_static! {
    static ref COLON_PAIR: fancy_regex::Regex =
        fancy_regex::Regex::new(r#"["']:["']"#).expect("colon-pair pattern is valid");
}

/// Replaces every quote-colon-quote sequence with a same-length placeholder,
/// so that the two marks of a `key:"value"` pair don't scan as delimiters of
/// two independent quoted tokens. The substitution preserves char offsets;
/// every position computed against the masked copy is valid in the original.
pub fn mask_colon_pairs(text: &str) -> String {
    COLON_PAIR.replace_all(text, "___").into_owned()
}
