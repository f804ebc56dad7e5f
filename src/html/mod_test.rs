// Tests for tag recognition

use super::*;

#[test]
fn test_known_tags_are_recognised() {
    let found: Vec<(bool, String)> = tags(r#"<p>Hi <span style="color:red">x</span><br/></p>"#)
        .map(|t| (t.closing, t.name))
        .collect();
    assert_eq!(
        found,
        vec![
            (false, "p".to_string()),
            (false, "span".to_string()),
            (true, "span".to_string()),
            (false, "br".to_string()),
            (true, "p".to_string()),
        ]
    );
}

#[test]
fn test_attributes_and_self_closing_captured() {
    let tag = tags(r#"<A HREF="https://example.com" target='_blank'>"#)
        .next()
        .unwrap();
    assert_eq!(tag.name, "a");
    assert_eq!(tag.attrs, r#" HREF="https://example.com" target='_blank'"#);
    assert!(!tag.self_closing);

    let tag = tags("<br />").next().unwrap();
    assert!(tag.self_closing);
}

#[test]
fn test_comparisons_are_not_markup() {
    assert!(!contains_markup("if a<b and c>d then"));
    assert!(!contains_markup("5 > 3 && 2 < 4"));
    assert!(!contains_markup("<notatag> stays"));
    assert!(!contains_markup("<b disabled>"));
}

#[test]
fn test_strip_tags_keeps_literal_text() {
    assert_eq!(strip_tags("<b>a<c</b> and <x>"), "a<c and <x>");
}
