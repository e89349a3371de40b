use webdom::text::{display_width, is_blank, truncate_to_width};

#[test]
fn test_display_width_wide_chars() {
    assert_eq!(display_width("abc"), 3);
    assert_eq!(display_width("日本"), 4);
}

#[test]
fn test_truncate_short_text_unchanged() {
    assert_eq!(truncate_to_width("hello", 10), "hello");
}

#[test]
fn test_truncate_adds_ellipsis() {
    assert_eq!(truncate_to_width("hello world", 6), "hello…");
}

#[test]
fn test_truncate_zero_width() {
    assert_eq!(truncate_to_width("hello", 0), "");
}

#[test]
fn test_is_blank() {
    assert!(is_blank(""));
    assert!(is_blank("  \t"));
    assert!(!is_blank(" a "));
}

#[test]
fn test_truncate_never_splits_wide_chars() {
    assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    assert_eq!(display_width(&truncate_to_width("日本語テキスト", 6)), 5);
}
