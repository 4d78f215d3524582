use std::borrow::Cow;

/// Returns `true` for the C0 control characters that cannot appear in
/// spreadsheet XML. Tab, line feed and carriage return are allowed.
fn is_forbidden(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}')
}

/// Removes the control characters that the spreadsheet XML encoding rejects.
///
/// Characters `U+0000`-`U+0008`, `U+000B`, `U+000C` and `U+000E`-`U+001F` are
/// dropped, tab, line feed and carriage return are kept. Text without any
/// forbidden character is returned borrowed.
///
/// # Examples
///
/// ```
/// use csv_sheet_rs::item::xlsx::replace_control_characters;
///
/// assert_eq!(replace_control_characters("a\u{1}b\tc"), "ab\tc");
/// assert_eq!(replace_control_characters(""), "");
/// ```
pub fn replace_control_characters(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_forbidden) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|c| !is_forbidden(*c)).collect())
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::replace_control_characters;

    #[test]
    fn should_strip_every_forbidden_control_character() {
        let input: String = (0u8..0x20).map(char::from).collect();
        assert_eq!(replace_control_characters(&input), "\t\n\r");
    }

    #[test]
    fn should_keep_tab_line_feed_and_carriage_return() {
        let input = "line 1\r\nline 2\tend";
        assert_eq!(replace_control_characters(input), input);
    }

    #[test]
    fn should_borrow_clean_and_empty_text() {
        assert!(matches!(replace_control_characters(""), Cow::Borrowed("")));
        assert!(matches!(
            replace_control_characters("plain text"),
            Cow::Borrowed("plain text")
        ));
    }

    #[test]
    fn should_be_idempotent() {
        let inputs = ["", "abc", "\u{0}\u{7}x\u{1b}[0m\u{c}", "é\u{1f}ü\t\u{b}"];
        for input in inputs {
            let once = replace_control_characters(input).into_owned();
            let twice = replace_control_characters(&once).into_owned();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn should_leave_delete_and_non_ascii_untouched() {
        assert_eq!(replace_control_characters("\u{7f}ß\u{85}"), "\u{7f}ß\u{85}");
    }
}
