//! Value box text

use std::borrow::Cow;

/// Characters kept when a title is cut
pub const CUT_LENGTH: usize = 15;

/// Suffix appended to a cut title
pub const ELLIPSIS: &str = "...";

/// Cut `title` to [`CUT_LENGTH`] characters plus [`ELLIPSIS`] when it is longer
pub fn cut_title(title: &str, cut: bool) -> Cow<'_, str> {
    if !cut {
        return Cow::Borrowed(title);
    }
    match title.char_indices().nth(CUT_LENGTH) {
        Some((end, _)) => Cow::Owned(format!("{}{}", &title[..end], ELLIPSIS)),
        None => Cow::Borrowed(title),
    }
}

/// Text for the value box: the resolved title, or the placeholder if empty
pub fn value_text<'a>(title: &'a str, placeholder: &'a str, cut: bool) -> Cow<'a, str> {
    let text = if title.is_empty() { placeholder } else { title };
    cut_title(text, cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_long_title() {
        let title = "abcdefghijklmnopqrst";
        assert_eq!(title.len(), 20);
        assert_eq!(cut_title(title, true), "abcdefghijklmno...");
    }

    #[test]
    fn test_cut_keeps_short_titles() {
        assert_eq!(cut_title("exactly fifteen", true), "exactly fifteen");
        assert_eq!(cut_title("short", true), "short");
    }

    #[test]
    fn test_no_cut() {
        let title = "abcdefghijklmnopqrst";
        assert_eq!(cut_title(title, false), title);
    }

    #[test]
    fn test_cut_counts_characters() {
        let title = "äöüäöüäöüäöüäöüäöü";
        assert_eq!(cut_title(title, true), "äöüäöüäöüäöüäöü...");
    }

    #[test]
    fn test_value_text_placeholder() {
        assert_eq!(value_text("", "Choose...", false), "Choose...");
        assert_eq!(value_text("Red", "Choose...", false), "Red");
        assert_eq!(value_text("", "A very long placeholder text", true), "A very long pla...");
    }
}
