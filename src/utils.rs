use unicode_segmentation::UnicodeSegmentation;

/// Truncate a label to at most `max_graphemes` user-perceived characters,
/// appending an ellipsis when anything was cut. Splitting on graphemes
/// keeps emoji icons and combining marks intact.
pub fn truncate_label(text: &str, max_graphemes: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max_graphemes).collect();
    if graphemes.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_labels_pass_through() {
        assert_eq!(truncate_label("Webhook Trigger", 22), "Webhook Trigger");
    }

    #[test]
    fn long_labels_get_ellipsis() {
        assert_eq!(truncate_label("abcdefgh", 4), "abcd…");
    }

    #[test]
    fn emoji_count_as_single_graphemes() {
        // Family emoji is one grapheme but many code points.
        let label = "👨‍👩‍👧‍👦 node";
        assert_eq!(truncate_label(label, 2), "👨‍👩‍👧‍👦 …");
    }
}
