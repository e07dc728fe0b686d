/// Greedy word wrap into lines of at most `max_len` characters.
///
/// Breaks on the last space inside the window unless that would leave a line
/// shorter than half of `max_len`, in which case the line is cut hard at `max_len`.
pub fn split_text(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let chars = text.chars().collect::<Vec<char>>();
    let mut lines = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut end = max_len.min(chars.len() - start);
        if start + end < chars.len() {
            // the character just past the window counts, a space there still gives a full line
            let space = chars[start..=start + end]
                .iter()
                .rposition(|c| *c == ' ');
            if let Some(space) = space {
                if 2 * space >= max_len {
                    end = space;
                }
            }
        }
        lines.push(chars[start..start + end].iter().collect());
        start += end;
        if chars.get(start) == Some(&' ') {
            start += 1;
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Long line with a b and c";

    #[test]
    fn split_by_length() {
        assert_eq!(split_text(TEXT, 8), vec!["Long", "line", "with a b", "and c"]);
        assert_eq!(split_text(TEXT, 10), vec!["Long line", "with a b", "and c"]);
        assert_eq!(split_text(TEXT, 23), vec!["Long line with a b and", "c"]);
        assert_eq!(split_text(TEXT, 24), vec![TEXT]);
        assert_eq!(split_text(TEXT, 25), vec![TEXT]);
    }

    #[test]
    fn empty_text() {
        assert!(split_text("", 10).is_empty());
    }

    #[test]
    fn hard_break_keeps_every_character() {
        assert_eq!(
            split_text("abcdefghijklmnop", 5),
            vec!["abcde", "fghij", "klmno", "p"]
        );
        // the space is too early to break on
        assert_eq!(split_text("a bcdefgh", 6), vec!["a bcde", "fgh"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(split_text("héllo wörld", 6), vec!["héllo", "wörld"]);
    }

    #[test]
    fn lines_never_exceed_max_len() {
        let text =
            "the quick brown fox jumps over the lazy dog while an extraordinarily long word waits";
        for max_len in 1..40 {
            for line in split_text(text, max_len) {
                assert!(line.chars().count() <= max_len, "{line:?} longer than {max_len}");
            }
        }
    }

    #[test]
    fn rejoining_restores_text() {
        let text = "used of physical heat having a high or higher than desirable temperature";
        let longest = text.split(' ').map(str::len).max().unwrap();
        // below twice the longest word a hard break can land inside a word
        for max_len in 2 * longest..text.len() + 2 {
            assert_eq!(split_text(text, max_len).join(" "), text, "max_len {max_len}");
        }
        let letters = text.replace(' ', "");
        for max_len in 1..text.len() {
            assert_eq!(split_text(text, max_len).concat().replace(' ', ""), letters);
        }
    }

    #[test]
    fn zero_max_len_is_one() {
        assert_eq!(split_text("ab", 0), vec!["a", "b"]);
    }
}
