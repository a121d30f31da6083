/// Per-file line matching. Pure: takes text, returns hits.

/// Find lines in `text` that contain `needle`, looking only at the 1-based
/// `line` and `radius` lines either side of it.
///
/// Returns `(line_number, trimmed_line)` pairs in file order. Lines past
/// the end of the text are ignored.
pub fn search_lines(text: &str, needle: &str, line: usize, radius: usize) -> Vec<(usize, String)> {
    if line == 0 || needle.is_empty() {
        return Vec::new();
    }
    let first = line.saturating_sub(radius).max(1);
    let last = line.saturating_add(radius);

    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .skip(first - 1)
        .take_while(|&(n, _)| n <= last)
        .filter(|(_, l)| l.contains(needle))
        .map(|(n, l)| (n, l.trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize, hit_on: &[usize]) -> String {
        (1..=n)
            .map(|i| {
                if hit_on.contains(&i) {
                    format!("  import {{ AiOutlineStar }} from 'react-icons/ai'; // {i}")
                } else {
                    format!("const x{i} = {i};")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn exact_line_only() {
        let text = numbered(120, &[96, 97, 98]);
        let hits = search_lines(&text, "AiOutl", 97, 0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 97);
        assert!(hits[0].1.starts_with("import { AiOutlineStar }"));
    }

    #[test]
    fn radius_widens_the_window() {
        let text = numbered(120, &[88, 91, 97, 110, 111]);
        let lines: Vec<usize> = search_lines(&text, "AiOutl", 100, 10)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(lines, vec![91, 97, 110]);
    }

    #[test]
    fn short_file_has_no_hits() {
        let text = numbered(50, &[10, 50]);
        assert!(search_lines(&text, "AiOutl", 97, 0).is_empty());
        assert!(search_lines(&text, "AiOutl", 97, 40).is_empty());
        assert_eq!(search_lines(&text, "AiOutl", 97, 47).len(), 1);
    }

    #[test]
    fn window_is_clamped_at_line_one() {
        let text = numbered(5, &[1]);
        assert_eq!(search_lines(&text, "AiOutl", 2, 10).len(), 1);
    }

    #[test]
    fn crlf_line_endings_are_handled() {
        let text = "a\r\nb AiOutline\r\nc\r\n";
        let hits = search_lines(text, "AiOutl", 2, 0);
        assert_eq!(hits, vec![(2, "b AiOutline".to_string())]);
    }

    #[test]
    fn match_is_case_sensitive() {
        let text = "aioutline\n";
        assert!(search_lines(text, "AiOutl", 1, 0).is_empty());
    }

    #[test]
    fn degenerate_inputs_return_nothing() {
        assert!(search_lines("x", "x", 0, 3).is_empty());
        assert!(search_lines("x", "", 1, 0).is_empty());
    }
}
