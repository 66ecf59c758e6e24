use memchr::memchr;

/// only the first 80 characters of a line are significant
pub(crate) const MAX_LINE_LEN: usize = 80;
pub(crate) const TERMINATOR: char = ';';
pub(crate) const QUOTE: u8 = b'\'';
const COMMENT_MARKS: [char; 3] = ['!', '#', '$'];

// Lines are folded to upper case, so lower case letters can never occur in
// a normalized line and are free to be used as placeholders.
/// replaces a comma inside a quoted string
pub(crate) const STRING_COMMA: char = 'c';
/// replaces the repetition marker `*` outside of quoted strings
pub(crate) const MULTIPLIER: char = 'x';

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineEvent {
    /// blank line or pure comment
    Skip,
    /// the line starts with the terminator: stop without processing it
    Terminate,
    /// canonical line content; `terminate` is set if parsing stops after this line
    Line { text: String, terminate: bool },
}

/// Convert one raw input line into its canonical form.
///
/// The canonical form contains no whitespace and no comments, all commas
/// inside quoted strings are replaced by `STRING_COMMA`, all repetition
/// markers by `MULTIPLIER`, and the line always ends with a comma.
pub(crate) fn normalize_line(raw: &str) -> LineEvent {
    let truncated: String = raw.chars().take(MAX_LINE_LEN).collect();
    let line = truncated.trim().to_uppercase();

    if line.is_empty() {
        return LineEvent::Skip;
    }
    if line.starts_with(TERMINATOR) {
        return LineEvent::Terminate;
    }

    let (segments, strings) = split_quoted(&line);
    let mut clean = String::with_capacity(line.len() + 1);
    let last = segments.len() - 1;

    for (idx, segment) in segments.iter().enumerate() {
        let mut run: String = segment
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '*' { MULTIPLIER } else { c })
            .collect();

        // a comment lasts until the end of the line, everything after it is dropped
        let comment_pos = run.find(COMMENT_MARKS);
        if let Some(pos) = comment_pos {
            run.truncate(pos);
        }

        if idx > 0 {
            // this run directly follows a quoted string
            insert_separator(&mut run, segment, idx < last && comment_pos.is_none());
        }
        clean.push_str(&run);

        if comment_pos.is_some() || idx == last {
            break;
        }
        clean.push_str(&strings[idx].replace(',', &STRING_COMMA.to_string()));
    }

    if clean.is_empty() {
        return LineEvent::Skip;
    }

    let terminate = clean.ends_with(TERMINATOR);
    if terminate {
        clean.pop();
        if clean.is_empty() {
            return LineEvent::Terminate;
        }
    }
    if !clean.ends_with(',') {
        clean.push(',');
    }

    LineEvent::Line {
        text: clean,
        terminate,
    }
}

/// Split a line into the runs outside of quoted strings and the quoted strings themselves.
/// There is always exactly one more run than there are strings. An unterminated
/// quote is left in the last run; it is rejected once the value is coerced.
fn split_quoted(line: &str) -> (Vec<&str>, Vec<&str>) {
    let bytes = line.as_bytes();
    let mut segments = Vec::new();
    let mut strings = Vec::new();
    let mut pos = 0;

    while let Some(rel_open) = memchr(QUOTE, &bytes[pos..]) {
        let open = pos + rel_open;
        let Some(rel_close) = memchr(QUOTE, &bytes[open + 1..]) else {
            break;
        };
        let close = open + 1 + rel_close;
        segments.push(&line[pos..open]);
        strings.push(&line[open..=close]);
        pos = close + 1;
    }
    segments.push(&line[pos..]);

    (segments, strings)
}

// Values following a quoted string need not be separated by a comma:
//   'A' 'B'          blank delimiter between two strings
//   '2000' 98*'2000' value directly after the blank
//   'A'/'B'          any other single delimiter character
//   'A' NAME=...     the next assignment
// Adjacent quotes without any delimiter ('IT''S') are an escaped quote and stay untouched.
fn insert_separator(run: &mut String, raw_segment: &str, followed_by_string: bool) {
    match run.chars().next() {
        None => {
            if followed_by_string && !raw_segment.is_empty() {
                run.push(',');
            }
        }
        Some(',') => {}
        Some(c) if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {
            run.insert(0, ',');
        }
        Some(c) => {
            if followed_by_string && !run.contains(['=', ',']) && c != TERMINATOR {
                run.replace_range(..c.len_utf8(), ",");
            }
        }
    }
}

/// Undo the placeholder substitution for display in diagnostics
pub(crate) fn restore_token(token: &str) -> String {
    token
        .chars()
        .map(|c| match c {
            STRING_COMMA => ',',
            MULTIPLIER => '*',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(event: LineEvent) -> String {
        match event {
            LineEvent::Line { text, terminate } => {
                assert!(!terminate);
                text
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn blank_and_comment_lines() {
        assert_eq!(normalize_line(""), LineEvent::Skip);
        assert_eq!(normalize_line("    \t "), LineEvent::Skip);
        assert_eq!(normalize_line("! a comment"), LineEvent::Skip);
        assert_eq!(normalize_line("   # another = comment"), LineEvent::Skip);
        assert_eq!(normalize_line("$ dollar 'comment'"), LineEvent::Skip);
    }

    #[test]
    fn terminator_first() {
        assert_eq!(normalize_line(";"), LineEvent::Terminate);
        assert_eq!(normalize_line("   ; DMA1 = 5.0"), LineEvent::Terminate);
    }

    #[test]
    fn terminator_last() {
        let event = normalize_line("dma1(2) = 5.0 ;");
        assert_eq!(
            event,
            LineEvent::Line {
                text: "DMA1(2)=5.0,".to_string(),
                terminate: true
            }
        );
        // a comment hides a trailing terminator
        assert_eq!(text(normalize_line("DMA1 = 5.0 ! ;")), "DMA1=5.0,");
    }

    #[test]
    fn whitespace_case_and_trailing_comma() {
        assert_eq!(text(normalize_line("  dma1(1) = 100.5 , 200.25")), "DMA1(1)=100.5,200.25,");
        assert_eq!(text(normalize_line("DMA1(1)=100.5,")), "DMA1(1)=100.5,");
        assert_eq!(text(normalize_line("\tBURN = 1\t2")), "BURN=12,");
    }

    #[test]
    fn comments_are_stripped() {
        assert_eq!(text(normalize_line("BURN = 1, 2 ! first burns")), "BURN=1,2,");
        assert_eq!(text(normalize_line("BURN = 1 # 2")), "BURN=1,");
        assert_eq!(text(normalize_line("BURN = 1 $ 'X' 'Y'")), "BURN=1,");
    }

    #[test]
    fn comment_marks_inside_strings() {
        assert_eq!(
            text(normalize_line("LPLANE = 'A!B#C$' ! real comment")),
            "LPLANE='A!B#C$',"
        );
    }

    #[test]
    fn string_commas_and_multipliers() {
        assert_eq!(
            text(normalize_line("COORS = 'EARTH, MEAN', 3*'X*Y'")),
            "COORS='EARTHc MEAN',3x'X*Y',"
        );
        assert_eq!(text(normalize_line("BURN = 4 * 1")), "BURN=4x1,");
    }

    #[test]
    fn strings_keep_their_blanks() {
        assert_eq!(
            text(normalize_line("ma1t = '01-jan-2000 12:00:00.0 utc'")),
            "MA1T='01-JAN-2000 12:00:00.0 UTC',"
        );
    }

    #[test]
    fn implicit_separators() {
        assert_eq!(text(normalize_line("TVTYPE = 'A' 'B'")), "TVTYPE='A','B',");
        assert_eq!(
            text(normalize_line("ITPEQ = '2000' 98*'2000'")),
            "ITPEQ='2000',98x'2000',"
        );
        assert_eq!(text(normalize_line("TVTYPE = 'A'/'B'")), "TVTYPE='A','B',");
        assert_eq!(
            text(normalize_line("LPLANE = 'VELOC' BURN = 2")),
            "LPLANE='VELOC',BURN=2,"
        );
    }

    #[test]
    fn doubled_quote_is_not_a_separator() {
        assert_eq!(text(normalize_line("SCNAME = 'IT''S'")), "SCNAME='IT''S',");
    }

    #[test]
    fn unterminated_string_passes_the_lexer() {
        assert_eq!(text(normalize_line("SCNAME = 'ABC")), "SCNAME='ABC,");
    }

    #[test]
    fn line_is_truncated_at_80_characters() {
        let raw = format!("BURN = 1,{}2", " ".repeat(80));
        assert_eq!(text(normalize_line(&raw)), "BURN=1,");
        let raw = format!("{}9", "1,".repeat(40));
        assert_eq!(text(normalize_line(&raw)), "1,".repeat(40));
    }

    #[test]
    fn restore_placeholders() {
        assert_eq!(restore_token("3x'Ac B'"), "3*'A, B'");
    }
}
