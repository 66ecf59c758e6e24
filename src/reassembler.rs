use crate::lexer::QUOTE;

/// A complete `target(subscript)=value-list` assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statement {
    pub(crate) text: String,
    /// line on which the statement starts
    pub(crate) line: usize,
}

/// Stitches canonical lines into complete assignment statements.
///
/// A statement may span several lines, and one line may hold several
/// statements. A statement is only known to be complete once the next
/// target or the end of the input is seen, so one statement is always pending.
#[derive(Debug, Default)]
pub(crate) struct Reassembler {
    buffer: String,
    start_line: usize,
}

impl Reassembler {
    /// Feed one canonical line. Completed statements are returned in source order.
    pub(crate) fn push_line(&mut self, line: &str, line_no: usize) -> Vec<Statement> {
        let mut completed = Vec::new();

        let Some(target_starts) = find_target_starts(line) else {
            // no assignment in this line: it continues the value list of the pending statement
            self.append(line, line_no);
            return completed;
        };

        let mut segment_start = 0;
        for target_start in target_starts {
            if target_start > 0 {
                // everything before the first target continues the pending statement
                self.append(&line[segment_start..target_start], line_no);
            }
            completed.extend(self.commit());
            segment_start = target_start;
        }
        self.append(&line[segment_start..], line_no);

        completed
    }

    /// End of input: the pending statement is complete
    pub(crate) fn finish(&mut self) -> Option<Statement> {
        self.commit()
    }

    fn append(&mut self, text: &str, line_no: usize) {
        if self.buffer.is_empty() {
            self.start_line = line_no;
        }
        self.buffer.push_str(text);
    }

    fn commit(&mut self) -> Option<Statement> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(Statement {
                text: std::mem::take(&mut self.buffer),
                line: self.start_line,
            })
        }
    }
}

/// Find the start positions of all assignment targets in a canonical line.
///
/// A target is `NAME` or `NAME(...)` directly followed by `=` outside of quoted
/// strings, and it starts either at the beginning of the line or after a comma.
/// The comma stays with the preceding segment. Returns None if the line
/// contains no `=` outside of quoted strings.
fn find_target_starts(line: &str) -> Option<Vec<usize>> {
    let bytes = line.as_bytes();
    let mut starts = Vec::new();
    let mut in_string = false;
    let mut has_assignment = false;

    for (pos, &byte) in bytes.iter().enumerate() {
        if byte == QUOTE {
            in_string = !in_string;
        } else if byte == b'=' && !in_string {
            has_assignment = true;
            if let Some(start) = target_start(bytes, pos)
                && (start == 0 || bytes[start - 1] == b',')
            {
                starts.push(start);
            }
        }
    }

    has_assignment.then_some(starts)
}

// walk backwards from the '=' over an optional subscript and the name
fn target_start(bytes: &[u8], equals_pos: usize) -> Option<usize> {
    let mut pos = equals_pos;
    if pos > 0 && bytes[pos - 1] == b')' {
        pos = bytes[..pos - 1].iter().rposition(|&b| b == b'(')?;
    }
    let name_start = bytes[..pos]
        .iter()
        .rposition(|b| !(b.is_ascii_alphanumeric() || *b == b'_'))
        .map_or(0, |sep| sep + 1);
    if name_start < pos && bytes[name_start].is_ascii_alphabetic() {
        Some(name_start)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(statements: &[Statement]) -> Vec<&str> {
        statements.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn single_statement() {
        let mut reassembler = Reassembler::default();
        assert!(reassembler.push_line("DMA1(1)=100.5,200.25,", 1).is_empty());
        let last = reassembler.finish().unwrap();
        assert_eq!(last.text, "DMA1(1)=100.5,200.25,");
        assert_eq!(last.line, 1);
        assert!(reassembler.finish().is_none());
    }

    #[test]
    fn multiple_statements_on_one_line() {
        let mut reassembler = Reassembler::default();
        let done = reassembler.push_line("BURN=1,LDYN=0,MA1F(1,2)=5.0,6.0,", 4);
        assert_eq!(texts(&done), vec!["BURN=1,", "LDYN=0,"]);
        assert!(done.iter().all(|s| s.line == 4));
        assert_eq!(reassembler.finish().unwrap().text, "MA1F(1,2)=5.0,6.0,");
    }

    #[test]
    fn statement_spanning_lines() {
        let mut reassembler = Reassembler::default();
        assert!(reassembler.push_line("MA1A(1,1)=1.0,2.0,", 1).is_empty());
        assert!(reassembler.push_line("3.0,4.0,", 2).is_empty());
        let done = reassembler.push_line("5.0,BURN=1,", 3);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].text, "MA1A(1,1)=1.0,2.0,3.0,4.0,5.0,");
        assert_eq!(done[0].line, 1);
        let last = reassembler.finish().unwrap();
        assert_eq!(last.text, "BURN=1,");
        assert_eq!(last.line, 3);
    }

    #[test]
    fn new_line_commits_pending_statement() {
        let mut reassembler = Reassembler::default();
        reassembler.push_line("BURN=1,", 1);
        let done = reassembler.push_line("LDYN=0,", 2);
        assert_eq!(texts(&done), vec!["BURN=1,"]);
    }

    #[test]
    fn equals_inside_strings_is_ignored() {
        let mut reassembler = Reassembler::default();
        assert!(reassembler.push_line("ITPEQ='A=B',", 1).is_empty());
        // the continuation value holds a '=' as well
        let done = reassembler.push_line("'C=D',LPLANE='X=Y',", 2);
        assert_eq!(texts(&done), vec!["ITPEQ='A=B','C=D',"]);
        let done = reassembler.push_line("BURN=1,", 3);
        assert_eq!(texts(&done), vec!["LPLANE='X=Y',"]);
        assert_eq!(done[0].line, 2);
    }

    #[test]
    fn subscript_commas_do_not_split() {
        assert_eq!(find_target_starts("TVDORA(1,2,3)=1.0,"), Some(vec![0]));
        assert_eq!(
            find_target_starts("1.0,TVDORA(1,2,3)=1.0,X=2,"),
            Some(vec![4, 22])
        );
        assert_eq!(find_target_starts("1.0,2.0,"), None);
    }

    #[test]
    fn dangling_values_stay_pending() {
        let mut reassembler = Reassembler::default();
        reassembler.push_line("1.0,2.0,", 7);
        let done = reassembler.push_line("BURN=1,", 8);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].text, "1.0,2.0,");
        assert_eq!(done[0].line, 7);
    }
}
