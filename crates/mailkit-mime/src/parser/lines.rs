//! Line-oriented reader over raw message text.

/// Reads a message one physical line at a time.
///
/// A trailing bare-dot terminator line (as left by POP3 retrieval) is
/// removed and surrounding whitespace is trimmed before reading starts.
#[derive(Debug, Clone)]
pub struct LineReader<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> LineReader<'a> {
    /// Creates a reader over `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let text = strip_terminator(text).trim();
        Self {
            lines: text.lines().collect(),
            position: 0,
        }
    }

    /// Returns the next line, or `None` at end of input.
    pub fn read_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.position).copied()?;
        self.position += 1;
        Some(line)
    }

    /// Returns the next line without consuming it.
    #[must_use]
    pub fn peek_line(&self) -> Option<&'a str> {
        self.lines.get(self.position).copied()
    }

    /// Returns the next logical header line.
    ///
    /// Following lines that start with a space or tab are folded in: each
    /// is trimmed and appended after a single space. Blank continuation
    /// lines are consumed and dropped.
    pub fn read_line_continuous(&mut self) -> Option<String> {
        let mut line = self.read_line()?.to_string();
        if line.is_empty() {
            return Some(line);
        }

        while let Some(next) = self.peek_line() {
            if !next.starts_with([' ', '\t']) {
                break;
            }
            self.position += 1;

            let next = next.trim();
            if !next.is_empty() {
                line.push(' ');
                line.push_str(next);
            }
        }

        Some(line)
    }

    /// Checks if every line has been read.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.position >= self.lines.len()
    }
}

/// Removes a final `.` line, with or without its line break.
fn strip_terminator(text: &str) -> &str {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);

    match body.strip_suffix('.') {
        Some(rest) if rest.is_empty() || rest.ends_with('\n') => rest,
        _ => text,
    }
}
