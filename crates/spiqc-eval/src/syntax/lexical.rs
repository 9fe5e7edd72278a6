//! Line-oriented masking of string literals and comments
//!
//! Lexical rules run over the masked text so that prose inside docstrings
//! and comments never matches. Quote delimiters are kept, string contents
//! become spaces and comments are dropped. Line numbering is preserved.

/// One source line after masking
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedLine {
    /// 1-based line number
    pub number: usize,
    /// Code with string contents blanked and comments removed
    pub code: String,
    /// Indentation width of the original line, tabs rounded to 8
    pub indent: usize,
    /// Line starts inside a multi-line string
    pub continuation: bool,
}

impl MaskedLine {
    /// Carries code that can open or belong to a block
    pub fn is_code(&self) -> bool {
        !self.continuation && !self.code.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Quote {
    ch: char,
    triple: bool,
}

/// Masked view of a whole source file
#[derive(Debug, Clone)]
pub struct MaskedSource {
    lines: Vec<MaskedLine>,
}

impl MaskedSource {
    pub fn new(source: &str) -> Self {
        let mut lines = Vec::new();
        let mut open: Option<Quote> = None;

        for (idx, raw) in source.split('\n').enumerate() {
            let continuation = open.is_some();
            let (code, still_open) = mask_line(raw, open);
            // Single-quoted strings never span lines
            open = still_open.filter(|q| q.triple);
            lines.push(MaskedLine {
                number: idx + 1,
                code,
                indent: indent_width(raw),
                continuation,
            });
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[MaskedLine] {
        &self.lines
    }

    /// Any code line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.code.contains(needle))
    }
}

fn mask_line(raw: &str, mut open: Option<Quote>) -> (String, Option<Quote>) {
    let chars: Vec<char> = raw.chars().collect();
    let mut code = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match open {
            Some(q) => {
                if c == '\\' {
                    code.push(' ');
                    if i + 1 < chars.len() {
                        code.push(' ');
                    }
                    i += 2;
                } else if c == q.ch && (!q.triple || repeats(&chars, i, c)) {
                    let width = if q.triple { 3 } else { 1 };
                    code.extend(std::iter::repeat_n(c, width));
                    i += width;
                    open = None;
                } else {
                    code.push(' ');
                    i += 1;
                }
            }
            None => {
                if c == '#' {
                    break;
                }
                if c == '"' || c == '\'' {
                    let triple = repeats(&chars, i, c);
                    let width = if triple { 3 } else { 1 };
                    code.extend(std::iter::repeat_n(c, width));
                    i += width;
                    open = Some(Quote { ch: c, triple });
                } else {
                    code.push(c);
                    i += 1;
                }
            }
        }
    }

    (code, open)
}

fn repeats(chars: &[char], i: usize, c: char) -> bool {
    chars.get(i + 1) == Some(&c) && chars.get(i + 2) == Some(&c)
}

fn indent_width(raw: &str) -> usize {
    let mut width = 0;
    for c in raw.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width = (width / 8 + 1) * 8,
            _ => break,
        }
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_strings_and_comments() {
        let masked = MaskedSource::new("x = eval('eval(1)')  # eval(2)\n");
        assert_eq!(masked.lines()[0].code, "x = eval('       ')  ");
    }

    #[test]
    fn test_triple_quoted_spans_lines() {
        let source = "def f():\n    \"\"\"Uses eval(x)\n    and except:\n    \"\"\"\n    return 1\n";
        let masked = MaskedSource::new(source);
        let lines = masked.lines();
        assert!(!masked.contains("eval"));
        assert!(!lines[1].continuation);
        assert!(lines[2].continuation);
        assert!(lines[3].continuation);
        assert!(!lines[4].continuation);
        assert_eq!(lines[4].code.trim(), "return 1");
        assert_eq!(lines[4].number, 5);
    }

    #[test]
    fn test_escaped_quote_stays_inside_string() {
        let masked = MaskedSource::new(r#"s = "a\"b" / 2"#);
        assert_eq!(masked.lines()[0].code, r#"s = "    " / 2"#);
    }

    #[test]
    fn test_unterminated_single_quote_closes_at_line_end() {
        let masked = MaskedSource::new("s = 'oops\ny = 1 / 0\n");
        assert_eq!(masked.lines()[1].code, "y = 1 / 0");
        assert!(!masked.lines()[1].continuation);
    }

    #[test]
    fn test_indent_width() {
        let masked = MaskedSource::new("    a\n\tb\n  \tc\nd");
        let widths: Vec<_> = masked.lines().iter().map(|l| l.indent).collect();
        assert_eq!(widths, vec![4, 8, 8, 0]);
    }
}
