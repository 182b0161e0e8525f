//! Single-pass text layout engine.
//!
//! The [`Emitter`] tracks just enough structure to get indentation and
//! punctuation right: an indent depth, a per-line buffer, a parenthesis
//! counter, and two lazy separator flags that are realized immediately before
//! the next token. Call sites never special-case the last item of a list:
//! a pending comma that is never followed by a token is simply dropped.

mod style;

pub use style::{BraceStyle, EmitStyle, Indent, LineEnding};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
struct ParenFrame {
    /// Offset of the `(` in the current line buffer.
    start: usize,
    /// Offsets where each list item begins (after `(` or a realized `, `).
    items: Vec<usize>,
}

/// Stateful code emitter.
///
/// # Example
///
/// ```
/// use tandem_codegen::emitter::{EmitStyle, Emitter};
///
/// let mut e = Emitter::new(EmitStyle::typescript());
/// e.word("function").word("greet");
/// e.open_paren();
/// e.word("name: string");
/// e.separator();
/// e.close_paren().unwrap();
/// e.glue(": void");
/// e.open_block();
/// e.word("return;");
/// e.close_block().unwrap();
/// assert_eq!(
///     e.finish().unwrap(),
///     "function greet(name: string): void {\n  return;\n}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Emitter {
    style: EmitStyle,
    out: String,
    line: String,
    depth: usize,
    block_depth: usize,
    pending_space: bool,
    pending_comma: bool,
    parens: Vec<ParenFrame>,
}

impl Emitter {
    /// Create a new emitter with the given layout style.
    pub fn new(style: EmitStyle) -> Self {
        Self {
            style,
            out: String::new(),
            line: String::new(),
            depth: 0,
            block_depth: 0,
            pending_space: false,
            pending_comma: false,
            parens: Vec::new(),
        }
    }

    /// Current indent depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Append a word. A single space is inserted automatically before the
    /// next word unless a separator or glue intervenes.
    pub fn word(&mut self, s: &str) -> &mut Self {
        self.begin_token();
        self.line.push_str(s);
        self.pending_space = true;
        self
    }

    /// Mark a list separator. The comma is written lazily, only if another
    /// token follows before the list closes.
    pub fn separator(&mut self) -> &mut Self {
        self.pending_comma = true;
        self.pending_space = false;
        self
    }

    /// Append text glued directly to the previous token (no space, no comma).
    pub fn glue(&mut self, s: &str) -> &mut Self {
        if self.line.is_empty() {
            self.write_indent();
        }
        self.pending_space = false;
        self.pending_comma = false;
        self.line.push_str(s);
        self.pending_space = true;
        self
    }

    /// Open a parenthesis, glued to the previous token.
    pub fn open_paren(&mut self) -> &mut Self {
        if self.line.is_empty() {
            self.write_indent();
        } else if self.pending_comma {
            self.realize_pending();
        }
        self.pending_space = false;
        self.line.push('(');
        self.depth += 1;
        let start = self.line.len() - 1;
        let items = vec![self.line.len()];
        self.parens.push(ParenFrame { start, items });
        self
    }

    /// Close the innermost parenthesis. A pending separator is discarded, and
    /// the list is wrapped onto multiple lines if the column budget is
    /// exceeded. Closing with no parenthesis open is a structural error.
    pub fn close_paren(&mut self) -> Result<&mut Self> {
        let Some(frame) = self.parens.pop() else {
            return Err(Error::imbalance(
                "parenthesis",
                "close without a matching open",
            ));
        };
        self.pending_comma = false;
        self.pending_space = false;
        self.depth -= 1;

        let frame_valid =
            frame.start < self.line.len() && frame.items.iter().all(|&i| i <= self.line.len());
        if frame_valid
            && self.line.len() + 1 > self.style.max_width
            && self.line.len() > frame.start + 1
        {
            self.wrap_paren(&frame);
        } else {
            self.line.push(')');
        }
        self.pending_space = true;
        Ok(self)
    }

    /// Open a block, honoring the configured brace placement.
    pub fn open_block(&mut self) -> &mut Self {
        self.block_depth += 1;
        match self.style.braces {
            BraceStyle::SameLine => {
                if self.line.is_empty() {
                    self.write_indent();
                } else {
                    self.realize_pending();
                    if !self.line.ends_with([' ', '(']) {
                        self.line.push(' ');
                    }
                }
                self.line.push('{');
                self.end_line();
            }
            BraceStyle::NextLine => {
                if !self.line.is_empty() {
                    self.end_line();
                }
                self.write_indent();
                self.line.push('{');
                self.end_line();
            }
        }
        self.depth += 1;
        self
    }

    /// Close the innermost block. Closing with no block open is a structural
    /// error, raised immediately.
    pub fn close_block(&mut self) -> Result<&mut Self> {
        if self.block_depth == 0 {
            return Err(Error::imbalance("block", "close without a matching open"));
        }
        if !self.line.is_empty() {
            self.end_line();
        }
        self.block_depth -= 1;
        self.depth -= 1;
        self.write_indent();
        self.line.push('}');
        self.end_line();
        Ok(self)
    }

    /// Append pre-rendered multi-line text, re-indenting every sub-line to
    /// the current depth. Internal relative indentation is preserved.
    pub fn raw_lines(&mut self, text: &str) -> &mut Self {
        if !self.line.is_empty() {
            self.end_line();
        }
        for sub in text.lines() {
            if sub.trim().is_empty() {
                self.out.push_str(self.style.line_ending.as_str());
            } else {
                self.write_indent();
                self.line.push_str(sub.trim_end());
                self.end_line();
            }
        }
        self
    }

    /// Emit a blank line.
    pub fn blank(&mut self) -> &mut Self {
        if !self.line.is_empty() {
            self.end_line();
        }
        self.out.push_str(self.style.line_ending.as_str());
        self
    }

    /// Flush the buffered line and clear per-line state.
    pub fn end_line(&mut self) -> &mut Self {
        self.out.push_str(&self.line);
        self.out.push_str(self.style.line_ending.as_str());
        self.line.clear();
        self.pending_space = false;
        self.pending_comma = false;
        self
    }

    /// Finish emission, checking that every block and parenthesis was closed.
    pub fn finish(mut self) -> Result<String> {
        if !self.parens.is_empty() {
            return Err(Error::imbalance(
                "parenthesis",
                format!("{} parenthesis(es) left open", self.parens.len()),
            ));
        }
        if self.block_depth > 0 {
            return Err(Error::imbalance(
                "block",
                format!("{} block(s) left open", self.block_depth),
            ));
        }
        if !self.line.is_empty() {
            self.end_line();
        }
        Ok(self.out)
    }

    fn begin_token(&mut self) {
        if self.line.is_empty() {
            self.write_indent();
        } else {
            self.realize_pending();
        }
    }

    fn realize_pending(&mut self) {
        if self.pending_comma {
            self.line.push_str(", ");
            let pos = self.line.len();
            if let Some(frame) = self.parens.last_mut() {
                frame.items.push(pos);
            }
        } else if self.pending_space {
            self.line.push(' ');
        }
        self.pending_comma = false;
        self.pending_space = false;
    }

    fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.line.push_str(self.style.indent.as_str());
        }
    }

    fn wrap_paren(&mut self, frame: &ParenFrame) {
        let inner = self.line[frame.start + 1..].to_string();
        self.line.truncate(frame.start + 1);
        self.end_line();

        let base = frame.start + 1;
        let rel: Vec<usize> = frame.items.iter().map(|i| i - base).collect();
        let last = rel.len() - 1;
        for (i, &start) in rel.iter().enumerate() {
            let end = if i < last { rel[i + 1] } else { inner.len() };
            let item = inner[start..end].trim_end().trim_end_matches(',');
            self.write_indent();
            self.line.push_str(self.style.indent.as_str());
            self.line.push_str(item);
            if i < last {
                self.line.push(',');
            }
            self.end_line();
        }
        self.write_indent();
        self.line.push(')');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitter() -> Emitter {
        Emitter::new(EmitStyle::typescript())
    }

    #[test]
    fn test_word_spacing() {
        let mut e = emitter();
        e.word("export").word("class").word("Order");
        assert_eq!(e.finish().unwrap(), "export class Order\n");
    }

    #[test]
    fn test_lazy_separator_dropped_before_close() {
        let mut e = emitter();
        e.word("f");
        e.open_paren();
        e.word("a").separator();
        e.word("b").separator();
        e.close_paren().unwrap();
        assert_eq!(e.finish().unwrap(), "f(a, b)\n");
    }

    #[test]
    fn test_close_paren_without_open_is_imbalance() {
        let mut e = emitter();
        let err = e.close_paren().unwrap_err();
        assert!(matches!(*err, Error::StructuralImbalance { .. }));
    }

    #[test]
    fn test_close_block_without_open_is_imbalance() {
        let mut e = emitter();
        let err = e.close_block().unwrap_err();
        assert!(matches!(*err, Error::StructuralImbalance { .. }));
    }

    #[test]
    fn test_unclosed_block_fails_at_finish() {
        let mut e = emitter();
        e.word("x").open_block();
        let err = e.finish().unwrap_err();
        assert!(matches!(*err, Error::StructuralImbalance { .. }));
    }

    #[test]
    fn test_same_line_block() {
        let mut e = Emitter::new(EmitStyle::typescript());
        e.word("class").word("Foo");
        e.open_block();
        e.word("x: number;");
        e.close_block().unwrap();
        assert_eq!(e.finish().unwrap(), "class Foo {\n  x: number;\n}\n");
    }

    #[test]
    fn test_next_line_block() {
        let mut e = Emitter::new(EmitStyle::csharp());
        e.word("class").word("Foo");
        e.open_block();
        e.word("int X;");
        e.close_block().unwrap();
        assert_eq!(e.finish().unwrap(), "class Foo\n{\n    int X;\n}\n");
    }

    #[test]
    fn test_raw_lines_reindented() {
        let mut e = Emitter::new(EmitStyle::typescript());
        e.word("f()");
        e.open_block();
        e.raw_lines("if (x) {\n  return 1;\n}\nreturn 0;");
        e.close_block().unwrap();
        assert_eq!(
            e.finish().unwrap(),
            "f() {\n  if (x) {\n    return 1;\n  }\n  return 0;\n}\n"
        );
    }

    #[test]
    fn test_width_policy_wraps_long_list() {
        let mut e = Emitter::new(EmitStyle::typescript().with_max_width(24));
        e.word("configure");
        e.open_paren();
        e.word("firstOption").separator();
        e.word("secondOption").separator();
        e.close_paren().unwrap();
        assert_eq!(
            e.finish().unwrap(),
            "configure(\n  firstOption,\n  secondOption\n)\n"
        );
    }

    #[test]
    fn test_short_list_stays_on_one_line() {
        let mut e = Emitter::new(EmitStyle::typescript());
        e.word("f");
        e.open_paren();
        e.word("a").separator();
        e.word("b");
        e.close_paren().unwrap();
        e.glue(";");
        assert_eq!(e.finish().unwrap(), "f(a, b);\n");
    }

    #[test]
    fn test_blank_between_lines() {
        let mut e = emitter();
        e.word("a;").end_line();
        e.blank();
        e.word("b;");
        assert_eq!(e.finish().unwrap(), "a;\n\nb;\n");
    }

    #[test]
    fn test_crlf_line_ending() {
        let mut e = Emitter::new(EmitStyle::typescript().with_line_ending(LineEnding::CrLf));
        e.word("x;");
        assert_eq!(e.finish().unwrap(), "x;\r\n");
    }

    #[test]
    fn test_nested_parens_balanced() {
        let mut e = emitter();
        e.word("f");
        e.open_paren();
        e.word("g");
        e.open_paren();
        e.word("x");
        e.close_paren().unwrap();
        e.close_paren().unwrap();
        assert_eq!(e.finish().unwrap(), "f(g(x))\n");
    }
}
