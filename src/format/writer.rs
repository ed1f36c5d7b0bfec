//! Output writer with indentation and location tracking
//!
//! Builds the generated text and tracks the position of the next character: line, column,
//! virtual column (tabs expanded) and byte offset. Indentation is written lazily, just before the
//! first non-empty fragment on a line.

use super::config::GenerateOptions;
use crate::ir::Location;

/// Writer that tracks indentation and position while building output
#[derive(Debug)]
pub struct OutputWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    use_tabs: bool,
    tab_size: usize,
    /// Whether we're at the start of a line (indentation still pending)
    at_line_start: bool,
    /// Position of the next character
    location: Location,
    /// Virtual column the outermost comma list in progress started at
    alignment_column: Option<usize>,
}

impl OutputWriter {
    /// Create a new writer using the indentation settings of `options`
    pub fn new(options: &GenerateOptions) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            use_tabs: options.use_tabs,
            tab_size: options.tab_size,
            at_line_start: true,
            location: Location::default(),
            alignment_column: None,
        }
    }

    /// Get the generated output
    pub fn finish(self) -> String {
        self.output
    }

    /// Position of the next character that will be written.
    pub fn location(&self) -> Location {
        self.location
    }

    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Get current indentation level
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
        self.alignment_column = None;
    }

    /// Decrease indentation level; stays at zero on underflow.
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.alignment_column = None;
    }

    /// Write a string (with auto-indent). Embedded newlines start new lines.
    pub fn write(&mut self, s: &str) {
        let mut pieces = s.split('\n').peekable();
        while let Some(piece) = pieces.next() {
            self.write_fragment(piece);
            if pieces.peek().is_some() {
                self.newline();
            }
        }
    }

    /// Write a string and newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// Write just a newline
    pub fn newline(&mut self) {
        self.output.push('\n');
        self.location.line += 1;
        self.location.column = 0;
        self.location.virtual_column = 0;
        self.location.offset = self.output.len();
        self.at_line_start = true;
    }

    /// Write multiple blank lines (for spacing between declarations)
    pub fn blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.newline();
        }
    }

    /// Write a space
    pub fn space(&mut self) {
        self.write(" ");
    }

    /// Pad with whitespace until the virtual column reaches `column`.
    ///
    /// Writes no indentation of its own; padding replaces the pending indentation of the line.
    pub fn pad_to_virtual_column(&mut self, column: usize) {
        if self.use_tabs && self.tab_size > 0 {
            while self.location.virtual_column + self.tab_size <= column {
                self.push_raw("\t");
            }
        }
        while self.location.virtual_column < column {
            self.push_raw(" ");
        }
        self.at_line_start = false;
    }

    /// Start (or join) the alignment of a comma-separated list.
    ///
    /// ## Returns
    /// - `(column, owned)`: the alignment column to wrap to, and whether this call started it (and
    ///   so must end it with [`Self::end_alignment`]).
    pub fn begin_alignment(&mut self) -> (usize, bool) {
        match self.alignment_column {
            Some(column) => (column, false),
            None => {
                let column = self.pending_virtual_column();
                self.alignment_column = Some(column);
                (column, true)
            }
        }
    }

    pub fn end_alignment(&mut self, owned: bool) {
        if owned {
            self.alignment_column = None;
        }
    }

    pub fn alignment_column(&self) -> Option<usize> {
        self.alignment_column
    }

    /// Write a list separator, breaking the line when it would end past `threshold`.
    ///
    /// On a break the separator's trailing whitespace is dropped and the next line is padded to
    /// `align_to`.
    ///
    /// ## Returns
    /// - whether a line break was inserted.
    pub fn write_separator(&mut self, separator: &str, threshold: usize, align_to: usize) -> bool {
        let width = separator.chars().count();
        if self.location.virtual_column + width <= threshold {
            self.write(separator);
            return false;
        }
        self.write(separator.trim_end());
        self.newline();
        self.pad_to_virtual_column(align_to);
        true
    }

    /// Location the next non-empty fragment will start at, counting pending indentation.
    pub fn next_location(&self) -> Location {
        if !self.at_line_start {
            return self.location;
        }
        let (chars, columns) = if self.use_tabs {
            (self.indent_level, self.indent_level * self.tab_size)
        } else {
            let spaces = self.indent_level * self.tab_size;
            (spaces, spaces)
        };
        Location {
            line: self.location.line,
            column: self.location.column + chars,
            virtual_column: self.location.virtual_column + columns,
            offset: self.location.offset + chars,
        }
    }

    fn pending_virtual_column(&self) -> usize {
        self.next_location().virtual_column
    }

    /// Write indentation if at line start
    fn write_indent(&mut self) {
        if self.at_line_start {
            let indent = if self.use_tabs {
                "\t".repeat(self.indent_level)
            } else {
                " ".repeat(self.indent_level * self.tab_size)
            };
            self.push_raw(&indent);
            self.at_line_start = false;
        }
    }

    fn write_fragment(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.push_raw(s);
    }

    /// Append text containing no newline and advance the location.
    fn push_raw(&mut self, s: &str) {
        for ch in s.chars() {
            self.location.column += 1;
            self.location.virtual_column += if ch == '\t' { self.tab_size } else { 1 };
        }
        self.output.push_str(s);
        self.location.offset = self.output.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_writer() -> OutputWriter {
        OutputWriter::new(&GenerateOptions::default())
    }

    fn tab_writer() -> OutputWriter {
        OutputWriter::new(&GenerateOptions::new().with_tabs(true).with_tab_size(4))
    }

    // ========================================
    // Write tests
    // ========================================

    #[test]
    fn test_new_writer_empty_output() {
        let writer = default_writer();
        assert!(writer.at_line_start());
        assert_eq!(writer.location(), Location::default());
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_write_multiple() {
        let mut writer = default_writer();
        writer.write("hello");
        writer.space();
        writer.write("world");
        assert_eq!(writer.finish(), "hello world");
    }

    #[test]
    fn test_write_empty_string_keeps_line_start() {
        let mut writer = default_writer();
        writer.indent();
        writer.write("");
        assert!(writer.at_line_start());
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_writeln_multiple() {
        let mut writer = default_writer();
        writer.writeln("line1");
        writer.writeln("line2");
        assert_eq!(writer.finish(), "line1\nline2\n");
    }

    #[test]
    fn test_write_with_embedded_newline() {
        let mut writer = default_writer();
        writer.indent();
        writer.write("a\nb");
        assert_eq!(writer.location().line, 1);
        assert_eq!(writer.finish(), "    a\n    b");
    }

    // ========================================
    // Location tests
    // ========================================

    #[test]
    fn test_location_advances_by_characters() {
        let mut writer = default_writer();
        writer.write("héllo");
        let loc = writer.location();
        assert_eq!(loc.column, 5);
        assert_eq!(loc.virtual_column, 5);
        assert_eq!(loc.offset, 6); // é is two bytes
    }

    #[test]
    fn test_newline_resets_columns_and_sets_offset() {
        let mut writer = default_writer();
        writer.writeln("abc");
        let loc = writer.location();
        assert_eq!(loc.line, 1);
        assert_eq!(loc.column, 0);
        assert_eq!(loc.virtual_column, 0);
        assert_eq!(loc.offset, 4);
    }

    #[test]
    fn test_tab_counts_once_for_column_and_tab_size_for_virtual_column() {
        let mut writer = tab_writer();
        writer.indent();
        writer.indent();
        writer.write("x");
        let loc = writer.location();
        assert_eq!(loc.column, 3);
        assert_eq!(loc.virtual_column, 9);
        assert_eq!(writer.finish(), "\t\tx");
    }

    #[test]
    fn test_space_indentation_uses_tab_size() {
        let mut writer = OutputWriter::new(&GenerateOptions::new().with_tab_size(2));
        writer.indent();
        writer.indent();
        writer.write("text");
        assert_eq!(writer.finish(), "    text"); // 2 * 2 = 4 spaces
    }

    // ========================================
    // Indent/dedent tests
    // ========================================

    #[test]
    fn test_dedent_at_zero_stays_zero() {
        let mut writer = default_writer();
        writer.dedent();
        writer.dedent();
        assert_eq!(writer.current_indent(), 0);
        writer.indent();
        assert_eq!(writer.current_indent(), 1);
    }

    #[test]
    fn test_indent_applies_only_at_line_start() {
        let mut writer = default_writer();
        writer.write("a");
        writer.indent();
        writer.writeln("b");
        writer.writeln("c");
        assert_eq!(writer.finish(), "ab\n    c\n");
    }

    #[test]
    fn test_nested_indentation() {
        let mut writer = OutputWriter::new(&GenerateOptions::new().with_tab_size(2));

        writer.writeln("class Foo {");
        writer.indent();
        writer.writeln("void Bar() {");
        writer.indent();
        writer.writeln("Baz();");
        writer.dedent();
        writer.writeln("}");
        writer.dedent();
        writer.writeln("}");

        let expected = "class Foo {\n  void Bar() {\n    Baz();\n  }\n}\n";
        assert_eq!(writer.finish(), expected);
    }

    // ========================================
    // Alignment and wrapping tests
    // ========================================

    #[test]
    fn test_alignment_is_owned_by_outermost_list() {
        let mut writer = default_writer();
        writer.write("call(");
        let (outer, owned) = writer.begin_alignment();
        assert_eq!((outer, owned), (5, true));
        writer.write("inner(");
        let (inner, inner_owned) = writer.begin_alignment();
        assert_eq!((inner, inner_owned), (5, false));
        writer.end_alignment(inner_owned);
        assert_eq!(writer.alignment_column(), Some(5));
        writer.end_alignment(owned);
        assert_eq!(writer.alignment_column(), None);
    }

    #[test]
    fn test_alignment_counts_pending_indentation() {
        let mut writer = default_writer();
        writer.indent();
        let (column, _) = writer.begin_alignment();
        assert_eq!(column, 4);
    }

    #[test]
    fn test_indent_change_clears_alignment() {
        let mut writer = default_writer();
        writer.write("f(");
        let _ = writer.begin_alignment();
        writer.indent();
        assert_eq!(writer.alignment_column(), None);
    }

    #[test]
    fn test_separator_within_threshold_stays_on_line() {
        let mut writer = default_writer();
        writer.write("foo(a");
        assert!(!writer.write_separator(", ", 20, 4));
        writer.write("b");
        assert_eq!(writer.finish(), "foo(a, b");
    }

    #[test]
    fn test_separator_past_threshold_wraps_to_alignment() {
        let mut writer = default_writer();
        writer.write("foo(aaaa");
        assert!(writer.write_separator(", ", 8, 4));
        assert_eq!(writer.location().virtual_column, 4);
        writer.write("b");
        assert_eq!(writer.finish(), "foo(aaaa,\n    b");
    }

    #[test]
    fn test_next_location_counts_pending_indent() {
        let mut writer = tab_writer();
        writer.indent();
        let next = writer.next_location();
        assert_eq!((next.column, next.virtual_column, next.offset), (1, 4, 1));
        writer.write("x");
        assert_eq!(writer.location().column, 2);
        assert_eq!(writer.next_location(), writer.location());
    }

    #[test]
    fn test_pad_with_tabs_then_spaces() {
        let mut writer = tab_writer();
        writer.pad_to_virtual_column(10);
        assert_eq!(writer.location().virtual_column, 10);
        assert_eq!(writer.finish(), "\t\t  ");
    }

    #[test]
    fn test_pad_replaces_pending_indentation() {
        let mut writer = default_writer();
        writer.indent();
        writer.indent();
        writer.pad_to_virtual_column(3);
        writer.write("x");
        assert_eq!(writer.finish(), "   x");
    }
}
