//! Generation options.
//!
//! Set by the caller before a pass; the engine only reads them.

/// Default wrap threshold for comma-separated lists, in virtual columns.
pub const DEFAULT_SPLIT_LINES_LONGER_THAN: usize = 2048;

/// Options for one code generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Render dotted names as their last segment (compact IDE previews).
    pub omit_namespace_prefixes: bool,
    /// Virtual column after which comma-separated lists wrap.
    pub split_lines_longer_than: usize,
    /// Keep non-ASCII characters verbatim in string/char literals instead of escaping them.
    pub preserve_unicode_characters_in_string_literals: bool,
    /// Indent with tabs instead of spaces.
    pub use_tabs: bool,
    /// Width of one indentation level in spaces, and of a tab in virtual columns.
    pub tab_size: usize,
    /// Treat unsupported constructs as hard errors instead of inline comments.
    pub fail_on_asserts: bool,
    /// Blank lines between top-level type definitions.
    pub blank_lines_between_types: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            omit_namespace_prefixes: false,
            split_lines_longer_than: DEFAULT_SPLIT_LINES_LONGER_THAN,
            preserve_unicode_characters_in_string_literals: false,
            use_tabs: false,
            tab_size: 4,
            fail_on_asserts: false,
            blank_lines_between_types: 1,
        }
    }
}

impl GenerateOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_omit_namespace_prefixes(mut self, omit: bool) -> Self {
        self.omit_namespace_prefixes = omit;
        self
    }

    pub fn with_split_lines_longer_than(mut self, columns: usize) -> Self {
        self.split_lines_longer_than = columns;
        self
    }

    pub fn with_preserve_unicode(mut self, preserve: bool) -> Self {
        self.preserve_unicode_characters_in_string_literals = preserve;
        self
    }

    pub fn with_tabs(mut self, use_tabs: bool) -> Self {
        self.use_tabs = use_tabs;
        self
    }

    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn with_fail_on_asserts(mut self, fail: bool) -> Self {
        self.fail_on_asserts = fail;
        self
    }

    pub fn with_blank_lines_between_types(mut self, count: usize) -> Self {
        self.blank_lines_between_types = count;
        self
    }
}
