//! Reserved-word tables for the reference backends (for identifier escaping).
//!
//! ## Notes
//! - Both languages compare reserved words case-sensitively.
//! - Contextual keywords that are only reserved in specific positions (`get`, `set`, `value`,
//!   `willSet`, ...) are deliberately absent: escaping them everywhere would make ordinary member
//!   names unreadable.

/// Reserved keywords in C#.
pub const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class", "const", "continue",
    "decimal", "default", "delegate", "do", "double", "else", "enum", "event", "explicit", "extern", "false", "finally",
    "fixed", "float", "for", "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params", "private", "protected",
    "public", "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static", "string",
    "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort",
    "using", "virtual", "void", "volatile", "while",
];

/// Reserved keywords in Swift (declarations, statements, expressions and types).
pub const SWIFT_KEYWORDS: &[&str] = &[
    "associatedtype", "class", "deinit", "enum", "extension", "fileprivate", "func", "import", "init", "inout",
    "internal", "let", "open", "operator", "private", "precedencegroup", "protocol", "public", "rethrows", "static",
    "struct", "subscript", "typealias", "var", "break", "case", "catch", "continue", "default", "defer", "do", "else",
    "fallthrough", "for", "guard", "if", "in", "repeat", "return", "throw", "switch", "where", "while", "Any", "as",
    "await", "false", "is", "nil", "self", "Self", "super", "throws", "true", "try",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csharp_keywords_are_lowercase() {
        for kw in CSHARP_KEYWORDS {
            assert_eq!(*kw, kw.to_lowercase(), "C# keyword `{kw}` should be lower-case");
        }
    }

    #[test]
    fn test_keyword_tables_have_no_duplicates() {
        for table in [CSHARP_KEYWORDS, SWIFT_KEYWORDS] {
            let mut seen = std::collections::HashSet::new();
            for kw in table {
                assert!(seen.insert(*kw), "duplicate keyword `{kw}`");
            }
        }
    }

    #[test]
    fn test_tables_are_case_sensitive() {
        assert!(CSHARP_KEYWORDS.contains(&"class"));
        assert!(!CSHARP_KEYWORDS.contains(&"Class"));
        assert!(SWIFT_KEYWORDS.contains(&"Self"));
        assert!(!SWIFT_KEYWORDS.contains(&"SELF"));
    }

    #[test]
    fn test_contextual_keywords_are_not_reserved() {
        assert!(!CSHARP_KEYWORDS.contains(&"value"));
        assert!(!SWIFT_KEYWORDS.contains(&"get"));
    }
}
