//! Positions in generated text and the identity keys spans are recorded under.

use std::fmt;

/// A position in generated output.
///
/// All fields are zero-based. `column` counts characters on the current line, `virtual_column`
/// counts the same characters with each tab expanded to the configured tab size, and `offset` is
/// the byte offset into the generated text.
///
/// Ordering is lexicographic by `(line, column)`; within a single pass the remaining fields
/// increase together with those two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub virtual_column: usize,
    pub offset: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The text range a node produced in one rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Check whether `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Number of lines the span touches.
    pub fn line_count(&self) -> usize {
        self.end.line - self.start.line + 1
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Node categories that carry spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    CodeUnit,
    TypeDefinition,
    Member,
    Parameter,
    Statement,
    Expression,
    TypeReference,
}

/// Identity of a node for the duration of a borrow of its tree.
///
/// The address alone is not enough: an enum payload can share its address with the enclosing
/// value, so the category is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    category: EntityCategory,
    address: usize,
}

impl NodeKey {
    pub fn category(&self) -> EntityCategory {
        self.category
    }
}

/// Implemented by every IR node the engine records spans for.
pub trait Entity: Sized {
    const CATEGORY: EntityCategory;

    fn key(&self) -> NodeKey {
        NodeKey {
            category: Self::CATEGORY,
            address: (self as *const Self).cast::<()>() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: usize, column: usize) -> Location {
        Location {
            line,
            column,
            virtual_column: column,
            offset: line * 100 + column,
        }
    }

    #[test]
    fn test_location_orders_by_line_then_column() {
        assert!(loc(0, 9) < loc(1, 0));
        assert!(loc(2, 3) < loc(2, 4));
        assert_eq!(loc(2, 3).max(loc(1, 8)), loc(2, 3));
    }

    #[test]
    fn test_span_contains() {
        let outer = Span::new(loc(0, 0), loc(3, 1));
        assert!(outer.contains(&Span::new(loc(1, 4), loc(2, 0))));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&Span::new(loc(1, 4), loc(3, 2))));
    }

    #[test]
    fn test_span_line_count() {
        assert_eq!(Span::new(loc(4, 0), loc(4, 7)).line_count(), 1);
        assert_eq!(Span::new(loc(4, 0), loc(6, 1)).line_count(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Span::new(loc(1, 2), loc(3, 4)).to_string(), "1:2-3:4");
    }
}
