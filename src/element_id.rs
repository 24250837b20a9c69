//! Element identity - stable ids for syntax elements
//!
//! Format: `<kind>-<start>:<end>` for elements with a source span,
//! `<kind>-#<n>` for synthetic elements that have no source position.
//!
//! Examples:
//! - `variable_declarator-4:15`
//! - `call_expression-40:44`
//! - `identifier-#0`

use crate::syntax::Element;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Half-open `[start, end)` byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where an element sits: a real source span, or a per-run synthetic ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Span(Span),
    Synthetic(u32),
}

/// Stable identity of a syntax element, derived from its kind and position.
///
/// This id is the join key for:
/// - Node deduplication
/// - Edge endpoints
/// - Editor highlighting (via [`span_of`])
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId {
    /// Node-type tag (tree-sitter kind name)
    pub kind: String,
    pub position: Position,
}

impl ElementId {
    pub fn new(kind: impl Into<String>, span: Span) -> Self {
        Self {
            kind: kind.into(),
            position: Position::Span(span),
        }
    }

    pub fn synthetic(kind: impl Into<String>, ordinal: u32) -> Self {
        Self {
            kind: kind.into(),
            position: Position::Synthetic(ordinal),
        }
    }

    /// Source span, if the element has one.
    pub fn span(&self) -> Option<Span> {
        match self.position {
            Position::Span(span) => Some(span),
            Position::Synthetic(_) => None,
        }
    }

    /// Parse an id string back into an ElementId
    ///
    /// Expected format: `<kind>-<start>:<end>` or `<kind>-#<n>`
    pub fn parse(id: &str) -> Result<Self> {
        // Offsets never contain '-', kinds might
        let (kind, position) = id
            .rsplit_once('-')
            .ok_or_else(|| Error::InvalidId(format!("missing '-' separator in {:?}", id)))?;

        if kind.is_empty() {
            return Err(Error::InvalidId(format!("empty kind in {:?}", id)));
        }

        if let Some(ordinal) = position.strip_prefix('#') {
            let ordinal: u32 = ordinal
                .parse()
                .map_err(|_| Error::InvalidId(format!("invalid synthetic ordinal in {:?}", id)))?;
            return Ok(Self::synthetic(kind, ordinal));
        }

        let (start, end) = position
            .split_once(':')
            .ok_or_else(|| Error::InvalidId(format!("span must be start:end in {:?}", id)))?;
        let start: usize = start
            .parse()
            .map_err(|_| Error::InvalidId(format!("invalid start offset in {:?}", id)))?;
        let end: usize = end
            .parse()
            .map_err(|_| Error::InvalidId(format!("invalid end offset in {:?}", id)))?;
        if end < start {
            return Err(Error::InvalidId(format!("end before start in {:?}", id)));
        }

        Ok(Self::new(kind, Span::new(start, end)))
    }

    pub fn to_id_string(&self) -> String {
        match self.position {
            Position::Span(span) => format!("{}-{}:{}", self.kind, span.start, span.end),
            Position::Synthetic(ordinal) => format!("{}-#{}", self.kind, ordinal),
        }
    }
}

/// Derive the identity of an element from its kind and position.
///
/// Pure: the same element (or an element with equal kind and span) always
/// yields an equal id.
///
/// Span-less elements are told apart by the ordinal their [`SyntaxTree`]
/// assigned on insertion, so ids are only injective within one tree. An
/// element that never went through a tree has no ordinal and maps to
/// `<kind>-#0`.
///
/// [`SyntaxTree`]: crate::syntax::SyntaxTree
pub fn identify(element: &Element) -> ElementId {
    match (element.span, element.synthetic) {
        (Some(span), _) => ElementId::new(element.kind, span),
        (None, Some(ordinal)) => ElementId::synthetic(element.kind, ordinal),
        (None, None) => ElementId::synthetic(element.kind, 0),
    }
}

/// Recover the source span from an id string, for editor highlighting.
///
/// Synthetic ids have no span and are rejected.
pub fn span_of(id: &str) -> Result<Span> {
    ElementId::parse(id)?
        .span()
        .ok_or_else(|| Error::InvalidId(format!("{:?} is synthetic and has no span", id)))
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_id_string())
    }
}

impl FromStr for ElementId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ElementId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_id_string())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ElementId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Element, Shape, SyntaxTree};

    #[test]
    fn test_id_format() {
        let id = ElementId::new("variable_declarator", Span::new(4, 15));
        assert_eq!(id.to_id_string(), "variable_declarator-4:15");
        assert_eq!(ElementId::synthetic("identifier", 3).to_id_string(), "identifier-#3");
    }

    #[test]
    fn test_span_of_inverts_identify() {
        let id = ElementId::new("call_expression", Span::new(40, 44));
        assert_eq!(span_of(&id.to_id_string()).unwrap(), Span::new(40, 44));

        let parsed: ElementId = "call_expression-40:44".parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_kind_with_dash() {
        let id = ElementId::new("call-expression", Span::new(1, 2));
        let parsed = ElementId::parse(&id.to_id_string()).unwrap();
        assert_eq!(parsed.kind, "call-expression");
        assert_eq!(parsed.span(), Some(Span::new(1, 2)));
    }

    #[test]
    fn test_identify_is_deterministic() {
        let a = Element::new("identifier", Some(Span::new(20, 21)), Shape::Other);
        let b = Element::new("identifier", Some(Span::new(20, 21)), Shape::Other);
        assert_eq!(identify(&a), identify(&a));
        assert_eq!(identify(&a), identify(&b));

        let other_kind = Element::new("number", Some(Span::new(20, 21)), Shape::Other);
        assert_ne!(identify(&a), identify(&other_kind));

        let other_span = Element::new("identifier", Some(Span::new(20, 22)), Shape::Other);
        assert_ne!(identify(&a), identify(&other_span));
    }

    #[test]
    fn test_identify_span_less_elements_within_tree() {
        let mut tree = SyntaxTree::new("program", Some(Span::new(0, 10)));
        let root = tree.root();
        let first = tree.push(root, "number", None, Shape::Other);
        let second = tree.push(root, "number", None, Shape::Other);

        let first_id = identify(tree.get(first));
        let second_id = identify(tree.get(second));
        assert_ne!(first_id, second_id);
        assert_eq!(first_id, identify(tree.get(first)));
        assert!(span_of(&second_id.to_id_string()).is_err());
    }

    #[test]
    fn test_synthetic_has_no_span() {
        assert!(span_of("identifier-#7").is_err());
        assert_eq!(ElementId::parse("identifier-#7").unwrap().span(), None);
    }

    #[test]
    fn test_invalid_ids() {
        assert!(ElementId::parse("identifier").is_err());
        assert!(ElementId::parse("-1:2").is_err());
        assert!(ElementId::parse("identifier-12").is_err());
        assert!(ElementId::parse("identifier-a:b").is_err());
        assert!(ElementId::parse("identifier-5:2").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = ElementId::new("return_statement", Span::new(70, 80));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"return_statement-70:80\"");
        let back: ElementId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
