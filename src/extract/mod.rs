//! Literal extraction from page source
//!
//! Finds `const <name> = <array|object literal>` declarations for every
//! [`RecognizedName`] and parses the initializer with the restricted literal
//! parser. A declaration that fails to parse is recorded as an
//! [`ExtractionIssue`] and otherwise ignored; extraction itself never fails.
//!
//! # Example
//!
//! ```
//! use pagecfg::extract::{extract_literals, RecognizedName};
//! use serde_json::json;
//!
//! let entries = extract_literals(r#"const faqs = [{question:"Q1",answer:"A1"}];"#);
//! assert_eq!(
//!     entries.get(RecognizedName::Faqs),
//!     Some(&json!([{ "question": "Q1", "answer": "A1" }]))
//! );
//! ```

mod names;
mod scanner;

pub use names::{RecognizedName, UnknownNameError};
pub use scanner::{const_declarations, Declaration};

use crate::literal::{parse_literal_at, LiteralError};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// One recognized declaration and its parsed value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedEntry {
    pub name: RecognizedName,
    pub value: Value,
}

/// Extracted entries, at most one per name, kept in allow-list order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtractedEntries(Vec<ExtractedEntry>);

impl ExtractedEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry unless its name is already present; returns whether it was added
    pub fn insert(&mut self, name: RecognizedName, value: Value) -> bool {
        if self.contains(name) {
            return false;
        }
        let at = self.0.partition_point(|entry| entry.name < name);
        self.0.insert(at, ExtractedEntry { name, value });
        true
    }

    pub fn get(&self, name: RecognizedName) -> Option<&Value> {
        self.0
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.value)
    }

    pub fn contains(&self, name: RecognizedName) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<RecognizedName> {
        self.0.iter().map(|entry| entry.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractedEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for ExtractedEntries {
    type Item = ExtractedEntry;
    type IntoIter = std::vec::IntoIter<ExtractedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(RecognizedName, Value)> for ExtractedEntries {
    fn from_iter<I: IntoIterator<Item = (RecognizedName, Value)>>(iter: I) -> Self {
        let mut entries = Self::new();
        for (name, value) in iter {
            entries.insert(name, value);
        }
        entries
    }
}

/// A recognized declaration whose initializer could not be used
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionIssue {
    pub name: RecognizedName,
    /// 1-based line of the `const` keyword
    pub line: usize,
    #[serde(serialize_with = "serialize_error")]
    pub error: LiteralError,
}

fn serialize_error<S>(error: &LiteralError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(error)
}

/// Result of scanning one source document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    pub entries: ExtractedEntries,
    pub issues: Vec<ExtractionIssue>,
}

/// Extracts literal declarations for a set of recognized names
#[derive(Debug, Clone)]
pub struct Extractor {
    names: Vec<RecognizedName>,
    prefilter: Regex,
}

impl Extractor {
    /// Extractor for the full allow-list
    pub fn new() -> Self {
        Self::with_names(RecognizedName::ALL)
    }

    /// Extractor restricted to `names`; order and duplicates in the input do not matter
    pub fn with_names(names: impl IntoIterator<Item = RecognizedName>) -> Self {
        let mut names: Vec<RecognizedName> = names.into_iter().collect();
        names.sort();
        names.dedup();

        let alternation = names
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>()
            .join("|");
        let prefilter = Regex::new(&format!(r"\b(?:{})\b", alternation)).expect("valid regex");

        Self { names, prefilter }
    }

    pub fn names(&self) -> &[RecognizedName] {
        &self.names
    }

    pub fn extract(&self, source: &str) -> Extraction {
        let mut extraction = Extraction::default();

        if self.names.is_empty() || !self.prefilter.is_match(source) {
            return extraction;
        }

        let declarations = const_declarations(source);

        for &name in &self.names {
            for declaration in declarations.iter().filter(|d| d.name == name.as_str()) {
                match parse_declaration(source, declaration) {
                    Ok(value) => {
                        debug!(name = %name, offset = declaration.init_offset, "Extracted literal");
                        extraction.entries.insert(name, value);
                        break;
                    }
                    Err(error) => {
                        let line = line_of(source, declaration.keyword_offset);
                        debug!(name = %name, line, error = %error, "Skipping unparseable literal");
                        extraction.issues.push(ExtractionIssue { name, line, error });
                    }
                }
            }
        }

        extraction
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts every recognized literal declaration from `source`
pub fn extract_literals(source: &str) -> ExtractedEntries {
    Extractor::new().extract(source).entries
}

fn parse_declaration(source: &str, declaration: &Declaration<'_>) -> Result<Value, LiteralError> {
    let (value, end) = parse_literal_at(source, declaration.init_offset)?;
    check_terminator(source, end)?;
    Ok(value)
}

/// Bytes that continue an expression onto the next line
const CONTINUATION: &[u8] = b".([+-*/?&|,=<>%`";

/// Accepts `;`, end of block, end of input, or a line break that ends the
/// statement; anything else means the literal is only part of an expression.
fn check_terminator(source: &str, end: usize) -> Result<(), LiteralError> {
    let bytes = source.as_bytes();
    let mut i = end;
    let mut crossed_newline = false;

    loop {
        match bytes.get(i) {
            None | Some(b';') | Some(b'}') => return Ok(()),
            Some(b'\n') => {
                crossed_newline = true;
                i += 1;
            }
            Some(b) if b.is_ascii_whitespace() => i += 1,
            Some(b'/') if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            Some(b'/') if bytes.get(i + 1) == Some(&b'*') => match source[i + 2..].find("*/") {
                Some(close) => i += close + 4,
                None => return Err(LiteralError::UnterminatedComment { offset: i }),
            },
            Some(b) if crossed_newline && !CONTINUATION.contains(b) => return Ok(()),
            Some(_) => return Err(LiteralError::TrailingContent { offset: i }),
        }
    }
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_faq_example() {
        let entries = extract_literals(r#"const faqs = [{question:"Q1",answer:"A1"}];"#);
        assert_eq!(entries.names(), vec![RecognizedName::Faqs]);
        assert_eq!(
            entries.get(RecognizedName::Faqs),
            Some(&json!([{ "question": "Q1", "answer": "A1" }]))
        );
    }

    #[test]
    fn test_products_value_deep_equals_literal() {
        let src = r#"
'use client';
import { useState } from 'react';

export default function Page() {
  const products = [
    { id: 1, name: 'Throwback Hip Bag', price: '$90.00', colors: ['Salmon', 'Blue'] },
    { id: 2, name: "Medium Stuff Satchel", price: '$32.00', quantity: 1 },
  ];
  const [cart, setCart] = useState(products);
  return null;
}
"#;
        let entries = extract_literals(src);
        assert_eq!(
            entries.get(RecognizedName::Products),
            Some(&json!([
                { "id": 1, "name": "Throwback Hip Bag", "price": "$90.00", "colors": ["Salmon", "Blue"] },
                { "id": 2, "name": "Medium Stuff Satchel", "price": "$32.00", "quantity": 1 }
            ]))
        );
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_absent_names_yield_no_entry() {
        let entries = extract_literals("const navigation = [{ name: 'Home' }];");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_multiple_names_in_allow_list_order() {
        let src = r#"
const testimonials = [{ quote: 'Great' }];
const product = { name: 'Tee' };
const products = [];
const heroSlides = [{ title: 'Summer' }];
const heroSections = [{ title: 'Winter' }];
"#;
        let entries = extract_literals(src);
        assert_eq!(
            entries.names(),
            vec![
                RecognizedName::Products,
                RecognizedName::HeroSections,
                RecognizedName::HeroSlides,
                RecognizedName::Testimonials,
                RecognizedName::Product,
            ]
        );
    }

    #[test]
    fn test_singular_and_plural_are_distinct() {
        let entries = extract_literals("const product = { id: 7 };");
        assert!(entries.contains(RecognizedName::Product));
        assert!(!entries.contains(RecognizedName::Products));
    }

    #[test]
    fn test_longer_identifiers_do_not_match() {
        let entries = extract_literals("const productsList = [1];\nconst featuredProducts = [2];");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_nested_brackets_bound_exactly() {
        let src = r#"
const categories = [
  { name: 'New [Arrivals]', sub: [{ name: "Tops}" }] },
];
const posts = [{ title: 'Second' }];
"#;
        let entries = extract_literals(src);
        assert_eq!(
            entries.get(RecognizedName::Categories),
            Some(&json!([{ "name": "New [Arrivals]", "sub": [{ "name": "Tops}" }] }]))
        );
        assert_eq!(
            entries.get(RecognizedName::Posts),
            Some(&json!([{ "title": "Second" }]))
        );
    }

    #[test]
    fn test_unparseable_entry_is_omitted_and_reported() {
        let src = "const team = [{ name: 'Ada', image: avatar }];\nconst faqs = [];";
        let extraction = Extractor::new().extract(src);

        assert_eq!(extraction.entries.names(), vec![RecognizedName::Faqs]);
        assert_eq!(extraction.issues.len(), 1);
        assert_eq!(extraction.issues[0].name, RecognizedName::Team);
        assert_eq!(extraction.issues[0].line, 1);
        assert!(matches!(
            extraction.issues[0].error,
            LiteralError::NotALiteral { ref text, .. } if text == "avatar"
        ));
    }

    #[test]
    fn test_first_parseable_declaration_wins() {
        let src = "const posts = [bad];\nconst posts = [{ id: 1 }];\nconst posts = [{ id: 2 }];";
        let extraction = Extractor::new().extract(src);

        assert_eq!(
            extraction.entries.get(RecognizedName::Posts),
            Some(&json!([{ "id": 1 }]))
        );
        assert_eq!(extraction.issues.len(), 1);
        assert_eq!(extraction.issues[0].line, 1);
    }

    #[test]
    fn test_method_call_on_literal_is_not_a_literal() {
        let src = "const results = [3, 1, 2].sort();";
        let extraction = Extractor::new().extract(src);

        assert!(extraction.entries.is_empty());
        assert!(matches!(
            extraction.issues[0].error,
            LiteralError::TrailingContent { .. }
        ));
    }

    #[test]
    fn test_missing_semicolon_before_newline_is_accepted() {
        let src = "const socialLinks = [{ name: 'X' }]\nexport default function Page() {}";
        let entries = extract_literals(src);
        assert!(entries.contains(RecognizedName::SocialLinks));
    }

    #[test]
    fn test_continuation_on_next_line_is_rejected() {
        let src = "const results = [1, 2]\n  .map((n) => n * 2);";
        let extraction = Extractor::new().extract(src);
        assert!(extraction.entries.is_empty());
        assert_eq!(extraction.issues.len(), 1);
    }

    #[test]
    fn test_trailing_comment_before_semicolon() {
        let src = "const cartItems = [] /* empty cart */ ; // done";
        assert!(extract_literals(src).contains(RecognizedName::CartItems));
    }

    #[test]
    fn test_restricted_extractor() {
        let src = "const posts = [];\nconst team = [];";
        let extractor = Extractor::with_names([RecognizedName::Team, RecognizedName::Team]);

        assert_eq!(extractor.names(), &[RecognizedName::Team]);
        assert_eq!(extractor.extract(src).entries.names(), vec![RecognizedName::Team]);
    }

    #[test]
    fn test_empty_name_set_extracts_nothing() {
        let extractor = Extractor::with_names(Vec::new());
        assert!(extractor.extract("const posts = [];").entries.is_empty());
    }

    #[test]
    fn test_entries_insert_keeps_first_and_orders() {
        let mut entries = ExtractedEntries::new();
        assert!(entries.insert(RecognizedName::Team, json!([1])));
        assert!(entries.insert(RecognizedName::Products, json!([2])));
        assert!(!entries.insert(RecognizedName::Team, json!([3])));

        assert_eq!(
            entries.names(),
            vec![RecognizedName::Products, RecognizedName::Team]
        );
        assert_eq!(entries.get(RecognizedName::Team), Some(&json!([1])));
    }

    #[test]
    fn test_issue_serializes_error_as_message() {
        let issue = ExtractionIssue {
            name: RecognizedName::Posts,
            line: 4,
            error: LiteralError::Interpolation { offset: 10 },
        };
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "posts",
                "line": 4,
                "error": "template interpolation at byte 10 is not a literal"
            })
        );
    }
}
