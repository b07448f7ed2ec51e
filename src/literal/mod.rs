//! Restricted literal parser
//!
//! Page sources declare their sample data as plain JavaScript array and object
//! literals. This module turns such a literal into a [`serde_json::Value`]
//! without executing anything: identifiers that refer to runtime bindings,
//! calls, JSX, spreads and template interpolation are all rejected with a
//! [`LiteralError`] that carries the byte offset of the offending token.
//!
//! # Example
//!
//! ```
//! use pagecfg::literal::parse_literal;
//! use serde_json::json;
//!
//! let value = parse_literal("[{ question: 'Q1', answer: \"A1\", }]").unwrap();
//! assert_eq!(value, json!([{ "question": "Q1", "answer": "A1" }]));
//! ```

mod error;
mod parser;

pub use error::LiteralError;
pub use parser::{parse_literal, parse_literal_at, MAX_DEPTH};
