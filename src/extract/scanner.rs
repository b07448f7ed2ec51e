//! Structural scan for `const NAME = [` / `const NAME = {` declarations
//!
//! The scanner walks page source once, stepping over string literals,
//! template literals, regular expression literals and comments, and reports each `const` binding whose
//! initializer opens with a bracket or brace. It does not bound the
//! initializer itself; the literal parser does that exactly.
//!
//! All delimiters are ASCII, so the scan works on bytes. Identifier bytes
//! include everything >= 0x80, which keeps every slice on a char boundary.

/// A candidate literal declaration found in page source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Bound identifier
    pub name: &'a str,
    /// Byte offset of the `const` keyword
    pub keyword_offset: usize,
    /// Byte offset of the opening `[` or `{` of the initializer
    pub init_offset: usize,
}

/// Returns every `const` declaration with an array or object initializer, in source order
pub fn const_declarations(src: &str) -> Vec<Declaration<'_>> {
    let bytes = src.as_bytes();
    let mut declarations = Vec::new();
    let mut prev_significant: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line_comment(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i),
            b'/' if starts_regex(prev_significant) => {
                i = skip_regex(bytes, i);
                prev_significant = Some(b'a');
            }
            b'"' | b'\'' => {
                i = skip_quoted(bytes, i);
                prev_significant = Some(b);
            }
            b'`' => {
                i = skip_template(bytes, i);
                prev_significant = Some(b);
            }
            b if is_ident_start(b) => {
                let start = i;
                i = ident_end(bytes, i);
                let word = &src[start..i];
                // `.const` is a property access, not a keyword
                let after_dot = prev_significant == Some(b'.');
                if word == "const" && !after_dot {
                    if let Some(declaration) = read_declaration(src, start, i) {
                        declarations.push(declaration);
                    }
                }
                prev_significant = if !after_dot && EXPRESSION_KEYWORDS.contains(&word) {
                    None
                } else {
                    Some(b'a')
                };
            }
            b if b.is_ascii_digit() => {
                // Numbers like `1e5` must not yield an identifier `e5`
                i = ident_end(bytes, i);
                prev_significant = Some(b'0');
            }
            b if b.is_ascii_whitespace() => i += 1,
            _ => {
                prev_significant = Some(b);
                i += 1;
            }
        }
    }

    declarations
}

/// Keywords after which an expression, and so a regex literal, may start
const EXPRESSION_KEYWORDS: [&str; 14] = [
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

/// Whether a `/` after `prev` opens a regex literal rather than dividing
///
/// `<` is left out so JSX closing tags like `</div>` read as division.
fn starts_regex(prev: Option<u8>) -> bool {
    match prev {
        None => true,
        Some(b) => b"(,=:[!&|?{};+-*%>~^".contains(&b),
    }
}

fn read_declaration(src: &str, keyword_offset: usize, after_keyword: usize) -> Option<Declaration<'_>> {
    let bytes = src.as_bytes();

    let name_start = skip_gap(bytes, after_keyword);
    if name_start == after_keyword || !bytes.get(name_start).copied().is_some_and(is_ident_start) {
        // Destructuring patterns bind no single name
        return None;
    }
    let name_end = ident_end(bytes, name_start);

    let eq = skip_gap(bytes, name_end);
    if bytes.get(eq) != Some(&b'=') || matches!(bytes.get(eq + 1), Some(b'=' | b'>')) {
        return None;
    }

    let init_offset = skip_gap(bytes, eq + 1);
    match bytes.get(init_offset) {
        Some(b'[' | b'{') => Some(Declaration {
            name: &src[name_start..name_end],
            keyword_offset,
            init_offset,
        }),
        _ => None,
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

fn ident_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_ident_continue(bytes[i]) {
        i += 1;
    }
    i
}

/// Skips whitespace and comments
fn skip_gap(bytes: &[u8], mut i: usize) -> usize {
    loop {
        match bytes.get(i) {
            Some(b) if b.is_ascii_whitespace() => i += 1,
            Some(b'/') if bytes.get(i + 1) == Some(&b'/') => i = skip_line_comment(bytes, i),
            Some(b'/') if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i),
            _ => return i,
        }
    }
}

fn skip_line_comment(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    i
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    bytes.len()
}

/// Skips a regex literal with its flags
///
/// A `/` inside a character class does not close the literal. Regex literals
/// cannot span lines, so a stray `/` stops at the line break.
fn skip_regex(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    let mut in_class = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b'[' => {
                in_class = true;
                i += 1;
            }
            b']' => {
                in_class = false;
                i += 1;
            }
            b'/' if !in_class => return ident_end(bytes, i + 1),
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Skips a `'` or `"` string
///
/// Plain strings cannot span lines, so an unterminated quote (typically an
/// apostrophe in JSX text) stops at the line break instead of swallowing
/// the rest of the file.
fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_template(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return i + 1,
            b'$' if bytes.get(i + 1) == Some(&b'{') => i = skip_interpolation(bytes, i + 2),
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_interpolation(bytes: &[u8], mut i: usize) -> usize {
    let mut depth = 1usize;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = skip_quoted(bytes, i),
            b'`' => i = skip_template(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line_comment(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i),
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(src: &str) -> Vec<&str> {
        const_declarations(src).iter().map(|d| d.name).collect()
    }

    #[test]
    fn test_finds_array_and_object_initializers() {
        let src = "const products = [];\nconst product = {};\nconst title = 'Shop';";
        assert_eq!(names(src), vec!["products", "product"]);
    }

    #[test]
    fn test_offsets_point_at_keyword_and_bracket() {
        let src = "  const faqs = [1];";
        let decls = const_declarations(src);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].keyword_offset, 2);
        assert_eq!(decls[0].init_offset, src.find('[').unwrap());
    }

    #[test]
    fn test_declarations_inside_component_body() {
        let src = r#"
export default function Page() {
  const [open, setOpen] = useState(false);
  const team = [{ name: 'Ada' }];
  return <div>{team.length}</div>;
}
"#;
        assert_eq!(names(src), vec!["team"]);
    }

    #[test]
    fn test_let_and_var_ignored() {
        let src = "let products = [];\nvar posts = [];";
        assert!(names(src).is_empty());
    }

    #[test]
    fn test_declarations_in_strings_and_comments_ignored() {
        let src = r#"
// const products = [];
/* const posts = []; */
const label = "const team = [";
const note = `const faqs = {`;
const results = [];
"#;
        assert_eq!(names(src), vec!["results"]);
    }

    #[test]
    fn test_comments_between_tokens() {
        let src = "const /* data */ categories /* here */ = // list\n [];";
        assert_eq!(names(src), vec!["categories"]);
    }

    #[test]
    fn test_comparisons_and_arrows_are_not_initializers() {
        let src = "const posts = () => [];\nconst team = useMemo(() => [], []);";
        assert!(names(src).is_empty());
    }

    #[test]
    fn test_property_named_const_ignored() {
        let src = "config.const = [];\nconst posts = [];";
        assert_eq!(names(src), vec!["posts"]);
    }

    #[test]
    fn test_identifier_prefix_is_not_keyword() {
        let src = "constant products = [];\nmyconst posts = [];";
        assert!(names(src).is_empty());
    }

    #[test]
    fn test_apostrophe_in_jsx_text_does_not_hide_later_declarations() {
        let src = "const a = <p>Don't miss out</p>;\nconst products = [];";
        assert_eq!(names(src), vec!["products"]);
    }

    #[test]
    fn test_template_interpolation_with_braces() {
        let src = "const cls = `grid ${open ? `a` : 'b'} ${ {x: 1}.x }`;\nconst faqs = [];";
        assert_eq!(names(src), vec!["faqs"]);
    }

    #[test]
    fn test_repeated_names_are_all_reported() {
        let src = "const posts = [];\nfunction A() { const posts = [1]; }";
        let decls = const_declarations(src);
        assert_eq!(decls.len(), 2);
        assert!(decls[0].init_offset < decls[1].init_offset);
    }

    #[test]
    fn test_unicode_identifiers_and_text() {
        let src = "const café = [];\nconst título = 'ñ';\nconst posts = [];";
        assert_eq!(names(src), vec!["café", "posts"]);
    }

    #[test]
    fn test_unterminated_block_comment_ends_scan() {
        let src = "const posts = [];\n/* never closed const team = [];";
        assert_eq!(names(src), vec!["posts"]);
    }

    #[test]
    fn test_regex_with_comment_opener_does_not_hide_declarations() {
        let src = "const clean = s.replace(/a\\/*/g, '');\nconst products = [];";
        assert_eq!(names(src), vec!["products"]);
    }

    #[test]
    fn test_regex_character_class_with_slash() {
        let src = "const re = /[/*'`]+/gi;\nconst faqs = [];";
        assert_eq!(names(src), vec!["faqs"]);
    }

    #[test]
    fn test_regex_after_keyword() {
        let src = "function isPath(x) { return /^\\/*$/.test(x); }\nconst posts = [];";
        assert_eq!(names(src), vec!["posts"]);
    }

    #[test]
    fn test_division_is_not_a_regex() {
        let src = "const half = total / 2; /* note */ const team = [];\nconst ratio = (a) / b / c;\nconst faqs = [];";
        assert_eq!(names(src), vec!["team", "faqs"]);
    }

    #[test]
    fn test_jsx_closing_tags_are_not_regexes() {
        let src = "const a = <p>1/2 off</p>;\nconst hero = <div><span>x</span></div>; const posts = [];";
        assert_eq!(names(src), vec!["posts"]);
    }
}
