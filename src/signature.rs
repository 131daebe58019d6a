use alloc::{
    borrow::ToOwned as _,
    boxed::Box,
    string::{String, ToString as _},
    vec::Vec,
};

/// Ordered list of parameter names declared by a callable.
///
/// Built either from source text via [`Signature::parse`] or from an
/// explicit name list via [`Signature::from_names`] when no useful source
/// representation exists (wrapped or generated callables).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    names: Vec<Box<str>>,
}

impl Signature {
    #[inline]
    #[must_use]
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Box<str>>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Extracts the declared parameter names from a callable's source text.
    ///
    /// Recognized declaration shapes, in priority order: a class body with a
    /// `constructor(..)`, a call-style `name(..)` declaration, a single bare
    /// identifier shorthand, a parenthesized list followed by `=>` or a
    /// pipe-delimited closure list, and an anonymous `function`/`fn` form.
    ///
    /// Extraction never fails: unparseable input yields an empty signature.
    /// Comments, whitespace, type annotations and default-value expressions
    /// are stripped from the captured parameter text; destructured and rest
    /// parameters are kept as single opaque tokens.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let text = strip_comments(source);
        let names = capture_params(text.trim()).map_or_else(Vec::new, |params| split_params(&params));
        Self { names }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Bracket/quote state of a linear scan over declaration text.
#[derive(Default)]
struct Depth {
    paren: u32,
    bracket: u32,
    brace: u32,
    angle: u32,
    quote: Option<char>,
    escaped: bool,
}

impl Depth {
    /// Advances the state by the first char of `rest`.
    fn update(&mut self, rest: &str) {
        let Some(c) = rest.chars().next() else { return };
        if let Some(quote) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == quote {
                self.quote = None;
            }
            return;
        }
        match c {
            '"' | '`' => self.quote = Some(c),
            // a bare `'` is a lifetime marker unless it opens a char literal
            '\'' if is_char_literal(rest) => self.quote = Some('\''),
            '(' => self.paren += 1,
            ')' => self.paren = self.paren.saturating_sub(1),
            '[' => self.bracket += 1,
            ']' => self.bracket = self.bracket.saturating_sub(1),
            '{' => self.brace += 1,
            '}' => self.brace = self.brace.saturating_sub(1),
            '<' => self.angle += 1,
            // `=>` and `->` decrement at the floor, which is harmless
            '>' => self.angle = self.angle.saturating_sub(1),
            _ => {}
        }
    }

    fn is_top(&self) -> bool {
        self.quote.is_none() && self.paren == 0 && self.bracket == 0 && self.brace == 0 && self.angle == 0
    }
}

/// True if `rest` starts with a `'x'` / `'\x'` character literal.
fn is_char_literal(rest: &str) -> bool {
    let mut chars = rest.chars();
    if chars.next() != Some('\'') {
        return false;
    }
    match chars.next() {
        Some('\\') => {
            chars.next();
            chars.next() == Some('\'')
        }
        Some(c) if c != '\'' => chars.next() == Some('\''),
        _ => false,
    }
}

fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut i = 0;

    while i < source.len() {
        let rest = &source[i..];
        let c = rest.chars().next().unwrap();
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            i += c.len_utf8();
            continue;
        }
        if rest.starts_with("//") {
            // the newline stays, it separates tokens
            match rest.find('\n') {
                Some(end) => i += end,
                None => break,
            }
            continue;
        }
        if rest.starts_with("/*") {
            out.push(' ');
            match rest[2..].find("*/") {
                Some(end) => i += 2 + end + 2,
                None => break,
            }
            continue;
        }
        match c {
            '"' | '`' => quote = Some(c),
            '\'' if is_char_literal(rest) => quote = Some('\''),
            _ => {}
        }
        out.push(c);
        i += c.len_utf8();
    }
    out
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_ident(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(is_ident_char)
}

fn starts_with_word(text: &str, word: &str) -> bool {
    text.starts_with(word) && text[word.len()..].chars().next().map_or(true, |c| !is_ident_char(c))
}

fn find_word(text: &str, word: &str) -> Option<usize> {
    let mut start = 0;
    while let Some(pos) = text[start..].find(word) {
        let abs = start + pos;
        let before_ok = text[..abs].chars().next_back().map_or(true, |c| !is_ident_char(c));
        let after_ok = text[abs + word.len()..].chars().next().map_or(true, |c| !is_ident_char(c));
        if before_ok && after_ok {
            return Some(abs);
        }
        start = abs + word.len();
    }
    None
}

fn strip_keywords<'a>(text: &'a str, keywords: &[&str]) -> &'a str {
    let mut rest = text.trim_start();
    loop {
        let mut stripped = false;
        for keyword in keywords {
            if starts_with_word(rest, keyword) {
                rest = rest[keyword.len()..].trim_start();
                stripped = true;
            }
        }
        if !stripped {
            return rest;
        }
    }
}

fn find_top_level(text: &str, needle: &str) -> Option<usize> {
    let mut depth = Depth::default();
    for (i, _) in text.char_indices() {
        if depth.is_top() && text[i..].starts_with(needle) {
            return Some(i);
        }
        depth.update(&text[i..]);
    }
    None
}

/// Captures the parenthesized group the text starts with (leading whitespace
/// allowed) and returns its inner text plus the byte offset past `)`.
fn capture_paren(text: &str) -> Option<(String, usize)> {
    let offset = text.len() - text.trim_start().len();
    let rest = &text[offset..];
    if !rest.starts_with('(') {
        return None;
    }
    let mut depth = Depth::default();
    for (i, c) in rest.char_indices() {
        depth.update(&rest[i..]);
        if i > 0 && c == ')' && depth.paren == 0 && depth.quote.is_none() {
            return Some((rest[1..i].to_owned(), offset + i + 1));
        }
    }
    None
}

fn capture_params(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    class_constructor(text)
        .or_else(|| call_style(text))
        .or_else(|| bare_shorthand(text))
        .or_else(|| arrow_list(text))
        .or_else(|| pipe_list(text))
        .or_else(|| keyword_anonymous(text))
}

/// Form (a): a class body. The parameter list is the `constructor(..)`
/// declaration wherever it sits in the body; a class without one has no
/// extractable parameters, regardless of other methods it declares.
fn class_constructor(text: &str) -> Option<String> {
    let rest = strip_keywords(text, &["export", "default", "abstract"]);
    if !starts_with_word(rest, "class") {
        return None;
    }
    let Some(idx) = find_word(rest, "constructor") else {
        return Some(String::new());
    };
    let after = &rest[idx + "constructor".len()..];
    Some(capture_paren(after).map_or_else(String::new, |(inner, _)| inner))
}

/// Form (b): a call-style `name(params)` declaration, anchored at the start
/// of the text after any declaration keywords.
fn call_style(text: &str) -> Option<String> {
    const PREFIXES: &[&str] = &[
        "export", "default", "public", "private", "protected", "static", "async", "pub", "function", "fn", "def", "get", "set",
    ];
    const NON_CALLEES: &[&str] = &["if", "for", "while", "switch", "match", "return", "new"];

    let rest = strip_keywords(text, PREFIXES);
    let end = rest
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(rest.len(), |(i, _)| i);
    let name = &rest[..end];
    if !is_ident(name) || NON_CALLEES.contains(&name) {
        return None;
    }
    capture_paren(&rest[end..]).map(|(inner, _)| inner)
}

/// Form (c): a single bare identifier, alone or in front of an arrow.
fn bare_shorthand(text: &str) -> Option<String> {
    let head = match find_top_level(text, "=>") {
        Some(idx) => &text[..idx],
        None => text,
    };
    let head = strip_keywords(head, &["async"]).trim_end();
    is_ident(head).then(|| head.to_string())
}

/// Form (d), arrow variant: `(params) => ..`.
fn arrow_list(text: &str) -> Option<String> {
    let rest = strip_keywords(text, &["async"]);
    let (inner, after) = capture_paren(rest)?;
    rest[after..].trim_start().starts_with("=>").then_some(inner)
}

/// Form (d), closure variant: `|params| ..`.
fn pipe_list(text: &str) -> Option<String> {
    let rest = strip_keywords(text, &["async", "move", "static"]);
    if rest.starts_with("||") {
        return Some(String::new());
    }
    let rest = rest.strip_prefix('|')?;
    let mut depth = Depth::default();
    for (i, c) in rest.char_indices() {
        if c == '|' && depth.is_top() {
            return Some(rest[..i].to_owned());
        }
        depth.update(&rest[i..]);
    }
    None
}

/// Form (e): an anonymous `function`/`fn` keyword declaration.
fn keyword_anonymous(text: &str) -> Option<String> {
    let rest = strip_keywords(text, &["export", "default", "pub", "async", "static"]);
    let rest = if starts_with_word(rest, "function") {
        &rest["function".len()..]
    } else if starts_with_word(rest, "fn") {
        &rest["fn".len()..]
    } else {
        return None;
    };
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('*').unwrap_or(rest);
    capture_paren(rest).map(|(inner, _)| inner)
}

fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = Depth::default();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if c == sep && depth.is_top() {
            pieces.push(&text[start..i]);
            start = i + c.len_utf8();
        } else {
            depth.update(&text[i..]);
        }
    }
    pieces.push(&text[start..]);
    pieces
}

fn split_params(params: &str) -> Vec<Box<str>> {
    let compact: String = params.chars().filter(|c| !c.is_whitespace()).collect();
    let mut names = Vec::new();
    for piece in split_top_level(&compact, ',') {
        let name = cut_declarators(piece);
        if !name.is_empty() {
            names.push(name.into());
        }
    }
    names
}

/// Cuts a parameter away from its type annotation (first top-level `:`) and
/// default value (first top-level `=`), whichever comes first.
fn cut_declarators(piece: &str) -> &str {
    let mut depth = Depth::default();
    let mut skip = false;
    for (i, c) in piece.char_indices() {
        if skip {
            skip = false;
            depth.update(&piece[i..]);
            continue;
        }
        if depth.is_top() {
            match c {
                ':' => {
                    if piece[i..].starts_with("::") {
                        skip = true;
                    } else {
                        return &piece[..i];
                    }
                }
                '=' => {
                    if piece[i..].starts_with("==") || piece[i..].starts_with("=>") {
                        skip = true;
                    } else if i > 0 && matches!(piece.as_bytes()[i - 1], b'!' | b'<' | b'>') {
                        // comparison operator, not a default marker
                    } else {
                        return &piece[..i];
                    }
                }
                _ => {}
            }
        }
        depth.update(&piece[i..]);
    }
    piece
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec, vec::Vec};

    use super::Signature;

    fn names(source: &str) -> Vec<String> {
        Signature::parse(source).iter().map(String::from).collect()
    }

    #[test]
    fn test_class_constructor() {
        assert_eq!(
            names("class Widget { constructor(width, height = 10) { this.width = width; } }"),
            vec!["width", "height"],
        );
    }

    #[test]
    fn test_class_without_constructor_is_empty() {
        assert_eq!(names("class Widget { area(scale) { return scale; } }"), Vec::<&str>::new());
    }

    #[test]
    fn test_class_constructor_after_other_methods() {
        assert_eq!(
            names("class Widget { area(scale) {} constructor(width) {} }"),
            vec!["width"],
        );
    }

    #[test]
    fn test_call_style() {
        assert_eq!(names("greet(name, punctuation)"), vec!["name", "punctuation"]);
        assert_eq!(names("greet ( name , punctuation )"), vec!["name", "punctuation"]);
    }

    #[test]
    fn test_function_keyword_named() {
        assert_eq!(names("function add(left, right)"), vec!["left", "right"]);
        assert_eq!(names("fn add(left: u32, right: u32)"), vec!["left", "right"]);
    }

    #[test]
    fn test_bare_identifier() {
        assert_eq!(names("value"), vec!["value"]);
        assert_eq!(names("value => value + 1"), vec!["value"]);
    }

    #[test]
    fn test_arrow_list() {
        assert_eq!(names("(left, right) => left + right"), vec!["left", "right"]);
        assert_eq!(names("async (conn) => conn"), vec!["conn"]);
    }

    #[test]
    fn test_closure_pipes() {
        assert_eq!(names("|left: u32, right: u32 = 2| left + right"), vec!["left", "right"]);
        assert_eq!(names("move |conn| conn"), vec!["conn"]);
        assert_eq!(names("|| 42"), Vec::<&str>::new());
    }

    #[test]
    fn test_keyword_anonymous() {
        assert_eq!(names("function (left, right) { return left; }"), vec!["left", "right"]);
        assert_eq!(names("function* (source) {}"), vec!["source"]);
    }

    #[test]
    fn test_defaults_are_stripped() {
        assert_eq!(names("greet(name = \"world\", punctuation = '!')"), vec!["name", "punctuation"]);
        assert_eq!(names("(count = compute(1, 2), label) =>"), vec!["count", "label"]);
    }

    #[test]
    fn test_default_with_comma_inside_string() {
        assert_eq!(names("greet(name = \"a,b\", other)"), vec!["name", "other"]);
    }

    #[test]
    fn test_default_with_nested_arrow() {
        assert_eq!(names("(callback = x => x * 2, seed) =>"), vec!["callback", "seed"]);
    }

    #[test]
    fn test_comments_are_stripped() {
        assert_eq!(
            names("greet(/* who to greet */ name, // trailing\n punctuation)"),
            vec!["name", "punctuation"],
        );
        assert_eq!(names("|value /* = 3 */, other|"), vec!["value", "other"]);
    }

    #[test]
    fn test_destructured_and_rest_stay_opaque() {
        assert_eq!(names("({a, b}, [c, d], ...rest) =>"), vec!["{a,b}", "[c,d]", "...rest"]);
    }

    #[test]
    fn test_generic_annotations() {
        assert_eq!(names("|map: BTreeMap<String, u8>, n: usize|"), vec!["map", "n"]);
    }

    #[test]
    fn test_lifetime_is_not_a_string_opener() {
        assert_eq!(names("|label: &'static str, count: u8|"), vec!["label", "count"]);
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(names("greet()"), Vec::<&str>::new());
        assert_eq!(names("() => {}"), Vec::<&str>::new());
    }

    #[test]
    fn test_unparseable_is_empty() {
        assert_eq!(names(""), Vec::<&str>::new());
        assert_eq!(names("12345"), Vec::<&str>::new());
        assert_eq!(names("???"), Vec::<&str>::new());
        assert_eq!(names("(unterminated"), Vec::<&str>::new());
    }

    #[test]
    fn test_from_names() {
        let signature = Signature::from_names(["first", "second"]);
        assert_eq!(signature.iter().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(signature.len(), 2);
        assert!(!signature.is_empty());
    }
}
