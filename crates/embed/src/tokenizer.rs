//! Word tokenizer for the hashing embedder
//!
//! Lower-cases the input and splits on whitespace and ASCII punctuation.
//! Punctuation is dropped rather than kept as tokens.

/// Split text into lower-case word tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_whitespace() || is_punctuation(ch) {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.extend(ch.to_lowercase());
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Adjacent token pairs, joined by a single space
pub fn bigrams(tokens: &[String]) -> impl Iterator<Item = String> + '_ {
    tokens.windows(2).map(|w| format!("{} {}", w[0], w[1]))
}

fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '!' | '"'
            | '#'
            | '$'
            | '%'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | '+'
            | ','
            | '-'
            | '.'
            | '/'
            | ':'
            | ';'
            | '<'
            | '='
            | '>'
            | '?'
            | '@'
            | '['
            | '\\'
            | ']'
            | '^'
            | '_'
            | '`'
            | '{'
            | '|'
            | '}'
            | '~'
    )
}
