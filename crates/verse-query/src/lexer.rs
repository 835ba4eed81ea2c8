//! Boolean keyword expression lexer using logos
//!
//! `+` and the word `AND` mean AND, `,` and the word `OR` mean OR (keywords
//! match case-insensitively and only as whole words, so `android` is a word).
//! Whitespace separates tokens; any other character is skipped.

use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `+`
    And,
    /// `,`
    Or,
}

impl Operator {
    /// Binding strength: AND binds tighter than OR
    pub fn precedence(self) -> u8 {
        match self {
            Operator::And => 2,
            Operator::Or => 1,
        }
    }

    /// SQL keyword used when combining predicates
    pub fn sql_keyword(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }

    /// Symbol in the normalized expression syntax
    pub fn symbol(self) -> char {
        match self {
            Operator::And => '+',
            Operator::Or => ',',
        }
    }
}

/// Expression tokens
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("+", |_| Operator::And)]
    #[token("and", |_| Operator::And, ignore(ascii_case))]
    #[token(",", |_| Operator::Or)]
    #[token("or", |_| Operator::Or, ignore(ascii_case))]
    Operator(Operator),

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"[A-Za-z0-9_]+", |lex| lex.slice().to_string())]
    Word(String),
}

impl Token {
    /// Shorthand for building word tokens
    pub fn word(w: impl Into<String>) -> Self {
        Token::Word(w.into())
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Word(w) => f.write_str(w),
        }
    }
}

/// Tokenize a keyword expression
pub fn tokenize(input: &str) -> Vec<Token> {
    Token::lexer(input).filter_map(|r| r.ok()).collect()
}

/// Distinct words of a token sequence, in first-occurrence order
pub fn words(tokens: &[Token]) -> Vec<String> {
    let mut seen = Vec::new();
    for word in tokens.iter().filter_map(Token::as_word) {
        if !seen.iter().any(|w: &String| w == word) {
            seen.push(word.to_string());
        }
    }
    seen
}

/// Render tokens back into the normalized `a + (b , c)` form
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const AND: Token = Token::Operator(Operator::And);
    const OR: Token = Token::Operator(Operator::Or);

    #[test]
    fn test_simple_expression() {
        assert_eq!(
            tokenize("love + hope"),
            vec![Token::word("love"), AND, Token::word("hope")]
        );
    }

    #[test]
    fn test_grouped_expression() {
        assert_eq!(
            tokenize("(love + hope) , faith"),
            vec![
                Token::LParen,
                Token::word("love"),
                AND,
                Token::word("hope"),
                Token::RParen,
                OR,
                Token::word("faith"),
            ]
        );
    }

    #[test]
    fn test_natural_keywords() {
        assert_eq!(
            tokenize("grace AND truth or Mercy"),
            vec![
                Token::word("grace"),
                AND,
                Token::word("truth"),
                OR,
                Token::word("Mercy"),
            ]
        );
        assert_eq!(tokenize("And"), vec![AND]);
    }

    #[test]
    fn test_keywords_only_as_whole_words() {
        assert_eq!(
            tokenize("android orchard band"),
            vec![
                Token::word("android"),
                Token::word("orchard"),
                Token::word("band"),
            ]
        );
    }

    #[test]
    fn test_no_whitespace_needed_around_symbols() {
        assert_eq!(
            tokenize("(a,b)+c"),
            vec![
                Token::LParen,
                Token::word("a"),
                OR,
                Token::word("b"),
                Token::RParen,
                AND,
                Token::word("c"),
            ]
        );
    }

    #[test]
    fn test_unknown_characters_skipped() {
        assert_eq!(
            tokenize("what's love?"),
            vec![Token::word("what"), Token::word("s"), Token::word("love")]
        );
        assert_eq!(
            tokenize("John 3:16"),
            vec![Token::word("John"), Token::word("3"), Token::word("16")]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn test_words_distinct_in_order() {
        let tokens = tokenize("(love , hope) + love , faith_2");
        assert_eq!(words(&tokens), vec!["love", "hope", "faith_2"]);
    }

    #[test]
    fn test_render() {
        let tokens = tokenize("(love and hope)or faith");
        assert_eq!(render(&tokens), "( love + hope ) , faith");
    }
}
