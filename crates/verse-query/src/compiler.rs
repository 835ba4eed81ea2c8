//! Postfix to SQL predicate compilation
//!
//! Each word becomes `<column> REGEXP ?` bound to a word-boundary pattern, so
//! `grace` never matches inside `disgrace`. Operators fold the two predicates
//! beneath them into a parenthesized `AND`/`OR`. The builder never fails: an
//! empty result compiles to `1=0`.

use crate::lexer::{self, Token};
use crate::postfix;
use serde::{Deserialize, Serialize};
use tracing::debug;
use verse_core::predicate::{Predicate, VERSE_COLUMN};

/// Regex pattern matching `word` as a whole word
pub fn word_boundary_pattern(word: &str) -> String {
    format!(r"\b{}\b", regex::escape(word))
}

/// Outcome of folding a postfix sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltPredicate {
    pub predicate: Predicate,
    /// Operators skipped for lack of operands
    pub skipped_operators: usize,
    /// Operands left over beneath the final predicate
    pub dangling_operands: usize,
}

impl BuiltPredicate {
    pub fn is_well_formed(&self) -> bool {
        self.skipped_operators == 0 && self.dangling_operands == 0
    }
}

/// Fold postfix tokens into a predicate over `column`
pub fn build_predicate(postfix: &[Token], column: &str) -> BuiltPredicate {
    let mut stack: Vec<Predicate> = Vec::new();
    let mut skipped_operators = 0;

    for token in postfix {
        match token {
            Token::Word(word) => {
                stack.push(Predicate::regexp(column, word_boundary_pattern(word)));
            }
            Token::Operator(op) => {
                if stack.len() < 2 {
                    debug!("Skipping operator {:?} with {} operand(s)", op, stack.len());
                    skipped_operators += 1;
                    continue;
                }
                // right operand is on top
                let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                    continue;
                };
                stack.push(match op {
                    lexer::Operator::And => Predicate::and(left, right),
                    lexer::Operator::Or => Predicate::or(left, right),
                });
            }
            Token::LParen | Token::RParen => {}
        }
    }

    let dangling_operands = stack.len().saturating_sub(1);
    let predicate = stack.pop().unwrap_or_else(Predicate::never);

    BuiltPredicate {
        predicate,
        skipped_operators,
        dangling_operands,
    }
}

/// Fold postfix tokens into a predicate over the verse text column
pub fn build_sql_from_postfix(postfix: &[Token]) -> Predicate {
    build_predicate(postfix, VERSE_COLUMN).predicate
}

/// A keyword expression compiled end to end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledExpression {
    pub tokens: Vec<Token>,
    pub postfix: Vec<Token>,
    pub predicate: Predicate,
    /// Distinct words, in first-occurrence order, for highlighting
    pub terms: Vec<String>,
    /// Unbalanced parentheses, stray operators or leftover operands
    pub malformed: bool,
}

/// Tokenize, reorder and compile `expression` against `column`
pub fn compile_expression(expression: &str, column: &str) -> CompiledExpression {
    let tokens = lexer::tokenize(expression);
    let postfix = postfix::to_postfix(&tokens);
    let built = build_predicate(&postfix, column);
    let malformed = !built.is_well_formed() || !postfix::is_balanced(&tokens);
    let terms = lexer::words(&tokens);

    if malformed {
        debug!("Expression {:?} is malformed, compiled leniently", expression);
    }

    CompiledExpression {
        tokens,
        postfix,
        predicate: built.predicate,
        terms,
        malformed,
    }
}
