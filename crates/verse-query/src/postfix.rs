//! Infix to postfix conversion (shunting-yard)
//!
//! Operators are left-associative; `+` binds tighter than `,`. Malformed
//! input is tolerated: an unmatched `)` only flushes operators, and unmatched
//! `(` are dropped at the end. The output never contains parentheses.

use crate::lexer::Token;

/// Convert infix tokens into postfix (Reverse Polish) order
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<&Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Word(_) => output.push(token.clone()),
            Token::Operator(op) => {
                while let Some(Token::Operator(top)) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(Token::Operator(*top));
                    stack.pop();
                }
                stack.push(token);
            }
            Token::LParen => stack.push(token),
            Token::RParen => {
                while let Some(top) = stack.pop() {
                    if *top == Token::LParen {
                        break;
                    }
                    output.push(top.clone());
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        if let Token::Operator(_) = top {
            output.push(top.clone());
        }
    }

    output
}

/// True when every `(` has a matching `)` and no `)` comes first
pub fn is_balanced(tokens: &[Token]) -> bool {
    let mut depth = 0usize;
    for token in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, Operator};

    const AND: Token = Token::Operator(Operator::And);
    const OR: Token = Token::Operator(Operator::Or);

    fn w(s: &str) -> Token {
        Token::word(s)
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        // A + B , C -> A B + C ,
        let tokens = vec![w("A"), AND, w("B"), OR, w("C")];
        assert_eq!(to_postfix(&tokens), vec![w("A"), w("B"), AND, w("C"), OR]);

        // A , B + C -> A B C + ,
        let tokens = vec![w("A"), OR, w("B"), AND, w("C")];
        assert_eq!(to_postfix(&tokens), vec![w("A"), w("B"), w("C"), AND, OR]);
    }

    #[test]
    fn test_parentheses() {
        // A + (B , C) -> A B C , +
        let tokens = vec![w("A"), AND, Token::LParen, w("B"), OR, w("C"), Token::RParen];
        assert_eq!(to_postfix(&tokens), vec![w("A"), w("B"), w("C"), OR, AND]);
    }

    #[test]
    fn test_left_associative() {
        let tokens = tokenize("a , b , c");
        assert_eq!(to_postfix(&tokens), vec![w("a"), w("b"), OR, w("c"), OR]);
    }

    #[test]
    fn test_unmatched_open_paren_dropped() {
        let tokens = tokenize("(a + b");
        assert_eq!(to_postfix(&tokens), vec![w("a"), w("b"), AND]);
        assert!(!is_balanced(&tokens));
    }

    #[test]
    fn test_unmatched_close_paren_tolerated() {
        let tokens = tokenize("a + b) , c");
        assert_eq!(to_postfix(&tokens), vec![w("a"), w("b"), AND, w("c"), OR]);
        assert!(!is_balanced(&tokens));
    }

    #[test]
    fn test_empty() {
        assert!(to_postfix(&[]).is_empty());
        assert!(to_postfix(&[Token::LParen, Token::RParen]).is_empty());
        assert!(is_balanced(&[]));
    }

    #[test]
    fn test_balance() {
        assert!(is_balanced(&tokenize("((a , b) + c)")));
        assert!(!is_balanced(&tokenize(")a(")));
    }
}
