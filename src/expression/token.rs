use crate::expression::Operator;
use crate::rational::notation::MIXED_SEPARATOR;
use crate::{Problem, Rational};
use std::iter::Peekable;
use std::str::Chars;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(Rational),
    Operator(Operator),
    Open,
    Close,
}

/// Split expression text into tokens
///
/// A number is a run of digits, slashes and the mixed number separator with no
/// spaces inside, so `3/4` is one number while `3 / 4` is a division. Besides
/// `×` and `÷` the ASCII `*` and a free-standing `/` are accepted.
pub fn tokenize(s: &str) -> Result<Vec<Token>, Problem> {
    let mut tokens = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(&c) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' => consume_literal(&mut chars)?,
            '(' => Token::Open,
            ')' => Token::Close,
            '+' => Token::Operator(Operator::Add),
            '-' => Token::Operator(Operator::Subtract),
            '×' | '*' => Token::Operator(Operator::Multiply),
            '÷' | '/' => Token::Operator(Operator::Divide),
            _ => return Err(Problem::MalformedExpression),
        };
        if !matches!(token, Token::Number(_)) {
            chars.next();
        }
        tokens.push(token);
    }

    Ok(tokens)
}

// Consume a literal: digits, the fraction slash and the mixed number separator
fn consume_literal(c: &mut Peekable<Chars>) -> Result<Token, Problem> {
    let mut num = String::new();

    while let Some(&item) = c.peek() {
        match item {
            '0'..='9' | '/' | MIXED_SEPARATOR => num.push(item),
            _ => break,
        }
        c.next();
    }

    Ok(Token::Number(num.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaced() {
        let tokens = tokenize("(1/2 + 3) × 2'1/4").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Open,
                Token::Number(Rational::fraction(1, 2).unwrap()),
                Token::Operator(Operator::Add),
                Token::Number(Rational::new(3)),
                Token::Close,
                Token::Operator(Operator::Multiply),
                Token::Number(Rational::fraction(9, 4).unwrap()),
            ]
        );
    }

    #[test]
    fn ascii_operators() {
        let tokens = tokenize("6 / 2*3").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(Rational::new(6)),
                Token::Operator(Operator::Divide),
                Token::Number(Rational::new(2)),
                Token::Operator(Operator::Multiply),
                Token::Number(Rational::new(3)),
            ]
        );
    }

    #[test]
    fn bad_literal() {
        assert_eq!(tokenize("1 + 3/0"), Err(Problem::MalformedNumber));
        assert_eq!(tokenize("6/ 2"), Err(Problem::MalformedNumber));
    }

    #[test]
    fn stray_character() {
        assert_eq!(tokenize("1 + x"), Err(Problem::MalformedExpression));
        assert_eq!(tokenize("1.5 + 2"), Err(Problem::MalformedExpression));
    }

    #[test]
    fn mixed_literal() {
        assert_eq!(
            tokenize("1'1/48"),
            Ok(vec![Token::Number(Rational::fraction(49, 48).unwrap())])
        );
    }

    #[test]
    fn empty() {
        assert_eq!(tokenize("   "), Ok(Vec::new()));
    }
}
