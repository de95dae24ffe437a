use crate::{Problem, Rational};
use std::fmt;
use std::iter::Peekable;
use std::slice::Iter;

pub mod token;
use token::{tokenize, Token};

/// Deepest parenthesis nesting the parser accepts
const MAX_DEPTH: usize = 32;

/// How tightly an [`Operator`] binds, multiplication and division bind tighter
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Additive,
    Multiplicative,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn tier(self) -> Tier {
        match self {
            Operator::Add | Operator::Subtract => Tier::Additive,
            Operator::Multiply | Operator::Divide => Tier::Multiplicative,
        }
    }

    /// The glyph written on exercise sheets
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    pub fn apply(self, left: Rational, right: Rational) -> Result<Rational, Problem> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => left.checked_div(right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An arithmetic expression over exact values
///
/// A parsed tree mirrors how the text is read: an unparenthesised run is nested
/// the way precedence and left-to-right order would group it, and parentheses
/// survive as [`Expression::Group`]. Trees from [`Expression::parse`],
/// [`Expression::flat`] and the generator write out to text that parses back to
/// the same tree. [`Expression::binary`] performs no such check, so a tree like
/// `binary(Subtract, a, binary(Add, b, c))` prints as `a - b + c`, which reads
/// back grouped the other way.
///
/// # Example
///
/// ```
/// use fraction_drill::{Expression, Rational};
/// let xpr: Expression = "1/2 + 1/4 × 2".parse().unwrap();
/// assert_eq!(xpr.evaluate(), Ok(Rational::one()));
/// assert_eq!(xpr.to_string(), "1/2 + 1/4 × 2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    Literal(Rational),
    Binary(Operator, Box<Expression>, Box<Expression>),
    Group(Box<Expression>),
}

impl Expression {
    pub fn literal(value: Rational) -> Self {
        Expression::Literal(value)
    }

    /// Join two operands as given, callers wrap a child in [`Expression::group`]
    /// where precedence would regroup it
    pub fn binary(op: Operator, left: Expression, right: Expression) -> Self {
        Expression::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn group(inner: Expression) -> Self {
        Expression::Group(Box::new(inner))
    }

    /// `a op1 b op2 c` without parentheses, nested by precedence
    pub fn flat(a: Expression, op1: Operator, b: Expression, op2: Operator, c: Expression) -> Self {
        if op2.tier() > op1.tier() {
            Self::binary(op1, a, Self::binary(op2, b, c))
        } else {
            Self::binary(op2, Self::binary(op1, a, b), c)
        }
    }

    /// Exact value of the expression
    pub fn evaluate(&self) -> Result<Rational, Problem> {
        match self {
            Expression::Literal(r) => Ok(r.clone()),
            Expression::Binary(op, a, b) => op.apply(a.evaluate()?, b.evaluate()?),
            Expression::Group(inner) => inner.evaluate(),
        }
    }

    pub fn operand_count(&self) -> usize {
        match self {
            Expression::Literal(_) => 1,
            Expression::Binary(_, a, b) => a.operand_count() + b.operand_count(),
            Expression::Group(inner) => inner.operand_count(),
        }
    }

    pub fn parse(s: &str) -> Result<Self, Problem> {
        let tokens = tokenize(s)?;
        let mut parser = Parser {
            tokens: tokens.iter().peekable(),
            depth: 0,
        };
        let xpr = parser.sum()?;
        if parser.tokens.next().is_some() {
            return Err(Problem::MalformedExpression);
        }
        Ok(xpr)
    }
}

struct Parser<'a> {
    tokens: Peekable<Iter<'a, Token>>,
    depth: usize,
}

impl Parser<'_> {
    fn sum(&mut self) -> Result<Expression, Problem> {
        let mut left = self.product()?;
        while let Some(op) = self.operator(Tier::Additive) {
            let right = self.product()?;
            left = Expression::binary(op, left, right);
        }
        Ok(left)
    }

    fn product(&mut self) -> Result<Expression, Problem> {
        let mut left = self.atom()?;
        while let Some(op) = self.operator(Tier::Multiplicative) {
            let right = self.atom()?;
            left = Expression::binary(op, left, right);
        }
        Ok(left)
    }

    fn atom(&mut self) -> Result<Expression, Problem> {
        match self.tokens.next() {
            Some(Token::Number(n)) => Ok(Expression::Literal(n.clone())),
            Some(Token::Open) => {
                if self.depth == MAX_DEPTH {
                    return Err(Problem::MalformedExpression);
                }
                self.depth += 1;
                let inner = self.sum()?;
                self.depth -= 1;
                match self.tokens.next() {
                    Some(Token::Close) => Ok(Expression::group(inner)),
                    _ => Err(Problem::MalformedExpression),
                }
            }
            _ => Err(Problem::MalformedExpression),
        }
    }

    // Consume the next token only if it is an operator of this tier
    fn operator(&mut self, tier: Tier) -> Option<Operator> {
        match self.tokens.peek() {
            Some(Token::Operator(op)) if op.tier() == tier => {
                let op = *op;
                self.tokens.next();
                Some(op)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(r) => write!(f, "{r}"),
            Expression::Binary(op, a, b) => write!(f, "{a} {op} {b}"),
            Expression::Group(inner) => write!(f, "({inner})"),
        }
    }
}

impl std::str::FromStr for Expression {
    type Err = Problem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

/// Evaluate expression text to an exact value
///
/// # Example
///
/// ```
/// use fraction_drill::{evaluate, Rational};
/// assert_eq!(evaluate("1 + 2 × 3"), Ok(Rational::new(7)));
/// ```
pub fn evaluate(text: &str) -> Result<Rational, Problem> {
    Expression::parse(text)?.evaluate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(text: &str) -> String {
        evaluate(text).unwrap().to_string()
    }

    fn lit(n: i64) -> Expression {
        Expression::literal(Rational::new(n))
    }

    #[test]
    fn precedence() {
        assert_eq!(evaluate("1 + 2 × 3"), Ok(Rational::new(7)));
        assert_eq!(evaluate("6 ÷ 2 + 1"), Ok(Rational::new(4)));
        assert_eq!(evaluate("2 × 3 + 4"), Ok(Rational::new(10)));
        assert_eq!(evaluate("1/2 + 1/4 × 2"), Ok(Rational::one()));
    }

    #[test]
    fn same_tier_left_to_right() {
        assert_eq!(evaluate("8 - 3 - 2"), Ok(Rational::new(3)));
        assert_eq!(evaluate("8 ÷ 2 ÷ 2"), Ok(Rational::new(2)));
        assert_eq!(evaluate("8 ÷ 2 × 2"), Ok(Rational::new(8)));
        assert_eq!(evaluate("8 - 2 + 1"), Ok(Rational::new(7)));
    }

    #[test]
    fn fraction_answers() {
        assert_eq!(value("5/6 + 3/4 × 1/4"), "1'1/48");
        assert_eq!(value("4/7 + 8 × 1/3"), "3'5/21");
    }

    #[test]
    fn groups() {
        assert_eq!(evaluate("(1 + 2) × 3"), Ok(Rational::new(9)));
        assert_eq!(evaluate("3 × (1 + 2)"), Ok(Rational::new(9)));
        assert_eq!(evaluate("6 - (2 - 1)"), Ok(Rational::new(5)));
        assert_eq!(value("(1/2 + 1/3) ÷ 5"), "1/6");
        assert_eq!(evaluate("((2))"), Ok(Rational::new(2)));
    }

    #[test]
    fn single_operand() {
        assert_eq!(evaluate("2'1/2"), Rational::fraction(5, 2));
    }

    #[test]
    fn longer_than_sheets_use() {
        assert_eq!(evaluate("1 + 2 × 3 - 4 ÷ 2"), Ok(Rational::new(5)));
    }

    #[test]
    fn divide_by_zero() {
        assert_eq!(evaluate("3 ÷ (2 - 2)"), Err(Problem::DivideByZero));
        assert_eq!(evaluate("3 ÷ 0"), Err(Problem::DivideByZero));
    }

    #[test]
    fn malformed() {
        for text in ["", "1 +", "+ 1", "1 2", "(1 + 2", "1 + 2)", "()", "1 × × 2", "= 3"] {
            assert_eq!(evaluate(text), Err(Problem::MalformedExpression), "{text:?}");
        }
        assert_eq!(evaluate("1 + 3/0"), Err(Problem::MalformedNumber));
    }

    #[test]
    fn nesting_limit() {
        let deep = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(evaluate(&deep(MAX_DEPTH)), Ok(Rational::one()));
        assert_eq!(evaluate(&deep(MAX_DEPTH + 1)), Err(Problem::MalformedExpression));
        assert_eq!(evaluate(&deep(200_000)), Err(Problem::MalformedExpression));
        let siblings = vec!["(1)"; 100].join(" + ");
        assert_eq!(evaluate(&siblings), Ok(Rational::new(100)));
    }

    #[test]
    fn negative_results_are_values() {
        assert_eq!(evaluate("1 - 2"), Ok(Rational::new(-1)));
    }

    #[test]
    fn flat_nesting() {
        let tight = Expression::flat(lit(1), Operator::Add, lit(2), Operator::Multiply, lit(3));
        assert_eq!(tight.to_string(), "1 + 2 × 3");
        assert_eq!(tight.evaluate(), Ok(Rational::new(7)));
        assert_eq!("1 + 2 × 3".parse::<Expression>(), Ok(tight));

        let loose = Expression::flat(lit(8), Operator::Subtract, lit(3), Operator::Subtract, lit(2));
        assert_eq!("8 - 3 - 2".parse::<Expression>(), Ok(loose));
    }

    #[test]
    fn display_round_trip() {
        for text in ["(1/2 + 3) × 2'1/4", "7 - (2 ÷ 3)", "1 ÷ 2 ÷ 3", "9"] {
            let xpr: Expression = text.parse().unwrap();
            assert_eq!(xpr.to_string(), text);
        }
    }

    #[test]
    fn ungrouped_binary_regroups_when_read() {
        let xpr = Expression::binary(
            Operator::Subtract,
            lit(5),
            Expression::binary(Operator::Add, lit(2), lit(1)),
        );
        assert_eq!(xpr.evaluate(), Ok(Rational::new(2)));
        assert_eq!(xpr.to_string(), "5 - 2 + 1");
        assert_eq!(evaluate(&xpr.to_string()), Ok(Rational::new(4)));

        let grouped = Expression::binary(
            Operator::Subtract,
            lit(5),
            Expression::group(Expression::binary(Operator::Add, lit(2), lit(1))),
        );
        assert_eq!(grouped.to_string().parse::<Expression>(), Ok(grouped));
    }

    #[test]
    fn operand_counts() {
        let xpr: Expression = "(1 - 1/2) × 3".parse().unwrap();
        assert_eq!(xpr.operand_count(), 3);
        assert_eq!(lit(4).operand_count(), 1);
    }

    #[test]
    fn deterministic() {
        let text = "5/6 - 1/4 ÷ (2 + 1/3)";
        assert_eq!(evaluate(text), evaluate(text));
    }
}
