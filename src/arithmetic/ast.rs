/// 1-based line and column of the first character of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64, Position),
    Identifier(String, Position),
    Negate(Box<Expr>, Position),
    Binary(Operator, Box<Expr>, Box<Expr>, Position),
}

impl Expr {
    pub fn number(value: f64, position: Position) -> Self {
        Expr::Number(value, position)
    }

    pub fn identifier<S: Into<String>>(name: S, position: Position) -> Self {
        Expr::Identifier(name.into(), position)
    }

    pub fn negate(operand: Expr, position: Position) -> Self {
        Expr::Negate(Box::new(operand), position)
    }

    // A binary node sits where its left operand starts.
    pub fn binary(operator: Operator, lhs: Expr, rhs: Expr) -> Self {
        let position = lhs.position();
        Expr::Binary(operator, Box::new(lhs), Box::new(rhs), position)
    }

    pub fn position(&self) -> Position {
        match self {
            Expr::Number(_, p)
            | Expr::Identifier(_, p)
            | Expr::Negate(_, p)
            | Expr::Binary(_, _, _, p) => *p,
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(n, _) => write!(f, "{}", n),
            Expr::Identifier(name, _) => f.write_str(name),
            Expr::Negate(operand, _) => write!(f, "(- {})", operand),
            Expr::Binary(op, lhs, rhs, _) => write!(f, "({} {} {})", op.symbol(), lhs, rhs),
        }
    }
}
