use crate::consts;
use rand::Rng;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    pub fn apply(self, a: i32, b: i32) -> i32 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }
}

/// An arithmetic question whose answer the player must find on the grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    pub a: i32,
    pub op: Operator,
    pub b: i32,
}

impl Question {
    pub fn new(a: i32, op: Operator, b: i32) -> Question {
        Question { a, op, b }
    }

    /// Draw both operands uniformly from
    /// [`OPERAND_RANGE`][consts::OPERAND_RANGE] and the operator uniformly
    /// from addition & subtraction
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Question {
        let a = rng.random_range(consts::OPERAND_RANGE);
        let b = rng.random_range(consts::OPERAND_RANGE);
        let op = if rng.random_bool(0.5) {
            Operator::Add
        } else {
            Operator::Subtract
        };
        Question { a, op, b }
    }

    /// Return the correct answer, which is negative when subtracting a larger
    /// operand
    pub fn answer(self) -> i32 {
        self.op.apply(self.a, self.b)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.a, self.op.symbol(), self.b)
    }
}
