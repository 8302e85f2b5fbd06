use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(pub usize);

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Program entry marker.
    Start,
    /// Reserve `n` storage cells.
    Allocate(usize),
    Store(usize),
    Load(usize),
    Constant(i64),
    Add,
    Subtract,
    Multiply,
    Divide,
    LessOrEqual,
    JumpIfFalse(Label),
    Jump(Label),
    /// No-op anchor for a jump target.
    Anchor(Label),
    Read,
    Write,
    /// Program termination marker.
    Halt,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Instruction::*;

        match *self {
            Start => write!(f, "INPP"),
            Allocate(cells) => write!(f, "AMEM {cells}"),
            Store(address) => write!(f, "ARMZ {address}"),
            Load(address) => write!(f, "CRVL {address}"),
            Constant(value) => write!(f, "CRCT {value}"),
            Add => write!(f, "SOMA"),
            Subtract => write!(f, "SUBT"),
            Multiply => write!(f, "MULT"),
            Divide => write!(f, "DIVI"),
            LessOrEqual => write!(f, "CMEG"),
            JumpIfFalse(label) => write!(f, "DSVF {label}"),
            Jump(label) => write!(f, "DSVS {label}"),
            Anchor(label) => write!(f, "{label}: NADA"),
            Read => write!(f, "LEIT"),
            Write => write!(f, "IMPR"),
            Halt => write!(f, "PARA"),
        }
    }
}

/// Renders an instruction stream one instruction per line.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a>(pub &'a [Instruction]);

impl Display for Listing<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for instruction in self.0 {
            writeln!(f, "{instruction}")?;
        }

        Ok(())
    }
}
