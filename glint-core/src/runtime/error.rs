//! Runtime errors

use thiserror::Error;

/// What went wrong while executing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeErrorKind {
    #[error("Operand must be a number.")]
    OperandMustBeNumber,

    #[error("Operands must be numbers.")]
    OperandsMustBeNumbers,

    #[error("Operands must be two numbers or two strings.")]
    OperandsMustBeNumbersOrStrings,

    #[error("Undefined variable '{0}'.")]
    UndefinedVariable(String),

    #[error("Stack overflow.")]
    StackOverflow,

    #[error("Stack underflow.")]
    StackUnderflow,

    #[error("Unknown opcode {0}.")]
    InvalidOpcode(u8),

    #[error("Instruction operand runs past the end of the chunk.")]
    MalformedOperand,

    #[error("Constant index {0} is out of range.")]
    ConstantOutOfRange(usize),

    #[error("Global name operand is not a string.")]
    NonStringName,

    #[error("Failed to write output: {0}")]
    Output(String),
}

/// A runtime error with the source line of the faulting instruction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}\n[line {}] in script", line_label(.line))]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub line: Option<usize>,
}

fn line_label(line: &Option<usize>) -> String {
    match line {
        Some(line) => line.to_string(),
        None => "?".to_string(),
    }
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, line: Option<usize>) -> Self {
        Self { kind, line }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = RuntimeError::new(RuntimeErrorKind::OperandsMustBeNumbers, Some(3));
        assert_eq!(err.to_string(), "Operands must be numbers.\n[line 3] in script");

        let err = RuntimeError::new(RuntimeErrorKind::UndefinedVariable("x".into()), None);
        assert_eq!(err.to_string(), "Undefined variable 'x'.\n[line ?] in script");
    }
}
