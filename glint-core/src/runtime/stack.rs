//! Operand stack

use super::error::RuntimeErrorKind;
use super::value::Value;

#[derive(Debug, Clone)]
pub struct Stack {
    values: Vec<Value>,
    max_size: usize,
}

impl Stack {
    pub fn new(initial_capacity: usize, max_size: usize) -> Self {
        Self {
            values: Vec::with_capacity(initial_capacity.min(max_size)),
            max_size,
        }
    }

    pub fn push(&mut self, value: Value) -> Result<(), RuntimeErrorKind> {
        if self.values.len() >= self.max_size {
            return Err(RuntimeErrorKind::StackOverflow);
        }
        self.values.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Value, RuntimeErrorKind> {
        self.values.pop().ok_or(RuntimeErrorKind::StackUnderflow)
    }

    /// Value `distance` slots below the top (0 is the top)
    pub fn peek(&self, distance: usize) -> Result<&Value, RuntimeErrorKind> {
        self.values
            .len()
            .checked_sub(distance + 1)
            .map(|idx| &self.values[idx])
            .ok_or(RuntimeErrorKind::StackUnderflow)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Bottom to top
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}
