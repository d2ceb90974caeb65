//! Operator implementations
//!
//! Operands are type-checked while still on the stack, so a failed check
//! leaves the stack as it was.

use super::VM;
use crate::runtime::error::RuntimeErrorKind;
use crate::runtime::value::Value;

/// Top two stack values as numbers, left operand first
fn number_operands(vm: &VM) -> Result<(f64, f64), RuntimeErrorKind> {
    let b = vm.stack.peek(0)?;
    let a = vm.stack.peek(1)?;
    match (a.as_number(), b.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(RuntimeErrorKind::OperandsMustBeNumbers),
    }
}

fn replace_top_two(vm: &mut VM, result: Value) -> Result<(), RuntimeErrorKind> {
    vm.stack.pop()?;
    vm.stack.pop()?;
    vm.stack.push(result)
}

/// Numeric binary operator
pub(super) fn arithmetic(vm: &mut VM, op: fn(f64, f64) -> f64) -> Result<(), RuntimeErrorKind> {
    let (a, b) = number_operands(vm)?;
    replace_top_two(vm, Value::Number(op(a, b)))
}

/// Numeric comparison
pub(super) fn compare(vm: &mut VM, op: fn(f64, f64) -> bool) -> Result<(), RuntimeErrorKind> {
    let (a, b) = number_operands(vm)?;
    replace_top_two(vm, Value::Bool(op(a, b)))
}

/// Numeric addition or string concatenation
pub(super) fn add(vm: &mut VM) -> Result<(), RuntimeErrorKind> {
    let b = vm.stack.peek(0)?;
    let a = vm.stack.peek(1)?;

    let result = match (a, b) {
        (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
        _ => match (a.as_string(), b.as_string()) {
            (Some(a), Some(b)) => {
                let mut chars = String::with_capacity(a.len() + b.len());
                chars.push_str(a.as_str());
                chars.push_str(b.as_str());
                Value::string(vm.heap.intern_owned(chars))
            }
            _ => return Err(RuntimeErrorKind::OperandsMustBeNumbersOrStrings),
        },
    };
    replace_top_two(vm, result)
}

pub(super) fn negate(vm: &mut VM) -> Result<(), RuntimeErrorKind> {
    let n = vm
        .stack
        .peek(0)?
        .as_number()
        .ok_or(RuntimeErrorKind::OperandMustBeNumber)?;
    vm.stack.pop()?;
    vm.stack.push(Value::Number(-n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm_with(values: &[Value]) -> VM {
        let mut vm = VM::capturing();
        for value in values {
            vm.stack.push(value.clone()).unwrap();
        }
        vm
    }

    #[test]
    fn test_failed_check_leaves_stack() {
        let mut vm = vm_with(&[Value::Number(1.0), Value::Bool(true)]);
        assert_eq!(
            arithmetic(&mut vm, |a, b| a - b),
            Err(RuntimeErrorKind::OperandsMustBeNumbers)
        );
        assert_eq!(vm.stack().len(), 2);

        let mut vm = vm_with(&[Value::Nil]);
        assert_eq!(negate(&mut vm), Err(RuntimeErrorKind::OperandMustBeNumber));
        assert_eq!(vm.stack(), &[Value::Nil]);
    }

    #[test]
    fn test_concatenation_interns() {
        let mut vm = VM::capturing();
        let foo = vm.heap.string_value("foo");
        let bar = vm.heap.string_value("bar");
        let expected = vm.heap.string_value("foobar");
        vm.stack.push(foo).unwrap();
        vm.stack.push(bar).unwrap();
        add(&mut vm).unwrap();
        assert_eq!(vm.stack(), &[expected]);
    }

    #[test]
    fn test_mixed_add_is_an_error() {
        let mut vm = VM::capturing();
        let s = vm.heap.string_value("n");
        vm.stack.push(s).unwrap();
        vm.stack.push(Value::Number(1.0)).unwrap();
        assert_eq!(
            add(&mut vm),
            Err(RuntimeErrorKind::OperandsMustBeNumbersOrStrings)
        );
        assert_eq!(vm.stack().len(), 2);
    }

    #[test]
    fn test_modulo_and_comparison() {
        let mut vm = vm_with(&[Value::Number(7.5), Value::Number(2.0)]);
        arithmetic(&mut vm, |a, b| a % b).unwrap();
        assert_eq!(vm.stack(), &[Value::Number(1.5)]);

        let mut vm = vm_with(&[Value::Number(1.0), Value::Number(2.0)]);
        compare(&mut vm, |a, b| a < b).unwrap();
        assert_eq!(vm.stack(), &[Value::Bool(true)]);
    }
}
