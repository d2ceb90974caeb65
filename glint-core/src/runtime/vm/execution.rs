//! Fetch-decode-execute loop

use super::operators;
use super::VM;
use crate::runtime::bytecode::{Chunk, OpCode};
use crate::runtime::error::{RuntimeError, RuntimeErrorKind};
use crate::runtime::object::ObjString;
use crate::runtime::value::Value;
use std::io::Write;
use std::rc::Rc;

/// What the loop does after an instruction
enum Flow {
    Continue,
    Halt(Option<Value>),
}

/// Instruction cursor over one chunk
struct Frame<'c> {
    chunk: &'c Chunk,
    /// Next byte to read
    ip: usize,
    /// Offset of the instruction being executed, for error lines
    op_start: usize,
}

impl<'c> Frame<'c> {
    fn new(chunk: &'c Chunk) -> Self {
        Self {
            chunk,
            ip: 0,
            op_start: 0,
        }
    }

    fn read_byte(&mut self) -> Result<u8, RuntimeErrorKind> {
        let byte = *self
            .chunk
            .code
            .get(self.ip)
            .ok_or(RuntimeErrorKind::MalformedOperand)?;
        self.ip += 1;
        Ok(byte)
    }

    fn read_u16(&mut self) -> Result<u16, RuntimeErrorKind> {
        let value = self
            .chunk
            .read_u16(self.ip)
            .ok_or(RuntimeErrorKind::MalformedOperand)?;
        self.ip += 2;
        Ok(value)
    }

    fn constant(&self, idx: usize) -> Result<Value, RuntimeErrorKind> {
        self.chunk
            .constants
            .get(idx)
            .cloned()
            .ok_or(RuntimeErrorKind::ConstantOutOfRange(idx))
    }

    /// Global instructions name their variable by a string constant
    fn read_name(&mut self) -> Result<Rc<ObjString>, RuntimeErrorKind> {
        let idx = self.read_u16()? as usize;
        let value = self.constant(idx)?;
        value
            .as_string()
            .cloned()
            .ok_or(RuntimeErrorKind::NonStringName)
    }
}

/// Run `chunk` until `return`, the end of the code, or an error
pub(super) fn run(vm: &mut VM, chunk: &Chunk) -> Result<Option<Value>, RuntimeError> {
    let mut frame = Frame::new(chunk);

    loop {
        frame.op_start = frame.ip;
        let Some(&byte) = chunk.code.get(frame.ip) else {
            return Ok(None);
        };

        #[cfg(feature = "trace_execution")]
        trace_instruction(vm, chunk, frame.ip);

        frame.ip += 1;
        match step(vm, &mut frame, byte) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Halt(value)) => return Ok(value),
            Err(kind) => {
                return Err(RuntimeError::new(kind, chunk.line_for(frame.op_start)));
            }
        }
    }
}

fn step(vm: &mut VM, frame: &mut Frame<'_>, byte: u8) -> Result<Flow, RuntimeErrorKind> {
    use OpCode::*;

    let op = OpCode::try_from(byte).map_err(RuntimeErrorKind::InvalidOpcode)?;
    match op {
        Return => {
            if vm.stack.is_empty() {
                return Ok(Flow::Halt(None));
            }
            let value = vm.stack.pop()?;
            print_value(vm, &value)?;
            return Ok(Flow::Halt(Some(value)));
        }

        // ===== Constants =====
        Constant => {
            let idx = frame.read_byte()? as usize;
            vm.stack.push(frame.constant(idx)?)?;
        }
        ConstantLong => {
            let idx = frame.read_u16()? as usize;
            vm.stack.push(frame.constant(idx)?)?;
        }
        Nil => vm.stack.push(Value::Nil)?,
        True => vm.stack.push(Value::Bool(true))?,
        False => vm.stack.push(Value::Bool(false))?,

        Pop => {
            vm.stack.pop()?;
        }

        // ===== Globals =====
        GetGlobal => {
            let name = frame.read_name()?;
            let value = vm
                .globals
                .get(&name)
                .cloned()
                .ok_or_else(|| RuntimeErrorKind::UndefinedVariable(name.as_str().to_string()))?;
            vm.stack.push(value)?;
        }
        DefineGlobal => {
            let name = frame.read_name()?;
            let value = vm.stack.peek(0)?.clone();
            vm.globals.insert(name, value);
            vm.stack.pop()?;
        }
        SetGlobal => {
            let name = frame.read_name()?;
            // Assignment is an expression: the value stays on the stack
            let value = vm.stack.peek(0)?.clone();
            if !vm.globals.set_existing(&name, value) {
                return Err(RuntimeErrorKind::UndefinedVariable(
                    name.as_str().to_string(),
                ));
            }
        }

        // ===== Comparison =====
        Equal => {
            let b = vm.stack.pop()?;
            let a = vm.stack.pop()?;
            vm.stack.push(Value::Bool(a == b))?;
        }
        Greater => operators::compare(vm, |a, b| a > b)?,
        Less => operators::compare(vm, |a, b| a < b)?,

        // ===== Arithmetic =====
        Add => operators::add(vm)?,
        Subtract => operators::arithmetic(vm, |a, b| a - b)?,
        Multiply => operators::arithmetic(vm, |a, b| a * b)?,
        Divide => operators::arithmetic(vm, |a, b| a / b)?,
        Modulo => operators::arithmetic(vm, |a, b| a % b)?,
        Not => {
            let value = vm.stack.pop()?;
            vm.stack.push(Value::Bool(value.is_falsey()))?;
        }
        Negate => operators::negate(vm)?,

        Print => {
            let value = vm.stack.pop()?;
            print_value(vm, &value)?;
        }
    }
    Ok(Flow::Continue)
}

fn print_value(vm: &mut VM, value: &Value) -> Result<(), RuntimeErrorKind> {
    writeln!(vm.output, "{value}").map_err(|err| RuntimeErrorKind::Output(err.to_string()))
}

/// Log the stack and the instruction about to execute
#[cfg(feature = "trace_execution")]
fn trace_instruction(vm: &VM, chunk: &Chunk, offset: usize) {
    use crate::runtime::bytecode::disassemble_instruction;

    let stack: String = vm
        .stack
        .as_slice()
        .iter()
        .map(|value| format!("[ {value} ]"))
        .collect();
    let mut instruction = String::new();
    disassemble_instruction(chunk, offset, &mut instruction);
    tracing::trace!(
        target: "glint::vm",
        stack = %stack,
        "{}",
        instruction.trim_end()
    );
}
