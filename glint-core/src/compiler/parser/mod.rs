//! Single-pass compiler
//!
//! A Pratt parser that emits bytecode as it recognises each construct; no
//! syntax tree is built. All state lives in [`Compiler`], which borrows the
//! heap so string constants are interned where the VM will look for them.

pub mod error;
mod expr;
pub mod rules;
mod stmt;

pub use error::{CompileError, Diagnostic, DiagnosticLocation};
pub use rules::{rule_for, ParseFn, ParseRule, Precedence};

use crate::compiler::lexer::{Scanner, Token, TokenKind};
use crate::runtime::bytecode::{disassemble, Chunk, OpCode};
use crate::runtime::heap::Heap;
use crate::runtime::value::Value;
use glint_config::CompilerConfig;
use tracing::debug;

/// Chunk plus diagnostics. The chunk is best-effort when diagnostics exist
/// and must not be executed.
#[derive(Debug)]
pub struct CompileOutput {
    pub chunk: Chunk,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    pub fn succeeded(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_result(self) -> Result<Chunk, CompileError> {
        if self.diagnostics.is_empty() {
            Ok(self.chunk)
        } else {
            Err(CompileError {
                diagnostics: self.diagnostics,
            })
        }
    }
}

/// Deepest expression nesting compiled before giving up
pub const MAX_NESTING_DEPTH: usize = 256;

pub struct Compiler<'src, 'h> {
    scanner: Scanner<'src>,
    previous: Token<'src>,
    current: Token<'src>,
    had_error: bool,
    /// Suppresses diagnostics until the next statement boundary
    panic_mode: bool,
    /// Live `parse_precedence` frames
    depth: usize,
    chunk: Chunk,
    heap: &'h mut Heap,
    diagnostics: Vec<Diagnostic>,
    print_code: bool,
}

impl<'src, 'h> Compiler<'src, 'h> {
    pub fn new(source: &'src str, heap: &'h mut Heap, config: &CompilerConfig) -> Self {
        Self {
            scanner: Scanner::new(source),
            previous: Token::synthetic(TokenKind::Eof),
            current: Token::synthetic(TokenKind::Eof),
            had_error: false,
            panic_mode: false,
            depth: 0,
            chunk: Chunk::new(),
            heap,
            diagnostics: Vec::new(),
            print_code: config.print_code,
        }
    }

    /// Compile the whole source as one unit
    pub fn compile(mut self) -> CompileOutput {
        self.advance();
        while !self.matches(TokenKind::Eof) {
            self.declaration();
        }
        self.finish();

        debug!(
            target: "glint::compiler",
            code_len = self.chunk.code.len(),
            constants = self.chunk.constants.len(),
            errors = self.diagnostics.len(),
            "compiled"
        );
        CompileOutput {
            chunk: self.chunk,
            diagnostics: self.diagnostics,
        }
    }

    fn finish(&mut self) {
        self.emit_op(OpCode::Return);
        if self.print_code && !self.had_error {
            debug!(target: "glint::compiler", "\n{}", disassemble(&self.chunk, "code"));
        }
    }

    // ==================== Tokens ====================

    fn advance(&mut self) {
        self.previous = self.current;
        loop {
            self.current = self.scanner.next_token();
            if self.current.kind != TokenKind::Error {
                break;
            }
            let message = self.current.lexeme;
            self.error_at_current(message);
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.current.kind == kind {
            self.advance();
        } else {
            self.error_at_current(message);
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if !self.check(kind) {
            return false;
        }
        self.advance();
        true
    }

    // ==================== Emission ====================

    fn emit_op(&mut self, op: OpCode) {
        let line = self.previous.line;
        self.chunk.write_op(op, line);
    }

    fn emit_ops(&mut self, first: OpCode, second: OpCode) {
        self.emit_op(first);
        self.emit_op(second);
    }

    /// Instruction with a u16 constant-pool operand
    fn emit_op_u16(&mut self, op: OpCode, operand: u16) {
        let line = self.previous.line;
        self.chunk.write_op(op, line);
        self.chunk.write_u16(operand, line);
    }

    /// Add to the pool; on overflow report and fall back to index 0
    fn make_constant(&mut self, value: Value) -> u16 {
        match self.chunk.add_constant(value) {
            Ok(idx) => idx,
            Err(err) => {
                self.error(&err.to_string());
                0
            }
        }
    }

    fn emit_constant(&mut self, value: Value) {
        let idx = self.make_constant(value);
        let line = self.previous.line;
        self.chunk.write_constant(idx, line);
    }

    /// Pool entry holding the interned name
    fn identifier_constant(&mut self, name: &str) -> u16 {
        let name = self.heap.intern(name);
        self.make_constant(Value::string(name))
    }

    // ==================== Diagnostics ====================

    fn error_at_current(&mut self, message: &str) {
        let token = self.current;
        self.error_at(token, message);
    }

    fn error(&mut self, message: &str) {
        let token = self.previous;
        self.error_at(token, message);
    }

    fn error_at(&mut self, token: Token<'src>, message: &str) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        self.report(token, message);
    }

    /// Record a diagnostic regardless of panic mode bookkeeping
    fn report(&mut self, token: Token<'src>, message: &str) {
        let location = match token.kind {
            TokenKind::Eof => DiagnosticLocation::AtEnd,
            TokenKind::Error => DiagnosticLocation::Unlocated,
            _ => DiagnosticLocation::At(token.lexeme.to_string()),
        };
        let diagnostic = Diagnostic {
            line: token.line,
            location,
            message: message.to_string(),
        };
        debug!(target: "glint::compiler", %diagnostic, "compile error");
        self.diagnostics.push(diagnostic);
        self.had_error = true;
    }
}

/// Compile with default settings
pub fn compile(source: &str, heap: &mut Heap) -> Result<Chunk, CompileError> {
    compile_with_config(source, heap, &CompilerConfig::default())
}

pub fn compile_with_config(
    source: &str,
    heap: &mut Heap,
    config: &CompilerConfig,
) -> Result<Chunk, CompileError> {
    Compiler::new(source, heap, config).compile().into_result()
}
