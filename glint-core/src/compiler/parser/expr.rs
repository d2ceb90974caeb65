//! Expression compilation

use super::rules::{rule_for, ParseFn, Precedence};
use super::{Compiler, MAX_NESTING_DEPTH};
use crate::compiler::lexer::TokenKind;
use crate::runtime::bytecode::OpCode;
use crate::runtime::value::Value;

impl<'src, 'h> Compiler<'src, 'h> {
    pub(super) fn expression(&mut self) {
        self.parse_precedence(Precedence::Assignment);
    }

    /// Compile an expression whose operators bind at least as tightly as
    /// `precedence`
    fn parse_precedence(&mut self, precedence: Precedence) {
        if self.depth >= MAX_NESTING_DEPTH {
            self.error_at_current("Expression nesting too deep.");
            return;
        }
        self.depth += 1;
        self.parse_operand_and_operators(precedence);
        self.depth -= 1;
    }

    fn parse_operand_and_operators(&mut self, precedence: Precedence) {
        self.advance();
        let Some(prefix) = rule_for(self.previous.kind).prefix else {
            self.error("Expect expression.");
            return;
        };

        let can_assign = precedence <= Precedence::Assignment;
        self.apply(prefix, can_assign);

        while precedence <= rule_for(self.current.kind).precedence {
            self.advance();
            if let Some(infix) = rule_for(self.previous.kind).infix {
                self.apply(infix, can_assign);
            }
        }

        if can_assign && self.matches(TokenKind::Equal) {
            // Reported without entering panic mode; the right-hand side is
            // still compiled so the statement ends where it should.
            if !self.panic_mode {
                let token = self.previous;
                self.report(token, "Invalid assignment target.");
            }
            self.expression();
        }
    }

    fn apply(&mut self, handler: ParseFn, can_assign: bool) {
        match handler {
            ParseFn::Grouping => self.grouping(),
            ParseFn::Unary => self.unary(),
            ParseFn::Binary => self.binary(),
            ParseFn::Number => self.number(),
            ParseFn::String => self.string(),
            ParseFn::Literal => self.literal(),
            ParseFn::Variable => self.variable(can_assign),
        }
    }

    // ==================== Handlers ====================

    fn grouping(&mut self) {
        self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after expression.");
    }

    fn number(&mut self) {
        match self.previous.lexeme.parse::<f64>() {
            Ok(value) => self.emit_constant(Value::Number(value)),
            Err(_) => self.error("Invalid number literal."),
        }
    }

    fn string(&mut self) {
        let lexeme = self.previous.lexeme;
        let contents = &lexeme[1..lexeme.len() - 1];
        let string = self.heap.intern(contents);
        self.emit_constant(Value::string(string));
    }

    fn literal(&mut self) {
        match self.previous.kind {
            TokenKind::False => self.emit_op(OpCode::False),
            TokenKind::True => self.emit_op(OpCode::True),
            TokenKind::Nil => self.emit_op(OpCode::Nil),
            _ => {}
        }
    }

    fn variable(&mut self, can_assign: bool) {
        let name = self.previous.lexeme;
        let arg = self.identifier_constant(name);

        if can_assign && self.matches(TokenKind::Equal) {
            self.expression();
            self.emit_op_u16(OpCode::SetGlobal, arg);
        } else {
            self.emit_op_u16(OpCode::GetGlobal, arg);
        }
    }

    fn unary(&mut self) {
        let operator = self.previous.kind;
        self.parse_precedence(Precedence::Unary);

        match operator {
            TokenKind::Minus => self.emit_op(OpCode::Negate),
            TokenKind::Bang => self.emit_op(OpCode::Not),
            _ => {}
        }
    }

    fn binary(&mut self) {
        let operator = self.previous.kind;
        let rule = rule_for(operator);
        self.parse_precedence(rule.precedence.next());

        match operator {
            TokenKind::Plus => self.emit_op(OpCode::Add),
            TokenKind::Minus => self.emit_op(OpCode::Subtract),
            TokenKind::Star => self.emit_op(OpCode::Multiply),
            TokenKind::Slash => self.emit_op(OpCode::Divide),
            TokenKind::Percent => self.emit_op(OpCode::Modulo),
            TokenKind::EqualEqual => self.emit_op(OpCode::Equal),
            TokenKind::BangEqual => self.emit_ops(OpCode::Equal, OpCode::Not),
            TokenKind::Greater => self.emit_op(OpCode::Greater),
            // NaN makes both of these true
            TokenKind::GreaterEqual => self.emit_ops(OpCode::Less, OpCode::Not),
            TokenKind::Less => self.emit_op(OpCode::Less),
            TokenKind::LessEqual => self.emit_ops(OpCode::Greater, OpCode::Not),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::compiler::compile;
    use crate::runtime::bytecode::OpCode;
    use crate::runtime::heap::Heap;
    use crate::runtime::value::Value;

    fn ops(source: &str) -> Vec<u8> {
        let mut heap = Heap::new();
        compile(source, &mut heap).unwrap().code
    }

    #[test]
    fn test_unary_binds_tighter_than_factor() {
        // -1 * 2 negates before multiplying
        assert_eq!(
            ops("-1 * 2;"),
            vec![
                OpCode::Constant as u8,
                0,
                OpCode::Negate as u8,
                OpCode::Constant as u8,
                1,
                OpCode::Multiply as u8,
                OpCode::Pop as u8,
                OpCode::Return as u8,
            ]
        );
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        assert_eq!(
            ops("(1 + 2) % 3;"),
            vec![
                OpCode::Constant as u8,
                0,
                OpCode::Constant as u8,
                1,
                OpCode::Add as u8,
                OpCode::Constant as u8,
                2,
                OpCode::Modulo as u8,
                OpCode::Pop as u8,
                OpCode::Return as u8,
            ]
        );
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let code = ops("1 - 2 - 3;");
        let subtracts: Vec<_> = code
            .iter()
            .enumerate()
            .filter(|(_, &b)| b == OpCode::Subtract as u8)
            .map(|(i, _)| i)
            .collect();
        // (1 - 2) - 3: the first subtract comes before the last constant
        assert_eq!(subtracts, vec![4, 7]);
    }

    #[test]
    fn test_not_equal_and_comparisons() {
        let code = ops("1 != 2; 1 <= 2; !true;");
        let expected_tail = [
            OpCode::Constant as u8,
            2,
            OpCode::Constant as u8,
            3,
            OpCode::Greater as u8,
            OpCode::Not as u8,
            OpCode::Pop as u8,
            OpCode::True as u8,
            OpCode::Not as u8,
            OpCode::Pop as u8,
            OpCode::Return as u8,
        ];
        assert_eq!(&code[..6], &[
            OpCode::Constant as u8,
            0,
            OpCode::Constant as u8,
            1,
            OpCode::Equal as u8,
            OpCode::Not as u8,
        ]);
        assert_eq!(&code[7..], &expected_tail);
    }

    #[test]
    fn test_string_literals_are_interned() {
        let mut heap = Heap::new();
        let chunk = compile("\"same\"; \"same\"; \"other\";", &mut heap).unwrap();
        assert_eq!(chunk.constants.len(), 3);
        assert_eq!(chunk.constants[0], chunk.constants[1]);
        assert_ne!(chunk.constants[0], chunk.constants[2]);
        assert_eq!(chunk.constants[0].to_string(), "same");
        assert_eq!(heap.object_count(), 2);
    }

    #[test]
    fn test_number_literals() {
        let mut heap = Heap::new();
        let chunk = compile("123.456; 0; 7;", &mut heap).unwrap();
        assert_eq!(
            chunk.constants,
            vec![Value::Number(123.456), Value::Number(0.0), Value::Number(7.0)]
        );
    }
}
