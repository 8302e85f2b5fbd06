pub use error::{CompileError, ErrorKind};
pub use instruction::{Instruction, Label, Listing};
pub use lexer::{tokenize, Token, TokenKind};
pub use symbol::{Symbol, SymbolTable, Type};

mod error;
mod instruction;
mod lexer;
mod symbol;

/// Compiles `source` into a complete instruction stream.
pub fn compile(source: &str) -> Result<Vec<Instruction>, CompileError> {
    let mut instructions = Vec::new();
    compile_into(source, &mut instructions)?;

    Ok(instructions)
}

/// Compiles `source`, appending to `instructions` as each construct is
/// recognised. On failure whatever was emitted before the error stays in
/// `instructions` and must be treated as unusable.
pub fn compile_into(
    source: &str,
    instructions: &mut Vec<Instruction>,
) -> Result<SymbolTable, CompileError> {
    let tokens = tokenize(source)?;
    log::debug!("lexed {} tokens", tokens.len());

    let start = instructions.len();
    let symbols = Compiler::new(tokens, instructions).compile()?;
    log::debug!(
        "compiled {} symbols into {} instructions",
        symbols.len(),
        instructions.len() - start
    );

    Ok(symbols)
}

/// Single-pass translator: every grammar rule validates its tokens and emits
/// code in the same step. `tokens` always ends with an `Eof` token.
#[derive(Debug)]
struct Compiler<'a> {
    tokens: Vec<Token>,
    idx: usize,
    symbols: SymbolTable,
    labels: usize,
    instructions: &'a mut Vec<Instruction>,
}

impl<'a> Compiler<'a> {
    fn new(tokens: Vec<Token>, instructions: &'a mut Vec<Instruction>) -> Self {
        Self {
            tokens,
            idx: 0,
            symbols: SymbolTable::new(),
            labels: 0,
            instructions,
        }
    }

    fn compile(mut self) -> Result<SymbolTable, CompileError> {
        self.program()?;
        self.expect(TokenKind::Eof)?;

        Ok(self.symbols)
    }

    fn program(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Program)?;
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Semicolon)?;

        self.emit(Instruction::Start);

        self.declarations()?;

        self.expect(TokenKind::Begin)?;
        self.commands()?;
        self.expect(TokenKind::End)?;
        self.expect(TokenKind::Dot)?;

        self.emit(Instruction::Halt);

        Ok(())
    }

    fn declarations(&mut self) -> Result<(), CompileError> {
        if !self.eat(TokenKind::Var) {
            return Ok(());
        }

        loop {
            let identifiers = self.identifier_list()?;
            self.expect(TokenKind::Colon)?;
            let ty = self.ty()?;
            self.expect(TokenKind::Semicolon)?;

            for identifier in &identifiers {
                self.symbols.declare(identifier, ty)?;
            }

            if !self.check(TokenKind::Identifier) {
                break;
            }
        }

        self.emit(Instruction::Allocate(self.symbols.len()));

        Ok(())
    }

    fn identifier_list(&mut self) -> Result<Vec<Token>, CompileError> {
        let mut identifiers = vec![self.expect(TokenKind::Identifier)?];

        while self.eat(TokenKind::Comma) {
            identifiers.push(self.expect(TokenKind::Identifier)?);
        }

        Ok(identifiers)
    }

    fn ty(&mut self) -> Result<Type, CompileError> {
        if self.eat(TokenKind::Integer) {
            return Ok(Type::Integer);
        }

        Err(self.unexpected("type"))
    }

    fn commands(&mut self) -> Result<(), CompileError> {
        self.command()?;

        while self.eat(TokenKind::Semicolon) {
            self.command()?;
        }

        Ok(())
    }

    fn command(&mut self) -> Result<(), CompileError> {
        match self.peek().kind {
            TokenKind::Identifier => self.assignment(),
            TokenKind::While => self.while_command(),
            TokenKind::Read => self.read_command(),
            TokenKind::Write => self.write_command(),
            TokenKind::Begin => self.compound_command(),
            // empty command; the enclosing rule reports anything unexpected
            _ => Ok(()),
        }
    }

    fn assignment(&mut self) -> Result<(), CompileError> {
        let target = self.expect(TokenKind::Identifier)?;
        let address = self.symbols.resolve(&target)?.address;

        self.expect(TokenKind::Assign)?;
        self.expression()?;

        self.emit(Instruction::Store(address));

        Ok(())
    }

    fn while_command(&mut self) -> Result<(), CompileError> {
        let start = self.new_label();
        let end = self.new_label();

        self.expect(TokenKind::While)?;
        self.emit(Instruction::Anchor(start));

        self.condition()?;
        self.emit(Instruction::JumpIfFalse(end));

        self.expect(TokenKind::Do)?;
        self.command()?;

        self.emit(Instruction::Jump(start));
        self.emit(Instruction::Anchor(end));

        Ok(())
    }

    fn read_command(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Read)?;
        self.expect(TokenKind::LeftParen)?;
        let target = self.expect(TokenKind::Identifier)?;
        let address = self.symbols.resolve(&target)?.address;
        self.expect(TokenKind::RightParen)?;

        self.emit(Instruction::Read);
        self.emit(Instruction::Store(address));

        Ok(())
    }

    fn write_command(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Write)?;
        self.expect(TokenKind::LeftParen)?;
        self.expression()?;
        self.expect(TokenKind::RightParen)?;

        self.emit(Instruction::Write);

        Ok(())
    }

    fn compound_command(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Begin)?;
        self.commands()?;
        self.expect(TokenKind::End)?;

        Ok(())
    }

    /// A bare expression is left to the target machine's truthiness.
    fn condition(&mut self) -> Result<(), CompileError> {
        self.expression()?;

        if self.eat(TokenKind::LessEqual) {
            self.expression()?;
            self.emit(Instruction::LessOrEqual);
        }

        Ok(())
    }

    fn expression(&mut self) -> Result<(), CompileError> {
        self.term()?;

        loop {
            let instruction = match self.peek().kind {
                TokenKind::Plus => Instruction::Add,
                TokenKind::Minus => Instruction::Subtract,
                _ => return Ok(()),
            };

            self.advance();
            self.term()?;
            self.emit(instruction);
        }
    }

    fn term(&mut self) -> Result<(), CompileError> {
        self.factor()?;

        loop {
            let instruction = match self.peek().kind {
                TokenKind::Star => Instruction::Multiply,
                TokenKind::Slash => Instruction::Divide,
                _ => return Ok(()),
            };

            self.advance();
            self.factor()?;
            self.emit(instruction);
        }
    }

    fn factor(&mut self) -> Result<(), CompileError> {
        match self.peek().kind {
            TokenKind::Identifier => {
                let token = self.advance();
                let address = self.symbols.resolve(&token)?.address;

                self.emit(Instruction::Load(address));
            }
            TokenKind::Number => {
                let token = self.advance();
                let value = token.lexeme.parse::<i64>().map_err(|_| {
                    CompileError::lexical(
                        token.line,
                        token.column,
                        format!("integer literal {} is out of range", token.lexeme),
                    )
                })?;

                self.emit(Instruction::Constant(value));
            }
            TokenKind::LeftParen => {
                self.advance();
                self.expression()?;
                self.expect(TokenKind::RightParen)?;
            }
            _ => return Err(self.unexpected("expression")),
        }

        Ok(())
    }

    fn new_label(&mut self) -> Label {
        self.labels += 1;
        log::trace!("allocated label L{}", self.labels);

        Label(self.labels)
    }

    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, CompileError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind))
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.idx += 1;
        }

        matched
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn unexpected(&self, expected: impl std::fmt::Display) -> CompileError {
        let token = self.peek();

        CompileError::syntax(
            token.line,
            token.column,
            format!("expected {expected}, found {token}"),
        )
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.idx += 1;
        }

        token
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.idx]
    }
}
