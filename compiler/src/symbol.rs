use std::fmt::Display;

use crate::{lexer::Token, CompileError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Integer,
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Integer => write!(f, "integer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub identifier: String,
    pub address: usize,
    pub ty: Type,
}

/// Flat, program-wide scope. Addresses are handed out densely from 0 in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub const fn new() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    /// Declares the identifier carried by `token`. A rejected declaration
    /// consumes no address.
    pub fn declare(&mut self, token: &Token, ty: Type) -> Result<&Symbol, CompileError> {
        if self.get(&token.lexeme).is_some() {
            return Err(CompileError::semantic(
                token.line,
                token.column,
                format!("variable '{}' already declared", token.lexeme),
            ));
        }

        let address = self.symbols.len();
        log::trace!("declared '{}' at address {address}", token.lexeme);

        self.symbols.push(Symbol {
            identifier: token.lexeme.clone(),
            address,
            ty,
        });

        Ok(&self.symbols[address])
    }

    pub fn resolve(&self, token: &Token) -> Result<&Symbol, CompileError> {
        self.get(&token.lexeme).ok_or_else(|| {
            CompileError::semantic(
                token.line,
                token.column,
                format!("variable '{}' not declared", token.lexeme),
            )
        })
    }

    pub fn get(&self, identifier: &str) -> Option<&Symbol> {
        self.symbols
            .iter()
            .find(|symbol| symbol.identifier == identifier)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::TokenKind, ErrorKind};

    fn ident(name: &str, column: usize) -> Token {
        Token {
            kind: TokenKind::Identifier,
            lexeme: name.to_string(),
            line: 1,
            column,
        }
    }

    #[test]
    fn declare_assigns_sequential_addresses() {
        let mut table = SymbolTable::new();

        for (column, name) in ["fat", "num", "cont"].into_iter().enumerate() {
            table
                .declare(&ident(name, column + 1), Type::Integer)
                .expect("failed to declare");
        }

        let addresses: Vec<_> = table
            .iter()
            .map(|symbol| (symbol.identifier.as_str(), symbol.address))
            .collect();
        assert_eq!(addresses, [("fat", 0), ("num", 1), ("cont", 2)]);
    }

    #[test]
    fn declare_fail_duplicate_keeps_counter() {
        let mut table = SymbolTable::new();
        table
            .declare(&ident("x", 1), Type::Integer)
            .expect("failed to declare");

        let error = table
            .declare(&ident("x", 4), Type::Integer)
            .expect_err("duplicate should fail");
        assert_eq!((error.kind(), error.column()), (ErrorKind::Semantic, 4));
        assert!(error.message().contains("already declared"));

        let next = table
            .declare(&ident("y", 7), Type::Integer)
            .expect("failed to declare");
        assert_eq!(next.address, 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn resolve_finds_declared_symbol() {
        let mut table = SymbolTable::new();
        table
            .declare(&ident("a", 1), Type::Integer)
            .expect("failed to declare");
        table
            .declare(&ident("b", 3), Type::Integer)
            .expect("failed to declare");

        let symbol = table.resolve(&ident("b", 9)).expect("failed to resolve");
        assert_eq!((symbol.address, symbol.ty), (1, Type::Integer));
    }

    #[test]
    fn resolve_fail_undeclared() {
        let table = SymbolTable::new();
        let error = table
            .resolve(&ident("ghost", 12))
            .expect_err("undeclared should fail");

        assert_eq!(error.kind(), ErrorKind::Semantic);
        assert_eq!(error.column(), 12);
        assert!(error.message().contains("not declared"));
    }
}
