//! Parser for the board description language.

use std::collections::HashMap;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::components::ComponentKind;
use crate::error::{CircuitError, Result};

/// Parser for board descriptions.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire description.
    pub fn parse(&mut self) -> Result<BoardAst> {
        let mut ast = BoardAst::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => {
                    if matches!(self.current.text.to_ascii_lowercase().as_str(), "wire" | "w") {
                        let wire = self.parse_wire()?;
                        ast.wires.push(wire);
                    } else {
                        let component = self.parse_component()?;
                        ast.components.push(component);
                    }
                }
                _ => {
                    return Err(CircuitError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            // Every statement ends at a newline or EOF
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(CircuitError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(CircuitError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn parse_directive(&mut self, ast: &mut BoardAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".demo" => {
                if !ast.components.is_empty() || !ast.wires.is_empty() {
                    return Err(CircuitError::parse(line, ".demo must come before any declaration"));
                }
                ast.use_demo = true;
            }
            _ => {
                return Err(CircuitError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    /// `wire [id] <a> <b> ["label"]`
    fn parse_wire(&mut self) -> Result<WireDef> {
        let line = self.current.line;
        self.advance()?;

        let mut names = Vec::with_capacity(3);
        while self.current.kind == TokenKind::Identifier {
            names.push(self.current.text.clone());
            self.advance()?;
        }

        let label = if self.current.kind == TokenKind::Str {
            Some(self.expect(TokenKind::Str)?.text)
        } else {
            None
        };

        let mut names = names.into_iter();
        let (name, nodes) = match (names.next(), names.next(), names.next(), names.next()) {
            (Some(a), Some(b), None, None) => (None, [a, b]),
            (Some(id), Some(a), Some(b), None) => (Some(id), [a, b]),
            _ => return Err(CircuitError::parse(line, "expected 'wire [id] <from> <to> [\"label\"]'")),
        };
        Ok(WireDef {
            name,
            nodes,
            label,
            line,
        })
    }

    /// `<kind> <id> [value] [param=value ...]`
    fn parse_component(&mut self) -> Result<ComponentDef> {
        let keyword = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let kind = ComponentKind::from_keyword(&keyword).ok_or_else(|| {
            CircuitError::UnknownComponentKind {
                kind: keyword.clone(),
                line,
            }
        })?;
        let name = self.expect(TokenKind::Identifier)?.text;

        let mut value = None;
        let mut params = HashMap::new();

        while self.current.kind != TokenKind::Newline && self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Number => {
                    if value.is_some() {
                        return Err(CircuitError::invalid_component(&name, line, "more than one value given"));
                    }
                    value = Some(self.number(&name, line)?);
                }
                TokenKind::Identifier => {
                    let param = self.current.text.to_lowercase();
                    self.advance()?;
                    if self.current.kind == TokenKind::Equals {
                        self.advance()?;
                        let v = self.param_value(&name, line)?;
                        params.insert(param, v);
                    } else if value.is_none() && kind == ComponentKind::Switch {
                        // `switch S1 closed`
                        value = Some(flag(&param).ok_or_else(|| {
                            CircuitError::invalid_component(&name, line, format!("unknown switch state '{}'", param))
                        })?);
                    } else {
                        return Err(CircuitError::invalid_component(
                            &name,
                            line,
                            format!("expected 'name=value', got '{}'", param),
                        ));
                    }
                }
                _ => {
                    return Err(CircuitError::parse(
                        line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ComponentDef {
            kind,
            name,
            value,
            params,
            line,
        })
    }

    fn number(&mut self, name: &str, line: usize) -> Result<f64> {
        let text = self.current.text.clone();
        self.advance()?;
        parse_value(&text)
            .ok_or_else(|| CircuitError::invalid_component(name, line, format!("invalid number: {}", text)))
    }

    fn param_value(&mut self, name: &str, line: usize) -> Result<f64> {
        match self.current.kind {
            TokenKind::Number => self.number(name, line),
            TokenKind::Identifier => {
                let text = self.current.text.clone();
                self.advance()?;
                flag(&text).ok_or_else(|| {
                    CircuitError::invalid_component(name, line, format!("invalid value: {}", text))
                })
            }
            _ => Err(CircuitError::parse(line, "expected parameter value")),
        }
    }
}

/// Map switch words onto 1.0 / 0.0.
fn flag(word: &str) -> Option<f64> {
    match word.to_ascii_lowercase().as_str() {
        "on" | "true" | "closed" | "yes" => Some(1.0),
        "off" | "false" | "open" | "no" => Some(0.0),
        _ => None,
    }
}
