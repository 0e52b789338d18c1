// Copyright 2025 Semgraph Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Text → [`SemexAst`].
//!
//! Recursive descent with the usual regex precedence: star binds tightest,
//! then concatenation (juxtaposition), then `|`. Parentheses group.

use crate::ast::SemexAst;
use semgraph_core::{Result, SemgraphError};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Pipe,
    Star,
    LParen,
    RParen,
}

fn lex(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '|' => {
                chars.next();
                tokens.push(Token::Pipe);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            other => {
                return Err(SemgraphError::Parse(format!(
                    "unexpected character '{other}' in semex"
                )))
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_disjunct(&mut self) -> Result<SemexAst> {
        let mut left = self.parse_concat()?;
        while self.peek() == Some(&Token::Pipe) {
            self.next();
            let right = self.parse_concat()?;
            left = SemexAst::Disjunct(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_concat(&mut self) -> Result<SemexAst> {
        let mut left = self.parse_postfix()?;
        while matches!(self.peek(), Some(Token::Ident(_)) | Some(Token::LParen)) {
            let right = self.parse_postfix()?;
            left = SemexAst::Concat(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_postfix(&mut self) -> Result<SemexAst> {
        let mut atom = self.parse_atom()?;
        while self.peek() == Some(&Token::Star) {
            self.next();
            atom = SemexAst::Star(Box::new(atom));
        }
        Ok(atom)
    }

    fn parse_atom(&mut self) -> Result<SemexAst> {
        match self.next() {
            Some(Token::Ident(name)) => Ok(SemexAst::Base(name)),
            Some(Token::LParen) => {
                let inner = self.parse_disjunct()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(SemgraphError::Parse("expected ')'".to_string())),
                }
            }
            Some(token) => Err(SemgraphError::Parse(format!(
                "unexpected token {token:?} in semex"
            ))),
            None => Err(SemgraphError::Parse("unexpected end of semex".to_string())),
        }
    }
}

/// Parse the surface syntax into an AST.
pub fn parse_semex(input: &str) -> Result<SemexAst> {
    let tokens = lex(input)?;
    if tokens.is_empty() {
        return Err(SemgraphError::Parse("empty semex".to_string()));
    }
    let mut parser = Parser { tokens, pos: 0 };
    let ast = parser.parse_disjunct()?;
    if parser.pos != parser.tokens.len() {
        return Err(SemgraphError::Parse(format!(
            "trailing input after semex: {:?}",
            &parser.tokens[parser.pos..]
        )));
    }
    Ok(ast)
}
