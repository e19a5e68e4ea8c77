//! Template programs and their reader
//!
//! ```text
//! C F P IC       literals I C F P
//! IF l n / IP l n  capture n, protected l times
//! IIP n          length of capture n, as an encoded number
//! IIC / IIF      end of template
//! III            echo 7 raw symbols to the output stream
//! ```
//!
//! Templates have no nesting, so the end construct always ends the program.

use super::channel::ReadChannel;
use super::codec::read_nat;
use super::errors::EndOfInput;
use crate::memory::symbol::Symbol;
use std::fmt;

/// One template instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOp {
    Literal(Symbol),
    /// Copy of a capture, run through `level` protection passes
    Reference { group: usize, level: usize },
    /// Encoded length of a capture
    Length(usize),
}

impl fmt::Display for TemplateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateOp::Literal(symbol) => write!(f, "{}", symbol),
            TemplateOp::Reference { group, level } => write!(f, "[{}^{}]", group, level),
            TemplateOp::Length(group) => write!(f, "|{}|", group),
        }
    }
}

/// A decoded template program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub ops: Vec<TemplateOp>,
}

impl Template {
    pub fn new(ops: Vec<TemplateOp>) -> Self {
        Template { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

/// Read one template off the channel
pub fn read_template(channel: &mut ReadChannel<'_>) -> Result<Template, EndOfInput> {
    let mut ops = Vec::new();
    loop {
        match channel.next()? {
            Symbol::C => ops.push(TemplateOp::Literal(Symbol::I)),
            Symbol::F => ops.push(TemplateOp::Literal(Symbol::C)),
            Symbol::P => ops.push(TemplateOp::Literal(Symbol::F)),
            Symbol::I => match channel.next()? {
                Symbol::C => ops.push(TemplateOp::Literal(Symbol::P)),
                Symbol::F | Symbol::P => {
                    let level = read_nat(channel)?;
                    let group = read_nat(channel)?;
                    ops.push(TemplateOp::Reference { group, level });
                }
                Symbol::I => match channel.next()? {
                    Symbol::C | Symbol::F => return Ok(Template::new(ops)),
                    Symbol::P => ops.push(TemplateOp::Length(read_nat(channel)?)),
                    Symbol::I => channel.echo()?,
                },
            },
        }
    }
}
