//! Expression trees for rule math.
//!
//! Math strings are tokenized and brought into reverse polish notation by
//! `meval`; the RPN token stream is then folded into an [`AstNode`] tree so
//! that consumers can walk nodes and their children directly.

use std::{fmt, str::FromStr};

use meval::{
    tokenizer::{Operation, Token},
    Expr,
};

use super::error::MathError;

/// Arithmetic operators that may appear in rule math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
    Remainder,
    Power,
}

impl Operator {
    fn symbol(&self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Divide => "/",
            Operator::Remainder => "%",
            Operator::Power => "^",
        }
    }
}

impl From<Operation> for Operator {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Plus => Operator::Plus,
            Operation::Minus => Operator::Minus,
            Operation::Times => Operator::Times,
            Operation::Div => Operator::Divide,
            Operation::Rem => Operator::Remainder,
            Operation::Pow => Operator::Power,
        }
    }
}

/// A node of an expression tree.
///
/// Only [`AstNode::Symbol`] refers to a model quantity. Function names are
/// carried by [`AstNode::Function`] and are not symbols.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Reference to a named quantity
    Symbol(String),
    /// Unary or binary operator applied to its operands
    Operator {
        op: Operator,
        children: Vec<AstNode>,
    },
    /// Function application such as `exp(x)` or `max(a, b)`
    Function { name: String, args: Vec<AstNode> },
}

impl AstNode {
    /// Parses an infix math string into a tree.
    pub fn parse(math: &str) -> Result<AstNode, MathError> {
        let expr: Expr = math
            .parse()
            .map_err(|e| MathError::ParseError(math.to_string(), e))?;

        from_rpn(math, &expr)
    }

    /// Whether this node names a quantity.
    pub fn is_name(&self) -> bool {
        matches!(self, AstNode::Symbol(_))
    }

    /// Name of a symbol or function node.
    pub fn name(&self) -> Option<&str> {
        match self {
            AstNode::Symbol(name) => Some(name),
            AstNode::Function { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn children(&self) -> &[AstNode] {
        match self {
            AstNode::Operator { children, .. } => children,
            AstNode::Function { args, .. } => args,
            AstNode::Number(_) | AstNode::Symbol(_) => &[],
        }
    }

    pub fn num_children(&self) -> usize {
        self.children().len()
    }

    pub fn child(&self, index: usize) -> Option<&AstNode> {
        self.children().get(index)
    }
}

// Deep trees are torn down with an explicit stack.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending = match self {
            AstNode::Operator { children, .. } => std::mem::take(children),
            AstNode::Function { args, .. } => std::mem::take(args),
            AstNode::Number(_) | AstNode::Symbol(_) => return,
        };

        while let Some(mut node) = pending.pop() {
            match &mut node {
                AstNode::Operator { children, .. } => pending.append(children),
                AstNode::Function { args, .. } => pending.append(args),
                AstNode::Number(_) | AstNode::Symbol(_) => {}
            }
        }
    }
}

impl FromStr for AstNode {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AstNode::parse(s)
    }
}

/// Folds an RPN token stream into a single tree.
///
/// Operands are pushed onto a stack; operators and functions pop their
/// arguments and push the combined node. A well-formed stream leaves exactly
/// one node behind.
fn from_rpn(math: &str, expr: &Expr) -> Result<AstNode, MathError> {
    let malformed = |reason: &str| MathError::MalformedExpression(math.to_string(), reason.into());
    let mut stack: Vec<AstNode> = Vec::with_capacity(expr.len());

    for token in expr.iter() {
        match token {
            Token::Number(value) => stack.push(AstNode::Number(*value)),
            Token::Var(name) => stack.push(AstNode::Symbol(name.clone())),
            Token::Unary(op) => {
                let operand = stack.pop().ok_or_else(|| malformed("missing operand"))?;
                stack.push(AstNode::Operator {
                    op: op.clone().into(),
                    children: vec![operand],
                });
            }
            Token::Binary(op) => {
                let right = stack.pop().ok_or_else(|| malformed("missing operand"))?;
                let left = stack.pop().ok_or_else(|| malformed("missing operand"))?;
                stack.push(AstNode::Operator {
                    op: op.clone().into(),
                    children: vec![left, right],
                });
            }
            Token::Func(name, Some(arity)) => {
                if stack.len() < *arity {
                    return Err(malformed("missing function argument"));
                }
                let args = stack.split_off(stack.len() - arity);
                stack.push(AstNode::Function {
                    name: name.clone(),
                    args,
                });
            }
            Token::Func(_, None) => return Err(malformed("function without arity")),
            Token::LParen | Token::RParen | Token::Comma => {
                return Err(malformed("unexpected token in RPN"))
            }
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(root), true) => Ok(root),
        (None, _) => Err(malformed("empty expression")),
        (Some(_), false) => Err(malformed("dangling operands")),
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Number(value) => write!(f, "{value}"),
            AstNode::Symbol(name) => write!(f, "{name}"),
            AstNode::Operator { op, children } => match (op, children.as_slice()) {
                (_, [operand]) => write!(f, "{}{operand}", op.symbol()),
                (_, [left, right]) => write!(f, "({left} {} {right})", op.symbol()),
                _ => Err(fmt::Error),
            },
            AstNode::Function { name, args } => {
                let args = args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
                write!(f, "{name}({})", args.join(", "))
            }
        }
    }
}
