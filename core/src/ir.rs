//! The IR node library: the smallest building blocks the opcode combinators
//! assemble into per-instruction effect trees.
//!
//! `Node` is a recursive sum type. The tree is acyclic by construction —
//! every constructor takes owned children and allocates fresh boxes, so
//! there is no way to build a cycle through this API.

use std::fmt;

/// Binary operators the combinator library emits. Kept as a typed enum
/// (not a bare `String`) so a stray operator string is a compile error
/// rather than a silently-wrong IR node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    And,
    Or,
    Xor,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Shl,
    Shr,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::And => "&",
            BinOp::Or => "|",
            BinOp::Xor => "^",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
        };
        f.write_str(s)
    }
}

/// Assignment operators. `Assign` is the plain `=`; the rest are the
/// compound forms spec.md lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    AndAssign,
    OrAssign,
    XorAssign,
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::AndAssign => "&=",
            AssignOp::OrAssign => "|=",
            AssignOp::XorAssign => "^=",
        };
        f.write_str(s)
    }
}

/// One node of the IR tree. Variants correspond 1:1 to spec.md's data
/// model; `MemberExpression.computed` is always true in the source
/// model, so there is only one `Member` shape here — the invariant is
/// structural rather than a field to check.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Literal(i32),
    Identifier(String),
    /// A CPU register reference. Always a single lowercase letter for
    /// the 8-bit main registers (`a`..`l`, `f`); 16-bit composites are
    /// addressed through `Call`s to `get<PAIR>`/`set<PAIR>`, never as a
    /// `Register` node.
    Register(String),
    Member {
        object: Box<Node>,
        property: Box<Node>,
    },
    Binary {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Assign {
        op: AssignOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `callee` is always an identifier by construction — stored as a
    /// plain `String` rather than boxing an `Identifier` node, so the
    /// spec's "callee is always an Identifier" invariant cannot be
    /// violated by this type.
    Call {
        callee: String,
        args: Vec<Node>,
    },
    If {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    Block(Vec<Node>),
    ExprStmt(Box<Node>),
    Return(Option<Box<Node>>),
}

pub fn literal(value: i32) -> Node {
    Node::Literal(value)
}

pub fn ident(name: impl Into<String>) -> Node {
    Node::Identifier(name.into())
}

pub fn reg(name: impl Into<String>) -> Node {
    Node::Register(name.into())
}

pub fn member(object: Node, property: Node) -> Node {
    Node::Member {
        object: Box::new(object),
        property: Box::new(property),
    }
}

pub fn binary(op: BinOp, left: Node, right: Node) -> Node {
    Node::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn assign(op: AssignOp, left: Node, right: Node) -> Node {
    Node::Assign {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Builds a `Call` node. `args` accepts anything convertible to a
/// `Vec<Node>`, so both a zero/one-argument call site (`call("exAF", [])`,
/// `call("readMem", [addr])`) and a multi-argument one read naturally
/// without a separate "wrap a bare value" step — spec.md's default that
/// "a single non-sequence value is wrapped as a one-element sequence"
/// is satisfied by `[addr]` being `Into<Vec<Node>>` via its `From<[T; N]>`
/// impl, not by special-casing the argument at the call boundary.
pub fn call(callee: impl Into<String>, args: impl Into<Vec<Node>>) -> Node {
    Node::Call {
        callee: callee.into(),
        args: args.into(),
    }
}

pub fn if_stmt(test: Node, consequent: Node, alternate: Option<Node>) -> Node {
    Node::If {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: alternate.map(Box::new),
    }
}

pub fn block(body: impl Into<Vec<Node>>) -> Node {
    Node::Block(body.into())
}

pub fn expr_stmt(expression: Node) -> Node {
    Node::ExprStmt(Box::new(expression))
}

pub fn ret(argument: Option<Node>) -> Node {
    Node::Return(argument.map(Box::new))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_wraps_single_argument() {
        let n = call("readMem", [ident("hl")]);
        match n {
            Node::Call { callee, args } => {
                assert_eq!(callee, "readMem");
                assert_eq!(args, vec![ident("hl")]);
            }
            _ => panic!("expected Call"),
        }
    }

    #[test]
    fn call_defaults_to_empty_args() {
        let n = call("exAF", []);
        assert_eq!(n, Node::Call { callee: "exAF".into(), args: vec![] });
    }

    #[test]
    fn equal_constructions_are_structurally_equal() {
        let a = binary(BinOp::Add, reg("a"), literal(1));
        let b = binary(BinOp::Add, reg("a"), literal(1));
        assert_eq!(a, b);
    }

    #[test]
    fn if_stmt_defaults_alternate_to_none() {
        let n = if_stmt(literal(1), block([]), None);
        match n {
            Node::If { alternate, .. } => assert!(alternate.is_none()),
            _ => panic!("expected If"),
        }
    }
}
