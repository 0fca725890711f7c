//! JSON mirror types for `smsz80-core`'s decode result, in the same
//! "materialize for human review" role the teacher's `cpu-validation`
//! crate's `TestCase`/`CpuState` play for CPU execution traces — here
//! the trace is a decoded IR tree instead of register state.
//!
//! `smsz80-core` itself carries no `serde` dependency (see DESIGN.md),
//! so these are plain mirror structs with `From`/`TryFrom` conversions
//! rather than `#[derive(Serialize)]` on the core types directly.

use serde::{Deserialize, Serialize};
use smsz80_core::decode::{DecodeResult, Instruction, Terminator};
use smsz80_core::ir::{AssignOp, BinOp, Node};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum JsonNode {
    Literal { value: i32 },
    Identifier { name: String },
    Register { name: String },
    Member { object: Box<JsonNode>, property: Box<JsonNode> },
    Binary { op: String, left: Box<JsonNode>, right: Box<JsonNode> },
    Assign { op: String, left: Box<JsonNode>, right: Box<JsonNode> },
    Call { callee: String, args: Vec<JsonNode> },
    If { test: Box<JsonNode>, consequent: Box<JsonNode>, alternate: Option<Box<JsonNode>> },
    Block { body: Vec<JsonNode> },
    ExprStmt { expression: Box<JsonNode> },
    Return { argument: Option<Box<JsonNode>> },
}

impl From<&Node> for JsonNode {
    fn from(node: &Node) -> Self {
        match node {
            Node::Literal(value) => JsonNode::Literal { value: *value },
            Node::Identifier(name) => JsonNode::Identifier { name: name.clone() },
            Node::Register(name) => JsonNode::Register { name: name.clone() },
            Node::Member { object, property } => JsonNode::Member {
                object: Box::new(JsonNode::from(object.as_ref())),
                property: Box::new(JsonNode::from(property.as_ref())),
            },
            Node::Binary { op, left, right } => JsonNode::Binary {
                op: op.to_string(),
                left: Box::new(JsonNode::from(left.as_ref())),
                right: Box::new(JsonNode::from(right.as_ref())),
            },
            Node::Assign { op, left, right } => JsonNode::Assign {
                op: op.to_string(),
                left: Box::new(JsonNode::from(left.as_ref())),
                right: Box::new(JsonNode::from(right.as_ref())),
            },
            Node::Call { callee, args } => {
                JsonNode::Call { callee: callee.clone(), args: args.iter().map(JsonNode::from).collect() }
            }
            Node::If { test, consequent, alternate } => JsonNode::If {
                test: Box::new(JsonNode::from(test.as_ref())),
                consequent: Box::new(JsonNode::from(consequent.as_ref())),
                alternate: alternate.as_ref().map(|a| Box::new(JsonNode::from(a.as_ref()))),
            },
            Node::Block(body) => JsonNode::Block { body: body.iter().map(JsonNode::from).collect() },
            Node::ExprStmt(expr) => JsonNode::ExprStmt { expression: Box::new(JsonNode::from(expr.as_ref())) },
            Node::Return(arg) => {
                JsonNode::Return { argument: arg.as_ref().map(|a| Box::new(JsonNode::from(a.as_ref()))) }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonInstruction {
    pub pc: u16,
    pub name: String,
    pub ir: Vec<JsonNode>,
}

impl From<&Instruction> for JsonInstruction {
    fn from(instr: &Instruction) -> Self {
        JsonInstruction { pc: instr.pc, name: instr.name.to_string(), ir: instr.ir.iter().map(JsonNode::from).collect() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonFault {
    pub pc: u16,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonDecodeResult {
    pub instructions: Vec<JsonInstruction>,
    pub terminated_by: String,
    pub end_pc: u16,
    pub fault: Option<JsonFault>,
}

impl From<&DecodeResult> for JsonDecodeResult {
    fn from(result: &DecodeResult) -> Self {
        JsonDecodeResult {
            instructions: result.instructions.iter().map(JsonInstruction::from).collect(),
            terminated_by: match result.terminated_by {
                Terminator::Ret => "ret",
                Terminator::Jp => "jp",
                Terminator::Halt => "halt",
                Terminator::Undecodable => "undecodable",
            }
            .to_string(),
            end_pc: result.end_pc,
            fault: result.fault.map(|f| JsonFault { pc: f.pc, reason: f.to_string() }),
        }
    }
}
