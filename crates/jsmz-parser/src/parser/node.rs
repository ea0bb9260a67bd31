//! Node storage for the arena AST.
//!
//! Every node carries its source range and flags next to a `NodeData` sum
//! type. The node kind is derived from the data variant, so a node can never
//! claim a kind its payload does not support.

use super::base::{NodeIndex, NodeList};
use jsmz_scanner::SyntaxKind;

/// Append-only storage for all nodes of one source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Full start, including leading trivia.
    pub pos: u32,
    pub end: u32,
    pub flags: u16,
    pub data: NodeData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Identifier(IdentifierData),
    /// Keyword expressions without payload (`this`, `super`, `true`, `null`, ...)
    Token(SyntaxKind),
    Literal(LiteralData),
    ArrayLiteral(LiteralExprData),
    ObjectLiteral(LiteralExprData),
    PropertyAccess(AccessExprData),
    ElementAccess(AccessExprData),
    Call(CallExprData),
    Binary(BinaryExprData),
    ShorthandPropertyAssignment(ShorthandPropertyData),
    PropertyAssignment(PropertyAssignmentData),
    VariableStatement(VariableData),
    VariableDeclarationList(VariableDeclarationListData),
    VariableDeclaration(VariableDeclarationData),
    ExpressionStatement(ExprStatementData),
    EmptyStatement,
    FunctionDeclaration(NamedDeclarationData),
    ClassDeclaration(NamedDeclarationData),
    ImportDeclaration(ImportDeclData),
    /// Source the parser does not model; only the kind and range are kept.
    Skipped(SyntaxKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierData {
    pub escaped_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralData {
    pub kind: SyntaxKind,
    /// Cooked value (escapes resolved, quotes removed)
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub question_dot_token: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: SyntaxKind,
    pub right: NodeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandPropertyData {
    pub name: NodeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableData {
    pub declaration_list: NodeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclarationListData {
    pub declarations: NodeList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDeclarationData {
    pub name: NodeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclData {
    pub module_specifier: NodeIndex,
}

impl Node {
    pub fn kind(&self) -> SyntaxKind {
        match &self.data {
            NodeData::Identifier(_) => SyntaxKind::Identifier,
            NodeData::Token(kind) => *kind,
            NodeData::Literal(lit) => lit.kind,
            NodeData::ArrayLiteral(_) => SyntaxKind::ArrayLiteralExpression,
            NodeData::ObjectLiteral(_) => SyntaxKind::ObjectLiteralExpression,
            NodeData::PropertyAccess(_) => SyntaxKind::PropertyAccessExpression,
            NodeData::ElementAccess(_) => SyntaxKind::ElementAccessExpression,
            NodeData::Call(_) => SyntaxKind::CallExpression,
            NodeData::Binary(_) => SyntaxKind::BinaryExpression,
            NodeData::ShorthandPropertyAssignment(_) => SyntaxKind::ShorthandPropertyAssignment,
            NodeData::PropertyAssignment(_) => SyntaxKind::PropertyAssignment,
            NodeData::VariableStatement(_) => SyntaxKind::VariableStatement,
            NodeData::VariableDeclarationList(_) => SyntaxKind::VariableDeclarationList,
            NodeData::VariableDeclaration(_) => SyntaxKind::VariableDeclaration,
            NodeData::ExpressionStatement(_) => SyntaxKind::ExpressionStatement,
            NodeData::EmptyStatement => SyntaxKind::EmptyStatement,
            NodeData::FunctionDeclaration(_) => SyntaxKind::FunctionDeclaration,
            NodeData::ClassDeclaration(_) => SyntaxKind::ClassDeclaration,
            NodeData::ImportDeclaration(_) => SyntaxKind::ImportDeclaration,
            NodeData::Skipped(kind) => *kind,
        }
    }

    #[inline]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }
}
