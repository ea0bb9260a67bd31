//! NodeArena creation methods (add_* and create_* methods).
//!
//! `add_*` methods are used by the parser and take the parsed range.
//! `create_*` methods build synthesized nodes: they are flagged
//! `SYNTHESIZED` and start with an empty range at offset 0 until the caller
//! assigns one with `set_text_range`.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::node_flags;
use jsmz_scanner::SyntaxKind;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    pub fn add_node(&mut self, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            pos,
            end,
            flags: node_flags::NONE,
            data,
        });
        index
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, text: impl Into<String>) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::Identifier(IdentifierData {
                escaped_text: text.into(),
            }),
        )
    }

    pub fn add_token(&mut self, kind: SyntaxKind, pos: u32, end: u32) -> NodeIndex {
        self.add_node(pos, end, NodeData::Token(kind))
    }

    pub fn add_literal(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        end: u32,
        text: impl Into<String>,
    ) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::Literal(LiteralData {
                kind,
                text: text.into(),
            }),
        )
    }

    pub fn add_array_literal(&mut self, pos: u32, end: u32, elements: NodeList) -> NodeIndex {
        self.add_node(pos, end, NodeData::ArrayLiteral(LiteralExprData { elements }))
    }

    pub fn add_object_literal(&mut self, pos: u32, end: u32, properties: NodeList) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::ObjectLiteral(LiteralExprData {
                elements: properties,
            }),
        )
    }

    pub fn add_property_access(
        &mut self,
        pos: u32,
        end: u32,
        expression: NodeIndex,
        name: NodeIndex,
        question_dot_token: bool,
    ) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::PropertyAccess(AccessExprData {
                expression,
                name_or_argument: name,
                question_dot_token,
            }),
        )
    }

    pub fn add_element_access(
        &mut self,
        pos: u32,
        end: u32,
        expression: NodeIndex,
        argument: NodeIndex,
        question_dot_token: bool,
    ) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::ElementAccess(AccessExprData {
                expression,
                name_or_argument: argument,
                question_dot_token,
            }),
        )
    }

    pub fn add_call(
        &mut self,
        pos: u32,
        end: u32,
        expression: NodeIndex,
        arguments: NodeList,
    ) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::Call(CallExprData {
                expression,
                arguments,
            }),
        )
    }

    pub fn add_binary(
        &mut self,
        pos: u32,
        end: u32,
        left: NodeIndex,
        operator_token: SyntaxKind,
        right: NodeIndex,
    ) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::Binary(BinaryExprData {
                left,
                operator_token,
                right,
            }),
        )
    }

    pub fn add_shorthand_property(&mut self, pos: u32, end: u32, name: NodeIndex) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::ShorthandPropertyAssignment(ShorthandPropertyData { name }),
        )
    }

    pub fn add_property_assignment(
        &mut self,
        pos: u32,
        end: u32,
        name: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::PropertyAssignment(PropertyAssignmentData { name, initializer }),
        )
    }

    pub fn add_variable_statement(
        &mut self,
        pos: u32,
        end: u32,
        declaration_list: NodeIndex,
        flags: u16,
    ) -> NodeIndex {
        let idx = self.add_node(
            pos,
            end,
            NodeData::VariableStatement(VariableData { declaration_list }),
        );
        self.add_flags(idx, flags);
        idx
    }

    pub fn add_variable_declaration_list(
        &mut self,
        pos: u32,
        end: u32,
        declarations: NodeList,
        flags: u16,
    ) -> NodeIndex {
        let idx = self.add_node(
            pos,
            end,
            NodeData::VariableDeclarationList(VariableDeclarationListData { declarations }),
        );
        self.add_flags(idx, flags);
        idx
    }

    pub fn add_variable_declaration(
        &mut self,
        pos: u32,
        end: u32,
        name: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::VariableDeclaration(VariableDeclarationData { name, initializer }),
        )
    }

    pub fn add_expression_statement(
        &mut self,
        pos: u32,
        end: u32,
        expression: NodeIndex,
    ) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::ExpressionStatement(ExprStatementData { expression }),
        )
    }

    pub fn add_empty_statement(&mut self, pos: u32, end: u32) -> NodeIndex {
        self.add_node(pos, end, NodeData::EmptyStatement)
    }

    pub fn add_function_declaration(
        &mut self,
        pos: u32,
        end: u32,
        name: NodeIndex,
        flags: u16,
    ) -> NodeIndex {
        let idx = self.add_node(
            pos,
            end,
            NodeData::FunctionDeclaration(NamedDeclarationData { name }),
        );
        self.add_flags(idx, flags);
        idx
    }

    pub fn add_class_declaration(
        &mut self,
        pos: u32,
        end: u32,
        name: NodeIndex,
        flags: u16,
    ) -> NodeIndex {
        let idx = self.add_node(pos, end, NodeData::ClassDeclaration(NamedDeclarationData { name }));
        self.add_flags(idx, flags);
        idx
    }

    pub fn add_import_declaration(
        &mut self,
        pos: u32,
        end: u32,
        module_specifier: NodeIndex,
    ) -> NodeIndex {
        self.add_node(
            pos,
            end,
            NodeData::ImportDeclaration(ImportDeclData { module_specifier }),
        )
    }

    pub fn add_skipped(&mut self, kind: SyntaxKind, pos: u32, end: u32) -> NodeIndex {
        self.add_node(pos, end, NodeData::Skipped(kind))
    }

    // ============================================================================
    // Factory Methods (synthesized nodes)
    // ============================================================================

    fn create_node(&mut self, data: NodeData) -> NodeIndex {
        let idx = self.add_node(0, 0, data);
        self.add_flags(idx, node_flags::SYNTHESIZED);
        idx
    }

    pub fn create_identifier(&mut self, text: impl Into<String>) -> NodeIndex {
        self.create_node(NodeData::Identifier(IdentifierData {
            escaped_text: text.into(),
        }))
    }

    /// `{ name }` with a fresh identifier for `name`.
    pub fn create_shorthand_property_assignment(&mut self, name: impl Into<String>) -> NodeIndex {
        let name = self.create_identifier(name);
        self.create_node(NodeData::ShorthandPropertyAssignment(
            ShorthandPropertyData { name },
        ))
    }

    pub fn create_object_literal(&mut self, properties: Vec<NodeIndex>) -> NodeIndex {
        self.create_node(NodeData::ObjectLiteral(LiteralExprData {
            elements: NodeList::with_nodes(properties, 0, 0),
        }))
    }

    /// A bare declaration `name` without type or initializer.
    pub fn create_variable_declaration(&mut self, name: impl Into<String>) -> NodeIndex {
        let name = self.create_identifier(name);
        self.create_node(NodeData::VariableDeclaration(VariableDeclarationData {
            name,
            initializer: NodeIndex::NONE,
        }))
    }

    // ============================================================================
    // Update Methods
    // ============================================================================

    pub fn add_flags(&mut self, index: NodeIndex, flags: u16) {
        if let Some(node) = self.get_mut(index) {
            node.flags |= flags;
        }
    }

    pub fn set_text_range(&mut self, index: NodeIndex, pos: u32, end: u32) -> bool {
        match self.get_mut(index) {
            Some(node) => {
                node.pos = pos;
                node.end = end;
                true
            }
            None => false,
        }
    }

    /// Point a binary expression at a different right operand.
    pub fn set_binary_right(&mut self, binary: NodeIndex, right: NodeIndex) -> bool {
        match self.get_mut(binary).map(|node| &mut node.data) {
            Some(NodeData::Binary(data)) => {
                data.right = right;
                true
            }
            _ => false,
        }
    }

    /// Replace the child list of a variable declaration list.
    pub fn set_declarations(&mut self, list: NodeIndex, declarations: Vec<NodeIndex>) -> bool {
        match self.get_mut(list).map(|node| &mut node.data) {
            Some(NodeData::VariableDeclarationList(data)) => {
                data.declarations.nodes = declarations;
                true
            }
            _ => false,
        }
    }

    pub fn set_identifier_text(&mut self, identifier: NodeIndex, text: impl Into<String>) -> bool {
        match self.get_mut(identifier).map(|node| &mut node.data) {
            Some(NodeData::Identifier(data)) => {
                data.escaped_text = text.into();
                true
            }
            _ => false,
        }
    }
}
