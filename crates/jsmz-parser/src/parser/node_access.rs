//! NodeArena access methods.
//!
//! Typed accessors return `None` when the node has a different kind, so
//! callers can chain them with `?` or `let ... else` without probing fields.

use super::base::NodeIndex;
use super::node::*;
use jsmz_scanner::SyntaxKind;

impl NodeArena {
    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(Node::kind)
    }

    #[inline]
    pub fn get_identifier<'a>(&self, node: &'a Node) -> Option<&'a IdentifierData> {
        match &node.data {
            NodeData::Identifier(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_literal<'a>(&self, node: &'a Node) -> Option<&'a LiteralData> {
        match &node.data {
            NodeData::Literal(data) => Some(data),
            _ => None,
        }
    }

    /// Get literal data only for string literals.
    #[inline]
    pub fn get_string_literal<'a>(&self, node: &'a Node) -> Option<&'a LiteralData> {
        self.get_literal(node)
            .filter(|lit| lit.kind == SyntaxKind::StringLiteral)
    }

    #[inline]
    pub fn get_binary_expr<'a>(&self, node: &'a Node) -> Option<&'a BinaryExprData> {
        match &node.data {
            NodeData::Binary(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_call_expr<'a>(&self, node: &'a Node) -> Option<&'a CallExprData> {
        match &node.data {
            NodeData::Call(data) => Some(data),
            _ => None,
        }
    }

    /// Get access expression data (property access or element access).
    #[inline]
    pub fn get_access_expr<'a>(&self, node: &'a Node) -> Option<&'a AccessExprData> {
        match &node.data {
            NodeData::PropertyAccess(data) | NodeData::ElementAccess(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_property_access<'a>(&self, node: &'a Node) -> Option<&'a AccessExprData> {
        match &node.data {
            NodeData::PropertyAccess(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_array_literal<'a>(&self, node: &'a Node) -> Option<&'a LiteralExprData> {
        match &node.data {
            NodeData::ArrayLiteral(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_object_literal<'a>(&self, node: &'a Node) -> Option<&'a LiteralExprData> {
        match &node.data {
            NodeData::ObjectLiteral(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_shorthand_property<'a>(&self, node: &'a Node) -> Option<&'a ShorthandPropertyData> {
        match &node.data {
            NodeData::ShorthandPropertyAssignment(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_property_assignment<'a>(
        &self,
        node: &'a Node,
    ) -> Option<&'a PropertyAssignmentData> {
        match &node.data {
            NodeData::PropertyAssignment(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_variable<'a>(&self, node: &'a Node) -> Option<&'a VariableData> {
        match &node.data {
            NodeData::VariableStatement(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_variable_declaration_list<'a>(
        &self,
        node: &'a Node,
    ) -> Option<&'a VariableDeclarationListData> {
        match &node.data {
            NodeData::VariableDeclarationList(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_variable_declaration<'a>(
        &self,
        node: &'a Node,
    ) -> Option<&'a VariableDeclarationData> {
        match &node.data {
            NodeData::VariableDeclaration(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_expression_statement<'a>(&self, node: &'a Node) -> Option<&'a ExprStatementData> {
        match &node.data {
            NodeData::ExpressionStatement(data) => Some(data),
            _ => None,
        }
    }

    /// Name data of function and class declarations.
    #[inline]
    pub fn get_named_declaration<'a>(&self, node: &'a Node) -> Option<&'a NamedDeclarationData> {
        match &node.data {
            NodeData::FunctionDeclaration(data) | NodeData::ClassDeclaration(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_import_decl<'a>(&self, node: &'a Node) -> Option<&'a ImportDeclData> {
        match &node.data {
            NodeData::ImportDeclaration(data) => Some(data),
            _ => None,
        }
    }

    // ============================================================================
    // Convenience Queries
    // ============================================================================

    /// Text of an identifier node, or `None` for any other kind.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node)
            .map(|ident| ident.escaped_text.as_str())
    }

    /// Cooked text of an identifier, string literal or numeric literal.
    pub fn text_of_name(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        match &node.data {
            NodeData::Identifier(ident) => Some(&ident.escaped_text),
            NodeData::Literal(lit)
                if matches!(
                    lit.kind,
                    SyntaxKind::StringLiteral
                        | SyntaxKind::NumericLiteral
                        | SyntaxKind::NoSubstitutionTemplateLiteral
                ) =>
            {
                Some(&lit.text)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn is_this_keyword(&self, index: NodeIndex) -> bool {
        self.kind_of(index) == Some(SyntaxKind::ThisKeyword)
    }

    /// Declarations of a variable statement, via its declaration list.
    pub fn variable_statement_declarations(&self, statement: NodeIndex) -> Option<&[NodeIndex]> {
        let node = self.get(statement)?;
        let var = self.get_variable(node)?;
        let list_node = self.get(var.declaration_list)?;
        let list = self.get_variable_declaration_list(list_node)?;
        Some(&list.declarations.nodes)
    }

    /// Direct children in source order.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Some(node) = self.get(index) else {
            return Vec::new();
        };
        let children = match &node.data {
            NodeData::ArrayLiteral(data) | NodeData::ObjectLiteral(data) => {
                data.elements.nodes.clone()
            }
            NodeData::PropertyAccess(data) | NodeData::ElementAccess(data) => {
                vec![data.expression, data.name_or_argument]
            }
            NodeData::Call(data) => std::iter::once(data.expression)
                .chain(data.arguments.iter())
                .collect(),
            NodeData::Binary(data) => vec![data.left, data.right],
            NodeData::ShorthandPropertyAssignment(data) => vec![data.name],
            NodeData::PropertyAssignment(data) => vec![data.name, data.initializer],
            NodeData::VariableStatement(data) => vec![data.declaration_list],
            NodeData::VariableDeclarationList(data) => data.declarations.nodes.clone(),
            NodeData::VariableDeclaration(data) => vec![data.name, data.initializer],
            NodeData::ExpressionStatement(data) => vec![data.expression],
            NodeData::FunctionDeclaration(data) | NodeData::ClassDeclaration(data) => {
                vec![data.name]
            }
            NodeData::ImportDeclaration(data) => vec![data.module_specifier],
            NodeData::Identifier(_)
            | NodeData::Token(_)
            | NodeData::Literal(_)
            | NodeData::EmptyStatement
            | NodeData::Skipped(_) => Vec::new(),
        };
        children.into_iter().filter(|idx| idx.is_some()).collect()
    }
}
