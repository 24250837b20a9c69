//! JavaScript front-end
//!
//! Parses source text with tree-sitter and lowers the concrete tree into a
//! [`SyntaxTree`], recording scopes and declarations into a [`ScopeGraph`]
//! along the way.
//!
//! Binding rules:
//! - `var`, parameters, function declarations: nearest function (or program) scope
//! - `let`/`const`, class declarations: nearest block scope
//! - named function/class expressions: their own scope
//! - catch parameters: the catch clause
//! - imports: program scope
//!
//! Declarations are hoisted: a name is visible throughout its scope.

use super::{ElementIdx, IdentifierRole, Shape, SyntaxTree};
use crate::element_id::Span;
use crate::scope::{ScopeGraph, ScopeId, ScopeKind};
use crate::{Error, Result};
use std::collections::HashMap;
use tree_sitter::{Language, Node, Parser};

const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "generator_function",
    "arrow_function",
    "method_definition",
];

fn is_function_kind(kind: &str) -> bool {
    FUNCTION_KINDS.contains(&kind)
}

/// A lowered source file: the text, its tree and the scopes resolving it.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub source: String,
    pub tree: SyntaxTree,
    pub scopes: ScopeGraph,
}

/// tree-sitter backed JavaScript parser
pub struct JavaScriptParser {
    parser: Parser,
    strict: bool,
}

impl JavaScriptParser {
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_javascript::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        Ok(Self {
            parser,
            strict: true,
        })
    }

    /// In strict mode any syntax error fails the parse. Otherwise the
    /// recovered tree (with `ERROR` nodes) is lowered as-is.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn parse(&mut self, source: &str) -> Result<ParsedSource> {
        let ts_tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse("parser produced no tree".to_string()))?;
        let root = ts_tree.root_node();

        if root.has_error() {
            let message = describe_error(root);
            if self.strict {
                return Err(Error::Parse(message));
            }
            tracing::debug!("Lowering partial tree: {}", message);
        }

        let mut lowering = Lowering::new(source, root);
        lowering.lower(root);

        tracing::debug!(
            "Lowered {} elements in {} scopes",
            lowering.tree.len(),
            lowering.scopes.scope_count()
        );

        Ok(ParsedSource {
            source: source.to_string(),
            tree: lowering.tree,
            scopes: lowering.scopes,
        })
    }
}

fn span_of_node(node: Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

/// Named, non-extra (no comments) children in source order
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();
    children
}

/// `((f))` → `f`
fn unwrap_parens(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        match named_children(node).into_iter().next() {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node
            .children(&mut cursor)
            .filter(|child| child.has_error())
            .collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

fn describe_error(root: Node<'_>) -> String {
    match first_error(root) {
        Some(node) => {
            let position = node.start_position();
            if node.is_missing() {
                format!(
                    "missing `{}` at line {}, column {}",
                    node.kind(),
                    position.row + 1,
                    position.column + 1
                )
            } else {
                format!(
                    "syntax error at line {}, column {}",
                    position.row + 1,
                    position.column + 1
                )
            }
        }
        None => "syntax error".to_string(),
    }
}

/// Pending work of the lowering walk. `Exit` runs once the whole subtree
/// below `node` has been lowered.
enum Frame<'t> {
    Enter {
        node: Node<'t>,
        parent: ElementIdx,
        parent_kind: &'static str,
    },
    Exit {
        node: Node<'t>,
        idx: ElementIdx,
        parent_kind: &'static str,
        opened: bool,
    },
}

struct Lowering<'s> {
    source: &'s str,
    tree: SyntaxTree,
    scopes: ScopeGraph,
    scope_stack: Vec<ScopeId>,
    /// tree-sitter node id → lowered element
    elements: HashMap<usize, ElementIdx>,
}

impl<'s> Lowering<'s> {
    fn new(source: &'s str, root: Node<'_>) -> Self {
        let tree = SyntaxTree::new(root.kind(), Some(span_of_node(root)));
        let mut scopes = ScopeGraph::new();
        scopes.assign(tree.root(), ScopeId::root());

        let mut elements = HashMap::new();
        elements.insert(root.id(), tree.root());

        Self {
            source,
            tree,
            scopes,
            scope_stack: vec![ScopeId::root()],
            elements,
        }
    }

    fn current_scope(&self) -> ScopeId {
        self.scope_stack.last().copied().unwrap_or_else(ScopeId::root)
    }

    fn element(&self, node: Node<'_>) -> Option<ElementIdx> {
        self.elements.get(&node.id()).copied()
    }

    fn field(&self, node: Node<'_>, name: &str) -> Option<ElementIdx> {
        node.child_by_field_name(name).and_then(|child| self.element(child))
    }

    /// Lower everything below `root` with an explicit stack, so nesting
    /// depth is bounded by memory rather than the call stack.
    fn lower<'t>(&mut self, root: Node<'t>) {
        let program = self.tree.root();
        let mut stack: Vec<Frame<'t>> = named_children(root)
            .into_iter()
            .rev()
            .map(|node| Frame::Enter {
                node,
                parent: program,
                parent_kind: root.kind(),
            })
            .collect();

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter {
                    node,
                    parent,
                    parent_kind,
                } => {
                    let shape = self.leaf_shape(node);
                    let idx = self.tree.push(parent, node.kind(), Some(span_of_node(node)), shape);
                    self.elements.insert(node.id(), idx);
                    let scope = self.current_scope();
                    self.scopes.assign(idx, scope);

                    let opened = self.open_scope(node, parent_kind);
                    stack.push(Frame::Exit {
                        node,
                        idx,
                        parent_kind,
                        opened,
                    });
                    stack.extend(named_children(node).into_iter().rev().map(|child| Frame::Enter {
                        node: child,
                        parent: idx,
                        parent_kind: node.kind(),
                    }));
                }
                Frame::Exit {
                    node,
                    idx,
                    parent_kind,
                    opened,
                } => {
                    if let Some(shape) = self.shape(node) {
                        self.tree.set_shape(idx, shape);
                    }
                    self.declare_inner(node, idx);
                    if opened {
                        self.scope_stack.pop();
                    }
                    self.declare_outer(node, idx, parent_kind);
                }
            }
        }
    }

    fn leaf_shape(&self, node: Node<'_>) -> Shape {
        let role = match node.kind() {
            "identifier" | "shorthand_property_identifier" | "shorthand_property_identifier_pattern" => {
                IdentifierRole::Read
            }
            "property_identifier" | "private_property_identifier" => IdentifierRole::Property,
            _ => return Shape::Other,
        };
        let name = node
            .utf8_text(self.source.as_bytes())
            .unwrap_or_default()
            .to_string();
        Shape::Identifier { name, role }
    }

    fn shape(&self, node: Node<'_>) -> Option<Shape> {
        match node.kind() {
            "call_expression" => {
                let callee = node
                    .child_by_field_name("function")
                    .map(unwrap_parens)
                    .and_then(|callee| self.element(callee))?;
                // Tagged templates carry a template_string instead of arguments
                let arguments = node
                    .child_by_field_name("arguments")
                    .filter(|args| args.kind() == "arguments")
                    .map(|args| {
                        named_children(args)
                            .into_iter()
                            .filter_map(|arg| self.element(arg))
                            .collect()
                    })
                    .unwrap_or_default();
                Some(Shape::Call { callee, arguments })
            }
            "variable_declarator" => Some(Shape::Declarator {
                target: self.field(node, "name")?,
                init: self.field(node, "value"),
            }),
            "return_statement" => Some(Shape::Return {
                argument: named_children(node)
                    .into_iter()
                    .next()
                    .and_then(|arg| self.element(arg)),
            }),
            kind if is_function_kind(kind) => {
                let params = if let Some(list) = node.child_by_field_name("parameters") {
                    named_children(list)
                        .into_iter()
                        .filter_map(|param| self.element(param))
                        .collect()
                } else {
                    // Arrow function with a bare parameter: `a => a`
                    self.field(node, "parameter").into_iter().collect()
                };
                Some(Shape::Function {
                    name: self.field(node, "name"),
                    params,
                    body: self.field(node, "body"),
                })
            }
            _ => None,
        }
    }

    fn open_scope(&mut self, node: Node<'_>, parent_kind: &str) -> bool {
        let kind = match node.kind() {
            kind if is_function_kind(kind) => ScopeKind::Function,
            "class" | "class_declaration" => ScopeKind::Class,
            "statement_block" => {
                // A function body shares the function's scope
                if is_function_kind(parent_kind) {
                    return false;
                }
                ScopeKind::Block
            }
            "for_statement" | "for_in_statement" | "catch_clause" | "switch_body" => ScopeKind::Block,
            _ => return false,
        };
        let scope = self.scopes.add_scope(self.current_scope(), kind);
        self.scope_stack.push(scope);
        true
    }

    /// Declarations living in the scope `node` itself opened
    fn declare_inner(&mut self, node: Node<'_>, idx: ElementIdx) {
        let scope = self.current_scope();
        match node.kind() {
            kind if is_function_kind(kind) => {
                let Shape::Function { name, params, .. } = self.tree.get(idx).shape.clone() else {
                    return;
                };
                for param in params {
                    self.define_pattern(scope, param, param);
                }
                let self_named = matches!(kind, "function_expression" | "generator_function");
                if let Some(name) = name.filter(|_| self_named) {
                    self.define_pattern(scope, name, idx);
                }
            }
            "class" => {
                if let Some(name) = self.field(node, "name") {
                    self.define_pattern(scope, name, idx);
                }
            }
            "catch_clause" => {
                if let Some(param) = self.field(node, "parameter") {
                    self.define_pattern(scope, param, param);
                }
            }
            "for_in_statement" => {
                let Some(left) = self.field(node, "left") else {
                    return;
                };
                match node.child_by_field_name("kind").map(|kind| kind.kind()) {
                    Some("var") => {
                        let var_scope = self.scopes.var_scope(scope);
                        self.define_pattern(var_scope, left, left);
                    }
                    Some(_) => self.define_pattern(scope, left, left),
                    None => {
                        self.mark_pattern(left, IdentifierRole::Write);
                    }
                }
            }
            _ => {}
        }
    }

    /// Declarations that bind in the scope surrounding `node`
    fn declare_outer(&mut self, node: Node<'_>, idx: ElementIdx, parent_kind: &str) {
        let scope = self.current_scope();
        match node.kind() {
            "function_declaration" | "generator_function_declaration" => {
                let var_scope = self.scopes.var_scope(scope);
                if let Some(name) = self.field(node, "name") {
                    self.define_pattern(var_scope, name, idx);
                }
            }
            "class_declaration" => {
                if let Some(name) = self.field(node, "name") {
                    self.define_pattern(scope, name, idx);
                }
            }
            "variable_declarator" => {
                let is_var = parent_kind == "variable_declaration";
                let target_scope = if is_var { self.scopes.var_scope(scope) } else { scope };
                if let Some(target) = self.field(node, "name") {
                    self.define_pattern(target_scope, target, idx);
                }
            }
            "import_specifier" => {
                let local = self.field(node, "alias").or_else(|| self.field(node, "name"));
                if let (Some(_), Some(imported)) = (self.field(node, "alias"), self.field(node, "name")) {
                    self.tree.set_role(imported, IdentifierRole::Property);
                }
                if let Some(local) = local {
                    self.define_pattern(ScopeId::root(), local, idx);
                }
            }
            "namespace_import" => {
                for child in named_children(node) {
                    if let Some(local) = self.element(child) {
                        self.define_pattern(ScopeId::root(), local, idx);
                    }
                }
            }
            "import_clause" => {
                for child in named_children(node).into_iter().filter(|c| c.kind() == "identifier") {
                    if let Some(local) = self.element(child) {
                        self.define_pattern(ScopeId::root(), local, local);
                    }
                }
            }
            "export_specifier" => {
                if let Some(alias) = self.field(node, "alias") {
                    self.tree.set_role(alias, IdentifierRole::Property);
                }
            }
            "assignment_expression" | "augmented_assignment_expression" => {
                if let Some(left) = self.field(node, "left") {
                    self.mark_pattern(left, IdentifierRole::Write);
                }
            }
            _ => {}
        }
    }

    /// Mark every name bound by `pattern` as a declaration and bind it in
    /// `scope` to `declaring`.
    fn define_pattern(&mut self, scope: ScopeId, pattern: ElementIdx, declaring: ElementIdx) {
        for name in self.mark_pattern(pattern, IdentifierRole::Declaration) {
            self.scopes.add_definition(scope, name, declaring);
        }
    }

    /// Set `role` on every identifier bound by a (possibly destructuring)
    /// pattern and return their names. Default values are left untouched.
    fn mark_pattern(&mut self, pattern: ElementIdx, role: IdentifierRole) -> Vec<String> {
        let mut names = Vec::new();
        let mut stack = vec![pattern];
        while let Some(idx) = stack.pop() {
            let element = self.tree.get(idx);
            let kind = element.kind;
            let name = element.name().map(str::to_string);
            match kind {
                "identifier" | "shorthand_property_identifier_pattern" => {
                    names.extend(name);
                    self.tree.set_role(idx, role);
                }
                "assignment_pattern" | "object_assignment_pattern" => {
                    stack.extend(element.children.first().copied());
                }
                "pair_pattern" => {
                    stack.extend(element.children.last().copied());
                }
                "object_pattern" | "array_pattern" | "rest_pattern" => {
                    stack.extend(element.children.iter().rev().copied());
                }
                _ => {}
            }
        }
        names
    }
}
