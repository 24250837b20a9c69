//! Syntax tree model
//!
//! The parser front-end lowers its concrete tree into an arena of
//! [`Element`]s. Each element keeps its kind tag and span, plus a closed
//! [`Shape`] carrying exactly the fields the relation rules need.

pub mod javascript;

pub use javascript::{JavaScriptParser, ParsedSource};

use crate::element_id::{identify, ElementId, Span};

/// Index of an element inside a [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementIdx(pub u32);

impl ElementIdx {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How an identifier is used at its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierRole {
    /// A read of a binding; the only role the reference rule fires on
    Read,
    /// Target of an assignment (`x = ...`, destructuring targets)
    Write,
    /// Binding site (declarator target, parameter, function name, ...)
    Declaration,
    /// Property or key name; never resolved
    Property,
}

/// Kind-specific structure of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Program,
    Identifier {
        name: String,
        role: IdentifierRole,
    },
    Call {
        /// Callee expression with parentheses unwrapped
        callee: ElementIdx,
        arguments: Vec<ElementIdx>,
    },
    Declarator {
        target: ElementIdx,
        init: Option<ElementIdx>,
    },
    Return {
        argument: Option<ElementIdx>,
    },
    Function {
        name: Option<ElementIdx>,
        params: Vec<ElementIdx>,
        body: Option<ElementIdx>,
    },
    Other,
}

/// A node of the lowered syntax tree
#[derive(Debug, Clone)]
pub struct Element {
    /// Node-type tag, e.g. `call_expression`
    pub kind: &'static str,
    /// `None` for synthetic elements
    pub span: Option<Span>,
    /// Per-tree ordinal, assigned only to elements without a span
    pub synthetic: Option<u32>,
    pub parent: Option<ElementIdx>,
    pub children: Vec<ElementIdx>,
    pub shape: Shape,
}

impl Element {
    /// Span-less elements only get a distinct identity once inserted into a
    /// [`SyntaxTree`], which assigns their synthetic ordinal.
    pub(crate) fn new(kind: &'static str, span: Option<Span>, shape: Shape) -> Self {
        Self {
            kind,
            span,
            synthetic: None,
            parent: None,
            children: Vec::new(),
            shape,
        }
    }

    pub fn id(&self) -> ElementId {
        identify(self)
    }

    /// Identifier name, if this element is an identifier
    pub fn name(&self) -> Option<&str> {
        match &self.shape {
            Shape::Identifier { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self.shape, Shape::Function { .. })
    }
}

/// Arena-backed syntax tree. Index 0 is always the program root.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    elements: Vec<Element>,
    next_synthetic: u32,
}

impl SyntaxTree {
    /// Create a tree holding only a program root
    pub fn new(root_kind: &'static str, root_span: Option<Span>) -> Self {
        let mut tree = Self {
            elements: Vec::new(),
            next_synthetic: 0,
        };
        tree.insert(None, Element::new(root_kind, root_span, Shape::Program));
        tree
    }

    pub fn root(&self) -> ElementIdx {
        ElementIdx(0)
    }

    /// Append a child element under `parent` and return its index
    pub fn push(
        &mut self,
        parent: ElementIdx,
        kind: &'static str,
        span: Option<Span>,
        shape: Shape,
    ) -> ElementIdx {
        self.insert(Some(parent), Element::new(kind, span, shape))
    }

    fn insert(&mut self, parent: Option<ElementIdx>, mut element: Element) -> ElementIdx {
        let idx = ElementIdx(self.elements.len() as u32);
        if element.span.is_none() {
            element.synthetic = Some(self.next_synthetic);
            self.next_synthetic += 1;
        }
        element.parent = parent;
        if let Some(parent) = parent {
            self.elements[parent.index()].children.push(idx);
        }
        self.elements.push(element);
        idx
    }

    pub fn set_shape(&mut self, idx: ElementIdx, shape: Shape) {
        self.elements[idx.index()].shape = shape;
    }

    pub fn set_role(&mut self, idx: ElementIdx, new_role: IdentifierRole) {
        if let Shape::Identifier { role, .. } = &mut self.elements[idx.index()].shape {
            *role = new_role;
        }
    }

    pub fn get(&self, idx: ElementIdx) -> &Element {
        &self.elements[idx.index()]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.len() <= 1
    }

    pub fn id_of(&self, idx: ElementIdx) -> ElementId {
        self.get(idx).id()
    }

    /// Depth-first pre-order walk from the root; every element exactly once.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Nearest ancestor function of `idx`, or the program root when `idx`
    /// is not inside any function.
    pub fn enclosing_function(&self, idx: ElementIdx) -> ElementIdx {
        let mut current = self.get(idx).parent;
        while let Some(ancestor) = current {
            if self.get(ancestor).is_function() {
                return ancestor;
            }
            current = self.get(ancestor).parent;
        }
        self.root()
    }

    /// Parameter list of a callable target: a function element, or a
    /// declarator initialized with a function expression.
    pub fn params_of(&self, idx: ElementIdx) -> &[ElementIdx] {
        match &self.get(idx).shape {
            Shape::Function { params, .. } => params,
            Shape::Declarator { init: Some(init), .. } => match &self.get(*init).shape {
                Shape::Function { params, .. } => params,
                _ => &[],
            },
            _ => &[],
        }
    }

    /// First bound name inside a parameter or pattern element.
    ///
    /// `a`, `a = 1` and `...a` all yield `a`; destructuring patterns yield
    /// their first bound name.
    pub fn binding_name(&self, idx: ElementIdx) -> Option<&str> {
        if let Some(name) = self.get(idx).name() {
            return Some(name);
        }
        let mut stack: Vec<ElementIdx> = self.get(idx).children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            let element = self.get(current);
            match &element.shape {
                Shape::Identifier {
                    role: IdentifierRole::Property,
                    ..
                } => {}
                Shape::Identifier { name, .. } => return Some(name),
                _ => stack.extend(element.children.iter().rev().copied()),
            }
        }
        None
    }

    /// Text covered by an element, if it has a span inside `source`
    pub fn text<'s>(&self, idx: ElementIdx, source: &'s str) -> Option<&'s str> {
        let span = self.get(idx).span?;
        source.get(span.start..span.end)
    }
}

/// Pre-order iterator over a [`SyntaxTree`]
pub struct Walk<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<ElementIdx>,
}

impl Iterator for Walk<'_> {
    type Item = ElementIdx;

    fn next(&mut self) -> Option<ElementIdx> {
        let idx = self.stack.pop()?;
        self.stack
            .extend(self.tree.get(idx).children.iter().rev().copied());
        Some(idx)
    }
}
