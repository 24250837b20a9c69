//! Relation rules
//!
//! Edge directions:
//! - reference: identifier use → declaring element
//! - call-callee: call → callee
//! - call-argument-binding: parameter → argument
//! - value-assignment: declarator → initializer
//! - return-argument: enclosing function → returned expression
//!
//! Gaps in the input (unresolved names, missing initializers, bare returns,
//! surplus arguments) drop the affected edge and are never errors.

use super::GraphBuilder;
use crate::relation::RelationKind;
use crate::scope::BindingResolver;
use crate::syntax::{ElementIdx, Shape};

impl<R: BindingResolver + ?Sized> GraphBuilder<'_, R> {
    pub(super) fn reference_rule(&mut self, identifier: ElementIdx, name: &str) {
        let use_id = self.add_node(identifier);
        let Some(declaration) = self.resolver.resolve(identifier, name) else {
            tracing::trace!("Unresolved reference {:?} at {}", name, use_id);
            return;
        };
        let declaration_id = self.add_node(declaration);
        self.add_edge(
            use_id,
            declaration_id,
            RelationKind::Reference,
            format!("ref: \"{}\"", name),
        );
    }

    pub(super) fn call_rule(&mut self, call: ElementIdx, callee: ElementIdx, arguments: &[ElementIdx]) {
        let tree = self.tree;
        let call_id = self.add_node(call);

        // Plain identifiers are shortened to their declaration
        let target = match &tree.get(callee).shape {
            Shape::Identifier { name, .. } => match self.resolver.resolve(callee, name) {
                Some(declaration) => declaration,
                None => {
                    tracing::debug!("Skipping call {}: callee {:?} is not declared", call_id, name);
                    return;
                }
            },
            _ => callee,
        };

        let target_id = self.add_node(target);
        let label = format!("call callee: \"{}\"", call_id);
        self.add_edge(call_id.clone(), target_id, RelationKind::CallCallee, label);

        let params = tree.params_of(target);
        let rest = params
            .last()
            .copied()
            .filter(|last| tree.get(*last).kind == "rest_pattern");

        for (position, &argument) in arguments.iter().enumerate() {
            if tree.get(argument).kind == "spread_element" {
                tracing::debug!("Call {}: spread argument hides later positions", call_id);
                break;
            }
            let Some(param) = params.get(position).copied().or(rest) else {
                tracing::debug!(
                    "Call {}: {} arguments for {} parameters",
                    call_id,
                    arguments.len(),
                    params.len()
                );
                break;
            };

            let param_name = tree
                .binding_name(param)
                .unwrap_or(tree.get(param).kind)
                .to_string();
            let param_id = self.add_node(param);
            let argument_id = self.add_node(argument);
            self.add_edge(
                param_id,
                argument_id,
                RelationKind::CallArgumentBinding,
                format!("call args: \"{}\"", param_name),
            );
        }
    }

    pub(super) fn assignment_rule(&mut self, declarator: ElementIdx, init: Option<ElementIdx>) {
        let declarator_id = self.add_node(declarator);
        let Some(init) = init else {
            return;
        };
        let init_id = self.add_node(init);
        self.add_edge(declarator_id, init_id, RelationKind::ValueAssignment, "value assignment");
    }

    pub(super) fn return_rule(&mut self, statement: ElementIdx, argument: Option<ElementIdx>) {
        let Some(argument) = argument else {
            return;
        };
        let function = self.tree.enclosing_function(statement);
        let function_id = self.add_node(function);
        let argument_id = self.add_node(argument);
        self.add_edge(function_id, argument_id, RelationKind::ReturnArgument, "return argument");
    }
}
