// src/autograd/graph.rs

use crate::autograd::context::Context;
use crate::autograd::function::Function;
use crate::autograd::mode::{current_mode, Discipline};
use crate::error::AutodagError;
use crate::tensor::{Tensor, TensorId};
use std::rc::Rc;

/// A node of the computation graph.
///
/// Nodes only ever point at nodes that existed before them, so the graph is
/// acyclic by construction. They are shared through `Rc` and freed when the
/// last tensor (or downstream node) holding them goes away.
#[derive(Debug)]
pub struct Node {
    pub(crate) kind: NodeKind,
}

#[derive(Debug)]
pub(crate) enum NodeKind {
    /// Terminal node adding incoming gradients into a leaf tensor.
    AccumulateGrad { target: Tensor },
    /// An operation invocation.
    Function {
        function: Box<dyn Function>,
        ctx: Context,
        /// One entry per input, positionally aligned. `None` for inputs that
        /// do not require grad.
        children: Vec<Option<Rc<Node>>>,
        output_shape: Vec<usize>,
        output_id: TensorId,
    },
}

impl Node {
    /// Name of the operation, or `"AccumulateGrad"` for leaf accumulators.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            NodeKind::AccumulateGrad { .. } => "AccumulateGrad",
            NodeKind::Function { function, .. } => function.name(),
        }
    }

    pub fn is_accumulator(&self) -> bool {
        matches!(self.kind, NodeKind::AccumulateGrad { .. })
    }

    /// Child positions aligned with the operation's inputs. Empty for accumulators.
    pub fn children(&self) -> &[Option<Rc<Node>>] {
        match &self.kind {
            NodeKind::AccumulateGrad { .. } => &[],
            NodeKind::Function { children, .. } => children,
        }
    }

    /// The leaf an accumulator writes into.
    pub fn target(&self) -> Option<&Tensor> {
        match &self.kind {
            NodeKind::AccumulateGrad { target } => Some(target),
            NodeKind::Function { .. } => None,
        }
    }
}

/// Returns the graph position of `tensor` as seen by a consumer, creating the
/// leaf accumulator on first use.
fn resolve_child(tensor: &Tensor) -> Option<Rc<Node>> {
    let mut data = tensor.write_data();
    if !data.requires_grad {
        return None;
    }
    if let Some(node) = &data.grad_fn {
        return Some(Rc::clone(node));
    }
    if !data.is_leaf {
        // Outputs of forward-mode operations carry no node.
        return None;
    }
    if let Some(accumulator) = data.accumulator.upgrade() {
        return Some(accumulator);
    }
    let accumulator = Rc::new(Node {
        kind: NodeKind::AccumulateGrad {
            target: tensor.clone(),
        },
    });
    data.accumulator = Rc::downgrade(&accumulator);
    Some(accumulator)
}

/// Registers `output` of `function` in the graph according to the current mode.
///
/// With tracking disabled, or when no input requires grad, the output is
/// returned as a plain leaf. In reverse mode a node is created and attached
/// as the output's producer, unless none of the inputs has a graph position
/// (forward-mode outputs), in which case the output also stays a plain leaf. In forward mode the output tangent is computed
/// right away and no node is kept.
pub(crate) fn attach_to_graph(
    output: Tensor,
    function: Box<dyn Function>,
    ctx: Context,
    inputs: &[&Tensor],
) -> Result<Tensor, AutodagError> {
    let mode = current_mode();
    if !mode.enabled || !inputs.iter().any(|t| t.requires_grad()) {
        return Ok(output);
    }

    match mode.discipline {
        Discipline::Reverse => {
            let children: Vec<Option<Rc<Node>>> = inputs.iter().map(|t| resolve_child(t)).collect();
            if children.iter().all(Option::is_none) {
                // Only forward-mode outputs get here: nothing to backpropagate into.
                log::debug!("'{}' has no graph position among its inputs, output left untracked", function.name());
                return Ok(output);
            }
            log::debug!(
                "Attaching '{}' node with {} tracked input(s)",
                function.name(),
                children.iter().filter(|c| c.is_some()).count()
            );
            let node = Rc::new(Node {
                kind: NodeKind::Function {
                    function,
                    ctx,
                    children,
                    output_shape: output.shape(),
                    output_id: output.id(),
                },
            });
            let mut data = output.write_data();
            data.grad_fn = Some(node);
            data.requires_grad = true;
            data.is_leaf = false;
        }
        Discipline::Forward => {
            let tangents: Vec<_> = inputs
                .iter()
                .map(|t| match t.tangent() {
                    Some(tangent) => (*tangent.buffer()).clone(),
                    None => t.buffer().zeros_like(),
                })
                .collect();
            let tangent = function.tangent(&ctx, &tangents)?;
            log::debug!("Forward-mode '{}' produced tangent {:?}", function.name(), tangent.shape());
            output.set_tangent(Some(Tensor::from_buffer(tangent)));
            let mut data = output.write_data();
            data.requires_grad = true;
            data.is_leaf = false;
        }
    }
    Ok(output)
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
