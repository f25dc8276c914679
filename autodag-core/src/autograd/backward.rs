// src/autograd/backward.rs

use crate::autograd::graph::{Node, NodeKind};
use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::{Tensor, TensorId};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

/// Where the gradients reaching the graph boundary end up.
enum Sink<'a> {
    /// Added into each leaf's `.grad`.
    LeafGrads,
    /// Collected for the requested tensors only. No `.grad` is touched.
    Collect {
        wanted: &'a HashSet<TensorId>,
        grads: HashMap<TensorId, Buffer>,
    },
}

impl Sink<'_> {
    fn at_leaf(&mut self, target: &Tensor, grad: Buffer) -> Result<(), AutodagError> {
        match self {
            Sink::LeafGrads => target.accumulate_grad(grad),
            Sink::Collect { .. } => self.collect(target.id(), grad),
        }
    }

    fn at_output(&mut self, output_id: TensorId, grad: &Buffer) -> Result<(), AutodagError> {
        let wanted = matches!(self, Sink::Collect { wanted, .. } if wanted.contains(&output_id));
        if wanted {
            self.collect(output_id, grad.clone())?;
        }
        Ok(())
    }

    fn collect(&mut self, id: TensorId, grad: Buffer) -> Result<(), AutodagError> {
        if let Sink::Collect { wanted, grads } = self {
            if !wanted.contains(&id) {
                return Ok(());
            }
            let summed = match grads.remove(&id) {
                Some(existing) => existing.add(&grad.cast(existing.dtype()))?,
                None => grad,
            };
            grads.insert(id, summed);
        }
        Ok(())
    }
}

/// Breadth-first propagation from `root`.
///
/// There is no pre-merge of gradients: a node reachable through k paths is
/// visited k times, and contributions only combine in the sink.
fn run_backward(root: Rc<Node>, seed: Buffer, sink: &mut Sink<'_>) -> Result<(), AutodagError> {
    let mut queue: VecDeque<(Rc<Node>, Buffer)> = VecDeque::new();
    queue.push_back((root, seed));
    let mut visits = 0usize;

    while let Some((node, grad)) = queue.pop_front() {
        visits += 1;
        log::trace!("Visiting '{}' with gradient of shape {:?}", node.name(), grad.shape());
        match &node.kind {
            NodeKind::AccumulateGrad { target } => {
                let reduced = reduce_to_shape(&grad, &target.shape())?;
                sink.at_leaf(target, reduced)?;
            }
            NodeKind::Function {
                function,
                ctx,
                children,
                output_shape,
                output_id,
            } => {
                let grad = if grad.shape() != output_shape.as_slice() {
                    reduce_to_shape(&grad, output_shape)?
                } else {
                    grad
                };
                sink.at_output(*output_id, &grad)?;

                let input_grads = function.backward(ctx, &grad)?;
                if input_grads.len() != children.len() {
                    return Err(AutodagError::ArityMismatch {
                        operation: function.name().to_string(),
                        expected: children.len(),
                        actual: input_grads.len(),
                    });
                }
                for (child, input_grad) in children.iter().zip(input_grads) {
                    if let Some(child) = child {
                        queue.push_back((Rc::clone(child), input_grad));
                    }
                }
            }
        }
    }
    log::debug!("Backward pass finished after {} node visits", visits);
    Ok(())
}

/// Validates the seed and returns the starting point of the traversal.
fn prepare(output: &Tensor, seed: Option<&Tensor>) -> Result<(Rc<Node>, Buffer), AutodagError> {
    let root = output.grad_fn().ok_or(AutodagError::NoGraph)?;
    let shape = output.shape();
    let seed = match seed {
        None => {
            let numel = output.numel();
            if numel != 1 {
                return Err(AutodagError::AmbiguousSeed { numel });
            }
            Buffer::ones(&shape, output.dtype())
        }
        Some(seed) => {
            if !seed.dtype().is_floating_point() {
                return Err(AutodagError::NonDifferentiableType {
                    argument: "seed".to_string(),
                    dtype: seed.dtype(),
                });
            }
            if seed.shape() != shape {
                return Err(AutodagError::ShapeMismatch {
                    expected: shape,
                    actual: seed.shape(),
                    operation: "backward".to_string(),
                });
            }
            seed.buffer().cast(output.dtype())
        }
    };
    Ok((root, seed))
}

/// Propagates `seed` (or a one for single-element outputs) from `output`
/// and adds the resulting gradients into every reachable leaf's `.grad`.
///
/// Repeated calls accumulate. On error, contributions already added stay in place.
pub fn backward(output: &Tensor, seed: Option<&Tensor>) -> Result<(), AutodagError> {
    let (root, seed) = prepare(output, seed)?;
    log::debug!("Starting backward from '{}' node", root.name());
    run_backward(root, seed, &mut Sink::LeafGrads)
}

/// Returns the gradient of `output` w.r.t. each of `inputs`, in order.
///
/// Inputs may be leaves or intermediate tensors of the graph. Inputs that
/// `output` does not depend on get zeros. No tensor's `.grad` is modified.
pub fn grad(inputs: &[Tensor], output: &Tensor, seed: Option<&Tensor>) -> Result<Vec<Tensor>, AutodagError> {
    for (i, input) in inputs.iter().enumerate() {
        if !input.dtype().is_floating_point() {
            return Err(AutodagError::NonDifferentiableType {
                argument: format!("inputs[{}]", i),
                dtype: input.dtype(),
            });
        }
    }
    let (root, seed) = prepare(output, seed)?;
    log::debug!("Computing grad of '{}' w.r.t. {} input(s)", root.name(), inputs.len());

    let wanted: HashSet<TensorId> = inputs.iter().map(Tensor::id).collect();
    let mut sink = Sink::Collect {
        wanted: &wanted,
        grads: HashMap::new(),
    };
    run_backward(root, seed, &mut sink)?;

    let collected = match sink {
        Sink::Collect { grads, .. } => grads,
        Sink::LeafGrads => HashMap::new(),
    };
    Ok(inputs
        .iter()
        .map(|input| {
            let buffer = match collected.get(&input.id()) {
                Some(grad) => grad.cast(input.dtype()),
                None => input.buffer().zeros_like(),
            };
            Tensor::from_buffer(buffer)
        })
        .collect())
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
