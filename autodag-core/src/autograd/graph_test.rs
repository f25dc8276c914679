use super::*;
use crate::autograd::mode::{forward_mode, no_grad};

fn leaf(values: Vec<f64>, requires_grad: bool) -> Tensor {
    let len = values.len();
    let t = Tensor::new_f64(values, vec![len]).unwrap();
    t.requires_grad_(requires_grad).unwrap();
    t
}

#[test]
fn test_untracked_inputs_produce_leaf() {
    let a = leaf(vec![1.0, 2.0], false);
    let b = leaf(vec![3.0, 4.0], false);
    let c = a.add(&b).unwrap();
    assert!(c.is_leaf());
    assert!(!c.requires_grad());
    assert!(c.grad_fn().is_none());
}

#[test]
fn test_no_grad_skips_graph() {
    let a = leaf(vec![1.0, 2.0], true);
    let c = {
        let _guard = no_grad();
        a.mul(&a).unwrap()
    };
    assert!(c.is_leaf());
    assert!(!c.requires_grad());
    assert_eq!(c.to_vec_f64(), vec![1.0, 4.0]);
}

#[test]
fn test_children_are_positionally_aligned() {
    let a = leaf(vec![1.0, 2.0], false);
    let b = leaf(vec![3.0, 4.0], true);
    let c = a.mul(&b).unwrap();
    assert!(!c.is_leaf());
    assert!(c.requires_grad());

    let node = c.grad_fn().unwrap();
    assert_eq!(node.name(), "mul");
    let children = node.children();
    assert_eq!(children.len(), 2);
    assert!(children[0].is_none());
    let child = children[1].as_ref().unwrap();
    assert!(child.is_accumulator());
    assert_eq!(child.target().unwrap().id(), b.id());
}

#[test]
fn test_accumulator_is_shared_per_leaf() {
    let a = leaf(vec![1.0, 2.0], true);
    let c = a.mul(&a).unwrap();
    let d = a.exp().unwrap();

    let node_c = c.grad_fn().unwrap();
    let node_d = d.grad_fn().unwrap();
    let first = node_c.children()[0].as_ref().unwrap();
    let second = node_c.children()[1].as_ref().unwrap();
    let third = node_d.children()[0].as_ref().unwrap();
    assert!(Rc::ptr_eq(first, second));
    assert!(Rc::ptr_eq(first, third));
}

#[test]
fn test_intermediate_child_is_producer_node() {
    let a = leaf(vec![1.0, 2.0], true);
    let b = a.exp().unwrap();
    let c = b.sin().unwrap();
    let node = c.grad_fn().unwrap();
    let child = node.children()[0].as_ref().unwrap();
    assert!(Rc::ptr_eq(child, &b.grad_fn().unwrap()));
}

#[test]
fn test_forward_mode_attaches_tangent_without_node() {
    let a = leaf(vec![1.0, 2.0], true);
    a.set_tangent(Some(Tensor::new_f64(vec![1.0, 0.0], vec![2]).unwrap()));
    let c = {
        let _guard = forward_mode();
        a.mul(&a).unwrap()
    };
    assert!(c.grad_fn().is_none());
    assert!(!c.is_leaf());
    assert!(c.requires_grad());
    // d(a*a) = 2a * da
    assert_eq!(c.tangent().unwrap().to_vec_f64(), vec![2.0, 0.0]);
}

#[test]
fn test_forward_mode_missing_tangent_is_zero() {
    let a = leaf(vec![1.0, 2.0], true);
    let c = {
        let _guard = forward_mode();
        a.exp().unwrap()
    };
    assert_eq!(c.tangent().unwrap().to_vec_f64(), vec![0.0, 0.0]);
}

#[test]
fn test_forward_mode_output_is_untracked_in_reverse_mode() {
    let a = leaf(vec![1.0, 2.0], true);
    let c = {
        let _guard = forward_mode();
        a.exp().unwrap()
    };
    // c requires grad but has no node to backpropagate into.
    let d = c.mul_scalar(2.0).unwrap();
    assert!(d.grad_fn().is_none());
    assert!(d.is_leaf());
    assert!(!d.requires_grad());
    assert_eq!(
        d.sum(None, false).unwrap().backward(None),
        Err(AutodagError::NoGraph)
    );
    assert!(a.grad().is_none());
}
