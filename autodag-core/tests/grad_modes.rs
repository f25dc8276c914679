use autodag_core::{
    current_mode, forward_mode, grad_mode, is_grad_enabled, jvp, no_grad, with_grad_mode, AutodagError,
    Discipline, GradMode,
};

mod common;
use common::{assert_values, create_test_tensor, leaf};

#[test]
fn test_default_mode_is_reverse_enabled() {
    assert!(is_grad_enabled());
    assert_eq!(current_mode(), GradMode::default());
}

#[test]
fn test_guards_nest_and_restore() {
    {
        let _outer = no_grad();
        assert!(!is_grad_enabled());
        {
            let _inner = grad_mode(true, Discipline::Forward);
            assert!(is_grad_enabled());
            assert_eq!(current_mode().discipline, Discipline::Forward);
        }
        assert!(!is_grad_enabled());
    }
    assert!(is_grad_enabled());
}

#[test]
fn test_with_grad_mode_scopes_closure() -> Result<(), AutodagError> {
    let a = leaf(vec![1.0], vec![1]);
    let disabled = GradMode {
        enabled: false,
        discipline: Discipline::Reverse,
    };
    let out = with_grad_mode(disabled, || a.exp())?;
    assert!(out.grad_fn().is_none());
    assert!(is_grad_enabled());
    Ok(())
}

#[test]
fn test_forward_mode_records_no_node() -> Result<(), AutodagError> {
    let x = leaf(vec![1.0, 2.0], vec![2]);
    let y = {
        let _guard = forward_mode();
        x.mul(&x)?.add_scalar(1.0)?
    };
    assert!(y.grad_fn().is_none());
    assert!(y.requires_grad());
    // The input had no tangent, so the propagated tangent is zero.
    assert_values(&y.tangent().expect("tangent"), &[0.0, 0.0]);
    assert_eq!(y.backward(Some(&create_test_tensor(vec![1.0, 1.0], vec![2]))), Err(AutodagError::NoGraph));
    Ok(())
}

#[test]
fn test_jvp_matches_derivative() -> Result<(), AutodagError> {
    let x = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let t = create_test_tensor(vec![1.0, 1.0], vec![2]);
    let (value, tangent) = jvp(&[x], &[t], |i| i[0].mul(&i[0])?.add_scalar(1.0))?;
    assert_values(&value, &[2.0, 5.0]);
    assert_values(&tangent, &[2.0, 4.0]);
    Ok(())
}
