use super::*;
use crate::tensor::Tensor;
use crate::types::DType;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_zeros_like() {
    let tensor = Tensor::new(vec![1.0f32, 2.0, 3.0], vec![1, 3]).unwrap();
    let zeros_t = zeros_like(&tensor).unwrap();
    assert_eq!(zeros_t.shape(), tensor.shape());
    assert_eq!(zeros_t.numel(), tensor.numel());
    assert_eq!(zeros_t.dtype(), DType::F32);
    assert!(zeros_t.to_vec_f64().iter().all(|&x| x == 0.0));
    assert!(zeros_t.is_leaf());
    assert!(!zeros_t.requires_grad());
}

#[test]
fn test_zeros() {
    let shape = vec![2, 3];
    let t = zeros(&shape).unwrap();
    assert_eq!(t.shape(), shape);
    assert_eq!(t.numel(), 6);
    assert_eq!(t.dtype(), DType::F32);
    assert!(t.to_vec_f64().iter().all(|&x| x == 0.0));
}

#[test]
fn test_ones_f64() {
    let shape = vec![1, 4];
    let t = ones_f64(&shape).unwrap();
    assert_eq!(t.shape(), shape);
    assert_eq!(t.dtype(), DType::F64);
    assert!(t.to_vec_f64().iter().all(|&x| x == 1.0));
}

#[test]
fn test_full() {
    let shape = vec![3, 1, 2];
    let fill_val = 42.5_f32;
    let t = full(&shape, fill_val).unwrap();
    assert_eq!(t.shape(), shape);
    assert_eq!(t.numel(), 6);
    assert_eq!(t.dtype(), DType::F32);
    assert!(t.to_vec_f64().iter().all(|&x| (x - 42.5).abs() < 1e-6));
}

#[test]
fn test_eye() {
    let t = eye_f64(3).unwrap();
    assert_eq!(t.shape(), vec![3, 3]);
    assert_eq!(
        t.to_vec_f64(),
        vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
    );
}

#[test]
fn test_rand_is_seeded_and_bounded() {
    let mut rng_a = StdRng::seed_from_u64(7);
    let mut rng_b = StdRng::seed_from_u64(7);
    let a = rand_f64_with_rng(&[4, 5], &mut rng_a).unwrap();
    let b = rand_f64_with_rng(&[4, 5], &mut rng_b).unwrap();
    assert_eq!(a.to_vec_f64(), b.to_vec_f64());
    assert!(a.to_vec_f64().iter().all(|&x| (0.0..1.0).contains(&x)));
}

#[test]
fn test_randn_shape() {
    let mut rng = StdRng::seed_from_u64(11);
    let t = randn_f64_with_rng(&[2, 3, 4], &mut rng).unwrap();
    assert_eq!(t.shape(), vec![2, 3, 4]);
    assert_eq!(t.dtype(), DType::F64);
}

#[test]
fn test_scalar_shape() {
    let t = zeros_f64(&[]).unwrap();
    assert_eq!(t.shape(), Vec::<usize>::new());
    assert_eq!(t.numel(), 1);
}
