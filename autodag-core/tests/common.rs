use autodag_core::{AutodagError, Tensor};

/// Initializes logging once per test binary. Later calls are no-ops.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new_f64(data, shape).expect("Test tensor creation failed")
}

#[allow(dead_code)]
pub fn leaf(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    create_test_tensor(data, shape)
        .with_requires_grad(true)
        .expect("Test leaf creation failed")
}

/// Asserts element-wise closeness of a tensor's values.
#[allow(dead_code)]
pub fn assert_values(actual: &Tensor, expected: &[f64]) {
    let values = actual.to_vec_f64();
    assert_eq!(values.len(), expected.len(), "length mismatch: {:?}", values);
    for (a, e) in values.iter().zip(expected) {
        approx::assert_relative_eq!(*a, *e, epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[allow(dead_code)]
pub fn square_sum(inputs: &[Tensor]) -> Result<Tensor, AutodagError> {
    inputs[0].mul(&inputs[0])?.sum(None, false)
}
