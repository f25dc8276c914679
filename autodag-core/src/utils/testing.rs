use crate::autograd::grad_check::{check_grad, GradCheckConfig, GradCheckError};
use crate::error::AutodagError;
use crate::tensor::Tensor;

/// Checks if two tensors are approximately equal (shape and data within tolerance).
/// Panics if shapes differ or data differs significantly.
pub fn check_tensor_near(actual: &Tensor, expected_shape: &[usize], expected_data: &[f64], tolerance: f64) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");

    let actual_data_vec = actual.to_vec_f64();
    assert_eq!(
        actual_data_vec.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual_data_vec.iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Helper to create a simple f64 tensor for testing purposes.
pub fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new_f64(data, shape).expect("Failed to create test tensor")
}

/// Helper to create a simple f64 leaf tensor that requires gradient.
pub fn create_test_tensor_with_grad(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    let tensor = create_test_tensor(data, shape);
    tensor
        .requires_grad_(true)
        .expect("Failed to set requires_grad on test tensor");
    tensor
}

/// Runs [`check_grad`] with an all-ones output gradient at the usual f64 precision.
pub fn check_grad_ones<F>(func: F, inputs: &[Tensor]) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, AutodagError>,
{
    let output_shape = {
        let _guard = crate::autograd::mode::no_grad();
        func(inputs)?.shape()
    };
    let output_grad = crate::tensor::ones_f64(&output_shape)?;
    check_grad(func, inputs, &output_grad, GradCheckConfig::default())
}
