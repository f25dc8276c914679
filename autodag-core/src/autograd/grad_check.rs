use crate::autograd::backward::grad;
use crate::autograd::mode::{grad_mode, no_grad, Discipline};
use crate::error::AutodagError;
use crate::tensor::Tensor;
use crate::types::DType;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input tensor at index {input_index}, element index {element_index}: Analytical grad {analytical:?} != Numerical grad {numerical:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
    },

    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },

    #[error("Unsupported data type for gradient check on input {input_index}: {dtype:?}")]
    UnsupportedDType { input_index: usize, dtype: DType },

    #[error("Tensor error during gradient check: {0}")]
    TensorError(#[from] AutodagError),
}

/// Step and tolerance of the finite-difference check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckConfig {
    /// Half-width of the centered difference.
    pub epsilon: f64,
    /// Accepted absolute and relative difference between both gradients.
    pub tolerance: f64,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        GradCheckConfig {
            epsilon: 1e-6,
            tolerance: 1e-5,
        }
    }
}

/// `Σ output · output_grad`, evaluated in f64.
fn weighted_loss(output: &Tensor, output_grad: &Tensor) -> Result<f64, AutodagError> {
    if output.shape() != output_grad.shape() {
        return Err(AutodagError::ShapeMismatch {
            expected: output.shape(),
            actual: output_grad.shape(),
            operation: "check_grad".to_string(),
        });
    }
    Ok(output
        .to_vec_f64()
        .iter()
        .zip(output_grad.to_vec_f64())
        .map(|(o, g)| o * g)
        .sum())
}

/// Checks analytical gradients against numerical gradients using centered
/// finite differences of `L = Σ func(inputs) · output_grad`.
///
/// Only inputs with `requires_grad` set are checked. Analytical gradients are
/// obtained through [`grad`], so no tensor's `.grad` is modified.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    config: GradCheckConfig,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, AutodagError>,
{
    for (i, input) in inputs.iter().enumerate() {
        let dtype = input.dtype();
        if !dtype.is_floating_point() {
            return Err(GradCheckError::UnsupportedDType {
                input_index: i,
                dtype,
            });
        }
    }
    if !inputs.iter().any(Tensor::requires_grad) {
        log::warn!("check_grad called without any input requiring grad, nothing to check");
        return Ok(());
    }

    // --- Analytical pass ---
    let leaves = inputs
        .iter()
        .map(|t| t.detach().with_requires_grad(t.requires_grad()))
        .collect::<Result<Vec<_>, _>>()?;
    let output = {
        let _guard = grad_mode(true, Discipline::Reverse);
        func(&leaves)?
    };
    // Validates the shapes before any perturbation.
    weighted_loss(&output, output_grad)?;
    let analytical = grad(&leaves, &output, Some(output_grad))?;

    // --- Numerical pass ---
    let _guard = no_grad();
    for (i, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let analytical_data = analytical[i].to_vec_f64();
        let buffer = input.buffer();

        for (elem_idx, &analytical_grad) in analytical_data.iter().enumerate() {
            let loss_at = |delta: f64| -> Result<f64, AutodagError> {
                let mut perturbed = leaves.clone();
                perturbed[i] = Tensor::from_buffer(buffer.perturbed(elem_idx, delta)?);
                weighted_loss(&func(&perturbed)?, output_grad)
            };
            let loss_plus = loss_at(config.epsilon)?;
            let loss_minus = loss_at(-config.epsilon)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * config.epsilon);

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    value: analytical_grad,
                });
            }
            if !approx::relative_eq!(
                analytical_grad,
                numerical_grad,
                epsilon = config.tolerance,
                max_relative = config.tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical: analytical_grad,
                    numerical: numerical_grad,
                });
            }
        }
    }
    Ok(())
}
