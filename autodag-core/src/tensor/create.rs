// src/tensor/create.rs

use crate::buffer::Buffer;
use crate::error::AutodagError;
use crate::tensor::Tensor;
use crate::types::DType;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};

/// Creates a new tensor filled with zeros with the specified shape.
/// Creates an f32 tensor.
pub fn zeros(shape: &[usize]) -> Result<Tensor, AutodagError> {
    Ok(Tensor::from_buffer(Buffer::zeros(shape, DType::F32)))
}

/// Creates a new F64 tensor filled with zeros with the specified shape.
pub fn zeros_f64(shape: &[usize]) -> Result<Tensor, AutodagError> {
    Ok(Tensor::from_buffer(Buffer::zeros(shape, DType::F64)))
}

/// Creates a new tensor filled with ones with the specified shape.
/// Creates an f32 tensor.
pub fn ones(shape: &[usize]) -> Result<Tensor, AutodagError> {
    Ok(Tensor::from_buffer(Buffer::ones(shape, DType::F32)))
}

/// Creates a new F64 tensor filled with ones with the specified shape.
pub fn ones_f64(shape: &[usize]) -> Result<Tensor, AutodagError> {
    Ok(Tensor::from_buffer(Buffer::ones(shape, DType::F64)))
}

/// Creates a new f32 tensor filled with a specific value.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, AutodagError> {
    Ok(Tensor::from_buffer(Buffer::full(shape, f64::from(value), DType::F32)))
}

/// Creates a new F64 tensor filled with a specific value.
pub fn full_f64(shape: &[usize], value: f64) -> Result<Tensor, AutodagError> {
    Ok(Tensor::from_buffer(Buffer::full(shape, value, DType::F64)))
}

/// Zeros with the shape and dtype of `tensor`. The result is a fresh leaf.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, AutodagError> {
    Ok(Tensor::from_buffer(tensor.read_data().buffer.zeros_like()))
}

/// Ones with the shape and dtype of `tensor`. The result is a fresh leaf.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, AutodagError> {
    Ok(Tensor::from_buffer(tensor.read_data().buffer.ones_like()))
}

/// `n x n` F64 identity matrix.
pub fn eye_f64(n: usize) -> Result<Tensor, AutodagError> {
    let mut data = vec![0.0; n * n];
    for i in 0..n {
        data[i * n + i] = 1.0;
    }
    Tensor::new_f64(data, vec![n, n])
}

/// F64 tensor with values drawn uniformly from `[0, 1)` using the thread RNG.
pub fn rand_f64(shape: &[usize]) -> Result<Tensor, AutodagError> {
    rand_f64_with_rng(shape, &mut rand::thread_rng())
}

/// Same as [`rand_f64`] with a caller-provided RNG (for reproducible tests).
pub fn rand_f64_with_rng<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Result<Tensor, AutodagError> {
    let numel: usize = shape.iter().product();
    let uniform = Uniform::new(0.0, 1.0);
    let data: Vec<f64> = (0..numel).map(|_| uniform.sample(rng)).collect();
    Tensor::new_f64(data, shape.to_vec())
}

/// F64 tensor with values drawn from the standard normal distribution.
pub fn randn_f64(shape: &[usize]) -> Result<Tensor, AutodagError> {
    randn_f64_with_rng(shape, &mut rand::thread_rng())
}

pub fn randn_f64_with_rng<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Result<Tensor, AutodagError> {
    let numel: usize = shape.iter().product();
    let data: Vec<f64> = (0..numel).map(|_| StandardNormal.sample(rng)).collect();
    Tensor::new_f64(data, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
