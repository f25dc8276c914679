// src/ops/linalg/mod.rs

pub mod matmul;
pub mod transpose;

pub use matmul::matmul_op;
pub use transpose::{permute_op, transpose_op};
