// src/ops/view/mod.rs

pub mod clone;
pub mod reshape;
pub mod squeeze;
pub mod unsqueeze;

pub use clone::clone_op;
pub use reshape::reshape_op;
pub use squeeze::squeeze_op;
pub use unsqueeze::unsqueeze_op;
