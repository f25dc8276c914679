//! Element-wise transcendental functions.

pub mod cos;
pub mod exp;
pub mod ln;
pub mod sin;
pub mod tanh;

pub use cos::cos_op;
pub use exp::exp_op;
pub use ln::ln_op;
pub use sin::sin_op;
pub use tanh::tanh_op;

#[cfg(test)]
#[path = "math_elem_test.rs"]
mod tests;
