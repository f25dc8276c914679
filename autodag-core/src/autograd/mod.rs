//! Graph construction, mode state and the differentiation API.

pub mod backward;
pub mod context;
pub mod function;
pub mod functional;
pub mod grad_check;
pub mod graph;
pub mod mode;

pub use backward::{backward, grad};
pub use context::{Context, Param};
pub use function::{apply, Function};
pub use functional::{jacobian_forward, jacobian_reverse, jvp, vjp};
pub use grad_check::{check_grad, GradCheckConfig, GradCheckError};
pub use graph::Node;
pub use mode::{
    current_mode, forward_mode, grad_mode, is_grad_enabled, no_grad, with_grad_mode, Discipline,
    GradMode, GradModeGuard,
};
