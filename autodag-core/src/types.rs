/// Defines the possible data types for Tensor elements.
///
/// Only the floating-point types take part in differentiation. Integer and
/// boolean tensors exist so that non-differentiable data can be carried and
/// rejected with a proper error instead of silently coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit floating-point type.
    F32,
    /// 64-bit floating-point type.
    F64,
    /// 64-bit integer type.
    I64,
    /// Boolean type (true/false values).
    Bool,
}

impl DType {
    /// Whether tensors of this dtype can require gradients.
    pub fn is_floating_point(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }
}
