// src/autograd/mode.rs

use std::cell::RefCell;

/// Which differentiation discipline tracked operations follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Discipline {
    /// Record a graph for a later backward pass.
    #[default]
    Reverse,
    /// Propagate tangents eagerly next to the primal values. No graph is kept.
    Forward,
}

/// Runtime differentiation mode of the current thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradMode {
    pub enabled: bool,
    pub discipline: Discipline,
}

impl Default for GradMode {
    fn default() -> Self {
        GradMode {
            enabled: true,
            discipline: Discipline::Reverse,
        }
    }
}

thread_local! {
    static MODE_STACK: RefCell<Vec<GradMode>> = const { RefCell::new(Vec::new()) };
}

/// Restores the previous mode when dropped.
///
/// Guards nest: dropping a guard truncates the stack back to the depth it had
/// when the guard was created, which also discards any inner guard that was
/// leaked with `mem::forget`.
#[must_use = "the mode is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct GradModeGuard {
    depth: usize,
}

impl Drop for GradModeGuard {
    fn drop(&mut self) {
        MODE_STACK.with(|stack| stack.borrow_mut().truncate(self.depth));
    }
}

/// Returns the mode in effect on this thread.
pub fn current_mode() -> GradMode {
    MODE_STACK.with(|stack| stack.borrow().last().copied().unwrap_or_default())
}

/// `true` if tracked operations record gradients (in either discipline).
pub fn is_grad_enabled() -> bool {
    current_mode().enabled
}

/// Enters `GradMode { enabled, discipline }` until the returned guard is dropped.
pub fn grad_mode(enabled: bool, discipline: Discipline) -> GradModeGuard {
    let mode = GradMode {
        enabled,
        discipline,
    };
    MODE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let depth = stack.len();
        stack.push(mode);
        log::trace!("Entered {:?} at depth {}", mode, depth);
        GradModeGuard { depth }
    })
}

/// Disables gradient tracking. The discipline of the enclosing mode is kept.
pub fn no_grad() -> GradModeGuard {
    grad_mode(false, current_mode().discipline)
}

/// Enables tracking with eager forward-mode tangents.
pub fn forward_mode() -> GradModeGuard {
    grad_mode(true, Discipline::Forward)
}

/// Runs `f` under `mode` and restores the previous mode afterwards, including
/// when `f` returns early or panics.
pub fn with_grad_mode<R>(mode: GradMode, f: impl FnOnce() -> R) -> R {
    let _guard = grad_mode(mode.enabled, mode.discipline);
    f()
}

#[cfg(test)]
#[path = "mode_test.rs"]
mod tests;
