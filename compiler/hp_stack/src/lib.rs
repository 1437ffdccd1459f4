//! Stack growth for deeply nested expression trees.
//!
//! Commands such as `sqrt sqrt sqrt ... standard sphere` or long chains of
//! `combine` nest one node per keyword. Both the recursive-descent parser and
//! the evaluator recurse once per node, so a generated command with tens of
//! thousands of wrappers would overflow a default thread stack.
//!
//! Native targets grow the stack on demand through `stacker`; `wasm32` calls
//! straight through.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
///
/// Wrap the body of every function that recurses into a child node:
///
/// ```text
/// fn eval_function(&self, ctx: &mut EvaluationContext, f: &Function) -> Result<Value, EvalError> {
///     ensure_sufficient_stack(|| match f { ... })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// `wasm32` manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
