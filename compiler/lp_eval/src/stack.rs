//! Stack headroom for nested scopes.
//!
//! Every bracket block, macro expansion, and function call evaluates in a
//! child scope through [`ensure_sufficient_stack`]. The interpreter's
//! `max_depth` is what ends runaway nesting; a self-referential macro has
//! to reach that limit and fail with a depth error, not overflow the
//! native stack of whatever thread the embedder runs on.

/// Headroom that must remain before entering another scope.
#[cfg(not(target_arch = "wasm32"))]
const SCOPE_HEADROOM: usize = 128 * 1024;

/// Size of each new stack segment, enough for several hundred scopes.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Evaluate one nested scope, moving to a fresh stack segment when
/// headroom runs low.
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(eval_scope: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(SCOPE_HEADROOM, SEGMENT_SIZE, eval_scope)
}

/// No segmented stacks on wasm; the depth limit alone applies.
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(eval_scope: impl FnOnce() -> R) -> R {
    eval_scope()
}
