//! Per-dimension data of the scaled and rotated functions.
//!
//! Entries are raw `BigFloat`s computed at the working precision of the
//! first request; they are not counted as live values.

use std::hash::Hash;
use std::sync::Arc;

use hp_arith::BigFloat;
use hp_ir::StandardFunction;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::errors::EvalResult;

#[derive(Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    function: StandardFunction,
    dims: usize,
    precision: usize,
}

pub(crate) type Row = Vec<BigFloat>;
pub(crate) type Matrix = Vec<Row>;

#[derive(Default)]
pub(crate) struct FunctionCache {
    vectors: Mutex<FxHashMap<CacheKey, Arc<Row>>>,
    matrices: Mutex<FxHashMap<CacheKey, Arc<Matrix>>>,
}

impl FunctionCache {
    /// Scales or a direction for `function` in `dims` dimensions.
    pub(crate) fn vector(
        &self,
        function: &StandardFunction,
        dims: usize,
        precision: usize,
        build: impl FnOnce() -> EvalResult<Row>,
    ) -> EvalResult<Arc<Row>> {
        lookup(&self.vectors, key(function, dims, precision), build)
    }

    /// The matrix of a quadratic form.
    pub(crate) fn matrix(
        &self,
        function: &StandardFunction,
        dims: usize,
        precision: usize,
        build: impl FnOnce() -> EvalResult<Matrix>,
    ) -> EvalResult<Arc<Matrix>> {
        lookup(&self.matrices, key(function, dims, precision), build)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.vectors.lock().len() + self.matrices.lock().len()
    }
}

fn key(function: &StandardFunction, dims: usize, precision: usize) -> CacheKey {
    CacheKey {
        function: function.clone(),
        dims,
        precision,
    }
}

// The lock is not held while building, so `build` may evaluate freely.
fn lookup<T>(
    map: &Mutex<FxHashMap<CacheKey, Arc<T>>>,
    key: CacheKey,
    build: impl FnOnce() -> EvalResult<T>,
) -> EvalResult<Arc<T>> {
    if let Some(hit) = map.lock().get(&key) {
        return Ok(Arc::clone(hit));
    }
    tracing::debug!(
        function = %key.function,
        dims = key.dims,
        precision = key.precision,
        "building cached function data"
    );
    let built = Arc::new(build()?);
    map.lock().insert(key, Arc::clone(&built));
    Ok(built)
}
