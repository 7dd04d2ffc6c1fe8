// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Sequence Cache
// ─────────────────────────────────────────────────────────────────────
//! Thread-safe memo of exact sequence values, one map per sequence.
//! Share it across matrices with `Arc<SequenceCache>`.

use std::collections::BTreeMap;

use num_bigint::BigUint;
use parking_lot::Mutex;

use snellvern_math::SequenceCore;
use snellvern_types::{MatrixResult, SequenceKind};

#[derive(Debug, Default)]
pub struct SequenceCache {
    fibonacci: Mutex<BTreeMap<u64, BigUint>>,
    lucas: Mutex<BTreeMap<u64, BigUint>>,
}

impl SequenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, kind: SequenceKind) -> &Mutex<BTreeMap<u64, BigUint>> {
        match kind {
            SequenceKind::Fibonacci => &self.fibonacci,
            SequenceKind::Lucas => &self.lucas,
        }
    }

    pub fn get(&self, kind: SequenceKind, n: u64) -> Option<BigUint> {
        self.map(kind).lock().get(&n).cloned()
    }

    /// Ordered a(0..=max_n), filling any gaps through `core`.
    pub fn prefix(
        &self,
        core: &SequenceCore,
        kind: SequenceKind,
        max_n: i64,
    ) -> MatrixResult<BTreeMap<u64, BigUint>> {
        let max_index = core.check_index(max_n)?;
        {
            let map = self.map(kind).lock();
            if map.range(..=max_index).count() as u64 == max_index + 1 {
                return Ok(map
                    .range(..=max_index)
                    .map(|(k, v)| (*k, v.clone()))
                    .collect());
            }
        }
        let values = core.sequence(kind, max_n)?;
        let out: BTreeMap<u64, BigUint> = (0u64..).zip(values).collect();
        self.map(kind)
            .lock()
            .extend(out.iter().map(|(k, v)| (*k, v.clone())));
        Ok(out)
    }

    pub fn len(&self, kind: SequenceKind) -> usize {
        self.map(kind).lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fibonacci.lock().is_empty() && self.lucas.lock().is_empty()
    }

    pub fn clear(&self) {
        self.fibonacci.lock().clear();
        self.lucas.lock().clear();
    }
}
