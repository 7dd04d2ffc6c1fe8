// ─────────────────────────────────────────────────────────────────────
// Snell-Vern Drive Matrix — Integer Recurrence
// ─────────────────────────────────────────────────────────────────────
//! Exact linear accumulation of a(n) = a(n−1) + a(n−2) in arbitrary
//! precision. Slower than the closed form but correct for every index.

use num_bigint::BigUint;

use snellvern_types::SequenceKind;

/// Iterator over a(0), a(1), a(2), … of one sequence.
#[derive(Debug, Clone)]
pub struct SequenceIter {
    current: BigUint,
    next: BigUint,
}

impl SequenceIter {
    pub fn new(kind: SequenceKind) -> Self {
        let (a0, a1) = kind.seeds();
        Self {
            current: BigUint::from(a0),
            next: BigUint::from(a1),
        }
    }
}

impl Iterator for SequenceIter {
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        let following = &self.current + &self.next;
        let next = std::mem::replace(&mut self.next, following);
        Some(std::mem::replace(&mut self.current, next))
    }
}

/// a(n) by linear accumulation.
pub fn nth(kind: SequenceKind, n: u64) -> BigUint {
    let (a0, a1) = kind.seeds();
    let mut a = BigUint::from(a0);
    let mut b = BigUint::from(a1);
    for _ in 0..n {
        let sum = &a + &b;
        a = std::mem::replace(&mut b, sum);
    }
    a
}
