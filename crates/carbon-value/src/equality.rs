//! Structural equality over value graphs
//!
//! `deep_equal` walks two graphs in lock step. Every container on the left is
//! paired with the container it met on the right the first time it was
//! visited; meeting it again must meet the same partner. This makes the
//! comparison terminate on cycles and also makes it sensitive to aliasing:
//! `{p: s, q: s}` is not deep-equal to `{p: s1, q: s2}`.
//!
//! Set members and Map entries are compared positionally, so iteration order
//! is part of equality.

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Check whether two values have identical structure, content and aliasing
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    DeepEqual::default().run(a.clone(), b.clone())
}

/// Pairs still to compare. Walked with an explicit stack, so nesting depth
/// is bounded by the heap rather than the native stack.
#[derive(Default)]
struct DeepEqual {
    left_to_right: FxHashMap<usize, usize>,
    right_to_left: FxHashMap<usize, usize>,
    stack: Vec<(Value, Value)>,
}

impl DeepEqual {
    fn run(&mut self, a: Value, b: Value) -> bool {
        self.stack.push((a, b));
        while let Some((a, b)) = self.stack.pop() {
            if !self.values(&a, &b) {
                return false;
            }
        }
        true
    }

    /// Compare `a` and `b` shallowly, queueing any child pairs
    fn values(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(x), Value::Boolean(y)) => x == y,
            (Value::Number(x), Value::Number(y)) => (x.is_nan() && y.is_nan()) || x == y,
            (Value::String(x), Value::String(y)) => x == y,
            (Value::BigInt(x), Value::BigInt(y)) => x == y,
            (Value::Symbol(_), Value::Symbol(_))
            | (Value::Function(_), Value::Function(_))
            | (Value::Host(_), Value::Host(_)) => a.ptr_eq(b),
            _ => match (a.container_kind(), b.container_kind()) {
                (Some(ka), Some(kb)) if ka == kb => self.containers(a, b),
                _ => false,
            },
        }
    }

    fn containers(&mut self, a: &Value, b: &Value) -> bool {
        let (Some(left), Some(right)) = (a.heap_id(), b.heap_id()) else {
            return false;
        };

        if let Some(&partner) = self.left_to_right.get(&left) {
            return partner == right;
        }
        if self.right_to_left.contains_key(&right) {
            return false;
        }
        self.left_to_right.insert(left, right);
        self.right_to_left.insert(right, left);

        match (a, b) {
            (Value::Object(x), Value::Object(y)) => {
                let (xs, ys) = (x.entries(), y.entries());
                if xs.len() != ys.len() {
                    return false;
                }
                for ((kx, vx), (ky, vy)) in xs.into_iter().zip(ys) {
                    if kx != ky {
                        return false;
                    }
                    self.stack.push((vx, vy));
                }
                true
            }
            (Value::Array(x), Value::Array(y)) => self.sequences(x.values(), y.values()),
            (Value::Set(x), Value::Set(y)) => self.sequences(x.values(), y.values()),
            (Value::Map(x), Value::Map(y)) => {
                let (xs, ys) = (x.entries(), y.entries());
                if xs.len() != ys.len() {
                    return false;
                }
                for ((kx, vx), (ky, vy)) in xs.into_iter().zip(ys) {
                    self.stack.push((kx, ky));
                    self.stack.push((vx, vy));
                }
                true
            }
            (Value::Date(x), Value::Date(y)) => {
                let (tx, ty) = (x.time(), y.time());
                (tx.is_nan() && ty.is_nan()) || tx == ty
            }
            _ => false,
        }
    }

    fn sequences(&mut self, xs: Vec<Value>, ys: Vec<Value>) -> bool {
        if xs.len() != ys.len() {
            return false;
        }
        self.stack.extend(xs.into_iter().zip(ys));
        true
    }
}
