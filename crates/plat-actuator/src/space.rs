//! Action spaces advertised to callers for validation and sampling.

use rand::Rng;

use crate::ActionValue;

/// A (possibly composite) space of valid action vectors.
///
/// Leaf spaces describe one action element; `Tuple` concatenates sub-spaces
/// in actuator-config order.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionSpace {
    /// Continuous scalar in `[low, high]`.
    Box { low: f64, high: f64 },
    /// Index in `0..n`.
    Discrete(usize),
    Tuple(Vec<ActionSpace>),
}

impl ActionSpace {
    /// Number of action elements the space spans.
    pub fn len(&self) -> usize {
        match self {
            ActionSpace::Box { .. } | ActionSpace::Discrete(_) => 1,
            ActionSpace::Tuple(subs) => subs.iter().map(ActionSpace::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if a single element belongs to this leaf space.  Always `false`
    /// for `Tuple`.
    pub fn contains_value(&self, value: ActionValue) -> bool {
        match (self, value) {
            (ActionSpace::Box { low, high }, ActionValue::Continuous(v)) => *low <= v && v <= *high,
            (ActionSpace::Discrete(n), ActionValue::Index(i)) => i < *n,
            _ => false,
        }
    }

    /// `true` if `elements` has exactly one entry per leaf and every present
    /// entry lies in its sub-space.  `None` entries ("no control for this
    /// channel") are always accepted.
    pub fn contains(&self, elements: &[Option<ActionValue>]) -> bool {
        if elements.len() != self.len() {
            return false;
        }
        let mut leaves = Vec::with_capacity(elements.len());
        self.collect_leaves(&mut leaves);
        leaves
            .iter()
            .zip(elements)
            .all(|(space, element)| element.is_none_or(|v| space.contains_value(v)))
    }

    /// Draw one uniformly distributed action vector.
    ///
    /// Unbounded `Box` leaves sample from `[-1, 1]`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<ActionValue> {
        let mut out = Vec::with_capacity(self.len());
        self.sample_into(rng, &mut out);
        out
    }

    fn sample_into<R: Rng>(&self, rng: &mut R, out: &mut Vec<ActionValue>) {
        match self {
            ActionSpace::Box { low, high } => {
                let (low, high) = if low.is_finite() && high.is_finite() { (*low, *high) } else { (-1.0, 1.0) };
                let v = if low < high { rng.gen_range(low..=high) } else { low };
                out.push(ActionValue::Continuous(v));
            }
            ActionSpace::Discrete(n) => out.push(ActionValue::Index(rng.gen_range(0..(*n).max(1)))),
            ActionSpace::Tuple(subs) => subs.iter().for_each(|s| s.sample_into(rng, out)),
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ActionSpace>) {
        match self {
            ActionSpace::Tuple(subs) => subs.iter().for_each(|s| s.collect_leaves(out)),
            leaf => out.push(leaf),
        }
    }
}
