//! Draw engine.
//!
//! Selects students from a pool one slot at a time. Weighted mode uses
//! roulette-wheel selection over the remaining candidates; without
//! replacement a selected candidate leaves the working pool before the
//! next slot.
//!
//! # Degenerate weights
//!
//! When every remaining weight is zero the slot is filled uniformly, so
//! an all-zero pool still yields one student per slot and never stalls.

use rand::Rng;

use rollcall_model::{DEFAULT_WEIGHT, DrawSettings, Student};

/// Sampling policy for one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawOptions {
    /// A selected student stays eligible for later slots of the same call.
    pub with_replacement: bool,
    /// Select proportionally to student weight.
    pub use_weights: bool,
}

impl From<&DrawSettings> for DrawOptions {
    fn from(settings: &DrawSettings) -> Self {
        Self {
            with_replacement: settings.draw_mode.with_replacement(),
            use_weights: settings.use_weights,
        }
    }
}

/// Draw up to `count` students using the thread-local RNG.
pub fn draw<'a>(pool: &[&'a Student], count: usize, options: DrawOptions) -> Vec<&'a Student> {
    draw_with_rng(pool, count, options, &mut rand::thread_rng())
}

/// Draw up to `count` students using the given RNG.
///
/// Returns an empty vector for an empty pool. With replacement every slot
/// is filled, so exactly `count` students come back; without replacement at
/// most `min(count, pool.len())`.
pub fn draw_with_rng<'a, R>(
    pool: &[&'a Student],
    count: usize,
    options: DrawOptions,
    rng: &mut R,
) -> Vec<&'a Student>
where
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return Vec::new();
    }
    let slots = if options.with_replacement {
        count
    } else {
        count.min(pool.len())
    };
    let weighted = options.use_weights && has_custom_weights(pool);
    let mut candidates: Vec<&'a Student> = pool.to_vec();
    let mut drawn = Vec::with_capacity(slots.min(pool.len()));

    for _ in 0..slots {
        if candidates.is_empty() {
            break;
        }
        let index = if weighted {
            weighted_index(&candidates, rng)
        } else {
            rng.gen_range(0..candidates.len())
        };
        if options.with_replacement {
            drawn.push(candidates[index]);
        } else {
            drawn.push(candidates.remove(index));
        }
    }

    tracing::debug!(
        pool = pool.len(),
        requested = count,
        drawn = drawn.len(),
        weighted,
        with_replacement = options.with_replacement,
        "draw complete"
    );
    drawn
}

fn has_custom_weights(pool: &[&Student]) -> bool {
    pool.iter().any(|student| student.weight != DEFAULT_WEIGHT)
}

/// Pick one index with probability proportional to weight.
///
/// Falls back to a uniform pick when the total weight is not positive.
/// `candidates` must not be empty.
fn weighted_index<R>(candidates: &[&Student], rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    let total: f64 = candidates.iter().map(|student| usable_weight(student)).sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.gen_range(0..candidates.len());
    }

    // r lies in (0, total], so zero-weight candidates are never picked.
    let mut remaining = total - rng.gen_range(0.0..total);
    let mut last_positive = candidates.len() - 1;
    for (index, student) in candidates.iter().enumerate() {
        let weight = usable_weight(student);
        if weight <= 0.0 {
            continue;
        }
        last_positive = index;
        remaining -= weight;
        if remaining <= 0.0 {
            return index;
        }
    }
    // Rounding can leave a sliver above zero.
    last_positive
}

fn usable_weight(student: &Student) -> f64 {
    if student.weight.is_finite() {
        student.weight.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn students(weights: &[f64]) -> Vec<Student> {
        weights
            .iter()
            .enumerate()
            .map(|(idx, weight)| Student::new(idx.to_string(), format!("S{idx}")).with_weight(*weight))
            .collect()
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let drawn = draw_with_rng(&[], 3, DrawOptions::default(), &mut rng);
        assert!(drawn.is_empty());
    }

    #[test]
    fn weighted_index_never_picks_zero_weight_when_others_positive() {
        let pool = students(&[0.0, 1.0, 0.0]);
        let refs: Vec<&Student> = pool.iter().collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert_eq!(weighted_index(&refs, &mut rng), 1);
        }
    }

    #[test]
    fn weighted_index_falls_back_to_uniform_for_zero_total() {
        let pool = students(&[0.0, 0.0]);
        let refs: Vec<&Student> = pool.iter().collect();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 2];
        for _ in 0..200 {
            seen[weighted_index(&refs, &mut rng)] = true;
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn options_follow_settings() {
        let settings = DrawSettings {
            draw_mode: rollcall_model::DrawMode::Repeat,
            use_weights: false,
            ..DrawSettings::default()
        };
        let options = DrawOptions::from(&settings);
        assert!(options.with_replacement);
        assert!(!options.use_weights);
    }

    #[test]
    fn replacement_fills_every_slot_past_pool_size() {
        let pool = students(&[1.0, 2.0]);
        let refs: Vec<&Student> = pool.iter().collect();
        let options = DrawOptions {
            with_replacement: true,
            use_weights: true,
        };
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(draw_with_rng(&refs, 7, options, &mut rng).len(), 7);
    }
}
