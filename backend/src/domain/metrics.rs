//! Diet compliance metrics derived from a user's meal history.

use crate::domain::Meal;

/// Summary of a user's meals.
///
/// ## Invariants
/// - `meals_count == meals_on_diet + meals_off_diet`.
/// - `best_sequence <= meals_on_diet`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealMetrics {
    pub meals_count: usize,
    pub meals_on_diet: usize,
    pub meals_off_diet: usize,
    /// Longest run of consecutive on-diet meals in time order.
    pub best_sequence: usize,
}

impl MealMetrics {
    /// Reduce on-diet flags, given in chronological order, to metrics.
    ///
    /// # Examples
    /// ```
    /// use daily_diet::domain::MealMetrics;
    ///
    /// let metrics = MealMetrics::from_diet_flags([true, false, true, true]);
    /// assert_eq!(metrics.meals_count, 4);
    /// assert_eq!(metrics.meals_on_diet, 3);
    /// assert_eq!(metrics.meals_off_diet, 1);
    /// assert_eq!(metrics.best_sequence, 2);
    /// ```
    pub fn from_diet_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut meals_count = 0;
        let mut meals_on_diet = 0;
        let mut current_sequence = 0;
        let mut best_sequence = 0;

        for on_diet in flags {
            meals_count += 1;
            if on_diet {
                meals_on_diet += 1;
                current_sequence += 1;
            } else {
                current_sequence = 0;
            }
            best_sequence = best_sequence.max(current_sequence);
        }

        Self {
            meals_count,
            meals_on_diet,
            meals_off_diet: meals_count - meals_on_diet,
            best_sequence,
        }
    }

    /// Compute metrics for meals already sorted by time ascending.
    pub fn from_meals(meals: &[Meal]) -> Self {
        Self::from_diet_flags(meals.iter().map(Meal::is_on_diet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Longest on-diet run computed by checking every window.
    fn brute_force_best_sequence(flags: &[bool]) -> usize {
        (0..=flags.len())
            .flat_map(|start| (start..=flags.len()).map(move |end| (start, end)))
            .filter(|&(start, end)| flags.get(start..end).is_some_and(|w| w.iter().all(|f| *f)))
            .map(|(start, end)| end - start)
            .max()
            .unwrap_or(0)
    }

    #[rstest]
    #[case(&[], 0)]
    #[case(&[true, false, true, true], 2)]
    #[case(&[true, true, true], 3)]
    #[case(&[false, false], 0)]
    #[case(&[true, true, false, true], 2)]
    #[case(&[false, true, true, true, false, true, true], 3)]
    #[case(&[false, true, true], 2)]
    fn best_sequence_matches_examples(#[case] flags: &[bool], #[case] expected: usize) {
        let metrics = MealMetrics::from_diet_flags(flags.iter().copied());
        assert_eq!(metrics.best_sequence, expected);
    }

    #[rstest]
    fn empty_history_yields_zeroes() {
        assert_eq!(MealMetrics::from_diet_flags([]), MealMetrics::default());
    }

    #[rstest]
    fn agrees_with_brute_force_for_every_short_history() {
        for length in 0..=10_u32 {
            for mask in 0..(1_u32 << length) {
                let flags: Vec<bool> = (0..length).map(|bit| mask & (1 << bit) != 0).collect();
                let metrics = MealMetrics::from_diet_flags(flags.iter().copied());

                assert_eq!(
                    metrics.best_sequence,
                    brute_force_best_sequence(&flags),
                    "flags: {flags:?}"
                );
                assert_eq!(
                    metrics.meals_count,
                    metrics.meals_on_diet + metrics.meals_off_diet
                );
                assert_eq!(metrics.meals_on_diet, flags.iter().filter(|f| **f).count());
            }
        }
    }
}
