//! Selection operators
//!
//! This module provides tournament selection over a particle population.

use std::cmp::Ordering;

use rand::Rng;

use crate::error::{OperatorError, SwarmError, SwarmResult};
use crate::objective::traits::Objective;
use crate::operators::traits::SelectionOperator;
use crate::swarm::particle::Particle;

/// Order fitness values ascending with every NaN, whatever its sign, last
pub fn compare_fitness(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => a.is_nan().cmp(&b.is_nan()),
    }
}

/// Tournament selection operator
///
/// Draws `tournament_size` contestants uniformly with replacement and keeps
/// the one whose personal best has the lowest fitness. Ties go to the
/// contestant drawn first; a NaN fitness loses to any number.
#[derive(Clone, Debug)]
pub struct TournamentSelection {
    /// Tournament size (number of contestants drawn)
    pub tournament_size: usize,
}

impl TournamentSelection {
    /// Create a new tournament selection with the given size
    pub fn new(tournament_size: usize) -> SwarmResult<Self> {
        if tournament_size == 0 {
            return Err(SwarmError::Configuration(
                "tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self { tournament_size })
    }
}

impl SelectionOperator for TournamentSelection {
    fn select<O, R>(
        &self,
        population: &[Particle],
        objective: &O,
        rng: &mut R,
    ) -> Result<usize, OperatorError>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        if population.is_empty() {
            return Err(OperatorError::SelectionFailed(
                "population is empty".to_string(),
            ));
        }

        let mut winner = rng.gen_range(0..population.len());
        let mut winner_fitness = objective.evaluate(population[winner].personal_best());
        for _ in 1..self.tournament_size {
            let contestant = rng.gen_range(0..population.len());
            let fitness = objective.evaluate(population[contestant].personal_best());
            if compare_fitness(fitness, winner_fitness) == Ordering::Less {
                winner = contestant;
                winner_fitness = fitness;
            }
        }
        Ok(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VelocityCoefficients;
    use crate::objective::bounds::MultiBounds;
    use crate::objective::traits::FnObjective;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population(bests: &[f64]) -> Vec<Particle> {
        bests
            .iter()
            .map(|&b| {
                Particle::new(
                    vec![0.0],
                    vec![b],
                    vec![0.0],
                    VelocityCoefficients::default(),
                )
                .unwrap()
            })
            .collect()
    }

    fn identity() -> FnObjective<impl Fn(&[f64]) -> f64> {
        FnObjective::new(MultiBounds::symmetric(100.0, 1), |x: &[f64]| x[0])
    }

    #[test]
    fn test_tournament_selection_rejects_zero() {
        assert!(TournamentSelection::new(0).unwrap_err().is_configuration());
        assert_eq!(TournamentSelection::new(2).unwrap().tournament_size, 2);
    }

    #[test]
    fn test_tournament_selection_prefers_low_fitness() {
        let mut rng = StdRng::seed_from_u64(42);
        let population = population(&[5.0, 4.0, 3.0, 2.0, 1.0, 0.0]);
        let selection = TournamentSelection::new(6).unwrap();
        let objective = identity();

        let picks = selection
            .select_many(&population, &objective, 1000, &mut rng)
            .unwrap();
        let best_count = picks.iter().filter(|&&i| i == 5).count();
        let worst_count = picks.iter().filter(|&&i| i == 0).count();
        assert!(best_count > worst_count);
        // With replacement and k = 6 the worst wins only if drawn every time
        assert!(worst_count < 5);
    }

    #[test]
    fn test_tournament_of_one_is_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        let population = population(&[0.0, 1.0, 2.0]);
        let selection = TournamentSelection::new(1).unwrap();
        let picks = selection
            .select_many(&population, &identity(), 3000, &mut rng)
            .unwrap();
        for index in 0..3 {
            let count = picks.iter().filter(|&&i| i == index).count();
            assert!(count > 800, "index {} picked {} times", index, count);
        }
    }

    #[test]
    fn test_tournament_tie_keeps_first_drawn() {
        let mut rng = StdRng::seed_from_u64(3);
        let population = population(&[1.0, 1.0, 1.0, 1.0]);
        let selection = TournamentSelection::new(4).unwrap();
        let objective = identity();

        let mut replay = StdRng::seed_from_u64(3);
        let first_drawn = replay.gen_range(0..population.len());
        assert_eq!(
            selection.select(&population, &objective, &mut rng).unwrap(),
            first_drawn
        );
    }

    #[test]
    fn test_compare_fitness_puts_nan_last() {
        let negative_nan = f64::from_bits(0xfff8_0000_0000_0000);
        assert!(negative_nan.is_nan() && negative_nan.is_sign_negative());
        assert_eq!(compare_fitness(1.0, 2.0), Ordering::Less);
        assert_eq!(compare_fitness(negative_nan, -1e300), Ordering::Greater);
        assert_eq!(compare_fitness(f64::INFINITY, f64::NAN), Ordering::Less);
        assert_eq!(compare_fitness(f64::NAN, negative_nan), Ordering::Equal);
    }

    // Negative inputs score inf - inf
    fn nan_below_zero(x: &[f64]) -> f64 {
        if x[0] < 0.0 {
            f64::INFINITY - f64::INFINITY
        } else {
            x[0]
        }
    }

    #[test]
    fn test_tournament_never_picks_nan_over_a_number() {
        let objective = FnObjective::new(MultiBounds::symmetric(100.0, 1), nan_below_zero);
        let population = population(&[-1.0, 3.0, -2.0, 1.0]);
        let selection = TournamentSelection::new(3).unwrap();

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut replay = StdRng::seed_from_u64(seed);
            let drawn: Vec<usize> = (0..3)
                .map(|_| replay.gen_range(0..population.len()))
                .collect();
            let fitness = |i: usize| objective.evaluate(population[i].personal_best());
            let expected = drawn
                .iter()
                .copied()
                .filter(|&i| !fitness(i).is_nan())
                .min_by(|&a, &b| compare_fitness(fitness(a), fitness(b)))
                .unwrap_or(drawn[0]);

            let winner = selection.select(&population, &objective, &mut rng);
            assert_eq!(winner.unwrap(), expected, "seed {} drew {:?}", seed, drawn);
        }
    }

    #[test]
    fn test_tournament_empty_population() {
        let mut rng = StdRng::seed_from_u64(0);
        let selection = TournamentSelection::new(2).unwrap();
        let err = selection.select(&[], &identity(), &mut rng).unwrap_err();
        assert!(matches!(err, OperatorError::SelectionFailed(_)));
    }
}
