use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::OptimisationAlgorithm;
use crate::error::OptimisationError;
use crate::hill_climbing::HillClimbing;
use crate::hooke_jeeves::HookeAlgorithm;
use crate::particle_swarm::StandardParticleSwarmOptimisation2011;
use crate::random_search::RandomSearch;

/// Available search strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    RandomSearch,
    HillClimbing,
    Hooke,
    Pso,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::RandomSearch,
        AlgorithmKind::HillClimbing,
        AlgorithmKind::Hooke,
        AlgorithmKind::Pso,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmKind::RandomSearch => "random-search",
            AlgorithmKind::HillClimbing => "hill-climbing",
            AlgorithmKind::Hooke => "hooke",
            AlgorithmKind::Pso => "pso",
        }
    }

    /// New strategy with default hyperparameters; seeded from the OS when `seed` is `None`.
    pub fn build(&self, seed: Option<u64>) -> Box<dyn OptimisationAlgorithm> {
        match (self, seed) {
            (AlgorithmKind::RandomSearch, Some(seed)) => Box::new(RandomSearch::with_seed(seed)),
            (AlgorithmKind::RandomSearch, None) => Box::new(RandomSearch::new()),
            (AlgorithmKind::HillClimbing, Some(seed)) => Box::new(HillClimbing::with_seed(seed)),
            (AlgorithmKind::HillClimbing, None) => Box::new(HillClimbing::new()),
            (AlgorithmKind::Hooke, Some(seed)) => Box::new(HookeAlgorithm::with_seed(seed)),
            (AlgorithmKind::Hooke, None) => Box::new(HookeAlgorithm::new()),
            (AlgorithmKind::Pso, Some(seed)) => {
                Box::new(StandardParticleSwarmOptimisation2011::with_seed(seed))
            }
            (AlgorithmKind::Pso, None) => Box::new(StandardParticleSwarmOptimisation2011::new()),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = OptimisationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.to_lowercase();
        match t.as_str() {
            "random-search" | "random_search" | "randomsearch" | "random" => {
                Ok(AlgorithmKind::RandomSearch)
            }
            "hill-climbing" | "hill_climbing" | "hillclimbing" => Ok(AlgorithmKind::HillClimbing),
            "hooke" | "hooke-jeeves" | "hooke_jeeves" | "hookejeeves" | "pattern-search" => {
                Ok(AlgorithmKind::Hooke)
            }
            "pso" | "spso2011" | "standard-particle-swarm-optimisation-2011" => Ok(AlgorithmKind::Pso),
            _ => Err(OptimisationError::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_build() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.name().parse::<AlgorithmKind>().unwrap(), kind);
            let algorithm = kind.build(Some(1));
            assert_eq!(algorithm.name(), kind.name());
        }
        assert_eq!("Hooke-Jeeves".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Hooke);
        assert!(matches!(
            "cmaes".parse::<AlgorithmKind>(),
            Err(OptimisationError::UnknownAlgorithm(_))
        ));
    }
}
