//! Standard Particle Swarm Optimisation 2011 (SPSO 2011)
//!
//! Asynchronous variant: every iteration moves a single particle (round
//! robin), so one iteration corresponds to one evaluation.
//!
//! Each particle is informed by a random neighbourhood. The adjacency matrix
//! is redrawn after every step that failed to improve the global best, and
//! kept otherwise.
//!
//! Moving particle `p` with personal best `l` and neighbourhood best `g`:
//! - attraction centre `c = (p + (p + c_l (l - p)) + (p + c_g (g - p))) / 3`,
//!   or `(p + (p + c_l (l - p))) / 2` when `p` is its own neighbourhood best
//! - random point `x` uniform in direction, radius up to `|c - p|`, around `c`
//! - velocity `v' = w v + x - p`, position `p' = p + v'`
//!
//! Components of `p'` leaving the bounds are clamped onto them and the
//! matching velocity components are reversed and halved.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::{OptimisationAlgorithm, RunContext};
use crate::error::Result;
use crate::parameterisation::{Parameterisation, positive_integer, real_where, unknown_parameter};
use crate::sampling::{check_bounded, random_unit_vector, uniform_in_bounds};

/// Clamps `particle` into `[lower, upper]`.
///
/// Velocity components of clamped positions are multiplied by `-0.5`.
pub fn clamp_to_bounds(
    particle: &Array1<f64>,
    velocity: &Array1<f64>,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
) -> (Array1<f64>, Array1<f64>) {
    let mut clamped_particle = particle.clone();
    let mut clamped_velocity = velocity.clone();

    for i in 0..particle.len() {
        if particle[i] < lower[i] {
            clamped_particle[i] = lower[i];
            clamped_velocity[i] *= -0.5;
        } else if particle[i] > upper[i] {
            clamped_particle[i] = upper[i];
            clamped_velocity[i] *= -0.5;
        }
    }

    (clamped_particle, clamped_velocity)
}

/// Centre of the sampling sphere for a particle at `particle`.
///
/// The personal best is weighted by `local_attraction` and the neighbourhood
/// best by `global_attraction`. Without a distinct neighbourhood best only the
/// first two terms are averaged.
pub fn attraction_center(
    particle: &Array1<f64>,
    local_best: &Array1<f64>,
    neighbourhood_best: Option<&Array1<f64>>,
    local_attraction: f64,
    global_attraction: f64,
) -> Array1<f64> {
    let local_attracted = particle + &((local_best - particle) * local_attraction);
    match neighbourhood_best {
        Some(neighbourhood_best) => {
            let neighbourhood_attracted = particle + &((neighbourhood_best - particle) * global_attraction);
            (particle + &local_attracted + &neighbourhood_attracted) / 3.0
        }
        None => (particle + &local_attracted) / 2.0,
    }
}

#[derive(Debug, Clone)]
pub struct StandardParticleSwarmOptimisation2011 {
    population_size: usize,
    neighbour_probability: Option<f64>,
    acceleration: f64,
    local_attraction: f64,
    global_attraction: f64,

    particles: Vec<Array1<f64>>,
    velocities: Vec<Array1<f64>>,
    local_best_parameters: Vec<Array1<f64>>,
    local_best_objective_values: Vec<f64>,
    global_best_objective_value: f64,

    active_particle: usize,
    topology: Array2<bool>,
    randomize_topology: bool,

    rng: StdRng,
}

impl StandardParticleSwarmOptimisation2011 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let ln2 = std::f64::consts::LN_2;
        Self {
            population_size: 10,
            neighbour_probability: None,
            acceleration: 1.0 / (2.0 * ln2),
            local_attraction: 0.5 + ln2,
            global_attraction: 0.5 + ln2,
            particles: Vec::new(),
            velocities: Vec::new(),
            local_best_parameters: Vec::new(),
            local_best_objective_values: Vec::new(),
            global_best_objective_value: f64::INFINITY,
            active_particle: 0,
            topology: Array2::from_elem((0, 0), false),
            randomize_topology: true,
            rng,
        }
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Probability that a particle informs another one, `(1 - 1/n)^3` unless set explicitly
    pub fn neighbour_probability(&self) -> f64 {
        self.neighbour_probability
            .unwrap_or_else(|| (1.0 - 1.0 / self.population_size as f64).powi(3))
    }

    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    pub fn local_attraction(&self) -> f64 {
        self.local_attraction
    }

    pub fn global_attraction(&self) -> f64 {
        self.global_attraction
    }

    pub fn active_particle(&self) -> usize {
        self.active_particle
    }

    fn randomize_topology(&mut self) {
        let n = self.population_size;
        let probability = self.neighbour_probability();
        let mut topology = Array2::from_elem((n, n), false);
        for i in 0..n {
            for j in 0..n {
                topology[[i, j]] = i == j || self.rng.random::<f64>() < probability;
            }
        }
        self.topology = topology;
    }

    /// Particle with the lowest personal best among the neighbours of `particle`
    fn neighbourhood_best(&self, particle: usize) -> usize {
        let mut best = particle;
        let mut best_objective_value = f64::MAX;
        for n in 0..self.population_size {
            if self.topology[[particle, n]] && self.local_best_objective_values[n] < best_objective_value {
                best = n;
                best_objective_value = self.local_best_objective_values[n];
            }
        }
        best
    }
}

impl Default for StandardParticleSwarmOptimisation2011 {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimisationAlgorithm for StandardParticleSwarmOptimisation2011 {
    fn name(&self) -> &str {
        "pso"
    }

    fn set_parameterisation(&mut self, parameterisation: &Parameterisation) -> Result<()> {
        let mut population_size = self.population_size;
        let mut neighbour_probability = self.neighbour_probability;
        let mut acceleration = self.acceleration;
        let mut local_attraction = self.local_attraction;
        let mut global_attraction = self.global_attraction;

        for (key, &value) in parameterisation {
            match key.to_lowercase().as_str() {
                "populationsize" => population_size = positive_integer(key, value)?,
                "neighbourprobability" => {
                    neighbour_probability =
                        Some(real_where(key, value, |v| (0.0..=1.0).contains(&v), "a probability")?)
                }
                "acceleration" => acceleration = real_where(key, value, |_| true, "a finite number")?,
                "localattraction" => {
                    local_attraction = real_where(key, value, |_| true, "a finite number")?
                }
                "globalattraction" => {
                    global_attraction = real_where(key, value, |_| true, "a finite number")?
                }
                _ => return Err(unknown_parameter(self.name(), key)),
            }
        }

        self.population_size = population_size;
        self.neighbour_probability = neighbour_probability;
        self.acceleration = acceleration;
        self.local_attraction = local_attraction;
        self.global_attraction = global_attraction;
        Ok(())
    }

    fn initialise(&mut self, run: &mut RunContext<'_>) -> Result<()> {
        let lower = run.problem().lower_bounds().clone();
        let upper = run.problem().upper_bounds().clone();
        check_bounded(&lower, &upper)?;

        self.particles.clear();
        self.velocities.clear();
        self.local_best_parameters.clear();
        self.local_best_objective_values.clear();
        self.global_best_objective_value = f64::INFINITY;

        for _ in 0..self.population_size {
            let particle = uniform_in_bounds(&lower, &upper, &mut self.rng);
            let velocity = uniform_in_bounds(&lower, &upper, &mut self.rng) - &particle;

            // particles left without budget keep an infinite personal best
            let objective_value = if run.is_finished() || run.is_terminated() {
                f64::INFINITY
            } else {
                run.evaluate(&particle)?.objective_value
            };
            if objective_value < self.global_best_objective_value {
                self.global_best_objective_value = objective_value;
            }

            self.local_best_parameters.push(particle.clone());
            self.local_best_objective_values.push(objective_value);
            self.particles.push(particle);
            self.velocities.push(velocity);
        }

        self.active_particle = 0;
        self.randomize_topology = true;
        Ok(())
    }

    fn next_parameters(&mut self, run: &RunContext<'_>) -> Result<Vec<Array1<f64>>> {
        if self.randomize_topology {
            self.randomize_topology();
        }

        let active = self.active_particle;
        let particle = &self.particles[active];
        let local_best = &self.local_best_parameters[active];
        let neighbourhood_best_particle = self.neighbourhood_best(active);
        let neighbourhood_best = (neighbourhood_best_particle != active)
            .then(|| &self.local_best_parameters[neighbourhood_best_particle]);

        let attraction_center = attraction_center(
            particle,
            local_best,
            neighbourhood_best,
            self.local_attraction,
            self.global_attraction,
        );

        let difference = &attraction_center - particle;
        let attraction_radius = difference.dot(&difference).sqrt();

        let direction = random_unit_vector(particle.len(), &mut self.rng);
        let radius = self.rng.random::<f64>() * attraction_radius;
        let random_parameter = direction * radius + &attraction_center;

        let velocity_candidate = &self.velocities[active] * self.acceleration + &random_parameter - particle;
        let particle_candidate = particle + &velocity_candidate;

        let problem = run.problem();
        let (particle_candidate, velocity_candidate) = clamp_to_bounds(
            &particle_candidate,
            &velocity_candidate,
            problem.lower_bounds(),
            problem.upper_bounds(),
        );

        self.velocities[active] = velocity_candidate;
        self.particles[active] = particle_candidate.clone();

        Ok(vec![particle_candidate])
    }

    fn update(&mut self, parameters: &[Array1<f64>], objective_values: &[f64], is_satisfying_constraints: &[bool]) {
        for ((parameter, &objective_value), &feasible) in
            parameters.iter().zip(objective_values).zip(is_satisfying_constraints)
        {
            if feasible {
                let active = self.active_particle;
                if objective_value < self.local_best_objective_values[active] {
                    self.local_best_parameters[active] = parameter.clone();
                    self.local_best_objective_values[active] = objective_value;
                }

                if objective_value < self.global_best_objective_value {
                    self.global_best_objective_value = objective_value;
                    self.randomize_topology = false;
                } else {
                    self.randomize_topology = true;
                }
            }

            self.active_particle = (self.active_particle + 1) % self.population_size;
        }
    }
}
