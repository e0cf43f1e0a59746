use rand::{rngs::SmallRng, Rng};
use serde::{Deserialize, Serialize};

/// One qubit as an amplitude pair. The probability of observing 1 is
/// `beta * beta`; observation never collapses the state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Qubit {
    pub alpha: f64,
    pub beta: f64,
}

impl Qubit {
    /// Equal superposition, `alpha = beta = 1/sqrt(2)`.
    pub fn balanced() -> Qubit {
        Qubit {
            alpha: std::f64::consts::FRAC_1_SQRT_2,
            beta: std::f64::consts::FRAC_1_SQRT_2,
        }
    }

    pub fn measure(&self, rng: &mut SmallRng) -> u8 {
        // beta * beta can drift past 1.0 after many rotations; gen_bool
        // panics there, a plain comparison does not.
        (rng.gen::<f64>() < self.beta * self.beta) as u8
    }

    /// Applies the rotation matrix [[cos, -sin], [sin, cos]]. Both outputs
    /// are computed from the amplitudes as they were on entry.
    pub fn rotate(&mut self, theta: f64) {
        let (sin, cos) = theta.sin_cos();
        let Qubit { alpha, beta } = *self;
        self.alpha = cos * alpha - sin * beta;
        self.beta = sin * alpha + cos * beta;
    }
}

pub fn balanced_register(num_qubits: usize) -> Vec<Qubit> {
    vec![Qubit::balanced(); num_qubits]
}

pub fn measure_register(register: &[Qubit], rng: &mut SmallRng) -> Vec<u8> {
    register.iter().map(|qubit| qubit.measure(rng)).collect()
}
