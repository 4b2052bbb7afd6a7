use thiserror::Error;

use crate::design::Topology;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "{topology} design is infeasible: no real solution for n (discriminant {discriminant:.3e}); {hint}"
    )]
    DesignInfeasible {
        topology: Topology,
        discriminant: f64,
        hint: &'static str,
    },

    #[error("Gain of {gain_db:.2} dB is out of range: {reason}")]
    GainOutOfRange { gain_db: f64, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, DesignError>;
