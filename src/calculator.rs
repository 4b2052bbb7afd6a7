use log::{info, warn};
use serde::Serialize;

use crate::config::{CalculationModeConfig, SweepConfig};
use crate::design::{FilterSpec, SolvedComponents, Topology};
use crate::error::Result;
use crate::response::{self, BodePoint, FrequencyRange, TransferFunction};

/// Everything one Calculate action produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub topology: Topology,
    pub modes: CalculationModeConfig,
    pub components: SolvedComponents,
    pub transfer_function: TransferFunction,
    pub symbolic: String,
    pub latex: String,
    pub bode: Vec<BodePoint>,
}

/// Run the full pipeline: solve, build `H(s)`, sweep the magnitude response.
pub fn calculate(
    topology: Topology,
    spec: &FilterSpec,
    modes: &CalculationModeConfig,
    sweep: &SweepConfig,
) -> Result<Calculation> {
    let components = topology.solve(spec, modes)?;
    let transfer_function = TransferFunction::from_components(&components);
    let range = FrequencyRange::around(&components, sweep)?;
    let bode = response::evaluate(&transfer_function, &range);

    Ok(Calculation {
        topology,
        modes: *modes,
        symbolic: transfer_function.symbolic(),
        latex: transfer_function.latex(),
        components,
        transfer_function,
        bode,
    })
}

/// Holds the most recent successful calculation
///
/// A failed calculation leaves the previous result in place.
#[derive(Debug, Default)]
pub struct Calculator {
    sweep: SweepConfig,
    current: Option<Calculation>,
}

impl Calculator {
    pub fn new(sweep: SweepConfig) -> Self {
        Self {
            sweep,
            current: None,
        }
    }

    pub fn calculate(
        &mut self,
        topology: Topology,
        spec: &FilterSpec,
        modes: &CalculationModeConfig,
    ) -> Result<&Calculation> {
        match calculate(topology, spec, modes, &self.sweep) {
            Ok(calculation) => {
                info!(
                    "{} design: n = {:.4}, Q = {:.4}, R = {:.2} Ω, C = {:.3e} F, {} Bode points",
                    topology,
                    calculation.components.n,
                    calculation.components.q,
                    calculation.components.r,
                    calculation.components.c,
                    calculation.bode.len()
                );
                Ok(self.current.insert(calculation))
            }
            Err(e) => {
                if self.current.is_some() {
                    warn!("{} calculation rejected, keeping previous result: {}", topology, e);
                } else {
                    warn!("{} calculation rejected: {}", topology, e);
                }
                Err(e)
            }
        }
    }

    pub fn current(&self) -> Option<&Calculation> {
        self.current.as_ref()
    }
}
