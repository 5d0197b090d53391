use epi_core::errors::EpiError;
use serde::{Deserialize, Serialize};

/// Parameters of the compartmental model, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContagionParams {
    /// Probability that one infectious node infects one susceptible neighbour
    /// during a round.
    pub contagion_probability: f64,
    /// Rounds spent infectious before recovering.
    pub infection_duration: u32,
    /// Rounds of immunity before becoming susceptible again; `None` makes
    /// recovery permanent.
    pub recovery_duration: Option<u32>,
}

impl ContagionParams {
    /// Builds and validates a parameter set.
    pub fn new(
        contagion_probability: f64,
        infection_duration: u32,
        recovery_duration: Option<u32>,
    ) -> Result<Self, EpiError> {
        let params = Self {
            contagion_probability,
            infection_duration,
            recovery_duration,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the ranges: probability in `[0, 1]`, durations at least one round.
    pub fn validate(&self) -> Result<(), EpiError> {
        if !(0.0..=1.0).contains(&self.contagion_probability) {
            return Err(EpiError::invalid_parameter(
                "contagion_probability",
                self.contagion_probability,
                "in [0, 1]",
            ));
        }
        if self.infection_duration < 1 {
            return Err(EpiError::invalid_parameter(
                "infection_duration",
                self.infection_duration,
                "a positive number of rounds",
            ));
        }
        if let Some(recovery) = self.recovery_duration {
            if recovery < 1 {
                return Err(EpiError::invalid_parameter(
                    "recovery_duration",
                    recovery,
                    "a positive number of rounds",
                ));
            }
        }
        Ok(())
    }
}
