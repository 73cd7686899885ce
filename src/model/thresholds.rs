use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerdictThresholds {
    pub strong_rho: f64,
    pub strong_top_share: f64,
    pub very_strong_rho: f64,
    pub moderate_rho: f64,
    pub moderate_top_share: f64,
    pub top_share_percent: usize,
}

impl VerdictThresholds {
    pub fn default_v1() -> Self {
        Self {
            strong_rho: 0.7,
            strong_top_share: 50.0,
            very_strong_rho: 0.8,
            moderate_rho: 0.3,
            moderate_top_share: 30.0,
            top_share_percent: 10,
        }
    }

    /// `top_share` is the percent of total contribution captured by the first
    /// `top_share_percent` percent of items.
    pub fn classify(&self, rho: f64, top_share: f64) -> Verdict {
        if rho > self.strong_rho || top_share > self.strong_top_share {
            Verdict::Strong
        } else if rho > self.moderate_rho || top_share > self.moderate_top_share {
            Verdict::Moderate
        } else {
            Verdict::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoltzmannConfig {
    /// kcal/(mol·K)
    pub gas_constant: f64,
    /// Kelvin
    pub temperature: f64,
}

impl BoltzmannConfig {
    pub fn room_temperature_v1() -> Self {
        Self {
            gas_constant: 1.9872036e-3,
            temperature: 298.15,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn rt(&self) -> f64 {
        self.gas_constant * self.temperature
    }
}

impl Default for BoltzmannConfig {
    fn default() -> Self {
        Self::room_temperature_v1()
    }
}
