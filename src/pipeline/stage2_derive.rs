use crate::comparator::RankError;
use crate::model::item::ItemSet;
use crate::model::thresholds::BoltzmannConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedScores {
    pub relative_weight: String,
    pub percent_contribution: String,
}

impl DerivedScores {
    pub fn for_energy(energy_score: &str) -> Self {
        Self {
            relative_weight: format!("{energy_score}_boltzmann_rel"),
            percent_contribution: format!("{energy_score}_percent_contribution"),
        }
    }
}

/// Boltzmann weight `exp(-E / RT)` of one energy.
pub fn boltzmann_weight(energy: f64, config: &BoltzmannConfig) -> f64 {
    (-energy / config.rt()).exp()
}

/// Adds relative Boltzmann weights and percent contributions derived from an energy
/// score. Weights are taken relative to the minimum energy, so the best item has
/// weight 1 and large negative energies cannot overflow.
pub fn derive_boltzmann(
    items: &ItemSet,
    energy_score: &str,
    config: &BoltzmannConfig,
) -> Result<(ItemSet, DerivedScores), RankError> {
    if items.is_empty() {
        return Err(RankError::EmptyInput {
            required: 1,
            actual: 0,
        });
    }

    let mut energies = Vec::with_capacity(items.len());
    for item in items.items() {
        let e = item
            .score(energy_score)
            .ok_or_else(|| RankError::InvalidScore {
                score: energy_score.to_string(),
                item: item.id,
            })?;
        energies.push(e);
    }

    let e_min = energies.iter().copied().fold(f64::INFINITY, f64::min);
    let weights: Vec<f64> = energies
        .iter()
        .map(|&e| boltzmann_weight(e - e_min, config))
        .collect();
    let total: f64 = weights.iter().sum();
    let percents: Vec<f64> = weights.iter().map(|w| w * 100.0 / total).collect();

    let names = DerivedScores::for_energy(energy_score);
    let derived = items
        .with_extra_scores(&names.relative_weight, &weights)
        .with_extra_scores(&names.percent_contribution, &percents);

    tracing::debug!(
        energy = energy_score,
        rt = config.rt(),
        e_min,
        "derived Boltzmann contributions"
    );

    Ok((derived, names))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_derive.rs"]
mod tests;
