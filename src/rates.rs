//! The rate table driving every cost formula.
//!
//! A [`RateConfig`] is an immutable snapshot of the shop's prices: one
//! is read at the start of a calculation and never mutated by the
//! engine.  The admin-edited JSON on disk may omit any key, so every
//! field carries a serde default holding the shop's long-standing
//! fallback value; deserialising `{}` yields exactly the documented
//! default table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GST applied multiplicatively to every quote total.  Currently fixed
/// by policy rather than configurable per shop.
pub const GST_RATE: f64 = 0.18;

/// Snapshot of every rate the formulas consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    /// Paper price per unit weight, fed into the dimension-factor
    /// paper formula.
    #[serde(default = "default_paper_rate")]
    pub paper_rate: f64,
    /// Fixed cost of one four-colour plate.
    #[serde(default = "default_plate_cost_4c", rename = "plateCost4C")]
    pub plate_cost_4c: f64,
    /// Fixed cost of one single-colour plate.
    #[serde(default = "default_plate_cost_1c", rename = "plateCost1C")]
    pub plate_cost_1c: f64,
    /// Four-colour running cost per 1000 sheets past the first block.
    #[serde(
        default = "default_printing_cost_per_1000_4c",
        rename = "printingCostPer1000_4C"
    )]
    pub printing_cost_per_1000_4c: f64,
    /// Single-colour running cost per 1000 sheets past the first block.
    #[serde(
        default = "default_printing_cost_per_1000_1c",
        rename = "printingCostPer1000_1C"
    )]
    pub printing_cost_per_1000_1c: f64,
    /// Per-sheet lamination rates for standard sizes, keyed by film
    /// display name ("Gloss BOPP", "Velvet", ...).
    #[serde(default = "default_lamination_rates")]
    pub lamination_rates: HashMap<String, f64>,
    /// Per-sheet lamination rates for the B-series "new sizes".
    #[serde(default = "default_new_size_lamination_rates")]
    pub new_size_lamination_rates: HashMap<String, f64>,
    /// Minimum charge per lamination family ("BOPP", "Thermal",
    /// "Velvet").
    #[serde(default = "default_minimum_lamination_costs")]
    pub minimum_lamination_costs: HashMap<String, f64>,
    #[serde(default = "default_spot_uv_rate", rename = "spotUVRate")]
    pub spot_uv_rate: f64,
    #[serde(default = "default_spot_uv_minimum", rename = "spotUVMinimum")]
    pub spot_uv_minimum: f64,
    #[serde(default = "default_drip_off_rate")]
    pub drip_off_rate: f64,
    /// Floor charge per drip-off plate, not per job.
    #[serde(default = "default_drip_off_minimum")]
    pub drip_off_minimum: f64,
    #[serde(default = "default_coating_rate")]
    pub coating_rate: f64,
    #[serde(default = "default_coating_minimum")]
    pub coating_minimum: f64,
    #[serde(default)]
    pub binding_rates: BindingRates,
}

impl Default for RateConfig {
    fn default() -> Self {
        RateConfig {
            paper_rate: default_paper_rate(),
            plate_cost_4c: default_plate_cost_4c(),
            plate_cost_1c: default_plate_cost_1c(),
            printing_cost_per_1000_4c: default_printing_cost_per_1000_4c(),
            printing_cost_per_1000_1c: default_printing_cost_per_1000_1c(),
            lamination_rates: default_lamination_rates(),
            new_size_lamination_rates: default_new_size_lamination_rates(),
            minimum_lamination_costs: default_minimum_lamination_costs(),
            spot_uv_rate: default_spot_uv_rate(),
            spot_uv_minimum: default_spot_uv_minimum(),
            drip_off_rate: default_drip_off_rate(),
            drip_off_minimum: default_drip_off_minimum(),
            coating_rate: default_coating_rate(),
            coating_minimum: default_coating_minimum(),
            binding_rates: BindingRates::default(),
        }
    }
}

impl RateConfig {
    /// Per-sheet rate for a lamination film, honouring the B-series
    /// table split.  `None` when the key is absent from the selected
    /// table; the caller zeroes the line item in that case.
    pub fn lamination_rate(&self, key: &str, new_size: bool) -> Option<f64> {
        let table = if new_size {
            &self.new_size_lamination_rates
        } else {
            &self.lamination_rates
        };
        table.get(key).copied()
    }

    /// Minimum charge for a lamination family, if one is configured.
    pub fn lamination_minimum(&self, family: &str) -> Option<f64> {
        self.minimum_lamination_costs.get(family).copied()
    }

    /// Rejects a config containing any negative rate.  Called by the
    /// store before persisting an admin update.
    pub fn validate(&self) -> anyhow::Result<()> {
        let scalars = [
            ("paperRate", self.paper_rate),
            ("plateCost4C", self.plate_cost_4c),
            ("plateCost1C", self.plate_cost_1c),
            ("printingCostPer1000_4C", self.printing_cost_per_1000_4c),
            ("printingCostPer1000_1C", self.printing_cost_per_1000_1c),
            ("spotUVRate", self.spot_uv_rate),
            ("spotUVMinimum", self.spot_uv_minimum),
            ("dripOffRate", self.drip_off_rate),
            ("dripOffMinimum", self.drip_off_minimum),
            ("coatingRate", self.coating_rate),
            ("coatingMinimum", self.coating_minimum),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("rate {name} must be a non-negative number, got {value}");
            }
        }
        for (table, map) in [
            ("laminationRates", &self.lamination_rates),
            ("newSizeLaminationRates", &self.new_size_lamination_rates),
            ("minimumLaminationCosts", &self.minimum_lamination_costs),
        ] {
            for (key, value) in map {
                if !value.is_finite() || *value < 0.0 {
                    anyhow::bail!("rate {table}.{key} must be a non-negative number, got {value}");
                }
            }
        }
        self.binding_rates.validate()
    }
}

/// Per-binding-type unit rates.  Page thresholds (20 for staple, 50
/// for perfect, 100 for hardcover) are workshop constants and live in
/// [`crate::formulas`], not in the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingRates {
    #[serde(default = "default_staple_rate")]
    pub staple: StapleRate,
    #[serde(default = "default_spiral_rate")]
    pub spiral: FlatRate,
    #[serde(default = "default_wiro_rate")]
    pub wiro: FlatRate,
    #[serde(default = "default_perfect_rate")]
    pub perfect: PerfectRate,
    #[serde(default = "default_hardcover_rate")]
    pub hardcover: HardcoverRate,
}

impl Default for BindingRates {
    fn default() -> Self {
        BindingRates {
            staple: default_staple_rate(),
            spiral: default_spiral_rate(),
            wiro: default_wiro_rate(),
            perfect: default_perfect_rate(),
            hardcover: default_hardcover_rate(),
        }
    }
}

impl BindingRates {
    fn validate(&self) -> anyhow::Result<()> {
        let values = [
            ("staple.base", self.staple.base),
            ("staple.perPageOver20", self.staple.per_page_over_20),
            ("spiral.base", self.spiral.base),
            ("wiro.base", self.wiro.base),
            ("perfect.base", self.perfect.base),
            ("perfect.perBlockOver50", self.perfect.per_block_over_50),
            ("hardcover.a4", self.hardcover.a4),
            ("hardcover.a5", self.hardcover.a5),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!(
                    "rate bindingRates.{name} must be a non-negative number, got {value}"
                );
            }
        }
        if self.perfect.block_size == 0 {
            anyhow::bail!("rate bindingRates.perfect.blockSize must be positive");
        }
        Ok(())
    }
}

/// Base charge up to 20 pages, then a per-page surcharge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StapleRate {
    pub base: f64,
    #[serde(rename = "perPageOver20")]
    pub per_page_over_20: f64,
}

/// A flat per-unit charge (spiral and wiro).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatRate {
    pub base: f64,
}

/// Base charge up to 50 pages, then a surcharge per block of
/// `block_size` pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerfectRate {
    pub base: f64,
    #[serde(rename = "perBlockOver50")]
    pub per_block_over_50: f64,
    #[serde(rename = "blockSize")]
    pub block_size: u32,
}

/// Hardcover is priced by trim size; sizes other than A4/A5 fall back
/// to the A4 rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardcoverRate {
    pub a4: f64,
    pub a5: f64,
}

fn default_paper_rate() -> f64 {
    100.0
}

fn default_plate_cost_4c() -> f64 {
    2000.0
}

fn default_plate_cost_1c() -> f64 {
    1000.0
}

fn default_printing_cost_per_1000_4c() -> f64 {
    300.0
}

fn default_printing_cost_per_1000_1c() -> f64 {
    150.0
}

fn default_lamination_rates() -> HashMap<String, f64> {
    HashMap::from([
        ("None".to_string(), 0.0),
        ("Gloss BOPP".to_string(), 1.8),
        ("Matt BOPP".to_string(), 1.8),
        ("Gloss Thermal".to_string(), 3.2),
        ("Matt Thermal".to_string(), 3.2),
        ("Velvet".to_string(), 11.25),
    ])
}

fn default_new_size_lamination_rates() -> HashMap<String, f64> {
    HashMap::from([
        ("None".to_string(), 0.0),
        ("Gloss BOPP".to_string(), 2.5),
        ("Matt BOPP".to_string(), 2.5),
        ("Gloss Thermal".to_string(), 4.5),
        ("Matt Thermal".to_string(), 4.5),
        ("Velvet".to_string(), 18.0),
    ])
}

fn default_minimum_lamination_costs() -> HashMap<String, f64> {
    HashMap::from([
        ("BOPP".to_string(), 600.0),
        ("Thermal".to_string(), 700.0),
        ("Velvet".to_string(), 700.0),
    ])
}

fn default_spot_uv_rate() -> f64 {
    2.5
}

fn default_spot_uv_minimum() -> f64 {
    3500.0
}

fn default_drip_off_rate() -> f64 {
    2.5
}

fn default_drip_off_minimum() -> f64 {
    4500.0
}

fn default_coating_rate() -> f64 {
    1.2
}

fn default_coating_minimum() -> f64 {
    500.0
}

fn default_staple_rate() -> StapleRate {
    StapleRate {
        base: 2.0,
        per_page_over_20: 0.1,
    }
}

fn default_spiral_rate() -> FlatRate {
    FlatRate { base: 15.0 }
}

fn default_wiro_rate() -> FlatRate {
    FlatRate { base: 15.0 }
}

fn default_perfect_rate() -> PerfectRate {
    PerfectRate {
        base: 6.0,
        per_block_over_50: 0.5,
        block_size: 8,
    }
}

fn default_hardcover_rate() -> HardcoverRate {
    HardcoverRate { a4: 30.0, a5: 45.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_documented_defaults() {
        let config: RateConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.paper_rate, 100.0);
        assert_eq!(config.plate_cost_4c, 2000.0);
        assert_eq!(config.plate_cost_1c, 1000.0);
        assert_eq!(config.printing_cost_per_1000_4c, 300.0);
        assert_eq!(config.printing_cost_per_1000_1c, 150.0);
        assert_eq!(config.lamination_rates["Velvet"], 11.25);
        assert_eq!(config.new_size_lamination_rates["Velvet"], 18.0);
        assert_eq!(config.minimum_lamination_costs["BOPP"], 600.0);
        assert_eq!(config.spot_uv_minimum, 3500.0);
        assert_eq!(config.drip_off_minimum, 4500.0);
        assert_eq!(config.coating_minimum, 500.0);
        assert_eq!(config.binding_rates.hardcover.a5, 45.0);
        assert_eq!(config.binding_rates.perfect.block_size, 8);
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_keys() {
        let config: RateConfig =
            serde_json::from_str(r#"{"paperRate": 120, "spotUVMinimum": 4000}"#).unwrap();
        assert_eq!(config.paper_rate, 120.0);
        assert_eq!(config.spot_uv_minimum, 4000.0);
        // Untouched keys fall back to the documented values.
        assert_eq!(config.plate_cost_4c, 2000.0);
        assert_eq!(config.binding_rates.spiral.base, 15.0);
    }

    #[test]
    fn camel_case_wire_names_round_trip() {
        let json = serde_json::to_value(RateConfig::default()).unwrap();
        assert!(json.get("plateCost4C").is_some());
        assert!(json.get("printingCostPer1000_1C").is_some());
        assert!(json.get("spotUVRate").is_some());
        assert!(json.get("dripOffMinimum").is_some());
        assert!(json["bindingRates"]["staple"].get("perPageOver20").is_some());
    }

    #[test]
    fn validate_rejects_negative_rates() {
        let mut config = RateConfig::default();
        config.paper_rate = -1.0;
        assert!(config.validate().is_err());

        let mut config = RateConfig::default();
        config
            .lamination_rates
            .insert("Gloss BOPP".to_string(), -0.5);
        assert!(config.validate().is_err());

        let mut config = RateConfig::default();
        config.binding_rates.hardcover.a4 = f64::NAN;
        assert!(config.validate().is_err());

        assert!(RateConfig::default().validate().is_ok());
    }
}
