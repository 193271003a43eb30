//! The five cost-formula families.
//!
//! Every function here is a pure computation over its arguments and a
//! [`RateConfig`] snapshot.  Section splitting and option-to-sheet
//! resolution happen in [`crate::profile`]; by the time a formula runs
//! it only sees plain sheet counts, so "None" options arrive as zero
//! sheets and fall straight through to a zero line item.
//!
//! Missing rate keys never fail a calculation: the affected line item
//! is zeroed instead, so an admin who forgets to configure a new
//! lamination film produces a free line item rather than a broken
//! quote.

use crate::models::{BindingType, LaminationType, PaperSize};
use crate::rates::{BindingRates, RateConfig};

/// Paper dimension factor for standard sizes.
pub const DIMENSION_FACTOR_STANDARD: f64 = 0.29;
/// Paper dimension factor for the B-series "new sizes".
pub const DIMENSION_FACTOR_NEW_SIZE: f64 = 0.20;
/// Printing sheets covered by the plate cost before per-1000 blocks
/// start billing.
pub const FIRST_PRINTING_BLOCK: f64 = 1000.0;
/// Pages one drip-off plate covers.
pub const PAGES_PER_DRIP_OFF_PLATE: u32 = 4;
/// Staple base charge covers this many pages.
pub const STAPLE_BASE_PAGES: u32 = 20;
/// Perfect-binding base charge covers this many pages.
pub const PERFECT_BASE_PAGES: u32 = 50;
/// Inside stock at or above this weight cannot be saddle-stitched...
pub const STAPLE_MAX_GSM: u32 = 300;
/// ...once the page count exceeds this limit.
pub const STAPLE_GSM_PAGE_LIMIT: u32 = 32;

/// Paper cost for one section: sheets × GSM × dimension factor × rate
/// per thousand.  Zero when the section has no sheets or no weight.
pub fn paper_cost(gsm: u32, effective_sheets: f64, size: PaperSize, rates: &RateConfig) -> f64 {
    if gsm == 0 || effective_sheets <= 0.0 {
        return 0.0;
    }
    let dimension_factor = if size.is_new_size() {
        DIMENSION_FACTOR_NEW_SIZE
    } else {
        DIMENSION_FACTOR_STANDARD
    };
    effective_sheets * f64::from(gsm) * dimension_factor * rates.paper_rate / 1000.0
}

/// Printing cost for one section: a fixed cost per plate plus a
/// per-1000-sheet running cost for everything past the first 1000
/// printing sheets, billed in whole blocks.
pub fn printing_cost(plates: u32, printing_sheets: f64, plate_cost: f64, cost_per_1000: f64) -> f64 {
    if plates == 0 || printing_sheets <= 0.0 {
        return 0.0;
    }
    let fixed = f64::from(plates) * plate_cost;
    let overage = (printing_sheets - FIRST_PRINTING_BLOCK).max(0.0);
    let blocks = (overage / 1000.0).ceil();
    fixed + blocks * cost_per_1000
}

/// Lamination cost for one section's sheet flow.  The B-series sizes
/// price from their own (higher) rate table, and each film family
/// carries a configured minimum charge.  An unknown or unconfigured
/// film zeroes the line item.
pub fn lamination_cost(
    film: LaminationType,
    sheets: f64,
    double_sided: bool,
    size: PaperSize,
    rates: &RateConfig,
) -> f64 {
    if film == LaminationType::None || sheets <= 0.0 {
        return 0.0;
    }
    let key = film.rate_key();
    let rate = rates
        .lamination_rate(key, size.is_new_size())
        .unwrap_or(0.0);
    if rate <= 0.0 {
        return 0.0;
    }
    let sheets_eff = if double_sided { sheets * 2.0 } else { sheets };
    let cost = sheets_eff * rate;
    match lamination_family(key).and_then(|family| rates.lamination_minimum(family)) {
        Some(minimum) => cost.max(minimum),
        None => cost,
    }
}

/// Film family for minimum-charge lookup, derived from the film name
/// the way the rate sheet spells it.
pub fn lamination_family(key: &str) -> Option<&'static str> {
    if key.contains("BOPP") {
        Some("BOPP")
    } else if key.contains("Thermal") {
        Some("Thermal")
    } else if key.contains("Velvet") {
        Some("Velvet")
    } else {
        None
    }
}

/// Spot UV over an already-resolved sheet count, floored at the
/// configured minimum.  Zero sheets (option "None") costs nothing.
pub fn spot_uv_cost(sheets_eff: f64, rates: &RateConfig) -> f64 {
    if sheets_eff <= 0.0 {
        return 0.0;
    }
    (sheets_eff * rates.spot_uv_rate).max(rates.spot_uv_minimum)
}

/// Coating over an already-resolved sheet count, floored at the
/// configured minimum.
pub fn coating_cost(sheets_eff: f64, rates: &RateConfig) -> f64 {
    if sheets_eff <= 0.0 {
        return 0.0;
    }
    (sheets_eff * rates.coating_rate).max(rates.coating_minimum)
}

/// Drip-off varnish, allocated per printing plate.
///
/// Each plate covers up to 4 pages and carries its own minimum charge:
/// a plate's share of the sheet flow is proportional to the pages it
/// holds, and a partial-page plate still incurs the floor.  The total
/// is therefore sensitive to the plate count, not a linear function of
/// pages.
pub fn drip_off_cost(do_pages: u32, do_sheets: f64, rates: &RateConfig) -> f64 {
    if do_pages == 0 || do_sheets <= 0.0 {
        return 0.0;
    }
    let plates = do_pages.div_ceil(PAGES_PER_DRIP_OFF_PLATE);
    let mut leftover = do_pages;
    let mut total = 0.0;
    for _ in 0..plates {
        let pages_this_plate = leftover.min(PAGES_PER_DRIP_OFF_PLATE);
        leftover -= pages_this_plate;
        let fraction = f64::from(pages_this_plate) / f64::from(do_pages);
        let variable = rates.drip_off_rate * fraction * do_sheets;
        total += variable.max(rates.drip_off_minimum);
    }
    total
}

/// Per-unit binding rate for the chosen style and page count.
pub fn binding_unit_rate(
    binding: BindingType,
    pages: u32,
    size: PaperSize,
    rates: &BindingRates,
) -> f64 {
    match binding {
        BindingType::None => 0.0,
        BindingType::Staple => {
            if pages <= STAPLE_BASE_PAGES {
                rates.staple.base
            } else {
                rates.staple.base
                    + f64::from(pages - STAPLE_BASE_PAGES) * rates.staple.per_page_over_20
            }
        }
        BindingType::Spiral => rates.spiral.base,
        BindingType::Wiro => rates.wiro.base,
        BindingType::Perfect => {
            if pages <= PERFECT_BASE_PAGES {
                rates.perfect.base
            } else {
                let blocks = (pages - PERFECT_BASE_PAGES).div_ceil(rates.perfect.block_size.max(1));
                rates.perfect.base + f64::from(blocks) * rates.perfect.per_block_over_50
            }
        }
        // The old rate sheet split hardcover at 100 pages, but both
        // branches resolve to the same A4/A5 split with A4 as the
        // fallback for every other size.
        BindingType::Hardcover => match size {
            PaperSize::A5 => rates.hardcover.a5,
            _ => rates.hardcover.a4,
        },
    }
}

/// Total binding cost.  A4 jobs bind per finished piece; every other
/// size multiplies by the large-sheet count instead.  The asymmetry is
/// carried over from the shop's established pricing.
pub fn binding_cost(
    binding: BindingType,
    pages: u32,
    size: PaperSize,
    quantity: u32,
    total_sheets: u32,
    rates: &BindingRates,
) -> f64 {
    if binding == BindingType::None {
        return 0.0;
    }
    let unit_rate = binding_unit_rate(binding, pages, size, rates);
    let units = if size == PaperSize::A4 {
        quantity
    } else {
        total_sheets
    };
    unit_rate * f64::from(units)
}

/// Whether a saddle stitch can physically hold the job: thick inside
/// stock (≥ 300 GSM) cannot be stapled past 32 pages.
pub fn staple_available(inside_gsm: u32, pages: u32) -> bool {
    !(inside_gsm >= STAPLE_MAX_GSM && pages > STAPLE_GSM_PAGE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaperSize;

    fn rates() -> RateConfig {
        RateConfig::default()
    }

    #[test]
    fn paper_cost_uses_the_size_dependent_dimension_factor() {
        // 250 sheets of 130 GSM on A4: 250 * 130 * 0.29 * 100 / 1000.
        let cost = paper_cost(130, 250.0, PaperSize::A4, &rates());
        assert!((cost - 942.5).abs() < 1e-9);
        // Same sheets on B4 price with the 0.20 factor.
        let cost = paper_cost(130, 250.0, PaperSize::B4, &rates());
        assert!((cost - 650.0).abs() < 1e-9);
    }

    #[test]
    fn paper_cost_is_zero_without_sheets_or_weight() {
        assert_eq!(paper_cost(0, 250.0, PaperSize::A4, &rates()), 0.0);
        assert_eq!(paper_cost(130, 0.0, PaperSize::A4, &rates()), 0.0);
    }

    #[test]
    fn printing_cost_charges_plates_plus_thousand_blocks() {
        // 1000 printing sheets sit inside the first block.
        assert_eq!(printing_cost(1, 1000.0, 2000.0, 300.0), 2000.0);
        // 1001 sheets start the second block.
        assert_eq!(printing_cost(1, 1001.0, 2000.0, 300.0), 2300.0);
        // 3500 sheets need three extra blocks; two plates double the fixed part.
        assert_eq!(printing_cost(2, 3500.0, 2000.0, 300.0), 4900.0);
        assert_eq!(printing_cost(0, 500.0, 2000.0, 300.0), 0.0);
    }

    #[test]
    fn lamination_cost_applies_family_minimums() {
        // 100 sheets of Gloss BOPP at 1.8 is 180, floored at the 600 minimum.
        let cost = lamination_cost(
            LaminationType::GlossBopp,
            100.0,
            false,
            PaperSize::A4,
            &rates(),
        );
        assert_eq!(cost, 600.0);
        // 1000 sheets clear the minimum.
        let cost = lamination_cost(
            LaminationType::GlossBopp,
            1000.0,
            false,
            PaperSize::A4,
            &rates(),
        );
        assert_eq!(cost, 1800.0);
    }

    #[test]
    fn lamination_doubles_sheets_when_double_sided() {
        let single = lamination_cost(
            LaminationType::Velvet,
            1000.0,
            false,
            PaperSize::A4,
            &rates(),
        );
        let double =
            lamination_cost(LaminationType::Velvet, 1000.0, true, PaperSize::A4, &rates());
        assert_eq!(single, 11250.0);
        assert_eq!(double, 22500.0);
    }

    #[test]
    fn lamination_uses_the_new_size_table_for_b_series() {
        let cost = lamination_cost(
            LaminationType::GlossThermal,
            1000.0,
            false,
            PaperSize::B5,
            &rates(),
        );
        assert_eq!(cost, 4500.0);
    }

    #[test]
    fn lamination_with_missing_rate_key_is_free() {
        let mut config = rates();
        config.lamination_rates.remove("Velvet");
        let cost = lamination_cost(LaminationType::Velvet, 1000.0, false, PaperSize::A4, &config);
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn lamination_family_is_derived_from_the_film_name() {
        assert_eq!(lamination_family("Gloss BOPP"), Some("BOPP"));
        assert_eq!(lamination_family("Matt Thermal"), Some("Thermal"));
        assert_eq!(lamination_family("Velvet"), Some("Velvet"));
        assert_eq!(lamination_family("Soft Touch"), None);
    }

    #[test]
    fn spot_uv_and_coating_floor_at_their_minimums() {
        assert_eq!(spot_uv_cost(100.0, &rates()), 3500.0);
        assert_eq!(spot_uv_cost(2000.0, &rates()), 5000.0);
        assert_eq!(spot_uv_cost(0.0, &rates()), 0.0);
        assert_eq!(coating_cost(100.0, &rates()), 500.0);
        assert_eq!(coating_cost(1000.0, &rates()), 1200.0);
    }

    #[test]
    fn drip_off_charges_each_plate_its_own_minimum() {
        // 4 pages, one plate, small run: the plate floor applies.
        assert_eq!(drip_off_cost(4, 250.0, &rates()), 4500.0);
        // 8 pages, two plates, each covering half of 10000 sheets:
        // 2.5 * 0.5 * 10000 = 12500 per plate, above the floor.
        assert_eq!(drip_off_cost(8, 10000.0, &rates()), 25000.0);
        // A partial plate (2 of 6 pages) still pays the floor while the
        // full plate pays its share.
        let cost = drip_off_cost(6, 10000.0, &rates());
        let full_plate = 2.5 * (4.0 / 6.0) * 10000.0;
        assert!((cost - (full_plate + 4500.0)).abs() < 1e-9);
        assert_eq!(drip_off_cost(0, 250.0, &rates()), 0.0);
    }

    #[test]
    fn binding_unit_rates_follow_the_page_thresholds() {
        let table = rates().binding_rates;
        assert_eq!(
            binding_unit_rate(BindingType::Staple, 20, PaperSize::A4, &table),
            2.0
        );
        let staple_40 = binding_unit_rate(BindingType::Staple, 40, PaperSize::A4, &table);
        assert!((staple_40 - 4.0).abs() < 1e-9);
        assert_eq!(
            binding_unit_rate(BindingType::Spiral, 40, PaperSize::A4, &table),
            15.0
        );
        assert_eq!(
            binding_unit_rate(BindingType::Perfect, 50, PaperSize::A4, &table),
            6.0
        );
        // 66 pages: 16 over the base, two 8-page blocks.
        assert_eq!(
            binding_unit_rate(BindingType::Perfect, 66, PaperSize::A4, &table),
            7.0
        );
        assert_eq!(
            binding_unit_rate(BindingType::Hardcover, 80, PaperSize::A5, &table),
            45.0
        );
        assert_eq!(
            binding_unit_rate(BindingType::Hardcover, 80, PaperSize::A3, &table),
            30.0
        );
    }

    #[test]
    fn binding_multiplies_by_quantity_on_a4_and_sheets_elsewhere() {
        let table = rates().binding_rates;
        let a4 = binding_cost(BindingType::Spiral, 40, PaperSize::A4, 1000, 250, &table);
        assert_eq!(a4, 15000.0);
        let a5 = binding_cost(BindingType::Spiral, 40, PaperSize::A5, 1000, 125, &table);
        assert_eq!(a5, 1875.0);
        assert_eq!(
            binding_cost(BindingType::None, 40, PaperSize::A4, 1000, 250, &table),
            0.0
        );
    }

    #[test]
    fn staple_is_unavailable_for_thick_stock_past_32_pages() {
        assert!(staple_available(300, 32));
        assert!(staple_available(250, 40));
        assert!(!staple_available(300, 40));
        assert!(!staple_available(350, 33));
    }
}
