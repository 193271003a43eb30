//! Quote assembly.
//!
//! The `engine` module is responsible for turning a [`JobSpec`] and a
//! [`RateConfig`] snapshot into a [`CostBreakdown`].  It validates the
//! job, asks the product profile for a pricing plan, runs the shared
//! formulas over each section, sums the line items and applies GST.
//! The whole path is a pure function: calling it twice with the same
//! inputs returns the identical breakdown.

use crate::error::EngineError;
use crate::formulas;
use crate::models::{BindingType, CostBreakdown, JobSpec};
use crate::profile::{self, Ink, COVER_PAGES};
use crate::rates::{RateConfig, GST_RATE};

/// Computes the full cost breakdown for a job against one rate
/// snapshot.
///
/// Either a complete, internally consistent breakdown is returned or
/// an error; partial results never escape.  Unknown paper sizes and
/// missing rate keys are recovered inside the formulas (default
/// imposition factor, zeroed line item) and do not fail the
/// calculation.
pub fn calculate(job: &JobSpec, rates: &RateConfig) -> Result<CostBreakdown, EngineError> {
    validate(job)?;
    let plan = profile::plan(job);

    let mut paper_cost = 0.0;
    let mut printing_cost = 0.0;
    let mut lamination_cost = 0.0;
    for section in &plan.sections {
        paper_cost +=
            formulas::paper_cost(section.gsm, section.effective_sheets, plan.paper_size, rates);
        let (plate_cost, cost_per_1000) = match section.ink {
            Ink::FourColour => (rates.plate_cost_4c, rates.printing_cost_per_1000_4c),
            Ink::SingleColour => (rates.plate_cost_1c, rates.printing_cost_per_1000_1c),
        };
        printing_cost += formulas::printing_cost(
            section.plates,
            section.printing_sheets,
            plate_cost,
            cost_per_1000,
        );
        lamination_cost += formulas::lamination_cost(
            section.lamination,
            section.lamination_sheets,
            section.lamination_double_sided,
            plan.paper_size,
            rates,
        );
    }

    let spot_uv_cost = formulas::spot_uv_cost(plan.spot_uv_sheets, rates);
    let coating_cost = formulas::coating_cost(plan.coating_sheets, rates);
    let drip_off_cost = formulas::drip_off_cost(plan.drip_off_pages, plan.drip_off_sheets, rates);
    let binding_cost = formulas::binding_cost(
        plan.binding,
        plan.total_pages,
        plan.paper_size,
        plan.quantity,
        plan.binding_sheets,
        &rates.binding_rates,
    );

    let total_cost = paper_cost
        + printing_cost
        + binding_cost
        + lamination_cost
        + spot_uv_cost
        + drip_off_cost
        + coating_cost;
    let breakdown = CostBreakdown {
        paper_cost,
        printing_cost,
        binding_cost,
        lamination_cost,
        spot_uv_cost,
        drip_off_cost,
        coating_cost,
        total_cost,
        total_cost_with_gst: total_cost * (1.0 + GST_RATE),
    };
    check_invariants(&breakdown)?;
    Ok(breakdown)
}

/// Rejects jobs the engine must not price.
fn validate(job: &JobSpec) -> Result<(), EngineError> {
    if job.quantity() == 0 {
        return Err(EngineError::invalid_input("quantity must be positive"));
    }
    match job {
        JobSpec::Flyer(flyer) => {
            if flyer.gsm == 0 {
                return Err(EngineError::invalid_input("gsm must be positive"));
            }
        }
        JobSpec::Book(book) => {
            validate_bound(
                book.total_pages,
                book.cover_gsm,
                book.inside_gsm,
                book.binding,
            )?;
        }
        JobSpec::Brochure(brochure) => {
            validate_bound(
                brochure.total_pages,
                brochure.cover_gsm,
                brochure.inside_gsm,
                brochure.binding,
            )?;
            if brochure.binding == BindingType::Hardcover {
                return Err(EngineError::invalid_input(
                    "hardcover binding is not offered for brochures",
                ));
            }
        }
    }
    Ok(())
}

fn validate_bound(
    total_pages: u32,
    cover_gsm: u32,
    inside_gsm: u32,
    binding: BindingType,
) -> Result<(), EngineError> {
    if cover_gsm == 0 || inside_gsm == 0 {
        return Err(EngineError::invalid_input("gsm must be positive"));
    }
    if total_pages < COVER_PAGES {
        return Err(EngineError::invalid_input(format!(
            "a bound product needs at least {COVER_PAGES} pages for its cover, got {total_pages}"
        )));
    }
    if binding == BindingType::Staple && !formulas::staple_available(inside_gsm, total_pages) {
        return Err(EngineError::invalid_input(format!(
            "staple binding cannot hold {inside_gsm} GSM inside stock over {total_pages} pages"
        )));
    }
    Ok(())
}

/// Every monetary value must come out finite and non-negative; given
/// validated inputs and non-negative rates this cannot fail, so a
/// violation aborts the calculation instead of being clamped.
fn check_invariants(breakdown: &CostBreakdown) -> Result<(), EngineError> {
    let fields = [
        ("paperCost", breakdown.paper_cost),
        ("printingCost", breakdown.printing_cost),
        ("bindingCost", breakdown.binding_cost),
        ("laminationCost", breakdown.lamination_cost),
        ("spotUVCost", breakdown.spot_uv_cost),
        ("dripOffCost", breakdown.drip_off_cost),
        ("coatingCost", breakdown.coating_cost),
        ("totalCost", breakdown.total_cost),
        ("totalCostWithGST", breakdown.total_cost_with_gst),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(EngineError::invalid_calculation(format!(
                "{name} came out as {value}"
            )));
        }
    }
    Ok(())
}
