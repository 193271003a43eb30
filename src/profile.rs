//! Product profiles: how each product wires the shared formulas.
//!
//! The three products (flyer, book, brochure) price through the same
//! formula library; all that differs is the wiring.  A profile turns a
//! validated [`JobSpec`] into a [`QuotePlan`]: plain sections and
//! sheet counts with every finishing option already resolved, so the
//! assembler in [`crate::engine`] never needs to know which product it
//! is pricing.

use crate::geometry::{imposition_factor, SheetGeometry, DEFAULT_IMPOSITION_FACTOR};
use crate::models::{
    BindingType, BookJob, BrochureJob, Coverage, FlyerJob, InkOption, JobSpec, LaminationType,
    PaperSize, Side,
};

/// Pages a cover always consumes, regardless of product.
pub const COVER_PAGES: u32 = 4;

/// Colour process for one section's plates and running cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    FourColour,
    SingleColour,
}

/// One printed section (a flyer, a cover, or an inside block).
#[derive(Debug, Clone)]
pub struct SectionPlan {
    pub gsm: u32,
    pub plates: u32,
    /// Fractional large sheets the section consumes, for paper cost.
    pub effective_sheets: f64,
    /// Sheet passes through the press, doubled for duplex work.
    pub printing_sheets: f64,
    pub ink: Ink,
    pub lamination: LaminationType,
    /// Sheet flow the lamination line sees for this section.
    pub lamination_sheets: f64,
    pub lamination_double_sided: bool,
}

/// A fully resolved pricing plan, product differences already applied.
#[derive(Debug, Clone)]
pub struct QuotePlan {
    pub paper_size: PaperSize,
    pub quantity: u32,
    pub total_pages: u32,
    pub sections: Vec<SectionPlan>,
    /// Sheet count for spot UV, zero when the option is off.
    pub spot_uv_sheets: f64,
    /// Sheet count for coating, zero when the option is off.
    pub coating_sheets: f64,
    /// Pages and sheets the drip-off plates cover, zero when off.
    pub drip_off_pages: u32,
    pub drip_off_sheets: f64,
    pub binding: BindingType,
    /// Large-sheet count used when binding bills per sheet.
    pub binding_sheets: u32,
}

/// Builds the pricing plan for a job.  Inputs are assumed validated;
/// see [`crate::engine::calculate`] for the eligibility checks.
pub fn plan(job: &JobSpec) -> QuotePlan {
    match job {
        JobSpec::Flyer(job) => plan_flyer(job),
        JobSpec::Book(job) => plan_book(job),
        JobSpec::Brochure(job) => plan_brochure(job),
    }
}

/// Flyers are a single unbound sheet: one plate, no cover split, and
/// lamination/spot UV sized by their own side selectors.
fn plan_flyer(job: &FlyerJob) -> QuotePlan {
    let factor = imposition_factor(job.paper_size).unwrap_or(DEFAULT_IMPOSITION_FACTOR);
    let effective_sheets = f64::from(job.quantity) / f64::from(factor);
    let printing_sheets = if job.double_sided {
        effective_sheets * 2.0
    } else {
        effective_sheets
    };
    let spot_uv_sheets = if job.spot_uv {
        match job.spot_uv_side {
            Side::Double => effective_sheets * 2.0,
            Side::Single => effective_sheets,
        }
    } else {
        0.0
    };
    QuotePlan {
        paper_size: job.paper_size,
        quantity: job.quantity,
        total_pages: 0,
        sections: vec![SectionPlan {
            gsm: job.gsm,
            plates: 1,
            effective_sheets,
            printing_sheets,
            ink: Ink::FourColour,
            lamination: job.lamination,
            lamination_sheets: effective_sheets,
            lamination_double_sided: job.lamination_side == Side::Double,
        }],
        spot_uv_sheets,
        coating_sheets: 0.0,
        drip_off_pages: 0,
        drip_off_sheets: 0.0,
        binding: BindingType::None,
        binding_sheets: 0,
    }
}

fn plan_book(job: &BookJob) -> QuotePlan {
    let inside_ink = match job.ink {
        InkOption::Cover4cInside4c => Ink::FourColour,
        InkOption::Cover4cInside1c => Ink::SingleColour,
    };
    plan_bound(BoundJob {
        paper_size: job.paper_size,
        quantity: job.quantity,
        total_pages: job.total_pages,
        cover_gsm: job.cover_gsm,
        inside_gsm: job.inside_gsm,
        inside_ink,
        cover_lamination: job.cover_lamination,
        inside_lamination: job.inside_lamination,
        spot_uv: job.spot_uv,
        coating: job.coating,
        drip_off: job.drip_off,
        binding: job.binding,
    })
}

fn plan_brochure(job: &BrochureJob) -> QuotePlan {
    // A2 runs a separate plate per side, which the finishing line
    // cannot take: every finishing option is forced off.
    let finishing_allowed = job.paper_size != PaperSize::A2;
    let off = |coverage: Coverage| {
        if finishing_allowed {
            coverage
        } else {
            Coverage::None
        }
    };
    let lamination_off = |film: LaminationType| {
        if finishing_allowed {
            film
        } else {
            LaminationType::None
        }
    };
    plan_bound(BoundJob {
        paper_size: job.paper_size,
        quantity: job.quantity,
        total_pages: job.total_pages,
        cover_gsm: job.cover_gsm,
        inside_gsm: job.inside_gsm,
        inside_ink: Ink::FourColour,
        cover_lamination: lamination_off(job.cover_lamination),
        inside_lamination: lamination_off(job.inside_lamination),
        spot_uv: off(job.spot_uv),
        coating: off(job.coating),
        drip_off: off(job.drip_off),
        binding: job.binding,
    })
}

/// Common shape of a bound job once the product-specific policies
/// (ink selection, A2 restriction) are applied.
struct BoundJob {
    paper_size: PaperSize,
    quantity: u32,
    total_pages: u32,
    cover_gsm: u32,
    inside_gsm: u32,
    inside_ink: Ink,
    cover_lamination: LaminationType,
    inside_lamination: LaminationType,
    spot_uv: Coverage,
    coating: Coverage,
    drip_off: Coverage,
    binding: BindingType,
}

fn plan_bound(job: BoundJob) -> QuotePlan {
    let inside_pages = job.total_pages.saturating_sub(COVER_PAGES);
    let cover = SheetGeometry::compute(job.paper_size, job.quantity, COVER_PAGES);
    let inside = SheetGeometry::compute(job.paper_size, job.quantity, inside_pages);
    // One physical sheet flow through the finishing line.
    let total_sheets = cover.total_sheets;

    let coverage_sheets = |coverage: Coverage| match coverage {
        Coverage::None => 0.0,
        Coverage::CoverOnly => f64::from(total_sheets),
        Coverage::FullBook => f64::from(total_sheets) * 2.0,
    };
    let (drip_off_pages, drip_off_sheets) = match job.drip_off {
        Coverage::None => (0, 0.0),
        Coverage::CoverOnly => (COVER_PAGES, f64::from(total_sheets)),
        Coverage::FullBook => (job.total_pages, f64::from(total_sheets) * 2.0),
    };

    let section = |gsm: u32, geometry: SheetGeometry, ink: Ink, lamination: LaminationType| {
        SectionPlan {
            gsm,
            plates: geometry.plates,
            effective_sheets: geometry.effective_sheets,
            // Bound products always print duplex.
            printing_sheets: geometry.effective_sheets * 2.0,
            ink,
            lamination,
            lamination_sheets: f64::from(total_sheets),
            lamination_double_sided: true,
        }
    };

    QuotePlan {
        paper_size: job.paper_size,
        quantity: job.quantity,
        total_pages: job.total_pages,
        sections: vec![
            section(job.cover_gsm, cover, Ink::FourColour, job.cover_lamination),
            section(job.inside_gsm, inside, job.inside_ink, job.inside_lamination),
        ],
        spot_uv_sheets: coverage_sheets(job.spot_uv),
        coating_sheets: coverage_sheets(job.coating),
        drip_off_pages,
        drip_off_sheets,
        binding: job.binding,
        binding_sheets: total_sheets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> BookJob {
        BookJob {
            paper_size: PaperSize::A4,
            quantity: 1000,
            total_pages: 8,
            cover_gsm: 300,
            inside_gsm: 130,
            ink: InkOption::Cover4cInside4c,
            cover_lamination: LaminationType::None,
            inside_lamination: LaminationType::None,
            spot_uv: Coverage::None,
            coating: Coverage::None,
            drip_off: Coverage::None,
            binding: BindingType::None,
        }
    }

    #[test]
    fn flyer_plans_a_single_one_plate_section() {
        let plan = plan(&JobSpec::Flyer(FlyerJob {
            paper_size: PaperSize::A4,
            quantity: 1000,
            gsm: 130,
            double_sided: false,
            lamination: LaminationType::None,
            lamination_side: Side::Single,
            spot_uv: false,
            spot_uv_side: Side::Single,
        }));
        assert_eq!(plan.sections.len(), 1);
        assert_eq!(plan.sections[0].plates, 1);
        assert_eq!(plan.sections[0].effective_sheets, 250.0);
        assert_eq!(plan.sections[0].printing_sheets, 250.0);
        assert_eq!(plan.binding, BindingType::None);
        assert_eq!(plan.spot_uv_sheets, 0.0);
    }

    #[test]
    fn book_splits_cover_and_inside_sections() {
        let mut job = book();
        job.ink = InkOption::Cover4cInside1c;
        let plan = plan(&JobSpec::Book(job));
        assert_eq!(plan.sections.len(), 2);
        let cover = &plan.sections[0];
        let inside = &plan.sections[1];
        assert_eq!(cover.effective_sheets, 500.0);
        assert_eq!(cover.printing_sheets, 1000.0);
        assert_eq!(cover.ink, Ink::FourColour);
        assert_eq!(inside.effective_sheets, 500.0);
        assert_eq!(inside.ink, Ink::SingleColour);
        assert_eq!(plan.binding_sheets, 250);
    }

    #[test]
    fn four_page_book_has_an_empty_inside_section() {
        let mut job = book();
        job.total_pages = 4;
        let plan = plan(&JobSpec::Book(job));
        assert_eq!(plan.sections[1].effective_sheets, 0.0);
        assert_eq!(plan.sections[1].plates, 0);
    }

    #[test]
    fn coverage_resolves_to_sheet_counts() {
        let mut job = book();
        job.spot_uv = Coverage::CoverOnly;
        job.drip_off = Coverage::FullBook;
        let plan = plan(&JobSpec::Book(job));
        assert_eq!(plan.spot_uv_sheets, 250.0);
        assert_eq!(plan.drip_off_pages, 8);
        assert_eq!(plan.drip_off_sheets, 500.0);
        assert_eq!(plan.coating_sheets, 0.0);
    }

    #[test]
    fn a2_brochure_forces_finishing_off() {
        let plan = plan(&JobSpec::Brochure(BrochureJob {
            paper_size: PaperSize::A2,
            quantity: 500,
            total_pages: 8,
            cover_gsm: 300,
            inside_gsm: 130,
            cover_lamination: LaminationType::GlossBopp,
            inside_lamination: LaminationType::MattBopp,
            spot_uv: Coverage::FullBook,
            coating: Coverage::CoverOnly,
            drip_off: Coverage::FullBook,
            binding: BindingType::Spiral,
        }));
        assert_eq!(plan.sections[0].lamination, LaminationType::None);
        assert_eq!(plan.sections[1].lamination, LaminationType::None);
        assert_eq!(plan.spot_uv_sheets, 0.0);
        assert_eq!(plan.coating_sheets, 0.0);
        assert_eq!(plan.drip_off_pages, 0);
        // Binding is unaffected by the A2 finishing restriction.
        assert_eq!(plan.binding, BindingType::Spiral);
    }
}
