//! Sheet geometry: how a job maps onto large press sheets.
//!
//! Every cost formula works from the numbers derived here.  A
//! [`SheetGeometry`] is computed fresh per section (cover or inside)
//! of each calculation and discarded afterwards; nothing in this
//! module touches the rate config.

use crate::models::PaperSize;

/// Imposition factor used when a paper size has no table entry.
/// Equivalent to pricing the job as A4.
pub const DEFAULT_IMPOSITION_FACTOR: u32 = 4;

/// How many finished pieces of the given trim size are cut from one
/// large press sheet.  `None` for sizes without an imposition entry.
pub fn imposition_factor(size: PaperSize) -> Option<u32> {
    let factor = match size {
        PaperSize::A2 | PaperSize::Inch17x22 => 1,
        PaperSize::A3 | PaperSize::Inch11x17 | PaperSize::B3 => 2,
        PaperSize::A4 | PaperSize::Inch11x8_5 | PaperSize::B4 => 4,
        PaperSize::A5 | PaperSize::Inch5_5x8_5 | PaperSize::B5 => 8,
        PaperSize::A6 | PaperSize::Inch5_5x4_23 | PaperSize::B6 => 16,
        PaperSize::B7 => 32,
        PaperSize::Unknown => return None,
    };
    Some(factor)
}

/// Derived sheet and plate counts for one section of a job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    /// Pieces per large sheet for this trim size.
    pub factor: u32,
    /// Printing plates for this section's pages.
    pub plates: u32,
    /// Large sheets consumed by this section across the whole run.
    /// Fractional: each physical sheet carries 2 pages per side in
    /// duplex imposition, so `(pages / 2) * quantity / factor`.
    pub effective_sheets: f64,
    /// Large sheets in one pass of the run, `ceil(quantity / factor)`.
    /// Finishing operations (lamination, spot UV, coating, drip-off)
    /// work on this single physical sheet flow, not per page.
    pub total_sheets: u32,
}

impl SheetGeometry {
    /// Computes the geometry for `pages` pages of a `quantity`-piece
    /// run at the given trim size.  Unknown sizes fall back to
    /// [`DEFAULT_IMPOSITION_FACTOR`] instead of failing the quote.
    ///
    /// `pages == 0` yields zero sheets and zero plates, which zeroes
    /// every dependent cost downstream.
    pub fn compute(size: PaperSize, quantity: u32, pages: u32) -> SheetGeometry {
        let factor = imposition_factor(size).unwrap_or(DEFAULT_IMPOSITION_FACTOR);
        let plates = pages.div_ceil(factor);
        let effective_sheets = (f64::from(pages) / 2.0) * f64::from(quantity) / f64::from(factor);
        let total_sheets = quantity.div_ceil(factor);
        SheetGeometry {
            factor,
            plates,
            effective_sheets,
            total_sheets,
        }
    }
}
