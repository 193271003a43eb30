//! Data models for the quote engine.
//!
//! The `models` module defines the serialisable structs and enums
//! describing a quote request (product type, paper size, quantity,
//! finishing choices) and the itemized cost breakdown the engine
//! produces.  These types derive `Serialize` and `Deserialize` so the
//! HTTP layer can accept and return them as JSON unchanged.

use serde::{Deserialize, Serialize};

/// A single quote request, tagged by product type.
///
/// The three products share the same formula library but differ in
/// wiring: a flyer is a single unbound sheet, while books and
/// brochures split into a fixed 4-page cover and the remaining inside
/// pages.  The JSON representation carries the product in a
/// `productType` field alongside the variant's own fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "productType")]
pub enum JobSpec {
    Flyer(FlyerJob),
    Book(BookJob),
    Brochure(BrochureJob),
}

impl JobSpec {
    /// Paper size of the job, regardless of product.
    pub fn paper_size(&self) -> PaperSize {
        match self {
            JobSpec::Flyer(job) => job.paper_size,
            JobSpec::Book(job) => job.paper_size,
            JobSpec::Brochure(job) => job.paper_size,
        }
    }

    /// Ordered quantity of finished pieces.
    pub fn quantity(&self) -> u32 {
        match self {
            JobSpec::Flyer(job) => job.quantity,
            JobSpec::Book(job) => job.quantity,
            JobSpec::Brochure(job) => job.quantity,
        }
    }
}

/// A single-sheet job.  Lamination and spot UV each carry their own
/// side selector, independent of whether the sheet is printed on both
/// sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyerJob {
    pub paper_size: PaperSize,
    pub quantity: u32,
    pub gsm: u32,
    #[serde(default)]
    pub double_sided: bool,
    #[serde(default)]
    pub lamination: LaminationType,
    #[serde(default)]
    pub lamination_side: Side,
    #[serde(default)]
    pub spot_uv: bool,
    #[serde(default)]
    pub spot_uv_side: Side,
}

/// A bound multi-page job.  The cover always consumes 4 pages and is
/// printed four-colour; the inside section may be printed single-colour
/// via [`InkOption`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookJob {
    pub paper_size: PaperSize,
    pub quantity: u32,
    pub total_pages: u32,
    #[serde(rename = "coverGSM")]
    pub cover_gsm: u32,
    #[serde(rename = "insideGSM")]
    pub inside_gsm: u32,
    #[serde(default)]
    pub ink: InkOption,
    #[serde(default)]
    pub cover_lamination: LaminationType,
    #[serde(default)]
    pub inside_lamination: LaminationType,
    #[serde(default, rename = "spotUV")]
    pub spot_uv: Coverage,
    #[serde(default)]
    pub coating: Coverage,
    #[serde(default)]
    pub drip_off: Coverage,
    #[serde(default)]
    pub binding: BindingType,
}

/// A bound multi-page job with cover and inside both printed
/// four-colour.  Brochures cannot be hardcover-bound, and on A2 stock
/// every finishing option is forced to "None" (A2 needs a separate
/// plate per side, which the shop's finishing line cannot take).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrochureJob {
    pub paper_size: PaperSize,
    pub quantity: u32,
    pub total_pages: u32,
    #[serde(rename = "coverGSM")]
    pub cover_gsm: u32,
    #[serde(rename = "insideGSM")]
    pub inside_gsm: u32,
    #[serde(default)]
    pub cover_lamination: LaminationType,
    #[serde(default)]
    pub inside_lamination: LaminationType,
    #[serde(default, rename = "spotUV")]
    pub spot_uv: Coverage,
    #[serde(default)]
    pub coating: Coverage,
    #[serde(default)]
    pub drip_off: Coverage,
    #[serde(default)]
    pub binding: BindingType,
}

/// Final trim sizes the shop imposes onto its large press sheets.
///
/// The B-series sizes are the shop's "new sizes": they run on a
/// different large sheet and therefore price against a separate
/// lamination rate table and a smaller paper dimension factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    A2,
    A3,
    A4,
    A5,
    A6,
    #[serde(rename = "17x22")]
    Inch17x22,
    #[serde(rename = "11x17")]
    Inch11x17,
    #[serde(rename = "11x8.5")]
    Inch11x8_5,
    #[serde(rename = "5.5x8.5")]
    Inch5_5x8_5,
    #[serde(rename = "5.5x4.23")]
    Inch5_5x4_23,
    B3,
    B4,
    B5,
    B6,
    B7,
    /// Catch-all for size strings the engine does not recognise.
    /// Geometry prices these with the default imposition factor rather
    /// than failing the quote.
    #[serde(other)]
    Unknown,
}

impl PaperSize {
    /// Whether this is one of the B-series "new sizes".
    pub fn is_new_size(self) -> bool {
        matches!(
            self,
            PaperSize::B3 | PaperSize::B4 | PaperSize::B5 | PaperSize::B6 | PaperSize::B7
        )
    }
}

/// Lamination film choices.  The rate tables in [`crate::rates`] are
/// keyed by the display names, so [`LaminationType::rate_key`] returns
/// the exact string to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaminationType {
    #[default]
    None,
    #[serde(rename = "Gloss BOPP")]
    GlossBopp,
    #[serde(rename = "Matt BOPP")]
    MattBopp,
    #[serde(rename = "Gloss Thermal")]
    GlossThermal,
    #[serde(rename = "Matt Thermal")]
    MattThermal,
    Velvet,
}

impl LaminationType {
    /// Key into the configured lamination rate tables.
    pub fn rate_key(self) -> &'static str {
        match self {
            LaminationType::None => "None",
            LaminationType::GlossBopp => "Gloss BOPP",
            LaminationType::MattBopp => "Matt BOPP",
            LaminationType::GlossThermal => "Gloss Thermal",
            LaminationType::MattThermal => "Matt Thermal",
            LaminationType::Velvet => "Velvet",
        }
    }
}

/// Which side(s) of the sheet a flyer finishing option covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Single,
    Double,
}

/// How far a book/brochure finishing option extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Coverage {
    #[default]
    None,
    #[serde(rename = "Cover Only")]
    CoverOnly,
    #[serde(rename = "Full Book")]
    FullBook,
}

/// Binding styles.  Staple (saddle stitch) is subject to a stock
/// eligibility rule enforced by the engine: it is unavailable once the
/// inside stock reaches 300 GSM and the page count exceeds 32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingType {
    #[default]
    None,
    Staple,
    Spiral,
    Wiro,
    Perfect,
    Hardcover,
}

/// Ink policy for books.  The cover is always four-colour; only the
/// inside section may drop to single-colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InkOption {
    #[default]
    #[serde(rename = "Cover 4C / Inside 4C")]
    Cover4cInside4c,
    #[serde(rename = "Cover 4C / Inside 1C")]
    Cover4cInside1c,
}

/// The itemized result of one calculation.
///
/// Every field is non-negative and finite; the engine rejects the whole
/// calculation otherwise, so a breakdown is always internally
/// consistent.  `total_cost` is the sum of the seven line items and
/// `total_cost_with_gst` applies the fixed GST multiplier on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub paper_cost: f64,
    pub printing_cost: f64,
    pub binding_cost: f64,
    pub lamination_cost: f64,
    #[serde(rename = "spotUVCost")]
    pub spot_uv_cost: f64,
    pub drip_off_cost: f64,
    pub coating_cost: f64,
    pub total_cost: f64,
    #[serde(rename = "totalCostWithGST")]
    pub total_cost_with_gst: f64,
}
