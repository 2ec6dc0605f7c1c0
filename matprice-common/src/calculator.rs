//! Price calculation for material quotes
//!
//! Derives the batch area and the two unit prices from a [`MaterialInput`].
//! Zero divisors never raise: the affected value is substituted with `0`,
//! which is what existing stored data relies on. No rounding happens here;
//! see [`crate::display`] for render-time precision.

use serde::{Deserialize, Serialize};

use crate::material::MaterialInput;

/// Millimeters per meter
const MM_PER_M: f64 = 1000.0;

/// Derived prices for one quote
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Area of the whole batch in m² (single sheet area × amount)
    pub qm: f64,
    /// Total price / amount
    pub price_per_unit: f64,
    /// Total price / qm
    pub price_per_qm: f64,
}

impl PriceBreakdown {
    /// Summary lines shown after "Calculate and Save"
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("{:.2} qm", self.qm),
            format!("{:.2} € per qm", self.price_per_qm),
            format!("{:.2} € per unit", self.price_per_unit),
        ]
    }
}

/// Compute area and unit prices
///
/// `price` is the total paid for `amount` units.
///
/// # Examples
/// ```
/// use matprice_common::{calculate, MaterialInput};
///
/// let input = MaterialInput {
///     width: 600.0,
///     length: 400.0,
///     amount: 10.0,
///     price: 50.0,
///     ..Default::default()
/// };
/// let b = calculate(&input);
/// assert!((b.qm - 2.4).abs() < 1e-9);
/// assert_eq!(b.price_per_unit, 5.0);
/// ```
pub fn calculate(input: &MaterialInput) -> PriceBreakdown {
    let qm = area_qm(input.width, input.length, input.amount);

    let price_per_unit = if input.amount != 0.0 {
        input.price / input.amount
    } else {
        0.0
    };

    let price_per_qm = if qm != 0.0 { input.price / qm } else { 0.0 };

    PriceBreakdown {
        qm,
        price_per_unit,
        price_per_qm,
    }
}

/// Batch area in m², zero when width is zero
fn area_qm(width_mm: f64, length_mm: f64, amount: f64) -> f64 {
    if width_mm == 0.0 {
        return 0.0;
    }
    let single_unit_qm = (width_mm / MM_PER_M) * (length_mm / MM_PER_M);
    single_unit_qm * amount
}
