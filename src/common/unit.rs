//! Unit conversion utilities.
//!
//! PresentationML positions and sizes everything in English Metric Units
//! (EMU); font sizes are written in hundredths of a point.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_PT: i64 = 12_700;

#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

#[inline]
pub fn cm_to_emu(cm: f64) -> i64 {
    (cm * EMUS_PER_CM as f64).round() as i64
}

#[inline]
pub fn pt_to_emu(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64).round() as i64
}

/// Font size in points to the `sz` attribute value (1/100 pt).
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * 100.0).round().max(0.0) as u32
}

#[inline]
pub fn centipoints_to_pt(centipoints: u32) -> f64 {
    centipoints as f64 / 100.0
}
