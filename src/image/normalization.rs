#[inline]
#[must_use]
pub fn find_min_max(values: &[f32]) -> (f32, f32) {
    values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &val| {
            (min.min(val), max.max(val))
        })
}

/// Span used as divisor; a flat image maps everything to 0
#[inline]
#[must_use]
pub fn range_of(min: f32, max: f32) -> f32 {
    if max > min { max - min } else { 1.0_f32 }
}

#[inline]
#[must_use]
pub fn normalize_to_u8(value: f32, min: f32, range: f32) -> u8 {
    let normalized = (value - min) / range;
    // Saturating cast: values < 0 become 0, values > 255 become 255
    (normalized * 255.0_f32) as u8
}
