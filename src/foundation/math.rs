/// `round(n / d)` with halves rounded up, for non-negative integers. `d` must be non-zero.
pub(crate) fn round_div(n: u128, d: u128) -> u64 {
    let q = (2 * n + d) / (2 * d);
    u64::try_from(q).unwrap_or(u64::MAX)
}

/// Undo alpha premultiplication of one channel value.
pub(crate) fn unpremultiply_u8(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
    v.min(255) as u8
}

/// Convert a premultiplied RGBA8 buffer to straight alpha in place.
pub(crate) fn unpremultiply_rgba8_in_place(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        if a == 255 {
            continue;
        }
        px[0] = unpremultiply_u8(px[0], a);
        px[1] = unpremultiply_u8(px[1], a);
        px[2] = unpremultiply_u8(px[2], a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
