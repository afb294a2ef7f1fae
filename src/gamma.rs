/*
 * // Copyright (c) Radzivon Bartoshyk 10/2026. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use num_traits::AsPrimitive;
use pxfm::f_pow;

#[inline]
/// Linear transfer function for sRGB
///
/// IEC 61966-2-1 decoding, input and output are clamped into 0..=1.
pub fn srgb_to_linear(gamma: f64) -> f64 {
    if gamma <= 0f64 {
        0f64
    } else if gamma <= 0.04045f64 {
        gamma * (1f64 / 12.92f64)
    } else if gamma < 1.0f64 {
        f_pow((gamma + 0.055f64) / 1.055f64, 2.4f64)
    } else {
        1.0f64
    }
}

#[inline]
/// Gamma transfer function for sRGB
///
/// IEC 61966-2-1 encoding, input and output are clamped into 0..=1.
pub fn srgb_from_linear(linear: f64) -> f64 {
    if linear <= 0.0f64 {
        0.0f64
    } else if linear <= 0.0031308f64 {
        linear * 12.92f64
    } else if linear < 1.0f64 {
        1.055f64 * f_pow(linear, 1.0f64 / 2.4f64) - 0.055f64
    } else {
        1.0f64
    }
}

#[inline]
/// Pure power law transfer, used by gamma gray and RGB spaces
pub fn gamma_to_linear(value: f64, gamma: f64) -> f64 {
    if value <= 0. {
        0.
    } else if value >= 1. {
        1.
    } else {
        f_pow(value, gamma)
    }
}

#[inline]
pub fn gamma_from_linear(linear: f64, gamma: f64) -> f64 {
    if linear <= 0. {
        0.
    } else if linear >= 1. {
        1.
    } else {
        f_pow(linear, 1. / gamma)
    }
}

/// Samples `curve` over every representable input of `IN_BITS`
/// and quantizes output to `T` with `out_max` as full scale.
pub(crate) fn build_transfer_table<T: Copy + 'static, const IN_BITS: u32>(
    out_max: f64,
    curve: impl Fn(f64) -> f64,
) -> Box<[T]>
where
    u32: AsPrimitive<T>,
{
    let entries = 1usize << IN_BITS;
    let in_max = (entries - 1) as f64;
    let mut table = Vec::with_capacity(entries);
    for i in 0..entries {
        let y = curve(i as f64 / in_max);
        let q = (y * out_max + 0.5).floor().max(0.).min(out_max) as u32;
        table.push(q.as_());
    }
    table.into_boxed_slice()
}

/// 8-bit linear RGB to 8-bit non-linear sRGB
pub(crate) fn make_linear8_to_srgb8() -> Box<[u8]> {
    build_transfer_table::<u8, 8>(255., srgb_from_linear)
}

/// 8-bit non-linear sRGB to 8-bit linear RGB
pub(crate) fn make_srgb8_to_linear8() -> Box<[u8]> {
    build_transfer_table::<u8, 8>(255., srgb_to_linear)
}

/// 16-bit linear RGB to 8-bit non-linear sRGB
pub(crate) fn make_linear16_to_srgb8() -> Box<[u8]> {
    build_transfer_table::<u8, 16>(255., srgb_from_linear)
}

/// 8-bit non-linear sRGB to 16-bit linear RGB
pub(crate) fn make_srgb8_to_linear16() -> Box<[u16]> {
    build_transfer_table::<u16, 8>(65535., srgb_to_linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_curve_is_invertible() {
        for i in 0..=100 {
            let v = i as f64 / 100.;
            let rt = srgb_from_linear(srgb_to_linear(v));
            assert!((rt - v).abs() < 1e-6, "Invalid round trip {v} -> {rt}");
        }
    }

    #[test]
    fn srgb_curve_segments() {
        assert_eq!(srgb_from_linear(0.), 0.);
        assert!((srgb_from_linear(0.001) - 0.01292).abs() < 1e-9);
        assert!((srgb_from_linear(0.5) - 0.7353569830524495).abs() < 1e-6);
        assert!((srgb_to_linear(0.5) - 0.21404114048223255).abs() < 1e-6);
        assert_eq!(srgb_to_linear(1.5), 1.);
    }

    #[test]
    fn fixed_tables_have_expected_shape() {
        let l8 = make_linear8_to_srgb8();
        assert_eq!(l8.len(), 256);
        assert_eq!(l8[0], 0);
        assert_eq!(l8[255], 255);
        // linear 0.5 is about 0.735 in sRGB
        assert_eq!(l8[128], 188);

        let s8 = make_srgb8_to_linear8();
        assert_eq!(s8[0], 0);
        assert_eq!(s8[255], 255);
        assert_eq!(s8[188], 128);

        let l16 = make_linear16_to_srgb8();
        assert_eq!(l16.len(), 65536);
        assert_eq!(l16[65535], 255);
        assert!(l16.windows(2).all(|w| w[0] <= w[1]));

        let s16 = make_srgb8_to_linear16();
        assert_eq!(s16.len(), 256);
        assert_eq!(s16[0], 0);
        assert_eq!(s16[255], 65535);
        assert!(s16.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn power_law() {
        assert!((gamma_to_linear(0.5, 2.2) - 0.5f64.powf(2.2)).abs() < 1e-9);
        assert!((gamma_from_linear(gamma_to_linear(0.3, 1.8), 1.8) - 0.3).abs() < 1e-9);
    }
}
