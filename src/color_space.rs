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
use crate::gamma::{gamma_from_linear, gamma_to_linear, srgb_from_linear, srgb_to_linear};
use crate::matrix::{DISPLAY_P3_TO_XYZ_D65, Matrix3f, SRGB_TO_XYZ_D65, Xyz};
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// XYZ (D65) to linear sRGB
const XYZ_TO_SRGB_D65: Matrix3f = Matrix3f {
    v: [
        [3.2404542, -1.5371385, -0.4985314],
        [-0.9692660, 1.8760108, 0.0415560],
        [0.0556434, -0.2040259, 1.0572252],
    ],
};

/// Family of a color space, decides how many color components a model carries
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ColorFamily {
    Rgb,
    Gray,
    /// Any other space with the given number of components
    Other(usize),
}

impl ColorFamily {
    pub const fn num_components(self) -> usize {
        match self {
            ColorFamily::Rgb => 3,
            ColorFamily::Gray => 1,
            ColorFamily::Other(n) => n,
        }
    }
}

/// Color space converter service.
///
/// Normalized components are within `min_value..=max_value` of each component.
/// Standard RGB values are non-linear sRGB in 0..=1.
/// The connection space between two converters is CIE XYZ with D65 white point.
pub trait ColorConverter: Send + Sync + Debug {
    fn family(&self) -> ColorFamily;

    fn num_components(&self) -> usize {
        self.family().num_components()
    }

    fn min_value(&self, _component: usize) -> f32 {
        0.
    }

    fn max_value(&self, _component: usize) -> f32 {
        1.
    }

    fn to_xyz(&self, src: &[f32]) -> Xyz;

    fn from_xyz(&self, xyz: Xyz, dst: &mut [f32]);

    /// Converts normalized components into sRGB
    fn to_rgb(&self, src: &[f32]) -> [f32; 3] {
        let linear = self.to_xyz(src).to_linear_rgb(&XYZ_TO_SRGB_D65);
        linear.map(|v| srgb_from_linear(v as f64) as f32)
    }

    /// Converts sRGB into normalized components
    fn from_rgb(&self, rgb: [f32; 3], dst: &mut [f32]) {
        let linear = rgb.map(|v| srgb_to_linear(v as f64) as f32);
        self.from_xyz(Xyz::from_linear_rgb(linear, &SRGB_TO_XYZ_D65), dst);
    }
}

/// Tone response of a matrix/TRC space
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TransferCurve {
    Linear,
    Srgb,
    Gamma(f32),
}

impl TransferCurve {
    #[inline]
    pub fn to_linear(self, v: f32) -> f32 {
        match self {
            TransferCurve::Linear => v.max(0.).min(1.),
            TransferCurve::Srgb => srgb_to_linear(v as f64) as f32,
            TransferCurve::Gamma(gamma) => gamma_to_linear(v as f64, gamma as f64) as f32,
        }
    }

    #[inline]
    pub fn from_linear(self, v: f32) -> f32 {
        match self {
            TransferCurve::Linear => v.max(0.).min(1.),
            TransferCurve::Srgb => srgb_from_linear(v as f64) as f32,
            TransferCurve::Gamma(gamma) => gamma_from_linear(v as f64, gamma as f64) as f32,
        }
    }
}

/// RGB space described by its primaries matrix and a tone curve
#[derive(Debug, Clone)]
pub struct RgbConverter {
    to_xyz: Matrix3f,
    from_xyz: Matrix3f,
    curve: TransferCurve,
}

impl RgbConverter {
    /// Returns `None` when the matrix is singular
    pub fn new(rgb_to_xyz: Matrix3f, curve: TransferCurve) -> Option<RgbConverter> {
        Some(RgbConverter {
            to_xyz: rgb_to_xyz,
            from_xyz: rgb_to_xyz.inverse()?,
            curve,
        })
    }

    pub fn srgb() -> RgbConverter {
        RgbConverter {
            to_xyz: SRGB_TO_XYZ_D65,
            from_xyz: XYZ_TO_SRGB_D65,
            curve: TransferCurve::Srgb,
        }
    }

    pub fn linear_srgb() -> RgbConverter {
        RgbConverter {
            curve: TransferCurve::Linear,
            ..RgbConverter::srgb()
        }
    }

    pub fn display_p3() -> RgbConverter {
        RgbConverter {
            to_xyz: DISPLAY_P3_TO_XYZ_D65,
            from_xyz: DISPLAY_P3_TO_XYZ_D65
                .inverse()
                .unwrap_or(Matrix3f::IDENTITY),
            curve: TransferCurve::Srgb,
        }
    }
}

impl ColorConverter for RgbConverter {
    fn family(&self) -> ColorFamily {
        ColorFamily::Rgb
    }

    fn to_xyz(&self, src: &[f32]) -> Xyz {
        let linear = [
            self.curve.to_linear(src[0]),
            self.curve.to_linear(src[1]),
            self.curve.to_linear(src[2]),
        ];
        Xyz::from_linear_rgb(linear, &self.to_xyz)
    }

    fn from_xyz(&self, xyz: Xyz, dst: &mut [f32]) {
        let linear = xyz.to_linear_rgb(&self.from_xyz);
        for (dst, linear) in dst.iter_mut().zip(linear) {
            *dst = self.curve.from_linear(linear);
        }
    }
}

/// Single channel space, gray maps onto the D65 white point
#[derive(Debug, Clone)]
pub struct GrayConverter {
    curve: TransferCurve,
}

impl GrayConverter {
    pub fn new(curve: TransferCurve) -> GrayConverter {
        GrayConverter { curve }
    }
}

impl ColorConverter for GrayConverter {
    fn family(&self) -> ColorFamily {
        ColorFamily::Gray
    }

    fn to_xyz(&self, src: &[f32]) -> Xyz {
        Xyz::D65 * self.curve.to_linear(src[0])
    }

    fn from_xyz(&self, xyz: Xyz, dst: &mut [f32]) {
        dst[0] = self.curve.from_linear(xyz.y);
    }
}

static NEXT_SPACE_ID: AtomicU64 = AtomicU64::new(1);

/// Shared handle to a color space converter.
///
/// Identity is decided by a process unique id assigned at creation,
/// clones of a handle are the same color space.
#[derive(Clone)]
pub struct ColorSpace {
    id: u64,
    converter: Arc<dyn ColorConverter>,
}

impl ColorSpace {
    pub fn new(converter: impl ColorConverter + 'static) -> ColorSpace {
        ColorSpace::from_arc(Arc::new(converter))
    }

    pub fn from_arc(converter: Arc<dyn ColorConverter>) -> ColorSpace {
        ColorSpace {
            id: NEXT_SPACE_ID.fetch_add(1, Ordering::Relaxed),
            converter,
        }
    }

    /// Canonical sRGB space
    pub fn srgb() -> ColorSpace {
        static SRGB: OnceLock<ColorSpace> = OnceLock::new();
        SRGB.get_or_init(|| ColorSpace::new(RgbConverter::srgb()))
            .clone()
    }

    /// Canonical linear RGB space with sRGB primaries
    pub fn linear_rgb() -> ColorSpace {
        static LINEAR_RGB: OnceLock<ColorSpace> = OnceLock::new();
        LINEAR_RGB
            .get_or_init(|| ColorSpace::new(RgbConverter::linear_srgb()))
            .clone()
    }

    /// Canonical linear gray space
    pub fn linear_gray() -> ColorSpace {
        static LINEAR_GRAY: OnceLock<ColorSpace> = OnceLock::new();
        LINEAR_GRAY
            .get_or_init(|| ColorSpace::new(GrayConverter::new(TransferCurve::Linear)))
            .clone()
    }

    /// New device gray space, every call creates a distinct space
    pub fn gray_with_gamma(gamma: f32) -> ColorSpace {
        ColorSpace::new(GrayConverter::new(TransferCurve::Gamma(gamma)))
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_srgb(&self) -> bool {
        *self == ColorSpace::srgb()
    }

    pub fn is_linear_rgb(&self) -> bool {
        *self == ColorSpace::linear_rgb()
    }

    pub fn is_linear_gray(&self) -> bool {
        *self == ColorSpace::linear_gray()
    }

    pub fn converter(&self) -> &Arc<dyn ColorConverter> {
        &self.converter
    }

    #[inline]
    pub fn family(&self) -> ColorFamily {
        self.converter.family()
    }

    #[inline]
    pub fn num_components(&self) -> usize {
        self.converter.num_components()
    }

    pub fn min_value(&self, component: usize) -> f32 {
        self.converter.min_value(component)
    }

    pub fn max_value(&self, component: usize) -> f32 {
        self.converter.max_value(component)
    }

    pub fn to_rgb(&self, src: &[f32]) -> [f32; 3] {
        self.converter.to_rgb(src)
    }

    pub fn from_rgb(&self, rgb: [f32; 3], dst: &mut [f32]) {
        self.converter.from_rgb(rgb, dst)
    }

    pub fn to_xyz(&self, src: &[f32]) -> Xyz {
        self.converter.to_xyz(src)
    }

    pub fn from_xyz(&self, xyz: Xyz, dst: &mut [f32]) {
        self.converter.from_xyz(xyz, dst)
    }
}

impl PartialEq for ColorSpace {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ColorSpace {}

impl Hash for ColorSpace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for ColorSpace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorSpace")
            .field("id", &self.id)
            .field("family", &self.family())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_spaces_keep_identity() {
        assert_eq!(ColorSpace::srgb(), ColorSpace::srgb());
        assert!(ColorSpace::srgb().is_srgb());
        assert!(!ColorSpace::linear_rgb().is_srgb());
        assert!(ColorSpace::linear_rgb().is_linear_rgb());
        let other = ColorSpace::new(RgbConverter::srgb());
        assert_ne!(other, ColorSpace::srgb());
        assert_eq!(other.clone(), other);
        assert_ne!(ColorSpace::gray_with_gamma(2.2), ColorSpace::gray_with_gamma(2.2));
    }

    #[test]
    fn srgb_to_rgb_is_identity() {
        let space = ColorSpace::srgb();
        let rgb = space.to_rgb(&[0.25, 0.5, 0.75]);
        assert!((rgb[0] - 0.25).abs() < 1e-3, "{:?}", rgb);
        assert!((rgb[1] - 0.5).abs() < 1e-3, "{:?}", rgb);
        assert!((rgb[2] - 0.75).abs() < 1e-3, "{:?}", rgb);
    }

    #[test]
    fn linear_rgb_round_trip() {
        let space = ColorSpace::linear_rgb();
        let mut dst = [0f32; 3];
        space.from_rgb([0.2, 0.4, 0.6], &mut dst);
        let back = space.to_rgb(&dst);
        for (a, b) in back.iter().zip([0.2, 0.4, 0.6]) {
            assert!((a - b).abs() < 1e-3, "Invalid round trip {a} {b}");
        }
        // sRGB 0.5 is about 0.214 linear
        assert!((dst[1] - srgb_to_linear(0.4) as f32).abs() < 1e-3);
    }

    #[test]
    fn gray_maps_to_neutral_rgb() {
        let gray = ColorSpace::linear_gray();
        let rgb = gray.to_rgb(&[0.5]);
        let expected = srgb_from_linear(0.5) as f32;
        for c in rgb {
            assert!((c - expected).abs() < 2e-3, "{c} vs {expected}");
        }
        let mut back = [0f32];
        gray.from_rgb(rgb, &mut back);
        assert!((back[0] - 0.5).abs() < 2e-3);
    }

    #[test]
    fn p3_white_is_white() {
        let p3 = ColorSpace::new(RgbConverter::display_p3());
        let rgb = p3.to_rgb(&[1., 1., 1.]);
        for c in rgb {
            assert!((c - 1.).abs() < 2e-3, "{c}");
        }
    }
}
