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
use crate::luts::LutCache;
use crate::mask::{decompose_mask, max_sample, validate_disjoint};
use crate::model::ModelInfo;
use crate::raster::Raster;
use crate::sample_model::PackedSampleModel;
use crate::{ColorFamily, ModelError, TransferType};
use std::sync::Arc;

/// Components wider than this are not exactly representable by `f32` and must be clamped
pub(crate) const F32_EXACT_BITS: u32 = f32::MANTISSA_DIGITS - 1;

/// Mask layout shared by every packed color model.
///
/// Color components come first in color space order, alpha is last when present.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedColorModel {
    masks: Vec<u32>,
    offsets: Vec<u32>,
    scale_factors: Vec<f32>,
    bits: Vec<u32>,
}

#[inline]
fn quantize(value: f32, bits: u32, clamp: bool) -> u32 {
    let max = max_sample(bits);
    let v = (value * max as f32 + 0.5) as u32;
    if clamp { v.min(max as u32) } else { v }
}

impl PackedColorModel {
    pub(crate) fn new(
        pixel_bits: u32,
        color_masks: &[u32],
        alpha_mask: u32,
        bits: &[u32],
    ) -> Result<PackedColorModel, ModelError> {
        let mut masks = color_masks.to_vec();
        if alpha_mask != 0 {
            masks.push(alpha_mask);
        }
        validate_disjoint(&masks)?;

        let mut offsets = Vec::with_capacity(masks.len());
        let mut scale_factors = Vec::with_capacity(masks.len());
        for (index, (&mask, &bits)) in masks.iter().zip(bits.iter()).enumerate() {
            let layout = decompose_mask(mask, bits, pixel_bits).map_err(|e| match e {
                ModelError::MaskOverflow {
                    mask, pixel_bits, ..
                } => ModelError::MaskOverflow {
                    index,
                    mask,
                    pixel_bits,
                },
                e => e,
            })?;
            offsets.push(layout.offset);
            scale_factors.push(layout.scale);
        }

        Ok(PackedColorModel {
            masks,
            offsets,
            scale_factors,
            bits: bits.to_vec(),
        })
    }

    /// Mask of component `idx`, `None` when out of range
    pub fn mask(&self, idx: usize) -> Option<u32> {
        self.masks.get(idx).copied()
    }

    pub fn masks(&self) -> &[u32] {
        &self.masks
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Multipliers bringing every component into 0..=255
    pub fn scale_factors(&self) -> &[f32] {
        &self.scale_factors
    }

    #[inline(always)]
    pub(crate) fn raw(&self, pixel: u32, idx: usize) -> u32 {
        (pixel & self.masks[idx]) >> self.offsets[idx]
    }

    #[inline(always)]
    pub(crate) fn place(&self, idx: usize, value: u32) -> u32 {
        (value << self.offsets[idx]) & self.masks[idx]
    }

    #[inline(always)]
    pub(crate) fn bits(&self, idx: usize) -> u32 {
        self.bits[idx]
    }

    pub(crate) fn components_into(
        &self,
        pixel: u32,
        components: &mut [u32],
        offset: usize,
    ) -> Result<(), ModelError> {
        let count = self.masks.len();
        let available = components.len().saturating_sub(offset);
        if available < count {
            return Err(ModelError::OutOfBounds {
                required: count,
                available,
            });
        }
        for (idx, dst) in components[offset..offset + count].iter_mut().enumerate() {
            *dst = self.raw(pixel, idx);
        }
        Ok(())
    }

    /// Packs components, bits outside of each mask are dropped
    pub(crate) fn pack(&self, components: &[u32], offset: usize) -> Result<u32, ModelError> {
        let count = self.masks.len();
        let available = components.len().saturating_sub(offset);
        if available < count {
            return Err(ModelError::OutOfBounds {
                required: count,
                available,
            });
        }
        Ok(components[offset..offset + count]
            .iter()
            .enumerate()
            .fold(0u32, |pixel, (idx, &c)| pixel | self.place(idx, c)))
    }

    /// Extracts component `idx` rescaled to `precision` bits.
    ///
    /// Premultiplied color is divided by alpha first, fully transparent color becomes 0.
    pub(crate) fn unpremultiplied_sample(
        &self,
        info: &ModelInfo,
        pixel: u32,
        idx: usize,
        precision: u32,
    ) -> u32 {
        let c = self.raw(pixel, idx);
        let max = max_sample(precision) as u32;
        if info.premultiplied {
            let alpha_idx = info.num_color_components;
            let a = self.raw(pixel, alpha_idx);
            if a == 0 {
                return 0;
            }
            let factor = max as f32;
            let v = c as f32 * self.scale_factors[idx] * factor
                / (a as f32 * self.scale_factors[alpha_idx]);
            ((v + 0.5) as u32).min(max)
        } else if self.bits[idx] != precision {
            let scale = if precision == 16 {
                self.scale_factors[idx] * 257.0
            } else {
                self.scale_factors[idx] * (max as f32 / 255.0)
            };
            ((c as f32 * scale + 0.5) as u32).min(max)
        } else {
            c
        }
    }

    /// Alpha in 0..=255, 255 without alpha
    pub(crate) fn alpha(&self, info: &ModelInfo, pixel: u32) -> u32 {
        if !info.has_alpha {
            return 255;
        }
        let idx = info.num_color_components;
        let a = self.raw(pixel, idx);
        if self.scale_factors[idx] == 1.0 {
            a
        } else {
            (a as f32 * self.scale_factors[idx] + 0.5) as u32
        }
    }

    /// Rescales 8-bit alpha to the alpha component width
    pub(crate) fn alpha_from_8bit(&self, info: &ModelInfo, alpha: u32) -> u32 {
        let idx = info.num_color_components;
        let bits = self.bits[idx];
        if bits == 8 {
            alpha
        } else {
            quantize(alpha as f32 / 255.0, bits, true)
        }
    }

    /// Packs color components in 0..=1 and 8-bit alpha taken from `argb`.
    ///
    /// Premultiplied models scale color by alpha first.
    pub(crate) fn pack_unit_color(&self, info: &ModelInfo, color: &mut [f32], argb: u32) -> u32 {
        let mut pixel = 0;
        if info.has_alpha {
            let alpha = argb >> 24;
            if info.premultiplied {
                let factor = alpha as f32 / 255.0;
                color.iter_mut().for_each(|c| *c *= factor);
            }
            pixel |= self.place(
                info.num_color_components,
                self.alpha_from_8bit(info, alpha),
            );
        }
        let clamp = info.max_bits > F32_EXACT_BITS;
        for (idx, &c) in color.iter().enumerate() {
            pixel |= self.place(idx, quantize(c.max(0.), self.bits[idx], clamp));
        }
        pixel
    }

    /// Color components in the color space range
    fn space_components(&self, info: &ModelInfo, pixel: u32) -> Vec<f32> {
        let space = &info.color_space;
        let alpha_idx = info.num_color_components;
        let alpha = if info.premultiplied {
            self.raw(pixel, alpha_idx) as f32 / max_sample(self.bits[alpha_idx]) as f32
        } else {
            1.
        };
        (0..info.num_color_components)
            .map(|idx| {
                let max_value = max_sample(self.bits[idx]) as f32;
                let unit = if alpha == 0. || max_value == 0. {
                    0.
                } else {
                    self.raw(pixel, idx) as f32 / (alpha * max_value)
                };
                let (min, max) = (space.min_value(idx), space.max_value(idx));
                unit * (max - min) + min
            })
            .collect()
    }

    /// sRGB components in 0..=255 through the color space converter
    pub(crate) fn general_rgb(&self, info: &ModelInfo, pixel: u32) -> [u32; 3] {
        let components = self.space_components(info, pixel);
        let rgb = info.color_space.to_rgb(&components);
        rgb.map(|v| ((v * 255.0 + 0.5).max(0.) as u32).min(255))
    }

    /// Packs a default ARGB color through the color space converter
    pub(crate) fn general_pixel_from_rgb(&self, info: &ModelInfo, argb: u32) -> u32 {
        let space = &info.color_space;
        let rgb = [
            ((argb >> 16) & 0xff) as f32 / 255.0,
            ((argb >> 8) & 0xff) as f32 / 255.0,
            (argb & 0xff) as f32 / 255.0,
        ];
        let mut color = vec![0f32; info.num_color_components];
        space.from_rgb(rgb, &mut color);
        for (idx, c) in color.iter_mut().enumerate() {
            let (min, max) = (space.min_value(idx), space.max_value(idx));
            *c = ((*c - min) / (max - min)).clamp(0., 1.);
        }
        self.pack_unit_color(info, &mut color, argb)
    }

    pub(crate) fn coerce_raster(
        &self,
        info: &ModelInfo,
        raster: &Raster,
        premultiplied: bool,
    ) -> Result<(), ModelError> {
        let num_components = info.num_components;
        if raster.num_bands() < num_components {
            return Err(ModelError::BandOutOfBounds(num_components - 1));
        }
        let alpha_idx = info.num_color_components;
        let alpha_max = max_sample(self.bits[alpha_idx]) as f32;
        let bands = raster.num_bands();
        let (x0, y0, width, height) = raster.bounds();
        let mut samples = vec![0u32; width as usize * height as usize * bands];
        raster.pixels(x0, y0, width, height, &mut samples)?;

        for pixel in samples.chunks_exact_mut(bands) {
            let normalized_alpha = pixel[alpha_idx] as f32 / alpha_max;
            if premultiplied {
                if normalized_alpha != 0. {
                    for c in pixel[..alpha_idx].iter_mut() {
                        *c = (*c as f32 * normalized_alpha + 0.5) as u32;
                    }
                } else {
                    pixel.fill(0);
                }
            } else if normalized_alpha != 0. {
                let inverse = 1.0 / normalized_alpha;
                for (idx, c) in pixel[..alpha_idx].iter_mut().enumerate() {
                    let max = max_sample(self.bits[idx]) as u32;
                    *c = ((*c as f32 * inverse + 0.5) as u32).min(max);
                }
            }
        }
        raster.set_pixels(x0, y0, width, height, &samples)?;
        log::trace!(
            "Coerced {}x{} raster to premultiplied={}",
            raster.width(),
            raster.height(),
            premultiplied
        );
        Ok(())
    }

    pub(crate) fn is_compatible_sample_model(
        &self,
        info: &ModelInfo,
        sample_model: &PackedSampleModel,
    ) -> bool {
        sample_model.num_bands() == info.num_components
            && sample_model.bit_masks() == self.masks.as_slice()
            && sample_model.data_type() == info.transfer_type
    }

    pub(crate) fn create_compatible_raster(
        &self,
        info: &ModelInfo,
        width: i32,
        height: i32,
    ) -> Result<Raster, ModelError> {
        if width <= 0 || height <= 0 {
            return Err(ModelError::InvalidDimensions { width, height });
        }
        let data_type = if info.pixel_bits > 16 {
            TransferType::Int
        } else if info.pixel_bits > 8 {
            TransferType::UShort
        } else {
            TransferType::Byte
        };
        Raster::new_packed(data_type, width, height, &self.masks, None)
    }
}

/// How non-RGB packed models reach sRGB
#[derive(Debug, Clone)]
pub(crate) enum PackedColorimetry {
    Gray(GrayLuts),
    General,
}

#[derive(Debug, Clone)]
pub(crate) struct GrayLuts {
    /// 8 or 16, the index width of `to_srgb`
    precision: u32,
    to_srgb: Arc<[u8]>,
    srgb_to_linear16: Arc<[u16]>,
    from_linear: LinearToGray,
}

#[derive(Debug, Clone)]
enum LinearToGray {
    Eight(Arc<[u8]>),
    Sixteen(Arc<[u16]>),
}

impl PackedColorimetry {
    pub(crate) fn new(info: &ModelInfo) -> Result<PackedColorimetry, ModelError> {
        let space = &info.color_space;
        match space.family() {
            ColorFamily::Gray => {
                let cache = LutCache::global();
                let gray_bits = info
                    .n_bits
                    .as_ref()
                    .and_then(|bits| bits.first().copied())
                    .unwrap_or(8);
                let (precision, to_srgb, from_linear) = if gray_bits <= 8 {
                    (
                        8,
                        cache.gray8_to_srgb8(space)?,
                        LinearToGray::Eight(cache.linear_gray16_to_gray8(space)?),
                    )
                } else {
                    (
                        16,
                        cache.gray16_to_srgb8(space)?,
                        LinearToGray::Sixteen(cache.linear_gray16_to_gray16(space)?),
                    )
                };
                log::trace!("Packed gray model uses {precision}-bit lookup tables");
                Ok(PackedColorimetry::Gray(GrayLuts {
                    precision,
                    to_srgb,
                    srgb_to_linear16: cache.srgb8_to_linear16(),
                    from_linear,
                }))
            }
            _ => {
                for idx in 0..space.num_components() {
                    if space.max_value(idx) <= space.min_value(idx) {
                        return Err(ModelError::InvalidComponentRange(idx));
                    }
                }
                log::trace!(
                    "Packed model over {:?} goes through the color space converter",
                    space
                );
                Ok(PackedColorimetry::General)
            }
        }
    }

    /// sRGB component `channel` in 0..=255
    pub(crate) fn rgb_component(
        &self,
        packed: &PackedColorModel,
        info: &ModelInfo,
        pixel: u32,
        channel: usize,
    ) -> u32 {
        match self {
            PackedColorimetry::Gray(luts) => {
                let idx = packed.unpremultiplied_sample(info, pixel, 0, luts.precision);
                luts.to_srgb[idx as usize] as u32
            }
            PackedColorimetry::General => packed.general_rgb(info, pixel)[channel],
        }
    }

    pub(crate) fn rgb(&self, packed: &PackedColorModel, info: &ModelInfo, pixel: u32) -> u32 {
        let [r, g, b] = match self {
            PackedColorimetry::Gray(_) => {
                let v = self.rgb_component(packed, info, pixel, 0);
                [v, v, v]
            }
            PackedColorimetry::General => packed.general_rgb(info, pixel),
        };
        (packed.alpha(info, pixel) << 24) | (r << 16) | (g << 8) | b
    }

    pub(crate) fn pixel_from_rgb(
        &self,
        packed: &PackedColorModel,
        info: &ModelInfo,
        argb: u32,
    ) -> u32 {
        match self {
            PackedColorimetry::Gray(luts) => {
                let lin = |c: u32| luts.srgb_to_linear16[(c & 0xff) as usize] as f32;
                let y = 0.2125 * lin(argb >> 16) + 0.7154 * lin(argb >> 8) + 0.0721 * lin(argb);
                let idx = ((y + 0.5) as usize).min(65535);
                let gray = match &luts.from_linear {
                    LinearToGray::Eight(table) => table[idx] as f32 / 255.0,
                    LinearToGray::Sixteen(table) => table[idx] as f32 / 65535.0,
                };
                packed.pack_unit_color(info, &mut [gray], argb)
            }
            PackedColorimetry::General => packed.general_pixel_from_rgb(info, argb),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ColorConverter, ColorFamily, ColorModel, ColorSpace, DataElements, ErrorKind, ModelError,
        PackedOptions, RgbConverter, RgbMasks, TransferType, Transparency, Xyz,
    };

    fn packed_in(
        pixel_bits: u32,
        color_masks: &[u32],
        alpha_mask: u32,
        color_space: ColorSpace,
    ) -> Result<ColorModel, ModelError> {
        ColorModel::new_packed(
            pixel_bits,
            color_masks,
            alpha_mask,
            PackedOptions {
                color_space,
                ..Default::default()
            },
        )
    }

    /// Subtractive cyan, magenta, yellow over sRGB
    #[derive(Debug)]
    struct Cmy(RgbConverter);

    impl ColorConverter for Cmy {
        fn family(&self) -> ColorFamily {
            ColorFamily::Other(3)
        }

        fn to_xyz(&self, src: &[f32]) -> Xyz {
            self.0.to_xyz(&[1. - src[0], 1. - src[1], 1. - src[2]])
        }

        fn from_xyz(&self, xyz: Xyz, dst: &mut [f32]) {
            self.0.from_xyz(xyz, dst);
            dst.iter_mut().for_each(|v| *v = 1. - *v);
        }
    }

    #[test]
    fn construction_is_validated() {
        let srgb = ColorSpace::srgb;
        let cases = [
            (
                packed_in(16, &[0xff00, 0x0ff0, 0x000f], 0, srgb()),
                ModelError::OverlappingMasks {
                    first: 0,
                    second: 1,
                },
            ),
            (
                packed_in(8, &[0b1011, 0x30, 0xc0], 0, srgb()),
                ModelError::NonContiguousMask {
                    index: 0,
                    mask: 0b1011,
                },
            ),
            (
                packed_in(16, &[0xf800, 0x07e0, 0x001f], 0x30000, srgb()),
                ModelError::MaskOverflow {
                    index: 3,
                    mask: 0x30000,
                    pixel_bits: 16,
                },
            ),
            (
                packed_in(0, &[0, 0, 1], 0, srgb()),
                ModelError::InvalidPixelBits(0),
            ),
            (
                packed_in(33, &[0, 0, 1], 0, srgb()),
                ModelError::InvalidPixelBits(33),
            ),
            (
                packed_in(8, &[0, 0, 0], 0, srgb()),
                ModelError::AllComponentsZeroBits,
            ),
            (
                packed_in(8, &[0xff], 0, srgb()),
                ModelError::BitsArrayTooShort {
                    expected: 3,
                    found: 1,
                },
            ),
        ];
        for (result, expected) in cases {
            let err = result.unwrap_err();
            assert_eq!(err, expected);
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }

        for transfer_type in [TransferType::Float, TransferType::Byte] {
            let err = ColorModel::new_direct_with_options(
                16,
                RgbMasks::RGB_565,
                PackedOptions {
                    transfer_type: Some(transfer_type),
                    ..Default::default()
                },
            )
            .unwrap_err();
            assert_eq!(err, ModelError::InvalidTransferType(transfer_type));
        }
    }

    #[test]
    fn explicit_transfer_type_is_kept() {
        let model = ColorModel::new_direct_with_options(
            16,
            RgbMasks::RGB_565,
            PackedOptions {
                transfer_type: Some(TransferType::Int),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(model.transfer_type(), TransferType::Int);
        assert_eq!(
            model.data_elements_from_rgb(0xffffffff, None).unwrap(),
            DataElements::Int(vec![0xffff])
        );
    }

    #[test]
    fn one_bit_alpha_is_bitmask() {
        let model =
            ColorModel::new_direct(16, RgbMasks::new(0x7c00, 0x03e0, 0x001f, 0x8000)).unwrap();
        assert_eq!(model.transparency(), Transparency::Bitmask);
        assert_eq!(model.alpha(0x8000), 255);
        assert_eq!(model.alpha(0x7fff), 0);
    }

    #[test]
    fn scale_factors_and_zero_width() {
        let model = ColorModel::new_direct(16, RgbMasks::RGB_565).unwrap();
        let packed = model.packed().unwrap();
        assert_eq!(packed.offsets(), &[11, 5, 0]);
        let expected = [255. / 31., 255. / 63., 255. / 31.];
        for (&scale, &expected) in packed.scale_factors().iter().zip(expected.iter()) {
            assert!((scale - expected).abs() < 1e-5);
        }

        let model = ColorModel::new_direct(16, RgbMasks::new(0, 0xff00, 0x00ff, 0)).unwrap();
        assert_eq!(model.packed().unwrap().scale_factors()[0], 256.0);
        assert_eq!(model.component_size(0).unwrap(), 0);
        assert_eq!(model.red(0xffff), 0);
        assert_eq!(model.rgb(0xffff), 0xff00ffff);
    }

    #[test]
    fn linear_gray_reads_through_srgb_curve() {
        let model = packed_in(8, &[0xff], 0, ColorSpace::linear_gray()).unwrap();
        assert!(model.direct().is_none());
        assert_eq!(model.num_components(), 1);
        assert_eq!(model.red(128), 188);
        assert_eq!(model.green(128), 188);
        assert_eq!(model.blue(128), 188);
        assert_eq!(model.rgb(0), 0xff000000);
        assert_eq!(model.rgb(255), 0xffffffff);
    }

    #[test]
    fn gray_from_argb() {
        let model = packed_in(8, &[0xff], 0, ColorSpace::linear_gray()).unwrap();
        assert_eq!(
            model.data_elements_from_rgb(0xffffffff, None).unwrap(),
            DataElements::Byte(vec![255])
        );
        assert_eq!(
            model.data_elements_from_rgb(0xff000000, None).unwrap(),
            DataElements::Byte(vec![0])
        );
        let mid = model.data_elements_from_rgb(0xffbcbcbc, None).unwrap();
        let gray = model.components_of(&mid).unwrap()[0];
        assert!(gray.abs_diff(128) <= 1, "{gray}");
    }

    #[test]
    fn device_gray_with_alpha() {
        let model = packed_in(32, &[0x0000ffff], 0xffff0000, ColorSpace::gray_with_gamma(2.2))
            .unwrap();
        assert_eq!(model.transfer_type(), TransferType::Int);
        assert_eq!(model.num_components(), 2);
        assert_eq!(model.rgb(0), 0);
        let white = model.rgb(0xffffffff);
        assert_eq!(white >> 24, 255);
        assert!((white & 0xff) >= 254, "{white:#x}");
        let elements = model.data_elements_from_rgb(0x80ffffff, None).unwrap();
        let components = model.components_of(&elements).unwrap();
        assert!(components[0] >= 65534, "{components:?}");
        assert_eq!(components[1], 0x8080);
    }

    #[test]
    fn premultiplied_gray_zero_alpha() {
        let model = ColorModel::new_packed(
            16,
            &[0x00ff],
            0xff00,
            PackedOptions {
                color_space: ColorSpace::linear_gray(),
                premultiplied: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(model.red(0x00ff), 0);
        assert_eq!(model.rgb(0x00ff), 0);
        assert_eq!(model.red(0xffff), 255);
        assert_eq!(
            model.data_elements_from_rgb(0x00ffffff, None).unwrap(),
            DataElements::UShort(vec![0])
        );
    }

    #[test]
    fn other_family_uses_converter() {
        let space = ColorSpace::new(Cmy(RgbConverter::srgb()));
        let model = packed_in(24, &[0xff0000, 0x00ff00, 0x0000ff], 0, space).unwrap();
        assert!(model.direct().is_none());
        let rgb = model.rgb(0xff0000);
        assert!(((rgb >> 16) & 0xff) <= 1, "{rgb:#x}");
        assert!(((rgb >> 8) & 0xff) >= 254, "{rgb:#x}");
        let elements = model.data_elements_from_rgb(0xff00ffff, None).unwrap();
        let cmy = model.components_of(&elements).unwrap();
        assert!(cmy[0] >= 254 && cmy[1] <= 1 && cmy[2] <= 1, "{cmy:?}");
    }
}
