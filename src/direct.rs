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
use crate::ModelError;
use crate::luts::LutCache;
use crate::mask::max_sample;
use crate::model::ModelInfo;
use crate::packed::{F32_EXACT_BITS, PackedColorModel};
use std::sync::Arc;

/// How a direct model reaches sRGB
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum RgbConversion {
    /// Samples are already sRGB and are only rescaled
    Srgb,
    /// Samples are linear RGB, looked up at 8 or 16 bit precision
    LinearRgb { precision: u32 },
    /// Color space converter is called per pixel
    General,
}

#[derive(Debug, Clone)]
enum FromSrgb {
    Eight(Arc<[u8]>),
    Sixteen(Arc<[u16]>),
}

#[derive(Debug, Clone)]
enum RgbPath {
    Srgb,
    LinearRgb {
        precision: u32,
        to_srgb: Arc<[u8]>,
        from_srgb: FromSrgb,
    },
    General,
}

/// Packed RGB model with one mask per red, green, blue and optional alpha
#[derive(Debug, Clone)]
pub struct DirectColorModel {
    packed: PackedColorModel,
    path: RgbPath,
}

impl DirectColorModel {
    pub(crate) fn new(
        info: &ModelInfo,
        packed: PackedColorModel,
    ) -> Result<DirectColorModel, ModelError> {
        let space = &info.color_space;
        let path = if space.is_linear_rgb() {
            let cache = LutCache::global();
            if info.max_bits <= 8 {
                RgbPath::LinearRgb {
                    precision: 8,
                    to_srgb: cache.linear8_to_srgb8(),
                    from_srgb: FromSrgb::Eight(cache.srgb8_to_linear8()),
                }
            } else {
                RgbPath::LinearRgb {
                    precision: 16,
                    to_srgb: cache.linear16_to_srgb8(),
                    from_srgb: FromSrgb::Sixteen(cache.srgb8_to_linear16()),
                }
            }
        } else if !space.is_srgb() {
            for idx in 0..3 {
                if space.min_value(idx) != 0.0 || space.max_value(idx) != 1.0 {
                    return Err(ModelError::InvalidComponentRange(idx));
                }
            }
            RgbPath::General
        } else {
            RgbPath::Srgb
        };
        log::trace!("Direct model selected {:?} conversion for {:?}", path_kind(&path), space);
        Ok(DirectColorModel { packed, path })
    }

    pub fn packed(&self) -> &PackedColorModel {
        &self.packed
    }

    pub fn conversion(&self) -> RgbConversion {
        path_kind(&self.path)
    }

    pub fn red_mask(&self) -> u32 {
        self.packed.masks()[0]
    }

    pub fn green_mask(&self) -> u32 {
        self.packed.masks()[1]
    }

    pub fn blue_mask(&self) -> u32 {
        self.packed.masks()[2]
    }

    /// Zero when the model has no alpha
    pub fn alpha_mask(&self) -> u32 {
        self.packed.mask(3).unwrap_or(0)
    }

    /// sRGB channel `idx` of `pixel` in 0..=255
    pub(crate) fn color(&self, info: &ModelInfo, pixel: u32, idx: usize) -> u32 {
        match &self.path {
            RgbPath::Srgb => self.packed.unpremultiplied_sample(info, pixel, idx, 8),
            RgbPath::LinearRgb {
                precision,
                to_srgb,
                ..
            } => {
                let linear = self
                    .packed
                    .unpremultiplied_sample(info, pixel, idx, *precision);
                to_srgb[linear as usize] as u32
            }
            RgbPath::General => self.packed.general_rgb(info, pixel)[idx],
        }
    }

    pub(crate) fn rgb(&self, info: &ModelInfo, pixel: u32) -> u32 {
        let [r, g, b] = match &self.path {
            RgbPath::General => self.packed.general_rgb(info, pixel),
            _ => [
                self.color(info, pixel, 0),
                self.color(info, pixel, 1),
                self.color(info, pixel, 2),
            ],
        };
        (self.packed.alpha(info, pixel) << 24) | (r << 16) | (g << 8) | b
    }

    /// Packs a default ARGB color into this layout.
    ///
    /// Wide components are clamped since `f32` cannot hold their maximum exactly.
    pub(crate) fn pixel_from_rgb(&self, info: &ModelInfo, argb: u32) -> u32 {
        let mut rgb = [(argb >> 16) & 0xff, (argb >> 8) & 0xff, argb & 0xff];
        let (precision, mut factor) = match &self.path {
            RgbPath::General => return self.packed.general_pixel_from_rgb(info, argb),
            RgbPath::Srgb => (8, 1.0f32 / 255.0),
            RgbPath::LinearRgb { from_srgb, .. } => match from_srgb {
                FromSrgb::Eight(table) => {
                    rgb = rgb.map(|c| table[c as usize] as u32);
                    (8, 1.0f32 / 255.0)
                }
                FromSrgb::Sixteen(table) => {
                    rgb = rgb.map(|c| table[c as usize] as u32);
                    (16, 1.0f32 / 65535.0)
                }
            },
        };

        let mut pixel = 0u32;
        let mut rescale_all = false;
        if info.has_alpha {
            let alpha = argb >> 24;
            if info.premultiplied {
                factor *= alpha as f32 / 255.0;
                rescale_all = true;
            }
            pixel |= self.packed.place(3, self.packed.alpha_from_8bit(info, alpha));
        }

        let clamp = info.max_bits > F32_EXACT_BITS;
        for (idx, &c) in rgb.iter().enumerate() {
            let bits = self.packed.bits(idx);
            let mut value = if rescale_all || bits != precision {
                let max = max_sample(bits) as f32;
                (c as f32 * factor * max + 0.5) as u32
            } else {
                c
            };
            if clamp {
                value = value.min(max_sample(bits) as u32);
            }
            pixel |= self.packed.place(idx, value);
        }
        pixel
    }
}

fn path_kind(path: &RgbPath) -> RgbConversion {
    match path {
        RgbPath::Srgb => RgbConversion::Srgb,
        RgbPath::LinearRgb { precision, .. } => RgbConversion::LinearRgb {
            precision: *precision,
        },
        RgbPath::General => RgbConversion::General,
    }
}
