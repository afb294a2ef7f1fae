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
use crate::direct::DirectColorModel;
use crate::mask::{bits_for_masks, max_sample};
use crate::packed::{PackedColorModel, PackedColorimetry};
use crate::raster::Raster;
use crate::sample_model::PackedSampleModel;
use crate::{ColorFamily, ColorSpace, DataElements, ModelError, TransferType, Transparency};
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// Scalar accessors supplied by a caller for models created from pixel bits only.
///
/// Every accessor returns non-premultiplied value in 0..=255.
pub trait PixelComponents: Send + Sync + Debug {
    fn red(&self, pixel: u32) -> u32;
    fn green(&self, pixel: u32) -> u32;
    fn blue(&self, pixel: u32) -> u32;
    fn alpha(&self, pixel: u32) -> u32;
}

/// Declares options of packed color models
#[derive(Debug, Clone, PartialEq)]
pub struct PackedOptions {
    pub color_space: ColorSpace,
    /// Color samples are stored already multiplied by alpha
    pub premultiplied: bool,
    /// Defaults to the smallest integral type holding pixel bits
    pub transfer_type: Option<TransferType>,
}

impl Default for PackedOptions {
    fn default() -> Self {
        Self {
            color_space: ColorSpace::srgb(),
            premultiplied: false,
            transfer_type: None,
        }
    }
}

/// Red, green, blue and alpha masks of a direct color model, alpha may be zero
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct RgbMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
}

impl RgbMasks {
    /// 32-bit packed ARGB
    pub const ARGB: RgbMasks = RgbMasks::new(0x00ff0000, 0x0000ff00, 0x000000ff, 0xff000000);
    /// 24-bit packed RGB
    pub const RGB: RgbMasks = RgbMasks::new(0x00ff0000, 0x0000ff00, 0x000000ff, 0);
    /// 16-bit 5-6-5 RGB
    pub const RGB_565: RgbMasks = RgbMasks::new(0xf800, 0x07e0, 0x001f, 0);

    pub const fn new(red: u32, green: u32, blue: u32, alpha: u32) -> RgbMasks {
        RgbMasks {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// Attributes every color model carries
#[derive(Debug, Clone)]
pub(crate) struct ModelInfo {
    pub(crate) pixel_bits: u32,
    pub(crate) n_bits: Option<Vec<u32>>,
    pub(crate) transparency: Transparency,
    pub(crate) has_alpha: bool,
    pub(crate) premultiplied: bool,
    pub(crate) num_components: usize,
    pub(crate) num_color_components: usize,
    pub(crate) color_space: ColorSpace,
    pub(crate) transfer_type: TransferType,
    pub(crate) max_bits: u32,
}

impl ModelInfo {
    pub(crate) fn new(
        pixel_bits: u32,
        bits: &[u32],
        color_space: ColorSpace,
        has_alpha: bool,
        premultiplied: bool,
        transparency: Transparency,
        transfer_type: TransferType,
    ) -> Result<ModelInfo, ModelError> {
        let num_color_components = color_space.num_components();
        let num_components = num_color_components + has_alpha as usize;
        if bits.len() < num_components {
            return Err(ModelError::BitsArrayTooShort {
                expected: num_components,
                found: bits.len(),
            });
        }
        if pixel_bits == 0 {
            return Err(ModelError::InvalidPixelBits(pixel_bits));
        }
        let max_bits = bits.iter().copied().max().unwrap_or(0);
        if max_bits == 0 {
            return Err(ModelError::AllComponentsZeroBits);
        }
        let (premultiplied, transparency) = if has_alpha {
            (premultiplied, transparency)
        } else {
            (false, Transparency::Opaque)
        };
        Ok(ModelInfo {
            pixel_bits,
            n_bits: Some(bits.to_vec()),
            transparency,
            has_alpha,
            premultiplied,
            num_components,
            num_color_components,
            color_space,
            transfer_type,
            max_bits,
        })
    }

    /// Largest value of component `idx`, the model must have component bits
    #[inline]
    pub(crate) fn max_value(&self, idx: usize) -> f32 {
        self.n_bits
            .as_ref()
            .map(|bits| max_sample(bits[idx]) as f32)
            .unwrap_or(255.)
    }

    fn n_bits_or_unsupported(&self, op: &'static str) -> Result<&[u32], ModelError> {
        self.n_bits
            .as_deref()
            .ok_or(ModelError::UnsupportedOperation(op))
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ModelKind {
    Direct(DirectColorModel),
    Packed(PackedColorModel, PackedColorimetry),
    Custom(Arc<dyn PixelComponents>),
}

/// Translates pixel values into color and alpha components and back.
///
/// A pixel is either a single packed integer or a [DataElements] array of the model transfer type.
/// Scalar accessors always return non-premultiplied components in 0..=255.
#[derive(Debug, Clone)]
pub struct ColorModel {
    pub(crate) info: ModelInfo,
    pub(crate) kind: ModelKind,
}

#[inline]
fn check_len(len: usize, offset: usize, required: usize) -> Result<(), ModelError> {
    let available = len.saturating_sub(offset);
    if available < required {
        return Err(ModelError::OutOfBounds {
            required,
            available,
        });
    }
    Ok(())
}

/// Zero width components normalize to 0
#[inline]
fn unit_interval(value: u32, max_value: f32) -> f32 {
    if max_value == 0. {
        0.
    } else {
        value as f32 / max_value
    }
}

impl ColorModel {
    /// Canonical 32-bit ARGB model in sRGB.
    ///
    /// Masks are 0xFF0000, 0xFF00, 0xFF and 0xFF000000, not premultiplied, transfer type Int.
    pub fn rgb_default() -> &'static ColorModel {
        static RGB_DEFAULT: OnceLock<ColorModel> = OnceLock::new();
        RGB_DEFAULT.get_or_init(|| {
            ColorModel::new_direct(32, RgbMasks::ARGB)
                .unwrap_or_else(|e| unreachable!("Canonical ARGB model must be valid: {e}"))
        })
    }

    /// Model that knows only its pixel width.
    ///
    /// Component bit depths are unknown, so array and normalization operations are not supported.
    pub fn with_pixel_bits(
        pixel_bits: u32,
        components: Arc<dyn PixelComponents>,
    ) -> Result<ColorModel, ModelError> {
        if pixel_bits < 1 {
            return Err(ModelError::InvalidPixelBits(pixel_bits));
        }
        Ok(ColorModel {
            info: ModelInfo {
                pixel_bits,
                n_bits: None,
                transparency: Transparency::Translucent,
                has_alpha: true,
                premultiplied: false,
                num_components: 4,
                num_color_components: 3,
                color_space: ColorSpace::srgb(),
                transfer_type: TransferType::for_pixel_bits(pixel_bits),
                max_bits: pixel_bits,
            },
            kind: ModelKind::Custom(components),
        })
    }

    /// Direct model in sRGB, not premultiplied, with default transfer type
    pub fn new_direct(pixel_bits: u32, masks: RgbMasks) -> Result<ColorModel, ModelError> {
        ColorModel::new_direct_with_options(pixel_bits, masks, PackedOptions::default())
    }

    pub fn new_direct_with_options(
        pixel_bits: u32,
        masks: RgbMasks,
        options: PackedOptions,
    ) -> Result<ColorModel, ModelError> {
        if options.color_space.family() != ColorFamily::Rgb {
            return Err(ModelError::ColorFamilyMismatch);
        }
        ColorModel::new_packed(
            pixel_bits,
            &[masks.red, masks.green, masks.blue],
            masks.alpha,
            options,
        )
    }

    /// Packed model over any color space.
    ///
    /// RGB spaces produce a direct model, other families use gray lookup tables
    /// or the color space converter.
    pub fn new_packed(
        pixel_bits: u32,
        color_masks: &[u32],
        alpha_mask: u32,
        options: PackedOptions,
    ) -> Result<ColorModel, ModelError> {
        if !(1..=32).contains(&pixel_bits) {
            return Err(ModelError::InvalidPixelBits(pixel_bits));
        }
        let color_space = options.color_space;
        if color_masks.len() != color_space.num_components() {
            return Err(ModelError::BitsArrayTooShort {
                expected: color_space.num_components(),
                found: color_masks.len(),
            });
        }
        let transfer_type = options
            .transfer_type
            .unwrap_or(TransferType::for_pixel_bits(pixel_bits));
        if !transfer_type.is_packed_storage() || transfer_type.bits() < pixel_bits {
            return Err(ModelError::InvalidTransferType(transfer_type));
        }
        let bits = bits_for_masks(color_masks, alpha_mask)?;
        let has_alpha = alpha_mask != 0;
        let transparency = if has_alpha && bits[bits.len() - 1] == 1 {
            Transparency::Bitmask
        } else {
            Transparency::Translucent
        };
        let family = color_space.family();
        let info = ModelInfo::new(
            pixel_bits,
            &bits,
            color_space,
            has_alpha,
            options.premultiplied,
            transparency,
            transfer_type,
        )?;
        let packed = PackedColorModel::new(pixel_bits, color_masks, alpha_mask, &bits)?;
        let kind = match family {
            ColorFamily::Rgb => ModelKind::Direct(DirectColorModel::new(&info, packed)?),
            _ => {
                let colorimetry = PackedColorimetry::new(&info)?;
                ModelKind::Packed(packed, colorimetry)
            }
        };
        Ok(ColorModel { info, kind })
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.info.has_alpha
    }

    #[inline]
    pub fn is_alpha_premultiplied(&self) -> bool {
        self.info.premultiplied
    }

    #[inline]
    pub fn transfer_type(&self) -> TransferType {
        self.info.transfer_type
    }

    #[inline]
    pub fn pixel_size(&self) -> u32 {
        self.info.pixel_bits
    }

    pub fn component_size(&self, idx: usize) -> Result<u32, ModelError> {
        let bits = self.info.n_bits_or_unsupported("Component size")?;
        bits.get(idx)
            .copied()
            .ok_or(ModelError::BandOutOfBounds(idx))
    }

    pub fn component_sizes(&self) -> Option<&[u32]> {
        self.info.n_bits.as_deref()
    }

    #[inline]
    pub fn transparency(&self) -> Transparency {
        self.info.transparency
    }

    #[inline]
    pub fn num_components(&self) -> usize {
        self.info.num_components
    }

    #[inline]
    pub fn num_color_components(&self) -> usize {
        self.info.num_color_components
    }

    pub fn color_space(&self) -> &ColorSpace {
        &self.info.color_space
    }

    /// Direct RGB specifics, if this is a direct model
    pub fn direct(&self) -> Option<&DirectColorModel> {
        match &self.kind {
            ModelKind::Direct(direct) => Some(direct),
            _ => None,
        }
    }

    /// Mask layout, if this is a packed model
    pub fn packed(&self) -> Option<&PackedColorModel> {
        match &self.kind {
            ModelKind::Direct(direct) => Some(direct.packed()),
            ModelKind::Packed(packed, _) => Some(packed),
            ModelKind::Custom(_) => None,
        }
    }

    pub fn red(&self, pixel: u32) -> u32 {
        match &self.kind {
            ModelKind::Direct(direct) => direct.color(&self.info, pixel, 0),
            ModelKind::Packed(packed, colorimetry) => {
                colorimetry.rgb_component(packed, &self.info, pixel, 0)
            }
            ModelKind::Custom(custom) => custom.red(pixel),
        }
    }

    pub fn green(&self, pixel: u32) -> u32 {
        match &self.kind {
            ModelKind::Direct(direct) => direct.color(&self.info, pixel, 1),
            ModelKind::Packed(packed, colorimetry) => {
                colorimetry.rgb_component(packed, &self.info, pixel, 1)
            }
            ModelKind::Custom(custom) => custom.green(pixel),
        }
    }

    pub fn blue(&self, pixel: u32) -> u32 {
        match &self.kind {
            ModelKind::Direct(direct) => direct.color(&self.info, pixel, 2),
            ModelKind::Packed(packed, colorimetry) => {
                colorimetry.rgb_component(packed, &self.info, pixel, 2)
            }
            ModelKind::Custom(custom) => custom.blue(pixel),
        }
    }

    pub fn alpha(&self, pixel: u32) -> u32 {
        match &self.kind {
            ModelKind::Direct(direct) => direct.packed().alpha(&self.info, pixel),
            ModelKind::Packed(packed, _) => packed.alpha(&self.info, pixel),
            ModelKind::Custom(custom) => custom.alpha(pixel),
        }
    }

    /// Pixel in the default packed ARGB layout
    pub fn rgb(&self, pixel: u32) -> u32 {
        match &self.kind {
            ModelKind::Direct(direct) => direct.rgb(&self.info, pixel),
            ModelKind::Packed(packed, colorimetry) => colorimetry.rgb(packed, &self.info, pixel),
            ModelKind::Custom(_) => {
                (self.alpha(pixel) << 24)
                    | (self.red(pixel) << 16)
                    | (self.green(pixel) << 8)
                    | self.blue(pixel)
            }
        }
    }

    /// Reads the single pixel of `elements` according to transfer type.
    ///
    /// Packed models read the first element, other models accept exactly one element.
    fn pixel_of(&self, elements: &DataElements) -> Result<u32, ModelError> {
        let (pixel, len) = elements.packed_pixel(self.info.transfer_type)?;
        match &self.kind {
            ModelKind::Custom(_) if len != 1 => Err(ModelError::UnsupportedOperation(
                "Multi element pixel access",
            )),
            _ => Ok(pixel),
        }
    }

    pub fn red_of(&self, elements: &DataElements) -> Result<u32, ModelError> {
        Ok(self.red(self.pixel_of(elements)?))
    }

    pub fn green_of(&self, elements: &DataElements) -> Result<u32, ModelError> {
        Ok(self.green(self.pixel_of(elements)?))
    }

    pub fn blue_of(&self, elements: &DataElements) -> Result<u32, ModelError> {
        Ok(self.blue(self.pixel_of(elements)?))
    }

    pub fn alpha_of(&self, elements: &DataElements) -> Result<u32, ModelError> {
        Ok(self.alpha(self.pixel_of(elements)?))
    }

    pub fn rgb_of(&self, elements: &DataElements) -> Result<u32, ModelError> {
        Ok(self.rgb(self.pixel_of(elements)?))
    }

    /// Pixel representation of a default ARGB color.
    ///
    /// A supplied array of the transfer type is reused.
    pub fn data_elements_from_rgb(
        &self,
        argb: u32,
        pixel: Option<DataElements>,
    ) -> Result<DataElements, ModelError> {
        let packed_pixel = match &self.kind {
            ModelKind::Direct(_)
                if self.info.color_space.is_srgb() && self == ColorModel::rgb_default() =>
            {
                argb
            }
            ModelKind::Direct(direct) => direct.pixel_from_rgb(&self.info, argb),
            ModelKind::Packed(packed, colorimetry) => {
                colorimetry.pixel_from_rgb(packed, &self.info, argb)
            }
            ModelKind::Custom(_) => {
                return Err(ModelError::UnsupportedOperation("Data elements from RGB"));
            }
        };
        let mut elements = DataElements::reuse_or_allocate(pixel, self.info.transfer_type)?;
        elements.store_packed_pixel(packed_pixel)?;
        Ok(elements)
    }

    /// Unnormalized components of a packed pixel
    pub fn components(&self, pixel: u32) -> Result<Vec<u32>, ModelError> {
        let mut components = vec![0u32; self.info.num_components];
        self.components_into(pixel, &mut components, 0)?;
        Ok(components)
    }

    pub fn components_into(
        &self,
        pixel: u32,
        components: &mut [u32],
        offset: usize,
    ) -> Result<(), ModelError> {
        let packed = self
            .packed()
            .ok_or(ModelError::UnsupportedOperation("Components"))?;
        packed.components_into(pixel, components, offset)
    }

    pub fn components_of(&self, elements: &DataElements) -> Result<Vec<u32>, ModelError> {
        let mut components = vec![0u32; self.info.num_components];
        self.components_of_into(elements, &mut components, 0)?;
        Ok(components)
    }

    pub fn components_of_into(
        &self,
        elements: &DataElements,
        components: &mut [u32],
        offset: usize,
    ) -> Result<(), ModelError> {
        if self.packed().is_none() {
            return Err(ModelError::UnsupportedOperation("Components"));
        }
        let pixel = self.pixel_of(elements)?;
        self.components_into(pixel, components, offset)
    }

    /// Packs unnormalized components into a pixel
    pub fn data_element(&self, components: &[u32], offset: usize) -> Result<u32, ModelError> {
        let packed = self
            .packed()
            .ok_or(ModelError::UnsupportedOperation("Data element"))?;
        packed.pack(components, offset)
    }

    pub fn data_elements_from_components(
        &self,
        components: &[u32],
        offset: usize,
        pixel: Option<DataElements>,
    ) -> Result<DataElements, ModelError> {
        let packed_pixel = self.data_element(components, offset)?;
        let mut elements = DataElements::reuse_or_allocate(pixel, self.info.transfer_type)?;
        elements.store_packed_pixel(packed_pixel)?;
        Ok(elements)
    }

    pub fn data_element_from_normalized(
        &self,
        normalized: &[f32],
        offset: usize,
    ) -> Result<u32, ModelError> {
        let components = self.unnormalized_components(normalized, offset)?;
        self.data_element(&components, 0)
    }

    pub fn data_elements_from_normalized(
        &self,
        normalized: &[f32],
        offset: usize,
        pixel: Option<DataElements>,
    ) -> Result<DataElements, ModelError> {
        let components = self.unnormalized_components(normalized, offset)?;
        self.data_elements_from_components(&components, 0, pixel)
    }

    pub fn normalized_components_of(
        &self,
        elements: &DataElements,
    ) -> Result<Vec<f32>, ModelError> {
        let components = self.components_of(elements)?;
        self.normalized_components(&components, 0)
    }

    /// Converts normalized components into integers in `0..2^bits`.
    ///
    /// Normalized color is never premultiplied, premultiplied models multiply
    /// color by normalized alpha before quantization.
    pub fn unnormalized_components(
        &self,
        normalized: &[f32],
        offset: usize,
    ) -> Result<Vec<u32>, ModelError> {
        let mut components = vec![0u32; self.info.num_components];
        self.unnormalized_components_into(normalized, offset, &mut components, 0)?;
        Ok(components)
    }

    pub fn unnormalized_components_into(
        &self,
        normalized: &[f32],
        norm_offset: usize,
        components: &mut [u32],
        offset: usize,
    ) -> Result<(), ModelError> {
        let bits = self.info.n_bits_or_unsupported("Unnormalized components")?;
        let num_components = self.info.num_components;
        check_len(normalized.len(), norm_offset, num_components)?;
        check_len(components.len(), offset, num_components)?;

        let src = &normalized[norm_offset..norm_offset + num_components];
        let dst = &mut components[offset..offset + num_components];
        let quantize = |v: f32, bits: u32| {
            let max = max_sample(bits) as f32;
            ((v * max + 0.5) as u32).min(max as u32)
        };

        if self.info.has_alpha && self.info.premultiplied {
            let alpha_idx = self.info.num_color_components;
            let norm_alpha = src[alpha_idx];
            for i in 0..alpha_idx {
                dst[i] = quantize(src[i] * norm_alpha, bits[i]);
            }
            dst[alpha_idx] = quantize(norm_alpha, bits[alpha_idx]);
        } else {
            for i in 0..num_components {
                dst[i] = quantize(src[i], bits[i]);
            }
        }
        Ok(())
    }

    /// Converts integer components into 0..=1 floats.
    ///
    /// Premultiplied color is divided by alpha, fully transparent color is zero.
    pub fn normalized_components(
        &self,
        components: &[u32],
        offset: usize,
    ) -> Result<Vec<f32>, ModelError> {
        let mut normalized = vec![0f32; self.info.num_components];
        self.normalized_components_into(components, offset, &mut normalized, 0)?;
        Ok(normalized)
    }

    pub fn normalized_components_into(
        &self,
        components: &[u32],
        offset: usize,
        normalized: &mut [f32],
        norm_offset: usize,
    ) -> Result<(), ModelError> {
        self.info.n_bits_or_unsupported("Normalized components")?;
        let num_components = self.info.num_components;
        check_len(components.len(), offset, num_components)?;
        check_len(normalized.len(), norm_offset, num_components)?;

        let src = &components[offset..offset + num_components];
        let dst = &mut normalized[norm_offset..norm_offset + num_components];

        if self.info.has_alpha && self.info.premultiplied {
            let alpha_idx = self.info.num_color_components;
            let norm_alpha = unit_interval(src[alpha_idx], self.info.max_value(alpha_idx));
            if norm_alpha != 0.0 {
                for i in 0..alpha_idx {
                    dst[i] = unit_interval(src[i], self.info.max_value(i)) / norm_alpha;
                }
            } else {
                dst[..alpha_idx].fill(0.);
            }
            dst[alpha_idx] = norm_alpha;
        } else {
            for i in 0..num_components {
                dst[i] = unit_interval(src[i], self.info.max_value(i));
            }
        }
        Ok(())
    }

    /// Forces raster data to match `premultiplied` state.
    ///
    /// This mutates `raster` in place, every pixel inside raster bounds is rewritten.
    /// Returns this model when nothing had to change,
    /// otherwise a new model with flipped premultiplication.
    pub fn coerce_data(
        &self,
        raster: &Raster,
        premultiplied: bool,
    ) -> Result<Cow<'_, ColorModel>, ModelError> {
        let packed = self
            .packed()
            .ok_or(ModelError::UnsupportedOperation("Coerce data"))?;
        if !self.info.has_alpha || self.info.premultiplied == premultiplied {
            return Ok(Cow::Borrowed(self));
        }
        packed.coerce_raster(&self.info, raster, premultiplied)?;
        let mut coerced = self.clone();
        coerced.info.premultiplied = premultiplied;
        Ok(Cow::Owned(coerced))
    }

    pub fn is_compatible_raster(&self, raster: &Raster) -> Result<bool, ModelError> {
        let packed = self
            .packed()
            .ok_or(ModelError::UnsupportedOperation("Raster compatibility"))?;
        Ok(packed.is_compatible_sample_model(&self.info, raster.sample_model()))
    }

    /// New raster with fresh storage laid out by this model
    pub fn create_compatible_raster(&self, width: i32, height: i32) -> Result<Raster, ModelError> {
        let packed = self
            .packed()
            .ok_or(ModelError::UnsupportedOperation("Compatible raster"))?;
        packed.create_compatible_raster(&self.info, width, height)
    }

    pub fn create_compatible_sample_model(
        &self,
        width: i32,
        height: i32,
    ) -> Result<PackedSampleModel, ModelError> {
        let packed = self
            .packed()
            .ok_or(ModelError::UnsupportedOperation("Compatible sample model"))?;
        PackedSampleModel::new(self.info.transfer_type, width, height, packed.masks())
    }

    pub fn is_compatible_sample_model(
        &self,
        sample_model: &PackedSampleModel,
    ) -> Result<bool, ModelError> {
        let packed = self
            .packed()
            .ok_or(ModelError::UnsupportedOperation("Sample model compatibility"))?;
        Ok(packed.is_compatible_sample_model(&self.info, sample_model))
    }

    /// View on the alpha band of `raster`, `None` when there is no discrete alpha band
    pub fn alpha_raster(&self, raster: &Raster) -> Result<Option<Raster>, ModelError> {
        match self.packed() {
            Some(_) if self.info.has_alpha => {
                let Some(band) = raster.num_bands().checked_sub(1) else {
                    return Ok(None);
                };
                raster
                    .create_child(
                        raster.min_x(),
                        raster.min_y(),
                        raster.width(),
                        raster.height(),
                        raster.min_x(),
                        raster.min_y(),
                        Some(&[band]),
                    )
                    .map(Some)
            }
            _ => Ok(None),
        }
    }
}

impl PartialEq for ColorModel {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        let (a, b) = (&self.info, &other.info);
        if a.has_alpha != b.has_alpha
            || a.premultiplied != b.premultiplied
            || a.pixel_bits != b.pixel_bits
            || a.transparency != b.transparency
            || a.num_components != b.num_components
        {
            return false;
        }
        let bits_match = match (&a.n_bits, &b.n_bits) {
            (Some(x), Some(y)) => x[..a.num_components] == y[..a.num_components],
            (None, None) => true,
            _ => false,
        };
        if !bits_match {
            return false;
        }
        match (&self.kind, &other.kind) {
            (ModelKind::Custom(_), ModelKind::Custom(_)) => true,
            (ModelKind::Direct(x), ModelKind::Direct(y)) => {
                x.packed().masks() == y.packed().masks()
            }
            (ModelKind::Packed(x, _), ModelKind::Packed(y, _)) => x.masks() == y.masks(),
            _ => false,
        }
    }
}

impl Eq for ColorModel {}

impl Hash for ColorModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let info = &self.info;
        info.has_alpha.hash(state);
        info.premultiplied.hash(state);
        info.pixel_bits.hash(state);
        info.transparency.hash(state);
        info.num_components.hash(state);
        if let Some(bits) = &info.n_bits {
            bits[..info.num_components].hash(state);
        }
    }
}

impl Display for ColorModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ModelKind::Direct(direct) => write!(
                f,
                "DirectColorModel: rmask={:x} gmask={:x} bmask={:x} amask={:x}",
                direct.red_mask(),
                direct.green_mask(),
                direct.blue_mask(),
                direct.alpha_mask()
            ),
            _ => {
                write!(
                    f,
                    "ColorModel: #pixelBits = {} numComponents = {} color space = {:?} ",
                    self.info.pixel_bits, self.info.num_components, self.info.color_space,
                )?;
                write!(
                    f,
                    "transparency = {:?} has alpha = {} isAlphaPre = {}",
                    self.info.transparency, self.info.has_alpha, self.info.premultiplied
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rand::Rng;
    use std::hash::DefaultHasher;

    fn premultiplied_argb() -> ColorModel {
        ColorModel::new_direct_with_options(
            32,
            RgbMasks::ARGB,
            PackedOptions {
                premultiplied: true,
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn hash_of(model: &ColorModel) -> u64 {
        let mut hasher = DefaultHasher::new();
        model.hash(&mut hasher);
        hasher.finish()
    }

    #[derive(Debug)]
    struct Rgb332;

    impl PixelComponents for Rgb332 {
        fn red(&self, pixel: u32) -> u32 {
            ((pixel >> 5) & 0x7) * 255 / 7
        }
        fn green(&self, pixel: u32) -> u32 {
            ((pixel >> 2) & 0x7) * 255 / 7
        }
        fn blue(&self, pixel: u32) -> u32 {
            (pixel & 0x3) * 255 / 3
        }
        fn alpha(&self, _: u32) -> u32 {
            255
        }
    }

    #[test]
    fn rgb_default_layout() {
        let model = ColorModel::rgb_default();
        let direct = model.direct().unwrap();
        assert_eq!(direct.red_mask(), 0x00ff0000);
        assert_eq!(direct.green_mask(), 0x0000ff00);
        assert_eq!(direct.blue_mask(), 0x000000ff);
        assert_eq!(direct.alpha_mask(), 0xff000000);
        assert!(!model.is_alpha_premultiplied());
        assert!(model.has_alpha());
        assert_eq!(model.transfer_type(), TransferType::Int);
        assert_eq!(model.transparency(), Transparency::Translucent);
        assert_eq!(model.num_components(), 4);
        assert_eq!(model.pixel_size(), 32);
        assert!(model.color_space().is_srgb());
        assert!(std::ptr::eq(model, ColorModel::rgb_default()));
    }

    #[test]
    fn packed_rgb_without_alpha() {
        let model = ColorModel::new_direct(24, RgbMasks::RGB).unwrap();
        assert_eq!(model.components(0x336699).unwrap(), vec![0x33, 0x66, 0x99]);
        assert_eq!(model.alpha(0x336699), 255);
        assert_eq!(model.alpha(0xffffffff), 255);
        assert_eq!(model.transparency(), Transparency::Opaque);
        assert_eq!(model.transfer_type(), TransferType::Int);
        assert_eq!(model.rgb(0x336699), 0xff336699);
    }

    #[test]
    fn rgb565_scales_to_full_range() {
        let model = ColorModel::new_direct(16, RgbMasks::RGB_565).unwrap();
        assert_eq!(model.transfer_type(), TransferType::UShort);
        assert_eq!(model.red(0xf800), 255);
        assert_eq!(model.green(0x07e0), 255);
        assert_eq!(model.blue(0x001f), 255);
        assert_eq!(model.red(0x0800), 8);
        assert_eq!(model.red(0x07ff), 0);
        assert_eq!(model.component_size(1).unwrap(), 6);
    }

    #[test]
    fn premultiplied_color_is_recovered() {
        let model = premultiplied_argb();
        let stored = (128 << 24) | (32 << 16);
        assert_eq!(model.red(stored), 64);
        assert_eq!(model.green(stored), 0);
        assert_eq!(model.alpha(stored), 128);
    }

    #[test]
    fn premultiplied_zero_alpha_is_black() {
        let model = premultiplied_argb();
        for pixel in [0x00ffffffu32, 0x00804020, 0x00000001] {
            assert_eq!(model.red(pixel), 0);
            assert_eq!(model.green(pixel), 0);
            assert_eq!(model.blue(pixel), 0);
            assert_eq!(model.rgb(pixel), 0);
        }
        let normalized = model.normalized_components(&[200, 100, 50, 0], 0).unwrap();
        assert_eq!(normalized, vec![0., 0., 0., 0.]);
    }

    #[test]
    fn components_round_trip() {
        let model = ColorModel::rgb_default();
        let mut rng = rand::rng();
        for _ in 0..10000 {
            let pixel = rng.random::<u32>();
            let components = model.components(pixel).unwrap();
            assert_eq!(model.data_element(&components, 0).unwrap(), pixel);
        }
        let model = ColorModel::new_direct(16, RgbMasks::RGB_565).unwrap();
        for pixel in 0..=0xffffu32 {
            let components = model.components(pixel).unwrap();
            assert_eq!(model.data_element(&components, 0).unwrap(), pixel);
        }
    }

    #[test]
    fn normalization_is_invertible() {
        let model = ColorModel::new_direct(16, RgbMasks::new(0x7c00, 0x03e0, 0x001f, 0x8000))
            .unwrap();
        for c in 0..32u32 {
            for a in 0..2u32 {
                let components = [c, 31 - c, c / 2, a];
                let normalized = model.normalized_components(&components, 0).unwrap();
                let back = model.unnormalized_components(&normalized, 0).unwrap();
                assert_eq!(back, components);
            }
        }
        let model = premultiplied_argb();
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let alpha = rng.random_range(1..=255u32);
            let c = rng.random_range(0..=alpha);
            let components = [c, alpha - c, 0, alpha];
            let normalized = model.normalized_components(&components, 0).unwrap();
            let back = model.unnormalized_components(&normalized, 0).unwrap();
            for (&x, &y) in back.iter().zip(components.iter()) {
                assert!(x.abs_diff(y) <= 1, "{back:?} vs {components:?}");
            }
        }
    }

    #[test]
    fn array_access_checks_bounds_before_writing() {
        let model = ColorModel::rgb_default();
        let mut out = [7u32; 5];
        assert_eq!(
            model.components_into(0x11223344, &mut out, 2),
            Err(ModelError::OutOfBounds {
                required: 4,
                available: 3
            })
        );
        assert_eq!(out, [7; 5]);
        model.components_into(0x11223344, &mut out, 1).unwrap();
        assert_eq!(out, [7, 0x22, 0x33, 0x44, 0x11]);
        let mut normalized = [9f32; 3];
        let err = model
            .normalized_components_into(&[1, 2, 3, 4], 0, &mut normalized, 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bounds);
        assert_eq!(normalized, [9.; 3]);
    }

    #[test]
    fn transfer_arrays_are_typed() {
        let model = ColorModel::new_direct(16, RgbMasks::RGB_565).unwrap();
        let err = model.red_of(&DataElements::Int(vec![0xf800])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(model.red_of(&DataElements::UShort(vec![0xf800])).unwrap(), 255);
        assert_eq!(
            model.rgb_of(&DataElements::UShort(vec![0x001f])).unwrap(),
            0xff0000ff
        );
        let err = model.alpha_of(&DataElements::UShort(vec![])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bounds);
    }

    #[test]
    fn default_model_passes_argb_through() {
        let model = ColorModel::rgb_default();
        assert_eq!(
            model.data_elements_from_rgb(0x12345678, None).unwrap(),
            DataElements::Int(vec![0x12345678])
        );
        let reused = model
            .data_elements_from_rgb(0x80ff0000, Some(DataElements::Int(vec![0, 9])))
            .unwrap();
        assert_eq!(reused, DataElements::Int(vec![0x80ff0000, 9]));
        let err = model
            .data_elements_from_rgb(0, Some(DataElements::Byte(vec![0])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn normalized_pixels() {
        let model = ColorModel::rgb_default();
        let elements = model
            .data_elements_from_normalized(&[1.0, 0.5, 0.0, 1.0], 0, None)
            .unwrap();
        assert_eq!(elements, DataElements::Int(vec![0xffff8000]));
        assert_eq!(
            model
                .data_element_from_normalized(&[0., 0., 0., 1., 0.25], 1)
                .unwrap(),
            0x400000ff
        );
        let normalized = model.normalized_components_of(&elements).unwrap();
        assert_eq!(normalized, vec![1.0, 128. / 255., 0., 1.]);
    }

    #[test]
    fn pixel_bits_only_model() {
        assert_eq!(
            ColorModel::with_pixel_bits(0, Arc::new(Rgb332)).unwrap_err(),
            ModelError::InvalidPixelBits(0)
        );
        let model = ColorModel::with_pixel_bits(8, Arc::new(Rgb332)).unwrap();
        assert_eq!(model.red(0xe0), 255);
        assert_eq!(model.blue(0x03), 255);
        assert_eq!(model.rgb(0xff), 0xffffffff);
        assert_eq!(model.red_of(&DataElements::Byte(vec![0xe0])).unwrap(), 255);
        assert_eq!(
            model
                .red_of(&DataElements::Byte(vec![0xe0, 0]))
                .unwrap_err()
                .kind(),
            ErrorKind::NotSupported
        );
        assert!(model.component_sizes().is_none());

        let unsupported = [
            model.components(0).unwrap_err(),
            model.normalized_components(&[0; 4], 0).unwrap_err(),
            model.unnormalized_components(&[0.; 4], 0).unwrap_err(),
            model.data_element(&[0; 4], 0).unwrap_err(),
            model.data_elements_from_rgb(0, None).unwrap_err(),
            model.create_compatible_raster(1, 1).unwrap_err(),
        ];
        for err in unsupported {
            assert_eq!(err.kind(), ErrorKind::NotSupported, "{err}");
        }
        let raster = ColorModel::rgb_default().create_compatible_raster(1, 1).unwrap();
        assert!(model.alpha_raster(&raster).unwrap().is_none());
    }

    #[test]
    fn equality_follows_layout() {
        let a = ColorModel::new_direct(32, RgbMasks::ARGB).unwrap();
        assert_eq!(&a, ColorModel::rgb_default());
        assert_eq!(hash_of(&a), hash_of(ColorModel::rgb_default()));
        assert_ne!(a, premultiplied_argb());
        let swapped = ColorModel::new_direct(
            32,
            RgbMasks::new(0x000000ff, 0x0000ff00, 0x00ff0000, 0xff000000),
        )
        .unwrap();
        assert_ne!(a, swapped);
        let rgb = ColorModel::new_direct(32, RgbMasks::RGB).unwrap();
        assert_ne!(a, rgb);
    }

    #[test]
    fn coerce_to_current_state_is_identity() {
        let model = ColorModel::rgb_default();
        let raster = model.create_compatible_raster(2, 2).unwrap();
        raster
            .set_data_elements(1, 1, &DataElements::Int(vec![0x80ff4000]))
            .unwrap();
        let coerced = model.coerce_data(&raster, false).unwrap();
        assert!(matches!(coerced, Cow::Borrowed(m) if std::ptr::eq(m, model)));
        assert_eq!(raster.data_buffer().to_vec(), vec![0, 0, 0, 0x80ff4000]);

        let opaque = ColorModel::new_direct(24, RgbMasks::RGB).unwrap();
        let raster = opaque.create_compatible_raster(1, 1).unwrap();
        assert!(matches!(
            opaque.coerce_data(&raster, true).unwrap(),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn coerce_rewrites_raster() {
        let model = ColorModel::rgb_default();
        let raster = model.create_compatible_raster(2, 1).unwrap();
        raster
            .set_data_elements(0, 0, &DataElements::Int(vec![0x80ff4000]))
            .unwrap();
        raster
            .set_data_elements(1, 0, &DataElements::Int(vec![0x00ffffff]))
            .unwrap();

        let premultiplied = model.coerce_data(&raster, true).unwrap().into_owned();
        assert!(premultiplied.is_alpha_premultiplied());
        assert!(!model.is_alpha_premultiplied());
        assert_eq!(raster.data_buffer().to_vec(), vec![0x80802000, 0]);
        assert_eq!(premultiplied.red(0x80802000), 255);

        let straight = premultiplied.coerce_data(&raster, false).unwrap().into_owned();
        assert_eq!(&straight, model);
        assert_eq!(raster.data_buffer().to_vec(), vec![0x80ff4000, 0]);
    }

    #[test]
    fn unpremultiply_keeps_transparent_pixels() {
        let model = premultiplied_argb();
        let raster = model.create_compatible_raster(2, 1).unwrap();
        raster
            .set_data_elements(0, 0, &DataElements::Int(vec![0x00ff8040]))
            .unwrap();
        raster
            .set_data_elements(1, 0, &DataElements::Int(vec![0x80802000]))
            .unwrap();

        let straight = model.coerce_data(&raster, false).unwrap();
        assert!(!straight.is_alpha_premultiplied());
        assert_eq!(raster.data_buffer().to_vec(), vec![0x00ff8040, 0x80ff4000]);
    }

    #[test]
    fn zero_width_components_normalize_to_zero() {
        let model = ColorModel::new_direct(16, RgbMasks::new(0, 0xff00, 0xff, 0)).unwrap();
        let normalized = model.normalized_components(&[0, 10, 20], 0).unwrap();
        assert_eq!(normalized, vec![0., 10. / 255., 20. / 255.]);

        let premultiplied = ColorModel::new_direct_with_options(
            32,
            RgbMasks::new(0, 0xff00, 0xff, 0xff000000),
            PackedOptions {
                premultiplied: true,
                ..Default::default()
            },
        )
        .unwrap();
        let normalized = premultiplied
            .normalized_components(&[0, 64, 32, 128], 0)
            .unwrap();
        assert!(normalized.iter().all(|v| v.is_finite()));
        assert_eq!(normalized[0], 0.);
        assert_eq!(normalized[3], 128. / 255.);
    }

    #[test]
    fn compatible_rasters() {
        let model = ColorModel::new_direct(16, RgbMasks::RGB_565).unwrap();
        let raster = model.create_compatible_raster(4, 3).unwrap();
        assert_eq!(raster.transfer_type(), TransferType::UShort);
        assert_eq!(raster.bounds(), (0, 0, 4, 3));
        assert!(model.is_compatible_raster(&raster).unwrap());
        assert!(!ColorModel::rgb_default().is_compatible_raster(&raster).unwrap());
        assert_eq!(
            model.create_compatible_raster(0, 1).unwrap_err(),
            ModelError::InvalidDimensions {
                width: 0,
                height: 1
            }
        );
        let sample_model = model.create_compatible_sample_model(8, 8).unwrap();
        assert!(model.is_compatible_sample_model(&sample_model).unwrap());
        assert_eq!(sample_model.bit_masks(), &[0xf800, 0x07e0, 0x001f]);
        let int_layout = PackedSampleModel::new(TransferType::Int, 8, 8, &[0xf800, 0x07e0, 0x001f])
            .unwrap();
        assert!(!model.is_compatible_sample_model(&int_layout).unwrap());
    }

    #[test]
    fn alpha_band_view() {
        let model = ColorModel::rgb_default();
        let raster = model.create_compatible_raster(3, 3).unwrap();
        raster
            .set_data_elements(2, 1, &DataElements::Int(vec![0x7f010203]))
            .unwrap();
        let alpha = model.alpha_raster(&raster).unwrap().unwrap();
        assert_eq!(alpha.num_bands(), 1);
        assert_eq!(alpha.sample(2, 1, 0).unwrap(), 0x7f);
        let opaque = ColorModel::new_direct(24, RgbMasks::RGB).unwrap();
        let raster = opaque.create_compatible_raster(1, 1).unwrap();
        assert!(opaque.alpha_raster(&raster).unwrap().is_none());
    }

    #[test]
    fn display_names_masks() {
        assert_eq!(
            ColorModel::rgb_default().to_string(),
            "DirectColorModel: rmask=ff0000 gmask=ff00 bmask=ff amask=ff000000"
        );
        let gray = ColorModel::new_packed(
            8,
            &[0xff],
            0,
            PackedOptions {
                color_space: ColorSpace::linear_gray(),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(gray.to_string().starts_with("ColorModel: #pixelBits = 8 numComponents = 1"));
    }
}
