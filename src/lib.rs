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
#![allow(clippy::manual_clamp, clippy::excessive_precision)]
#![deny(unreachable_pub)]
mod color_space;
mod data_buffer;
mod direct;
mod err;
/// sRGB and power law transfer curves
mod gamma;
mod luts;
mod mask;
mod matrix;
mod model;
mod packed;
mod raster;
mod sample_model;
mod transfer;
mod transform;

pub use color_space::{
    ColorConverter, ColorFamily, ColorSpace, GrayConverter, RgbConverter, TransferCurve,
};
pub use data_buffer::DataBuffer;
pub use direct::{DirectColorModel, RgbConversion};
pub use err::{ErrorKind, ModelError};
pub use gamma::{gamma_from_linear, gamma_to_linear, srgb_from_linear, srgb_to_linear};
pub use luts::{LutCache, LutCacheOptions};
pub use mask::{
    MaskLayout, bits_for_masks, count_contiguous_bits, decompose_mask, validate_disjoint,
};
pub use matrix::{DISPLAY_P3_TO_XYZ_D65, Matrix3f, SRGB_TO_XYZ_D65, Xyz};
pub use model::{ColorModel, PackedOptions, PixelComponents, RgbMasks};
pub use packed::PackedColorModel;
pub use raster::Raster;
pub use sample_model::PackedSampleModel;
pub use transfer::{DataElements, TransferType, Transparency};
pub use transform::{ColorTransform, TransformExecutor};
