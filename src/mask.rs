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
//! Bit mask decomposition for packed pixels.
use crate::ModelError;

/// Scale used for zero width components.
///
/// High enough to scale any 0..=255 value down to 0.0,
/// but not high enough to get infinity when scaling back to pixel bits.
pub(crate) const ZERO_BITS_SCALE: f32 = 256.0;

/// Location and scale of one component inside a packed pixel
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MaskLayout {
    pub mask: u32,
    /// Count of trailing zero bits of the mask
    pub offset: u32,
    pub bits: u32,
    /// Multiplier to bring `bits` wide sample into 0..=255
    pub scale: f32,
}

/// Counts bits of a mask that must be a single contiguous run of ones.
///
/// Zero mask has zero bits. Masks like `0b1011` are rejected.
pub fn count_contiguous_bits(mask: u32) -> Result<u32, ModelError> {
    if mask == 0 {
        return Ok(0);
    }
    let run = mask >> mask.trailing_zeros();
    if run & (run.wrapping_add(1)) != 0 {
        return Err(ModelError::NonContiguousMask { index: 0, mask });
    }
    Ok(run.count_ones())
}

/// Finds offset and scale factor of a `bits` wide mask inside `pixel_bits` low order bits
pub fn decompose_mask(
    mask: u32,
    bits: u32,
    pixel_bits: u32,
) -> Result<MaskLayout, ModelError> {
    let offset = if mask != 0 { mask.trailing_zeros() } else { 0 };
    if offset + bits > pixel_bits {
        return Err(ModelError::MaskOverflow {
            index: 0,
            mask,
            pixel_bits,
        });
    }
    let scale = if bits == 0 {
        ZERO_BITS_SCALE
    } else {
        255.0f32 / max_sample(bits) as f32
    };
    Ok(MaskLayout {
        mask,
        offset,
        bits,
        scale,
    })
}

/// Builds component bit depths of colors followed by alpha when `alpha_mask != 0`
pub fn bits_for_masks(color_masks: &[u32], alpha_mask: u32) -> Result<Vec<u32>, ModelError> {
    let mut bits = Vec::with_capacity(color_masks.len() + 1);
    for (index, &mask) in color_masks.iter().enumerate() {
        bits.push(count_contiguous_bits(mask).map_err(|_| ModelError::NonContiguousMask {
            index,
            mask,
        })?);
    }
    if alpha_mask != 0 {
        let index = color_masks.len();
        bits.push(
            count_contiguous_bits(alpha_mask).map_err(|_| ModelError::NonContiguousMask {
                index,
                mask: alpha_mask,
            })?,
        );
    }
    Ok(bits)
}

/// Rejects any pair of masks sharing a set bit
pub fn validate_disjoint(masks: &[u32]) -> Result<(), ModelError> {
    let mut seen = 0u32;
    for (second, &mask) in masks.iter().enumerate() {
        if seen & mask != 0 {
            let first = masks[..second]
                .iter()
                .position(|&m| m & mask != 0)
                .unwrap_or(0);
            return Err(ModelError::OverlappingMasks { first, second });
        }
        seen |= mask;
    }
    Ok(())
}

/// Largest sample value `bits` wide, `bits` may be up to 32
#[inline(always)]
pub(crate) const fn max_sample(bits: u32) -> u64 {
    (1u64 << bits) - 1
}
