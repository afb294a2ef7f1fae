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
use crate::{ColorSpace, ModelError};
use num_traits::AsPrimitive;

/// Transformation executor itself
pub trait TransformExecutor<V: Copy + Default> {
    /// Count of pixels always must match.
    /// If there is N pixels of *Gray* source then N pixels of *Rgb* is expected as an output.
    fn transform(&self, src: &[V], dst: &mut [V]) -> Result<(), ModelError>;
}

/// Chain from a device space through the XYZ connection space into another space
#[derive(Debug, Clone)]
pub struct ColorTransform {
    src: ColorSpace,
    dst: ColorSpace,
}

impl ColorTransform {
    pub fn new(src: &ColorSpace, dst: &ColorSpace) -> ColorTransform {
        ColorTransform {
            src: src.clone(),
            dst: dst.clone(),
        }
    }

    pub fn src_components(&self) -> usize {
        self.src.num_components()
    }

    pub fn dst_components(&self) -> usize {
        self.dst.num_components()
    }

    /// Converts one pixel of normalized components
    pub fn convert_normalized(&self, src: &[f32], dst: &mut [f32]) {
        let xyz = self.src.to_xyz(src);
        self.dst.from_xyz(xyz, dst);
    }

    fn convert_impl<T: Copy + Default + AsPrimitive<f32>>(
        &self,
        src: &[T],
        dst: &mut [T],
        max_value: f32,
    ) -> Result<(), ModelError>
    where
        f32: AsPrimitive<T>,
    {
        let src_channels = self.src_components();
        let dst_channels = self.dst_components();
        if src_channels == 0 || dst_channels == 0 {
            return Err(ModelError::LaneMultipleOfChannels);
        }
        if src.len() % src_channels != 0 {
            return Err(ModelError::LaneMultipleOfChannels);
        }
        if dst.len() % dst_channels != 0 {
            return Err(ModelError::LaneMultipleOfChannels);
        }
        if src.len() / src_channels != dst.len() / dst_channels {
            return Err(ModelError::LaneSizeMismatch);
        }

        let src_min: Vec<f32> = (0..src_channels).map(|c| self.src.min_value(c)).collect();
        let src_range: Vec<f32> = (0..src_channels)
            .map(|c| self.src.max_value(c) - self.src.min_value(c))
            .collect();
        let dst_min: Vec<f32> = (0..dst_channels).map(|c| self.dst.min_value(c)).collect();
        let dst_range: Vec<f32> = (0..dst_channels)
            .map(|c| self.dst.max_value(c) - self.dst.min_value(c))
            .collect();

        let scale = 1. / max_value;
        let mut normalized_src = vec![0f32; src_channels];
        let mut normalized_dst = vec![0f32; dst_channels];

        for (src, dst) in src
            .chunks_exact(src_channels)
            .zip(dst.chunks_exact_mut(dst_channels))
        {
            for (c, (dst, &src)) in normalized_src.iter_mut().zip(src.iter()).enumerate() {
                *dst = src.as_() * scale * src_range[c] + src_min[c];
            }
            self.convert_normalized(&normalized_src, &mut normalized_dst);
            for (c, (dst, &v)) in dst.iter_mut().zip(normalized_dst.iter()).enumerate() {
                let unit = (v - dst_min[c]) / dst_range[c];
                *dst = (unit * max_value + 0.5).max(0.).min(max_value).as_();
            }
        }
        Ok(())
    }
}

impl TransformExecutor<u8> for ColorTransform {
    fn transform(&self, src: &[u8], dst: &mut [u8]) -> Result<(), ModelError> {
        self.convert_impl(src, dst, 255.)
    }
}

impl TransformExecutor<u16> for ColorTransform {
    fn transform(&self, src: &[u16], dst: &mut [u16]) -> Result<(), ModelError> {
        self.convert_impl(src, dst, 65535.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_to_srgb_bulk() {
        let transform = ColorTransform::new(&ColorSpace::linear_gray(), &ColorSpace::srgb());
        let src: Vec<u8> = (0..=255u8).collect();
        let mut dst = vec![0u8; 256 * 3];
        transform.transform(&src, &mut dst).unwrap();
        assert_eq!(&dst[0..3], &[0, 0, 0]);
        assert_eq!(&dst[255 * 3..], &[255, 255, 255]);
        // linear 128 is about 188 in sRGB
        for &c in &dst[128 * 3..129 * 3] {
            assert!((c as i32 - 188).abs() <= 1, "{c}");
        }
    }

    #[test]
    fn rejects_mismatched_lanes() {
        let transform = ColorTransform::new(&ColorSpace::linear_gray(), &ColorSpace::srgb());
        let src = [0u16; 4];
        let mut dst = [0u16; 9];
        assert_eq!(
            transform.transform(&src, &mut dst),
            Err(ModelError::LaneSizeMismatch)
        );
        let mut dst = [0u16; 13];
        assert_eq!(
            transform.transform(&src, &mut dst),
            Err(ModelError::LaneMultipleOfChannels)
        );
    }

    #[test]
    fn gray_to_gray_keeps_endpoints() {
        let device = ColorSpace::gray_with_gamma(2.2);
        let transform = ColorTransform::new(&ColorSpace::linear_gray(), &device);
        let src = [0u16, 65535];
        let mut dst = [1u16; 2];
        transform.transform(&src, &mut dst).unwrap();
        assert_eq!(dst, [0, 65535]);
    }
}
