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
use crate::data_buffer::DataBuffer;
use crate::mask::count_contiguous_bits;
use crate::{ModelError, TransferType};

/// Single pixel packed layout: every pixel is one buffer element holding all bands.
///
/// Coordinates are relative to the sample model, `(0, 0)` is the first element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackedSampleModel {
    data_type: TransferType,
    width: i32,
    height: i32,
    scanline_stride: usize,
    bit_masks: Vec<u32>,
    bit_offsets: Vec<u32>,
    sample_sizes: Vec<u32>,
}

impl PackedSampleModel {
    pub fn new(
        data_type: TransferType,
        width: i32,
        height: i32,
        bit_masks: &[u32],
    ) -> Result<PackedSampleModel, ModelError> {
        PackedSampleModel::with_stride(data_type, width, height, width.max(0) as usize, bit_masks)
    }

    pub fn with_stride(
        data_type: TransferType,
        width: i32,
        height: i32,
        scanline_stride: usize,
        bit_masks: &[u32],
    ) -> Result<PackedSampleModel, ModelError> {
        if width <= 0 || height <= 0 || scanline_stride < width as usize {
            return Err(ModelError::InvalidDimensions { width, height });
        }
        if !data_type.is_packed_storage() {
            return Err(ModelError::InvalidTransferType(data_type));
        }
        if bit_masks.is_empty() {
            return Err(ModelError::NoBands);
        }
        let mut bit_offsets = Vec::with_capacity(bit_masks.len());
        let mut sample_sizes = Vec::with_capacity(bit_masks.len());
        for (index, &mask) in bit_masks.iter().enumerate() {
            let bits = count_contiguous_bits(mask)
                .map_err(|_| ModelError::NonContiguousMask { index, mask })?;
            let offset = if mask != 0 { mask.trailing_zeros() } else { 0 };
            if offset + bits > data_type.bits() {
                return Err(ModelError::MaskOverflow {
                    index,
                    mask,
                    pixel_bits: data_type.bits(),
                });
            }
            bit_offsets.push(offset);
            sample_sizes.push(bits);
        }
        Ok(PackedSampleModel {
            data_type,
            width,
            height,
            scanline_stride,
            bit_masks: bit_masks.to_vec(),
            bit_offsets,
            sample_sizes,
        })
    }

    #[inline]
    pub fn data_type(&self) -> TransferType {
        self.data_type
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn num_bands(&self) -> usize {
        self.bit_masks.len()
    }

    pub fn scanline_stride(&self) -> usize {
        self.scanline_stride
    }

    pub fn bit_masks(&self) -> &[u32] {
        &self.bit_masks
    }

    pub fn bit_offsets(&self) -> &[u32] {
        &self.bit_offsets
    }

    pub fn sample_size(&self, band: usize) -> Option<u32> {
        self.sample_sizes.get(band).copied()
    }

    /// Count of elements a buffer needs to hold this layout
    pub fn buffer_size(&self) -> usize {
        self.scanline_stride * (self.height as usize - 1) + self.width as usize
    }

    /// Same layout with another size
    pub fn create_compatible(
        &self,
        width: i32,
        height: i32,
    ) -> Result<PackedSampleModel, ModelError> {
        PackedSampleModel::new(self.data_type, width, height, &self.bit_masks)
    }

    /// Layout exposing only `bands`, in the given order
    pub fn create_subset(&self, bands: &[usize]) -> Result<PackedSampleModel, ModelError> {
        let masks = bands
            .iter()
            .map(|&band| {
                self.bit_masks
                    .get(band)
                    .copied()
                    .ok_or(ModelError::BandOutOfBounds(band))
            })
            .collect::<Result<Vec<u32>, ModelError>>()?;
        PackedSampleModel::with_stride(
            self.data_type,
            self.width,
            self.height,
            self.scanline_stride,
            &masks,
        )
    }

    pub fn create_data_buffer(&self) -> Result<DataBuffer, ModelError> {
        DataBuffer::new(self.data_type, self.buffer_size())
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Result<usize, ModelError> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Err(ModelError::CoordinateOutOfBounds { x, y });
        }
        Ok(y as usize * self.scanline_stride + x as usize)
    }

    #[inline]
    fn check_band(&self, band: usize) -> Result<(), ModelError> {
        if band >= self.bit_masks.len() {
            return Err(ModelError::BandOutOfBounds(band));
        }
        Ok(())
    }

    pub fn data_element(&self, x: i32, y: i32, buffer: &DataBuffer) -> Result<u32, ModelError> {
        buffer.elem(self.offset(x, y)?)
    }

    pub fn set_data_element(
        &self,
        x: i32,
        y: i32,
        value: u32,
        buffer: &DataBuffer,
    ) -> Result<(), ModelError> {
        buffer.set_elem(self.offset(x, y)?, value)
    }

    pub fn sample(
        &self,
        x: i32,
        y: i32,
        band: usize,
        buffer: &DataBuffer,
    ) -> Result<u32, ModelError> {
        self.check_band(band)?;
        let value = self.data_element(x, y, buffer)?;
        Ok((value & self.bit_masks[band]) >> self.bit_offsets[band])
    }

    /// Replaces one band, bits of `value` outside the band mask are dropped
    pub fn set_sample(
        &self,
        x: i32,
        y: i32,
        band: usize,
        value: u32,
        buffer: &DataBuffer,
    ) -> Result<(), ModelError> {
        self.check_band(band)?;
        let offset = self.offset(x, y)?;
        let mask = self.bit_masks[band];
        let old = buffer.elem(offset)?;
        buffer.set_elem(offset, (old & !mask) | ((value << self.bit_offsets[band]) & mask))
    }

    pub fn pixel(
        &self,
        x: i32,
        y: i32,
        samples: &mut [u32],
        buffer: &DataBuffer,
    ) -> Result<(), ModelError> {
        let bands = self.num_bands();
        if samples.len() < bands {
            return Err(ModelError::OutOfBounds {
                required: bands,
                available: samples.len(),
            });
        }
        let value = self.data_element(x, y, buffer)?;
        for (band, dst) in samples[..bands].iter_mut().enumerate() {
            *dst = (value & self.bit_masks[band]) >> self.bit_offsets[band];
        }
        Ok(())
    }

    /// Writes every band, bits of the element outside all masks are kept
    pub fn set_pixel(
        &self,
        x: i32,
        y: i32,
        samples: &[u32],
        buffer: &DataBuffer,
    ) -> Result<(), ModelError> {
        let bands = self.num_bands();
        if samples.len() < bands {
            return Err(ModelError::OutOfBounds {
                required: bands,
                available: samples.len(),
            });
        }
        let offset = self.offset(x, y)?;
        let mut value = buffer.elem(offset)?;
        for (band, &sample) in samples[..bands].iter().enumerate() {
            let mask = self.bit_masks[band];
            value = (value & !mask) | ((sample << self.bit_offsets[band]) & mask);
        }
        buffer.set_elem(offset, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_layout() {
        assert_eq!(
            PackedSampleModel::new(TransferType::Int, 0, 4, &[0xff]).unwrap_err(),
            ModelError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
        assert_eq!(
            PackedSampleModel::new(TransferType::Int, 2, 2, &[0xff, 0xf0f]).unwrap_err(),
            ModelError::NonContiguousMask {
                index: 1,
                mask: 0xf0f
            }
        );
        assert_eq!(
            PackedSampleModel::new(TransferType::Byte, 2, 2, &[0xf00]).unwrap_err(),
            ModelError::MaskOverflow {
                index: 0,
                mask: 0xf00,
                pixel_bits: 8
            }
        );
        assert!(PackedSampleModel::new(TransferType::Double, 2, 2, &[0xff]).is_err());
        assert_eq!(
            PackedSampleModel::new(TransferType::Int, 2, 2, &[]).unwrap_err(),
            ModelError::NoBands
        );
    }

    #[test]
    fn samples_and_pixels() {
        let sm =
            PackedSampleModel::new(TransferType::UShort, 3, 2, &[0xf800, 0x07e0, 0x001f]).unwrap();
        let buffer = sm.create_data_buffer().unwrap();
        assert_eq!(buffer.size(), 6);
        sm.set_pixel(2, 1, &[31, 63, 31], &buffer).unwrap();
        assert_eq!(sm.data_element(2, 1, &buffer).unwrap(), 0xffff);
        sm.set_sample(2, 1, 1, 0, &buffer).unwrap();
        assert_eq!(sm.data_element(2, 1, &buffer).unwrap(), 0xf81f);
        let mut px = [0u32; 3];
        sm.pixel(2, 1, &mut px, &buffer).unwrap();
        assert_eq!(px, [31, 0, 31]);
        assert_eq!(sm.sample(2, 1, 2, &buffer).unwrap(), 31);
        assert_eq!(
            sm.sample(3, 0, 0, &buffer),
            Err(ModelError::CoordinateOutOfBounds { x: 3, y: 0 })
        );
        assert_eq!(
            sm.sample(0, 0, 3, &buffer),
            Err(ModelError::BandOutOfBounds(3))
        );
    }

    #[test]
    fn subset_keeps_stride() {
        let masks = [0xff, 0xff00, 0xff0000];
        let sm = PackedSampleModel::with_stride(TransferType::Int, 4, 4, 8, &masks).unwrap();
        let subset = sm.create_subset(&[2]).unwrap();
        assert_eq!(subset.bit_masks(), &[0xff0000]);
        assert_eq!(subset.scanline_stride(), 8);
        assert_eq!(subset.bit_offsets(), &[16]);
        assert_eq!(sm.buffer_size(), 28);
        assert_eq!(sm.create_subset(&[5]), Err(ModelError::BandOutOfBounds(5)));
        let compatible = sm.create_compatible(2, 3).unwrap();
        assert_eq!(compatible.scanline_stride(), 2);
        assert_eq!(compatible.bit_masks(), sm.bit_masks());
    }
}
