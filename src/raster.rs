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
use crate::sample_model::PackedSampleModel;
use crate::{DataElements, ModelError, TransferType};

/// Rectangle of pixels backed by a shared [DataBuffer].
///
/// Raster coordinates start at `(min_x, min_y)`.
/// Sample model coordinates are raster coordinates minus the sample model translation.
/// Children created from a raster share its buffer.
#[derive(Debug, Clone)]
pub struct Raster {
    sample_model: PackedSampleModel,
    buffer: DataBuffer,
    min_x: i32,
    min_y: i32,
    width: i32,
    height: i32,
    translate_x: i32,
    translate_y: i32,
    has_parent: bool,
}

impl Raster {
    /// Raster over an existing buffer, sample model origin placed at `origin`
    pub fn new(
        sample_model: PackedSampleModel,
        buffer: DataBuffer,
        origin: (i32, i32),
    ) -> Result<Raster, ModelError> {
        if buffer.data_type() != sample_model.data_type() {
            return Err(ModelError::TypeMismatch {
                expected: sample_model.data_type(),
                found: buffer.data_type(),
            });
        }
        if buffer.size() < sample_model.buffer_size() {
            return Err(ModelError::OutOfBounds {
                required: sample_model.buffer_size(),
                available: buffer.size(),
            });
        }
        let (x, y) = origin;
        origin_fits(x, y, sample_model.width(), sample_model.height())?;
        Ok(Raster {
            width: sample_model.width(),
            height: sample_model.height(),
            sample_model,
            buffer,
            min_x: x,
            min_y: y,
            translate_x: x,
            translate_y: y,
            has_parent: false,
        })
    }

    /// Single pixel packed raster with fresh zeroed storage
    pub fn new_packed(
        data_type: TransferType,
        width: i32,
        height: i32,
        bit_masks: &[u32],
        origin: Option<(i32, i32)>,
    ) -> Result<Raster, ModelError> {
        let sample_model = PackedSampleModel::new(data_type, width, height, bit_masks)?;
        let buffer = sample_model.create_data_buffer()?;
        Raster::new(sample_model, buffer, origin.unwrap_or((0, 0)))
    }

    /// Same layout and band count, new storage, origin at zero
    pub fn create_compatible(&self, width: i32, height: i32) -> Result<Raster, ModelError> {
        let sample_model = self.sample_model.create_compatible(width, height)?;
        let buffer = sample_model.create_data_buffer()?;
        Raster::new(sample_model, buffer, (0, 0))
    }

    /// View on a sub rectangle sharing this raster's buffer.
    ///
    /// `(parent_x, parent_y)` in this raster becomes `(child_min_x, child_min_y)` in the child.
    /// `bands` selects and orders bands, `None` keeps all of them.
    #[allow(clippy::too_many_arguments)]
    pub fn create_child(
        &self,
        parent_x: i32,
        parent_y: i32,
        width: i32,
        height: i32,
        child_min_x: i32,
        child_min_y: i32,
        bands: Option<&[usize]>,
    ) -> Result<Raster, ModelError> {
        if width <= 0 || height <= 0 {
            return Err(ModelError::InvalidDimensions { width, height });
        }
        if parent_x < self.min_x || parent_y < self.min_y {
            return Err(ModelError::CoordinateOutOfBounds {
                x: parent_x,
                y: parent_y,
            });
        }
        let right = parent_x as i64 + width as i64;
        let bottom = parent_y as i64 + height as i64;
        if right > self.min_x as i64 + self.width as i64
            || bottom > self.min_y as i64 + self.height as i64
        {
            return Err(ModelError::CoordinateOutOfBounds {
                x: right.min(i32::MAX as i64) as i32,
                y: bottom.min(i32::MAX as i64) as i32,
            });
        }
        origin_fits(child_min_x, child_min_y, width, height)?;

        let sample_model = match bands {
            Some(bands) => self.sample_model.create_subset(bands)?,
            None => self.sample_model.clone(),
        };
        let delta_x = child_min_x as i64 - parent_x as i64;
        let delta_y = child_min_y as i64 - parent_y as i64;
        let translate_x = i32::try_from(self.translate_x as i64 + delta_x).map_err(|_| {
            ModelError::CoordinateOutOfBounds {
                x: child_min_x,
                y: child_min_y,
            }
        })?;
        let translate_y = i32::try_from(self.translate_y as i64 + delta_y).map_err(|_| {
            ModelError::CoordinateOutOfBounds {
                x: child_min_x,
                y: child_min_y,
            }
        })?;

        Ok(Raster {
            sample_model,
            buffer: self.buffer.clone(),
            min_x: child_min_x,
            min_y: child_min_y,
            width,
            height,
            translate_x,
            translate_y,
            has_parent: true,
        })
    }

    /// Whole raster moved to a new origin, sharing the buffer
    pub fn create_translated_child(
        &self,
        child_min_x: i32,
        child_min_y: i32,
    ) -> Result<Raster, ModelError> {
        self.create_child(
            self.min_x,
            self.min_y,
            self.width,
            self.height,
            child_min_x,
            child_min_y,
            None,
        )
    }

    #[inline]
    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    #[inline]
    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// `(x, y, width, height)`
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (self.min_x, self.min_y, self.width, self.height)
    }

    #[inline]
    pub fn num_bands(&self) -> usize {
        self.sample_model.num_bands()
    }

    pub fn transfer_type(&self) -> TransferType {
        self.sample_model.data_type()
    }

    pub fn sample_model(&self) -> &PackedSampleModel {
        &self.sample_model
    }

    pub fn data_buffer(&self) -> &DataBuffer {
        &self.buffer
    }

    /// Offset subtracted from raster coordinates to reach sample model coordinates
    pub fn sample_model_translate(&self) -> (i32, i32) {
        (self.translate_x, self.translate_y)
    }

    pub fn has_parent(&self) -> bool {
        self.has_parent
    }

    #[inline]
    fn to_sample_space(&self, x: i32, y: i32) -> Result<(i32, i32), ModelError> {
        let inside = x >= self.min_x
            && y >= self.min_y
            && (x as i64) < self.min_x as i64 + self.width as i64
            && (y as i64) < self.min_y as i64 + self.height as i64;
        if !inside {
            return Err(ModelError::CoordinateOutOfBounds { x, y });
        }
        Ok((x - self.translate_x, y - self.translate_y))
    }

    pub fn sample(&self, x: i32, y: i32, band: usize) -> Result<u32, ModelError> {
        let (sx, sy) = self.to_sample_space(x, y)?;
        self.sample_model.sample(sx, sy, band, &self.buffer)
    }

    pub fn set_sample(&self, x: i32, y: i32, band: usize, value: u32) -> Result<(), ModelError> {
        let (sx, sy) = self.to_sample_space(x, y)?;
        self.sample_model.set_sample(sx, sy, band, value, &self.buffer)
    }

    /// Reads all bands of one pixel into `samples`
    pub fn pixel(&self, x: i32, y: i32, samples: &mut [u32]) -> Result<(), ModelError> {
        let (sx, sy) = self.to_sample_space(x, y)?;
        self.sample_model.pixel(sx, sy, samples, &self.buffer)
    }

    pub fn set_pixel(&self, x: i32, y: i32, samples: &[u32]) -> Result<(), ModelError> {
        let (sx, sy) = self.to_sample_space(x, y)?;
        self.sample_model.set_pixel(sx, sy, samples, &self.buffer)
    }

    /// Samples of a `width` x `height` rectangle, pixel interleaved in row major order
    pub fn pixels(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        samples: &mut [u32],
    ) -> Result<(), ModelError> {
        let bands = self.num_bands();
        for (px, py, chunk) in self.rect_chunks(x, y, width, height, samples.len())? {
            self.pixel(px, py, &mut samples[chunk * bands..(chunk + 1) * bands])?;
        }
        Ok(())
    }

    pub fn set_pixels(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        samples: &[u32],
    ) -> Result<(), ModelError> {
        let bands = self.num_bands();
        for (px, py, chunk) in self.rect_chunks(x, y, width, height, samples.len())? {
            self.set_pixel(px, py, &samples[chunk * bands..(chunk + 1) * bands])?;
        }
        Ok(())
    }

    /// Coordinates of every pixel in a rectangle with its index in a pixel interleaved array
    fn rect_chunks(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        len: usize,
    ) -> Result<impl Iterator<Item = (i32, i32, usize)>, ModelError> {
        if width <= 0 || height <= 0 {
            return Err(ModelError::InvalidDimensions { width, height });
        }
        let right = x as i64 + width as i64;
        let bottom = y as i64 + height as i64;
        if x < self.min_x
            || y < self.min_y
            || right > self.min_x as i64 + self.width as i64
            || bottom > self.min_y as i64 + self.height as i64
        {
            return Err(ModelError::CoordinateOutOfBounds { x, y });
        }
        let required = width as usize * height as usize * self.num_bands();
        if len < required {
            return Err(ModelError::OutOfBounds {
                required,
                available: len,
            });
        }
        Ok((0..height).flat_map(move |row| {
            (0..width).map(move |col| (x + col, y + row, (row * width + col) as usize))
        }))
    }

    /// Pixel as a single element array of the raster transfer type
    pub fn data_elements(&self, x: i32, y: i32) -> Result<DataElements, ModelError> {
        let (sx, sy) = self.to_sample_space(x, y)?;
        let value = self.sample_model.data_element(sx, sy, &self.buffer)?;
        let mut elements = DataElements::zeroed(self.transfer_type(), 1)?;
        elements.store_packed_pixel(value)?;
        Ok(elements)
    }

    pub fn set_data_elements(
        &self,
        x: i32,
        y: i32,
        elements: &DataElements,
    ) -> Result<(), ModelError> {
        let (sx, sy) = self.to_sample_space(x, y)?;
        let (value, _) = elements.packed_pixel(self.transfer_type())?;
        self.sample_model
            .set_data_element(sx, sy, value, &self.buffer)
    }
}

#[inline]
fn origin_fits(x: i32, y: i32, width: i32, height: i32) -> Result<(), ModelError> {
    if x.checked_add(width).is_none() || y.checked_add(height).is_none() {
        return Err(ModelError::CoordinateOutOfBounds { x, y });
    }
    Ok(())
}
