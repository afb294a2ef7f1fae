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
use num_traits::AsPrimitive;

/// Primitive element type used when a pixel travels as an array instead of a single integer.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum TransferType {
    Byte,
    UShort,
    Short,
    Int,
    Float,
    Double,
    /// Pixel is wider than any primitive integer
    Undefined,
}

impl TransferType {
    /// Smallest integral transfer type that holds `pixel_bits`
    pub const fn for_pixel_bits(pixel_bits: u32) -> TransferType {
        if pixel_bits <= 8 {
            TransferType::Byte
        } else if pixel_bits <= 16 {
            TransferType::UShort
        } else if pixel_bits <= 32 {
            TransferType::Int
        } else {
            TransferType::Undefined
        }
    }

    /// Whether a whole packed pixel fits into one element of this type
    #[inline]
    pub const fn is_packed_storage(self) -> bool {
        matches!(
            self,
            TransferType::Byte | TransferType::UShort | TransferType::Int
        )
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            TransferType::Byte => 8,
            TransferType::UShort | TransferType::Short => 16,
            TransferType::Int | TransferType::Float => 32,
            TransferType::Double => 64,
            TransferType::Undefined => 0,
        }
    }
}

/// Transparency class of a color model
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum Transparency {
    /// Every pixel is fully opaque
    Opaque = 1,
    /// Alpha is either 0 or 1
    Bitmask = 2,
    /// Alpha may take any value in between
    #[default]
    Translucent = 3,
}

impl TryFrom<i32> for Transparency {
    type Error = ModelError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Transparency::Opaque),
            2 => Ok(Transparency::Bitmask),
            3 => Ok(Transparency::Translucent),
            _ => Err(ModelError::UnknownTransparency(value)),
        }
    }
}

/// A pixel represented as a primitive array of the model's transfer type.
///
/// Packed models always use a single element.
#[derive(Debug, Clone, PartialEq)]
pub enum DataElements {
    Byte(Vec<u8>),
    UShort(Vec<u16>),
    Short(Vec<i16>),
    Int(Vec<u32>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl DataElements {
    /// Zero filled array of `len` elements
    pub fn zeroed(transfer_type: TransferType, len: usize) -> Result<DataElements, ModelError> {
        match transfer_type {
            TransferType::Byte => Ok(DataElements::Byte(vec![0; len])),
            TransferType::UShort => Ok(DataElements::UShort(vec![0; len])),
            TransferType::Short => Ok(DataElements::Short(vec![0; len])),
            TransferType::Int => Ok(DataElements::Int(vec![0; len])),
            TransferType::Float => Ok(DataElements::Float(vec![0.; len])),
            TransferType::Double => Ok(DataElements::Double(vec![0.; len])),
            TransferType::Undefined => Err(ModelError::UnsupportedTransferType(transfer_type)),
        }
    }

    pub const fn transfer_type(&self) -> TransferType {
        match self {
            DataElements::Byte(_) => TransferType::Byte,
            DataElements::UShort(_) => TransferType::UShort,
            DataElements::Short(_) => TransferType::Short,
            DataElements::Int(_) => TransferType::Int,
            DataElements::Float(_) => TransferType::Float,
            DataElements::Double(_) => TransferType::Double,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DataElements::Byte(v) => v.len(),
            DataElements::UShort(v) => v.len(),
            DataElements::Short(v) => v.len(),
            DataElements::Int(v) => v.len(),
            DataElements::Float(v) => v.len(),
            DataElements::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the first element as a packed pixel.
    ///
    /// Bytes and unsigned shorts are zero extended.
    /// Returns the pixel along with the array length.
    pub(crate) fn packed_pixel(
        &self,
        transfer_type: TransferType,
    ) -> Result<(u32, usize), ModelError> {
        if !transfer_type.is_packed_storage() {
            return Err(ModelError::UnsupportedTransferType(transfer_type));
        }
        if self.transfer_type() != transfer_type {
            return Err(ModelError::TypeMismatch {
                expected: transfer_type,
                found: self.transfer_type(),
            });
        }
        match self {
            DataElements::Byte(v) => first_element(v).map(|px| (px & 0xff, v.len())),
            DataElements::UShort(v) => first_element(v).map(|px| (px & 0xffff, v.len())),
            DataElements::Int(v) => first_element(v).map(|px| (px, v.len())),
            _ => Err(ModelError::UnsupportedTransferType(transfer_type)),
        }
    }

    /// Stores a packed pixel into the first element, truncating to the element width
    pub(crate) fn store_packed_pixel(&mut self, pixel: u32) -> Result<(), ModelError> {
        let available = self.len();
        let transfer_type = self.transfer_type();
        match self {
            DataElements::Byte(v) => v.first_mut().map(|dst| *dst = pixel as u8),
            DataElements::UShort(v) => v.first_mut().map(|dst| *dst = pixel as u16),
            DataElements::Int(v) => v.first_mut().map(|dst| *dst = pixel),
            _ => return Err(ModelError::UnsupportedTransferType(transfer_type)),
        }
        .ok_or(ModelError::OutOfBounds {
            required: 1,
            available,
        })
    }

    /// Takes a caller supplied array for reuse or allocates a new single element one
    pub(crate) fn reuse_or_allocate(
        supplied: Option<DataElements>,
        transfer_type: TransferType,
    ) -> Result<DataElements, ModelError> {
        match supplied {
            Some(elements) => {
                if elements.transfer_type() != transfer_type {
                    return Err(ModelError::TypeMismatch {
                        expected: transfer_type,
                        found: elements.transfer_type(),
                    });
                }
                if elements.is_empty() {
                    return Err(ModelError::OutOfBounds {
                        required: 1,
                        available: 0,
                    });
                }
                Ok(elements)
            }
            None => DataElements::zeroed(transfer_type, 1),
        }
    }
}

#[inline]
fn first_element<T: AsPrimitive<u32>>(data: &[T]) -> Result<u32, ModelError> {
    data.first().map(|v| v.as_()).ok_or(ModelError::OutOfBounds {
        required: 1,
        available: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transfer_type_follows_pixel_width() {
        assert_eq!(TransferType::for_pixel_bits(1), TransferType::Byte);
        assert_eq!(TransferType::for_pixel_bits(8), TransferType::Byte);
        assert_eq!(TransferType::for_pixel_bits(9), TransferType::UShort);
        assert_eq!(TransferType::for_pixel_bits(16), TransferType::UShort);
        assert_eq!(TransferType::for_pixel_bits(24), TransferType::Int);
        assert_eq!(TransferType::for_pixel_bits(32), TransferType::Int);
        assert_eq!(TransferType::for_pixel_bits(33), TransferType::Undefined);
    }

    #[test]
    fn transparency_from_raw() {
        assert_eq!(Transparency::try_from(1), Ok(Transparency::Opaque));
        assert_eq!(Transparency::try_from(3), Ok(Transparency::Translucent));
        assert_eq!(
            Transparency::try_from(4),
            Err(ModelError::UnknownTransparency(4))
        );
        assert_eq!(
            Transparency::try_from(0),
            Err(ModelError::UnknownTransparency(0))
        );
    }

    #[test]
    fn packed_pixel_is_zero_extended() {
        let bytes = DataElements::Byte(vec![0xfe]);
        assert_eq!(bytes.packed_pixel(TransferType::Byte), Ok((0xfe, 1)));
        let shorts = DataElements::UShort(vec![0xfffe, 3]);
        assert_eq!(shorts.packed_pixel(TransferType::UShort), Ok((0xfffe, 2)));
    }

    #[test]
    fn packed_pixel_reports_mismatch_and_unsupported() {
        let bytes = DataElements::Byte(vec![1]);
        assert!(matches!(
            bytes.packed_pixel(TransferType::Int),
            Err(ModelError::TypeMismatch { .. })
        ));
        let floats = DataElements::Float(vec![1.]);
        assert_eq!(
            floats.packed_pixel(TransferType::Float),
            Err(ModelError::UnsupportedTransferType(TransferType::Float))
        );
        let empty = DataElements::Int(vec![]);
        assert!(matches!(
            empty.packed_pixel(TransferType::Int),
            Err(ModelError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn store_truncates_to_element() {
        let mut elements = DataElements::Byte(vec![0]);
        elements.store_packed_pixel(0x1ff).unwrap();
        assert_eq!(elements, DataElements::Byte(vec![0xff]));
    }
}
