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
use crate::TransferType;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Broad class of a [ModelError].
///
/// Configuration and type mismatch errors are programming errors.
/// Not supported errors may be probed by callers choosing a different model or code path.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Malformed constructor arguments, always detected eagerly
    Configuration,
    /// Operation is valid in general but not for this model or configuration
    NotSupported,
    /// Wrong primitive array type for the model transfer type
    TypeMismatch,
    /// Array or coordinate is out of range
    Bounds,
}

#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ModelError {
    InvalidPixelBits(u32),
    BitsArrayTooShort { expected: usize, found: usize },
    AllComponentsZeroBits,
    UnknownTransparency(i32),
    NonContiguousMask { index: usize, mask: u32 },
    MaskOverflow { index: usize, mask: u32, pixel_bits: u32 },
    OverlappingMasks { first: usize, second: usize },
    ColorFamilyMismatch,
    InvalidComponentRange(usize),
    InvalidTransferType(TransferType),
    InvalidDimensions { width: i32, height: i32 },
    NoBands,
    LaneSizeMismatch,
    LaneMultipleOfChannels,
    UnsupportedOperation(&'static str),
    UnsupportedTransferType(TransferType),
    TypeMismatch { expected: TransferType, found: TransferType },
    OutOfBounds { required: usize, available: usize },
    CoordinateOutOfBounds { x: i32, y: i32 },
    BandOutOfBounds(usize),
}

impl ModelError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ModelError::InvalidPixelBits(_)
            | ModelError::BitsArrayTooShort { .. }
            | ModelError::AllComponentsZeroBits
            | ModelError::UnknownTransparency(_)
            | ModelError::NonContiguousMask { .. }
            | ModelError::MaskOverflow { .. }
            | ModelError::OverlappingMasks { .. }
            | ModelError::ColorFamilyMismatch
            | ModelError::InvalidComponentRange(_)
            | ModelError::InvalidTransferType(_)
            | ModelError::InvalidDimensions { .. }
            | ModelError::NoBands
            | ModelError::LaneSizeMismatch
            | ModelError::LaneMultipleOfChannels => ErrorKind::Configuration,
            ModelError::UnsupportedOperation(_) | ModelError::UnsupportedTransferType(_) => {
                ErrorKind::NotSupported
            }
            ModelError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ModelError::OutOfBounds { .. }
            | ModelError::CoordinateOutOfBounds { .. }
            | ModelError::BandOutOfBounds(_) => ErrorKind::Bounds,
        }
    }
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidPixelBits(bits) => {
                write!(f, "Number of pixel bits must be in 1..=32, got {bits}")
            }
            ModelError::BitsArrayTooShort { expected, found } => write!(
                f,
                "Expected {expected} color/alpha components, bits array has {found}"
            ),
            ModelError::AllComponentsZeroBits => {
                f.write_str("There must be at least one component with > 0 pixel bits")
            }
            ModelError::UnknownTransparency(value) => write!(f, "Unknown transparency: {value}"),
            ModelError::NonContiguousMask { index, mask } => {
                write!(f, "Noncontiguous mask ({mask:x}) at index {index}")
            }
            ModelError::MaskOverflow {
                index,
                mask,
                pixel_bits,
            } => write!(
                f,
                "Mask {mask:x} at index {index} overflows pixel (expecting {pixel_bits} bits)"
            ),
            ModelError::OverlappingMasks { first, second } => {
                write!(f, "Masks at index {first} and {second} overlap")
            }
            ModelError::ColorFamilyMismatch => {
                f.write_str("Color space family does not match the color model")
            }
            ModelError::InvalidComponentRange(index) => write!(
                f,
                "Illegal min/max component value at index {index}, expected 0.0..1.0"
            ),
            ModelError::InvalidTransferType(ty) => {
                write!(f, "Transfer type {ty:?} is not valid for this model")
            }
            ModelError::InvalidDimensions { width, height } => write!(
                f,
                "Width ({width}) and height ({height}) cannot be <= 0"
            ),
            ModelError::NoBands => f.write_str("Sample model needs at least one band"),
            ModelError::LaneSizeMismatch => f.write_str("Lanes length must match"),
            ModelError::LaneMultipleOfChannels => {
                f.write_str("Lane length must be multiple of channel count")
            }
            ModelError::UnsupportedOperation(op) => {
                write!(f, "{op} is not supported by this color model")
            }
            ModelError::UnsupportedTransferType(ty) => {
                write!(f, "This method has not been implemented for transfer type {ty:?}")
            }
            ModelError::TypeMismatch { expected, found } => write!(
                f,
                "Pixel array of type {found:?} does not match transfer type {expected:?}"
            ),
            ModelError::OutOfBounds {
                required,
                available,
            } => write!(
                f,
                "Array is too short: required {required} elements, available {available}"
            ),
            ModelError::CoordinateOutOfBounds { x, y } => {
                write!(f, "Coordinate ({x}, {y}) is out of bounds")
            }
            ModelError::BandOutOfBounds(band) => write!(f, "Band {band} is out of bounds"),
        }
    }
}

impl Error for ModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinguishable() {
        assert_eq!(
            ModelError::UnsupportedTransferType(TransferType::Float).kind(),
            ErrorKind::NotSupported
        );
        assert_eq!(
            ModelError::TypeMismatch {
                expected: TransferType::Int,
                found: TransferType::Byte
            }
            .kind(),
            ErrorKind::TypeMismatch
        );
        assert_eq!(
            ModelError::NonContiguousMask { index: 0, mask: 0b1011 }.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(ModelError::NoBands.kind(), ErrorKind::Configuration);
        assert_eq!(
            ModelError::OutOfBounds {
                required: 4,
                available: 3
            }
            .kind(),
            ErrorKind::Bounds
        );
    }

    #[test]
    fn display_mentions_mask() {
        let message = ModelError::MaskOverflow {
            index: 3,
            mask: 0xff00_0000,
            pixel_bits: 24,
        }
        .to_string();
        assert!(message.contains("ff000000"));
        assert!(message.contains("24"));
    }
}
