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
use crate::{ModelError, TransferType};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug)]
enum Storage {
    Byte(Vec<u8>),
    UShort(Vec<u16>),
    Int(Vec<u32>),
}

/// Shared pixel storage of a raster.
///
/// Clones share the same storage, writes through any clone are visible in all of them.
#[derive(Debug, Clone)]
pub struct DataBuffer {
    storage: Arc<RwLock<Storage>>,
    size: usize,
    data_type: TransferType,
}

impl DataBuffer {
    /// Zero filled buffer of `size` elements
    pub fn new(data_type: TransferType, size: usize) -> Result<DataBuffer, ModelError> {
        let storage = match data_type {
            TransferType::Byte => Storage::Byte(vec![0; size]),
            TransferType::UShort => Storage::UShort(vec![0; size]),
            TransferType::Int => Storage::Int(vec![0; size]),
            _ => return Err(ModelError::InvalidTransferType(data_type)),
        };
        Ok(DataBuffer::from_storage(storage, size, data_type))
    }

    pub fn from_bytes(data: Vec<u8>) -> DataBuffer {
        let size = data.len();
        DataBuffer::from_storage(Storage::Byte(data), size, TransferType::Byte)
    }

    pub fn from_ushorts(data: Vec<u16>) -> DataBuffer {
        let size = data.len();
        DataBuffer::from_storage(Storage::UShort(data), size, TransferType::UShort)
    }

    pub fn from_ints(data: Vec<u32>) -> DataBuffer {
        let size = data.len();
        DataBuffer::from_storage(Storage::Int(data), size, TransferType::Int)
    }

    fn from_storage(storage: Storage, size: usize, data_type: TransferType) -> DataBuffer {
        DataBuffer {
            storage: Arc::new(RwLock::new(storage)),
            size,
            data_type,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn data_type(&self) -> TransferType {
        self.data_type
    }

    /// Whether both buffers are views on the same storage
    pub fn ptr_eq(&self, other: &DataBuffer) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<(), ModelError> {
        if index >= self.size {
            return Err(ModelError::OutOfBounds {
                required: index + 1,
                available: self.size,
            });
        }
        Ok(())
    }

    /// Element at `index`, zero extended
    pub fn elem(&self, index: usize) -> Result<u32, ModelError> {
        self.check_index(index)?;
        let storage = self.storage.read().unwrap_or_else(PoisonError::into_inner);
        Ok(match &*storage {
            Storage::Byte(v) => v[index] as u32,
            Storage::UShort(v) => v[index] as u32,
            Storage::Int(v) => v[index],
        })
    }

    /// Stores `value` truncated to the element width
    pub fn set_elem(&self, index: usize, value: u32) -> Result<(), ModelError> {
        self.check_index(index)?;
        let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
        match &mut *storage {
            Storage::Byte(v) => v[index] = value as u8,
            Storage::UShort(v) => v[index] = value as u16,
            Storage::Int(v) => v[index] = value,
        }
        Ok(())
    }

    /// Snapshot of all elements, zero extended
    pub fn to_vec(&self) -> Vec<u32> {
        let storage = self.storage.read().unwrap_or_else(PoisonError::into_inner);
        match &*storage {
            Storage::Byte(v) => v.iter().map(|&x| x as u32).collect(),
            Storage::UShort(v) => v.iter().map(|&x| x as u32).collect(),
            Storage::Int(v) => v.clone(),
        }
    }
}
