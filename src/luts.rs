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
use crate::gamma::{
    make_linear8_to_srgb8, make_linear16_to_srgb8, make_srgb8_to_linear8, make_srgb8_to_linear16,
};
use crate::transform::{ColorTransform, TransformExecutor};
use crate::{ColorFamily, ColorSpace, ModelError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Output channel of a gray -> sRGB conversion used as the table value.
///
/// All three channels agree to within rounding for the built-in converters,
/// green is the one closest to luminance.
const GRAY_REPRESENTATIVE_CHANNEL: usize = 1;

/// Declares lookup table cache options
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct LutCacheOptions {
    /// Maximum count of gray spaces kept per table family,
    /// the oldest inserted space is evicted first.
    pub gray_capacity: usize,
}

impl Default for LutCacheOptions {
    fn default() -> Self {
        Self { gray_capacity: 16 }
    }
}

#[derive(Debug)]
struct KeyedEntries<T> {
    tables: HashMap<u64, Arc<[T]>>,
    insertion_order: VecDeque<u64>,
}

/// Tables keyed by color space identity
#[derive(Debug)]
struct KeyedTables<T> {
    name: &'static str,
    capacity: usize,
    entries: RwLock<KeyedEntries<T>>,
}

impl<T> KeyedTables<T> {
    fn new(name: &'static str, capacity: usize) -> Self {
        KeyedTables {
            name,
            capacity: capacity.max(1),
            entries: RwLock::new(KeyedEntries {
                tables: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
        }
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tables
            .len()
    }

    fn get_or_build(
        &self,
        key: u64,
        build: impl FnOnce() -> Result<Box<[T]>, ModelError>,
    ) -> Result<Arc<[T]>, ModelError> {
        if let Some(table) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tables
            .get(&key)
        {
            return Ok(table.clone());
        }

        // Built outside of the lock, a concurrent build of the same key is discarded
        let table: Arc<[T]> = Arc::from(build()?);

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.tables.get(&key) {
            return Ok(existing.clone());
        }
        entries.tables.insert(key, table.clone());
        entries.insertion_order.push_back(key);
        while entries.tables.len() > self.capacity {
            let Some(evicted) = entries.insertion_order.pop_front() else {
                break;
            };
            entries.tables.remove(&evicted);
            log::debug!("Evicted {} table of color space {}", self.name, evicted);
        }
        Ok(table)
    }
}

/// Memoized conversion tables between linear and non-linear encodings.
///
/// The four fixed sRGB tables are computed once on first use.
/// Gray tables are computed per gray color space through its converter.
#[derive(Debug)]
pub struct LutCache {
    linear8_to_srgb8: OnceLock<Arc<[u8]>>,
    srgb8_to_linear8: OnceLock<Arc<[u8]>>,
    linear16_to_srgb8: OnceLock<Arc<[u8]>>,
    srgb8_to_linear16: OnceLock<Arc<[u16]>>,
    gray8_to_srgb8: KeyedTables<u8>,
    gray16_to_srgb8: KeyedTables<u8>,
    linear_gray16_to_gray8: KeyedTables<u8>,
    linear_gray16_to_gray16: KeyedTables<u16>,
}

impl Default for LutCache {
    fn default() -> Self {
        LutCache::new(LutCacheOptions::default())
    }
}

fn memoized<T>(cell: &OnceLock<Arc<[T]>>, name: &str, make: fn() -> Box<[T]>) -> Arc<[T]> {
    cell.get_or_init(|| {
        log::debug!("Building {name} table");
        Arc::from(make())
    })
    .clone()
}

#[inline]
fn scale_u16_to_u8(v: u16) -> u8 {
    (v as f32 * (1.0f32 / 257.0f32) + 0.5f32) as u8
}

impl LutCache {
    pub fn new(options: LutCacheOptions) -> LutCache {
        let capacity = options.gray_capacity;
        LutCache {
            linear8_to_srgb8: OnceLock::new(),
            srgb8_to_linear8: OnceLock::new(),
            linear16_to_srgb8: OnceLock::new(),
            srgb8_to_linear16: OnceLock::new(),
            gray8_to_srgb8: KeyedTables::new("gray8 -> sRGB8", capacity),
            gray16_to_srgb8: KeyedTables::new("gray16 -> sRGB8", capacity),
            linear_gray16_to_gray8: KeyedTables::new("linear gray16 -> gray8", capacity),
            linear_gray16_to_gray16: KeyedTables::new("linear gray16 -> gray16", capacity),
        }
    }

    /// Process wide cache used by the color models
    pub fn global() -> &'static LutCache {
        static GLOBAL: OnceLock<LutCache> = OnceLock::new();
        GLOBAL.get_or_init(LutCache::default)
    }

    /// 256 entries, 8-bit linear RGB to 8-bit non-linear sRGB
    pub fn linear8_to_srgb8(&self) -> Arc<[u8]> {
        memoized(
            &self.linear8_to_srgb8,
            "linear8 -> sRGB8",
            make_linear8_to_srgb8,
        )
    }

    /// 256 entries, 8-bit non-linear sRGB to 8-bit linear RGB
    pub fn srgb8_to_linear8(&self) -> Arc<[u8]> {
        memoized(
            &self.srgb8_to_linear8,
            "sRGB8 -> linear8",
            make_srgb8_to_linear8,
        )
    }

    /// 65536 entries, 16-bit linear RGB to 8-bit non-linear sRGB
    pub fn linear16_to_srgb8(&self) -> Arc<[u8]> {
        memoized(
            &self.linear16_to_srgb8,
            "linear16 -> sRGB8",
            make_linear16_to_srgb8,
        )
    }

    /// 256 entries, 8-bit non-linear sRGB to 16-bit linear RGB
    pub fn srgb8_to_linear16(&self) -> Arc<[u16]> {
        memoized(
            &self.srgb8_to_linear16,
            "sRGB8 -> linear16",
            make_srgb8_to_linear16,
        )
    }

    /// 256 entries, 8-bit device gray to 8-bit sRGB
    pub fn gray8_to_srgb8(&self, gray: &ColorSpace) -> Result<Arc<[u8]>, ModelError> {
        ensure_gray(gray)?;
        if gray.is_linear_gray() {
            return Ok(self.linear8_to_srgb8());
        }
        self.gray8_to_srgb8.get_or_build(gray.id(), || {
            let src: Vec<u8> = (0..=255u8).collect();
            let mut rgb = vec![0u8; src.len() * 3];
            ColorTransform::new(gray, &ColorSpace::srgb()).transform(&src, &mut rgb)?;
            Ok(rgb
                .chunks_exact(3)
                .map(|px| px[GRAY_REPRESENTATIVE_CHANNEL])
                .collect())
        })
    }

    /// 65536 entries, 16-bit device gray to 8-bit sRGB
    pub fn gray16_to_srgb8(&self, gray: &ColorSpace) -> Result<Arc<[u8]>, ModelError> {
        ensure_gray(gray)?;
        if gray.is_linear_gray() {
            return Ok(self.linear16_to_srgb8());
        }
        self.gray16_to_srgb8.get_or_build(gray.id(), || {
            let src: Vec<u16> = (0..=65535u16).collect();
            let mut rgb = vec![0u16; src.len() * 3];
            ColorTransform::new(gray, &ColorSpace::srgb()).transform(&src, &mut rgb)?;
            Ok(rgb
                .chunks_exact(3)
                .map(|px| scale_u16_to_u8(px[GRAY_REPRESENTATIVE_CHANNEL]))
                .collect())
        })
    }

    /// 65536 entries, 16-bit linear gray to 8-bit device gray
    pub fn linear_gray16_to_gray8(&self, gray: &ColorSpace) -> Result<Arc<[u8]>, ModelError> {
        ensure_gray(gray)?;
        self.linear_gray16_to_gray8.get_or_build(gray.id(), || {
            let device = linear_gray16_to_device(gray)?;
            Ok(device.iter().map(|&v| scale_u16_to_u8(v)).collect())
        })
    }

    /// 65536 entries, 16-bit linear gray to 16-bit device gray
    pub fn linear_gray16_to_gray16(&self, gray: &ColorSpace) -> Result<Arc<[u16]>, ModelError> {
        ensure_gray(gray)?;
        self.linear_gray16_to_gray16
            .get_or_build(gray.id(), || linear_gray16_to_device(gray))
    }

    /// Count of gray tables currently held across all families
    pub fn cached_gray_tables(&self) -> usize {
        self.gray8_to_srgb8.len()
            + self.gray16_to_srgb8.len()
            + self.linear_gray16_to_gray8.len()
            + self.linear_gray16_to_gray16.len()
    }
}

fn ensure_gray(space: &ColorSpace) -> Result<(), ModelError> {
    if space.family() != ColorFamily::Gray {
        return Err(ModelError::ColorFamilyMismatch);
    }
    Ok(())
}

fn linear_gray16_to_device(gray: &ColorSpace) -> Result<Box<[u16]>, ModelError> {
    let src: Vec<u16> = (0..=65535u16).collect();
    let mut dst = vec![0u16; src.len()];
    ColorTransform::new(&ColorSpace::linear_gray(), gray).transform(&src, &mut dst)?;
    Ok(dst.into_boxed_slice())
}
