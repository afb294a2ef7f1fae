/*
 * // Copyright 2026 (c) the Radzivon Bartoshyk. All rights reserved.
 * //
 * // Use of this source code is governed by a BSD-style
 * // license that can be found in the LICENSE file.
 */
use criterion::{Criterion, criterion_group, criterion_main};
use moxmodel::{ColorSpace, ColorTransform, LutCache, LutCacheOptions, TransformExecutor};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("moxmodel: fixed sRGB tables", |b| {
        b.iter(|| {
            let cache = LutCache::new(LutCacheOptions::default());
            cache.linear8_to_srgb8();
            cache.srgb8_to_linear8();
            cache.linear16_to_srgb8();
            cache.srgb8_to_linear16();
        })
    });

    c.bench_function("moxmodel: device gray 16 -> sRGB 8 table", |b| {
        let gray = ColorSpace::gray_with_gamma(2.2);
        b.iter(|| {
            let cache = LutCache::new(LutCacheOptions { gray_capacity: 1 });
            cache.gray16_to_srgb8(&gray).unwrap();
        })
    });

    c.bench_function("moxmodel: cached gray table lookup", |b| {
        let gray = ColorSpace::gray_with_gamma(1.8);
        let cache = LutCache::global();
        cache.linear_gray16_to_gray16(&gray).unwrap();
        b.iter(|| {
            cache.linear_gray16_to_gray16(&gray).unwrap();
        })
    });

    c.bench_function("moxmodel: gray u16 -> sRGB transform", |b| {
        let transform = ColorTransform::new(&ColorSpace::gray_with_gamma(2.2), &ColorSpace::srgb());
        let src: Vec<u16> = (0..=65535u16).collect();
        let mut dst = vec![0u16; src.len() * 3];
        b.iter(|| {
            transform.transform(&src, &mut dst).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
