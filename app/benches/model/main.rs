/*
 * // Copyright 2026 (c) the Radzivon Bartoshyk. All rights reserved.
 * //
 * // Use of this source code is governed by a BSD-style
 * // license that can be found in the LICENSE file.
 */
use criterion::{Criterion, criterion_group, criterion_main};
use moxmodel::{ColorModel, ColorSpace, PackedOptions, RgbConverter, RgbMasks};
use rand::Rng;

fn model_in(color_space: ColorSpace, premultiplied: bool) -> ColorModel {
    ColorModel::new_direct_with_options(
        32,
        RgbMasks::ARGB,
        PackedOptions {
            color_space,
            premultiplied,
            ..Default::default()
        },
    )
    .unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rand::rng();
    let pixels: Vec<u32> = (0..4096).map(|_| rng.random::<u32>()).collect();

    let models = [
        ("sRGB", model_in(ColorSpace::srgb(), false)),
        ("sRGB premultiplied", model_in(ColorSpace::srgb(), true)),
        ("linear RGB", model_in(ColorSpace::linear_rgb(), false)),
        (
            "Display P3",
            model_in(ColorSpace::new(RgbConverter::display_p3()), false),
        ),
    ];

    for (name, model) in models.iter() {
        c.bench_function(&format!("moxmodel: {name} pixel -> ARGB"), |b| {
            b.iter(|| pixels.iter().fold(0u32, |acc, &px| acc ^ model.rgb(px)))
        });

        c.bench_function(&format!("moxmodel: {name} ARGB -> pixel"), |b| {
            b.iter(|| {
                for &px in pixels.iter() {
                    model.data_elements_from_rgb(px, None).unwrap();
                }
            })
        });
    }

    c.bench_function("moxmodel: 565 components round trip", |b| {
        let model = ColorModel::new_direct(16, RgbMasks::RGB_565).unwrap();
        let mut components = [0u32; 3];
        b.iter(|| {
            for px in 0..=0xffffu32 {
                model.components_into(px, &mut components, 0).unwrap();
                model.data_element(&components, 0).unwrap();
            }
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
