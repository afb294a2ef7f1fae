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
use moxmodel::{ColorModel, ColorSpace, LutCache, PackedOptions, RgbConversion, RgbMasks};
use rand::Rng;

fn describe(name: &str, model: &ColorModel) {
    let conversion = model
        .direct()
        .map(|direct| direct.conversion())
        .unwrap_or(RgbConversion::General);
    println!("{name}: {model} ({conversion:?})");
    for argb in [0xff000000u32, 0xffffffff, 0x80ff8000, 0xff336699] {
        let elements = model.data_elements_from_rgb(argb, None).unwrap();
        let back = model.rgb_of(&elements).unwrap();
        println!("  {argb:#010x} -> {elements:?} -> {back:#010x}");
    }
}

fn main() {
    let linear = ColorModel::new_direct_with_options(
        32,
        RgbMasks::ARGB,
        PackedOptions {
            color_space: ColorSpace::linear_rgb(),
            ..Default::default()
        },
    )
    .unwrap();
    let premultiplied = ColorModel::new_direct_with_options(
        32,
        RgbMasks::ARGB,
        PackedOptions {
            premultiplied: true,
            ..Default::default()
        },
    )
    .unwrap();
    let rgb565 = ColorModel::new_direct(16, RgbMasks::RGB_565).unwrap();
    let gray = ColorModel::new_packed(
        16,
        &[0xffff],
        0,
        PackedOptions {
            color_space: ColorSpace::gray_with_gamma(2.2),
            ..Default::default()
        },
    )
    .unwrap();

    describe("default", ColorModel::rgb_default());
    describe("linear", &linear);
    describe("premultiplied", &premultiplied);
    describe("565", &rgb565);
    describe("gray", &gray);

    let mut rng = rand::rng();
    let mut max_error = 0u32;
    for _ in 0..100_000 {
        let argb = rng.random::<u32>() | 0xff000000;
        let elements = linear.data_elements_from_rgb(argb, None).unwrap();
        let back = linear.rgb_of(&elements).unwrap();
        for shift in [0, 8, 16] {
            let diff = ((argb >> shift) & 0xff).abs_diff((back >> shift) & 0xff);
            max_error = max_error.max(diff);
        }
    }
    println!("linear RGB 8-bit round trip max error: {max_error}");

    let raster = premultiplied.create_compatible_raster(2, 1).unwrap();
    raster
        .set_pixels(0, 0, 2, 1, &[0x80, 0x40, 0x00, 0x80, 0x10, 0x08, 0x00, 0x20])
        .unwrap();
    let straight = premultiplied.coerce_data(&raster, false).unwrap();
    let mut samples = [0u32; 8];
    raster.pixels(0, 0, 2, 1, &mut samples).unwrap();
    println!(
        "coerced to premultiplied={}: {:?} {:?}",
        straight.is_alpha_premultiplied(),
        raster.data_elements(0, 0).unwrap(),
        samples
    );
    println!(
        "gray tables cached: {}",
        LutCache::global().cached_gray_tables()
    );
}
