#![no_main]

use libfuzzer_sys::fuzz_target;
use moxmodel::{ColorModel, ColorSpace, PackedOptions, RgbMasks};

fuzz_target!(|data: (u8, u32, u32, u32, u32, u32, bool, bool)| {
    let pixel_bits = data.0 as u32 % 33;
    let color_space = if data.7 {
        ColorSpace::linear_rgb()
    } else {
        ColorSpace::srgb()
    };
    let Ok(model) = ColorModel::new_direct_with_options(
        pixel_bits,
        RgbMasks::new(data.1, data.2, data.3, data.4),
        PackedOptions {
            color_space,
            premultiplied: data.6,
            ..Default::default()
        },
    ) else {
        return;
    };
    let covered = model
        .packed()
        .unwrap()
        .masks()
        .iter()
        .fold(0u32, |acc, &m| acc | m);
    let pixel = data.5 & covered;

    let components = model.components(pixel).unwrap();
    assert_eq!(model.data_element(&components, 0).unwrap(), pixel);

    let argb = model.rgb(pixel);
    assert_eq!(argb >> 24, model.alpha(pixel));
    let elements = model.data_elements_from_rgb(data.5, None).unwrap();
    assert_eq!(elements.transfer_type(), model.transfer_type());

    let normalized = model.normalized_components(&components, 0).unwrap();
    for v in normalized {
        assert!(v.is_finite());
    }
});
