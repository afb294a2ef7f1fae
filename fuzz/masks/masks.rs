#![no_main]

use libfuzzer_sys::fuzz_target;
use moxmodel::{ColorModel, ErrorKind, RgbMasks, decompose_mask};

fuzz_target!(|data: (u8, u32, u32, u32, u32)| {
    let pixel_bits = data.0 as u32 % 34;
    for mask in [data.1, data.2, data.3, data.4] {
        if let Ok(bits) = moxmodel::count_contiguous_bits(mask) {
            assert_eq!(bits, mask.count_ones());
            if let Ok(layout) = decompose_mask(mask, bits, pixel_bits) {
                assert!(layout.offset + layout.bits <= pixel_bits);
            }
        }
    }
    match ColorModel::new_direct(pixel_bits, RgbMasks::new(data.1, data.2, data.3, data.4)) {
        Ok(model) => {
            let masks = model.packed().unwrap().masks();
            for (i, &a) in masks.iter().enumerate() {
                for &b in &masks[i + 1..] {
                    assert_eq!(a & b, 0);
                }
            }
        }
        Err(err) => assert_eq!(err.kind(), ErrorKind::Configuration),
    }
});
