#![no_main]

use libfuzzer_sys::fuzz_target;
use moxmodel::{ColorModel, Raster};

fuzz_target!(|data: (u8, u8, i32, i32, i16, i16, i16, i16, u32)| {
    let width = data.0 as i32 % 32;
    let height = data.1 as i32 % 32;
    let model = ColorModel::rgb_default();
    let Ok(raster) = model.create_compatible_raster(width, height) else {
        return;
    };
    let Ok(raster) = raster.create_translated_child(data.2, data.3) else {
        return;
    };
    let child = raster.create_child(
        data.4 as i32,
        data.5 as i32,
        data.6 as i32,
        data.7 as i32,
        0,
        0,
        None,
    );
    if let Ok(child) = child {
        let _ = child.set_pixel(0, 0, &[1, 2, 3, 4]);
        fill(&child, data.8);
        assert!(child.data_buffer().ptr_eq(raster.data_buffer()));
    }
    let _ = model.coerce_data(&raster, true);
});

fn fill(raster: &Raster, value: u32) {
    let (x0, y0, w, h) = raster.bounds();
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            raster.set_sample(x, y, 3, value).unwrap();
        }
    }
}
