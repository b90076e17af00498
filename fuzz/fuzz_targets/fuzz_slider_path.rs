#![no_main]

use libfuzzer_sys::fuzz_target;
use osucad_editor_core::SliderPath;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        if let Ok(path) = serde_json::from_str::<SliderPath>(json) {
            let calculated = path.calculated_path();
            let _ = path.position_at(0.5);
            let _ = path.end_position();
            assert_eq!(calculated.points().len(), calculated.cumulative_distance().len());
        }
    }
});
