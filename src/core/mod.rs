//! Core-Domänentypen: Beatmap, Hit-Objects und Slider-Pfad-Geometrie.

pub mod beatmap;
pub mod calculated_path;
pub mod hit_object;
pub mod path_point;
pub mod path_range;
pub mod slider_path;

pub use beatmap::Beatmap;
pub use calculated_path::CalculatedPath;
pub use hit_object::{HitObject, HitObjectId, HitObjectKind};
pub use path_point::{split_segments, PathPoint, PathSegment, SegmentType};
pub use path_range::PathRange;
pub use slider_path::SliderPath;
