//! Kontrollpunkte eines Slider-Pfads.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Kurventyp eines Pfad-Segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentType {
    /// Bézier-Kurve beliebigen Grades
    Bezier,
    /// Catmull-Rom-Spline durch alle Punkte
    Catmull,
    /// Polyline, Punkte werden unverändert übernommen
    Linear,
    /// Kreisbogen durch genau drei Punkte
    PerfectCurve,
}

/// Ein Kontrollpunkt eines Slider-Pfads.
///
/// Ein gesetzter `segment_type` startet ein neues Segment. Kontrollpunkte werden
/// nie in-place verändert, sondern über `with_position`/`with_type` ersetzt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SerializedPathPoint", into = "SerializedPathPoint")]
pub struct PathPoint {
    /// Position relativ zum Slider-Kopf
    pub position: Vec2,
    /// Segment-Start-Markierung
    pub segment_type: Option<SegmentType>,
}

impl PathPoint {
    /// Erstellt einen Kontrollpunkt ohne Segment-Markierung.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            segment_type: None,
        }
    }

    /// Erstellt einen Kontrollpunkt, der ein Segment vom Typ `segment_type` startet.
    pub fn with_segment(position: Vec2, segment_type: SegmentType) -> Self {
        Self {
            position,
            segment_type: Some(segment_type),
        }
    }

    /// Kopie mit neuer Position.
    pub fn with_position(self, position: Vec2) -> Self {
        Self { position, ..self }
    }

    /// Kopie mit neuem Segment-Typ.
    pub fn with_type(self, segment_type: Option<SegmentType>) -> Self {
        Self {
            segment_type,
            ..self
        }
    }
}

/// JSON-Form eines Kontrollpunkts: `{ x, y, type }`.
#[derive(Serialize, Deserialize)]
struct SerializedPathPoint {
    x: f32,
    y: f32,
    #[serde(rename = "type", default)]
    segment_type: Option<SegmentType>,
}

impl TryFrom<SerializedPathPoint> for PathPoint {
    type Error = anyhow::Error;

    fn try_from(value: SerializedPathPoint) -> anyhow::Result<Self> {
        if !value.x.is_finite() || !value.y.is_finite() {
            anyhow::bail!("Kontrollpunkt mit ungültiger Koordinate ({}, {})", value.x, value.y);
        }
        Ok(Self {
            position: Vec2::new(value.x, value.y),
            segment_type: value.segment_type,
        })
    }
}

impl From<PathPoint> for SerializedPathPoint {
    fn from(value: PathPoint) -> Self {
        Self {
            x: value.position.x,
            y: value.position.y,
            segment_type: value.segment_type,
        }
    }
}

/// Aus den Kontrollpunkten abgeleitetes Segment (wird nicht gespeichert).
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment<'a> {
    /// Kurventyp des Segments
    pub segment_type: SegmentType,
    /// Kontrollpunkte inklusive beider Grenzpunkte
    pub points: &'a [PathPoint],
}

/// Zerlegt Kontrollpunkte in überlappende Segmente.
///
/// Jeder Punkt mit Typ startet ein neues Segment, der letzte Punkt des vorigen
/// Segments ist gleichzeitig der erste des nächsten. Der letzte Punkt schließt
/// immer das letzte Segment, auch wenn er selbst einen Typ trägt.
/// Ein untypisierter erster Punkt wird als Bézier-Start behandelt.
pub fn split_segments(control_points: &[PathPoint]) -> Vec<PathSegment<'_>> {
    let Some(first) = control_points.first() else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut segment_start = 0;
    let mut segment_type = first.segment_type.unwrap_or(SegmentType::Bezier);
    let last_index = control_points.len() - 1;

    for (i, point) in control_points.iter().enumerate().skip(1) {
        if point.segment_type.is_some() || i == last_index {
            segments.push(PathSegment {
                segment_type,
                points: &control_points[segment_start..=i],
            });
            segment_start = i;
            if let Some(next_type) = point.segment_type {
                segment_type = next_type;
            }
        }
    }

    segments
}
