use crate::angle::deviation_from_horizontal_deg;
use crate::types::Axis;
use serde::Serialize;

/// Line segment produced by the extractor, endpoints in pixel coordinates.
#[derive(Clone, Debug, Serialize)]
pub struct Segment {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    pub avg_mag: f32,
    /// `length * avg_mag`, a saliency weight.
    pub strength: f32,
}

impl Segment {
    pub fn new(p0: [f32; 2], p1: [f32; 2], avg_mag: f32) -> Self {
        let mut seg = Self {
            p0,
            p1,
            avg_mag,
            strength: 0.0,
        };
        seg.strength = seg.length() * avg_mag.max(1e-3);
        seg
    }

    pub fn midpoint(&self) -> [f32; 2] {
        [
            (self.p0[0] + self.p1[0]) * 0.5,
            (self.p0[1] + self.p1[1]) * 0.5,
        ]
    }

    pub fn length(&self) -> f32 {
        let dx = self.p1[0] - self.p0[0];
        let dy = self.p1[1] - self.p0[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Unit tangent from `p0` to `p1`; zero for degenerate segments.
    pub fn direction(&self) -> [f32; 2] {
        let len = self.length();
        if len > 0.0 {
            [
                (self.p1[0] - self.p0[0]) / len,
                (self.p1[1] - self.p0[1]) / len,
            ]
        } else {
            [0.0, 0.0]
        }
    }

    /// Which image axis the segment runs along, if within `tolerance_deg`.
    ///
    /// `Axis::X` means horizontal (a candidate for the top or bottom frame
    /// edge), `Axis::Y` vertical.
    pub fn axis_alignment(&self, tolerance_deg: f32) -> Option<Axis> {
        if self.length() <= 0.0 {
            return None;
        }
        let dev = deviation_from_horizontal_deg(self.direction());
        if dev <= tolerance_deg {
            Some(Axis::X)
        } else if dev >= 90.0 - tolerance_deg {
            Some(Axis::Y)
        } else {
            None
        }
    }

    /// Extent along the given axis, `(min, max)`.
    pub fn span(&self, axis: Axis) -> (f32, f32) {
        let i = match axis {
            Axis::X => 0,
            Axis::Y => 1,
        };
        (self.p0[i].min(self.p1[i]), self.p0[i].max(self.p1[i]))
    }
}
