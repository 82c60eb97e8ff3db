use std::fmt;

/// Client primitive modes accepted by `draw_arrays`/`draw_elements`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl PrimitiveMode {
    pub const fn is_triangle_mode(self) -> bool {
        matches!(
            self,
            Self::Triangles | Self::TriangleStrip | Self::TriangleFan
        )
    }

    /// Number of primitives `count` vertices assemble into.
    pub const fn primitive_count(self, count: u32) -> u32 {
        match self {
            Self::Points => count,
            Self::Lines => count / 2,
            Self::LineLoop => {
                if count >= 2 {
                    count
                } else {
                    0
                }
            }
            Self::LineStrip => count.saturating_sub(1),
            Self::Triangles => count / 3,
            Self::TriangleStrip | Self::TriangleFan => count.saturating_sub(2),
        }
    }
}

impl fmt::Display for PrimitiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrimitiveMode::Points => "points",
            PrimitiveMode::Lines => "lines",
            PrimitiveMode::LineLoop => "line_loop",
            PrimitiveMode::LineStrip => "line_strip",
            PrimitiveMode::Triangles => "triangles",
            PrimitiveMode::TriangleStrip => "triangle_strip",
            PrimitiveMode::TriangleFan => "triangle_fan",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimitiveTopologyTranslation {
    pub mode: PrimitiveMode,
    pub topology: wgpu::PrimitiveTopology,
    pub primitive_count: u32,
    /// The backend has no fan topology; the device must rewrite indices into a list.
    pub needs_triangle_fan_emulation: bool,
    /// The backend has no loop topology; the device must close the strip itself.
    pub needs_line_loop_emulation: bool,
}

/// Map a client mode/count pair to a backend topology.
///
/// Returns `None` when the combination produces no primitives; such draws succeed without
/// touching the device.
pub fn apply_primitive_type(mode: PrimitiveMode, count: u32) -> Option<PrimitiveTopologyTranslation> {
    let primitive_count = mode.primitive_count(count);
    if primitive_count == 0 {
        return None;
    }

    let (topology, needs_triangle_fan_emulation, needs_line_loop_emulation) = match mode {
        PrimitiveMode::Points => (wgpu::PrimitiveTopology::PointList, false, false),
        PrimitiveMode::Lines => (wgpu::PrimitiveTopology::LineList, false, false),
        PrimitiveMode::LineLoop => (wgpu::PrimitiveTopology::LineStrip, false, true),
        PrimitiveMode::LineStrip => (wgpu::PrimitiveTopology::LineStrip, false, false),
        PrimitiveMode::Triangles => (wgpu::PrimitiveTopology::TriangleList, false, false),
        PrimitiveMode::TriangleStrip => (wgpu::PrimitiveTopology::TriangleStrip, false, false),
        PrimitiveMode::TriangleFan => (wgpu::PrimitiveTopology::TriangleList, true, false),
    };

    Some(PrimitiveTopologyTranslation {
        mode,
        topology,
        primitive_count,
        needs_triangle_fan_emulation,
        needs_line_loop_emulation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_primitives_produce_no_geometry() {
        assert!(apply_primitive_type(PrimitiveMode::Points, 0).is_none());
        assert!(apply_primitive_type(PrimitiveMode::Lines, 1).is_none());
        assert!(apply_primitive_type(PrimitiveMode::LineLoop, 1).is_none());
        assert!(apply_primitive_type(PrimitiveMode::LineStrip, 1).is_none());
        assert!(apply_primitive_type(PrimitiveMode::Triangles, 2).is_none());
        assert!(apply_primitive_type(PrimitiveMode::TriangleStrip, 2).is_none());
        assert!(apply_primitive_type(PrimitiveMode::TriangleFan, 2).is_none());
    }

    #[test]
    fn primitive_counts_follow_assembly_rules() {
        assert_eq!(PrimitiveMode::Triangles.primitive_count(7), 2);
        assert_eq!(PrimitiveMode::TriangleStrip.primitive_count(5), 3);
        assert_eq!(PrimitiveMode::Lines.primitive_count(5), 2);
        assert_eq!(PrimitiveMode::LineLoop.primitive_count(3), 3);
        assert_eq!(PrimitiveMode::LineStrip.primitive_count(3), 2);
        assert_eq!(PrimitiveMode::Points.primitive_count(3), 3);
    }

    #[test]
    fn fans_and_loops_need_emulation() {
        let fan = apply_primitive_type(PrimitiveMode::TriangleFan, 4).unwrap();
        assert_eq!(fan.topology, wgpu::PrimitiveTopology::TriangleList);
        assert!(fan.needs_triangle_fan_emulation);
        assert_eq!(fan.primitive_count, 2);

        let lines = apply_primitive_type(PrimitiveMode::LineLoop, 4).unwrap();
        assert_eq!(lines.topology, wgpu::PrimitiveTopology::LineStrip);
        assert!(lines.needs_line_loop_emulation);
    }

    #[test]
    fn triangle_family() {
        assert!(PrimitiveMode::TriangleFan.is_triangle_mode());
        assert!(!PrimitiveMode::LineLoop.is_triangle_mode());
        assert!(!PrimitiveMode::Points.is_triangle_mode());
        assert_eq!(PrimitiveMode::TriangleStrip.to_string(), "triangle_strip");
    }
}
