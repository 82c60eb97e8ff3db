use std::sync::atomic::{AtomicU64, Ordering};

/// Draw-path counters.
///
/// Updated on the rendering thread with relaxed ordering; a snapshot may be taken from any
/// thread for profiling overlays.
#[derive(Debug, Default)]
pub struct DrawStats {
    draws_issued: AtomicU64,
    draws_skipped: AtomicU64,
    draws_without_geometry: AtomicU64,
    draws_failed: AtomicU64,
    placeholder_textures_created: AtomicU64,
    incomplete_texture_substitutions: AtomicU64,
    feedback_loops_avoided: AtomicU64,
    swizzles_regenerated: AtomicU64,
}

impl DrawStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_draws_issued(&self) {
        self.draws_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_draws_skipped(&self) {
        self.draws_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_draws_without_geometry(&self) {
        self.draws_without_geometry.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_draws_failed(&self) {
        self.draws_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_placeholder_textures_created(&self) {
        self.placeholder_textures_created
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_incomplete_texture_substitutions(&self) {
        self.incomplete_texture_substitutions
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_feedback_loops_avoided(&self) {
        self.feedback_loops_avoided.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_swizzles_regenerated(&self) {
        self.swizzles_regenerated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DrawStatsSnapshot {
        DrawStatsSnapshot {
            draws_issued: self.draws_issued.load(Ordering::Relaxed),
            draws_skipped: self.draws_skipped.load(Ordering::Relaxed),
            draws_without_geometry: self.draws_without_geometry.load(Ordering::Relaxed),
            draws_failed: self.draws_failed.load(Ordering::Relaxed),
            placeholder_textures_created: self
                .placeholder_textures_created
                .load(Ordering::Relaxed),
            incomplete_texture_substitutions: self
                .incomplete_texture_substitutions
                .load(Ordering::Relaxed),
            feedback_loops_avoided: self.feedback_loops_avoided.load(Ordering::Relaxed),
            swizzles_regenerated: self.swizzles_regenerated.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStatsSnapshot {
    pub draws_issued: u64,
    pub draws_skipped: u64,
    pub draws_without_geometry: u64,
    pub draws_failed: u64,
    pub placeholder_textures_created: u64,
    pub incomplete_texture_substitutions: u64,
    pub feedback_loops_avoided: u64,
    pub swizzles_regenerated: u64,
}

impl DrawStatsSnapshot {
    pub fn to_json(self) -> String {
        format!(
            "{{\"draws_issued\":{},\"draws_skipped\":{},\"draws_without_geometry\":{},\"draws_failed\":{},\"placeholder_textures_created\":{},\"incomplete_texture_substitutions\":{},\"feedback_loops_avoided\":{},\"swizzles_regenerated\":{}}}",
            self.draws_issued,
            self.draws_skipped,
            self.draws_without_geometry,
            self.draws_failed,
            self.placeholder_textures_created,
            self.incomplete_texture_substitutions,
            self.feedback_loops_avoided,
            self.swizzles_regenerated,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_json_contains_counters() {
        let stats = DrawStats::new();
        stats.inc_draws_issued();
        stats.inc_draws_issued();
        stats.inc_feedback_loops_avoided();
        let json = stats.snapshot().to_json();
        assert!(json.contains("\"draws_issued\":2"));
        assert!(json.contains("\"feedback_loops_avoided\":1"));
        assert!(json.contains("\"draws_failed\":0"));
    }
}
