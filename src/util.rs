use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use eframe::egui::{Vec2, vec2};

/// Unit vector derived deterministically from `key`. The two 32-bit halves of
/// the hash give the components; a near-zero pair falls back to a golden-angle
/// direction picked by `index`.
pub fn stable_direction(key: impl Hash, index: u64) -> Vec2 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();

    let unit = |bits: u64| ((bits & 0xffff_ffff) as f64 / u32::MAX as f64) as f32 * 2.0 - 1.0;
    let direction = vec2(unit(hash), unit(hash >> 32));
    if direction.length_sq() <= 0.0001 {
        let angle = ((index as f32) * 0.618_034 + 0.11) * std::f32::consts::TAU;
        vec2(angle.cos(), angle.sin())
    } else {
        direction.normalized()
    }
}
