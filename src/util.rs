use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic per-id jitter in [-1, 1] x [-1, 1], stable across runs.
pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

pub fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let kept = text.chars().take(max_chars.saturating_sub(1)).collect::<String>();
    format!("{kept}\u{2026}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x1, y1) = stable_pair("node-a");
        let (x2, y2) = stable_pair("node-a");
        assert_eq!((x1, y1), (x2, y2));
        assert!((-1.0..=1.0).contains(&x1));
        assert!((-1.0..=1.0).contains(&y1));

        let other = stable_pair("node-b");
        assert_ne!((x1, y1), other);
    }

    #[test]
    fn ellipsize_keeps_short_text() {
        assert_eq!(ellipsize("short", 10), "short");
        assert_eq!(ellipsize("a rather long label", 8), "a rathe\u{2026}");
    }
}
