//! Random boundary tokens and section identifiers.

use rand::Rng;

/// Generates a boundary token of the form `Part.<n>.<n>`.
#[must_use]
pub fn boundary() -> String {
    let mut rng = rand::thread_rng();
    format!("Part.{}.{}", rng.r#gen::<u32>(), rng.r#gen::<u32>())
}

/// Generates a random identifier shaped like a GUID.
///
/// Only the `8-4-4-4-12` hex shape is kept; no UUID version bits are set.
#[must_use]
pub fn unique_id() -> String {
    let id = rand::random::<u128>();
    format!(
        "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
        id >> 96,
        (id >> 80) & 0xffff,
        (id >> 64) & 0xffff,
        (id >> 48) & 0xffff,
        id & 0xffff_ffff_ffff
    )
}

/// One boundary per multipart role, pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundaries {
    /// Outer `multipart/mixed` boundary.
    pub mixed: String,
    /// `multipart/alternative` boundary.
    pub alternative: String,
    /// `multipart/related` boundary.
    pub related: String,
}

impl Boundaries {
    /// Generates boundaries that do not collide with each other or with any
    /// line of `contents`.
    #[must_use]
    pub fn generate(contents: &[&str]) -> Self {
        let mut taken: Vec<String> = Vec::with_capacity(3);
        let mut next = || loop {
            let candidate = boundary();
            if !taken.contains(&candidate) && !collides(&candidate, contents) {
                taken.push(candidate.clone());
                return candidate;
            }
            tracing::trace!(boundary = %candidate, "Boundary collision, regenerating");
        };

        Self {
            mixed: next(),
            alternative: next(),
            related: next(),
        }
    }
}

/// Returns true if some content line starts with `--boundary`.
fn collides(boundary: &str, contents: &[&str]) -> bool {
    contents.iter().any(|content| {
        content.lines().any(|line| {
            line.strip_prefix("--")
                .is_some_and(|rest| rest.starts_with(boundary))
        })
    })
}
