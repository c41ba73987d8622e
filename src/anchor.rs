//! Markdown heading anchor generation and collision detection.

use indexmap::IndexMap;

/// Derive the in-page anchor for a heading's display text.
///
/// - lowercase
/// - keep alphanumerics, `_` and `-`, drop everything else except spaces
/// - replace spaces with hyphens
///
/// `` `void foo(a: int)` `` → `void-fooa-int`
pub fn name_to_anchor(display: &str) -> String {
    let mut anchor = String::with_capacity(display.len());
    for c in display.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '_' || c == '-' {
            anchor.push(c);
        } else if c == ' ' {
            anchor.push('-');
        }
    }
    anchor
}

/// Distinct headings that normalize to the same anchor.
#[derive(Debug, PartialEq, Eq)]
pub struct Collision {
    pub anchor: String,
    pub displays: Vec<String>,
}

/// Find anchors shared by more than one distinct display string.
///
/// Input pairs are `(display, anchor)`; the same display repeated is not a collision.
pub fn find_collisions<'a, I>(entries: I) -> Vec<Collision>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut by_anchor: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for (display, anchor) in entries {
        let displays = by_anchor.entry(anchor).or_default();
        if !displays.contains(&display) {
            displays.push(display);
        }
    }

    by_anchor
        .into_iter()
        .filter(|(_, displays)| displays.len() > 1)
        .map(|(anchor, displays)| Collision {
            anchor: anchor.to_string(),
            displays: displays.into_iter().map(str::to_string).collect(),
        })
        .collect()
}
