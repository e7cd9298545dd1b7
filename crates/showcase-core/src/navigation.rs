//! Discovery gates and circular next/previous stepping.
//!
//! Everything here is a pure function of the registry and the discovered set.

use crate::constants::MIN_DISCOVERED_FOR_NAVIGATION;
use crate::registry::{Facet, ModelRegistry, PortalGate};
use fnv::FnvHashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

fn discovered_count(ordered: &[&str], discovered: &FnvHashSet<String>) -> usize {
    ordered.iter().filter(|n| discovered.contains(**n)).count()
}

/// Next/previous controls are live once two items of the list are known.
pub fn navigation_enabled(ordered: &[&str], discovered: &FnvHashSet<String>) -> bool {
    discovered_count(ordered, discovered) >= MIN_DISCOVERED_FOR_NAVIGATION
}

/// The portal opens after every default-facet item has been discovered,
/// unless the registry relaxes the gate.
pub fn portal_unlocked(registry: &ModelRegistry, discovered: &FnvHashSet<String>) -> bool {
    if registry.portal_name().is_none() {
        return false;
    }
    match registry.portal_gate() {
        PortalGate::Open => true,
        PortalGate::Strict => registry
            .facet_names(Facet::Default)
            .iter()
            .all(|n| discovered.contains(*n)),
    }
}

/// "Continue" shows once the whole alternate facet has been seen and
/// nothing is focused.
pub fn continue_available(
    registry: &ModelRegistry,
    discovered: &FnvHashSet<String>,
    active: Option<&str>,
) -> bool {
    if active.is_some() {
        return false;
    }
    let names = registry.facet_names(Facet::Alternate);
    !names.is_empty() && names.iter().all(|n| discovered.contains(*n))
}

/// Nearest discovered neighbour of `current` in `dir`, wrapping around.
///
/// Returns `None` while navigation is disabled or when no other candidate is
/// discovered. An unknown `current` searches from the start of the list.
pub fn step<'a>(
    ordered: &[&'a str],
    discovered: &FnvHashSet<String>,
    current: Option<&str>,
    dir: Direction,
) -> Option<&'a str> {
    if !navigation_enabled(ordered, discovered) {
        return None;
    }
    let len = ordered.len();
    let start = current
        .and_then(|c| ordered.iter().position(|n| *n == c))
        .unwrap_or(0);
    for i in 1..len {
        let idx = match dir {
            Direction::Next => (start + i) % len,
            Direction::Previous => (start + len - i) % len,
        };
        let candidate = ordered[idx];
        if discovered.contains(candidate) {
            return Some(candidate);
        }
    }
    None
}
