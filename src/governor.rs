//! Bounded recursion and cycle breaking.
//!
//! One `RecursionGovernor` exists per root synthesis call. It owns the
//! visited registry (path-local entry counts per type name) and is threaded
//! `&mut` through every recursive call. Child calls never clone it; it is
//! dropped when the root call returns.

use std::collections::HashMap;

use crate::config::SynthConfig;

/// Outcome of asking to expand a type at a given depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expansion {
    /// Proceed; the caller must pair this with `leave` after expanding.
    Enter,
    /// Depth limit or per-path repeat bound tripped: emit a placeholder.
    Placeholder,
}

pub struct RecursionGovernor {
    limit: u32,
    max_repeats: u32,
    /// Times each type has been entered on the current root-to-leaf path.
    path_counts: HashMap<String, u32>,
}

impl RecursionGovernor {
    pub fn new(config: &SynthConfig) -> Self {
        RecursionGovernor {
            limit: config.recursion_limit,
            max_repeats: config.max_type_repeats,
            path_counts: HashMap::new(),
        }
    }

    /// Depth bound alone, for container/wrapper layers that carry no type
    /// identity of their own.
    pub fn depth_exceeded(&self, depth: u32) -> bool {
        depth > self.limit
    }

    /// Ask to expand `type_name` at `depth`. A type already on the current
    /// path may repeat up to the configured bound; the same type in a sibling
    /// branch is unaffected because `leave` restores the count on the way out.
    pub fn try_enter(&mut self, type_name: &str, depth: u32) -> Expansion {
        if self.depth_exceeded(depth) {
            return Expansion::Placeholder;
        }
        let count = self.path_counts.get(type_name).copied().unwrap_or(0);
        if count >= self.max_repeats {
            return Expansion::Placeholder;
        }
        *self.path_counts.entry(type_name.to_string()).or_insert(0) += 1;
        Expansion::Enter
    }

    /// Undo the matching `try_enter` when a subtree is done.
    pub fn leave(&mut self, type_name: &str) {
        if let Some(count) = self.path_counts.get_mut(type_name) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.path_counts.remove(type_name);
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn governor(limit: u32, repeats: u32) -> RecursionGovernor {
        let config = SynthConfig {
            recursion_limit: limit,
            max_type_repeats: repeats,
            ..SynthConfig::default()
        };
        RecursionGovernor::new(&config)
    }

    #[test]
    fn depth_limit_forces_placeholder() {
        let mut g = governor(2, 1);
        assert_eq!(g.try_enter("com.x.A", 0), Expansion::Enter);
        assert_eq!(g.try_enter("com.x.B", 3), Expansion::Placeholder);
    }

    #[test]
    fn repeat_on_same_path_is_cut_off() {
        let mut g = governor(7, 1);
        assert_eq!(g.try_enter("com.x.Node", 0), Expansion::Enter);
        // Same type nested under itself: one real expansion, then placeholder.
        assert_eq!(g.try_enter("com.x.Node", 1), Expansion::Placeholder);
    }

    #[test]
    fn sibling_branches_may_reuse_the_type() {
        let mut g = governor(7, 1);
        assert_eq!(g.try_enter("com.x.Item", 1), Expansion::Enter);
        g.leave("com.x.Item");
        // Independent branch of the same document: expands fully again.
        assert_eq!(g.try_enter("com.x.Item", 1), Expansion::Enter);
    }

    #[test]
    fn configurable_repeat_bound() {
        let mut g = governor(7, 2);
        assert_eq!(g.try_enter("com.x.Node", 0), Expansion::Enter);
        assert_eq!(g.try_enter("com.x.Node", 1), Expansion::Enter);
        assert_eq!(g.try_enter("com.x.Node", 2), Expansion::Placeholder);
    }
}
