//! Alias ("virtual type") chain resolution.

use crate::errors::VirtualTypeError;
use patchguard_platform::{AliasTarget, ConfigGraph};

/// Resolve `name` to a declared concrete class, following alias chains.
///
/// Returns the concrete class plus the chain walked to reach it (empty when
/// `name` was already concrete). A chain that ends in a name the graph knows
/// neither as a class nor as an alias is dangling; revisiting a name is a
/// cycle. Both are hard per-file errors.
pub fn resolve_to_concrete(
    graph: &dyn ConfigGraph,
    name: &str,
) -> Result<(String, Vec<String>), VirtualTypeError> {
    let mut chain: Vec<String> = Vec::new();
    let mut current = name.to_string();

    loop {
        if graph.is_concrete(&current) {
            return Ok((current, chain));
        }

        match graph.resolve_alias(&current) {
            Some(AliasTarget::Concrete(target) | AliasTarget::Alias(target)) => {
                if chain.contains(&current) {
                    chain.push(current);
                    return Err(VirtualTypeError::Cycle { chain });
                }
                chain.push(current);
                current = target;
            }
            None => {
                chain.push(current);
                return Err(VirtualTypeError::Dangling { chain });
            }
        }
    }
}
