//! Group expansion
//!
//! Replaces group names in a submitted command with the services they stand
//! for, right before the command is handed to the compose tool.

use crate::compose::GroupMap;

/// Expand group tokens in `args`.
///
/// Each token naming a group is removed and the group's members are appended
/// at the end, in declared order. Other tokens keep their relative order.
/// Members are never expanded again, even if they name a group themselves.
pub fn expand_groups(args: &[String], groups: &GroupMap) -> Vec<String> {
    let mut kept = Vec::with_capacity(args.len());
    let mut appended = Vec::new();

    for arg in args {
        match groups.get(arg) {
            Some(members) => appended.extend(members.iter().cloned()),
            None => kept.push(arg.clone()),
        }
    }

    kept.extend(appended);
    kept
}

/// Expand with optional group support; identity when it is disabled.
pub fn rewrite(args: &[String], groups: Option<&GroupMap>) -> Vec<String> {
    match groups {
        Some(groups) => expand_groups(args, groups),
        None => args.to_vec(),
    }
}
