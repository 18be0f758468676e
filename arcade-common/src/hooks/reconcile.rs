//! Pure reconciliation core.
//!
//! Every function here maps an input document to an output document (or a
//! verdict) with no filesystem access beyond the injected existence check,
//! so the merge rules can be tested with plain `Value`s.

use super::document::{entries, entry_command, hooks_object_mut};
use super::{HookKind, HookState, HookStatus, HooksError, OwnershipMatcher};
use crate::scripts::HookScriptPair;
use serde_json::{Value, json};
use std::path::Path;

/// Owned commands found under one hook kind, in document order.
pub fn owned_commands<'a, M>(document: &'a Value, kind: &str, matcher: &M) -> Vec<&'a str>
where
    M: OwnershipMatcher + ?Sized,
{
    entries(document, kind)
        .map(|list| {
            list.iter()
                .filter_map(entry_command)
                .filter(|cmd| matcher.is_owned(cmd))
                .collect()
        })
        .unwrap_or_default()
}

/// Classifies the tool's registrations in a parsed document.
///
/// `exists` reports whether a script path is present on disk.
pub fn check_document<M, F>(
    document: &Value,
    matcher: &M,
    expected: &HookScriptPair,
    exists: F,
) -> HookState
where
    M: OwnershipMatcher + ?Sized,
    F: Fn(&Path) -> bool,
{
    let start = owned_commands(document, HookKind::Start.key(), matcher);
    let stop = owned_commands(document, HookKind::Stop.key(), matcher);

    let status = match (start.is_empty(), stop.is_empty()) {
        (true, true) => HookStatus::None,
        (true, false) | (false, true) => HookStatus::Partial,
        (false, false) => {
            let is_current = |found: &[&str], kind: HookKind| {
                let wanted = expected.command(kind);
                found.len() == 1 && found[0] == wanted && exists(Path::new(found[0]))
            };
            if is_current(&start, HookKind::Start) && is_current(&stop, HookKind::Stop) {
                HookStatus::Valid
            } else {
                HookStatus::Stale
            }
        }
    };

    HookState {
        status,
        start_command: start.first().map(|s| s.to_string()),
        stop_command: stop.first().map(|s| s.to_string()),
    }
}

/// Merges one kind's entries so exactly one owned entry points at
/// `expected`.
///
/// Foreign entries keep their relative order and come first; the owned
/// entry (an existing exact match, with its extra properties, or a new
/// `{ "command": expected }`) comes last. An unowned entry that already
/// equals `expected` counts as present and suppresses the append.
pub fn merge_entries<M>(entries: Vec<Value>, matcher: &M, expected: &str) -> Vec<Value>
where
    M: OwnershipMatcher + ?Sized,
{
    let mut foreign = Vec::with_capacity(entries.len() + 1);
    let mut current: Option<Value> = None;
    let mut present_as_foreign = false;

    for entry in entries {
        let (owned, matches_expected) = match entry_command(&entry) {
            Some(cmd) => (matcher.is_owned(cmd), cmd == expected),
            None => (false, false),
        };

        if !owned {
            present_as_foreign |= matches_expected;
            foreign.push(entry);
        } else if matches_expected && current.is_none() {
            current = Some(entry);
        }
        // Any other owned entry is stale or a duplicate and is dropped.
    }

    if current.is_none() && !present_as_foreign {
        current = Some(json!({ "command": expected }));
    }

    foreign.extend(current);
    foreign
}

/// The tool's own hook kinds whose value is present but not an array.
///
/// Reconciling replaces these values, so callers back the file up first.
pub fn misshapen_kinds(document: &Value) -> Vec<HookKind> {
    let Some(hooks) = document.get("hooks").and_then(Value::as_object) else {
        return Vec::new();
    };
    HookKind::ALL
        .into_iter()
        .filter(|kind| hooks.get(kind.key()).is_some_and(|v| !v.is_array()))
        .collect()
}

/// Brings both hook kinds of `document` in line with `expected`.
///
/// Returns whether any kind's array changed (deep structural comparison).
/// Non-owned content is never touched, except that one of the tool's own
/// kinds holding something other than an array is replaced by a fresh one.
pub fn reconcile_document<M>(
    document: &mut Value,
    matcher: &M,
    expected: &HookScriptPair,
) -> Result<bool, HooksError>
where
    M: OwnershipMatcher + ?Sized,
{
    let hooks = hooks_object_mut(document)?;
    let mut changed = false;

    for kind in HookKind::ALL {
        let before = hooks.get(kind.key());
        let existing = match before {
            Some(Value::Array(list)) => list.clone(),
            _ => Vec::new(),
        };

        let merged = Value::Array(merge_entries(existing, matcher, &expected.command(kind)));
        if before != Some(&merged) {
            hooks.insert(kind.key().to_string(), merged);
            changed = true;
        }
    }

    Ok(changed)
}

/// Removes every owned entry from every hook kind, known or not.
///
/// Returns the number of entries removed.
pub fn remove_owned<M>(document: &mut Value, matcher: &M) -> usize
where
    M: OwnershipMatcher + ?Sized,
{
    let Some(kinds) = document.get_mut("hooks").and_then(Value::as_object_mut) else {
        return 0;
    };

    let mut removed = 0;
    for list in kinds.values_mut().filter_map(Value::as_array_mut) {
        let before = list.len();
        list.retain(|entry| !entry_command(entry).is_some_and(|cmd| matcher.is_owned(cmd)));
        removed += before - list.len();
    }
    removed
}
