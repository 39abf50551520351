//! Diff hook.
//!
//! Live and target resources are paired by [`ResourceKey`], both sides are
//! redacted under one rule set snapshot, and only then handed to a
//! [`DiffRenderer`]. The renderer never sees an original value.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::masking::{redact_pair, MaskedResource};
use crate::resource::{Resource, ResourceKey};
use crate::rules::RuleStore;

/// Turns two masked documents into human-readable diff text.
pub trait DiffRenderer {
    /// Render the difference between `live` and `target`.
    ///
    /// Returns an empty string when the inputs are identical.
    fn render(&self, live: &str, target: &str) -> String;
}

/// Line-based unified diff.
#[derive(Debug, Clone, Copy)]
pub struct LineDiff {
    /// Unchanged lines shown around each change.
    pub context: usize,
}

impl Default for LineDiff {
    fn default() -> Self {
        Self { context: 3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op<'a> {
    Equal(&'a str),
    Delete(&'a str),
    Insert(&'a str),
}

impl Op<'_> {
    fn is_change(&self) -> bool {
        !matches!(self, Op::Equal(_))
    }
}

/// Line edit script between `old` and `new`.
///
/// Common prefix and suffix are peeled off first; the middle goes through
/// Hirschberg's algorithm so memory stays linear in the line counts.
fn diff_lines<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<Op<'a>> {
    let prefix = old
        .iter()
        .zip(new)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let mut ops = Vec::with_capacity(old.len() + new.len());
    ops.extend(old[..prefix].iter().copied().map(Op::Equal));
    hirschberg(
        &old[prefix..old.len() - suffix],
        &new[prefix..new.len() - suffix],
        &mut ops,
    );
    ops.extend(old[old.len() - suffix..].iter().copied().map(Op::Equal));
    ops
}

fn hirschberg<'a>(old: &[&'a str], new: &[&'a str], ops: &mut Vec<Op<'a>>) {
    match (old.len(), new.len()) {
        (0, _) => ops.extend(new.iter().copied().map(Op::Insert)),
        (_, 0) => ops.extend(old.iter().copied().map(Op::Delete)),
        (1, _) => match new.iter().position(|line| *line == old[0]) {
            Some(at) => {
                ops.extend(new[..at].iter().copied().map(Op::Insert));
                ops.push(Op::Equal(old[0]));
                ops.extend(new[at + 1..].iter().copied().map(Op::Insert));
            }
            None => {
                ops.push(Op::Delete(old[0]));
                ops.extend(new.iter().copied().map(Op::Insert));
            }
        },
        (n, m) => {
            let mid = n / 2;
            let forward = lcs_lengths(old[..mid].iter(), new.iter());
            let backward = lcs_lengths(old[mid..].iter().rev(), new.iter().rev());

            let split = (0..=m)
                .max_by_key(|&j| (forward[j] + backward[m - j], std::cmp::Reverse(j)))
                .unwrap_or(0);

            hirschberg(&old[..mid], &new[..split], ops);
            hirschberg(&old[mid..], &new[split..], ops);
        }
    }
}

/// Last row of the LCS length table of `old` against every prefix of `new`.
fn lcs_lengths<'a, 'b>(
    old: impl Iterator<Item = &'b &'a str>,
    new: impl Iterator<Item = &'b &'a str> + Clone,
) -> Vec<usize>
where
    'a: 'b,
{
    let width = new.clone().count() + 1;
    let mut prev = vec![0usize; width];
    let mut cur = vec![0usize; width];
    for line in old {
        for (j, other) in new.clone().enumerate() {
            cur[j + 1] = if line == other {
                prev[j] + 1
            } else {
                cur[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev
}

impl DiffRenderer for LineDiff {
    fn render(&self, live: &str, target: &str) -> String {
        let old: Vec<&str> = live.lines().collect();
        let new: Vec<&str> = target.lines().collect();
        let ops = diff_lines(&old, &new);

        // Merge change windows that overlap once context is added
        let mut hunks: Vec<(usize, usize)> = Vec::new();
        for (index, _) in ops.iter().enumerate().filter(|(_, op)| op.is_change()) {
            let start = index.saturating_sub(self.context);
            let end = (index + self.context + 1).min(ops.len());
            match hunks.last_mut() {
                Some(last) if start <= last.1 => last.1 = end,
                _ => hunks.push((start, end)),
            }
        }

        if hunks.is_empty() {
            return String::new();
        }

        // Line positions before each op
        let mut positions = Vec::with_capacity(ops.len() + 1);
        let (mut old_line, mut new_line) = (0usize, 0usize);
        for op in &ops {
            positions.push((old_line, new_line));
            match op {
                Op::Equal(_) => {
                    old_line += 1;
                    new_line += 1;
                }
                Op::Delete(_) => old_line += 1,
                Op::Insert(_) => new_line += 1,
            }
        }
        positions.push((old_line, new_line));

        let mut out = String::from("--- live\n+++ target\n");
        for (start, end) in hunks {
            let (old_start, new_start) = positions[start];
            let (old_end, new_end) = positions[end];
            out.push_str(&format!(
                "@@ -{} +{} @@\n",
                hunk_range(old_start, old_end - old_start),
                hunk_range(new_start, new_end - new_start)
            ));
            for op in &ops[start..end] {
                let (prefix, line) = match op {
                    Op::Equal(l) => (' ', l),
                    Op::Delete(l) => ('-', l),
                    Op::Insert(l) => ('+', l),
                };
                out.push(prefix);
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

fn hunk_range(start: usize, count: usize) -> String {
    match count {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, count),
    }
}

/// Line emitted for a resource whose differences are all masked.
pub const SENSITIVE_ONLY_NOTE: &str = "sensitive values differ\n";

/// Result of a diff over a set of resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    /// Rendered text for every resource that differs.
    pub text: String,
    /// Number of resources that differ.
    pub changed: usize,
}

impl DiffReport {
    /// Whether any resource differs.
    pub fn has_changes(&self) -> bool {
        self.changed > 0
    }
}

/// Diff `live` against `target` with every sensitive value masked.
///
/// Whether a resource differs is decided on the original objects, so a change
/// confined to masked values still counts and renders as
/// [`SENSITIVE_ONLY_NOTE`]. Resources present on only one side render as a
/// full addition or removal.
pub fn render_diff(
    live: &[Resource],
    target: &[Resource],
    store: &RuleStore,
    renderer: &dyn DiffRenderer,
) -> Result<DiffReport> {
    let rules = store.snapshot();

    let mut pairs: BTreeMap<ResourceKey, (Option<&Resource>, Option<&Resource>)> =
        BTreeMap::new();
    for res in live {
        pairs.entry(res.key()).or_default().0 = Some(res);
    }
    for res in target {
        pairs.entry(res.key()).or_default().1 = Some(res);
    }

    let mut report = DiffReport::default();
    for (key, (live_res, target_res)) in pairs {
        if live_res == target_res {
            continue;
        }

        let (masked_live, masked_target) = redact_pair(live_res, target_res, &rules);
        let text = renderer.render(
            &to_yaml(masked_live.as_ref())?,
            &to_yaml(masked_target.as_ref())?,
        );

        tracing::debug!("{} differs", key);
        report.changed += 1;
        report.text.push_str(&format!("===== {} ======\n", key));
        if text.is_empty() {
            // Only masked values changed
            report.text.push_str(SENSITIVE_ONLY_NOTE);
        } else {
            report.text.push_str(&text);
        }
    }

    tracing::debug!("{} resources differ", report.changed);
    Ok(report)
}

fn to_yaml(masked: Option<&MaskedResource>) -> Result<String> {
    match masked {
        Some(m) => m.to_yaml(),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{PlaceholderStyle, RuleSet};
    use serde_json::json;

    fn secret(username: &str, password: serde_json::Value, token: &str) -> Resource {
        Resource::new(json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": {
                "name": "secret",
                "namespace": "default",
                "annotations": {"token": token, "app": "test"}
            },
            "stringData": {"username": username},
            "data": {"password": password}
        }))
    }

    #[test]
    fn line_diff_identical_is_empty() {
        assert_eq!(LineDiff::default().render("a\nb\n", "a\nb\n"), "");
    }

    #[test]
    fn line_diff_single_change() {
        let out = LineDiff::default().render("a\nb\nc\n", "a\nx\nc\n");
        assert_eq!(
            out,
            "--- live\n+++ target\n@@ -1,3 +1,3 @@\n a\n-b\n+x\n c\n"
        );
    }

    #[test]
    fn line_diff_addition_from_empty() {
        let out = LineDiff::default().render("", "a\nb\n");
        assert_eq!(out, "--- live\n+++ target\n@@ -0,0 +1,2 @@\n+a\n+b\n");
    }

    #[test]
    fn line_diff_limits_context() {
        let old: String = (1..=20).map(|i| format!("line{}\n", i)).collect();
        let new = old.replace("line10\n", "changed\n");

        let out = LineDiff { context: 1 }.render(&old, &new);

        assert!(out.contains("@@ -9,3 +9,3 @@"));
        assert!(out.contains(" line9\n-line10\n+changed\n line11\n"));
        assert!(!out.contains("line8"));
    }

    #[test]
    fn line_diff_separate_hunks() {
        let old: String = (1..=20).map(|i| format!("line{}\n", i)).collect();
        let new = old.replace("line2\n", "x\n").replace("line18\n", "y\n");

        let out = LineDiff::default().render(&old, &new);
        assert_eq!(out.matches("@@ -").count(), 2);
    }

    #[test]
    fn diff_never_contains_sensitive_values() {
        let live = vec![secret("SECRETVAL", json!("U0VDUkVUVkFM"), "SECRETVAL")];
        let target = vec![secret("NEWSECRETVAL", json!("TkVXU0VDUkVUVkFM"), "NEWSECRETVAL")];
        let store = RuleStore::new(RuleSet::with_annotation_keys(["token"]));

        let report = render_diff(&live, &target, &store, &LineDiff::default()).unwrap();

        assert!(!report.text.contains("SECRETVAL"));
        assert!(!report.text.contains("U0VDUkVUVkFM"));
    }

    #[test]
    fn sensitive_only_change_is_still_a_difference() {
        let live = vec![secret("SECRETVAL", json!("U0VDUkVUVkFM"), "t")];
        let target = vec![secret("NEWSECRETVAL", json!("U0VDUkVUVkFM"), "t")];

        let report =
            render_diff(&live, &target, &RuleStore::default(), &LineDiff::default()).unwrap();

        assert!(report.has_changes());
        assert_eq!(
            report.text,
            format!("===== /Secret default/secret ======\n{}", SENSITIVE_ONLY_NOTE)
        );
    }

    #[test]
    fn identical_resources_are_skipped() {
        let live = vec![secret("SECRETVAL", json!("U0VDUkVUVkFM"), "t")];

        let report =
            render_diff(&live, &live.clone(), &RuleStore::default(), &LineDiff::default())
                .unwrap();

        assert!(!report.has_changes());
        assert!(report.text.is_empty());
    }

    #[test]
    fn line_diff_large_inputs() {
        let old: String = (0..4000).map(|i| format!("line{}\n", i)).collect();
        let new: String = (0..4000)
            .map(|i| {
                if i % 7 == 0 {
                    format!("edited{}\n", i)
                } else {
                    format!("line{}\n", i)
                }
            })
            .collect();

        let out = LineDiff { context: 0 }.render(&old, &new);

        assert_eq!(out.lines().filter(|l| l.starts_with("-line")).count(), 572);
        assert_eq!(out.lines().filter(|l| l.starts_with("+edited")).count(), 572);
        assert!(!out.contains(" line1\n"));
    }

    #[test]
    fn line_diff_keeps_longest_common_lines() {
        let out = LineDiff { context: 0 }.render("a\nb\nc\nd\ne\n", "b\nx\nd\ne\ny\n");

        assert_eq!(
            out,
            "--- live\n+++ target\n@@ -1 +0,0 @@\n-a\n@@ -3 +2 @@\n-c\n+x\n@@ -5,0 +5 @@\n+y\n"
        );
    }
}
