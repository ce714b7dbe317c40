//! Incremental merge of translated keys into an existing target document.
//!
//! For every changed path the value is looked up in the source document:
//! strings are translated, nested nodes are expanded into their children,
//! opaque values are copied as is. Keys that did not change are never
//! touched, and a key whose translation fails keeps its previous value.
//!
//! The walk uses an explicit stack so keys are translated one at a time in
//! change-set order, depth first.

use crate::report::{Reporter, SyncEvent};
use crate::translate::{PlaceholderTranslator, Translation, Translator};

use super::placeholder::Reconciled;
use super::{KeyAction, KeyPath, Tree};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Leaves written with a fresh translation.
    pub translated: usize,
    /// Leaves whose translation failed or came back empty.
    pub failed: usize,
    /// Non-string values copied from the source.
    pub copied: usize,
    /// Paths absent from the source, or empty strings.
    pub skipped: usize,
    /// Written leaves that did not exist in the target before.
    pub added: usize,
}

impl MergeStats {
    fn record_write(&mut self, action: KeyAction) {
        if action == KeyAction::Added {
            self.added += 1;
        }
    }
}

#[derive(Debug)]
pub struct MergeOutcome {
    pub document: Tree,
    pub stats: MergeStats,
}

/// Source and target locale for one merge.
#[derive(Debug, Clone, Copy)]
pub struct LocalePair<'a> {
    pub source: &'a str,
    pub target: &'a str,
}

pub async fn merge<T: Translator>(
    mut target: Tree,
    source: &Tree,
    changes: &[KeyPath],
    locales: LocalePair<'_>,
    translator: &PlaceholderTranslator<T>,
    reporter: &dyn Reporter,
) -> MergeOutcome {
    let mut stats = MergeStats::default();
    let mut pending: Vec<KeyPath> = changes.iter().rev().cloned().collect();

    while let Some(path) = pending.pop() {
        match source.get(&path) {
            None => stats.skipped += 1,
            Some(Tree::Node(children)) => {
                if children.is_empty() && target.get(&path).is_none_or(|t| !t.is_node()) {
                    target.set(&path, Tree::default());
                }
                pending.extend(children.keys().rev().map(|key| path.child(key.as_str())));
            }
            Some(Tree::Opaque(value)) => {
                let action = target.set(&path, Tree::Opaque(value.clone()));
                stats.record_write(action);
                stats.copied += 1;
            }
            Some(Tree::Leaf(text)) if text.is_empty() => stats.skipped += 1,
            Some(Tree::Leaf(text)) => {
                let translation = translator
                    .translate(text, locales.source, locales.target)
                    .await;
                match translation {
                    Translation::Done(reconciled) => {
                        if let Reconciled::CountMismatch {
                            expected, found, ..
                        } = &reconciled
                        {
                            reporter.report(&SyncEvent::PlaceholderMismatch {
                                locale: locales.target.to_string(),
                                path: path.clone(),
                                expected: *expected,
                                found: *found,
                            });
                        }
                        let action = target.set(&path, Tree::Leaf(reconciled.into_text()));
                        stats.record_write(action);
                        stats.translated += 1;
                        reporter.report(&SyncEvent::KeyTranslated {
                            locale: locales.target.to_string(),
                            path,
                        });
                    }
                    Translation::Empty => {
                        stats.failed += 1;
                        reporter.report(&SyncEvent::KeyFailed {
                            locale: locales.target.to_string(),
                            path,
                            reason: "empty translation".to_string(),
                        });
                    }
                    Translation::Failed(err) => {
                        stats.failed += 1;
                        reporter.report(&SyncEvent::KeyFailed {
                            locale: locales.target.to_string(),
                            path,
                            reason: format!("{:#}", err),
                        });
                    }
                }
            }
        }
    }

    MergeOutcome {
        document: target,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{NullReporter, RecordingReporter};
    use anyhow::Result;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Uppercases input and records every call; texts listed in `refuse` get no translation.
    #[derive(Default)]
    struct Upper {
        calls: Mutex<Vec<String>>,
        refuse: Vec<&'static str>,
    }

    #[async_trait]
    impl Translator for Upper {
        async fn translate_one(&self, text: &str, _: &str, _: &str) -> Result<Option<String>> {
            self.calls.lock().unwrap().push(text.to_string());
            if self.refuse.contains(&text) {
                return Ok(None);
            }
            Ok(Some(text.to_uppercase()))
        }
    }

    fn doc(value: serde_json::Value) -> Tree {
        serde_json::from_value(value).unwrap()
    }

    fn paths(list: &[&str]) -> Vec<KeyPath> {
        list.iter().map(|p| p.parse().unwrap()).collect()
    }

    const PAIR: LocalePair<'static> = LocalePair {
        source: "en",
        target: "es",
    };

    async fn run(target: Tree, source: &Tree, changes: &[&str], inner: Upper) -> (MergeOutcome, Vec<String>) {
        let translator = PlaceholderTranslator::new(inner, Duration::from_secs(5));
        let outcome = merge(target, source, &paths(changes), PAIR, &translator, &NullReporter).await;
        let calls = translator.inner().calls.lock().unwrap().clone();
        (outcome, calls)
    }

    #[tokio::test]
    async fn test_merge_preserves_untouched_keys() {
        let target = doc(json!({"a": {"b": "old", "c": "keep"}}));
        let source = doc(json!({"a": {"b": "new source"}}));

        let (outcome, calls) = run(target, &source, &["a.b"], Upper::default()).await;

        assert_eq!(
            serde_json::to_value(&outcome.document).unwrap(),
            json!({"a": {"b": "NEW SOURCE", "c": "keep"}})
        );
        assert_eq!(calls, vec!["new source"]);
        assert_eq!(outcome.stats.translated, 1);
        assert_eq!(outcome.stats.added, 0);
    }

    #[tokio::test]
    async fn test_merge_expands_nested_nodes_in_order() {
        let source = doc(json!({"nav": {"home": "Home", "sub": {"about": "About"}}, "x": "X"}));

        let (outcome, calls) = run(Tree::default(), &source, &["nav", "x"], Upper::default()).await;

        assert_eq!(calls, vec!["Home", "About", "X"]);
        assert_eq!(
            serde_json::to_value(&outcome.document).unwrap(),
            json!({"nav": {"home": "HOME", "sub": {"about": "ABOUT"}}, "x": "X"})
        );
    }

    #[tokio::test]
    async fn test_merge_skips_paths_missing_from_source() {
        let target = doc(json!({"gone": "still here"}));
        let source = doc(json!({}));

        let (outcome, calls) = run(target, &source, &["gone"], Upper::default()).await;

        assert!(calls.is_empty());
        assert_eq!(outcome.stats.skipped, 1);
        assert_eq!(
            serde_json::to_value(&outcome.document).unwrap(),
            json!({"gone": "still here"})
        );
    }

    #[tokio::test]
    async fn test_failed_translation_keeps_previous_value() {
        let target = doc(json!({"x": "old x", "y": "old y"}));
        let source = doc(json!({"x": "new x", "y": "new y"}));
        let translator = Upper {
            refuse: vec!["new x"],
            ..Default::default()
        };

        let (outcome, _) = run(target, &source, &["x", "y"], translator).await;

        assert_eq!(
            serde_json::to_value(&outcome.document).unwrap(),
            json!({"x": "old x", "y": "NEW Y"})
        );
        assert_eq!(outcome.stats.failed, 1);
        assert_eq!(outcome.stats.translated, 1);
    }

    #[tokio::test]
    async fn test_opaque_values_are_copied_and_empty_strings_skipped() {
        let source = doc(json!({"list": ["a", "b"], "n": 2, "blank": "", "empty": {}}));

        let (outcome, calls) =
            run(Tree::default(), &source, &["list", "n", "blank", "empty"], Upper::default())
                .await;

        assert!(calls.is_empty());
        assert_eq!(
            serde_json::to_value(&outcome.document).unwrap(),
            json!({"list": ["a", "b"], "n": 2, "empty": {}})
        );
        assert_eq!(outcome.stats.copied, 2);
        assert_eq!(outcome.stats.skipped, 1);
        assert_eq!(outcome.stats.added, 2);
    }

    #[tokio::test]
    async fn test_reports_failures_and_placeholder_mismatch() {
        struct Lossy;

        #[async_trait]
        impl Translator for Lossy {
            async fn translate_one(&self, text: &str, _: &str, _: &str) -> Result<Option<String>> {
                match text {
                    "{a} and {b}" => Ok(Some("{a} y".to_string())),
                    _ => Err(anyhow::anyhow!("boom")),
                }
            }
        }

        let source = doc(json!({"pair": "{a} and {b}", "broken": "x"}));
        let translator = PlaceholderTranslator::new(Lossy, Duration::from_secs(5));
        let reporter = RecordingReporter::default();

        let outcome = merge(
            Tree::default(),
            &source,
            &paths(&["pair", "broken"]),
            PAIR,
            &translator,
            &reporter,
        )
        .await;

        assert_eq!(outcome.stats.translated, 1);
        assert_eq!(
            reporter.events(),
            vec![
                SyncEvent::PlaceholderMismatch {
                    locale: "es".into(),
                    path: KeyPath::from_segments(["pair"]),
                    expected: 2,
                    found: 1,
                },
                SyncEvent::KeyTranslated {
                    locale: "es".into(),
                    path: KeyPath::from_segments(["pair"]),
                },
                SyncEvent::KeyFailed {
                    locale: "es".into(),
                    path: KeyPath::from_segments(["broken"]),
                    reason: "boom".into(),
                },
            ]
        );
    }
}
