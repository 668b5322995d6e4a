//! End-to-end runs over a package tree

mod helper;

use chrono::NaiveDate;

use autobump_github::bump::decision::Decision;
use autobump_github::definition::YamlPatcher;
use autobump_github::report::RunEvent;
use autobump_github::runner::{RunSummary, Runner};

use helper::{MockSource, RecordingReporter, TestTree};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

async fn run_tree(tree: &TestTree, source: &MockSource) -> (RunSummary, Vec<RunEvent>) {
    let reporter = RecordingReporter::default();
    let summary = Runner::new(source, &YamlPatcher, &reporter, today(), false)
        .run(tree.root())
        .await
        .unwrap();
    (summary, reporter.events())
}

#[tokio::test]
async fn tags_strategy_bumps_to_semantic_maximum() {
    let tree = TestTree::new();
    tree.package(
        "apps/project",
        r#"name: "project"
category: "apps"
version: "1.0.0"
labels:
  github.owner: "owner"
  github.repo: "project"
"#,
    );
    let source = MockSource::new().with_tags("owner/project", vec!["v1.0.0", "v1.2.0", "v0.9.0"]);

    let (summary, events) = run_tree(&tree, &source).await;

    assert_eq!(summary.bumped, 1);
    assert_eq!(
        tree.read("apps/project"),
        r#"name: "project"
category: "apps"
version: "1.2.0"
labels:
  github.owner: "owner"
  github.repo: "project"
"#
    );
    assert!(events.contains(&RunEvent::Decided {
        package: "project".to_string(),
        category: "apps".to_string(),
        strategy: "tags".to_string(),
        version: "1.2.0".to_string(),
        decision: Decision::Bump,
    }));
}

#[tokio::test]
async fn up_to_date_and_ahead_packages_are_left_untouched() {
    let tree = TestTree::new();
    let current = r#"name: current
category: apps
version: 2.0.0
labels:
  github.owner: owner
  github.repo: current
  autobump.strategy: release
"#;
    let ahead = r#"name: ahead
category: apps
version: 3.0.0
labels:
  github.owner: owner
  github.repo: ahead
  autobump.strategy: release
"#;
    tree.package("apps/current", current);
    tree.package("apps/ahead", ahead);
    let source = MockSource::new()
        .with_release("owner/current", "v2.0.0")
        .with_release("owner/ahead", "v2.5.0");

    let (summary, _) = run_tree(&tree, &source).await;

    assert_eq!(summary.up_to_date, 1);
    assert_eq!(summary.ahead, 1);
    assert_eq!(tree.read("apps/current"), current);
    assert_eq!(tree.read("apps/ahead"), ahead);
}

#[tokio::test]
async fn unquoted_two_digit_minor_is_not_downgraded() {
    let tree = TestTree::new();
    let definition = r#"name: tool
category: apps
version: 1.10
labels:
  github.owner: owner
  github.repo: tool
  autobump.strategy: release
"#;
    tree.package("apps/tool", definition);
    let source = MockSource::new().with_release("owner/tool", "v1.9.0");

    let (summary, events) = run_tree(&tree, &source).await;

    assert_eq!(summary.ahead, 1);
    assert_eq!(summary.bumped, 0);
    assert_eq!(tree.read("apps/tool"), definition);
    assert!(events.contains(&RunEvent::Resolved {
        package: "tool".to_string(),
        version: "1.9.0".to_string(),
        current: "1.10".to_string(),
    }));
}

#[tokio::test]
async fn unreadable_skip_filter_does_not_block_bump() {
    let tree = TestTree::new();
    tree.package(
        "apps/filtered",
        r#"name: filtered
category: apps
version: 1.0.0
labels:
  github.owner: owner
  github.repo: filtered
  autobump.strategy: release
  autobump.skip_if_contains: "rc"
"#,
    );
    let source = MockSource::new().with_release("owner/filtered", "v2.0.0");

    let (summary, _) = run_tree(&tree, &source).await;

    assert_eq!(summary.bumped, 1);
    assert_eq!(summary.failed, 0);
    assert!(tree.read("apps/filtered").contains("version: \"2.0.0\""));
}

#[tokio::test]
async fn git_hash_rewrites_date_and_hash_label() {
    let tree = TestTree::new();
    tree.package(
        "apps/nightly",
        r#"name: nightly
category: apps
version: "20240101"
labels:
  github.owner: owner
  github.repo: nightly
  github.branch: main
  autobump.strategy: git_hash
  git.hash: "1111111"
"#,
    );
    let source = MockSource::new().with_head("owner/nightly", "2222222");

    let (summary, events) = run_tree(&tree, &source).await;

    assert_eq!(summary.pinned, 1);
    assert_eq!(
        tree.read("apps/nightly"),
        r#"name: nightly
category: apps
version: "20240630"
labels:
  github.owner: owner
  github.repo: nightly
  github.branch: main
  autobump.strategy: git_hash
  git.hash: "2222222"
"#
    );
    assert!(events.contains(&RunEvent::Pinned {
        package: "nightly".to_string(),
        sha: "2222222".to_string(),
    }));
}

#[tokio::test]
async fn github_tag_marker_updates_tag_label_and_version() {
    let tree = TestTree::new();
    tree.package(
        "libs/tracked",
        r#"name: tracked
category: libs
version: 1.0.0
labels:
  github.owner: owner
  github.repo: tracked
  autobump.strategy: github_tag
  autobump.trim_prefix: "release-"
  autobump.string_replace: '{"^rel_": "release-"}'
"#,
    );
    let source = MockSource::new().with_tags("owner/tracked", vec!["rel_1.0.0", "v1.4.0"]);

    let (summary, _) = run_tree(&tree, &source).await;

    assert_eq!(summary.bumped, 1);
    assert_eq!(
        tree.read("libs/tracked"),
        r#"name: tracked
category: libs
version: "v1.4.0"
labels:
  github.owner: owner
  github.repo: tracked
  autobump.strategy: github_tag
  autobump.trim_prefix: "release-"
  autobump.string_replace: '{"^rel_": "release-"}'
  github.tag: "v1.4.0"
"#
    );
}

#[tokio::test]
async fn skipped_ignored_collections_and_failures_do_not_write() {
    let tree = TestTree::new();
    let prerelease = r#"name: prerelease
category: apps
version: 1.0.0
labels:
  github.owner: owner
  github.repo: prerelease
  autobump.strategy: release
  autobump.skip_if_contains: '["rc"]'
"#;
    let ignored = r#"name: ignored
category: apps
version: 1.0.0
labels:
  github.owner: owner
  github.repo: ignored
  autobump.ignore: "1"
"#;
    let missing = r#"name: missing
category: apps
version: 1.0.0
labels:
  github.owner: owner
  github.repo: missing
"#;
    tree.package("apps/prerelease", prerelease);
    tree.package("apps/ignored", ignored);
    tree.package("apps/missing", missing);
    tree.collection("collections/kernels");
    let source = MockSource::new()
        .with_release("owner/prerelease", "2.0.0-rc1")
        .with_release("owner/ignored", "9.9.9");

    let (summary, events) = run_tree(&tree, &source).await;

    assert_eq!(
        summary,
        RunSummary {
            skipped: 1,
            ignored: 1,
            collections: 1,
            failed: 1,
            ..RunSummary::default()
        }
    );
    assert_eq!(tree.read("apps/prerelease"), prerelease);
    assert_eq!(tree.read("apps/ignored"), ignored);
    assert_eq!(tree.read("apps/missing"), missing);
    assert!(events.contains(&RunEvent::Skipped {
        package: "prerelease".to_string(),
        candidate: "2.0.0-rc1".to_string(),
        matched: "rc".to_string(),
    }));
    assert!(events.contains(&RunEvent::SkippedCollection {
        path: tree.root().join("collections/kernels"),
    }));
}

#[tokio::test]
async fn fail_on_error_aborts_the_run() {
    let tree = TestTree::new();
    tree.package(
        "apps/broken",
        r#"name: broken
category: apps
version: 1.0.0
labels:
  github.owner: owner
  github.repo: broken
  autobump.string_replace: "{not json"
"#,
    );
    let source = MockSource::new();
    let reporter = RecordingReporter::default();

    let result = Runner::new(&source, &YamlPatcher, &reporter, today(), true)
        .run(tree.root())
        .await;

    let error = result.unwrap_err();
    assert!(error.to_string().contains("autobump.string_replace"));
}
