mod common;

use assert2::{check, let_assert};
use cf_docs_mcp::model::RecordKind;
use cf_docs_mcp::tools::render_topics;
use cf_docs_mcp::worker::{build_index, spawn_index_build};
use cf_docs_mcp::{DocState, IndexBuilder, SourceOptions};
use common::{Checkout, checkout};
use rstest::rstest;
use std::sync::Arc;

fn local(checkout: &Checkout) -> SourceOptions {
    SourceOptions {
        root: Some(checkout.include.display().to_string()),
        ..SourceOptions::default()
    }
}

#[rstest]
fn builds_headers_and_topics(checkout: Checkout) {
    let index = IndexBuilder::new(&checkout.include).build().unwrap();

    let stats = index.stats();
    check!(stats.functions == 2);
    check!(stats.structs == 1);
    check!(stats.enums == 1);
    check!(stats.topics == 2);
    check!(stats.total == 6);

    let_assert!(Some(function) = index.find("test_function"));
    check!(function.category.as_deref() == Some("test"));
    let_assert!(Some(details) = function.as_function());
    check!(
        details.signature.as_deref() == Some("TestStruct test_function(const char* input, int count)")
    );
    let_assert!(Some(source) = &function.source);
    check!(source.file == "cute_test.h");
}

#[rstest]
fn topics_follow_reading_order(checkout: Checkout) {
    let index = IndexBuilder::new(&checkout.include).build().unwrap();

    let ordered: Vec<_> = index
        .topics_ordered()
        .into_iter()
        .map(|t| t.name.as_str())
        .collect();
    check!(ordered == ["another_topic", "sample_topic"]);

    let text = render_topics(&index, None, true).unwrap();
    check!(text.contains("1. **another_topic**"));
    check!(text.contains("2. **sample_topic**"));
}

#[rstest]
fn topic_references_are_indexed(checkout: Checkout) {
    let index = IndexBuilder::new(&checkout.include).build().unwrap();

    let topics: Vec<_> = index
        .topics_for("cf_play_sound")
        .into_iter()
        .map(|t| t.name.as_str())
        .collect();
    check!(topics == ["sample_topic"]);
    check!(index.topics_for("cf_unknown").is_empty());
}

#[rstest]
fn enum_links_are_refined(checkout: Checkout) {
    checkout.workspace.create_file(
        "docs/topics/enums.md",
        "# Enums\n\nSee [`TestEnum`](../test/TestEnum.md) and [`TestStruct`](../test/TestStruct.md).\n",
    );

    let index = IndexBuilder::new(&checkout.include).build().unwrap();
    let_assert!(Some(topic) = index.find("enums"));
    let_assert!(Some(details) = topic.as_topic());
    check!(details.enum_references == ["TestEnum"]);
    check!(details.struct_references == ["TestStruct"]);
    check!(index.topics_for("TestEnum").len() == 1);
}

#[rstest]
fn headers_without_topics(checkout: Checkout) {
    std::fs::remove_dir_all(checkout.workspace.path().join("docs")).unwrap();

    let index = IndexBuilder::new(&checkout.include).build().unwrap();
    check!(index.count(RecordKind::Topic) == 0);
    check!(index.find("TestStruct").is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_root_is_reported(checkout: Checkout) {
    let options = SourceOptions {
        root: Some(checkout.workspace.path().join("nope").display().to_string()),
        ..SourceOptions::default()
    };

    let_assert!(Err(error) = build_index(&options).await);
    check!(error.to_string().contains("--root"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn background_build_publishes_index(checkout: Checkout) {
    let state = Arc::new(DocState::new());
    check!(!state.is_ready().await);

    spawn_index_build(Arc::clone(&state), local(&checkout))
        .await
        .unwrap();

    check!(state.is_ready().await);
    let index = state.index().await.unwrap();
    check!(index.find("another_function").is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_build_leaves_state_unavailable(checkout: Checkout) {
    let state = Arc::new(DocState::new());
    let options = SourceOptions {
        root: Some(checkout.workspace.path().join("missing").display().to_string()),
        ..SourceOptions::default()
    };

    spawn_index_build(Arc::clone(&state), options).await.unwrap();
    check!(!state.is_ready().await);
}
