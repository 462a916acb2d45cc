//! Parser for the markdown topic guides shipped in `docs/topics/`.

use super::collect_files;
use crate::error::Result;
use crate::model::{DocRecord, Section, TopicDetails};
use anyhow::Context;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// `[text](../<category>/<name>.md)`, a link to an API reference page
static API_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[`?([^\]]+)`?\]\(\.\./(\w+)/(\w+)\.md\)").unwrap());
/// `[text](./<slug>.md)` or `[text](../topics/<slug>.md)`
static TOPIC_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\((?:\./|\.\./topics/)(\w+)\.md\)").unwrap());
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^##\s+(.+)$").unwrap());
static READING_ORDER_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\.\s+\[([^\]]+)\]\(\./(\w+)\.md\)").unwrap());

const INDEX_FILE: &str = "index.md";

/// Map a topic slug to the API category it documents. Unknown slugs map to themselves.
pub fn topic_category(slug: &str) -> &str {
    match slug {
        "audio" => "audio",
        "camera" | "drawing" => "draw",
        "collision" => "collision",
        "coroutines" => "coroutine",
        "input" => "input",
        "networking" => "net",
        "strings" => "string",
        "random_numbers" => "math",
        "application_window" | "emscripten" | "ios" => "app",
        "game_loop_and_time" => "time",
        "file_io" | "virtual_file_system" => "file",
        "multithreading" => "thread",
        "atomics" => "atomic",
        "data_structures" => "array",
        "allocator" => "alloc",
        "web" => "https",
        "dear_imgui" => "imgui",
        "low_level_graphics" | "renderer" | "shader_compilation" => "graphics",
        other => other,
    }
}

/// Parse every topic in `dir` (non-recursive), assigning reading order from `index.md`.
pub fn parse_topic_dir(dir: &Path) -> Result<Vec<DocRecord>> {
    anyhow::ensure!(dir.is_dir(), "Topics directory not found: {}", dir.display());

    let reading_order = match std::fs::read_to_string(dir.join(INDEX_FILE)) {
        Ok(content) => parse_reading_order(&content),
        Err(_) => HashMap::new(),
    };

    let mut topics = Vec::new();
    for path in collect_files(dir, "md", Some(1)) {
        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if path.file_name().is_some_and(|name| name == INDEX_FILE) {
            continue;
        }

        let content = match std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))
        {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Skipping topic: {:#}", e);
                continue;
            }
        };

        let mut topic = parse_topic(&content, slug);
        if let Some(details) = topic.as_topic_mut() {
            details.reading_order = reading_order.get(slug).copied();
        }
        topics.push(topic);
    }

    Ok(topics)
}

/// Slug → 0-based position of numbered `N. [Title](./slug.md)` items.
pub fn parse_reading_order(index_content: &str) -> HashMap<String, u32> {
    READING_ORDER_ITEM
        .captures_iter(index_content)
        .zip(0..)
        .map(|(caps, position)| (caps[2].to_string(), position))
        .collect()
}

/// Parse one topic guide. The record is named after `slug` and carries no reading order.
pub fn parse_topic(content: &str, slug: &str) -> DocRecord {
    let mut function_references = Vec::new();
    let mut struct_references = Vec::new();

    for caps in API_LINK.captures_iter(content) {
        let name = &caps[3];
        if name.starts_with("cf_") {
            push_unique(&mut function_references, name);
        } else if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            // Enums are told apart from structs once the index is built
            push_unique(&mut struct_references, name);
        }
    }

    let mut topic_references = Vec::new();
    for caps in TOPIC_LINK.captures_iter(content) {
        push_unique(&mut topic_references, &caps[2]);
    }

    let details = TopicDetails {
        content: content.to_string(),
        sections: extract_sections(content),
        function_references,
        struct_references,
        enum_references: Vec::new(),
        topic_references,
        reading_order: None,
    };

    let mut record = DocRecord::topic(slug, details)
        .with_category(topic_category(slug))
        .with_source(format!("{slug}.md"), None);
    record.brief = extract_brief(content);
    record
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|existing| existing == name) {
        list.push(name.to_string());
    }
}

/// First paragraph that is not a heading, with links reduced to their text.
fn extract_brief(content: &str) -> Option<String> {
    let mut paragraph = Vec::new();

    for line in content.lines() {
        if line.starts_with('#') {
            continue;
        }
        let line = line.trim();
        if line.is_empty() {
            if paragraph.is_empty() {
                continue;
            }
            break;
        }
        paragraph.push(line);
    }

    let brief = MARKDOWN_LINK.replace_all(&paragraph.join(" "), "$1").into_owned();
    (!brief.is_empty()).then_some(brief)
}

fn extract_sections(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in content.lines() {
        if let Some(caps) = SECTION_HEADING.captures(line) {
            if let Some((title, body)) = current.take() {
                sections.push(Section {
                    title,
                    body: body.join("\n").trim().to_string(),
                });
            }
            current = Some((caps[1].trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((title, body)) = current {
        sections.push(Section {
            title,
            body: body.join("\n").trim().to_string(),
        });
    }

    sections
}
