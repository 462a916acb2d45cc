//! Final output rendering for documentation display.
//!
//! Every writer appends complete lines (newline-terminated) to the output
//! buffer, so callers can freely interleave headings of their own.

use super::SourceUrls;
use crate::model::{DocRecord, RecordDetails, RecordKind, TopicDetails};
use crate::search::DocIndex;
use std::fmt::{self, Write as _};

/// One-line summary used by search and listing tools.
///
/// Functions get their signature on an indented second line.
pub fn write_summary(output: &mut String, record: &DocRecord) -> fmt::Result {
    match (record.kind(), record.category()) {
        (RecordKind::Topic, _) => {
            writeln!(output, "- **{}** `(topic)` — {}", record.name, record.brief())?
        }
        (kind, Some(category)) => writeln!(
            output,
            "- **{}** `({}, {})` — {}",
            record.name,
            kind,
            category,
            record.brief()
        )?,
        (kind, None) => writeln!(output, "- **{}** `({})` — {}", record.name, kind, record.brief())?,
    }

    if let Some(signature) = record.as_function().and_then(|f| f.signature.as_deref()) {
        writeln!(output, "  `{}`", signature)?;
    }

    Ok(())
}

/// `- **name** — brief` line for a topic.
pub fn write_topic_line(output: &mut String, topic: &DocRecord) -> fmt::Result {
    writeln!(output, "- **{}** — {}", topic.name, topic.brief())
}

/// Cross-reference line, resolved through the index when possible.
pub fn write_api_reference(output: &mut String, name: &str, index: &DocIndex) -> fmt::Result {
    match index.brief_for(name) {
        Some(info) => writeln!(output, "- `{}` ({}) — {}", info.name, info.kind, info.brief),
        None => writeln!(output, "- `{}`", name),
    }
}

/// Full documentation of a record.
pub fn write_detail(output: &mut String, record: &DocRecord, index: &DocIndex) -> fmt::Result {
    if let RecordDetails::Topic(topic) = &record.details {
        return write_topic_detail(output, record, topic, index);
    }

    write_header(output, record)?;

    if let Some(signature) = record.as_function().and_then(|f| f.signature.as_deref()) {
        writeln!(output, "## Signature")?;
        writeln!(output, "```c\n{}\n```\n", signature)?;
    }

    writeln!(output, "## Description")?;
    if let Some(brief) = &record.brief {
        writeln!(output, "{}", brief)?;
    }
    writeln!(output)?;

    write_kind_specific(output, &record.details)?;
    write_remarks(output, record)?;
    write_example(output, record)?;

    if !record.related.is_empty() {
        writeln!(output, "## Related")?;
        for name in &record.related {
            write_api_reference(output, name, index)?;
        }
        writeln!(output)?;
    }

    write_related_topics(output, &record.name, index)
}

fn write_header(output: &mut String, record: &DocRecord) -> fmt::Result {
    writeln!(output, "# {}\n", record.name)?;
    writeln!(output, "- **Type:** {}", record.kind())?;
    if let Some(category) = record.category() {
        writeln!(output, "- **Category:** {}", category)?;
    }
    if let Some(source) = &record.source {
        let urls = SourceUrls::for_header(source);
        writeln!(output, "- **Source:** [{}]({})", urls.header_path, urls.blob)?;
        writeln!(output, "- **Raw:** {}", urls.raw)?;
        writeln!(output, "- **Implementation:** {}", urls.implementation)?;
    }
    writeln!(output)
}

fn write_kind_specific(output: &mut String, details: &RecordDetails) -> fmt::Result {
    match details {
        RecordDetails::Function(function) => {
            if !function.parameters.is_empty() {
                writeln!(output, "## Parameters\n")?;
                writeln!(output, "| Parameter | Description |")?;
                writeln!(output, "| --- | --- |")?;
                for param in &function.parameters {
                    writeln!(output, "| `{}` | {} |", param.name, cell(&param.description))?;
                }
                writeln!(output)?;
            }

            if let Some(returns) = function.return_description.as_deref().filter(|r| !r.is_empty())
            {
                writeln!(output, "## Return Value\n{}\n", returns)?;
            }
        }
        RecordDetails::Struct(structure) if !structure.members.is_empty() => {
            writeln!(output, "## Members\n")?;
            writeln!(output, "| Member | Description |")?;
            writeln!(output, "| --- | --- |")?;
            for member in &structure.members {
                writeln!(
                    output,
                    "| `{}` | {} |",
                    member.declaration,
                    cell(&member.description)
                )?;
            }
            writeln!(output)?;
        }
        RecordDetails::Enum(enumeration) if !enumeration.entries.is_empty() => {
            writeln!(output, "## Values\n")?;
            writeln!(output, "| Name | Value | Description |")?;
            writeln!(output, "| --- | --- | --- |")?;
            for entry in &enumeration.entries {
                writeln!(
                    output,
                    "| `{}` | {} | {} |",
                    entry.name,
                    cell(&entry.value),
                    cell(&entry.description)
                )?;
            }
            writeln!(output)?;
        }
        _ => {}
    }
    Ok(())
}

fn write_remarks(output: &mut String, record: &DocRecord) -> fmt::Result {
    match record.remarks.as_deref() {
        Some(remarks) if !remarks.is_empty() => writeln!(output, "## Remarks\n{}\n", remarks),
        _ => Ok(()),
    }
}

fn write_example(output: &mut String, record: &DocRecord) -> fmt::Result {
    let Some(example) = record.example.as_deref().filter(|e| !e.is_empty()) else {
        return Ok(());
    };

    writeln!(output, "## Example")?;
    if let Some(example_brief) = &record.example_brief {
        writeln!(output, "{}", example_brief)?;
    }
    writeln!(output, "```c\n{}\n```\n", example)
}

fn write_related_topics(output: &mut String, name: &str, index: &DocIndex) -> fmt::Result {
    let topics = index.topics_for(name);
    if topics.is_empty() {
        return Ok(());
    }

    writeln!(output, "## Related Topics")?;
    for topic in topics {
        write_topic_line(output, topic)?;
    }
    writeln!(output, "\n_Use `cf_get_topic` with a topic name to read the full guide._")
}

fn write_topic_detail(
    output: &mut String,
    record: &DocRecord,
    topic: &TopicDetails,
    index: &DocIndex,
) -> fmt::Result {
    writeln!(output, "# {}\n", record.name)?;
    writeln!(output, "**Type:** topic")?;
    if let Some(category) = record.category() {
        writeln!(output, "**Category:** {}", category)?;
    }
    if let Some(source) = &record.source {
        writeln!(output, "**Source:** {}", source.file)?;
    }
    writeln!(output)?;

    writeln!(output, "## Overview")?;
    if let Some(brief) = &record.brief {
        writeln!(output, "{}", brief)?;
    }
    writeln!(output)?;

    writeln!(output, "## Content\n\n{}\n", topic.content)?;

    for (heading, names) in [
        ("Referenced Functions", &topic.function_references),
        ("Referenced Structs", &topic.struct_references),
        ("Referenced Enums", &topic.enum_references),
    ] {
        if names.is_empty() {
            continue;
        }
        writeln!(output, "## {}", heading)?;
        for name in names {
            write_api_reference(output, name, index)?;
        }
        writeln!(output)?;
    }

    if !topic.topic_references.is_empty() {
        writeln!(output, "## Related Topics")?;
        for name in &topic.topic_references {
            writeln!(output, "- {}", name)?;
        }
        writeln!(output)?;
    }

    Ok(())
}

/// Keep table cells on one line.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
