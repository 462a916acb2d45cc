//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `sample_index`: a small hand-built [`DocIndex`] covering every record kind
//! - `sample_state`: the same index published in a [`DocState`], as the server sees it
//! - `checkout`: a temporary Cute Framework checkout (`include/` + `docs/topics/`)
//!   built from the files in `tests/fixtures/`

// Each integration test crate uses a different subset of these helpers
#![allow(dead_code)]

use cf_docs_mcp::model::{
    EnumDetails, EnumEntry, FunctionDetails, Member, Parameter, StructDetails, TopicDetails,
};
use cf_docs_mcp::{DocIndex, DocRecord, DocState};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Returns the directory holding the on-disk parser fixtures.
pub fn fixtures_dir() -> PathBuf {
    project_root().join("tests/fixtures")
}

/// A temporary workspace directory for test isolation.
///
/// Cleaned up when dropped.
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Copies a file from the real filesystem into this workspace.
    ///
    /// # Panics
    /// Panics if copying fails.
    pub fn copy_file(&self, source: &Path, dest_relative: &str) {
        let dest = self.root.join(dest_relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!(
                    "Failed to create parent directory for '{}': {}",
                    dest_relative, e
                )
            });
        }
        std::fs::copy(source, &dest).unwrap_or_else(|e| {
            panic!(
                "Failed to copy '{}' to '{}': {}",
                source.display(),
                dest_relative,
                e
            )
        });
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// A Cute Framework checkout laid out like the GitHub repository.
pub struct Checkout {
    pub workspace: TempWorkspace,
    /// `<root>/include`
    pub include: PathBuf,
}

/// Checkout with `include/cute_test.h` and three files under `docs/topics/`.
#[fixture]
pub fn checkout() -> Checkout {
    let workspace = TempWorkspace::new();
    let fixtures = fixtures_dir();

    workspace.copy_file(&fixtures.join("sample_header.h"), "include/cute_test.h");
    for topic in ["index.md", "sample_topic.md", "another_topic.md"] {
        workspace.copy_file(
            &fixtures.join("topics").join(topic),
            &format!("docs/topics/{}", topic),
        );
    }

    let include = workspace.path().join("include");
    Checkout { workspace, include }
}

fn param(name: &str, description: &str) -> Parameter {
    Parameter {
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn member(declaration: &str, description: &str) -> Member {
    Member {
        declaration: declaration.to_string(),
        description: description.to_string(),
    }
}

fn signature(text: &str) -> Option<String> {
    Some(text.to_string())
}

/// Hand-built index with one or more records of every kind.
///
/// Insertion order: cf_make_sprite, cf_draw_sprite, cf_sprite_name,
/// CF_Sprite, CF_PlayDirection, cf_make_app, cf_no_related, sprite_guide,
/// getting_started.
#[fixture]
pub fn sample_index() -> DocIndex {
    let records = [
        DocRecord::function(
            "cf_make_sprite",
            FunctionDetails {
                signature: signature("CF_Sprite cf_make_sprite(const char* path)"),
                parameters: vec![param("path", "Virtual path to a .ase file.")],
                return_description: Some("The loaded sprite.".to_string()),
            },
        )
        .with_category("sprite")
        .with_brief("Loads a sprite from an aseprite file.")
        .with_related(["CF_Sprite", "cf_draw_sprite", "cf_missing_thing"])
        .with_source("cute_sprite.h", Some(120)),
        DocRecord::function(
            "cf_draw_sprite",
            FunctionDetails {
                signature: signature("void cf_draw_sprite(const CF_Sprite* sprite)"),
                parameters: vec![param("sprite", "The sprite to draw.")],
                return_description: None,
            },
        )
        .with_category("sprite")
        .with_brief("Draws a sprite.")
        .with_related(["CF_Sprite"])
        .with_source("cute_draw.h", Some(40)),
        DocRecord::function(
            "cf_sprite_name",
            FunctionDetails {
                signature: signature("const char* cf_sprite_name(CF_Sprite* sprite)"),
                parameters: vec![param("sprite", "The sprite.")],
                return_description: Some("The sprite's name.".to_string()),
            },
        )
        .with_category("sprite")
        .with_brief("Returns the name of a sprite."),
        DocRecord::structure(
            "CF_Sprite",
            StructDetails {
                members: vec![
                    member("const char* name", "Name of the sprite."),
                    member("int w", "Width in pixels."),
                ],
            },
        )
        .with_category("sprite")
        .with_brief("A sprite represents a drawable entity.")
        .with_related(["cf_make_sprite"])
        .with_source("cute_sprite.h", Some(30)),
        DocRecord::enumeration(
            "CF_PlayDirection",
            EnumDetails {
                entries: vec![
                    EnumEntry {
                        name: "CF_PLAY_DIRECTION_FORWARDS".to_string(),
                        value: "0".to_string(),
                        description: "Play forwards.".to_string(),
                    },
                    EnumEntry {
                        name: "CF_PLAY_DIRECTION_BACKWARDS".to_string(),
                        value: "1".to_string(),
                        description: "Play backwards.".to_string(),
                    },
                ],
            },
        )
        .with_category("sprite")
        .with_brief("Direction an animation plays."),
        DocRecord::function(
            "cf_make_app",
            FunctionDetails {
                signature: signature(
                    "CF_Result cf_make_app(const char* window_title, int w, int h)",
                ),
                parameters: vec![param("window_title", "Title of the window.")],
                return_description: None,
            },
        )
        .with_category("app")
        .with_brief("Creates the application window."),
        DocRecord::function("cf_no_related", FunctionDetails::default())
            .with_category("misc")
            .with_brief("A function nobody references."),
        DocRecord::topic(
            "sprite_guide",
            TopicDetails {
                content: "# Sprites\n\nUse cf_make_sprite.".to_string(),
                function_references: vec!["cf_make_sprite".to_string()],
                struct_references: vec!["CF_Sprite".to_string()],
                reading_order: Some(1),
                ..TopicDetails::default()
            },
        )
        .with_category("sprite")
        .with_brief("How to load and draw sprites."),
        DocRecord::topic(
            "getting_started",
            TopicDetails {
                content: "# Getting Started".to_string(),
                function_references: vec!["cf_make_app".to_string()],
                reading_order: Some(0),
                ..TopicDetails::default()
            },
        )
        .with_category("getting_started")
        .with_brief("First steps with Cute Framework."),
    ];

    records.into_iter().collect()
}

/// [`sample_index`] published in a ready [`DocState`].
#[fixture]
pub fn sample_state(sample_index: DocIndex) -> Arc<DocState> {
    Arc::new(DocState::with_index(sample_index))
}

/// A state whose index has not been built.
#[fixture]
pub fn empty_state() -> Arc<DocState> {
    Arc::new(DocState::new())
}
