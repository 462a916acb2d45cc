//! Links from a record's header location to the upstream repository.

use crate::model::SourceLocation;

pub const GITHUB_REPO: &str = "https://github.com/RandyGaul/cute_framework";
pub const GITHUB_RAW_BASE: &str =
    "https://raw.githubusercontent.com/RandyGaul/cute_framework/refs/heads/master";

/// Browser, raw and implementation links for a header file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    /// Repository-relative header path (`include/cute_sprite.h`)
    pub header_path: String,
    /// GitHub blob page, anchored at the line when known
    pub blob: String,
    pub raw: String,
    /// Raw URL of the matching `src/*.cpp`
    pub implementation: String,
}

impl SourceUrls {
    pub fn for_header(source: &SourceLocation) -> Self {
        let header_path = format!("include/{}", source.file);
        let raw = format!("{GITHUB_RAW_BASE}/{header_path}");
        let mut blob = format!("{GITHUB_REPO}/blob/master/{header_path}");
        if let Some(line) = source.line {
            blob.push_str(&format!("#L{line}"));
        }

        let implementation_file = match source.file.strip_suffix(".h") {
            Some(stem) => format!("{stem}.cpp"),
            None => source.file.clone(),
        };
        let implementation = format!("{GITHUB_RAW_BASE}/src/{implementation_file}");

        Self {
            header_path,
            blob,
            raw,
            implementation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn header_urls() {
        let urls = SourceUrls::for_header(&SourceLocation {
            file: "cute_sprite.h".into(),
            line: Some(42),
        });

        check!(urls.header_path == "include/cute_sprite.h");
        check!(
            urls.blob
                == "https://github.com/RandyGaul/cute_framework/blob/master/include/cute_sprite.h#L42"
        );
        check!(
            urls.raw
                == "https://raw.githubusercontent.com/RandyGaul/cute_framework/refs/heads/master/include/cute_sprite.h"
        );
        check!(
            urls.implementation
                == "https://raw.githubusercontent.com/RandyGaul/cute_framework/refs/heads/master/src/cute_sprite.cpp"
        );
    }

    #[test]
    fn blob_without_line_has_no_anchor() {
        let urls = SourceUrls::for_header(&SourceLocation {
            file: "cute_app.h".into(),
            line: None,
        });
        check!(urls.blob.ends_with("include/cute_app.h"));
    }
}
