//! Relative path templates with percent-encoded parameters.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{Error, Result};

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A path relative to the client root, such as `task/{tkiid}`.
///
/// Placeholders are filled by [`render`](Self::render). Every placeholder is
/// mandatory: a missing or blank value is rejected as an invalid argument, so
/// facades fail before any request is built. The same goes for `.` and `..`,
/// which would otherwise change the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    /// Create a new path template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// Get the template string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Substitute every `{name}` with its percent-encoded value.
    pub fn render(&self, params: &[(&'static str, &str)]) -> Result<String> {
        let mut rendered = String::with_capacity(self.0.len());
        let mut rest = self.0;

        while let Some(open) = rest.find('{') {
            let (literal, tail) = rest.split_at(open);
            rendered.push_str(literal);

            let Some(close) = tail.find('}') else {
                return Err(Error::invalid_request(format!(
                    "unterminated placeholder in path template `{}`",
                    self.0
                )));
            };
            let (placeholder, after) = tail.split_at(close);
            let name = placeholder.trim_start_matches('{');

            let value = params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.trim())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::invalid_argument(name, "must not be empty"))?;
            // `.` and `..` survive segment encoding and would be resolved away by the URL.
            if matches!(value, "." | "..") {
                return Err(Error::invalid_argument(name, "must not be a dot segment"));
            }
            rendered.extend(utf8_percent_encode(value, PATH_SEGMENT));

            rest = after.strip_prefix('}').unwrap_or(after);
        }

        rendered.push_str(rest);
        Ok(rendered)
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
