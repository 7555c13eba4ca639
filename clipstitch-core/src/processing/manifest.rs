//! Concat-demuxer manifest handling.
//!
//! The manifest is the ordered list of normalized artifacts handed to
//! ffmpeg's concat demuxer, one `file '<path>'` directive per line. Paths are
//! quoted with single quotes; an embedded `'` is written as `'\''` (close the
//! quote, escaped quote, reopen), which is the demuxer's own quoting grammar.
//! Newlines cannot be represented at all, so such paths are rejected.

use crate::error::{CoreError, CoreResult};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const FILE_DIRECTIVE: &str = "file";

/// Quotes a path string for a `file` directive.
#[must_use]
pub fn escape_manifest_path(path: &str) -> String {
    format!("'{}'", path.replace('\'', r"'\''"))
}

/// Renders the manifest text for `paths`, in order.
///
/// Fails with [`CoreError::InvalidManifestPath`] for a path containing a
/// newline or carriage return, or one that is not valid UTF-8.
pub fn render_manifest(paths: &[PathBuf]) -> CoreResult<String> {
    let mut contents = String::new();
    for path in paths {
        let text = path
            .to_str()
            .filter(|s| !s.contains(['\n', '\r']))
            .ok_or_else(|| CoreError::InvalidManifestPath(path.clone()))?;
        contents.push_str(FILE_DIRECTIVE);
        contents.push(' ');
        contents.push_str(&escape_manifest_path(text));
        contents.push('\n');
    }
    Ok(contents)
}

/// Writes the manifest for `paths` to `manifest_path`.
pub fn write_manifest(manifest_path: &Path, paths: &[PathBuf]) -> CoreResult<()> {
    let contents = render_manifest(paths)?;

    let mut writer = BufWriter::new(File::create(manifest_path)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;

    log::debug!(
        "Wrote manifest {} ({} entries):\n{}",
        manifest_path.display(),
        paths.len(),
        contents.trim_end()
    );
    Ok(())
}

/// Reads a manifest back into its ordered path list.
///
/// Blank lines and `#` comments are skipped. Any other line must be a single
/// `file` directive.
pub fn read_manifest(manifest_path: &Path) -> CoreResult<Vec<PathBuf>> {
    let contents = std::fs::read_to_string(manifest_path)?;
    parse_manifest(&contents)
}

/// Parses manifest text. See [`read_manifest`].
pub fn parse_manifest(contents: &str) -> CoreResult<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for (line_no, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let malformed = |reason: &str| -> CoreError {
            CoreError::ManifestParse(format!("line {}: {} ({:?})", line_no + 1, reason, raw))
        };

        let rest = line
            .strip_prefix(FILE_DIRECTIVE)
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .ok_or_else(|| malformed("expected a 'file' directive"))?;

        let (token, trailing) = unquote_token(rest.trim_start()).map_err(|reason| malformed(reason))?;
        if !trailing.trim().is_empty() {
            return Err(malformed("unexpected text after path"));
        }
        if token.is_empty() {
            return Err(malformed("empty path"));
        }

        paths.push(PathBuf::from(token));
    }

    Ok(paths)
}

/// Reads one token using the demuxer's quoting rules: `'...'` is literal,
/// `\x` outside quotes is `x`, and unquoted whitespace ends the token.
/// Returns the token and whatever follows it.
fn unquote_token(input: &str) -> Result<(String, &str), &'static str> {
    let mut token = String::new();
    let mut in_quote = false;
    let mut chars = input.char_indices();

    while let Some((idx, c)) = chars.next() {
        if in_quote {
            if c == '\'' {
                in_quote = false;
            } else {
                token.push(c);
            }
            continue;
        }

        match c {
            '\'' => in_quote = true,
            '\\' => match chars.next() {
                Some((_, escaped)) => token.push(escaped),
                None => return Err("dangling escape"),
            },
            c if c.is_whitespace() => return Ok((token, &input[idx..])),
            c => token.push(c),
        }
    }

    if in_quote {
        return Err("unterminated quote");
    }
    Ok((token, ""))
}
