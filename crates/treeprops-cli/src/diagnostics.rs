//! Source-annotated rendering of load errors.

use ariadne::{Color, Label, Report, ReportKind, Source};
use std::ops::Range;
use treeprops::Error;
use treeprops_xml::Span;

/// Render `err` against the text it was loaded from.
///
/// Returns `None` when the error carries no location in `content`.
pub fn render_load_error(path: &str, content: &str, err: &Error) -> Option<String> {
    let span = err.span()?;
    let main = char_range(content, span)?;

    let mut report = Report::build(ReportKind::Error, path.to_string(), main.start)
        .with_message(err.to_string());

    let (message, first) = match err {
        Error::DuplicatePath {
            path: key,
            first_span,
            ..
        } => (
            format!("'{}' defined again here", key),
            first_span.and_then(|s| char_range(content, s)),
        ),
        Error::Parse(inner) => (inner.to_string(), None),
        _ => (err.to_string(), None),
    };

    report = report.with_label(
        Label::new((path.to_string(), main))
            .with_message(message)
            .with_color(Color::Red),
    );
    if let Some(first) = first {
        report = report.with_label(
            Label::new((path.to_string(), first))
                .with_message("first defined here")
                .with_color(Color::Cyan),
        );
    }

    let mut output = Vec::new();
    report
        .finish()
        .write((path.to_string(), Source::from(content)), &mut output)
        .ok()?;

    String::from_utf8(output).ok()
}

// Spans count bytes; ariadne counts chars.
fn char_range(content: &str, span: Span) -> Option<Range<usize>> {
    let start = content.get(..span.start.min(content.len()))?.chars().count();
    let end = content.get(..span.end.min(content.len()))?.chars().count();
    Some(start..end.max(start))
}
