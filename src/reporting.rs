use crate::facade::UNKNOWN_POSITION;
use crate::settings::{Setting, Settings};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::{Files, SimpleFile};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{Buffer, ColorChoice, StandardStream, WriteColor};
use std::ops::Range;

pub const DEFAULT_SOURCE_NAME: &str = "<input>";

/// Something that turns a message and a source position into a diagnostic.
pub trait Reporter {
    fn report_error(&mut self, message: &str, line: usize, column: usize);
}

/// Creates a reporter bound to one particular source text.
pub trait ReporterFactory {
    type Reporter: Reporter;

    fn for_source(&self, source: &str) -> Self::Reporter;
}

impl<F, R> ReporterFactory for F
where
    F: Fn(&str) -> R,
    R: Reporter,
{
    type Reporter = R;

    fn for_source(&self, source: &str) -> R {
        self(source)
    }
}

pub struct ErrorReporter {
    file: SimpleFile<String, String>,
    writer: Box<dyn WriteColor>,
    config: term::Config,
}

impl ErrorReporter {
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self::named(DEFAULT_SOURCE_NAME, source)
    }

    pub fn named<N: Into<String>, S: Into<String>>(name: N, source: S) -> Self {
        Self {
            file: SimpleFile::new(name.into(), source.into()),
            writer: Box::new(StandardStream::stderr(ColorChoice::Auto)),
            config: term::Config::default(),
        }
    }

    pub fn with_color(self, choice: ColorChoice) -> Self {
        self.with_writer(StandardStream::stderr(choice))
    }

    pub fn with_writer<W: WriteColor + 'static>(mut self, writer: W) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// A reporter factory writing to stderr, colored according to `settings`.
    pub fn factory<N: Into<String>>(name: N, settings: &Settings) -> impl Fn(&str) -> Self {
        let name = name.into();
        let color = if settings.is_enabled(&Setting::Color) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };

        move |source: &str| Self::named(name.clone(), source).with_color(color)
    }

    pub fn source(&self) -> &str {
        self.file.source()
    }

    pub fn diagnostic(&self, message: &str, line: usize, column: usize) -> Diagnostic<()> {
        let diagnostic = Diagnostic::error()
            .with_code("E001")
            .with_message(message);

        match self.span(line, column) {
            Some(span) => diagnostic.with_labels(vec![Label::primary((), span)
                .with_message(format!("line {}, column {}", line, column))]),
            None => diagnostic.with_notes(vec![
                "the parser did not report a usable source position".to_string()
            ]),
        }
    }

    pub fn render_to_string(&self, message: &str, line: usize, column: usize) -> String {
        let mut buffer = Buffer::no_color();

        match term::emit(
            &mut buffer,
            &self.config,
            &self.file,
            &self.diagnostic(message, line, column),
        ) {
            Ok(()) => String::from_utf8_lossy(buffer.as_slice()).into_owned(),
            Err(e) => format!("{}: {}", message, e),
        }
    }

    // Byte range of the character at the 1-based (line, column), or an empty range
    // at the end of the line when the column runs past it.
    fn span(&self, line: usize, column: usize) -> Option<Range<usize>> {
        if line == UNKNOWN_POSITION {
            return None;
        }

        let source = self.file.source();
        let line_range = self.file.line_range((), line - 1).ok()?;
        let text = &source[line_range.clone()];
        let content_end = line_range.start + text.trim_end_matches(&['\n', '\r'][..]).len();
        let skip = column.max(1) - 1;

        let start = text
            .char_indices()
            .nth(skip)
            .map(|(idx, _)| line_range.start + idx)
            .unwrap_or(content_end)
            .min(content_end);

        let end = source[start..]
            .chars()
            .next()
            .filter(|c| *c != '\n' && *c != '\r')
            .map(|c| start + c.len_utf8())
            .unwrap_or(start);

        Some(start..end)
    }
}

impl Reporter for ErrorReporter {
    fn report_error(&mut self, message: &str, line: usize, column: usize) {
        let diagnostic = self.diagnostic(message, line, column);

        if let Err(e) = term::emit(&mut *self.writer, &self.config, &self.file, &diagnostic) {
            log::warn!("failed to emit diagnostic: {}", e);
        }
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("name", self.file.name())
            .field("source_len", &self.file.source().len())
            .finish()
    }
}
