//! The single-pass pipeline behind the binary: resolve the input source,
//! read it whole, apply the transformer exactly once and emit the result
//! plus one trailing line terminator. Nothing is retried; every failure
//! aborts the run.

use crate::Args;
use lazy_static::lazy_static;
use std::fs;
use std::io;
use std::io::Read;
use std::io::Write;
use thiserror::Error;

lazy_static! {
    /// The fixed usage text. Built once, so repeated help requests are
    /// byte-identical.
    static ref USAGE: String = {
        let program = std::env::args()
            .next()
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        let pad = " ".repeat(program.chars().count());
        format!(
            "{0} expects one argument:\n\
             {1} -h, --help, help:  prints this message\n\
             {1} [filename]         reads and renders the file\n\
             {1} -                  reads and renders stdin\n\
             \n\
             {1} switches: --toggle-line-wrap  keep newlines instead of <br />\n\
             {1}           --debug             dump switches and raw input first\n\
             \n\
             {1} note that the output carries one extra trailing newline\n",
            program, pad
        )
    };
}

/// The usage message shown for help requests and malformed argument
/// lists.
pub fn usage() -> &'static str {
    &USAGE
}

/// Error reported by a [`Transform`] implementation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransformError(pub String);

/// The ways one run can fail.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The named file could not be read whole.
    #[error("cannot read `{path}`: {source}")]
    Read { path: String, source: io::Error },

    /// Stdin could not be drained.
    #[error("cannot drain stdin: {0}")]
    Stdin(#[source] io::Error),

    /// The transformer rejected the input. Propagated unchanged.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The output stream went away.
    #[error("cannot write output: {0}")]
    Output(#[source] io::Error),
}

/// Where the source text comes from.
#[derive(Debug, PartialEq, Eq)]
pub enum Source {
    /// Print the usage message; the transformer is never invoked.
    Help,
    /// The `-` sentinel: drain stdin.
    Stdin,
    /// Read the named file whole.
    File(String),
}

impl Source {
    /// Classifies the positional argument. `-` always means stdin, even
    /// when a file named `-` exists: nothing is touched on disk here.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("help") | Some("--help") | Some("-h") => Source::Help,
            Some("-") => Source::Stdin,
            Some(path) => Source::File(path.to_string()),
        }
    }
}

/// The narrow surface the harness needs from a markup transformer. The
/// production implementation wraps [`parse_textile::Textile`]; tests
/// inject stubs that record their invocations.
pub trait Transform {
    /// Configures line wrapping. Called at most once, before `transform`.
    fn set_line_wrap(&mut self, enabled: bool);

    /// Converts markup source text into HTML.
    fn transform(&self, source: &str) -> Result<String, TransformError>;
}

/// The production transformer.
#[derive(Debug, Default)]
pub struct TextileTransform {
    inner: parse_textile::Textile,
}

impl TextileTransform {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transform for TextileTransform {
    fn set_line_wrap(&mut self, enabled: bool) {
        self.inner.set_line_wrap(enabled);
    }

    fn transform(&self, source: &str) -> Result<String, TransformError> {
        self.inner
            .to_html(source)
            .map_err(|e| TransformError(e.to_string()))
    }
}

/// Runs one invocation against the given transformer and output stream.
/// The caller owns the process exit policy; every failure comes back as a
/// [`HarnessError`].
pub fn run<T, W>(args: &Args, transformer: &mut T, output: &mut W) -> Result<(), HarnessError>
where
    T: Transform,
    W: Write,
{
    let input = match Source::from_arg(args.input.as_deref()) {
        Source::Help => {
            output
                .write_all(usage().as_bytes())
                .map_err(HarnessError::Output)?;
            return Ok(());
        }
        Source::Stdin => {
            let mut buffer = String::new();
            Read::read_to_string(&mut io::stdin(), &mut buffer).map_err(HarnessError::Stdin)?;
            buffer
        }
        Source::File(path) => match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) => return Err(HarnessError::Read { path, source }),
        },
    };

    if args.toggle_line_wrap {
        transformer.set_line_wrap(false);
    }
    let html = transformer.transform(&input)?;

    if args.debug {
        let rule = "-".repeat(60);
        writeln!(output, "{:#?}", args).map_err(HarnessError::Output)?;
        writeln!(output, "{}", rule).map_err(HarnessError::Output)?;
        writeln!(output, "{:?}", input).map_err(HarnessError::Output)?;
        writeln!(output, "{}", rule).map_err(HarnessError::Output)?;
    }

    // The transformer's output plus exactly one line terminator.
    writeln!(output, "{}", html).map_err(HarnessError::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// Records every call. `transform` also snapshots how many line wrap
    /// calls it has seen so far, which pins their relative order.
    #[derive(Default)]
    struct Spy {
        reply: String,
        fail: bool,
        line_wrap_calls: Vec<bool>,
        transform_calls: RefCell<Vec<(String, usize)>>,
    }

    impl Spy {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                ..Self::default()
            }
        }
    }

    impl Transform for Spy {
        fn set_line_wrap(&mut self, enabled: bool) {
            self.line_wrap_calls.push(enabled);
        }

        fn transform(&self, source: &str) -> Result<String, TransformError> {
            self.transform_calls
                .borrow_mut()
                .push((source.to_string(), self.line_wrap_calls.len()));
            if self.fail {
                Err(TransformError("stub failure".to_string()))
            } else {
                Ok(self.reply.clone())
            }
        }
    }

    fn args(input: Option<&str>) -> Args {
        Args {
            toggle_line_wrap: false,
            debug: false,
            input: input.map(str::to_string),
        }
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn source_classification() {
        assert_eq!(Source::from_arg(None), Source::Help);
        assert_eq!(Source::from_arg(Some("help")), Source::Help);
        assert_eq!(Source::from_arg(Some("--help")), Source::Help);
        assert_eq!(Source::from_arg(Some("-h")), Source::Help);
        // `-` is classified before any file system access, so a file
        // literally named `-` can never shadow stdin.
        assert_eq!(Source::from_arg(Some("-")), Source::Stdin);
        assert_eq!(
            Source::from_arg(Some("notes.textile")),
            Source::File("notes.textile".to_string())
        );
    }

    #[test]
    fn help_prints_usage_and_skips_the_transformer() {
        for positional in [None, Some("help"), Some("--help"), Some("-h")] {
            let mut spy = Spy::replying("unused");
            let mut out = Vec::new();
            run(&args(positional), &mut spy, &mut out).unwrap();
            assert_eq!(out, usage().as_bytes());
            assert!(spy.line_wrap_calls.is_empty());
            assert!(spy.transform_calls.borrow().is_empty());
        }
    }

    #[test]
    fn usage_is_idempotent() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        run(&args(Some("help")), &mut Spy::default(), &mut first).unwrap();
        run(&args(Some("help")), &mut Spy::default(), &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn file_contents_reach_the_transformer() {
        let path = scratch_file("textile2html_harness_e2e.textile", "h1. Hello");
        let mut spy = Spy::replying("<h1>Hello</h1>");
        let mut out = Vec::new();
        run(&args(path.to_str()), &mut spy, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<h1>Hello</h1>\n");
        assert_eq!(
            spy.transform_calls.borrow().as_slice(),
            &[("h1. Hello".to_string(), 0)]
        );
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn toggle_line_wrap_disables_wrapping_once_before_transform() {
        let path = scratch_file("textile2html_harness_wrap.textile", "a\nb");
        let mut spy = Spy::replying("x");
        let mut out = Vec::new();
        let mut toggled = args(path.to_str());
        toggled.toggle_line_wrap = true;
        run(&toggled, &mut spy, &mut out).unwrap();
        assert_eq!(spy.line_wrap_calls, vec![false]);
        // The single line wrap call had already happened when the
        // transform ran.
        assert_eq!(spy.transform_calls.borrow().as_slice(), &[("a\nb".to_string(), 1)]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn without_the_switch_line_wrap_is_never_touched() {
        let path = scratch_file("textile2html_harness_nowrap.textile", "a\nb");
        let mut spy = Spy::replying("x");
        let mut out = Vec::new();
        run(&args(path.to_str()), &mut spy, &mut out).unwrap();
        assert!(spy.line_wrap_calls.is_empty());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_fails_without_transforming() {
        let mut spy = Spy::replying("unused");
        let mut out = Vec::new();
        let err = run(
            &args(Some("/definitely/not/here.textile")),
            &mut spy,
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, HarnessError::Read { .. }));
        assert!(spy.transform_calls.borrow().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn transformer_failure_propagates() {
        let path = scratch_file("textile2html_harness_fail.textile", "h1. x");
        let mut spy = Spy::replying("unused");
        spy.fail = true;
        let mut out = Vec::new();
        let err = run(&args(path.to_str()), &mut spy, &mut out).unwrap_err();
        assert!(matches!(err, HarnessError::Transform(_)));
        assert!(out.is_empty());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn debug_dumps_switches_and_input_before_the_output() {
        let path = scratch_file("textile2html_harness_debug.textile", "h1. X");
        let mut spy = Spy::replying("<h1>X</h1>");
        let mut out = Vec::new();
        let mut debugging = args(path.to_str());
        debugging.debug = true;
        run(&debugging, &mut spy, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let rule = "-".repeat(60);
        assert!(out.starts_with("Args"));
        assert_eq!(out.matches(&rule).count(), 2);
        assert!(out.contains("\"h1. X\""));
        assert!(out.ends_with("<h1>X</h1>\n"));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn production_transformer_renders_textile() {
        let mut transformer = TextileTransform::new();
        assert_eq!(
            transformer.transform("h1. Hello").unwrap(),
            "<h1>Hello</h1>"
        );
        transformer.set_line_wrap(false);
        assert_eq!(
            transformer.transform("orange\nmocha").unwrap(),
            "<p>orange\nmocha</p>"
        );
    }
}
