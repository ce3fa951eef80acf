use std::io::BufRead;
use tracing::{event, Level};
use crate::display::{DisplaySink, StyledSpan};
use crate::errors::*;
use crate::grammar::{Grammar, GrammarProvider, LineTokenizer};
use crate::theme::ThemeRules;
use crate::token::LexerState;
use crate::util::{LineBoundaries, LineReader};

/// Counters describing a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub lines: usize,
    pub spans: usize,
    pub degraded_lines: usize,
}

/// Drives a stream of lines through a grammar and theme, and into a sink.
///
/// Without a grammar, lines are passed through as unstyled text.
pub struct Highlighter<'a, T = Grammar<'a>> {
    grammar: Option<T>,
    theme: &'a ThemeRules,
}

enum Mode<'t, T> {
    Unstyled,
    Tokenizing {
        grammar: &'t T,
        state: Option<LexerState>,
    },
}

impl<'a> Highlighter<'a> {
    pub fn new(grammar: Option<Grammar<'a>>, theme: &'a ThemeRules) -> Highlighter<'a> {
        Highlighter::with_tokenizer(grammar, theme)
    }

    /// Builds a highlighter using whichever grammar `provider` has for
    /// `language`, if any.
    pub fn for_language<P: GrammarProvider>(
        provider: &'a P,
        language: Option<&str>,
        theme: &'a ThemeRules,
    ) -> Highlighter<'a> {
        let grammar = language.and_then(|language| provider.resolve_grammar(language));

        Highlighter::new(grammar, theme)
    }
}

impl<'a, T: LineTokenizer> Highlighter<'a, T> {
    /// Builds a highlighter around any line tokenizer.
    pub fn with_tokenizer(tokenizer: Option<T>, theme: &'a ThemeRules) -> Highlighter<'a, T> {
        Highlighter{ grammar: tokenizer, theme }
    }

    /// Whether lines will be tokenized, rather than passed through.
    pub fn has_grammar(&self) -> bool {
        self.grammar.is_some()
    }

    /// Highlights every line of `input`, writing the results to `sink`.
    ///
    /// Lines that the grammar fails to tokenize are written unstyled, and
    /// tokenizing resumes from a fresh state on the following line. Read
    /// and write failures end the run; anything already written stays.
    ///
    /// # Examples
    ///
    /// ```
    /// use shcat::display::PlainSink;
    /// use shcat::highlight::Highlighter;
    /// use shcat::theme::ThemeRules;
    ///
    /// let theme = ThemeRules::default();
    /// let mut sink = PlainSink::new(Vec::new());
    /// Highlighter::new(None, &theme).run("hello world\n".as_bytes(), &mut sink).unwrap();
    /// assert_eq!(sink.into_inner(), b"hello world\n");
    /// ```
    pub fn run<R, S>(&self, input: R, sink: &mut S) -> Result<Summary>
    where
        R: BufRead,
        S: DisplaySink + ?Sized,
    {
        let mut mode = match self.grammar {
            Some(ref grammar) => Mode::Tokenizing{ grammar, state: None },
            None => Mode::Unstyled,
        };
        let mut summary = Summary::default();
        let mut lines = LineReader::new(input);

        while let Some(line) = lines.next() {
            let line = line?;
            summary.lines += 1;

            match mode {
                Mode::Unstyled => {
                    self.write_unstyled(&line, sink, &mut summary)?;
                },
                Mode::Tokenizing{ grammar, ref mut state } => {
                    match grammar.tokenize_line(&line, state.take()) {
                        Ok((tokens, next_state)) => {
                            let boundaries = LineBoundaries::new(&line);
                            for token in &tokens {
                                let text = token.text_in(&boundaries);
                                if text.is_empty() {
                                    continue;
                                }

                                let span = StyledSpan::new(text, self.theme.resolve(&token.scopes));
                                sink.write(&span)?;
                                summary.spans += 1;
                            }
                            *state = Some(next_state);
                        },
                        Err(error) => {
                            event!(Level::WARN, "Couldn't tokenize line {}, {}", lines.line_number(), error);
                            summary.degraded_lines += 1;
                            self.write_unstyled(&line, sink, &mut summary)?;
                        }
                    }
                }
            }

            sink.write_line_break()?;
        }
        sink.flush()?;

        event!(Level::DEBUG, "Highlighted {} lines into {} spans", summary.lines, summary.spans);
        Ok(summary)
    }

    fn write_unstyled<S>(&self, line: &str, sink: &mut S, summary: &mut Summary) -> Result<()>
    where
        S: DisplaySink + ?Sized,
    {
        if !line.is_empty() {
            sink.write(&StyledSpan::unstyled(line))?;
            summary.spans += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Highlighter, Summary};
    use crate::display::{DisplaySink, PlainSink, StyledSpan};
    use crate::errors::*;
    use crate::grammar::{Grammar, GrammarProvider, LineTokenizer, SyntaxLibrary};
    use crate::token::{LexerState, Token};
    use crate::theme::{ResolvedStyle, ThemeRule, ThemeRules};
    use std::io::{self, BufReader, Cursor, Read};
    use syntect::highlighting::Color;
    use syntect::parsing::Scope;

    const RED: Color = Color{ r: 255, g: 0, b: 0, a: 255 };
    const BLUE: Color = Color{ r: 0, g: 0, b: 255, a: 255 };

    #[derive(Default)]
    struct RecordingSink {
        lines: Vec<Vec<(String, ResolvedStyle)>>,
        current: Vec<(String, ResolvedStyle)>,
        flushed: bool,
    }

    impl DisplaySink for RecordingSink {
        fn write(&mut self, span: &StyledSpan) -> Result<()> {
            self.current.push((span.text.to_string(), span.style));
            Ok(())
        }

        fn write_line_break(&mut self) -> Result<()> {
            self.lines.push(std::mem::take(&mut self.current));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushed = true;
            Ok(())
        }
    }

    fn comment_theme() -> ThemeRules {
        ThemeRules::new(vec![
            ThemeRule{
                selector: Scope::new("comment").unwrap(),
                foreground: Some(RED),
                background: None,
                font_style: None,
            },
            ThemeRule{
                selector: Scope::new("source").unwrap(),
                foreground: None,
                background: Some(BLUE),
                font_style: None,
            },
        ])
    }

    fn plain_output(language: Option<&str>, input: &str) -> String {
        let library = SyntaxLibrary::new();
        let theme = comment_theme();
        let mut sink = PlainSink::new(Vec::new());
        Highlighter::for_language(&library, language, &theme)
            .run(Cursor::new(input), &mut sink)
            .unwrap();

        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn run_passes_lines_through_without_a_grammar() {
        let theme = comment_theme();
        let mut sink = RecordingSink::default();
        let summary = Highlighter::new(None, &theme)
            .run(Cursor::new("hello world\n"), &mut sink)
            .unwrap();

        assert_eq!(sink.lines, vec![vec![("hello world".to_string(), ResolvedStyle::default())]]);
        assert_eq!(summary, Summary{ lines: 1, spans: 1, degraded_lines: 0 });
        assert!(sink.flushed);
    }

    #[test]
    fn run_falls_back_for_unknown_languages() {
        assert_eq!(plain_output(Some("zzz-unknown"), "hello world"), "hello world\n");
        assert_eq!(plain_output(None, "hello world\n"), "hello world\n");
    }

    #[test]
    fn run_reproduces_the_input_text() {
        let input = "fn main() {\n    let s = \"héllo\"; // done\n\n}\n";
        assert_eq!(plain_output(Some("rs"), input), input);
    }

    #[test]
    fn run_writes_one_line_break_for_empty_lines() {
        assert_eq!(plain_output(Some("rs"), "\n"), "\n");
        assert_eq!(plain_output(None, "\n"), "\n");
    }

    #[test]
    fn run_writes_nothing_for_empty_input() {
        assert_eq!(plain_output(Some("rs"), ""), "");
    }

    #[test]
    fn run_resolves_styles_per_token() {
        let library = SyntaxLibrary::new();
        let theme = comment_theme();
        let mut sink = RecordingSink::default();
        Highlighter::new(library.resolve_grammar("rs"), &theme)
            .run(Cursor::new("let x = 1; // note\n"), &mut sink)
            .unwrap();

        let line = &sink.lines[0];
        let text: String = line.iter().map(|(text, _)| text.as_str()).collect();
        assert_eq!(text, "let x = 1; // note");

        for (text, style) in line {
            // Every token sits under source.rust, so the background always applies.
            assert_eq!(style.background, Some(BLUE));
            if text.contains("note") {
                assert_eq!(style.foreground, Some(RED));
            }
            if text.contains("let") {
                assert_eq!(style.foreground, None);
            }
        }
    }

    #[test]
    fn run_threads_state_across_lines() {
        let library = SyntaxLibrary::new();
        let theme = comment_theme();
        let mut sink = RecordingSink::default();
        let summary = Highlighter::new(library.resolve_grammar("c"), &theme)
            .run(Cursor::new("/* start\nstill in comment\nend */ code\n"), &mut sink)
            .unwrap();

        assert_eq!(summary.lines, 3);
        assert_eq!(sink.lines[1], vec![(
            "still in comment".to_string(),
            ResolvedStyle{ foreground: Some(RED), background: Some(BLUE), font_style: None }
        )]);
        let code = sink.lines[2].iter().find(|(text, _)| text.contains("code")).unwrap();
        assert_eq!(code.1.foreground, None);
    }

    /// Fails on any line containing `marker`, and defers to a real
    /// grammar otherwise.
    struct FailingOn<'a> {
        grammar: Grammar<'a>,
        marker: &'static str,
    }

    impl<'a> LineTokenizer for FailingOn<'a> {
        fn tokenize_line(&self, line: &str, prior: Option<LexerState>) -> Result<(Vec<Token>, LexerState)> {
            if line.contains(self.marker) {
                return Err(ErrorKind::InvalidScopeOperation("unbalanced restore".to_string()).into())
            }

            self.grammar.tokenize_line(line, prior)
        }
    }

    #[test]
    fn run_degrades_lines_that_fail_to_tokenize() {
        let library = SyntaxLibrary::new();
        let theme = comment_theme();
        let tokenizer = FailingOn{ grammar: library.resolve_grammar("c").unwrap(), marker: "@@" };
        let mut sink = RecordingSink::default();
        let summary = Highlighter::with_tokenizer(Some(tokenizer), &theme)
            .run(Cursor::new("/* start\nstill in comment\nbad @@ line\nend */ code\n"), &mut sink)
            .unwrap();

        assert_eq!(summary.lines, 4);
        assert_eq!(summary.degraded_lines, 1);
        assert_eq!(sink.lines.len(), 4);
        assert_eq!(sink.lines[1][0].1.foreground, Some(RED));

        // The failed line is written as-is.
        assert_eq!(sink.lines[2], vec![("bad @@ line".to_string(), ResolvedStyle::default())]);

        // Tokenizing restarts from scratch, so the comment is no longer open.
        let text: String = sink.lines[3].iter().map(|(text, _)| text.as_str()).collect();
        assert_eq!(text, "end */ code");
        let end = sink.lines[3].iter().find(|(text, _)| text.contains("end")).unwrap();
        assert_eq!(end.1.foreground, None);
    }

    #[test]
    fn run_replaces_invalid_utf8_instead_of_failing() {
        let theme = comment_theme();
        let mut sink = RecordingSink::default();
        let summary = Highlighter::new(None, &theme)
            .run(&b"first\ncaf\xe9\nlast\n"[..], &mut sink)
            .unwrap();

        assert_eq!(summary.lines, 3);
        assert_eq!(sink.lines[1][0].0, "caf\u{fffd}");
        assert_eq!(sink.lines[2][0].0, "last");
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn run_stops_on_read_failures_and_keeps_earlier_output() {
        let theme = comment_theme();
        let mut sink = RecordingSink::default();
        let input = BufReader::new(Cursor::new("first\n").chain(FailingReader));
        let result = Highlighter::new(None, &theme).run(input, &mut sink);

        assert!(result.is_err());
        assert_eq!(sink.lines.len(), 1);
        assert_eq!(sink.lines[0][0].0, "first");
    }

    #[test]
    fn run_accepts_boxed_sinks() {
        let theme = comment_theme();
        let mut sink: Box<dyn DisplaySink> = Box::new(PlainSink::new(io::sink()));
        let summary = Highlighter::new(None, &theme)
            .run(Cursor::new("a\nb"), &mut sink)
            .unwrap();

        assert_eq!(summary.lines, 2);
    }
}
