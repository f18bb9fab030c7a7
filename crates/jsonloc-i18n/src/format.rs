//! Positional template formatting
//!
//! Templates use numbered placeholders: `{0}`, `{1}`, and so on. A placeholder
//! may carry an alignment, `{0,8}` pads on the left to eight characters and
//! `{0,-8}` pads on the right. `{{` and `}}` produce literal braces.
//!
//! Formatting is strict: referencing a missing argument, passing arguments to
//! a template without placeholders, or writing a malformed placeholder is an
//! error rather than garbled output.

use thiserror::Error;

/// Largest accepted alignment magnitude, exclusive
pub const MAX_ALIGNMENT: i64 = 1_000_000;

/// Reasons a template and its arguments do not fit together
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A placeholder references an argument that was not supplied
    #[error("placeholder {{{index}}} needs at least {needed} argument(s), {supplied} supplied")]
    IndexOutOfRange {
        /// Referenced argument index
        index: usize,
        /// Arguments the placeholder needs
        needed: usize,
        /// Arguments actually supplied
        supplied: usize,
    },

    /// Arguments were supplied to a template without placeholders
    #[error("template has no placeholders but {supplied} argument(s) were supplied")]
    UnexpectedArguments {
        /// Arguments actually supplied
        supplied: usize,
    },

    /// A `{` without its closing `}`
    #[error("unclosed placeholder starting at byte {position}")]
    UnclosedPlaceholder {
        /// Byte offset of the `{`
        position: usize,
    },

    /// A `}` that closes nothing and is not escaped
    #[error("unexpected '}}' at byte {position}")]
    UnexpectedClosingBrace {
        /// Byte offset of the `}`
        position: usize,
    },

    /// A placeholder whose index or alignment is not a number, or whose
    /// alignment is out of range
    #[error("invalid placeholder '{{{spec}}}' at byte {position}")]
    InvalidPlaceholder {
        /// Text between the braces
        spec: String,
        /// Byte offset of the `{`
        position: usize,
    },

    /// A placeholder with a `:format` suffix
    #[error("format specifier '{specifier}' at byte {position} is not supported")]
    UnsupportedFormatSpecifier {
        /// Text after the `:`
        specifier: String,
        /// Byte offset of the `{`
        position: usize,
    },
}

/// A parsed `{index[,alignment]}` placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder {
    index: usize,
    alignment: i64,
}

impl Placeholder {
    fn parse(spec: &str, position: usize) -> Result<Self, FormatError> {
        let invalid = || FormatError::InvalidPlaceholder {
            spec: spec.to_string(),
            position,
        };

        if let Some((_, specifier)) = spec.split_once(':') {
            return Err(FormatError::UnsupportedFormatSpecifier {
                specifier: specifier.to_string(),
                position,
            });
        }

        let (index, alignment) = match spec.split_once(',') {
            Some((index, alignment)) => (index, Some(alignment.trim())),
            None => (spec, None),
        };

        let index = index.trim();
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index = index.parse().map_err(|_| invalid())?;

        let alignment: i64 = match alignment {
            Some(raw) => raw.parse().map_err(|_| invalid())?,
            None => 0,
        };
        if alignment.unsigned_abs() >= MAX_ALIGNMENT.unsigned_abs() {
            return Err(invalid());
        }

        Ok(Self { index, alignment })
    }

    fn write(self, out: &mut String, value: &str) {
        let width = usize::try_from(self.alignment.unsigned_abs()).unwrap_or(usize::MAX);
        let padding = width.saturating_sub(value.chars().count());

        if self.alignment >= 0 {
            out.extend(std::iter::repeat(' ').take(padding));
            out.push_str(value);
        } else {
            out.push_str(value);
            out.extend(std::iter::repeat(' ').take(padding));
        }
    }
}

/// Substitute `args` into `template`.
pub fn format_positional<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    let mut placeholders = 0usize;

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }

                let mut spec = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    match inner {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => {
                            return Err(FormatError::InvalidPlaceholder { spec, position });
                        }
                        other => spec.push(other),
                    }
                }
                if !closed {
                    return Err(FormatError::UnclosedPlaceholder { position });
                }

                let placeholder = Placeholder::parse(&spec, position)?;
                let value = args
                    .get(placeholder.index)
                    .ok_or_else(|| FormatError::IndexOutOfRange {
                        index: placeholder.index,
                        needed: placeholder.index.saturating_add(1),
                        supplied: args.len(),
                    })?;
                placeholder.write(&mut out, value.as_ref());
                placeholders += 1;
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(FormatError::UnexpectedClosingBrace { position });
                }
            }
            other => out.push(other),
        }
    }

    if placeholders == 0 && !args.is_empty() {
        return Err(FormatError::UnexpectedArguments {
            supplied: args.len(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NO_ARGS: [&str; 0] = [];

    #[test]
    fn test_single_placeholder() {
        assert_eq!(
            format_positional("Welcome, {0}!", &["Ana"]).unwrap(),
            "Welcome, Ana!"
        );
    }

    #[test]
    fn test_repeated_and_reordered_placeholders() {
        assert_eq!(
            format_positional("{1} {0} {1}", &["a", "b"]).unwrap(),
            "b a b"
        );
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(
            format_positional("{{0}} is {0}", &["x"]).unwrap(),
            "{0} is x"
        );
        assert_eq!(format_positional("{{}}", &NO_ARGS).unwrap(), "{}");
    }

    #[test]
    fn test_alignment() {
        assert_eq!(format_positional("[{0,5}]", &["ab"]).unwrap(), "[   ab]");
        assert_eq!(format_positional("[{0,-5}]", &["ab"]).unwrap(), "[ab   ]");
        assert_eq!(format_positional("[{0,1}]", &["abc"]).unwrap(), "[abc]");
    }

    #[test]
    fn test_too_few_arguments() {
        let err = format_positional("{0} and {1}", &["only"]).unwrap_err();
        assert_eq!(
            err,
            FormatError::IndexOutOfRange {
                index: 1,
                needed: 2,
                supplied: 1
            }
        );
    }

    #[test]
    fn test_arguments_without_placeholders() {
        let err = format_positional("Hello!", &["Ana"]).unwrap_err();
        assert_eq!(err, FormatError::UnexpectedArguments { supplied: 1 });
    }

    #[test]
    fn test_extra_arguments_allowed_with_placeholders() {
        assert_eq!(format_positional("{0}", &["a", "b"]).unwrap(), "a");
    }

    #[test]
    fn test_no_placeholders_no_arguments() {
        assert_eq!(format_positional("Hello!", &NO_ARGS).unwrap(), "Hello!");
    }

    #[test]
    fn test_malformed_templates() {
        assert!(matches!(
            format_positional("Hi {0", &["a"]),
            Err(FormatError::UnclosedPlaceholder { position: 3 })
        ));
        assert!(matches!(
            format_positional("Hi }", &NO_ARGS),
            Err(FormatError::UnexpectedClosingBrace { position: 3 })
        ));
        assert!(matches!(
            format_positional("{name}", &["a"]),
            Err(FormatError::InvalidPlaceholder { .. })
        ));
        assert!(matches!(
            format_positional("{+0}", &["a"]),
            Err(FormatError::InvalidPlaceholder { .. })
        ));
        assert!(matches!(
            format_positional("{0,wide}", &["a"]),
            Err(FormatError::InvalidPlaceholder { .. })
        ));
    }

    #[test]
    fn test_huge_index_is_out_of_range() {
        let err = format_positional("Hi {18446744073709551615}", &["Ana"]).unwrap_err();
        assert_eq!(
            err,
            FormatError::IndexOutOfRange {
                index: usize::MAX,
                needed: usize::MAX,
                supplied: 1
            }
        );
    }

    #[test]
    fn test_oversized_alignment_rejected() {
        for template in [
            "[{0,-9223372036854775808}]",
            "[{0,100000000000}]",
            "[{0,1000000}]",
            "[{0,-1000000}]",
        ] {
            assert!(
                matches!(
                    format_positional(template, &["x"]),
                    Err(FormatError::InvalidPlaceholder { position: 1, .. })
                ),
                "{template}"
            );
        }

        let widest = format_positional("{0,999999}", &["x"]).unwrap();
        assert_eq!(widest.len(), 999_999);
    }

    #[test]
    fn test_format_specifier_rejected() {
        let err = format_positional("{0:N2}", &["1.5"]).unwrap_err();
        assert_eq!(
            err,
            FormatError::UnsupportedFormatSpecifier {
                specifier: "N2".to_string(),
                position: 0
            }
        );
    }

    #[test]
    fn test_error_messages() {
        let err = FormatError::IndexOutOfRange {
            index: 1,
            needed: 2,
            supplied: 1,
        };
        assert_eq!(
            err.to_string(),
            "placeholder {1} needs at least 2 argument(s), 1 supplied"
        );
    }

    proptest! {
        #[test]
        fn test_plain_text_passes_through(text in "[^{}]{0,64}") {
            prop_assert_eq!(format_positional(&text, &NO_ARGS).unwrap(), text);
        }

        #[test]
        fn test_arbitrary_templates_never_panic(
            template in r"[a-z {},:\-0-9]{0,48}",
            args in proptest::collection::vec("[a-z]{0,4}", 0..4),
        ) {
            let _ = format_positional(&template, &args);
        }

        #[test]
        fn test_argument_inserted_verbatim(arg in "[^{}]{0,32}") {
            let formatted = format_positional("<{0}>", &[arg.as_str()]).unwrap();
            prop_assert_eq!(formatted, format!("<{arg}>"));
        }
    }
}
