#![doc = include_str!("../README.md")]

#[cfg(feature = "serde")]
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};

use std::cmp::{self, Ordering};
use std::fmt;
use std::num::ParseIntError;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use winnow::ascii::{digit1, space0};
use winnow::combinator::{alt, eof, opt, preceded, separated, terminated};
use winnow::error::{AddContext, ErrMode, ErrorKind, FromExternalError, ParserError};
use winnow::stream::Stream;
use winnow::token::{literal, take_while};
use winnow::{PResult, Parser};

pub use range::*;

mod range;

/// Upper bound for the major, minor, and patch components. Values that do
/// not fit in an unsigned 32-bit integer are a parse error.
pub const MAX_COMPONENT_VALUE: u64 = u32::MAX as u64;

/// Maximum length of a version or range string.
pub const MAX_LENGTH: usize = 256;

/// Rendering of invalid [Version]s and [Range]s. Never parses back as a
/// valid version or range.
const INVALID_DISPLAY: &str = "INVALID";

/**
Version or range parsing error wrapper.

This wrapper holds some parsing-related metadata, as well as a more
specific [SemverErrorKind]. It is surfaced by the `try_parse` entry points;
the plain `parse` entry points collapse it into an invalid value instead.
*/
#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("{kind}")]
pub struct SemverError {
    input: String,
    span: SourceSpan,
    kind: SemverErrorKind,
}

impl Diagnostic for SemverError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind().code()
    }

    fn severity(&self) -> Option<miette::Severity> {
        self.kind().severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind().help()
    }

    fn url<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind().url()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.input)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(
            miette::LabeledSpan::new_with_span(Some("here".into()), *self.span()),
        )))
    }
}

impl SemverError {
    /// Returns the input that was given to the parser.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the SourceSpan of the error.
    pub fn span(&self) -> &SourceSpan {
        &self.span
    }

    /// Returns the (0-based) byte offset where the parsing error happened.
    pub fn offset(&self) -> usize {
        self.span.offset()
    }

    /// Returns the more specific [SemverErrorKind] for this error.
    ///
    /// This value can also be fetched through [std::error::Error::source],
    /// but that would require downcasting to match types.
    pub fn kind(&self) -> &SemverErrorKind {
        &self.kind
    }

    /// Returns the (0-indexed) line and column number where the parsing error
    /// happened.
    pub fn location(&self) -> (usize, usize) {
        // Taken partially from winnow.
        let prefix = &self.input.as_bytes()[..self.offset()];

        // Count the number of newlines in the first `offset` bytes of input
        let line_number = bytecount::count(prefix, b'\n');

        // Find the line that includes the subslice:
        // Find the *last* newline before the substring starts
        let line_begin = prefix
            .iter()
            .rev()
            .position(|&b| b == b'\n')
            .map(|pos| self.offset() - pos)
            .unwrap_or(0);

        // Find the full line after that newline
        let line = self.input[line_begin..]
            .lines()
            .next()
            .unwrap_or(&self.input[line_begin..])
            .trim_end();

        // The (0-indexed) column number is the offset of our substring into that line
        let column_number = self.input[self.offset()..].as_ptr() as usize - line.as_ptr() as usize;

        (line_number, column_number)
    }

    pub(crate) fn new(input: &str, offset: usize, kind: SemverErrorKind) -> Self {
        Self {
            input: input.into(),
            span: (offset, 0).into(),
            kind,
        }
    }
}

/**
The specific kind of error that occurred. Usually wrapped in a [SemverError].
*/
#[derive(Debug, Clone, Error, Eq, PartialEq, Diagnostic)]
pub enum SemverErrorKind {
    /// Version and range strings can't be longer than [MAX_LENGTH]
    /// characters.
    #[error("Semver string can't be longer than {} characters.", MAX_LENGTH)]
    #[diagnostic(code(semver_lax::too_long), url(docsrs))]
    MaxLengthError,

    /// The parser ran out of input before completing a version or range.
    #[error("Incomplete input to semver parser.")]
    #[diagnostic(code(semver_lax::incomplete_input), url(docsrs))]
    IncompleteInput,

    /**
    Numeric components of a version (major, minor, patch, integer sections
    of build and prerelease) must all be valid, parseable integers. This
    error occurs when Rust's own integer parsing failed.
    */
    #[error("Failed to parse an integer component of a semver string: {0}")]
    #[diagnostic(code(semver_lax::parse_int_error), url(docsrs))]
    ParseIntError(ParseIntError),

    /**
    The major, minor, and patch components must each fit in an unsigned
    32-bit integer, see [MAX_COMPONENT_VALUE].
    */
    #[error("Version component does not fit in 32 bits: {0}")]
    #[diagnostic(code(semver_lax::component_too_large), url(docsrs))]
    ComponentTooLarge(u64),

    /**
    This is a generic error that a certain component of the semver string
    failed to parse.
    */
    #[error("Failed to parse {0}.")]
    #[diagnostic(code(semver_lax::parse_component_error), url(docsrs))]
    Context(&'static str),

    /// A range must contain at least one version term.
    #[error("Range contained no version terms.")]
    #[diagnostic(code(semver_lax::empty_range), url(docsrs))]
    EmptyRange,

    /**
    Inside a range term, every component after the first wildcard must be a
    wildcard (or absent) as well: `1.x.3` leaves a gap and is rejected.
    */
    #[error("A concrete version component cannot follow a wildcard.")]
    #[diagnostic(code(semver_lax::wildcard_gap), url(docsrs))]
    WildcardGap,

    /**
    Hyphen ranges only accept bare, fully specified versions on both sides:
    `1.2.3 - 2.0.0`. Operators or wildcards next to the hyphen reject the
    whole range.
    */
    #[error("Both sides of a hyphen range must be bare, fully specified versions.")]
    #[diagnostic(code(semver_lax::malformed_hyphen_range), url(docsrs))]
    MalformedHyphenRange,

    /// `~`, `~>`, and `^` need at least a concrete major version to anchor
    /// their bounds.
    #[error("`{0}` requires an explicit major version.")]
    #[diagnostic(code(semver_lax::wildcard_operand), url(docsrs))]
    WildcardOperand(&'static str),

    /// `^` cannot be anchored to a prerelease version.
    #[error("`^` cannot be anchored to a prerelease version.")]
    #[diagnostic(code(semver_lax::caret_prerelease), url(docsrs))]
    CaretPrerelease,

    /// Consecutive range terms may only be joined by whitespace, a hyphen,
    /// or `||`.
    #[error("Unrecognized separator between range terms: `{0}`.")]
    #[diagnostic(code(semver_lax::unknown_separator), url(docsrs))]
    UnknownSeparator(String),

    /**
    This error is mostly nondescript. Feel free to file an issue if you run
    into it.
    */
    #[error("An unspecified error occurred.")]
    #[diagnostic(code(semver_lax::other), url(docsrs))]
    Other,
}

#[derive(Debug)]
pub(crate) struct SemverParseError<I> {
    pub(crate) input: I,
    pub(crate) context: Option<&'static str>,
    pub(crate) kind: Option<SemverErrorKind>,
}

impl<I: Clone + Stream> ParserError<I> for SemverParseError<I> {
    fn from_error_kind(input: &I, _kind: winnow::error::ErrorKind) -> Self {
        Self {
            input: input.clone(),
            context: None,
            kind: None,
        }
    }

    fn append(
        self,
        input: &I,
        _token_start: &<I as Stream>::Checkpoint,
        _kind: winnow::error::ErrorKind,
    ) -> Self {
        Self {
            input: input.clone(),
            context: self.context,
            kind: self.kind,
        }
    }
}

impl<I: Stream> AddContext<I> for SemverParseError<I> {
    fn add_context(
        self,
        _input: &I,
        _token_start: &<I as Stream>::Checkpoint,
        ctx: &'static str,
    ) -> Self {
        Self {
            input: self.input,
            context: Some(ctx),
            kind: self.kind,
        }
    }
}

impl<'a> FromExternalError<&'a str, SemverParseError<&'a str>> for SemverParseError<&'a str> {
    fn from_external_error(
        _input: &&'a str,
        _kind: ErrorKind,
        e: SemverParseError<&'a str>,
    ) -> Self {
        e
    }
}

/**
An Identifier type for build and prerelease metadata.
*/
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Identifier {
    /// An identifier that's solely numbers.
    Numeric(u64),
    /// An identifier with letters and numbers.
    AlphaNumeric(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

impl Ord for Identifier {
    /// Two numeric identifiers compare as integers; any other pairing
    /// compares as ASCII strings.
    fn cmp(&self, other: &Self) -> Ordering {
        use Identifier::*;
        match (self, other) {
            (Numeric(a), Numeric(b)) => a.cmp(b),
            (Numeric(a), AlphaNumeric(b)) => a.to_string().as_str().cmp(b.as_str()),
            (AlphaNumeric(a), Numeric(b)) => a.as_str().cmp(b.to_string().as_str()),
            (AlphaNumeric(a), AlphaNumeric(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A position within a version, ordered from most to least significant.
///
/// Returned by [Version::differ_at] and consumed by [Version::increment].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionPart {
    Major,
    Minor,
    Patch,
    PreRelease,
    Build,
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionPart::Major => write!(f, "major"),
            VersionPart::Minor => write!(f, "minor"),
            VersionPart::Patch => write!(f, "patch"),
            VersionPart::PreRelease => write!(f, "prerelease"),
            VersionPart::Build => write!(f, "build"),
        }
    }
}

/**
A semantic version, conformant to the [semver spec](https://semver.org/spec/v2.0.0.html).

Parsing never fails loudly: [Version::parse] always returns a value, and
malformed input yields one with [Version::is_valid] `false`. Invalid
versions are inert — comparing, incrementing, or matching them is a
contract violation and panics. Use [Version::try_parse] to get the actual
diagnostic.
*/
#[derive(Clone, Debug)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Vec<Identifier>,
    pub build: Vec<Identifier>,
    valid: bool,
}

#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Version {
    /// Parse a version string into a [Version].
    ///
    /// Never fails: malformed input yields the invalid sentinel value.
    /// Check [Version::is_valid] before doing anything else with the
    /// result, or use [Version::try_parse] for a detailed error.
    ///
    /// ```rust
    /// use semver_lax::Version;
    ///
    /// assert!(Version::parse("1.2.3-rc.4").is_valid());
    /// assert!(!Version::parse("1.2.5.6").is_valid());
    /// ```
    pub fn parse<S: AsRef<str>>(input: S) -> Version {
        Version::try_parse(input).unwrap_or_else(|_| Version::invalid())
    }

    /// Parse a version string, surfacing the parse failure instead of
    /// collapsing it into an invalid value.
    pub fn try_parse<S: AsRef<str>>(input: S) -> Result<Version, SemverError> {
        let input = input.as_ref();

        if input.len() > MAX_LENGTH {
            return Err(SemverError::new(
                input,
                input.len() - 1,
                SemverErrorKind::MaxLengthError,
            ));
        }

        let mut text = input;
        match version_full.parse_next(&mut text) {
            Ok(arg) => Ok(arg),
            Err(err) => Err(match err {
                ErrMode::Backtrack(e) | ErrMode::Cut(e) => SemverError {
                    input: input.into(),
                    span: (e.input.as_ptr() as usize - input.as_ptr() as usize, 0).into(),
                    kind: if let Some(kind) = e.kind {
                        kind
                    } else if let Some(ctx) = e.context {
                        SemverErrorKind::Context(ctx)
                    } else {
                        SemverErrorKind::Other
                    },
                },
                ErrMode::Incomplete(_) => SemverError {
                    input: input.into(),
                    span: (input.len().saturating_sub(1), 0).into(),
                    kind: SemverErrorKind::IncompleteInput,
                },
            }),
        }
    }

    /// The designated invalid [Version]: zeroed components, not valid,
    /// rendered as a fixed sentinel string. Returned by
    /// [max_satisfying][crate::max_satisfying] when nothing matches.
    pub fn invalid() -> Version {
        Version {
            major: 0,
            minor: 0,
            patch: 0,
            pre_release: Vec::new(),
            build: Vec::new(),
            valid: false,
        }
    }

    /// True if this [Version] was constructed from well-formed input.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// True if this [Version] has no prerelease component. Build metadata
    /// does not affect stability.
    pub fn is_stable(&self) -> bool {
        self.pre_release.is_empty()
    }

    /// True if this [Version] satisfies the given [Range].
    pub fn satisfies(&self, range: &Range) -> bool {
        range.satisfies(self)
    }

    /// Returns a new [Version] with `part` incremented: the components
    /// after it (through patch) reset to zero, and prerelease and build
    /// cleared. [VersionPart::PreRelease] keeps the numeric components and
    /// only strips the suffixes, so a version that carried prerelease or
    /// build data does not come back unchanged.
    ///
    /// The receiver must be valid, and [VersionPart::Build] is not an
    /// incrementable part; both are contract violations that panic.
    pub fn increment(&self, part: VersionPart) -> Version {
        assert!(self.valid, "attempted to increment an invalid version");

        let (major, minor, patch) = match part {
            VersionPart::Major => (self.major + 1, 0, 0),
            VersionPart::Minor => (self.major, self.minor + 1, 0),
            VersionPart::Patch => (self.major, self.minor, self.patch + 1),
            VersionPart::PreRelease => (self.major, self.minor, self.patch),
            VersionPart::Build => panic!("build is not an incrementable version part"),
        };

        Version {
            major,
            minor,
            patch,
            pre_release: Vec::new(),
            build: Vec::new(),
            valid: true,
        }
    }

    /// Returns the first [VersionPart] at which `self` and `other`
    /// diverge, checked from major through build.
    ///
    /// Calling this on equal versions (or on invalid ones) is a contract
    /// violation and panics.
    pub fn differ_at(&self, other: &Self) -> VersionPart {
        assert!(
            self.valid && other.valid,
            "differ_at requires valid versions"
        );

        if self.major != other.major {
            return VersionPart::Major;
        }
        if self.minor != other.minor {
            return VersionPart::Minor;
        }
        if self.patch != other.patch {
            return VersionPart::Patch;
        }
        if self.pre_release != other.pre_release {
            return VersionPart::PreRelease;
        }
        if self.build != other.build {
            return VersionPart::Build;
        }

        panic!("differ_at called on equal versions");
    }

    /// Ordering without the build tier, used for range matching, where
    /// build metadata never participates.
    pub(crate) fn cmp_ignore_build(&self, other: &Version) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => {}
            //if difference in major version, just return result
            order_result => return order_result,
        }

        match self.minor.cmp(&other.minor) {
            Ordering::Equal => {}
            //if difference in minor version, just return result
            order_result => return order_result,
        }

        match self.patch.cmp(&other.patch) {
            Ordering::Equal => {}
            //if difference in patch version, just return result
            order_result => return order_result,
        }

        compare_identifiers(&self.pre_release, &other.pre_release)
    }

    /// Appends the synthetic prerelease identifier `0` when the prerelease
    /// list is empty. Only called by range expansion on owned values that
    /// have not been exposed yet.
    pub(crate) fn with_zero_prerelease(mut self) -> Version {
        if self.pre_release.is_empty() {
            self.pre_release.push(Identifier::Numeric(0));
        }
        self
    }
}

/// Element-wise, numeric-aware identifier list comparison shared by the
/// prerelease and build tiers: an empty list sorts after a non-empty one
/// (a prerelease precedes its release), and a strict prefix sorts first.
fn compare_identifiers(a: &[Identifier], b: &[Identifier]) -> Ordering {
    match (a.len(), b.len()) {
        (0, 0) => Ordering::Equal,
        (0, _) => Ordering::Greater,
        (_, 0) => Ordering::Less,
        // Slice ordering is element-wise with shorter-prefix-first, which
        // is exactly the tie-break this needs.
        (_, _) => a.cmp(b),
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl std::hash::Hash for Version {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.pre_release.hash(state);
        self.build.hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return f.write_str(INVALID_DISPLAY);
        }

        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        for (i, ident) in self.pre_release.iter().enumerate() {
            if i == 0 {
                write!(f, "-")?;
            } else {
                write!(f, ".")?;
            }
            write!(f, "{}", ident)?;
        }

        for (i, ident) in self.build.iter().enumerate() {
            if i == 0 {
                write!(f, "+")?;
            } else {
                write!(f, ".")?;
            }
            write!(f, "{}", ident)?;
        }

        Ok(())
    }
}

macro_rules! impl_from_unsigned_for_version {
    ($($t:ident),+) => {
        $(
            impl ::std::convert::From<($t, $t, $t)> for Version {
                fn from((major, minor, patch): ($t, $t, $t)) -> Self {
                    Version {
                        major: major as u64,
                        minor: minor as u64,
                        patch: patch as u64,
                        pre_release: Vec::new(),
                        build: Vec::new(),
                        valid: true,
                    }
                }
            }

            impl ::std::convert::From<($t, $t, $t, $t)> for Version {
                fn from((major, minor, patch, pre_release): ($t, $t, $t, $t)) -> Self {
                    Version {
                        major: major as u64,
                        minor: minor as u64,
                        patch: patch as u64,
                        pre_release: vec![Identifier::Numeric(pre_release as u64)],
                        build: Vec::new(),
                        valid: true,
                    }
                }
            }
        )+
    }
}

macro_rules! impl_from_signed_for_version {
    ($($t:ident),+) => {
        $(
            impl ::std::convert::From<($t, $t, $t)> for Version {
                fn from((major, minor, patch): ($t, $t, $t)) -> Self {
                    debug_assert!(major >= 0, "Version major must be non-negative, got {}", major);
                    debug_assert!(minor >= 0, "Version minor must be non-negative, got {}", minor);
                    debug_assert!(patch >= 0, "Version patch must be non-negative, got {}", patch);

                    Version {
                        major: major as u64,
                        minor: minor as u64,
                        patch: patch as u64,
                        pre_release: Vec::new(),
                        build: Vec::new(),
                        valid: true,
                    }
                }
            }

            impl ::std::convert::From<($t, $t, $t, $t)> for Version {
                fn from((major, minor, patch, pre_release): ($t, $t, $t, $t)) -> Self {
                    debug_assert!(major >= 0, "Version major must be non-negative, got {}", major);
                    debug_assert!(minor >= 0, "Version minor must be non-negative, got {}", minor);
                    debug_assert!(patch >= 0, "Version patch must be non-negative, got {}", patch);
                    debug_assert!(pre_release >= 0, "Version pre-release must be non-negative, got {}", pre_release);

                    Version {
                        major: major as u64,
                        minor: minor as u64,
                        patch: patch as u64,
                        pre_release: vec![Identifier::Numeric(pre_release as u64)],
                        build: Vec::new(),
                        valid: true,
                    }
                }
            }
        )+
    }
}

impl_from_unsigned_for_version!(u8, u16, u32, u64, usize);
impl_from_signed_for_version!(i8, i16, i32, i64, isize);

impl std::str::FromStr for Version {
    type Err = SemverError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::try_parse(s)
    }
}

impl cmp::PartialOrd for Version {
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl cmp::Ord for Version {
    /// Total order over valid versions: numeric components, then
    /// prerelease, then build. A version with a prerelease sorts before
    /// the same numbers without one, and likewise for build metadata, so
    /// this order (unlike range matching) is build-aware.
    ///
    /// Comparing an invalid version is a contract violation and panics.
    fn cmp(&self, other: &Version) -> cmp::Ordering {
        assert!(
            self.valid && other.valid,
            "attempted to compare an invalid version"
        );

        self.cmp_ignore_build(other)
            .then_with(|| compare_identifiers(&self.build, &other.build))
    }
}

enum Extras {
    Build(Vec<Identifier>),
    Release(Vec<Identifier>),
    ReleaseAndBuild((Vec<Identifier>, Vec<Identifier>)),
}

impl Extras {
    fn values(self) -> (Vec<Identifier>, Vec<Identifier>) {
        use Extras::*;
        match self {
            Release(ident) => (ident, Vec::new()),
            Build(ident) => (Vec::new(), ident),
            ReleaseAndBuild(ident) => ident,
        }
    }
}

/// Like [version], but any trailing input is a parse error.
fn version_full<'s>(input: &mut &'s str) -> PResult<Version, SemverParseError<&'s str>> {
    terminated(version, eof.context("end of input")).parse_next(input)
}

/// <valid semver> ::= <version core>
///                 | <version core> "-" <pre-release>
///                 | <version core> "+" <build>
///                 | <version core> "-" <pre-release> "+" <build>
///
/// A single leading `v` (or `V`), or failing that a single leading `=`, is
/// stripped first. Minor and patch may be omitted and default to zero.
fn version<'s>(input: &mut &'s str) -> PResult<Version, SemverParseError<&'s str>> {
    (
        opt(alt((literal("v"), literal("V"), literal("=")))),
        space0,
        version_core,
        extras,
    )
        .map(
            |(_, _, (major, minor, patch), (pre_release, build))| Version {
                major,
                minor,
                patch,
                pre_release,
                build,
                valid: true,
            },
        )
        .context("version")
        .parse_next(input)
}

fn extras<'s>(
    input: &mut &'s str,
) -> PResult<(Vec<Identifier>, Vec<Identifier>), SemverParseError<&'s str>> {
    Parser::map(
        opt(alt((
            Parser::map((pre_release, build), Extras::ReleaseAndBuild),
            Parser::map(pre_release, Extras::Release),
            Parser::map(build, Extras::Build),
        ))),
        |extras| match extras {
            Some(extras) => extras.values(),
            _ => Default::default(),
        },
    )
    .parse_next(input)
}

/// <version core> ::= <major> ( "." <minor> ( "." <patch> )? )?
fn version_core<'s>(input: &mut &'s str) -> PResult<(u64, u64, u64), SemverParseError<&'s str>> {
    (
        number,
        opt(preceded(literal("."), number)),
        opt(preceded(literal("."), number)),
    )
        .map(|(major, minor, patch)| (major, minor.unwrap_or(0), patch.unwrap_or(0)))
        .context("version core")
        .parse_next(input)
}

fn build<'s>(input: &mut &'s str) -> PResult<Vec<Identifier>, SemverParseError<&'s str>> {
    preceded(literal("+"), separated(1.., identifier, literal(".")))
        .context("build version")
        .parse_next(input)
}

fn pre_release<'s>(input: &mut &'s str) -> PResult<Vec<Identifier>, SemverParseError<&'s str>> {
    preceded(literal("-"), separated(1.., identifier, literal(".")))
        .context("pre_release version")
        .parse_next(input)
}

fn identifier<'s>(input: &mut &'s str) -> PResult<Identifier, SemverParseError<&'s str>> {
    Parser::map(
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-'),
        |s: &str| {
            str::parse::<u64>(s)
                .map(Identifier::Numeric)
                .unwrap_or_else(|_err| Identifier::AlphaNumeric(s.to_string()))
        },
    )
    .context("identifier")
    .parse_next(input)
}

pub(crate) fn number<'s>(input: &mut &'s str) -> PResult<u64, SemverParseError<&'s str>> {
    #[allow(suspicious_double_ref_op)]
    let copied = input.clone();

    Parser::try_map(Parser::take(digit1), |raw| {
        let value = str::parse(raw).map_err(|e| SemverParseError {
            input: copied,
            context: None,
            kind: Some(SemverErrorKind::ParseIntError(e)),
        })?;

        if value > MAX_COMPONENT_VALUE {
            return Err(SemverParseError {
                input: copied,
                context: None,
                kind: Some(SemverErrorKind::ComponentTooLarge(value)),
            });
        }

        Ok(value)
    })
    .context("number component")
    .parse_next(input)
    // A digit run carrying an out-of-range value fails the whole parse
    // instead of backtracking into an alternative interpretation.
    .map_err(|err: ErrMode<SemverParseError<&'s str>>| match err {
        ErrMode::Backtrack(e) if e.kind.is_some() => ErrMode::Cut(e),
        other => other,
    })
}


#[cfg(feature = "serde")]
#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn version_serde() {
        let v = Version::parse("1.2.3-abc.123+build");

        let serialized = serde_json::to_string(&v).unwrap();
        assert_eq!(serialized, r#""1.2.3-abc.123+build""#);

        let deserialized: Version = serde_json::from_str(&serialized).unwrap();
        assert_eq!(v, deserialized);
    }

    #[test]
    fn version_deserialization_rejects_malformed_input() {
        let result: Result<Version, _> = serde_json::from_str(r#""1.2.5.6""#);
        assert!(result.is_err());
    }
}
