//! Section code grammar
//!
//! Workbook cells embed the section code inside the course title, e.g.
//! `"Databases BSE-2B"`. A code is, between word boundaries:
//!
//! ```text
//! prefix   one fixed letter            B
//! program  1..=4 uppercase letters     CS, SE, SCS, ...
//! space    optional single whitespace
//! hyphen   optional '-'
//! number   1..=2 digits                3, 12
//! group    optional uppercase letter   A
//! ```
//!
//! The grammar is a plain value so callers can widen it on purpose
//! (lowercase codes, 3-digit numbers) instead of editing a pattern string.

use regex::Regex;

use crate::entry::compact_section;

/// Word boundary over ASCII word characters only
const BOUNDARY: &str = r"(?-u:\b)";

/// Tunable description of a section code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGrammar {
    pub prefix: char,
    pub min_letters: usize,
    pub max_letters: usize,
    pub allow_space: bool,
    pub allow_hyphen: bool,
    pub min_digits: usize,
    pub max_digits: usize,
    pub allow_group_letter: bool,
    pub case_insensitive: bool,
}

impl Default for SectionGrammar {
    fn default() -> Self {
        Self {
            prefix: 'B',
            min_letters: 1,
            max_letters: 4,
            allow_space: true,
            allow_hyphen: true,
            min_digits: 1,
            max_digits: 2,
            allow_group_letter: true,
            case_insensitive: false,
        }
    }
}

impl SectionGrammar {
    /// Regex source for this grammar
    pub fn pattern(&self) -> String {
        let mut pattern = String::from(BOUNDARY);
        if self.case_insensitive {
            pattern.push_str("(?i:");
        }
        pattern.push_str(&regex::escape(&self.prefix.to_string()));
        pattern.push_str(&format!("[A-Z]{{{},{}}}", self.min_letters, self.max_letters));
        if self.allow_space {
            pattern.push_str(r"\s?");
        }
        if self.allow_hyphen {
            pattern.push_str("-?");
        }
        pattern.push_str(&format!("[0-9]{{{},{}}}", self.min_digits, self.max_digits));
        if self.allow_group_letter {
            pattern.push_str("[A-Z]?");
        }
        if self.case_insensitive {
            pattern.push(')');
        }
        pattern.push_str(BOUNDARY);
        pattern
    }

    /// Compile into a matcher
    pub fn compile(&self) -> Result<SectionMatcher, regex::Error> {
        Ok(SectionMatcher {
            re: Regex::new(&self.pattern())?,
        })
    }
}

/// A course line split around its section code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMatch {
    /// Text before the code, trimmed
    pub course: String,
    /// The code with spaces removed
    pub section: String,
}

/// Compiled form of a [`SectionGrammar`]
#[derive(Debug, Clone)]
pub struct SectionMatcher {
    re: Regex,
}

impl SectionMatcher {
    /// Find the first section code in `line`.
    ///
    /// Returns `None` when the line holds no code. The course part may be
    /// empty when the code starts the line.
    pub fn split(&self, line: &str) -> Option<SectionMatch> {
        let m = self.re.find(line)?;
        Some(SectionMatch {
            course: line[..m.start()].trim().to_string(),
            section: compact_section(m.as_str()),
        })
    }
}

impl Default for SectionMatcher {
    fn default() -> Self {
        SectionGrammar::default()
            .compile()
            .expect("default section grammar is a valid regex")
    }
}
