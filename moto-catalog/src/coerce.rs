//! Value coercion: turn a raw text cell into a typed [`SpecValue`].
//!
//! The chain is ordered and the order is part of the contract:
//!
//! 1. empty text → `Null`
//! 2. key matches a numeric hint and the text contains a number → `Number`
//! 3. text is a boolean word → `Bool`
//! 4. short, purely numeric-looking text → `Number`
//! 5. otherwise the trimmed text
//!
//! The vocabularies live in [`CoercionRules`] so they can be extended from
//! settings without touching the parsing code.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::{fold_diacritics, normalize_key};
use crate::types::SpecValue;

/// Texts at most this many characters long may be coerced to a number even
/// when their key carries no numeric hint.
pub const SHORT_NUMERIC_MAX_CHARS: usize = 14;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d+(?:\.\d+)?").expect("static pattern"));

/// A plain decimal (`689`, `12,5`) or a thousands-grouped number whose group
/// and decimal separators differ (`1.234,5`, `1,234,567`). Dotted dates and
/// version strings do not match.
static NUMERIC_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[-+]?(?:",
        r"\d{1,3}(?:\.\d{3})+(?:,\d+)?",
        r"|\d{1,3}(?:,\d{3})+(?:\.\d+)?",
        r"|\d+(?:[.,]\d+)?",
        r")$",
    ))
    .expect("static pattern")
});

static DEFAULT_RULES: LazyLock<CoercionRules> = LazyLock::new(CoercionRules::default);

/// How a numeric hint term is compared against the `_`-separated tokens of a
/// normalized key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintMatch {
    /// The token must equal the term (unit abbreviations like `ch`, `kg`).
    Token,
    /// The token must start with the term (`puissance`, `cylindree`).
    Prefix,
}

/// A single numeric-hint vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericHint {
    pub term: String,
    pub rule: HintMatch,
}

impl NumericHint {
    pub fn new(term: impl Into<String>, rule: HintMatch) -> Self {
        Self {
            term: term.into(),
            rule,
        }
    }

    /// Whether the term occurs as a run of whole tokens in `tokens`. Under
    /// [`HintMatch::Prefix`] the last token of the run may be longer.
    fn matches(&self, tokens: &[&str]) -> bool {
        let terms: Vec<&str> = self.term.split('_').collect();
        let Some((last, head)) = terms.split_last() else {
            return false;
        };
        tokens.windows(terms.len()).any(|window| {
            let (tail, lead) = (window[head.len()], &window[..head.len()]);
            lead == head
                && match self.rule {
                    HintMatch::Token => tail == *last,
                    HintMatch::Prefix => tail.starts_with(*last),
                }
        })
    }
}

/// Built-in numeric hints: price, power, torque, displacement, weight,
/// dimensions, capacity, rotational speed and their units.
const DEFAULT_NUMERIC_HINTS: &[(&str, HintMatch)] = &[
    ("prix", HintMatch::Prefix),
    ("price", HintMatch::Prefix),
    ("tarif", HintMatch::Prefix),
    ("tnd", HintMatch::Token),
    ("puissance", HintMatch::Prefix),
    ("power", HintMatch::Prefix),
    ("ch", HintMatch::Token),
    ("cv", HintMatch::Token),
    ("hp", HintMatch::Token),
    ("kw", HintMatch::Token),
    ("couple", HintMatch::Prefix),
    ("torque", HintMatch::Prefix),
    ("nm", HintMatch::Token),
    ("cylindree", HintMatch::Prefix),
    ("displacement", HintMatch::Prefix),
    ("cc", HintMatch::Token),
    ("cm3", HintMatch::Token),
    ("alesage", HintMatch::Prefix),
    ("poids", HintMatch::Prefix),
    ("weight", HintMatch::Prefix),
    ("masse", HintMatch::Prefix),
    ("kg", HintMatch::Token),
    ("longueur", HintMatch::Prefix),
    ("largeur", HintMatch::Prefix),
    ("hauteur", HintMatch::Prefix),
    ("length", HintMatch::Prefix),
    ("width", HintMatch::Prefix),
    ("height", HintMatch::Prefix),
    ("empattement", HintMatch::Prefix),
    ("wheelbase", HintMatch::Prefix),
    ("garde", HintMatch::Prefix),
    ("dimension", HintMatch::Prefix),
    ("mm", HintMatch::Token),
    ("reservoir", HintMatch::Prefix),
    ("capacite", HintMatch::Prefix),
    ("capacity", HintMatch::Prefix),
    ("contenance", HintMatch::Prefix),
    ("l", HintMatch::Token),
    ("regime", HintMatch::Prefix),
    ("rpm", HintMatch::Token),
    ("tr", HintMatch::Token),
    ("vitesse", HintMatch::Prefix),
    ("speed", HintMatch::Prefix),
    ("autonomie", HintMatch::Prefix),
    ("consommation", HintMatch::Prefix),
    ("km", HintMatch::Token),
];

const DEFAULT_TRUE_WORDS: &[&str] = &["yes", "true", "1", "oui", "vrai"];
const DEFAULT_FALSE_WORDS: &[&str] = &["no", "false", "0", "non", "faux"];

/// The vocabulary tables driving [`CoercionRules::coerce_text`].
#[derive(Debug, Clone)]
pub struct CoercionRules {
    pub numeric_hints: Vec<NumericHint>,
    pub true_words: Vec<String>,
    pub false_words: Vec<String>,
}

impl Default for CoercionRules {
    fn default() -> Self {
        Self {
            numeric_hints: DEFAULT_NUMERIC_HINTS
                .iter()
                .map(|(term, rule)| NumericHint::new(*term, *rule))
                .collect(),
            true_words: DEFAULT_TRUE_WORDS.iter().map(|w| w.to_string()).collect(),
            false_words: DEFAULT_FALSE_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl CoercionRules {
    /// Add vocabulary entries on top of the current tables.
    ///
    /// Extra hints are normalized and match as token prefixes; words are
    /// compared case- and accent-insensitively.
    pub fn extend(
        &mut self,
        numeric_hints: &[String],
        true_words: &[String],
        false_words: &[String],
    ) {
        for hint in numeric_hints {
            let term = normalize_key(hint);
            if !term.is_empty() && !self.numeric_hints.iter().any(|h| h.term == term) {
                self.numeric_hints.push(NumericHint::new(term, HintMatch::Prefix));
            }
        }
        push_words(&mut self.true_words, true_words);
        push_words(&mut self.false_words, false_words);
    }

    /// Whether a key carries a numeric hint.
    pub fn is_numeric_key(&self, key: &str) -> bool {
        let key = normalize_key(key);
        let tokens: Vec<&str> = key.split('_').collect();
        self.numeric_hints.iter().any(|h| h.matches(&tokens))
    }

    /// Parse a boolean word from the configured vocabulary.
    pub fn parse_bool(&self, text: &str) -> Option<bool> {
        let word = fold_diacritics(text.trim());
        if self.true_words.iter().any(|w| *w == word) {
            Some(true)
        } else if self.false_words.iter().any(|w| *w == word) {
            Some(false)
        } else {
            None
        }
    }

    /// Coerce a text cell under `key`. Never fails: unparseable hinted-numeric
    /// text falls through to the later rules.
    pub fn coerce_text(&self, key: &str, raw: &str) -> SpecValue {
        let text = raw.trim();
        if text.is_empty() {
            return SpecValue::Null;
        }

        if self.is_numeric_key(key) {
            if let Some(n) = parse_number(text) {
                return SpecValue::Number(n);
            }
        }

        if let Some(b) = self.parse_bool(text) {
            return SpecValue::Bool(b);
        }

        if text.chars().count() <= SHORT_NUMERIC_MAX_CHARS && is_numeric_shaped(text) {
            if let Some(n) = parse_number(text) {
                return SpecValue::Number(n);
            }
        }

        SpecValue::Text(text.to_string())
    }
}

fn push_words(target: &mut Vec<String>, words: &[String]) {
    for word in words {
        let word = fold_diacritics(word.trim());
        if !word.is_empty() && !target.contains(&word) {
            target.push(word);
        }
    }
}

/// Coerce a text cell with the built-in vocabulary.
///
/// ```
/// use moto_catalog::SpecValue;
/// use moto_catalog::coerce::coerce;
///
/// assert_eq!(coerce("prix", "34 990"), SpecValue::Number(34990.0));
/// assert_eq!(coerce("abs", "Oui"), SpecValue::Bool(true));
/// assert_eq!(coerce("modele", "MT-07"), SpecValue::Text("MT-07".into()));
/// assert_eq!(coerce("prix", ""), SpecValue::Null);
/// ```
pub fn coerce(key: &str, raw: &str) -> SpecValue {
    DEFAULT_RULES.coerce_text(key, raw)
}

/// Extract the first signed decimal number from free text.
///
/// Whitespace and apostrophes are dropped as thousands separators. When both
/// `.` and `,` appear, the later one is the decimal separator; a lone `,` is a
/// decimal separator unless it repeats.
pub fn parse_number(text: &str) -> Option<f64> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\'' && *c != '\u{2019}')
        .collect();

    let dots = compact.matches('.').count();
    let commas = compact.matches(',').count();
    let cleaned = match (compact.rfind('.'), compact.rfind(',')) {
        (Some(d), Some(c)) if d > c => compact.replace(',', ""),
        (Some(_), Some(_)) => compact.replace('.', "").replace(',', "."),
        (None, Some(_)) if commas > 1 => compact.replace(',', ""),
        (None, Some(_)) => compact.replace(',', "."),
        (Some(_), None) if dots > 1 => compact.replace('.', ""),
        _ => compact,
    };

    FIRST_NUMBER
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Whether text, whitespace removed, is nothing but one signed number.
pub fn is_numeric_shaped(text: &str) -> bool {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    NUMERIC_SHAPE.is_match(&compact)
}
