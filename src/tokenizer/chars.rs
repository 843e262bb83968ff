//! Unicode character classification used by basic tokenization.
//!
//! Categories come from `unicode-general-category` (Unicode 15.0.0). Results
//! must stay bit-for-bit stable against the vocabulary a model was trained
//! with, so the table version is pinned in Cargo.toml.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Coarse class of a single code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Control,
    Whitespace,
    AsciiPunctuation,
    UnicodePunctuation,
    CjkIdeograph,
    Other,
}

/// Classify a code point.
///
/// Whitespace wins over control so that `\t`, `\n` and `\r` land in
/// [`CharClass::Whitespace`].
pub fn classify(c: char) -> CharClass {
    if is_whitespace(c) {
        CharClass::Whitespace
    } else if is_control(c) {
        CharClass::Control
    } else if is_ascii_punctuation(c) {
        CharClass::AsciiPunctuation
    } else if is_unicode_punctuation(c) {
        CharClass::UnicodePunctuation
    } else if is_cjk(c) {
        CharClass::CjkIdeograph
    } else {
        CharClass::Other
    }
}

/// Control, format, private-use, surrogate or unassigned, excluding
/// `\t`, `\n` and `\r` which count as whitespace.
pub fn is_control(c: char) -> bool {
    if matches!(c, '\t' | '\n' | '\r') {
        return false;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::Unassigned
    )
}

/// Space, `\t`, `\n`, `\r`, or any code point in category Zs.
pub fn is_whitespace(c: char) -> bool {
    if matches!(c, ' ' | '\t' | '\n' | '\r') {
        return true;
    }
    get_general_category(c) == GeneralCategory::SpaceSeparator
}

/// All non-alphanumeric printable ASCII counts as punctuation, including
/// symbols such as `^`, `$` and `` ` `` that Unicode files under S*.
pub fn is_punctuation(c: char) -> bool {
    is_ascii_punctuation(c) || is_unicode_punctuation(c)
}

fn is_ascii_punctuation(c: char) -> bool {
    matches!(c, '!'..='/' | ':'..='@' | '['..='`' | '{'..='~')
}

fn is_unicode_punctuation(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

/// CJK Unified Ideographs and their extension/compatibility blocks.
///
/// Hangul, Hiragana and Katakana are deliberately absent: those scripts are
/// written with spaces between words and are tokenized like any other letters.
pub fn is_cjk(c: char) -> bool {
    let cp = c as u32;
    (0x4E00..=0x9FFF).contains(&cp)
        || (0x3400..=0x4DBF).contains(&cp)
        || (0x20000..=0x2A6DF).contains(&cp)
        || (0x2A700..=0x2B73F).contains(&cp)
        || (0x2B740..=0x2B81F).contains(&cp)
        || (0x2B820..=0x2CEAF).contains(&cp)
        || (0xF900..=0xFAFF).contains(&cp)
        || (0x2F800..=0x2FA1F).contains(&cp)
}

/// Category Mn, the marks discarded by accent stripping.
pub fn is_nonspacing_mark(c: char) -> bool {
    get_general_category(c) == GeneralCategory::NonspacingMark
}
