//! Rule-based sentence boundary detection for English prose.
//!
//! A boundary is a run of terminators (`.`, `!`, `?`, `…`) plus any closing
//! quotes or brackets, followed by whitespace and then an uppercase letter, a
//! digit, or an opening quote/bracket (or the end of input). A lone period
//! after an abbreviation, an initial, or a dotted acronym is not a boundary.

use scriptforge_shared::SentenceRecord;

/// Tokens that end in a period without ending the sentence. Lowercase,
/// without the trailing period.
const ABBREVIATIONS: &[&str] = &[
    "al", "approx", "apr", "aug", "ave", "bros", "ca", "capt", "cf", "co", "col", "corp", "dec",
    "dept", "dr", "e.g", "esp", "est", "feb", "fig", "fr", "gen", "gov", "hon", "i.e", "inc",
    "jan", "jr", "jul", "jun", "lt", "ltd", "maj", "mar", "messrs", "mme", "mr", "mrs", "ms",
    "mt", "nov", "oct", "op", "pp", "prof", "pt", "rep", "rev", "sen", "sep", "sept", "sgt",
    "sr", "st", "supt", "vol", "vs",
];

/// Split prose into trimmed sentences, in order of appearance.
pub fn segment(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !is_terminator(chars[i].1) {
            i += 1;
            continue;
        }

        let run_start = chars[i].0;
        let mut j = i;
        while j < chars.len() && is_terminator(chars[j].1) {
            j += 1;
        }
        let run_len = j - i;
        while j < chars.len() && is_closer(chars[j].1) {
            j += 1;
        }

        let end = chars.get(j).map_or(text.len(), |&(idx, _)| idx);
        let lone_period = run_len == 1 && chars[i].1 == '.';

        if is_boundary(&chars[j..])
            && !(lone_period && ends_with_abbreviation(&text[start..run_start]))
        {
            push_sentence(&mut sentences, &text[start..end]);
            start = end;
        }

        i = j;
    }

    push_sentence(&mut sentences, &text[start..]);
    sentences
}

/// Segment `text` and wrap each sentence in a fresh [`SentenceRecord`].
pub fn sentences_from(text: &str) -> Vec<SentenceRecord> {
    segment(text).into_iter().map(SentenceRecord::new).collect()
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '…')
}

fn is_closer(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '”' | '’' | ')' | ']')
}

fn is_opener(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '“' | '‘' | '(' | '[')
}

/// Whether the text following a terminator run starts a new sentence.
fn is_boundary(rest: &[(usize, char)]) -> bool {
    let Some(&(_, first)) = rest.first() else {
        return true;
    };
    if !first.is_whitespace() {
        return false;
    }

    match rest.iter().map(|&(_, c)| c).find(|c| !c.is_whitespace()) {
        None => true,
        Some(next) => next.is_uppercase() || next.is_ascii_digit() || is_opener(next),
    }
}

/// Whether the token right before a period marks an abbreviation.
///
/// The token is whatever follows the last whitespace, so `"one ."` yields an
/// empty token and is never an abbreviation.
fn ends_with_abbreviation(before: &str) -> bool {
    let token = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(is_opener);

    if token.is_empty() {
        return false;
    }

    let lower = token.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }

    // Initials ("J") and dotted acronyms ("U.S", "Ph.D")
    let short_parts = token.split('.').all(|part| {
        !part.is_empty() && part.chars().count() <= 2 && part.chars().all(char::is_alphabetic)
    });
    short_parts && (token.chars().count() == 1 || token.contains('.'))
}
