//! Word counting for the word cloud
//!
//! Tokens are `\w[\w']*`, so single letters count too. A trailing `'s` is
//! dropped, numbers and stop words are skipped, words are grouped
//! case-insensitively (shown in their most frequent spelling), and a plural
//! ending in `s` folds into its singular when both occur.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use super::stopwords::is_stopword;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\w[\w']*").expect("valid token pattern");
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordFrequency {
    pub text: String,
    pub count: usize,
    /// Count relative to the most frequent word, in `(0, 1]`
    pub weight: f32,
}

/// Spellings seen for one lowercase word, in first-seen order.
#[derive(Default)]
struct CaseCounts {
    spellings: Vec<(String, usize)>,
}

impl CaseCounts {
    fn add(&mut self, spelling: &str, count: usize) {
        match self.spellings.iter_mut().find(|(s, _)| s == spelling) {
            Some((_, c)) => *c += count,
            None => self.spellings.push((spelling.to_string(), count)),
        }
    }

    fn total(&self) -> usize {
        self.spellings.iter().map(|(_, c)| c).sum()
    }

    /// Most frequent spelling; the earliest seen wins ties.
    fn preferred(&self) -> &str {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.spellings {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(s, _)| s.as_str()).unwrap_or("")
    }
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    TOKEN.find_iter(text).filter_map(|m| {
        let word = m.as_str();
        let word = if word.to_lowercase().ends_with("'s") {
            &word[..word.len() - 2]
        } else {
            word
        };

        if word.is_empty() || word.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if is_stopword(&word.to_lowercase()) {
            return None;
        }
        Some(word)
    })
}

/// Count words in `text` and return at most `max_words` of them, most
/// frequent first (ties alphabetical).
pub fn word_frequencies(text: &str, max_words: usize) -> Vec<WordFrequency> {
    let mut counts: BTreeMap<String, CaseCounts> = BTreeMap::new();
    for word in tokens(text) {
        counts.entry(word.to_lowercase()).or_default().add(word, 1);
    }

    fold_plurals(&mut counts);

    let mut words: Vec<(String, String, usize)> = counts
        .iter()
        .map(|(lower, cases)| (lower.clone(), cases.preferred().to_string(), cases.total()))
        .collect();
    words.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    words.truncate(max_words);

    let top = words.first().map(|w| w.2).unwrap_or(0);
    if top == 0 {
        return Vec::new();
    }

    words
        .into_iter()
        .map(|(_, text, count)| WordFrequency {
            text,
            count,
            weight: count as f32 / top as f32,
        })
        .collect()
}

fn fold_plurals(counts: &mut BTreeMap<String, CaseCounts>) {
    let plurals: Vec<String> = counts
        .keys()
        .filter(|k| k.ends_with('s') && !k.ends_with("ss"))
        .filter(|k| counts.contains_key(&k[..k.len() - 1]))
        .cloned()
        .collect();

    for plural in plurals {
        if let Some(plural_cases) = counts.remove(&plural) {
            let singular = &plural[..plural.len() - 1];
            if let Some(singular_cases) = counts.get_mut(singular) {
                for (spelling, count) in plural_cases.spellings {
                    let trimmed = &spelling[..spelling.len() - 1];
                    singular_cases.add(trimmed, count);
                }
            }
        }
    }
}
