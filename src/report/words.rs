//! Word frequencies for the word cloud report.
//!
//! Tokens are runs of word characters (apostrophes allowed after the first
//! character). A trailing `'s` is dropped, stopwords and pure numbers are
//! removed, case variants are folded into their most frequent spelling and
//! plurals ending in a single `s` merge into their singular when both occur.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Chart, DataPoint, ReportKind};
use crate::chatlog::ChatLog;
use crate::config::ReportConfig;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w[\w']+").expect("valid token pattern"));

/// Common English words excluded from the word cloud, plus the words of
/// WhatsApp's `<Media omitted>` placeholder.
pub static STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm",
    "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k",
    "let's", "like", "me", "media", "more", "most", "mustn't", "my", "myself", "no", "nor",
    "not", "of", "off", "omitted", "on", "once", "only", "or", "other", "otherwise", "ought",
    "our", "ours",
    "ourselves", "out", "over", "own", "r", "same", "shall", "shan't", "she", "she'd",
    "she'll", "she's", "should", "shouldn't", "since", "so", "some", "such", "than", "that",
    "that's", "the", "their", "theirs", "them", "themselves", "then", "there", "there's",
    "therefore", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't",
    "would", "wouldn't", "www", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

/// A word and how often it occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFrequency {
    /// Most frequent spelling of the word
    pub word: String,
    /// Occurrences across all messages
    pub count: usize,
    /// `count` relative to the most frequent word, in `(0, 1]`
    pub weight: f64,
}

fn stopword_set(config: &ReportConfig) -> HashSet<String> {
    STOPWORDS
        .iter()
        .map(|w| (*w).to_string())
        .chain(config.extra_stopwords.iter().map(|w| w.to_lowercase()))
        .collect()
}

fn is_number(word: &str) -> bool {
    word.chars().all(char::is_numeric)
}

/// Extracts the counted tokens of one text.
fn tokens<'a>(
    text: &'a str,
    stopwords: &'a HashSet<String>,
    include_numbers: bool,
) -> impl Iterator<Item = &'a str> + 'a {
    TOKEN
        .find_iter(text)
        .map(|m| {
            let word = m.as_str();
            let lower_tail = word.get(word.len().saturating_sub(2)..);
            if lower_tail.is_some_and(|tail| tail.eq_ignore_ascii_case("'s")) {
                &word[..word.len() - 2]
            } else {
                word
            }
        })
        .filter(|word| !word.is_empty())
        .filter(move |word| include_numbers || !is_number(word))
        .filter(move |word| !stopwords.contains(&word.to_lowercase()))
}

/// Counts words over all message contents, most frequent first.
///
/// Attachment placeholder rows are skipped. At most `config.max_words`
/// entries are returned; ties are ordered alphabetically.
pub fn word_frequencies(log: &ChatLog, config: &ReportConfig) -> Vec<WordFrequency> {
    let stopwords = stopword_set(config);

    // lowercase form -> spelling -> count
    let mut variants: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for msg in log.iter().filter(|m| !m.is_media_placeholder()) {
        for word in tokens(&msg.content, &stopwords, config.include_numbers) {
            *variants
                .entry(word.to_lowercase())
                .or_default()
                .entry(word.to_string())
                .or_insert(0) += 1;
        }
    }

    // Merge "cats" into "cat" when both occur
    let plurals: Vec<String> = variants
        .keys()
        .filter(|key| key.ends_with('s') && !key.ends_with("ss"))
        .filter(|key| variants.contains_key(&key[..key.len() - 1]))
        .cloned()
        .collect();
    for plural in plurals {
        let Some(spellings) = variants.remove(&plural) else {
            continue;
        };
        let singular = variants.entry(plural[..plural.len() - 1].to_string()).or_default();
        for (spelling, count) in spellings {
            let mut chars = spelling.chars();
            chars.next_back();
            *singular.entry(chars.as_str().to_string()).or_insert(0) += count;
        }
    }

    let mut counted: Vec<(String, usize)> = variants
        .into_values()
        .filter_map(|spellings| {
            let total = spellings.values().sum();
            // First of the most frequent spellings wins
            let (best, _) = spellings
                .into_iter()
                .fold((String::new(), 0), |acc, (spelling, n)| {
                    if n > acc.1 { (spelling, n) } else { acc }
                });
            (!best.is_empty()).then_some((best, total))
        })
        .collect();

    counted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counted.truncate(config.max_words);

    let max = counted.first().map_or(1, |(_, n)| *n).max(1) as f64;
    counted
        .into_iter()
        .map(|(word, count)| WordFrequency {
            weight: count as f64 / max,
            word,
            count,
        })
        .collect()
}

/// Word frequencies as a chart, most frequent first.
pub fn word_cloud(log: &ChatLog, config: &ReportConfig) -> Chart {
    let points = word_frequencies(log, config)
        .into_iter()
        .map(|wf| DataPoint::count(wf.word, wf.count))
        .collect();

    Chart::new(ReportKind::WordCloud, "Word cloud", "word", "occurrences").with_points(points)
}
