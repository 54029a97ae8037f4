//! Hungarian collation used for every name-based tie-break.
//!
//! Comparison is case-insensitive and ignores the acute/long accent inside a
//! letter pair (`a`/`á`, `ö`/`ő`, ...) while keeping `ö` after `o` and the
//! digraphs (`cs`, `gy`, `sz`, ...) as letters of their own.

use std::cmp::Ordering;

/// Primary alphabet order. Each entry lists the spellings sharing one weight.
const ALPHABET: &[&[&str]] = &[
    &["a", "á"],
    &["b"],
    &["c"],
    &["cs"],
    &["d"],
    &["dz"],
    &["dzs"],
    &["e", "é"],
    &["f"],
    &["g"],
    &["gy"],
    &["h"],
    &["i", "í"],
    &["j"],
    &["k"],
    &["l"],
    &["ly"],
    &["m"],
    &["n"],
    &["ny"],
    &["o", "ó"],
    &["ö", "ő"],
    &["p"],
    &["q"],
    &["r"],
    &["s"],
    &["sz"],
    &["t"],
    &["ty"],
    &["u", "ú"],
    &["ü", "ű"],
    &["v"],
    &["w"],
    &["x"],
    &["y"],
    &["z"],
    &["zs"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Weight {
    Punctuation(char),
    Digit(char),
    Letter(usize),
    Other(char),
}

fn letter_weight(spelling: &str) -> Option<usize> {
    ALPHABET
        .iter()
        .position(|spellings| spellings.contains(&spelling))
}

fn collation_key(value: &str) -> Vec<Weight> {
    let chars: Vec<char> = value.to_lowercase().chars().collect();
    let mut key = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let mut matched = false;

        for len in (1..=3).rev() {
            if i + len > chars.len() {
                continue;
            }

            let spelling: String = chars[i..i + len].iter().collect();
            if let Some(weight) = letter_weight(&spelling) {
                key.push(Weight::Letter(weight));
                i += len;
                matched = true;
                break;
            }
        }

        if matched {
            continue;
        }

        let c = chars[i];
        key.push(if c.is_ascii_digit() {
            Weight::Digit(c)
        } else if c.is_alphabetic() {
            Weight::Other(c)
        } else {
            Weight::Punctuation(c)
        });
        i += 1;
    }

    key
}

/// Compare two names the way the dashboard sorts them (`hu-HU`, base sensitivity).
pub fn compare(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}
