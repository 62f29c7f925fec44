// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyph transcoder — Unicode Bangla <-> Bijoy legacy glyph encoding.
//
// Substitution is a single left-to-right pass that always takes the longest
// table key matching at the current position, so a conjunct is never split
// into a shorter conjunct plus a trailing consonant and replaced output is
// never rescanned. The i-kar (ি) reordering is layered on top: after
// substitution going to Bijoy, before substitution coming back.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use lipi_core::error::{LipiError, Result};
use tracing::{debug, instrument, trace};

use crate::mapping::{BIJOY_TABLE, LEGACY_I_KAR, is_legacy_consonant};

/// One row of the glyph table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMapping {
    /// Unicode grapheme or conjunct cluster.
    pub unicode: &'static str,
    /// Legacy glyph sequence it renders as.
    pub legacy: &'static str,
}

/// Conversion direction, for callers that pick one at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Unicode -> Bijoy.
    ToLegacy,
    /// Bijoy -> Unicode.
    ToUnicode,
}

// -- Longest-first substitution index -----------------------------------------

/// Keys grouped by length in chars, longest group first.
struct SubstitutionIndex {
    by_length: Vec<(usize, HashMap<&'static str, &'static str>)>,
}

impl SubstitutionIndex {
    /// Build from `(from, to)` pairs given in declaration order. Later pairs
    /// overwrite earlier ones with the same `from` key.
    fn new(pairs: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        let mut sorted: Vec<(usize, &'static str, &'static str)> = pairs
            .into_iter()
            .map(|(from, to)| (from.chars().count(), from, to))
            .collect();
        // Stable: equal lengths keep declaration order.
        sorted.sort_by(|a, b| b.0.cmp(&a.0));

        let mut by_length: Vec<(usize, HashMap<&'static str, &'static str>)> = Vec::new();
        for (len, from, to) in sorted {
            match by_length.last_mut() {
                Some((group_len, group)) if *group_len == len => {
                    group.insert(from, to);
                }
                _ => {
                    let mut group = HashMap::new();
                    group.insert(from, to);
                    by_length.push((len, group));
                }
            }
        }
        Self { by_length }
    }

    fn longest_key(&self) -> usize {
        self.by_length.first().map_or(0, |(len, _)| *len)
    }

    fn key_count(&self) -> usize {
        self.by_length.iter().map(|(_, group)| group.len()).sum()
    }

    fn get(&self, key: &str) -> Option<&'static str> {
        let len = key.chars().count();
        self.by_length
            .iter()
            .find(|(group_len, _)| *group_len == len)
            .and_then(|(_, group)| group.get(key).copied())
    }

    /// Split `text` into table matches and unmatched chars, longest match
    /// first.
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(text.len());
        let mut rest = text;

        'scan: while let Some(ch) = rest.chars().next() {
            for (len, group) in &self.by_length {
                let Some(end) = prefix_end(rest, *len) else {
                    continue;
                };
                if let Some(replacement) = group.get(&rest[..end]) {
                    tokens.push(Token::Mapped(replacement));
                    rest = &rest[end..];
                    continue 'scan;
                }
            }
            tokens.push(Token::Verbatim(ch));
            rest = &rest[ch.len_utf8()..];
        }

        tokens
    }

    /// Replace every key occurrence, copying unmatched chars through verbatim.
    fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 2);
        for token in self.tokenize(text) {
            match token {
                Token::Mapped(replacement) => out.push_str(replacement),
                Token::Verbatim(ch) => out.push(ch),
            }
        }
        out
    }

    /// Like [`substitute`](Self::substitute), but each output char is tagged
    /// with whether it came from the table.
    fn substitute_tagged(&self, text: &str) -> Vec<(char, bool)> {
        let mut out = Vec::with_capacity(text.len());
        for token in self.tokenize(text) {
            match token {
                Token::Mapped(replacement) => out.extend(replacement.chars().map(|c| (c, true))),
                Token::Verbatim(ch) => out.push((ch, false)),
            }
        }
        out
    }
}

/// One step of a substitution scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// Replacement for a matched table key.
    Mapped(&'static str),
    /// Char with no table entry.
    Verbatim(char),
}

/// Byte offset just past the first `chars` chars of `s`, if it has that many.
fn prefix_end(s: &str, chars: usize) -> Option<usize> {
    s.char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(s.len()))
        .nth(chars)
}

/// Swap every non-overlapping adjacent pair `(a, b)` where `first(a)` and
/// `second(b)` hold, scanning left to right.
fn swap_pairs<T: Copy>(
    items: impl IntoIterator<Item = T>,
    first: impl Fn(T) -> bool,
    second: impl Fn(T) -> bool,
) -> Vec<T> {
    let mut items = items.into_iter().peekable();
    let mut out = Vec::with_capacity(items.size_hint().0);

    while let Some(current) = items.next() {
        match items.peek() {
            Some(&next) if first(current) && second(next) => {
                out.push(next);
                out.push(current);
                items.next();
            }
            _ => out.push(current),
        }
    }

    out
}

// -- Transcoder ----------------------------------------------------------------

/// Bidirectional Unicode/Bijoy transcoder.
///
/// Immutable after construction; share freely across threads. Most callers
/// want [`GlyphTranscoder::global`] or the free functions [`to_legacy`] and
/// [`to_unicode`].
///
/// The conversion is lossy: several Unicode sequences share a legacy glyph,
/// and the reverse direction resolves each shared glyph to the sequence
/// declared last in the table. `to_unicode(to_legacy(x))` is therefore not
/// always `x`.
pub struct GlyphTranscoder {
    entries: Vec<GlyphMapping>,
    forward: SubstitutionIndex,
    reverse: SubstitutionIndex,
}

impl GlyphTranscoder {
    /// Build a transcoder over the built-in Bijoy table.
    pub fn new() -> Result<Self> {
        Self::from_table(BIJOY_TABLE)
    }

    /// Build a transcoder over an arbitrary `(unicode, legacy)` table.
    ///
    /// Fails with `MappingData` when a Unicode key is empty or declared
    /// twice.
    #[instrument(skip_all, fields(entries = table.len()))]
    pub fn from_table(table: &'static [(&'static str, &'static str)]) -> Result<Self> {
        let mut seen = HashSet::with_capacity(table.len());
        let mut entries = Vec::with_capacity(table.len());

        for (position, &(unicode, legacy)) in table.iter().enumerate() {
            if unicode.is_empty() || legacy.is_empty() {
                return Err(LipiError::MappingData(format!(
                    "entry {position} has an empty sequence"
                )));
            }
            if !seen.insert(unicode) {
                return Err(LipiError::MappingData(format!(
                    "duplicate Unicode key {unicode:?} at entry {position}"
                )));
            }
            entries.push(GlyphMapping { unicode, legacy });
        }

        let forward = SubstitutionIndex::new(entries.iter().map(|e| (e.unicode, e.legacy)));
        // Last declared wins for shared legacy glyphs.
        let reverse = SubstitutionIndex::new(entries.iter().map(|e| (e.legacy, e.unicode)));

        debug!(
            forward_keys = forward.key_count(),
            reverse_keys = reverse.key_count(),
            longest_unicode_key = forward.longest_key(),
            longest_legacy_key = reverse.longest_key(),
            "Glyph tables built"
        );

        Ok(Self {
            entries,
            forward,
            reverse,
        })
    }

    /// Process-wide transcoder over the built-in table, built on first use.
    pub fn global() -> &'static GlyphTranscoder {
        static GLOBAL: OnceLock<GlyphTranscoder> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            Self::new().unwrap_or_else(|err| panic!("built-in Bijoy table is invalid: {err}"))
        })
    }

    /// Table rows in declaration order.
    pub fn entries(&self) -> &[GlyphMapping] {
        &self.entries
    }

    /// Legacy glyphs for an exact Unicode key.
    pub fn legacy_for(&self, unicode: &str) -> Option<&'static str> {
        self.forward.get(unicode)
    }

    /// Unicode sequence the reverse direction yields for an exact legacy key.
    pub fn unicode_for(&self, legacy: &str) -> Option<&'static str> {
        self.reverse.get(legacy)
    }

    /// Convert Unicode Bangla text to Bijoy glyphs. Characters outside the
    /// table pass through unchanged.
    #[instrument(level = "trace", skip_all, fields(len = text.len()))]
    pub fn to_legacy(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let glyphs = self.forward.substitute_tagged(text);
        // i-kar is drawn before its consonant in Bijoy. Only glyphs the table
        // produced move; text copied through keeps its order.
        let reordered: String = swap_pairs(
            glyphs,
            |(c, mapped)| mapped && is_legacy_consonant(c),
            |(c, mapped)| mapped && c == LEGACY_I_KAR,
        )
        .into_iter()
        .map(|(c, _)| c)
        .collect();
        trace!(out_len = reordered.len(), "Converted to legacy");
        reordered
    }

    /// Convert Bijoy glyph text back to Unicode Bangla. Characters outside
    /// the table pass through unchanged.
    #[instrument(level = "trace", skip_all, fields(len = text.len()))]
    pub fn to_unicode(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let reordered: String =
            swap_pairs(text.chars(), |c| c == LEGACY_I_KAR, is_legacy_consonant)
                .into_iter()
                .collect();
        let converted = self.reverse.substitute(&reordered);
        trace!(out_len = converted.len(), "Converted to unicode");
        converted
    }

    /// Convert in the given direction.
    pub fn convert(&self, text: &str, direction: Direction) -> String {
        match direction {
            Direction::ToLegacy => self.to_legacy(text),
            Direction::ToUnicode => self.to_unicode(text),
        }
    }
}

/// Unicode -> Bijoy using the shared built-in table.
pub fn to_legacy(text: &str) -> String {
    GlyphTranscoder::global().to_legacy(text)
}

/// Bijoy -> Unicode using the shared built-in table.
pub fn to_unicode(text: &str) -> String {
    GlyphTranscoder::global().to_unicode(text)
}
