//! Read-only similarity tables.
//!
//! Two mappings drive the equivalence oracle: glyph -> set of visually
//! similar glyphs, and reference word -> set of glyphs it is written with.
//! Both are built once before any alignment call and only read afterwards;
//! a missing key means an empty set, never an error.
//!
//! The builders accept parsed rows so file handling stays with the caller.
//! A tab-separated text form is supported for both tables: one row per
//! line, `#` comments and blank lines skipped.

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::error::{AlignError, Result};

/// Glyph -> set of visually similar glyphs.
#[derive(Debug, Clone, Default)]
pub struct GlyphSimilarity {
    map: FxHashMap<char, FxHashSet<char>>,
}

impl GlyphSimilarity {
    /// Builds the table from (glyph, listed similars) rows.
    ///
    /// Similarity propagates symmetrically: the input glyph's entry absorbs
    /// itself plus the listed glyphs, and every listed glyph's entry absorbs
    /// the input glyph plus the full list. Repeated rows union.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (char, Vec<char>)>,
    {
        let mut map: FxHashMap<char, FxHashSet<char>> = FxHashMap::default();
        for (glyph, similars) in rows {
            let group: Vec<char> = std::iter::once(glyph)
                .chain(similars.iter().copied())
                .collect();
            map.entry(glyph).or_default().extend(group.iter().copied());
            for &s in &similars {
                map.entry(s).or_default().extend(group.iter().copied());
            }
        }
        Self { map }
    }

    /// Similarity set for a glyph, if the glyph is known.
    pub fn similar(&self, glyph: char) -> Option<&FxHashSet<char>> {
        self.map.get(&glyph)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Reference word -> set of glyphs the word is written with.
#[derive(Debug, Clone, Default)]
pub struct WordGlyphs {
    map: FxHashMap<SmolStr, FxHashSet<char>>,
}

impl WordGlyphs {
    /// Builds the table from (word, glyph) rows; repeated words accumulate.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (SmolStr, char)>,
    {
        let mut map: FxHashMap<SmolStr, FxHashSet<char>> = FxHashMap::default();
        for (word, glyph) in rows {
            map.entry(word).or_default().insert(glyph);
        }
        Self { map }
    }

    /// Associated glyph set for a word, if the word is known.
    pub fn glyphs(&self, word: &str) -> Option<&FxHashSet<char>> {
        self.map.get(word)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Parses the tab-separated glyph-similarity form: `glyph<TAB>similars`,
/// where `similars` is a run of glyph characters.
pub fn parse_glyph_table(content: &str) -> Result<GlyphSimilarity> {
    let mut rows = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (head, tail) = line.split_once('\t').ok_or_else(|| AlignError::DictParse {
            line: idx + 1,
            msg: "expected two tab-separated fields".into(),
        })?;
        let glyph = head
            .chars()
            .exactly_one()
            .map_err(|_| AlignError::DictParse {
                line: idx + 1,
                msg: format!("glyph field must be a single character, got {head:?}"),
            })?;
        rows.push((glyph, tail.chars().collect()));
    }
    Ok(GlyphSimilarity::from_rows(rows))
}

/// Parses the tab-separated word form: `word<TAB>glyph`, one glyph per row.
pub fn parse_word_table(content: &str) -> Result<WordGlyphs> {
    let mut rows = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (word, tail) = line.split_once('\t').ok_or_else(|| AlignError::DictParse {
            line: idx + 1,
            msg: "expected two tab-separated fields".into(),
        })?;
        let glyph = tail
            .chars()
            .exactly_one()
            .map_err(|_| AlignError::DictParse {
                line: idx + 1,
                msg: format!("glyph field must be a single character, got {tail:?}"),
            })?;
        rows.push((SmolStr::new(word), glyph));
    }
    Ok(WordGlyphs::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_propagates_to_listed_glyphs() {
        let table = GlyphSimilarity::from_rows([('天', vec!['夫', '失'])]);
        let entry = table.similar('夫').unwrap();
        assert!(entry.contains(&'天'));
        assert!(entry.contains(&'失'));
        assert!(table.similar('天').unwrap().contains(&'天'));
    }

    #[test]
    fn repeated_rows_union() {
        let table = GlyphSimilarity::from_rows([('天', vec!['夫']), ('天', vec!['失'])]);
        let entry = table.similar('天').unwrap();
        assert!(entry.contains(&'夫') && entry.contains(&'失'));
    }

    #[test]
    fn word_rows_accumulate() {
        let table = WordGlyphs::from_rows([
            (SmolStr::new("trời"), '天'),
            (SmolStr::new("trời"), '乾'),
        ]);
        assert_eq!(table.glyphs("trời").unwrap().len(), 2);
        assert!(table.glyphs("đất").is_none());
    }

    #[test]
    fn glyph_table_rejects_multichar_key() {
        let err = parse_glyph_table("ab\tcd");
        assert!(matches!(err, Err(AlignError::DictParse { line: 1, .. })));
    }
}
