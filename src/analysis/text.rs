//! Text normalization shared by the keyword heuristics
//!
//! All keyword tables are stored lower-case and without accents; input text is
//! folded the same way before matching so "Crítico", "CRITICO" and "crítico"
//! hit the same entry.

/// Lower-case the text and strip Spanish diacritics (ñ is kept).
pub fn fold(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            other => other,
        })
        .collect()
}

/// Number of distinct keywords from `keywords` present in already-folded `text`.
pub fn count_hits(folded: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| folded.contains(*k)).count()
}

/// Whether any keyword is present in already-folded `text`.
pub fn any_hit(folded: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| folded.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_strips_accents_and_case() {
        assert_eq!(fold("Crítico ÉXITO Pequeño"), "critico exito pequeño");
    }

    #[test]
    fn count_hits_counts_distinct_keywords_once() {
        let text = fold("Emergencia, emergencia y algo crítico");
        assert_eq!(count_hits(&text, &["emergencia", "critico", "grave"]), 2);
    }

    #[test]
    fn any_hit_on_empty_text_is_false() {
        assert!(!any_hit("", &["a"]));
    }
}
