use super::tables::is_stop_word;
use crate::article::{Article, KEYWORD_SEPARATOR};

pub const MAX_KEYWORDS: usize = 10;
const MIN_KEYWORD_CHARS: usize = 4;

/// Extract up to ten significant words from an article's title and summary,
/// in the order they first appear.
pub fn extract_keywords(article: &Article) -> Vec<String> {
    let text = format!("{} {}", article.title, article.summary).to_lowercase();

    let mut keywords: Vec<String> = Vec::new();
    for word in words(&text) {
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
        if word.chars().count() >= MIN_KEYWORD_CHARS
            && !is_stop_word(word)
            && !keywords.iter().any(|k| k == word)
        {
            keywords.push(word.to_string());
        }
    }
    keywords
}

/// Keywords in their stored form ("a, b, c")
pub fn join_keywords(keywords: &[String]) -> String {
    keywords.join(KEYWORD_SEPARATOR)
}

/// Maximal runs of word characters (letters, digits, underscore)
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ArticleDraft;
    use crate::scoring::tables::STOP_WORDS;
    use chrono::Utc;
    use std::collections::HashSet;

    fn article(title: &str, summary: &str) -> Article {
        Article::from_draft(
            ArticleDraft {
                title: title.to_string(),
                summary: summary.to_string(),
                body: "Corpo ignorado pela extração de palavras".to_string(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_first_occurrence_order_and_dedup() {
        let a = article(
            "Governo anuncia reforma tributária",
            "A reforma tributária do governo entra em vigor",
        );
        assert_eq!(
            extract_keywords(&a),
            vec!["governo", "anuncia", "reforma", "tributária", "entra", "vigor"]
        );
    }

    #[test]
    fn test_lowercases_and_splits_on_punctuation() {
        let a = article("TECNOLOGIA: Startups-brasileiras crescem!", "");
        assert_eq!(
            extract_keywords(&a),
            vec!["tecnologia", "startups", "brasileiras", "crescem"]
        );
    }

    #[test]
    fn test_drops_short_and_stop_words() {
        let a = article("Ele também quer mais casa", "isso gostaria muito");
        // "também", "quer", "mais", "isso", "gostaria", "muito" are stop-words; "ele" too short
        assert_eq!(extract_keywords(&a), vec!["casa"]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // "pão" is 3 characters (4 bytes) and must be dropped; "mãos" is 4 and kept
        let a = article("pão mãos", "");
        assert_eq!(extract_keywords(&a), vec!["mãos"]);
    }

    #[test]
    fn test_digits_and_underscores_are_word_characters() {
        let a = article("Censo 2022 revela dados_brutos", "");
        assert_eq!(
            extract_keywords(&a),
            vec!["censo", "2022", "revela", "dados_brutos"]
        );
    }

    #[test]
    fn test_caps_at_ten() {
        let title = (1..=15)
            .map(|i| format!("palavra{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        let keywords = extract_keywords(&article(&title, ""));
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "palavra1");
        assert_eq!(keywords[9], "palavra10");
    }

    #[test]
    fn test_title_and_summary_joined_with_space() {
        // Without the separator "final" and "inicio" would merge into one token
        let a = article("Jogo final", "inicio do campeonato");
        assert_eq!(extract_keywords(&a), vec!["jogo", "final", "inicio", "campeonato"]);
    }

    #[test]
    fn test_keyword_invariants_hold() {
        let a = article(
            "Urgente: governo e oposição negociam acordo sobre orçamento de 2025",
            "Negociação entre governo e oposição sobre orçamento pode durar semanas, \
             segundo fontes ligadas ao Congresso Nacional e ao Ministério da Economia",
        );
        let keywords = extract_keywords(&a);
        let unique: HashSet<_> = keywords.iter().collect();

        assert!(keywords.len() <= MAX_KEYWORDS);
        assert_eq!(unique.len(), keywords.len());
        for k in &keywords {
            assert!(k.chars().count() > 3);
            assert_eq!(*k, k.to_lowercase());
            assert!(!STOP_WORDS.contains(&k.as_str()));
        }
    }

    #[test]
    fn test_join_keywords() {
        let keywords = vec!["governo".to_string(), "reforma".to_string()];
        assert_eq!(join_keywords(&keywords), "governo, reforma");
        assert_eq!(join_keywords(&[]), "");
    }
}
