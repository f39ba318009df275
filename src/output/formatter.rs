use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::article::Article;
use crate::scoring::ScoreResult;
use crate::store::Stats;

const FEATURED_MARK: &str = "★";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals.
/// If incomplete is true, appends asterisk to indicate a fallback trend score
pub fn format_score(score: f64, incomplete: bool) -> String {
    if incomplete {
        format!("{:.2}*", score)
    } else {
        format!("{:.2}", score)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format articles as a table with columns: Id, Score, Featured, Title, Age
/// No headers. Drafts are marked with "(draft)".
pub fn format_article_table(articles: &[Article], now: DateTime<Utc>, use_colors: bool) -> String {
    if articles.is_empty() {
        return "No articles found.".to_string();
    }

    let term_width = get_terminal_width();

    // Id column: 5 chars ("#9999"), score: 5 chars ("10.00"), mark: 1 char
    let id_width = 5;
    let score_width = 5;
    let separator = "  ";

    articles
        .iter()
        .map(|article| {
            let id_str = format!("{:>width$}", format!("#{}", article.id), width = id_width);
            let score_str = format!(
                "{:>width$}",
                format_score(article.relevance_score, false),
                width = score_width
            );
            let mark = if article.featured { FEATURED_MARK } else { " " };
            let mut age = article.time_ago_at(now);
            if !article.published {
                age.push_str(" (draft)");
            }

            let fixed_width =
                id_width + score_width + 1 + separator.len() * 3 + age.chars().count();
            let title = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_title(&article.title, width - fixed_width)
                } else {
                    // Very narrow terminal, show truncated
                    truncate_title(&article.title, 20)
                }
            } else {
                // No terminal (pipe), don't truncate
                article.title.clone()
            };

            if use_colors {
                format!(
                    "{}{}{}{}{}{}{}{}",
                    id_str.dimmed(),
                    separator,
                    score_str.bold(),
                    mark.yellow(),
                    separator,
                    title,
                    separator,
                    age.dimmed()
                )
            } else {
                format!(
                    "{}{}{}{}{}{}{}{}",
                    id_str, separator, score_str, mark, separator, title, separator, age
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single article with all fields, for `show`
pub fn format_article_detail(article: &Article, now: DateTime<Utc>, use_colors: bool) -> String {
    let status = if article.published { "published" } else { "draft" };
    let featured = if article.featured { "yes" } else { "no" };
    let keywords = article.keywords();
    let keywords = if keywords.is_empty() {
        "-".to_string()
    } else {
        keywords.join(", ")
    };
    let published_at = article.published_at.format("%Y-%m-%d %H:%M UTC");

    let header = if use_colors {
        format!("#{} {}", article.id, article.title.bold())
    } else {
        format!("#{} {}", article.id, article.title)
    };

    format!(
        "{}\n  Published: {} ({}, {})\n  Score: {}  Featured: {}\n  Keywords: {}\n\n{}\n\n{}",
        header,
        published_at,
        article.time_ago_at(now),
        status,
        format_score(article.relevance_score, false),
        featured,
        keywords,
        article.summary,
        article.body
    )
}

/// Format the per-factor breakdown of a score
pub fn format_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    let header = format!("Score: {}", format_score(result.score, result.incomplete));
    breakdown_lines(header, result, use_colors)
}

/// Format a breakdown computed now for an article whose stored score may be
/// stale, showing both values
pub fn format_recomputed_breakdown(stored: f64, result: &ScoreResult, use_colors: bool) -> String {
    let header = format!(
        "Recomputed score: {} (stored: {})",
        format_score(result.score, result.incomplete),
        format_score(stored, false)
    );
    breakdown_lines(header, result, use_colors)
}

fn breakdown_lines(header: String, result: &ScoreResult, use_colors: bool) -> String {
    let mut lines = vec![header];

    for factor in &result.breakdown.factors {
        let line = format!(
            "  {:<8} {:>5.2} x {:.2} = {:>5.2}  {}",
            factor.label,
            factor.raw,
            factor.weight,
            factor.weighted(),
            factor.description
        );
        if use_colors {
            lines.push(line.dimmed().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Format articles as tab-separated values for scripting
/// Columns: id, score, featured, published, title (no headers, no colors)
pub fn format_tsv(articles: &[Article]) -> String {
    articles
        .iter()
        .map(|article| {
            format!(
                "{}\t{:.2}\t{}\t{}\t{}",
                article.id,
                article.relevance_score,
                article.featured,
                article.published,
                article.title.replace('\t', " ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format dashboard counts
pub fn format_stats(stats: &Stats) -> String {
    format!(
        "Total: {}  Published: {}  Drafts: {}  Featured: {}",
        stats.total, stats.published, stats.drafts, stats.featured
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ArticleDraft;
    use crate::scoring::{FactorContribution, ScoreBreakdown};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 6, 14, 0, 0).unwrap()
    }

    fn sample_article(id: u64, title: &str, score: f64) -> Article {
        let mut article = Article::from_draft(
            ArticleDraft {
                title: title.to_string(),
                summary: "Resumo".to_string(),
                body: "Corpo".to_string(),
            },
            now() - Duration::hours(2),
        );
        article.id = id;
        article.relevance_score = score;
        article.featured = score >= 7.0;
        article
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(7.1, false), "7.10");
        assert_eq!(format_score(0.0, false), "0.00");
        assert_eq!(format_score(10.0, true), "10.00*");
    }

    #[test]
    fn test_truncate_title_unicode() {
        assert_eq!(truncate_title("Eleições", 20), "Eleições");
        assert_eq!(truncate_title("Eleições municipais", 8), "Elei...");
        assert_eq!(truncate_title("Eleições", 3), "Ele");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_article_table(&[], now(), false), "No articles found.");
    }

    #[test]
    fn test_table_row_contents() {
        let mut draft = sample_article(12, "Rascunho", 3.5);
        draft.published = false;
        let articles = vec![sample_article(3, "Destaque do dia", 8.25), draft];

        let output = format_article_table(&articles, now(), false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("#3"));
        assert!(lines[0].contains("8.25★"));
        assert!(lines[0].contains("2 hours ago"));
        assert!(lines[1].contains("3.50 "));
        assert!(lines[1].contains("(draft)"));
    }

    #[test]
    fn test_detail_contains_fields() {
        let mut article = sample_article(5, "Título", 7.5);
        article.extracted_keywords = "governo, reforma".to_string();
        let output = format_article_detail(&article, now(), false);

        assert!(output.starts_with("#5 Título"));
        assert!(output.contains("Published: 2024-03-06 12:00 UTC (2 hours ago, published)"));
        assert!(output.contains("Score: 7.50  Featured: yes"));
        assert!(output.contains("Keywords: governo, reforma"));
        assert!(output.ends_with("Resumo\n\nCorpo"));
    }

    #[test]
    fn test_breakdown() {
        let result = ScoreResult {
            score: 3.4,
            incomplete: true,
            breakdown: ScoreBreakdown {
                factors: vec![FactorContribution {
                    label: "Trends".to_string(),
                    description: "unavailable, fallback".to_string(),
                    raw: 5.0,
                    weight: 0.4,
                }],
            },
        };
        let output = format_breakdown(&result, false);
        assert!(output.starts_with("Score: 3.40*"));
        assert!(output.contains("Trends    5.00 x 0.40 =  2.00  unavailable, fallback"));
    }

    #[test]
    fn test_recomputed_breakdown_shows_stored_score() {
        let result = ScoreResult {
            score: 6.5,
            incomplete: false,
            breakdown: ScoreBreakdown { factors: vec![] },
        };
        let output = format_recomputed_breakdown(7.25, &result, false);
        assert_eq!(output, "Recomputed score: 6.50 (stored: 7.25)");
    }

    #[test]
    fn test_format_tsv() {
        let articles = vec![sample_article(1, "Com\ttab", 7.0), sample_article(2, "Sem", 1.234)];
        let output = format_tsv(&articles);
        assert_eq!(output, "1\t7.00\ttrue\ttrue\tCom tab\n2\t1.23\tfalse\ttrue\tSem");
    }

    #[test]
    fn test_format_stats() {
        let stats = Stats {
            total: 4,
            published: 3,
            drafts: 1,
            featured: 2,
        };
        assert_eq!(
            format_stats(&stats),
            "Total: 4  Published: 3  Drafts: 1  Featured: 2"
        );
    }
}
