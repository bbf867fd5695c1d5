//! Line-level summary of what a rewrite changed.

use crate::lint::vocabulary::WEAK_PHRASES;
use crate::models::report::ChangeSummary;

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

/// Compares line `i` of each text for every `i` both share.
///
/// A verb replacement is a weak phrase present in the original line and gone from the
/// new one; a metric addition is a changed line that gained its first digit.
pub fn summarize_changes(original: &str, optimized: &str) -> ChangeSummary {
    let before: Vec<&str> = original.split('\n').collect();
    let after: Vec<&str> = optimized.split('\n').collect();
    let total_lines = before.len();

    let mut summary = ChangeSummary {
        total_lines,
        ..ChangeSummary::default()
    };

    for (old, new) in before.iter().zip(after.iter()) {
        if old == new {
            continue;
        }
        summary.lines_changed += 1;

        let old_lower = old.to_lowercase();
        let new_lower = new.to_lowercase();
        summary.verb_replacements += WEAK_PHRASES
            .iter()
            .filter(|p| old_lower.contains(*p) && !new_lower.contains(*p))
            .count();

        if has_digit(new) && !has_digit(old) {
            summary.metric_additions += 1;
        }
    }

    summary.change_percentage = if total_lines > 0 {
        (summary.lines_changed as f64 / total_lines as f64 * 100.0).round() as u32
    } else {
        0
    };

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_replacements_and_metrics() {
        let original = "SKILLS\n• Responsible for the API\n• Built dashboards\n• Shipped v2";
        let optimized = "SKILLS\n• Managed the API\n• Built dashboards, reducing load times by 30%\n• Shipped v2";
        let s = summarize_changes(original, optimized);
        assert_eq!(s.total_lines, 4);
        assert_eq!(s.lines_changed, 2);
        assert_eq!(s.change_percentage, 50);
        assert_eq!(s.verb_replacements, 1);
        assert_eq!(s.metric_additions, 1);
    }

    #[test]
    fn test_identical_texts() {
        let s = summarize_changes("a\nb", "a\nb");
        assert_eq!(s.lines_changed, 0);
        assert_eq!(s.change_percentage, 0);
    }

    #[test]
    fn test_line_with_existing_digits_is_not_a_metric_addition() {
        let s = summarize_changes("• Led 3 teams", "• Led 3 teams, hiring 4 engineers");
        assert_eq!(s.metric_additions, 0);
        assert_eq!(s.lines_changed, 1);
    }
}
