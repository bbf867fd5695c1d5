// Prompts for the external rewrite pass. The rewriter edits the rule-based draft, never
// the raw original, so weak phrases already fixed stay fixed.

use crate::llm_client::prompts::{NO_FABRICATION_INSTRUCTION, PLAIN_TEXT_ONLY_SYSTEM};
use crate::reconcile::extract::PreservedFacts;

pub const REWRITE_SYSTEM: &str = "You are an expert resume editor. \
    Improve clarity, use the active voice and strong action verbs, and keep a professional tone \
    while staying 100% truthful to the text you are given. \
    Keep every section, heading and bullet in its original order.";

pub const REWRITE_USER_TEMPLATE: &str = "\
Refine the resume below. It has already been through an automated clean-up; \
do not reintroduce phrases such as \"responsible for\" or \"worked on\".

RESUME:
{resume}

CRITICAL - PRESERVE THESE EXACT TOKENS (copy them character for character):
{preserved}

SKILLS PRESENT IN THE ORIGINAL (do not add any others):
{skills}
{job_description}
Return only the refined resume text.";

const NONE_LISTED: &str = "- (none)";

pub fn build_system_prompt() -> String {
    format!("{REWRITE_SYSTEM}\n\n{PLAIN_TEXT_ONLY_SYSTEM}\n\n{NO_FABRICATION_INSTRUCTION}")
}

fn bullet_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let lines: Vec<String> = items.map(|i| format!("- {i}")).collect();
    if lines.is_empty() {
        NONE_LISTED.to_string()
    } else {
        lines.join("\n")
    }
}

pub fn build_user_prompt(rule_based: &str, facts: &PreservedFacts, job_description: Option<&str>) -> String {
    let preserved = bullet_list(
        facts
            .metric_tokens()
            .into_iter()
            .chain(facts.approximate_percentages.iter().map(String::as_str))
            .chain(facts.job_titles.iter().map(|t| t.line.as_str())),
    );
    let skills = bullet_list(facts.skills.iter().map(String::as_str));
    let job_description = match job_description.map(str::trim).filter(|jd| !jd.is_empty()) {
        Some(jd) => format!(
            "\nTARGET JOB DESCRIPTION (use it to choose emphasis and wording only; never copy skills from it):\n{jd}\n"
        ),
        None => String::new(),
    };

    fill_template(
        REWRITE_USER_TEMPLATE,
        &[
            ("{resume}", rule_based),
            ("{preserved}", preserved.as_str()),
            ("{skills}", skills.as_str()),
            ("{job_description}", job_description.as_str()),
        ],
    )
}

/// Single left-to-right pass over the template. Inserted values are never rescanned, so
/// placeholder-like text inside a resume or job description stays literal.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_lists_preserved_tokens() {
        let original = "Senior Engineer, Acme Corp (2019 - 2023)\n• Cut costs by 30% with ~15% less hardware in Rust";
        let facts = PreservedFacts::extract(original);
        let prompt = build_user_prompt("• Cut costs by 30%", &facts, None);
        assert!(prompt.contains("- 30%"));
        assert!(prompt.contains("- ~15%"));
        assert!(prompt.contains("- Senior Engineer, Acme Corp (2019 - 2023)"));
        assert!(prompt.contains("- Rust"));
        assert!(prompt.contains("RESUME:\n• Cut costs by 30%"));
        assert!(!prompt.contains("TARGET JOB DESCRIPTION"));
    }

    #[test]
    fn test_user_prompt_with_job_description() {
        let prompt = build_user_prompt("• Led things", &PreservedFacts::default(), Some("Rust backend role"));
        assert!(prompt.contains("TARGET JOB DESCRIPTION"));
        assert!(prompt.contains("Rust backend role"));
        assert!(prompt.contains(NONE_LISTED));
    }

    #[test]
    fn test_resume_placeholders_are_not_expanded() {
        let prompt = build_user_prompt("• Mentioned {skills} literally", &PreservedFacts::default(), None);
        assert!(prompt.contains("• Mentioned {skills} literally"));
    }

    #[test]
    fn test_job_description_placeholders_are_not_expanded() {
        let prompt = build_user_prompt("• Led the billing team", &PreservedFacts::default(), Some("Paste your {resume} here"));
        assert!(prompt.contains("Paste your {resume} here"));
        assert_eq!(prompt.matches("• Led the billing team").count(), 1);
    }

    #[test]
    fn test_system_prompt_forbids_fabrication() {
        assert!(build_system_prompt().contains("Never invent facts"));
    }
}
