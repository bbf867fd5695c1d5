//! Technology-name extraction over a curated list. Feeds job-match keywords, the
//! "skills to preserve" list in rewrite prompts, and invented-skill validation.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

const LANGUAGES: &[&str] = &[
    "Python", "JavaScript", "TypeScript", "Java", "C++", "C#", "Ruby", "PHP", "Go", "Rust",
    "Swift", "Kotlin", "HTML", "CSS", "SQL", "R", "Scala", "Perl", "Shell", "Bash",
    "PowerShell", "MATLAB", "Julia", "Dart", "Assembly", "COBOL", "Fortran", "Haskell", "Lua",
    "Objective-C",
];

const FRAMEWORKS: &[&str] = &[
    "React", "Angular", "Vue", "Django", "Flask", "FastAPI", "Spring", "Express", "Rails",
    "Laravel", "ASP.NET", "Node.js", "Bootstrap", "Tailwind", "jQuery", "TensorFlow",
    "PyTorch", "Keras", "Pandas", "NumPy", "Scikit-learn", "Next.js", "Gatsby", "Redux",
    "GraphQL", "Apollo", "Ember", "Svelte", "Meteor", "Nest.js", "Xamarin", "Flutter",
    "Electron", "Symfony", "CodeIgniter", "Zend", "Slim",
];

const TOOLS: &[&str] = &[
    "Git", "Docker", "Kubernetes", "AWS", "Azure", "GCP", "Heroku", "Jenkins", "CircleCI",
    "Travis CI", "GitHub Actions", "Ansible", "Terraform", "Puppet", "Chef", "Grafana",
    "Prometheus", "ELK Stack", "Jira", "Confluence", "Figma", "Sketch", "Adobe XD", "VS Code",
    "IntelliJ", "PyCharm", "Eclipse", "Xcode", "Android Studio", "Unity",
];

const DATABASES: &[&str] = &[
    "MySQL", "PostgreSQL", "MongoDB", "SQLite", "Oracle", "SQL Server", "Redis", "Cassandra",
    "DynamoDB", "Firebase", "Elasticsearch", "Neo4j", "Couchbase", "MariaDB", "InfluxDB", "H2",
    "Fauna", "CockroachDB", "Supabase",
];

const CLOUD: &[&str] = &[
    "DigitalOcean", "Linode", "Cloudflare", "Netlify", "Vercel", "AWS Lambda", "S3", "EC2",
    "RDS", "SQS", "SNS", "API Gateway", "Azure Functions", "Azure Blob Storage",
    "Google Cloud Functions",
];

/// Technology names that are also everyday English words. They only count when written
/// with their canonical capitalisation ("Spring", not "spring").
const DICTIONARY_WORDS: &[&str] = &[
    "Apollo", "Assembly", "Bash", "Bootstrap", "Chef", "Dart", "Eclipse", "Electron", "Ember",
    "Express", "Fauna", "Flutter", "Julia", "Meteor", "Oracle", "Pandas", "Puppet", "Rails",
    "Ruby", "Rust", "Shell", "Sketch", "Slim", "Spring", "Swift", "Unity",
];

/// Names a plain word-boundary regex cannot delimit.
const SYMBOL_NAMES: &[&str] = &["C++", "C#"];

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("js", "JavaScript"),
    ("ts", "TypeScript"),
    ("py", "Python"),
    ("rb", "Ruby"),
    ("tf", "TensorFlow"),
    ("k8s", "Kubernetes"),
];

/// One compiled matcher per technology. Names of two characters or fewer ("R", "Go",
/// "S3") and `DICTIONARY_WORDS` match case-sensitively so everyday words do not register
/// as skills.
static MATCHERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    let mut names: Vec<&'static str> = LANGUAGES
        .iter()
        .chain(FRAMEWORKS)
        .chain(TOOLS)
        .chain(DATABASES)
        .chain(CLOUD)
        .copied()
        .filter(|name| !SYMBOL_NAMES.contains(name))
        .collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    names.dedup();

    names
        .into_iter()
        .map(|name| {
            let exact = name.chars().count() <= 2 || DICTIONARY_WORDS.contains(&name);
            let flags = if exact { "" } else { "(?i)" };
            let pattern = format!(r"{flags}\b{}\b", regex::escape(name));
            (name, Regex::new(&pattern).expect("valid technology regex"))
        })
        .collect()
});

static ABBREVIATION_MATCHERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    ABBREVIATIONS
        .iter()
        .map(|(abbr, full)| {
            // "Node.js" must not also register as "js".
            let re = Regex::new(&format!(r"(?i)(?:^|[^\w.]){}\b", regex::escape(abbr)))
                .expect("valid abbreviation regex");
            (*full, re)
        })
        .collect()
});

/// Canonical technology names mentioned in the text, sorted and deduplicated.
pub fn extract_tech_stack(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut found: BTreeSet<&'static str> = BTreeSet::new();

    for (name, re) in MATCHERS.iter() {
        if re.is_match(text) {
            found.insert(name);
        }
    }

    let lower = text.to_lowercase();
    for name in SYMBOL_NAMES {
        if lower.contains(&name.to_lowercase()) {
            found.insert(name);
        }
    }

    for (full, re) in ABBREVIATION_MATCHERS.iter() {
        if re.is_match(text) {
            found.insert(full);
        }
    }

    found.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_known_technologies() {
        let stack = extract_tech_stack("Built dashboards in React and Node.js, deployed with Docker on AWS");
        assert_eq!(stack, vec!["AWS", "Docker", "Node.js", "React"]);
    }

    #[test]
    fn test_symbol_names_and_abbreviations() {
        let stack = extract_tech_stack("Wrote C++ services, some C# tooling, and ran them on k8s");
        assert!(stack.contains(&"C++".to_string()));
        assert!(stack.contains(&"C#".to_string()));
        assert!(stack.contains(&"Kubernetes".to_string()));
    }

    #[test]
    fn test_short_names_are_case_sensitive() {
        assert!(extract_tech_stack("Analysis in R and Go").contains(&"R".to_string()));
        let stack = extract_tech_stack("ready to go for r and d");
        assert!(!stack.contains(&"Go".to_string()));
        assert!(!stack.contains(&"R".to_string()));
    }

    #[test]
    fn test_dictionary_words_need_canonical_case() {
        let stack = extract_tech_stack("Ran the spring hiring push; express delivery of shell scripts for unity and chef teams");
        assert!(stack.is_empty(), "found {stack:?}");
        let stack = extract_tech_stack("Built services with Spring and Express, deployed on Oracle");
        assert_eq!(stack, vec!["Express", "Oracle", "Spring"]);
    }

    #[test]
    fn test_html_css_only() {
        assert_eq!(extract_tech_stack("Built pages with HTML and CSS"), vec!["CSS", "HTML"]);
    }

    #[test]
    fn test_dotted_names_do_not_yield_abbreviations() {
        let stack = extract_tech_stack("Shipped Next.js apps");
        assert_eq!(stack, vec!["Next.js"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_tech_stack("   ").is_empty());
    }
}
