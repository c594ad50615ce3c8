//! Human-readable labels for category slugs.
//!
//! Records carry categories in slug form (`developer-tools`). Filtering and
//! grouping always use the slug; labels exist only for presentation.

/// Slugs whose label does not follow the plain title-case rule.
const LABEL_OVERRIDES: &[(&str, &str)] = &[
    ("ai-chatbot", "AI Chatbot"),
    ("ai-agents", "AI Agents"),
    ("ai-tools", "AI Tools"),
    ("llm", "LLM"),
    ("rag-systems", "RAG Systems"),
    ("api-development", "API Development"),
    ("cli-tools", "CLI Tools"),
    ("ide", "IDE"),
    ("ides", "IDEs"),
    ("devops", "DevOps"),
    ("mcp-tools", "MCP Tools"),
    ("seo", "SEO"),
    ("iot", "IoT"),
    ("os-automation", "OS Automation"),
    ("crm", "CRM"),
    ("sql", "SQL"),
    ("ui", "UI"),
    ("ux", "UX"),
];

/// Label for a category slug.
///
/// Looks the slug up in a fixed override table first; otherwise replaces
/// `-` and `_` with spaces and capitalizes each word.
pub fn category_label(slug: &str) -> String {
    if let Some((_, label)) = LABEL_OVERRIDES.iter().find(|(s, _)| *s == slug) {
        return (*label).to_string();
    }
    slug.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => {
            let upper: String = c.to_uppercase().collect();
            upper + chars.as_str()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win() {
        assert_eq!(category_label("ai-chatbot"), "AI Chatbot");
        assert_eq!(category_label("devops"), "DevOps");
        assert_eq!(category_label("llm"), "LLM");
    }

    #[test]
    fn fallback_title_cases_words() {
        assert_eq!(category_label("developer-tools"), "Developer Tools");
        assert_eq!(category_label("file_systems"), "File Systems");
        assert_eq!(category_label("research-and-data"), "Research And Data");
        assert_eq!(category_label("finance"), "Finance");
    }

    #[test]
    fn collapses_repeated_separators() {
        assert_eq!(category_label("cloud--platforms_"), "Cloud Platforms");
        assert_eq!(category_label(""), "");
    }
}
