//! Prompt construction for outline and content generation

use neuradraft_ast::DocType;

/// System prompt for the outline step
pub const OUTLINE_SYSTEM_PROMPT: &str =
    "You are an expert technical writer. Create detailed, logical outlines for documents.";

/// System prompt for the content step
pub const CONTENT_SYSTEM_PROMPT: &str = "You are a professional content writer. Create comprehensive, well-structured documents with proper formatting.";

/// Sections requested in the outline for each document type
fn outline_sections(doc_type: DocType) -> &'static [&'static str] {
    match doc_type {
        DocType::Report => &[
            "Executive Summary",
            "Introduction and Background",
            "Main Analysis Sections (3-5 sections with subsections)",
            "Case Studies/Examples",
            "Findings and Recommendations",
            "Conclusion",
            "References",
        ],
        DocType::ResearchPaper => &[
            "Abstract",
            "Introduction",
            "Literature Review",
            "Methodology",
            "Results",
            "Discussion",
            "Conclusion",
            "References",
        ],
        DocType::Article | DocType::Guide => &[
            "Introduction",
            "Historical Context/Background",
            "Key Concepts and Definitions",
            "Current State/Applications",
            "Challenges and Opportunities",
            "Future Outlook",
            "Conclusion",
        ],
    }
}

/// Noun used in the outline request
fn outline_noun(doc_type: DocType) -> &'static str {
    match doc_type {
        DocType::Report => "a detailed report",
        DocType::ResearchPaper => "a research paper",
        DocType::Article | DocType::Guide => "an article",
    }
}

/// Build the user prompt asking for an outline
pub fn outline_prompt(topic: &str, doc_type: DocType) -> String {
    let mut prompt = format!(
        "Create a comprehensive outline for {} on: {}\n\nThe outline should include:\n",
        outline_noun(doc_type),
        topic.trim()
    );
    for (i, section) in outline_sections(doc_type).iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, section));
    }
    prompt.push_str(
        "\nProvide a structured outline with clear sections and a brief description of what each section will cover.\n",
    );
    prompt
}

/// Build the user prompt asking for the full document
pub fn content_prompt(topic: &str, outline: &str, feedback: &str) -> String {
    format!(
        "Based on the following topic and approved outline, generate a comprehensive, well-formatted document.\n\
         \n\
         TOPIC: {}\n\
         \n\
         APPROVED OUTLINE:\n{}\n\
         \n\
         USER FEEDBACK/REQUIREMENTS:\n{}\n\
         \n\
         Requirements:\n\
         1. Follow the outline structure exactly\n\
         2. Write detailed, informative content for each section\n\
         3. Use markdown with ## for main headings and ### for subheadings\n\
         4. Include relevant examples, data, and explanations\n\
         5. Keep the content flowing logically between sections\n\
         6. Make it engaging and educational\n\
         7. Give every main section at least 3-5 paragraphs\n\
         \n\
         Generate the complete document now.\n",
        topic.trim(),
        outline.trim(),
        feedback.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_prompt_report() {
        let prompt = outline_prompt("Solar Power", DocType::Report);
        assert!(prompt.contains("a detailed report on: Solar Power"));
        assert!(prompt.contains("1. Executive Summary"));
        assert!(prompt.contains("7. References"));
    }

    #[test]
    fn test_outline_prompt_research_paper() {
        let prompt = outline_prompt("Graphs", DocType::ResearchPaper);
        assert!(prompt.contains("4. Methodology"));
        assert!(prompt.contains("8. References"));
    }

    #[test]
    fn test_guide_uses_article_outline() {
        assert_eq!(
            outline_prompt("X", DocType::Guide),
            outline_prompt("X", DocType::Article)
        );
    }

    #[test]
    fn test_content_prompt() {
        let prompt = content_prompt("Topic", "1. Intro\n2. End", "");
        assert!(prompt.contains("TOPIC: Topic"));
        assert!(prompt.contains("APPROVED OUTLINE:\n1. Intro\n2. End"));
        assert!(prompt.contains("## for main headings"));
    }
}
