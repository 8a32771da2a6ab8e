//! Prompt construction for review and fix requests.
//!
//! Pure string building: the empty-code check belongs to
//! [`ReviewRequest::new`], so every request reaching this module is valid.

use crate::models::{ReviewMode, ReviewRequest};

/// Build the single instruction sent to the completion service.
pub fn build_prompt(request: &ReviewRequest) -> String {
    let prompt = match request.mode() {
        ReviewMode::Review => review_prompt(request),
        ReviewMode::Fix => fix_prompt(request),
    };
    tracing::trace!(
        mode = %request.mode(),
        language = %request.language(),
        chars = prompt.len(),
        "built prompt"
    );
    prompt
}

fn review_prompt(request: &ReviewRequest) -> String {
    format!(
        "You are an expert-level software developer.\n\
         I'm sharing code written in {language}.\n\n\
         Do two things:\n\n\
         ### PART 1 — Quality Metrics JSON\n\
         Output a JSON block (and nothing else before the block) like this:\n\
         ```json\n\
         {{\n  \"overall\": 72,\n  \"readability\": 80,\n  \"performance\": 65,\n  \
         \"security\": 70,\n  \"bestPractices\": 75\n}}\n\
         ```\n\
         All values are integers 0–100. Be accurate and critical.\n\n\
         ### PART 2 — Detailed Review\n\
         After the JSON block, write a full code review covering:\n\
         1. Quality rating: Better / Good / Normal / Bad\n\
         2. Detailed improvement suggestions & best practices\n\
         3. Step-by-step explanation of what the code does\n\
         4. Potential bugs or logical errors\n\
         5. Syntax or runtime errors\n\
         6. Fixes and recommendations\n\n\
         Code:\n{code}\n",
        language = request.language().tag(),
        code = request.source_code(),
    )
}

fn fix_prompt(request: &ReviewRequest) -> String {
    format!(
        "You are an expert software developer. Fix all bugs, syntax errors, and logical \
         issues in the following {language} code. Return the corrected code with a brief \
         explanation of what was fixed.\n\n\
         Code: {code}",
        language = request.language().tag(),
        code = request.source_code(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;

    /// Keys the structured score block must contain, in prompt order.
    const SCORE_KEYS: [&str; 5] = [
        "overall",
        "readability",
        "performance",
        "security",
        "bestPractices",
    ];

    fn request(mode: ReviewMode) -> ReviewRequest {
        ReviewRequest::new("def add(a, b):\n    return a + b", Language::Python, mode).unwrap()
    }

    #[test]
    fn review_prompt_asks_for_fenced_json_first() {
        let prompt = build_prompt(&request(ReviewMode::Review));
        let fence = prompt.find("```json").expect("fenced block requested");
        let review = prompt.find("PART 2").expect("review section requested");
        assert!(fence < review, "score block must be requested before the prose");
        assert!(prompt.contains("nothing else before the block"));
    }

    #[test]
    fn review_prompt_names_every_score_key() {
        let prompt = build_prompt(&request(ReviewMode::Review));
        for key in SCORE_KEYS {
            assert!(prompt.contains(&format!("\"{key}\"")), "missing key {key}");
        }
        assert!(prompt.contains("integers 0–100"));
    }

    #[test]
    fn review_prompt_example_block_is_valid_json() {
        let prompt = build_prompt(&request(ReviewMode::Review));
        let start = prompt.find("```json").unwrap() + "```json".len();
        let end = start + prompt[start..].find("```").unwrap();
        let report: crate::models::ScoreReport =
            serde_json::from_str(prompt[start..end].trim()).unwrap();
        assert_eq!(report.overall.as_i64(), Some(72));
    }

    #[test]
    fn review_prompt_covers_all_review_topics() {
        let prompt = build_prompt(&request(ReviewMode::Review));
        for topic in [
            "Quality rating",
            "improvement suggestions",
            "Step-by-step explanation",
            "Potential bugs",
            "Syntax or runtime errors",
            "Fixes and recommendations",
        ] {
            assert!(prompt.contains(topic), "missing topic {topic}");
        }
    }

    #[test]
    fn review_prompt_embeds_language_and_code() {
        let prompt = build_prompt(&request(ReviewMode::Review));
        assert!(prompt.contains("written in python"));
        assert!(prompt.ends_with("return a + b\n"));
    }

    #[test]
    fn fix_prompt_has_no_score_block() {
        let prompt = build_prompt(&request(ReviewMode::Fix));
        assert!(!prompt.contains("```json"));
        assert!(!prompt.contains("bestPractices"));
        assert!(prompt.contains("python code"));
        assert!(prompt.contains("brief explanation"));
        assert!(prompt.contains("return a + b"));
    }

    #[test]
    fn language_tag_is_used_not_label() {
        let req = ReviewRequest::new("int main(){}", Language::Cpp, ReviewMode::Fix).unwrap();
        let prompt = build_prompt(&req);
        assert!(prompt.contains("cpp code"));
        assert!(!prompt.contains("C++"));
    }
}
