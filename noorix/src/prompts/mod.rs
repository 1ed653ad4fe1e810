//! Prompt composition for the three generation stages.
//!
//! Every prompt starts with the same role preamble followed by the
//! stage-specific instruction. Composition is pure string building and
//! cannot fail; callers are responsible for passing a non-empty idea.

use crate::core::{GenerationRequest, LengthPreference, Stage, StageResults};

/// Role preamble shared by every stage prompt.
pub const ROLE_PREAMBLE: &str = "\
You are a content creator specialist. You have to create contents for my users.
When I ask you for title or description, keywords for hashtags, you have to follow these rules:

1. The content should be SEO friendly.
2. Don't generate any other text except requested output (title or description or hashtags).
3. If it's a title, then make it like a title for YouTube or Facebook content or blog post and can be slightly question type.
4. If it's hashtags, then make it like hashtags for YouTube or Facebook content or blog post.
5. Follow instructions given by the user.
6. Don't make hashtags in description.";

/// Fewest hashtags requested from the service.
pub const MIN_HASHTAGS: usize = 5;

/// Most hashtags requested from the service.
pub const MAX_HASHTAGS: usize = 10;

fn with_role(instruction: &str) -> String {
    format!("Your role : {ROLE_PREAMBLE}\n\n{instruction}")
}

/// Builds the prompt asking for exactly one title for `idea`.
///
/// # Examples
///
/// ```
/// use noorix::prompts::compose_title_prompt;
///
/// let prompt = compose_title_prompt("sustainable living blog");
/// assert!(prompt.ends_with("content idea : sustainable living blog"));
/// ```
#[must_use]
pub fn compose_title_prompt(idea: &str) -> String {
    with_role(&format!(
        "Now write a SEO friendly only one title for this content idea : {idea}"
    ))
}

/// Builds the prompt asking for exactly one description of `title`, in the requested length.
#[must_use]
pub fn compose_description_prompt(title: &str, length: LengthPreference) -> String {
    with_role(&format!(
        "Now write a SEO friendly only one description for this content title : {title}\n\
         The length of description should be {length}\n\
         Do not include any hashtags in the description."
    ))
}

/// Builds the prompt asking for hashtags derived from `description` and the original `idea`.
#[must_use]
pub fn compose_hashtags_prompt(description: &str, idea: &str) -> String {
    with_role(&format!(
        "Now write SEO friendly hashtags for this content: {description},\n\
         and idea: {idea}\n\
         The length of hashtags should be {MIN_HASHTAGS}-{MAX_HASHTAGS}"
    ))
}

/// Builds the prompt for `stage` from the request and the results produced so far.
///
/// Returns `None` when the stage's upstream result is not available yet.
#[must_use]
pub fn compose_stage_prompt(
    stage: Stage,
    request: &GenerationRequest,
    results: &StageResults,
) -> Option<String> {
    match stage {
        Stage::Title => Some(compose_title_prompt(request.idea())),
        Stage::Description => results
            .title()
            .map(|title| compose_description_prompt(title, request.length())),
        Stage::Hashtags => results
            .description()
            .map(|description| compose_hashtags_prompt(description, request.idea())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StageResult;

    #[test]
    fn test_all_prompts_share_preamble() {
        let prompts = [
            compose_title_prompt("idea"),
            compose_description_prompt("title", LengthPreference::Small),
            compose_hashtags_prompt("description", "idea"),
        ];
        for prompt in prompts {
            assert!(prompt.starts_with("Your role : You are a content creator specialist."));
            assert!(prompt.contains(ROLE_PREAMBLE));
        }
    }

    #[test]
    fn test_title_prompt_embeds_idea() {
        let prompt = compose_title_prompt("sustainable living blog");
        assert!(prompt.contains("only one title"));
        assert!(prompt.contains("sustainable living blog"));
    }

    #[test]
    fn test_description_prompt_embeds_title_and_length() {
        let title = "Is Zero-Waste Living Worth It? A Beginner's Guide";
        for length in LengthPreference::ALL {
            let prompt = compose_description_prompt(title, length);
            assert!(prompt.contains(title));
            assert!(prompt.contains(&format!("should be {}", length.label())));
            assert!(prompt.contains("Do not include any hashtags"));
        }
    }

    #[test]
    fn test_hashtags_prompt_embeds_description_and_idea() {
        let description = "Learn practical steps toward a greener home.\nStart today.";
        let prompt = compose_hashtags_prompt(description, "sustainable living blog");
        assert!(prompt.contains(description));
        assert!(prompt.contains("and idea: sustainable living blog"));
        assert!(prompt.contains("5-10"));
    }

    #[test]
    fn test_composition_is_deterministic() {
        assert_eq!(compose_title_prompt("x"), compose_title_prompt("x"));
        assert_eq!(
            compose_hashtags_prompt("d", "i"),
            compose_hashtags_prompt("d", "i")
        );
    }

    #[test]
    fn test_stage_prompt_requires_upstream() {
        let request = GenerationRequest::new("sustainable living blog", LengthPreference::Medium);
        let mut results = StageResults::default();

        assert!(compose_stage_prompt(Stage::Title, &request, &results).is_some());
        assert!(compose_stage_prompt(Stage::Description, &request, &results).is_none());
        assert!(compose_stage_prompt(Stage::Hashtags, &request, &results).is_none());

        results.record(StageResult::new(Stage::Title, "Green Living?"));
        let prompt = compose_stage_prompt(Stage::Description, &request, &results).unwrap();
        assert_eq!(prompt, compose_description_prompt("Green Living?", LengthPreference::Medium));

        results.record(StageResult::new(Stage::Description, "A guide."));
        let prompt = compose_stage_prompt(Stage::Hashtags, &request, &results).unwrap();
        assert_eq!(prompt, compose_hashtags_prompt("A guide.", "sustainable living blog"));
    }
}
