//! Terminal rendering of pipeline state and prompts.

use noorix::core::{LengthPreference, PipelineState, Stage};
use noorix::errors::FailureInfo;
use noorix::prompts::{compose_description_prompt, compose_hashtags_prompt, compose_title_prompt};
use serde_json::json;

/// Renders produced text per stage, followed by the failure if any.
pub fn render_results(state: &PipelineState) -> String {
    let mut out = String::new();
    for stage in Stage::ALL {
        if let Some(text) = state.results.get(stage) {
            out.push_str(&format!("== {} ==\n{text}\n\n", stage.label()));
        }
    }
    if let Some(failure) = &state.failure {
        out.push_str(&format!("Generation failed: {failure}\n"));
    }
    out
}

/// Prints [`render_results`] to stdout.
pub fn print_results(state: &PipelineState) {
    print!("{}", render_results(state));
}

/// Builds the JSON document printed by `--json`.
pub fn render_json(state: &PipelineState, failure: Option<&FailureInfo>) -> serde_json::Value {
    json!({
        "run_id": state.run_id,
        "results": {
            "title": state.results.title(),
            "description": state.results.description(),
            "hashtags": state.results.hashtags(),
        },
        "completed": state.results.completed(),
        "error": failure,
    })
}

/// Prints [`render_json`] to stdout, pretty-printed.
pub fn print_json(state: &PipelineState, failure: Option<&FailureInfo>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&render_json(state, failure))?);
    Ok(())
}

/// Composes the prompts that the given inputs allow, in stage order.
pub fn render_prompts(
    idea: &str,
    title: Option<&str>,
    description: Option<&str>,
    length: LengthPreference,
) -> Vec<(Stage, String)> {
    let mut prompts = vec![(Stage::Title, compose_title_prompt(idea))];
    if let Some(title) = title {
        prompts.push((Stage::Description, compose_description_prompt(title, length)));
    }
    if let Some(description) = description {
        prompts.push((Stage::Hashtags, compose_hashtags_prompt(description, idea)));
    }
    prompts
}

/// Prints [`render_prompts`] to stdout.
pub fn print_prompts(
    idea: &str,
    title: Option<&str>,
    description: Option<&str>,
    length: LengthPreference,
) {
    for (stage, prompt) in render_prompts(idea, title, description, length) {
        println!("== {} prompt ==\n{prompt}\n", stage.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noorix::core::PipelineFailure;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_prompts_only_title_without_upstream() {
        let prompts = render_prompts("garden tips", None, None, LengthPreference::Small);
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0, Stage::Title);
        assert!(prompts[0].1.contains("garden tips"));
    }

    #[test]
    fn test_render_prompts_with_upstream() {
        let prompts = render_prompts(
            "garden tips",
            Some("Grow More"),
            Some("A short guide."),
            LengthPreference::Small,
        );
        let stages: Vec<Stage> = prompts.iter().map(|(s, _)| *s).collect();
        assert_eq!(stages, vec![Stage::Title, Stage::Description, Stage::Hashtags]);
        assert!(prompts[1].1.contains("Grow More"));
        assert!(prompts[1].1.contains("SMALL"));
        assert!(prompts[2].1.contains("A short guide."));
    }

    #[test]
    fn test_render_empty_state() {
        let state = PipelineState::default();
        assert_eq!(render_results(&state), "");
        let value = render_json(&state, None);
        assert_eq!(value["results"]["title"], serde_json::Value::Null);
        assert_eq!(value["error"], serde_json::Value::Null);
    }

    #[test]
    fn test_render_json_failure() {
        let state = PipelineState {
            failure: Some(PipelineFailure::new(Stage::Title, "timeout")),
            ..PipelineState::default()
        };
        let info = FailureInfo::new("SERVICE-FAILURE", "title stage failed: timeout")
            .with_context_entry("stage", "title");

        let value = render_json(&state, Some(&info));

        assert_eq!(value["error"]["code"], "SERVICE-FAILURE");
        assert_eq!(value["error"]["context"]["stage"], "title");
        assert!(render_results(&state).contains("title stage failed: timeout"));
    }
}
