use crate::llm_client::prompts::SCORE_ARRAY_INSTRUCTION;

/// Builds the project evaluation prompt. Projects are numbered from 1 and
/// separated by blank lines.
pub fn build_scoring_prompt(projects: &[String]) -> String {
    let listed = projects
        .iter()
        .enumerate()
        .map(|(i, p)| format!("Project {}: {}", i + 1, p))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{SCORE_ARRAY_INSTRUCTION}\n\nProject evaluations:\n{listed}")
}
