// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompt templates alongside it.

/// Instruction that pins the reply to a bare JSON array of three scores.
pub const SCORE_ARRAY_INSTRUCTION: &str = "You must respond with ONLY a JSON array of exactly three numbers between 1 and 10, representing scores for each project. For example: [7, 8, 6]. Do not include any other text or explanation.";
