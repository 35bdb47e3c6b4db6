//! Prompt builders for the interpreter and planner.
//!
//! Every prompt pins the exact JSON shape the parsers in the domain layer
//! accept. Keep the schemas here and the parsers in sync.

use nlmake_domain::Specialist;

/// Prompt for mapping a request onto a build target.
pub fn routing_prompt(request: &str, target_summary: &str) -> String {
    format!(
        r#"You map natural-language requests onto build targets.

Available targets (one per line, some with descriptions):
{target_summary}

User request: {request}

Respond with a single JSON object and nothing else:
{{"command": <best matching target name or null>, "confidence": <0.0 to 1.0>, "alternatives": [<other plausible target names, best first>]}}

Rules:
- "command" must be one of the listed target names, or null if none fit.
- If "command" is null, "confidence" must be 0.
- "confidence" reflects how sure you are the command is what the user meant.
- List up to 3 alternatives; use an empty array when there are none."#
    )
}

/// Prompt for correcting a failed command line.
pub fn correction_prompt(command_line: &str, error_text: &str) -> String {
    format!(
        r#"A command-line invocation failed to parse.

Failed invocation: {command_line}
Parser error: {error_text}

Suggest the build target the user most likely wanted. Respond with a single JSON object and nothing else:
{{"command": <most likely intended target or null>, "confidence": <0.0 to 1.0>, "alternatives": []}}

If the intent is unclear, use null and confidence 0."#
    )
}

/// Prompt for decomposing a goal into specialist tasks.
pub fn decompose_prompt(goal: &str, context: &str) -> String {
    let specialists = Specialist::all()
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"You decompose a goal into tasks for specialist agents.

Available specialists: {specialists}
- terminal: run shell commands
- coding: write and run code in a scratch sandbox
- web: fetch and read web pages
- build_system: run build targets
- file_system: read, write, and list project files

Goal: {goal}

Project context:
{context}

Respond with a single JSON object and nothing else:
{{"tasks": [{{"specialist": <name>, "goal": <what this task achieves>, "mode": "direct", "params": {{}}}}]}}

Rules:
- Order tasks so later tasks can rely on earlier ones.
- Use "mode": "tdd" only for coding tasks that should be test-driven.
- Keep the list short; one task per distinct piece of work."#
    )
}

/// Prompt for breaking a coding goal into TDD steps.
pub fn plan_steps_prompt(goal: &str, context: &str) -> String {
    format!(
        r#"You break a coding goal into small test-driven steps. Each step
will get one failing test, one implementation pass, and one refactor pass.

Goal: {goal}

Project context:
{context}

Respond with a single JSON object and nothing else:
{{"steps": [<short step description>, ...]}}

Rules:
- Each step must be independently verifiable by the test suite.
- Order steps from simplest behavior to fullest behavior.
- Three to seven steps is typical."#
    )
}
