// src/pipeline/prompts.rs

/// Role prompt sent ahead of the outline request.
pub const SECRETARY_SYSTEM_PROMPT: &str = r#"You are an advanced AI assistant that takes comprehensive, well-organised notes from meeting transcripts. Make sure no important detail is missed while keeping the notes clear, concise and well structured. Identify key points, decisions, action items, deadlines and follow-ups, and record them in an organised way. In addition:

- Categorise the notes into the requested sections.
- Capture enough context around each point to avoid ambiguity.
- Condense long discussions into their main points.
- Record who said what where it clarifies responsibility or contribution.
- Highlight any unresolved issue or point that needs clarification.

Write in the same language as the transcript.

Your answer must be a single JSON object and nothing else, shaped like:
{
    "section title": ["key point", ...],
    ...
}
(The outermost value is an object, not a list.)
"#;

/// Prompt for the outline call: system prompt, section list and transcript.
pub fn outline_prompt(sections: &[String], transcript: &str) -> String {
    // serde_json cannot fail on a list of strings.
    let section_list = serde_json::to_string_pretty(sections).unwrap_or_default();
    format!(
        r#"{system}
Based on the conversation in the meeting transcript below, build a polished, professional outline for a meeting note that captures the main content of the meeting.
Give each section 3 to 5 key points. Use exactly these section titles as keys:

{section_list}

Transcript:
{transcript}

Return the outline as JSON. Each section title is a key and its value is a list of key points.
"#,
        system = SECRETARY_SYSTEM_PROMPT,
    )
}

const FORMAT_INSTRUCTIONS: &str = r#"Instructions:
1. Give detailed, specific content and use this markup only:
    - Use ### for main headings
    - Use #### for sub-headings
    - Use * for bullet points
    - Use **text** to emphasise what matters
    - Use | to separate the columns of a table, header row included
2. Ground every statement in the transcript and expand briefly where a point needs context.
3. Keep the content coherent and relevant to the section.
4. Do not repeat the section title inside the content.

Keep a professional tone; be clear, specific and detailed.
"#;

/// Prompt for one section.
///
/// With no key points the guidance block is left out entirely and the model
/// works from the transcript alone.
pub fn section_prompt(section: &str, key_points: &[String], transcript: &str) -> String {
    let guidance = if key_points.is_empty() {
        String::new()
    } else {
        let points = serde_json::to_string_pretty(key_points).unwrap_or_default();
        format!("Use this outline as guidance for what to cover:\n\n{}\n\n", points)
    };

    format!(
        "Write the content of the section \"{section}\" of a meeting note.\n\
         {guidance}Transcript:\n{transcript}\n\n{FORMAT_INSTRUCTIONS}"
    )
}
