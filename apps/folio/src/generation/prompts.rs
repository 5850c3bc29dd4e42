// All LLM prompt constants for cover-letter generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for letter generation. Replace `{json_only}` before sending.
pub const COVER_LETTER_SYSTEM_TEMPLATE: &str = "You are an expert resume and cover letter writer. \
    You write compelling, specific cover letters grounded only in the projects you are given. \
    {json_only} \
    Return exactly one JSON object of the form {\"cover_letter\": \"<the full letter as plain text>\"}. \
    Separate paragraphs inside the letter with blank lines.";

/// Cover letter prompt template.
/// Replace: {applicant_name}, {job_description}, {projects}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Your goal is to create a compelling cover letter for the user, highlighting their skills and experience based on their portfolio projects and tailored to the specific job description.

The user's name is {applicant_name}.

Here is the job description:
{job_description}

Here are the portfolio projects. Select which projects to highlight based on their relevance to the job description.
{projects}

Write a cover letter that incorporates details from the most relevant portfolio projects to demonstrate the user's qualifications for the job. Only include project details if they are very relevant, and weave them into persuasive prose rather than listing them.
Close with a call to action, inviting the hiring manager to learn more."#;

/// One block per project, appended to `{projects}` in order.
/// Replace: {name}, {description}, {link}, {skills}, {details}
pub const PROJECT_BLOCK_TEMPLATE: &str = "\
Project Name: {name}
Description: {description}
Link: {link}
Relevant Skills: {skills}
Details: {details}
";

/// Rendered in place of a missing project link.
pub const NO_LINK: &str = "(none)";
