// All LLM prompt constants for the screening agents.
// Templates use `{placeholder}` markers replaced before sending.

/// System persona for resume parsing.
pub const RESUME_PARSE_SYSTEM: &str = "You are an expert resume parser. \
    Extract structured data from raw resume text. \
    Pay particular attention to 'technical_skills' and 'work_experience'.";

/// Resume parsing prompt. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Extract structured data from the resume below.

RESUME TEXT:
{resume_text}

Return a JSON object with this schema:
{
  "personal_information": {"name": "string", "email": "string"},
  "technical_skills": ["skill", "skill"],
  "work_experience": [{"role": "string", "company": "string", "description": "string"}],
  "education": [{"degree": "string", "institution": "string"}],
  "total_years_experience": 0.0
}"#;

/// Simplified resume retry prompt. Replace `{resume_text}` before sending.
pub const RESUME_RETRY_PROMPT_TEMPLATE: &str = r#"The previous extraction could not be used.
Return strict JSON containing ONLY these two keys:
{
  "technical_skills": ["skill1", "skill2"],
  "work_experience": []
}

RESUME TEXT:
{resume_text}"#;

/// System persona for job-description analysis.
pub const JD_ANALYZE_SYSTEM: &str =
    "You are an expert technical recruiter. Extract job requirements exactly as stated.";

/// Job-description analysis prompt. Replace `{jd_text}` before sending.
pub const JD_ANALYZE_PROMPT_TEMPLATE: &str = r#"Analyze the job description below.
STEP 1: Extract "required_skills" (must-haves) as a list of strings.
STEP 2: Extract "preferred_skills" (nice-to-haves) as a list of strings.
STEP 3: Extract "seniority" as one of Junior, Mid, Senior, Unknown.

JOB DESCRIPTION:
{jd_text}

Return STRICT JSON:
{"required_skills": ["..."], "preferred_skills": ["..."], "seniority": "Mid"}"#;

/// Simplified job-description retry prompt. Replace `{jd_text}` before sending.
pub const JD_RETRY_PROMPT_TEMPLATE: &str = r#"Extract ONLY the must-have skills from the job description below.
Return strict JSON of the form {"required_skills": ["..."]} and no other keys.

JOB DESCRIPTION:
{jd_text}"#;

/// System persona for the match decision.
pub const DECISION_SYSTEM: &str = "You are a strict data comparison engine. \
    You verify matches between two provided lists. \
    You DO NOT invent skills the candidate did not list. \
    You DO NOT suggest adjacent roles that were not requested.";

/// Match decision prompt.
/// Replace: {jd_skills}, {candidate_skills}, {intent_threshold}
pub const DECISION_PROMPT_TEMPLATE: &str = r#"SEMANTIC MATCHING TASK
Job descriptions often use generic terms. Judge whether the candidate satisfies what each requirement means.

JOB REQUIREMENTS: {jd_skills}
CANDIDATE SKILLS: {candidate_skills}

MATCHING RULES:
1. DIRECT MATCH: the same skill on both lists, e.g. "Python" and "Python".
2. CATEGORY MATCH:
   - "Programming knowledge" or "Coding skills" is met by ANY language (Python, Java, JavaScript, Go).
   - "Database experience" is met by SQL, PostgreSQL, MySQL, MongoDB.
   - "Framework experience" is met by Django, React, Spring.
3. DOMAIN MATCH:
   - "Fintech" is met by Razorpay, Stripe, payments work.
   - "Cloud" is met by AWS, Azure, GCP.

SCORING:
- match_score must be {intent_threshold} or higher when the candidate fulfils the intent of the requirements, even when the exact words differ.

Return JSON:
{
  "match_score": 0.0,
  "recommendation": "string",
  "requires_human": false,
  "confidence": 0.0,
  "reasoning_summary": "string"
}"#;
