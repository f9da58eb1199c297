/// Used when the applicant gives no experience summary.
pub const DEFAULT_EXPERIENCE: &str = "Computer Science student seeking internship";

/// Replace `{company}`, `{position}`, `{notes}` and `{experience}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = "Write a professional cover letter for this job application:

Company: {company}
Position: {position}
Job Requirements: {notes}
My Experience: {experience}

Write a concise, professional cover letter (250-300 words).
Make it personal and enthusiastic but professional.";
