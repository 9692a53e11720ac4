// Prompt template for the resume rewrite.
// Placeholders: {job_description}, {resume_text}, {output_instruction}

pub const REWRITE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer.

Job description:
{job_description}

Resume text:
{resume_text}

Please rewrite and improve the resume to best match the job description while maintaining honesty and factual accuracy.

FORMAT REQUIREMENTS - Follow this EXACT structure:

1. HEADER SECTION:
- Full Name
- Phone Number | Email Address | LinkedIn Profile | Location
- Professional headline/title

2. PROFESSIONAL SUMMARY:
- 3-4 line compelling summary highlighting key qualifications
- Include relevant years of experience and key skills

3. CORE COMPETENCIES/SKILLS:
- List 8-12 relevant technical and soft skills
- Organize in bullet points or comma-separated format

4. PROFESSIONAL EXPERIENCE:
- List in reverse chronological order
- Company Name, Job Title, Location, Dates
- 3-5 bullet points per role using action verbs
- Quantify achievements with numbers/percentages where possible
- Highlight accomplishments relevant to the target job

5. EDUCATION:
- Degree, Institution, Location, Graduation Date
- Include relevant coursework, honors, or GPA if impressive

6. ADDITIONAL SECTIONS (if applicable):
- Certifications
- Projects
- Awards/Achievements
- Publications
- Languages

OPTIMIZATION GUIDELINES:
- Use keywords from the job description naturally throughout
- Start bullet points with strong action verbs
- Focus on achievements, not just job duties
- Keep it concise but comprehensive (1-2 pages)
- Use consistent formatting and professional language
- Tailor the content to match the specific role requirements

{output_instruction}

Return the complete optimized resume in the specified format."#;
