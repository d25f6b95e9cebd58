//! Line classifier: decides the semantic role of a single resume line.
//!
//! Shared by the optimizer's header normalization and the export layout. The
//! predicates overlap, so `classify_line` evaluates them in a fixed priority order
//! and the first match wins. Rendered output depends on this order; keep it stable.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::normalize::{raw_lines, utf16_len};

/// Semantic role of a non-blank line, listed in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    Name,
    ContactInfo,
    JobTitleHeading,
    SectionHeader,
    CompanyLine,
    PositionLine,
    BulletPoint,
    StandaloneDate,
    SkillsInventoryLine,
    PlainText,
}

/// A document line with its role; `role` is `None` for blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    pub position: usize,
    pub indentation: usize,
    pub text: String,
    pub role: Option<LineRole>,
}

/// Names are only looked for in the first few lines.
const NAME_WINDOW: usize = 5;
const JOB_TITLE_MAX_LEN: usize = 80;
const SECTION_HEADER_MAX_LEN: usize = 60;

const SKILLS_INVENTORY_TERMS: &[&str] = &[
    "HTML", "CSS", "JavaScript", "PHP", "MySQL", "Adobe", "Photoshop", "Illustrator", "InDesign",
    "WordPress", "jQuery", "Bootstrap", "Git", "Python", "Java", "C++", "React", "Vue", "Angular",
    "Node", "Express", "MongoDB", "SQL", "AWS", "Azure", "Google", "Microsoft", "Office", "Excel",
    "PowerPoint", "Word", "Outlook", "Slack", "Trello", "Asana", "Jira", "Figma", "Sketch", "XD",
    "Canva", "GIMP", "Final Cut", "Premiere", "After Effects", "Maya", "Blender", "Unity",
    "Unreal", "Android", "iOS", "Swift", "Kotlin", "Flutter", "React Native", "Docker",
    "Kubernetes", "Jenkins", "Travis", "GitHub", "GitLab", "Bitbucket", "Heroku", "Netlify",
    "Vercel", "DigitalOcean", "Linode", "Vultr", "Cloudflare", "Stripe", "PayPal", "Mailchimp",
    "SendGrid", "Twilio", "Zapier", "IFTTT", "Google Analytics", "Facebook Ads", "Google Ads",
    "SEO", "SEM", "SMM", "Content Marketing", "Email Marketing", "Affiliate Marketing",
    "Influencer Marketing", "Brand Management", "Social Media", "Public Relations",
    "Customer Service", "Sales", "Business Development", "Project Management", "Agile", "Scrum",
    "Kanban", "Lean", "Six Sigma", "PMP", "PRINCE2", "ITIL", "ISO", "GDPR", "HIPAA", "SOX", "PCI",
    "NIST", "OWASP", "CISSP", "CISM", "CISA", "CEH", "OSCP", "SANS", "CompTIA", "Cisco",
    "Microsoft", "Amazon", "Google", "Oracle", "Salesforce", "HubSpot", "Marketo", "Pardot",
    "Eloqua", "MailChimp", "Constant Contact", "AWeber", "GetResponse", "ConvertKit",
    "ActiveCampaign", "Drip", "Infusionsoft", "Ontraport", "ClickFunnels", "Leadpages",
    "Unbounce", "Instapage", "Optimizely", "VWO", "Hotjar", "Crazy Egg", "Google Tag Manager",
    "Google Search Console", "Bing Webmaster Tools", "Yandex Metrica", "Adobe Analytics",
    "Mixpanel", "Amplitude", "Segment", "Intercom", "Drift", "Zendesk", "Freshdesk",
    "Help Scout", "Kayako", "LiveChat", "Olark", "Tawk", "Crisp", "Pure Chat", "Tidio", "Chatra",
    "Smartsupp", "Userlike", "Comm100", "Bold360", "SnapEngage", "Provide Support", "LiveAgent",
    "Help Crunch", "Groove", "Front", "Gorgias", "Re",
];

lazy_static! {
    static ref NAME: Regex =
        Regex::new(r"^[A-Z][a-zA-Z]+ [A-Z][a-zA-Z]+(\s[A-Z][a-zA-Z]+)?$").unwrap();
    static ref CONTACT: Regex = Regex::new(
        r"(?i)(@|\.com|\+[0-9]|^[0-9]{3}[\-\s]?[0-9]{3}[\-\s]?[0-9]{4}|Road|Street|Avenue|Drive|Lane|Boulevard|ON,|CANADA|linkedin\.com)"
    )
    .unwrap();
    static ref HEADING_SHAPE: Regex = Regex::new(r"^[A-Z][A-Z\s&\-]+$").unwrap();
    static ref SECTION_SHAPE: Regex = Regex::new(r"^[A-Z][A-Z\s\-]+$").unwrap();
    static ref SECTION_VOCABULARY: Regex = Regex::new(
        r"PROFESSIONAL|SUMMARY|EXPERIENCE|EDUCATION|SKILLS|COMPETENCIES|AWARDS|TECHNICAL|FUNCTIONAL|CERTIFICATIONS|INTERNSHIPS|EMPLOYMENT|WORK|PROJECTS|ACHIEVEMENTS|QUALIFICATIONS|TRAINING|LANGUAGES|REFERENCES|VOLUNTEER"
    )
    .unwrap();
    // `Â` is how a non-breaking-space separator arrives from some Word exports.
    static ref COMPANY_LEAD: Regex =
        Regex::new(r"^[A-Z][A-Z\s&\-,\.]+(\s–\s|\s-\s|\sÂ\s|\s\|\s)").unwrap();
    static ref COMPANY_SUFFIX: Regex = Regex::new(
        r"(?i)LTD|INC|CORP|LLC|COLLEGE|UNIVERSITY|TECHNOLOGY|MANUFACTURING|SOLUTIONS|SERVICES|GROUP|COMPANY"
    )
    .unwrap();
    static ref PARENTHESIZED_YEAR: Regex = Regex::new(r"\(.*[0-9]{4}.*\)").unwrap();
    static ref ROLE_WORD: Regex = Regex::new(
        r"(?i)coordinator|designer|manager|internship|developer|analyst|specialist|assistant|lead|senior|junior"
    )
    .unwrap();
    static ref YEAR_RANGE: Regex = Regex::new(r"[0-9]{4}\s*-\s*[0-9]{4}").unwrap();
    static ref BULLET_GLYPH: Regex = Regex::new(r"^[•·\-\*\+]\s").unwrap();
    static ref ACTION_VERB: Regex = Regex::new(
        r"^(Designed|Created|Assisted|Led|Managed|Developed|Collaborated|Conducted|Implemented|Coordinated|Executed|Maintained|Optimized|Analyzed|Built|Established|Delivered)"
    )
    .unwrap();
    static ref STANDALONE_DATE: Regex = Regex::new(
        r"^[0-9]{4}\s*-\s*[0-9]{4}$|^[0-9]{1,2}/[0-9]{4}\s*-\s*[0-9]{1,2}/[0-9]{4}$"
    )
    .unwrap();
    static ref SKILLS_INVENTORY: Regex = {
        let alternation = SKILLS_INVENTORY_TERMS
            .iter()
            .map(|term| regex::escape(term))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("^(?:{alternation})")).unwrap()
    };
}

/// Classifies one line. `position` is the zero-based line index in the document and
/// `indentation` the leading-whitespace count of the untrimmed line.
pub fn classify_line(line: &str, position: usize, indentation: usize) -> LineRole {
    let line = line.trim();

    if is_name(line, position) {
        LineRole::Name
    } else if CONTACT.is_match(line) {
        LineRole::ContactInfo
    } else if is_job_title_heading(line) {
        LineRole::JobTitleHeading
    } else if is_section_header(line) {
        LineRole::SectionHeader
    } else if is_company_line(line) {
        LineRole::CompanyLine
    } else if is_position_line(line, indentation) {
        LineRole::PositionLine
    } else if is_bullet_point(line, indentation) {
        LineRole::BulletPoint
    } else if STANDALONE_DATE.is_match(line) {
        LineRole::StandaloneDate
    } else if SKILLS_INVENTORY.is_match(line) {
        LineRole::SkillsInventoryLine
    } else {
        LineRole::PlainText
    }
}

/// Classifies every line of a document, keeping blank lines (with no role) so
/// positions line up with the raw content.
pub fn classify_document(content: &str) -> Vec<ClassifiedLine> {
    raw_lines(content)
        .map(|raw| ClassifiedLine {
            position: raw.position,
            indentation: raw.indentation,
            text: raw.trimmed().to_string(),
            role: (!raw.is_blank()).then(|| classify_line(raw.text, raw.position, raw.indentation)),
        })
        .collect()
}

/// Matches a capitalized two- or three-word personal name.
pub fn looks_like_name(line: &str) -> bool {
    NAME.is_match(line)
}

/// All-caps line made of letters, spaces, `&` and `-`, the shape shared by
/// section headers and job-title headings.
pub fn is_heading_shaped(line: &str) -> bool {
    HEADING_SHAPE.is_match(line.trim())
}

fn is_name(line: &str, position: usize) -> bool {
    position < NAME_WINDOW
        && looks_like_name(line)
        && !line.contains('@')
        && !line.contains('+')
        && !line.contains('.')
}

fn is_job_title_heading(line: &str) -> bool {
    const TITLE_WORDS: &[&str] = &[
        "DESIGNER",
        "COORDINATOR",
        "MANAGER",
        "DEVELOPER",
        "SPECIALIST",
        "ANALYST",
    ];
    HEADING_SHAPE.is_match(line)
        && utf16_len(line) < JOB_TITLE_MAX_LEN
        && TITLE_WORDS.iter().any(|word| line.contains(word))
}

fn is_section_header(line: &str) -> bool {
    SECTION_SHAPE.is_match(line)
        && utf16_len(line) < SECTION_HEADER_MAX_LEN
        && SECTION_VOCABULARY.is_match(line)
}

fn is_company_line(line: &str) -> bool {
    COMPANY_LEAD.is_match(line)
        || COMPANY_SUFFIX.is_match(line)
        || (line.contains(" – ") && line.starts_with(|c: char| c.is_ascii_uppercase()))
}

fn is_position_line(line: &str, indentation: usize) -> bool {
    let has_paren_year = PARENTHESIZED_YEAR.is_match(line);
    (indentation > 0 || has_paren_year)
        && (ROLE_WORD.is_match(line) || has_paren_year || YEAR_RANGE.is_match(line))
}

fn is_bullet_point(line: &str, indentation: usize) -> bool {
    BULLET_GLYPH.is_match(line) || (indentation > 0 && ACTION_VERB.is_match(line))
}
