//! Template Filler — substitutes resume values into a LaTeX template.
//!
//! The template carries a fixed vocabulary of bracketed tokens (`[FULL_NAME]`,
//! `[EXPERIENCE]`, ...). `fill` scans the template once and swaps each known
//! token for its rendered value. Replacement text is never re-scanned, so a
//! summary that happens to contain `[EMAIL]` stays literal and the result does
//! not depend on the order tokens are listed in.
//!
//! Unknown bracketed text (`[10pt]`, `[UK]`) is copied through unchanged.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::latex::escape::escape_latex;
use crate::latex::sections;
use crate::models::resume::ResumeRecord;

static RE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([A-Z][A-Z_]*)\]").unwrap());

/// The placeholder vocabulary shared with template authors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    FullName,
    LastName,
    JobTitle,
    Address,
    City,
    PostalCode,
    Phone,
    Email,
    Portfolio,
    Linkedin,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    AdditionalInfo,
}

impl Placeholder {
    pub const ALL: [Placeholder; 17] = [
        Placeholder::FullName,
        Placeholder::LastName,
        Placeholder::JobTitle,
        Placeholder::Address,
        Placeholder::City,
        Placeholder::PostalCode,
        Placeholder::Phone,
        Placeholder::Email,
        Placeholder::Portfolio,
        Placeholder::Linkedin,
        Placeholder::Summary,
        Placeholder::Experience,
        Placeholder::Education,
        Placeholder::Skills,
        Placeholder::Projects,
        Placeholder::Certifications,
        Placeholder::AdditionalInfo,
    ];

    /// Token name without brackets, e.g. `FULL_NAME`.
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::FullName => "FULL_NAME",
            Placeholder::LastName => "LAST_NAME",
            Placeholder::JobTitle => "JOB_TITLE",
            Placeholder::Address => "ADDRESS",
            Placeholder::City => "CITY",
            Placeholder::PostalCode => "POSTAL_CODE",
            Placeholder::Phone => "PHONE",
            Placeholder::Email => "EMAIL",
            Placeholder::Portfolio => "PORTFOLIO",
            Placeholder::Linkedin => "LINKEDIN",
            Placeholder::Summary => "SUMMARY",
            Placeholder::Experience => "EXPERIENCE",
            Placeholder::Education => "EDUCATION",
            Placeholder::Skills => "SKILLS",
            Placeholder::Projects => "PROJECTS",
            Placeholder::Certifications => "CERTIFICATIONS",
            Placeholder::AdditionalInfo => "ADDITIONAL_INFO",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// The token as it appears in a template, e.g. `[FULL_NAME]`.
    #[cfg(test)]
    pub fn token(self) -> String {
        format!("[{}]", self.name())
    }

    /// Renders this placeholder's value for `record`. Scalars are escaped,
    /// sections go through their layout rule.
    pub fn render(self, record: &ResumeRecord) -> String {
        match self {
            Placeholder::FullName => escape_latex(&record.full_name),
            Placeholder::LastName => escape_latex(&record.last_name),
            Placeholder::JobTitle => escape_latex(&record.job_title),
            Placeholder::Address => escape_latex(&record.address),
            Placeholder::City => escape_latex(&record.city),
            Placeholder::PostalCode => escape_latex(&record.postal_code),
            Placeholder::Phone => escape_latex(&record.phone),
            Placeholder::Email => escape_latex(&record.email),
            Placeholder::Portfolio => escape_latex(&record.portfolio),
            Placeholder::Linkedin => escape_latex(&record.linkedin),
            Placeholder::Summary => escape_latex(&record.summary),
            Placeholder::Experience => sections::experience_block(&record.experience),
            Placeholder::Education => sections::education_block(&record.education),
            Placeholder::Skills => sections::skills_block(&record.skills),
            Placeholder::Projects => sections::projects_block(&record.projects),
            Placeholder::Certifications => sections::certifications_block(&record.certifications),
            Placeholder::AdditionalInfo => {
                sections::additional_info_block(&record.additional_info)
            }
        }
    }
}

/// Fills `template` with the values of `record`.
///
/// Total: tokens missing from the template are simply never substituted, and
/// empty fields render as the empty string.
pub fn fill(template: &str, record: &ResumeRecord) -> String {
    let filled = RE_TOKEN.replace_all(template, |caps: &Captures| {
        match Placeholder::from_name(&caps[1]) {
            Some(placeholder) => placeholder.render(record),
            None => caps[0].to_string(),
        }
    });

    filled.into_owned()
}
