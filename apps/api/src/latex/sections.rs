//! Per-section LaTeX layout for the repeatable resume blocks.
//!
//! Each section renders one entry per list element, joined by `\n` in input
//! order, inside an `itemize` wrapper. An empty list renders to `""` with no
//! wrapper, since LaTeX rejects an `itemize` without items.

use crate::latex::escape::escape_latex;
use crate::models::resume::{
    AdditionalInfoEntry, CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry,
    SkillEntry,
};

pub const LIST_START: &str = "\\begin{itemize}";
pub const LIST_END: &str = "\\end{itemize}";

/// Wraps pre-rendered entries in the list environment, or returns `""` when there are none.
fn wrap_list<T>(entries: &[T], render: impl Fn(&T) -> String) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let body = entries.iter().map(render).collect::<Vec<_>>().join("\n");
    format!("{LIST_START}\n{body}\n{LIST_END}")
}

pub fn experience_block(entries: &[ExperienceEntry]) -> String {
    wrap_list(entries, |e| {
        format!(
            "\\item \\textbf{{{}}} \\hfill {} \\\\\n\\textit{{{}}} \\hfill {} \\\\\n{}",
            escape_latex(&e.position),
            escape_latex(&e.period),
            escape_latex(&e.company),
            escape_latex(&e.location),
            escape_latex(&e.description),
        )
    })
}

pub fn education_block(entries: &[EducationEntry]) -> String {
    wrap_list(entries, |e| {
        format!(
            "\\item \\textbf{{{}}} \\hfill {} \\\\\n\\textit{{{}}} \\hfill {} \\\\\n{}",
            escape_latex(&e.degree),
            escape_latex(&e.period),
            escape_latex(&e.institution),
            escape_latex(&e.location),
            escape_latex(&e.details),
        )
    })
}

pub fn skills_block(entries: &[SkillEntry]) -> String {
    wrap_list(entries, |s| format!("\\item {}", escape_latex(&s.name)))
}

pub fn projects_block(entries: &[ProjectEntry]) -> String {
    wrap_list(entries, |p| {
        format!(
            "\\item \\textbf{{{}}}: {}",
            escape_latex(&p.name),
            escape_latex(&p.description)
        )
    })
}

pub fn certifications_block(entries: &[CertificationEntry]) -> String {
    wrap_list(entries, |c| {
        format!(
            "\\item {} -- {}",
            escape_latex(&c.name),
            escape_latex(&c.issuer)
        )
    })
}

pub fn additional_info_block(entries: &[AdditionalInfoEntry]) -> String {
    wrap_list(entries, |a| {
        format!(
            "\\item \\textbf{{{}}}: {}",
            escape_latex(&a.category),
            escape_latex(&a.description)
        )
    })
}
