//! Splitting a recipe body into prep and execution sections
//!
//! Bodies use `## Prep` / `## Execution` headers. Inside a section, numbered
//! lines are steps, dashed lines are notes and `![alt](src)` lines are images.
//! Any other non-empty line is a paragraph, except lead-in lines ending in `:`.

use log::warn;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static PREP_HEADER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: ## Prep, ## Prep (Mise-en-Place), ## Prep // Mise en Place
    Regex::new(r"(?i)^##\s+prep(?:\s+\(mise-en-place\)|\s*//\s*mise\s+en\s+place)?\s*$").ok()
});

static EXECUTION_HEADER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: ## Execution, ## Execution // Active Cooking
    Regex::new(r"(?i)^##\s+execution(?:\s*//\s*active\s+cooking)?\s*$").ok()
});

static ANY_HEADER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^##\s+").ok());

static STEP: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").ok());

static NOTE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^-\s+").ok());

static IMAGE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^!\[(.*)\]\((.*)\)$").ok());

const DEFAULT_IMAGE_ALT: &str = "Recipe image";

fn is_match(pattern: &Option<Regex>, line: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(line))
}

fn strip_prefix(pattern: &Option<Regex>, line: &str) -> Option<String> {
    let re = pattern.as_ref()?;
    let matched = re.find(line)?;
    Some(line[matched.end()..].to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeImage {
    pub alt: String,
    pub src: String,
}

/// Classified lines of one method section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodSection {
    pub steps: Vec<String>,
    pub notes: Vec<String>,
    pub paragraphs: Vec<String>,
    pub images: Vec<RecipeImage>,
}

impl MethodSection {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
            && self.notes.is_empty()
            && self.paragraphs.is_empty()
            && self.images.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodSections {
    pub prep: MethodSection,
    pub execution: MethodSection,
    /// Neither header was found; the whole body landed in `execution`
    pub used_fallback: bool,
}

impl MethodSections {
    pub fn step_count(&self) -> usize {
        self.prep.steps.len() + self.execution.steps.len()
    }
}

/// Split a body on its prep/execution headers and classify each section
pub fn extract_sections(body: &str) -> MethodSections {
    let lines: Vec<&str> = body.lines().map(str::trim).collect();

    let prep_index = lines.iter().position(|line| is_match(&PREP_HEADER, line));
    let execution_index = lines
        .iter()
        .position(|line| is_match(&EXECUTION_HEADER, line));

    if prep_index.is_none() && execution_index.is_none() {
        warn!("Recipe method is missing prep/execution headings, using the whole body");
        let all: Vec<&str> = lines.into_iter().filter(|line| !line.is_empty()).collect();
        return MethodSections {
            prep: MethodSection::default(),
            execution: parse_section(&all),
            used_fallback: true,
        };
    }

    MethodSections {
        prep: parse_section(&section_lines(&lines, prep_index)),
        execution: parse_section(&section_lines(&lines, execution_index)),
        used_fallback: false,
    }
}

/// Non-empty lines after the header at `start`, up to the next `## ` header
fn section_lines<'a>(lines: &[&'a str], start: Option<usize>) -> Vec<&'a str> {
    let Some(start) = start else {
        return Vec::new();
    };

    lines[start + 1..]
        .iter()
        .take_while(|line| !is_match(&ANY_HEADER, line))
        .filter(|line| !line.is_empty())
        .copied()
        .collect()
}

fn parse_image(line: &str) -> Option<RecipeImage> {
    let captures = IMAGE.as_ref()?.captures(line)?;
    let alt = captures.get(1).map_or("", |m| m.as_str()).trim();
    let src = captures.get(2).map_or("", |m| m.as_str()).trim();

    Some(RecipeImage {
        alt: if alt.is_empty() {
            DEFAULT_IMAGE_ALT.to_string()
        } else {
            alt.to_string()
        },
        src: src.to_string(),
    })
}

/// Classify already-trimmed section lines
pub fn parse_section(lines: &[&str]) -> MethodSection {
    let mut section = MethodSection::default();

    for line in lines {
        if let Some(step) = strip_prefix(&STEP, line) {
            section.steps.push(step);
        } else if let Some(note) = strip_prefix(&NOTE, line) {
            section.notes.push(note);
        } else if let Some(image) = parse_image(line) {
            section.images.push(image);
        } else if !line.is_empty() && !line.ends_with(':') {
            section.paragraphs.push(line.to_string());
        }
    }

    section
}
