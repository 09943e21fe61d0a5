//! Composition of the page sections.

use super::builder::{truncate, wrap, DocumentBuilder};
use super::{Document, Line, Span, Tone};
use crate::content::{Content, Stat};
use crate::domain::SectionId;
use crate::features::{ContactForm, FormField, SubmitStatus};

/// Lines taken by the form block in every state.
pub const FORM_HEIGHT: usize = 12;

const MESSAGE_ROWS: usize = 3;
const STAT_CELL_WIDTH: usize = 18;

/// Everything the document depends on besides the pane width.
#[derive(Debug, Clone, Copy)]
pub struct PageState<'a> {
    pub content: &'a Content,
    pub sections: &'a [SectionId],
    pub rotator_text: &'a str,
    pub rotator_transitioning: bool,
    pub form: &'a ContactForm,
    /// Focused field while the form has input focus.
    pub form_focus: Option<FormField>,
    pub year: i32,
}

/// Composes the document for a pane `width` columns wide.
#[must_use]
pub fn compose(state: &PageState<'_>, width: usize) -> Document {
    let _span = tracing::trace_span!("compose", width, sections = state.sections.len()).entered();

    let mut b = DocumentBuilder::new(width);
    for &section in state.sections {
        b.begin_section(section);
        match section {
            SectionId::Home => hero(&mut b, state),
            SectionId::About => about(&mut b, state.content),
            SectionId::Projects => projects(&mut b, state.content),
            SectionId::Contact => contact(&mut b, state),
        }
        b.end_section();
    }
    footer(&mut b, state.content, state.year);
    b.finish()
}

fn badge(b: &mut DocumentBuilder, text: &str) {
    if !text.is_empty() {
        b.centered(vec![Span::new(format!("[ {text} ]"), Tone::Badge)]);
    }
}

fn heading(b: &mut DocumentBuilder, text: &str) {
    if !text.is_empty() {
        b.centered(vec![Span::bold(text, Tone::Heading)]);
    }
}

fn section_header(b: &mut DocumentBuilder, badge_text: &str, heading_text: &str, intro: &str) {
    b.blank();
    badge(b, badge_text);
    heading(b, heading_text);
    b.blank();
    if !intro.is_empty() {
        b.centered_paragraph(intro, Tone::Dim);
        b.blank();
    }
}

fn hero(b: &mut DocumentBuilder, state: &PageState<'_>) {
    let content = state.content;
    b.blanks(2);
    badge(b, &content.badge);
    b.blank();
    b.centered(vec![
        Span::bold("Hi, I'm ", Tone::Heading),
        Span::bold(content.owner.clone(), Tone::Accent),
    ]);
    b.blank();

    // Always exactly one line, whatever the current title.
    let title = truncate(state.rotator_text, b.text_width().saturating_sub(2));
    let title = if state.rotator_transitioning {
        Span::new(title, Tone::Accent)
    } else {
        Span::bold(title, Tone::Accent)
    };
    b.centered(vec![Span::new("» ", Tone::Dim), title]);
    b.blank();

    b.centered_paragraph(&content.tagline, Tone::Dim);
    b.blank();
    b.centered(vec![
        Span::new("[c] Contact Me", Tone::Button),
        Span::new("   ", Tone::Normal),
        Span::new("[/] Search", Tone::Button),
    ]);
    b.blank();
    stats(b, &content.stats);
    b.blank();
    b.centered(vec![Span::new("↓ scroll (j/k)", Tone::Dim)]);
    b.blank();
}

fn stats(b: &mut DocumentBuilder, stats: &[Stat]) {
    let per_row = (b.text_width() / STAT_CELL_WIDTH).clamp(1, stats.len().max(1));
    for row in stats.chunks(per_row) {
        let values = row
            .iter()
            .map(|s| Span::bold(center_in(&s.value, STAT_CELL_WIDTH), Tone::Accent))
            .collect();
        let labels = row
            .iter()
            .map(|s| Span::new(center_in(&truncate(&s.label, STAT_CELL_WIDTH - 1), STAT_CELL_WIDTH), Tone::Dim))
            .collect();
        b.centered(values);
        b.centered(labels);
    }
}

fn center_in(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(len + left);
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

fn about(b: &mut DocumentBuilder, content: &Content) {
    let about = &content.about;
    section_header(b, &about.badge, &about.heading, &about.intro);

    for highlight in &about.highlights {
        b.left(2, vec![Span::new("■ ", Tone::Accent), Span::bold(highlight.title.clone(), Tone::Heading)]);
        b.paragraph_indented(&highlight.description, Tone::Dim, 4);
    }
    if !about.highlights.is_empty() {
        b.blank();
    }

    if !about.journey.is_empty() {
        b.left(0, vec![Span::bold("My Journey", Tone::Heading)]);
        for paragraph in &about.journey {
            b.paragraph(paragraph, Tone::Normal);
            b.blank();
        }
    }

    if !about.skills.is_empty() {
        heading(b, "Skills & Technologies");
        b.blank();
        b.chips(&about.skills, Tone::Tag);
        b.blank();
    }
}

fn projects(b: &mut DocumentBuilder, content: &Content) {
    let projects = &content.projects;
    section_header(b, &projects.badge, &projects.heading, &projects.intro);

    for project in &projects.items {
        b.rule();
        b.left(0, vec![Span::bold(project.title.clone(), Tone::Heading)]);
        b.paragraph(&project.description, Tone::Normal);
        if !project.tags.is_empty() {
            let tags = project.tags.iter().map(|t| format!("#{t}")).collect::<Vec<_>>().join("  ");
            b.paragraph(&tags, Tone::Tag);
        }
        let link = truncate(&project.url, b.text_width().saturating_sub(2));
        b.left(0, vec![Span::new("↗ ", Tone::Link), Span::new(link, Tone::Link)]);
        b.blank();
    }
    b.rule();
    b.centered_paragraph("View More Projects on GitHub  [o]", Tone::Link);
    b.blank();
}

fn contact(b: &mut DocumentBuilder, state: &PageState<'_>) {
    let contact = &state.content.contact;
    section_header(b, &contact.badge, &contact.heading, &contact.intro);

    b.left(0, vec![Span::bold("Let's Talk", Tone::Heading)]);
    if !contact.lead.is_empty() {
        b.paragraph(&contact.lead, Tone::Dim);
    }
    b.blank();
    for (label, value) in [
        ("✉ Email     ", &contact.email),
        ("☎ Phone     ", &contact.phone),
        ("⌖ Location  ", &contact.location),
    ] {
        if !value.is_empty() {
            let value = truncate(value, b.text_width().saturating_sub(12));
            b.left(0, vec![Span::new(label, Tone::Dim), Span::new(value, Tone::Normal)]);
        }
    }
    b.blank();

    let block = form_block(b.width(), state.form, state.form_focus);
    b.fixed_block(block, FORM_HEIGHT);
    b.blank();
}

fn form_block(width: usize, form: &ContactForm, focus: Option<FormField>) -> Vec<Line> {
    let mut b = DocumentBuilder::new(width);
    let text_width = b.text_width();

    if matches!(form.status(), SubmitStatus::Submitted { .. }) {
        b.blanks(2);
        b.centered(vec![Span::bold("✓", Tone::Success)]);
        b.blank();
        b.centered(vec![Span::bold("Message Sent!", Tone::Heading)]);
        b.centered_paragraph("Thank you for reaching out. I'll get back to you soon.", Tone::Dim);
        return b.into_lines();
    }

    let input_width = b.text_width().saturating_sub(2).max(4);
    for field in FormField::ALL {
        let mut label = vec![Span::bold(field.label(), Tone::Heading)];
        if form.invalid_field() == Some(field) {
            let room = text_width.saturating_sub(field.label().len());
            label.push(Span::new(truncate(&format!("  ✗ {}", invalid_hint(field)), room), Tone::Error));
        }
        b.left(0, label);

        let focused = focus == Some(field);
        let rows = if field == FormField::Message { MESSAGE_ROWS } else { 1 };
        for text in input_rows(form.values().get(field), field, focused, input_width, rows) {
            let tone = if focused { Tone::InputFocused } else { Tone::Input };
            b.left(0, vec![Span::new(text, tone)]);
        }
        if field != FormField::Message {
            b.blank();
        }
    }

    let button = if form.is_submitting() {
        Span::new("[ Sending... ]", Tone::Dim)
    } else {
        Span::bold("[ Send Message ➤ ]", Tone::Button)
    };
    b.left(0, vec![button]);

    let hint = if focus.is_some() {
        "Tab next field · Enter send · Esc leave form"
    } else {
        "Press c to write a message"
    };
    b.left(0, vec![Span::new(truncate(hint, text_width), Tone::Dim)]);
    b.into_lines()
}

const fn invalid_hint(field: FormField) -> &'static str {
    match field {
        FormField::Email => "Please enter a valid email address.",
        FormField::Name | FormField::Message => "Please fill out this field.",
    }
}

/// Input box rows: the tail of the wrapped value (or the placeholder), padded
/// to `width` and exactly `rows` high.
fn input_rows(value: &str, field: FormField, focused: bool, width: usize, rows: usize) -> Vec<String> {
    let inner = width.saturating_sub(2);
    let mut lines = if value.is_empty() && !focused {
        vec![field.placeholder().to_string()]
    } else if rows == 1 {
        let chars: Vec<char> = value.chars().collect();
        let keep = inner.saturating_sub(1);
        let start = chars.len().saturating_sub(keep);
        vec![chars[start..].iter().collect()]
    } else {
        wrap(value, inner.saturating_sub(1))
    };
    if lines.is_empty() {
        lines.push(String::new());
    }
    let skip = lines.len().saturating_sub(rows);
    let mut lines: Vec<String> = lines.split_off(skip);
    if focused {
        if let Some(last) = lines.last_mut() {
            last.push('▏');
        }
    }
    lines.resize(rows, String::new());
    lines
        .into_iter()
        .map(|line| {
            let pad = inner.saturating_sub(line.chars().count());
            format!(" {line}{} ", " ".repeat(pad))
        })
        .collect()
}

fn footer(b: &mut DocumentBuilder, content: &Content, year: i32) {
    b.rule();
    b.centered(vec![Span::bold(content.brand.clone(), Tone::Accent)]);
    if !content.footer_tagline.is_empty() {
        b.centered_paragraph(&content.footer_tagline, Tone::Dim);
    }
    let url = truncate(&content.profile_url, b.text_width().saturating_sub(8));
    b.centered(vec![Span::new("GitHub  ", Tone::Dim), Span::new(url, Tone::Link)]);
    b.centered_paragraph(&format!("© {year} {}. All rights reserved.", content.brand), Tone::Dim);
    b.blank();
}
