//! Paginated script document renderer.
//!
//! Screenplay-style layout on a fixed-width character grid: the scene
//! heading first (upper-cased), then each dialogue entry as a centered
//! all-caps speaker label over word-wrapped, indented body text, with a
//! page break whenever the next block cannot fit, and a sequential page
//! number in the bottom-right corner of every page. Rendering is
//! read-only over the session and deterministic for a given date.

use scenewright_types::session::SceneSession;

/// Content columns per page.
const PAGE_WIDTH: usize = 80;
/// Content lines per page, excluding the page-number line.
const PAGE_HEIGHT: usize = 56;
/// Columns of indent on each side of dialogue body text.
const DIALOGUE_INDENT: usize = 15;

/// The optional statistics footer, purely informational.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportStats {
    pub edit_count: u32,
    pub attribute_adjust_count: u32,
    pub generate_count: u32,
}

/// A rendered, paginated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDocument {
    pages: Vec<String>,
}

impl ScriptDocument {
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The full document, pages separated by form feeds.
    pub fn render(&self) -> String {
        self.pages.join("\u{c}\n")
    }
}

/// Suggested artifact name for a script generated on `date` (ISO date).
pub fn export_filename(date: &str) -> String {
    format!("screenplay-{date}.txt")
}

/// Render `session` into a paginated script document.
///
/// `date` is the embedded generation date (ISO `YYYY-MM-DD`), injected by
/// the caller so repeated renders of unchanged input stay byte-identical.
pub fn render_script(
    session: &SceneSession,
    stats: Option<&ExportStats>,
    date: &str,
) -> ScriptDocument {
    let mut builder = PageBuilder::new();

    builder.push_line(right_align(&format!("Generated {date}"), PAGE_WIDTH));
    builder.push_blank();

    let heading = session.scene.description.trim();
    if !heading.is_empty() {
        for line in wrap(&heading.to_uppercase(), PAGE_WIDTH) {
            builder.push_line(line);
        }
        builder.push_blank();
    }

    let body_width = PAGE_WIDTH - 2 * DIALOGUE_INDENT;
    for entry in &session.scene.dialogue_lines {
        let speaker = session.characters.name_of(entry.character).to_uppercase();
        let body = wrap(&entry.text, body_width);

        // Keep the speaker label attached to at least one body line.
        builder.ensure_room(2.min(1 + body.len()));
        builder.push_line(center(&speaker, PAGE_WIDTH));
        for line in body {
            builder.push_line(format!("{}{}", " ".repeat(DIALOGUE_INDENT), line));
        }
        builder.push_blank();
    }

    if let Some(stats) = stats {
        // Divider, centered header, three stat lines and their spacing.
        builder.ensure_room(7);
        builder.push_blank();
        builder.push_line("-".repeat(PAGE_WIDTH));
        builder.push_line(center("SCRIPT STATISTICS", PAGE_WIDTH));
        builder.push_blank();
        builder.push_line(format!("Total Dialogue Edits: {}", stats.edit_count));
        builder.push_line(format!(
            "Total Character Adjustments: {}",
            stats.attribute_adjust_count
        ));
        builder.push_line(format!(
            "Total Dialogue Generations: {}",
            stats.generate_count
        ));
    }

    ScriptDocument {
        pages: builder.finish(),
    }
}

// ---------------------------------------------------------------------------
// Page assembly
// ---------------------------------------------------------------------------

struct PageBuilder {
    pages: Vec<Vec<String>>,
    current: Vec<String>,
}

impl PageBuilder {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
        }
    }

    fn push_line(&mut self, line: String) {
        if self.current.len() >= PAGE_HEIGHT {
            self.break_page();
        }
        self.current.push(line);
    }

    fn push_blank(&mut self) {
        // A blank at the very top of a page carries no information.
        if !self.current.is_empty() {
            self.push_line(String::new());
        }
    }

    /// Break to a new page if fewer than `lines` content lines remain.
    fn ensure_room(&mut self, lines: usize) {
        let remaining = PAGE_HEIGHT - self.current.len();
        if remaining < lines && !self.current.is_empty() {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
    }

    /// Pad every page to full height, stamp page numbers, and join lines.
    fn finish(mut self) -> Vec<String> {
        self.break_page();
        // The document always has at least one page, even when empty.
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        // Drop a trailing empty page produced by an exact-fit break.
        if self.pages.len() > 1 && self.pages.last().is_some_and(Vec::is_empty) {
            self.pages.pop();
        }

        self.pages
            .into_iter()
            .enumerate()
            .map(|(i, mut lines)| {
                while lines.len() < PAGE_HEIGHT {
                    lines.push(String::new());
                }
                lines.push(right_align(&format!("{}.", i + 1), PAGE_WIDTH));
                lines.join("\n")
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Text layout helpers
// ---------------------------------------------------------------------------

/// Greedy word wrap to `width` columns. Words longer than a full line are
/// split hard.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > width {
            // Hard-split an overlong word at the line boundary.
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_string());
            word = &word[split_at..];
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

fn right_align(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat(width - len), text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenewright_types::character::Character;
    use scenewright_types::scene::{DialogueLine, Scene, Speaker};
    use scenewright_types::session::CharacterPair;

    fn session_with_lines(lines: Vec<DialogueLine>) -> SceneSession {
        let mut scene = Scene::new(
            "Int. Hogwarts - Potions Classroom - Night",
            "A confrontation",
        );
        scene.dialogue_lines = lines;
        SceneSession {
            characters: CharacterPair {
                character1: Character::new("Harry Potter", "A young wizard"),
                character2: Character::new("Severus Snape", "A complex character"),
            },
            scene,
        }
    }

    fn line(speaker: Speaker, text: &str) -> DialogueLine {
        DialogueLine {
            character: speaker,
            text: text.to_string(),
            timestamp: "10:30".to_string(),
        }
    }

    #[test]
    fn test_empty_dialogue_single_page_with_heading() {
        let document = render_script(&session_with_lines(vec![]), None, "2025-03-14");
        assert_eq!(document.page_count(), 1);
        let page = &document.pages()[0];
        assert!(page.contains("INT. HOGWARTS - POTIONS CLASSROOM - NIGHT"));
        assert!(page.contains("Generated 2025-03-14"));
        assert!(page.trim_end().ends_with("1."));
    }

    #[test]
    fn test_speaker_labels_centered_all_caps() {
        let document = render_script(
            &session_with_lines(vec![line(Speaker::Character1, "Hello.")]),
            None,
            "2025-03-14",
        );
        let page = &document.pages()[0];
        let label_line = page
            .lines()
            .find(|l| l.contains("HARRY POTTER"))
            .expect("speaker label missing");
        assert!(label_line.starts_with(' '));
        // Centered: leading space roughly half the leftover width.
        let leading = label_line.len() - label_line.trim_start().len();
        assert!((30..40).contains(&leading), "leading spaces: {leading}");
    }

    #[test]
    fn test_body_wrapped_and_indented() {
        let long_text = "I have spent the entire evening trying to understand what \
                         happened in that corridor, and I will not leave this room \
                         until someone explains it to me properly.";
        let document = render_script(
            &session_with_lines(vec![line(Speaker::Character1, long_text)]),
            None,
            "2025-03-14",
        );
        let page = &document.pages()[0];
        // Body lines carry exactly the dialogue indent; centered labels,
        // the date line, and the page number all indent further.
        let indent = " ".repeat(DIALOGUE_INDENT);
        let body_lines: Vec<&str> = page
            .lines()
            .filter(|l| l.starts_with(&indent) && !l[DIALOGUE_INDENT..].starts_with(' '))
            .collect();
        assert!(body_lines.len() > 1, "long text should wrap");
        for body_line in &body_lines {
            assert!(body_line.len() <= 80);
        }
    }

    #[test]
    fn test_page_breaks_and_sequential_numbers() {
        let lines: Vec<DialogueLine> = (0..60)
            .map(|i| {
                line(
                    if i % 2 == 0 {
                        Speaker::Character1
                    } else {
                        Speaker::Character2
                    },
                    &format!("Exchange number {i} with a little extra length to it."),
                )
            })
            .collect();
        let document = render_script(&session_with_lines(lines), None, "2025-03-14");
        assert!(document.page_count() > 1);
        for (i, page) in document.pages().iter().enumerate() {
            assert!(
                page.trim_end().ends_with(&format!("{}.", i + 1)),
                "page {} number missing",
                i + 1
            );
        }
    }

    #[test]
    fn test_every_page_has_fixed_height() {
        let lines: Vec<DialogueLine> = (0..60)
            .map(|i| line(Speaker::Character1, &format!("Line {i}.")))
            .collect();
        let document = render_script(&session_with_lines(lines), None, "2025-03-14");
        for page in document.pages() {
            // PAGE_HEIGHT content lines plus the page-number line.
            assert_eq!(page.lines().count(), PAGE_HEIGHT + 1);
        }
    }

    #[test]
    fn test_stats_footer_rendered_when_requested() {
        let stats = ExportStats {
            edit_count: 4,
            attribute_adjust_count: 11,
            generate_count: 7,
        };
        let document = render_script(
            &session_with_lines(vec![line(Speaker::Character2, "Fine.")]),
            Some(&stats),
            "2025-03-14",
        );
        let text = document.render();
        assert!(text.contains("SCRIPT STATISTICS"));
        assert!(text.contains("Total Dialogue Edits: 4"));
        assert!(text.contains("Total Character Adjustments: 11"));
        assert!(text.contains("Total Dialogue Generations: 7"));
    }

    #[test]
    fn test_stats_do_not_change_dialogue_content() {
        let session = session_with_lines(vec![line(Speaker::Character1, "Hello.")]);
        let without = render_script(&session, None, "2025-03-14").render();
        let with = render_script(
            &session,
            Some(&ExportStats::default()),
            "2025-03-14",
        )
        .render();
        assert!(with.contains("Hello."));
        assert!(without.contains("Hello."));
        assert!(!without.contains("SCRIPT STATISTICS"));
    }

    #[test]
    fn test_idempotent_for_same_date() {
        let session = session_with_lines(vec![
            line(Speaker::Character1, "Hello there."),
            line(Speaker::Character2, "Go away."),
        ]);
        let first = render_script(&session, None, "2025-03-14");
        let second = render_script(&session, None, "2025-03-14");
        assert_eq!(first.render(), second.render());

        // Only the embedded date differs for a different day.
        let other = render_script(&session, None, "2025-03-15");
        assert_ne!(first.render(), other.render());
    }

    #[test]
    fn test_export_filename_embeds_date() {
        assert_eq!(export_filename("2025-03-14"), "screenplay-2025-03-14.txt");
    }

    #[test]
    fn test_wrap_respects_width() {
        let wrapped = wrap("one two three four five six seven eight nine ten", 12);
        assert!(wrapped.iter().all(|l| l.chars().count() <= 12));
        assert_eq!(wrapped.join(" "), "one two three four five six seven eight nine ten");
    }

    #[test]
    fn test_wrap_hard_splits_overlong_words() {
        let wrapped = wrap("Antidisestablishmentarianism", 10);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|l| l.chars().count() <= 10));
    }
}
