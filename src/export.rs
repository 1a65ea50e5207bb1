use chrono::Local;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::models::Document;

/// Write the formatted document to a Markdown file in `dir` and return the
/// path. This is the export flow: everything the page shows, including quiz
/// answers, lands in the file.
pub fn export_document(document: &Document, dir: &Path) -> io::Result<PathBuf> {
    let filename = format!(
        "{}-{}.md",
        title_slug(&document.title),
        Local::now().format("%Y%m%d-%H%M%S")
    );
    let path = dir.join(filename);
    let mut file = File::create(&path)?;
    write_page(&mut file, document)?;
    Ok(path)
}

fn title_slug(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }
    if collapsed.is_empty() {
        "untitled".to_string()
    } else {
        collapsed
    }
}

fn write_page(out: &mut impl Write, document: &Document) -> io::Result<()> {
    let title = if document.title.trim().is_empty() {
        "Untitled"
    } else {
        document.title.as_str()
    };
    writeln!(out, "# {}", title)?;
    writeln!(out)?;

    if !document.generated_summary.is_empty() {
        writeln!(out, "> {}", document.generated_summary)?;
        writeln!(out)?;
    }

    if !document.generated_key_points.is_empty() {
        writeln!(out, "## Key Points")?;
        writeln!(out)?;
        for (i, point) in document.generated_key_points.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, point)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", document.content.trim_end())?;

    if !document.generated_quiz.is_empty() {
        writeln!(out)?;
        writeln!(out, "## Self-Check Quiz")?;
        for (i, question) in document.generated_quiz.iter().enumerate() {
            writeln!(out)?;
            writeln!(out, "**{}. {}**", i + 1, question.question)?;
            for (j, option) in question.options.iter().enumerate() {
                let letter = (b'A' + (j as u8 % 26)) as char;
                let marker = if j == question.correct_answer {
                    "[x]"
                } else {
                    "[ ]"
                };
                writeln!(out, "- {} {}) {}", marker, letter, option)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    fn render_to_string(document: &Document) -> String {
        let mut buf = Vec::new();
        write_page(&mut buf, document).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_title_slug() {
        assert_eq!(title_slug("Study Notes: Memory"), "study-notes-memory");
        assert_eq!(title_slug("  "), "untitled");
        assert_eq!(title_slug("--a--b--"), "a-b");
    }

    #[test]
    fn test_export_writes_file_with_slug_name() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document::new("My Notes", "# Body");

        let path = export_document(&document, dir.path()).unwrap();
        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("my-notes-"));
        assert!(name.ends_with(".md"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("# My Notes"));
        assert!(written.contains("# Body"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let document = Document::new("T", "content");
        let page = render_to_string(&document);
        assert!(!page.contains("Key Points"));
        assert!(!page.contains("Self-Check Quiz"));
        assert!(!page.contains(">"));
    }

    #[test]
    fn test_quiz_marks_correct_answer() {
        let document = Document::new("T", "content").with_quiz(vec![Question {
            question: "Pick B".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_answer: 1,
        }]);
        let page = render_to_string(&document);
        assert!(page.contains("- [ ] A) a"));
        assert!(page.contains("- [x] B) b"));
    }

    #[test]
    fn test_summary_and_key_points_precede_body() {
        let document = Document::new("T", "the body")
            .with_summary("short take")
            .with_key_points(vec!["first".to_string(), "second".to_string()]);
        let page = render_to_string(&document);

        let summary_pos = page.find("> short take").unwrap();
        let points_pos = page.find("## Key Points").unwrap();
        let body_pos = page.find("the body").unwrap();
        assert!(summary_pos < points_pos);
        assert!(points_pos < body_pos);
        assert!(page.contains("2. second"));
    }
}
