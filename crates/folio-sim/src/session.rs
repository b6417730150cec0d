//! Plays a fixture's commands against a reading engine

use std::sync::Arc;

use anyhow::Result;
use folio_core::{ReadingEngine, ReadingPosition};
use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use crate::fixture::{Command, Fixture};
use crate::surface::SimSurface;

/// How published positions are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Run every command and return one line per published position
pub fn run(fixture: &Fixture, format: OutputFormat) -> Result<Vec<String>> {
    let viewport = Arc::new(RwLock::new(fixture.viewport));
    let surface = SimSurface::from_fixture(fixture, viewport.clone());
    let engine = ReadingEngine::new(fixture.summaries(), surface, fixture.settings.clone())?;

    let lines = Arc::new(Mutex::new(vec![render(&engine.state(), format)?]));
    let sink = lines.clone();
    engine.set_on_change(Some(Arc::new(move |position: &ReadingPosition| {
        match render(position, format) {
            Ok(line) => sink.lock().push(line),
            Err(err) => warn!(error = %err, "could not format position"),
        }
    })));

    for (step, command) in fixture.commands.iter().enumerate() {
        let moved = match command {
            Command::Next => engine.next_page(),
            Command::Prev => engine.prev_page(),
            Command::Page { page } => engine.go_to_page(*page),
            Command::Start => engine.go_to_start(),
            Command::End => engine.go_to_end(),
            Command::Forward => engine.turn_forward()?,
            Command::Backward => engine.turn_backward()?,
            Command::NextChapter => engine.go_to_next_chapter()?,
            Command::PrevChapter => engine.go_to_prev_chapter()?,
            Command::Chapter { index } => engine.go_to_chapter(*index)?,
            Command::ChapterId { id } => engine.go_to_chapter_id(id)?,
            Command::Resize { width, height } => {
                {
                    let mut viewport = viewport.write();
                    viewport.width = *width;
                    viewport.height = *height;
                }
                engine.relayout()?
            }
            Command::Settings(patch) => engine.update_settings(patch)?,
        };
        if !moved {
            info!(step, ?command, "command left the position unchanged");
        }
    }

    let lines = lines.lock().clone();
    Ok(lines)
}

fn render(position: &ReadingPosition, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string(position)?,
        OutputFormat::Text => format!(
            "Chapter {}/{} ({}) | Page {}/{} | Overall: {:.1}%",
            position.chapter_index + 1,
            position.total_chapters,
            position.chapter_id,
            position.page.current_page + 1,
            position.page.total_pages,
            position.overall_progress * 100.0,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(commands: &str) -> Fixture {
        let raw = format!(
            r#"{{
                "viewport": {{ "width": 400, "height": 600 }},
                "chapters": [
                    {{ "id": "intro", "title": "Intro", "order": 0, "content_width": 800 }},
                    {{ "id": "body", "title": "Body", "order": 1, "content_width": 1600 }}
                ],
                "commands": {commands}
            }}"#
        );
        Fixture::parse(&raw).unwrap()
    }

    #[test]
    fn test_initial_line_only() {
        let lines = run(&fixture("[]"), OutputFormat::Text).unwrap();
        assert_eq!(lines, vec!["Chapter 1/2 (intro) | Page 1/2 | Overall: 0.0%"]);
    }

    #[test]
    fn test_walk_into_next_chapter() {
        let lines = run(
            &fixture(r#"[{ "op": "forward" }, { "op": "forward" }, { "op": "end" }, { "op": "next" }]"#),
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(
            lines,
            vec![
                "Chapter 1/2 (intro) | Page 1/2 | Overall: 0.0%",
                "Chapter 1/2 (intro) | Page 2/2 | Overall: 50.0%",
                "Chapter 2/2 (body) | Page 1/4 | Overall: 50.0%",
                "Chapter 2/2 (body) | Page 4/4 | Overall: 100.0%",
            ]
        );
    }

    #[test]
    fn test_resize_repaginates() {
        let lines = run(
            &fixture(r#"[{ "op": "chapter", "index": 1 }, { "op": "resize", "width": 840, "height": 600 }]"#),
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(lines.last().unwrap(), "Chapter 2/2 (body) | Page 1/2 | Overall: 50.0%");
    }

    #[test]
    fn test_json_output() {
        let lines = run(&fixture(r#"[{ "op": "page", "page": 1 }]"#), OutputFormat::Json).unwrap();
        assert_eq!(lines.len(), 2);
        let position: ReadingPosition = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(position.page.current_page, 1);
        assert!(position.page.is_last_page);
    }

    #[test]
    fn test_bad_margin_surfaces_error() {
        let result = run(
            &fixture(r#"[{ "op": "settings", "margin": 500 }]"#),
            OutputFormat::Text,
        );
        assert!(result.is_err());
    }
}
