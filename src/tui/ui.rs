use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{FilePrompt, MessageList, TitleBar, UploadPanel};

const UPLOAD_PANEL_HEIGHT: u16 = 3;

/// Screen regions, top to bottom.
pub struct ScreenAreas {
    pub title: Rect,
    pub upload: Rect,
    pub messages: Rect,
    pub input: Rect,
}

pub fn screen_areas(area: Rect, input_height: u16) -> ScreenAreas {
    use Constraint::{Length, Min};
    let [title, upload, messages, input] = Layout::vertical([
        Length(1),
        Length(UPLOAD_PANEL_HEIGHT),
        Min(0),
        Length(input_height),
    ])
    .areas(area);
    ScreenAreas {
        title,
        upload,
        messages,
        input,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let areas = screen_areas(frame.area(), input_height);

    TitleBar::new(app.backend.base_url(), app.health, &app.status_message)
        .render(frame, areas.title);

    UploadPanel::new(&app.upload_status).render(frame, areas.upload);

    MessageList::new(
        &mut tui.message_list,
        app.conversation.messages(),
        app.is_loading,
        spinner_frame,
    )
    .render(frame, areas.messages);

    tui.input_box.render(frame, areas.input);

    // Overlay last so it sits on top and owns the cursor
    if let Some(prompt) = &tui.file_prompt {
        FilePrompt::new(prompt).render(frame, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use crate::tui::components::FilePromptState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_screen_areas_stack() {
        let areas = screen_areas(Rect::new(0, 0, 80, 24), 3);
        assert_eq!(areas.title.height, 1);
        assert_eq!(areas.upload.y, 1);
        assert_eq!(areas.upload.height, UPLOAD_PANEL_HEIGHT);
        assert_eq!(areas.messages.y, 4);
        assert_eq!(areas.input.y, 21);
        assert_eq!(areas.messages.height, 17);
    }

    #[test]
    fn test_initial_screen() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = render(&app, &mut tui);

        assert!(text.contains("FarmCopilot"));
        assert!(text.contains("http://scripted.test"));
        assert!(text.contains("No document uploaded."));
        assert!(text.contains("Hello!"));
        assert!(text.contains("Ask a question about your document..."));
    }

    #[test]
    fn test_loading_screen() {
        let mut app = test_app();
        update(&mut app, Action::Submit("Which crops?".to_string()));
        let mut tui = TuiState::new();
        tui.sync_props(&app);
        let text = render(&app, &mut tui);

        assert!(text.contains("Which crops?"));
        assert!(text.contains("copilot is thinking"));
        assert!(text.contains("Generating answer..."));
    }

    #[test]
    fn test_file_prompt_overlay() {
        let app = test_app();
        let mut tui = TuiState::new();
        tui.file_prompt = Some(FilePromptState::new());
        let text = render(&app, &mut tui);

        assert!(text.contains("Upload PDF"));
    }
}
