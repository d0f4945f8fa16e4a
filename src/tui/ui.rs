//! Screen layout: sidebar on the left, header + form + recommendation on the
//! right, status bar along the bottom.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CardContent, Recommendation, SIDEBAR_WIDTH, Sidebar, StatusBar};
use crate::tui::theme::Styles;

/// Below this width the sidebar is hidden so the form stays usable.
const MIN_WIDTH_FOR_SIDEBAR: u16 = SIDEBAR_WIDTH + 40;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let styles = Styles::for_theme(app.session.theme());
    let area = frame.area();
    frame.render_widget(Block::default().style(styles.page()), area);

    let [body, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    tui.set_sidebar_visible(body.width >= MIN_WIDTH_FOR_SIDEBAR);
    let main_area = if tui.sidebar_visible {
        let [sidebar_area, main_area] = Layout::horizontal([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Min(0),
        ])
        .areas(body);
        let matches = app.session.search(tui.sidebar.query());
        Sidebar::new(
            &mut tui.sidebar,
            app.session.chats(),
            &matches,
            app.session.active_chat(),
            app.session.theme(),
        )
        .render(frame, sidebar_area, &styles);
        main_area
    } else {
        body
    };

    draw_main(frame, main_area, app, tui, spinner_frame, &styles);

    let mut status_bar = StatusBar::new(
        app.provider.name().to_string(),
        app.settings.model_name.clone(),
        app.status_message.clone(),
    );
    status_bar.error = app.error.clone();
    status_bar.render(frame, status_area, &styles);
}

fn draw_main(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    spinner_frame: usize,
    styles: &Styles,
) {
    let block = Block::default().padding(Padding::new(2, 2, 1, 0));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form_height = tui.form.calculate_height(inner.width);
    let [header, _, form_area, _, card_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(form_height),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled("Moment AI", styles.heading())),
            Line::from(Span::styled(
                "A human-like decision engine for the current moment.",
                styles.muted(),
            )),
        ]),
        header,
    );

    tui.form.loading = app.is_loading();
    tui.form.render(frame, form_area, styles);

    let content = card_content(app, spinner_frame);
    Recommendation::new(&mut tui.recommendation, content).render(frame, card_area, styles);
}

/// Spinner while loading, then error, then the active answer.
fn card_content(app: &App, spinner_frame: usize) -> CardContent<'_> {
    if app.is_loading() {
        return CardContent::Loading { spinner_frame };
    }
    if let Some(error) = &app.error {
        return CardContent::Error(error);
    }
    match (app.session.active_chat(), app.session.active_response()) {
        (Some(chat), Some(text)) => CardContent::Answer { chat, text },
        _ => CardContent::Empty,
    }
}
