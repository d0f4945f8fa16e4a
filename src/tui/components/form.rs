//! # DecisionForm Component
//!
//! The "right now" card: current time, energy, mental state, goal and the
//! decide button.
//!
//! Field contents are internal state. Which field has focus and whether a
//! request is in flight are props set by the event loop before each render.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::form::{Energy, FormInput, MentalState};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{TextField, TextFieldEvent};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Styles;

const GOAL_MAX_LINES: u16 = 4;

/// The focusable parts of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Time,
    Energy,
    MentalState,
    Goal,
    Decide,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Decide pressed with the current contents (validation happens in core).
    Submit(FormInput),
    /// Enter on a field; move focus to the next one.
    Advance,
}

/// Clock reading in the form's "7:45 PM" style.
pub fn time_label(now: DateTime<Local>) -> String {
    now.format("%-I:%M %p").to_string()
}

pub struct DecisionForm {
    time: TextField,
    pub energy: Energy,
    pub mental_state: MentalState,
    goal: TextField,
    /// Prop
    pub focus: Option<FormField>,
    /// Prop: a request is in flight
    pub loading: bool,
}

impl Default for DecisionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionForm {
    pub fn new() -> Self {
        Self {
            time: TextField::single_line("Current time", "e.g. 7:45 PM  (F2: now)"),
            energy: Energy::default(),
            mental_state: MentalState::default(),
            goal: TextField::multi_line(
                "Your goal",
                "Clearly state the one thing that matters right now…",
                GOAL_MAX_LINES,
            ),
            focus: None,
            loading: false,
        }
    }

    pub fn to_input(&self) -> FormInput {
        FormInput {
            current_time: self.time.text().to_string(),
            energy: self.energy,
            mental_state: self.mental_state,
            goal: self.goal.text().to_string(),
        }
    }

    pub fn set_time(&mut self, text: &str) {
        self.time.set_text(text);
    }

    #[cfg(test)]
    pub fn set_goal(&mut self, text: &str) {
        self.goal.set_text(text);
    }

    /// Total rendered height for `width`, borders included.
    pub fn calculate_height(&self, width: u16) -> u16 {
        // card border + padding (2 + 2 each side)
        let inner = width.saturating_sub(4);
        2 + self.time.calculate_height(inner) + 1 + 1 + 1 + self.goal.calculate_height(inner) + 1 + 1
    }

    fn radio_line<'a, T: Copy + PartialEq>(
        label: &'a str,
        options: &[T],
        selected: T,
        name: fn(T) -> &'static str,
        focused: bool,
        styles: &Styles,
    ) -> Line<'a> {
        let label_style = if focused {
            styles.heading()
        } else {
            styles.muted()
        };
        let marker = if focused { "› " } else { "  " };
        let mut spans = vec![
            Span::styled(marker, styles.text()),
            Span::styled(format!("{:<14}", label), label_style),
        ];
        for &option in options {
            let (dot, style) = if option == selected {
                ("●", if focused { styles.selected() } else { styles.heading() })
            } else {
                ("○", styles.muted())
            };
            spans.push(Span::styled(format!("{} {}", dot, name(option)), style));
            spans.push(Span::raw("   "));
        }
        Line::from(spans)
    }
}

impl Component for DecisionForm {
    fn render(&mut self, frame: &mut Frame, area: Rect, styles: &Styles) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(styles.unfocused_border())
            .padding(Padding::horizontal(1))
            .title(Span::styled(" Right now ", styles.heading()))
            .style(styles.card());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let time_h = self.time.calculate_height(inner.width);
        let goal_h = self.goal.calculate_height(inner.width);
        let [time_area, energy_area, _, mental_area, goal_area, _, button_area] = Layout::vertical([
            Constraint::Length(time_h),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(goal_h),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.time.focused = self.focus == Some(FormField::Time);
        self.goal.focused = self.focus == Some(FormField::Goal);
        self.time.render(frame, time_area, styles);

        frame.render_widget(
            Paragraph::new(Self::radio_line(
                "Energy level",
                &Energy::ALL,
                self.energy,
                Energy::label,
                self.focus == Some(FormField::Energy),
                styles,
            )),
            energy_area,
        );
        frame.render_widget(
            Paragraph::new(Self::radio_line(
                "Mental state",
                &MentalState::ALL,
                self.mental_state,
                MentalState::label,
                self.focus == Some(FormField::MentalState),
                styles,
            )),
            mental_area,
        );

        self.goal.render(frame, goal_area, styles);

        let (label, style): (&str, Style) = if self.loading {
            ("  Thinking…  ", styles.muted())
        } else if self.focus == Some(FormField::Decide) {
            ("  Make the decision  ", styles.selected())
        } else {
            ("  Make the decision  ", styles.primary_button())
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(label, style))),
            button_area,
        );
    }
}

impl EventHandler for DecisionForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let focus = self.focus?;
        match (focus, event) {
            (FormField::Time, _) => match self.time.handle_event(event) {
                Some(TextFieldEvent::Enter) => Some(FormEvent::Advance),
                _ => None,
            },
            (FormField::Goal, _) => match self.goal.handle_event(event) {
                Some(TextFieldEvent::Enter) => Some(FormEvent::Advance),
                _ => None,
            },
            (FormField::Energy, TuiEvent::CursorLeft) => {
                self.energy = self.energy.prev();
                None
            }
            (FormField::Energy, TuiEvent::CursorRight | TuiEvent::InputChar(' ')) => {
                self.energy = self.energy.next();
                None
            }
            (FormField::MentalState, TuiEvent::CursorLeft) => {
                self.mental_state = self.mental_state.prev();
                None
            }
            (FormField::MentalState, TuiEvent::CursorRight | TuiEvent::InputChar(' ')) => {
                self.mental_state = self.mental_state.next();
                None
            }
            (FormField::Energy | FormField::MentalState, TuiEvent::Submit) => {
                Some(FormEvent::Advance)
            }
            (FormField::Decide, TuiEvent::Submit | TuiEvent::InputChar(' ')) => {
                Some(FormEvent::Submit(self.to_input()))
            }
            _ => None,
        }
    }
}
