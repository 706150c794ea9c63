use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use rps_engine::SessionController;

/// Score and session summary panel.
pub struct ScoreDisplay<'a> {
    session: &'a SessionController,
    style: Style,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ScoreDisplay<'a> {
    pub fn new(session: &'a SessionController, style: Style) -> Self {
        Self {
            session,
            style,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    LabelValue(&'static str, &'static dyn Fn(&SessionController) -> String),
}

const ROWS: &[Row] = &[
    Row::LabelValue("PLAYER:", &|session| {
        session.scores().player_score().to_string()
    }),
    Row::LabelValue("COMPUTER:", &|session| {
        session.scores().computer_score().to_string()
    }),
    Row::LabelValue("HIGH SCORE:", &|session| {
        session.scores().high_score().to_string()
    }),
    Row::Empty,
    Row::LabelValue("DIFFICULTY:", &|session| session.difficulty().to_string()),
    Row::LabelValue("MODEL:", &|session| {
        if session.is_trained() {
            "trained".to_owned()
        } else {
            "untrained".to_owned()
        }
    }),
    Row::LabelValue("SAMPLES:", &|session| {
        session.sample_counts().total().to_string()
    }),
];

impl Widget for ScoreDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, self.style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.session), self.style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
