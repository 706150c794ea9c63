use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::Palette;

/// Keys (alternatives) and what they do.
pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

/// Key bindings, either on one centered line or one binding per line.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
    palette: Palette,
    listed: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>], palette: Palette) -> Self {
        Self {
            bindings,
            palette,
            listed: false,
            block: None,
        }
    }

    /// Renders one binding per line.
    pub fn listed(self) -> Self {
        Self {
            listed: true,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        let lines = if self.listed { self.bindings.len() } else { 1 };
        u16::try_from(lines).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn key_spans(&self, keys: &'a [&'a str]) -> Vec<Span<'a>> {
        let key_style = Style::new().fg(self.palette.accent);
        let separator_style = Style::new().fg(self.palette.muted);
        let mut spans = vec![];
        for (i, key) in keys.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled("/", separator_style));
            }
            spans.push(Span::styled(key, key_style));
        }
        spans
    }
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let description_style = Style::new().fg(self.palette.text);

        if self.listed {
            let width = self
                .bindings
                .iter()
                .map(|(keys, _)| keys.iter().map(|k| k.len() + 1).sum::<usize>())
                .max()
                .unwrap_or(0);
            let lines: Vec<Line> = self
                .bindings
                .iter()
                .map(|&(keys, desc)| {
                    let mut spans = self.key_spans(keys);
                    let used: usize = keys.iter().map(|k| k.len() + 1).sum();
                    spans.push(Span::from(" ".repeat(width - used + 2)));
                    spans.push(Span::styled(desc, description_style));
                    Line::from(spans)
                })
                .collect();
            Text::from(lines).render(area, buf);
            return;
        }

        let mut spans = vec![];
        for (i, &(keys, desc)) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Style::new().fg(self.palette.muted)));
            }
            spans.extend(self.key_spans(keys));
            spans.push(Span::from(" "));
            spans.push(Span::styled(desc, description_style));
        }
        Line::from(spans).centered().render(area, buf);
    }
}
