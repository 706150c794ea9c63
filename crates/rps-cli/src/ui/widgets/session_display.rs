use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Gauge, Padding, Paragraph, Widget},
};
use rps_engine::{Move, RoundOutcome, SessionController, SessionPhase};

use crate::ui::widgets::{CameraDisplay, KeyBinding, KeyBindingDisplay, Palette, ScoreDisplay};

const SIDE_PANEL_WIDTH: u16 = 28;

/// The whole game screen.
///
/// Camera preview on the left, scores and round details on the right, and
/// the status and key hints at the bottom. Phase-specific overlays (countdown
/// gauge, result banner, pause summary, help) are drawn on top.
pub struct SessionDisplay<'a> {
    session: &'a SessionController,
    camera: CameraDisplay<'a>,
    footer: &'a [KeyBinding<'a>],
    help: &'a [KeyBinding<'a>],
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a SessionController, camera: CameraDisplay<'a>) -> Self {
        Self {
            session,
            camera,
            footer: &[],
            help: &[],
        }
    }

    pub fn key_bindings(self, footer: &'a [KeyBinding<'a>], help: &'a [KeyBinding<'a>]) -> Self {
        Self {
            footer,
            help,
            ..self
        }
    }
}

fn outcome_color(palette: &Palette, outcome: RoundOutcome) -> Color {
    match outcome {
        RoundOutcome::PlayerWins => palette.win,
        RoundOutcome::ComputerWins => palette.lose,
        RoundOutcome::Draw => palette.draw,
    }
}

fn move_name(m: Option<Move>) -> String {
    m.map_or_else(|| "?".to_owned(), |m| m.to_string())
}

fn render_popup<W>(area: Rect, width: u16, height: u16, block: Block, content: W, buf: &mut Buffer)
where
    W: Widget,
{
    let popup = area.centered(
        Constraint::Length(width.min(area.width)),
        Constraint::Length(height.min(area.height)),
    );
    Clear.render(popup, buf);
    let inner = block.inner(popup);
    block.render(popup, buf);
    content.render(inner, buf);
}

impl SessionDisplay<'_> {
    fn border_color(&self, palette: &Palette) -> Color {
        match self.session.phase() {
            SessionPhase::Waiting => palette.text,
            SessionPhase::Training | SessionPhase::Countdown => palette.accent,
            SessionPhase::Resolving | SessionPhase::Result => self
                .session
                .last_round()
                .map_or(palette.text, |round| outcome_color(palette, round.outcome)),
            SessionPhase::Paused => palette.muted,
        }
    }

    fn round_lines(&self, palette: &Palette) -> Vec<Line<'static>> {
        let session = self.session;
        let accent = Style::new().fg(palette.accent);
        match session.phase() {
            SessionPhase::Waiting if session.is_trained() => vec![
                Line::from("Show your hand in the box"),
                Line::from(""),
                Line::styled(
                    format!("Detected: {}", move_name(session.live_prediction())),
                    accent,
                ),
            ],
            SessionPhase::Waiting => vec![
                Line::from("Press R, P or S to play"),
                Line::from("Press T to train gestures"),
            ],
            SessionPhase::Training => {
                let counts = session.sample_counts();
                let mut lines = vec![
                    Line::styled("TRAINING MODE", accent.add_modifier(Modifier::BOLD)),
                    Line::from(""),
                ];
                lines.extend(
                    Move::ALL
                        .into_iter()
                        .enumerate()
                        .map(|(i, m)| Line::from(format!("{}:{m:<9}{:>5}", i + 1, counts[m]))),
                );
                lines
            }
            SessionPhase::Countdown => vec![Line::styled(
                format!("You: {}", move_name(session.player_choice())),
                accent,
            )],
            SessionPhase::Resolving | SessionPhase::Result => match session.last_round() {
                Some(round) => vec![
                    Line::from(format!("You:      {}", round.player)),
                    Line::from(format!("Computer: {}", round.computer)),
                    Line::from(""),
                    Line::styled(
                        round.outcome.to_string(),
                        Style::new()
                            .fg(outcome_color(palette, round.outcome))
                            .add_modifier(Modifier::BOLD),
                    ),
                ],
                None => vec![],
            },
            SessionPhase::Paused => vec![Line::styled("PAUSED", accent)],
        }
    }

    fn pause_summary(&self) -> Text<'static> {
        let scores = self.session.scores();
        let mut lines = vec![
            Line::from(format!("Wins:       {:>5}", scores.total_wins())),
            Line::from(format!("Losses:     {:>5}", scores.total_losses())),
            Line::from(format!("High score: {:>5}", scores.high_score())),
            Line::from(""),
            Line::from("Leaderboard"),
        ];
        if scores.leaderboard().is_empty() {
            lines.push(Line::from("  (no rounds yet)"));
        }
        for (rank, entry) in scores.leaderboard().iter().enumerate() {
            let time = entry.time.with_timezone(&Local).format("%Y-%m-%d %H:%M");
            lines.push(Line::from(format!("{:>2}. {:>4}  {time}", rank + 1, entry.score)));
        }
        Text::from(lines)
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let session = self.session;
        let palette = Palette::of(session.theme());
        let style = palette.base();
        let border_color = self.border_color(&palette);
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(Style::new().fg(border_color))
                .style(style)
        };

        Block::new().style(style).render(area, buf);

        let [main_area, status_area, footer_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let [camera_area, side_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(SIDE_PANEL_WIDTH)])
                .spacing(1)
                .areas(main_area);

        let score_panel = ScoreDisplay::new(session, style).block(panel("SCORE"));
        let [score_area, round_area] =
            Layout::vertical([Constraint::Length(score_panel.height()), Constraint::Fill(1)])
                .areas(side_area);
        score_panel.render(score_area, buf);
        Paragraph::new(self.round_lines(&palette))
            .style(style)
            .block(panel("ROUND"))
            .render(round_area, buf);

        let pause_text = session.phase().is_paused().then(|| self.pause_summary());
        let camera_block = panel("CAMERA");
        let camera_inner = camera_block.inner(camera_area);
        self.camera
            .roi_color(palette.roi)
            .block(camera_block)
            .render(camera_area, buf);

        Line::styled(session.status().to_owned(), style).render(status_area, buf);
        KeyBindingDisplay::new(self.footer, palette).render(footer_area, buf);

        match session.phase() {
            SessionPhase::Countdown => {
                if let (Some(progress), Some(remaining)) =
                    (session.countdown_progress(), session.countdown_remaining())
                {
                    let [_, gauge_area] =
                        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                            .areas(camera_inner);
                    Gauge::default()
                        .gauge_style(Style::new().fg(palette.accent).bg(palette.background))
                        .ratio(progress)
                        .label(format!("{:.1}s", remaining.as_secs_f64()))
                        .render(gauge_area, buf);
                }
            }
            SessionPhase::Result => {
                if let Some(round) = session.last_round() {
                    let banner_style = Style::new()
                        .fg(palette.background)
                        .bg(outcome_color(&palette, round.outcome))
                        .add_modifier(Modifier::BOLD);
                    let text = Text::from(vec![
                        Line::from(round.outcome.to_string()),
                        Line::from(format!("{} vs {}", round.player, round.computer)),
                    ])
                    .centered();
                    render_popup(
                        camera_inner,
                        30,
                        4,
                        Block::new().style(banner_style).padding(Padding::vertical(1)),
                        text,
                        buf,
                    );
                }
            }
            SessionPhase::Paused => {
                let text = pause_text.unwrap_or_default();
                let height = u16::try_from(text.height()).unwrap_or(u16::MAX) + 2;
                render_popup(
                    main_area,
                    36,
                    height,
                    Block::bordered()
                        .title(Line::from("PAUSED").centered())
                        .padding(Padding::horizontal(1))
                        .border_style(Style::new().fg(palette.accent))
                        .style(style),
                    text,
                    buf,
                );
            }
            SessionPhase::Waiting | SessionPhase::Training | SessionPhase::Resolving => {}
        }

        if session.is_help_visible() {
            let help = KeyBindingDisplay::new(self.help, palette)
                .listed()
                .block(
                    Block::bordered()
                        .title(Line::from("HELP").centered())
                        .padding(Padding::horizontal(1))
                        .border_style(Style::new().fg(palette.accent))
                        .style(style),
                );
            let height = help.height();
            let popup = main_area.centered(
                Constraint::Length(56.min(main_area.width)),
                Constraint::Length(height.min(main_area.height)),
            );
            Clear.render(popup, buf);
            help.render(popup, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use image::RgbImage;
    use rps_classifier::GestureClassifier;
    use rps_engine::{
        Command, NullCueSink, OpponentPolicy, ScoreRecord, ScoreStore, SessionConfig,
        persist::PersistError,
    };

    use super::*;

    const FOOTER: &[KeyBinding<'static>] = &[(&["Q"], "Quit")];
    const HELP: &[KeyBinding<'static>] = &[(&["H"], "Help")];

    #[derive(Debug)]
    struct MemoryStore;

    impl ScoreStore for MemoryStore {
        fn load(&mut self) -> Result<ScoreRecord, PersistError> {
            Ok(ScoreRecord::new())
        }

        fn save(&mut self, _record: &ScoreRecord) -> Result<(), PersistError> {
            Ok(())
        }
    }

    fn session() -> SessionController {
        SessionController::new(
            SessionConfig::default(),
            Box::new(GestureClassifier::new()),
            Box::new(MemoryStore),
            Box::new(NullCueSink),
        )
        .with_policy(OpponentPolicy::with_seed(1))
    }

    fn render(session: &SessionController) -> String {
        let area = Rect::new(0, 0, 90, 30);
        let mut buf = Buffer::empty(area);
        let frame = RgbImage::new(64, 48);
        SessionDisplay::new(session, CameraDisplay::new(Some(&frame)))
            .key_bindings(FOOTER, HELP)
            .render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_waiting_screen() {
        let screen = render(&session());
        assert!(screen.contains("SCORE"));
        assert!(screen.contains("DIFFICULTY:"));
        assert!(screen.contains("Press R, P or S to play"));
        assert!(screen.contains("Quit"));
    }

    #[test]
    fn test_result_banner() {
        let mut session = session();
        session.handle_command(Command::ManualMove(Move::Rock), None);
        let ticks = session.config().duration_to_ticks(session.config().countdown);
        for _ in 0..ticks {
            session.tick(None);
        }
        let outcome = session.last_round().unwrap().outcome.to_string();
        assert!(render(&session).contains(&outcome));
    }

    #[test]
    fn test_pause_and_help_overlays() {
        let mut session = session();
        session.handle_command(Command::TogglePause, None);
        let screen = render(&session);
        assert!(screen.contains("Leaderboard"));
        assert!(screen.contains("(no rounds yet)"));

        session.handle_command(Command::ShowHelp, None);
        assert!(render(&session).contains("HELP"));
    }

    #[test]
    fn test_pause_summary_lists_leaderboard() {
        let mut session = session();
        session.handle_command(Command::ManualMove(Move::Paper), None);
        let ticks = session.config().duration_to_ticks(session.config().countdown);
        for _ in 0..ticks {
            session.tick(None);
        }
        session.handle_command(Command::TogglePause, None);
        assert_eq!(session.phase(), SessionPhase::Paused);

        let screen = render(&session);
        assert!(screen.contains("Wins:"));
        assert!(screen.contains("High score:"));
        assert!(screen.contains(" 1. "));
        assert!(!screen.contains("(no rounds yet)"));
    }

    #[test]
    fn test_training_counts() {
        let mut session = session();
        session.handle_command(Command::ToggleTraining, None);
        let screen = render(&session);
        assert!(screen.contains("TRAINING MODE"));
        assert!(screen.contains("3:Scissors"));
    }
}
