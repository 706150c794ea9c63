use std::collections::VecDeque;

use crossterm::event::Event;
use image::RgbImage;
use ratatui::Frame;
use rps_engine::{Command, SessionController};

use crate::{
    command::play::keymap,
    frame::{FrameSource, RegionSampler},
    tui::{App, Runtime},
    ui::widgets::{CameraDisplay, SessionDisplay},
};

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: SessionController,
    frames: Option<Box<dyn FrameSource>>,
    sampler: RegionSampler,
    frame: Option<RgbImage>,
    region: Option<RgbImage>,
    pending: VecDeque<Command>,
    frame_failing: bool,
    ticks: u64,
}

impl PlayApp {
    pub(crate) fn new(
        session: SessionController,
        frames: Option<Box<dyn FrameSource>>,
        sampler: RegionSampler,
    ) -> Self {
        Self {
            session,
            frames,
            sampler,
            frame: None,
            region: None,
            pending: VecDeque::new(),
            frame_failing: false,
            ticks: 0,
        }
    }

    pub(crate) fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Queues the command bound to a key press.
    fn handle_key_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if !key.is_press() {
            return;
        }
        if let Some(command) = keymap::command_for(&key, self.session.phase()) {
            self.pending.push_back(command);
        }
    }

    /// One game step: read a frame, apply at most one command, advance one tick.
    fn step(&mut self) {
        self.capture_frame();
        if let Some(command) = self.pending.pop_front() {
            self.session.handle_command(command, self.region.as_ref());
        }
        self.session.tick(self.region.as_ref());
        self.ticks += 1;
    }

    fn capture_frame(&mut self) {
        let Some(frames) = &mut self.frames else {
            return;
        };
        match frames.next_frame() {
            Ok(frame) => {
                if self.frame_failing {
                    log::info!("frame source recovered");
                    self.frame_failing = false;
                }
                let frame = self.sampler.prepare(frame);
                self.region = self.sampler.region(&frame);
                self.frame = Some(frame);
            }
            Err(e) => {
                // Logged once per outage; the source is retried every tick.
                if !self.frame_failing {
                    log::warn!("no frame available: {e:#}");
                    self.frame_failing = true;
                }
                self.region = None;
            }
        }
    }
}

impl App for PlayApp {
    #[expect(clippy::cast_precision_loss)]
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(self.session.config().tick_rate as f64);
    }

    fn should_exit(&self) -> bool {
        self.session.should_exit()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        self.handle_key_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        let camera = CameraDisplay::new(self.frame.as_ref()).roi(self.sampler.roi);
        let display = SessionDisplay::new(&self.session, camera)
            .key_bindings(keymap::footer(self.session.phase()), keymap::HELP);
        frame.render_widget(display, frame.area());
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.step();
    }
}
