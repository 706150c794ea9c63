mod command;
mod cue;
mod frame;
mod logging;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
