//! Terminal front end
mod command;
mod consts;
mod view;
use self::command::Command;
use self::view::View;
use crossterm::event::{self, Event};
use mathsnake::{Direction, GameOver, HighScores, Scheduler};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

#[derive(Debug)]
pub(crate) struct App {
    scheduler: Scheduler,
    grid_size: u16,
    high_scores: HighScores,
    high_scores_file: Option<PathBuf>,
    game_overs: Receiver<(u32, GameOver)>,
    paused: bool,
    new_best: bool,
    quitting: bool,
}

impl App {
    pub(crate) fn new(
        scheduler: Scheduler,
        high_scores: HighScores,
        high_scores_file: Option<PathBuf>,
    ) -> App {
        let (sender, game_overs) = mpsc::channel();
        scheduler.on_game_over(move |score, reason| {
            // The receiver only goes away once the app is shutting down.
            let _ = sender.send((score, reason));
        });
        let grid_size = scheduler.snapshot().grid_size;
        App {
            scheduler,
            grid_size,
            high_scores,
            high_scores_file,
            game_overs,
            paused: false,
            new_best: false,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        self.scheduler.start()?;
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
            self.collect_game_overs();
        }
        self.scheduler.stop();
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let snapshot = self.scheduler.snapshot();
        let view = View {
            snapshot: &snapshot,
            paused: self.paused,
            best: self.high_scores.get(self.grid_size),
            new_best: self.new_best,
        };
        terminal.draw(|frame| frame.render_widget(view, frame.area()))?;
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        if !event::poll(consts::FRAME_PERIOD)? {
            return Ok(());
        }
        let ev = event::read()?;
        if ev == Event::FocusLost {
            self.pause();
            return Ok(());
        }
        let Some(cmd) = ev.as_key_press_event().and_then(Command::from_key_event) else {
            return Ok(());
        };
        match cmd {
            Command::Quit => self.quitting = true,
            Command::Up => self.steer(Direction::Up),
            Command::Down => self.steer(Direction::Down),
            Command::Left => self.steer(Direction::Left),
            Command::Right => self.steer(Direction::Right),
            Command::Pause => {
                if self.paused {
                    self.resume()?;
                } else {
                    self.pause();
                }
            }
            Command::Restart => {
                self.scheduler.restart();
                self.new_best = false;
                self.resume()?;
            }
        }
        Ok(())
    }

    fn steer(&self, direction: Direction) {
        if !self.paused && !self.scheduler.set_direction(direction) {
            log::trace!("Ignoring attempt to reverse into {direction:?}");
        }
    }

    fn pause(&mut self) {
        if !self.paused && !self.scheduler.snapshot().is_over() {
            self.scheduler.pause();
            self.paused = true;
        }
    }

    fn resume(&mut self) -> io::Result<()> {
        self.scheduler.resume()?;
        self.paused = false;
        Ok(())
    }

    fn collect_game_overs(&mut self) {
        while let Ok((score, reason)) = self.game_overs.try_recv() {
            log::info!("Game over ({reason:?}) with score {score}");
            self.new_best = self.high_scores.record(self.grid_size, score);
            if self.new_best {
                log::info!("New high score for grid size {}", self.grid_size);
                self.save_high_scores();
            }
        }
    }

    fn save_high_scores(&self) {
        let Some(path) = self.high_scores_file.as_deref() else {
            log::warn!("No location available for saving high scores");
            return;
        };
        if let Err(e) = self.high_scores.save(path) {
            log::error!("{:?}", anyhow::Error::from(e));
        }
    }
}
