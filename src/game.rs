use std::io::{self, Write};
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, Interval, MissedTickBehavior};

use crate::input::Input;
use crate::log;
use crate::state::{GameOver, GameState, StepOutcome};
use crate::term::{FlushStatus, Renderer};

pub const FAREWELL_MESSAGE: &str = "See you soon again :)";

#[derive(Debug, PartialEq, Eq)]
pub enum GameEnd {
    Quit,
    Over(GameOver),
}

impl GameEnd {
    pub fn message(&self) -> String {
        match self {
            GameEnd::Quit => FAREWELL_MESSAGE.to_string(),
            GameEnd::Over(over) => over.message(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Drawn(FlushStatus),
    Over(GameOver),
}

/// Fixed-period timer that can be thrown away and started again.
///
/// Missed ticks are never replayed in a burst; after a restart the first tick
/// is a whole period away.
pub struct Ticker {
    period: Duration,
    interval: Interval,
    restarts: u64,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Ticker { period, interval: Self::fresh_interval(period), restarts: 0 }
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    pub fn restart(&mut self) {
        self.interval = Self::fresh_interval(self.period);
        self.restarts += 1;
    }

    fn fresh_interval(period: Duration) -> Interval {
        let mut interval = time::interval_at(time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }
}

pub struct SnakeGame<W: Write> {
    state: GameState,
    renderer: Renderer<W>,
    tick_interval: Duration,
}

impl<W: Write> SnakeGame<W> {
    pub fn new(state: GameState, renderer: Renderer<W>, tick_interval: Duration) -> Self {
        SnakeGame { state, renderer, tick_interval }
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub fn into_renderer(self) -> Renderer<W> {
        self.renderer
    }

    /// Draws the first screen: border, snake and food.
    pub fn setup(&mut self) -> io::Result<()> {
        self.renderer.prepare()?;
        self.renderer.draw_border()?;
        self.renderer.draw_snake(self.state.snake().body())?;
        self.renderer.draw_food(self.state.food())?;
        self.renderer.flush()?;
        Ok(())
    }

    /// One simulation step followed by redrawing only the snake cells that
    /// changed hands.
    pub fn tick(&mut self) -> io::Result<TickOutcome> {
        let started = Instant::now();
        let old_body: Vec<_> = self.state.snake().body().iter().copied().collect();

        let new_food = match self.state.step() {
            StepOutcome::GameOver(over) => return Ok(TickOutcome::Over(over)),
            StepOutcome::Moved { new_food } => new_food,
        };

        self.renderer.clear_points(&old_body)?;
        if let Some(food) = new_food {
            self.renderer.draw_food(food)?;
        }
        self.renderer.draw_snake(self.state.snake().body())?;

        let status = match self.renderer.flush()? {
            FlushStatus::Drained if started.elapsed() >= self.tick_interval => FlushStatus::Backpressure,
            status => status,
        };

        Ok(TickOutcome::Drawn(status))
    }

    /// Runs until the snake crashes or the player quits. Key input and ticks
    /// are handled one at a time on the calling task, so a turn always lands
    /// between two steps.
    pub async fn run(&mut self, inputs: UnboundedReceiver<Input>) -> io::Result<GameEnd> {
        let mut ticker = Ticker::new(self.tick_interval);
        self.run_with(inputs, &mut ticker).await
    }

    pub async fn run_with(
        &mut self,
        mut inputs: UnboundedReceiver<Input>,
        ticker: &mut Ticker,
    ) -> io::Result<GameEnd> {
        loop {
            tokio::select! {
                input = inputs.recv() => match input {
                    Some(Input::Turn(direction)) => self.state.set_direction(direction),
                    Some(Input::Quit) | None => return Ok(GameEnd::Quit),
                },
                _ = ticker.tick() => match self.tick()? {
                    TickOutcome::Over(over) => {
                        log!("Game over: {:?}, score {}", over.reason, over.score);
                        return Ok(GameEnd::Over(over));
                    }
                    TickOutcome::Drawn(FlushStatus::Backpressure) => {
                        ticker.restart();
                        log!(
                            "Terminal output is backed up, restarted ticker ({:?}, {} so far)",
                            ticker.period(),
                            ticker.restarts()
                        );
                    }
                    TickOutcome::Drawn(FlushStatus::Drained) => {}
                },
            }
        }
    }

    /// Hands the terminal back. The cursor is shown again whatever happened;
    /// the end message is printed only when both the game and leaving raw
    /// mode went fine.
    pub fn finish(mut self, result: io::Result<GameEnd>, raw_mode: io::Result<()>) -> io::Result<()> {
        match (result, raw_mode) {
            (Ok(end), Ok(())) => self.renderer.farewell(&end.message()),
            (Err(err), _) | (Ok(_), Err(err)) => {
                self.renderer.restore()?;
                Err(err)
            }
        }
    }
}
