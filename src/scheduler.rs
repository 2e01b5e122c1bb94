//! Driving a [`Game`] at a fixed tick rate on a background thread
use crate::game::{Direction, Game, GameOver, Snapshot, Tick};
use rand::{rngs::StdRng, Rng};
use std::fmt;
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

type GameOverListener = Box<dyn FnMut(u32, GameOver) + Send>;

/// Runs a game's ticks at a fixed period on a dedicated thread.
///
/// All access to the game goes through a single mutex, so a tick is never
/// observed half-done and two ticks never overlap.  Front ends read the game
/// through [`Scheduler::snapshot()`].
pub struct Scheduler<R = StdRng> {
    shared: Arc<Shared<R>>,
    period: Duration,
    worker: Option<Worker>,
}

impl<R: Rng + Send + 'static> Scheduler<R> {
    /// Wrap `game` in a stopped scheduler ticking at the game's configured
    /// period
    pub fn new(game: Game<R>) -> Self {
        let period = game.rules().tick_period();
        Scheduler {
            shared: Arc::new(Shared {
                game: Mutex::new(game),
                listener: Mutex::new(None),
            }),
            period,
            worker: None,
        }
    }

    /// Start ticking.  Returns `false` without doing anything if already
    /// running.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the ticker thread could not be spawned.
    pub fn start(&mut self) -> io::Result<bool> {
        if self.worker.is_some() {
            return Ok(false);
        }
        let (stop, stopped) = mpsc::channel();
        let shared = Arc::clone(&self.shared);
        let period = self.period;
        let handle = thread::Builder::new()
            .name(String::from("mathsnake-ticker"))
            .spawn(move || shared.run(period, &stopped))?;
        self.worker = Some(Worker { stop, handle });
        log::debug!("Ticker started with period {period:?}");
        Ok(true)
    }

    /// Resume ticking after [`Scheduler::pause()`]; the same as
    /// [`Scheduler::start()`]
    ///
    /// # Errors
    ///
    /// Returns `Err` if the ticker thread could not be spawned.
    pub fn resume(&mut self) -> io::Result<bool> {
        self.start()
    }
}

impl<R> Scheduler<R> {
    /// Stop ticking, waiting for any tick in progress to finish.  The game
    /// itself is left untouched.  Returns `false` if the scheduler was not
    /// running.
    pub fn stop(&mut self) -> bool {
        let Some(Worker { stop, handle }) = self.worker.take() else {
            return false;
        };
        // An error means the thread is already gone, which is what we want.
        let _ = stop.send(());
        if handle.join().is_err() {
            log::error!("Ticker thread panicked");
        }
        log::debug!("Ticker stopped");
        true
    }

    /// Pause the game; the same as [`Scheduler::stop()`]
    pub fn pause(&mut self) -> bool {
        self.stop()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start a new game, whether or not the scheduler is running
    pub fn restart(&self)
    where
        R: Rng,
    {
        self.shared.game().restart();
    }

    /// Request a turn to be applied at the next tick.  Returns `false` if the
    /// request was refused for reversing the snake.
    pub fn set_direction(&self, direction: Direction) -> bool {
        self.shared.game().set_direction(direction)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.game().snapshot()
    }

    /// Register a function to call with the final score & reason whenever a
    /// game ends.  The function runs on the ticker thread without the game
    /// locked, and replaces any previously-registered function.  A function
    /// registered while a listener is running replaces that listener once it
    /// returns.
    pub fn on_game_over<F>(&self, listener: F)
    where
        F: FnMut(u32, GameOver) + Send + 'static,
    {
        *lock(&self.shared.listener) = Some(Box::new(listener));
    }
}

impl<R> Drop for Scheduler<R> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<R> fmt::Debug for Scheduler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

struct Shared<R> {
    game: Mutex<Game<R>>,
    listener: Mutex<Option<GameOverListener>>,
}

impl<R> Shared<R> {
    fn game(&self) -> MutexGuard<'_, Game<R>> {
        lock(&self.game)
    }
}

impl<R: Rng> Shared<R> {
    /// Tick every `period` until a message arrives on `stopped` or its sender
    /// is dropped
    fn run(&self, period: Duration, stopped: &mpsc::Receiver<()>) {
        let mut next_tick = Instant::now() + period;
        loop {
            let wait = next_tick.saturating_duration_since(Instant::now());
            match stopped.recv_timeout(wait) {
                Err(RecvTimeoutError::Timeout) => {
                    self.tick();
                    next_tick += period;
                    let now = Instant::now();
                    if next_tick < now {
                        // Fell behind; skip the missed ticks rather than
                        // running them back to back.
                        next_tick = now + period;
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn tick(&self) {
        let ended = {
            let mut game = self.game();
            match game.tick() {
                Tick::Ended(reason) => Some((game.score(), reason)),
                _ => None,
            }
        };
        if let Some((score, reason)) = ended {
            // Called with the slot unlocked so that the listener may register
            // a replacement for itself
            let taken = lock(&self.listener).take();
            if let Some(mut listener) = taken {
                listener(score, reason);
                let mut slot = lock(&self.listener);
                if slot.is_none() {
                    *slot = Some(listener);
                }
            }
        }
    }
}

struct Worker {
    stop: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

/// Lock a mutex, carrying on if a previous holder panicked.  A game is only
/// ever left mid-tick by a panic inside [`Game::tick()`], which does not
/// happen in practice.
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rules;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn scheduler(tick_period_ms: u64) -> Scheduler<ChaCha12Rng> {
        let rules = Rules {
            tick_period_ms,
            ..Rules::default()
        };
        let game = Game::new_with_rng(rules, ChaCha12Rng::seed_from_u64(RNG_SEED)).unwrap();
        Scheduler::new(game)
    }

    #[test]
    fn start_is_idempotent() {
        let mut sched = scheduler(60_000);
        assert!(!sched.is_running());
        assert!(sched.start().unwrap());
        assert!(sched.is_running());
        assert!(!sched.start().unwrap());
        assert!(!sched.resume().unwrap());
        assert!(sched.pause());
        assert!(!sched.is_running());
        assert!(!sched.stop());
        assert!(sched.resume().unwrap());
        assert!(sched.stop());
    }

    #[test]
    fn nothing_happens_until_started() {
        let sched = scheduler(1);
        let before = sched.snapshot();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(sched.snapshot(), before);
        assert_eq!(before.ticks, 0);
    }

    #[test]
    fn pause_freezes_game() {
        let mut sched = scheduler(5);
        assert!(sched.start().unwrap());
        thread::sleep(Duration::from_millis(40));
        assert!(sched.pause());
        let paused = sched.snapshot();
        assert!(paused.ticks > 0);
        thread::sleep(Duration::from_millis(40));
        assert_eq!(sched.snapshot(), paused);
    }

    #[test]
    fn game_over_is_reported_once() {
        let mut sched = scheduler(1);
        let (sender, receiver) = mpsc::channel();
        sched.on_game_over(move |score, reason| {
            let _ = sender.send((score, reason));
        });
        assert!(sched.start().unwrap());
        // The snake never turns, so it must eventually hit the right-hand wall
        let (score, reason) = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(reason, GameOver::Wall);
        assert!(receiver.recv_timeout(Duration::from_millis(50)).is_err());
        let snapshot = sched.snapshot();
        assert_eq!(snapshot.game_over, Some(GameOver::Wall));
        assert_eq!(snapshot.score, score);
        assert!(sched.stop());
    }

    #[test]
    fn restart_while_running() {
        let mut sched = scheduler(1);
        let (sender, receiver) = mpsc::channel();
        sched.on_game_over(move |_, reason| {
            let _ = sender.send(reason);
        });
        assert!(sched.start().unwrap());
        receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        sched.restart();
        // The new game ends the same way, proving it is being ticked
        assert_eq!(
            receiver.recv_timeout(Duration::from_secs(5)).unwrap(),
            GameOver::Wall
        );
        assert!(sched.stop());
        sched.restart();
        let snapshot = sched.snapshot();
        assert!(!snapshot.is_over());
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.ticks, 0);
    }

    #[test]
    fn listener_can_replace_itself() {
        let sched = scheduler(60_000);
        let shared = Arc::clone(&sched.shared);
        let (sender, receiver) = mpsc::channel();
        let first = sender.clone();
        let inner = Arc::clone(&shared);
        sched.on_game_over(move |_, _| {
            let _ = first.send("first");
            let sender = sender.clone();
            let second: GameOverListener = Box::new(move |_: u32, _: GameOver| {
                let _ = sender.send("second");
            });
            *lock(&inner.listener) = Some(second);
        });
        // The snake never turns, so twenty ticks are plenty to reach the wall
        for _ in 0..20 {
            shared.tick();
        }
        assert_eq!(receiver.try_recv(), Ok("first"));
        sched.restart();
        for _ in 0..20 {
            shared.tick();
        }
        assert_eq!(receiver.try_recv(), Ok("second"));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn steering_from_another_thread() {
        let mut sched = scheduler(2);
        let (sender, receiver) = mpsc::channel();
        sched.on_game_over(move |_, reason| {
            let _ = sender.send(reason);
        });
        assert!(sched.start().unwrap());
        thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..100 {
                    assert!(!sched.set_direction(Direction::Left));
                }
                assert!(sched.set_direction(Direction::Up));
            });
        });
        assert_eq!(
            receiver.recv_timeout(Duration::from_secs(5)).unwrap(),
            GameOver::Wall
        );
        assert!(sched.stop());
        let snapshot = sched.snapshot();
        assert_ne!(snapshot.direction, Direction::Left);
        for (a, b) in snapshot.snake.iter().zip(snapshot.snake.iter().skip(1)) {
            assert_eq!((a.x - b.x).abs() + (a.y - b.y).abs(), 1, "{a} and {b}");
        }
    }

    #[test]
    fn set_direction_rejects_reversal() {
        let sched = scheduler(60_000);
        assert!(!sched.set_direction(Direction::Left));
        assert!(sched.set_direction(Direction::Up));
        assert_eq!(sched.snapshot().direction, Direction::Right);
    }
}
