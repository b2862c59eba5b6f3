//! Wall-clock sources for the animation loop.
//!
//! Every time-dependent value in the scene is a function of the milliseconds
//! returned by a [`Clock`]. The app uses [`SystemClock`]; tests and headless
//! runs inject a [`ManualClock`] and advance it explicitly.

use std::{cell::Cell, rc::Rc};

pub trait Clock {
    /// Current wall-clock time in milliseconds.
    fn now_millis(&self) -> f64;
}

/// Reads the platform clock (`performance.now()`-style on the web).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> f64 {
        instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    millis: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_millis: f64) -> Self {
        Self {
            millis: Rc::new(Cell::new(start_millis)),
        }
    }

    pub fn set(&self, millis: f64) {
        self.millis.set(millis);
    }

    pub fn advance(&self, millis: f64) {
        self.millis.set(self.millis.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> f64 {
        self.millis.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> f64 {
        (**self).now_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(10.0);
        let observer = clock.clone();
        clock.advance(1000.0);
        assert_eq!(observer.now_millis(), 1010.0);
        observer.set(0.0);
        assert_eq!(clock.now_millis(), 0.0);
    }

    #[test]
    fn system_clock_does_not_go_backwards() {
        let clock = SystemClock;
        let a = clock.now_millis();
        let b = clock.now_millis();
        assert!(b >= a);
    }
}
