//! Table-driven finite-state machines.
//!
//! Each animated entity carries its current state (one value of a closed
//! enumeration) and shares a [`StateTable`] holding one step handler per
//! state. A tick runs exactly the handler of the current state; the state it
//! returns takes effect on the next tick.

use std::fmt;
use thiserror::Error;

/// A closed enumeration of states usable as a table index.
pub trait StateId: Copy + Eq + fmt::Debug + 'static {
    /// Every state, in index order.
    const ALL: &'static [Self];

    /// Dense index in `0..ALL.len()`.
    fn index(self) -> usize;
}

/// An entity driven by a state table.
pub trait Stateful {
    type State: StateId;

    fn state(&self) -> Self::State;
    fn set_state(&mut self, state: Self::State);
}

/// One-step handler: mutate the entity, optionally name the next state.
pub type Handler<E, C> = fn(&mut E, &C) -> Option<<E as Stateful>::State>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateTableError {
    #[error("no handler registered for state {0}")]
    Missing(String),
    #[error("state {0} registered more than once")]
    Duplicate(String),
    #[error("state {state} reports index {index} outside 0..{count}")]
    IndexOutOfRange {
        state: String,
        index: usize,
        count: usize,
    },
}

/// Handlers indexed by state.
pub struct StateTable<E: Stateful, C: ?Sized> {
    handlers: Box<[Handler<E, C>]>,
}

impl<E: Stateful, C: ?Sized> StateTable<E, C> {
    /// Build a table; every state of the enumeration must appear exactly once.
    pub fn new(entries: &[(E::State, Handler<E, C>)]) -> Result<Self, StateTableError> {
        let count = E::State::ALL.len();
        let mut slots: Vec<Option<Handler<E, C>>> = vec![None; count];

        for &(state, handler) in entries {
            let index = state.index();
            let slot = slots.get_mut(index).ok_or_else(|| StateTableError::IndexOutOfRange {
                state: format!("{state:?}"),
                index,
                count,
            })?;
            if slot.is_some() {
                return Err(StateTableError::Duplicate(format!("{state:?}")));
            }
            *slot = Some(handler);
        }

        let mut handlers = Vec::with_capacity(count);
        for &state in E::State::ALL {
            match slots.get(state.index()).copied().flatten() {
                Some(handler) => handlers.push(handler),
                None => return Err(StateTableError::Missing(format!("{state:?}"))),
            }
        }

        Ok(Self {
            handlers: handlers.into_boxed_slice(),
        })
    }

    /// Run the current state's handler once. Returns the state it moved to, if any.
    pub fn step(&self, entity: &mut E, ctx: &C) -> Option<E::State> {
        let current = entity.state();
        let Some(handler) = self.handlers.get(current.index()) else {
            log::error!("state {:?} has no handler slot", current);
            return None;
        };

        let next = handler(entity, ctx);
        if let Some(next) = next {
            if next != current {
                log::debug!("{} {:?} -> {:?}", std::any::type_name::<E>(), current, next);
            }
            entity.set_state(next);
        }
        next
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E: Stateful, C: ?Sized> fmt::Debug for StateTable<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTable")
            .field("states", &E::State::ALL)
            .finish()
    }
}

/// Values within this distance of a ramp's limit snap onto it.
pub const RAMP_SNAP: f32 = 1e-5;

/// Move `value` toward `target` by at most `step` (a positive amount).
///
/// The result snaps to `target` once it lands within [`RAMP_SNAP`], so a
/// handler can test `value == target` to know the ramp finished.
pub fn ramp(value: f32, target: f32, step: f32) -> f32 {
    let next = if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    };
    if (target - next).abs() <= RAMP_SNAP {
        target
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Yellow,
    }

    impl StateId for Light {
        const ALL: &'static [Self] = &[Light::Red, Light::Green, Light::Yellow];

        fn index(self) -> usize {
            self as usize
        }
    }

    struct Signal {
        state: Light,
        ticks_in_state: u32,
        visits: Vec<Light>,
    }

    impl Stateful for Signal {
        type State = Light;

        fn state(&self) -> Light {
            self.state
        }

        fn set_state(&mut self, state: Light) {
            self.state = state;
            self.ticks_in_state = 0;
        }
    }

    fn hold(signal: &mut Signal, limit: &u32, next: Light) -> Option<Light> {
        signal.visits.push(signal.state);
        signal.ticks_in_state += 1;
        (signal.ticks_in_state >= *limit).then_some(next)
    }

    fn red(s: &mut Signal, limit: &u32) -> Option<Light> {
        hold(s, limit, Light::Green)
    }

    fn green(s: &mut Signal, limit: &u32) -> Option<Light> {
        hold(s, limit, Light::Yellow)
    }

    fn yellow(s: &mut Signal, _: &u32) -> Option<Light> {
        s.visits.push(Light::Yellow);
        None
    }

    fn signal() -> Signal {
        Signal {
            state: Light::Red,
            ticks_in_state: 0,
            visits: Vec::new(),
        }
    }

    #[test]
    fn one_handler_per_tick() {
        let table = StateTable::<Signal, u32>::new(&[
            (Light::Red, red),
            (Light::Green, green),
            (Light::Yellow, yellow),
        ])
        .unwrap();
        let mut s = signal();

        assert_eq!(table.step(&mut s, &2), None);
        assert_eq!(table.step(&mut s, &2), Some(Light::Green));
        // The transition only takes effect on the next tick.
        assert_eq!(s.visits, vec![Light::Red, Light::Red]);

        table.step(&mut s, &1);
        table.step(&mut s, &1);
        table.step(&mut s, &1);
        assert_eq!(s.visits.len(), 5);
        assert_eq!(s.state, Light::Yellow);
    }

    #[test]
    fn incomplete_table_is_rejected() {
        let err = StateTable::<Signal, u32>::new(&[(Light::Red, red), (Light::Green, green)])
            .unwrap_err();
        assert_eq!(err, StateTableError::Missing("Yellow".into()));
    }

    #[test]
    fn duplicate_entry_is_rejected() {
        let err = StateTable::<Signal, u32>::new(&[
            (Light::Red, red),
            (Light::Red, green),
            (Light::Yellow, yellow),
        ])
        .unwrap_err();
        assert_eq!(err, StateTableError::Duplicate("Red".into()));
    }

    #[test]
    fn ramp_snaps_onto_limit() {
        let mut speed = 0.0;
        let mut ticks = 0;
        while speed != 0.5 {
            speed = ramp(speed, 0.5, 0.02);
            ticks += 1;
            assert!(ticks <= 25);
        }
        assert_eq!(ticks, 25);

        assert_eq!(ramp(0.1, 0.0, 0.2), 0.0);
        assert_eq!(ramp(0.0, 0.0, 0.2), 0.0);
        assert!((ramp(1.0, 0.0, 0.2) - 0.8).abs() < 1e-6);
    }
}
