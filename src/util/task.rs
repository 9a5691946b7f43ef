//! Self-rescheduling timer task.
//!
//! DESIGN
//! ======
//! A step closure runs, returns the delay before its next run, and is
//! re-armed through `Dom::set_timeout`. Each armed chain carries the epoch it
//! was started in; `cancel` bumps the epoch, so a chain armed before the
//! cancel runs no further steps even if the task is resumed before its
//! pending timeout fires.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom::Dom;

type Step = Rc<RefCell<dyn FnMut() -> u32>>;

#[derive(Debug)]
struct Control {
    epoch: Cell<u64>,
    running: Cell<bool>,
}

/// Handle to a running repeating task. Dropping the handle does not stop it.
#[derive(Clone)]
pub struct RepeatingTask {
    control: Rc<Control>,
    step: Step,
}

impl std::fmt::Debug for RepeatingTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatingTask").field("control", &self.control).finish_non_exhaustive()
    }
}

impl RepeatingTask {
    /// Run `step` now, then keep re-running it after whatever delay it returns.
    pub fn start<D, F>(dom: &Rc<D>, step: F) -> Self
    where
        D: Dom,
        F: FnMut() -> u32 + 'static,
    {
        let control = Rc::new(Control { epoch: Cell::new(0), running: Cell::new(true) });
        let step: Step = Rc::new(RefCell::new(step));
        let first_delay = (&mut *step.borrow_mut())();
        arm(Rc::clone(dom), first_delay, Rc::clone(&control), 0, Rc::clone(&step));
        Self { control, step }
    }

    pub fn cancel(&self) {
        if self.control.running.replace(false) {
            self.control.epoch.set(self.control.epoch.get() + 1);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        !self.control.running.get()
    }

    /// Restart a cancelled task from where it stopped. No-op while running.
    pub fn resume<D: Dom>(&self, dom: &Rc<D>) {
        if self.control.running.replace(true) {
            return;
        }
        let first_delay = (&mut *self.step.borrow_mut())();
        let epoch = self.control.epoch.get();
        arm(Rc::clone(dom), first_delay, Rc::clone(&self.control), epoch, Rc::clone(&self.step));
    }
}

fn arm<D: Dom>(dom: Rc<D>, delay_ms: u32, control: Rc<Control>, epoch: u64, step: Step) {
    let scheduler = Rc::clone(&dom);
    scheduler.set_timeout(
        delay_ms,
        Box::new(move || {
            if !control.running.get() || control.epoch.get() != epoch {
                return;
            }
            let next_delay = (&mut *step.borrow_mut())();
            arm(dom, next_delay, control, epoch, step);
        }),
    );
}
