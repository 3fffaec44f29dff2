use crate::error::{js_error, Error};
use leptos::leptos_dom::helpers::{
    set_interval_with_handle, set_timeout_with_handle, IntervalHandle, TimeoutHandle,
};
use std::cell::RefCell;
use std::time::Duration;

/// Handle to a scheduled callback.
pub trait Task {
    fn cancel(self);
}

pub trait Scheduler: 'static {
    type Task: Task + 'static;

    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> Result<Self::Task, Error>;

    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<Self::Task, Error>;
}

/// Timers of the page event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

#[derive(Debug, Clone, Copy)]
pub enum BrowserTask {
    Interval(IntervalHandle),
    Timeout(TimeoutHandle),
}

impl Task for BrowserTask {
    fn cancel(self) {
        match self {
            BrowserTask::Interval(handle) => handle.clear(),
            BrowserTask::Timeout(handle) => handle.clear(),
        }
    }
}

impl Scheduler for BrowserScheduler {
    type Task = BrowserTask;

    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> Result<BrowserTask, Error> {
        let task = RefCell::new(task);
        let tick = move || {
            let mut task = task.borrow_mut();
            (*task)();
        };
        set_interval_with_handle(tick, period)
            .map(BrowserTask::Interval)
            .map_err(|err| Error::Schedule(js_error(err)))
    }

    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<BrowserTask, Error> {
        set_timeout_with_handle(task, delay)
            .map(BrowserTask::Timeout)
            .map_err(|err| Error::Schedule(js_error(err)))
    }
}
