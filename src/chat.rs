use crate::config::SimulationConfig;
use crate::random::{pick_index, uniform, RandomSource};
use crate::scheduler::{Scheduler, Task};
use crate::state::Message;
use chrono::Utc;
use leptos::logging::{error, log};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub const GREETING: &str = "Hello! I'm ready to help you analyze and discuss your uploaded files. What would you like to know?";

pub const CANNED_REPLIES: [&str; 5] = [
    "I can help you analyze your uploaded files. What specific information are you looking for?",
    "Great question! Based on the files you've uploaded, I can provide insights and assistance.",
    "I'm here to help with any questions about your files. Feel free to ask about formats, content, or processing options.",
    "That's an interesting query! Let me help you understand more about your uploaded files.",
    "I can assist with file management, analysis, and recommendations. What would you like to know?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    Empty,
    /// A reply is still on its way.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent { id: String },
    Ignored(Ignored),
}

/// Append-only conversation plus the typing flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatLog {
    messages: Vec<Message>,
    typing: bool,
    next_id: u64,
}

impl ChatLog {
    pub fn new() -> Self {
        let mut log = Self {
            messages: vec![],
            typing: false,
            next_id: 1,
        };
        log.push(GREETING.to_string(), false);
        log
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    fn push(&mut self, text: String, is_user: bool) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.messages.push(Message {
            id: id.clone(),
            text,
            is_user,
            timestamp: Utc::now(),
        });
        id
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

struct Inner<S: Scheduler> {
    log: RefCell<ChatLog>,
    pending: RefCell<Option<S::Task>>,
    scheduler: S,
    random: Rc<dyn RandomSource>,
    config: SimulationConfig,
    on_change: Box<dyn Fn(&ChatLog)>,
}

impl<S: Scheduler> Inner<S> {
    fn notify(&self) {
        let snapshot = self.log.borrow().clone();
        (self.on_change)(&snapshot);
    }

    fn reply(&self) {
        self.pending.borrow_mut().take();
        let text = CANNED_REPLIES[pick_index(&*self.random, CANNED_REPLIES.len())];
        {
            let mut log = self.log.borrow_mut();
            log.push(text.to_string(), false);
            log.typing = false;
        }
        self.notify();
    }

    fn reply_delay(&self) -> Duration {
        let low = self.config.reply_delay_min.as_millis() as f64;
        let high = self.config.reply_delay_max.as_millis() as f64;
        Duration::from_millis(uniform(&*self.random, low, high).round() as u64)
    }
}

/// One chat screen worth of conversation with a mocked assistant.
pub struct ChatSession<S: Scheduler> {
    inner: Rc<Inner<S>>,
}

impl<S: Scheduler> ChatSession<S> {
    pub fn new<F>(
        scheduler: S,
        random: Rc<dyn RandomSource>,
        config: SimulationConfig,
        on_change: F,
    ) -> Self
    where
        F: Fn(&ChatLog) + 'static,
    {
        Self {
            inner: Rc::new(Inner {
                log: RefCell::new(ChatLog::new()),
                pending: RefCell::new(None),
                scheduler,
                random,
                config,
                on_change: Box::new(on_change),
            }),
        }
    }

    pub fn log(&self) -> ChatLog {
        self.inner.log.borrow().clone()
    }

    pub fn is_typing(&self) -> bool {
        self.inner.log.borrow().is_typing()
    }

    /// Appends the user's message right away and schedules a single reply.
    pub fn send(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored(Ignored::Empty);
        }
        if self.is_typing() {
            return SendOutcome::Ignored(Ignored::Busy);
        }
        let id = {
            let mut log = self.inner.log.borrow_mut();
            log.typing = true;
            log.push(text.to_string(), true)
        };

        let delay = self.inner.reply_delay();
        let weak = Rc::downgrade(&self.inner);
        let task = self.inner.scheduler.after(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.reply();
                }
            }),
        );
        match task {
            Ok(task) => {
                log!("Reply scheduled in {}ms", delay.as_millis());
                *self.inner.pending.borrow_mut() = Some(task);
            }
            Err(err) => {
                error!("Could not schedule reply: {err}");
                self.inner.log.borrow_mut().typing = false;
            }
        }
        self.inner.notify();
        SendOutcome::Sent { id }
    }

    /// Drops a reply that has not arrived yet.
    pub fn close(&self) {
        let task = self.inner.pending.borrow_mut().take();
        if let Some(task) = task {
            task.cancel();
        }
    }
}
