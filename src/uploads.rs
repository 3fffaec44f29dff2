use crate::config::SimulationConfig;
use crate::random::{random_id, uniform, RandomSource};
use crate::scheduler::{Scheduler, Task};
use crate::state::{FileId, PickedFile, PreviewHandle, UploadStatus, UploadedFile};
use leptos::logging::{error, log};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Releases the browser memory behind a preview.
pub trait PreviewStore {
    fn release(&self, preview: &PreviewHandle);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    Progressed(f64),
    Completed,
    /// Unknown id or a file that is no longer uploading.
    Settled,
}

/// Ordered list of files shown on the upload screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadBoard {
    files: Vec<UploadedFile>,
}

impl UploadBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn get(&self, id: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|file| file.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn completed_count(&self) -> usize {
        self.files.iter().filter(|file| file.is_completed()).count()
    }

    pub fn push(&mut self, file: UploadedFile) {
        self.files.push(file);
    }

    pub fn advance(&mut self, id: &str, increment: f64) -> Advance {
        let Some(file) = self
            .files
            .iter_mut()
            .find(|file| file.id == id && file.status == UploadStatus::Uploading)
        else {
            return Advance::Settled;
        };
        let progress = (file.progress + increment.max(0.0)).min(100.0);
        file.progress = progress;
        if progress >= 100.0 {
            file.status = UploadStatus::Completed;
            Advance::Completed
        } else {
            Advance::Progressed(progress)
        }
    }

    pub fn fail(&mut self, id: &str) {
        if let Some(file) = self.files.iter_mut().find(|file| file.id == id) {
            file.status = UploadStatus::Error;
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|file| file.id == id)?;
        Some(self.files.remove(index))
    }

    pub fn drain(&mut self) -> Vec<UploadedFile> {
        std::mem::take(&mut self.files)
    }

    /// Random id that is not on the board yet.
    fn fresh_id(&self, random: &dyn RandomSource) -> FileId {
        let base = random_id(random);
        let mut id = base.clone();
        let mut suffix = 1;
        while self.contains(&id) {
            id = format!("{base}-{suffix}");
            suffix += 1;
        }
        id
    }
}

struct Inner<S: Scheduler> {
    board: RefCell<UploadBoard>,
    tasks: RefCell<HashMap<FileId, S::Task>>,
    scheduler: S,
    random: Rc<dyn RandomSource>,
    previews: Rc<dyn PreviewStore>,
    config: SimulationConfig,
    on_change: Box<dyn Fn(&[UploadedFile])>,
}

impl<S: Scheduler> Inner<S> {
    fn notify(&self) {
        let snapshot = self.board.borrow().files().to_vec();
        (self.on_change)(&snapshot);
    }

    fn cancel(&self, id: &str) {
        let task = self.tasks.borrow_mut().remove(id);
        if let Some(task) = task {
            task.cancel();
        }
    }

    fn tick(&self, id: &str) {
        let increment = uniform(&*self.random, 0.0, self.config.max_increment);
        let outcome = self.board.borrow_mut().advance(id, increment);
        match outcome {
            Advance::Progressed(_) => {}
            Advance::Completed => {
                log!("Upload {id} completed");
                self.cancel(id);
            }
            Advance::Settled => {
                self.cancel(id);
                return;
            }
        }
        self.notify();
    }

    fn release(&self, file: &UploadedFile) {
        if let Some(preview) = &file.preview {
            self.previews.release(preview);
        }
    }
}

/// Fake uploads: every admitted file gets its own repeating progress task.
pub struct UploadSimulator<S: Scheduler> {
    inner: Rc<Inner<S>>,
}

impl<S: Scheduler> UploadSimulator<S> {
    pub fn new<F>(
        scheduler: S,
        random: Rc<dyn RandomSource>,
        previews: Rc<dyn PreviewStore>,
        config: SimulationConfig,
        on_change: F,
    ) -> Self
    where
        F: Fn(&[UploadedFile]) + 'static,
    {
        Self {
            inner: Rc::new(Inner {
                board: RefCell::new(UploadBoard::new()),
                tasks: RefCell::new(HashMap::new()),
                scheduler,
                random,
                previews,
                config,
                on_change: Box::new(on_change),
            }),
        }
    }

    pub fn files(&self) -> Vec<UploadedFile> {
        self.inner.board.borrow().files().to_vec()
    }

    pub fn completed_count(&self) -> usize {
        self.inner.board.borrow().completed_count()
    }

    fn too_large(&self, picked: &PickedFile) -> bool {
        self.inner
            .config
            .max_file_size
            .is_some_and(|limit| picked.size > limit)
    }

    fn start(&self, id: &FileId) -> bool {
        let weak: Weak<Inner<S>> = Rc::downgrade(&self.inner);
        let target = id.clone();
        let task = self.inner.scheduler.every(
            self.inner.config.progress_interval,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.tick(&target);
                }
            }),
        );
        match task {
            Ok(task) => {
                self.inner.tasks.borrow_mut().insert(id.clone(), task);
                true
            }
            Err(err) => {
                error!("Upload {id} could not start: {err}");
                false
            }
        }
    }

    /// Adds the picked files to the board and returns their ids.
    pub fn add(&self, picked: Vec<PickedFile>) -> Vec<FileId> {
        let mut ids = Vec::with_capacity(picked.len());
        for file in picked {
            let rejected = self.too_large(&file);
            let id = self.inner.board.borrow().fresh_id(&*self.inner.random);
            let status = if rejected {
                log!("Rejecting {} ({} bytes), over the size limit", file.name, file.size);
                UploadStatus::Error
            } else {
                UploadStatus::Uploading
            };
            self.inner.board.borrow_mut().push(UploadedFile {
                id: id.clone(),
                name: file.name,
                size: file.size,
                mime: file.mime,
                progress: 0.0,
                status,
                preview: file.preview,
            });
            if !rejected && !self.start(&id) {
                self.inner.board.borrow_mut().fail(&id);
            }
            ids.push(id);
        }
        self.inner.notify();
        ids
    }

    /// Stops the file's task and frees its preview. Unknown ids are ignored.
    pub fn remove(&self, id: &str) -> bool {
        self.inner.cancel(id);
        let removed = self.inner.board.borrow_mut().remove(id);
        match removed {
            Some(file) => {
                log!("Removed upload {id}");
                self.inner.release(&file);
                self.inner.notify();
                true
            }
            None => false,
        }
    }

    /// Cancels every task and frees every preview, without notifying.
    pub fn shutdown(&self) {
        let tasks: Vec<_> = self.inner.tasks.borrow_mut().drain().collect();
        for (_, task) in tasks {
            task.cancel();
        }
        let files = self.inner.board.borrow_mut().drain();
        for file in &files {
            self.inner.release(file);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::ScriptedRandom;
    use crate::scheduler::testing::{FailingScheduler, ManualScheduler};
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingPreviews {
        released: RefCell<Vec<PreviewHandle>>,
    }

    impl PreviewStore for CountingPreviews {
        fn release(&self, preview: &PreviewHandle) {
            self.released.borrow_mut().push(preview.clone());
        }
    }

    struct Harness {
        scheduler: ManualScheduler,
        previews: Rc<CountingPreviews>,
        changes: Rc<Cell<usize>>,
        seen: Rc<RefCell<Vec<UploadedFile>>>,
        simulator: UploadSimulator<ManualScheduler>,
    }

    fn harness(random: ScriptedRandom, config: SimulationConfig) -> Harness {
        let scheduler = ManualScheduler::new();
        let previews = Rc::new(CountingPreviews::default());
        let changes = Rc::new(Cell::new(0));
        let seen = Rc::new(RefCell::new(vec![]));
        let (counter, sink) = (changes.clone(), seen.clone());
        let simulator = UploadSimulator::new(
            scheduler.clone(),
            Rc::new(random),
            previews.clone(),
            config,
            move |files: &[UploadedFile]| {
                counter.set(counter.get() + 1);
                *sink.borrow_mut() = files.to_vec();
            },
        );
        Harness {
            scheduler,
            previews,
            changes,
            seen,
            simulator,
        }
    }

    fn picked(name: &str, size: u64) -> PickedFile {
        PickedFile {
            name: name.to_string(),
            size,
            mime: "application/pdf".to_string(),
            preview: Some(PreviewHandle(format!("blob:{name}"))),
        }
    }

    #[test]
    fn board_advance_clamps_and_completes_once() {
        let mut board = UploadBoard::new();
        board.push(UploadedFile {
            id: "a".to_string(),
            name: "a.pdf".to_string(),
            size: 10,
            mime: "application/pdf".to_string(),
            progress: 0.0,
            status: UploadStatus::Uploading,
            preview: None,
        });
        assert_eq!(board.advance("a", 60.0), Advance::Progressed(60.0));
        assert_eq!(board.advance("a", -5.0), Advance::Progressed(60.0));
        assert_eq!(board.advance("a", 60.0), Advance::Completed);
        assert_eq!(board.get("a").unwrap().progress, 100.0);
        assert_eq!(board.advance("a", 10.0), Advance::Settled);
        assert_eq!(board.advance("ghost", 10.0), Advance::Settled);
        assert_eq!(board.completed_count(), 1);
    }

    #[test]
    fn progress_is_monotonic_and_completes() {
        // constant 0.5 gives 15% per tick, also feeding the id alphabet
        let h = harness(ScriptedRandom::constant(0.5), SimulationConfig::default());
        let ids = h.simulator.add(vec![picked("report.pdf", 2048)]);
        let id = &ids[0];
        assert_eq!(h.seen.borrow()[0].status, UploadStatus::Uploading);
        assert_eq!(h.seen.borrow()[0].progress, 0.0);

        let mut last = 0.0;
        for _ in 0..6 {
            h.scheduler.advance(200);
            let file = h.seen.borrow()[0].clone();
            assert!(file.progress >= last);
            assert!(file.progress < 100.0);
            assert_eq!(file.status, UploadStatus::Uploading);
            last = file.progress;
        }
        assert_eq!(last, 90.0);

        h.scheduler.advance(200);
        let file = h.seen.borrow()[0].clone();
        assert_eq!(&file.id, id);
        assert_eq!(file.progress, 100.0);
        assert_eq!(file.status, UploadStatus::Completed);
        assert_eq!(h.simulator.completed_count(), 1);
        assert_eq!(h.scheduler.pending(), 0);

        let changes = h.changes.get();
        h.scheduler.advance(5_000);
        assert_eq!(h.changes.get(), changes);
    }

    #[test]
    fn files_progress_independently() {
        let random = ScriptedRandom::constant(0.0);
        let h = harness(random, SimulationConfig::default());
        h.simulator.add(vec![picked("a.pdf", 1), picked("b.pdf", 2)]);
        assert_eq!(h.scheduler.pending(), 2);
        let files = h.simulator.files();
        assert_ne!(files[0].id, files[1].id);
        assert_eq!(files[1].id, format!("{}-1", files[0].id));
    }

    #[test]
    fn removal_cancels_and_releases_once() {
        let h = harness(ScriptedRandom::constant(0.5), SimulationConfig::default());
        let ids = h.simulator.add(vec![picked("notes.pdf", 100)]);
        h.scheduler.advance(200);
        assert_eq!(h.seen.borrow()[0].progress, 15.0);

        assert!(h.simulator.remove(&ids[0]));
        assert!(h.seen.borrow().is_empty());
        assert_eq!(h.scheduler.pending(), 0);

        let changes = h.changes.get();
        h.scheduler.advance(10_000);
        assert_eq!(h.changes.get(), changes);

        assert!(!h.simulator.remove(&ids[0]));
        assert_eq!(
            *h.previews.released.borrow(),
            vec![PreviewHandle("blob:notes.pdf".to_string())]
        );
    }

    #[test]
    fn oversized_files_fail_without_a_task() {
        let config = SimulationConfig {
            max_file_size: Some(1024),
            ..SimulationConfig::default()
        };
        let h = harness(ScriptedRandom::constant(0.5), config);
        h.simulator
            .add(vec![picked("huge.pdf", 4096), picked("small.pdf", 10)]);
        let files = h.simulator.files();
        assert_eq!(files[0].status, UploadStatus::Error);
        assert_eq!(files[1].status, UploadStatus::Uploading);
        assert_eq!(h.scheduler.pending(), 1);

        h.scheduler.advance(10_000);
        let files = h.simulator.files();
        assert_eq!(files[0].status, UploadStatus::Error);
        assert_eq!(files[0].progress, 0.0);
        assert_eq!(files[1].status, UploadStatus::Completed);
        assert_eq!(h.simulator.completed_count(), 1);

        assert!(h.simulator.remove(&files[0].id));
        assert_eq!(h.previews.released.borrow().len(), 1);
    }

    #[test]
    fn large_files_upload_without_a_limit() {
        let h = harness(ScriptedRandom::constant(0.5), SimulationConfig::default());
        h.simulator.add(vec![picked("scan.pdf", 200 * 1024 * 1024)]);
        h.scheduler.advance(60_000);
        let files = h.simulator.files();
        assert_eq!(files[0].status, UploadStatus::Completed);
        assert_eq!(files[0].progress, 100.0);
    }

    #[test]
    fn unscheduled_upload_ends_in_error() {
        let previews = Rc::new(CountingPreviews::default());
        let seen = Rc::new(RefCell::new(vec![]));
        let sink = seen.clone();
        let simulator = UploadSimulator::new(
            FailingScheduler,
            Rc::new(ScriptedRandom::constant(0.5)),
            previews.clone(),
            SimulationConfig::default(),
            move |files: &[UploadedFile]| *sink.borrow_mut() = files.to_vec(),
        );
        let ids = simulator.add(vec![picked("stuck.pdf", 100)]);
        assert_eq!(seen.borrow()[0].status, UploadStatus::Error);
        assert_eq!(seen.borrow()[0].progress, 0.0);
        assert!(simulator.inner.tasks.borrow().is_empty());
        assert_eq!(simulator.completed_count(), 0);

        assert!(simulator.remove(&ids[0]));
        assert!(seen.borrow().is_empty());
        assert_eq!(
            *previews.released.borrow(),
            vec![PreviewHandle("blob:stuck.pdf".to_string())]
        );
    }

    #[test]
    fn completed_count_gates_chat() {
        use crate::state::Screen;
        let h = harness(ScriptedRandom::constant(0.9), SimulationConfig::default());
        h.simulator.add(vec![picked("a.pdf", 1)]);
        assert_eq!(Screen::Upload.open_chat(h.simulator.completed_count()), Screen::Upload);
        h.scheduler.advance(1_000);
        assert_eq!(Screen::Upload.open_chat(h.simulator.completed_count()), Screen::Chat);
    }

    #[test]
    fn shutdown_stops_everything() {
        let h = harness(ScriptedRandom::constant(0.1), SimulationConfig::default());
        h.simulator
            .add(vec![picked("a.pdf", 1), picked("b.pdf", 1), picked("c.pdf", 1)]);
        h.scheduler.advance(400);
        h.simulator.shutdown();
        assert_eq!(h.scheduler.pending(), 0);
        assert!(h.simulator.files().is_empty());
        assert_eq!(h.previews.released.borrow().len(), 3);
    }

    #[test]
    fn dropped_simulator_stops_mutating() {
        let h = harness(ScriptedRandom::constant(0.1), SimulationConfig::default());
        h.simulator.add(vec![picked("a.pdf", 1)]);
        let changes = h.changes.clone();
        let scheduler = h.scheduler.clone();
        drop(h.simulator);
        let before = changes.get();
        scheduler.advance(1_000);
        assert_eq!(changes.get(), before);
    }
}
