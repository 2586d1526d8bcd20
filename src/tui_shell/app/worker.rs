use super::*;

impl App {
    /// Runs `job` on a short-lived thread; the result comes back through the
    /// completion channel tagged with `generation`.
    pub(super) fn spawn_job(&self, generation: u64, job: Job) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        std::thread::spawn(move || {
            let outcome = job(&client);
            if tx.send(Completion { generation, outcome }).is_err() {
                tracing::debug!(generation, "dashboard closed before job finished");
            }
        });
    }

    pub(super) fn drain_completions(&mut self) {
        while let Ok(done) = self.rx.try_recv() {
            self.deliver(done);
        }
    }

    pub(super) fn deliver(&mut self, done: Completion) {
        let Completion { generation, outcome } = done;
        if generation == APP_GENERATION {
            self.on_app_outcome(outcome);
            return;
        }

        let Some(idx) = self.frames.iter().position(|f| f.generation == generation) else {
            tracing::debug!(generation, "dropping completion for a closed screen");
            return;
        };
        if outcome.error().is_some_and(|e| e.is_unauthorized()) {
            self.handle_unauthorized();
            return;
        }
        let effects = self.frames[idx].view.on_outcome(outcome);
        self.apply_effects(generation, effects);
    }
}
