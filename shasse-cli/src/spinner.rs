//! Progress display for a concurrent scrape.
//!
//! One overall bar counts finished Pokémon; below it, a fixed number of
//! spinner slots show what each worker is doing. Slots are claimed and
//! released by the Pokémon's portal index.

use std::collections::HashMap;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

pub(crate) struct ScrapeProgress {
    #[allow(dead_code)]
    mp: MultiProgress,
    overall: ProgressBar,
    spinners: Vec<ProgressBar>,
    slots: HashMap<usize, usize>,
    free_slots: Vec<usize>,
}

impl ScrapeProgress {
    /// Create the display with `workers` spinner slots, hidden when `quiet`.
    pub(crate) fn new(workers: usize, quiet: bool) -> Self {
        let mp = if quiet {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        } else {
            MultiProgress::new()
        };

        let overall = mp.add(ProgressBar::new(0));
        overall.set_style(
            ProgressStyle::with_template("  [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .expect("static pattern")
                .progress_chars("=> "),
        );

        let spinner_style = ProgressStyle::with_template("    {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|");
        let spinners: Vec<ProgressBar> = (0..workers.max(1))
            .map(|_| {
                let pb = mp.add(ProgressBar::new_spinner());
                pb.set_style(spinner_style.clone());
                pb
            })
            .collect();
        let free_slots = (0..spinners.len()).rev().collect();

        Self {
            mp,
            overall,
            spinners,
            slots: HashMap::new(),
            free_slots,
        }
    }

    /// Show a message on the overall bar (portal loading and such).
    pub(crate) fn set_message(&self, msg: impl Into<String>) {
        self.overall.set_message(msg.into());
    }

    pub(crate) fn set_total(&self, total: usize) {
        self.overall.set_length(total as u64);
        self.overall.set_position(0);
    }

    /// Claim a spinner slot for the Pokémon at `index`.
    pub(crate) fn claim(&mut self, index: usize, msg: String) {
        if let Some(slot) = self.free_slots.pop() {
            let spinner = &self.spinners[slot];
            spinner.reset();
            spinner.enable_steady_tick(TICK);
            spinner.set_message(msg);
            self.slots.insert(index, slot);
        }
    }

    /// Update the message for a claimed slot. No-op if `index` has no slot.
    pub(crate) fn update(&self, index: usize, msg: String) {
        if let Some(&slot) = self.slots.get(&index) {
            self.spinners[slot].set_message(msg);
        }
    }

    /// Release a slot and count the Pokémon as finished.
    pub(crate) fn finish(&mut self, index: usize) {
        if let Some(slot) = self.slots.remove(&index) {
            let spinner = &self.spinners[slot];
            spinner.disable_steady_tick();
            spinner.set_message("");
            spinner.finish_and_clear();
            self.free_slots.push(slot);
        }
        self.overall.inc(1);
    }

    /// Clear everything from the terminal.
    pub(crate) fn clear(&mut self) {
        for spinner in &self.spinners {
            spinner.disable_steady_tick();
            spinner.finish_and_clear();
        }
        self.overall.finish_and_clear();
        self.slots.clear();
        self.free_slots = (0..self.spinners.len()).rev().collect();
    }
}
