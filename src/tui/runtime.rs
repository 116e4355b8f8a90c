//! Working-set editor state for the TUI.

use crate::catalog::{APPLIANCES, CITIES};
use crate::config::SiteConfig;
use crate::estimate::{Estimator, SystemEstimate};
use crate::load::{ApplianceEntry, WorkingSet};
use crate::optimizer::OptimizationReport;

/// Step for the `[` / `]` hour controls.
const HOUR_STEP: f64 = 0.5;

/// Upper bound for daily hours in the editor.
const MAX_HOURS: f64 = 24.0;

/// Longest backup period selectable in the editor.
const MAX_AUTONOMY_DAYS: u32 = 7;

/// TUI application state.
///
/// Every edit recomputes the estimate and the scenario comparison so the
/// panels always reflect the current working set.
pub struct App {
    /// Appliances being edited.
    pub set: WorkingSet,
    /// Site settings and pricing.
    pub estimator: Estimator,
    /// Index of the highlighted working-set row.
    pub selected: usize,
    /// Index into the appliance catalog for the next `a` press.
    pub catalog_idx: usize,
    /// Latest estimate, `None` when the last recompute failed.
    pub estimate: Option<SystemEstimate>,
    /// Latest scenario comparison.
    pub report: Option<OptimizationReport>,
    /// One-line message shown in the footer.
    pub status: String,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates the editor from a validated configuration.
    ///
    /// An invalid appliance list starts the editor empty.
    pub fn new(cfg: &SiteConfig) -> Self {
        let (set, status) = match cfg.working_set() {
            Ok(set) => (set, String::new()),
            Err(e) => (WorkingSet::new(), e.to_string()),
        };
        let mut app = Self {
            set,
            estimator: Estimator::from_config(cfg),
            selected: 0,
            catalog_idx: 0,
            estimate: None,
            report: None,
            status,
            quit: false,
        };
        app.recompute();
        app
    }

    /// Re-runs the estimate and the optimizer for the current state.
    pub fn recompute(&mut self) {
        match self.estimator.estimate(&self.set) {
            Ok(est) => self.estimate = Some(est),
            Err(e) => {
                self.estimate = None;
                self.status = e.to_string();
            }
        }
        match self.estimator.optimize(&self.set) {
            Ok(report) => self.report = Some(report),
            Err(e) => {
                self.report = None;
                self.status = e.to_string();
            }
        }
    }

    /// The highlighted entry, if the set is not empty.
    pub fn selected_entry(&self) -> Option<&ApplianceEntry> {
        self.set.entries().get(self.selected)
    }

    fn selected_name(&self) -> Option<String> {
        self.selected_entry().map(|e| e.name.clone())
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.set.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Changes the highlighted entry's quantity, saturating at zero.
    pub fn adjust_quantity(&mut self, delta: i32) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let name = entry.name.clone();
        let quantity = entry.quantity.saturating_add_signed(delta);
        self.apply(|set| set.set_quantity(&name, quantity));
    }

    /// Changes the highlighted entry's daily hours within `[0, 24]`.
    pub fn adjust_hours(&mut self, steps: i32) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let name = entry.name.clone();
        let hours = (entry.daily_hours + f64::from(steps) * HOUR_STEP).clamp(0.0, MAX_HOURS);
        self.apply(|set| set.set_hours(&name, hours));
    }

    /// Cycles the highlighted entry through High, Medium, Low and Remove.
    pub fn cycle_priority(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let name = entry.name.clone();
        let next = entry.priority.next();
        self.apply(|set| set.set_priority(&name, next));
    }

    /// Deletes the highlighted entry.
    pub fn remove_selected(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };
        self.apply(|set| set.remove(&name).map(|_| ()));
        if self.selected >= self.set.len() {
            self.selected = self.set.len().saturating_sub(1);
        }
    }

    /// Name of the catalog appliance the next add would insert.
    pub fn catalog_candidate(&self) -> &'static str {
        APPLIANCES[self.catalog_idx % APPLIANCES.len()].name
    }

    pub fn next_catalog(&mut self) {
        self.catalog_idx = (self.catalog_idx + 1) % APPLIANCES.len();
    }

    /// Adds the current catalog candidate, leaving an existing entry untouched.
    pub fn add_candidate(&mut self) {
        let name = self.catalog_candidate();
        match self.set.add_from_catalog(name) {
            Ok(true) => {
                self.selected = self.set.len() - 1;
                self.status = format!("added {name}");
                self.recompute();
            }
            Ok(false) => self.status = format!("{name} is already listed"),
            Err(e) => self.status = e.to_string(),
        }
    }

    /// Moves the site to the next city in the irradiance table.
    pub fn cycle_city(&mut self) {
        let current = CITIES
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(&self.estimator.location));
        let next = current.map_or(0, |i| (i + 1) % CITIES.len());
        self.estimator.location = CITIES[next].name.to_string();
        self.recompute();
    }

    /// Changes backup days within `[1, 7]`.
    pub fn adjust_autonomy(&mut self, delta: i32) {
        self.estimator.autonomy_days = self
            .estimator
            .autonomy_days
            .saturating_add_signed(delta)
            .clamp(1, MAX_AUTONOMY_DAYS);
        self.recompute();
    }

    /// Recommended scenario cost as a fraction of the budget, capped at 1.
    pub fn budget_ratio(&self) -> f64 {
        let budget = self.estimator.max_budget;
        let cost = self
            .report
            .as_ref()
            .and_then(|r| r.recommended_outcome())
            .map_or(0.0, |o| o.cost.total_cost);
        if budget > 0.0 { (cost / budget).clamp(0.0, 1.0) } else { 0.0 }
    }

    fn apply(&mut self, edit: impl FnOnce(&mut WorkingSet) -> crate::Result<()>) {
        match edit(&mut self.set) {
            Ok(()) => {
                self.status.clear();
                self.recompute();
            }
            Err(e) => self.status = e.to_string(),
        }
    }
}
