use std::collections::VecDeque;

use crate::assets::AssetResolver;
use crate::config::DEFAULT_LOG_LINES;
use crate::dataset::{Creature, Dex};
use crate::error::DexError;
use crate::format::{RecordView, record_view};
use crate::navigator::{Direction, Navigator};
use crate::search::filter_names;
use crate::stat_scale::BarScale;

/// Everything the viewer needs between key presses. Each handler ends in
/// [`AppState::refresh`], which rebuilds the displayed record from the table.
pub struct AppState {
    pub dex: Dex,
    pub assets: Box<dyn AssetResolver>,
    pub scale: BarScale,
    pub nav: Navigator,
    pub all_names: Vec<String>,
    pub query: String,
    pub search_active: bool,
    pub view: Option<RecordView>,
    pub logs: VecDeque<String>,
    pub log_capacity: usize,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(dex: Dex, assets: Box<dyn AssetResolver>) -> Self {
        let all_names = dex.names();
        Self {
            nav: Navigator::new(all_names.clone()),
            dex,
            assets,
            scale: BarScale::DEFAULT,
            all_names,
            query: String::new(),
            search_active: false,
            view: None,
            logs: VecDeque::with_capacity(DEFAULT_LOG_LINES),
            log_capacity: DEFAULT_LOG_LINES,
            help_overlay: false,
        }
    }

    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity.max(1);
        self.trim_logs();
        self
    }

    /// Selects `name` exactly. On success the filter is cleared so stepping
    /// continues through the full list from the selected record.
    pub fn select(&mut self, name: &str) -> Result<(), DexError> {
        self.nav.select(&self.dex, name)?;
        self.query.clear();
        self.nav.set_visible(self.all_names.clone());
        self.refresh();
        Ok(())
    }

    /// Selects the first record of the table, if there is one.
    pub fn select_first(&mut self) {
        if self.dex.is_empty() {
            self.push_log("[WARN] Dex is empty");
            return;
        }
        let first = self.all_names[0].clone();
        if let Err(err) = self.select(&first) {
            self.push_log(format!("[WARN] {err}"));
        }
    }

    pub fn step(&mut self, direction: Direction) {
        self.nav.step(&self.dex, direction);
        self.refresh();
    }

    pub fn select_next(&mut self) {
        self.step(Direction::Forward);
    }

    pub fn select_prev(&mut self) {
        self.step(Direction::Backward);
    }

    pub fn current(&self) -> Result<&Creature, DexError> {
        self.nav.current(&self.dex)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.apply_filter();
    }

    pub fn push_query_char(&mut self, ch: char) {
        self.query.push(ch);
        self.apply_filter();
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.apply_filter();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.apply_filter();
    }

    pub fn begin_search(&mut self) {
        self.search_active = true;
    }

    pub fn end_search(&mut self) {
        self.search_active = false;
    }

    /// Enter in the search box: the query, exactly as typed, selects a name;
    /// anything else is reported on the console and leaves the display untouched.
    pub fn submit_search(&mut self) {
        let query = self.query.clone();
        if query.is_empty() {
            self.search_active = false;
            return;
        }
        match self.select(&query) {
            Ok(()) => {
                self.search_active = false;
                self.push_log(format!("[INFO] Selected {query}"));
            }
            Err(err) => self.push_log(format!("[WARN] {err}")),
        }
    }

    pub fn toggle_help(&mut self) {
        self.help_overlay = !self.help_overlay;
    }

    pub fn refresh(&mut self) {
        self.view = self
            .nav
            .current(&self.dex)
            .ok()
            .map(|record| record_view(record, self.assets.as_ref(), &self.scale));
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        self.trim_logs();
    }

    fn apply_filter(&mut self) {
        self.nav
            .set_visible(filter_names(&self.query, &self.all_names));
        self.refresh();
    }

    fn trim_logs(&mut self) {
        while self.logs.len() > self.log_capacity {
            self.logs.pop_front();
        }
    }
}
