use ratatui::layout::Rect;
use tracing::{error, info};

use crate::chart::{Backdrop, BubbleChart, Lod, Tooltip, Viewport};
use crate::data::CountrySource;
use crate::error::MetricError;
use crate::metric::{project, Metric};
use crate::table::TableView;
use crate::ui;

/// Rows moved by PageUp/PageDown in the table
const PAGE_ROWS: usize = 10;

/// Application state
pub struct App {
    pub viewport: Viewport,
    pub backdrop: Backdrop,
    /// The live chart; replaced wholesale on every metric update
    pub chart: Option<BubbleChart>,
    pub table: TableView,
    pub metric: Option<Metric>,
    pub selected_row: usize,
    /// Bubble under the mouse cursor
    pub hovered: Option<usize>,
    /// Last fetch/selection failure, shown in the status bar
    pub error: Option<String>,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Terminal area the chart canvas occupies
    chart_area: Rect,
    source: Box<dyn CountrySource>,
}

impl App {
    pub fn new(source: Box<dyn CountrySource>, width: u16, height: u16) -> Self {
        let chart_area = ui::chart_canvas_area(Rect::new(0, 0, width, height));
        Self {
            viewport: Viewport::world(chart_area.width as usize * 2, chart_area.height as usize * 4),
            backdrop: Backdrop::new(),
            chart: None,
            table: TableView::default(),
            metric: None,
            selected_row: 0,
            hovered: None,
            error: None,
            should_quit: false,
            last_mouse: None,
            chart_area,
            source,
        }
    }

    /// Fetch the dataset and rebuild chart and table for `metric`.
    /// On failure the previous chart and table stay as they were.
    pub fn select_metric(&mut self, metric: Metric) {
        let records = match self.source.fetch() {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, metric = %metric, "failed to fetch country data");
                self.error = Some(e.to_string());
                return;
            }
        };

        let points = match project(metric, &records) {
            Ok(points) => points,
            Err(e) => {
                error!(error = %e, metric = %metric, "failed to project metric");
                self.error = Some(e.to_string());
                return;
            }
        };
        info!(metric = %metric, records = records.len(), points = points.len(), "projected metric");

        self.table = TableView::from_points(&points);
        // Tear down the old chart before building its replacement
        drop(self.chart.take());
        self.chart = Some(BubbleChart::new(points));
        self.metric = Some(metric);
        self.selected_row = 0;
        self.hovered = None;
        self.error = None;
    }

    /// Select a metric by its key, reporting unknown keys instead of failing
    pub fn select_metric_key(&mut self, key: &str) -> Result<(), MetricError> {
        match key.parse::<Metric>() {
            Ok(metric) => {
                self.select_metric(metric);
                Ok(())
            }
            Err(e) => {
                error!(key, "unknown metric selected");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn next_metric(&mut self) {
        let metric = self.metric.map_or(Metric::Population, Metric::next);
        self.select_metric(metric);
    }

    pub fn prev_metric(&mut self) {
        let metric = self.metric.map_or(Metric::RegionTimezones, Metric::prev);
        self.select_metric(metric);
    }

    /// Re-run the current selection against a fresh fetch
    pub fn refresh(&mut self) {
        if let Some(metric) = self.metric {
            self.select_metric(metric);
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.chart_area = ui::chart_canvas_area(Rect::new(0, 0, width, height));
        self.viewport.width = self.chart_area.width as usize * 2;
        self.viewport.height = self.chart_area.height as usize * 4;
    }

    pub fn reset_view(&mut self) {
        self.viewport = Viewport::world(self.viewport.width, self.viewport.height);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Terminal cell to canvas dot, if the cell is on the chart
    fn to_dots(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        let area = self.chart_area;
        let inside = col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height;
        inside.then(|| ((col - area.x) as i32 * 2, (row - area.y) as i32 * 4))
    }

    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        if let Some((px, py)) = self.to_dots(col, row) {
            self.viewport.zoom_at(px, py, true);
        }
    }

    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        if let Some((px, py)) = self.to_dots(col, row) {
            self.viewport.zoom_at(px, py, false);
        }
    }

    pub fn handle_drag(&mut self, col: u16, row: u16) {
        if let Some((last_col, last_row)) = self.last_mouse {
            let dx = last_col as i32 - col as i32;
            let dy = last_row as i32 - row as i32;
            // One cell of drag moves the map by one cell of dots
            self.pan(dx * 2, dy * 4);
        }
        self.last_mouse = Some((col, row));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    /// Track the cursor and work out which bubble it is over
    pub fn hover(&mut self, col: u16, row: u16) {
        self.hovered = match (self.to_dots(col, row), &self.chart) {
            (Some((px, py)), Some(chart)) => chart.hit_test(&self.viewport, px, py),
            _ => None,
        };
    }

    pub fn select_next_row(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev_row(&mut self) {
        self.move_selection(-1);
    }

    pub fn page_down(&mut self) {
        self.move_selection(PAGE_ROWS as isize);
    }

    pub fn page_up(&mut self) {
        self.move_selection(-(PAGE_ROWS as isize));
    }

    fn move_selection(&mut self, delta: isize) {
        let last = self.table.len().saturating_sub(1);
        self.selected_row = self.selected_row.saturating_add_signed(delta).min(last);
    }

    /// Tooltip for the hovered bubble, falling back to the selected row
    pub fn tooltip(&self) -> Option<Tooltip> {
        let chart = self.chart.as_ref()?;
        chart.tooltip(self.hovered.unwrap_or(self.selected_row))
    }

    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    pub fn lod_level(&self) -> &'static str {
        Lod::from_zoom(self.viewport.zoom).label()
    }

    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }
}
