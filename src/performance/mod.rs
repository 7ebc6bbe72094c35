//! # Performance Metrics System
//!
//! Frame timing and GPU memory figures for the three stats overlays in the
//! top-right corner of the window.
//!
//! ## Usage
//!
//! ```no_run
//! use shape_playground::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//!
//! // In your main loop
//! monitor.begin_frame();
//! // ... render frame ...
//! monitor.end_frame();
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const OVERLAY_SIZE: [f32; 2] = [120.0, 48.0];
const OVERLAY_MARGIN: f32 = 8.0;

/// Performance metrics derived from recent frames
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Frames presented per second
    pub fps: f32,
    /// Average time spent producing a frame, in milliseconds
    pub frame_time_ms: f32,
    /// Minimum frame time in the current window
    pub min_frame_time_ms: f32,
    /// Maximum frame time in the current window
    pub max_frame_time_ms: f32,
    /// Number of draw calls in the last frame
    pub draw_calls: u32,
    /// Number of triangles drawn in the last frame
    pub triangle_count: u32,
    /// GPU buffer and texture bytes held by the renderer
    pub gpu_memory_bytes: u64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: 0.0,
            max_frame_time_ms: 0.0,
            draw_calls: 0,
            triangle_count: 0,
            gpu_memory_bytes: 0,
        }
    }
}

/// One of the stats overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsPanel {
    Fps,
    Ms,
    Memory,
}

impl StatsPanel {
    /// Right-to-left order on screen
    pub const ALL: [StatsPanel; 3] = [StatsPanel::Fps, StatsPanel::Ms, StatsPanel::Memory];

    pub fn title(self) -> &'static str {
        match self {
            StatsPanel::Fps => "FPS",
            StatsPanel::Ms => "MS",
            StatsPanel::Memory => "MB",
        }
    }

    pub fn value(self, metrics: &PerformanceMetrics) -> String {
        match self {
            StatsPanel::Fps => format!("{:.0} FPS", metrics.fps),
            StatsPanel::Ms => format!(
                "{:.1} MS ({:.1}-{:.1})",
                metrics.frame_time_ms, metrics.min_frame_time_ms, metrics.max_frame_time_ms
            ),
            StatsPanel::Memory => {
                format!("{:.1} MB", metrics.gpu_memory_bytes as f64 / 1_048_576.0)
            }
        }
    }

    /// Top-left corner of the panel's overlay for a given display width
    pub fn position(self, display_width: f32) -> [f32; 2] {
        let slot = StatsPanel::ALL
            .iter()
            .position(|panel| *panel == self)
            .unwrap_or(0) as f32;
        let x = display_width - (slot + 1.0) * (OVERLAY_SIZE[0] + OVERLAY_MARGIN);
        [x.max(0.0), OVERLAY_MARGIN]
    }
}

/// Performance monitoring system
pub struct PerformanceMonitor {
    /// Ring buffer of recent frame work times (begin to end)
    frame_times: VecDeque<Duration>,
    /// Ring buffer of recent intervals between frame ends
    frame_intervals: VecDeque<Duration>,
    max_samples: usize,
    frame_start: Option<Instant>,
    last_frame_end: Option<Instant>,
    current_metrics: PerformanceMetrics,
    last_update: Instant,
    /// Update interval for metrics calculation
    update_interval: Duration,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_config(120)
    }

    /// Keep `max_samples` frames of history
    pub fn with_config(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            frame_intervals: VecDeque::with_capacity(max_samples),
            max_samples,
            frame_start: None,
            last_frame_end: None,
            current_metrics: PerformanceMetrics::default(),
            last_update: Instant::now(),
            update_interval: Duration::from_millis(250),
        }
    }

    /// Mark the beginning of a frame
    pub fn begin_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Mark the end of a frame and periodically refresh the metrics
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        if let Some(start) = self.frame_start.take() {
            let interval = self.last_frame_end.map(|last| now.duration_since(last));
            self.record_frame(now.duration_since(start), interval);
            self.last_frame_end = Some(now);

            if self.last_update.elapsed() >= self.update_interval {
                self.update_metrics();
                self.last_update = now;
            }
        }
    }

    /// Adds one frame sample; `interval` is None for the very first frame
    pub fn record_frame(&mut self, work: Duration, interval: Option<Duration>) {
        push_sample(&mut self.frame_times, work, self.max_samples);
        if let Some(interval) = interval {
            push_sample(&mut self.frame_intervals, interval, self.max_samples);
        }
    }

    /// Recomputes the metrics from the current history
    pub fn update_metrics(&mut self) {
        if let Some((avg, min, max)) = summarize_ms(&self.frame_times) {
            self.current_metrics.frame_time_ms = avg;
            self.current_metrics.min_frame_time_ms = min;
            self.current_metrics.max_frame_time_ms = max;
        }

        if let Some((avg_interval, _, _)) = summarize_ms(&self.frame_intervals) {
            self.current_metrics.fps = if avg_interval > 0.0 {
                1000.0 / avg_interval
            } else {
                0.0
            };
        }
    }

    /// Update render statistics
    pub fn update_render_stats(&mut self, draw_calls: u32, triangle_count: u32) {
        self.current_metrics.draw_calls = draw_calls;
        self.current_metrics.triangle_count = triangle_count;
    }

    pub fn set_gpu_memory(&mut self, bytes: u64) {
        self.current_metrics.gpu_memory_bytes = bytes;
    }

    pub fn get_metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Reset all metrics and history
    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.frame_intervals.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.frame_start = None;
        self.last_frame_end = None;
        self.last_update = Instant::now();
    }

    /// Draws the FPS, MS and MB overlays, right to left along the top edge
    pub fn render_overlays(&self, ui: &imgui::Ui) {
        let display_width = ui.io().display_size[0];

        for panel in StatsPanel::ALL {
            ui.window(panel.title())
                .size(OVERLAY_SIZE, imgui::Condition::Always)
                .position(panel.position(display_width), imgui::Condition::Always)
                .no_decoration()
                .no_inputs()
                .bg_alpha(0.6)
                .build(|| {
                    ui.text(panel.value(&self.current_metrics));
                    if panel == StatsPanel::Ms {
                        ui.text(format!("{} draws", self.current_metrics.draw_calls));
                    }
                });
        }
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

fn push_sample(samples: &mut VecDeque<Duration>, sample: Duration, max_samples: usize) {
    if samples.len() >= max_samples {
        samples.pop_front();
    }
    samples.push_back(sample);
}

/// Average, min and max of the samples in milliseconds
fn summarize_ms(samples: &VecDeque<Duration>) -> Option<(f32, f32, f32)> {
    let min = samples.iter().min()?;
    let max = samples.iter().max()?;
    let total: Duration = samples.iter().sum();
    let avg = total.as_secs_f32() * 1000.0 / samples.len() as f32;
    Some((
        avg,
        min.as_secs_f32() * 1000.0,
        max.as_secs_f32() * 1000.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_metrics_from_samples() {
        let mut monitor = PerformanceMonitor::with_config(10);
        monitor.record_frame(ms(4), None);
        monitor.record_frame(ms(6), Some(ms(20)));
        monitor.record_frame(ms(8), Some(ms(20)));
        monitor.update_metrics();

        let metrics = monitor.get_metrics();
        assert!((metrics.frame_time_ms - 6.0).abs() < 1e-3);
        assert!((metrics.min_frame_time_ms - 4.0).abs() < 1e-3);
        assert!((metrics.max_frame_time_ms - 8.0).abs() < 1e-3);
        assert!((metrics.fps - 50.0).abs() < 1e-2);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut monitor = PerformanceMonitor::with_config(2);
        monitor.record_frame(ms(100), Some(ms(100)));
        monitor.record_frame(ms(10), Some(ms(10)));
        monitor.record_frame(ms(10), Some(ms(10)));
        monitor.update_metrics();

        assert!((monitor.get_metrics().max_frame_time_ms - 10.0).abs() < 1e-3);
        assert!((monitor.get_metrics().fps - 100.0).abs() < 1e-2);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame(ms(5), Some(ms(16)));
        monitor.set_gpu_memory(2 * 1_048_576);
        monitor.update_render_stats(3, 36);
        monitor.update_metrics();

        monitor.reset();
        assert_eq!(monitor.get_metrics(), &PerformanceMetrics::default());
    }

    #[test]
    fn test_panels_laid_out_right_to_left() {
        let width = 1280.0;
        let fps = StatsPanel::Fps.position(width);
        let ms = StatsPanel::Ms.position(width);
        let memory = StatsPanel::Memory.position(width);

        assert!(fps[0] > ms[0] && ms[0] > memory[0]);
        assert!(fps[0] + OVERLAY_SIZE[0] <= width);
        assert_eq!(fps[1], memory[1]);
    }

    #[test]
    fn test_panel_text() {
        let metrics = PerformanceMetrics {
            fps: 59.6,
            gpu_memory_bytes: 3 * 1_048_576,
            ..Default::default()
        };
        assert_eq!(StatsPanel::Fps.value(&metrics), "60 FPS");
        assert_eq!(StatsPanel::Memory.value(&metrics), "3.0 MB");
    }
}
