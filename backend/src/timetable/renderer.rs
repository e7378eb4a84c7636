//! Grid renderer.
//!
//! A single pass over the normalized schedule that issues drawing calls
//! against a [`DrawingSurface`]. Later calls paint over earlier ones, so the
//! order is: grid rows, break shading, session blocks, footer.

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use super::layout::{
    GridGeometry, LabelDetail, LayoutConfig, BREAK_FILL, SESSION_FILL, SUBLINE_STROKE,
};
use super::normalizer::{GridBounds, NormalizedSchedule, PositionedBreakSpan, PositionedSession};
use super::surface::{DrawingSurface, FontStyle, Rgb, TextAlign};
use super::week::WeekModel;
use crate::error::Result;
use crate::models::{format_date, format_day_month, format_time, CourseInfo};

/// Offset of the date label from the cell's top-left corner.
const DATE_LABEL_OFFSET: f64 = 0.5;
/// Horizontal gap between a block's edge and its text.
const LABEL_PADDING: f64 = 1.0;
const NAME_BASELINE: f64 = 2.0;
const LOCATION_BASELINE: f64 = 5.0;
const TIME_RANGE_BASELINE: f64 = 8.0;
const NAME_CHARS: usize = 3;

/// Text printed around the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Row labels, Monday first.
    pub day_labels: Vec<String>,
    pub course_label: String,
    pub class_label: String,
    pub period_label: String,
    pub printed_label: String,
    pub delimiter: String,
    /// Class shown when the request does not name one.
    pub default_class: Option<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            day_labels: ["Mo", "Di", "Mi", "Do", "Fr", "Sa"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            course_label: "Kurs: ".to_string(),
            class_label: "Klasse: ".to_string(),
            period_label: "Zeitraum: ".to_string(),
            printed_label: "Gedruckt: ".to_string(),
            delimiter: " // ".to_string(),
            default_class: None,
        }
    }
}

/// Everything one render needs besides configuration.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub schedule: &'a NormalizedSchedule,
    pub breaks: &'a [PositionedBreakSpan],
    pub date_strip: &'a [NaiveDate],
    pub course: &'a CourseInfo,
    pub generated_on: NaiveDate,
}

/// Counts of what was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderSummary {
    pub sessions_drawn: usize,
    pub sessions_skipped: usize,
    pub breaks_drawn: usize,
    pub breaks_clipped: usize,
}

pub struct GridRenderer<'a> {
    layout: &'a LayoutConfig,
    labels: &'a LabelConfig,
    week: WeekModel,
}

impl<'a> GridRenderer<'a> {
    pub fn new(layout: &'a LayoutConfig, labels: &'a LabelConfig, week: WeekModel) -> Self {
        Self {
            layout,
            labels,
            week,
        }
    }

    /// Draw the whole timetable onto `surface`.
    ///
    /// # Errors
    /// Fails before drawing anything when the bounds cannot be laid out.
    pub fn render<S: DrawingSurface>(
        &self,
        surface: &mut S,
        input: &RenderInput<'_>,
    ) -> Result<RenderSummary> {
        let bounds = input.schedule.bounds;
        let geometry = GridGeometry::new(surface.page_size(), self.layout, &bounds)?;
        let mut summary = RenderSummary::default();

        for day_index in 0..self.week.visible_days {
            self.draw_row(surface, &geometry, &bounds, day_index, input.date_strip);
        }

        surface.set_fill_color(BREAK_FILL);
        surface.set_stroke_color(Rgb::BLACK);
        for span in input.breaks {
            match geometry.break_rect(span) {
                Some(rect) => {
                    surface.rect(rect);
                    summary.breaks_drawn += 1;
                }
                None => summary.breaks_clipped += 1,
            }
        }

        surface.set_fill_color(SESSION_FILL);
        surface.set_stroke_color(Rgb::BLACK);
        surface.set_font(FontStyle::Normal, self.layout.session_label_size);
        for session in &input.schedule.sessions {
            if self.draw_session(surface, &geometry, session) {
                summary.sessions_drawn += 1;
            } else {
                summary.sessions_skipped += 1;
            }
        }

        self.draw_footer(surface, input.course, input.generated_on);

        Ok(summary)
    }

    fn draw_row<S: DrawingSurface>(
        &self,
        surface: &mut S,
        geometry: &GridGeometry,
        bounds: &GridBounds,
        day_index: u32,
        date_strip: &[NaiveDate],
    ) {
        let layout = self.layout;
        let day_y = geometry.row_top(day_index + 1);
        let left = geometry.origin_x;
        let right = geometry.grid_right();
        let header_y = day_y - geometry.header_gap;
        let bottom_y = day_y + geometry.row_height;

        let label = self
            .labels
            .day_labels
            .get(day_index as usize)
            .map(String::as_str)
            .unwrap_or_default();
        surface.set_font(FontStyle::Bold, layout.day_label_size);
        surface.text(label, layout.day_label_x, day_y + layout.row_pitch / 2.0, TextAlign::Left);

        surface.line(left, header_y, right, header_y);
        surface.line(left, day_y, right, day_y);
        surface.line(left, bottom_y, right, bottom_y);
        for week in 0..=geometry.week_count {
            let x = geometry.column_left(week);
            surface.line(x, header_y, x, bottom_y);
        }

        surface.set_font(FontStyle::Normal, layout.date_label_size);
        for week in 0..geometry.week_count {
            let index = (day_index + week * self.week.visible_days) as usize;
            if let Some(date) = date_strip.get(index) {
                surface.text(
                    &format_day_month(date),
                    geometry.column_left(week) + DATE_LABEL_OFFSET,
                    day_y - DATE_LABEL_OFFSET,
                    TextAlign::Left,
                );
            }
        }

        let hours = bounds.hours_per_row();
        surface.set_stroke_color(SUBLINE_STROKE);
        surface.set_dashed(true);
        for band in 1..hours {
            let y = day_y + geometry.hour_height * f64::from(band);
            surface.line(left, y, right, y);
        }
        surface.set_dashed(false);
        surface.set_stroke_color(Rgb::BLACK);

        surface.set_font(FontStyle::Normal, layout.hour_label_size);
        let padding = geometry.row_height / f64::from(hours + 10);
        for band in 0..hours {
            let label = (bounds.min_hour + band).to_string();
            let y = day_y + geometry.hour_height * f64::from(band) + padding;
            surface.text(&label, layout.hour_label_left_x, y, TextAlign::Right);
            surface.text(&label, right + 2.0, y, TextAlign::Left);
        }
    }

    /// Returns `false` when the block had to be skipped.
    fn draw_session<S: DrawingSurface>(
        &self,
        surface: &mut S,
        geometry: &GridGeometry,
        session: &PositionedSession,
    ) -> bool {
        let Some(rect) = geometry.session_rect(session) else {
            warn!(
                "Skipping session '{}' at {}: invalid block geometry",
                session.name, session.start
            );
            return false;
        };

        surface.rect(rect);

        let x = rect.x + LABEL_PADDING;
        let name: String = session.name.chars().take(NAME_CHARS).collect();
        surface.text(&name, x, rect.y + NAME_BASELINE, TextAlign::Left);

        match LabelDetail::for_height(rect.height) {
            LabelDetail::Compact => {
                if !session.location.is_empty() {
                    let inline_x = x + surface.text_width(&name) + surface.text_width(" ");
                    surface.text(&session.location, inline_x, rect.y + NAME_BASELINE, TextAlign::Left);
                }
            }
            LabelDetail::WithLocation => {
                surface.text(&session.location, x, rect.y + LOCATION_BASELINE, TextAlign::Left);
            }
            LabelDetail::WithTimeRange => {
                surface.text(&session.location, x, rect.y + LOCATION_BASELINE, TextAlign::Left);
                let range = format!(
                    "{} - {}",
                    format_time(&session.start),
                    format_time(&session.finish)
                );
                surface.set_font(FontStyle::Normal, self.layout.time_range_size);
                surface.text(&range, x, rect.y + TIME_RANGE_BASELINE, TextAlign::Left);
                surface.set_font(FontStyle::Normal, self.layout.session_label_size);
            }
        }

        true
    }

    fn draw_footer<S: DrawingSurface>(
        &self,
        surface: &mut S,
        course: &CourseInfo,
        generated_on: NaiveDate,
    ) {
        let labels = self.labels;
        let period = format!(
            "{} - {}",
            format_date(&course.start.date()),
            format_date(&course.finish.date())
        );

        let mut parts: Vec<(&str, String)> = vec![(labels.course_label.as_str(), course.name.clone())];
        if let Some(class) = course.class_label.as_ref().or(labels.default_class.as_ref()) {
            parts.push((labels.class_label.as_str(), class.clone()));
        }
        parts.push((labels.period_label.as_str(), period));
        parts.push((labels.printed_label.as_str(), format_date(&generated_on)));

        let y = surface.page_size().height - self.layout.footer_offset;
        let mut x = self.layout.margin;
        let size = self.layout.footer_size;
        let last = parts.len() - 1;

        for (i, (label, value)) in parts.iter().enumerate() {
            surface.set_font(FontStyle::Bold, size);
            surface.text(label, x, y, TextAlign::Left);
            x += surface.text_width(label);

            surface.set_font(FontStyle::Normal, size);
            surface.text(value, x, y, TextAlign::Left);
            x += surface.text_width(value);

            if i < last {
                surface.text(&labels.delimiter, x, y, TextAlign::Left);
                x += surface.text_width(&labels.delimiter);
            }
        }
    }
}
