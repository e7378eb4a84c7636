#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::error::TimetableError;
    use crate::models::{parse_timestamp, CourseInfo};
    use crate::timetable::layout::{BREAK_FILL, SESSION_FILL, SUBLINE_STROKE};
    use crate::timetable::{
        DrawCommand, DrawingSurface, GridBounds, GridRenderer, LabelConfig, LayoutConfig,
        NormalizedSchedule, PageSize, PositionedBreakSpan, PositionedSession, RecordingSurface,
        RenderInput, TextAlign, WeekModel,
    };

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s, "test").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session(week_index: u32, day_of_week: u32, start_hour: u32, duration_hours: f64) -> PositionedSession {
        PositionedSession {
            name: "Mathematik".to_string(),
            location: "A101".to_string(),
            week_index,
            day_of_week,
            start_hour,
            duration_hours,
            start: ts("2024-01-09T10:00:00"),
            finish: ts("2024-01-09T11:30:00"),
        }
    }

    fn schedule(sessions: Vec<PositionedSession>, min_hour: u32, max_hour: u32, week_count: u32) -> NormalizedSchedule {
        NormalizedSchedule {
            sessions,
            bounds: GridBounds {
                min_hour,
                max_hour,
                week_count,
            },
            dropped_hidden_days: 0,
            dropped_before_anchor: 0,
        }
    }

    fn course(class_label: Option<&str>) -> CourseInfo {
        CourseInfo {
            name: "HF ET 23F".to_string(),
            start: ts("2024-01-08T00:00:00"),
            finish: ts("2024-06-29T00:00:00"),
            class_label: class_label.map(str::to_string),
        }
    }

    fn strip(weeks: u32) -> Vec<NaiveDate> {
        WeekModel::ACADEMIC.visible_dates(date(2024, 1, 8), date(2024, 1, 8) + chrono::Duration::days(i64::from(weeks) * 7 - 2))
    }

    fn render_with(
        layout: &LayoutConfig,
        schedule: &NormalizedSchedule,
        breaks: &[PositionedBreakSpan],
    ) -> (RecordingSurface, crate::timetable::RenderSummary) {
        let labels = LabelConfig::default();
        let renderer = GridRenderer::new(layout, &labels, WeekModel::ACADEMIC);
        let dates = strip(schedule.bounds.week_count);
        let course = course(Some("Klasse A"));
        let input = RenderInput {
            schedule,
            breaks,
            date_strip: &dates,
            course: &course,
            generated_on: date(2026, 10, 14),
        };
        let mut surface = RecordingSurface::new(PageSize::A4_LANDSCAPE);
        let summary = renderer.render(&mut surface, &input).unwrap();
        (surface, summary)
    }

    /// Layout where one hour is exactly one unit tall for an 8..17 grid.
    fn unit_layout() -> LayoutConfig {
        LayoutConfig {
            row_height: 9.0,
            ..LayoutConfig::default()
        }
    }

    fn texts_at(surface: &RecordingSurface, y: f64) -> Vec<String> {
        surface
            .texts()
            .into_iter()
            .filter(|(_, _, ty)| (ty - y).abs() < 1e-9)
            .map(|(t, _, _)| t)
            .collect()
    }

    #[test]
    fn test_session_block_geometry() {
        let schedule = schedule(vec![session(1, 2, 10, 1.5)], 8, 17, 3);
        let (surface, summary) = render_with(&LayoutConfig::default(), &schedule, &[]);

        assert_eq!(summary.sessions_drawn, 1);
        let rect = *surface.rects().last().unwrap();
        // column width (297 - 30) / 3 = 89, hour height 27 / 9 = 3
        assert!((rect.x - 105.0).abs() < 1e-9);
        assert!((rect.y - 51.0).abs() < 1e-9);
        assert!((rect.width - 88.0).abs() < 1e-9);
        assert!((rect.height - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_breaks_are_drawn_before_sessions() {
        let schedule = schedule(vec![session(0, 1, 9, 2.0)], 8, 17, 2);
        let breaks = vec![PositionedBreakSpan {
            week_index: 1,
            day_of_week: 1,
            date: date(2024, 1, 8),
            start_hour: 8,
            finish_hour: 17,
        }];
        let (surface, summary) = render_with(&LayoutConfig::default(), &schedule, &breaks);
        assert_eq!(summary.breaks_drawn, 1);

        let commands = surface.commands();
        let position = |wanted: &DrawCommand| commands.iter().position(|c| c == wanted).unwrap();
        let break_fill = position(&DrawCommand::FillColor(BREAK_FILL));
        let session_fill = position(&DrawCommand::FillColor(SESSION_FILL));
        assert!(break_fill < session_fill);

        let rects = surface.rects();
        assert_eq!(rects.len(), 2);
        assert!((rects[0].x - 15.0).abs() < 1e-9);
        assert!((rects[0].height - 27.0).abs() < 1e-9);
        assert!((rects[1].x - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_break_outside_columns_is_clipped() {
        let schedule = schedule(vec![session(0, 1, 9, 2.0)], 8, 17, 1);
        let breaks = vec![PositionedBreakSpan {
            week_index: 2,
            day_of_week: 3,
            date: date(2024, 1, 17),
            start_hour: 8,
            finish_hour: 17,
        }];
        let (_, summary) = render_with(&LayoutConfig::default(), &schedule, &breaks);
        assert_eq!(summary.breaks_drawn, 0);
        assert_eq!(summary.breaks_clipped, 1);
    }

    #[test]
    fn test_label_at_five_units_is_compact() {
        let schedule = schedule(vec![session(0, 1, 8, 5.0)], 8, 17, 1);
        let (surface, _) = render_with(&unit_layout(), &schedule, &[]);

        let rect = *surface.rects().last().unwrap();
        assert!((rect.height - 5.0).abs() < 1e-12);
        let line = texts_at(&surface, rect.y + 2.0);
        assert_eq!(line, vec!["Mat".to_string(), "A101".to_string()]);
        assert!(texts_at(&surface, rect.y + 5.0).is_empty());
    }

    #[test]
    fn test_compact_location_follows_name() {
        let schedule = schedule(vec![session(0, 1, 8, 2.0)], 8, 17, 1);
        let (surface, _) = render_with(&unit_layout(), &schedule, &[]);

        let texts = surface.texts();
        let name = texts.iter().find(|(t, _, _)| t == "Mat").unwrap();
        let location = texts.iter().find(|(t, _, _)| t == "A101").unwrap();
        assert!(location.1 > name.1);
        assert!((location.2 - name.2).abs() < 1e-12);
    }

    #[test]
    fn test_label_above_five_units_has_location_line() {
        let schedule = schedule(vec![session(0, 1, 8, 5.01)], 8, 17, 1);
        let (surface, _) = render_with(&unit_layout(), &schedule, &[]);

        let rect = *surface.rects().last().unwrap();
        assert_eq!(texts_at(&surface, rect.y + 2.0), vec!["Mat".to_string()]);
        assert_eq!(texts_at(&surface, rect.y + 5.0), vec!["A101".to_string()]);
        assert!(texts_at(&surface, rect.y + 8.0).is_empty());
    }

    #[test]
    fn test_label_above_nine_units_has_time_range() {
        let schedule = schedule(vec![session(0, 1, 8, 9.01)], 8, 17, 1);
        let (surface, _) = render_with(&unit_layout(), &schedule, &[]);

        let rect = *surface.rects().last().unwrap();
        assert_eq!(texts_at(&surface, rect.y + 5.0), vec!["A101".to_string()]);
        assert_eq!(
            texts_at(&surface, rect.y + 8.0),
            vec!["10:00 - 11:30".to_string()]
        );
    }

    #[test]
    fn test_non_finite_session_is_skipped() {
        let schedule = schedule(vec![session(0, 1, 9, f64::NAN), session(0, 2, 9, 1.0)], 8, 17, 1);
        let (surface, summary) = render_with(&LayoutConfig::default(), &schedule, &[]);

        assert_eq!(summary.sessions_drawn, 1);
        assert_eq!(summary.sessions_skipped, 1);
        assert!(surface.rects().iter().all(|r| r.is_finite()));
    }

    #[test]
    fn test_session_finishing_before_start_is_skipped() {
        let schedule = schedule(vec![session(0, 1, 9, -1.5), session(0, 2, 9, 1.0)], 8, 17, 1);
        let (surface, summary) = render_with(&LayoutConfig::default(), &schedule, &[]);

        assert_eq!(summary.sessions_drawn, 1);
        assert_eq!(summary.sessions_skipped, 1);
        assert!(surface.rects().iter().all(|r| r.height >= 0.0));
    }

    #[test]
    fn test_date_labels_fill_cells() {
        let schedule = schedule(vec![session(0, 1, 9, 1.0)], 8, 17, 2);
        let (surface, _) = render_with(&LayoutConfig::default(), &schedule, &[]);

        let texts = surface.texts();
        let monday = texts.iter().find(|(t, _, _)| t == "08.01").unwrap();
        assert!((monday.1 - 15.5).abs() < 1e-9);
        assert!((monday.2 - 14.5).abs() < 1e-9);

        // week 2 Saturday sits in the last row, second column
        let saturday = texts.iter().find(|(t, _, _)| t == "20.01").unwrap();
        assert!((saturday.1 - (15.0 + 133.5 + 0.5)).abs() < 1e-9);
        assert!((saturday.2 - (15.0 + 5.0 * 30.0 - 0.5)).abs() < 1e-9);
        assert!(!texts.iter().any(|(t, _, _)| t == "14.01"));
    }

    #[test]
    fn test_hour_labels_on_both_sides() {
        let schedule = schedule(vec![session(0, 1, 9, 1.0)], 8, 11, 1);
        let (surface, _) = render_with(&LayoutConfig::default(), &schedule, &[]);

        let right_aligned: Vec<_> = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { align: TextAlign::Right, .. }))
            .collect();
        assert_eq!(right_aligned.len(), 6 * 3);

        let eights = surface.texts().into_iter().filter(|(t, _, _)| t == "8").count();
        assert_eq!(eights, 6 * 2);
    }

    #[test]
    fn test_dashed_sublines_per_internal_hour() {
        let schedule = schedule(vec![session(0, 1, 9, 1.0)], 8, 12, 1);
        let (surface, _) = render_with(&LayoutConfig::default(), &schedule, &[]);

        let mut dashed = false;
        let mut dashed_lines = 0;
        for command in surface.commands() {
            match command {
                DrawCommand::Dashed(on) => dashed = *on,
                DrawCommand::Line { .. } if dashed => dashed_lines += 1,
                _ => {}
            }
        }
        assert_eq!(dashed_lines, 6 * 3);
        assert!(surface
            .commands()
            .contains(&DrawCommand::StrokeColor(SUBLINE_STROKE)));
    }

    #[test]
    fn test_day_row_labels() {
        let schedule = schedule(vec![session(0, 1, 9, 1.0)], 8, 17, 1);
        let (surface, _) = render_with(&LayoutConfig::default(), &schedule, &[]);

        let texts = surface.texts();
        for (i, label) in ["Mo", "Di", "Mi", "Do", "Fr", "Sa"].iter().enumerate() {
            let found = texts.iter().find(|(t, _, _)| t == label).unwrap();
            assert!((found.1 - 2.0).abs() < 1e-9);
            assert!((found.2 - (15.0 + i as f64 * 30.0 + 15.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_footer_parts() {
        let schedule = schedule(vec![session(0, 1, 9, 1.0)], 8, 17, 1);
        let (surface, _) = render_with(&LayoutConfig::default(), &schedule, &[]);

        let footer = texts_at(&surface, 200.0);
        assert_eq!(
            footer,
            vec![
                "Kurs: ", "HF ET 23F", " // ",
                "Klasse: ", "Klasse A", " // ",
                "Zeitraum: ", "08.01.2024 - 29.06.2024", " // ",
                "Gedruckt: ", "14.10.2026",
            ]
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
        );

        let xs: Vec<f64> = surface
            .texts()
            .into_iter()
            .filter(|(_, _, y)| (*y - 200.0).abs() < 1e-9)
            .map(|(_, x, _)| x)
            .collect();
        assert!((xs[0] - 15.0).abs() < 1e-9);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_footer_without_class() {
        let schedule = schedule(vec![session(0, 1, 9, 1.0)], 8, 17, 1);
        let labels = LabelConfig::default();
        let layout = LayoutConfig::default();
        let renderer = GridRenderer::new(&layout, &labels, WeekModel::ACADEMIC);
        let course = course(None);
        let dates = strip(1);
        let input = RenderInput {
            schedule: &schedule,
            breaks: &[],
            date_strip: &dates,
            course: &course,
            generated_on: date(2026, 10, 14),
        };
        let mut surface = RecordingSurface::new(PageSize::A4_LANDSCAPE);
        renderer.render(&mut surface, &input).unwrap();

        assert!(!texts_at(&surface, 200.0).contains(&"Klasse: ".to_string()));
    }

    #[test]
    fn test_render_is_deterministic() {
        let schedule = schedule(
            vec![session(0, 1, 9, 1.5), session(1, 4, 13, 3.0), session(2, 6, 8, 0.75)],
            8,
            17,
            3,
        );
        let (first, _) = render_with(&LayoutConfig::default(), &schedule, &[]);
        let (second, _) = render_with(&LayoutConfig::default(), &schedule, &[]);
        assert_eq!(first.finish().unwrap(), second.finish().unwrap());
    }

    #[test]
    fn test_degenerate_bounds_draw_nothing() {
        let schedule = schedule(vec![session(0, 1, 9, 1.0)], 9, 9, 1);
        let labels = LabelConfig::default();
        let layout = LayoutConfig::default();
        let renderer = GridRenderer::new(&layout, &labels, WeekModel::ACADEMIC);
        let course = course(None);
        let input = RenderInput {
            schedule: &schedule,
            breaks: &[],
            date_strip: &[],
            course: &course,
            generated_on: date(2026, 10, 14),
        };
        let mut surface = RecordingSurface::new(PageSize::A4_LANDSCAPE);

        let err = renderer.render(&mut surface, &input).unwrap_err();
        assert!(matches!(err, TimetableError::DegenerateHourRange { .. }));
        assert!(surface.commands().is_empty());
    }
}
