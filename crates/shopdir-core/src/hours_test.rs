use chrono::TimeZone;

use super::*;

fn weekday_schedule() -> OpeningHours {
    OpeningHours::new().with_day(Weekday::Mon, DayHours::new("09:00", "17:00"))
}

/// 2024-01-01 was a Monday.
fn monday_at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

#[test]
fn open_during_hours() {
    let status = evaluate_status(&weekday_schedule(), monday_at(10, 0), TimeContext::utc());
    assert!(status.is_open);
    assert_eq!(status.message, "Open until 17:00");
    assert_eq!(status.state, StatusState::Open);
}

#[test]
fn before_opening() {
    let status = evaluate_status(&weekday_schedule(), monday_at(8, 0), TimeContext::utc());
    assert!(!status.is_open);
    assert_eq!(status.message, "Opens at 09:00");
    assert_eq!(status.state, StatusState::BeforeOpen);
}

#[test]
fn after_closing() {
    let status = evaluate_status(&weekday_schedule(), monday_at(18, 0), TimeContext::utc());
    assert!(!status.is_open);
    assert_eq!(status.message, "Closed - Opens tomorrow");
    assert_eq!(status.state, StatusState::AfterClose);
}

#[test]
fn boundaries_are_inclusive() {
    let hours = weekday_schedule();
    assert!(evaluate_at(&hours, Weekday::Mon, "09:00").is_open);
    assert!(evaluate_at(&hours, Weekday::Mon, "17:00").is_open);
    assert!(!evaluate_at(&hours, Weekday::Mon, "17:01").is_open);
    assert!(!evaluate_at(&hours, Weekday::Mon, "08:59").is_open);
}

#[test]
fn no_entry_for_today() {
    let status = evaluate_at(&weekday_schedule(), Weekday::Tue, "10:00");
    assert!(!status.is_open);
    assert_eq!(status.message, "Hours not available");
    assert_eq!(status.state, StatusState::NoScheduleForToday);
}

#[test]
fn empty_schedule_has_no_hours() {
    let status = evaluate_at(&OpeningHours::new(), Weekday::Sun, "12:00");
    assert_eq!(status.message, "Hours not available");
}

#[test]
fn explicitly_closed_ignores_times() {
    let hours = OpeningHours::new().with_day(
        Weekday::Mon,
        DayHours {
            open: "00:00".to_string(),
            close: "23:59".to_string(),
            is_closed: true,
        },
    );
    let status = evaluate_at(&hours, Weekday::Mon, "12:00");
    assert!(!status.is_open);
    assert_eq!(status.message, "Closed today");
    assert_eq!(status.state, StatusState::ExplicitlyClosed);
}

#[test]
fn overnight_hours_are_not_special_cased() {
    let hours = OpeningHours::new().with_day(Weekday::Fri, DayHours::new("22:00", "02:00"));
    assert_eq!(
        evaluate_at(&hours, Weekday::Fri, "23:00").state,
        StatusState::AfterClose
    );
    assert_eq!(
        evaluate_at(&hours, Weekday::Fri, "01:00").state,
        StatusState::BeforeOpen
    );
}

#[test]
fn every_minute_of_the_day_lands_in_one_state() {
    let hours = weekday_schedule();
    for h in 0..24 {
        for m in 0..60 {
            let now = format!("{h:02}:{m:02}");
            let status = evaluate_at(&hours, Weekday::Mon, &now);
            let minutes = h * 60 + m;
            let expected = if minutes < 9 * 60 {
                StatusState::BeforeOpen
            } else if minutes <= 17 * 60 {
                StatusState::Open
            } else {
                StatusState::AfterClose
            };
            assert_eq!(status.state, expected, "at {now}");
            assert_eq!(status.is_open, expected == StatusState::Open);
        }
    }
}

#[test]
fn fixed_offset_shifts_the_day() {
    // Monday 23:30 UTC is already Tuesday 01:30 at +02:00.
    let hours = OpeningHours::new()
        .with_day(Weekday::Mon, DayHours::new("09:00", "17:00"))
        .with_day(Weekday::Tue, DayHours::new("01:00", "03:00"));
    let ctx: TimeContext = "+02:00".parse().expect("valid offset");
    let status = evaluate_status(&hours, monday_at(23, 30), ctx);
    assert!(status.is_open);
    assert_eq!(status.message, "Open until 03:00");
}

#[test]
fn negative_offset_shifts_back() {
    // Monday 02:00 UTC is Sunday 21:00 at -05:00.
    let hours = OpeningHours::new().with_day(Weekday::Sun, DayHours::new("10:00", "22:00"));
    let ctx: TimeContext = "-05:00".parse().expect("valid offset");
    assert!(evaluate_status(&hours, monday_at(2, 0), ctx).is_open);
}

#[test]
fn time_context_parses_known_forms() {
    assert_eq!("local".parse::<TimeContext>(), Ok(TimeContext::Local));
    assert_eq!("UTC".parse::<TimeContext>(), Ok(TimeContext::utc()));
    assert_eq!(
        "+05:30".parse::<TimeContext>(),
        Ok(TimeContext::Fixed(
            FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("offset")
        ))
    );
}

#[test]
fn time_context_parses_negative_offset() {
    assert_eq!(
        " -03:30 ".parse::<TimeContext>(),
        Ok(TimeContext::Fixed(
            FixedOffset::west_opt(3 * 3600 + 30 * 60).expect("offset")
        ))
    );
}

#[test]
fn time_context_rejects_garbage() {
    for bad in ["", "+", "-", "05:30", "+5:30", "+24:00", "\u{2212}05:00", "Europe/Paris"] {
        assert!(
            matches!(
                bad.parse::<TimeContext>(),
                Err(CoreError::InvalidTimeContext(_))
            ),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn strict_accepts_well_formed_schedule() {
    let status = evaluate_status_strict(&weekday_schedule(), monday_at(10, 0), TimeContext::utc())
        .expect("well-formed schedule");
    assert!(status.is_open);
}

#[test]
fn strict_rejects_malformed_time() {
    let hours = OpeningHours::new().with_day(Weekday::Mon, DayHours::new("9:00", "17:00"));
    let err = evaluate_status_strict(&hours, monday_at(10, 0), TimeContext::utc()).unwrap_err();
    assert_eq!(
        err,
        CoreError::MalformedScheduleEntry {
            day: "monday".to_string(),
            field: "open",
            value: "9:00".to_string(),
        }
    );
}

#[test]
fn strict_rejects_out_of_range_close() {
    let hours = OpeningHours::new().with_day(Weekday::Mon, DayHours::new("09:00", "25:00"));
    let err = evaluate_status_strict(&hours, monday_at(10, 0), TimeContext::utc()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::MalformedScheduleEntry { field: "close", .. }
    ));
}

#[test]
fn strict_ignores_closed_and_other_days() {
    let hours = OpeningHours::new()
        .with_day(Weekday::Mon, DayHours::closed())
        .with_day(Weekday::Tue, DayHours::new("bogus", "data"));
    let status = evaluate_status_strict(&hours, monday_at(10, 0), TimeContext::utc())
        .expect("closed day is not inspected");
    assert_eq!(status.state, StatusState::ExplicitlyClosed);
}

#[test]
fn deserializes_wire_shape() {
    let hours: OpeningHours = serde_json::from_str(
        r#"{
            "monday": {"open": "08:00", "close": "20:00"},
            "sunday": {"open": "", "close": "", "isClosed": true}
        }"#,
    )
    .expect("valid opening hours");
    assert_eq!(hours.get(Weekday::Mon), Some(&DayHours::new("08:00", "20:00")));
    assert!(hours.get(Weekday::Sun).is_some_and(|h| h.is_closed));
    assert!(hours.get(Weekday::Tue).is_none());
}

#[test]
fn closed_day_without_times_deserializes() {
    let hours: OpeningHours =
        serde_json::from_str(r#"{"sunday": {"isClosed": true}}"#).expect("closed day needs no times");
    assert!(hours.get(Weekday::Sun).is_some_and(|h| h.is_closed));

    // 2024-01-07 is a Sunday
    let sunday_noon = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();
    let status = evaluate_status(&hours, sunday_noon, TimeContext::utc());
    assert_eq!(status.state, StatusState::ExplicitlyClosed);
    assert_eq!(status.message, "Closed today");
}

#[test]
fn null_day_reads_as_no_schedule() {
    let hours: OpeningHours = serde_json::from_str(
        r#"{"monday": {"open": "09:00", "close": "17:00"}, "tuesday": null}"#,
    )
    .expect("null day is tolerated");
    assert!(hours.get(Weekday::Tue).is_none());
    assert!(hours.get(Weekday::Mon).is_some());

    let status = evaluate_at(&hours, Weekday::Tue, "10:00");
    assert_eq!(status.state, StatusState::NoScheduleForToday);
    assert_eq!(status.message, "Hours not available");
}

#[test]
fn null_schedule_is_empty() {
    let hours: OpeningHours = serde_json::from_str("null").expect("null schedule is tolerated");
    assert!(hours.is_empty());
}

#[test]
fn status_serializes_without_state() {
    let status = evaluate_at(&weekday_schedule(), Weekday::Mon, "10:00");
    let json = serde_json::to_value(&status).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({"isOpen": true, "message": "Open until 17:00"})
    );
}

#[test]
fn format_working_hours_lists_full_week() {
    let hours = OpeningHours::new()
        .with_day(Weekday::Mon, DayHours::new("09:00", "17:00"))
        .with_day(Weekday::Sat, DayHours::new("10:00", "16:00"))
        .with_day(Weekday::Sun, DayHours::closed());
    assert_eq!(
        format_working_hours(&hours),
        "Mon: 09:00 - 17:00, Tue: Closed, Wed: Closed, Thu: Closed, Fri: Closed, \
         Sat: 10:00 - 16:00, Sun: Closed"
    );
}
