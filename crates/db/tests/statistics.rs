mod common;

use sqlx::PgPool;
use scholarship_core::types::DbId;
use scholarship_db::models::interview_statistics::StatisticsQuery;
use scholarship_db::repositories::{InterviewAvailabilityRepo, InterviewBookingRepo, InterviewStatisticsRepo};

use common::{future_date, Fixture};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_utilization_over_ten_slots_with_four_bookings(pool: PgPool) {
    let fx = Fixture::new(&pool).await;
    let day = future_date(6);
    let mut slots = Vec::new();
    for hour in 8..18 {
        let start = format!("{hour:02}:00");
        let end = format!("{hour:02}:30");
        slots.push(fx.create_slot(&pool, day, &start, &end, 1).await);
    }
    for (i, slot) in slots.iter().take(4).enumerate() {
        let (user_id, _, _) = fx.applicant(&pool, &format!("s{i}@example.com")).await;
        InterviewBookingRepo::create(&pool, user_id, slot.id, None)
            .await
            .unwrap();
    }

    let stats = InterviewStatisticsRepo::compute(
        &pool,
        &StatisticsQuery {
            scholarship_id: Some(fx.scholarship_id),
            date_from: Some(day),
            date_to: Some(day),
        },
    )
    .await
    .unwrap();

    assert_eq!(stats.total_slots, 10);
    assert_eq!(stats.available_slots, 6);
    assert_eq!(stats.total_bookings, 4);
    assert_eq!(stats.booked_bookings, 4);
    assert_eq!(stats.average_duration_minutes, None);
    assert_eq!(stats.utilization_rate, 40.0);
}

/// Backdate a booking's arrival so check-out yields `minutes` exactly.
async fn arrived_minutes_ago(pool: &PgPool, booking_id: DbId, minutes: i32) {
    sqlx::query(
        "UPDATE interview_bookings \
         SET check_in_time = NOW() - make_interval(mins => $2) - INTERVAL '10 seconds' \
         WHERE id = $1",
    )
    .bind(booking_id)
    .bind(minutes)
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_counts_every_booking_status(pool: PgPool) {
    let fx = Fixture::new(&pool).await;
    let day = future_date(6);
    let mut bookings = Vec::new();
    for hour in 8..14 {
        let start = format!("{hour:02}:00");
        let end = format!("{hour:02}:30");
        let slot = fx.create_slot(&pool, day, &start, &end, 1).await;
        let (user_id, _, _) = fx.applicant(&pool, &format!("s{hour}@example.com")).await;
        let booking = InterviewBookingRepo::create(&pool, user_id, slot.id, None)
            .await
            .unwrap();
        bookings.push(booking.id);
    }
    let [_still_booked, confirmed, cancelled, short_visit, long_visit, waiting] =
        bookings[..]
    else {
        panic!("expected six bookings");
    };

    InterviewBookingRepo::confirm(&pool, confirmed).await.unwrap();
    InterviewBookingRepo::cancel(&pool, cancelled, Some("Unwell")).await.unwrap();

    for (id, minutes) in [(short_visit, 30), (long_visit, 45)] {
        InterviewBookingRepo::check_in(&pool, id).await.unwrap();
        arrived_minutes_ago(&pool, id, minutes).await;
        InterviewBookingRepo::check_out(&pool, id).await.unwrap();
    }

    InterviewBookingRepo::confirm(&pool, waiting).await.unwrap();
    InterviewBookingRepo::check_in(&pool, waiting).await.unwrap();

    let stats = InterviewStatisticsRepo::compute(
        &pool,
        &StatisticsQuery {
            scholarship_id: Some(fx.scholarship_id),
            date_from: Some(day),
            date_to: Some(day),
        },
    )
    .await
    .unwrap();

    assert_eq!(stats.total_slots, 6);
    // Only the cancelled booking's seat was released.
    assert_eq!(stats.available_slots, 1);
    // Cancelled bookings still count towards the total.
    assert_eq!(stats.total_bookings, 6);
    assert_eq!(stats.booked_bookings, 1);
    assert_eq!(stats.confirmed_bookings, 2);
    assert_eq!(stats.cancelled_bookings, 1);
    assert_eq!(stats.completed_bookings, 2);
    assert_eq!(stats.checked_in, 3);
    assert_eq!(stats.average_duration_minutes, Some(37.5));
    assert_eq!(stats.utilization_rate, 100.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_range_reports_zero(pool: PgPool) {
    let stats = InterviewStatisticsRepo::compute(&pool, &StatisticsQuery::default())
        .await
        .unwrap();
    assert_eq!(stats.total_slots, 0);
    assert_eq!(stats.total_bookings, 0);
    assert_eq!(stats.utilization_rate, 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_calendar_groups_and_sorts(pool: PgPool) {
    let fx = Fixture::new(&pool).await;
    let first_day = future_date(2);
    let second_day = future_date(3);
    fx.create_slot(&pool, second_day, "09:00", "09:30", 1).await;
    let late = fx.create_slot(&pool, first_day, "14:00", "14:30", 1).await;
    let early = fx.create_slot(&pool, first_day, "08:00", "08:30", 1).await;
    let (user_id, _, _) = fx.applicant(&pool, "a@example.com").await;
    InterviewBookingRepo::create(&pool, user_id, early.id, None)
        .await
        .unwrap();

    let days = InterviewAvailabilityRepo::calendar(&pool, fx.scholarship_id, first_day, second_day)
        .await
        .unwrap();

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, first_day);
    assert_eq!(days[0].total_slots, 2);
    assert_eq!(days[0].available_slots, 1);
    assert_eq!(days[0].booked_slots, 1);
    assert_eq!(days[0].slots[0].slot_id, early.id);
    assert_eq!(days[0].slots[1].slot_id, late.id);
    assert_eq!(days[0].slots[0].interviewer_name.as_deref(), Some("Ivan Interviewer"));
    assert_eq!(days[0].slots[0].location, "TBA");
    assert_eq!(days[1].date, second_day);
}
