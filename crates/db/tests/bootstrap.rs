use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check_and_status_seed(pool: PgPool) {
    scholarship_db::health_check(&pool).await.unwrap();

    let names: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM booking_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();

    let expected: Vec<(i16, String)> = scholarship_core::interview::BookingStatus::ALL
        .into_iter()
        .map(|s| (s.id(), s.as_str().to_string()))
        .collect();
    assert_eq!(names, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_occupancy_check_constraint_rejects_overflow(pool: PgPool) {
    let user: i64 = sqlx::query_scalar(
        "INSERT INTO users (email, full_name) VALUES ('a@b.c', 'A') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    let scholarship: i64 =
        sqlx::query_scalar("INSERT INTO scholarships (name) VALUES ('S') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

    let result = sqlx::query(
        "INSERT INTO interview_slots \
            (scholarship_id, interviewer_id, slot_date, start_time, end_time, \
             max_capacity, current_bookings, created_by) \
         VALUES ($1, $2, CURRENT_DATE, '09:00', '09:30', 1, 2, $2)",
    )
    .bind(scholarship)
    .bind(user)
    .execute(&pool)
    .await;

    let err = result.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23514"));
    assert_eq!(db_err.constraint(), Some("ck_interview_slots_occupancy"));
}
