/// Basic unit tests to verify core functionality
use chrono::NaiveDate;
use habit_streak_mcp::*;
use tempfile::NamedTempFile;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_habit_creation() {
        let habit = Habit::new(
            "Test Habit".to_string(),
            Some("A test habit".to_string()),
            Frequency::Daily,
            day(2024, 3, 13),
        );

        assert!(habit.is_ok());
        let habit = habit.unwrap();
        assert_eq!(habit.name, "Test Habit");
        assert_eq!(habit.created_at, day(2024, 3, 13));
    }

    #[test]
    fn test_completion_creation() {
        let habit_id = HabitId::new();
        let today = day(2024, 3, 13);

        let completion = Completion::new(habit_id, today);

        assert_eq!(completion.habit_id, habit_id);
        assert_eq!(completion.completed_at, today);
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!(" Weekly ".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert!("monthly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_server_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let config = ServerConfig {
            backend: StorageBackend::Sqlite(temp_file.path().to_path_buf()),
            today: None,
        };

        let server = HabitTrackerServer::open(&config);
        assert!(server.is_ok());
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path());
        assert!(storage.is_ok());
    }
}

/// The worked examples every streak engine change must keep passing
#[cfg(test)]
mod streak_examples {
    use super::*;

    // Wednesday
    fn today() -> NaiveDate {
        day(2024, 3, 13)
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - chrono::Duration::days(n)
    }

    #[test]
    fn test_empty_history() {
        let summary = compute_streaks(&[], Frequency::Daily, today());
        assert_eq!(summary, StreakSummary::default());
        assert_eq!(compute_weekly_progress(&[], Frequency::Daily, today()), 0);
    }

    #[test]
    fn test_daily_today_only() {
        let summary = compute_streaks(&[today()], Frequency::Daily, today());
        assert_eq!((summary.current_streak, summary.longest_streak), (1, 1));
        assert_eq!(summary.last_completed_at, Some(today()));
    }

    #[test]
    fn test_daily_three_in_a_row() {
        let dates = [today(), days_ago(1), days_ago(2)];
        assert_eq!(compute_streaks(&dates, Frequency::Daily, today()).current_streak, 3);
    }

    #[test]
    fn test_daily_gap_breaks_run() {
        let dates = [today(), days_ago(2)];
        let summary = compute_streaks(&dates, Frequency::Daily, today());
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.longest_streak, 1);
    }

    #[test]
    fn test_weekly_consecutive_sundays() {
        let dates = [day(2024, 3, 10), day(2024, 3, 3)];
        assert_eq!(compute_streaks(&dates, Frequency::Weekly, today()).current_streak, 2);
    }

    #[test]
    fn test_weekly_sundays_two_weeks_apart() {
        let dates = [day(2024, 3, 10), day(2024, 2, 25)];
        let summary = compute_streaks(&dates, Frequency::Weekly, today());
        assert_eq!((summary.current_streak, summary.longest_streak), (1, 1));
    }

    #[test]
    fn test_progress_examples() {
        // Saturday, so Sunday 10th through today is the whole week
        let saturday = day(2024, 3, 16);
        let four: Vec<NaiveDate> = (10..14).map(|d| day(2024, 3, d)).collect();
        assert_eq!(compute_weekly_progress(&four, Frequency::Daily, saturday), 57);

        let nine: Vec<NaiveDate> = (10..17).chain(15..17).map(|d| day(2024, 3, d)).collect();
        assert_eq!(compute_weekly_progress(&nine, Frequency::Daily, saturday), 100);

        assert_eq!(compute_weekly_progress(&[], Frequency::Weekly, saturday), 0);
        assert_eq!(compute_weekly_progress(&[day(2024, 3, 11)], Frequency::Weekly, saturday), 100);
    }
}
