/// Basic integration tests
use chrono::NaiveDate;
use habit_streak_mcp::tools::{self, CreateHabitParams, ListHabitsParams, ToggleHabitParams};
use habit_streak_mcp::*;
use tempfile::{tempdir, NamedTempFile};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[test]
    fn test_server_basic_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let config = ServerConfig {
            backend: StorageBackend::Sqlite(temp_file.path().to_path_buf()),
            today: Some(day(2024, 3, 13)),
        };
        let server = HabitTrackerServer::open(&config).expect("Failed to create server");

        assert_eq!(server.today(), day(2024, 3, 13));

        let created = tools::create_habit(
            server.storage(),
            CreateHabitParams {
                name: "Journal".to_string(),
                description: None,
                frequency: Frequency::Daily,
            },
            server.today(),
        )
        .expect("Failed to create habit");

        let toggled = tools::toggle_habit(
            server.storage(),
            ToggleHabitParams {
                habit_id: created.habit.id.to_string(),
            },
            server.today(),
        )
        .expect("Failed to toggle habit");

        assert!(toggled.completed);
        assert_eq!(toggled.habit.current_streak, 1);
    }

    #[test]
    fn test_database_persistence() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = ServerConfig {
            backend: StorageBackend::Sqlite(temp_dir.path().join("habits.db")),
            today: None,
        };

        // A week of completions written through the first server
        let habit_id = {
            let server = HabitTrackerServer::open(&config).expect("Failed to create first server");
            let habit = Habit::new("Walk".to_string(), None, Frequency::Daily, day(2024, 3, 1)).unwrap();
            server.storage().create_habit(&habit).unwrap();
            for d in 7..=13 {
                server
                    .storage()
                    .create_completion(&Completion::new(habit.id, day(2024, 3, d)))
                    .unwrap();
            }
            habit.id
        };

        // ...are seen by a second server over the same file
        let server = HabitTrackerServer::open(&config).expect("Failed to create second server");
        let listed = tools::list_habits(server.storage(), ListHabitsParams::default(), day(2024, 3, 14))
            .expect("Failed to list habits");

        assert_eq!(listed.habits.len(), 1);
        let walk = &listed.habits[0];
        assert_eq!(walk.habit.id, habit_id);
        // Yesterday counts, today is still open
        assert_eq!(walk.current_streak, 7);
        assert!(!walk.completed_today);
        assert_eq!(listed.overview.best_streak, 7);
    }

    #[test]
    fn test_storage_interface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let sqlite = SqliteStorage::new(temp_file.path()).expect("Failed to create storage");
        let memory = MemoryStorage::new();

        // Both backends behave the same through the trait object
        let backends: [&dyn HabitStorage; 2] = [&sqlite, &memory];
        for storage in backends {
            let habit = Habit::new("Plank".to_string(), None, Frequency::Weekly, day(2024, 3, 1)).unwrap();
            storage.create_habit(&habit).unwrap();

            let added = storage.toggle_completion(&habit.id, day(2024, 3, 13)).unwrap();
            assert!(matches!(added, ToggleOutcome::Added(_)));
            assert!(storage.get_completion(&habit.id, day(2024, 3, 13)).unwrap().is_some());

            let removed = storage.toggle_completion(&habit.id, day(2024, 3, 13)).unwrap();
            assert_eq!(removed, ToggleOutcome::Removed);

            storage.delete_habit(&habit.id).unwrap();
            assert!(matches!(
                storage.get_habit(&habit.id),
                Err(StorageError::HabitNotFound { .. })
            ));
        }
    }
}
