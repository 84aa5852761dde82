//! Repository Integration Tests
//!
//! Runs every repository against an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{
        Chore, DomainError, Equipment, Location, NamedRef, Recurrence, Role, Step, Task, User,
    };
    use crate::repository::{
        init_db, ChoreRepository, DbState, EquipmentRepository, LocationRepository, NamedRepository, Repository,
        TaskRepository, UserRepository,
    };
    use std::path::PathBuf;

    async fn setup_test_db() -> DbState {
        // Use in-memory database for tests
        init_db(&PathBuf::from(":memory:")).await.expect("Failed to init test DB")
    }

    #[tokio::test]
    async fn test_create_and_find_location() {
        let db = setup_test_db().await;
        let repo = LocationRepository::new(db.conn.clone());

        let mut location = Location::new(0, "Garage".to_string());
        location.notes = vec!["Side door sticks".to_string()];
        let created = repo.create(&location).await.expect("Failed to create");
        assert!(created.id > 0);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_name("Garage").await.unwrap().is_some());
        assert!(repo.find_by_name("garage").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_locations_sorted_by_name() {
        let db = setup_test_db().await;
        let repo = LocationRepository::new(db.conn.clone());

        repo.create(&Location::new(0, "Shed".to_string())).await.unwrap();
        repo.create(&Location::new(0, "Attic".to_string())).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Attic", "Shed"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let db = setup_test_db().await;
        let repo = LocationRepository::new(db.conn.clone());

        repo.create(&Location::new(0, "Garage".to_string())).await.unwrap();
        let result = repo.create(&Location::new(0, "Garage".to_string())).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_missing_location_is_not_found() {
        let db = setup_test_db().await;
        let repo = LocationRepository::new(db.conn.clone());

        let result = repo.update(&Location::new(99, "Nowhere".to_string())).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
        assert!(matches!(repo.delete(99).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_equipment_carries_location_name() {
        let db = setup_test_db().await;
        let locations = LocationRepository::new(db.conn.clone());
        let equipment = EquipmentRepository::new(db.conn.clone());

        let closet = locations.create(&Location::new(0, "Closet".to_string())).await.unwrap();
        let mut vacuum = Equipment::new(0, "Vacuum".to_string());
        vacuum.count = Some(2);
        vacuum.location = Some(NamedRef { id: closet.id, name: String::new() });
        let created = equipment.create(&vacuum).await.unwrap();

        assert_eq!(created.count, Some(2));
        assert_eq!(created.location.as_ref().map(|l| l.name.as_str()), Some("Closet"));
    }

    #[tokio::test]
    async fn test_deleting_location_detaches_equipment() {
        let db = setup_test_db().await;
        let locations = LocationRepository::new(db.conn.clone());
        let equipment = EquipmentRepository::new(db.conn.clone());

        let shed = locations.create(&Location::new(0, "Shed".to_string())).await.unwrap();
        let mut rake = Equipment::new(0, "Rake".to_string());
        rake.location = Some(NamedRef { id: shed.id, name: "Shed".to_string() });
        let rake = equipment.create(&rake).await.unwrap();

        locations.delete(shed.id).await.unwrap();

        let rake = equipment.find_by_id(rake.id).await.unwrap().unwrap();
        assert_eq!(rake.location, None);
    }

    #[tokio::test]
    async fn test_task_steps_and_equipment() {
        let db = setup_test_db().await;
        let equipment = EquipmentRepository::new(db.conn.clone());
        let tasks = TaskRepository::new(db.conn.clone());

        let mop = equipment.create(&Equipment::new(0, "Mop".to_string())).await.unwrap();
        let bucket = equipment.create(&Equipment::new(0, "Bucket".to_string())).await.unwrap();

        let mut task = Task::new(0, "Mop floors".to_string());
        task.steps = vec![
            Step { name: "Fill bucket".to_string(), description: String::new(), order: 0 },
            Step { name: "Mop".to_string(), description: "Start far side".to_string(), order: 1 },
        ];
        task.equipment = vec![
            NamedRef { id: mop.id, name: String::new() },
            NamedRef { id: bucket.id, name: String::new() },
        ];
        let created = tasks.create(&task).await.unwrap();

        assert_eq!(created.steps, task.steps);
        let names: Vec<&str> = created.equipment.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bucket", "Mop"]);

        // Dropping equipment removes it from the task
        equipment.delete(bucket.id).await.unwrap();
        let reloaded = tasks.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.equipment.len(), 1);
    }

    #[tokio::test]
    async fn test_update_task_replaces_equipment() {
        let db = setup_test_db().await;
        let equipment = EquipmentRepository::new(db.conn.clone());
        let tasks = TaskRepository::new(db.conn.clone());

        let sponge = equipment.create(&Equipment::new(0, "Sponge".to_string())).await.unwrap();
        let mut task = Task::new(0, "Dishes".to_string());
        task.equipment = vec![NamedRef { id: sponge.id, name: String::new() }];
        let mut created = tasks.create(&task).await.unwrap();

        created.equipment.clear();
        created.name = "Wash dishes".to_string();
        let updated = tasks.update(&created).await.unwrap();
        assert_eq!(updated.name, "Wash dishes");
        assert!(updated.equipment.is_empty());

        tasks.delete(updated.id).await.unwrap();
        assert!(tasks.find_by_id(updated.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_count_and_lookup() {
        let db = setup_test_db().await;
        let users = UserRepository::new(db.conn.clone());
        assert_eq!(users.count().await.unwrap(), 0);

        let admin = User {
            id: 0,
            name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::Admin,
            email_verified: true,
        };
        users.create(&admin).await.unwrap();

        assert_eq!(users.count().await.unwrap(), 1);
        let found = users.find_by_email("admin@example.com").await.unwrap().unwrap();
        assert_eq!(found.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_chore_links_follow_deletes() {
        let db = setup_test_db().await;
        let equipment = EquipmentRepository::new(db.conn.clone());
        let tasks = TaskRepository::new(db.conn.clone());
        let chores = ChoreRepository::new(db.conn.clone());

        let broom = equipment.create(&Equipment::new(0, "Broom".to_string())).await.unwrap();
        let sweep = tasks.create(&Task::new(0, "Sweep".to_string())).await.unwrap();

        let mut chore = Chore::new(0, "Kitchen floor".to_string());
        chore.points = 5;
        chore.is_recurring = true;
        chore.recurrence = Some(Recurrence::Monthly);
        chore.recurrence_day_of_month = Some("1,15".to_string());
        chore.equipment = vec![NamedRef { id: broom.id, name: String::new() }];
        chore.tasks = vec![NamedRef { id: sweep.id, name: String::new() }];
        let created = chores.create(&chore).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.recurrence, Some(Recurrence::Monthly));
        assert_eq!(created.equipment[0].name, "Broom");
        assert_eq!(created.tasks[0].name, "Sweep");

        equipment.delete(broom.id).await.unwrap();
        tasks.delete(sweep.id).await.unwrap();
        let reloaded = chores.find_by_id(created.id).await.unwrap().unwrap();
        assert!(reloaded.equipment.is_empty());
        assert!(reloaded.tasks.is_empty());

        chores.delete(created.id).await.unwrap();
        assert!(chores.list().await.unwrap().is_empty());
        assert!(matches!(chores.delete(created.id).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ping_and_migrations_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("homebase.db");
        init_db(&path).await.unwrap();
        let db = init_db(&path).await.expect("second migration run");
        db.ping().await.unwrap();

        let empty = DbState::new();
        assert!(empty.ping().await.is_err());
    }
}
