use chrono::NaiveDate;
use entity::employees::NO_PHOTO;
use migration::{Migrator, MigratorTrait};
use platform_db::{
    DatabaseSettings, DbPool, StoreError, connect,
    departments::{self, DepartmentInput},
    employees::{self, EmployeeInput},
};

async fn setup() -> DbPool {
    let settings = DatabaseSettings::new("sqlite::memory:");
    let db = connect(&settings).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn department(name: &str) -> DepartmentInput {
    DepartmentInput {
        name: Some(name.to_string()),
    }
}

fn employee(name: &str, dept: &str) -> EmployeeInput {
    EmployeeInput {
        name: Some(name.to_string()),
        department: Some(dept.to_string()),
        date_of_joining: NaiveDate::from_ymd_opt(2024, 3, 1),
        photo_file_name: None,
    }
}

#[tokio::test]
async fn create_then_get_returns_the_created_record() {
    let db = setup().await;
    let created = departments::create(&db, department("Finance"))
        .await
        .unwrap();
    let fetched = departments::get(&db, created.id).await.unwrap();
    assert_eq!(created, fetched);
    assert_eq!(fetched.name, "Finance");
}

#[tokio::test]
async fn created_ids_are_unique_and_insertion_ordered() {
    let db = setup().await;
    let mut ids = Vec::new();
    for name in ["IT", "HR", "Finance"] {
        ids.push(departments::create(&db, department(name)).await.unwrap().id);
    }
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 3);

    let listed = departments::list(&db).await.unwrap();
    let listed_ids = listed.iter().map(|d| d.id).collect::<Vec<_>>();
    assert_eq!(listed_ids, ids);
}

#[tokio::test]
async fn blank_or_missing_name_fails_validation() {
    let db = setup().await;
    for input in [department("   "), DepartmentInput::default()] {
        match departments::create(&db, input).await {
            Err(StoreError::Validation(fields)) => assert!(fields.contains_key("name")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
    assert!(departments::list(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let db = setup().await;
    let created = departments::create(&db, department("Ops")).await.unwrap();
    departments::delete(&db, created.id).await.unwrap();
    assert!(matches!(
        departments::get(&db, created.id).await,
        Err(StoreError::NotFound)
    ));
    assert!(matches!(
        departments::delete(&db, created.id).await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn updating_a_missing_id_never_creates_a_record() {
    let db = setup().await;
    assert!(matches!(
        departments::update(&db, 42, department("Ghost")).await,
        Err(StoreError::NotFound)
    ));
    assert!(departments::list(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn updating_a_deleted_record_is_not_found() {
    let db = setup().await;
    let created = employees::create(&db, employee("Tmp", "IT")).await.unwrap();
    employees::delete(&db, created.id).await.unwrap();
    assert!(matches!(
        employees::update(&db, created.id, employee("Tmp", "IT")).await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn list_reflects_creates_minus_deletes() {
    let db = setup().await;
    let mut ids = Vec::new();
    for i in 0..5 {
        let created = departments::create(&db, department(&format!("Dept {i}")))
            .await
            .unwrap();
        ids.push(created.id);
    }
    departments::delete(&db, ids[0]).await.unwrap();
    departments::delete(&db, ids[3]).await.unwrap();
    let listed = departments::list(&db).await.unwrap();
    assert_eq!(listed.len(), 3);
}

#[tokio::test]
async fn employee_photo_defaults_and_survives_photoless_update() {
    let db = setup().await;
    let created = employees::create(&db, employee("Ann", "Finance"))
        .await
        .unwrap();
    assert_eq!(created.photo_file_name, NO_PHOTO);

    let mut input = employee("Ann Lee", "HR");
    input.photo_file_name = Some("ann.png".to_string());
    let updated = employees::update(&db, created.id, input).await.unwrap();
    assert_eq!(updated.photo_file_name, "ann.png");

    let updated = employees::update(&db, created.id, employee("Ann Lee", "HR"))
        .await
        .unwrap();
    assert_eq!(updated.photo_file_name, "ann.png");
    assert_eq!(updated.name, "Ann Lee");
    assert_eq!(updated.department, "HR");
}

#[tokio::test]
async fn employee_validation_collects_all_field_errors() {
    let db = setup().await;
    match employees::create(&db, EmployeeInput::default()).await {
        Err(StoreError::Validation(fields)) => {
            for field in ["name", "department", "date_of_joining"] {
                assert!(fields.contains_key(field), "missing {field}");
            }
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn department_reference_is_free_text_with_no_integrity() {
    let db = setup().await;
    // No department called "Atlantis" exists; create still succeeds.
    let created = employees::create(&db, employee("Bob", "Atlantis"))
        .await
        .unwrap();
    assert_eq!(created.department, "Atlantis");

    // Deleting a department leaves employees that reference it by name.
    let dept = departments::create(&db, department("Atlantis")).await.unwrap();
    departments::delete(&db, dept.id).await.unwrap();
    let remaining = employees::list(&db).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].department, "Atlantis");
}
