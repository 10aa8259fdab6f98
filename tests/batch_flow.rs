//! Batch lifecycle against an embedded store
//! Run: cargo test --test batch_flow

use hourbank_server::db::DbService;
use hourbank_server::db::models::{
    EmployeeCreate, RecordKind, RecordOrigin, Role, TimeRecord,
};
use hourbank_server::db::repository::{
    BatchRepository, BatchUpdate, EmployeeRepository, RepoError, TimeRecordRepository,
};

async fn test_db() -> (tempfile::TempDir, DbService) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path()).await.unwrap();
    (tmp, db)
}

async fn seed_employee(repo: &EmployeeRepository, name: &str) -> String {
    let employee = repo
        .create(EmployeeCreate {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password: "senha-123".to_string(),
            role: Role::Employee,
            team: "Produção".to_string(),
            company: "Arca Plast".to_string(),
        })
        .await
        .unwrap();
    employee.id.unwrap().to_string()
}

fn bulk_record(employee_id: &str, name: &str, batch_id: &str) -> TimeRecord {
    TimeRecord {
        id: None,
        employee_id: employee_id.parse().unwrap(),
        employee_name: name.to_string(),
        date: "2026-03-02".to_string(),
        hours: 2,
        minutes: 0,
        kind: RecordKind::Credit,
        occurrence_type: "BH Positivo (Crédito)".to_string(),
        reason: "mutirão de sábado".to_string(),
        created_at: "2026-03-02T08:00:00Z".to_string(),
        created_by: "employee:rh".parse().unwrap(),
        origin: RecordOrigin::Bulk {
            batch_id: batch_id.to_string(),
        },
    }
}

#[tokio::test]
async fn batch_create_shares_one_id() {
    let (_tmp, db) = test_db().await;
    let employees = EmployeeRepository::new(db.db.clone());
    let batches = BatchRepository::new(db.db.clone());

    let batch_id = "11111111-2222-3333-4444-555555555555";
    let mut records = Vec::new();
    for name in ["Ana", "Bruno", "Carla"] {
        let id = seed_employee(&employees, name).await;
        records.push(bulk_record(&id, name, batch_id));
    }

    let outcome = batches.bulk_create(batch_id, records).await.unwrap();
    assert_eq!(outcome.targeted, 3);
    assert_eq!(outcome.affected, 3);
    assert!(outcome.is_complete());

    let members = batches.find_by_batch(batch_id).await.unwrap();
    assert_eq!(members.len(), 3);
    for member in &members {
        assert_eq!(member.batch_id(), Some(batch_id));
        assert_eq!(member.kind, RecordKind::Credit);
    }
}

#[tokio::test]
async fn batch_update_keeps_per_record_fields() {
    let (_tmp, db) = test_db().await;
    let employees = EmployeeRepository::new(db.db.clone());
    let batches = BatchRepository::new(db.db.clone());

    let batch_id = "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee";
    let mut records = Vec::new();
    for name in ["Diego", "Elisa"] {
        let id = seed_employee(&employees, name).await;
        records.push(bulk_record(&id, name, batch_id));
    }
    batches.bulk_create(batch_id, records).await.unwrap();

    let outcome = batches
        .bulk_update(
            batch_id,
            BatchUpdate {
                occurrence_type: Some("BH Negativo (Débito)".to_string()),
                hours: Some(1),
                minutes: Some(30),
                reason: Some("ajuste do mutirão".to_string()),
                ..Default::default()
            },
            Some(RecordKind::Debit),
        )
        .await
        .unwrap();
    assert_eq!(outcome.targeted, 2);
    assert_eq!(outcome.affected, 2);

    let members = batches.find_by_batch(batch_id).await.unwrap();
    let names: Vec<&str> = members.iter().map(|m| m.employee_name.as_str()).collect();
    assert_eq!(names, vec!["Diego", "Elisa"]);
    for member in &members {
        assert_eq!(member.kind, RecordKind::Debit);
        assert_eq!(member.hours, 1);
        assert_eq!(member.minutes, 30);
        assert_eq!(member.reason, "ajuste do mutirão");
        // Batch membership never changes
        assert_eq!(member.batch_id(), Some(batch_id));
    }
}

#[tokio::test]
async fn batch_delete_removes_only_members() {
    let (_tmp, db) = test_db().await;
    let employees = EmployeeRepository::new(db.db.clone());
    let batches = BatchRepository::new(db.db.clone());
    let records_repo = TimeRecordRepository::new(db.db.clone());

    let fernanda = seed_employee(&employees, "Fernanda").await;

    // One individual record that must survive
    let mut individual = bulk_record(&fernanda, "Fernanda", "unused");
    individual.origin = RecordOrigin::Individual {
        start_time: None,
        end_time: None,
    };
    individual.occurrence_type = "Hora Extra".to_string();
    records_repo.create(individual).await.unwrap();

    let batch_id = "99999999-8888-7777-6666-555555555555";
    let members = vec![
        bulk_record(&fernanda, "Fernanda", batch_id),
        bulk_record(&fernanda, "Fernanda", batch_id),
    ];
    batches.bulk_create(batch_id, members).await.unwrap();
    assert_eq!(records_repo.find_all().await.unwrap().len(), 3);

    let outcome = batches.bulk_delete(batch_id).await.unwrap();
    assert_eq!(outcome.targeted, 2);
    assert_eq!(outcome.affected, 2);

    let remaining = records_repo.find_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].occurrence_type, "Hora Extra");
}

#[tokio::test]
async fn batch_members_refuse_single_record_mutation() {
    let (_tmp, db) = test_db().await;
    let employees = EmployeeRepository::new(db.db.clone());
    let batches = BatchRepository::new(db.db.clone());
    let records_repo = TimeRecordRepository::new(db.db.clone());

    let id = seed_employee(&employees, "Gustavo").await;
    let batch_id = "12121212-3434-5656-7878-909090909090";
    batches
        .bulk_create(batch_id, vec![bulk_record(&id, "Gustavo", batch_id)])
        .await
        .unwrap();

    let member = batches
        .find_by_batch(batch_id)
        .await
        .unwrap()
        .pop()
        .unwrap();
    let member_id = member.id.clone().unwrap().to_string();

    let err = records_repo
        .replace(&member_id, member.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = records_repo.delete(&member_id).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // The escape hatch is the batch operation
    let outcome = batches.bulk_delete(batch_id).await.unwrap();
    assert!(outcome.is_complete());
}

#[tokio::test]
async fn missing_batch_is_not_found() {
    let (_tmp, db) = test_db().await;
    let batches = BatchRepository::new(db.db.clone());

    let err = batches
        .bulk_update("no-such-batch", BatchUpdate::default(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    let err = batches.bulk_delete("no-such-batch").await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}
