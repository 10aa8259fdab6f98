//! Visibility scoping and profile provisioning
//! Run: cargo test --test role_scope

use hourbank_server::db::DbService;
use hourbank_server::db::models::{
    AuthIdentity, EmployeeCreate, RecordKind, RecordOrigin, Role, TimeRecord,
};
use hourbank_server::db::repository::{EmployeeRepository, RepoError, TimeRecordRepository};

async fn test_db() -> (tempfile::TempDir, DbService) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path()).await.unwrap();
    (tmp, db)
}

async fn seed(repo: &EmployeeRepository, name: &str, role: Role) -> String {
    let employee = repo
        .create(EmployeeCreate {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password: "senha-123".to_string(),
            role,
            team: "Geral".to_string(),
            company: "Arca Plast".to_string(),
        })
        .await
        .unwrap();
    employee.id.unwrap().to_string()
}

fn record(employee_id: &str, name: &str, created_by: &str) -> TimeRecord {
    TimeRecord {
        id: None,
        employee_id: employee_id.parse().unwrap(),
        employee_name: name.to_string(),
        date: "2026-04-01".to_string(),
        hours: 1,
        minutes: 0,
        kind: RecordKind::Credit,
        occurrence_type: "Hora Extra".to_string(),
        reason: "entrega urgente".to_string(),
        created_at: "2026-04-01T18:00:00Z".to_string(),
        created_by: created_by.parse().unwrap(),
        origin: RecordOrigin::Individual {
            start_time: None,
            end_time: None,
        },
    }
}

#[tokio::test]
async fn leader_scope_is_authorship_not_ownership() {
    let (_tmp, db) = test_db().await;
    let employees = EmployeeRepository::new(db.db.clone());
    let records = TimeRecordRepository::new(db.db.clone());

    let leader_a = seed(&employees, "Helena", Role::Leader).await;
    let leader_b = seed(&employees, "Igor", Role::Leader).await;
    let worker = seed(&employees, "Joana", Role::Employee).await;

    records
        .create(record(&worker, "Joana", &leader_a))
        .await
        .unwrap();
    records
        .create(record(&worker, "Joana", &leader_a))
        .await
        .unwrap();
    records
        .create(record(&worker, "Joana", &leader_b))
        .await
        .unwrap();

    let seen_by_a = records.find_by_creator(&leader_a).await.unwrap();
    assert_eq!(seen_by_a.len(), 2);
    for r in &seen_by_a {
        assert_eq!(r.created_by.to_string(), leader_a);
    }

    let seen_by_b = records.find_by_creator(&leader_b).await.unwrap();
    assert_eq!(seen_by_b.len(), 1);

    // The employee sees all three: they are the subject of every record
    let own = records.find_by_employee(&worker).await.unwrap();
    assert_eq!(own.len(), 3);
}

#[tokio::test]
async fn provisioning_promotes_only_the_super_admin_email() {
    let (_tmp, db) = test_db().await;
    let employees = EmployeeRepository::new(db.db.clone());

    let admin = employees
        .get_or_create_profile(
            AuthIdentity {
                email: "TI@arcaplast.com.br".to_string(),
                display_name: Some("TI".to_string()),
                password: "senha-forte".to_string(),
            },
            "ti@arcaplast.com.br",
            "Arca Plast",
        )
        .await
        .unwrap();
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(admin.email, "ti@arcaplast.com.br");

    let regular = employees
        .get_or_create_profile(
            AuthIdentity {
                email: "kleber@arcaplast.com.br".to_string(),
                display_name: None,
                password: "senha-123".to_string(),
            },
            "ti@arcaplast.com.br",
            "Arca Plast",
        )
        .await
        .unwrap();
    assert_eq!(regular.role, Role::Employee);
    assert_eq!(regular.team, "Geral");
    assert_eq!(regular.name, "Colaborador");

    // Provisioning is idempotent
    let again = employees
        .get_or_create_profile(
            AuthIdentity {
                email: "ti@arcaplast.com.br".to_string(),
                display_name: None,
                password: "irrelevante".to_string(),
            },
            "ti@arcaplast.com.br",
            "Arca Plast",
        )
        .await
        .unwrap();
    assert_eq!(again.id, admin.id);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (_tmp, db) = test_db().await;
    let employees = EmployeeRepository::new(db.db.clone());

    seed(&employees, "Larissa", Role::Employee).await;
    let err = employees
        .create(EmployeeCreate {
            name: "Outra Larissa".to_string(),
            email: "LARISSA@example.com".to_string(),
            password: "senha-123".to_string(),
            role: Role::Employee,
            team: "Geral".to_string(),
            company: "Arca Plast".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn inactive_employees_leave_the_active_listing() {
    let (_tmp, db) = test_db().await;
    let employees = EmployeeRepository::new(db.db.clone());

    let id = seed(&employees, "Marcos", Role::Employee).await;
    seed(&employees, "Nina", Role::Employee).await;

    employees
        .update(
            &id,
            hourbank_server::db::models::EmployeeUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let active = employees.find_all().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Nina");

    let all = employees.find_all_with_inactive().await.unwrap();
    assert_eq!(all.len(), 2);
}
