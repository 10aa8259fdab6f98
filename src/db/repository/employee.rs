//! Employee Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AuthIdentity, Employee, EmployeeCreate, EmployeeUpdate, Role};

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active employees, ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find all employees including inactive
    pub async fn find_all_with_inactive(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY name")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let emp: Option<Employee> = self.base.db().select(thing).await?;
        Ok(emp)
    }

    /// Find employee by email (lowercased)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let email = email.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Create a new employee
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let email = data.email.to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                email
            )));
        }

        let hash_pass = Employee::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;
        let username = email.split('@').next().unwrap_or(&email).to_string();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    name = $name,
                    username = $username,
                    email = $email,
                    hash_pass = $hash_pass,
                    role = $role,
                    team = $team,
                    company = $company,
                    active = true
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("username", username))
            .bind(("email", email))
            .bind(("hash_pass", hash_pass))
            .bind(("role", data.role))
            .bind(("team", data.team))
            .bind(("company", data.company))
            .await?;

        let created: Option<Employee> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Update an employee (partial)
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        let hash_pass = match data.password.as_deref() {
            Some(password) => Some(
                Employee::hash_password(password)
                    .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
            ),
            None => None,
        };

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    hash_pass = $hash_pass OR hash_pass,
                    role = IF $has_role THEN $role ELSE role END,
                    team = $team OR team,
                    company = $company OR company,
                    active = IF $has_active THEN $active ELSE active END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("hash_pass", hash_pass))
            .bind(("has_role", data.role.is_some()))
            .bind(("role", data.role))
            .bind(("team", data.team))
            .bind(("company", data.company))
            .bind(("has_active", data.active.is_some()))
            .bind(("active", data.active))
            .await?;

        result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Hard delete an employee
    ///
    /// Historical time records keep referencing the id; callers exclude
    /// orphaned records from scoped views.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    /// Return the profile for an identity, provisioning a default one when
    /// missing.
    ///
    /// New profiles get the EMPLOYEE role, team "Geral" and the given default
    /// company, unless the email matches the configured super-admin address,
    /// which is promoted to ADMIN.
    pub async fn get_or_create_profile(
        &self,
        identity: AuthIdentity,
        super_admin_email: &str,
        default_company: &str,
    ) -> RepoResult<Employee> {
        let email = identity.email.to_lowercase();
        if let Some(existing) = self.find_by_email(&email).await? {
            return Ok(existing);
        }

        let role = if email == super_admin_email.to_lowercase() {
            Role::Admin
        } else {
            Role::Employee
        };
        let name = identity
            .display_name
            .unwrap_or_else(|| "Colaborador".to_string());

        self.create(EmployeeCreate {
            name,
            email,
            password: identity.password,
            role,
            team: "Geral".to_string(),
            company: default_company.to_string(),
        })
        .await
    }
}
