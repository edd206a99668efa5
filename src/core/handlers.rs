//! Action handlers: typed requests in, parameterized statements out.
//!
//! Handlers never prompt. `forms` collects a [`Request`] from the operator and
//! [`execute`] turns it into database calls plus an [`Outcome`]. Multi-statement
//! handlers tag each statement with a step name so a failure reports where the
//! action stopped; nothing is retried or rolled back.

use crate::core::queries;
use crate::core::resolver::{self, FullName};
use crate::domain::model::{Outcome, RecordId};
use crate::domain::ports::Database;
use crate::utils::error::{Result, StepContext, TrackerError};
use crate::utils::validation::{normalize_name, validate_input, validate_last_name, Validate};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDepartment {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub title: String,
    pub salary: i64,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    /// Full name of the manager; `None` for a top-level manager.
    pub manager: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChange {
    pub employee: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerChange {
    pub employee: String,
    pub manager: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ViewDepartments,
    AddDepartment(NewDepartment),
    DeleteDepartment { name: String },
    ViewRoles,
    AddRole(NewRole),
    DeleteRole { title: String },
    ViewEmployees,
    AddEmployee(NewEmployee),
    ViewEmployeesByDepartment { department: String },
    ViewEmployeesByRole { role: String },
    ViewEmployeesByManager { manager: String },
    UpdateEmployeeRole(RoleChange),
    UpdateEmployeeManager(ManagerChange),
    DeleteEmployee { employee: String },
}

impl Validate for NewDepartment {
    fn validate(&self) -> Result<()> {
        validate_input(&self.name)
    }
}

impl Validate for NewRole {
    fn validate(&self) -> Result<()> {
        validate_input(&self.title)?;
        if self.salary < 0 {
            return Err(TrackerError::validation("salary", "salary cannot be negative"));
        }
        Ok(())
    }
}

impl NewEmployee {
    /// Copy with both name parts trimmed and single-spaced.
    pub fn normalized(&self) -> Self {
        Self {
            first_name: normalize_name(&self.first_name),
            last_name: normalize_name(&self.last_name),
            ..self.clone()
        }
    }
}

impl Validate for NewEmployee {
    fn validate(&self) -> Result<()> {
        validate_input(&self.first_name)?;
        validate_last_name(&self.last_name)
    }
}

pub async fn execute<D: Database + ?Sized>(db: &D, request: Request) -> Result<Outcome> {
    match request {
        Request::ViewDepartments => view_departments(db).await,
        Request::AddDepartment(new) => add_department(db, &new).await,
        Request::DeleteDepartment { name } => delete_department(db, &name).await,
        Request::ViewRoles => view_roles(db).await,
        Request::AddRole(new) => add_role(db, &new).await,
        Request::DeleteRole { title } => delete_role(db, &title).await,
        Request::ViewEmployees => view_employees(db).await,
        Request::AddEmployee(new) => add_employee(db, &new).await,
        Request::ViewEmployeesByDepartment { department } => {
            employees_by_department(db, &department).await
        }
        Request::ViewEmployeesByRole { role } => employees_by_role(db, &role).await,
        Request::ViewEmployeesByManager { manager } => employees_by_manager(db, &manager).await,
        Request::UpdateEmployeeRole(change) => update_employee_role(db, &change).await,
        Request::UpdateEmployeeManager(change) => update_employee_manager(db, &change).await,
        Request::DeleteEmployee { employee } => delete_employee(db, &employee).await,
    }
}

pub async fn view_departments<D: Database + ?Sized>(db: &D) -> Result<Outcome> {
    let rows = db.query(queries::VIEW_DEPARTMENTS, &[]).await?;
    Ok(Outcome::table("All departments:", rows))
}

pub async fn add_department<D: Database + ?Sized>(db: &D, new: &NewDepartment) -> Result<Outcome> {
    new.validate()?;
    let execution = db
        .execute(queries::INSERT_DEPARTMENT, &[Value::from(new.name.as_str())])
        .await?;
    tracing::info!("Added department '{}' as id {}", new.name, execution.last_insert_id);
    Ok(Outcome::message(format!(
        "The {} Department has been added",
        new.name
    )))
}

pub async fn delete_department<D: Database + ?Sized>(db: &D, name: &str) -> Result<Outcome> {
    const ACTION: &str = "Delete Department";

    let id = resolver::resolve_department(db, name)
        .await
        .step(ACTION, "look up the department")?;
    let roles = count_dependents(db, queries::COUNT_ROLES_IN_DEPARTMENT, id)
        .await
        .step(ACTION, "check for roles in the department")?;
    if roles > 0 {
        return Err(TrackerError::DeleteBlocked {
            entity: "department",
            name: name.to_string(),
            dependents: roles,
            dependent_kind: "role(s)",
        });
    }

    db.execute(queries::DELETE_DEPARTMENT, &[Value::from(id)])
        .await
        .step(ACTION, "delete the department")?;
    tracing::info!("Deleted department '{}' (id {})", name, id);
    Ok(Outcome::message(format!(
        "The {} Department has been removed",
        name
    )))
}

pub async fn view_roles<D: Database + ?Sized>(db: &D) -> Result<Outcome> {
    let rows = db.query(queries::VIEW_ROLES, &[]).await?;
    Ok(Outcome::table("All roles:", rows))
}

pub async fn add_role<D: Database + ?Sized>(db: &D, new: &NewRole) -> Result<Outcome> {
    const ACTION: &str = "Add Role";

    new.validate()?;
    let department_id = resolver::resolve_department(db, &new.department)
        .await
        .step(ACTION, "look up the department")?;
    let execution = db
        .execute(
            queries::INSERT_ROLE,
            &[
                Value::from(new.title.as_str()),
                Value::from(new.salary),
                Value::from(department_id),
            ],
        )
        .await
        .step(ACTION, "insert the role")?;
    tracing::info!(
        "Added role '{}' as id {} in department {}",
        new.title,
        execution.last_insert_id,
        department_id
    );
    Ok(Outcome::message(format!(
        "The role of {} with a salary of ${} has been added to the {} Department",
        new.title, new.salary, new.department
    )))
}

pub async fn delete_role<D: Database + ?Sized>(db: &D, title: &str) -> Result<Outcome> {
    const ACTION: &str = "Delete Role";

    let id = resolver::resolve_role(db, title)
        .await
        .step(ACTION, "look up the role")?;
    let holders = count_dependents(db, queries::COUNT_EMPLOYEES_IN_ROLE, id)
        .await
        .step(ACTION, "check for employees in the role")?;
    if holders > 0 {
        return Err(TrackerError::DeleteBlocked {
            entity: "role",
            name: title.to_string(),
            dependents: holders,
            dependent_kind: "employee(s)",
        });
    }

    db.execute(queries::DELETE_ROLE, &[Value::from(id)])
        .await
        .step(ACTION, "delete the role")?;
    tracing::info!("Deleted role '{}' (id {})", title, id);
    Ok(Outcome::message(format!("The role of {} has been removed", title)))
}

pub async fn view_employees<D: Database + ?Sized>(db: &D) -> Result<Outcome> {
    let rows = db.query(queries::VIEW_EMPLOYEES, &[]).await?;
    Ok(Outcome::table("All employees:", rows))
}

pub async fn add_employee<D: Database + ?Sized>(db: &D, new: &NewEmployee) -> Result<Outcome> {
    const ACTION: &str = "Add Employee";

    let new = &new.normalized();
    new.validate()?;
    let role_id = resolver::resolve_role(db, &new.role)
        .await
        .step(ACTION, "look up the role")?;
    let manager_id = match &new.manager {
        Some(manager) => Some(
            resolver::resolve_employee(db, manager)
                .await
                .step(ACTION, "resolve the manager")?,
        ),
        None => None,
    };

    let execution = db
        .execute(
            queries::INSERT_EMPLOYEE,
            &[
                Value::from(new.first_name.as_str()),
                Value::from(new.last_name.as_str()),
                Value::from(role_id),
                manager_id.map(Value::from).unwrap_or(Value::Null),
            ],
        )
        .await
        .step(ACTION, "insert the employee")?;
    tracing::info!(
        "Added employee '{} {}' as id {}",
        new.first_name,
        new.last_name,
        execution.last_insert_id
    );
    Ok(Outcome::message(format!(
        "{} {} officially works as a(n) {}",
        new.first_name, new.last_name, new.role
    )))
}

pub async fn employees_by_department<D: Database + ?Sized>(
    db: &D,
    department: &str,
) -> Result<Outcome> {
    let rows = db
        .query(queries::EMPLOYEES_BY_DEPARTMENT, &[Value::from(department)])
        .await?;
    Ok(Outcome::table(
        format!("all employees in the {} Department:", department),
        rows,
    ))
}

pub async fn employees_by_role<D: Database + ?Sized>(db: &D, role: &str) -> Result<Outcome> {
    let rows = db
        .query(queries::EMPLOYEES_BY_ROLE, &[Value::from(role)])
        .await?;
    Ok(Outcome::table(
        format!("all employees working as a(n) {}:", role),
        rows,
    ))
}

pub async fn employees_by_manager<D: Database + ?Sized>(db: &D, manager: &str) -> Result<Outcome> {
    const ACTION: &str = "View Employees by Manager";

    let manager_id = resolver::resolve_employee(db, manager)
        .await
        .step(ACTION, "resolve the manager")?;
    let rows = db
        .query(queries::EMPLOYEES_BY_MANAGER, &[Value::from(manager_id)])
        .await
        .step(ACTION, "list the manager's reports")?;
    Ok(Outcome::table(
        format!("all employees working under {}:", manager),
        rows,
    ))
}

pub async fn update_employee_role<D: Database + ?Sized>(
    db: &D,
    change: &RoleChange,
) -> Result<Outcome> {
    const ACTION: &str = "Update Employee Role";

    let employee_id = resolver::resolve_employee(db, &change.employee)
        .await
        .step(ACTION, "resolve the employee")?;
    let role_id = resolver::resolve_role(db, &change.role)
        .await
        .step(ACTION, "look up the new role")?;
    db.execute(
        queries::UPDATE_EMPLOYEE_ROLE,
        &[Value::from(role_id), Value::from(employee_id)],
    )
    .await
    .step(ACTION, "update the employee")?;
    tracing::info!("Employee {} now holds role {}", employee_id, role_id);
    Ok(Outcome::message(format!(
        "{}'s role successfully updated to {}",
        change.employee, change.role
    )))
}

pub async fn update_employee_manager<D: Database + ?Sized>(
    db: &D,
    change: &ManagerChange,
) -> Result<Outcome> {
    const ACTION: &str = "Update Employee Manager";

    let employee_id = resolver::resolve_employee(db, &change.employee)
        .await
        .step(ACTION, "resolve the employee")?;
    let manager_id = resolver::resolve_employee(db, &change.manager)
        .await
        .step(ACTION, "resolve the new manager")?;
    if employee_id == manager_id {
        return Err(TrackerError::validation(
            "manager",
            format!("{} cannot manage themselves", FullName::parse(&change.employee)?),
        ));
    }

    db.execute(
        queries::UPDATE_EMPLOYEE_MANAGER,
        &[Value::from(manager_id), Value::from(employee_id)],
    )
    .await
    .step(ACTION, "update the employee")?;
    tracing::info!("Employee {} now reports to {}", employee_id, manager_id);
    Ok(Outcome::message(format!(
        "{}'s manager has been updated to {}",
        change.employee, change.manager
    )))
}

pub async fn delete_employee<D: Database + ?Sized>(db: &D, employee: &str) -> Result<Outcome> {
    const ACTION: &str = "Delete Employee";

    let id = resolver::resolve_employee(db, employee)
        .await
        .step(ACTION, "resolve the employee")?;
    let reports = count_dependents(db, queries::COUNT_REPORTS, id)
        .await
        .step(ACTION, "check for direct reports")?;
    if reports > 0 {
        return Err(TrackerError::DeleteBlocked {
            entity: "employee",
            name: employee.to_string(),
            dependents: reports,
            dependent_kind: "direct report(s)",
        });
    }

    db.execute(queries::DELETE_EMPLOYEE, &[Value::from(id)])
        .await
        .step(ACTION, "delete the employee")?;
    tracing::info!("Deleted employee '{}' (id {})", employee, id);
    Ok(Outcome::message(format!("{} has been removed", employee)))
}

async fn count_dependents<D: Database + ?Sized>(db: &D, sql: &str, id: RecordId) -> Result<i64> {
    let rows = db.query(sql, &[Value::from(id)]).await?;
    Ok(rows
        .first()
        .and_then(|row| row.get_i64("dependents"))
        .unwrap_or(0))
}
