//! SQL statements and the live lists that feed selection prompts.
//!
//! Everything here is parameterized with positional `?` placeholders.

use crate::domain::ports::Database;
use crate::utils::error::Result;
use serde_json::Value;

/// Role titles whose holders make up the manager set.
pub const MANAGER_TITLES: [&str; 9] = [
    "Chief Executive Officer",
    "Chief of Finance",
    "Chief of Distribution",
    "Chief of Production",
    "Chief of Retail",
    "Head of Employment",
    "Distribution Director",
    "Head of Production",
    "Store Director",
];

pub const DEPARTMENT_NAMES: &str = "SELECT name FROM department ORDER BY id";
pub const ROLE_TITLES: &str = "SELECT title FROM role ORDER BY id";
pub const EMPLOYEE_NAMES: &str =
    "SELECT first_name || ' ' || last_name AS full_name FROM employee ORDER BY id";

pub const VIEW_DEPARTMENTS: &str = "SELECT id, name FROM department ORDER BY id";
pub const VIEW_ROLES: &str = "SELECT role.id, role.title, role.salary, department.name AS department \
     FROM role \
     INNER JOIN department ON role.department_id = department.id \
     ORDER BY role.id";
pub const VIEW_EMPLOYEES: &str =
    "SELECT id, first_name, last_name, role_id, manager_id FROM employee ORDER BY id";

pub const EMPLOYEES_BY_DEPARTMENT: &str = "SELECT employee.id, \
            employee.first_name || ' ' || employee.last_name AS full_name, \
            role.title, \
            role.salary \
     FROM employee \
     INNER JOIN role ON employee.role_id = role.id \
     INNER JOIN department ON role.department_id = department.id \
     WHERE department.name = ? \
     ORDER BY employee.id";
pub const EMPLOYEES_BY_ROLE: &str = "SELECT employee.id, \
            employee.first_name || ' ' || employee.last_name AS full_name, \
            role.title, \
            role.salary \
     FROM employee \
     INNER JOIN role ON employee.role_id = role.id \
     WHERE role.title = ? \
     ORDER BY employee.id";
pub const EMPLOYEES_BY_MANAGER: &str = "SELECT employee.id, \
            employee.first_name || ' ' || employee.last_name AS full_name, \
            role.title, \
            department.name AS department, \
            role.salary \
     FROM employee \
     LEFT JOIN role ON employee.role_id = role.id \
     LEFT JOIN department ON role.department_id = department.id \
     WHERE employee.manager_id = ? \
     ORDER BY employee.id";

pub const DEPARTMENT_ID_BY_NAME: &str = "SELECT id FROM department WHERE name = ?";
pub const ROLE_ID_BY_TITLE: &str = "SELECT id FROM role WHERE title = ?";
pub const EMPLOYEE_ID_BY_NAME: &str =
    "SELECT id FROM employee WHERE first_name = ? AND last_name = ?";

pub const INSERT_DEPARTMENT: &str = "INSERT INTO department (name) VALUES (?)";
pub const INSERT_ROLE: &str = "INSERT INTO role (title, salary, department_id) VALUES (?, ?, ?)";
pub const INSERT_EMPLOYEE: &str =
    "INSERT INTO employee (first_name, last_name, role_id, manager_id) VALUES (?, ?, ?, ?)";

pub const UPDATE_EMPLOYEE_ROLE: &str = "UPDATE employee SET role_id = ? WHERE id = ?";
pub const UPDATE_EMPLOYEE_MANAGER: &str = "UPDATE employee SET manager_id = ? WHERE id = ?";

pub const COUNT_ROLES_IN_DEPARTMENT: &str =
    "SELECT COUNT(*) AS dependents FROM role WHERE department_id = ?";
pub const COUNT_EMPLOYEES_IN_ROLE: &str =
    "SELECT COUNT(*) AS dependents FROM employee WHERE role_id = ?";
pub const COUNT_REPORTS: &str = "SELECT COUNT(*) AS dependents FROM employee WHERE manager_id = ?";

pub const DELETE_DEPARTMENT: &str = "DELETE FROM department WHERE id = ?";
pub const DELETE_ROLE: &str = "DELETE FROM role WHERE id = ?";
pub const DELETE_EMPLOYEE: &str = "DELETE FROM employee WHERE id = ?";

/// `SELECT` for the manager set: one placeholder per managerial title.
pub fn manager_names_sql() -> String {
    let placeholders = vec!["?"; MANAGER_TITLES.len()].join(", ");
    format!(
        "SELECT employee.first_name || ' ' || employee.last_name AS manager_name \
         FROM employee \
         JOIN role ON employee.role_id = role.id \
         WHERE role.title IN ({}) \
         ORDER BY employee.id",
        placeholders
    )
}

pub fn manager_title_params() -> Vec<Value> {
    MANAGER_TITLES
        .iter()
        .map(|title| Value::from(*title))
        .collect()
}

async fn single_column<D: Database + ?Sized>(
    db: &D,
    sql: &str,
    params: &[Value],
    column: &str,
) -> Result<Vec<String>> {
    let rows = db.query(sql, params).await?;
    Ok(rows
        .iter()
        .filter_map(|row| row.get_str(column).map(str::to_string))
        .collect())
}

pub async fn department_names<D: Database + ?Sized>(db: &D) -> Result<Vec<String>> {
    single_column(db, DEPARTMENT_NAMES, &[], "name").await
}

pub async fn role_titles<D: Database + ?Sized>(db: &D) -> Result<Vec<String>> {
    single_column(db, ROLE_TITLES, &[], "title").await
}

pub async fn employee_names<D: Database + ?Sized>(db: &D) -> Result<Vec<String>> {
    single_column(db, EMPLOYEE_NAMES, &[], "full_name").await
}

pub async fn manager_names<D: Database + ?Sized>(db: &D) -> Result<Vec<String>> {
    single_column(db, &manager_names_sql(), &manager_title_params(), "manager_name").await
}
