mod common;

use anyhow::Result;
use common::{column_values, empty_directory, sample_directory};
use employee_tracker::core::handlers::{
    self, ManagerChange, NewDepartment, NewEmployee, NewRole, Request, RoleChange,
};
use employee_tracker::core::resolver::resolve_department;
use employee_tracker::core::{queries, Database};
use employee_tracker::TrackerError;
use serde_json::json;

fn department(name: &str) -> Request {
    Request::AddDepartment(NewDepartment {
        name: name.to_string(),
    })
}

fn role(title: &str, salary: i64, department: &str) -> Request {
    Request::AddRole(NewRole {
        title: title.to_string(),
        salary,
        department: department.to_string(),
    })
}

fn employee(first: &str, last: &str, role: &str, manager: Option<&str>) -> Request {
    Request::AddEmployee(NewEmployee {
        first_name: first.to_string(),
        last_name: last.to_string(),
        role: role.to_string(),
        manager: manager.map(str::to_string),
    })
}

#[tokio::test]
async fn added_department_is_listed_once() -> Result<()> {
    let db = empty_directory();

    let outcome = handlers::execute(&db, department("Logistics")).await?;
    assert_eq!(outcome.message, "The Logistics Department has been added");
    assert!(outcome.rows.is_none());

    let listed = handlers::execute(&db, Request::ViewDepartments).await?;
    let names = column_values(listed.rows.as_deref().unwrap_or_default(), "name");
    assert_eq!(names.iter().filter(|n| *n == "Logistics").count(), 1);
    Ok(())
}

#[tokio::test]
async fn duplicate_department_is_a_data_error() -> Result<()> {
    let db = empty_directory();
    handlers::execute(&db, department("Logistics")).await?;

    let err = handlers::execute(&db, department("Logistics"))
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Database(_)));
    assert!(err.is_recoverable());
    assert_eq!(queries::department_names(&db).await?, vec!["Logistics"]);
    Ok(())
}

#[tokio::test]
async fn added_role_points_at_its_department() -> Result<()> {
    let db = empty_directory();
    handlers::execute(&db, department("Finance")).await?;
    handlers::execute(&db, department("Logistics")).await?;

    let outcome = handlers::execute(&db, role("Analyst", 50000, "Logistics")).await?;
    assert_eq!(
        outcome.message,
        "The role of Analyst with a salary of $50000 has been added to the Logistics Department"
    );

    let logistics = resolve_department(&db, "Logistics").await?;
    let rows = db
        .query(
            "SELECT title, salary, department_id FROM role WHERE title = ?",
            &[json!("Analyst")],
        )
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_i64("salary"), Some(50000));
    assert_eq!(rows[0].get_i64("department_id"), Some(logistics));
    Ok(())
}

#[tokio::test]
async fn role_for_unknown_department_reports_the_lookup_step() {
    let db = empty_directory();

    let err = handlers::execute(&db, role("Analyst", 50000, "Nowhere"))
        .await
        .unwrap_err();
    match &err {
        TrackerError::ActionFailed { action, step, .. } => {
            assert_eq!(*action, "Add Role");
            assert_eq!(*step, "look up the department");
        }
        other => panic!("expected ActionFailed, got {other:?}"),
    }
    assert!(matches!(err.root(), TrackerError::NotFound { .. }));
}

#[tokio::test]
async fn department_with_roles_is_not_deleted() -> Result<()> {
    let db = empty_directory();
    handlers::execute(&db, department("Logistics")).await?;
    handlers::execute(&db, role("Analyst", 50000, "Logistics")).await?;

    let err = handlers::execute(
        &db,
        Request::DeleteDepartment {
            name: "Logistics".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        TrackerError::DeleteBlocked { dependents: 1, .. }
    ));

    assert_eq!(queries::department_names(&db).await?, vec!["Logistics"]);
    assert_eq!(queries::role_titles(&db).await?, vec!["Analyst"]);
    Ok(())
}

#[tokio::test]
async fn empty_department_is_deleted() -> Result<()> {
    let db = empty_directory();
    handlers::execute(&db, department("Logistics")).await?;
    handlers::execute(&db, department("Legal")).await?;

    let outcome = handlers::execute(
        &db,
        Request::DeleteDepartment {
            name: "Legal".to_string(),
        },
    )
    .await?;
    assert_eq!(outcome.message, "The Legal Department has been removed");
    assert_eq!(queries::department_names(&db).await?, vec!["Logistics"]);
    Ok(())
}

#[tokio::test]
async fn role_with_employees_is_not_deleted() -> Result<()> {
    let db = sample_directory();

    let err = handlers::execute(
        &db,
        Request::DeleteRole {
            title: "Cashier".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TrackerError::DeleteBlocked { .. }));

    handlers::execute(&db, role("Greeter", 28000, "Retail")).await?;
    let outcome = handlers::execute(
        &db,
        Request::DeleteRole {
            title: "Greeter".to_string(),
        },
    )
    .await?;
    assert_eq!(outcome.message, "The role of Greeter has been removed");
    Ok(())
}

#[tokio::test]
async fn employee_gets_resolved_role_and_manager() -> Result<()> {
    let db = sample_directory();

    let outcome = handlers::execute(
        &db,
        employee("Jane", "Doe", "Accountant", Some("Grace Hopper")),
    )
    .await?;
    assert_eq!(outcome.message, "Jane Doe officially works as a(n) Accountant");

    let rows = db
        .query(
            "SELECT role_id, manager_id FROM employee WHERE first_name = ? AND last_name = ?",
            &[json!("Jane"), json!("Doe")],
        )
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_i64("role_id"), Some(3));
    assert_eq!(rows[0].get_i64("manager_id"), Some(2));
    Ok(())
}

#[tokio::test]
async fn top_level_employee_has_no_manager() -> Result<()> {
    let db = sample_directory();

    handlers::execute(&db, employee("Steve", "Wozniak", "Chief Executive Officer", None)).await?;

    let rows = db
        .query(
            "SELECT manager_id FROM employee WHERE last_name = ?",
            &[json!("Wozniak")],
        )
        .await?;
    assert_eq!(rows[0].get("manager_id"), Some(&serde_json::Value::Null));
    Ok(())
}

#[tokio::test]
async fn ambiguous_manager_aborts_the_insert() -> Result<()> {
    let db = sample_directory();
    // A second Grace Hopper, also a manager.
    db.execute(
        "INSERT INTO employee (first_name, last_name, role_id, manager_id) VALUES (?, ?, ?, ?)",
        &[json!("Grace"), json!("Hopper"), json!(11), json!(5)],
    )
    .await?;
    let before = queries::employee_names(&db).await?.len();

    let err = handlers::execute(
        &db,
        employee("Jane", "Doe", "Accountant", Some("Grace Hopper")),
    )
    .await
    .unwrap_err();
    match &err {
        TrackerError::ActionFailed { step, .. } => assert_eq!(*step, "resolve the manager"),
        other => panic!("expected ActionFailed, got {other:?}"),
    }
    assert!(matches!(err.root(), TrackerError::AmbiguousName { .. }));
    assert_eq!(queries::employee_names(&db).await?.len(), before);
    Ok(())
}

#[tokio::test]
async fn quotes_in_names_are_stored_verbatim() -> Result<()> {
    let db = sample_directory();
    let first = "Bob\"); DROP TABLE role;--";

    handlers::execute(&db, employee(first, "Tables", "Cashier", Some("Frances Allen"))).await?;

    let rows = db
        .query(
            "SELECT first_name FROM employee WHERE last_name = ?",
            &[json!("Tables")],
        )
        .await?;
    assert_eq!(rows[0].get_str("first_name"), Some(first));
    assert_eq!(queries::role_titles(&db).await?.len(), 14);
    Ok(())
}

#[tokio::test]
async fn invalid_employee_names_are_rejected_before_any_lookup() {
    let db = sample_directory();

    let err = handlers::execute(&db, employee("Dick", "Van Dyke", "Cashier", None))
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation { .. }));

    let err = handlers::execute(&db, employee("", "Doe", "Cashier", None))
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation { .. }));
}

#[tokio::test]
async fn employee_role_is_updated_by_id() -> Result<()> {
    let db = sample_directory();

    let outcome = handlers::execute(
        &db,
        Request::UpdateEmployeeRole(RoleChange {
            employee: "Tony Hoare".to_string(),
            role: "Store Director".to_string(),
        }),
    )
    .await?;
    assert_eq!(
        outcome.message,
        "Tony Hoare's role successfully updated to Store Director"
    );

    let rows = db
        .query("SELECT role_id FROM employee WHERE id = ?", &[json!(13)])
        .await?;
    assert_eq!(rows[0].get_i64("role_id"), Some(11));
    Ok(())
}

#[tokio::test]
async fn employee_manager_is_updated() -> Result<()> {
    let db = sample_directory();

    let outcome = handlers::execute(
        &db,
        Request::UpdateEmployeeManager(ManagerChange {
            employee: "Ken Thompson".to_string(),
            manager: "Alan Turing".to_string(),
        }),
    )
    .await?;
    assert_eq!(
        outcome.message,
        "Ken Thompson's manager has been updated to Alan Turing"
    );

    let rows = db
        .query("SELECT manager_id FROM employee WHERE id = ?", &[json!(9)])
        .await?;
    assert_eq!(rows[0].get_i64("manager_id"), Some(3));
    Ok(())
}

#[tokio::test]
async fn nobody_manages_themselves() {
    let db = sample_directory();

    let err = handlers::execute(
        &db,
        Request::UpdateEmployeeManager(ManagerChange {
            employee: "Alan Turing".to_string(),
            manager: "Alan Turing".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TrackerError::Validation { .. }));
}

#[tokio::test]
async fn manager_with_reports_is_not_deleted() -> Result<()> {
    let db = sample_directory();

    let err = handlers::execute(
        &db,
        Request::DeleteEmployee {
            employee: "Donald Knuth".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        TrackerError::DeleteBlocked { dependents: 1, .. }
    ));

    let outcome = handlers::execute(
        &db,
        Request::DeleteEmployee {
            employee: "Ken Thompson".to_string(),
        },
    )
    .await?;
    assert_eq!(outcome.message, "Ken Thompson has been removed");
    assert!(!queries::employee_names(&db)
        .await?
        .contains(&"Ken Thompson".to_string()));
    Ok(())
}

#[tokio::test]
async fn filtered_views_return_matching_employees() -> Result<()> {
    let db = sample_directory();

    let by_department = handlers::execute(
        &db,
        Request::ViewEmployeesByDepartment {
            department: "Distribution".to_string(),
        },
    )
    .await?;
    assert_eq!(
        by_department.message,
        "all employees in the Distribution Department:"
    );
    assert_eq!(
        column_values(by_department.rows.as_deref().unwrap_or_default(), "full_name"),
        vec!["Alan Turing", "Donald Knuth", "Ken Thompson"]
    );

    let by_role = handlers::execute(
        &db,
        Request::ViewEmployeesByRole {
            role: "Machinist".to_string(),
        },
    )
    .await?;
    let rows = by_role.rows.unwrap_or_default();
    assert_eq!(column_values(&rows, "full_name"), vec!["Dennis Ritchie"]);
    assert_eq!(column_values(&rows, "title"), vec!["Machinist"]);
    assert_eq!(
        rows[0].columns().collect::<Vec<_>>(),
        vec!["id", "full_name", "title", "salary"]
    );

    let by_manager = handlers::execute(
        &db,
        Request::ViewEmployeesByManager {
            manager: "Ada Lovelace".to_string(),
        },
    )
    .await?;
    let rows = by_manager.rows.unwrap_or_default();
    assert_eq!(rows.len(), 5);
    assert_eq!(
        rows[0].columns().collect::<Vec<_>>(),
        vec!["id", "full_name", "title", "department", "salary"]
    );
    assert_eq!(rows[0].get_str("department"), Some("Finance"));
    Ok(())
}

#[tokio::test]
async fn manager_set_follows_the_title_allow_list() -> Result<()> {
    let db = sample_directory();

    let managers = queries::manager_names(&db).await?;
    assert_eq!(managers.len(), 9);
    assert_eq!(managers[0], "Ada Lovelace");
    assert!(managers.contains(&"Frances Allen".to_string()));
    assert!(!managers.contains(&"Tony Hoare".to_string()));
    Ok(())
}

#[tokio::test]
async fn spaced_first_name_can_still_be_resolved() -> Result<()> {
    let db = sample_directory();

    let outcome =
        handlers::execute(&db, employee("Mary  Ann", "Evans ", "Cashier", None)).await?;
    assert_eq!(outcome.message, "Mary Ann Evans officially works as a(n) Cashier");

    let names = queries::employee_names(&db).await?;
    let listed = names
        .iter()
        .find(|name| name.ends_with("Evans"))
        .cloned()
        .unwrap_or_default();
    assert_eq!(listed, "Mary Ann Evans");

    let outcome = handlers::execute(&db, Request::DeleteEmployee { employee: listed }).await?;
    assert!(outcome.message.contains("Mary Ann Evans"));
    assert!(!queries::employee_names(&db)
        .await?
        .iter()
        .any(|name| name.ends_with("Evans")));
    Ok(())
}
