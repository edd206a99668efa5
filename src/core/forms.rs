//! Field collection for each action, one prompt after another.
//!
//! Live lists (departments, roles, employees, managers) are read fresh from the
//! database every time a form runs.

use crate::core::actions::Action;
use crate::core::handlers::{ManagerChange, NewDepartment, NewEmployee, NewRole, Request, RoleChange};
use crate::core::queries;
use crate::domain::ports::{Database, Presenter};
use crate::utils::error::{Result, StepContext, TrackerError};
use crate::utils::validation::{parse_salary, validate_input, validate_last_name, validate_salary};

pub const NO_MANAGER: &str = "None (top-level manager)";

pub async fn collect<D, P>(action: Action, db: &D, presenter: &mut P) -> Result<Request>
where
    D: Database + ?Sized,
    P: Presenter + ?Sized,
{
    let action_name = action.name();
    let request = match action {
        Action::ViewDepartments => Request::ViewDepartments,
        Action::AddDepartment => {
            let name = presenter
                .input("What Department would you like to Add?", Some(validate_input))
                .await
                .step(action_name, "collect the department name")?;
            Request::AddDepartment(NewDepartment { name })
        }
        Action::DeleteDepartment => {
            let departments = queries::department_names(db)
                .await
                .step(action_name, "list departments")?;
            let name = pick(presenter, "Select Department to remove", departments, "departments")
                .await
                .step(action_name, "choose the department")?;
            Request::DeleteDepartment { name }
        }
        Action::ViewRoles => Request::ViewRoles,
        Action::AddRole => add_role(db, presenter).await.step(action_name, "collect the role")?,
        Action::DeleteRole => {
            let roles = queries::role_titles(db).await.step(action_name, "list roles")?;
            let title = pick(presenter, "Select ROLE to Remove", roles, "roles")
                .await
                .step(action_name, "choose the role")?;
            Request::DeleteRole { title }
        }
        Action::AddEmployee => add_employee(db, presenter)
            .await
            .step(action_name, "collect the employee")?,
        Action::ViewEmployees => Request::ViewEmployees,
        Action::ViewEmployeesByDepartment => {
            let departments = queries::department_names(db)
                .await
                .step(action_name, "list departments")?;
            let department = pick(
                presenter,
                "select DEPARTMENT to view all employees",
                departments,
                "departments",
            )
            .await
            .step(action_name, "choose the department")?;
            Request::ViewEmployeesByDepartment { department }
        }
        Action::ViewEmployeesByRole => {
            let roles = queries::role_titles(db).await.step(action_name, "list roles")?;
            let role = pick(presenter, "select the ROLE to view all employees", roles, "roles")
                .await
                .step(action_name, "choose the role")?;
            Request::ViewEmployeesByRole { role }
        }
        Action::ViewEmployeesByManager => {
            let managers = queries::manager_names(db)
                .await
                .step(action_name, "list managers")?;
            let manager = pick(
                presenter,
                "select a MANAGER to view employees working under them",
                managers,
                "managers",
            )
            .await
            .step(action_name, "choose the manager")?;
            Request::ViewEmployeesByManager { manager }
        }
        Action::UpdateEmployeeRole => {
            let employees = queries::employee_names(db)
                .await
                .step(action_name, "list employees")?;
            let roles = queries::role_titles(db).await.step(action_name, "list roles")?;
            let employee = pick(presenter, "select EMPLOYEE to change role of", employees, "employees")
                .await
                .step(action_name, "choose the employee")?;
            let role = pick(presenter, "select the employee's NEW ROLE", roles, "roles")
                .await
                .step(action_name, "choose the new role")?;
            Request::UpdateEmployeeRole(RoleChange { employee, role })
        }
        Action::UpdateEmployeeManager => {
            let employees = queries::employee_names(db)
                .await
                .step(action_name, "list employees")?;
            let managers = queries::manager_names(db)
                .await
                .step(action_name, "list managers")?;
            let employee = pick(
                presenter,
                "select EMPLOYEE that is changing managers",
                employees,
                "employees",
            )
            .await
            .step(action_name, "choose the employee")?;
            let manager = pick(presenter, "select the employee's NEW MANAGER", managers, "managers")
                .await
                .step(action_name, "choose the new manager")?;
            Request::UpdateEmployeeManager(ManagerChange { employee, manager })
        }
        Action::DeleteEmployee => {
            let employees = queries::employee_names(db)
                .await
                .step(action_name, "list employees")?;
            let employee = pick(presenter, "select EMPLOYEE to remove", employees, "employees")
                .await
                .step(action_name, "choose the employee")?;
            Request::DeleteEmployee { employee }
        }
    };

    Ok(request)
}

async fn add_role<D, P>(db: &D, presenter: &mut P) -> Result<Request>
where
    D: Database + ?Sized,
    P: Presenter + ?Sized,
{
    let departments = queries::department_names(db).await?;
    if departments.is_empty() {
        return Err(TrackerError::EmptyChoice {
            entity: "departments",
        });
    }

    let title = presenter
        .input("What is the Title of your New Role?", Some(validate_input))
        .await?;
    let salary = presenter
        .input("What is the Salary of the New Role?", Some(validate_salary))
        .await?;
    let department = pick(
        presenter,
        "Which department is the new role a part of?",
        departments,
        "departments",
    )
    .await?;

    Ok(Request::AddRole(NewRole {
        title,
        salary: parse_salary(&salary)?,
        department,
    }))
}

async fn add_employee<D, P>(db: &D, presenter: &mut P) -> Result<Request>
where
    D: Database + ?Sized,
    P: Presenter + ?Sized,
{
    let roles = queries::role_titles(db).await?;
    if roles.is_empty() {
        return Err(TrackerError::EmptyChoice { entity: "roles" });
    }
    let managers = queries::manager_names(db).await?;

    let first_name = presenter
        .input("enter the new employee's FIRST NAME", Some(validate_input))
        .await?;
    let last_name = presenter
        .input("enter the new employee's LAST NAME", Some(validate_last_name))
        .await?;
    let role = pick(presenter, "select the new employee's ROLE", roles, "roles").await?;

    let mut choices = Vec::with_capacity(managers.len() + 1);
    choices.push(NO_MANAGER.to_string());
    choices.extend(managers);
    let index = presenter
        .choose("select the new employee's MANAGER", &choices)
        .await?;
    let manager = match index {
        0 => None,
        i => Some(chosen(&choices, i)?),
    };

    Ok(Request::AddEmployee(NewEmployee {
        first_name,
        last_name,
        role,
        manager,
    }))
}

async fn pick<P: Presenter + ?Sized>(
    presenter: &mut P,
    message: &str,
    options: Vec<String>,
    entity: &'static str,
) -> Result<String> {
    if options.is_empty() {
        return Err(TrackerError::EmptyChoice { entity });
    }
    let index = presenter.choose(message, &options).await?;
    chosen(&options, index)
}

fn chosen(options: &[String], index: usize) -> Result<String> {
    options
        .get(index)
        .cloned()
        .ok_or_else(|| TrackerError::validation("choice", format!("no option number {}", index + 1)))
}
