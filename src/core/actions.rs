/// Leaf menu actions. Each one maps to exactly one handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ViewDepartments,
    AddDepartment,
    DeleteDepartment,
    ViewRoles,
    AddRole,
    DeleteRole,
    AddEmployee,
    ViewEmployees,
    ViewEmployeesByDepartment,
    ViewEmployeesByRole,
    ViewEmployeesByManager,
    UpdateEmployeeRole,
    UpdateEmployeeManager,
    DeleteEmployee,
}

impl Action {
    pub const fn label(self) -> &'static str {
        match self {
            Action::ViewDepartments => "View all departments.",
            Action::AddDepartment => "Add a department.",
            Action::DeleteDepartment => "Delete a department.",
            Action::ViewRoles => "View all Roles.",
            Action::AddRole => "Add a Role.",
            Action::DeleteRole => "Delete a Role.",
            Action::AddEmployee => "Add an employee.",
            Action::ViewEmployees => "View All Employees",
            Action::ViewEmployeesByDepartment => "View All Employees By Department",
            Action::ViewEmployeesByRole => "View All Employees By Role",
            Action::ViewEmployeesByManager => "View All Employees By Manager",
            Action::UpdateEmployeeRole => "Update Employee Role",
            Action::UpdateEmployeeManager => "Update Employee Manager",
            Action::DeleteEmployee => "Delete Employee",
        }
    }

    /// Short name used in logs and error reports.
    pub fn name(self) -> &'static str {
        match self {
            Action::ViewDepartments => "View Departments",
            Action::AddDepartment => "Add Department",
            Action::DeleteDepartment => "Delete Department",
            Action::ViewRoles => "View Roles",
            Action::AddRole => "Add Role",
            Action::DeleteRole => "Delete Role",
            Action::AddEmployee => "Add Employee",
            Action::ViewEmployees => "View Employees",
            Action::ViewEmployeesByDepartment => "View Employees by Department",
            Action::ViewEmployeesByRole => "View Employees by Role",
            Action::ViewEmployeesByManager => "View Employees by Manager",
            Action::UpdateEmployeeRole => "Update Employee Role",
            Action::UpdateEmployeeManager => "Update Employee Manager",
            Action::DeleteEmployee => "Delete Employee",
        }
    }

    /// View actions are followed by the "what next" sub-prompt.
    pub fn is_view(self) -> bool {
        matches!(
            self,
            Action::ViewDepartments
                | Action::ViewRoles
                | Action::ViewEmployees
                | Action::ViewEmployeesByDepartment
                | Action::ViewEmployeesByRole
                | Action::ViewEmployeesByManager
        )
    }
}
