//! Menu state machine.
//!
//! The machine only remembers which menu it is in. Every menu is rendered from
//! a fixed table, so coming back to a menu shows it exactly as before.

use crate::core::actions::Action;
use crate::core::{forms, handlers};
use crate::domain::model::Outcome;
use crate::domain::ports::{Database, Presenter};
use crate::utils::error::{Result, TrackerError};

const SEPARATOR: &str = "----------------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuState {
    Main,
    Departments,
    Roles,
    Employees,
    Exit,
}

/// What a menu entry leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    GoTo(MenuState),
    Perform(Action),
    Exit,
}

/// The fixed sub-prompt shown after a view action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterView {
    BackToMenu,
    BackToMain,
    Exit,
}

const fn perform(action: Action) -> (&'static str, Selection) {
    (action.label(), Selection::Perform(action))
}

const MAIN_MENU: &[(&str, Selection)] = &[
    ("Go to Departments ==>", Selection::GoTo(MenuState::Departments)),
    ("Go to Employees ==>", Selection::GoTo(MenuState::Employees)),
    ("Go to Roles ==>", Selection::GoTo(MenuState::Roles)),
    ("Exit App.", Selection::Exit),
];

const DEPARTMENTS_MENU: &[(&str, Selection)] = &[
    perform(Action::ViewDepartments),
    perform(Action::AddDepartment),
    perform(Action::DeleteDepartment),
    ("Go back to Main Page.", Selection::GoTo(MenuState::Main)),
    ("Exit Program", Selection::Exit),
];

const ROLES_MENU: &[(&str, Selection)] = &[
    perform(Action::ViewRoles),
    perform(Action::AddRole),
    perform(Action::DeleteRole),
    ("Go back to Main Page.", Selection::GoTo(MenuState::Main)),
    ("Exit Program", Selection::Exit),
];

const EMPLOYEES_MENU: &[(&str, Selection)] = &[
    perform(Action::AddEmployee),
    perform(Action::ViewEmployees),
    perform(Action::ViewEmployeesByDepartment),
    perform(Action::ViewEmployeesByRole),
    perform(Action::ViewEmployeesByManager),
    perform(Action::UpdateEmployeeRole),
    perform(Action::UpdateEmployeeManager),
    perform(Action::DeleteEmployee),
    ("Go back to Main Page.", Selection::GoTo(MenuState::Main)),
    ("Exit Program", Selection::Exit),
];

impl MenuState {
    pub fn prompt(self) -> &'static str {
        match self {
            MenuState::Main => "Welcome to the Employee Manager : What would you like to do?",
            MenuState::Departments => "What would you like to do in departments?",
            MenuState::Roles => "What would you like to do in Roles?",
            MenuState::Employees => "What would you like to do in employees?",
            MenuState::Exit => "",
        }
    }

    /// Ordered menu entries. `Exit` has none.
    pub fn entries(self) -> &'static [(&'static str, Selection)] {
        match self {
            MenuState::Main => MAIN_MENU,
            MenuState::Departments => DEPARTMENTS_MENU,
            MenuState::Roles => ROLES_MENU,
            MenuState::Employees => EMPLOYEES_MENU,
            MenuState::Exit => &[],
        }
    }

    pub fn labels(self) -> Vec<String> {
        self.entries()
            .iter()
            .map(|(label, _)| label.to_string())
            .collect()
    }

    pub fn selection(self, index: usize) -> Option<Selection> {
        self.entries().get(index).map(|(_, selection)| *selection)
    }

    /// Label of the "back to this menu" entry in the after-view prompt.
    fn back_label(self) -> &'static str {
        match self {
            MenuState::Departments => "Go back to Department page.",
            MenuState::Roles => "Go Back to Roles page.",
            MenuState::Employees => "Go Back to Employees Page",
            MenuState::Main | MenuState::Exit => "Go back to Main Page.",
        }
    }
}

impl AfterView {
    pub const ALL: [AfterView; 3] = [AfterView::BackToMenu, AfterView::BackToMain, AfterView::Exit];

    pub fn labels(menu: MenuState) -> Vec<String> {
        Self::ALL
            .iter()
            .map(|choice| match choice {
                AfterView::BackToMenu => menu.back_label().to_string(),
                AfterView::BackToMain => "Go back to Main Page.".to_string(),
                AfterView::Exit => "Exit Program".to_string(),
            })
            .collect()
    }
}

/// Where a plain menu selection leads once its action (if any) finished
/// without a view follow-up.
pub fn transition(selection: Selection) -> MenuState {
    match selection {
        Selection::GoTo(state) => state,
        Selection::Perform(_) => MenuState::Main,
        Selection::Exit => MenuState::Exit,
    }
}

pub fn after_view(menu: MenuState, choice: AfterView) -> MenuState {
    match choice {
        AfterView::BackToMenu => menu,
        AfterView::BackToMain => MenuState::Main,
        AfterView::Exit => MenuState::Exit,
    }
}

/// Drives the menus until the operator exits. Owns the database connection
/// and closes it exactly once on the way out.
pub struct Navigator<D: Database, P: Presenter> {
    db: D,
    presenter: P,
}

impl<D: Database, P: Presenter> Navigator<D, P> {
    pub fn new(db: D, presenter: P) -> Self {
        Self { db, presenter }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Runs from the main menu until `Exit`, then closes the connection and
    /// hands the presenter back.
    pub async fn run(mut self) -> Result<P> {
        let mut state = MenuState::Main;

        while state != MenuState::Exit {
            state = match self.step(state).await {
                Ok(next) => next,
                Err(TrackerError::InputClosed) => {
                    tracing::info!("Input closed, leaving the menus");
                    MenuState::Exit
                }
                Err(e) => {
                    tracing::error!("Unrecoverable error: {}", e);
                    self.presenter.notify(&format!("❌ {}", e.user_friendly_message()));
                    self.shutdown()?;
                    return Err(e);
                }
            };
        }

        self.shutdown()
    }

    /// Shows one menu and follows the operator's selection.
    pub async fn step(&mut self, state: MenuState) -> Result<MenuState> {
        if state == MenuState::Exit {
            return Ok(MenuState::Exit);
        }

        let labels = state.labels();
        let index = self.presenter.choose(state.prompt(), &labels).await?;
        let selection = state.selection(index).ok_or_else(|| {
            TrackerError::validation("menu choice", format!("no option number {}", index + 1))
        })?;
        tracing::debug!("{:?} menu -> {:?}", state, selection);

        match selection {
            Selection::Perform(action) => self.perform(state, action).await,
            other => Ok(transition(other)),
        }
    }

    async fn perform(&mut self, menu: MenuState, action: Action) -> Result<MenuState> {
        match self.run_action(action).await {
            Ok(outcome) => {
                self.presenter.notify(&outcome.message);
                match &outcome.rows {
                    Some(rows) => self.presenter.render_table(rows),
                    None => self.presenter.notify(SEPARATOR),
                }

                if action.is_view() {
                    self.ask_after_view(menu).await
                } else {
                    Ok(MenuState::Main)
                }
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(
                    "{} failed ({:?}): {}",
                    action.name(),
                    e.category(),
                    e
                );
                self.presenter.notify(&format!("❌ {}", e.user_friendly_message()));
                self.presenter.notify(SEPARATOR);
                Ok(MenuState::Main)
            }
            Err(e) => Err(e),
        }
    }

    async fn run_action(&mut self, action: Action) -> Result<Outcome> {
        let request = forms::collect(action, &self.db, &mut self.presenter).await?;
        tracing::debug!("Executing {:?}", request);
        handlers::execute(&self.db, request).await
    }

    async fn ask_after_view(&mut self, menu: MenuState) -> Result<MenuState> {
        let labels = AfterView::labels(menu);
        let index = self
            .presenter
            .choose("What would you like to do?", &labels)
            .await?;
        let choice = AfterView::ALL.get(index).copied().ok_or_else(|| {
            TrackerError::validation("menu choice", format!("no option number {}", index + 1))
        })?;
        Ok(after_view(menu, choice))
    }

    fn shutdown(self) -> Result<P> {
        let Navigator { db, mut presenter } = self;
        presenter.notify("Disconnecting from database...");
        db.close()?;
        presenter.notify("Connection terminated.");
        tracing::info!("Database connection closed");
        Ok(presenter)
    }
}
