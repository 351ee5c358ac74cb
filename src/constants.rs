//! Constants used throughout the application
//!
//! User-facing notification titles and validation messages live here so the
//! screens, the repositories and the CLI word things the same way.

// Notification titles for failed backend calls
pub const ERROR_BOARDS_LOAD_FAILED: &str = "Loading boards failed";
pub const ERROR_BOARD_CREATE_FAILED: &str = "Error adding board";
pub const ERROR_BOARD_UPDATE_FAILED: &str = "Error updating board";
pub const ERROR_BOARD_DELETE_FAILED: &str = "Error deleting board";
pub const ERROR_COLUMNS_LOAD_FAILED: &str = "Loading columns failed";
pub const ERROR_COLUMN_CREATE_FAILED: &str = "Error adding column";
pub const ERROR_COLUMN_UPDATE_FAILED: &str = "Error updating column";
pub const ERROR_COLUMN_DELETE_FAILED: &str = "Error deleting column";
pub const ERROR_TASKS_LOAD_FAILED: &str = "Loading tasks failed";
pub const ERROR_TASK_CREATE_FAILED: &str = "Error adding task";
pub const ERROR_TASK_UPDATE_FAILED: &str = "Error updating task";
pub const ERROR_SIGN_IN_FAILED: &str = "Sign-in failed";
pub const ERROR_SIGN_UP_FAILED: &str = "Sign-up failed";
pub const ERROR_SIGN_OUT_FAILED: &str = "Error signing out";

// Validation messages (no backend call is made)
pub const VALIDATION_BOARD_FIELDS: &str = "Please enter a board name and description";
pub const VALIDATION_COLUMN_NAME: &str = "Please enter a column name";
pub const VALIDATION_TASK_TITLE: &str = "Please enter a task title";
pub const VALIDATION_TASK_COLUMN: &str = "Please select a column for the task";
pub const VALIDATION_DUE_DATE: &str = "Please enter the due date as YYYY-MM-DD HH:MM";
pub const VALIDATION_NOTHING_TO_SAVE: &str = "Nothing is being edited";
pub const VALIDATION_TITLE: &str = "Invalid input";

// Success messages
pub const SUCCESS_SIGN_UP_CONFIRM: &str = "Sign-up successful! Please check your email for confirmation.";
pub const SUCCESS_SIGNED_IN: &str = "Signed in as";
pub const SUCCESS_SIGNED_OUT: &str = "Signed out";

// CLI messages
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
pub const ERROR_NOT_SIGNED_IN: &str = "Not signed in. Run `taskboard signin` first.";
