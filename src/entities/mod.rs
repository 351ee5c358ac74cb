pub mod board;
pub mod column;
pub mod task;
pub mod user;

pub use board::Entity as Board;
pub use column::Entity as Column;
pub use task::Entity as Task;
pub use user::Entity as User;
