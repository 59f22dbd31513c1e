//! Executor admin console: table filtering and paging, settings form,
//! DLQ actions, all driven through a [`View`].
mod component;
pub use component::{ComponentLoader, Layout, error_fragment};

mod controller;
pub use controller::Console;

mod error;
pub use error::{ConsoleError, ConsoleResult};

mod filter;
pub use filter::{StatusFilter, filter_executors};

mod page;
pub use page::{PageInfo, paginate, pagination_info};

mod snake;
pub use snake::to_snake_case;

mod state;
pub use state::{ConsoleState, DEFAULT_PAGE_SIZE, UiMode};

mod view;
pub use view::{FormView, TableRow, TableView, View};
