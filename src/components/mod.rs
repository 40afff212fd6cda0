mod task_widget;
mod terminal_widget;

pub use task_widget::TaskPanel;
pub use terminal_widget::TerminalView;
