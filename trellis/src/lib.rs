pub mod config;
pub mod controlled;
pub mod error;
pub mod handler_context;
pub mod prelude;
pub mod render;
pub mod state;
pub mod timer;
pub mod toggle_set;
pub mod types;
pub mod widgets;

pub use config::TrellisConfig;
pub use error::{ConfigError, RenderError};
pub use handler_context::{
    call_handler, emit, handler, EventData, Handler, HandlerContext, HandlerRegistry,
    RegistryScope, WidgetHandlers,
};
pub use state::State;
