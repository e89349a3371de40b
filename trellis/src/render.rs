//! Caller-supplied renderers with a built-in fallback.

use std::sync::Arc;

use log::warn;
use webdom::Element;

use crate::error::RenderError;

/// A custom renderer for one part of a widget (separator, badge, empty state).
pub type Renderer<T> = Arc<dyn Fn(&T) -> Result<Element, RenderError> + Send + Sync>;

/// Wrap a closure as a `Renderer`.
pub fn renderer<T: ?Sized>(
    f: impl Fn(&T) -> Result<Element, RenderError> + Send + Sync + 'static,
) -> Renderer<T> {
    Arc::new(f)
}

/// Run `custom` if present, falling back to `default` when it is absent or
/// fails. Failures are logged, never propagated.
pub fn render_or_default<T: ?Sized>(
    custom: Option<&Renderer<T>>,
    input: &T,
    part: &str,
    default: impl FnOnce() -> Element,
) -> Element {
    match custom.map(|render| render(input)) {
        Some(Ok(element)) => element,
        Some(Err(err)) => {
            warn!("custom {part} renderer failed, using default: {err}");
            default()
        }
        None => default(),
    }
}
