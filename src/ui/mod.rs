pub mod renderer;
pub mod themes;

pub use renderer::{render_template, Renderer, TemplateRenderer, TemplateVars};
pub use themes::{TemplateSet, ThemePresets};
