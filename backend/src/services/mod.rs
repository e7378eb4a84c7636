//! Service layer.
//!
//! Orchestrates the normalizer and renderer into a complete document render.
//! HTTP handlers and library callers both go through here.

pub mod semester_plan;


pub use semester_plan::{
    prepare_render, render_json_request, render_semester_plan, render_with_surface, PreparedRender,
    RenderedDocument,
};
