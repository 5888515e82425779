//! Render use cases: markdown and GitHub annotations from in-memory reports.

use importguard_types::ImportguardReport;

use crate::report::to_renderable;

pub fn render_markdown(report: &ImportguardReport) -> String {
    importguard_render::render_markdown(&to_renderable(report))
}

pub fn render_annotations(report: &ImportguardReport, max: usize) -> Vec<String> {
    importguard_render::render_github_annotations(&to_renderable(report), max)
}
