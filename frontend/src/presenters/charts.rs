use shared::chart::{self, ATTR_CHART_DATA};
use shared::{PresenterConfig, RenderError};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement};

use crate::components::PlottersRenderer;
use crate::services::{dom, Logger};

const COMPONENT: &str = "charts";

fn renderer_for(element: &Element, config: &PresenterConfig) -> Option<PlottersRenderer> {
    let canvas = element.dyn_ref::<HtmlCanvasElement>()?;
    Some(PlottersRenderer::new(canvas.clone(), config.canvas))
}

fn report(chart_name: &str, outcome: Result<bool, RenderError>) {
    match outcome {
        Ok(true) => Logger::debug_with_component(COMPONENT, &format!("{} chart drawn", chart_name)),
        Ok(false) => Logger::debug_with_component(
            COMPONENT,
            &format!("{} chart skipped: payload incomplete", chart_name),
        ),
        Err(e) => Logger::warn_with_component(COMPONENT, &format!("{} chart failed: {}", chart_name, e)),
    }
}

pub fn render_income_expense(element: &Element, config: &PresenterConfig) {
    let Some(mut renderer) = renderer_for(element, config) else {
        Logger::warn_with_component(COMPONENT, "income/expense target is not a canvas");
        return;
    };
    let payload = dom::attr(element, ATTR_CHART_DATA);
    report(
        "income/expense",
        chart::render_income_expense(&mut renderer, payload.as_deref(), config),
    );
}

pub fn render_occupancy(element: &Element, config: &PresenterConfig) {
    let Some(mut renderer) = renderer_for(element, config) else {
        Logger::warn_with_component(COMPONENT, "occupancy target is not a canvas");
        return;
    };
    let payload = dom::attr(element, ATTR_CHART_DATA);
    report("occupancy", chart::render_occupancy(&mut renderer, payload.as_deref()));
}
