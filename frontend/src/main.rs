mod components;
mod presenters;
mod services;

use std::rc::Rc;

use anyhow::Context;
use gloo::events::EventListener;
use shared::{binding_table, EventKind, PayloadError, PresenterConfig};

use crate::services::{dom, Logger};

const COMPONENT: &str = "bootstrap";

/// Defaults, overridden by `<body data-presenter-config="...">` when present
fn read_config() -> (PresenterConfig, Option<PayloadError>) {
    let raw = dom::document()
        .and_then(|doc| doc.body())
        .and_then(|body| body.get_attribute(PresenterConfig::ATTRIBUTE));
    PresenterConfig::resolve(raw.as_deref())
}

/// Attach every binding to the elements currently in the page
fn install(config: Rc<PresenterConfig>) {
    for binding in binding_table(&config) {
        let elements = dom::query_all(&binding.selector);
        Logger::debug_with_component(
            COMPONENT,
            &format!("{:?} -> {} element(s) for {}", binding.action, elements.len(), binding.selector),
        );

        match binding.event {
            EventKind::Ready => {
                for element in &elements {
                    presenters::run(binding.action, element, &config);
                }
            }
            EventKind::Click | EventKind::Input => {
                for element in elements {
                    let action = binding.action;
                    let config = Rc::clone(&config);
                    let target = element.clone();
                    EventListener::new(&element, binding.event.dom_name(), move |_| {
                        presenters::run(action, &target, &config);
                    })
                    .forget();
                }
            }
        }
    }
    Logger::info_with_component(COMPONENT, "presenters installed");
}

fn when_ready(f: impl FnOnce() + 'static) -> anyhow::Result<()> {
    let document = dom::document().context("document is not available")?;
    if document.ready_state() == "loading" {
        EventListener::once(&document, EventKind::Ready.dom_name(), move |_| f()).forget();
    } else {
        f();
    }
    Ok(())
}

fn start() -> anyhow::Result<()> {
    let (config, config_error) = read_config();
    Logger::init(config.log_level);
    if let Some(e) = config_error {
        Logger::warn_with_component(COMPONENT, &format!("ignoring presenter config: {}", e));
    }

    let config = Rc::new(config);
    when_ready(move || install(config))
}

fn main() {
    if let Err(e) = start() {
        Logger::error_with_component(COMPONENT, &format!("{:#}", e));
    }
}
